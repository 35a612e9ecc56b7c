use crate::food::analysis::{flatten_record, Resolution};
use crate::workflow::{Banner, RunReport, MAX_SELECTIONS};

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Renders the order form for one run: banners, the form itself with the
/// current input filled back in, then a nutrition table per chosen fruit.
pub fn render_page(report: &RunReport) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Customize Your Smoothie!</title>\n</head>\n<body>\n\
         <h1>🥤 Customize Your Smoothie! 🥤</h1>\n\
         <p>Choose the fruits you want in your custom Smoothie!</p>\n",
    );

    for banner in &report.banners {
        let (class, icon, message) = match banner {
            Banner::Success(m) => ("success", "✅", m),
            Banner::Warning(m) => ("warning", "⚠️", m),
            Banner::Error(m) => ("error", "❌", m),
        };
        html.push_str(&format!(
            "<div class=\"banner {}\">{} {}</div>\n",
            class,
            icon,
            escape_html(message)
        ));
    }

    let name = escape_html(&report.name_on_order);
    html.push_str("<form method=\"post\" action=\"/\">\n");
    html.push_str(&format!(
        "<label>Name on Smoothie: <input type=\"text\" name=\"name_on_order\" value=\"{}\"></label>\n\
         <p>The name on your Smoothie will be: {}</p>\n",
        name, name
    ));

    html.push_str(&format!(
        "<label>Choose up to {} ingredients:<br>\n<select name=\"ingredients\" multiple size=\"{}\">\n",
        MAX_SELECTIONS,
        report.options.len().clamp(1, 12)
    ));
    for option in &report.options {
        let selected = if report.selection.contains(&option.name) {
            " selected"
        } else {
            ""
        };
        let value = escape_html(&option.name);
        html.push_str(&format!(
            "<option value=\"{}\"{}>{}</option>\n",
            value, selected, value
        ));
    }
    html.push_str("</select></label>\n");
    html.push_str(
        "<p><button type=\"submit\">Show nutrition</button>\n\
         <button type=\"submit\" name=\"submit\" value=\"1\">Submit Order</button></p>\n</form>\n",
    );

    for item in &report.nutrition {
        html.push_str(&format!(
            "<h2>{} Nutrition Information</h2>\n",
            escape_html(&item.fruit)
        ));
        match &item.resolution {
            Resolution::Found { record, .. } => {
                html.push_str("<table>\n<tr><th>Field</th><th>Value</th></tr>\n");
                for (field, value) in flatten_record(record) {
                    html.push_str(&format!(
                        "<tr><td>{}</td><td>{}</td></tr>\n",
                        escape_html(&field),
                        escape_html(&value)
                    ));
                }
                html.push_str("</table>\n");
            }
            Resolution::NotFound { message } => {
                html.push_str(&format!("<p class=\"missing\">{}</p>\n", escape_html(message)));
            }
        }
    }

    html.push_str("</body>\n</html>\n");
    html
}
