use colored::Colorize;

use crate::food::analysis::{flatten_record, Resolution};
use crate::workflow::{Banner, FruitOption, RunReport, WorkflowState, MAX_SELECTIONS};

/// Form fields kept between terminal commands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderForm {
    pub name_on_order: String,
    pub ingredients: Vec<String>,
}

/// Maps user input to a catalog name: a 1-based menu number or a
/// case-insensitive fruit name.
pub fn resolve_choice(input: &str, catalog: &[FruitOption]) -> Option<String> {
    let input = input.trim();
    if let Ok(index) = input.parse::<usize>() {
        return index
            .checked_sub(1)
            .and_then(|i| catalog.get(i))
            .map(|option| option.name.clone());
    }

    catalog
        .iter()
        .find(|option| option.name.eq_ignore_ascii_case(input))
        .map(|option| option.name.clone())
}

pub fn print_menu(catalog: &[FruitOption], form: &OrderForm) {
    println!("\n🍓 {}", "Fruit options:".bold());
    for (i, option) in catalog.iter().enumerate() {
        let marker = if form.ingredients.contains(&option.name) { "✓" } else { " " };
        println!("  {} {:>2}. {}", marker.green(), i + 1, option.name);
    }
    println!(
        "Chosen {}/{}: {}",
        form.ingredients.len(),
        MAX_SELECTIONS,
        form.ingredients.join(", ")
    );
}

pub fn print_report(report: &RunReport) {
    for item in &report.nutrition {
        println!("\n🥝 {}", format!("{} Nutrition Information", item.fruit).bold());
        match &item.resolution {
            Resolution::Found { record, .. } => {
                for (field, value) in flatten_record(record) {
                    println!("  {:<24} {}", field.cyan(), value);
                }
            }
            Resolution::NotFound { .. } => println!("  {}", "No nutrition data".dimmed()),
        }
    }

    for banner in &report.banners {
        match banner {
            Banner::Success(message) => println!("✅ {}", message.green()),
            Banner::Warning(message) => println!("⚠️  {}", message.yellow()),
            Banner::Error(message) => println!("❌ {}", message.red()),
        }
    }

    if report.state == WorkflowState::OrderSubmitted {
        if let Some(ack) = &report.order {
            println!("🧾 Order #{} at {}", ack.order_id, ack.submitted_at.format("%H:%M:%S"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_choice() {
        let catalog = vec![
            FruitOption::new("Apples", None),
            FruitOption::new("Dragon Fruit", None),
        ];

        assert_eq!(resolve_choice("2", &catalog), Some("Dragon Fruit".to_string()));
        assert_eq!(resolve_choice(" dragon fruit ", &catalog), Some("Dragon Fruit".to_string()));
        assert_eq!(resolve_choice("0", &catalog), None);
        assert_eq!(resolve_choice("3", &catalog), None);
        assert_eq!(resolve_choice("Durian", &catalog), None);
    }
}
