pub mod page;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::{error, info};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use validator::Validate;

use crate::workflow::{OrderRequest, OrderWorkflow, RunReport, WorkflowState, MAX_SELECTIONS};
use page::render_page;

#[derive(Clone)]
pub struct AppState {
    workflow: OrderWorkflow,
}

/// JSON body of `POST /api/orders`.
#[derive(Debug, Deserialize, Validate)]
pub struct OrderPayload {
    #[serde(default)]
    name_on_order: String,
    #[validate(length(max = 5))]
    #[serde(default)]
    ingredients: Vec<String>,
    #[serde(default = "submit_by_default")]
    submit: bool,
}

fn submit_by_default() -> bool {
    true
}

impl From<OrderPayload> for OrderRequest {
    fn from(payload: OrderPayload) -> Self {
        Self {
            name_on_order: payload.name_on_order,
            ingredients: payload.ingredients,
            submit: payload.submit,
        }
    }
}

#[derive(Serialize)]
struct ApiResponse {
    status: String,
}

/// Create and configure the API router
pub fn create_api(workflow: OrderWorkflow) -> Router {
    let state = AppState { workflow };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .route("/", get(form_page).post(submit_form))
        .route("/api/fruits", get(list_fruits))
        .route("/api/orders", post(place_order))
        .route("/health", get(health_check))
        .layer(cors)
        .with_state(state)
}

/// Decodes an `application/x-www-form-urlencoded` body. `ingredients` may repeat;
/// any `submit` field means the confirm button was pressed.
pub fn parse_form(body: &str) -> OrderRequest {
    let mut request = OrderRequest::default();
    for (key, value) in url::form_urlencoded::parse(body.as_bytes()) {
        match key.as_ref() {
            "name_on_order" => request.name_on_order = value.into_owned(),
            "ingredients" => request.ingredients.push(value.into_owned()),
            "submit" => request.submit = true,
            _ => {}
        }
    }
    request
}

fn report_status(report: &RunReport) -> StatusCode {
    if report.state == WorkflowState::Failed || report.has_errors() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    }
}

async fn form_page(State(state): State<AppState>) -> Response {
    let report = state.workflow.run(&OrderRequest::default()).await;
    (report_status(&report), Html(render_page(&report))).into_response()
}

async fn submit_form(State(state): State<AppState>, body: String) -> Response {
    let request = parse_form(&body);
    if request.submit {
        info!("Order form submitted for '{}'", request.name_on_order);
    }

    let report = state.workflow.run(&request).await;
    (report_status(&report), Html(render_page(&report))).into_response()
}

async fn list_fruits(State(state): State<AppState>) -> Response {
    match state.workflow.catalog().await {
        Ok(options) => Json(options).into_response(),
        Err(e) => {
            error!("Catalog error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse { status: format!("Catalog error: {}", e) }),
            )
                .into_response()
        }
    }
}

async fn place_order(State(state): State<AppState>, Json(payload): Json<OrderPayload>) -> Response {
    if let Err(e) = payload.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse {
                status: format!("Choose up to {} ingredients: {}", MAX_SELECTIONS, e),
            }),
        )
            .into_response();
    }

    let report = state.workflow.run(&payload.into()).await;
    (report_status(&report), Json(report)).into_response()
}

async fn health_check() -> Response {
    Json(ApiResponse {
        status: "Server is running and healthy".to_string(),
    })
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::mock::MockWarehouse;
    use crate::food::api::mock::MockNutritionApi;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(warehouse: &MockWarehouse) -> Router {
        let api = MockNutritionApi::new()
            .with_exact("peach", json!({"name": "Peach", "nutritions": {"sugar": 8.4}}))
            .with_listing(vec![]);
        create_api(OrderWorkflow::new(Arc::new(warehouse.clone()), Arc::new(api)))
    }

    fn orchard() -> MockWarehouse {
        MockWarehouse::with_catalog(&[("Peach", Some("peach")), ("Mango", None)])
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_parse_form() {
        let request = parse_form("name_on_order=Ada+L%27ovelace&ingredients=Peach&ingredients=Dragon+Fruit&submit=1");
        assert_eq!(request.name_on_order, "Ada L'ovelace");
        assert_eq!(request.ingredients, vec!["Peach", "Dragon Fruit"]);
        assert!(request.submit);

        assert!(!parse_form("ingredients=Peach").submit);
    }

    #[tokio::test]
    async fn test_form_submission_places_order() {
        let warehouse = orchard();
        let response = app(&warehouse)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("name_on_order=Ada&ingredients=Peach&ingredients=Mango&submit=1"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let page = body_text(response).await;
        assert!(page.contains("Your Smoothie is ordered, Ada!"));
        assert!(page.contains("<td>nutritions.sugar</td><td>8.4</td>"));
        assert_eq!(warehouse.orders()[0].ingredients, "Peach Mango ");
    }

    #[tokio::test]
    async fn test_list_fruits() {
        let response = app(&orchard())
            .oneshot(Request::builder().uri("/api/fruits").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let fruits: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(
            fruits,
            json!([
                {"name": "Peach", "search_alias": "peach"},
                {"name": "Mango", "search_alias": "Mango"}
            ])
        );
    }

    #[tokio::test]
    async fn test_json_order_rejects_six_ingredients() {
        let warehouse = orchard();
        let payload = json!({
            "name_on_order": "Ada",
            "ingredients": ["Peach", "Mango", "Peach", "Mango", "Peach", "Mango"]
        });
        let response = app(&warehouse)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/orders")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(warehouse.orders().is_empty());
    }

    #[tokio::test]
    async fn test_json_order_reports_failed_insert() {
        let warehouse = orchard().orders_down();
        let payload = json!({"name_on_order": "Ada", "ingredients": ["Peach"]});
        let response = app(&warehouse)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/orders")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let report: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(report["state"], json!("nutrition_displayed"));
        assert_eq!(report["banners"][0]["level"], json!("error"));
        assert_eq!(report["nutrition"][0]["status"], json!("found"));
    }

    #[tokio::test]
    async fn test_page_reports_unreachable_warehouse() {
        let response = app(&orchard().unreachable())
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_text(response).await.contains("banner error"));
    }
}
