use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::model::{FruitOption, Order, OrderAck};
use super::selection::Selection;
use crate::database::{DataAccessError, Warehouse, WarehouseSession};
use crate::food::analysis::{NutritionResolver, Resolution};
use crate::food::api::NutritionApi;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    Idle,
    CatalogLoaded,
    SelectionPending,
    NutritionDisplayed,
    OrderSubmitted,
    Failed,
}

/// Everything one pass of the order form needs. Each interaction builds a
/// fresh request; nothing carries over between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OrderRequest {
    #[serde(default)]
    pub name_on_order: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub submit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "level", content = "message", rename_all = "snake_case")]
pub enum Banner {
    Success(String),
    Warning(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FruitNutrition {
    pub fruit: String,
    #[serde(flatten)]
    pub resolution: Resolution,
}

/// Outcome of one run, rendered by the web page, the JSON API and the terminal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub state: WorkflowState,
    pub name_on_order: String,
    pub options: Vec<FruitOption>,
    pub selection: Vec<String>,
    pub nutrition: Vec<FruitNutrition>,
    pub banners: Vec<Banner>,
    pub order: Option<OrderAck>,
}

impl RunReport {
    fn new(request: &OrderRequest) -> Self {
        Self {
            state: WorkflowState::Idle,
            name_on_order: request.name_on_order.clone(),
            options: Vec::new(),
            selection: Vec::new(),
            nutrition: Vec::new(),
            banners: Vec::new(),
            order: None,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.banners.iter().any(|b| matches!(b, Banner::Error(_)))
    }

    fn advance(&mut self, next: WorkflowState) {
        debug!("Workflow {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn fail(&mut self, e: DataAccessError) {
        error!("Workflow failed: {}", e);
        self.banners.push(Banner::Error(format!("Could not reach the fruit warehouse: {}", e)));
        self.advance(WorkflowState::Failed);
    }
}

/// Workflow controller: catalog -> selection -> nutrition -> order.
#[derive(Clone)]
pub struct OrderWorkflow {
    warehouse: Arc<dyn Warehouse>,
    nutrition: Arc<dyn NutritionApi>,
}

impl OrderWorkflow {
    pub fn new(warehouse: Arc<dyn Warehouse>, nutrition: Arc<dyn NutritionApi>) -> Self {
        Self { warehouse, nutrition }
    }

    /// Loads the fruit catalog in a session of its own.
    pub async fn catalog(&self) -> Result<Vec<FruitOption>, DataAccessError> {
        let session = self.warehouse.open().await?;
        let options = session.list_fruit_options().await;
        release(session).await;
        options
    }

    /// Runs the form once from the top. Errors never escape: they end up as
    /// banners on the report. The warehouse session is closed on every path.
    pub async fn run(&self, request: &OrderRequest) -> RunReport {
        let mut report = RunReport::new(request);

        let session = match self.warehouse.open().await {
            Ok(session) => session,
            Err(e) => {
                report.fail(e);
                return report;
            }
        };

        if let Err(e) = self.drive(session.as_ref(), request, &mut report).await {
            report.fail(e);
        }
        release(session).await;

        report
    }

    async fn drive(
        &self,
        session: &dyn WarehouseSession,
        request: &OrderRequest,
        report: &mut RunReport,
    ) -> Result<(), DataAccessError> {
        report.options = session.list_fruit_options().await?;
        report.advance(WorkflowState::CatalogLoaded);

        let mut selection = Selection::new();
        for name in &request.ingredients {
            if let Err(e) = selection.add(name, &report.options) {
                warn!("Rejected ingredient: {}", e);
                report.banners.push(Banner::Warning(e.to_string()));
            }
        }
        report.selection = selection.names();

        if !selection.is_empty() {
            report.advance(WorkflowState::SelectionPending);

            let mut resolver = NutritionResolver::new(self.nutrition.as_ref());
            for fruit in selection.fruits() {
                let resolution = resolver.resolve(fruit).await;
                if let Resolution::NotFound { message } = &resolution {
                    report.banners.push(Banner::Warning(message.clone()));
                }
                report.nutrition.push(FruitNutrition {
                    fruit: fruit.name.clone(),
                    resolution,
                });
            }

            report.advance(WorkflowState::NutritionDisplayed);
        }

        if request.submit {
            let order = Order::new(&selection, request.name_on_order.clone());
            match session.submit_order(&order).await {
                Ok(ack) => {
                    info!(
                        "Order {} placed for '{}': {}",
                        ack.order_id, order.name_on_order, order.ingredients
                    );
                    report.banners.push(Banner::Success(format!(
                        "Your Smoothie is ordered, {}!",
                        order.name_on_order
                    )));
                    report.order = Some(ack);
                    report.advance(WorkflowState::OrderSubmitted);
                }
                Err(e) => {
                    error!("Order submission failed: {}", e);
                    report
                        .banners
                        .push(Banner::Error(format!("Your order could not be placed: {}", e)));
                }
            }
        }

        Ok(())
    }
}

async fn release(session: Box<dyn WarehouseSession>) {
    if let Err(e) = session.close().await {
        warn!("Failed to close warehouse session: {}", e);
    }
}
