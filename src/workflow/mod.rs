pub mod controller;
pub mod model;
pub mod selection;

pub use controller::{Banner, FruitNutrition, OrderRequest, OrderWorkflow, RunReport, WorkflowState};
pub use model::{FruitOption, Order, OrderAck};
pub use selection::{Selection, SelectionError, MAX_SELECTIONS};
