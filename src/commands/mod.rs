use colored::Colorize;

use crate::workflow::{FruitOption, OrderRequest, OrderWorkflow, RunReport, WorkflowState, MAX_SELECTIONS};

pub mod order_cmd;
mod system;

use order_cmd::{print_menu, print_report, resolve_choice, OrderForm};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Continue,
    Exit,
}

/// Terminal rendition of the order form. Every command re-runs the workflow
/// from the top with the current form contents.
pub struct CommandHandler {
    workflow: OrderWorkflow,
    form: OrderForm,
    catalog: Vec<FruitOption>,
}

impl CommandHandler {
    pub fn new(workflow: OrderWorkflow) -> Self {
        Self {
            workflow,
            form: OrderForm::default(),
            catalog: Vec::new(),
        }
    }

    pub fn form(&self) -> &OrderForm {
        &self.form
    }

    /// Loads the catalog for the first time. Fails if the warehouse is unreachable.
    pub async fn start(&mut self) -> Result<(), String> {
        let report = self.run(false).await;
        if report.state == WorkflowState::Failed {
            print_report(&report);
            return Err("Could not load the fruit options.".to_string());
        }
        print_menu(&self.catalog, &self.form);
        Ok(())
    }

    pub async fn handle_command(&mut self, input: &str) -> Result<CommandOutcome, String> {
        let input = input.trim();
        let (command, arg) = match input.split_once(' ') {
            Some((command, arg)) => (command, arg.trim()),
            None => (input, ""),
        };

        match command.to_lowercase().as_str() {
            "" => {}
            "help" => system::print_help(),
            "exit" | "quit" => {
                println!("👋 Goodbye!");
                return Ok(CommandOutcome::Exit);
            }
            "menu" => {
                self.run(false).await;
                print_menu(&self.catalog, &self.form);
            }
            "name" => {
                self.form.name_on_order = arg.to_string();
                println!("The name on your Smoothie will be: {}", arg.bold());
            }
            "add" => {
                if arg.is_empty() {
                    return Err("Please specify a fruit to add.".to_string());
                }
                let fruit = resolve_choice(arg, &self.catalog)
                    .ok_or_else(|| format!("'{}' is not on the fruit list. Type 'menu' to see it.", arg))?;
                if self.form.ingredients.len() >= MAX_SELECTIONS {
                    return Err(format!("You can only choose up to {} ingredients.", MAX_SELECTIONS));
                }
                if !self.form.ingredients.contains(&fruit) {
                    self.form.ingredients.push(fruit);
                }
                let report = self.run(false).await;
                print_report(&report);
            }
            "remove" => {
                let before = self.form.ingredients.len();
                self.form
                    .ingredients
                    .retain(|fruit| !fruit.eq_ignore_ascii_case(arg));
                if self.form.ingredients.len() == before {
                    return Err(format!("'{}' is not in your smoothie.", arg));
                }
                print_menu(&self.catalog, &self.form);
            }
            "clear" => {
                self.form.ingredients.clear();
                println!("Ingredients cleared.");
            }
            "show" => {
                let report = self.run(false).await;
                print_report(&report);
            }
            "order" => {
                let report = self.run(true).await;
                print_report(&report);
                if report.state == WorkflowState::OrderSubmitted {
                    self.form = OrderForm::default();
                }
            }
            _ => return Err("Unknown command. Type 'help' for available commands.".to_string()),
        }

        Ok(CommandOutcome::Continue)
    }

    async fn run(&mut self, submit: bool) -> RunReport {
        let request = OrderRequest {
            name_on_order: self.form.name_on_order.clone(),
            ingredients: self.form.ingredients.clone(),
            submit,
        };

        let report = self.workflow.run(&request).await;
        if report.state != WorkflowState::Failed {
            self.catalog = report.options.clone();
            self.form.ingredients = report.selection.clone();
        } else {
            println!("{}", "The fruit warehouse is unavailable.".red());
        }
        report
    }
}
