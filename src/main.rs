use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use dotenv::dotenv;
use log::info;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use smoothie_orders::api;
use smoothie_orders::commands::{CommandHandler, CommandOutcome};
use smoothie_orders::database::DEFAULT_FRUITS;
use smoothie_orders::{AppConfig, FruitApiClient, OrderWorkflow, SqliteWarehouse};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Serve the order form over HTTP instead of the terminal
    #[arg(long)]
    api: bool,

    #[arg(long, default_value = "3000")]
    port: u16,

    /// Create the tables and load the default fruit list before starting
    #[arg(long)]
    init: bool,

    /// SQLite database file, overrides SMOOTHIE_DB_PATH
    #[arg(long)]
    db: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize colored output
    colored::control::set_override(true);

    // Load environment variables
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();

    let mut config = AppConfig::from_env().context("Invalid configuration")?;
    if let Some(db) = &args.db {
        config.database_path = db.clone();
    }

    let warehouse = SqliteWarehouse::new(&config.database_path, config.tables.clone());
    if args.init {
        warehouse.initialize().await?;
        let added = warehouse.seed_catalog(DEFAULT_FRUITS).await?;
        println!("Loaded {} new fruit options into {}", added, config.database_path.display());
    }

    let nutrition = FruitApiClient::new(config.nutrition.clone())?;
    info!("Using nutrition API at {}", nutrition.base_url());

    let workflow = OrderWorkflow::new(Arc::new(warehouse), Arc::new(nutrition));

    if args.api {
        run_api_server(workflow, args.port).await
    } else {
        run_cli_mode(workflow).await
    }
}

async fn run_cli_mode(workflow: OrderWorkflow) -> Result<()> {
    println!("{}", "🥤 Customize Your Smoothie! 🥤".bold());
    println!("Choose the fruits you want in your custom Smoothie! Type 'help' for commands.");

    let mut command_handler = CommandHandler::new(workflow);
    if let Err(e) = command_handler.start().await {
        println!("{}", e.red());
    }

    // Initialize rustyline editor
    let mut rl = Editor::<(), DefaultHistory>::new()?;

    // Main input loop
    loop {
        match rl.readline("🍹 ") {
            Ok(line) => {
                let input = line.trim();
                let _ = rl.add_history_entry(input);

                match command_handler.handle_command(input).await {
                    Ok(CommandOutcome::Exit) => break,
                    Ok(CommandOutcome::Continue) => {}
                    Err(e) => println!("{}", e.red()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}

async fn run_api_server(workflow: OrderWorkflow, port: u16) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = api::create_api(workflow);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Smoothie order form listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
