use anyhow::Result;
use std::sync::Arc;
use tokio::io::{stdin, AsyncBufReadExt, BufReader};
use tracing::info;

use hearth::config::{AppConfig, LOG_ENV};
use hearth::repository::{database, MemoryKeyValueStorage, Repository, SharedStorage};
use hearth::services::error_handling::{LogHelper, UserErrorFormatter};
use hearth::services::{AppEvent, HouseApp, HouseLoader};
use hearth::ui::list_view::HELP;
use hearth::ui::{Command, HouseListView};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;

    // Initialize logging; stdout is reserved for the listing table
    tracing_subscriber::fmt()
        .with_env_filter(config.log_filter(std::env::var(LOG_ENV).ok()))
        .with_writer(std::io::stderr)
        .init();

    let storage: SharedStorage = if config.ephemeral {
        info!("Running with in-memory storage");
        Arc::new(MemoryKeyValueStorage::new())
    } else {
        let pool = database::init_database(&config.database_path).await?;
        Repository::new(pool).storage()
    };

    let mut app = HouseApp::init(storage).await?;
    let loader = match &config.seed_file {
        Some(path) => HouseLoader::from_json_file(config.load_delay(), path)?,
        None => HouseLoader::new(config.load_delay()),
    };
    app.start_loading(loader);

    let mut view = HouseListView::new();
    let sender = app.sender();
    let mut lines = BufReader::new(stdin()).lines();

    print!("{}", view.render(&app));
    if app.take_initial_focus() {
        println!("{}", HELP);
    }

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match Command::parse(&line) {
                    Ok(Command::Help) => println!("{}", HELP),
                    Ok(Command::List) => print!("{}", view.render(&app)),
                    Ok(command) => {
                        if let Some(intent) = command.into_intent() {
                            sender.send(intent)?;
                        }
                    }
                    Err(e) => println!("{}", e),
                }
            }
            intent = app.recv_intent() => {
                let event = match app.apply(intent).await {
                    Ok(event) => event,
                    Err(e) => {
                        LogHelper::log_error_with_context("apply_intent", &e);
                        println!("{}", UserErrorFormatter::format_for_ui(&e));
                        return Err(e);
                    }
                };
                match event {
                    AppEvent::Shutdown => break,
                    AppEvent::Rejected { reason } => println!("{}", reason),
                    _ => print!("{}", view.render(&app)),
                }
            }
        }
    }

    info!("Goodbye");
    Ok(())
}
