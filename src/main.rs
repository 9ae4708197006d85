use clap::{Arg, ArgAction, Command};
use color_eyre::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use taskboard::adapters::http::{self, AppState};
use taskboard::adapters::store::{sample_tasks, InMemoryTaskRepository};
use taskboard::application::TaskService;

const DEFAULT_BIND: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let matches = Command::new("taskboard")
        .version("0.1.0")
        .about("A single-user task management web service")
        .arg(
            Arg::new("bind")
                .long("bind")
                .value_name("ADDR")
                .help("Address to listen on (default 127.0.0.1:3000)"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .action(ArgAction::SetTrue)
                .help("Start with a set of demo tasks"),
        )
        .arg(
            Arg::new("latency-ms")
                .long("latency-ms")
                .value_name("MS")
                .help("Artificial delay added to every response, for exercising loading states"),
        )
        .get_matches();

    let addr: SocketAddr = matches
        .get_one::<String>("bind")
        .map(String::as_str)
        .unwrap_or(DEFAULT_BIND)
        .parse()?;

    let latency_ms: u64 = match matches.get_one::<String>("latency-ms") {
        Some(raw) => raw.parse()?,
        None => 0,
    };
    let latency = (latency_ms > 0).then(|| Duration::from_millis(latency_ms));

    let repository = if matches.get_flag("seed") {
        tracing::info!("Seeding the store with demo tasks");
        Arc::new(InMemoryTaskRepository::with_tasks(sample_tasks()))
    } else {
        Arc::new(InMemoryTaskRepository::new())
    };

    let service = TaskService::new(repository);
    let state = Arc::new(AppState { service });

    let router = http::router(state, latency);
    http::serve(addr, router).await
}
