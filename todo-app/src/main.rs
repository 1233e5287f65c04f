use clap::Parser;
use std::process::ExitCode;
use todo_app::TaskRepository;
use todo_app::cli::TodoCli;
use todo_app::config::Config;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Interactive in-memory task tracker")]
struct Cli {
    /// Log filter directive, e.g. `todo_app=debug`. Overrides TODO_APP_LOG_FILTER.
    #[arg(long)]
    log_level: Option<String>,

    /// Skip the welcome banner.
    #[arg(long)]
    no_banner: bool,
}

fn main() -> ExitCode {
    let args = Cli::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("\n💥 Unexpected error: {e:#}");
            eprintln!("Please report this issue if it persists.");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Cli) -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let filter = args.log_level.unwrap_or(config.log_filter);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&filter)?)
        .with_writer(std::io::stderr)
        .init();

    ctrlc::set_handler(|| {
        println!("\n\n⚠️  Application interrupted by user. Exiting...");
        std::process::exit(0);
    })?;

    info!("Starting todo app...");
    let mut repository = TaskRepository::new();
    let stdin = std::io::stdin();
    // stdout stays unlocked between writes so the interrupt handler can print
    TodoCli::new(&mut repository, stdin.lock(), std::io::stdout())
        .with_banner(config.show_banner && !args.no_banner)
        .run()
}
