use clap::{Parser, Subcommand};

mod commands;
mod shell;

#[derive(Parser)]
#[command(name = "devdocket", version, about = "DevDocket developer dashboard")]
struct Cli {
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Coding practice tracker
    Problem {
        #[command(subcommand)]
        action: commands::problem::ProblemAction,
    },
    /// Micro journal
    Journal {
        #[command(subcommand)]
        action: commands::journal::JournalAction,
    },
    /// Bug vault
    Bug {
        #[command(subcommand)]
        action: commands::bug::BugAction,
    },
    /// Tech stack switch planner
    Plan {
        #[command(subcommand)]
        action: commands::plan::PlanAction,
    },
    /// Break Buddy timer
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Dark/light mode
    Theme {
        #[command(subcommand)]
        action: commands::config::ThemeAction,
    },
    /// Summary across all widgets
    Dashboard,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("DEVDOCKET_LOG")
        .unwrap_or_else(|_| "warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = shell::Shell::open(cli.json).and_then(|mut shell| match cli.command {
        Commands::Problem { action } => commands::problem::run(&shell, action),
        Commands::Journal { action } => commands::journal::run(&shell, action),
        Commands::Bug { action } => commands::bug::run(&shell, action),
        Commands::Plan { action } => commands::plan::run(&shell, action),
        Commands::Timer { action } => commands::timer::run(&shell, action),
        Commands::Config { action } => commands::config::run(&mut shell, action),
        Commands::Theme { action } => commands::config::run_theme(&mut shell, action),
        Commands::Dashboard => commands::dashboard::run(&shell),
    });

    if let Err(e) = result {
        if !e.is::<shell::Reported>() {
            eprintln!("error: {e}");
        }
        std::process::exit(1);
    }
}
