//! mockwise CLI — interview practice at the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "mockwise",
    version,
    about = "Simulated interview practice with rubric-based scoring"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive interview session
    Start {
        /// Target role, e.g. "Backend Engineer"
        #[arg(long)]
        role: String,

        /// Optional focus domain, e.g. "Distributed Systems"
        #[arg(long)]
        domain: Option<String>,

        /// Interview mode: technical or behavioral
        #[arg(long, default_value = "technical")]
        mode: String,

        /// Question difficulty: easy, medium, hard
        #[arg(long, default_value = "medium")]
        difficulty: String,

        /// Number of questions (1-10)
        #[arg(long, default_value = "5")]
        questions: u8,

        /// LLM proxy base URL (overrides config)
        #[arg(long)]
        server: Option<String>,

        /// State file path (overrides config)
        #[arg(long)]
        state_file: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Export the persisted session (with summary when completed) as JSON
    Export {
        /// Where to write the export
        #[arg(long)]
        output: PathBuf,

        /// State file path (overrides config)
        #[arg(long)]
        state_file: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Clear the persisted session
    Reset {
        /// State file path (overrides config)
        #[arg(long)]
        state_file: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mockwise=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Start {
            role,
            domain,
            mode,
            difficulty,
            questions,
            server,
            state_file,
            config,
        } => {
            commands::start::execute(
                role, domain, mode, difficulty, questions, server, state_file, config,
            )
            .await
        }
        Commands::Export {
            output,
            state_file,
            config,
        } => commands::export::execute(output, state_file, config),
        Commands::Reset { state_file, config } => commands::reset::execute(state_file, config),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
