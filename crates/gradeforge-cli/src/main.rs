//! gradeforge CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "gradeforge", version, about = "Classroom assignment auto-grading engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade submission source files
    Grade {
        /// Submission source files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Submission title (single file only; defaults to the file stem)
        #[arg(long)]
        title: Option<String>,

        /// Custom catalog TOML file or directory, overlaid on the built-ins
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Directory for rendered reports
        #[arg(long)]
        output: Option<PathBuf>,

        /// Report formats: text, json, html (comma-separated, or "all")
        #[arg(long, default_value = "text")]
        format: String,

        /// Max test cases replayed concurrently
        #[arg(long, default_value = "4")]
        parallelism: usize,

        /// Exit code 1 if any submission fails
        #[arg(long)]
        fail_on_failing: bool,
    },

    /// Validate catalog TOML files
    Validate {
        /// Catalog file or directory
        #[arg(long)]
        catalog: PathBuf,
    },

    /// List categories and their test batteries
    Categories {
        /// Custom catalog overlaid on the built-ins
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Create a starter catalog and sample submission
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gradeforge=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Grade {
            files,
            title,
            catalog,
            output,
            format,
            parallelism,
            fail_on_failing,
        } => {
            commands::grade::execute(
                files,
                title,
                catalog,
                output,
                format,
                parallelism,
                fail_on_failing,
            )
            .await
        }
        Commands::Validate { catalog } => commands::validate::execute(catalog),
        Commands::Categories { catalog } => commands::categories::execute(catalog),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
