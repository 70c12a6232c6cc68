mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{generate::GenerateSubcommand, pack::PackSubcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cogcore",
    about = "cognitive-core — install universal skills, hooks, and agents into assistant platforms",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from cognitive-core.conf or .git/)
    #[arg(long, global = true, env = "COGCORE_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install skills, hooks, and agents for one platform adapter
    Install {
        /// Target platform (claude-code, aider)
        #[arg(long)]
        adapter: String,

        /// Flat key=value configuration file (default: <root>/cognitive-core.conf)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Regenerate the project guide even if one exists
        #[arg(long)]
        force: bool,

        /// Extension pack directory (repeatable)
        #[arg(long = "pack")]
        packs: Vec<PathBuf>,

        /// Skip packs that fail to load instead of aborting the run
        #[arg(long)]
        allow_partial_packs: bool,
    },

    /// Check an adapter against the contract without writing anything
    Validate {
        /// Target platform (claude-code, aider)
        adapter: String,
    },

    /// Preview a generated artifact on stdout
    Generate {
        #[command(subcommand)]
        subcommand: GenerateSubcommand,
    },

    /// Inspect or score extension packs
    Pack {
        #[command(subcommand)]
        subcommand: PackSubcommand,
    },

    /// List the skills an install would carry
    Skills {
        /// Extension pack directory (repeatable)
        #[arg(long = "pack")]
        packs: Vec<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Install {
            adapter,
            config,
            force,
            packs,
            allow_partial_packs,
        } => cmd::install::run(
            &root,
            &adapter,
            config.as_deref(),
            force,
            &packs,
            allow_partial_packs,
            cli.json,
        ),
        Commands::Validate { adapter } => cmd::validate::run(&root, &adapter, cli.json),
        Commands::Generate { subcommand } => cmd::generate::run(&root, subcommand, cli.json),
        Commands::Pack { subcommand } => cmd::pack::run(&root, subcommand, cli.json),
        Commands::Skills { packs } => cmd::skills::run(&root, &packs, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
