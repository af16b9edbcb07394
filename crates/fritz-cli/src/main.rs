//! fritz - Conventional Commits enforcement for git hooks
//!
//! Run from the directory holding `.git`.
//!
//! ## Commands
//!
//! - `setup`: install hooks for the chosen features and write `fritz.toml`
//! - `cleanup`: remove the installed hooks and `fritz.toml`
//! - `commit-prep`: build a commit message from fields (prepare-commit-msg)
//! - `commit-validate`: check a written commit message (commit-msg)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fritz_core::{
    cleanup, config_path, ensure_repo_root, setup, Commit, CommitConfig, CommitFields, Feature,
    FritzError, NoteRequirements,
};
use tracing::{debug, info, Level};

#[derive(Parser)]
#[command(name = "fritz")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Conventional Commits enforcement for git hooks", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    /// Repository root (the directory holding .git)
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install hooks for the given features (commit-prep, commit-validate)
    Setup {
        /// Features to enable
        features: Vec<String>,
    },

    /// Remove installed hooks and the configuration file
    Cleanup,

    /// Build a commit message from fields and write it to the message file
    CommitPrep {
        /// File location of the commit message
        #[arg(long)]
        location: PathBuf,

        /// Kind of commit (e.g. 'fix')
        #[arg(long = "type", env = "FRITZ_TYPE")]
        kind: String,

        /// Feature it relates to (e.g. 'header-component')
        #[arg(long, env = "FRITZ_SCOPE", default_value = "")]
        scope: String,

        /// Short description of what the commit does
        #[arg(long, env = "FRITZ_SUBJECT")]
        subject: String,

        /// Ticket the commit closes
        #[arg(long, env = "FRITZ_TICKET", default_value = "")]
        ticket: String,

        /// The commit has breaking changes
        #[arg(long, env = "FRITZ_BREAKING")]
        breaking: bool,
    },

    /// Validate the commit message in the message file
    CommitValidate {
        /// File location of the commit message
        #[arg(long)]
        location: PathBuf,

        /// Require a footer line referencing this ticket
        #[arg(long, env = "FRITZ_TICKET", default_value = "")]
        ticket: String,

        /// Require a breaking change note
        #[arg(long, env = "FRITZ_BREAKING")]
        breaking: bool,

        /// Print violations as JSON on stdout
        #[arg(long)]
        report_json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    fritz_core::init_tracing(cli.json, level);

    ensure_repo_root(&cli.root).context("fritz must run next to the .git directory")?;

    match cli.command {
        Commands::Setup { features } => cmd_setup(&cli.root, &features),
        Commands::Cleanup => cmd_cleanup(&cli.root),
        Commands::CommitPrep {
            location,
            kind,
            scope,
            subject,
            ticket,
            breaking,
        } => {
            let fields = CommitFields::new(&kind, &scope, &subject, &ticket, breaking);
            cmd_commit_prep(&cli.root, &location, fields)
        }
        Commands::CommitValidate {
            location,
            ticket,
            breaking,
            report_json,
        } => cmd_commit_validate(
            &cli.root,
            &location,
            NoteRequirements::new(breaking, &ticket),
            report_json,
        ),
    }
}

fn load_config(root: &Path) -> Result<CommitConfig> {
    let path = config_path(root);
    CommitConfig::load(&path).with_context(|| format!("failed to load {}", path.display()))
}

fn cmd_setup(root: &Path, features: &[String]) -> Result<()> {
    let features = features
        .iter()
        .map(|f| f.parse::<Feature>())
        .collect::<Result<Vec<_>, _>>()?;

    let config = setup(root, &features).context("setup failed")?;

    for hook in &config.hooks {
        println!("Installed hook: {hook}");
    }
    println!("Wrote {}", config_path(root).display());
    Ok(())
}

fn cmd_cleanup(root: &Path) -> Result<()> {
    cleanup(root).context("cleanup failed")?;
    println!("Removed fritz hooks and configuration");
    Ok(())
}

fn cmd_commit_prep(root: &Path, location: &Path, fields: CommitFields) -> Result<()> {
    let config = load_config(root)?;
    debug!(kind = %fields.kind, scope = %fields.scope, "preparing commit message");

    let mut commit = Commit::new(location, fields);
    commit.write(&config)?;

    info!(file = %location.display(), "commit message prepared");
    Ok(())
}

fn cmd_commit_validate(
    root: &Path,
    location: &Path,
    requirements: NoteRequirements,
    report_json: bool,
) -> Result<()> {
    let config = load_config(root)?;

    let mut commit = Commit::from_file(location, requirements);
    match commit.parse(&config) {
        Ok(()) => {
            info!(file = %location.display(), "commit message is valid");
            Ok(())
        }
        Err(FritzError::Validation(verdict)) if report_json => {
            println!("{}", serde_json::to_string_pretty(&verdict)?);
            Err(FritzError::Validation(verdict).into())
        }
        Err(err) => Err(err.into()),
    }
}
