use clap::{Parser, Subcommand};
use std::path::PathBuf;

use skillrun_config::ConfigLoader;

mod run;
mod serve;
mod skills;

/// Skillrun — run declarative prompt skills from the terminal
#[derive(Parser)]
#[command(name = "skillrun", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to skillrun.toml config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level override (e.g. debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all log output (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a skill: resolve inputs, render the prompt, call the model
    Run {
        /// Skill name (directory under a search root)
        name: String,

        /// Explicit input values as key=value pairs
        #[arg(short = 'i', long = "input", value_parser = parse_key_val)]
        input: Vec<(String, String)>,

        /// Override the configured model for this run
        #[arg(short, long)]
        model: Option<String>,
    },
    /// List discoverable skills across the search roots
    List {
        /// Also show declared inputs and file paths
        #[arg(short, long)]
        verbose: bool,
    },
    /// Show a skill's definition without running it
    Show { name: String },
    /// Scaffold a new SKILL.md in the project skills directory
    Create { name: String },
    /// Run the tool-protocol server over stdio
    Serve,
    /// Show the effective configuration
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Parse "key=value" CLI arguments.
fn parse_key_val(s: &str) -> std::result::Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no `=` found in `{s}`"))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

impl Cli {
    pub async fn run(self) -> skillrun_core::Result<()> {
        // Load config first so we can use it for log format
        let config_loader = ConfigLoader::load(self.config.as_deref())?;
        let mut config = config_loader.get();

        // Resolve log level: --verbose > --quiet > --log-level > config
        let log_level = if self.verbose {
            "debug".to_string()
        } else if self.quiet {
            "error".to_string()
        } else {
            self.log_level
                .clone()
                .unwrap_or_else(|| config.logging.level.clone())
        };

        // Logs go to stderr: stdout carries the skill output, and in serve
        // mode stdout is the protocol transport.
        let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
        if config.logging.format == "json" {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .json()
                .with_target(true)
                .init();
        } else {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }

        match self.command {
            Commands::Run { name, input, model } => {
                if let Some(model) = model {
                    config.backend.model = model;
                }
                run::cmd_run(config, &name, input).await
            }
            Commands::List { verbose } => skills::cmd_list(&config, verbose),
            Commands::Show { name } => skills::cmd_show(&config, &name),
            Commands::Create { name } => skills::cmd_create(&config, &name),
            Commands::Serve => serve::cmd_serve(config).await,
            Commands::Config { json } => Self::cmd_config(config, json),
        }
    }

    fn cmd_config(config: skillrun_config::SkillrunConfig, json: bool) -> skillrun_core::Result<()> {
        if json {
            println!("{}", serde_json::to_string_pretty(&config)?);
        } else {
            println!(
                "{}",
                toml::to_string_pretty(&config)
                    .map_err(|e| skillrun_core::SkillError::Config(e.to_string()))?
            );
        }
        Ok(())
    }
}
