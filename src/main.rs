//! runsv-state - declare the enablement and run state of a runit service.
//!
//! Prints one JSON result document on stdout. Logs go to stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde_json::json;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use runsv_state::config::Settings;
use runsv_state::error::SvError;
use runsv_state::module::{self, ModuleParams, ModuleResponse};

#[derive(Debug, Parser)]
#[command(name = "runsv-state", version, about = "Manage runit services with sv")]
struct Cli {
    /// Path to the configuration file [default: /etc/runsv-state/config.toml if present]
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// JSON file holding module arguments; flags override its values
    #[arg(long, value_name = "PATH")]
    args_file: Option<PathBuf>,

    /// Module arguments file passed positionally by the orchestration tool
    #[arg(value_name = "ARGS_FILE", conflicts_with = "args_file")]
    args_path: Option<PathBuf>,

    /// Name of the service
    #[arg(short, long, visible_alias = "service")]
    name: Option<String>,

    /// Desired run state: started, stopped, restarted or reloaded
    #[arg(short, long)]
    state: Option<String>,

    /// Whether the service should be enabled (yes/no)
    #[arg(short, long)]
    enabled: Option<String>,

    /// Report what would change without changing anything
    #[arg(long, visible_alias = "dry-run")]
    check: bool,
}

impl Cli {
    fn params(&self) -> Result<ModuleParams, SvError> {
        let mut params = match self.args_file.as_ref().or(self.args_path.as_ref()) {
            Some(path) => ModuleParams::from_file(path)?,
            None => ModuleParams::empty(),
        };

        if let Some(name) = &self.name {
            params.set("name", json!(name));
        }
        if let Some(state) = &self.state {
            params.set("state", json!(state));
        }
        if let Some(enabled) = &self.enabled {
            params.set("enabled", json!(enabled));
        }
        if self.check {
            params.set("_ansible_check_mode", json!(true));
        }

        Ok(params)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match Settings::load_or_default(cli.config.as_deref()) {
        Ok(s) => s,
        Err(e) => return emit(&ModuleResponse::failure(&e)),
    };

    if let Err(e) = init_logging(&settings) {
        eprintln!("Error initializing logging: {}", e);
    }

    let params = match cli.params() {
        Ok(p) => p,
        Err(e) => return emit(&ModuleResponse::failure(&e)),
    };

    emit(&module::run(&settings, &params))
}

/// Print the result document and map it to an exit code.
fn emit(response: &ModuleResponse) -> ExitCode {
    match serde_json::to_string(response) {
        Ok(document) => println!("{}", document),
        Err(e) => {
            eprintln!("Error serializing result: {}", e);
            return ExitCode::FAILURE;
        }
    }

    if response.failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Initialize logging based on settings. `RUST_LOG` takes precedence.
fn init_logging(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    match settings.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr).json())
                .try_init()?;
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr).pretty())
                .try_init()?;
        }
    }

    Ok(())
}
