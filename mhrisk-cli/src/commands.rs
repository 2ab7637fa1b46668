//! CLI subcommand handlers.

use crate::Commands;
use crate::ConfigAction;
use crate::ServeArgs;
use anyhow::Context;
use mhrisk_core::config::{self, AppConfig, WORKSPACE_CONFIG_FILE};
use mhrisk_core::gateway::{self, AppState, GatewayConfig};
use mhrisk_ml::{
    AgePolicy, MissingModelPolicy, MlError, ModelHandle, Predictor, RiskAssessment,
    SurveyAnswers,
};
use std::path::{Path, PathBuf};

/// Where the command runs and which config file it was pointed at.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub workspace: PathBuf,
    pub config_file: Option<PathBuf>,
}

impl Invocation {
    fn load_config(&self) -> anyhow::Result<AppConfig> {
        config::load_config(Some(&self.workspace), self.config_file.as_deref(), None)
            .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))
    }
}

/// Handle a CLI subcommand.
pub async fn handle_command(command: Commands, inv: &Invocation) -> anyhow::Result<()> {
    match command {
        Commands::Serve(args) => {
            let mut config = inv.load_config()?;
            apply_overrides(&mut config, |c| &mut c.form, args);
            let state = load_state(&config, config.form.missing_model)?;
            tracing::info!(addr = %config.form.addr(), "Starting web form");
            gateway::serve(&config.form, gateway::form_router(state)).await?;
            Ok(())
        }
        Commands::Dashboard(args) => {
            let mut config = inv.load_config()?;
            apply_overrides(&mut config, |c| &mut c.dashboard, args);
            let state = load_state(&config, config.dashboard.missing_model)?;
            tracing::info!(addr = %config.dashboard.addr(), "Starting dashboard");
            gateway::serve(&config.dashboard, gateway::dashboard_router(state)).await?;
            Ok(())
        }
        Commands::Predict {
            answers,
            model,
            json,
        } => {
            let mut config = inv.load_config()?;
            if let Some(model) = model {
                config.model.path = model;
            }
            let assessment = predict_file(&config, &answers)?;
            if json {
                let body = serde_json::json!({
                    "prediction": assessment.headline(),
                    "risk_level": assessment.level.as_str(),
                    "confidence": assessment.confidence(),
                    "probability": assessment.probability,
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                println!("{}", assessment.headline());
                println!("{}", assessment.level.guidance());
            }
            Ok(())
        }
        Commands::Config { action } => handle_config(action, inv),
    }
}

fn handle_config(action: ConfigAction, inv: &Invocation) -> anyhow::Result<()> {
    match action {
        ConfigAction::Init => {
            let config_path = inv.workspace.join(WORKSPACE_CONFIG_FILE);
            if config_path.exists() {
                println!(
                    "Configuration file already exists at: {}",
                    config_path.display()
                );
                return Ok(());
            }
            let toml_str = config::to_toml(&AppConfig::default())?;
            std::fs::write(&config_path, &toml_str)?;
            println!(
                "Created default configuration at: {}",
                config_path.display()
            );
            Ok(())
        }
        ConfigAction::Show => {
            let config = inv.load_config()?;
            println!("{}", config::to_toml(&config)?);
            Ok(())
        }
    }
}

/// Apply `--host/--port/--model` to the selected front-end.
fn apply_overrides(
    config: &mut AppConfig,
    gateway: impl FnOnce(&mut AppConfig) -> &mut GatewayConfig,
    args: ServeArgs,
) {
    if let Some(model) = args.model {
        config.model.path = model;
    }
    let gateway = gateway(config);
    if let Some(host) = args.host {
        gateway.host = host;
    }
    if let Some(port) = args.port {
        gateway.port = port;
    }
}

/// Load the model once under `policy` and build the shared handler state.
fn load_state(config: &AppConfig, policy: MissingModelPolicy) -> anyhow::Result<AppState> {
    let handle = ModelHandle::load(&config.model.path, policy).map_err(startup_error)?;
    Ok(AppState::new(handle)?)
}

fn startup_error(err: MlError) -> anyhow::Error {
    match err {
        MlError::ModelUnavailable { path } => anyhow::anyhow!(
            "Model file '{}' not found. Please ensure it's in the same directory.",
            path.display()
        ),
        other => anyhow::anyhow!("Failed to load model: {}", other),
    }
}

/// One prediction with the form's age handling.
fn predict_file(config: &AppConfig, answers_path: &Path) -> anyhow::Result<RiskAssessment> {
    let text = std::fs::read_to_string(answers_path)
        .with_context(|| format!("Failed to read {}", answers_path.display()))?;
    let answers: SurveyAnswers = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a JSON object of answers", answers_path.display()))?;
    let handle = ModelHandle::load(&config.model.path, MissingModelPolicy::PerRequest)
        .map_err(startup_error)?;
    Ok(Predictor::new(handle).predict(&answers, AgePolicy::Unbounded)?)
}
