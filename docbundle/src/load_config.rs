/// `load_config` module: reads the YAML assembly description and the JSON answers file.
///
/// This is the only place where user-supplied files are parsed into the core's types.
///
/// # Environment
/// - `DOCBUNDLE_OVERFLOW_MESSAGE`, when set, replaces the file's `default_overflow_message`.
///
/// # Errors
/// All errors use `anyhow::Error` with the offending path attached, and are surfaced at the CLI boundary.
use anyhow::{Context, Result};
use docbundle_core::answers::AnswerStore;
use docbundle_core::config::AssemblyConfig;
use std::fs;
use std::path::Path;
use tracing::{error, info};

pub const OVERFLOW_MESSAGE_ENV: &str = "DOCBUNDLE_OVERFLOW_MESSAGE";

/// Loads an assembly description and applies environment overrides.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AssemblyConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading assembly configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    let mut config: AssemblyConfig = match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    if let Ok(message) = std::env::var(OVERFLOW_MESSAGE_ENV) {
        info!(env = OVERFLOW_MESSAGE_ENV, "Overriding default overflow message from env");
        config.default_overflow_message = message;
    }

    config.trace_loaded();
    Ok(config)
}

/// Loads interview answers from a JSON object file.
pub fn load_answers<P: AsRef<Path>>(path: P) -> Result<AnswerStore> {
    let path_ref = path.as_ref();
    info!(answers_path = ?path_ref, "Loading interview answers");
    let content = fs::read_to_string(path_ref)
        .with_context(|| format!("Failed to read answers file {path_ref:?}"))?;
    let store = AnswerStore::from_json_str(&content)
        .with_context(|| format!("Answers file {path_ref:?} must hold a JSON object"))?;
    info!(answers = store.len(), "Interview answers loaded");
    Ok(store)
}
