use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tripcast_openai::Model;

/// Hyperparameter file, relative to the working directory.
pub const HPARAMS_PATH: &str = "config/hparams.toml";

/// System prompt file, relative to the working directory.
pub const SYSTEM_PROMPT_PATH: &str = "prompts/system_prompt.txt";

/// Generation settings loaded from the hyperparameter file.
///
/// Every key has a default, so an empty file is a valid configuration.
/// Unrecognized keys are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_model")]
    pub model: Model,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_top_p")]
    pub top_p: f32,

    /// Forwarded to the endpoint after trimming and lower-casing; the
    /// value "none" disables the tool round entirely.
    #[serde(default = "default_tool_choice")]
    pub tool_choice: String,
}

fn default_model() -> Model {
    Model::Gpt4oMini
}

fn default_temperature() -> f32 {
    0.2
}

fn default_max_tokens() -> u32 {
    128
}

fn default_top_p() -> f32 {
    1.0
}

fn default_tool_choice() -> String {
    "auto".to_string()
}

/// Load generation settings from a TOML file.
pub fn load_hparams(path: &Path) -> Result<GenerationConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read hparams: {}", path.display()))?;
    let config = toml::from_str(&content)
        .with_context(|| format!("failed to parse hparams: {}", path.display()))?;
    Ok(config)
}

/// Load the system prompt, trimmed of surrounding whitespace.
pub fn load_system_prompt(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read system prompt: {}", path.display()))?;
    Ok(content.trim().to_string())
}

/// Settings resolved from the process environment at startup.
///
/// Required variables fail fast with a message naming what is missing;
/// a variable set to the empty string counts as missing.
#[derive(Debug, Clone)]
pub struct AppEnv {
    pub openai_api_key: String,
    pub wandb_api_key: String,
    pub wandb_entity: String,
    pub wandb_project: String,
    /// Run display name; the command-line flag wins over `WANDB_RUN_NAME`.
    pub run_name: Option<String>,
    /// Project trace events are written to; falls back to the run project.
    pub weave_project: String,
}

impl AppEnv {
    /// Resolve settings from the process environment.
    pub fn from_env(run_name_flag: Option<String>) -> Result<Self> {
        Self::resolve(|key| std::env::var(key).ok(), run_name_flag)
    }

    fn resolve(
        get: impl Fn(&str) -> Option<String>,
        run_name_flag: Option<String>,
    ) -> Result<Self> {
        let required = |key: &str| get(key).filter(|value| !value.is_empty());

        let (Some(wandb_entity), Some(wandb_project)) =
            (required("WANDB_ENTITY"), required("WANDB_PROJECT"))
        else {
            bail!("Set WANDB_ENTITY and WANDB_PROJECT in .env");
        };
        let Some(wandb_api_key) = required("WANDB_API_KEY") else {
            bail!("Set WANDB_API_KEY in .env");
        };
        let Some(openai_api_key) = required("OPENAI_API_KEY") else {
            bail!("Set OPENAI_API_KEY in .env");
        };

        let run_name = run_name_flag.or_else(|| get("WANDB_RUN_NAME"));
        let weave_project = required("WEAVE_PROJECT").unwrap_or_else(|| wandb_project.clone());

        Ok(Self {
            openai_api_key,
            wandb_api_key,
            wandb_entity,
            wandb_project,
            run_name,
            weave_project,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            pairs
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value.to_string())
        }
    }

    const FULL_ENV: &[(&str, &str)] = &[
        ("WANDB_ENTITY", "acme"),
        ("WANDB_PROJECT", "demo"),
        ("WANDB_API_KEY", "wb-key"),
        ("OPENAI_API_KEY", "oa-key"),
    ];

    #[test]
    fn missing_entity_or_project_fails_first() {
        let error = AppEnv::resolve(env(&[]), None).unwrap_err();
        assert_eq!(
            error.to_string(),
            "Set WANDB_ENTITY and WANDB_PROJECT in .env"
        );
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let vars: &'static [(&str, &str)] = &[
            ("WANDB_ENTITY", "acme"),
            ("WANDB_PROJECT", "demo"),
            ("WANDB_API_KEY", ""),
        ];
        let error = AppEnv::resolve(env(vars), None).unwrap_err();
        assert_eq!(error.to_string(), "Set WANDB_API_KEY in .env");
    }

    #[test]
    fn openai_key_is_checked_last() {
        let vars: &'static [(&str, &str)] = &[
            ("WANDB_ENTITY", "acme"),
            ("WANDB_PROJECT", "demo"),
            ("WANDB_API_KEY", "wb-key"),
        ];
        let error = AppEnv::resolve(env(vars), None).unwrap_err();
        assert_eq!(error.to_string(), "Set OPENAI_API_KEY in .env");
    }

    #[test]
    fn flag_overrides_run_name_variable() {
        let vars: &'static [(&str, &str)] = &[
            ("WANDB_ENTITY", "acme"),
            ("WANDB_PROJECT", "demo"),
            ("WANDB_API_KEY", "wb-key"),
            ("OPENAI_API_KEY", "oa-key"),
            ("WANDB_RUN_NAME", "from-env"),
        ];
        let resolved = AppEnv::resolve(env(vars), Some("from-flag".to_string())).unwrap();
        assert_eq!(resolved.run_name.as_deref(), Some("from-flag"));

        let resolved = AppEnv::resolve(env(vars), None).unwrap();
        assert_eq!(resolved.run_name.as_deref(), Some("from-env"));

        let resolved = AppEnv::resolve(env(FULL_ENV), None).unwrap();
        assert_eq!(resolved.run_name, None);
    }

    #[test]
    fn weave_project_falls_back_to_run_project() {
        let resolved = AppEnv::resolve(env(FULL_ENV), None).unwrap();
        assert_eq!(resolved.weave_project, "demo");

        let vars: &'static [(&str, &str)] = &[
            ("WANDB_ENTITY", "acme"),
            ("WANDB_PROJECT", "demo"),
            ("WANDB_API_KEY", "wb-key"),
            ("OPENAI_API_KEY", "oa-key"),
            ("WEAVE_PROJECT", "demo-traces"),
        ];
        let resolved = AppEnv::resolve(env(vars), None).unwrap();
        assert_eq!(resolved.weave_project, "demo-traces");
    }

    #[test]
    fn hparams_defaults_apply_to_empty_file() {
        let config: GenerationConfig = toml::from_str("").unwrap();
        assert_eq!(config.model, Model::Gpt4oMini);
        assert_eq!(config.temperature, 0.2);
        assert_eq!(config.max_tokens, 128);
        assert_eq!(config.top_p, 1.0);
        assert_eq!(config.tool_choice, "auto");
    }

    #[test]
    fn hparams_overrides_and_unknown_keys_parse() {
        let config: GenerationConfig = toml::from_str(
            "model = \"o4-mini\"\ntool_choice = \"none\"\nmax_tokens = 512\nnotes = \"ignored\"\n",
        )
        .unwrap();
        assert_eq!(config.model, Model::Custom("o4-mini".to_string()));
        assert_eq!(config.tool_choice, "none");
        assert_eq!(config.max_tokens, 512);
        assert_eq!(config.temperature, 0.2);
    }
}
