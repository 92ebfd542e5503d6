//! Bedrock model configuration.

#[cfg(feature = "config")]
use clap::Args;
use derive_builder::Builder;

/// Default vision model used for second opinions.
pub const DEFAULT_MODEL_ID: &str = "us.mistral.pixtral-large-2502-v1:0";

/// Default completion budget.
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f64 = 0.1;

/// Model parameters for [`super::BedrockDetector`].
#[derive(Debug, Clone, PartialEq, Builder)]
#[cfg_attr(feature = "config", derive(Args))]
#[builder(
    pattern = "owned",
    setter(into, prefix = "with"),
    build_fn(validate = "Self::validate_config")
)]
pub struct BedrockConfig {
    /// Bedrock model (or inference profile) identifier.
    #[cfg_attr(
        feature = "config",
        arg(long = "bedrock-model-id", env = "BEDROCK_MODEL_ID", default_value = DEFAULT_MODEL_ID)
    )]
    #[builder(default = "DEFAULT_MODEL_ID.to_string()")]
    pub model_id: String,

    /// Maximum number of tokens the model may generate.
    #[cfg_attr(
        feature = "config",
        arg(long = "bedrock-max-tokens", env = "BEDROCK_MAX_TOKENS", default_value_t = DEFAULT_MAX_TOKENS)
    )]
    #[builder(default = "DEFAULT_MAX_TOKENS")]
    pub max_tokens: u32,

    /// Sampling temperature, within `[0, 1]`.
    #[cfg_attr(
        feature = "config",
        arg(long = "bedrock-temperature", env = "BEDROCK_TEMPERATURE", default_value_t = DEFAULT_TEMPERATURE)
    )]
    #[builder(default = "DEFAULT_TEMPERATURE")]
    pub temperature: f64,
}

impl Default for BedrockConfig {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL_ID.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl BedrockConfig {
    /// Create a new configuration builder.
    pub fn builder() -> BedrockConfigBuilder {
        BedrockConfigBuilder::default()
    }

    /// Validates the configuration.
    pub fn validate(&self) -> glimpse_core::Result<()> {
        check(&self.model_id, self.max_tokens, self.temperature)
            .map_err(|reason| glimpse_core::Error::configuration().with_message(reason))
    }
}

impl BedrockConfigBuilder {
    fn validate_config(&self) -> Result<(), String> {
        let defaults = BedrockConfig::default();
        check(
            self.model_id.as_deref().unwrap_or(&defaults.model_id),
            self.max_tokens.unwrap_or(defaults.max_tokens),
            self.temperature.unwrap_or(defaults.temperature),
        )
    }
}

fn check(model_id: &str, max_tokens: u32, temperature: f64) -> Result<(), String> {
    if model_id.trim().is_empty() {
        return Err("Bedrock model id must not be empty".to_string());
    }
    if max_tokens == 0 {
        return Err("Bedrock max tokens must be greater than 0".to_string());
    }
    if !(0.0..=1.0).contains(&temperature) {
        return Err(format!(
            "Bedrock temperature {temperature} is invalid. Must be between 0.0 and 1.0."
        ));
    }
    Ok(())
}
