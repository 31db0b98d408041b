//! Model registry: picks the one upstream service the proxy talks to

use super::{all_models, find_model, LlmService, LoggingService, ModelDef, Provider};
use std::collections::HashMap;
use std::sync::Arc;

/// Preferred defaults, in order, when `DEFAULT_MODEL` is not set
const PREFERRED_DEFAULTS: &[&str] = &["gpt-4o-mini", "claude-4.5-haiku"];

/// Configuration for LLM providers
#[derive(Debug, Clone, Default)]
pub struct LlmConfig {
    pub anthropic_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    /// Gateway base URL; the gateway handles provider authentication
    pub gateway: Option<String>,
    /// Default model ID
    pub default_model: Option<String>,
}

impl LlmConfig {
    pub fn from_env() -> Self {
        Self {
            anthropic_api_key: non_empty_env("ANTHROPIC_API_KEY"),
            openai_api_key: non_empty_env("OPENAI_API_KEY"),
            gateway: non_empty_env("LLM_GATEWAY"),
            default_model: non_empty_env("DEFAULT_MODEL"),
        }
    }

    fn api_key_for(&self, provider: Provider) -> Option<&String> {
        match provider {
            Provider::Anthropic => self.anthropic_api_key.as_ref(),
            Provider::OpenAI => self.openai_api_key.as_ref(),
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Registry of available LLM models
pub struct ModelRegistry {
    services: HashMap<String, Arc<dyn LlmService>>,
    default_model: Option<String>,
}

impl ModelRegistry {
    pub fn new(config: &LlmConfig) -> Self {
        let mut services: HashMap<String, Arc<dyn LlmService>> = HashMap::new();

        for model_def in all_models() {
            if let Some(service) = Self::try_create_model(model_def, config) {
                services.insert(model_def.id.to_string(), service);
            }
        }

        let default_model = config.default_model.clone().or_else(|| {
            PREFERRED_DEFAULTS
                .iter()
                .find(|id| services.contains_key(**id))
                .map(|id| (*id).to_string())
                .or_else(|| {
                    all_models()
                        .iter()
                        .find(|m| services.contains_key(m.id))
                        .map(|m| m.id.to_string())
                })
        });

        Self {
            services,
            default_model,
        }
    }

    /// Try to create a model service, validating prerequisites
    fn try_create_model(model_def: &ModelDef, config: &LlmConfig) -> Option<Arc<dyn LlmService>> {
        let api_key = if config.gateway.is_some() {
            "implicit".to_string()
        } else {
            config.api_key_for(model_def.provider)?.clone()
        };

        let service = (model_def.factory)(&api_key, config.gateway.as_deref());
        Some(Arc::new(LoggingService::new(service)))
    }

    /// Get a model by ID
    pub fn get(&self, model_id: &str) -> Option<Arc<dyn LlmService>> {
        self.services.get(model_id).cloned()
    }

    /// Get the default model
    pub fn default(&self) -> Option<Arc<dyn LlmService>> {
        self.default_model.as_deref().and_then(|id| self.get(id))
    }

    /// Get the default model ID, if one was resolved
    pub fn default_model_id(&self) -> Option<&str> {
        self.default_model.as_deref()
    }

    /// Table entry for the resolved default model, whether or not it has
    /// credentials
    pub fn default_model_def(&self) -> Option<&'static ModelDef> {
        self.default_model.as_deref().and_then(find_model)
    }

    /// List all available model IDs
    pub fn available_models(&self) -> Vec<String> {
        let mut models: Vec<_> = self.services.keys().cloned().collect();
        models.sort();
        models
    }

    /// Check if any models are available
    pub fn has_models(&self) -> bool {
        !self.services.is_empty()
    }
}
