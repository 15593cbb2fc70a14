//! Valuation engine.
//!
//! Two modes, fixed when the engine is built:
//!
//! - `NoCredential`: no completion client. Every request is priced by the
//!   fallback market simulation.
//! - `AttemptAi`: one completion call per request, no retries. The reply's
//!   first numeric token becomes the estimate. A failed call (transport,
//!   status, timeout, malformed body) is logged and priced by the fallback.
//!
//! When the call succeeds but the reply holds no usable number, the estimate
//! comes from the fallback simulation while `source` stays `ai` and
//! `reasoning` keeps the reply text. `source` tracks whether the call
//! succeeded, not where the number came from.
//!
//! The engine keeps no state between requests and never returns an error.

use crate::config::LlmConfig;
use crate::extract::extract_estimate;
use crate::llm_client::{CompletionClient, HttpCompletionClient, LlmError};
use crate::pricing::{calibrate_confidence, fallback_estimate};
use crate::prompt::build_property_prompt;
use crate::property::PropertyAttributes;
use crate::recommendation::classify_recommendation;
use crate::valuation::{ValuationResult, ValuationSource};
use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Reasoning used when no completion service is configured
pub const NO_CREDENTIAL_REASONING: &str =
    "Fallback valuation used due to AI service unavailability.";

/// Reasoning used when the completion call failed
pub const AI_FAILURE_REASONING: &str = "AI service failed, fallback valuation applied.";

/// Engine mode, decided once at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineMode {
    NoCredential,
    AttemptAi,
}

/// Per-call parameters for the completion request
#[derive(Debug, Clone, PartialEq)]
pub struct CallSettings {
    pub temperature: f32,
    pub timeout: Duration,
}

impl Default for CallSettings {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            timeout: Duration::from_secs(30),
        }
    }
}

pub struct ValuationEngine {
    client: Option<Arc<dyn CompletionClient>>,
    settings: CallSettings,
}

impl ValuationEngine {
    /// Engine without a completion service
    pub fn fallback_only() -> Self {
        Self {
            client: None,
            settings: CallSettings::default(),
        }
    }

    pub fn with_client(client: Arc<dyn CompletionClient>, settings: CallSettings) -> Self {
        Self {
            client: Some(client),
            settings,
        }
    }

    /// Build from configuration and an already-resolved credential.
    ///
    /// `None` selects `NoCredential` mode; the environment is not consulted.
    pub fn from_config(config: &LlmConfig, credential: Option<String>) -> Result<Self> {
        match credential {
            Some(api_key) => {
                let client = HttpCompletionClient::new(config, api_key)?;
                debug!(model = %client.model(), base_url = %config.base_url, "completion service configured");
                Ok(Self::with_client(Arc::new(client), config.call_settings()))
            }
            None => {
                debug!(api_key_env = %config.api_key_env, "no credential; fallback valuation only");
                Ok(Self::fallback_only())
            }
        }
    }

    pub fn mode(&self) -> EngineMode {
        if self.client.is_some() {
            EngineMode::AttemptAi
        } else {
            EngineMode::NoCredential
        }
    }

    pub fn settings(&self) -> &CallSettings {
        &self.settings
    }

    /// Value a property with an entropy-seeded generator
    pub async fn evaluate(&self, property: &PropertyAttributes) -> ValuationResult {
        let mut rng = StdRng::from_entropy();
        self.evaluate_with_rng(property, &mut rng).await
    }

    /// Value a property, drawing all randomness from `rng`
    pub async fn evaluate_with_rng<R: Rng + Send>(
        &self,
        property: &PropertyAttributes,
        rng: &mut R,
    ) -> ValuationResult {
        let listing_price = property.listing_price;

        let Some(client) = &self.client else {
            return fallback_result(listing_price, NO_CREDENTIAL_REASONING, rng);
        };

        let prompt = build_property_prompt(property);
        match self.request_completion(client.as_ref(), &prompt).await {
            Ok(text) => ai_result(listing_price, text, rng),
            Err(e) => {
                warn!(error = %e, "completion call failed; applying fallback valuation");
                fallback_result(listing_price, AI_FAILURE_REASONING, rng)
            }
        }
    }

    async fn request_completion(
        &self,
        client: &dyn CompletionClient,
        prompt: &str,
    ) -> Result<String, LlmError> {
        let call = client.complete(prompt, self.settings.temperature);
        match tokio::time::timeout(self.settings.timeout, call).await {
            Ok(outcome) => outcome,
            Err(_) => Err(LlmError::Timeout(self.settings.timeout)),
        }
    }
}

fn fallback_result<R: Rng + ?Sized>(
    listing_price: f64,
    reasoning: &str,
    rng: &mut R,
) -> ValuationResult {
    let estimated_value = fallback_estimate(listing_price, rng);
    ValuationResult {
        estimated_value,
        confidence: calibrate_confidence(listing_price, estimated_value, rng),
        recommendation: classify_recommendation(listing_price, estimated_value),
        reasoning: reasoning.to_string(),
        source: ValuationSource::Fallback,
    }
}

fn ai_result<R: Rng + ?Sized>(listing_price: f64, text: String, rng: &mut R) -> ValuationResult {
    let estimated_value = match extract_estimate(&text).value() {
        Some(value) => value,
        None => {
            debug!("no estimate in completion reply; using simulated value");
            fallback_estimate(listing_price, rng)
        }
    };

    ValuationResult {
        estimated_value,
        confidence: calibrate_confidence(listing_price, estimated_value, rng),
        recommendation: classify_recommendation(listing_price, estimated_value),
        reasoning: text,
        source: ValuationSource::Ai,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::FakeCompletionClient;
    use crate::valuation::Recommendation;

    fn sample() -> PropertyAttributes {
        PropertyAttributes {
            city: "Denver".to_string(),
            state: "CO".to_string(),
            sqft: 1600.0,
            bedrooms: 3,
            bathrooms: 2.0,
            listing_price: 500_000.0,
        }
    }

    #[test]
    fn test_mode_selection() {
        assert_eq!(ValuationEngine::fallback_only().mode(), EngineMode::NoCredential);

        let client = Arc::new(FakeCompletionClient::always_text("$1"));
        let engine = ValuationEngine::with_client(client, CallSettings::default());
        assert_eq!(engine.mode(), EngineMode::AttemptAi);
    }

    #[test]
    fn test_from_config_without_credential() {
        let engine = ValuationEngine::from_config(&LlmConfig::default(), None).unwrap();
        assert_eq!(engine.mode(), EngineMode::NoCredential);
    }

    #[test]
    fn test_from_config_with_credential() {
        let config = LlmConfig {
            timeout_secs: 7,
            ..LlmConfig::default()
        };
        let engine = ValuationEngine::from_config(&config, Some("sk-test".to_string())).unwrap();
        assert_eq!(engine.mode(), EngineMode::AttemptAi);
        assert_eq!(engine.settings().timeout, Duration::from_secs(7));
    }

    #[test]
    fn test_ai_result_uses_parsed_value() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = ai_result(500_000.0, "Value: $560,000".to_string(), &mut rng);

        assert_eq!(result.estimated_value, 560_000.0);
        assert_eq!(result.recommendation, Recommendation::Underpriced);
        assert!((85..=92).contains(&result.confidence));
        assert_eq!(result.source, ValuationSource::Ai);
    }

    #[tokio::test]
    async fn test_fallback_only_never_calls_out() {
        let engine = ValuationEngine::fallback_only();
        let mut rng = StdRng::seed_from_u64(9);
        let result = engine.evaluate_with_rng(&sample(), &mut rng).await;

        assert_eq!(result.source, ValuationSource::Fallback);
        assert_eq!(result.reasoning, NO_CREDENTIAL_REASONING);
    }

    #[tokio::test]
    async fn test_call_uses_configured_temperature() {
        let client = Arc::new(FakeCompletionClient::always_text("$505,000"));
        let settings = CallSettings {
            temperature: 0.3,
            timeout: Duration::from_secs(5),
        };
        let engine = ValuationEngine::with_client(client.clone(), settings);

        engine.evaluate(&sample()).await;

        let (prompt, temperature) = client.last_call().unwrap();
        assert_eq!(temperature, 0.3);
        assert!(prompt.contains("City: Denver"));
        assert_eq!(client.call_count(), 1);
    }
}
