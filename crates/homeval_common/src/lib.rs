//! Homeval Common - property valuation engine and shared types.
//!
//! Turns a property's attributes into an estimated fair market value, a
//! confidence score and a pricing recommendation. An OpenAI-compatible
//! completion service is consulted when a credential is configured; when it
//! is not, or when the call fails, a local market simulation takes over.
//! Callers always get a complete `ValuationResult`.

pub mod config;
pub mod engine;
pub mod extract;
pub mod llm_client;
pub mod pricing;
pub mod prompt;
pub mod property;
pub mod recommendation;
pub mod valuation;

pub use config::{HomevalConfig, LlmConfig};
pub use engine::{
    CallSettings, EngineMode, ValuationEngine, AI_FAILURE_REASONING, NO_CREDENTIAL_REASONING,
};
pub use extract::{extract_estimate, ParsedEstimate};
pub use llm_client::{CompletionClient, FakeCompletionClient, HttpCompletionClient, LlmError};
pub use pricing::{calibrate_confidence, fallback_estimate, ConfidenceTier, MarketBand};
pub use prompt::build_property_prompt;
pub use property::{PropertyAttributes, ValidationError};
pub use recommendation::classify_recommendation;
pub use valuation::{Recommendation, ValuationResult, ValuationSource};
