//! Command handlers for homevalctl.

use anyhow::{Context, Result};
use homeval_common::{
    build_property_prompt, EngineMode, HomevalConfig, PropertyAttributes, ValuationEngine,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::output;

/// Load config and resolve the credential. Runs once per process.
fn build_engine() -> Result<(HomevalConfig, ValuationEngine)> {
    let config = HomevalConfig::load()?;
    let credential = config.llm.resolve_credential();
    let engine = ValuationEngine::from_config(&config.llm, credential)
        .context("Failed to initialise valuation engine")?;
    Ok((config, engine))
}

/// Handle analyze command
pub async fn analyze(property: PropertyAttributes, json: bool, seed: Option<u64>) -> Result<()> {
    let property = property.normalized();
    property.validate()?;

    let (config, engine) = build_engine()?;
    info!(
        city = %property.city,
        state = %property.state,
        mode = ?engine.mode(),
        timeout_secs = engine.settings().timeout.as_secs(),
        "running valuation"
    );

    let result = match seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            engine.evaluate_with_rng(&property, &mut rng).await
        }
        None => engine.evaluate(&property).await,
    };

    info!(
        source = %result.source,
        recommendation = %result.recommendation,
        model = %config.llm.model,
        "valuation complete"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        output::display_valuation(&property, &result);
    }
    Ok(())
}

/// Handle prompt command
pub fn prompt(property: PropertyAttributes) -> Result<()> {
    let property = property.normalized();
    property.validate()?;
    print!("{}", build_property_prompt(&property));
    Ok(())
}

/// Handle config command
pub fn config() -> Result<()> {
    let (config, engine) = build_engine()?;
    let credential_present = engine.mode() == EngineMode::AttemptAi;

    print!("{}", config.to_toml()?);
    println!();
    output::display_credential_status(&config.llm.api_key_env, credential_present);
    Ok(())
}
