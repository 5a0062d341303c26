//! Batch enrichment command: roster in, enriched roster out.
//!
//! The driver runs on its own task so a long batch never blocks the task
//! rendering progress; this strategy only wires the pieces together and
//! consumes the progress channel.

use std::path::PathBuf;
use std::time::Duration;

use prospect_config::Config;
use prospect_core::{ContactResolver, RetryPolicy};
use prospect_enrich::{EnrichmentDriver, ProgressEvent};
use prospect_providers::PerplexityProvider;
use tracing::info;

/// Input parameters for the Enrich command strategy.
#[derive(Debug, Clone)]
pub struct EnrichInput {
    /// Roster file to enrich
    pub input: PathBuf,
    /// Optional API key override
    pub api_key: Option<String>,
    /// Optional model override
    pub model: Option<String>,
}

/// Strategy for executing the Enrich command.
///
/// This strategy handles the full batch flow:
/// - Loading configuration and resolving the credential
/// - Building provider, resolver, and driver from config
/// - Running the driver on a background task
/// - Rendering progress until the terminal event arrives
#[derive(Debug, Clone, Copy)]
pub struct EnrichStrategy;

impl super::CommandStrategy for EnrichStrategy {
    type Input = EnrichInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let api_key = resolve_api_key(
            input.api_key,
            std::env::var("PERPLEXITY_API_KEY").ok(),
            &config,
        )?;

        let mut provider = PerplexityProvider::new(api_key);
        if let Some(base_url) = config.providers.perplexity.base_url.clone() {
            provider = provider.with_base_url(base_url);
        }

        let resolver = ContactResolver::new(provider)
            .with_model(
                input
                    .model
                    .unwrap_or_else(|| config.lookup.defaults.model.clone()),
            )
            .with_retry_policy(RetryPolicy {
                cooldown: Duration::from_secs(config.resolver.cooldown_secs),
                max_retries: config.resolver.max_rate_limit_retries,
            });

        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let driver = EnrichmentDriver::new(resolver, tx)
            .with_row_delay(Duration::from_secs(config.batch.row_delay_secs));

        let roster = input.input;
        info!("Starting enrichment batch for {}", roster.display());

        let worker = tokio::spawn(async move { driver.run(&roster).await });

        while let Some(event) = rx.recv().await {
            match event {
                ProgressEvent::Progress(percent) => println!("  {percent}%"),
                ProgressEvent::Complete(path) => {
                    println!("✅ Enriched roster written to: {}", path.display());
                }
            }
        }

        worker.await??;
        Ok(())
    }
}

/// Credential precedence: flag > environment > config file.
fn resolve_api_key(
    flag: Option<String>,
    env: Option<String>,
    config: &Config,
) -> anyhow::Result<String> {
    if let Some(key) = flag {
        return Ok(key);
    }
    if let Some(key) = env {
        if !key.is_empty() {
            return Ok(key);
        }
    }

    let key = config.providers.perplexity.api_key.clone();
    if key.is_empty() || key.starts_with("your-") {
        anyhow::bail!(
            "No Perplexity API key configured. Pass --api-key, set PERPLEXITY_API_KEY, \
             or edit the config file."
        );
    }
    Ok(key)
}
