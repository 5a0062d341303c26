use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub lookup: LookupConfig,
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub batch: BatchConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LookupConfig {
    pub defaults: LookupDefaults,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LookupDefaults {
    pub model: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub perplexity: ProviderConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderConfig {
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Rate-limit handling for the contact resolver.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ResolverConfig {
    #[serde(default = "ResolverConfig::default_cooldown_secs")]
    pub cooldown_secs: u64,
    #[serde(default = "ResolverConfig::default_max_rate_limit_retries")]
    pub max_rate_limit_retries: u32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            cooldown_secs: Self::default_cooldown_secs(),
            max_rate_limit_retries: Self::default_max_rate_limit_retries(),
        }
    }
}

impl ResolverConfig {
    const fn default_cooldown_secs() -> u64 {
        62
    }

    const fn default_max_rate_limit_retries() -> u32 {
        10
    }
}

/// Pacing for the batch enrichment driver.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BatchConfig {
    /// Pause between rows, to stay under the upstream request rate.
    #[serde(default = "BatchConfig::default_row_delay_secs")]
    pub row_delay_secs: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            row_delay_secs: Self::default_row_delay_secs(),
        }
    }
}

impl BatchConfig {
    const fn default_row_delay_secs() -> u64 {
        3
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_dir = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("prospect");

        let config_path = config_dir.join("config.json");

        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'prospect init' to create config.",
                config_path.display()
            );
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = serde_json::from_str(&content)?;

        Ok(config)
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("prospect");

        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        let config_template = r#"{
  "lookup": {
    "defaults": {
      "model": "llama-3.1-sonar-large-128k-online"
    }
  },
  "providers": {
    "perplexity": {
      "api_key": "your-perplexity-api-key-here"
    }
  },
  "resolver": {
    "cooldown_secs": 62,
    "max_rate_limit_retries": 10
  },
  "batch": {
    "row_delay_secs": 3
  }
}"#;

        std::fs::write(&config_path, config_template)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Edit the config file and add your Perplexity API key");
        println!("   2. Prepare a CSV roster with FirstName, LastName, Title, Organization columns");
        println!("   3. Run 'prospect enrich <roster.csv>' to start a lookup batch");
        println!();
        println!("🔧 Configuration options:");
        println!("   - lookup.defaults.model: Perplexity model used for lookups");
        println!("   - resolver.cooldown_secs: pause after a rate limit before retrying");
        println!("   - resolver.max_rate_limit_retries: rate-limit retries before a row degrades");
        println!("   - batch.row_delay_secs: pause between roster rows");
        println!();
        Ok(())
    }
}
