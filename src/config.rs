use std::fmt;

pub const DEFAULT_BASE_URL: &str = "https://api.octopus.energy/v1";

#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub electricity_mpan: String,
    pub account_number: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            api_key: required("OCTOPUS_API_KEY")?,
            base_url: std::env::var("OCTOPUS_BASE_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map_or_else(|| Ok(DEFAULT_BASE_URL.to_string()), validate_base_url)?,
            electricity_mpan: required("ELECTRICITY_MPAN")?,
            account_number: required("OCTOPUS_ACCOUNT_NUMBER")?,
        };

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Octopus Base URL: {}", config.base_url);
        tracing::debug!("Electricity MPAN: {}", config.electricity_mpan);
        tracing::debug!("Account number: {}", config.account_number);

        Ok(config)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("electricity_mpan", &self.electricity_mpan)
            .field("account_number", &self.account_number)
            .finish()
    }
}

fn required(name: &str) -> anyhow::Result<String> {
    std::env::var(name)
        .map_err(|_| anyhow::anyhow!("{} environment variable required", name))
        .and_then(|value| {
            if value.trim().is_empty() {
                anyhow::bail!("{} cannot be empty", name);
            }
            Ok(value)
        })
}

fn validate_base_url(url: String) -> anyhow::Result<String> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        anyhow::bail!("OCTOPUS_BASE_URL must start with http:// or https://");
    }
    Ok(url.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_base_url() {
        assert_eq!(
            validate_base_url("https://api.octopus.energy/v1/".to_string()).unwrap(),
            "https://api.octopus.energy/v1"
        );
        assert!(validate_base_url("api.octopus.energy".to_string()).is_err());
        assert!(validate_base_url("ftp://example.com".to_string()).is_err());
    }

    #[test]
    fn test_required_rejects_missing_and_blank() {
        std::env::remove_var("OCTOPUS_TEST_MISSING_VAR");
        let err = required("OCTOPUS_TEST_MISSING_VAR").unwrap_err();
        assert!(err.to_string().contains("required"));

        std::env::set_var("OCTOPUS_TEST_BLANK_VAR", "   ");
        let err = required("OCTOPUS_TEST_BLANK_VAR").unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = Config {
            api_key: "sk_live_secret".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            electricity_mpan: "1200000000000".to_string(),
            account_number: "A-93DD6C62".to_string(),
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("sk_live_secret"));
        assert!(debug.contains("A-93DD6C62"));
    }
}
