use anyhow::Context;
use serde::Deserialize;
use shared_kernel::configuration::config;
use std::path::PathBuf;
use url::Url;

const DEFAULT_BASE_URL: &str = "https://cdn-api.co-vin.in/api/";

const DEFAULT_USER_AGENTS: [&str; 4] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/90.0.4430.93 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 11_3_1) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.1 Safari/605.1.15",
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:88.0) Gecko/20100101 Firefox/88.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/90.0.4430.85 Safari/537.36 Edg/90.0.818.46",
];

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    pub language: String,
    pub user_agents: Vec<String>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            language: "en_US".to_string(),
            user_agents: DEFAULT_USER_AGENTS.map(str::to_owned).to_vec(),
        }
    }
}

impl ApiSettings {
    /// The configured base url, always ending in `/` so that endpoint paths
    /// are joined below it instead of replacing its last segment.
    pub fn endpoint_root(&self) -> anyhow::Result<Url> {
        let mut base_url = self.base_url.trim().to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Url::parse(&base_url).with_context(|| format!("Invalid api base url {}", self.base_url))
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CacheSettings {
    pub directory: PathBuf,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct LoggingSettings {
    pub json: bool,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Settings {
    pub api: ApiSettings,
    pub cache: CacheSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    pub fn parse() -> anyhow::Result<Settings> {
        config::<Settings>().context("Failed to deserialize settings to slot_finder settings")
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiSettings, Settings};
    use rstest::rstest;

    #[rstest]
    #[case("https://cdn-api.co-vin.in/api/")]
    #[case("https://cdn-api.co-vin.in/api")]
    #[case(" https://cdn-api.co-vin.in/api ")]
    fn test_endpoints_stay_below_the_base_path(#[case] base_url: &str) {
        let settings = ApiSettings {
            base_url: base_url.to_string(),
            ..ApiSettings::default()
        };

        let endpoint = settings
            .endpoint_root()
            .unwrap()
            .join("v2/admin/location/states")
            .unwrap();

        assert_eq!(
            endpoint.as_str(),
            "https://cdn-api.co-vin.in/api/v2/admin/location/states"
        );
    }

    #[test]
    fn test_a_malformed_base_url_is_rejected() {
        let settings = ApiSettings {
            base_url: "not a url".to_string(),
            ..ApiSettings::default()
        };
        assert!(settings.endpoint_root().is_err());
    }

    #[test]
    fn test_defaults_point_at_the_public_api() {
        let settings = Settings::default();
        assert_eq!(settings.api.base_url, "https://cdn-api.co-vin.in/api/");
        assert_eq!(settings.api.user_agents.len(), 4);
        assert!(!settings.logging.json);
    }

    #[test]
    fn test_partial_files_keep_the_remaining_defaults() {
        let directory = tempfile::tempdir().unwrap();
        std::fs::write(
            directory.path().join("base.yaml"),
            "cache:\n  directory: /tmp/slot_cache\nlogging:\n  json: true\n",
        )
        .unwrap();

        let settings =
            shared_kernel::configuration::config_from::<Settings>(directory.path()).unwrap();

        assert_eq!(settings.cache.directory.to_str(), Some("/tmp/slot_cache"));
        assert!(settings.logging.json);
        assert_eq!(settings.api.language, "en_US");
    }
}
