use crate::adapters::http::ApiSettings;
use crate::utils::error::{Result, VenuesError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

const DEFAULT_API_URL: &str = "https://api.foursquare.com/v2";
const DEFAULT_VERSION: &str = "20140806";
const DEFAULT_MODE: &str = "foursquare";
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
const MODES: [&str; 2] = ["foursquare", "swarm"];

static ENV_VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid regex"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenuesConfig {
    pub foursquare: FoursquareConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoursquareConfig {
    pub api_url: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub version: Option<String>,
    pub mode: Option<String>,
    pub access_token: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<String>,
}

impl VenuesConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(VenuesError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| VenuesError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${FOURSQUARE_CLIENT_SECRET})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let result = ENV_VAR_RE.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("foursquare.api_url", self.api_url())?;

        let client_id =
            validation::validate_required_field("foursquare.client_id", &self.foursquare.client_id)?;
        validation::validate_non_empty_string("foursquare.client_id", client_id)?;

        let client_secret = validation::validate_required_field(
            "foursquare.client_secret",
            &self.foursquare.client_secret,
        )?;
        validation::validate_non_empty_string("foursquare.client_secret", client_secret)?;

        validation::validate_version_stamp("foursquare.version", self.version())?;
        validation::validate_one_of("foursquare.mode", self.mode(), &MODES)?;
        validation::validate_positive_number("foursquare.timeout_seconds", self.timeout_seconds(), 1)?;

        if let Some(format) = self.logging.as_ref().and_then(|l| l.format.as_deref()) {
            validation::validate_one_of("logging.format", format, &["compact", "json"])?;
        }

        Ok(())
    }

    pub fn api_url(&self) -> &str {
        self.foursquare.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    pub fn version(&self) -> &str {
        self.foursquare.version.as_deref().unwrap_or(DEFAULT_VERSION)
    }

    pub fn mode(&self) -> &str {
        self.foursquare.mode.as_deref().unwrap_or(DEFAULT_MODE)
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.foursquare
            .timeout_seconds
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    /// 未替換的 `${VAR}` 視為未設定
    pub fn access_token(&self) -> Option<&str> {
        self.foursquare
            .access_token
            .as_deref()
            .filter(|t| !t.trim().is_empty() && !t.starts_with("${"))
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .map(|f| f == "json")
            .unwrap_or(false)
    }

    /// Validated transport settings for the HTTP invoker.
    pub fn api_settings(&self) -> Result<ApiSettings> {
        self.validate_config()?;
        Ok(ApiSettings {
            api_url: self.api_url().to_string(),
            client_id: self.foursquare.client_id.clone().unwrap_or_default(),
            client_secret: self.foursquare.client_secret.clone().unwrap_or_default(),
            version: self.version().to_string(),
            mode: self.mode().to_string(),
            timeout: Duration::from_secs(self.timeout_seconds()),
        })
    }
}

impl Validate for VenuesConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
