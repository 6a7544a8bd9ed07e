use serde::{Deserialize, Deserializer, Serialize};
use spacebridge_types::{AppMessageStyle, SpaceError};
use std::{fmt, path::Path, time::Duration};
use url::Url;

/// Production API root. Endpoint paths are appended to it.
pub const DEFAULT_BASE_URL: &str = "https://api.watsonwork.ibm.com";

/// Prefix for environment variable overrides (`SPACEBRIDGE_APPLICATION_ID`, …).
const ENV_PREFIX: &str = "SPACEBRIDGE_";

/// Keys kept as the raw environment text. Figment would otherwise parse an
/// all-digit id or secret as a number and drop leading zeros.
const RAW_STRING_KEYS: [&str; 2] = ["application_id", "secret"];

/// Accepts a string or a bare number, e.g. an unquoted YAML secret.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Unsigned(u64),
        Signed(i64),
        Float(f64),
    }

    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Text(s) => s,
        Scalar::Unsigned(n) => n.to_string(),
        Scalar::Signed(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
    })
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    30
}

/// Client configuration: app credentials plus transport settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// OAuth application id (the basic-auth user of the token exchange).
    #[serde(default, deserialize_with = "string_or_number")]
    pub application_id: String,
    /// OAuth application secret. Redacted from `Debug` output.
    #[serde(default, deserialize_with = "string_or_number")]
    pub secret: String,
    /// API root (defaults to [`DEFAULT_BASE_URL`]).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request deadline in seconds; `0` disables it (defaults to 30).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Presentation of outbound app messages.
    #[serde(default)]
    pub message: AppMessageStyle,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            application_id: String::new(),
            secret: String::new(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            message: AppMessageStyle::default(),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("application_id", &self.application_id)
            .field("secret", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("message", &self.message)
            .finish()
    }
}

impl ClientConfig {
    /// Creates a configuration with the given credentials and default settings.
    pub fn new(application_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            application_id: application_id.into(),
            secret: secret.into(),
            ..Self::default()
        }
    }

    /// Overrides the API root, e.g. to point at a test server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Parses configuration from a YAML string, merged with defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if the YAML is invalid or extraction fails.
    #[allow(clippy::result_large_err)]
    pub fn from_yaml(yaml: &str) -> Result<Self, figment::Error> {
        use figment::{
            Figment,
            providers::{Format as _, Serialized, Yaml},
        };
        Figment::from(Serialized::defaults(ClientConfig::default()))
            .merge(Yaml::string(yaml))
            .extract()
    }

    /// Loads configuration from a file path, merged with defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if the file cannot be read or parsed.
    #[allow(clippy::result_large_err)]
    pub fn from_file(path: &Path) -> Result<Self, figment::Error> {
        use figment::{
            Figment,
            providers::{Format as _, Serialized, Yaml},
        };
        Figment::from(Serialized::defaults(ClientConfig::default()))
            .merge(Yaml::file(path))
            .extract()
    }

    /// Loads configuration from an optional file, then applies
    /// `SPACEBRIDGE_*` environment overrides on top. The id and secret are
    /// taken from the environment verbatim.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if the file cannot be parsed or a
    /// variable has the wrong type.
    #[allow(clippy::result_large_err)]
    pub fn load(path: Option<&Path>) -> Result<Self, figment::Error> {
        use figment::{
            Figment,
            providers::{Env, Format as _, Serialized, Yaml},
        };
        let mut figment = Figment::from(Serialized::defaults(ClientConfig::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        let env = Env::prefixed(ENV_PREFIX);
        let raw: Vec<(&str, String)> = env
            .iter()
            .filter_map(|(key, value)| {
                RAW_STRING_KEYS
                    .iter()
                    .find(|k| key.as_str().eq_ignore_ascii_case(k))
                    .map(|k| (*k, value))
            })
            .collect();
        figment = figment.merge(env.ignore(&RAW_STRING_KEYS));
        for (key, value) in raw {
            figment = figment.merge(Serialized::default(key, value));
        }
        figment.extract()
    }

    /// Checks that credentials are present and the API root is a usable URL.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::Config`] on an empty application id or secret,
    /// or an unparsable base URL.
    pub fn validate(&self) -> Result<(), SpaceError> {
        if self.application_id.trim().is_empty() {
            return Err(SpaceError::Config("missing application id".into()));
        }
        if self.secret.trim().is_empty() {
            return Err(SpaceError::Config("missing application secret".into()));
        }
        self.base_url().map(|_| ())
    }

    /// The parsed API root.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::Config`] if `base_url` is not an absolute
    /// http(s) URL.
    pub fn base_url(&self) -> Result<Url, SpaceError> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| SpaceError::Config(format!("invalid base_url {:?}: {e}", self.base_url)))?;
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(SpaceError::Config(format!(
                "base_url must be an http(s) URL, got {:?}",
                self.base_url
            )));
        }
        Ok(url)
    }

    /// Per-request deadline, or `None` when disabled.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}
