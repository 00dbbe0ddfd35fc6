use secrecy::Secret;
use serde_aux::field_attributes::deserialize_number_from_string;
use std::time::Duration;

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub backend: BackendSettings,
    pub notifications: NotificationSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct BackendSettings {
    pub endpoint: String,
    pub access_token: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl BackendSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }
}

/// Display windows for the transient UI affordances driven after a submission.
#[derive(serde::Deserialize, Clone, Debug)]
pub struct NotificationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub banner_duration_milliseconds: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub sent_indicator_milliseconds: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub modal_close_delay_milliseconds: u64,
}

impl NotificationSettings {
    pub fn banner_duration(&self) -> Duration {
        Duration::from_millis(self.banner_duration_milliseconds)
    }

    pub fn sent_indicator_duration(&self) -> Duration {
        Duration::from_millis(self.sent_indicator_milliseconds)
    }

    pub fn modal_close_delay(&self) -> Duration {
        Duration::from_millis(self.modal_close_delay_milliseconds)
    }
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            banner_duration_milliseconds: 5000,
            sent_indicator_milliseconds: 5000,
            modal_close_delay_milliseconds: 2000,
        }
    }
}

/// The possible runtime environment for our application.
#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. \
                Use either `local` or `production`.",
                other
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!("Failed to determine the current directory: {}", e))
    })?;
    get_configuration_from(&base_path.join("configuration"))
}

/// Layers `base.yaml`, the environment file selected by `APP_ENVIRONMENT`
/// and `APP_`-prefixed environment variables, in that order.
pub fn get_configuration_from(
    configuration_directory: &std::path::Path,
) -> Result<Settings, config::ConfigError> {
    // Detect the running environment.
    // Default to `local` if unspecified.
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        // Add in settings from environment variables (with a prefix of APP and '__' as separator)
        // E.g. `APP_BACKEND__ENDPOINT=https://xyz.supabase.co` would set `Settings.backend.endpoint`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
