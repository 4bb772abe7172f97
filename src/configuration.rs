use std::fmt;

use config::ConfigError;

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub jwt: JwtSettings,
    pub platform: Platform,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: String,
    pub port: u16,
    pub host: String,
    pub database_name: String,
}

impl DatabaseSettings {
    pub fn connection_string(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database_name
        )
    }
}

impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .field("port", &self.port)
            .field("host", &self.host)
            .field("database_name", &self.database_name)
            .finish()
    }
}

/// Access token signing settings. The secret comes from the deployment
/// environment and is never generated or persisted by the service.
#[derive(serde::Deserialize, Clone)]
pub struct JwtSettings {
    pub secret: String,
}

impl JwtSettings {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtSettings").field("secret", &"[redacted]").finish()
    }
}

/// Deployment mode. Destructive admin operations only exist in `dev`.
#[derive(serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Dev,
    Production,
}

impl Platform {
    pub fn allows_reset(self) -> bool {
        self == Platform::Dev
    }
}

/// Load settings from `configuration.yaml` (optional) overlaid with `APP_*`
/// environment variables, e.g. `APP_JWT__SECRET` or `APP_PLATFORM`.
pub fn get_configuration() -> Result<Settings, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("configuration").required(false))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;
    let settings = settings.try_deserialize::<Settings>()?;

    if settings.jwt.secret.trim().is_empty() {
        return Err(ConfigError::Message("jwt.secret must not be empty".to_string()));
    }
    Ok(settings)
}
