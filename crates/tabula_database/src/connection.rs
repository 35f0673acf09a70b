//! Connection settings and establishment.

use crate::MssqlDriver;
use serde::{Deserialize, Serialize};
use tabula_error::{ConfigError, TabulaResult};
use tiberius::{AuthMethod, Config};
use tracing::instrument;

/// How to reach the SQL Server instance.
///
/// Either a full ADO.NET `connection_string` or the discrete host/port/user
/// fields. When both are given the connection string wins.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into), default)]
pub struct ConnectionSettings {
    /// Server host name or address
    #[serde(default = "default_host")]
    pub host: String,
    /// TCP port
    #[serde(default = "default_port")]
    pub port: u16,
    /// SQL login
    #[serde(default)]
    pub username: Option<String>,
    /// SQL login password
    #[serde(default)]
    pub password: Option<String>,
    /// ADO.NET connection string, e.g. `server=tcp:db,1433;user=sa;password=...`
    #[serde(default)]
    pub connection_string: Option<String>,
    /// Accept the server certificate without validation
    #[serde(default = "default_trust_cert")]
    pub trust_cert: bool,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            username: None,
            password: None,
            connection_string: None,
            trust_cert: default_trust_cert(),
        }
    }
}

impl std::fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field(
                "connection_string",
                &self.connection_string.as_ref().map(|_| "***"),
            )
            .field("trust_cert", &self.trust_cert)
            .finish()
    }
}

impl ConnectionSettings {
    /// Starts a builder with the default host, port and certificate policy.
    pub fn builder() -> ConnectionSettingsBuilder {
        ConnectionSettingsBuilder::default()
    }

    /// Where this connects, for logs and the status bar. Never includes
    /// credentials.
    pub fn target(&self) -> String {
        match &self.connection_string {
            Some(_) => "connection string".to_string(),
            None => format!("{}:{}", self.host, self.port),
        }
    }

    /// Builds the driver configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection string does not parse, or if no
    /// connection string is given and the username is missing.
    pub fn to_config(&self) -> Result<Config, ConfigError> {
        let mut config = match &self.connection_string {
            Some(ado) if !ado.trim().is_empty() => Config::from_ado_string(ado)
                .map_err(|e| ConfigError::new(format!("Invalid connection string: {}", e)))?,
            _ => {
                let username = self
                    .username
                    .as_deref()
                    .filter(|u| !u.is_empty())
                    .ok_or_else(|| {
                        ConfigError::new(
                            "No username given; set TABULA_USER or [connection] username",
                        )
                    })?;
                let mut config = Config::new();
                config.host(&self.host);
                config.port(self.port);
                config.authentication(AuthMethod::sql_server(
                    username,
                    self.password.as_deref().unwrap_or_default(),
                ));
                config
            }
        };
        if self.trust_cert {
            config.trust_cert();
        }
        Ok(config)
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    1433
}

fn default_trust_cert() -> bool {
    true
}

/// Opens the single connection a session uses.
///
/// # Errors
///
/// Returns a configuration error for incomplete settings, or a database
/// connection error if the server cannot be reached or rejects the login.
#[instrument(name = "database.establish_connection", fields(server = %settings.target()))]
pub fn establish_connection(settings: &ConnectionSettings) -> TabulaResult<MssqlDriver> {
    let config = settings.to_config()?;
    tracing::debug!("Connecting to SQL Server");
    let driver = MssqlDriver::connect(config, settings.target()).map_err(|e| {
        tracing::error!(error = %e, "Failed to establish database connection");
        e
    })?;
    tracing::info!("Connected");
    Ok(driver)
}
