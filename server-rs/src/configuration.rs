use std::ffi::OsString;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use anyhow::Context;
use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
/// Everything the server needs to start, assembled by [`Config::load`].
pub struct Config {
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
}

impl Config {
    /// Load the configuration from the directory named by `APP_CONFIGURATION_DIR`,
    /// or from `./configuration` when it is not set. See [`Config::load_from`].
    pub fn load(default_profile: Option<ApplicationProfile>) -> Result<Config, anyhow::Error> {
        Self::load_from(configuration_dir(std::env::var_os(CONFIGURATION_DIR_ENV_VAR)), default_profile)
    }

    /// Merge the configuration sources, later sources overriding earlier ones:
    ///
    /// 1. `<configuration_dir>/base.yml`, which must exist
    /// 2. `<configuration_dir>/<profile>.yml`
    /// 3. environment variables prefixed with `APP_`, using `__` to descend
    ///    into nested fields (e.g. `APP_SERVER__PORT`).
    ///
    /// The profile is read from `APP_PROFILE`. When it isn't set, `default_profile`
    /// is used instead.
    pub fn load_from(
        configuration_dir: impl AsRef<Path>,
        default_profile: Option<ApplicationProfile>,
    ) -> Result<Config, anyhow::Error> {
        let profile = ApplicationProfile::load(default_profile)
            .context("Failed to load the desired application profile")?;

        let configuration_dir = configuration_dir.as_ref();
        let base_filepath = configuration_dir.join("base.yml");
        let profile_filepath = configuration_dir.join(format!("{}.yml", profile.as_str()));
        tracing::debug!(
            configuration.directory = %configuration_dir.display(),
            configuration.profile = profile.as_str(),
            "loading configuration"
        );

        Figment::new()
            .merge(Yaml::file_exact(&base_filepath))
            .merge(Yaml::file(&profile_filepath))
            .merge(
                Env::prefixed("APP_")
                    .split("__")
                    .ignore(&["PROFILE", "CONFIGURATION_DIR"]),
            )
            .extract()
            .with_context(|| {
                format!(
                    "Failed to load hierarchical configuration from `{}` and `{}`",
                    base_filepath.display(),
                    profile_filepath.display()
                )
            })
    }
}

const CONFIGURATION_DIR_ENV_VAR: &str = "APP_CONFIGURATION_DIR";

/// Where the YAML files live, relative to the working directory unless overridden.
fn configuration_dir(env_value: Option<OsString>) -> PathBuf {
    env_value
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("configuration"))
}

#[derive(Deserialize, Debug, Clone)]
pub struct ServerConfig {
    /// The interface to bind to, e.g. `0.0.0.0` to accept reports from anywhere.
    pub ip: IpAddr,
    /// `0` asks the OS for a free port.
    pub port: u16,
    /// Attach a permissive CORS layer to the router.
    #[serde(default)]
    pub cors: bool,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.ip, self.port)
    }

    pub async fn listener(&self) -> Result<tokio::net::TcpListener, std::io::Error> {
        tokio::net::TcpListener::bind(self.socket_addr()).await
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct TelemetryConfig {
    /// Filter directive used when `RUST_LOG` is not set.
    pub log_level: String,
}

/// The kind of environment the server runs in. Selects `configuration/<profile>.yml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationProfile {
    Dev,
    Prod,
}

impl ApplicationProfile {
    const ENV_VAR: &'static str = "APP_PROFILE";

    fn load(default_profile: Option<ApplicationProfile>) -> Result<ApplicationProfile, anyhow::Error> {
        match std::env::var(Self::ENV_VAR) {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("Failed to parse the `{}` environment variable", Self::ENV_VAR)),
            Err(std::env::VarError::NotPresent) => default_profile.with_context(|| {
                format!("The `{}` environment variable is not set and no default profile was provided", Self::ENV_VAR)
            }),
            Err(e) => Err(e).with_context(|| format!("Failed to read the `{}` environment variable", Self::ENV_VAR)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationProfile::Dev => "dev",
            ApplicationProfile::Prod => "prod",
        }
    }
}

impl std::str::FromStr for ApplicationProfile {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Ok(ApplicationProfile::Dev),
            "prod" | "production" => Ok(ApplicationProfile::Prod),
            s => Err(anyhow::anyhow!(
                "`{s}` is not a valid application profile.\nValid options are: `dev`, `prod`."
            )),
        }
    }
}
