use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::ConfigError;
use crate::settings::{CONFIG_FILE_ENV, DEFAULT_CONFIG_FILE, Setting};

/// Source of environment variables consulted before the config file.
#[derive(Clone, Default)]
pub enum Environment {
    /// The real process environment.
    #[default]
    Process,
    /// A fixed map, for tests and embedding.
    Fixed(HashMap<String, String>),
}

impl Environment {
    /// Build a fixed environment from key/value pairs.
    pub fn fixed<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::Fixed(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Look up a variable. Empty values are treated as unset.
    pub fn var(&self, name: &str) -> Option<String> {
        let value = match self {
            Self::Process => std::env::var(name).ok(),
            Self::Fixed(vars) => vars.get(name).cloned(),
        };
        value.filter(|v| !v.is_empty())
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Process => f.write_str("Process"),
            Self::Fixed(vars) => {
                let mut keys: Vec<&String> = vars.keys().collect();
                keys.sort();
                f.debug_tuple("Fixed").field(&keys).finish()
            }
        }
    }
}

/// Resolves named settings from the environment, falling back to a TOML
/// config file.
///
/// The file is organised in sections:
///
/// ```toml
/// [GovNotify]
/// api_key = "..."
///
/// [Teams]
/// webhook_url = "https://example.webhook.office.com/..."
/// ```
///
/// Nothing is cached beyond the parsed file: every call re-reads the
/// environment, so resolution with unchanged inputs always yields the same
/// value.
///
/// # Examples
///
/// ```
/// use herald_config::{ConfigResolver, Environment};
///
/// let resolver = ConfigResolver::from_toml_str("[Teams]\nwebhook_url = \"https://hook\"")
///     .unwrap()
///     .with_environment(Environment::fixed([("BUCKET_NAME", "attachments")]));
///
/// assert_eq!(resolver.resolve("TEAMS_URL", "Teams", "webhook_url").unwrap(), "https://hook");
/// assert_eq!(resolver.resolve("BUCKET_NAME", "S3", "bucket_name").unwrap(), "attachments");
/// ```
pub struct ConfigResolver {
    path: Option<PathBuf>,
    table: Option<toml::Table>,
    env: Environment,
}

impl std::fmt::Debug for ConfigResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigResolver")
            .field("path", &self.path)
            .field("loaded", &self.table.is_some())
            .field("env", &self.env)
            .finish()
    }
}

impl ConfigResolver {
    /// A resolver with no config file: only the environment is consulted.
    pub fn empty() -> Self {
        Self {
            path: None,
            table: None,
            env: Environment::Process,
        }
    }

    /// Load the config file at `path`.
    ///
    /// A path that does not exist or is not a regular file leaves the
    /// resolver without a file, which is not an error until a setting needs
    /// it. A file that exists but cannot be read or parsed is an error.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        if !path.is_file() {
            debug!(path = %path.display(), "config file not found, using environment only");
            return Ok(Self {
                path: Some(path),
                table: None,
                env: Environment::Process,
            });
        }

        info!(path = %path.display(), "reading config file");
        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Load {
            path: path.clone(),
            source,
        })?;
        let table = contents
            .parse::<toml::Table>()
            .map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?;

        Ok(Self {
            path: Some(path),
            table: Some(table),
            env: Environment::Process,
        })
    }

    /// Load the config file named by `CONFIG_FILE`, or `config.toml`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = Environment::Process
            .var(CONFIG_FILE_ENV)
            .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_owned());
        Self::load(path)
    }

    /// Build a resolver from in-memory TOML.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let table = contents
            .parse::<toml::Table>()
            .map_err(|source| ConfigError::Parse {
                path: PathBuf::from("<inline>"),
                source,
            })?;
        Ok(Self {
            path: None,
            table: Some(table),
            env: Environment::Process,
        })
    }

    /// Replace the environment source.
    #[must_use]
    pub fn with_environment(mut self, env: Environment) -> Self {
        self.env = env;
        self
    }

    /// Path of the config file, if one was configured.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether a config file was successfully loaded.
    pub fn is_loaded(&self) -> bool {
        self.table.is_some()
    }

    /// Resolve a setting: environment variable first, then `[section].key`.
    pub fn resolve(&self, env_var: &str, section: &str, key: &str) -> Result<String, ConfigError> {
        if let Some(value) = self.env.var(env_var) {
            debug!(env_var, "resolved config value from environment");
            return Ok(value);
        }

        let Some(table) = &self.table else {
            let reason = match &self.path {
                Some(path) => format!("{} does not exist or is not a file", path.display()),
                None => "no config file path is set".to_owned(),
            };
            warn!(env_var, section, key, %reason, "config value unavailable");
            return Err(ConfigError::Missing {
                env_var: env_var.to_owned(),
                section: section.to_owned(),
                key: key.to_owned(),
                reason,
            });
        };

        let Some(toml::Value::Table(section_table)) = table.get(section) else {
            warn!(env_var, section, key, "config section not found");
            return Err(ConfigError::Missing {
                env_var: env_var.to_owned(),
                section: section.to_owned(),
                key: key.to_owned(),
                reason: format!("no section [{section}]"),
            });
        };

        let Some(value) = section_table.get(key) else {
            warn!(env_var, section, key, "config key not found");
            return Err(ConfigError::KeyMissing {
                env_var: env_var.to_owned(),
                section: section.to_owned(),
                key: key.to_owned(),
            });
        };

        let value = match value {
            toml::Value::String(s) => s.clone(),
            toml::Value::Integer(i) => i.to_string(),
            toml::Value::Float(f) => f.to_string(),
            toml::Value::Boolean(b) => b.to_string(),
            toml::Value::Datetime(d) => d.to_string(),
            toml::Value::Array(_) | toml::Value::Table(_) => {
                return Err(ConfigError::Invalid {
                    setting: format!("[{section}].{key}"),
                    reason: "expected a scalar value".to_owned(),
                });
            }
        };

        info!(section, key, "retrieved config value");
        Ok(value)
    }

    /// Like [`resolve`](Self::resolve), but a setting that is simply absent
    /// yields `None`.
    pub fn resolve_optional(
        &self,
        env_var: &str,
        section: &str,
        key: &str,
    ) -> Result<Option<String>, ConfigError> {
        match self.resolve(env_var, section, key) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_missing() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Resolve one of the named [`Setting`]s.
    pub fn setting(&self, setting: Setting) -> Result<String, ConfigError> {
        self.resolve(setting.env_var, setting.section, setting.key)
    }

    /// Resolve one of the named [`Setting`]s, treating absence as `None`.
    pub fn optional_setting(&self, setting: Setting) -> Result<Option<String>, ConfigError> {
        self.resolve_optional(setting.env_var, setting.section, setting.key)
    }
}
