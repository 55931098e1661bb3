use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Neither the environment nor a loaded config section provides the
    /// setting. Covers a missing file as well as a missing section.
    #[error(
        "environment variable '{env_var}' not set and [{section}].{key} is unavailable: {reason}"
    )]
    Missing {
        env_var: String,
        section: String,
        key: String,
        reason: String,
    },

    /// The section exists but does not contain the key, and the environment
    /// variable is not set either.
    #[error("environment variable '{env_var}' not set and [{section}] has no key '{key}'")]
    KeyMissing {
        env_var: String,
        section: String,
        key: String,
    },

    /// A value was found but is not usable.
    #[error("invalid value for {setting}: {reason}")]
    Invalid { setting: String, reason: String },

    /// The config file exists but could not be read.
    #[error("failed to read config file {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file could not be parsed as TOML.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    /// Returns `true` for the two "setting not found anywhere" variants.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing { .. } | Self::KeyMissing { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_variants_are_flagged() {
        let missing = ConfigError::Missing {
            env_var: "TEAMS_URL".into(),
            section: "Teams".into(),
            key: "webhook_url".into(),
            reason: "no config file loaded".into(),
        };
        let key_missing = ConfigError::KeyMissing {
            env_var: "TEAMS_URL".into(),
            section: "Teams".into(),
            key: "webhook_url".into(),
        };
        let invalid = ConfigError::Invalid {
            setting: "GOV_NOTIFY_KEY".into(),
            reason: "too short".into(),
        };
        assert!(missing.is_missing());
        assert!(key_missing.is_missing());
        assert!(!invalid.is_missing());
    }

    #[test]
    fn error_display() {
        let err = ConfigError::KeyMissing {
            env_var: "BUCKET_NAME".into(),
            section: "S3".into(),
            key: "bucket_name".into(),
        };
        assert_eq!(
            err.to_string(),
            "environment variable 'BUCKET_NAME' not set and [S3] has no key 'bucket_name'"
        );
    }
}
