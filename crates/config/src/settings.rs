//! Named settings understood by Herald.
//!
//! Each setting is an environment variable plus the `[section].key` it falls
//! back to in the config file.

/// An environment variable / config section / config key triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Setting {
    pub env_var: &'static str,
    pub section: &'static str,
    pub key: &'static str,
}

impl Setting {
    pub const fn new(env_var: &'static str, section: &'static str, key: &'static str) -> Self {
        Self {
            env_var,
            section,
            key,
        }
    }
}

impl std::fmt::Display for Setting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / [{}].{}", self.env_var, self.section, self.key)
    }
}

/// Notify API key (`<name>-<service id>-<secret>`).
pub const GOV_NOTIFY_KEY: Setting = Setting::new("GOV_NOTIFY_KEY", "GovNotify", "api_key");

/// Notify email reply-to identifier.
pub const GOV_NOTIFY_REPLY_TO: Setting =
    Setting::new("GOV_NOTIFY_REPLY_TO", "GovNotify", "reply_to_id");

/// Optional Notify API base URL override.
pub const GOV_NOTIFY_BASE_URL: Setting =
    Setting::new("GOV_NOTIFY_BASE_URL", "GovNotify", "base_url");

/// Teams incoming webhook URL.
pub const TEAMS_URL: Setting = Setting::new("TEAMS_URL", "Teams", "webhook_url");

/// Bucket that receives offloaded attachments.
pub const BUCKET_NAME: Setting = Setting::new("BUCKET_NAME", "S3", "bucket_name");

/// Optional region of the attachment bucket.
pub const AWS_REGION: Setting = Setting::new("AWS_REGION", "S3", "region");

/// Environment variable naming the config file.
pub const CONFIG_FILE_ENV: &str = "CONFIG_FILE";

/// Config file used when `CONFIG_FILE` is not set.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";
