use tracing::debug;

use crate::config::AwsBaseConfig;

/// Build an AWS SDK configuration from the given [`AwsBaseConfig`].
///
/// Credentials come from the standard environment credential chain. The
/// endpoint override, when set, points every client at a local emulator.
pub async fn build_sdk_config(config: &AwsBaseConfig) -> aws_config::SdkConfig {
    let mut loader = aws_config::from_env().region(aws_config::Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint_url {
        debug!(endpoint = %endpoint, "using custom AWS endpoint");
        loader = loader.endpoint_url(endpoint);
    }

    loader.load().await
}
