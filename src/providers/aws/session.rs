use aws_config::{BehaviorVersion, Region, SdkConfig};
use log::debug;

/// Resolves the AWS session configuration through the SDK's default provider
/// chain, with an optional named profile and region override on top.
///
/// Credential problems do not surface here; the SDK reports them on the first
/// API call.
pub async fn load_sdk_config(profile: Option<&str>, region: Option<String>) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());

    if let Some(profile) = profile {
        debug!("Using AWS profile '{profile}'");
        loader = loader.profile_name(profile);
    }
    if let Some(region) = region {
        loader = loader.region(Region::new(region));
    }

    loader.load().await
}
