//! Platform service factory
//!
//! Creates the platform service from configuration.

use crate::auth::get_github_auth;
use crate::error::Result;
use crate::platform::{GitHubService, PlatformService};
use crate::types::PlatformConfig;

/// Create a platform service from configuration
///
/// Handles authentication and client construction.
pub async fn create_platform_service(config: &PlatformConfig) -> Result<Box<dyn PlatformService>> {
    let auth = get_github_auth(config.host.as_deref()).await?;
    Ok(Box::new(GitHubService::new(
        &auth.token,
        config.organization.clone(),
        config.host.clone(),
    )?))
}
