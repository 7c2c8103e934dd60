//! Processed scanner settings: the project identity plus the resolver.

use super::resolver::PropertyResolver;
use crate::constants;
use crate::errors::SettingsError;

/// Settings every analysis needs, validated up front, with the full
/// resolver kept for ad-hoc lookups.
#[derive(Debug, Clone)]
pub struct ScanSettings {
    project_key: String,
    project_name: Option<String>,
    project_version: Option<String>,
    install_loader_targets: bool,
    resolver: PropertyResolver,
}

impl ScanSettings {
    /// Fails with `MissingSetting` when `sonar.projectKey` is absent, or
    /// `InvalidValue` when it is blank.
    pub fn new(
        resolver: PropertyResolver,
        install_loader_targets: bool,
    ) -> Result<Self, SettingsError> {
        let project_key = resolver.require(constants::PROJECT_KEY_SETTING)?.trim();
        if project_key.is_empty() {
            return Err(SettingsError::InvalidValue {
                key: constants::PROJECT_KEY_SETTING.to_string(),
                message: "project key must not be blank".to_string(),
            });
        }
        let project_key = project_key.to_string();
        let project_name = resolver
            .resolve(constants::PROJECT_NAME_SETTING)
            .map(str::to_string);
        let project_version = resolver
            .resolve(constants::PROJECT_VERSION_SETTING)
            .map(str::to_string);

        Ok(Self {
            project_key,
            project_name,
            project_version,
            install_loader_targets,
            resolver,
        })
    }

    pub fn project_key(&self) -> &str {
        &self.project_key
    }

    pub fn project_name(&self) -> Option<&str> {
        self.project_name.as_deref()
    }

    pub fn project_version(&self) -> Option<&str> {
        self.project_version.as_deref()
    }

    pub fn install_loader_targets(&self) -> bool {
        self.install_loader_targets
    }

    pub fn resolver(&self) -> &PropertyResolver {
        &self.resolver
    }

    pub fn get_setting(&self, key: &str) -> Result<&str, SettingsError> {
        self.resolver.require(key)
    }

    pub fn try_get_setting(&self, key: &str) -> Option<&str> {
        self.resolver.resolve(key)
    }

    pub fn get_setting_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.resolver.resolve_or_default(key, default)
    }
}
