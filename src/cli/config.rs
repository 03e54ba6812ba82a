//! Configuration management module

use crate::error::{CopyError, Result};
use serde::{Deserialize, Serialize};

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
}

impl AuthConfig {
    pub fn new(username: String, password: String) -> Self {
        Self { username, password }
    }

    /// Credentials are optional, but a username without a password (or the
    /// reverse) is a mistake.
    pub fn from_parts(username: Option<String>, password: Option<String>) -> Result<Option<Self>> {
        match (username, password) {
            (Some(username), Some(password)) => {
                let auth = Self::new(username, password);
                auth.validate()?;
                Ok(Some(auth))
            }
            (None, None) => Ok(None),
            (Some(_), None) => Err(CopyError::Config(
                "A password is required when a username is given".to_string(),
            )),
            (None, Some(_)) => Err(CopyError::Config(
                "A username is required when a password is given".to_string(),
            )),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.username.is_empty() {
            return Err(CopyError::Config("Username cannot be empty".to_string()));
        }
        if self.password.is_empty() {
            return Err(CopyError::Config("Password cannot be empty".to_string()));
        }
        Ok(())
    }
}

/// Source/destination pair for one copy run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyConfig {
    pub src_repository: String,
    pub dst_repository: String,
    pub apply: bool,
}

impl CopyConfig {
    pub fn new(src_repository: String, dst_repository: String, apply: bool) -> Self {
        Self {
            src_repository,
            dst_repository,
            apply,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_repository("Source", &self.src_repository)?;
        validate_repository("Destination", &self.dst_repository)?;
        if self.src_repository == self.dst_repository {
            return Err(CopyError::Config(format!(
                "Source and destination are the same repository: {}",
                self.src_repository
            )));
        }
        Ok(())
    }
}

fn validate_repository(label: &str, repository: &str) -> Result<()> {
    if repository.is_empty() {
        return Err(CopyError::Config(format!(
            "{} repository cannot be empty",
            label
        )));
    }
    if repository.contains('@') {
        return Err(CopyError::Config(format!(
            "{} repository must not include a digest: {}",
            label, repository
        )));
    }
    // A colon is only allowed in the registry host, never in the last component
    let name = repository.rsplit('/').next().unwrap_or(repository);
    if name.contains(':') {
        return Err(CopyError::Config(format!(
            "{} repository must not include a tag: {}",
            label, repository
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_from_parts() {
        assert!(AuthConfig::from_parts(None, None).unwrap().is_none());
        let auth = AuthConfig::from_parts(Some("user".into()), Some("secret".into()))
            .unwrap()
            .unwrap();
        assert_eq!(auth.username, "user");
        assert!(AuthConfig::from_parts(Some("user".into()), None).is_err());
        assert!(AuthConfig::from_parts(None, Some("secret".into())).is_err());
        assert!(AuthConfig::from_parts(Some(String::new()), Some("secret".into())).is_err());
    }

    #[test]
    fn test_copy_config_accepts_registry_port() {
        let config = CopyConfig::new(
            "lsirepfl/twitter-collect".into(),
            "icregistry:5000/lsir/twitter-collect".into(),
            true,
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_copy_config_rejects_tags_and_digests() {
        for bad in ["registry/app:v1", "app:latest", "registry/app@sha256:abc"] {
            let config = CopyConfig::new(bad.into(), "registry/dst".into(), false);
            assert!(config.validate().is_err(), "{} should be rejected", bad);
        }
    }

    #[test]
    fn test_copy_config_rejects_same_or_empty_repository() {
        assert!(CopyConfig::new("a/b".into(), "a/b".into(), false).validate().is_err());
        assert!(CopyConfig::new(String::new(), "a/b".into(), false).validate().is_err());
        assert!(CopyConfig::new("a/b".into(), String::new(), false).validate().is_err());
    }
}
