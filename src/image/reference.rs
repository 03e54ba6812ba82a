//! Parsing of `repository:tag` image references

use crate::error::{CopyError, Result};
use std::fmt;
use std::str::FromStr;

const DEFAULT_REGISTRY: &str = "docker.io";

/// One `repository:tag` pair as reported by the engine
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageTag {
    pub repository: String,
    pub tag: String,
}

impl ImageTag {
    pub fn new(repository: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            tag: tag.into(),
        }
    }

    /// Splits on the last colon, so `host:5000/app:v1` keeps its port in the
    /// repository part.
    pub fn parse(s: &str) -> Result<Self> {
        match s.rsplit_once(':') {
            Some((repository, tag)) => Ok(Self::new(repository, tag)),
            None => Err(CopyError::InvalidReference(s.to_string())),
        }
    }

    pub fn uri(&self) -> String {
        format!("{}:{}", self.repository, self.tag)
    }

    /// Registry domain the repository lives on
    pub fn registry_host(&self) -> &str {
        registry_host(&self.repository)
    }
}

impl fmt::Display for ImageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.repository, self.tag)
    }
}

impl FromStr for ImageTag {
    type Err = CopyError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// The first path component names a registry only when it looks like a host.
pub fn registry_host(repository: &str) -> &str {
    match repository.split_once('/') {
        Some((first, _))
            if first.contains('.') || first.contains(':') || first == "localhost" =>
        {
            first
        }
        _ => DEFAULT_REGISTRY,
    }
}
