//! Container engine boundary
//!
//! The copy workflow only talks to the engine through [`ImageEngine`], so the
//! Docker daemon can be swapped for any other implementation (tests use an
//! in-memory one).

pub mod docker;

use crate::error::Result;
use crate::image::ImageHandle;
use async_trait::async_trait;

pub use docker::DockerEngine;

/// Raw image record as the engine reports it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineImage {
    pub id: String,
    /// `repository:tag` strings, unparsed
    pub tags: Vec<String>,
}

#[async_trait]
pub trait ImageEngine: Send + Sync {
    /// Lists local images, restricted to one repository when `name` is given.
    async fn list_images(&self, name: Option<&str>) -> Result<Vec<EngineImage>>;

    /// Pulls every tag of `repository` and returns the resulting local images.
    async fn pull_all_tags(&self, repository: &str) -> Result<Vec<EngineImage>>;

    /// Adds `repository:tag` to the image. Re-tagging an existing tag succeeds.
    async fn tag_image(&self, image: &ImageHandle, repository: &str, tag: &str) -> Result<()>;

    /// Pushes every local tag of `repository` and returns the raw response
    /// stream as newline-delimited records.
    async fn push_repository(&self, repository: &str) -> Result<String>;

    /// Removes one local tag.
    async fn remove_image(&self, reference: &str) -> Result<()>;
}
