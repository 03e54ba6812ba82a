//! Pull, re-tag and push operations against the engine
//!
//! When `apply` is false every mutating call is only logged. Pulling is the
//! exception: it always runs, so a dry run still fills the local store (the
//! cleanup guard removes what it added).

use super::push_logs::process_push_logs;
use crate::engine::ImageEngine;
use crate::error::Result;
use crate::image::{Image, ImageTag};
use crate::logging::Logger;

#[derive(Clone)]
pub struct ImageProxy<'a> {
    engine: &'a dyn ImageEngine,
    apply: bool,
    logger: Logger,
}

impl<'a> ImageProxy<'a> {
    pub fn new(engine: &'a dyn ImageEngine, apply: bool, logger: Logger) -> Self {
        Self {
            engine,
            apply,
            logger,
        }
    }

    pub fn apply(&self) -> bool {
        self.apply
    }

    pub async fn list(&self, name: Option<&str>) -> Result<Vec<Image>> {
        let images = self.engine.list_images(name).await?;
        images.iter().map(Image::from_engine).collect()
    }

    pub async fn pull_all(&self, repository: &str) -> Result<Vec<Image>> {
        self.logger.step(&format!("Pulling images for repository {}", repository));
        let images = self.engine.pull_all_tags(repository).await?;
        self.logger.detail(&format!("{} image(s) pulled", images.len()));
        images.iter().map(Image::from_engine).collect()
    }

    /// Adds a `new_repository` tag for every tag of `image` under
    /// `src_repository`, keeping the tag suffix.
    ///
    /// The returned image lists the original tags followed by the new ones.
    /// Nothing is de-duplicated, so migrating the same image twice yields the
    /// derived tags twice.
    pub async fn migrate_tags(
        &self,
        image: &Image,
        src_repository: &str,
        new_repository: &str,
    ) -> Result<Image> {
        let mut new_tags = Vec::new();
        for prev_tag in &image.tags {
            if !prev_tag.repository.starts_with(src_repository) {
                continue;
            }
            let new_tag = ImageTag::new(new_repository, prev_tag.tag.clone());
            self.logger.info(&format!("Tagging {} -> {}", prev_tag.uri(), new_tag.uri()));
            if self.apply {
                self.engine
                    .tag_image(&image.handle, &new_tag.repository, &new_tag.tag)
                    .await?;
            }
            new_tags.push(new_tag);
        }

        let mut tags = image.tags.clone();
        tags.extend(new_tags);
        Ok(Image {
            id: image.id.clone(),
            tags,
            handle: image.handle.clone(),
        })
    }

    pub async fn push_all(&self, repository: &str) -> Result<()> {
        self.logger.step(&format!("Pushing all images to repository {}", repository));
        if !self.apply {
            self.logger.detail("Dry run - skipping push");
            return Ok(());
        }
        let logs = self.engine.push_repository(repository).await?;
        process_push_logs(&logs)
    }
}
