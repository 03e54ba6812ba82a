use super::reference::ImageTag;
use crate::engine::EngineImage;
use crate::error::Result;

/// Engine-side identity of an image, passed back to the engine for tag calls.
/// The engine owns the image; this is only a key into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHandle(String);

impl ImageHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Snapshot of a local image. Stale as soon as any tag/push/remove call runs.
#[derive(Debug, Clone)]
pub struct Image {
    pub id: String,
    pub tags: Vec<ImageTag>,
    pub handle: ImageHandle,
}

impl Image {
    pub fn from_engine(image: &EngineImage) -> Result<Self> {
        let tags = image
            .tags
            .iter()
            .map(|t| ImageTag::parse(t))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            id: image.id.clone(),
            tags,
            handle: ImageHandle::new(image.id.clone()),
        })
    }
}
