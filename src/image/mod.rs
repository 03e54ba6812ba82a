//! Image references and the local image aggregate

pub mod model;
pub mod reference;

pub use model::{Image, ImageHandle};
pub use reference::ImageTag;
