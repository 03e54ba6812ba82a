//! Docker Repository Copy Library
//!
//! Pulls every tagged image of a source repository, re-tags it under a
//! destination repository, pushes the result and leaves the local image store
//! as it was before the run.

pub mod cli;
pub mod copy;
pub mod engine;
pub mod error;
pub mod image;
pub mod logging;

pub use copy::{CopyReport, ImageContext, ImageProxy, copy_repository, run_copy, run_copy_until};
pub use engine::{EngineImage, ImageEngine};
pub use error::{CopyError, Result};
pub use image::{Image, ImageHandle, ImageTag};
pub use logging::Logger;
