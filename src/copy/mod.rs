//! Repository copy workflow
//!
//! Pull every tag of the source repository, tag each image under the
//! destination repository, push the destination, then let [`ImageContext`]
//! restore the local image store.

pub mod context;
pub mod proxy;
pub mod push_logs;

pub use context::ImageContext;
pub use proxy::ImageProxy;
pub use push_logs::process_push_logs;

use crate::engine::ImageEngine;
use crate::error::Result;
use crate::logging::Logger;
use serde::Serialize;
use std::future::Future;

/// What a copy run did (or would do, without `apply`)
#[derive(Debug, Clone, Default, Serialize)]
pub struct CopyReport {
    pub src_repository: String,
    pub dst_repository: String,
    pub apply: bool,
    pub pulled_images: Vec<String>,
    /// `(source uri, destination uri)` pairs
    pub migrated_tags: Vec<(String, String)>,
    pub pushed: bool,
    pub removed_tags: Vec<String>,
}

pub async fn copy_repository(
    proxy: &ImageProxy<'_>,
    src_repository: &str,
    dst_repository: &str,
) -> Result<CopyReport> {
    let mut report = CopyReport {
        src_repository: src_repository.to_string(),
        dst_repository: dst_repository.to_string(),
        apply: proxy.apply(),
        ..Default::default()
    };

    let pulled_images = proxy.pull_all(src_repository).await?;

    for image in &pulled_images {
        let migrated = proxy
            .migrate_tags(image, src_repository, dst_repository)
            .await?;
        let sources = image
            .tags
            .iter()
            .filter(|t| t.repository.starts_with(src_repository));
        let targets = migrated.tags[image.tags.len()..].iter();
        report
            .migrated_tags
            .extend(sources.zip(targets).map(|(from, to)| (from.uri(), to.uri())));
        report.pulled_images.push(image.id.clone());
    }

    proxy.push_all(dst_repository).await?;
    report.pushed = proxy.apply();

    Ok(report)
}

/// Runs [`copy_repository`] inside an [`ImageContext`], so local tags created
/// by the run are removed whatever the outcome, Ctrl-C included.
pub async fn run_copy(
    engine: &dyn ImageEngine,
    src_repository: &str,
    dst_repository: &str,
    apply: bool,
    logger: &Logger,
) -> Result<CopyReport> {
    run_copy_until(engine, src_repository, dst_repository, apply, logger, ctrl_c()).await
}

/// Like [`run_copy`], but stops the workflow when `interrupt` resolves.
pub async fn run_copy_until<I>(
    engine: &dyn ImageEngine,
    src_repository: &str,
    dst_repository: &str,
    apply: bool,
    logger: &Logger,
    interrupt: I,
) -> Result<CopyReport>
where
    I: Future<Output = ()>,
{
    let (mut report, removed) =
        ImageContext::scope(engine, apply, logger.clone(), interrupt, |proxy| async move {
            copy_repository(&proxy, src_repository, dst_repository).await
        })
        .await?;
    report.removed_tags = removed;
    Ok(report)
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
pub async fn ctrl_c() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
