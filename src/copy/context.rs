//! Local-state cleanup guard
//!
//! [`ImageContext::enter`] records every local tag, hands out an
//! [`ImageProxy`] and [`ImageContext::exit`] removes whatever tags appeared in
//! between. `exit` consumes the guard and takes the workflow outcome, so the
//! cleanup runs on the error path as well as on success.
//!
//! [`ImageContext::scope`] wraps both calls around a closure and also stops the
//! closure when an interrupt fires, so cleanup is never skipped.

use super::proxy::ImageProxy;
use crate::engine::ImageEngine;
use crate::error::{CopyError, Result};
use crate::logging::Logger;
use std::collections::HashSet;
use std::future::Future;

pub struct ImageContext<'a> {
    engine: &'a dyn ImageEngine,
    initial_tags: HashSet<String>,
    proxy: ImageProxy<'a>,
    logger: Logger,
}

impl<'a> ImageContext<'a> {
    pub async fn enter(engine: &'a dyn ImageEngine, apply: bool, logger: Logger) -> Result<Self> {
        let initial_tags = local_tags(engine).await?;
        logger.detail(&format!(
            "{} local tag(s) present before the run",
            initial_tags.len()
        ));

        Ok(Self {
            engine,
            initial_tags,
            proxy: ImageProxy::new(engine, apply, logger.clone()),
            logger,
        })
    }

    /// Runs `body` between [`enter`](Self::enter) and [`exit`](Self::exit).
    ///
    /// If `interrupt` resolves first, `body` is dropped and the outcome becomes
    /// [`CopyError::Interrupted`]; the cleanup still runs.
    pub async fn scope<T, F, Fut, I>(
        engine: &'a dyn ImageEngine,
        apply: bool,
        logger: Logger,
        interrupt: I,
        body: F,
    ) -> Result<(T, Vec<String>)>
    where
        F: FnOnce(ImageProxy<'a>) -> Fut,
        Fut: Future<Output = Result<T>>,
        I: Future<Output = ()>,
    {
        let context = Self::enter(engine, apply, logger).await?;

        let outcome = tokio::select! {
            outcome = body(context.proxy.clone()) => outcome,
            () = interrupt => {
                context.logger.warning("Interrupted, restoring local images");
                Err(CopyError::Interrupted)
            }
        };

        context.logger.subsection("Cleaning up local images");
        context.exit(outcome).await
    }

    pub fn proxy(&self) -> &ImageProxy<'a> {
        &self.proxy
    }

    pub fn initial_tags(&self) -> &HashSet<String> {
        &self.initial_tags
    }

    /// Removes the tags created since [`enter`](Self::enter) and passes the
    /// workflow outcome through together with the removed tags.
    ///
    /// Every removal is attempted even if some fail. A failed removal turns a
    /// successful outcome into [`CopyError::Cleanup`]; a failed outcome keeps
    /// its own error.
    pub async fn exit<T>(self, outcome: Result<T>) -> Result<(T, Vec<String>)> {
        let cleanup = self.cleanup().await;

        match (outcome, cleanup) {
            (Ok(value), Ok(removed)) => Ok((value, removed)),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), Ok(_)) => Err(e),
            (Err(e), Err(cleanup_err)) => {
                self.logger.warning(&cleanup_err.to_string());
                Err(e)
            }
        }
    }

    async fn cleanup(&self) -> Result<Vec<String>> {
        let mut removed = Vec::new();
        let mut failed = Vec::new();
        let mut first_error = None;

        for image in self.engine.list_images(None).await? {
            for tag in image.tags {
                if self.initial_tags.contains(&tag) {
                    continue;
                }
                self.logger.info(&format!("Deleting image with tag: {}", tag));
                match self.engine.remove_image(&tag).await {
                    Ok(()) => removed.push(tag),
                    Err(e) => {
                        self.logger.warning(&format!("Could not remove {}: {}", tag, e));
                        first_error.get_or_insert_with(|| e.to_string());
                        failed.push(tag);
                    }
                }
            }
        }

        match first_error {
            Some(first_error) => Err(CopyError::Cleanup {
                tags: failed,
                first_error,
            }),
            None => Ok(removed),
        }
    }
}

async fn local_tags(engine: &dyn ImageEngine) -> Result<HashSet<String>> {
    Ok(engine
        .list_images(None)
        .await?
        .into_iter()
        .flat_map(|image| image.tags)
        .collect())
}
