//! Runner wiring the parsed arguments to the copy workflow

use crate::cli::args::{Args, Command, OutputFormat};
use crate::cli::config::{AuthConfig, CopyConfig};
use crate::copy::{CopyReport, run_copy};
use crate::engine::DockerEngine;
use crate::error::{CopyError, Result};
use crate::logging::Logger;

pub struct Runner {
    args: Args,
    logger: Logger,
}

impl Runner {
    pub fn new(args: Args) -> Self {
        let logger = if args.quiet {
            Logger::new_quiet()
        } else {
            Logger::new(args.verbose)
        };

        Self { args, logger }
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub async fn run(&self) -> Result<()> {
        match &self.args.command {
            Command::Copy {
                src_repository,
                dst_repository,
                apply,
            } => {
                let config =
                    CopyConfig::new(src_repository.clone(), dst_repository.clone(), *apply);
                self.copy(config).await
            }
        }
    }

    async fn copy(&self, config: CopyConfig) -> Result<()> {
        self.logger.section("Docker Repository Copy");
        config.validate()?;
        let auth = AuthConfig::from_parts(self.args.username.clone(), self.args.password.clone())?;

        self.logger.info(&format!("Source: {}", config.src_repository));
        self.logger.info(&format!("Destination: {}", config.dst_repository));
        if !config.apply {
            self.logger.warning(
                "Dry run - images are still pulled (and removed again afterwards), \
                 but nothing is tagged or pushed (use --apply)",
            );
        }

        let mut engine = DockerEngine::connect()?;
        if let Some(auth) = auth {
            self.logger.detail("Using provided registry credentials");
            engine = engine.with_credentials(auth.username, auth.password);
        }

        let report = run_copy(
            &engine,
            &config.src_repository,
            &config.dst_repository,
            config.apply,
            &self.logger,
        )
        .await?;

        self.print_report(&report)?;
        self.logger.success(&format!("Completed in {}", self.logger.elapsed()));
        Ok(())
    }

    fn print_report(&self, report: &CopyReport) -> Result<()> {
        match self.args.output {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(report)
                    .map_err(|e| CopyError::Config(format!("Cannot render report: {}", e)))?;
                println!("{}", json);
            }
            OutputFormat::Text => {
                self.logger.summary_kv(
                    "Summary",
                    &[
                        ("Source", report.src_repository.clone()),
                        ("Destination", report.dst_repository.clone()),
                        ("Applied", report.apply.to_string()),
                        ("Images pulled", report.pulled_images.len().to_string()),
                        ("Tags migrated", report.migrated_tags.len().to_string()),
                        ("Pushed", report.pushed.to_string()),
                        ("Local tags removed", report.removed_tags.len().to_string()),
                    ],
                );
            }
        }
        Ok(())
    }
}
