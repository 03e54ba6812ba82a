//! Command-line argument parsing

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "docker-repo-cp")]
#[command(about = "CLI to copy docker images between repositories")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Verbose output
    #[arg(long = "verbose", short = 'v', global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Only report errors
    #[arg(
        long = "quiet",
        short = 'q',
        global = true,
        conflicts_with = "verbose",
        help = "Suppress everything but errors"
    )]
    pub quiet: bool,

    /// Output format for the final report
    #[arg(
        long = "output",
        short = 'o',
        global = true,
        value_enum,
        default_value_t = OutputFormat::Text,
        help = "Output format for the report: text, json"
    )]
    pub output: OutputFormat,

    /// Registry username
    #[arg(
        long = "username",
        short = 'u',
        global = true,
        help = "Username for registry authentication"
    )]
    pub username: Option<String>,

    /// Registry password
    #[arg(
        long = "password",
        short = 'p',
        global = true,
        help = "Password for registry authentication"
    )]
    pub password: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Copy every tagged image of a repository into another repository
    Copy {
        /// The repository to pull the source images
        src_repository: String,

        /// The repository to push the renamed images
        dst_repository: String,

        /// Performs the copy of images
        #[arg(long = "apply", default_value_t = false)]
        apply: bool,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Args {
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// Fill unset options from environment variables
    pub fn from_env(mut self) -> Self {
        if self.username.is_none() {
            self.username = std::env::var("DOCKER_REPO_CP_USERNAME").ok();
        }

        if self.password.is_none() {
            self.password = std::env::var("DOCKER_REPO_CP_PASSWORD").ok();
        }

        if !self.quiet && std::env::var("DOCKER_REPO_CP_VERBOSE").is_ok() {
            self.verbose = true;
        }

        self
    }
}
