//! wta-store - serve and browse WTA application packages
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
//!
//! A small HTTP service over two directories:
//!
//! ```text
//! public/       # Static site, served at /
//! wta-files/    # Package archives (*.wta)
//! ```
//!
//! Packages are listed at `/wta-store/list`, downloaded from
//! `/wta-store/files/<name>`, and their icons are extracted on demand at
//! `/wta-store/icon/<name>`.

pub mod cmd;
pub mod server;

pub use server::{ServerConfig, build_router, run_server};

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Default listen address.
pub const DEFAULT_BIND: &str = "0.0.0.0:5004";
/// Default static asset directory.
pub const DEFAULT_PUBLIC_DIR: &str = "public";
/// Default package archive directory.
pub const DEFAULT_PACKAGES_DIR: &str = "wta-files";

#[derive(Debug, Parser)]
#[command(name = "wta-store")]
#[command(author, version = env!("WTA_STORE_VERSION"), about = "Serve and browse WTA application packages")]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Options for the default `serve` command
    #[command(flatten)]
    pub serve: ServeArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve the store over HTTP (default)
    Serve(ServeArgs),
    /// Print the package listing as JSON
    List {
        /// Directory holding the package archives
        #[arg(long, env = "WTA_STORE_PACKAGES_DIR", default_value = DEFAULT_PACKAGES_DIR)]
        packages_dir: PathBuf,
    },
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Address to listen on (host:port)
    #[arg(long, env = "WTA_STORE_BIND", default_value = DEFAULT_BIND)]
    pub bind: String,

    /// Directory of static files served at the site root
    #[arg(long, env = "WTA_STORE_PUBLIC_DIR", default_value = DEFAULT_PUBLIC_DIR)]
    pub public_dir: PathBuf,

    /// Directory holding the package archives
    #[arg(long, env = "WTA_STORE_PACKAGES_DIR", default_value = DEFAULT_PACKAGES_DIR)]
    pub packages_dir: PathBuf,
}

impl From<ServeArgs> for ServerConfig {
    fn from(args: ServeArgs) -> Self {
        Self {
            bind: args.bind,
            public_dir: args.public_dir,
            packages_dir: args.packages_dir,
        }
    }
}
