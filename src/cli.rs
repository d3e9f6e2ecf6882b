//! CLI definitions for bundle-refresh
//!
//! This module contains all CLI argument parsing structures using clap.
//! Every argument has a default, so a bare invocation refreshes the
//! standard Konflux build pipeline.

use clap::Parser;
use std::path::PathBuf;

use crate::config::registry::{DEFAULT_API_URL, DEFAULT_NAMESPACE, DEFAULT_REGISTRY_HOST};
use crate::config::{RefreshConfig, RegistryConfig, DEFAULT_PIPELINE_FILE};

#[derive(Parser, Debug)]
#[command(
    name = "bundle-refresh",
    version,
    about = "Refresh pinned Tekton task bundle digests in a pipeline definition",
    long_about = "Finds every task bundle reference (value: <registry>/<task>:<tag>@sha256:<digest>)\nin a pipeline file, looks up the live digest for each tag, and rewrites the file in place."
)]
pub struct Cli {
    /// Pipeline definition to update in place
    #[arg(long, env = "BUNDLE_REFRESH_FILE", default_value = DEFAULT_PIPELINE_FILE)]
    pub file: PathBuf,

    /// Base URL of the registry repository API
    #[arg(long, env = "BUNDLE_REFRESH_REGISTRY_API", default_value = DEFAULT_API_URL)]
    pub registry_api_url: String,

    /// Repository namespace holding the task bundles
    #[arg(long, env = "BUNDLE_REFRESH_NAMESPACE", default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,

    /// Registry host as written in bundle references
    #[arg(long, env = "BUNDLE_REFRESH_REGISTRY_HOST", default_value = DEFAULT_REGISTRY_HOST)]
    pub registry_host: String,

    /// Show what would change without writing the file
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn into_config(self) -> RefreshConfig {
        RefreshConfig {
            file: self.file,
            registry: RegistryConfig {
                host: self.registry_host,
                namespace: self.namespace,
                api_url: self.registry_api_url,
            },
            dry_run: self.dry_run,
        }
    }
}
