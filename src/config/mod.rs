//! Configuration for a refresh run
//!
//! Defaults reproduce the canonical Konflux setup: the build pipeline at
//! `pipelines/pipeline-build.yaml` and task bundles under
//! `quay.io/konflux-ci/tekton-catalog`. The CLI layer overrides individual
//! fields from flags or environment variables.

pub mod registry;

use std::path::PathBuf;

pub use registry::RegistryConfig;

pub const DEFAULT_PIPELINE_FILE: &str = "pipelines/pipeline-build.yaml";

/// Everything a refresh run needs
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Pipeline definition to rewrite in place
    pub file: PathBuf,

    pub registry: RegistryConfig,

    /// Report changes without writing the file
    pub dry_run: bool,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_PIPELINE_FILE),
            registry: RegistryConfig::default(),
            dry_run: false,
        }
    }
}
