//! Registry configuration for task bundle references and the tag API.

/// Registry configuration for task bundle lookups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Registry host as it appears in bundle references (e.g., "quay.io")
    pub host: String,

    /// Repository namespace holding the task bundles (e.g., "konflux-ci/tekton-catalog")
    pub namespace: String,

    /// Base URL of the repository API (e.g., "https://quay.io/api/v1/repository")
    pub api_url: String,
}

pub const DEFAULT_REGISTRY_HOST: &str = "quay.io";
pub const DEFAULT_NAMESPACE: &str = "konflux-ci/tekton-catalog";
pub const DEFAULT_API_URL: &str = "https://quay.io/api/v1/repository";

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_REGISTRY_HOST.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl RegistryConfig {
    /// Prefix that precedes `<task>:<tag>` in a bundle reference
    ///
    /// Example: "quay.io/konflux-ci/tekton-catalog"
    pub fn reference_prefix(&self) -> String {
        format!(
            "{}/{}",
            self.host.trim_end_matches('/'),
            self.namespace.trim_matches('/')
        )
    }

    /// Tag listing endpoint for a single task bundle, filtered to one tag
    pub fn tag_url(&self, task_name: &str, tag: &str) -> String {
        format!(
            "{}/{}/{}/tag/?specificTag={}",
            self.api_url.trim_end_matches('/'),
            self.namespace.trim_matches('/'),
            task_name,
            urlencoding::encode(tag)
        )
    }
}
