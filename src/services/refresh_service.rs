//! Refresh service - orchestrates a digest refresh over pipeline text
//!
//! extract references → resolve each (one lookup, sequentially) → rewrite.
//! A failed lookup is logged and skipped; it never aborts the refresh.

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use crate::domain::{BundlePattern, DigestChange, ReferenceKey, ResolutionTable};
use crate::infrastructure::DigestResolver;

/// What a refresh did
#[derive(Debug, Default)]
pub struct RefreshReport {
    /// Keys the registry resolved, in key order
    pub resolved: Vec<ReferenceKey>,
    /// Keys left untouched because their lookup failed, in key order
    pub unresolved: Vec<ReferenceKey>,
    /// Occurrences whose digest changed, in text order
    pub changes: Vec<DigestChange>,
}

impl RefreshReport {
    pub fn total(&self) -> usize {
        self.resolved.len() + self.unresolved.len()
    }
}

/// Rewritten text plus its report
#[derive(Debug)]
pub struct RefreshOutcome {
    pub content: String,
    pub report: RefreshReport,
}

impl RefreshOutcome {
    pub fn is_changed(&self) -> bool {
        !self.report.changes.is_empty()
    }
}

/// Service for refreshing bundle digests
pub struct RefreshService<R> {
    pattern: BundlePattern,
    resolver: R,
}

impl<R: DigestResolver> RefreshService<R> {
    /// Create a new refresh service
    pub fn new(pattern: BundlePattern, resolver: R) -> Self {
        Self { pattern, resolver }
    }

    /// Refresh every bundle reference in `content`
    pub async fn refresh(&self, content: &str) -> RefreshOutcome {
        let keys = self.pattern.extract(content);
        info!("🔍 Found {} distinct task bundle reference(s)", keys.len());

        let (table, mut report) = self.resolve_all(keys).await;

        report.changes = self.pattern.changes(content, &table);
        let content = self.pattern.rewrite(content, &table);

        RefreshOutcome { content, report }
    }

    /// Look up every key, one request at a time
    async fn resolve_all(&self, keys: BTreeSet<ReferenceKey>) -> (ResolutionTable, RefreshReport) {
        let mut table = ResolutionTable::new();
        let mut report = RefreshReport::default();

        for key in keys {
            match self.resolver.resolve(&key).await {
                Ok(digest) => {
                    debug!("   {} → {}", key, digest);
                    report.resolved.push(key.clone());
                    table.insert(key, digest);
                }
                Err(e) => {
                    warn!("Could not fetch SHA for {}: {}", key, e);
                    report.unresolved.push(key);
                }
            }
        }

        (table, report)
    }
}
