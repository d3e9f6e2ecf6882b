//! Bundle reference matching and digest substitution
//!
//! Both the extractor and the rewriter run the same compiled pattern over the
//! pipeline text:
//!
//! ```text
//! value: <prefix>/<task_name>:<tag>@sha256:<hex>
//! ```
//!
//! The task name ends at the first `:` and the tag at the first following
//! `@sha256:`. Neither crosses a line break.

use std::collections::BTreeSet;

use regex::{Captures, Regex};

use super::reference::{BundleReference, Digest, DigestChange, ReferenceKey, ResolutionTable};
use crate::error::RefreshError;

/// Compiled matcher for task bundle references under one registry prefix
#[derive(Debug, Clone)]
pub struct BundlePattern {
    regex: Regex,
}

impl BundlePattern {
    /// Build the matcher for references under `prefix`
    ///
    /// Example prefix: "quay.io/konflux-ci/tekton-catalog"
    pub fn new(prefix: &str) -> Result<Self, RefreshError> {
        let pattern = format!(
            r"(?P<head>value: {}/(?P<task>.*?):(?P<tag>.*?))@sha256:(?P<digest>[a-f0-9]+)",
            regex::escape(prefix)
        );
        let regex = Regex::new(&pattern).map_err(|source| RefreshError::Pattern {
            prefix: prefix.to_string(),
            source,
        })?;
        Ok(Self { regex })
    }

    /// Distinct `(task_name, tag)` pairs referenced in `content`
    pub fn extract(&self, content: &str) -> BTreeSet<ReferenceKey> {
        self.regex.captures_iter(content).map(|c| key_of(&c)).collect()
    }

    /// Every reference occurrence in `content`, in text order
    pub fn references(&self, content: &str) -> Vec<BundleReference> {
        self.regex
            .captures_iter(content)
            .map(|c| BundleReference {
                key: key_of(&c),
                digest: Digest::from_matched_hex(&c["digest"]),
            })
            .collect()
    }

    /// Occurrences in `content` whose digest `rewrite` would change
    pub fn changes(&self, content: &str, resolved: &ResolutionTable) -> Vec<DigestChange> {
        self.references(content)
            .into_iter()
            .filter_map(|reference| {
                let new = resolved.get(&reference.key)?;
                (*new != reference.digest).then(|| DigestChange {
                    key: reference.key,
                    old: reference.digest,
                    new: new.clone(),
                })
            })
            .collect()
    }

    /// Replace the digest of every resolved reference in `content`
    ///
    /// Only the `@sha256:<hex>` suffix of a match is rewritten. Unresolved
    /// references and all text outside matches are left byte-identical.
    pub fn rewrite(&self, content: &str, resolved: &ResolutionTable) -> String {
        self.regex
            .replace_all(content, |caps: &Captures| match resolved.get(&key_of(caps)) {
                Some(digest) => format!("{}@{}", &caps["head"], digest),
                None => caps[0].to_string(),
            })
            .into_owned()
    }
}

fn key_of(caps: &Captures) -> ReferenceKey {
    ReferenceKey::new(&caps["task"], &caps["tag"])
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "quay.io/konflux-ci/tekton-catalog";

    fn hex(c: char) -> String {
        std::iter::repeat(c).take(64).collect()
    }

    fn bundle_line(task: &str, tag: &str, digest: char) -> String {
        format!("        value: {}/{}:{}@sha256:{}", PREFIX, task, tag, hex(digest))
    }

    fn pattern() -> BundlePattern {
        BundlePattern::new(PREFIX).unwrap()
    }

    fn table(entries: &[(&str, &str, char)]) -> ResolutionTable {
        entries
            .iter()
            .map(|(task, tag, c)| (ReferenceKey::new(*task, *tag), Digest::parse(&hex(*c)).unwrap()))
            .collect()
    }

    fn pipeline() -> String {
        [
            "spec:".to_string(),
            "  tasks:".to_string(),
            "    - name: build-container".to_string(),
            "      taskRef:".to_string(),
            "        params:".to_string(),
            "        - name: bundle".to_string(),
            bundle_line("buildah", "0.1", 'a'),
            "        - name: bundle".to_string(),
            bundle_line("git-clone", "0.1", 'c'),
            "        - name: bundle".to_string(),
            bundle_line("buildah", "0.1", 'a'),
            "        - name: bundle".to_string(),
            bundle_line("buildah", "0.2", 'd'),
            String::new(),
        ]
        .join("\n")
    }

    #[test]
    fn test_extract_distinct_pairs() {
        let keys = pattern().extract(&pipeline());
        let expected: BTreeSet<_> = [
            ReferenceKey::new("buildah", "0.1"),
            ReferenceKey::new("buildah", "0.2"),
            ReferenceKey::new("git-clone", "0.1"),
        ]
        .into_iter()
        .collect();
        assert_eq!(keys, expected);
    }

    #[test]
    fn test_extract_ignores_other_registries() {
        let content = format!(
            "value: quay.io/other/buildah:0.1@sha256:{}\nimage: {}/buildah:0.1@sha256:{}\n",
            hex('a'),
            PREFIX,
            hex('a')
        );
        assert!(pattern().extract(&content).is_empty());
    }

    #[test]
    fn test_task_name_ends_at_first_colon() {
        let content = format!("value: {}/task:with:colons@sha256:{}", PREFIX, hex('a'));
        let keys: Vec<_> = pattern().extract(&content).into_iter().collect();
        assert_eq!(keys, vec![ReferenceKey::new("task", "with:colons")]);
    }

    #[test]
    fn test_rewrite_without_references_is_identity() {
        let content = "apiVersion: tekton.dev/v1\nkind: Pipeline\n# value: nothing here\n";
        let resolved = table(&[("buildah", "0.1", 'b')]);
        assert_eq!(pattern().rewrite(content, &resolved), content);
    }

    #[test]
    fn test_rewrite_single_reference() {
        let content = format!("value: {}/buildah:0.1@sha256:{}", PREFIX, hex('a'));
        let resolved = table(&[("buildah", "0.1", 'b')]);
        assert_eq!(
            pattern().rewrite(&content, &resolved),
            format!("value: {}/buildah:0.1@sha256:{}", PREFIX, hex('b'))
        );
    }

    #[test]
    fn test_rewrite_leaves_unresolved_untouched() {
        let content = pipeline();
        let resolved = table(&[("git-clone", "0.1", 'e')]);
        let updated = pattern().rewrite(&content, &resolved);

        for (before, after) in content.lines().zip(updated.lines()) {
            if before.contains("git-clone") {
                assert_eq!(after, bundle_line("git-clone", "0.1", 'e'));
            } else {
                assert_eq!(before, after);
            }
        }
        assert!(updated.ends_with('\n'));
    }

    #[test]
    fn test_rewrite_duplicates_consistently() {
        let resolved = table(&[("buildah", "0.1", 'b')]);
        let updated = pattern().rewrite(&pipeline(), &resolved);

        assert_eq!(updated.matches(&bundle_line("buildah", "0.1", 'b')).count(), 2);
        assert!(!updated.contains(&bundle_line("buildah", "0.1", 'a')));
        assert!(updated.contains(&bundle_line("buildah", "0.2", 'd')));
    }

    #[test]
    fn test_rewrite_is_idempotent() {
        let resolved = table(&[("buildah", "0.1", 'b'), ("buildah", "0.2", 'f')]);
        let once = pattern().rewrite(&pipeline(), &resolved);
        let twice = pattern().rewrite(&once, &resolved);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_rewrite_preserves_line_tail() {
        let content = format!(
            "value: {}/buildah:0.1@sha256:{}  # pinned\n",
            PREFIX,
            hex('a')
        );
        let resolved = table(&[("buildah", "0.1", 'b')]);
        assert_eq!(
            pattern().rewrite(&content, &resolved),
            format!("value: {}/buildah:0.1@sha256:{}  # pinned\n", PREFIX, hex('b'))
        );
    }

    #[test]
    fn test_changes_skip_already_current() {
        let resolved = table(&[("buildah", "0.1", 'a'), ("git-clone", "0.1", 'e')]);
        let changes = pattern().changes(&pipeline(), &resolved);

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].key, ReferenceKey::new("git-clone", "0.1"));
        assert_eq!(changes[0].old.hex(), hex('c'));
        assert_eq!(changes[0].new.hex(), hex('e'));
    }

    #[test]
    fn test_references_in_text_order() {
        let refs = pattern().references(&pipeline());
        let tasks: Vec<_> = refs.iter().map(|r| r.key.to_string()).collect();
        assert_eq!(tasks, vec!["buildah:0.1", "git-clone:0.1", "buildah:0.1", "buildah:0.2"]);
    }
}
