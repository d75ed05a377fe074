//! Shared types passed between the page modules.
//!
//! These are plain values: pages build them fresh on every render and hand
//! them to the behavior modules, which only read them.

use serde::{Deserialize, Serialize};

/// Descriptive fields a page supplies for its document head.
///
/// Compared by value: two renders that build equal `PageMetadata` are the
/// same input as far as [`crate::metadata::MetadataEffect`] is concerned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageMetadata {
    /// Short page title, suffixed with the site owner's name in the document title.
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Comma-separated keywords.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    /// Title for link previews; falls back to the document title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_title: Option<String>,
    /// Description for link previews; falls back to `description`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_description: Option<String>,
}

impl PageMetadata {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(keywords.into());
        self
    }

    pub fn social_title(mut self, title: impl Into<String>) -> Self {
        self.social_title = Some(title.into());
        self
    }

    pub fn social_description(mut self, description: impl Into<String>) -> Self {
        self.social_description = Some(description.into());
        self
    }
}

/// Opaque handle naming one observable visual region.
///
/// The host hands these out when it mounts an element; the reveal detector
/// only passes them back to the observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RegionId(pub u64);

impl std::fmt::Display for RegionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "region#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_optional_fields() {
        let meta = PageMetadata::new("About")
            .description("Bio")
            .keywords("a, b")
            .social_title("About me")
            .social_description("Short bio");
        assert_eq!(meta.title, "About");
        assert_eq!(meta.description.as_deref(), Some("Bio"));
        assert_eq!(meta.keywords.as_deref(), Some("a, b"));
        assert_eq!(meta.social_title.as_deref(), Some("About me"));
        assert_eq!(meta.social_description.as_deref(), Some("Short bio"));
    }

    #[test]
    fn equality_is_by_value() {
        let a = PageMetadata::new("Home").description("D");
        let b = PageMetadata::new("Home").description("D");
        assert_eq!(a, b);
        assert_ne!(a, b.clone().keywords("k"));
    }

    #[test]
    fn parses_from_toml_with_only_title() {
        let meta: PageMetadata = toml::from_str(r#"title = "Resume""#).unwrap();
        assert_eq!(meta, PageMetadata::new("Resume"));
    }

    #[test]
    fn rejects_unknown_keys() {
        let result: Result<PageMetadata, _> = toml::from_str(
            r#"
title = "Resume"
og_title = "typo"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn region_display() {
        assert_eq!(RegionId(7).to_string(), "region#7");
    }
}
