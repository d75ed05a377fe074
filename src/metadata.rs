//! Document metadata synchronization.
//!
//! Every page hands its [`PageMetadata`] to [`synchronize`], which writes the
//! document title and the discoverability tags through a [`MetadataSink`].
//! The sink is the only thing that touches the document, so the logic here
//! runs the same against a real `<head>` ([`crate::head::HeadDocument`]) or
//! the mapping-based [`MapSink`].
//!
//! ## Resolution priority
//!
//! Each target is resolved independently. The first non-empty value wins;
//! when nothing resolves the target keeps whatever content it already had.
//!
//! - **Title**: `"{title} | {owner}"`, always written
//! - **Description / keywords**: the page field → untouched
//! - **Social title** (both platforms): `social_title` → document title
//! - **Social description** (both platforms): `social_description` → `description` → untouched
//!
//! Pages never downgrade a tag to empty. A page without a description leaves
//! the previous page's (or the static default's) description in place.
//!
//! ## Missing tags
//!
//! A sink reports whether the tag it was asked to write exists. Missing tags
//! are skipped and logged at `debug`; the remaining writes still happen.

use crate::types::PageMetadata;
use std::collections::BTreeMap;
use tracing::debug;

/// The named meta elements the synchronizer writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetaTag {
    Description,
    Keywords,
    SocialTitle,
    TwitterTitle,
    SocialDescription,
    TwitterDescription,
}

impl MetaTag {
    pub const ALL: [MetaTag; 6] = [
        MetaTag::Description,
        MetaTag::Keywords,
        MetaTag::SocialTitle,
        MetaTag::TwitterTitle,
        MetaTag::SocialDescription,
        MetaTag::TwitterDescription,
    ];

    /// Attribute that identifies the element (`name` or `property`).
    pub fn key_attr(self) -> &'static str {
        match self {
            MetaTag::SocialTitle | MetaTag::SocialDescription => "property",
            _ => "name",
        }
    }

    /// Value of [`Self::key_attr`] on the element.
    pub fn key(self) -> &'static str {
        match self {
            MetaTag::Description => "description",
            MetaTag::Keywords => "keywords",
            MetaTag::SocialTitle => "og:title",
            MetaTag::TwitterTitle => "twitter:title",
            MetaTag::SocialDescription => "og:description",
            MetaTag::TwitterDescription => "twitter:description",
        }
    }

    /// Look a tag up by its key (`"og:title"`, `"keywords"`, ...).
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.key() == key)
    }
}

impl std::fmt::Display for MetaTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Write surface for the document title and meta tags.
pub trait MetadataSink {
    fn set_title(&mut self, title: &str);

    /// Set a tag's content. Returns `false` when the document has no such
    /// tag, in which case nothing is written.
    fn set_tag(&mut self, tag: MetaTag, content: &str) -> bool;
}

/// Resolve a metadata field from multiple sources.
///
/// Takes a list of optional values in priority order and returns the first
/// non-None, non-blank value.
///
/// ```text
/// social title:       resolve(&[social_title, Some(document_title)])
/// social description: resolve(&[social_description, description])
/// ```
pub fn resolve<'a>(sources: &[Option<&'a str>]) -> Option<&'a str> {
    sources
        .iter()
        .filter_map(|opt| opt.filter(|s| !s.trim().is_empty()))
        .next()
}

/// Format the document title: `"{title} | {owner}"`.
pub fn document_title(title: &str, owner: &str) -> String {
    format!("{title} | {owner}")
}

/// Write a page's metadata into the sink.
///
/// Stateless and idempotent: calling it twice with the same input leaves the
/// sink exactly as calling it once.
pub fn synchronize<S: MetadataSink + ?Sized>(sink: &mut S, owner: &str, metadata: &PageMetadata) {
    let title = document_title(&metadata.title, owner);
    sink.set_title(&title);

    let description = metadata.description.as_deref();
    let social_title = resolve(&[metadata.social_title.as_deref(), Some(title.as_str())]);
    let social_description = resolve(&[metadata.social_description.as_deref(), description]);

    let writes = [
        (MetaTag::Description, resolve(&[description])),
        (MetaTag::Keywords, resolve(&[metadata.keywords.as_deref()])),
        (MetaTag::SocialTitle, social_title),
        (MetaTag::TwitterTitle, social_title),
        (MetaTag::SocialDescription, social_description),
        (MetaTag::TwitterDescription, social_description),
    ];
    for (tag, content) in writes {
        let Some(content) = content else { continue };
        if !sink.set_tag(tag, content) {
            debug!(%tag, page = %metadata.title, "meta tag not present, skipping");
        }
    }
}

/// Re-runs [`synchronize`] only when the page's metadata changes by value.
///
/// A page holds one of these for its lifetime and calls [`Self::apply`] on
/// every render.
#[derive(Debug, Clone)]
pub struct MetadataEffect {
    owner: String,
    last: Option<PageMetadata>,
}

impl MetadataEffect {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            last: None,
        }
    }

    /// Synchronize if `metadata` differs from the previously applied value.
    /// Returns whether a write happened.
    pub fn apply<S: MetadataSink + ?Sized>(&mut self, sink: &mut S, metadata: &PageMetadata) -> bool {
        if self.last.as_ref() == Some(metadata) {
            return false;
        }
        synchronize(sink, &self.owner, metadata);
        self.last = Some(metadata.clone());
        true
    }

    pub fn last(&self) -> Option<&PageMetadata> {
        self.last.as_ref()
    }
}

/// Mapping-based sink: the title plus whichever tags were declared present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapSink {
    pub title: String,
    tags: BTreeMap<MetaTag, String>,
}

impl MapSink {
    /// A sink with every tag present and empty.
    pub fn complete() -> Self {
        Self::with_tags(&MetaTag::ALL)
    }

    /// A sink where only `tags` exist.
    pub fn with_tags(tags: &[MetaTag]) -> Self {
        Self {
            title: String::new(),
            tags: tags.iter().map(|t| (*t, String::new())).collect(),
        }
    }

    /// Builder: seed a tag with existing content.
    pub fn seeded(mut self, tag: MetaTag, content: &str) -> Self {
        self.tags.insert(tag, content.to_string());
        self
    }

    /// Content of a tag, `None` when the tag does not exist.
    pub fn get(&self, tag: MetaTag) -> Option<&str> {
        self.tags.get(&tag).map(String::as_str)
    }
}

impl MetadataSink for MapSink {
    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn set_tag(&mut self, tag: MetaTag, content: &str) -> bool {
        match self.tags.get_mut(&tag) {
            Some(slot) => {
                *slot = content.to_string();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::assert_tags;

    const OWNER: &str = "Ada Lovelace";

    fn full_page() -> PageMetadata {
        PageMetadata::new("Projects")
            .description("All projects")
            .keywords("rust, web")
            .social_title("Ada's Projects")
            .social_description("Things Ada built")
    }

    // =========================================================================
    // resolve
    // =========================================================================

    #[test]
    fn resolve_first_non_empty_wins() {
        assert_eq!(resolve(&[None, Some("b")]), Some("b"));
        assert_eq!(resolve(&[Some("a"), Some("b")]), Some("a"));
    }

    #[test]
    fn resolve_skips_blank() {
        assert_eq!(resolve(&[Some("   "), Some("b")]), Some("b"));
        assert_eq!(resolve(&[Some(""), None]), None);
    }

    #[test]
    fn resolve_keeps_padding() {
        assert_eq!(resolve(&[Some("  a  ")]), Some("  a  "));
    }

    #[test]
    fn padded_description_written_as_given() {
        let mut sink = MapSink::complete();
        synchronize(&mut sink, OWNER, &PageMetadata::new("T").description("  Padded D  "));
        assert_tags(
            &sink,
            &[
                (MetaTag::Description, "  Padded D  "),
                (MetaTag::SocialDescription, "  Padded D  "),
            ],
        );
    }

    // =========================================================================
    // synchronize
    // =========================================================================

    #[test]
    fn writes_all_targets_from_full_metadata() {
        let mut sink = MapSink::complete();
        synchronize(&mut sink, OWNER, &full_page());

        assert_eq!(sink.title, "Projects | Ada Lovelace");
        assert_tags(
            &sink,
            &[
                (MetaTag::Description, "All projects"),
                (MetaTag::Keywords, "rust, web"),
                (MetaTag::SocialTitle, "Ada's Projects"),
                (MetaTag::TwitterTitle, "Ada's Projects"),
                (MetaTag::SocialDescription, "Things Ada built"),
                (MetaTag::TwitterDescription, "Things Ada built"),
            ],
        );
    }

    #[test]
    fn social_title_falls_back_to_document_title() {
        let mut sink = MapSink::complete();
        synchronize(&mut sink, OWNER, &PageMetadata::new("Home"));
        assert_eq!(sink.get(MetaTag::SocialTitle), Some("Home | Ada Lovelace"));
        assert_eq!(sink.get(MetaTag::TwitterTitle), Some("Home | Ada Lovelace"));
    }

    #[test]
    fn social_descriptions_fall_back_to_description() {
        let mut sink = MapSink::complete();
        synchronize(&mut sink, OWNER, &PageMetadata::new("Home").description("D"));
        assert_eq!(sink.get(MetaTag::SocialDescription), Some("D"));
        assert_eq!(sink.get(MetaTag::TwitterDescription), Some("D"));
    }

    #[test]
    fn absent_descriptions_leave_existing_content() {
        let mut sink = MapSink::complete()
            .seeded(MetaTag::Description, "site default")
            .seeded(MetaTag::SocialDescription, "og default")
            .seeded(MetaTag::TwitterDescription, "tw default")
            .seeded(MetaTag::Keywords, "kw default");
        synchronize(&mut sink, OWNER, &PageMetadata::new("Resume"));

        assert_tags(
            &sink,
            &[
                (MetaTag::Description, "site default"),
                (MetaTag::SocialDescription, "og default"),
                (MetaTag::TwitterDescription, "tw default"),
                (MetaTag::Keywords, "kw default"),
            ],
        );
    }

    #[test]
    fn blank_description_counts_as_absent() {
        let mut sink = MapSink::complete().seeded(MetaTag::Description, "keep");
        synchronize(&mut sink, OWNER, &PageMetadata::new("About").description("  "));
        assert_eq!(sink.get(MetaTag::Description), Some("keep"));
    }

    #[test]
    fn missing_keywords_tag_is_tolerated() {
        let tags: Vec<MetaTag> = MetaTag::ALL
            .into_iter()
            .filter(|t| *t != MetaTag::Keywords)
            .collect();
        let mut sink = MapSink::with_tags(&tags);
        synchronize(&mut sink, OWNER, &full_page());

        assert_eq!(sink.get(MetaTag::Keywords), None);
        assert_eq!(sink.title, "Projects | Ada Lovelace");
        assert_eq!(sink.get(MetaTag::Description), Some("All projects"));
        assert_eq!(sink.get(MetaTag::SocialTitle), Some("Ada's Projects"));
    }

    #[test]
    fn empty_document_only_gets_title() {
        let mut sink = MapSink::default();
        synchronize(&mut sink, OWNER, &full_page());
        assert_eq!(sink.title, "Projects | Ada Lovelace");
        assert!(MetaTag::ALL.iter().all(|t| sink.get(*t).is_none()));
    }

    #[test]
    fn synchronize_twice_equals_once() {
        let mut once = MapSink::complete();
        synchronize(&mut once, OWNER, &full_page());

        let mut twice = MapSink::complete();
        synchronize(&mut twice, OWNER, &full_page());
        synchronize(&mut twice, OWNER, &full_page());

        assert_eq!(once, twice);
    }

    // =========================================================================
    // MetadataEffect
    // =========================================================================

    /// Sink that counts writes so we can see whether the effect re-ran.
    #[derive(Default)]
    struct CountingSink {
        writes: usize,
    }

    impl MetadataSink for CountingSink {
        fn set_title(&mut self, _title: &str) {
            self.writes += 1;
        }
        fn set_tag(&mut self, _tag: MetaTag, _content: &str) -> bool {
            self.writes += 1;
            true
        }
    }

    #[test]
    fn effect_skips_unchanged_metadata() {
        let mut effect = MetadataEffect::new(OWNER);
        let mut sink = CountingSink::default();

        assert!(effect.apply(&mut sink, &full_page()));
        let after_first = sink.writes;
        assert!(!effect.apply(&mut sink, &full_page()));
        assert_eq!(sink.writes, after_first);
    }

    #[test]
    fn effect_reruns_when_any_field_changes() {
        let mut effect = MetadataEffect::new(OWNER);
        let mut sink = MapSink::complete();

        effect.apply(&mut sink, &full_page());
        let changed = full_page().keywords("rust, wasm");
        assert!(effect.apply(&mut sink, &changed));
        assert_eq!(sink.get(MetaTag::Keywords), Some("rust, wasm"));
        assert_eq!(effect.last(), Some(&changed));
    }

    // =========================================================================
    // MetaTag
    // =========================================================================

    #[test]
    fn tag_keys_round_trip() {
        for tag in MetaTag::ALL {
            assert_eq!(MetaTag::from_key(tag.key()), Some(tag));
        }
        assert_eq!(MetaTag::from_key("viewport"), None);
    }

    #[test]
    fn open_graph_tags_use_property_attribute() {
        assert_eq!(MetaTag::SocialTitle.key_attr(), "property");
        assert_eq!(MetaTag::SocialDescription.key_attr(), "property");
        assert_eq!(MetaTag::TwitterTitle.key_attr(), "name");
        assert_eq!(MetaTag::Description.key_attr(), "name");
    }
}
