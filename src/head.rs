//! The document `<head>` as a metadata sink.
//!
//! [`HeadDocument`] holds the title and an ordered list of meta elements,
//! exactly the surface [`crate::metadata::synchronize`] writes to. Only
//! elements that exist can be written; the synchronizer never adds tags.
//!
//! The static shell every route starts from is built by
//! [`HeadDocument::site_default`] from the `[site]` config section. Rendering
//! uses [maud](https://maud.lambda.xyz/) so all content is escaped.

use crate::config::SiteInfo;
use crate::metadata::{MetaTag, MetadataSink};
use maud::{Markup, html};

/// One `<meta>` element: `<meta {attr}="{key}" content="{content}">`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaElement {
    pub attr: String,
    pub key: String,
    pub content: String,
}

impl MetaElement {
    /// The managed tag this element carries, if any. The key must use the
    /// tag's attribute: `<meta name="og:title">` is not the social title.
    pub fn tag(&self) -> Option<MetaTag> {
        MetaTag::from_key(&self.key).filter(|t| t.key_attr() == self.attr)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadDocument {
    pub title: String,
    elements: Vec<MetaElement>,
}

impl HeadDocument {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            elements: Vec::new(),
        }
    }

    /// The head shipped with the static page shell, before any route has
    /// synchronized its metadata.
    pub fn site_default(site: &SiteInfo) -> Self {
        Self::new(&site.title)
            .with_meta("name", "viewport", "width=device-width, initial-scale=1.0")
            .with_tag(MetaTag::Description, &site.description)
            .with_tag(MetaTag::Keywords, &site.keywords)
            .with_meta("name", "author", &site.owner_name)
            .with_meta("property", "og:type", "website")
            .with_tag(MetaTag::SocialTitle, &site.title)
            .with_tag(MetaTag::SocialDescription, &site.description)
            .with_meta("name", "twitter:card", "summary_large_image")
            .with_tag(MetaTag::TwitterTitle, &site.title)
            .with_tag(MetaTag::TwitterDescription, &site.description)
    }

    /// Append a managed tag.
    pub fn with_tag(self, tag: MetaTag, content: &str) -> Self {
        self.with_meta(tag.key_attr(), tag.key(), content)
    }

    /// Append an arbitrary meta element.
    pub fn with_meta(mut self, attr: &str, key: &str, content: &str) -> Self {
        self.elements.push(MetaElement {
            attr: attr.to_string(),
            key: key.to_string(),
            content: content.to_string(),
        });
        self
    }

    /// Drop a managed tag, as if the page shell never declared it.
    pub fn without_tag(mut self, tag: MetaTag) -> Self {
        self.elements.retain(|e| !Self::matches(e, tag));
        self
    }

    pub fn elements(&self) -> &[MetaElement] {
        &self.elements
    }

    /// Content of the first element matching `tag`.
    pub fn content(&self, tag: MetaTag) -> Option<&str> {
        self.elements
            .iter()
            .find(|e| Self::matches(e, tag))
            .map(|e| e.content.as_str())
    }

    fn matches(element: &MetaElement, tag: MetaTag) -> bool {
        element.tag() == Some(tag)
    }

    pub fn render(&self) -> Markup {
        html! {
            head {
                meta charset="utf-8";
                title { (self.title) }
                @for el in &self.elements {
                    @if el.attr == "property" {
                        meta property=(el.key) content=(el.content);
                    } @else {
                        meta name=(el.key) content=(el.content);
                    }
                }
            }
        }
    }
}

impl MetadataSink for HeadDocument {
    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn set_tag(&mut self, tag: MetaTag, content: &str) -> bool {
        match self.elements.iter_mut().find(|e| Self::matches(e, tag)) {
            Some(el) => {
                el.content = content.to_string();
                true
            }
            None => false,
        }
    }
}
