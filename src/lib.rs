//! # Folio
//!
//! The behavior core of a personal portfolio site. Pages (home, about,
//! resume, projects, contact) are mostly static markup and content; what is
//! left once those are set aside is three small pieces of state with real
//! side-effect contracts, plus the plumbing around them.
//!
//! # Architecture: Three Leaf Utilities
//!
//! ```text
//! page mounts ──▶ metadata::MetadataEffect ──▶ MetadataSink (document head)
//!      │
//!      ├──▶ reveal::attach (one per section) ◀── IntersectionObserver (host)
//!      │
//!      └──▶ carousel::Carousel (projects page) ──▶ visible_slice(items)
//! ```
//!
//! None of the three know about each other. Each takes its collaborator as a
//! trait (the document head, the viewport) so the logic can be exercised
//! without a browser; the CLI drives them against in-memory hosts.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`metadata`] | Writes page title and meta tags through a [`metadata::MetadataSink`], with fallbacks |
//! | [`head`] | The document `<head>` as a sink, rendered with Maud |
//! | [`reveal`] | One-way "has been visible" latch per region, plus a simulated viewport |
//! | [`carousel`] | Circular, optionally paged, index over an ordered list |
//! | [`contact`] | Contact form validation, outbound payload, submit/retry lifecycle |
//! | [`site`] | Route table and the per-page head session |
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation |
//! | [`types`] | Shared value types (`PageMetadata`, `RegionId`) |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Never Downgrade a Tag
//!
//! A page that omits its description leaves the current description alone
//! rather than blanking it. The static shell ships sensible defaults and
//! each page only overrides what it knows.
//!
//! ## Single-Shot Observation
//!
//! A reveal handle unsubscribes the moment it latches. Sections animate in
//! once and stay put; there is nothing to gain from further callbacks.
//!
//! ## Clamp, Don't Fail
//!
//! Every carousel input is accepted. Out-of-range pages clamp, an empty list
//! is a normal state, and page-size changes from responsive layouts re-align
//! the index to a page boundary.

pub mod carousel;
pub mod config;
pub mod contact;
pub mod head;
pub mod metadata;
pub mod output;
pub mod reveal;
pub mod site;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
