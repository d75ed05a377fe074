//! CLI output formatting.
//!
//! Each command has a `format_*` function returning `Vec<String>` for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! ```text
//! $ folio pages
//! 001 Home → /
//!     Title: Home | Your Name
//!     Social: Home | Your Name
//! 002 About → /about
//!     ...
//!
//! $ folio carousel --count 5 --page-size 2 next next prev
//! start  page 1/3  [0..2)  #1 #2
//! next   page 2/3  [2..4)  #3 #4
//! ```

use crate::carousel::Carousel;
use crate::config::SiteConfig;
use crate::contact::{Notice, NoticeStatus};
use crate::head::HeadDocument;
use crate::metadata::{MetaTag, document_title, resolve};
use crate::reveal::IntersectionEntry;
use crate::site::Route;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Every route with the titles its head will carry.
pub fn format_pages(config: &SiteConfig) -> Vec<String> {
    let owner = &config.site.owner_name;
    let mut lines = Vec::new();
    for (i, route) in Route::ALL.into_iter().enumerate() {
        let meta = route.metadata(config);
        let title = document_title(&meta.title, owner);
        let social = resolve(&[meta.social_title.as_deref(), Some(title.as_str())]).unwrap_or_default();
        lines.push(format!("{} {} → {}", format_index(i + 1), route.label(), route.path()));
        lines.push(format!("{}Title: {}", indent(1), title));
        if social != title {
            lines.push(format!("{}Social: {}", indent(1), social));
        }
        if let Some(desc) = meta.description.as_deref() {
            lines.push(format!("{}Description: {}", indent(1), desc));
        }
    }
    lines
}

pub fn print_pages(config: &SiteConfig) {
    for line in format_pages(config) {
        println!("{}", line);
    }
}

/// The managed tags of a head, one per line, after its rendered HTML.
pub fn format_head(head: &HeadDocument) -> Vec<String> {
    let mut lines = vec![head.render().into_string(), String::new()];
    lines.push(format!("title: {}", head.title));
    for tag in MetaTag::ALL {
        match head.content(tag) {
            Some(content) => lines.push(format!("{}{}: {}", indent(1), tag, content)),
            None => lines.push(format!("{}{}: (not present)", indent(1), tag)),
        }
    }
    lines
}

pub fn print_head(head: &HeadDocument) {
    for line in format_head(head) {
        println!("{}", line);
    }
}

/// One carousel state line: step label, page indicator, range, items on screen.
pub fn format_carousel_step(step: &str, carousel: &Carousel, items: &[String]) -> String {
    let range = carousel.visible_range();
    let shown = carousel.visible_slice(items).join(" ");
    if carousel.page_count() == 0 {
        return format!("{:<6} (empty)", step);
    }
    format!(
        "{:<6} page {}/{}  [{}..{})  {}",
        step,
        carousel.current_page() + 1,
        carousel.page_count(),
        range.start,
        range.end,
        shown
    )
}

/// One line per region for a scroll position.
pub fn format_reveal_frame(scroll_y: f64, regions: &[(IntersectionEntry, bool)]) -> Vec<String> {
    let mut lines = vec![format!("scroll {}", scroll_y)];
    for (entry, visible) in regions {
        let state = if *visible { "revealed" } else { "hidden" };
        lines.push(format!(
            "{}{}  ratio {:.2}  {}",
            indent(1),
            entry.region,
            entry.ratio,
            state
        ));
    }
    lines
}

pub fn format_notice(notice: &Notice) -> Vec<String> {
    let marker = match notice.status {
        NoticeStatus::Success => "ok",
        NoticeStatus::Error => "error",
    };
    vec![
        format!("[{}] {}", marker, notice.title),
        format!("{}{}", indent(1), notice.description),
    ]
}
