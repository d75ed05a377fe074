//! Route table and page-level glue.
//!
//! Each route maps to one page and that page's head metadata from
//! `[pages.*]`. [`PageSession`] is what a mounted page holds: the metadata
//! effect that keeps the document head in sync while the visitor navigates.

use crate::config::SiteConfig;
use crate::metadata::{MetadataEffect, MetadataSink};
use crate::types::PageMetadata;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    About,
    Resume,
    Projects,
    Contact,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Route::Home,
        Route::About,
        Route::Resume,
        Route::Projects,
        Route::Contact,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::About => "/about",
            Route::Resume => "/resume",
            Route::Projects => "/projects",
            Route::Contact => "/contact",
        }
    }

    /// Label in the navbar.
    pub fn label(self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::About => "About",
            Route::Resume => "Resume",
            Route::Projects => "Projects",
            Route::Contact => "Contact",
        }
    }

    /// Match a location path. Trailing slashes, query strings, and
    /// fragments are ignored.
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Self::ALL.into_iter().find(|r| r.path() == normalized)
    }

    pub fn metadata(self, config: &SiteConfig) -> &PageMetadata {
        let pages = &config.pages;
        match self {
            Route::Home => &pages.home,
            Route::About => &pages.about,
            Route::Resume => &pages.resume,
            Route::Projects => &pages.projects,
            Route::Contact => &pages.contact,
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Whether the navbar should switch to its opaque, blurred style.
pub fn nav_is_scrolled(scroll_y: f64, config: &SiteConfig) -> bool {
    scroll_y > config.site.nav_scroll_threshold
}

/// Head synchronization for the page currently on screen.
#[derive(Debug, Clone)]
pub struct PageSession {
    effect: MetadataEffect,
    route: Option<Route>,
}

impl PageSession {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            effect: MetadataEffect::new(&config.site.owner_name),
            route: None,
        }
    }

    pub fn route(&self) -> Option<Route> {
        self.route
    }

    /// Render `route`: write its metadata into `sink` if it differs from what
    /// was last written. Returns whether the sink was touched.
    pub fn render<S: MetadataSink + ?Sized>(
        &mut self,
        route: Route,
        config: &SiteConfig,
        sink: &mut S,
    ) -> bool {
        self.route = Some(route);
        self.effect.apply(sink, route.metadata(config))
    }
}
