//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! serialized to a TOML table and the user's file is deep-merged on top, so a
//! config file only needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! owner_name = "Your Name"
//! title = "Your Name | Portfolio"
//! description = "Full stack engineer building thoughtful software."
//! keywords = "portfolio, full stack, engineer"
//! nav_scroll_threshold = 20.0   # px scrolled before the navbar turns opaque
//!
//! [contact]
//! recipient = "hello@example.com"
//! default_subject = "New Portfolio Contact"
//! service_id = ""               # or FOLIO_EMAILJS_SERVICE_ID
//! template_id = ""              # or FOLIO_EMAILJS_TEMPLATE_ID
//! public_key = ""               # or FOLIO_EMAILJS_PUBLIC_KEY
//!
//! [carousel]
//! breakpoints = [
//!     { min_width = 0, page_size = 1 },
//!     { min_width = 768, page_size = 2 },
//!     { min_width = 1200, page_size = 3 },
//! ]
//!
//! [reveal]
//! threshold = 0.0               # fraction of the region that must be visible
//! offset_y = 50.0               # px the hidden state is pushed down
//! duration = 0.6                # seconds
//! stagger = 0.1                 # seconds added per section
//!
//! [pages.home]
//! title = "Home"
//! description = "..."
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::carousel::Breakpoint;
use crate::types::PageMetadata;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

pub const CONFIG_FILE: &str = "config.toml";

pub const ENV_SERVICE_ID: &str = "FOLIO_EMAILJS_SERVICE_ID";
pub const ENV_TEMPLATE_ID: &str = "FOLIO_EMAILJS_TEMPLATE_ID";
pub const ENV_PUBLIC_KEY: &str = "FOLIO_EMAILJS_PUBLIC_KEY";

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Owner identity and the static head defaults.
    pub site: SiteInfo,
    /// Contact form delivery settings.
    pub contact: ContactConfig,
    /// Responsive page sizes for the projects carousel.
    pub carousel: CarouselConfig,
    /// Reveal-on-scroll tuning.
    pub reveal: RevealConfig,
    /// Per-route head metadata.
    pub pages: PagesConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    /// Appended to every page title: `"{page} | {owner_name}"`.
    pub owner_name: String,
    /// Title of the static page shell.
    pub title: String,
    pub description: String,
    pub keywords: String,
    /// Scroll offset (px) past which the navbar switches to its opaque style.
    pub nav_scroll_threshold: f64,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            owner_name: "Your Name".to_string(),
            title: "Your Name | Portfolio".to_string(),
            description: "Full stack engineer building thoughtful software.".to_string(),
            keywords: "portfolio, full stack, engineer".to_string(),
            nav_scroll_threshold: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    /// Address every contact message is delivered to.
    pub recipient: String,
    /// Subject used when the visitor leaves it blank.
    pub default_subject: String,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            recipient: "hello@example.com".to_string(),
            default_subject: "New Portfolio Contact".to_string(),
            service_id: String::new(),
            template_id: String::new(),
            public_key: String::new(),
        }
    }
}

impl ContactConfig {
    /// Overlay the delivery-service credentials from the environment.
    ///
    /// Set variables win over the file; empty variables are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let slots = [
            (ENV_SERVICE_ID, &mut self.service_id),
            (ENV_TEMPLATE_ID, &mut self.template_id),
            (ENV_PUBLIC_KEY, &mut self.public_key),
        ];
        for (var, slot) in slots {
            if let Some(value) = lookup(var).filter(|v| !v.trim().is_empty()) {
                *slot = value;
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    /// Viewport width thresholds, each selecting a page size.
    pub breakpoints: Vec<Breakpoint>,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            breakpoints: vec![
                Breakpoint {
                    min_width: 0,
                    page_size: 1,
                },
                Breakpoint {
                    min_width: 768,
                    page_size: 2,
                },
                Breakpoint {
                    min_width: 1200,
                    page_size: 3,
                },
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    /// Minimum intersection ratio (0-1) that counts as "visible". 0 reveals
    /// on any overlap.
    pub threshold: f64,
    /// Vertical offset (px) of the hidden state.
    pub offset_y: f64,
    /// Transition duration in seconds.
    pub duration: f64,
    /// Extra delay in seconds per successive section on a page.
    pub stagger: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            offset_y: 50.0,
            duration: 0.6,
            stagger: 0.1,
        }
    }
}

/// Head metadata for each routed page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PagesConfig {
    pub home: PageMetadata,
    pub about: PageMetadata,
    pub resume: PageMetadata,
    pub projects: PageMetadata,
    pub contact: PageMetadata,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            home: PageMetadata::new("Home")
                .description("Full stack engineer building AI-powered web applications. Explore my portfolio and projects.")
                .keywords("Full Stack Developer, React, TypeScript, Node.js, AI Integration, Portfolio")
                .social_description("Building exceptional digital experiences with modern web and AI technologies."),
            about: PageMetadata::new("About Me")
                .description("Background, experience, and the skills I bring to every project.")
                .keywords("About, Full Stack Developer, Experience, Skills, Biography"),
            resume: PageMetadata::new("Resume")
                .description("Professional experience, education, and technical skills.")
                .keywords("Resume, CV, Experience, Skills, Employment"),
            projects: PageMetadata::new("Projects")
                .description("Full stack projects featuring AI integration, React applications, and modern web development.")
                .keywords("Projects, Portfolio, React Projects, AI Applications, Web Development")
                .social_description("A showcase of full stack projects and creative solutions."),
            contact: PageMetadata::new("Contact")
                .description("Get in touch about your next project, a collaboration, or a question.")
                .keywords("Contact, Collaboration, Projects, Hire"),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.owner_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site.owner_name must not be empty".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(ConfigError::Validation(
                "reveal.threshold must be between 0 and 1".into(),
            ));
        }
        let reveal = &self.reveal;
        if ![reveal.offset_y, reveal.duration, reveal.stagger]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(ConfigError::Validation(
                "reveal.offset_y, reveal.duration and reveal.stagger must be finite numbers".into(),
            ));
        }
        if self.reveal.duration < 0.0 || self.reveal.stagger < 0.0 {
            return Err(ConfigError::Validation(
                "reveal.duration and reveal.stagger must not be negative".into(),
            ));
        }
        let breakpoints = &self.carousel.breakpoints;
        if !breakpoints.iter().any(|b| b.min_width == 0) {
            return Err(ConfigError::Validation(
                "carousel.breakpoints must include one with min_width = 0".into(),
            ));
        }
        if breakpoints.iter().any(|b| b.page_size == 0) {
            return Err(ConfigError::Validation(
                "carousel.breakpoints page_size must be at least 1".into(),
            ));
        }
        for (name, page) in self.pages.iter() {
            if page.title.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "pages.{name}.title must not be empty"
                )));
            }
        }
        Ok(())
    }
}

impl PagesConfig {
    /// Pages paired with their config key, in navigation order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &PageMetadata)> {
        [
            ("home", &self.home),
            ("about", &self.about),
            ("resume", &self.resume),
            ("projects", &self.projects),
            ("contact", &self.contact),
        ]
        .into_iter()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, arrays included.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, applies the delivery
/// credentials from the environment, and validates the result.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(dir)?;
    let mut config = resolve_config(base, overlay)?;
    config.contact.apply_env(|var| std::env::var(var).ok());
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Folio Configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site identity and the static <head> shell
# ---------------------------------------------------------------------------
[site]
# Appended to every page title: "About Me | Your Name".
owner_name = "Your Name"
title = "Your Name | Portfolio"
description = "Full stack engineer building thoughtful software."
keywords = "portfolio, full stack, engineer"
# Pixels scrolled before the navbar switches to its opaque style.
nav_scroll_threshold = 20.0

# ---------------------------------------------------------------------------
# Contact form delivery
# ---------------------------------------------------------------------------
[contact]
recipient = "hello@example.com"
# Used when the visitor leaves the subject blank.
default_subject = "New Portfolio Contact"
# Hosted email service credentials. Prefer the environment variables
# FOLIO_EMAILJS_SERVICE_ID, FOLIO_EMAILJS_TEMPLATE_ID, FOLIO_EMAILJS_PUBLIC_KEY.
service_id = ""
template_id = ""
public_key = ""

# ---------------------------------------------------------------------------
# Projects carousel: cards per page by viewport width
# ---------------------------------------------------------------------------
[carousel]
# The widest breakpoint not exceeding the viewport wins.
# One breakpoint must start at min_width = 0.
breakpoints = [
    { min_width = 0, page_size = 1 },
    { min_width = 768, page_size = 2 },
    { min_width = 1200, page_size = 3 },
]

# ---------------------------------------------------------------------------
# Reveal-on-scroll
# ---------------------------------------------------------------------------
[reveal]
# Fraction of a section (0-1) that must be in view before it reveals.
# 0 reveals as soon as any part of it scrolls into view.
threshold = 0.0
# Pixels the hidden state sits below its final position.
offset_y = 50.0
# Transition duration in seconds.
duration = 0.6
# Extra delay in seconds per successive section.
stagger = 0.1

# ---------------------------------------------------------------------------
# Per-page head metadata
# ---------------------------------------------------------------------------
# Each page takes: title (required), description, keywords,
# social_title (defaults to "title | owner_name"),
# social_description (defaults to description).
[pages.home]
title = "Home"
description = "Full stack engineer building AI-powered web applications. Explore my portfolio and projects."
keywords = "Full Stack Developer, React, TypeScript, Node.js, AI Integration, Portfolio"
social_description = "Building exceptional digital experiences with modern web and AI technologies."

[pages.about]
title = "About Me"
description = "Background, experience, and the skills I bring to every project."
keywords = "About, Full Stack Developer, Experience, Skills, Biography"

[pages.resume]
title = "Resume"
description = "Professional experience, education, and technical skills."
keywords = "Resume, CV, Experience, Skills, Employment"

[pages.projects]
title = "Projects"
description = "Full stack projects featuring AI integration, React applications, and modern web development."
keywords = "Projects, Portfolio, React Projects, AI Applications, Web Development"
social_description = "A showcase of full stack projects and creative solutions."

[pages.contact]
title = "Contact"
description = "Get in touch about your next project, a collaboration, or a question."
keywords = "Contact, Collaboration, Projects, Hire"
"##
}
