//! End-to-end page flows through the public API: load a site config from
//! disk, navigate between routes, scroll a page, page through projects,
//! and submit the contact form.

use folio::carousel::{Carousel, page_size_for_width};
use folio::config::{CONFIG_FILE, load_config};
use folio::contact::{ContactForm, ContactSession, NoticeStatus, OutboxDelivery};
use folio::head::HeadDocument;
use folio::metadata::MetaTag;
use folio::reveal::{ViewportSimulator, attach_sections};
use folio::site::{PageSession, Route, nav_is_scrolled};
use std::fs;
use tempfile::TempDir;

fn site_dir() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(CONFIG_FILE),
        r#"
[site]
owner_name = "Grace Hopper"
description = "Site default description"

[contact]
recipient = "grace@example.com"

[pages.resume]
title = "Resume"
description = ""
keywords = "COBOL, compilers"

[pages.projects]
title = "Projects"
description = "Things I built"
social_title = "Grace's Projects"
social_description = "Selected work"
"#,
    )
    .unwrap();
    tmp
}

#[test]
fn navigating_keeps_head_in_sync() {
    let tmp = site_dir();
    let config = load_config(tmp.path()).unwrap();
    let mut head = HeadDocument::site_default(&config.site);
    let mut session = PageSession::new(&config);

    assert_eq!(head.content(MetaTag::Description), Some("Site default description"));

    session.render(Route::Projects, &config, &mut head);
    assert_eq!(head.title, "Projects | Grace Hopper");
    assert_eq!(head.content(MetaTag::SocialTitle), Some("Grace's Projects"));
    assert_eq!(head.content(MetaTag::TwitterTitle), Some("Grace's Projects"));
    assert_eq!(head.content(MetaTag::Description), Some("Things I built"));
    assert_eq!(head.content(MetaTag::SocialDescription), Some("Selected work"));
    assert_eq!(head.content(MetaTag::TwitterDescription), Some("Selected work"));

    // Resume has a blank description: the projects description stays
    session.render(Route::Resume, &config, &mut head);
    assert_eq!(head.title, "Resume | Grace Hopper");
    assert_eq!(head.content(MetaTag::Description), Some("Things I built"));
    assert_eq!(head.content(MetaTag::Keywords), Some("COBOL, compilers"));
    assert_eq!(head.content(MetaTag::SocialTitle), Some("Resume | Grace Hopper"));
    assert_eq!(head.content(MetaTag::SocialDescription), Some("Selected work"));

    let html = head.render().into_string();
    assert!(html.contains("<title>Resume | Grace Hopper</title>"));
}

#[test]
fn head_without_keywords_tag_still_syncs() {
    let tmp = site_dir();
    let config = load_config(tmp.path()).unwrap();
    let mut head = HeadDocument::site_default(&config.site).without_tag(MetaTag::Keywords);
    let mut session = PageSession::new(&config);

    session.render(Route::Resume, &config, &mut head);
    assert_eq!(head.title, "Resume | Grace Hopper");
    assert_eq!(head.content(MetaTag::Keywords), None);
    assert_eq!(head.content(MetaTag::TwitterTitle), Some("Resume | Grace Hopper"));
}

#[test]
fn sections_reveal_once_while_scrolling() {
    let tmp = site_dir();
    let config = load_config(tmp.path()).unwrap();
    let sim = ViewportSimulator::new(900.0);
    let regions = [
        sim.mount(0.0, 600.0),
        sim.mount(700.0, 500.0),
        sim.mount(1400.0, 500.0),
        sim.mount(2100.0, 500.0),
    ];
    let sections = attach_sections(&sim, &regions, &config.reveal);
    let visible = || sections.iter().map(|s| s.handle.is_visible()).collect::<Vec<_>>();

    sim.flush();
    assert_eq!(visible(), [true, true, false, false]);
    assert!(!nav_is_scrolled(sim.scroll_y(), &config));

    sim.scroll_to(800.0);
    assert_eq!(visible(), [true, true, true, false]);
    assert!(nav_is_scrolled(sim.scroll_y(), &config));

    sim.scroll_to(0.0);
    assert_eq!(visible(), [true, true, true, false]);
    assert_eq!(sim.active_observations(), 1);

    drop(sections);
    assert_eq!(sim.active_observations(), 0);
}

#[test]
fn projects_carousel_follows_viewport_width() {
    let tmp = site_dir();
    let config = load_config(tmp.path()).unwrap();
    let projects = ["alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta"];
    let breakpoints = &config.carousel.breakpoints;

    let mut carousel =
        Carousel::new(projects.len()).with_page_size(page_size_for_width(breakpoints, 1440));
    assert_eq!(carousel.visible_slice(&projects), ["alpha", "beta", "gamma"]);

    carousel.select_indicator(2);
    assert_eq!(carousel.visible_slice(&projects), ["eta"]);

    // window narrows: two per page, index stays on a page boundary
    carousel.set_page_size(page_size_for_width(breakpoints, 900));
    assert_eq!(carousel.current_index(), 6);
    assert_eq!(carousel.visible_slice(&projects), ["eta"]);

    carousel.next();
    assert_eq!(carousel.visible_slice(&projects), ["alpha", "beta"]);
    carousel.previous();
    assert_eq!(carousel.visible_slice(&projects), ["zeta", "eta"]);
}

#[test]
fn contact_failure_then_retry() {
    let tmp = site_dir();
    let config = load_config(tmp.path()).unwrap();
    let mut session = ContactSession::new(config.contact.clone());
    session.form = ContactForm {
        name: "Ada".into(),
        email: "ada@example.com".into(),
        subject: String::new(),
        message: "Loved the compiler talk".into(),
    };

    // outbox pointed at a directory: delivery fails, form survives
    let mut broken = OutboxDelivery::new(tmp.path(), config.contact.clone());
    let notice = session.submit(&mut broken).unwrap();
    assert_eq!(notice.status, NoticeStatus::Error);
    assert!(notice.description.contains("grace@example.com"));
    assert!(!session.is_submitting());

    let outbox_path = tmp.path().join("outbox.jsonl");
    let mut outbox = OutboxDelivery::new(&outbox_path, config.contact.clone());
    let notice = session.submit(&mut outbox).unwrap();
    assert_eq!(notice.status, NoticeStatus::Success);
    assert_eq!(session.form, ContactForm::default());

    let queued: serde_json::Value =
        serde_json::from_str(fs::read_to_string(&outbox_path).unwrap().trim()).unwrap();
    assert_eq!(queued["template_params"]["to_email"], "grace@example.com");
    assert_eq!(queued["template_params"]["subject"], "New Portfolio Contact");
}
