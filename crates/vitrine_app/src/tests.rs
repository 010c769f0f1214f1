//! Page-level scenarios against the headless host

use std::cell::RefCell;

use pretty_assertions::assert_eq;

use crate::prelude::*;
use vitrine_core::NodeId;

/// Ids of the interesting nodes in [`site`]
struct Site {
    page: HeadlessPage,
    theme_label: NodeId,
    lang_label: NodeId,
    lang_icon: NodeId,
    heading: NodeId,
    sections: Vec<NodeId>,
    form: NodeId,
    email: NodeId,
    message: NodeId,
}

fn site() -> Site {
    let page = HeadlessPage::new();
    let body = page.body_node();

    let header = page.element(body, "header");
    page.set_layout(header, 0.0, 72.0);

    let theme_btn = page.element(header, "button");
    page.set_attribute(&theme_btn, "id", "toggle-theme");
    page.element(theme_btn, "i");
    let theme_label = page.element(theme_btn, "span");
    page.add_class(&theme_label, "btn-label");

    let lang_btn = page.element(header, "button");
    page.set_attribute(&lang_btn, "id", "toggle-lang");
    let lang_icon = page.element(lang_btn, "span");
    page.add_class(&lang_icon, "lang-icon");
    let lang_label = page.element(lang_btn, "span");
    page.add_class(&lang_label, "btn-label");

    let heading = page.element(body, "h1");
    page.set_attribute(&heading, "data-pl", "O mnie");
    page.set_attribute(&heading, "data-en", "About me");

    let sections: Vec<NodeId> = (0..3)
        .map(|i| {
            let section = page.element(body, "section");
            page.set_attribute(&section, "id", &format!("s{i}"));
            page.add_class(&section, "reveal");
            page.set_layout(section, 800.0 * (i as f64 + 1.0), 600.0);
            section
        })
        .collect();

    let form = page.element(body, "form");
    page.set_attribute(&form, "id", "contact-form");
    page.set_attribute(&form, "action", "https://forms.example.com/f/abc");
    page.set_attribute(&form, "method", "post");
    let email = page.field(form, "email", "");
    let message = page.field(form, "message", "");

    Site {
        page,
        theme_label,
        lang_label,
        lang_icon,
        heading,
        sections,
        form,
        email,
        message,
    }
}

/// Transport answering every request with a fixed status
struct FixedStatus {
    status: Result<u16>,
    sent: RefCell<Vec<FormSubmission>>,
}

impl FixedStatus {
    fn new(status: Result<u16>) -> Self {
        Self {
            status,
            sent: RefCell::new(Vec::new()),
        }
    }
}

impl FormTransport for FixedStatus {
    async fn send(&self, submission: &FormSubmission) -> Result<u16> {
        self.sent.borrow_mut().push(submission.clone());
        match &self.status {
            Ok(status) => Ok(*status),
            Err(err) => Err(VitrineError::Network(err.to_string())),
        }
    }
}

fn fill_in(site: &Site) {
    site.page.set_value(site.email, "ada@example.com");
    site.page.set_value(site.message, "Hello!");
}

#[test]
fn start_applies_persisted_settings() {
    let site = site();
    let store = MemoryStore::with_entries([("theme", "true"), ("lang", "\"en\"")]);
    let mut app = PageApp::new(site.page.clone(), store, PageConfig::default());

    let report = app.start();

    assert_eq!(report.scheme, ColorScheme::Dark);
    assert_eq!(report.lang, Lang::Secondary);
    assert_eq!(report.reveal, RevealOutcome::Watching(3));
    assert!(site.page.has_class(&site.page.body_node(), "dark-mode"));
    assert_eq!(site.page.text(&site.theme_label), "Tryb dzienny");
    assert_eq!(site.page.text(&site.heading), "About me");
    assert_eq!(site.page.text(&site.lang_label), "Polski");
}

#[test]
fn start_with_empty_storage_uses_defaults() {
    let site = site();
    let mut app = PageApp::new(site.page.clone(), MemoryStore::new(), PageConfig::default());

    let report = app.start();

    assert_eq!(report.scheme, ColorScheme::Light);
    assert_eq!(report.lang, Lang::Primary);
    assert_eq!(site.page.text(&site.theme_label), "Tryb nocny");
    assert_eq!(site.page.text(&site.heading), "O mnie");
    assert_eq!(site.page.text(&site.lang_label), "English");
    assert!(app.settings().backend().is_empty());
}

#[test]
fn handlers_write_through_to_storage() {
    let site = site();
    let mut app = PageApp::new(site.page.clone(), MemoryStore::new(), PageConfig::default());
    app.start();

    assert_eq!(app.on_theme_click(), ColorScheme::Dark);
    assert_eq!(app.on_language_click(), Lang::Secondary);

    let store = app.settings().backend();
    assert_eq!(store.raw("theme").as_deref(), Some("true"));
    assert_eq!(store.raw("lang").as_deref(), Some("\"en\""));

    site.page.run_frame();
    assert_eq!(site.page.text(&site.lang_icon), "\u{1F1F5}\u{1F1F1}");
}

#[test]
fn reveal_runs_after_page_ready() {
    let site = site();
    let mut app = PageApp::new(site.page.clone(), MemoryStore::new(), PageConfig::default());
    app.start();

    site.page.intersect(site.sections[0], 0.4);

    assert_eq!(app.reveal().state_of(&site.sections[0]), Some(RevealState::Visible));
    assert_eq!(app.reveal().state_of(&site.sections[1]), Some(RevealState::Pending));
    assert!(site.page.is_observed(site.sections[1]));
}

#[test]
fn anchor_click_scrolls_below_header() {
    let site = site();
    site.page.set_scroll_y(100.0);
    let app = PageApp::new(site.page.clone(), MemoryStore::new(), PageConfig::default());

    assert!(app.on_anchor_click("#s1"));
    // 1600 absolute top, 72 header, 8 margin
    assert_eq!(site.page.scroll_log(), vec![1520.0]);
}

#[test]
fn anchor_click_without_target_or_header_is_left_alone() {
    let site = site();
    let app = PageApp::new(site.page.clone(), MemoryStore::new(), PageConfig::default());
    assert!(!app.on_anchor_click("#missing"));
    assert!(!app.on_anchor_click("#"));

    let bare = HeadlessPage::new();
    let target = bare.element(bare.body_node(), "section");
    bare.set_attribute(&target, "id", "about");
    let app = PageApp::new(bare.clone(), MemoryStore::new(), PageConfig::default());
    assert!(!app.on_anchor_click("#about"));
    assert!(bare.scroll_log().is_empty());
}

#[test]
fn contact_success_notifies_then_resets() {
    let site = site();
    let app = PageApp::new(site.page.clone(), MemoryStore::new(), PageConfig::default());
    fill_in(&site);
    let transport = FixedStatus::new(Ok(200));

    let outcome = pollster::block_on(app.submit_contact(&transport, &site.form));

    assert_eq!(outcome, SubmitOutcome::Sent { status: 200 });
    assert_eq!(
        site.page.notifications(),
        vec!["Dziękujemy! Wiadomość została wysłana.".to_string()]
    );
    assert_eq!(site.page.attribute(&site.email, "value").as_deref(), Some(""));

    let sent = transport.sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, "POST");
    assert_eq!(sent[0].action, "https://forms.example.com/f/abc");
    assert_eq!(
        sent[0].fields,
        vec![
            ("email".to_string(), "ada@example.com".to_string()),
            ("message".to_string(), "Hello!".to_string()),
        ]
    );
}

#[test]
fn contact_rejection_keeps_values() {
    let site = site();
    let app = PageApp::new(site.page.clone(), MemoryStore::new(), PageConfig::default());
    fill_in(&site);
    let transport = FixedStatus::new(Ok(422));

    let outcome = pollster::block_on(app.submit_contact(&transport, &site.form));

    assert_eq!(outcome, SubmitOutcome::Rejected { status: 422 });
    assert_eq!(
        site.page.notifications(),
        vec!["Ups! Nie udało się wysłać wiadomości. Spróbuj ponownie.".to_string()]
    );
    assert_eq!(
        site.page.attribute(&site.email, "value").as_deref(),
        Some("ada@example.com")
    );
    assert_eq!(site.page.attribute(&site.message, "value").as_deref(), Some("Hello!"));
}

#[test]
fn contact_network_failure_notifies_in_active_language() {
    let site = site();
    let store = MemoryStore::with_entries([("lang", "\"en\"")]);
    let app = PageApp::new(site.page.clone(), store, PageConfig::default());
    fill_in(&site);
    let transport = FixedStatus::new(Err(VitrineError::Network("offline".into())));

    let outcome = pollster::block_on(app.submit_contact(&transport, &site.form));

    assert!(matches!(outcome, SubmitOutcome::Failed(_)));
    assert_eq!(
        site.page.notifications(),
        vec!["Oops! Your message could not be sent. Please try again.".to_string()]
    );
    assert_eq!(
        site.page.attribute(&site.email, "value").as_deref(),
        Some("ada@example.com")
    );
}

#[test]
fn form_without_method_uses_default() {
    let site = site();
    let app = PageApp::new(site.page.clone(), MemoryStore::new(), PageConfig::default());
    let form = app.contact().find_form(app.page()).unwrap();
    assert_eq!(form, site.form);

    let bare = site.page.element(site.page.body_node(), "form");
    let submission = app.contact().submission(app.page(), &bare);
    assert_eq!(submission.method, "POST");
    assert_eq!(submission.action, "");
    assert!(submission.fields.is_empty());
}
