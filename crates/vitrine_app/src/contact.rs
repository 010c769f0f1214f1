//! Contact form submission
//!
//! One attempt per submit. Success notifies and then resets the form;
//! any failure notifies and leaves the entered values in place so the user
//! can retry.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use vitrine_core::{Page, Result};
use vitrine_i18n::Lang;

/// A message in both page languages
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub primary: String,
    pub secondary: String,
}

impl LocalizedText {
    pub fn get(&self, lang: Lang) -> &str {
        match lang {
            Lang::Primary => &self.primary,
            Lang::Secondary => &self.secondary,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Selector of the contact form
    pub form_selector: String,
    /// Method used when the form declares none
    pub default_method: String,
    pub success_message: LocalizedText,
    pub failure_message: LocalizedText,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            form_selector: "#contact-form".to_string(),
            default_method: "POST".to_string(),
            success_message: LocalizedText {
                primary: "Dziękujemy! Wiadomość została wysłana.".to_string(),
                secondary: "Thank you! Your message has been sent.".to_string(),
            },
            failure_message: LocalizedText {
                primary: "Ups! Nie udało się wysłać wiadomości. Spróbuj ponownie.".to_string(),
                secondary: "Oops! Your message could not be sent. Please try again.".to_string(),
            },
        }
    }
}

/// What gets sent for one submit
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormSubmission {
    /// Target URL; empty means the current document
    pub action: String,
    /// Upper-cased HTTP method
    pub method: String,
    pub fields: Vec<(String, String)>,
}

/// Sends a submission and reports the response status.
#[allow(async_fn_in_trait)]
pub trait FormTransport {
    async fn send(&self, submission: &FormSubmission) -> Result<u16>;
}

/// Result of one submit
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 2xx response
    Sent { status: u16 },
    /// Any other response
    Rejected { status: u16 },
    /// No response at all
    Failed(String),
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Sent { .. })
    }
}

#[derive(Clone, Debug)]
pub struct ContactForm {
    config: ContactConfig,
}

impl ContactForm {
    pub fn new(config: ContactConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ContactConfig {
        &self.config
    }

    pub fn find_form<P: Page>(&self, page: &P) -> Option<P::Node> {
        page.query(&self.config.form_selector)
    }

    /// Read the form's target, method and fields.
    pub fn submission<P: Page>(&self, page: &P, form: &P::Node) -> FormSubmission {
        let method = page
            .attribute(form, "method")
            .map(|m| m.trim().to_ascii_uppercase())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| self.config.default_method.to_ascii_uppercase());

        FormSubmission {
            action: page.attribute(form, "action").unwrap_or_default(),
            method,
            fields: page.form_fields(form),
        }
    }

    /// Send the form once and tell the user how it went.
    pub async fn submit<P: Page, T: FormTransport>(
        &self,
        page: &P,
        transport: &T,
        form: &P::Node,
        lang: Lang,
    ) -> SubmitOutcome {
        let submission = self.submission(page, form);

        let outcome = match transport.send(&submission).await {
            Ok(status) if (200..300).contains(&status) => SubmitOutcome::Sent { status },
            Ok(status) => SubmitOutcome::Rejected { status },
            Err(err) => SubmitOutcome::Failed(err.to_string()),
        };

        if outcome.is_success() {
            info!(action = %submission.action, "contact form sent");
            page.notify(self.config.success_message.get(lang));
            page.reset_form(form);
        } else {
            warn!(action = %submission.action, ?outcome, "contact form not sent");
            page.notify(self.config.failure_message.get(lang));
        }

        outcome
    }
}
