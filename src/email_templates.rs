//! Bodies of the email relayed to the site owner.
//!
//! Templates whose name ends in `.html` are rendered with HTML auto-escaping,
//! so submitted values can never inject markup into the HTML body. The plain
//! text body is rendered verbatim.

use crate::domain::Submission;
use serde::Serialize;
use std::sync::Arc;
use tera::Tera;

const HTML_TEMPLATE: &str = "contact_submission.html";
const TEXT_TEMPLATE: &str = "contact_submission.txt";

const TEMPLATES: &[(&str, &str)] = &[
    (
        HTML_TEMPLATE,
        include_str!("../templates/contact_submission.html"),
    ),
    (
        TEXT_TEMPLATE,
        include_str!("../templates/contact_submission.txt"),
    ),
];

#[derive(Debug, Clone)]
pub struct EmailTemplates(Arc<Tera>);

#[derive(Serialize)]
struct SubmissionContext<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
}

impl<'a> From<&'a Submission> for SubmissionContext<'a> {
    fn from(submission: &'a Submission) -> Self {
        Self {
            name: submission.name.as_ref(),
            email: submission.email.as_ref(),
            message: submission.message.as_ref(),
        }
    }
}

impl EmailTemplates {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.iter().copied())?;
        Ok(Self(tera.into()))
    }

    pub fn render_html(&self, submission: &Submission) -> Result<String, tera::Error> {
        self.render(HTML_TEMPLATE, submission)
    }

    pub fn render_text(&self, submission: &Submission) -> Result<String, tera::Error> {
        self.render(TEXT_TEMPLATE, submission)
    }

    fn render(&self, template: &str, submission: &Submission) -> Result<String, tera::Error> {
        let context = tera::Context::from_serialize(SubmissionContext::from(submission))?;
        self.0.render(template, &context)
    }
}
