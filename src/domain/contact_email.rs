use crate::domain::{EmailAddress, Submission, SubmitterEmail};
use crate::email_templates::EmailTemplates;

/// The email relayed to the site owner for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEmail {
    pub recipient: EmailAddress,
    pub reply_to: SubmitterEmail,
    pub subject: String,
    pub html: String,
    pub text: String,
}

impl ContactEmail {
    pub fn compose(
        submission: &Submission,
        recipient: &EmailAddress,
        templates: &EmailTemplates,
    ) -> Result<Self, tera::Error> {
        Ok(Self {
            recipient: recipient.clone(),
            reply_to: submission.email.clone(),
            subject: format!(
                "New Contact Form Submission from {}",
                submission.name.as_ref()
            ),
            html: templates.render_html(submission)?,
            text: templates.render_text(submission)?,
        })
    }
}
