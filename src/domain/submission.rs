use crate::domain::{ContactMessage, SubmitterEmail, SubmitterName};
use crate::routes::ContactFormData;

/// One contact form submission with all three fields present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub name: SubmitterName,
    pub email: SubmitterEmail,
    pub message: ContactMessage,
}

impl TryFrom<ContactFormData> for Submission {
    type Error = String;

    fn try_from(form: ContactFormData) -> Result<Self, Self::Error> {
        let name = SubmitterName::try_from(form.name.unwrap_or_default())?;
        let email = SubmitterEmail::try_from(form.email.unwrap_or_default())?;
        let message = ContactMessage::try_from(form.message.unwrap_or_default())?;
        Ok(Self {
            name,
            email,
            message,
        })
    }
}
