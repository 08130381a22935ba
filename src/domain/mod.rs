mod contact_email;
mod contact_message;
mod email_address;
mod submission;
mod submitter_email;
mod submitter_name;

pub use contact_email::ContactEmail;
pub use contact_message::ContactMessage;
pub use email_address::EmailAddress;
pub use submission::Submission;
pub use submitter_email::SubmitterEmail;
pub use submitter_name::SubmitterName;
