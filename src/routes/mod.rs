mod contact;
mod health;

pub use contact::{
    ContactError, ContactFormData, ContactRecipient, ContactResponse, error_chain_fmt,
    json_config, submit_contact,
};
pub use health::health_check;
