use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct ContactMessage {
    #[validate(length(min = 1))]
    message: String,
}

impl AsRef<str> for ContactMessage {
    fn as_ref(&self) -> &str {
        &self.message
    }
}

impl TryFrom<String> for ContactMessage {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        let s = ContactMessage { message: value };
        match s.validate() {
            Ok(_) => Ok(s),
            Err(_) => Err("The message is empty".to_string()),
        }
    }
}
