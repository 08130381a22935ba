use validator::Validate;

/// Address the submitter wants replies sent to. The provider is the only party
/// that checks its format.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct SubmitterEmail {
    #[validate(length(min = 1))]
    email: String,
}

impl AsRef<str> for SubmitterEmail {
    fn as_ref(&self) -> &str {
        &self.email
    }
}

impl TryFrom<String> for SubmitterEmail {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        let s = SubmitterEmail { email: value };
        match s.validate() {
            Ok(_) => Ok(s),
            Err(_) => Err("The submitter email is empty".to_string()),
        }
    }
}
