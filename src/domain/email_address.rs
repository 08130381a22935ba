use validator::Validate;

/// A syntactically valid address owned by the site: the sender identity or
/// the fixed contact recipient. Submitted addresses are `SubmitterEmail`s.
#[derive(Debug, Clone, PartialEq, Eq, Validate, serde::Deserialize)]
#[serde(try_from = "String")]
pub struct EmailAddress {
    #[validate(email)]
    email: String,
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.email
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.email.fmt(f)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        let address = Self { email: value };
        match address.validate() {
            Ok(_) => Ok(address),
            Err(_) => Err(format!("'{}' is not a valid email address", address.email)),
        }
    }
}
