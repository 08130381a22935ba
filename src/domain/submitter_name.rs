use validator::Validate;

/// Name as typed into the contact form. Only emptiness is rejected; the value
/// is otherwise relayed verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct SubmitterName {
    #[validate(length(min = 1))]
    name: String,
}

impl AsRef<str> for SubmitterName {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

impl TryFrom<String> for SubmitterName {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        let s = SubmitterName { name: value };
        match s.validate() {
            Ok(_) => Ok(s),
            Err(_) => Err("The submitter name is empty".to_string()),
        }
    }
}
