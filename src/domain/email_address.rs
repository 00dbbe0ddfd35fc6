use crate::domain::validation::is_valid_email;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Returns an instance of `EmailAddress` if the input matches the
    /// `local@domain.tld` shape; the raw input is echoed back otherwise.
    pub fn parse(s: String) -> Result<EmailAddress, String> {
        if is_valid_email(&s) {
            Ok(Self(s))
        } else {
            Err(format!("{} is not a valid email address.", s))
        }
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
