use crate::Error;
use std::fmt;

/// API key issued at `https://proxy6.net/user/developers`.
///
/// The key travels as a URL path segment, so it is kept out of `Debug`/`Display`
/// output and redacted from error URLs and body snippets.
#[derive(Clone, Default, Eq, PartialEq)]
pub struct ApiKey(String);

impl ApiKey {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.0.trim().is_empty() {
            return Err(Error::InvalidConfig {
                message: "api key must not be empty".into(),
                source: None,
            });
        }
        Ok(())
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

impl From<&str> for ApiKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ApiKey {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_never_prints() {
        let key = ApiKey::new("s3cr3t");
        assert_eq!(format!("{key:?}"), "<redacted>");
        assert_eq!(key.to_string(), "<redacted>");
        assert_eq!(key.expose(), "s3cr3t");
    }

    #[test]
    fn blank_key_is_rejected() {
        assert!(ApiKey::new("  ").validate().is_err());
        assert!(ApiKey::new("k").validate().is_ok());
    }
}
