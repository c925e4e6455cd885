use std::fmt;

use crate::error::AzureApiError;

pub const ACCESS_TOKEN_ENV: &str = "AZURE_ACCESS_TOKEN";

/// Externally acquired ARM bearer token.
#[derive(Clone)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Result<Self, AzureApiError> {
        let token = token.into();
        let token = token.trim();
        if token.is_empty() {
            return Err(AzureApiError::MissingToken);
        }
        Ok(Self(token.to_string()))
    }

    pub fn from_env() -> Result<Self, AzureApiError> {
        let raw = std::env::var(ACCESS_TOKEN_ENV).map_err(|_| AzureApiError::MissingToken)?;
        Self::new(raw)
    }

    pub(crate) fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_token_rejected() {
        assert!(matches!(
            AccessToken::new("   "),
            Err(AzureApiError::MissingToken)
        ));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let token = AccessToken::new(" eyJ0eXAi ").unwrap();
        assert_eq!(token.secret(), "eyJ0eXAi");
        assert_eq!(format!("{token:?}"), "AccessToken(***)");
    }
}
