use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fmt;

/// Separator appended to the API key. Octopus uses Basic auth with the key as
/// the username and an empty password.
const SEPARATOR: char = ':';

/// API key material for the Octopus API.
///
/// The key is stored with the Basic auth separator already appended and is
/// never exposed through `Debug`, logging or the public API. The encoded
/// header only leaves the crate on requests, marked sensitive.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    material: String,
}

impl Credentials {
    /// Creates credentials from a raw API key.
    ///
    /// # Arguments
    ///
    /// * `api_key` - The API key issued by Octopus.
    pub fn new(api_key: impl Into<String>) -> Self {
        let mut material = api_key.into();
        material.push(SEPARATOR);
        Self { material }
    }

    /// Returns the stored `key:` material.
    pub(crate) fn material(&self) -> &str {
        &self.material
    }

    /// Builds the `Authorization` header value for these credentials.
    ///
    /// # Returns
    ///
    /// * `String` - `Basic ` followed by the base64 encoding of `key:`.
    pub(crate) fn authorization_header(&self) -> String {
        format!("Basic {}", STANDARD.encode(self.material().as_bytes()))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credentials([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_appends_separator() {
        let credentials = Credentials::new("api-key");
        assert_eq!(credentials.material(), "api-key:");
    }

    #[test]
    fn test_authorization_header() {
        let credentials = Credentials::new("api-key");
        // base64("api-key:")
        assert_eq!(credentials.authorization_header(), "Basic YXBpLWtleTo=");
    }

    #[test]
    fn test_empty_key_still_has_separator() {
        let credentials = Credentials::new("");
        assert_eq!(credentials.material(), ":");
        assert_eq!(credentials.authorization_header(), "Basic Og==");
    }

    #[test]
    fn test_debug_is_redacted() {
        let credentials = Credentials::new("sk_live_secret");
        let debug = format!("{:?}", credentials);
        assert!(!debug.contains("sk_live_secret"));
        assert_eq!(debug, "Credentials([REDACTED])");
    }
}
