//! Lightning address parsing and discovery URL construction.

use std::fmt;
use std::str::FromStr;

use crate::error::ResolveError;

/// Path prefix of the LNURL-pay discovery document.
pub const LNURLP_PATH: &str = ".well-known/lnurlp";
/// Path prefix of the keysend discovery document.
pub const KEYSEND_PATH: &str = ".well-known/keysend";

/// A `local-part@domain` identifier.
///
/// Only the shape is checked: exactly one `@` with a non-empty part on each
/// side. Characters are carried into the URLs verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightningAddress {
    local_part: String,
    domain: String,
}

impl LightningAddress {
    pub fn parse(identifier: &str) -> Result<Self, ResolveError> {
        let mut parts = identifier.split('@');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty() => {
                Ok(Self {
                    local_part: local.to_string(),
                    domain: domain.to_string(),
                })
            }
            _ => Err(ResolveError::InvalidAddress(identifier.to_string())),
        }
    }

    pub fn local_part(&self) -> &str {
        &self.local_part
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn lnurlp_url(&self) -> String {
        format!("https://{}/{}/{}", self.domain, LNURLP_PATH, self.local_part)
    }

    pub fn keysend_url(&self) -> String {
        format!("https://{}/{}/{}", self.domain, KEYSEND_PATH, self.local_part)
    }

    /// Both discovery URLs, lnurlp first.
    pub fn discovery_urls(&self) -> DiscoveryUrls {
        DiscoveryUrls {
            lnurlp: self.lnurlp_url(),
            keysend: self.keysend_url(),
        }
    }
}

impl FromStr for LightningAddress {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LightningAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.local_part, self.domain)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryUrls {
    pub lnurlp: String,
    pub keysend: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_well_known_urls() {
        let addr = LightningAddress::parse("user@domain.com").unwrap();
        let urls = addr.discovery_urls();
        assert_eq!(urls.lnurlp, "https://domain.com/.well-known/lnurlp/user");
        assert_eq!(urls.keysend, "https://domain.com/.well-known/keysend/user");
    }

    #[test]
    fn test_rejects_wrong_number_of_separators() {
        for bad in ["", "userdomain.com", "a@b@c", "@@", "user@domain@"] {
            assert_eq!(
                LightningAddress::parse(bad),
                Err(ResolveError::InvalidAddress(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_empty_parts() {
        assert!(LightningAddress::parse("@domain.com").is_err());
        assert!(LightningAddress::parse("user@").is_err());
        assert!(LightningAddress::parse("@").is_err());
    }

    #[test]
    fn test_no_escaping_applied() {
        let addr: LightningAddress = "sat oshi+tips@pay.example.org:8443".parse().unwrap();
        assert_eq!(addr.local_part(), "sat oshi+tips");
        assert_eq!(addr.domain(), "pay.example.org:8443");
        assert_eq!(
            addr.lnurlp_url(),
            "https://pay.example.org:8443/.well-known/lnurlp/sat oshi+tips"
        );
    }

    #[test]
    fn test_display_round_trips_identifier() {
        let addr = LightningAddress::parse("alice@example.com").unwrap();
        assert_eq!(addr.to_string(), "alice@example.com");
    }
}
