//! Employee authentication
//!
//! Two schemes are available:
//!
//! - `legacy`: the password for employee `N` is the string `"N420"`. The
//!   stored password column is ignored. Kept so existing datastores behave
//!   exactly as before; it offers no real protection.
//! - `hashed`: passwords are enrolled as salted SHA-256 digests and checked
//!   against the stored value.

use crate::error::{CliError, Result};
use inventory_common::credential;
use inventory_common::types::Employee;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Suffix appended to the employee id by the legacy scheme
pub const LEGACY_PASSWORD_SUFFIX: &str = "420";

/// Turns passwords into stored credentials and checks login attempts
pub trait Authenticator {
    /// Value to persist in the employee's password column
    fn enroll(&self, password: &str) -> String;

    /// Whether `supplied` is the right password for `employee`
    fn verify(&self, employee: &Employee, supplied: &str) -> bool;
}

/// Password is derived from the employee id
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyDerivedAuthenticator;

impl LegacyDerivedAuthenticator {
    pub fn expected_password(employee_id: i64) -> String {
        format!("{}{}", employee_id, LEGACY_PASSWORD_SUFFIX)
    }
}

impl Authenticator for LegacyDerivedAuthenticator {
    fn enroll(&self, password: &str) -> String {
        password.to_string()
    }

    fn verify(&self, employee: &Employee, supplied: &str) -> bool {
        supplied == Self::expected_password(employee.id)
    }
}

/// Salted SHA-256 of the enrolled password
#[derive(Debug, Clone, Copy, Default)]
pub struct HashedAuthenticator;

impl Authenticator for HashedAuthenticator {
    fn enroll(&self, password: &str) -> String {
        credential::hash_password(password)
    }

    fn verify(&self, employee: &Employee, supplied: &str) -> bool {
        match credential::verify_password(supplied, &employee.password) {
            Ok(matches) => matches,
            Err(e) => {
                warn!(employee_id = employee.id, error = %e, "Stored credential is not hashed");
                false
            },
        }
    }
}

/// Which authenticator a session uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AuthScheme {
    #[default]
    Legacy,
    Hashed,
}

impl AuthScheme {
    pub fn authenticator(self) -> Box<dyn Authenticator> {
        match self {
            AuthScheme::Legacy => Box::new(LegacyDerivedAuthenticator),
            AuthScheme::Hashed => Box::new(HashedAuthenticator),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthScheme::Legacy => "legacy",
            AuthScheme::Hashed => "hashed",
        }
    }
}

impl std::str::FromStr for AuthScheme {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "legacy" => Ok(AuthScheme::Legacy),
            "hashed" => Ok(AuthScheme::Hashed),
            other => Err(CliError::config(format!(
                "Unknown auth scheme '{}'. Valid schemes: legacy, hashed",
                other
            ))),
        }
    }
}

impl std::fmt::Display for AuthScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn employee(id: i64, password: &str) -> Employee {
        Employee {
            id,
            name: "Ana".to_string(),
            surname: "Ruiz".to_string(),
            role: "Gerente".to_string(),
            salary: 1.0,
            password: password.to_string(),
        }
    }

    #[test]
    fn test_legacy_accepts_derived_password() {
        let auth = LegacyDerivedAuthenticator;
        let emp = employee(7, "whatever-was-stored");

        assert!(auth.verify(&emp, "7420"));
        assert!(!auth.verify(&emp, "whatever-was-stored"));
        assert!(!auth.verify(&emp, "742"));
        assert!(!auth.verify(&emp, " 7420"));
        assert!(!auth.verify(&emp, "8420"));
    }

    #[test]
    fn test_legacy_enroll_stores_plaintext() {
        assert_eq!(LegacyDerivedAuthenticator.enroll("secret"), "secret");
        assert_eq!(LegacyDerivedAuthenticator::expected_password(12), "12420");
    }

    #[test]
    fn test_hashed_round_trip() {
        let auth = HashedAuthenticator;
        let stored = auth.enroll("correct horse");
        assert_ne!(stored, "correct horse");

        let emp = employee(3, &stored);
        assert!(auth.verify(&emp, "correct horse"));
        assert!(!auth.verify(&emp, "3420"));
        assert!(!auth.verify(&emp, "correct horse "));
    }

    #[test]
    fn test_hashed_rejects_plaintext_rows() {
        let emp = employee(3, "plain");
        assert!(!HashedAuthenticator.verify(&emp, "plain"));
    }

    #[test]
    fn test_scheme_parsing() {
        assert_eq!("legacy".parse::<AuthScheme>().unwrap(), AuthScheme::Legacy);
        assert_eq!("HASHED".parse::<AuthScheme>().unwrap(), AuthScheme::Hashed);
        assert!("ldap".parse::<AuthScheme>().is_err());
        assert_eq!(AuthScheme::default(), AuthScheme::Legacy);
    }

    #[test]
    fn test_scheme_authenticator() {
        let emp = employee(7, &HashedAuthenticator.enroll("pw"));
        assert!(AuthScheme::Legacy.authenticator().verify(&emp, "7420"));
        assert!(AuthScheme::Hashed.authenticator().verify(&emp, "pw"));
    }
}
