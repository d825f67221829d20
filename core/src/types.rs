//! Small value types passed through the request capabilities.

use serde::{Deserialize, Serialize};

/// Progress snapshot handed to progress callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Progress {
    pub completed: i64,
    pub total: i64,
}

impl Progress {
    pub fn new(completed: i64, total: i64) -> Self {
        Self { completed, total }
    }

    /// Fraction in `0.0..=1.0`; zero when the total is unknown or empty.
    pub fn fraction_completed(&self) -> f64 {
        if self.total <= 0 {
            return 0.0;
        }
        (self.completed as f64 / self.total as f64).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.total > 0 && self.completed >= self.total
    }
}

/// How long a credential would be remembered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialPersistence {
    None,
    #[default]
    ForSession,
    Permanent,
    Synchronizable,
}

/// User/password credential for `Request::authenticate_with`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub user: String,
    pub password: String,
    pub persistence: CredentialPersistence,
}

impl Credential {
    pub fn new(user: &str, password: &str, persistence: CredentialPersistence) -> Self {
        Self {
            user: user.to_string(),
            password: password.to_string(),
            persistence,
        }
    }
}

/// Where a real session would run a handler. The mocks accept it and always
/// run the handler on the caller's stack.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CallbackQueue {
    #[default]
    Caller,
    Main,
    Global,
    Named(String),
}

/// A discovered network service, target of `Session::stream_with_service`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetService {
    pub domain: String,
    pub service_type: String,
    pub name: String,
    pub port: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_completed_is_ratio() {
        assert_eq!(Progress::new(5, 10).fraction_completed(), 0.5);
        assert!(!Progress::new(5, 10).is_finished());
    }

    #[test]
    fn fraction_completed_with_unknown_total_is_zero() {
        assert_eq!(Progress::new(5, 0).fraction_completed(), 0.0);
        assert_eq!(Progress::new(5, -1).fraction_completed(), 0.0);
        assert!(!Progress::new(5, 0).is_finished());
    }

    #[test]
    fn fraction_completed_is_clamped() {
        let progress = Progress::new(12, 10);
        assert_eq!(progress.fraction_completed(), 1.0);
        assert!(progress.is_finished());
    }

    #[test]
    fn progress_deserializes_from_fixture_shape() {
        let progress: Progress = serde_json::from_str(r#"{"completed":3,"total":4}"#).unwrap();
        assert_eq!(progress, Progress::new(3, 4));
    }

    #[test]
    fn credential_defaults_to_session_persistence() {
        assert_eq!(CredentialPersistence::default(), CredentialPersistence::ForSession);
        let credential = Credential::new("ada", "secret", CredentialPersistence::default());
        assert_eq!(credential.user, "ada");
    }
}
