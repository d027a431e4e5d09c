//! Explicit session state passed into workflow calls.

/// Merchant identity as held by the caller's session.
///
/// The reservation core never reads ambient session storage; the handler
/// collaborator extracts these values and passes them in explicitly. Only
/// a committed password change mutates the context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    merchant_name: Option<String>,
    merchant_password: Option<String>,
}

impl SessionContext {
    /// Creates a context from whatever the session holds; either value may
    /// be absent.
    pub fn new(merchant_name: Option<String>, merchant_password: Option<String>) -> Self {
        Self {
            merchant_name,
            merchant_password,
        }
    }

    /// Creates a context for a logged-in merchant.
    pub fn logged_in(merchant_name: impl Into<String>, merchant_password: impl Into<String>) -> Self {
        Self {
            merchant_name: Some(merchant_name.into()),
            merchant_password: Some(merchant_password.into()),
        }
    }

    /// Returns the merchant name held by the session.
    pub fn merchant_name(&self) -> Option<&str> {
        self.merchant_name.as_deref()
    }

    /// Returns the merchant password held by the session.
    pub fn merchant_password(&self) -> Option<&str> {
        self.merchant_password.as_deref()
    }

    /// Verifies a submitted username and old password against the
    /// session-held credential.
    pub fn verify(&self, username: &str, old_password: &str) -> bool {
        self.merchant_name.as_deref() == Some(username)
            && self.merchant_password.as_deref() == Some(old_password)
    }

    /// Commits a new password into the session.
    pub(crate) fn set_password(&mut self, new_password: &str) {
        self.merchant_password = Some(new_password.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_requires_both_fields_to_match() {
        let session = SessionContext::logged_in("vendor", "secret");
        assert!(session.verify("vendor", "secret"));
        assert!(!session.verify("vendor", "wrong"));
        assert!(!session.verify("other", "secret"));
    }

    #[test]
    fn verify_fails_on_missing_session_values() {
        let session = SessionContext::new(None, Some("secret".to_string()));
        assert!(!session.verify("vendor", "secret"));

        let session = SessionContext::new(Some("vendor".to_string()), None);
        assert!(!session.verify("vendor", "secret"));
    }

    #[test]
    fn set_password_updates_only_the_password() {
        let mut session = SessionContext::logged_in("vendor", "old");
        session.set_password("new");
        assert_eq!(session.merchant_name(), Some("vendor"));
        assert_eq!(session.merchant_password(), Some("new"));
    }
}
