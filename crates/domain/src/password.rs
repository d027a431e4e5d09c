//! The merchant password-change workflow.

use reservation_store::MerchantStore;

use crate::forward::{Forward, keys, views};
use crate::session::SessionContext;

/// Terminal outcome of a password change attempt.
///
/// The workflow is a four-state machine: an absent session stops it before
/// verification, a credential mismatch stops it before any write, and the
/// single persisted update either commits (also updating the session) or
/// rolls back leaving the session untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordChangeOutcome {
    /// No session was supplied.
    NotLoggedIn,

    /// Username or old password did not match the session-held credential.
    VerificationFailed,

    /// The store update succeeded and the session now holds the new password.
    Committed,

    /// The store update affected no rows or failed; nothing changed.
    RolledBack,
}

impl PasswordChangeOutcome {
    /// Returns the user-facing message for this outcome.
    pub fn message(&self) -> &'static str {
        match self {
            PasswordChangeOutcome::NotLoggedIn => "please log in first",
            PasswordChangeOutcome::VerificationFailed => "verification failed",
            PasswordChangeOutcome::Committed => "password changed successfully",
            PasswordChangeOutcome::RolledBack => {
                "password change failed, please try again later"
            }
        }
    }

    /// Returns the attribute the message is published under.
    pub fn attribute(&self) -> &'static str {
        match self {
            PasswordChangeOutcome::Committed => keys::SUCCESS_MESSAGE,
            _ => keys::ERROR_MESSAGE,
        }
    }

    /// Returns true if the new password was committed.
    pub fn is_committed(&self) -> bool {
        matches!(self, PasswordChangeOutcome::Committed)
    }
}

/// Service changing a merchant's password.
pub struct PasswordService<S> {
    store: S,
}

impl<S: MerchantStore> PasswordService<S> {
    /// Creates a password service over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Verifies the old credential and commits the new password.
    ///
    /// The session context is explicit: the caller passes whatever its
    /// session holds, and only a committed change mutates it. Store
    /// failures are downgraded to `RolledBack`, never propagated.
    #[tracing::instrument(skip(self, session, old_password, new_password))]
    pub async fn change_password(
        &self,
        session: Option<&mut SessionContext>,
        username: &str,
        old_password: &str,
        new_password: &str,
    ) -> PasswordChangeOutcome {
        let Some(session) = session else {
            return PasswordChangeOutcome::NotLoggedIn;
        };

        if !session.verify(username, old_password) {
            tracing::info!(username, "password change verification failed");
            return PasswordChangeOutcome::VerificationFailed;
        }

        match self.store.update_password(username, new_password).await {
            Ok(rows) if rows >= 1 => {
                session.set_password(new_password);
                metrics::counter!("password_changes_total").increment(1);
                tracing::info!(username, "password changed");
                PasswordChangeOutcome::Committed
            }
            Ok(_) => {
                tracing::warn!(username, "password update affected no rows");
                PasswordChangeOutcome::RolledBack
            }
            Err(e) => {
                tracing::warn!(username, error = %e, "password update failed");
                metrics::counter!("password_changes_failed").increment(1);
                PasswordChangeOutcome::RolledBack
            }
        }
    }

    /// Handles a raw password-change request and renders the forward.
    pub async fn change_password_forward(
        &self,
        session: Option<&mut SessionContext>,
        username: &str,
        old_password: &str,
        new_password: &str,
    ) -> Forward {
        let outcome = self
            .change_password(session, username, old_password, new_password)
            .await;
        Forward::to(views::PASSWORD_CHANGE).with_attribute(outcome.attribute(), outcome.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reservation_store::InMemoryStore;

    async fn service_with_merchant() -> (PasswordService<InMemoryStore>, InMemoryStore) {
        let store = InMemoryStore::new();
        store.seed_merchant("vendor", "old-secret").await;
        (PasswordService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn missing_session_asks_for_login() {
        let (service, store) = service_with_merchant().await;

        let outcome = service
            .change_password(None, "vendor", "old-secret", "new-secret")
            .await;

        assert_eq!(outcome, PasswordChangeOutcome::NotLoggedIn);
        assert_eq!(outcome.message(), "please log in first");
        assert_eq!(
            store.merchant_password("vendor").await.as_deref(),
            Some("old-secret")
        );
    }

    #[tokio::test]
    async fn mismatch_writes_neither_session_nor_store() {
        let (service, store) = service_with_merchant().await;
        let mut session = SessionContext::logged_in("vendor", "old-secret");

        let outcome = service
            .change_password(Some(&mut session), "vendor", "wrong", "new-secret")
            .await;
        assert_eq!(outcome, PasswordChangeOutcome::VerificationFailed);

        let outcome = service
            .change_password(Some(&mut session), "other", "old-secret", "new-secret")
            .await;
        assert_eq!(outcome, PasswordChangeOutcome::VerificationFailed);

        assert_eq!(session.merchant_password(), Some("old-secret"));
        assert_eq!(
            store.merchant_password("vendor").await.as_deref(),
            Some("old-secret")
        );
    }

    #[tokio::test]
    async fn match_commits_store_and_session() {
        let (service, store) = service_with_merchant().await;
        let mut session = SessionContext::logged_in("vendor", "old-secret");

        let outcome = service
            .change_password(Some(&mut session), "vendor", "old-secret", "new-secret")
            .await;

        assert_eq!(outcome, PasswordChangeOutcome::Committed);
        assert!(outcome.is_committed());
        assert_eq!(session.merchant_password(), Some("new-secret"));
        assert_eq!(
            store.merchant_password("vendor").await.as_deref(),
            Some("new-secret")
        );
    }

    #[tokio::test]
    async fn zero_rows_rolls_back_and_leaves_session() {
        // Session credential exists but the merchant row does not.
        let service = PasswordService::new(InMemoryStore::new());
        let mut session = SessionContext::logged_in("vendor", "old-secret");

        let outcome = service
            .change_password(Some(&mut session), "vendor", "old-secret", "new-secret")
            .await;

        assert_eq!(outcome, PasswordChangeOutcome::RolledBack);
        assert_eq!(session.merchant_password(), Some("old-secret"));
    }

    #[tokio::test]
    async fn store_error_rolls_back_and_leaves_session() {
        let (service, store) = service_with_merchant().await;
        store.fail_next_operation("connection reset").await;
        let mut session = SessionContext::logged_in("vendor", "old-secret");

        let outcome = service
            .change_password(Some(&mut session), "vendor", "old-secret", "new-secret")
            .await;

        assert_eq!(outcome, PasswordChangeOutcome::RolledBack);
        assert_eq!(session.merchant_password(), Some("old-secret"));
        assert_eq!(
            store.merchant_password("vendor").await.as_deref(),
            Some("old-secret")
        );
    }

    #[tokio::test]
    async fn forward_carries_outcome_message() {
        let (service, _store) = service_with_merchant().await;
        let mut session = SessionContext::logged_in("vendor", "old-secret");

        let forward = service
            .change_password_forward(Some(&mut session), "vendor", "old-secret", "new-secret")
            .await;

        assert_eq!(forward.view(), views::PASSWORD_CHANGE);
        assert_eq!(
            forward.attribute(keys::SUCCESS_MESSAGE),
            Some("password changed successfully")
        );

        let forward = service
            .change_password_forward(None, "vendor", "old-secret", "new-secret")
            .await;
        assert_eq!(
            forward.attribute(keys::ERROR_MESSAGE),
            Some("please log in first")
        );
    }
}
