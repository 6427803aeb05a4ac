//! Credential store port

use baza_domain::AccessToken;

/// Holder of the current bearer credential.
///
/// The store is owned by the caller; the network-access layer only reads
/// it, replaces the token after a renewal, and reports a session that
/// can no longer be recovered.
pub trait CredentialStore: Send + Sync {
    /// The token to attach to the next authenticated request.
    fn token(&self) -> Option<AccessToken>;

    /// Replaces the current token.
    fn set_token(&self, token: AccessToken);

    /// Called once when a renewal fails and the session is over.
    fn on_invalidate(&self);
}
