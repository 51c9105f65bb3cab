use chrono::{DateTime, Utc};
use roost_shared::pii::Masked;

/// Authenticated guest context, injected into the API gateways.
///
/// Replaces ambient global session state: a Session is constructed at login,
/// handed to whatever needs it, and dropped at logout. Nothing reads tokens
/// out of thin air.
#[derive(Debug, Clone)]
pub struct Session {
    pub principal: String,
    pub email: Masked<String>,
    access_token: String,
    pub issued_at: DateTime<Utc>,
}

impl Session {
    pub fn new(
        principal: impl Into<String>,
        email: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            principal: principal.into(),
            email: Masked::new(email.into()),
            access_token: access_token.into(),
            issued_at: Utc::now(),
        }
    }

    pub fn bearer_token(&self) -> &str {
        &self.access_token
    }
}

/// Owns the current session across login/logout events.
#[derive(Debug, Default)]
pub struct SessionManager {
    current: Option<Session>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self { current: None }
    }

    pub fn login(&mut self, session: Session) {
        tracing::info!(principal = %session.principal, "session established");
        self.current = Some(session);
    }

    /// Drop the token. Returns the session that was active, if any.
    pub fn logout(&mut self) -> Option<Session> {
        if let Some(session) = &self.current {
            tracing::info!(principal = %session.principal, "session closed");
        }
        self.current.take()
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_logout_lifecycle() {
        let mut manager = SessionManager::new();
        assert!(!manager.is_authenticated());

        manager.login(Session::new("guest-1", "guest@example.com", "tok_123"));
        assert!(manager.is_authenticated());
        assert_eq!(manager.current().unwrap().bearer_token(), "tok_123");

        let closed = manager.logout().unwrap();
        assert_eq!(closed.principal, "guest-1");
        assert!(!manager.is_authenticated());
        assert!(manager.logout().is_none());
    }

    #[test]
    fn session_debug_hides_email() {
        let session = Session::new("guest-1", "guest@example.com", "tok_123");
        let debugged = format!("{:?}", session);
        assert!(!debugged.contains("guest@example.com"));
    }
}
