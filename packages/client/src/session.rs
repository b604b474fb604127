//! The single source of truth for "who is signed in".
//!
//! [`SessionStore`] wraps a `tokio::sync::watch` channel. Every publish bumps a
//! revision, so observers that see the same snapshot twice can tell it is not a
//! new transition. Subscribers always see the latest value; intermediate values
//! published faster than an observer reads are coalesced, so each sign-in also
//! bumps a separate counter that survives the coalescing.

use std::sync::Arc;

use api::Session;
use tokio::sync::watch;

/// A published session value and its position in the publish order.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct SessionSnapshot {
    pub revision: u64,
    /// Signed-out to signed-in transitions so far.
    pub sign_ins: u64,
    pub session: Option<Session>,
}

#[derive(Clone, Debug)]
pub struct SessionStore {
    tx: Arc<watch::Sender<SessionSnapshot>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        let (tx, _rx) = watch::channel(SessionSnapshot::default());
        Self { tx: Arc::new(tx) }
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Session> {
        self.tx.borrow().session.clone()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.tx.borrow().clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.tx.borrow().session.is_some()
    }

    /// Replace the session and notify subscribers. Returns the new revision.
    pub fn publish(&self, session: Option<Session>) -> u64 {
        let mut revision = 0;
        self.tx.send_modify(|snapshot| {
            match (&snapshot.session, &session) {
                (None, Some(s)) => {
                    tracing::info!(user = %s.user.display_name(), "signed in");
                    snapshot.sign_ins += 1;
                }
                (Some(_), None) => tracing::info!("signed out"),
                (Some(_), Some(_)) => tracing::debug!("session refreshed"),
                (None, None) => {}
            }
            snapshot.revision += 1;
            snapshot.session = session;
            revision = snapshot.revision;
        });
        revision
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::session;

    #[test]
    fn test_publish_bumps_revision() {
        let store = SessionStore::new();
        assert!(store.current().is_none());
        assert_eq!(store.snapshot().revision, 0);

        assert_eq!(store.publish(Some(session("u1"))), 1);
        assert!(store.is_signed_in());
        assert_eq!(store.publish(None), 2);
        assert!(!store.is_signed_in());
    }

    #[tokio::test]
    async fn test_subscriber_sees_latest_value() {
        let store = SessionStore::new();
        let mut rx = store.subscribe();

        store.publish(Some(session("u1")));
        store.publish(Some(session("u2")));

        rx.changed().await.unwrap();
        let seen = rx.borrow_and_update().clone();
        assert_eq!(seen.revision, 2);
        assert_eq!(seen.session.unwrap().user.id, "u2");
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_sign_in_count_survives_coalescing() {
        let store = SessionStore::new();
        let mut rx = store.subscribe();

        store.publish(Some(session("u1")));
        store.publish(Some(session("u1")));
        assert_eq!(store.snapshot().sign_ins, 1);
        store.publish(None);
        store.publish(Some(session("u2")));

        rx.changed().await.unwrap();
        let seen = rx.borrow_and_update().clone();
        assert_eq!(seen.revision, 4);
        assert_eq!(seen.sign_ins, 2);
    }
}
