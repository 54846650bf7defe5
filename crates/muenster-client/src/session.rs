//! Ownership tracking for the HTTP session behind a client.
//!
//! A session is either handed in by the caller (`External`, never closed
//! here) or created lazily on first use (`Owned`, released by `close`).

use std::sync::{Mutex, PoisonError};

use reqwest::Client;

#[derive(Debug)]
enum SessionState {
    Idle,
    Owned(Client),
    External(Client),
    Closed,
}

/// Outcome of [`Session::acquire`].
pub(crate) enum Acquired {
    Ready(Client),
    Closed,
}

#[derive(Debug)]
pub(crate) struct Session {
    state: Mutex<SessionState>,
}

impl Session {
    pub(crate) fn idle() -> Self {
        Self {
            state: Mutex::new(SessionState::Idle),
        }
    }

    pub(crate) fn external(client: Client) -> Self {
        Self {
            state: Mutex::new(SessionState::External(client)),
        }
    }

    /// Returns a handle to the session, creating and taking ownership of one
    /// if none exists yet.
    ///
    /// `reqwest::Client` is reference counted, so the returned handle shares
    /// the connection pool with the stored one.
    ///
    /// # Errors
    ///
    /// Returns the builder error if a new session cannot be constructed.
    pub(crate) fn acquire(&self) -> Result<Acquired, reqwest::Error> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match &*state {
            SessionState::Owned(client) | SessionState::External(client) => {
                Ok(Acquired::Ready(client.clone()))
            }
            SessionState::Closed => Ok(Acquired::Closed),
            SessionState::Idle => {
                let client = Client::builder().build()?;
                tracing::debug!("created internal HTTP session");
                *state = SessionState::Owned(client.clone());
                Ok(Acquired::Ready(client))
            }
        }
    }

    /// Releases an owned session. Returns `true` only on the call that
    /// actually released it; external sessions are left untouched.
    pub(crate) fn close(&self) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if matches!(*state, SessionState::Owned(_)) {
            *state = SessionState::Closed;
            tracing::debug!("closed internal HTTP session");
            true
        } else {
            false
        }
    }

    pub(crate) fn owns_session(&self) -> bool {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        matches!(*state, SessionState::Owned(_) | SessionState::Closed)
    }

    pub(crate) fn is_closed(&self) -> bool {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        matches!(*state, SessionState::Closed)
    }
}
