use leptos::prelude::*;
use showroom_shared::session::{Refresh, RefreshTicket, Session, UsernameMarker, USERNAME_MARKER};
use showroom_shared::UserSummary;
use web_sys::window;

use crate::api;

/// Username marker kept in `sessionStorage`.
struct BrowserMarker;

impl BrowserMarker {
    fn storage() -> Option<web_sys::Storage> {
        window()?.session_storage().ok()?
    }
}

impl UsernameMarker for BrowserMarker {
    fn remember(&self, username: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(USERNAME_MARKER, username);
        }
    }

    fn forget(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(USERNAME_MARKER);
        }
    }
}

/// Reactive session shared via context. The session value itself is only
/// written through the methods here.
#[derive(Clone, Copy, Debug)]
pub struct SessionContext {
    state: RwSignal<Session>,
}

impl SessionContext {
    pub fn user(&self) -> Option<UserSummary> {
        self.state.with(|s| s.user().cloned())
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.with(Session::is_logged_in)
    }

    pub fn is_logged_in_untracked(&self) -> bool {
        self.state.with_untracked(Session::is_logged_in)
    }

    pub fn is_initializing(&self) -> bool {
        self.state.with(Session::is_initializing)
    }

    /// Re-reads the profile endpoint.
    pub async fn refresh(self) -> Refresh {
        let ticket = self.state.with_untracked(Session::begin_refresh);
        self.complete(ticket).await
    }

    /// Adopts the user the server just accepted, then loads their profile.
    /// The user stays signed in even if that profile load fails.
    pub async fn sign_in(self, user: UserSummary) -> Refresh {
        tracing::info!(username = %user.username, "signed in");
        let Some(ticket) = self.state.try_update(|s| s.sign_in(user, &BrowserMarker)) else {
            return Refresh::Stale;
        };
        self.complete(ticket).await
    }

    async fn complete(self, ticket: RefreshTicket) -> Refresh {
        let outcome = api::fetch_profile().await;
        self.state
            .try_update(|s| s.finish_refresh(ticket, outcome, &BrowserMarker))
            .unwrap_or(Refresh::Stale)
    }

    /// Ends the session on the server, then locally. The local state is
    /// cleared even when the server call fails.
    pub async fn logout(self) {
        if let Err(err) = api::logout().await {
            tracing::warn!(error = %err, "logout request failed");
        }
        self.state.update(|s| s.sign_out(&BrowserMarker));
    }
}

pub fn provide_session() -> SessionContext {
    let session = SessionContext {
        state: RwSignal::new(Session::new()),
    };
    provide_context(session);
    session
}

pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

    fn stored() -> Option<String> {
        BrowserMarker::storage()?.get_item(USERNAME_MARKER).ok()?
    }

    #[wasm_bindgen_test]
    fn marker_lives_in_session_storage() {
        BrowserMarker.remember("ana");
        assert_eq!(stored().as_deref(), Some("ana"));

        BrowserMarker.forget();
        assert_eq!(stored(), None);
    }
}
