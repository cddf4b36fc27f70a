use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use leptos::prelude::on_cleanup;
use showroom_shared::supersede::{CancelToken, LatestRequest};
use web_sys::{AbortController, AbortSignal};

thread_local! {
    // Abort handles for live tokens, keyed by token id. JS handles are not
    // Send, so they stay here rather than inside the shared handle.
    static CONTROLLERS: RefCell<HashMap<u64, AbortController>> = RefCell::new(HashMap::new());
}

/// Per-view handle on a [`LatestRequest`], shareable across the view's
/// effects, callbacks and cleanup. Superseding or cancelling a request also
/// aborts its fetch.
#[derive(Clone, Default)]
pub struct Superseding(Arc<Mutex<LatestRequest>>);

impl Superseding {
    /// A handle whose in-flight request is cancelled when the owning view
    /// unmounts.
    pub fn scoped() -> Self {
        let this = Self::default();
        let on_unmount = this.clone();
        on_cleanup(move || on_unmount.cancel());
        this
    }

    fn latest(&self) -> MutexGuard<'_, LatestRequest> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn begin(&self) -> CancelToken {
        let (token, previous) = self.latest().begin();
        if let Some(previous) = previous {
            abort(&previous);
        }
        match AbortController::new() {
            Ok(controller) => {
                CONTROLLERS.with(|c| c.borrow_mut().insert(token.id(), controller));
            }
            Err(err) => tracing::warn!(?err, "no AbortController, request will only be discarded"),
        }
        token
    }

    pub fn cancel(&self) {
        let cancelled = self.latest().cancel();
        if let Some(token) = cancelled {
            abort(&token);
        }
    }
}

/// Signal to hand to the fetch started for `token`.
pub fn abort_signal(token: &CancelToken) -> Option<AbortSignal> {
    CONTROLLERS.with(|c| c.borrow().get(&token.id()).map(AbortController::signal))
}

fn abort(token: &CancelToken) {
    if let Some(controller) = CONTROLLERS.with(|c| c.borrow_mut().remove(&token.id())) {
        tracing::debug!(token = token.id(), "aborting superseded request");
        controller.abort();
    }
}
