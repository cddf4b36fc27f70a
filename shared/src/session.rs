//! The client's view of who is signed in.
//!
//! [`Session`] is a plain value; the web app keeps it inside a reactive
//! context and all writes go through the methods below. Every sign-in and
//! sign-out bumps an epoch, and a profile refresh that started under an older
//! epoch may end initialization but never writes the user.

use crate::error::ApiError;
use crate::{ProfilePayload, UserSummary};

/// `sessionStorage` key holding the best-effort username marker.
pub const USERNAME_MARKER: &str = "username";

/// Where the username marker lives. Failures are ignored by implementors.
pub trait UsernameMarker {
    fn remember(&self, username: &str);
    fn forget(&self);
}

/// Taken when a refresh starts; decides how its outcome may be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket {
    epoch: u64,
    after_sign_in: bool,
}

/// How a profile refresh ended, from the session's point of view.
#[derive(Debug, Clone, PartialEq)]
pub enum Refresh {
    /// The profile was fetched and is now the session's user.
    Loaded(ProfilePayload),
    /// The fetch failed.
    Failed,
    /// The session changed while the fetch was in flight; nothing was written.
    Stale,
}

impl Refresh {
    pub fn into_profile(self) -> Option<ProfilePayload> {
        match self {
            Refresh::Loaded(profile) => Some(profile),
            Refresh::Failed | Refresh::Stale => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    user: Option<UserSummary>,
    initializing: bool,
    epoch: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            user: None,
            initializing: true,
            epoch: 0,
        }
    }

    pub fn user(&self) -> Option<&UserSummary> {
        self.user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_initializing(&self) -> bool {
        self.initializing
    }

    pub fn begin_refresh(&self) -> RefreshTicket {
        RefreshTicket {
            epoch: self.epoch,
            after_sign_in: false,
        }
    }

    /// Applies a profile fetch result.
    ///
    /// A failed refresh signs the session out, except for the refresh that
    /// follows a sign-in: the user the server just accepted stays.
    pub fn finish_refresh(
        &mut self,
        ticket: RefreshTicket,
        outcome: Result<ProfilePayload, ApiError>,
        marker: &impl UsernameMarker,
    ) -> Refresh {
        self.initializing = false;

        if ticket.epoch != self.epoch {
            tracing::debug!(
                started = ticket.epoch,
                current = self.epoch,
                "ignoring profile refresh from an earlier session"
            );
            return Refresh::Stale;
        }

        match outcome {
            Ok(profile) => {
                if !profile.user.username.is_empty() {
                    marker.remember(&profile.user.username);
                }
                self.user = Some(profile.user.clone());
                Refresh::Loaded(profile)
            }
            Err(err) if ticket.after_sign_in => {
                tracing::warn!(error = %err, "profile refresh after sign-in failed, keeping user");
                Refresh::Failed
            }
            Err(err) => {
                tracing::info!(error = %err, "profile refresh failed, treating as signed out");
                marker.forget();
                self.user = None;
                Refresh::Failed
            }
        }
    }

    /// Starts a new session for `user`. The returned ticket is for the
    /// profile refresh that follows.
    pub fn sign_in(&mut self, user: UserSummary, marker: &impl UsernameMarker) -> RefreshTicket {
        marker.remember(&user.username);
        self.user = Some(user);
        self.epoch += 1;
        RefreshTicket {
            epoch: self.epoch,
            after_sign_in: true,
        }
    }

    pub fn sign_out(&mut self, marker: &impl UsernameMarker) {
        marker.forget();
        self.user = None;
        self.epoch += 1;
    }
}
