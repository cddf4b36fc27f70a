mod car_detail;
mod inventory;
mod login;
mod profile;
mod register;

pub use car_detail::CarDetailPage;
pub use inventory::InventoryPage;
pub use login::LoginPage;
pub use profile::ProfilePage;
pub use register::RegisterPage;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;
use showroom_shared::routes::AppRoute;

use crate::session::use_session;

/// Keeps the visitor off `route` whenever the session says it is not for
/// them. Re-runs on every session change.
fn use_route_guard(route: AppRoute) {
    let session = use_session();
    let navigate = use_navigate();
    Effect::new(move |_| {
        if let Some(target) = route.redirect_for(session.is_logged_in()) {
            tracing::debug!(from = ?route, to = ?target, "redirecting");
            navigate(
                &target.path(),
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        }
    });
}
