//! Root application component with routing and session context.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::net::api::HttpApi;
use crate::pages::{
    dashboard::DashboardPage, login::LoginPage, profile::ProfilePage, signup::SignupPage,
};
use crate::state::session::{Session, SessionManager};
use crate::util::storage::BrowserStorage;

/// The concrete session state machine run by the browser build.
pub type SessionController = SessionManager<HttpApi, BrowserStorage>;

/// Shared handle to the session state machine, provided as context.
///
/// The manager is browser-local state, so it lives in a `LocalStorage`
/// arena slot; the handle itself stays `Copy + Send + Sync` and can be
/// captured anywhere. The slot holds `None` while an operation is running:
/// [`with_session`] checks the manager out, runs exactly one operation, and
/// puts it back. A caller that finds the slot empty drops its operation
/// instead of waiting.
pub type SharedSession = StoredValue<Option<SessionController>, LocalStorage>;

/// Run one async session operation and mirror the resulting snapshot into
/// the read-model signal. Returns `None`, without side effects, when
/// another operation already has the manager checked out.
pub async fn with_session<T>(
    handle: SharedSession,
    session: RwSignal<Session>,
    op: impl AsyncFnOnce(&mut SessionController) -> T,
) -> Option<T> {
    let Some(mut manager) = handle.try_update_value(Option::take).flatten() else {
        return None;
    };
    // Guards and buttons watch the read model, so mark it busy for the
    // whole checkout, not just the manager's own loading window.
    session.update(|state| state.loading = true);
    let out = op(&mut manager).await;
    session.set(manager.session().clone());
    handle.try_set_value(Some(manager));
    Some(out)
}

/// Synchronous variant of [`with_session`] for local-only operations
/// (logout, role changes, local user patches).
pub fn with_session_sync<T>(
    handle: SharedSession,
    session: RwSignal<Session>,
    op: impl FnOnce(&mut SessionController) -> T,
) -> Option<T> {
    let Some(mut manager) = handle.try_update_value(Option::take).flatten() else {
        return None;
    };
    let out = op(&mut manager);
    session.set(manager.session().clone());
    handle.try_set_value(Some(manager));
    Some(out)
}

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Owns the session manager, restores any persisted session before the
/// first render, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let mut manager = SessionManager::new(HttpApi, BrowserStorage);
    manager.restore();
    let session = RwSignal::new(manager.session().clone());
    let manager: SharedSession = StoredValue::new_local(Some(manager));

    provide_context(session);
    provide_context(manager);

    view! {
        <Stylesheet id="leptos" href="/pkg/printnparcel.css"/>
        <Title text="Print n Parcel"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("signup") view=SignupPage/>
                <Route path=StaticSegment("") view=DashboardPage/>
                <Route path=StaticSegment("dashboard") view=DashboardPage/>
                <Route path=StaticSegment("profile") view=ProfilePage/>
            </Routes>
        </Router>
    }
}
