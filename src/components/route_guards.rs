//! Route guards: authenticated-only and public-only gating.
//!
//! The decisions themselves are plain functions over a [`Session`] snapshot
//! so they stay testable off-WASM; the components are thin wrappers that
//! apply a decision to their children.

#[cfg(test)]
#[path = "route_guards_test.rs"]
mod route_guards_test;

use leptos::prelude::*;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_location;

use crate::state::roles::Role;
use crate::state::session::{Session, SessionPhase};

/// Where unauthenticated visitors are sent.
pub const LOGIN_PATH: &str = "/login";
/// Default landing page for authenticated users.
pub const DEFAULT_LANDING: &str = "/dashboard";

/// Outcome of a guard evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session restore still in flight; render nothing to avoid a flash.
    Wait,
    /// Render the guarded content.
    Allow,
    /// Redirect to the given path.
    Redirect(String),
}

/// Guard for authenticated-only routes, optionally pinned to a role.
///
/// Anonymous visitors go to the login page. Authenticated visitors whose
/// active role does not match `required_role`, or who lack that role
/// entirely, go to the default landing page instead.
pub fn protected_decision(session: &Session, required_role: Option<Role>) -> GuardDecision {
    match session.phase() {
        SessionPhase::Authenticating => GuardDecision::Wait,
        SessionPhase::Anonymous => GuardDecision::Redirect(LOGIN_PATH.to_owned()),
        SessionPhase::Authenticated => {
            if let Some(required) = required_role {
                let holds = session
                    .user
                    .as_ref()
                    .is_some_and(|user| user.roles.contains(&required));
                if !holds || session.active_role != required {
                    return GuardDecision::Redirect(DEFAULT_LANDING.to_owned());
                }
            }
            GuardDecision::Allow
        }
    }
}

/// Guard for login/signup style routes: already-authenticated users bounce
/// to the landing page instead of re-seeing the forms.
pub fn public_only_decision(session: &Session) -> GuardDecision {
    match session.phase() {
        SessionPhase::Authenticating => GuardDecision::Wait,
        SessionPhase::Authenticated => GuardDecision::Redirect(DEFAULT_LANDING.to_owned()),
        SessionPhase::Anonymous => GuardDecision::Allow,
    }
}

/// Render children only for authenticated sessions (optionally with a
/// matching active role); otherwise redirect.
#[component]
pub fn ProtectedRoute(
    #[prop(optional)] required_role: Option<Role>,
    children: ChildrenFn,
) -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let location = use_location();

    move || match protected_decision(&session.get(), required_role) {
        GuardDecision::Wait => ().into_any(),
        GuardDecision::Allow => children().into_any(),
        GuardDecision::Redirect(to) => {
            // Remember where the visitor was headed for post-login return.
            let target = if to == LOGIN_PATH {
                format!("{to}?from={}", location.pathname.get())
            } else {
                to
            };
            view! { <Redirect path=target/> }.into_any()
        }
    }
}

/// Render children only for anonymous sessions; authenticated users are
/// redirected to the landing page.
#[component]
pub fn PublicRoute(children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();

    move || match public_only_decision(&session.get()) {
        GuardDecision::Wait => ().into_any(),
        GuardDecision::Allow => children().into_any(),
        GuardDecision::Redirect(to) => view! { <Redirect path=to/> }.into_any(),
    }
}
