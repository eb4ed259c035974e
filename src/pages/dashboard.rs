//! Dashboard: role-aware landing page with role switching and logout.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::app::{SharedSession, with_session_sync};
use crate::components::route_guards::{LOGIN_PATH, ProtectedRoute};
use crate::state::roles::Role;
use crate::state::session::Session;

/// Authenticated landing page.
#[component]
pub fn DashboardPage() -> impl IntoView {
    view! {
        <ProtectedRoute>
            <DashboardInner/>
        </ProtectedRoute>
    }
}

#[component]
fn DashboardInner() -> impl IntoView {
    let manager = expect_context::<SharedSession>();
    let session = expect_context::<RwSignal<Session>>();
    let navigate = use_navigate();

    // All views below read only the session signal; the manager is touched
    // from event handlers alone.
    let on_logout = move |_| {
        with_session_sync(manager, session, |mgr| mgr.logout());
        navigate(LOGIN_PATH, NavigateOptions::default());
    };

    let switch = move |role: Role| {
        with_session_sync(manager, session, |mgr| mgr.switch_role(role));
    };

    let become_owner = move |_| {
        with_session_sync(manager, session, |mgr| mgr.add_role(Role::PrinterOwner));
    };

    view! {
        <div class="dashboard-page">
            <header class="dashboard-page__header">
                <h1>
                    {move || {
                        session
                            .get()
                            .user
                            .map(|user| format!("Welcome, {}", user.first_name))
                            .unwrap_or_default()
                    }}
                </h1>
                {move || session.get().is_demo.then(|| view! { <span class="badge">"Demo"</span> })}
                <button class="btn" on:click=on_logout>
                    "Log out"
                </button>
            </header>

            <section class="dashboard-page__roles">
                <h2>"Viewing as " {move || session.get().active_role.to_string()}</h2>
                {move || {
                    let current = session.get();
                    let active = current.active_role;
                    current
                        .user
                        .map(|user| {
                            user.roles
                                .iter()
                                .map(|&role| {
                                    view! {
                                        <button
                                            class="btn btn--role"
                                            class:btn--active=move || role == active
                                            on:click=move |_| switch(role)
                                        >
                                            {role.to_string()}
                                        </button>
                                    }
                                })
                                .collect::<Vec<_>>()
                        })
                }}
                {move || {
                    let holds_owner = session
                        .get()
                        .user
                        .is_some_and(|user| user.roles.contains(&Role::PrinterOwner));
                    (!holds_owner)
                        .then(|| {
                            view! {
                                <button class="btn" on:click=become_owner>
                                    "Become a printer owner"
                                </button>
                            }
                        })
                }}
            </section>

            <section class="dashboard-page__credits">
                {move || {
                    session
                        .get()
                        .user
                        .map(|user| format!("Credits: {:.2}", user.credits))
                        .unwrap_or_default()
                }}
                <a href="/profile">"Profile settings"</a>
            </section>
        </div>
    }
}
