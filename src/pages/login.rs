//! Login page: credential form plus guest/demo entry points.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::app::{SharedSession, with_session};
use crate::components::route_guards::{DEFAULT_LANDING, PublicRoute};
use crate::state::roles::Role;
use crate::state::session::Session;

/// Login page, gated so authenticated users bounce to the dashboard.
#[component]
pub fn LoginPage() -> impl IntoView {
    view! {
        <PublicRoute>
            <LoginForm/>
        </PublicRoute>
    }
}

#[component]
fn LoginForm() -> impl IntoView {
    let manager = expect_context::<SharedSession>();
    let session = expect_context::<RwSignal<Session>>();
    let navigate = use_navigate();
    let query = use_query_map();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let loading = move || session.get().loading;

    // Post-login return target remembered by the protected-route guard.
    let after_login =
        move || query.get_untracked().get("from").unwrap_or_else(|| DEFAULT_LANDING.to_owned());

    let on_submit = {
        let navigate = navigate.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            let navigate = navigate.clone();
            let email = email.get_untracked();
            let password = password.get_untracked();
            error.set(None);
            leptos::task::spawn_local(async move {
                let result = with_session(manager, session, async |mgr| {
                    mgr.login(&email, &password).await
                })
                .await;
                match result {
                    Some(Ok(())) => navigate(&after_login(), NavigateOptions::default()),
                    Some(Err(err)) => error.set(Some(err.to_string())),
                    // Another call is already in flight; this submit is dropped.
                    None => {}
                }
            });
        }
    };

    let demo_login = move |role: Role| {
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let done =
                with_session(manager, session, async |mgr| mgr.login_demo(role).await).await;
            if done.is_some() {
                navigate(DEFAULT_LANDING, NavigateOptions::default());
            }
        });
    };
    let demo_user = demo_login.clone();
    let demo_owner = demo_login.clone();
    let demo_admin = demo_login;

    view! {
        <div class="login-page">
            <h1>"Print n Parcel"</h1>
            <p>"Campus printing and delivery"</p>

            {move || {
                error.get().map(|message| view! { <div class="login-page__error">{message}</div> })
            }}

            <form class="login-page__form" on:submit=on_submit>
                <input
                    type="email"
                    placeholder="Email"
                    prop:value=email
                    on:input:target=move |ev| email.set(ev.target().value())
                />
                <input
                    type="password"
                    placeholder="Password"
                    prop:value=password
                    on:input:target=move |ev| password.set(ev.target().value())
                />
                <button type="submit" class="btn btn--primary" disabled=loading>
                    "Sign in"
                </button>
            </form>

            <div class="login-page__demo">
                <button disabled=loading on:click=move |_| demo_user(Role::User)>
                    "Continue as Guest"
                </button>
                <button disabled=loading on:click=move |_| demo_owner(Role::PrinterOwner)>
                    "Guest Printer Owner"
                </button>
                <button disabled=loading on:click=move |_| demo_admin(Role::Admin)>
                    "Guest Admin"
                </button>
            </div>

            <a href="/signup">"Create an account"</a>
        </div>
    }
}
