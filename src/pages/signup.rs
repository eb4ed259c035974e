//! Signup page: registration form for new accounts.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::app::{SharedSession, with_session};
use crate::components::route_guards::{DEFAULT_LANDING, PublicRoute};
use crate::net::types::SignupData;
use crate::state::session::Session;

/// Signup page, gated so authenticated users bounce to the dashboard.
#[component]
pub fn SignupPage() -> impl IntoView {
    view! {
        <PublicRoute>
            <SignupForm/>
        </PublicRoute>
    }
}

fn optional(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_owned()) }
}

#[component]
fn SignupForm() -> impl IntoView {
    let manager = expect_context::<SharedSession>();
    let session = expect_context::<RwSignal<Session>>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let username = RwSignal::new(String::new());
    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let phone_number = RwSignal::new(String::new());
    let university = RwSignal::new(String::new());
    let hall = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let loading = move || session.get().loading;

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let navigate = navigate.clone();
        let data = SignupData {
            email: email.get_untracked(),
            password: password.get_untracked(),
            username: username.get_untracked(),
            first_name: first_name.get_untracked(),
            last_name: last_name.get_untracked(),
            phone_number: optional(phone_number.get_untracked()),
            university: university.get_untracked(),
            hall: optional(hall.get_untracked()),
        };
        error.set(None);
        leptos::task::spawn_local(async move {
            let result =
                with_session(manager, session, async |mgr| mgr.signup(&data).await).await;
            match result {
                Some(Ok(())) => navigate(DEFAULT_LANDING, NavigateOptions::default()),
                Some(Err(err)) => error.set(Some(err.to_string())),
                None => {}
            }
        });
    };

    let text_field = move |kind: &'static str, placeholder: &'static str, signal: RwSignal<String>| {
        view! {
            <input
                type=kind
                placeholder=placeholder
                prop:value=signal
                on:input:target=move |ev| signal.set(ev.target().value())
            />
        }
    };

    view! {
        <div class="signup-page">
            <h1>"Create your account"</h1>

            {move || {
                error.get().map(|message| view! { <div class="signup-page__error">{message}</div> })
            }}

            <form class="signup-page__form" on:submit=on_submit>
                {text_field("email", "Email", email)}
                {text_field("password", "Password", password)}
                {text_field("text", "Username", username)}
                {text_field("text", "First name", first_name)}
                {text_field("text", "Last name", last_name)}
                {text_field("tel", "Phone number (optional)", phone_number)}
                {text_field("text", "University", university)}
                {text_field("text", "Hall (optional)", hall)}
                <button type="submit" class="btn btn--primary" disabled=loading>
                    "Sign up"
                </button>
            </form>

            <a href="/login">"Already have an account? Sign in"</a>
        </div>
    }
}
