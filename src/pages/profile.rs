//! Profile settings: name/phone updates and avatar upload.

use leptos::prelude::*;

use crate::app::{SharedSession, with_session};
use crate::components::route_guards::ProtectedRoute;
use crate::net::types::ProfileUpdate;
use crate::state::session::Session;

/// Profile settings page for the authenticated user.
#[component]
pub fn ProfilePage() -> impl IntoView {
    view! {
        <ProtectedRoute>
            <ProfileInner/>
        </ProtectedRoute>
    }
}

fn optional(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_owned()) }
}

#[component]
fn ProfileInner() -> impl IntoView {
    let manager = expect_context::<SharedSession>();
    let session = expect_context::<RwSignal<Session>>();

    let (first, last, phone) = session
        .get_untracked()
        .user
        .map(|user| (user.first_name, user.last_name, user.phone_number.unwrap_or_default()))
        .unwrap_or_default();
    let first_name = RwSignal::new(first);
    let last_name = RwSignal::new(last);
    let phone_number = RwSignal::new(phone);

    let error = RwSignal::new(None::<String>);
    let saved = RwSignal::new(false);
    let loading = move || session.get().loading;

    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let updates = ProfileUpdate {
            first_name: optional(first_name.get_untracked()),
            last_name: optional(last_name.get_untracked()),
            phone_number: optional(phone_number.get_untracked()),
        };
        error.set(None);
        saved.set(false);
        leptos::task::spawn_local(async move {
            let result =
                with_session(manager, session, async |mgr| mgr.update_profile(&updates).await)
                    .await;
            match result {
                Some(Ok(())) => saved.set(true),
                Some(Err(err)) => error.set(Some(err.to_string())),
                None => {}
            }
        });
    };

    let on_file = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast;

            let Some(input) = ev
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            else {
                return;
            };
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            error.set(None);
            leptos::task::spawn_local(async move {
                let result = with_session(manager, session, async |mgr| {
                    mgr.upload_profile_picture(&file).await
                })
                .await;
                if let Some(Err(err)) = result {
                    leptos::logging::warn!("avatar upload failed: {err}");
                    error.set(Some(err.to_string()));
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = &ev;
        }
    };

    view! {
        <div class="profile-page">
            <h1>"Profile settings"</h1>

            <div class="profile-page__avatar">
                {move || {
                    session
                        .get()
                        .user
                        .and_then(|user| user.profile_picture)
                        .map(|src| view! { <img src=src alt="Profile picture"/> })
                }}
                <input type="file" accept="image/*" on:change=on_file/>
            </div>

            {move || {
                error.get().map(|message| view! { <div class="profile-page__error">{message}</div> })
            }}
            {move || saved.get().then(|| view! { <div class="profile-page__saved">"Saved."</div> })}

            <form class="profile-page__form" on:submit=on_save>
                <input
                    type="text"
                    placeholder="First name"
                    prop:value=first_name
                    on:input:target=move |ev| first_name.set(ev.target().value())
                />
                <input
                    type="text"
                    placeholder="Last name"
                    prop:value=last_name
                    on:input:target=move |ev| last_name.set(ev.target().value())
                />
                <input
                    type="tel"
                    placeholder="Phone number"
                    prop:value=phone_number
                    on:input:target=move |ev| phone_number.set(ev.target().value())
                />
                <button type="submit" class="btn btn--primary" disabled=loading>
                    "Save changes"
                </button>
            </form>

            <a href="/dashboard">"Back to dashboard"</a>
        </div>
    }
}
