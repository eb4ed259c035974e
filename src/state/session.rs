//! Auth session state machine.
//!
//! [`SessionManager`] is the single mutation path for everything related to
//! the authenticated identity: login, guest/demo login, signup, logout,
//! profile updates, avatar upload, and role switching. It owns a [`Session`]
//! snapshot, mirrors it to durable storage, and notifies registered
//! observers after each successful user-record mutation.
//!
//! STATE & FAILURE MODEL
//! =====================
//! Three phases, derived from the snapshot: `Authenticating` while a restore
//! or mutating call is in flight, then `Anonymous` or `Authenticated`.
//! Mutating network operations commit state and storage together or not at
//! all; on failure the previous snapshot (and its stored form) is retained
//! unchanged and the caller receives an [`AuthError`] with a displayable
//! message. Local operations (`update_user`, `add_role`, `switch_role`) are
//! guarded no-ops rather than fallible calls.
//!
//! There is no request fencing: callers are expected to keep at most one
//! mutating call in flight, which the UI enforces by disabling triggers
//! while `loading` is set.

// `login_demo` has no await point outside the browser build.
#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::api::{ApiError, AuthApi, AvatarFile, make_absolute_file_url};
use crate::net::types::{AuthPayload, ProfileUpdate, SignupData, UploadPayload, User, UserPatch};
use crate::state::roles::{Role, highest_role};
use crate::util::storage::KeyValueStore;

const USER_KEY: &str = "user";
const ROLE_KEY: &str = "currentRole";
const DEMO_KEY: &str = "isDemo";
const TOKEN_KEY: &str = "auth_token";

/// Point-in-time view of the authenticated session.
///
/// `active_role` is always a member of `user.roles` while `user` is set;
/// when `user` is `None` it holds the default role.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub user: Option<User>,
    pub active_role: Role,
    pub is_demo: bool,
    pub loading: bool,
}

/// Lifecycle phase derived from the snapshot fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Authenticating,
    Anonymous,
    Authenticated,
}

impl Session {
    pub fn phase(&self) -> SessionPhase {
        if self.loading {
            SessionPhase::Authenticating
        } else if self.user.is_some() {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Anonymous
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Errors surfaced by mutating session operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Transport failure before any HTTP status was produced.
    #[error("network error: {0}")]
    Network(String),
    /// The backend (or a malformed success body) rejected the operation.
    #[error("{message}")]
    Rejected { status: Option<u16>, message: String },
    /// The operation requires an active session.
    #[error("not logged in")]
    NotAuthenticated,
}

impl From<ApiError> for AuthError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Network(message) => AuthError::Network(message),
            ApiError::Rejected { status, message } => {
                AuthError::Rejected { status: Some(status), message }
            }
        }
    }
}

fn rejected(message: &str) -> AuthError {
    AuthError::Rejected { status: None, message: message.to_owned() }
}

type UserListener = Box<dyn Fn(&User)>;

/// Owner of the session snapshot and the only mutation path for it.
///
/// Generic over the REST surface and the persistence layer so the state
/// machine runs unchanged in the browser and in native tests.
pub struct SessionManager<A, S> {
    api: A,
    store: S,
    session: Session,
    listeners: Vec<UserListener>,
}

impl<A: AuthApi, S: KeyValueStore> SessionManager<A, S> {
    /// Starts in the `Authenticating` phase; call [`Self::restore`] to
    /// resolve it.
    pub fn new(api: A, store: S) -> Self {
        Self {
            api,
            store,
            session: Session { loading: true, ..Session::default() },
            listeners: Vec::new(),
        }
    }

    /// Current snapshot. Cheap to clone for rendering.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Register a best-effort observer notified after each successful
    /// user-record mutation. Delivery order across observers is unspecified.
    pub fn on_user_updated(&mut self, listener: impl Fn(&User) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Restore a persisted session, resolving the startup loading phase
    /// either way. The build-environment guest default applies only when no
    /// demo flag was stored.
    pub fn restore(&mut self) {
        self.restore_with_guest_default(env_guest_default());
    }

    pub fn restore_with_guest_default(&mut self, guest_default: bool) {
        if let Some(raw) = self.store.get(USER_KEY) {
            if let Ok(mut user) = serde_json::from_str::<User>(&raw) {
                fix_user_picture(&mut user);
                // A stored role may predate a role revocation; re-derive then.
                let stored = self.store.get(ROLE_KEY).map(|name| Role::parse(&name));
                self.session.active_role = match stored {
                    Some(role) if user.roles.contains(&role) => role,
                    _ => highest_role(&user.roles),
                };
                self.session.user = Some(user);
            }
        }
        self.session.is_demo = match self.store.get(DEMO_KEY) {
            Some(flag) => flag == "1",
            None => guest_default,
        };
        self.session.loading = false;
    }

    /// Credential login against the backend. On success the whole session
    /// (state plus all four storage keys) commits together; on failure
    /// nothing changes.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), AuthError> {
        self.session.loading = true;
        let result = self.api.login(email, password).await;
        self.session.loading = false;

        let payload: AuthPayload = serde_json::from_value(result?)
            .map_err(|_| rejected("Invalid email or password"))?;
        let mut user = payload.user;
        fix_user_picture(&mut user);
        let role = highest_role(&user.roles);
        self.commit_login(user, role, false, Some(&payload.token));
        Ok(())
    }

    /// Guest/demo login. Synthesizes a local identity and never calls the
    /// backend. Role sets are built by inclusion: admin gets everything,
    /// printer owner gets itself plus user, anything else just user.
    pub async fn login_demo(&mut self, role: Role) {
        self.session.loading = true;
        // Simulated latency for the login spinner.
        #[cfg(feature = "hydrate")]
        gloo_timers::future::sleep(std::time::Duration::from_millis(300)).await;

        let guest = guest_user(role);
        let active = highest_role(&guest.roles);
        self.commit_login(guest, active, true, None);
        self.session.loading = false;
    }

    /// Register a new account. Behaves like [`Self::login`] on success
    /// except the active role is always `User`: new accounts start
    /// unprivileged no matter what role set the backend hands back.
    pub async fn signup(&mut self, data: &SignupData) -> Result<(), AuthError> {
        self.session.loading = true;
        let result = self.api.register(data).await;
        self.session.loading = false;

        let payload: AuthPayload = serde_json::from_value(result?)
            .map_err(|_| rejected("Failed to create account"))?;
        let mut user = payload.user;
        fix_user_picture(&mut user);
        self.commit_login(user, Role::User, false, Some(&payload.token));
        Ok(())
    }

    /// Clear the session and every persisted key. Never fails.
    pub fn logout(&mut self) {
        self.session.user = None;
        self.session.active_role = Role::User;
        self.session.is_demo = false;
        self.store.remove(USER_KEY);
        self.store.remove(ROLE_KEY);
        self.store.remove(DEMO_KEY);
        self.store.remove(TOKEN_KEY);
    }

    /// Local-only merge of fields the backend does not separately confirm.
    /// No-op without an active session.
    pub fn update_user(&mut self, patch: UserPatch) {
        let Some(user) = self.session.user.as_mut() else { return };
        user.merge(patch);
        self.persist_user();
        self.publish();
    }

    /// Push a profile change to the backend and adopt its canonical copy —
    /// the response replaces the record, it is not merged locally.
    pub async fn update_profile(&mut self, updates: &ProfileUpdate) -> Result<(), AuthError> {
        if self.session.user.is_none() {
            return Err(AuthError::NotAuthenticated);
        }
        let token = self.token();
        self.session.loading = true;
        let result = self.api.update_profile(updates, &token).await;
        self.session.loading = false;

        let mut user: User = serde_json::from_value(result?)
            .map_err(|_| rejected("Profile update failed"))?;
        fix_user_picture(&mut user);
        self.adopt_user(user);
        Ok(())
    }

    /// Upload a new avatar. Prefers a full user object from the backend,
    /// otherwise patches just the picture URL onto the current record. The
    /// stored URL gets a cache-busting query so already-rendered images
    /// refresh. On any failure the previous record is retained unchanged.
    pub async fn upload_profile_picture(&mut self, file: &AvatarFile) -> Result<(), AuthError> {
        let Some(current) = self.session.user.clone() else {
            return Err(AuthError::NotAuthenticated);
        };
        let token = self.token();
        self.session.loading = true;
        let result = self.api.upload_profile_picture(file, &token).await;
        self.session.loading = false;

        let payload: UploadPayload =
            serde_json::from_value(result?).map_err(|_| rejected("Upload failed"))?;
        let stamp = cache_stamp();
        let mut next = match payload.user {
            Some(mut user) => {
                if let Some(pic) = user.profile_picture.take() {
                    user.profile_picture = Some(with_cache_bust(&pic, stamp));
                }
                user
            }
            None => {
                let mut user = current;
                let pic = payload.url.or(user.profile_picture.take());
                user.profile_picture = pic.map(|p| with_cache_bust(&p, stamp));
                user
            }
        };
        fix_user_picture(&mut next);
        self.adopt_user(next);
        Ok(())
    }

    /// Re-fetch the canonical user record with the stored token and
    /// republish it.
    pub async fn refresh(&mut self) -> Result<(), AuthError> {
        if self.session.user.is_none() {
            return Err(AuthError::NotAuthenticated);
        }
        let token = self.token();
        let mut user: User = serde_json::from_value(self.api.get_current_user(&token).await?)
            .map_err(|_| rejected("Request failed"))?;
        fix_user_picture(&mut user);
        self.adopt_user(user);
        Ok(())
    }

    /// Grant an additional role locally (self-service upgrade flow). Does
    /// not change the active role; no-op if anonymous or already granted.
    pub fn add_role(&mut self, role: Role) {
        let Some(user) = self.session.user.as_mut() else { return };
        if user.roles.contains(&role) {
            return;
        }
        user.roles.push(role);
        self.persist_user();
        self.publish();
    }

    /// Activate `role` if the user already holds it; silently ignored
    /// otherwise. Holding the role is the authorization — this is a toggle,
    /// not an escalation path.
    pub fn switch_role(&mut self, role: Role) {
        let Some(user) = &self.session.user else { return };
        if !user.roles.contains(&role) {
            return;
        }
        self.session.active_role = role;
        self.store.set(ROLE_KEY, role.as_str());
    }

    fn token(&self) -> String {
        self.store.get(TOKEN_KEY).unwrap_or_default()
    }

    /// Adopt a server-confirmed user record: persist, keep the active role
    /// valid, notify observers.
    fn adopt_user(&mut self, user: User) {
        self.realign_active_role(&user.roles);
        self.session.user = Some(user);
        self.persist_user();
        self.publish();
    }

    fn commit_login(&mut self, user: User, role: Role, demo: bool, token: Option<&str>) {
        let serialized = serde_json::to_string(&user).unwrap_or_default();
        self.store.set(USER_KEY, &serialized);
        self.store.set(ROLE_KEY, role.as_str());
        self.store.set(DEMO_KEY, if demo { "1" } else { "0" });
        if let Some(token) = token {
            self.store.set(TOKEN_KEY, token);
        }
        self.session.user = Some(user);
        self.session.active_role = role;
        self.session.is_demo = demo;
    }

    fn persist_user(&mut self) {
        if let Some(user) = &self.session.user {
            let serialized = serde_json::to_string(user).unwrap_or_default();
            self.store.set(USER_KEY, &serialized);
        }
    }

    // active_role must stay a member of the user's role set
    fn realign_active_role(&mut self, roles: &[Role]) {
        if !roles.contains(&self.session.active_role) {
            self.session.active_role = highest_role(roles);
            self.store.set(ROLE_KEY, self.session.active_role.as_str());
        }
    }

    fn publish(&self) {
        if let Some(user) = &self.session.user {
            for listener in &self.listeners {
                listener(user);
            }
        }
    }
}

/// Make a server-relative avatar path absolute so `<img>` tags resolve it.
fn fix_user_picture(user: &mut User) {
    if let Some(pic) = &user.profile_picture {
        if !pic.is_empty() {
            user.profile_picture = Some(make_absolute_file_url(pic));
        }
    }
}

/// Append a cache-busting query parameter, respecting an existing query.
fn with_cache_bust(url: &str, stamp: u64) -> String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}v={stamp}")
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn cache_stamp() -> u64 {
    #[cfg(feature = "hydrate")]
    {
        js_sys::Date::now() as u64
    }
    #[cfg(not(feature = "hydrate"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

fn now_iso() -> String {
    #[cfg(feature = "hydrate")]
    {
        String::from(js_sys::Date::new_0().to_iso_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        String::new()
    }
}

/// Fixed guest identity for demo mode.
fn guest_user(role: Role) -> User {
    let roles = match role {
        Role::Admin => vec![Role::Admin, Role::PrinterOwner, Role::User],
        Role::PrinterOwner => vec![Role::PrinterOwner, Role::User],
        Role::User => vec![Role::User],
    };
    let owner = role == Role::PrinterOwner;
    User {
        id: if owner { "user-2" } else { "guest" }.to_owned(),
        email: "guest@demo.local".to_owned(),
        username: if owner { "Demo Printer Owner" } else { "guest" }.to_owned(),
        first_name: "Guest".to_owned(),
        last_name: if owner { "Printer Owner" } else { "User" }.to_owned(),
        phone_number: None,
        profile_picture: Some(
            "https://images.pexels.com/photos/220453/pexels-photo-220453.jpeg?auto=compress&cs=tinysrgb&w=100"
                .to_owned(),
        ),
        credits: 99.99,
        roles,
        university: "Campus University".to_owned(),
        hall: Some("Demo Hall".to_owned()),
        created_at: now_iso(),
    }
}

/// Build-time guest-mode default (`PNP_GUEST_MODE`), consulted only when no
/// demo flag was stored.
fn env_guest_default() -> bool {
    matches!(
        option_env!("PNP_GUEST_MODE")
            .map(str::trim)
            .map(str::to_ascii_lowercase)
            .as_deref(),
        Some("1" | "true" | "yes")
    )
}
