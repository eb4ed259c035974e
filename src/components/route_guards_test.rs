use super::*;
use crate::net::types::User;

fn member(roles: Vec<Role>) -> User {
    User {
        id: "u-1".to_owned(),
        email: "ayesha@campus.edu".to_owned(),
        username: "ayesha".to_owned(),
        first_name: "Ayesha".to_owned(),
        last_name: "Rahman".to_owned(),
        phone_number: None,
        profile_picture: None,
        credits: 0.0,
        roles,
        university: "Campus University".to_owned(),
        hall: None,
        created_at: String::new(),
    }
}

fn authenticated(roles: Vec<Role>, active: Role) -> Session {
    Session {
        user: Some(member(roles)),
        active_role: active,
        is_demo: false,
        loading: false,
    }
}

// =============================================================
// protected_decision
// =============================================================

#[test]
fn protected_waits_while_authenticating() {
    let session = Session { loading: true, ..Session::default() };
    assert_eq!(protected_decision(&session, None), GuardDecision::Wait);
}

#[test]
fn protected_redirects_anonymous_to_login() {
    let session = Session::default();
    assert_eq!(
        protected_decision(&session, None),
        GuardDecision::Redirect(LOGIN_PATH.to_owned())
    );
}

#[test]
fn protected_allows_authenticated_without_role_requirement() {
    let session = authenticated(vec![Role::User], Role::User);
    assert_eq!(protected_decision(&session, None), GuardDecision::Allow);
}

#[test]
fn protected_allows_matching_active_role() {
    let session = authenticated(vec![Role::User, Role::PrinterOwner], Role::PrinterOwner);
    assert_eq!(
        protected_decision(&session, Some(Role::PrinterOwner)),
        GuardDecision::Allow
    );
}

#[test]
fn protected_redirects_when_role_is_held_but_not_active() {
    let session = authenticated(vec![Role::User, Role::PrinterOwner], Role::User);
    assert_eq!(
        protected_decision(&session, Some(Role::PrinterOwner)),
        GuardDecision::Redirect(DEFAULT_LANDING.to_owned())
    );
}

#[test]
fn protected_redirects_when_role_is_not_held_at_all() {
    let session = authenticated(vec![Role::User], Role::User);
    assert_eq!(
        protected_decision(&session, Some(Role::Admin)),
        GuardDecision::Redirect(DEFAULT_LANDING.to_owned())
    );
}

// =============================================================
// public_only_decision
// =============================================================

#[test]
fn public_waits_while_authenticating() {
    let session = Session { loading: true, ..Session::default() };
    assert_eq!(public_only_decision(&session), GuardDecision::Wait);
}

#[test]
fn public_allows_anonymous() {
    assert_eq!(public_only_decision(&Session::default()), GuardDecision::Allow);
}

#[test]
fn public_redirects_authenticated_to_landing() {
    let session = authenticated(vec![Role::User], Role::User);
    assert_eq!(
        public_only_decision(&session),
        GuardDecision::Redirect(DEFAULT_LANDING.to_owned())
    );
}
