//! Client page navigation as an explicit state machine.
//!
//! Exactly one [`Page`] is active at a time. Transitions are pure: they take
//! the current page, an [`Event`] and the caller's session (if any) and
//! return the next page, so navigation can be checked without rendering.

use serde::{Deserialize, Serialize};

use crate::auth::Session;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Home,
    Login,
    Register,
    Results,
    Comparison,
    Favorites,
    Dashboard,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    GoHome,
    OpenLogin,
    OpenRegister,
    LoggedIn,
    Registered,
    LoggedOut,
    SearchCompleted,
    ComparisonLoaded,
    BackToResults,
    OpenFavorites,
    OpenDashboard,
}

impl Default for Page {
    fn default() -> Self {
        Page::Home
    }
}

impl Page {
    pub fn requires_session(&self) -> bool {
        matches!(self, Page::Favorites | Page::Dashboard)
    }

    pub fn next(self, event: Event, session: Option<&Session>) -> Page {
        let signed_in = session.is_some();

        let target = match event {
            Event::GoHome | Event::LoggedIn | Event::LoggedOut => Page::Home,
            Event::OpenLogin | Event::Registered => Page::Login,
            Event::OpenRegister => Page::Register,
            Event::SearchCompleted => Page::Results,
            Event::ComparisonLoaded => Page::Comparison,
            Event::BackToResults => match self {
                Page::Comparison => Page::Results,
                current => current,
            },
            Event::OpenFavorites => Page::Favorites,
            Event::OpenDashboard => Page::Dashboard,
        };

        // a login that did not produce a session stays on the form
        if event == Event::LoggedIn && !signed_in {
            return Page::Login;
        }

        if target.requires_session() && !signed_in {
            return Page::Login;
        }

        target
    }
}

#[cfg(test)]
fn session() -> Session {
    use chrono::Utc;
    use uuid::Uuid;

    Session {
        id: Uuid::new_v4(),
        account_id: Uuid::new_v4(),
        access_token: "token".into(),
        expires_at: Utc::now(),
    }
}

#[test]
fn starts_at_home_test() {
    assert_eq!(Page::default(), Page::Home);
}

#[test]
fn search_then_compare_then_back_test() {
    let page = Page::Home
        .next(Event::SearchCompleted, None)
        .next(Event::ComparisonLoaded, None);
    assert_eq!(page, Page::Comparison);

    assert_eq!(page.next(Event::BackToResults, None), Page::Results);
}

#[test]
fn back_to_results_only_from_comparison_test() {
    assert_eq!(Page::Home.next(Event::BackToResults, None), Page::Home);
    assert_eq!(Page::Login.next(Event::BackToResults, None), Page::Login);
}

#[test]
fn member_pages_need_a_session_test() {
    let session = session();

    assert_eq!(Page::Home.next(Event::OpenFavorites, None), Page::Login);
    assert_eq!(Page::Results.next(Event::OpenDashboard, None), Page::Login);

    assert_eq!(
        Page::Home.next(Event::OpenFavorites, Some(&session)),
        Page::Favorites
    );
    assert_eq!(
        Page::Favorites.next(Event::OpenDashboard, Some(&session)),
        Page::Dashboard
    );
}

#[test]
fn account_lifecycle_test() {
    let session = session();

    let page = Page::Home.next(Event::OpenRegister, None);
    assert_eq!(page, Page::Register);

    let page = page.next(Event::Registered, None);
    assert_eq!(page, Page::Login);

    assert_eq!(page.next(Event::LoggedIn, None), Page::Login);

    let page = page.next(Event::LoggedIn, Some(&session));
    assert_eq!(page, Page::Home);

    let page = page.next(Event::OpenDashboard, Some(&session));
    assert_eq!(page.next(Event::LoggedOut, None), Page::Home);
}

#[test]
fn serializes_as_snake_case_test() {
    assert_eq!(serde_json::to_string(&Page::Dashboard).unwrap(), "\"dashboard\"");
    assert_eq!(
        serde_json::from_str::<Event>("\"back_to_results\"").unwrap(),
        Event::BackToResults
    );
}
