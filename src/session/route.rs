//! Navigation policy: which view a request lands on

use crate::api::models::Role;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Signup,
    Dashboard,
    AdminDashboard,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Signup => "/signup",
            Route::Dashboard => "/dashboard",
            Route::AdminDashboard => "/admin-dashboard",
        }
    }

    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Dashboard | Route::AdminDashboard)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

pub struct RouteGuard;

impl RouteGuard {
    /// Protected routes need a token. Admins asking for the user dashboard
    /// are sent to the admin view and everyone else is kept out of it.
    /// `role` is unknown until the profile loads.
    pub fn resolve(requested: Route, token: Option<&str>, role: Option<Role>) -> Route {
        let has_token = token.map(|t| !t.trim().is_empty()).unwrap_or(false);

        if requested.is_protected() && !has_token {
            return Route::Login;
        }

        match (requested, role) {
            (Route::Dashboard, Some(Role::Admin)) => Route::AdminDashboard,
            (Route::AdminDashboard, Some(Role::User)) => Route::Dashboard,
            _ => requested,
        }
    }
}
