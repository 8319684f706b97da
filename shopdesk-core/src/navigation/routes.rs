//! Route table of the admin console and a router that applies the guard

use std::sync::Arc;

use super::{AuthGuard, GuardDecision, Navigator};
use crate::config::ApiConfig;

/// Redirect chains longer than this are treated as a misconfiguration
const MAX_REDIRECTS: usize = 8;

/// Who may open a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// Anyone
    Public,
    /// Logged-out users; a session is sent to the home route instead
    GuestOnly,
    /// Requires a session
    Protected,
}

/// A screen of the console
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: String,
    pub title: String,
    pub access: RouteAccess,
}

impl Route {
    fn new(path: &str, title: &str, access: RouteAccess) -> Self {
        Self {
            path: path.to_string(),
            title: title.to_string(),
            access,
        }
    }
}

/// How a path resolved against the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    Page(&'a Route),
    Redirect(String),
}

/// Known routes plus redirect rules
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
    redirects: Vec<(String, String)>,
    fallback: String,
}

impl RouteTable {
    /// The console's screens: login and signup for guests, the management
    /// screens behind the guard, and everything else back to login.
    pub fn console(login_route: &str) -> Self {
        use RouteAccess::*;

        Self {
            routes: vec![
                Route::new(login_route, "Login", GuestOnly),
                Route::new("/signup", "Sign up", Public),
                Route::new("/dashboard", "Dashboard", Protected),
                Route::new("/users", "Users", Protected),
                Route::new("/products", "Products", Protected),
                Route::new("/categories", "Categories", Protected),
                Route::new("/stores", "Stores", Protected),
                Route::new("/orders", "Orders", Protected),
                Route::new("/approve-products", "Product approvals", Protected),
            ],
            redirects: vec![("/".to_string(), login_route.to_string())],
            fallback: login_route.to_string(),
        }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Resolve a location (query string ignored) to a page or a redirect
    pub fn resolve(&self, location: &str) -> Resolution<'_> {
        let path = normalize(location);

        if let Some((_, to)) = self.redirects.iter().find(|(from, _)| *from == path) {
            return Resolution::Redirect(to.clone());
        }

        match self.routes.iter().find(|route| route.path == path) {
            Some(route) => Resolution::Page(route),
            None => Resolution::Redirect(self.fallback.clone()),
        }
    }
}

/// Where a navigation ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The user is now at this location
    Arrived(String),
    /// The guard refused and sent the user to `redirect`
    Denied { redirect: String },
}

impl Navigation {
    /// Final location either way
    pub fn location(&self) -> &str {
        match self {
            Navigation::Arrived(location) => location,
            Navigation::Denied { redirect } => redirect,
        }
    }
}

/// Resolves locations through the route table and the guard
pub struct Router {
    table: RouteTable,
    guard: AuthGuard,
    navigator: Arc<dyn Navigator>,
    home_route: String,
}

impl Router {
    pub fn new(
        table: RouteTable,
        guard: AuthGuard,
        navigator: Arc<dyn Navigator>,
        home_route: impl Into<String>,
    ) -> Self {
        Self {
            table,
            guard,
            navigator,
            home_route: home_route.into(),
        }
    }

    /// Router over the console table, configured from `config`
    pub fn console(config: &ApiConfig, guard: AuthGuard, navigator: Arc<dyn Navigator>) -> Self {
        Self::new(
            RouteTable::console(&config.login_route),
            guard,
            navigator,
            config.home_route.clone(),
        )
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Navigate to `location`, following redirects and applying the guard
    pub fn navigate(&self, location: &str) -> Navigation {
        let mut location = location.to_string();

        for _ in 0..MAX_REDIRECTS {
            let route = match self.table.resolve(&location) {
                Resolution::Redirect(to) => {
                    tracing::debug!(from = %location, to = %to, "Route redirect");
                    location = to;
                    continue;
                }
                Resolution::Page(route) => route,
            };

            match route.access {
                RouteAccess::Protected => {
                    if let GuardDecision::Deny { redirect } = self.guard.can_activate(&location) {
                        return Navigation::Denied { redirect };
                    }
                }
                RouteAccess::GuestOnly if self.guard.store().is_authenticated() => {
                    location = self.home_route.clone();
                    continue;
                }
                RouteAccess::GuestOnly | RouteAccess::Public => {}
            }

            self.navigator.navigate(&location);
            return Navigation::Arrived(location);
        }

        tracing::warn!(location = %location, "Redirect limit reached");
        let fallback = self.guard.login_route().to_string();
        self.navigator.navigate(&fallback);
        Navigation::Arrived(fallback)
    }
}

fn normalize(location: &str) -> String {
    let path = location.split(['?', '#']).next().unwrap_or("");
    let path = path.trim_end_matches('/');
    if path.is_empty() {
        "/".to_string()
    } else if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}
