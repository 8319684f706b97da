//! In-app navigation: the route table, the auth guard, and the navigator
//! that carries out redirects

mod guard;
mod navigator;
mod routes;

pub use guard::{AuthGuard, GuardDecision, RETURN_URL_PARAM, login_redirect, return_url};
pub use navigator::{HistoryNavigator, Navigator};
pub use routes::{Navigation, Resolution, Route, RouteAccess, RouteTable, Router};
