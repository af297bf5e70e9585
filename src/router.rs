//! Flat route table mapping URL paths to views.
//!
//! Routes have no guards, redirects or children. A view is produced by the
//! router's loader the first time its route is visited and cached afterwards.

use log::{debug, info};
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    Groups,
    Expenses,
    Api,
    GroupDetails,
    Login,
    Register,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            View::Home => "HomeView",
            View::Groups => "GroupView",
            View::Expenses => "ExpenseView",
            View::Api => "ApiView",
            View::GroupDetails => "GroupDetailsView",
            View::Login => "LoginView",
            View::Register => "RegisterView",
        };
        write!(f, "{}", s)
    }
}

// (name, path pattern, view)
const ROUTES: &[(&str, &str, View)] = &[
    ("home", "/", View::Home),
    ("groups", "/groups", View::Groups),
    ("expenses", "/expenses", View::Expenses),
    ("api", "/api", View::Api),
    ("group-details", "/groups/:id", View::GroupDetails),
    ("login", "/login", View::Login),
    ("register", "/register", View::Register),
];

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Literal(&'static str),
    Param(&'static str),
}

fn parse_pattern(pattern: &'static str) -> Vec<Segment> {
    pattern
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| match s.strip_prefix(':') {
            Some(name) => Segment::Param(name),
            None => Segment::Literal(s),
        })
        .collect()
}

// Drops query string and fragment; empty segments from repeated or trailing
// slashes are ignored.
fn path_segments(path: &str) -> Vec<&str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.split('/').filter(|s| !s.is_empty()).collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteMatch {
    pub name: &'static str,
    pub view: View,
    pub params: HashMap<String, String>,
}

impl RouteMatch {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

struct Route<T> {
    name: &'static str,
    view: View,
    segments: Vec<Segment>,
    loaded: OnceCell<T>,
}

impl<T> Route<T> {
    fn matches(&self, segments: &[&str]) -> Option<HashMap<String, String>> {
        if segments.len() != self.segments.len() {
            return None;
        }
        let mut params = HashMap::new();
        for (expected, actual) in self.segments.iter().zip(segments) {
            match expected {
                Segment::Literal(lit) if lit.eq_ignore_ascii_case(actual) => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => {
                    params.insert(name.to_string(), actual.to_string());
                }
            }
        }
        Some(params)
    }
}

pub struct Router<T> {
    routes: Vec<Route<T>>,
    loader: Box<dyn Fn(View) -> T + Send + Sync>,
}

impl<T> Router<T> {
    /// Builds the application route table. `loader` runs at most once per route.
    pub fn new<F>(loader: F) -> Self
    where
        F: Fn(View) -> T + Send + Sync + 'static,
    {
        let routes = ROUTES
            .iter()
            .map(|&(name, pattern, view)| Route {
                name,
                view,
                segments: parse_pattern(pattern),
                loaded: OnceCell::new(),
            })
            .collect();
        Router {
            routes,
            loader: Box::new(loader),
        }
    }

    /// Route names paired with their path patterns, in table order.
    pub fn routes(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        ROUTES.iter().map(|&(name, pattern, _)| (name, pattern))
    }

    fn find(&self, path: &str) -> Option<(&Route<T>, HashMap<String, String>)> {
        let segments = path_segments(path);
        self.routes
            .iter()
            .find_map(|route| route.matches(&segments).map(|params| (route, params)))
    }

    pub fn resolve(&self, path: &str) -> Option<RouteMatch> {
        self.find(path).map(|(route, params)| RouteMatch {
            name: route.name,
            view: route.view,
            params,
        })
    }

    /// Resolves `path` and returns its view, loading it on first visit.
    pub fn visit(&self, path: &str) -> Option<(RouteMatch, &T)> {
        let (route, params) = self.find(path)?;
        let view = route.loaded.get_or_init(|| {
            info!("Loading {} for route '{}'", route.view, route.name);
            (self.loader)(route.view)
        });
        debug!("Visited {} -> {}", path, route.name);
        let matched = RouteMatch {
            name: route.name,
            view: route.view,
            params,
        };
        Some((matched, view))
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.routes
            .iter()
            .any(|route| route.name == name && route.loaded.get().is_some())
    }

    /// Builds the concrete path for a named route. Returns `None` for an
    /// unknown name or a missing parameter.
    pub fn path_for(&self, name: &str, params: &[(&str, &str)]) -> Option<String> {
        let route = self.routes.iter().find(|route| route.name == name)?;
        let mut path = String::new();
        for segment in &route.segments {
            path.push('/');
            match segment {
                Segment::Literal(lit) => path.push_str(lit),
                Segment::Param(param) => {
                    let (_, value) = params.iter().find(|(key, _)| key == param)?;
                    path.push_str(value);
                }
            }
        }
        if path.is_empty() {
            path.push('/');
        }
        Some(path)
    }
}
