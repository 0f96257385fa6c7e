//! Route table and browser-style location history.

use std::sync::{Mutex, PoisonError};

use tracing::debug;

/// Receives "go back one step" requests from controllers.
pub trait Navigator: Send + Sync {
    fn back(&self);
}

/// Route parameters handed to the detail view when it is activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationContext {
    /// The raw `{id}` segment of `/detail/{id}`, not yet parsed.
    pub id_param: String,
}

impl NavigationContext {
    pub fn new(id_param: impl Into<String>) -> Self {
        Self {
            id_param: id_param.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Heroes,
    Detail(String),
}

impl Route {
    /// Resolves a path against the route table. The empty path redirects to
    /// the dashboard; unknown paths resolve to `None`.
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim().trim_matches('/');
        match trimmed {
            "" | "dashboard" => Some(Route::Dashboard),
            "heroes" => Some(Route::Heroes),
            _ => {
                let id = trimmed.strip_prefix("detail/")?;
                if id.is_empty() || id.contains('/') {
                    return None;
                }
                Some(Route::Detail(id.to_string()))
            }
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Dashboard => "/dashboard".to_string(),
            Route::Heroes => "/heroes".to_string(),
            Route::Detail(id) => format!("/detail/{id}"),
        }
    }

    pub fn navigation_context(&self) -> Option<NavigationContext> {
        match self {
            Route::Detail(id) => Some(NavigationContext::new(id.clone())),
            _ => None,
        }
    }
}

/// History stack of visited routes. Starts on the dashboard, the target of
/// the empty-path redirect.
#[derive(Debug)]
pub struct Location {
    history: Mutex<Vec<Route>>,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            history: Mutex::new(vec![Route::Dashboard]),
        }
    }
}

impl Location {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes the route `path` resolves to. Unknown paths leave the history
    /// untouched.
    pub fn navigate(&self, path: &str) -> Option<Route> {
        let route = Route::parse(path)?;
        debug!(path = %route.path(), "heroes: navigate");
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(route.clone());
        Some(route)
    }

    pub fn current(&self) -> Route {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
            .unwrap_or(Route::Dashboard)
    }

    pub fn path(&self) -> String {
        self.current().path()
    }

    pub fn depth(&self) -> usize {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Navigator for Location {
    /// Pops one entry; the first entry is never popped.
    fn back(&self) {
        let mut history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
        if history.len() > 1 {
            history.pop();
        }
    }
}
