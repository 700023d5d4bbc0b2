use crate::app::worker::Scope;
use crate::domain::{RecordId, ResourceKind};
use crate::session::{GateDecision, RouteAccess, evaluate};

/// The views the console can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    List(ResourceKind),
    Editor(ResourceKind, Option<RecordId>),
}

impl Route {
    pub fn access(self) -> RouteAccess {
        match self {
            Route::Login => RouteAccess::GuestOnly,
            _ => RouteAccess::Protected,
        }
    }

    /// Where authenticated sessions land by default.
    pub fn home() -> Self {
        Route::List(ResourceKind::Users)
    }
}

/// Owns the current route and the navigation scope.
///
/// Every navigation runs the session gate and then bumps the scope, even when
/// the gate redirected somewhere other than the requested route. Completions
/// tagged with an older scope belong to a view the user has left.
#[derive(Debug)]
pub struct Router {
    current: Route,
    scope: Scope,
}

impl Router {
    pub fn new(authenticated: bool) -> Self {
        let mut router = Self {
            current: Route::Login,
            scope: Scope(0),
        };
        router.navigate(Route::home(), authenticated);
        router
    }

    pub fn current(&self) -> Route {
        self.current
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn is_current(&self, scope: Scope) -> bool {
        self.scope == scope
    }

    /// Applies the gate to `target` and moves there (or to the gate's
    /// redirect). Returns the route actually landed on.
    pub fn navigate(&mut self, target: Route, authenticated: bool) -> Route {
        let landed = match evaluate(target.access(), authenticated) {
            GateDecision::Permit => target,
            GateDecision::RedirectToLogin => Route::Login,
            GateDecision::RedirectToHome => Route::home(),
        };
        self.current = landed;
        self.scope = Scope(self.scope.0 + 1);
        landed
    }
}
