/// Access class of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// Requires a session; anonymous visitors are sent to the login view.
    Protected,
    /// Only for anonymous visitors; signed-in users are sent home.
    GuestOnly,
}

/// What the gate decided for one navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Permit,
    RedirectToLogin,
    RedirectToHome,
}

/// Applies the session gate. The only input besides the route's access class
/// is whether a token is currently present.
pub fn evaluate(access: RouteAccess, authenticated: bool) -> GateDecision {
    match (access, authenticated) {
        (RouteAccess::Protected, false) => GateDecision::RedirectToLogin,
        (RouteAccess::GuestOnly, true) => GateDecision::RedirectToHome,
        _ => GateDecision::Permit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protected_routes_need_a_session() {
        assert_eq!(
            evaluate(RouteAccess::Protected, false),
            GateDecision::RedirectToLogin
        );
        assert_eq!(evaluate(RouteAccess::Protected, true), GateDecision::Permit);
    }

    #[test]
    fn guest_routes_reject_signed_in_sessions() {
        assert_eq!(
            evaluate(RouteAccess::GuestOnly, true),
            GateDecision::RedirectToHome
        );
        assert_eq!(evaluate(RouteAccess::GuestOnly, false), GateDecision::Permit);
    }
}
