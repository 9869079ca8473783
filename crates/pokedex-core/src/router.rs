//! Fragment-based view router.
//!
//! Two routes, `#home` and `#team`. Navigation yields the view to render;
//! a team change re-renders in place only while the team view is showing.

/// A top-level view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Team,
}

impl Route {
    /// Parse a location fragment. Anything that is not `#team` is home.
    pub fn from_fragment(fragment: Option<&str>) -> Self {
        match fragment.map(str::trim) {
            Some("#team") | Some("team") => Route::Team,
            _ => Route::Home,
        }
    }

    pub fn fragment(&self) -> &'static str {
        match self {
            Route::Home => "#home",
            Route::Team => "#team",
        }
    }

    /// Get the display title for this route.
    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Pokédex",
            Route::Team => "My Team",
        }
    }

    /// Get the other route (there are only two)
    pub fn toggle(&self) -> Self {
        match self {
            Route::Home => Route::Team,
            Route::Team => Route::Home,
        }
    }
}

/// Tracks the current route. No terminal state.
#[derive(Debug, Clone, Default)]
pub struct Router {
    current: Route,
    fragment: Option<String>,
}

impl Router {
    /// Start at `fragment`, or home when there is none.
    pub fn new(fragment: Option<&str>) -> Self {
        let fragment = fragment
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .unwrap_or(Route::Home.fragment());
        Self {
            current: Route::from_fragment(Some(fragment)),
            fragment: Some(fragment.to_string()),
        }
    }

    pub fn current(&self) -> Route {
        self.current
    }

    /// The fragment as navigated, which may not be a known route
    pub fn fragment(&self) -> &str {
        self.fragment.as_deref().unwrap_or(Route::Home.fragment())
    }

    /// Navigate to `fragment` and return the view to render.
    /// Re-navigating to the current fragment still renders.
    pub fn navigate(&mut self, fragment: &str) -> Route {
        self.fragment = Some(fragment.to_string());
        self.current = Route::from_fragment(Some(fragment));
        self.current
    }

    /// Team changed: re-render only when the team view is showing.
    pub fn on_team_changed(&self) -> Option<Route> {
        (self.current == Route::Team).then_some(Route::Team)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_route() {
        assert_eq!(Router::new(None).current(), Route::Home);
        assert_eq!(Router::new(None).fragment(), "#home");
        assert_eq!(Router::new(Some("")).current(), Route::Home);
        assert_eq!(Router::new(Some("#team")).current(), Route::Team);
        assert_eq!(Router::new(Some("#home")).current(), Route::Home);
    }

    #[test]
    fn test_unknown_fragment_renders_home() {
        let mut router = Router::new(Some("#team"));
        assert_eq!(router.navigate("#pokemon/25"), Route::Home);
        assert_eq!(router.fragment(), "#pokemon/25");
    }

    #[test]
    fn test_navigate_transitions() {
        let mut router = Router::new(None);
        assert_eq!(router.navigate("#team"), Route::Team);
        assert_eq!(router.current(), Route::Team);
        assert_eq!(router.navigate(Route::Home.fragment()), Route::Home);
        assert_eq!(router.navigate(router.current().toggle().fragment()), Route::Team);
    }

    #[test]
    fn test_team_change_rerenders_only_team_view() {
        let mut router = Router::new(None);
        assert_eq!(router.on_team_changed(), None);

        router.navigate("#team");
        assert_eq!(router.on_team_changed(), Some(Route::Team));
        assert_eq!(router.current(), Route::Team);
    }
}
