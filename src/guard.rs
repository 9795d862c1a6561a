//! Plan gating for panel routes
//!
//! Routes on the exempt list are always reachable. Everything else requires
//! an unexpired purchased plan. The decision is made fresh on every call.

use tracing::debug;

/// Routes reachable without an active plan
pub const EXEMPT_ROUTES: &[&str] = &[
    "/dashboard",
    "/payment",
    "/plans",
    "/auth",
    "/login",
    "/register",
    "/notifications",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Proceed(String),
    /// Show the purchase prompt instead of navigating
    PlanRequired { requested: String },
}

#[derive(Debug, Clone)]
pub struct PlanGuard {
    exempt: Vec<String>,
}

impl Default for PlanGuard {
    fn default() -> Self {
        Self::new(EXEMPT_ROUTES.iter().map(|r| r.to_string()).collect())
    }
}

impl PlanGuard {
    pub fn new(exempt: Vec<String>) -> Self {
        Self { exempt }
    }

    /// Exact match or a match on whole leading path segments
    pub fn is_exempt(&self, path: &str) -> bool {
        let path = normalize(path);
        self.exempt.iter().any(|prefix| {
            let prefix = normalize(prefix);
            path == prefix
                || (path.starts_with(&prefix) && path.as_bytes().get(prefix.len()) == Some(&b'/'))
        })
    }

    pub fn check(&self, path: &str, has_active_plan: bool) -> Navigation {
        let target = normalize(path);
        if has_active_plan || self.is_exempt(&target) {
            Navigation::Proceed(target)
        } else {
            debug!(route = %target, "blocked: no active plan");
            Navigation::PlanRequired { requested: target }
        }
    }
}

fn normalize(path: &str) -> String {
    let trimmed = path.trim().trim_end_matches('/');
    let lowered = trimmed.to_lowercase();
    if lowered.starts_with('/') {
        lowered
    } else {
        format!("/{}", lowered)
    }
}
