// SPDX-FileCopyrightText: 2026 Purrview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Route guard: allow or redirect a navigation based on the session alone.
//!
//! Decisions read [`SessionStore::read`] synchronously and perform no I/O.
//! Performing the redirect is the caller's job.

use std::collections::HashMap;
use std::sync::Arc;

use purrview_config::model::RoutesConfig;
use tracing::debug;

use crate::store::SessionStore;

/// Access policy attached to a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutePolicy {
    /// Only reachable with an authenticated session.
    RequiresAuthenticated,
    /// Only reachable without one (login, register).
    RequiresAnonymous,
    /// Reachable by anyone.
    Public,
}

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Deny { redirect_to: String },
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }

    /// Redirect target of a denial.
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            GuardDecision::Allow => None,
            GuardDecision::Deny { redirect_to } => Some(redirect_to),
        }
    }
}

/// Synchronous guard over a [`SessionStore`].
#[derive(Debug, Clone)]
pub struct RouteGuard {
    session: Arc<SessionStore>,
    login_path: String,
    landing_path: String,
    policies: HashMap<String, RoutePolicy>,
}

impl RouteGuard {
    /// Builds a guard whose route table comes from `[routes]`.
    pub fn new(session: Arc<SessionStore>, routes: &RoutesConfig) -> Self {
        let mut policies = HashMap::new();
        for path in &routes.protected {
            policies.insert(normalize(path).to_string(), RoutePolicy::RequiresAuthenticated);
        }
        for path in &routes.anonymous_only {
            policies.insert(normalize(path).to_string(), RoutePolicy::RequiresAnonymous);
        }
        Self {
            session,
            login_path: routes.login_path.clone(),
            landing_path: routes.landing_path.clone(),
            policies,
        }
    }

    /// `requires_auth == true` guards a protected destination; `false`
    /// guards an anonymous-only one.
    pub fn can_enter(&self, requires_auth: bool) -> GuardDecision {
        if requires_auth {
            self.evaluate(RoutePolicy::RequiresAuthenticated)
        } else {
            self.evaluate(RoutePolicy::RequiresAnonymous)
        }
    }

    /// Applies `policy` to the current session.
    pub fn evaluate(&self, policy: RoutePolicy) -> GuardDecision {
        let authenticated = self.session.read().is_authenticated();
        match (policy, authenticated) {
            (RoutePolicy::RequiresAuthenticated, false) => GuardDecision::Deny {
                redirect_to: self.login_path.clone(),
            },
            (RoutePolicy::RequiresAnonymous, true) => GuardDecision::Deny {
                redirect_to: self.landing_path.clone(),
            },
            _ => GuardDecision::Allow,
        }
    }

    /// Policy attached to `path`; unlisted paths are [`RoutePolicy::Public`].
    pub fn policy_for(&self, path: &str) -> RoutePolicy {
        self.policies
            .get(normalize(path))
            .copied()
            .unwrap_or(RoutePolicy::Public)
    }

    /// Resolves the policy for `path` and applies it.
    ///
    /// The root path always redirects: to the login page when anonymous,
    /// to the landing page when authenticated.
    pub fn check(&self, path: &str) -> GuardDecision {
        let path = normalize(path);
        let decision = if path == "/" {
            let redirect_to = if self.session.is_authenticated() {
                self.landing_path.clone()
            } else {
                self.login_path.clone()
            };
            GuardDecision::Deny { redirect_to }
        } else {
            self.evaluate(self.policy_for(path))
        };
        debug!(path, ?decision, "route guard decision");
        decision
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn landing_path(&self) -> &str {
        &self.landing_path
    }
}

/// Strips query, fragment and trailing slashes; `""` becomes `/`.
fn normalize(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}
