//! Who is acting
//!
//! Every gateway and policy call receives a `Session` explicitly. A guest
//! session carries no user; authenticated sessions carry the actor and their
//! role is encoded in the variant, so a "staff guest" cannot be expressed.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::identifiers::UserId;

/// Role of the actor behind a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Unauthenticated visitor of the site
    Guest,
    /// Signed-in user who may claim items
    Visitor,
    /// Signed-in staff member managing items and claims
    Staff,
}

impl Role {
    /// Wire name of the role (`GUEST`, `VISITOR`, `STAFF`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Guest => "GUEST",
            Role::Visitor => "VISITOR",
            Role::Staff => "STAFF",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: UserId,
    pub username: String,
}

impl Actor {
    pub fn new(id: UserId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }
}

/// The acting party for a single call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    Guest,
    Visitor(Actor),
    Staff(Actor),
}

impl Session {
    pub fn role(&self) -> Role {
        match self {
            Session::Guest => Role::Guest,
            Session::Visitor(_) => Role::Visitor,
            Session::Staff(_) => Role::Staff,
        }
    }

    pub fn actor(&self) -> Option<&Actor> {
        match self {
            Session::Guest => None,
            Session::Visitor(actor) | Session::Staff(actor) => Some(actor),
        }
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.actor().map(|a| a.id)
    }

    pub fn is_staff(&self) -> bool {
        matches!(self, Session::Staff(_))
    }

    /// Label used in logs and operation metadata
    pub fn audit_name(&self) -> String {
        match self.actor() {
            Some(actor) => format!("{}:{}", self.role(), actor.id),
            None => "anonymous".to_string(),
        }
    }
}
