//! Request context carrying the authenticated caller and their program scope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Context for the current authenticated request.
///
/// Extracted from the identity provider's token by middleware and passed
/// into service methods so that every operation knows *who* is acting and
/// *which* academic programs they may see. Archiva never issues tokens of
/// its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// Stable subject identifier from the token (`sub` claim).
    pub subject: String,
    /// Display name of the caller.
    pub username: String,
    /// Academic programs the caller belongs to. Empty means the caller
    /// only sees unscoped folders.
    pub program_ids: Vec<i64>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(subject: String, username: String, program_ids: Vec<i64>) -> Self {
        Self {
            subject,
            username,
            program_ids,
            request_time: Utc::now(),
        }
    }

    /// The caller's program, when they belong to exactly one.
    ///
    /// Used as the default scope for newly created folders.
    pub fn single_program(&self) -> Option<i64> {
        match self.program_ids.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }
}
