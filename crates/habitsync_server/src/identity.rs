//! The identity boundary.
//!
//! Credential issuance and verification live in a collaborating
//! subsystem. By the time a request reaches a handler, that subsystem
//! has either produced an authenticated [`Caller`] or nothing; every
//! protected handler rejects the latter with an unauthenticated error.

use crate::error::{ApiError, ApiResult};

/// An authenticated caller, as supplied by the identity subsystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    /// The caller's stable user identifier.
    pub uid: String,
}

impl Caller {
    /// Creates a caller for `uid`.
    pub fn new(uid: impl Into<String>) -> Self {
        Self { uid: uid.into() }
    }
}

/// Requires an authenticated caller, failing the request otherwise.
pub fn require_caller(caller: Option<&Caller>) -> ApiResult<&Caller> {
    caller.ok_or_else(|| ApiError::Unauthenticated("caller identity missing".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_caller_is_unauthenticated() {
        let result = require_caller(None);
        assert!(matches!(result, Err(ApiError::Unauthenticated(_))));
    }

    #[test]
    fn present_caller_passes_through() {
        let caller = Caller::new("u1");
        assert_eq!(require_caller(Some(&caller)).unwrap().uid, "u1");
    }
}
