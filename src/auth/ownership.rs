//! Pure ownership predicate, free of storage side effects so it can be
//! unit-tested in isolation.

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Forbidden;

impl From<Forbidden> for AppError {
    fn from(_: Forbidden) -> Self {
        AppError::Forbidden
    }
}

/// A resource may only be mutated by its owner. Anonymous requesters are
/// always rejected.
pub fn require_owner(requester: Option<&str>, owner_id: &str) -> Result<(), Forbidden> {
    match requester {
        Some(id) if id == owner_id => Ok(()),
        _ => Err(Forbidden),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_is_allowed() {
        assert_eq!(require_owner(Some("u1"), "u1"), Ok(()));
    }

    #[test]
    fn other_user_is_forbidden() {
        assert_eq!(require_owner(Some("u2"), "u1"), Err(Forbidden));
    }

    #[test]
    fn anonymous_is_forbidden() {
        assert_eq!(require_owner(None, "u1"), Err(Forbidden));
    }

    #[test]
    fn empty_ids_do_not_match_by_accident() {
        assert_eq!(require_owner(Some(""), "u1"), Err(Forbidden));
    }
}
