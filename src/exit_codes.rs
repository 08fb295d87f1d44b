//! Exit code constants for the scour CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unreadable or malformed request file)
//! - 2: Invalid target or request (nothing was deleted)
//! - 3: Deletion failed (fail-fast mode, at least one path survived)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or an unreadable request file.
pub const USER_ERROR: i32 = 1;

/// Structural failure detected before any deletion began.
pub const INVALID_TARGET: i32 = 2;

/// One or more paths could not be deleted and `fail_on_error` was set.
pub const DELETION_FAILURE: i32 = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, USER_ERROR, INVALID_TARGET, DELETION_FAILURE];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn success_is_zero() {
        assert_eq!(SUCCESS, 0);
    }
}
