//! Crate-internal utilities.

/// Convenience macro for returning an error if a condition does not hold.
macro_rules! require {
    ( $cond:expr, $err:expr ) => {
        if !($cond) {
            return Err($err);
        }
    };
}
pub(crate) use require;
