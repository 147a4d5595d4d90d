//! Result type alias for engine operations

use crate::error::WeftError;

/// Standard Result type for engine operations
pub type Result<T> = std::result::Result<T, WeftError>;

/// Batch-level handling of per-tree results
pub trait ResultExt<T> {
    /// Turn a recoverable failure into `Ok(None)`, logging it
    ///
    /// Fatal errors (cancellation, unsupported kinds, registry and config
    /// errors) still propagate.
    fn recoverable(self) -> Result<Option<T>>;
}

impl<T> ResultExt<T> for Result<T> {
    fn recoverable(self) -> Result<Option<T>> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_recoverable() => {
                tracing::warn!("Skipping tree: {}", err);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::NodeLocation;

    #[test]
    fn test_recoverable_passes_through_fatal() {
        let fatal: Result<()> = Err(WeftError::Cancelled { pass: 1 });
        assert!(fatal.recoverable().is_err());

        let soft: Result<()> = Err(WeftError::malformed_tree(NodeLocation::root(), "depth"));
        assert!(matches!(soft.recoverable(), Ok(None)));

        let ok: Result<u32> = Ok(3);
        assert_eq!(ok.recoverable().ok().flatten(), Some(3));
    }
}
