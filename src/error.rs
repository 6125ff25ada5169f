/// Errors raised for input-domain violations. Numeric edge cases are clamped
/// instead and never surface here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("a schedule needs at least 2 steps, got {0}")]
    InvalidStepCount(usize),
    #[error("unknown schedule shape `{0}` (expected linear, cosine, quadratic or sigmoid)")]
    UnknownShape(String),
    #[error("length mismatch: expected {expected} components, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

pub type Result<T> = core::result::Result<T, Error>;

/// Fails with [`Error::LengthMismatch`] unless `actual == expected`.
pub(crate) fn ensure_len(expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::LengthMismatch { expected, actual })
    }
}
