/// Rejected input grids.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("empty image (width={width}, height={height})")]
    EmptyImage { width: usize, height: usize },

    #[error("invalid buffer length (expected {expected} samples, got {got})")]
    BufferLength { expected: usize, got: usize },

    #[error("grid shape mismatch (expected {}x{}, got {}x{})", expected.0, expected.1, got.0, got.1)]
    ShapeMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },
}
