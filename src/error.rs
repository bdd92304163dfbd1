/// Errors reported by the trees in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A strict removal named a key the tree doesn't contain. The tree is unchanged.
    #[error("key not found")]
    KeyNotFound,
}

/// Shorthand for results whose error is [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
