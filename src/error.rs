//! Errors returned by [`OrderedMap`][crate::OrderedMap] lookups.

use thiserror::Error;

/// The ways a map query can fail. Mutations (`insert`, `erase`, `clear`) never fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The requested key isn't stored in the map.
    #[error("key not found in map")]
    NotFound,
    /// The operation needs at least one entry but the map is empty.
    #[error("map is empty")]
    EmptyContainer,
}

/// Shorthand for results carrying an [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(Error::NotFound.to_string(), "key not found in map");
        assert_eq!(Error::EmptyContainer.to_string(), "map is empty");
    }
}
