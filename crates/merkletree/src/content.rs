//! The content capability stored at the leaves of a tree.
//!
//! The tree never interprets content itself: every item knows how to hash
//! itself and how to compare itself against another item of the same type.

use bytes::Bytes;
use thiserror::Error;

/// Boxed error type used as the optional cause of content failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Contract every leaf item must satisfy.
///
/// The hash returned by [`Content::calculate_hash`] becomes the leaf hash as
/// is. It is independent from the tree's [`HashStrategy`](crate::HashStrategy),
/// but proofs only line up if callers keep the two consistent.
///
/// ```
/// use bytes::Bytes;
/// use merkletree::{CompareError, Content, HashError};
/// use sha2::{Digest, Sha256};
///
/// #[derive(Debug, Clone)]
/// struct Word(String);
///
/// impl Content for Word {
///     fn calculate_hash(&self) -> Result<Bytes, HashError> {
///         Ok(Bytes::copy_from_slice(&Sha256::digest(self.0.as_bytes())))
///     }
///
///     fn equals(&self, other: &Self) -> Result<bool, CompareError> {
///         Ok(self.0 == other.0)
///     }
/// }
/// ```
pub trait Content {
    /// Hash this item.
    fn calculate_hash(&self) -> Result<Bytes, HashError>;

    /// Compare this item against another one.
    fn equals(&self, other: &Self) -> Result<bool, CompareError>;
}

/// A content item failed to hash itself.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct HashError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl HashError {
    /// Create a hashing error with a message.
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Create a hashing error caused by another error.
    pub fn with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: Into<BoxError>,
    {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// The error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A content item failed to compare itself against another item.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct CompareError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl CompareError {
    /// Create a comparison error with a message.
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Create a comparison error caused by another error.
    pub fn with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: Into<BoxError>,
    {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// The error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_hash_error_source() {
        let io = std::io::Error::other("disk on fire");
        let err = HashError::with_source("could not read blob", io);

        assert_eq!(err.to_string(), "could not read blob");
        assert_eq!(err.message(), "could not read blob");
        assert_eq!(err.source().unwrap().to_string(), "disk on fire");
    }

    #[test]
    fn test_compare_error_without_source() {
        let err = CompareError::new("type mismatch");
        assert_eq!(err.to_string(), "type mismatch");
        assert!(err.source().is_none());
    }
}
