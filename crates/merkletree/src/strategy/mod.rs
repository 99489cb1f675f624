//! Hash strategies used to combine child hashes into parent hashes.
//!
//! A [`HashStrategy`] is a named, cheaply clonable handle that produces a
//! fresh [`StrategyHasher`] on demand. Strategies are resolved by name through
//! [`resolve`]; the built-in ones are listed in [`NamedStrategy`] and
//! [`NamedStrategy::Sha256`] is the default.
//!
//! ```
//! use merkletree::strategy::{HashStrategy, resolve};
//!
//! let strategy = resolve("sha256").unwrap();
//! assert_eq!(strategy, HashStrategy::default());
//!
//! let mut hasher = strategy.hasher();
//! hasher.write(b"left");
//! hasher.write(b"right");
//! assert_eq!(hasher.sum(), strategy.hasher().combine(b"left", b"right"));
//! ```

pub mod error;
pub mod keccak;
pub mod named;
pub mod registry;

pub use error::StrategyError;
pub use keccak::Keccak256;
pub use named::NamedStrategy;
pub use registry::{register_digest, register_strategy, registered_strategies, resolve};

use bytes::Bytes;
use digest::DynDigest;
use std::fmt;
use std::io;
use std::sync::Arc;

pub(crate) type HasherFactory = Arc<dyn Fn() -> Box<dyn DynDigest + Send + Sync> + Send + Sync>;

/// A named hash strategy.
///
/// Built-in strategies compare equal by name. Custom strategies must also
/// come from the same registration: replacing a custom strategy through
/// [`register_strategy`] makes handles resolved before and after unequal.
#[derive(Clone)]
pub struct HashStrategy {
    name: Arc<str>,
    factory: HasherFactory,
}

impl HashStrategy {
    pub(crate) fn from_factory(name: &str, factory: HasherFactory) -> Self {
        Self {
            name: Arc::from(name),
            factory,
        }
    }

    /// Resolve a strategy by name, see [`resolve`].
    pub fn from_name(name: &str) -> Result<Self, StrategyError> {
        resolve(name)
    }

    /// The name the strategy was resolved under.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Create a fresh, independent hasher.
    #[inline]
    pub fn hasher(&self) -> StrategyHasher {
        StrategyHasher {
            inner: (self.factory)(),
        }
    }

    /// Digest length in bytes.
    pub fn output_size(&self) -> usize {
        (self.factory)().output_size()
    }

    /// Hash `data` in one shot.
    pub fn digest(&self, data: &[u8]) -> Bytes {
        let mut hasher = self.hasher();
        hasher.write(data);
        hasher.sum()
    }

    /// Hash the concatenation `left ++ right`.
    pub fn combine(&self, left: &[u8], right: &[u8]) -> Bytes {
        self.hasher().combine(left, right)
    }
}

impl Default for HashStrategy {
    #[inline]
    fn default() -> Self {
        NamedStrategy::default().into()
    }
}

impl From<NamedStrategy> for HashStrategy {
    fn from(named: NamedStrategy) -> Self {
        Self::from_factory(named.as_str(), Arc::new(move || named.new_hasher()))
    }
}

impl PartialEq for HashStrategy {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && (self.name.parse::<NamedStrategy>().is_ok()
                || Arc::ptr_eq(&self.factory, &other.factory))
    }
}

impl Eq for HashStrategy {}

impl fmt::Debug for HashStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HashStrategy").field(&self.name).finish()
    }
}

impl fmt::Display for HashStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Streaming hasher produced by a [`HashStrategy`].
///
/// Bytes are fed with [`write`](Self::write) and the digest is taken with
/// [`sum`](Self::sum), which also resets the hasher for reuse.
pub struct StrategyHasher {
    inner: Box<dyn DynDigest + Send + Sync>,
}

impl StrategyHasher {
    /// Feed bytes into the hasher
    #[inline]
    pub fn write(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    /// Finalize, returning the digest and resetting the hasher
    #[inline]
    #[must_use]
    pub fn sum(&mut self) -> Bytes {
        Bytes::from(self.inner.finalize_reset())
    }

    /// Hash `left ++ right` with no separator
    #[inline]
    pub fn combine(&mut self, left: &[u8], right: &[u8]) -> Bytes {
        self.inner.update(left);
        self.inner.update(right);
        self.sum()
    }

    /// Digest length in bytes
    #[inline]
    pub fn output_size(&self) -> usize {
        self.inner.output_size()
    }
}

impl fmt::Debug for StrategyHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrategyHasher")
            .field("output_size", &self.output_size())
            .finish_non_exhaustive()
    }
}

impl io::Write for StrategyHasher {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.update(buf);
        Ok(buf.len())
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{hex, keccak256};
    use sha2::{Digest, Sha256};

    #[test]
    fn test_default_is_sha256() {
        let strategy = HashStrategy::default();
        assert_eq!(strategy.name(), "sha256");
        assert_eq!(strategy.output_size(), 32);
        assert_eq!(
            hex::encode(strategy.digest(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_combine_is_concatenation() {
        let strategy = HashStrategy::default();
        assert_eq!(
            strategy.combine(b"Hel", b"lo").as_ref(),
            Sha256::digest(b"Hello").as_slice()
        );
        assert_ne!(strategy.combine(b"a", b"b"), strategy.combine(b"b", b"a"));
    }

    #[test]
    fn test_hashers_are_independent() {
        let strategy = HashStrategy::default();
        let mut first = strategy.hasher();
        let mut second = strategy.hasher();

        first.write(b"only in first");
        second.write(b"abc");

        assert_eq!(second.sum(), strategy.digest(b"abc"));
        assert_eq!(first.sum(), strategy.digest(b"only in first"));
    }

    #[test]
    fn test_sum_resets() {
        let mut hasher = HashStrategy::default().hasher();
        hasher.write(b"abc");
        let first = hasher.sum();
        hasher.write(b"abc");
        assert_eq!(first, hasher.sum());
    }

    #[test]
    fn test_io_write() {
        let strategy: HashStrategy = NamedStrategy::Keccak256.into();
        let mut hasher = strategy.hasher();
        assert_eq!(io::Write::write(&mut hasher, b"hello ").unwrap(), 6);
        io::Write::write_all(&mut hasher, b"world").unwrap();

        assert_eq!(hasher.sum().as_ref(), keccak256(b"hello world").as_slice());
    }

    #[test]
    fn test_equality_by_name() {
        let a: HashStrategy = NamedStrategy::Sha512.into();
        let b = resolve("SHA512").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, HashStrategy::default());
        assert_eq!(a.to_string(), "sha512");
        assert_eq!(a.output_size(), 64);
    }
}
