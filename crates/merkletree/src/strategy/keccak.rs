//! Keccak-256 exposed through the RustCrypto `digest` traits.
//!
//! alloy's [`Keccak256`](alloy_primitives::Keccak256) has its own API; this
//! wrapper makes it usable wherever a [`digest::DynDigest`] is expected.

use alloy_primitives::Keccak256 as AlloyKeccak256;
use digest::{FixedOutput, FixedOutputReset, HashMarker, OutputSizeUser, Reset, Update};
use generic_array::{GenericArray, typenum::U32};

/// Streaming Keccak-256 hasher
#[derive(Clone)]
pub struct Keccak256 {
    inner: AlloyKeccak256,
}

impl core::fmt::Debug for Keccak256 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Keccak256").finish_non_exhaustive()
    }
}

impl Default for Keccak256 {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Keccak256 {
    /// Create a new hasher
    #[inline]
    pub fn new() -> Self {
        Self {
            inner: AlloyKeccak256::new(),
        }
    }
}

impl OutputSizeUser for Keccak256 {
    type OutputSize = U32;
}

impl Update for Keccak256 {
    #[inline]
    fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }
}

impl Reset for Keccak256 {
    #[inline]
    fn reset(&mut self) {
        self.inner = AlloyKeccak256::new();
    }
}

impl FixedOutput for Keccak256 {
    #[inline]
    fn finalize_into(self, out: &mut GenericArray<u8, Self::OutputSize>) {
        out.copy_from_slice(self.inner.finalize().as_slice());
    }
}

impl FixedOutputReset for Keccak256 {
    #[inline]
    fn finalize_into_reset(&mut self, out: &mut GenericArray<u8, Self::OutputSize>) {
        let inner = std::mem::replace(&mut self.inner, AlloyKeccak256::new());
        out.copy_from_slice(inner.finalize().as_slice());
    }
}

impl HashMarker for Keccak256 {}
