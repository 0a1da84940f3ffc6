//! Identifier generation
//!
//! Two flavours:
//! - short ids: lowercase hex, 8 characters by default, used for fields,
//!   options, grid rows/columns and sections
//! - document ids: RFC 4122 version 4 UUIDs
//!
//! Both read from the operating system's random source. When that source
//! fails the generator switches to a seeded PRNG and keeps going; the ids stay
//! well formed, they are just easier to predict.

use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

const HEX: &[u8; 16] = b"0123456789abcdef";

static FALLBACK_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Which random source produced a batch of bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entropy {
    /// Bytes came from the requested source
    Secure,
    /// Requested source failed, bytes came from a seeded PRNG
    Degraded,
}

/// Fill `buf` from `source`, falling back to a time-seeded PRNG on failure.
pub fn fill_random<R: RngCore + ?Sized>(source: &mut R, buf: &mut [u8]) -> Entropy {
    match source.try_fill_bytes(buf) {
        Ok(()) => Entropy::Secure,
        Err(err) => {
            tracing::warn!("secure random source unavailable, using PRNG: {}", err);
            fallback_rng().fill_bytes(buf);
            Entropy::Degraded
        }
    }
}

fn fallback_rng() -> StdRng {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    // Counter keeps two calls within the same clock tick apart.
    let bump = FALLBACK_COUNTER.fetch_add(1, Ordering::Relaxed);
    StdRng::seed_from_u64(nanos ^ bump.rotate_left(32))
}

/// Short identifier generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdGenerator {
    length: usize,
}

impl IdGenerator {
    /// Default id length in hex characters
    pub const DEFAULT_LENGTH: usize = 8;

    /// Generator producing ids of the default length
    pub const fn new() -> Self {
        Self {
            length: Self::DEFAULT_LENGTH,
        }
    }

    /// Generator producing ids of `length` characters (minimum 1)
    pub fn with_length(length: usize) -> Self {
        Self {
            length: length.max(1),
        }
    }

    /// Configured id length
    pub fn length(&self) -> usize {
        self.length
    }

    /// Generate an id from the OS random source
    pub fn generate(&self) -> String {
        self.generate_with(&mut OsRng)
    }

    /// Generate an id from an explicit source
    pub fn generate_with<R: RngCore + ?Sized>(&self, source: &mut R) -> String {
        let mut bytes = vec![0u8; self.length];
        fill_random(source, &mut bytes);
        bytes
            .iter()
            .map(|b| HEX[(b & 0x0f) as usize] as char)
            .collect()
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// 8-character lowercase hex id
pub fn new_id() -> String {
    IdGenerator::new().generate()
}

/// Version 4 UUID for a whole document
pub fn new_document_id() -> String {
    document_id_with(&mut OsRng)
}

/// Version 4 UUID from an explicit source
pub fn document_id_with<R: RngCore + ?Sized>(source: &mut R) -> String {
    let mut bytes = [0u8; 16];
    fill_random(source, &mut bytes);
    uuid::Builder::from_random_bytes(bytes)
        .into_uuid()
        .to_string()
}
