//! Short correlation identifiers for grouping the log lines of one error batch

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;

const ID_BITS: u32 = 24;
const ID_MASK: u32 = (1 << ID_BITS) - 1;

static SEQUENCE: AtomicU32 = AtomicU32::new(0);
static KEY: OnceLock<u32> = OnceLock::new();

/// Six lowercase hex characters.
///
/// Identifiers are a keyed permutation of a process-wide counter: they look
/// random, and no value repeats within 2^24 consecutive calls. They are not
/// globally unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TraceId(String);

impl TraceId {
    /// Length of every generated identifier
    pub const LEN: usize = 6;

    pub fn generate() -> Self {
        let key = *KEY.get_or_init(rand::random::<u32>);
        let step = SEQUENCE.fetch_add(1, Ordering::Relaxed);

        let value = permute(step.wrapping_add(key) & ID_MASK) ^ ((key >> 8) & ID_MASK);
        Self(format!("{:06x}", value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TraceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Bijection on 24-bit values: xorshifts and odd multipliers are both invertible mod 2^24.
fn permute(mut x: u32) -> u32 {
    x ^= x >> 12;
    x = x.wrapping_mul(0x9e_3779) & ID_MASK;
    x ^= x >> 11;
    x = x.wrapping_mul(0x2c_1b3d) & ID_MASK;
    x ^= x >> 12;
    x
}
