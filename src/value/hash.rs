//! FNV-1a hashing for text values.
//!
//! [`TextValue`](super::TextValue) promises a hash that is a pure function of
//! the wrapped text, stable across calls and processes. The standard library's
//! default hasher is randomly seeded per process, so the digest is computed
//! with the 64-bit FNV-1a function instead and fed into whatever hasher the
//! surrounding collection uses.

/// FNV-1a 64-bit offset basis.
const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

/// FNV-1a 64-bit prime.
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Computes the 64-bit FNV-1a digest of `bytes`.
///
/// Equal inputs always produce equal digests; the function has no seed and no
/// process-dependent state.
///
/// # Examples
///
/// ```rust
/// use valtext::value::fnv1a_64;
///
/// assert_eq!(fnv1a_64(b""), 0xcbf29ce484222325);
/// assert_eq!(fnv1a_64(b"a"), fnv1a_64(b"a"));
/// assert_ne!(fnv1a_64(b"a"), fnv1a_64(b"b"));
/// ```
#[inline]
pub const fn fnv1a_64(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    let mut index = 0;
    while index < bytes.len() {
        hash ^= bytes[index] as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
        index += 1;
    }
    hash
}
