use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Derives the stored credential form of a PIN.
///
/// Deterministic and compared only for equality, never reversed. This is a
/// plain non-salted digest, kept for parity with the branch's historical
/// records; it is not a real password-storage scheme.
pub fn hash_pin(pin: &str) -> String {
    let mut hasher = DefaultHasher::new();
    pin.hash(&mut hasher);
    hasher.finish().to_string()
}

/// Minimal strength policy: exactly 4 characters, not all identical.
///
/// Deliberately narrow. Ascending sequences ("1234") and repeated pairs
/// ("1212") pass; widening the policy would invalidate existing PINs.
pub fn is_strong_pin(pin: &str) -> bool {
    let mut chars = pin.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return false,
    };
    if pin.chars().count() != 4 {
        return false;
    }
    !pin.chars().all(|c| c == first)
}
