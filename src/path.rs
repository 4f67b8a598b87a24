//! Key Path Module
//!
//! Joins hierarchical path segments into the literal store key.

/// Joins path segments with `.` into a single store key.
///
/// No escaping or validation is applied: two segment sequences that produce
/// the same joined string address the same key (`["a.b"]` collides with
/// `["a", "b"]`). The joined form is the on-the-wire key, so other systems
/// sharing the store can address the same values through it.
pub fn join(segments: &[&str]) -> String {
    segments.join(".")
}
