//! Patch types for partial updates.
//!
//! Each patch struct has `Option` fields. Only `Some` fields generate SET
//! clauses in the dynamic UPDATE SQL; a patch with no fields set is a no-op
//! that returns the entity unchanged. Patches deserialize directly from the
//! HTTP request body, and unknown fields are ignored.

pub mod category;
pub mod question;

use serde::{Deserialize, Deserializer};

/// Deserialize a present field (including `null`) as `Some`.
///
/// Combined with `#[serde(default)]` on an `Option<Option<T>>` this tells an
/// absent field (`None`) apart from an explicit `null` (`Some(None)`).
pub(crate) fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
