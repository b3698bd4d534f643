//! Route handlers, grouped by resource.

pub(crate) mod categories;
pub(crate) mod meta;
pub(crate) mod questions;
