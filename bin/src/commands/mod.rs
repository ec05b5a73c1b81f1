//! CLI command implementations.

pub(crate) mod bars;
pub(crate) mod inspect;
