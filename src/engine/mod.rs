//! DOM-free dashboard logic. Components render what these modules compute.

pub mod autocomplete;
pub mod debounce;
pub mod marginal;
pub mod ranking;
pub mod score;
pub mod session;
pub mod sweep;
