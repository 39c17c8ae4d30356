//! Request middleware and extractors.

pub mod accept;
pub mod extractors;
