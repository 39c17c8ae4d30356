//! Business logic services.

pub mod collection;
pub mod drama;
pub mod links;
pub mod note;
pub mod seed;
