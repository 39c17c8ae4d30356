//! Resource models, query parameters and pagination primitives.

pub mod drama;
pub mod links;
pub mod note;
pub mod pagination;
pub mod query;
