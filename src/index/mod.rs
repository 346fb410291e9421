//! Secondary indexes

pub mod property_index;

pub use property_index::{NodeQuery, PropertyIndex};
