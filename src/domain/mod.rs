//! Domain layer - Todo items

pub mod item;

pub use item::{Item, TodoId};
