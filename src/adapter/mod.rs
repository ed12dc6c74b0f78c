//! Implementations of ports (hexagonal adapters).

pub mod catalog;
pub mod hypixel;
pub mod presenter;
