//! Buddy activities - read-side load accounting and directory search

pub mod capacity;
mod directory;

pub use capacity::{capacity_for, current_load, current_loads, has_capacity, utilization};
pub use directory::*;
