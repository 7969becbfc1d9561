//! Use cases orchestrating domain logic through the ports.

pub mod map_filters;
pub mod run_turn;
pub mod shared;
