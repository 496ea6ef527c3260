//! Year-filtered aggregation over California avocado crop statistics.
//!
//! The [`data`] module is the whole pipeline: load a [`data::Table`] once,
//! then call [`data::aggregate`] for every [`data::Selector`] the user picks.
//! The egui front-end in `main.rs` only renders what that call returns.

pub mod config;
pub mod data;
