// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod config;
pub mod core;
pub mod diff;
pub mod error;
pub mod file;
pub mod notify;
pub mod progress;
pub mod record;
pub mod runner;
pub mod specs;
pub mod store;
