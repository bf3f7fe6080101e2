//! # appfind
//!
//! A universal app finder and wrapper. Discovers every installed version of an
//! application on disk from path templates with `{token}` placeholders, ranks
//! the discovered versions, and launches the best (or a requested) one.

pub mod cli;
pub mod constants;
pub mod core;
pub mod models;
pub mod system;
