// src/core/mod.rs

pub mod config;
pub mod ranking;
pub mod resolver;
pub mod scanner;
pub mod template;
