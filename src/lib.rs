//! Model-Forge Library
//!
//! This is the library interface for Model-Forge.
//! The main binary is in src/main.rs.

pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod generator;
pub mod naming;
