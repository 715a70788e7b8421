//! CLI module
//!
//! This module provides the interactive interface for Model-Forge: the
//! popup menu, the column type menu and the session loop that drives them.

pub mod fields;
pub mod menu;
pub mod session;

// Re-exports
pub use menu::Menu;
pub use session::{Selection, Session};
