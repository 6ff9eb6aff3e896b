//! AI components

pub mod agent;
pub mod modules;

#[cfg(test)]
mod modules_tests;

// Re-export all components
pub use agent::*;
pub use modules::*;
