//! Step definitions for user role hierarchy scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
