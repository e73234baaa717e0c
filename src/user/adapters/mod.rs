//! Adapter implementations for user ports.

pub mod hasher;
pub mod jwt;
pub mod memory;
