//! Utility helpers

pub mod lenient;
