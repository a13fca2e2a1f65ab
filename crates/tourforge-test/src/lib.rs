//! Shared test fixtures for TourForge crates.
//!
//! This crate provides hand-built distance matrices with known optima and
//! seeded random instances for property-style tests.
//!
//! - [`matrices`] - small matrices whose tours are worked out by hand
//! - [`random`] - reproducible random matrices
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! tourforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use tourforge_test::matrices::square_cycle_matrix;
//! use tourforge_test::random::random_matrix;
//! ```

pub mod matrices;
pub mod random;

pub use matrices::{distinct_four_matrix, join_five_matrix, ring_matrix, square_cycle_matrix};
pub use random::{is_permutation, random_matrix};
