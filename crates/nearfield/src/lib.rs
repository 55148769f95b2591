//! # Nearfield
//!
//! Flat proximity index for fixed-capacity radius queries over 2D entities.
//!
//! Nearfield is the broad-phase half of the battlefield's targeting stack:
//! behaviors hand it an origin, a radius, and a caller-owned buffer, and get
//! back the keys of everything inside the circle. All scoring and filtering
//! of the results stays with the caller.
//!
//! Design points:
//!
//! - **Deterministic**: positions live in a `BTreeMap`, so scans visit keys
//!   in sorted order and two identical indexes always answer identically.
//! - **Allocation-free queries**: [`ProximityIndex::query_into`] writes into
//!   a caller-owned slice and never allocates; overflow is truncated, not an
//!   error.
//! - **No candidate ranking**: the index answers "who is near", never "who
//!   is best" — that is the caller's scoring problem.
//!
//! ## Quick Start
//!
//! ```rust
//! use glam::Vec2;
//! use nearfield::ProximityIndex;
//!
//! let mut index = ProximityIndex::new();
//! index.insert(1u64, Vec2::new(0.0, 0.0));
//! index.insert(2u64, Vec2::new(40.0, 0.0));
//! index.insert(3u64, Vec2::new(500.0, 0.0));
//!
//! let mut scratch = [0u64; 8];
//! let hits = index.query_into(Vec2::ZERO, 100.0, &mut scratch);
//! assert_eq!(&scratch[..hits], &[1, 2]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod index;

pub use index::ProximityIndex;
