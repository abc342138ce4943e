//! # Random Number Generation Infrastructure
//!
//! This module provides the random number facilities consumed by the trial
//! move generators and the update order generator.
//!
//! ## Design Rationale
//!
//! - **Keyed streams**: every draw comes from a generator built from an
//!   explicit [`StreamKey`] `(seed, sweep, particle, stage)`. There is no
//!   shared running generator, so particles may be processed in any order
//!   or on any thread and still reproduce the same proposals.
//! - **Static dispatch**: consumers are generic over `rand::RngCore`; no
//!   `Box<dyn Trait>` in hot paths.
//! - **Unbiased integer selection**: [`select_index`] rejects the remainder of
//!   the 32-bit range instead of reducing modulo the range size.
//!
//! ## Module Structure
//!
//! - [`stream`]: keyed generator [`MoveRng`] and its [`StreamKey`]
//! - [`select`]: bias-free bounded integer selection
//!
//! ## Usage Example
//!
//! ```rust
//! use hpmc_moves::rng::{select_index, MoveRng, Stage, StreamKey};
//!
//! let key = StreamKey::new(42, 1000, 7, Stage::MOVE_KIND);
//! let mut rng = MoveRng::from_key(key);
//!
//! let u = rng.gen_uniform();
//! assert!((0.0..1.0).contains(&u));
//!
//! let k = select_index(&mut rng, 5);
//! assert!(k <= 5);
//! ```

pub mod select;
pub mod stream;

pub use select::{select_index, select_index_usize};
pub use stream::{MoveRng, Stage, StreamKey};
