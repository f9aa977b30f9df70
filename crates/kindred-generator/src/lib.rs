//! Procedural population growth for the Kindred family tree.
//!
//! A [`Generator`] repeatedly picks a random person and gives them a new
//! relationship (parents, a spouse or a child) until the store holds the
//! requested number of persons. All randomness comes from an injected
//! [`rand::Rng`] and [`NameSource`], so runs are reproducible from a seed.

mod generator;
pub mod names;

pub use generator::{GenerationReport, Generator, GeneratorConfig};
pub use names::{NameSource, RandomNames};
