//! Mutation and crossover operators (spec §4.7).

mod crossover;
mod mutation;

pub use crossover::crossover;
pub use mutation::mutate;
