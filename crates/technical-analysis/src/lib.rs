pub mod generator;
pub mod signals;

#[cfg(test)]
mod generator_tests;

pub use generator::*;
pub use signals::*;
