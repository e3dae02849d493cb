//! Config module

mod constants;
mod env;

pub use constants::*;
pub use env::Config;
