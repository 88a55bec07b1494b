pub mod cli;
pub mod common;
pub mod hmm;
pub mod io;
pub mod prelude;
pub mod prob;

#[macro_use]
extern crate approx;
