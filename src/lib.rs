mod dimacs;
mod error;
mod solver;

pub use dimacs::Dimacs;
pub use error::Error;
pub use solver::{Lit, Model, Result, Solver, Stats, Var};
