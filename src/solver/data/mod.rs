mod litvec;
mod var;

pub use litvec::LitVec;
pub(crate) use var::MAX_VARS;
pub use var::{Lit, Var};
