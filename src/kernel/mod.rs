//! The reduction engine:
//! abstract machine, rule matching, conversion, and
//! normalisation strategies.

pub mod convertible;
mod eval;
mod matching;
mod reduce;


pub use convertible::eq_modulo;
pub use eval::{eval, Config, Strategy};
