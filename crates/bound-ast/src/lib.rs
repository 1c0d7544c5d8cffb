//! Expressions whose column references are bound to input ordinals and whose types are known.
mod expr;

pub use expr::*;
