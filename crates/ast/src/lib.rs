mod common;
pub mod expr;
mod stmt;
pub mod token;

pub use crate::{common::*, stmt::*};

#[derive(Debug, PartialEq)]
pub enum Statement {
    Select(Query),
}
