//! Join planning: resolves join conditions over two inputs and assembles join
//! nodes with the physical facts a distributed planner needs.
mod builder;
mod error;
pub mod join;
pub mod plan;
mod source;
pub mod typing;

pub use {
    error::{Error, Result},
    source::{DataSourceInfo, SourceColumn},
};

use {def::catalog::DatabaseCatalog, typing::ExprTyper};

pub struct Planner<'a, D: DatabaseCatalog> {
    db_catalog: &'a D,
    checker: ExprTyper,
}

impl<'a, D: DatabaseCatalog> Planner<'a, D> {
    pub fn new(db_catalog: &'a D) -> Self {
        Self {
            db_catalog,
            checker: ExprTyper,
        }
    }

    pub fn db_catalog(&self) -> &D {
        self.db_catalog
    }
}
