mod error;
mod explain;

pub use {
    error::{Error, Result},
    explain::explain,
};
