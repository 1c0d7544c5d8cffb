use snafu::prelude::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(super)))]
pub enum Error {
    #[snafu(display("failed to load catalog: {}", source))]
    Catalog {
        #[snafu(backtrace)]
        source: binder::Error,
    },

    #[snafu(display("{}", source))]
    Parse { source: parser::Error },

    #[snafu(display("{}", source))]
    Plan { source: planner::Error },

    #[snafu(display("no statement to explain"))]
    NoStatement,
}

pub type Result<T> = std::result::Result<T, Error>;
