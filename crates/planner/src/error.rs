use {def::DataType, snafu::prelude::*};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu, PartialEq)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display(r#"column "{}" specified in {} does not exist"#, name, clause))]
    ColumnNotFound { name: String, clause: &'static str },

    #[snafu(display(r#"column reference "{}" in {} is ambiguous"#, name, clause))]
    AmbiguousColumn { name: String, clause: &'static str },

    #[snafu(display(
        r#"{} types {} for left and {} for right cannot be matched for column "{}""#,
        clause,
        left,
        right,
        name
    ))]
    TypeMismatch {
        name: String,
        clause: &'static str,
        left: DataType,
        right: DataType,
    },

    #[snafu(display(r#"{} are not allowed in {}: "{}""#, kind, clause, name))]
    SpecialFunctionNotAllowed {
        kind: &'static str,
        name: String,
        clause: &'static str,
    },

    #[snafu(display(r#"column "{}" appears more than once in USING clause"#, name))]
    DuplicateUsingColumn { name: String },

    #[snafu(display("argument of {} must be type {}, not type {}", clause, expected, actual))]
    ExprType {
        clause: &'static str,
        expected: DataType,
        actual: DataType,
    },

    #[snafu(display("operator does not exist: {} {} {}", left, op, right))]
    OperatorType {
        op: &'static str,
        left: DataType,
        right: DataType,
    },

    #[snafu(display("unknown function: {}()", name))]
    UnknownFunction { name: String },

    #[snafu(display(r#"relation "{}" does not exist"#, name))]
    TableNotExists { name: String },

    #[snafu(display("{} is not supported", feature))]
    Unsupported { feature: &'static str },

    #[snafu(display("VALUES row {} does not match the column types", row))]
    InvalidRow { row: usize },

    #[snafu(display("{} cannot be run in local mode", node))]
    NotLocallyExecutable { node: &'static str },

    #[snafu(display("{}", details))]
    Internal { details: String },
}
