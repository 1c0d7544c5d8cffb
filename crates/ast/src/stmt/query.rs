use {
    crate::{common::Identifier, expr::Expression},
    common::pub_fields_struct,
    def::JoinType,
};

#[derive(Debug, Clone, PartialEq)]
pub enum TableFactor {
    Table {
        name: Identifier,
        alias: Option<Identifier>,
    },
    Derived {
        query: Box<Query>,
        alias: Identifier,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum TargetElem {
    Expr {
        expr: Expression,
        alias: Option<Identifier>,
    },
    Wildcard,
}

/// The condition attached to a join.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum JoinCond {
    /// No condition, as in `CROSS JOIN`.
    None,
    Natural,
    Using(Vec<Identifier>),
    On(Expression),
}

pub_fields_struct! {
    #[derive(Debug, Clone, PartialEq)]
    struct Query {
        distinct: bool,
        targets: Vec<TargetElem>,
        from: Option<TableReference>,
    }

    #[derive(Debug, Clone, PartialEq)]
    struct JoinItem {
        join_type: JoinType,
        factor: TableFactor,
        cond: JoinCond,
    }

    #[derive(Debug, Clone, PartialEq)]
    struct TableReference {
        factor: TableFactor,
        joins: Vec<JoinItem>,
    }
}
