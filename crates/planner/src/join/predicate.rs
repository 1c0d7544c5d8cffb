use {
    crate::{
        error::{DuplicateUsingColumnSnafu, TypeMismatchSnafu},
        typing::{reject_special, TypeChecker},
        DataSourceInfo, Result, SourceColumn,
    },
    ast::{Identifier, JoinCond},
    bound_ast::Expression,
    common::pub_fields_struct,
    def::{DataType, JoinType},
    snafu::prelude::*,
    std::collections::HashSet,
};

pub_fields_struct! {
    /// A column that appears once in the output of a USING or NATURAL join
    /// although both inputs provide it.
    #[derive(Debug, Clone, PartialEq)]
    struct UsingColumn {
        name: String,
        data_type: DataType,
        left_ordinal: usize,
        right_ordinal: usize,
    }

    #[derive(Debug, Clone, PartialEq)]
    struct JoinPredicate {
        join_type: JoinType,
        /// Slot `i` pairs left column `left_equality_indices[i]` with right
        /// column `right_equality_indices[i]`.
        left_equality_indices: Vec<usize>,
        right_equality_indices: Vec<usize>,
        /// Bound over `info`.
        on_cond: Option<Expression>,
        /// The columns produced by the join.
        info: DataSourceInfo,
        num_left_columns: usize,
        num_right_columns: usize,
    }
}

impl JoinPredicate {
    /// Number of equality column pairs.
    pub fn num_equality_columns(&self) -> usize {
        self.left_equality_indices.len()
    }

    fn new(
        join_type: JoinType,
        left: &DataSourceInfo,
        right: &DataSourceInfo,
        using: &[UsingColumn],
    ) -> Self {
        let left_equality_indices: Vec<_> = using.iter().map(|col| col.left_ordinal).collect();
        let right_equality_indices: Vec<_> = using.iter().map(|col| col.right_ordinal).collect();

        let merged = using.iter().map(|col| SourceColumn {
            name: col.name.clone(),
            data_type: col.data_type,
            hidden: false,
            source_ordinal: left.columns()[col.left_ordinal].source_ordinal,
            table: None,
        });
        let remaining = |info: &DataSourceInfo, merged: &[usize]| -> Vec<SourceColumn> {
            info.columns()
                .iter()
                .enumerate()
                .filter(|(i, _)| !merged.contains(i))
                .map(|(_, col)| col.clone())
                .collect()
        };

        let info = merged
            .chain(remaining(left, &left_equality_indices))
            .chain(remaining(right, &right_equality_indices))
            .collect();

        Self {
            join_type,
            left_equality_indices,
            right_equality_indices,
            on_cond: None,
            info,
            num_left_columns: left.len(),
            num_right_columns: right.len(),
        }
    }
}

/// Names shared by a visible left column and a visible right column, in left order.
///
/// A name is listed once per matching pair, so a left column matching two right
/// columns yields the name twice. Resolution then reports the ambiguity.
pub fn natural_join_columns(left: &DataSourceInfo, right: &DataSourceInfo) -> Vec<String> {
    let visible = |info: &DataSourceInfo| {
        info.columns()
            .iter()
            .filter(|col| !col.hidden)
            .map(|col| col.name.clone())
            .collect::<Vec<_>>()
    };
    let (left, right) = (visible(left), visible(right));

    left.iter()
        .flat_map(|l| right.iter().filter(move |r| *r == l).cloned())
        .collect()
}

/// Turns a join condition over two inputs into a [`JoinPredicate`].
pub struct JoinConditionResolver<'a, T: TypeChecker> {
    checker: &'a T,
}

impl<'a, T: TypeChecker> JoinConditionResolver<'a, T> {
    pub fn new(checker: &'a T) -> Self {
        Self { checker }
    }

    /// Also returns the merged columns of USING and NATURAL joins, in the order they
    /// lead the output.
    pub fn resolve(
        &self,
        left: &DataSourceInfo,
        right: &DataSourceInfo,
        join_type: JoinType,
        cond: &JoinCond,
    ) -> Result<(JoinPredicate, Vec<UsingColumn>)> {
        match cond {
            JoinCond::Natural | JoinCond::Using(_) => {
                let (names, clause) = match cond {
                    JoinCond::Natural => (natural_join_columns(left, right), "NATURAL JOIN"),
                    JoinCond::Using(names) => (using_names(names)?, "USING"),
                    _ => unreachable!(),
                };

                let using = make_using_columns(left, right, &names, clause)?;
                let predicate = JoinPredicate::new(join_type, left, right, &using);

                tracing::debug!(
                    %join_type,
                    left = ?predicate.left_equality_indices,
                    right = ?predicate.right_equality_indices,
                    "resolved {} columns",
                    clause
                );

                Ok((predicate, using))
            }

            JoinCond::None | JoinCond::On(_) => {
                let mut predicate = JoinPredicate::new(join_type, left, right, &[]);

                if let JoinCond::On(expr) = cond {
                    reject_special(expr, "ON")?;

                    let on_cond =
                        self.checker
                            .check(expr, DataType::Boolean, &predicate.info, "ON")?;
                    tracing::debug!(%join_type, cond = %on_cond, "resolved ON condition");

                    predicate.on_cond = Some(on_cond);
                }

                Ok((predicate, vec![]))
            }

            cond => unreachable!("unsupported join condition {:?}", cond),
        }
    }
}

fn using_names(names: &[Identifier]) -> Result<Vec<String>> {
    let mut seen = HashSet::new();

    names
        .iter()
        .map(|name| {
            ensure!(
                seen.insert(name.0.as_str()),
                DuplicateUsingColumnSnafu { name: &name.0 }
            );
            Ok(name.0.clone())
        })
        .collect()
}

fn make_using_columns(
    left: &DataSourceInfo,
    right: &DataSourceInfo,
    names: &[String],
    clause: &'static str,
) -> Result<Vec<UsingColumn>> {
    names
        .iter()
        .map(|name| {
            let left_ordinal = left.find_column(None, name, clause)?;
            let right_ordinal = right.find_column(None, name, clause)?;

            let (left_type, right_type) = (
                left.columns()[left_ordinal].data_type,
                right.columns()[right_ordinal].data_type,
            );
            let data_type =
                left_type
                    .common_type(&right_type)
                    .context(TypeMismatchSnafu {
                        name,
                        clause,
                        left: left_type,
                        right: right_type,
                    })?;

            Ok(UsingColumn {
                name: name.clone(),
                data_type,
                left_ordinal,
                right_ordinal,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            source::tests::{column, source},
            typing::ExprTyper,
            Error,
        },
        ast::{
            expr::{Expression as Expr, InfixOperator},
            identifier_from_str, ColumnRef,
        },
    };

    fn resolve(
        left: &DataSourceInfo,
        right: &DataSourceInfo,
        cond: &JoinCond,
    ) -> Result<(JoinPredicate, Vec<UsingColumn>)> {
        JoinConditionResolver::new(&ExprTyper).resolve(left, right, JoinType::Inner, cond)
    }

    fn using(names: &[&str]) -> JoinCond {
        JoinCond::Using(names.iter().map(|name| identifier_from_str(name)).collect())
    }

    fn col(table: &str, name: &str) -> Expr {
        ColumnRef {
            column: identifier_from_str(name),
            table: Some(identifier_from_str(table)),
        }
        .into()
    }

    #[test]
    fn natural_columns_keep_duplicates() {
        let left = source("a", &["x", "y", "z"]);
        let right = source("b", &["z", "x", "w", "x"]);

        assert_eq!(natural_join_columns(&left, &right), vec!["x", "x", "z"]);

        let hidden = DataSourceInfo::new(vec![
            column("b", "x", DataType::Int, true),
            column("b", "y", DataType::Int, false),
        ]);
        assert_eq!(natural_join_columns(&left, &hidden), vec!["y"]);

        assert_eq!(
            resolve(&left, &right, &JoinCond::Natural).unwrap_err(),
            Error::AmbiguousColumn {
                name: "x".into(),
                clause: "NATURAL JOIN"
            }
        );
    }

    #[test]
    fn using_clause_order() {
        let left = source("a", &["k", "a", "b"]);
        let right = source("b", &["b", "v", "a"]);

        let (pred, using) = resolve(&left, &right, &using(&["a", "b"])).unwrap();

        assert_eq!(pred.left_equality_indices, vec![1, 2]);
        assert_eq!(pred.right_equality_indices, vec![2, 0]);
        assert_eq!(pred.num_equality_columns(), 2);
        assert_eq!(
            using.iter().map(|col| col.name.as_str()).collect::<Vec<_>>(),
            vec!["a", "b"]
        );
        assert_eq!(
            pred.info
                .columns()
                .iter()
                .map(|col| (col.table.as_deref(), col.name.as_str()))
                .collect::<Vec<_>>(),
            vec![
                (None, "a"),
                (None, "b"),
                (Some("a"), "k"),
                (Some("b"), "v"),
            ]
        );
        assert_eq!((pred.num_left_columns, pred.num_right_columns), (3, 3));
        assert!(pred.on_cond.is_none());
    }

    #[test]
    fn merged_columns_keep_hidden_flags() {
        let mut left = source("a", &["id"]).columns().to_vec();
        left.push(column("a", "rowid", DataType::BigInt, true));
        let left = DataSourceInfo::new(left);
        let right = DataSourceInfo::new(vec![
            column("b", "id", DataType::SmallInt, false),
            column("b", "rowid", DataType::BigInt, true),
        ]);

        let (pred, merged) = resolve(&left, &right, &JoinCond::Natural).unwrap();
        assert_eq!(merged[0].data_type, DataType::Int);
        assert_eq!(
            pred.info
                .columns()
                .iter()
                .map(|col| (col.name.as_str(), col.hidden))
                .collect::<Vec<_>>(),
            vec![("id", false), ("rowid", true), ("rowid", true)]
        );

        assert_eq!(
            resolve(&left, &right, &using(&["rowid"])).unwrap_err(),
            Error::ColumnNotFound {
                name: "rowid".into(),
                clause: "USING"
            }
        );
    }

    #[test]
    fn merged_columns_keep_base_ordinals() {
        let (inner, _) = resolve(
            &source("a", &["k", "id"]),
            &source("b", &["v", "w", "id"]),
            &using(&["id"]),
        )
        .unwrap();
        assert_eq!(inner.info.columns()[0].source_ordinal, 1);

        // The left input is the join above, where `w` sits at position 3.
        let (pred, _) = resolve(&inner.info, &source("c", &["w"]), &using(&["w"])).unwrap();
        assert_eq!(pred.left_equality_indices, vec![3]);
        assert_eq!(
            pred.info
                .columns()
                .iter()
                .map(|col| (col.name.as_str(), col.source_ordinal))
                .collect::<Vec<_>>(),
            vec![("w", 1), ("id", 1), ("k", 0), ("v", 0)]
        );
    }

    #[test]
    fn using_errors() {
        let left = source("a", &["x", "y"]);
        let mut right = source("b", &["x", "y"]).columns().to_vec();
        right[1].data_type = DataType::Varchar(4);
        let right = DataSourceInfo::new(right);

        assert_eq!(
            resolve(&left, &right, &using(&["y"])).unwrap_err(),
            Error::TypeMismatch {
                name: "y".into(),
                clause: "USING",
                left: DataType::Int,
                right: DataType::Varchar(4),
            }
        );
        assert_eq!(
            resolve(&left, &right, &using(&["x", "x"])).unwrap_err(),
            Error::DuplicateUsingColumn { name: "x".into() }
        );
        assert_eq!(
            resolve(&left, &right, &using(&["z"])).unwrap_err(),
            Error::ColumnNotFound {
                name: "z".into(),
                clause: "USING"
            }
        );
    }

    #[test]
    fn on_and_cross() {
        let left = source("a", &["x", "y"]);
        let right = source("b", &["x"]);

        let (pred, using) = resolve(&left, &right, &JoinCond::None).unwrap();
        assert!(using.is_empty());
        assert!(pred.left_equality_indices.is_empty());
        assert!(pred.on_cond.is_none());
        assert_eq!(pred.info.len(), 3);

        let on = JoinCond::On(InfixOperator::Equal.build_expr(col("a", "x"), col("b", "x")));
        let (pred, _) = resolve(&left, &right, &on).unwrap();
        assert_eq!(pred.on_cond.as_ref().unwrap().referenced_columns(), vec![0, 2]);
        // Equalities in ON are kept as a filter.
        assert!(pred.right_equality_indices.is_empty());
    }

    #[test]
    fn resolution_is_idempotent() {
        let left = source("a", &["x", "y"]);
        let right = source("b", &["y", "x"]);

        for cond in [
            JoinCond::Natural,
            using(&["x"]),
            JoinCond::None,
            JoinCond::On(InfixOperator::LessThan.build_expr(col("a", "y"), col("b", "y"))),
        ] {
            assert_eq!(
                resolve(&left, &right, &cond).unwrap(),
                resolve(&left, &right, &cond).unwrap()
            );
        }
    }

    #[test]
    fn special_functions_in_on() {
        let left = source("a", &["x"]);
        let right = source("b", &["x"]);

        let on = JoinCond::On(InfixOperator::Equal.build_expr(
            col("a", "x"),
            Expr::FunctionCall {
                func: identifier_from_str("max"),
                arguments: vec![col("b", "x")],
                over: None,
            },
        ));

        assert_eq!(
            resolve(&left, &right, &on).unwrap_err(),
            Error::SpecialFunctionNotAllowed {
                kind: "aggregate functions",
                name: "max".into(),
                clause: "ON",
            }
        );
    }
}
