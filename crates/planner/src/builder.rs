use {
    crate::{
        error::{TableNotExistsSnafu, UnsupportedSnafu},
        join::JoinConditionResolver,
        plan::{discard, JoinNode, Plannable, RenameNode, ScanNode},
        Planner, Result,
    },
    ast::{JoinItem, Query, Statement, TableFactor, TableReference, TargetElem},
    def::catalog::DatabaseCatalog,
    snafu::prelude::*,
};

impl<'a, D: DatabaseCatalog> Planner<'a, D> {
    /// Builds a left-deep plan of table scans and joins.
    pub fn build_plan(&self, stmt: Statement) -> Result<Box<dyn Plannable>> {
        match stmt {
            Statement::Select(query) => self.build_query(query),
        }
    }

    fn build_query(&self, query: Query) -> Result<Box<dyn Plannable>> {
        ensure!(!query.distinct, UnsupportedSnafu { feature: "DISTINCT" });
        ensure!(
            matches!(query.targets.as_slice(), [TargetElem::Wildcard]),
            UnsupportedSnafu {
                feature: "a target list other than *"
            }
        );

        let from = query.from.context(UnsupportedSnafu {
            feature: "SELECT without FROM",
        })?;

        self.build_from_clause(from)
    }

    fn build_from_clause(&self, from: TableReference) -> Result<Box<dyn Plannable>> {
        let mut node = self.build_table_factor(from.factor)?;

        for join in from.joins {
            node = self.build_join(node, join)?;
        }

        Ok(node)
    }

    fn build_table_factor(&self, factor: TableFactor) -> Result<Box<dyn Plannable>> {
        Ok(match factor {
            TableFactor::Table { name, alias } => {
                let table = self
                    .db_catalog()
                    .get_table(&name.0)
                    .context(TableNotExistsSnafu { name: &name.0 })?;

                Box::new(ScanNode::new(table, alias.as_ref().map(|a| a.0.as_str())))
            }
            TableFactor::Derived { query, alias } => {
                let input = self.build_query(*query)?;

                Box::new(RenameNode::new(input, &alias.0))
            }
        })
    }

    /// Joins `left` with the table of `join`. On failure, the inputs built so far are closed.
    fn build_join(&self, left: Box<dyn Plannable>, join: JoinItem) -> Result<Box<dyn Plannable>> {
        let JoinItem {
            join_type,
            factor,
            cond,
        } = join;

        let right = match self.build_table_factor(factor) {
            Ok(right) => right,
            Err(e) => {
                discard(left);
                return Err(e);
            }
        };

        let resolved = JoinConditionResolver::new(&self.checker).resolve(
            left.columns(),
            right.columns(),
            join_type,
            &cond,
        );
        let (predicate, using) = match resolved {
            Ok(resolved) => resolved,
            Err(e) => {
                discard(right);
                discard(left);
                return Err(e);
            }
        };

        let node = JoinNode::new(left, right, predicate);
        tracing::debug!(
            %join_type,
            using = using.len(),
            merge_prefix = node.merge_join_ordering().len(),
            interleaved = node.interleaved_scans().is_some(),
            "planned join"
        );

        Ok(Box::new(node))
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{plan::explain, Error},
        binder::Catalog,
        parser::Parser,
    };

    const CATALOG: &str = r#"
        [[table]]
        name = "customers"
        columns = [
            { name = "id", type = "int" },
            { name = "name", type = "varchar(32)" },
        ]
        primary_key = [{ column = "id" }]

        [[table]]
        name = "orders"
        interleave_in = "customers"
        columns = [
            { name = "id", type = "int" },
            { name = "order_id", type = "int" },
            { name = "total", type = "double" },
            { name = "rowid", type = "bigint", hidden = true },
        ]
        primary_key = [{ column = "id" }, { column = "order_id" }]

        [[table]]
        name = "notes"
        columns = [
            { name = "id", type = "bigint" },
            { name = "body", type = "varchar(200)" },
        ]
    "#;

    fn plan(sql: &str) -> Result<Box<dyn Plannable>> {
        let catalog = Catalog::from_toml(CATALOG).unwrap();
        let stmt = Parser::parse(sql).unwrap().remove(0);

        Planner::new(&catalog).build_plan(stmt)
    }

    #[test]
    fn interleaved_merge_join() {
        let plan = plan("SELECT * FROM customers JOIN orders USING (id)").unwrap();

        assert_eq!(
            explain(plan.as_ref()),
            "\
join
│ type: inner
│ equality: (id) = (id)
│ merge join order: +(id=id)
│ interleaved: customers -> orders
│ columns: (id integer, customers.name varchar(32), orders.order_id integer, orders.total double, orders.rowid bigint[hidden])
│ ordering: +id
├── scan
│     table: customers@primary
│     columns: (customers.id integer, customers.name varchar(32))
│     ordering: +id
└── scan
      table: orders@primary
      columns: (orders.id integer, orders.order_id integer, orders.total double, orders.rowid bigint[hidden])
      ordering: +id,+order_id
"
        );
        assert!(plan.close().is_ok());
    }

    #[test]
    fn left_deep_joins() {
        let plan = plan(
            "SELECT * FROM customers c \
             NATURAL JOIN orders \
             LEFT JOIN notes n ON n.id = orders.order_id AND n.body LIKE 'x%'",
        )
        .unwrap();

        assert_eq!(plan.name(), "join");
        assert_eq!(plan.columns().len(), 5 + 2);

        let children = plan.children();
        assert_eq!(children[0].name(), "join");
        assert_eq!(children[1].name(), "scan");
        // the inner join keeps the merged column first
        assert_eq!(children[0].columns().columns()[0].table, None);
        assert!(plan.attributes().iter().any(|(key, value)| *key == "pred"
            && value == "(n.id = orders.order_id) AND (n.body LIKE 'x%')"));
    }

    #[test]
    fn derived_tables_are_not_interleaved() {
        let plan = plan("SELECT * FROM (SELECT * FROM customers) AS c JOIN orders ON c.id = orders.id")
            .unwrap();

        let text = explain(plan.as_ref());
        assert!(!text.contains("interleaved"));
        assert!(text.contains("rename"));
        assert!(text.contains("c.name varchar(32)"));
    }

    #[test]
    fn planning_errors() {
        assert_eq!(
            plan("SELECT * FROM customers JOIN missing USING (id)").unwrap_err(),
            Error::TableNotExists {
                name: "missing".into()
            }
        );
        assert_eq!(
            plan("SELECT * FROM customers JOIN orders USING (rowid)").unwrap_err(),
            Error::ColumnNotFound {
                name: "rowid".into(),
                clause: "USING"
            }
        );
        assert_eq!(
            plan("SELECT id FROM customers").unwrap_err(),
            Error::Unsupported {
                feature: "a target list other than *"
            }
        );
        assert!(matches!(
            plan("SELECT * FROM customers JOIN orders ON EXISTS (SELECT * FROM notes)")
                .unwrap_err(),
            Error::SpecialFunctionNotAllowed {
                kind: "subqueries",
                ..
            }
        ));
        assert!(matches!(
            plan("SELECT * FROM customers c JOIN orders o ON c.id").unwrap_err(),
            Error::ExprType { clause: "ON", .. }
        ));
    }
}
