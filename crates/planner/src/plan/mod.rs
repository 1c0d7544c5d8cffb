//! Plan nodes.
//!
//! Every node can be planned, explained and closed. Only nodes that can produce
//! rows on their own also expose [`Executable`]; a join is handed over to the
//! distributed engine and never runs locally.
mod explain;
mod join;
mod rename;
mod scan;
mod values;

pub use {
    explain::explain, join::JoinNode, rename::RenameNode, scan::ScanNode, values::ValuesNode,
};

use {
    crate::{error::NotLocallyExecutableSnafu, DataSourceInfo, Result},
    common::pub_fields_struct,
    def::{ColumnOrdering, Row, Value},
    snafu::prelude::*,
    std::fmt::Debug,
};

pub_fields_struct! {
    /// Facts about the output of a node that hold regardless of how it is executed.
    #[derive(Debug, Clone, Default, PartialEq)]
    struct PhysicalProps {
        /// Guaranteed ordering, over the node's output columns.
        ordering: ColumnOrdering,
    }
}

pub trait Plannable: Debug {
    fn name(&self) -> &'static str;

    fn columns(&self) -> &DataSourceInfo;

    fn props(&self) -> &PhysicalProps;

    fn children(&self) -> Vec<&dyn Plannable> {
        vec![]
    }

    /// Node specific lines shown by [`explain`].
    fn attributes(&self) -> Vec<(&'static str, String)> {
        vec![]
    }

    fn as_scan(&self) -> Option<&ScanNode> {
        None
    }

    fn as_executable(&mut self) -> Option<&mut dyn Executable> {
        None
    }

    /// Releases the node and all of its descendants.
    fn close(self: Box<Self>) -> Result<()>;
}

pub trait Executable {
    fn start(&mut self) -> Result<()>;

    /// Advances to the next row, returning false once the rows are exhausted.
    fn next(&mut self) -> Result<bool>;

    /// The current row.
    fn values(&self) -> &[Value];
}

/// Runs a plan in the local process and collects its rows.
pub fn run_local(plan: &mut dyn Plannable) -> Result<Vec<Row>> {
    let node = plan.name();
    let exec = plan
        .as_executable()
        .context(NotLocallyExecutableSnafu { node })?;

    exec.start()?;

    let mut rows = vec![];
    while exec.next()? {
        rows.push(exec.values().to_vec());
    }

    Ok(rows)
}

/// Closes a plan that is dropped because planning failed.
pub(crate) fn discard(plan: Box<dyn Plannable>) {
    let node = plan.name();
    if let Err(e) = plan.close() {
        tracing::warn!(node, error = %e, "failed to close discarded plan");
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use {
        super::*,
        crate::{source::tests::source, Error},
        def::{
            catalog::{ColumnDesc, IndexDesc, Interleave, InterleaveAncestor, TableDesc},
            ColumnOrderInfo, DataType, Direction,
        },
        std::{cell::RefCell, rc::Rc},
    };

    /// A table with an `int` primary key `id` and a `varchar` column `v`.
    pub(crate) fn table(id: u32, name: &str, ancestors: Vec<InterleaveAncestor>) -> TableDesc {
        TableDesc {
            id,
            name: name.into(),
            columns: vec![
                ColumnDesc {
                    id: 1,
                    name: "id".into(),
                    data_type: DataType::Int,
                    hidden: false,
                },
                ColumnDesc {
                    id: 2,
                    name: "v".into(),
                    data_type: DataType::Varchar(16),
                    hidden: false,
                },
            ],
            primary_index: IndexDesc {
                id: 1,
                name: "primary".into(),
                columns: vec![ColumnOrderInfo::new(0, Direction::Asc)],
                interleave: Interleave { ancestors },
            },
        }
    }

    /// Records its close into a shared log and fails if asked to.
    #[derive(Debug)]
    pub(crate) struct TrackedNode {
        pub(crate) label: &'static str,
        pub(crate) fail: bool,
        pub(crate) log: Rc<RefCell<Vec<&'static str>>>,
        pub(crate) columns: DataSourceInfo,
        pub(crate) props: PhysicalProps,
    }

    impl TrackedNode {
        pub(crate) fn new(
            label: &'static str,
            fail: bool,
            log: &Rc<RefCell<Vec<&'static str>>>,
        ) -> Box<Self> {
            Box::new(Self {
                label,
                fail,
                log: log.clone(),
                columns: source(label, &["x"]),
                props: PhysicalProps::default(),
            })
        }
    }

    impl Plannable for TrackedNode {
        fn name(&self) -> &'static str {
            "tracked"
        }

        fn columns(&self) -> &DataSourceInfo {
            &self.columns
        }

        fn props(&self) -> &PhysicalProps {
            &self.props
        }

        fn close(self: Box<Self>) -> Result<()> {
            self.log.borrow_mut().push(self.label);
            if self.fail {
                return Err(Error::Internal {
                    details: format!("{} failed to close", self.label),
                });
            }

            Ok(())
        }
    }

    #[test]
    fn run_values_locally() {
        let mut values = ValuesNode::new(
            source("v", &["a", "b"]),
            vec![vec![1.into(), 2.into()], vec![Value::Null, 4.into()]],
        )
        .unwrap();

        assert_eq!(
            run_local(&mut values).unwrap(),
            vec![vec![Value::Int(1), Value::Int(2)], vec![Value::Null, Value::Int(4)]]
        );
        // restartable
        assert_eq!(run_local(&mut values).unwrap().len(), 2);
    }

    #[test]
    fn discard_closes() {
        let log = Rc::new(RefCell::new(vec![]));
        discard(TrackedNode::new("a", true, &log));
        assert_eq!(*log.borrow(), vec!["a"]);
    }
}
