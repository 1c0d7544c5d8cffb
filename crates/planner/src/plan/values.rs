use {
    super::{Executable, Plannable, PhysicalProps},
    crate::{error::InvalidRowSnafu, DataSourceInfo, Result},
    def::{Row, Value},
    snafu::prelude::*,
};

/// Rows held in memory.
#[derive(Debug)]
pub struct ValuesNode {
    columns: DataSourceInfo,
    rows: Vec<Row>,
    props: PhysicalProps,
    current: Option<usize>,
}

impl ValuesNode {
    pub fn new(columns: DataSourceInfo, rows: Vec<Row>) -> Result<Self> {
        for (i, row) in rows.iter().enumerate() {
            ensure!(
                row.len() == columns.len()
                    && row
                        .iter()
                        .zip(columns.columns())
                        .all(|(value, col)| value.fits(&col.data_type)),
                InvalidRowSnafu { row: i + 1 }
            );
        }

        Ok(Self {
            columns,
            rows,
            props: PhysicalProps::default(),
            current: None,
        })
    }
}

impl Plannable for ValuesNode {
    fn name(&self) -> &'static str {
        "values"
    }

    fn columns(&self) -> &DataSourceInfo {
        &self.columns
    }

    fn props(&self) -> &PhysicalProps {
        &self.props
    }

    fn attributes(&self) -> Vec<(&'static str, String)> {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let values = row.iter().map(Value::to_string).collect::<Vec<_>>();
                format!("({})", values.join(", "))
            })
            .collect::<Vec<_>>();

        vec![("rows", rows.join(", "))]
    }

    fn as_executable(&mut self) -> Option<&mut dyn Executable> {
        Some(self)
    }

    fn close(self: Box<Self>) -> Result<()> {
        Ok(())
    }
}

impl Executable for ValuesNode {
    fn start(&mut self) -> Result<()> {
        self.current = None;
        Ok(())
    }

    fn next(&mut self) -> Result<bool> {
        let next = self.current.map_or(0, |i| i + 1);
        self.current = Some(next.min(self.rows.len()));

        Ok(next < self.rows.len())
    }

    fn values(&self) -> &[Value] {
        self.current
            .and_then(|i| self.rows.get(i))
            .map(|row| row.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::source::tests::source, crate::Error};

    #[test]
    fn reject_mismatched_rows() {
        let columns = source("v", &["a"]);

        assert_eq!(
            ValuesNode::new(columns.clone(), vec![vec![1.into()], vec![]]).unwrap_err(),
            Error::InvalidRow { row: 2 }
        );
        assert_eq!(
            ValuesNode::new(columns, vec![vec![Value::String("x".into())]]).unwrap_err(),
            Error::InvalidRow { row: 1 }
        );
    }

    #[test]
    fn attributes() {
        let values = ValuesNode::new(
            source("v", &["a", "b"]),
            vec![vec![1.into(), Value::Null], vec![2.into(), 3.into()]],
        )
        .unwrap();

        assert_eq!(
            values.attributes(),
            vec![("rows", "(1, NULL), (2, 3)".to_string())]
        );
    }

    #[test]
    fn cursor() {
        let mut values = ValuesNode::new(source("v", &["a"]), vec![vec![7.into()]]).unwrap();

        values.start().unwrap();
        assert!(values.values().is_empty());
        assert!(values.next().unwrap());
        assert_eq!(values.values(), &[Value::Int(7)]);
        assert!(!values.next().unwrap());
        assert!(!values.next().unwrap());
        assert!(values.values().is_empty());
    }
}
