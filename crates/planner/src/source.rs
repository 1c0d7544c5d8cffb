use {
    crate::{
        error::{AmbiguousColumnSnafu, ColumnNotFoundSnafu},
        Result,
    },
    common::pub_fields_struct,
    def::{catalog::TableDesc, DataType},
    snafu::prelude::*,
};

pub_fields_struct! {
    #[derive(Debug, Clone, PartialEq)]
    struct SourceColumn {
        name: String,
        data_type: DataType,
        hidden: bool,
        /// Position of the column in the base table it was read from.
        source_ordinal: usize,
        /// Table name or alias that qualifies the column, `None` for merged columns.
        table: Option<String>,
    }
}

/// The ordered columns produced by a data source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataSourceInfo {
    columns: Vec<SourceColumn>,
}

impl DataSourceInfo {
    pub fn new(columns: Vec<SourceColumn>) -> Self {
        Self { columns }
    }

    /// All columns of `table`, qualified by `alias` if given, else by the table name.
    pub fn from_table(table: &TableDesc, alias: Option<&str>) -> Self {
        let qualifier = alias.unwrap_or(&table.name);

        Self::new(
            table
                .columns
                .iter()
                .enumerate()
                .map(|(i, col)| SourceColumn {
                    name: col.name.clone(),
                    data_type: col.data_type,
                    hidden: col.hidden,
                    source_ordinal: i,
                    table: Some(qualifier.to_string()),
                })
                .collect(),
        )
    }

    pub fn columns(&self) -> &[SourceColumn] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// The same columns, all qualified by `table`.
    pub fn with_table(&self, table: &str) -> Self {
        Self::new(
            self.columns
                .iter()
                .map(|col| SourceColumn {
                    table: Some(table.to_string()),
                    ..col.clone()
                })
                .collect(),
        )
    }

    /// Looks up the ordinal of a column reference.
    ///
    /// An unqualified name only matches visible columns, a qualified one matches
    /// any column of that table, hidden or not. Exactly one column must match.
    pub fn find_column(
        &self,
        table: Option<&str>,
        name: &str,
        clause: &'static str,
    ) -> Result<usize> {
        let display = || match table {
            Some(table) => format!("{}.{}", table, name),
            None => name.to_string(),
        };

        let mut matches = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, col)| {
                col.name == name
                    && match table {
                        Some(table) => col.table.as_deref() == Some(table),
                        None => !col.hidden,
                    }
            })
            .map(|(i, _)| i);

        let ordinal = matches.next().with_context(|| ColumnNotFoundSnafu {
            name: display(),
            clause,
        })?;
        ensure!(
            matches.next().is_none(),
            AmbiguousColumnSnafu {
                name: display(),
                clause,
            }
        );

        Ok(ordinal)
    }
}

impl FromIterator<SourceColumn> for DataSourceInfo {
    fn from_iter<I: IntoIterator<Item = SourceColumn>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use {super::*, crate::Error};

    pub(crate) fn column(
        table: &str,
        name: &str,
        data_type: DataType,
        hidden: bool,
    ) -> SourceColumn {
        SourceColumn {
            name: name.into(),
            data_type,
            hidden,
            source_ordinal: 0,
            table: Some(table.into()),
        }
    }

    /// Visible columns of `table`, typed as `int` unless the name says otherwise.
    pub(crate) fn source(table: &str, names: &[&str]) -> DataSourceInfo {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| SourceColumn {
                source_ordinal: i,
                ..column(table, name, DataType::Int, false)
            })
            .collect()
    }

    #[test]
    fn find_column() {
        let mut info = source("a", &["x", "y", "x"]);
        info.columns.push(column("a", "rowid", DataType::BigInt, true));
        info.columns.push(column("b", "z", DataType::Int, false));

        assert_eq!(info.find_column(None, "y", "ON"), Ok(1));
        assert_eq!(info.find_column(Some("b"), "z", "ON"), Ok(4));
        assert_eq!(info.find_column(Some("a"), "rowid", "ON"), Ok(3));
        assert_eq!(
            info.find_column(None, "rowid", "ON"),
            Err(Error::ColumnNotFound {
                name: "rowid".into(),
                clause: "ON"
            })
        );
        assert_eq!(
            info.find_column(Some("a"), "x", "ON"),
            Err(Error::AmbiguousColumn {
                name: "a.x".into(),
                clause: "ON"
            })
        );
        assert!(info.find_column(Some("b"), "y", "ON").is_err());
    }

    #[test]
    fn with_table() {
        let info = source("a", &["x"]).with_table("t");
        assert_eq!(info.columns()[0].table.as_deref(), Some("t"));
        assert_eq!(info.len(), 1);
    }
}
