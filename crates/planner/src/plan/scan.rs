use {
    super::{Plannable, PhysicalProps},
    crate::{DataSourceInfo, Result},
    def::catalog::{IndexDesc, InterleaveAncestor, TableDesc},
};

/// A scan over the primary index of a table.
#[derive(Debug, Clone)]
pub struct ScanNode {
    table: TableDesc,
    index: IndexDesc,
    alias: Option<String>,
    columns: DataSourceInfo,
    props: PhysicalProps,
}

impl ScanNode {
    pub fn new(table: &TableDesc, alias: Option<&str>) -> Self {
        let index = table.primary_index.clone();

        // the scan produces the table's columns in order, so key ordinals are output ordinals
        let props = PhysicalProps {
            ordering: index.columns.clone(),
        };

        Self {
            columns: DataSourceInfo::from_table(table, alias),
            table: table.clone(),
            index,
            alias: alias.map(str::to_string),
            props,
        }
    }

    pub fn table(&self) -> &TableDesc {
        &self.table
    }

    pub fn index(&self) -> &IndexDesc {
        &self.index
    }

    /// The entry identifying the scanned index in an interleave hierarchy.
    pub fn as_interleave_ancestor(&self) -> InterleaveAncestor {
        InterleaveAncestor {
            table_id: self.table.id,
            index_id: self.index.id,
        }
    }
}

impl Plannable for ScanNode {
    fn name(&self) -> &'static str {
        "scan"
    }

    fn columns(&self) -> &DataSourceInfo {
        &self.columns
    }

    fn props(&self) -> &PhysicalProps {
        &self.props
    }

    fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut attrs = vec![("table", format!("{}@{}", self.table.name, self.index.name))];
        if let Some(alias) = &self.alias {
            attrs.push(("alias", alias.clone()));
        }

        attrs
    }

    fn as_scan(&self) -> Option<&ScanNode> {
        Some(self)
    }

    fn close(self: Box<Self>) -> Result<()> {
        tracing::trace!(table = %self.table.name, "closed scan");
        Ok(())
    }
}
