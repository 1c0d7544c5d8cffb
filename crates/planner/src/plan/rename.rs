use {
    super::{Plannable, PhysicalProps},
    crate::{DataSourceInfo, Result},
};

/// Qualifies the columns of its input with a new table name, as for a derived table.
#[derive(Debug)]
pub struct RenameNode {
    input: Box<dyn Plannable>,
    alias: String,
    columns: DataSourceInfo,
}

impl RenameNode {
    pub fn new(input: Box<dyn Plannable>, alias: &str) -> Self {
        Self {
            columns: input.columns().with_table(alias),
            alias: alias.to_string(),
            input,
        }
    }
}

impl Plannable for RenameNode {
    fn name(&self) -> &'static str {
        "rename"
    }

    fn columns(&self) -> &DataSourceInfo {
        &self.columns
    }

    fn props(&self) -> &PhysicalProps {
        self.input.props()
    }

    fn children(&self) -> Vec<&dyn Plannable> {
        vec![self.input.as_ref()]
    }

    fn attributes(&self) -> Vec<(&'static str, String)> {
        vec![("alias", self.alias.clone())]
    }

    fn close(self: Box<Self>) -> Result<()> {
        self.input.close()
    }
}
