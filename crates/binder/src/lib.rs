mod config;

pub use config::{ColumnDef, KeyColumn, SortDirection, TableDef};

use {
    def::{
        catalog::{ColumnDesc, DatabaseCatalog, IndexDesc, Interleave, TableDesc, TableId},
        types, ColumnOrderInfo, DataType, IndexId,
    },
    snafu::prelude::*,
    std::{
        collections::{BTreeMap, HashSet},
        path::{Path, PathBuf},
    },
};

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("could not read catalog file {}", path.display()))]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("invalid catalog file"))]
    Parse { source: toml::de::Error },

    #[snafu(display(r#"relation "{}" already exists"#, name))]
    DuplicateTable { name: String },

    #[snafu(display(r#"column "{}" specified more than once in table "{}""#, column, table))]
    DuplicateColumn { table: String, column: String },

    #[snafu(display(r#"invalid type for column "{}" of table "{}""#, column, table))]
    InvalidType {
        table: String,
        column: String,
        #[snafu(backtrace)]
        source: types::Error,
    },

    #[snafu(display(r#"column "{}" named in key does not exist in table "{}""#, column, table))]
    UndefinedKeyColumn { table: String, column: String },

    #[snafu(display(r#"table "{}" is interleaved in unknown table "{}""#, table, parent))]
    UnknownParent { table: String, parent: String },

    #[snafu(display(
        r#"primary key of table "{}" must be prefixed by the primary key of its parent "{}""#,
        table,
        parent
    ))]
    InterleavePrefix { table: String, parent: String },
}

pub type Result<T> = std::result::Result<T, Error>;

/// All table descriptors use this id for their primary index.
pub const PRIMARY_INDEX_ID: IndexId = 1;

/// In-memory table descriptors, addressable by name and by id.
#[derive(Debug, Default)]
pub struct Catalog {
    tables: BTreeMap<String, TableDesc>,
    names: BTreeMap<TableId, String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).context(ReadFileSnafu { path })?;

        Self::from_toml(&content)
    }

    /// Builds a catalog from a TOML document of `[[table]]` entries. Tables are
    /// created in file order, so a parent must be declared before its children.
    pub fn from_toml(content: &str) -> Result<Self> {
        let file: config::CatalogFile = toml::from_str(content).context(ParseSnafu)?;

        let mut catalog = Self::new();
        for table in file.tables {
            catalog.create_table(table)?;
        }

        Ok(catalog)
    }

    pub fn create_table(&mut self, def: TableDef) -> Result<TableId> {
        let TableDef {
            name,
            columns: column_defs,
            primary_key,
            interleave_in,
        } = def;

        ensure!(
            !self.tables.contains_key(&name),
            DuplicateTableSnafu { name }
        );

        let mut seen = HashSet::new();
        let columns = column_defs
            .into_iter()
            .enumerate()
            .map(|(i, col)| {
                ensure!(
                    seen.insert(col.name.clone()),
                    DuplicateColumnSnafu {
                        table: &name,
                        column: &col.name,
                    }
                );

                let data_type = col.data_type.parse::<DataType>().context(InvalidTypeSnafu {
                    table: &name,
                    column: &col.name,
                })?;

                Ok(ColumnDesc {
                    id: i as u32 + 1,
                    name: col.name,
                    data_type,
                    hidden: col.hidden,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let key = primary_key
            .iter()
            .map(|key| {
                let ordinal = columns
                    .iter()
                    .position(|col| col.name == key.column)
                    .context(UndefinedKeyColumnSnafu {
                        table: &name,
                        column: &key.column,
                    })?;

                Ok(ColumnOrderInfo::new(ordinal, key.direction.into()))
            })
            .collect::<Result<Vec<_>>>()?;

        let interleave = match interleave_in {
            Some(parent) => self.interleave_in(&name, &columns, &key, &parent)?,
            None => Interleave::default(),
        };

        let id = self.names.keys().next_back().map_or(1, |id| id + 1);
        tracing::debug!(table = %name, id, depth = interleave.ancestors.len(), "created table");

        self.names.insert(id, name.clone());
        self.tables.insert(
            name.clone(),
            TableDesc {
                id,
                primary_index: IndexDesc {
                    id: PRIMARY_INDEX_ID,
                    name: "primary".to_string(),
                    columns: key,
                    interleave,
                },
                name,
                columns,
            },
        );

        Ok(id)
    }

    pub fn tables(&self) -> impl Iterator<Item = &TableDesc> {
        self.tables.values()
    }

    /// The interleave of a child: the parent's own ancestors followed by the parent.
    fn interleave_in(
        &self,
        table: &str,
        columns: &[ColumnDesc],
        key: &[ColumnOrderInfo],
        parent: &str,
    ) -> Result<Interleave> {
        let parent_desc = self
            .tables
            .get(parent)
            .context(UnknownParentSnafu { table, parent })?;

        let parent_key = &parent_desc.primary_index.columns;
        let prefixed = parent_key.len() <= key.len()
            && parent_key.iter().zip(key).all(|(p, c)| {
                parent_desc.columns[p.column_index].data_type
                    == columns[c.column_index].data_type
                    && p.direction == c.direction
            });
        ensure!(prefixed, InterleavePrefixSnafu { table, parent });

        let mut ancestors = parent_desc.primary_index.interleave.ancestors.clone();
        ancestors.push(parent_desc.as_ancestor());

        Ok(Interleave { ancestors })
    }
}

impl DatabaseCatalog for Catalog {
    fn get_table(&self, name: &str) -> Option<&TableDesc> {
        self.tables.get(name)
    }
}
