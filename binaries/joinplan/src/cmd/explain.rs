use {
    super::error::{self, Result},
    binder::Catalog,
    parser::Parser,
    planner::{plan, Planner},
    snafu::prelude::*,
    std::path::Path,
};

/// Explains the plan of every statement in `sql`, separated by blank lines.
pub fn explain(catalog: &Path, sql: &str) -> Result<String> {
    let catalog = Catalog::load(catalog).context(error::CatalogSnafu)?;
    let stmts = Parser::parse(sql).context(error::ParseSnafu)?;
    ensure!(!stmts.is_empty(), error::NoStatementSnafu);

    let planner = Planner::new(&catalog);
    let mut outputs = vec![];

    for stmt in stmts {
        let node = planner.build_plan(stmt).context(error::PlanSnafu)?;
        outputs.push(plan::explain(node.as_ref()));
        node.close().context(error::PlanSnafu)?;
    }

    Ok(outputs.join("\n"))
}
