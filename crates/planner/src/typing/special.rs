use {
    crate::{error::SpecialFunctionNotAllowedSnafu, Result},
    ast::expr::Expression,
};

const AGGREGATES: &[&str] = &[
    "avg", "bool_and", "bool_or", "count", "max", "min", "string_agg", "sum",
];
const GENERATORS: &[&str] = &["generate_series", "unnest", "json_each", "regexp_split_to_table"];

/// Fails on the first construct that may not appear in `clause`: subqueries,
/// window function applications, aggregates and set-returning functions.
pub fn reject_special(expr: &Expression, clause: &'static str) -> Result<()> {
    let mut special = None;
    expr.walk(&mut |e| {
        if special.is_none() {
            special = special_kind(e);
        }
    });

    match special {
        Some((kind, name)) => SpecialFunctionNotAllowedSnafu { kind, name, clause }.fail(),
        None => Ok(()),
    }
}

fn special_kind(expr: &Expression) -> Option<(&'static str, String)> {
    match expr {
        Expression::Subquery(_) => Some(("subqueries", "SELECT".to_string())),
        Expression::Exists(_) => Some(("subqueries", "EXISTS".to_string())),
        Expression::FunctionCall { func, over, .. } => {
            let name = func.0.to_lowercase();
            let kind = if over.is_some() {
                "window functions"
            } else if AGGREGATES.contains(&name.as_str()) {
                "aggregate functions"
            } else if GENERATORS.contains(&name.as_str()) {
                "generator functions"
            } else {
                return None;
            };

            Some((kind, name))
        }
        _ => None,
    }
}
