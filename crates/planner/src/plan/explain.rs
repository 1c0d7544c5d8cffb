use {super::Plannable, crate::DataSourceInfo, def::ColumnOrderInfo};

/// Renders a plan as an indented tree, one node per line followed by its attributes.
pub fn explain(plan: &dyn Plannable) -> String {
    let mut out = String::new();
    write_node(&mut out, plan, "", "");
    out
}

fn write_node(out: &mut String, node: &dyn Plannable, first: &str, rest: &str) {
    out.push_str(first);
    out.push_str(node.name());
    out.push('\n');

    let children = node.children();
    let bar = if children.is_empty() { "  " } else { "│ " };

    let mut attrs = node.attributes();
    attrs.push(("columns", format_columns(node.columns())));
    if !node.props().ordering.is_empty() {
        attrs.push((
            "ordering",
            format_ordering(&node.props().ordering, node.columns()),
        ));
    }

    for (key, value) in attrs {
        out.push_str(&format!("{}{}{}: {}\n", rest, bar, key, value));
    }

    for (i, child) in children.iter().enumerate() {
        let (first, next) = if i + 1 == children.len() {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };

        write_node(
            out,
            *child,
            &format!("{}{}", rest, first),
            &format!("{}{}", rest, next),
        );
    }
}

fn format_columns(info: &DataSourceInfo) -> String {
    let columns = info
        .columns()
        .iter()
        .map(|col| {
            let name = match &col.table {
                Some(table) => format!("{}.{}", table, col.name),
                None => col.name.clone(),
            };

            if col.hidden {
                format!("{} {}[hidden]", name, col.data_type)
            } else {
                format!("{} {}", name, col.data_type)
            }
        })
        .collect::<Vec<_>>();

    format!("({})", columns.join(", "))
}

fn format_ordering(ordering: &[ColumnOrderInfo], info: &DataSourceInfo) -> String {
    ordering
        .iter()
        .map(|o| match info.columns().get(o.column_index) {
            Some(col) => format!("{}{}", o.direction, col.name),
            None => format!("{}#{}", o.direction, o.column_index),
        })
        .collect::<Vec<_>>()
        .join(",")
}
