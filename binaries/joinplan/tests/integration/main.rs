use {
    joinplan::cmd::{self, Error},
    std::io::Write,
    tempfile::NamedTempFile,
};

const CATALOG: &str = r#"
[[table]]
name = "parent"
columns = [
    { name = "a", type = "int" },
    { name = "b", type = "varchar(8)" },
]
primary_key = [{ column = "a" }]

[[table]]
name = "child"
interleave_in = "parent"
columns = [
    { name = "a", type = "int" },
    { name = "c", type = "int" },
]
primary_key = [{ column = "a" }, { column = "c", direction = "desc" }]

[[table]]
name = "other"
columns = [
    { name = "a", type = "int" },
]
"#;

fn catalog_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(CATALOG.as_bytes()).unwrap();
    file
}

#[test]
fn explain_interleaved_join() {
    let file = catalog_file();

    let output = cmd::explain(file.path(), "SELECT * FROM parent NATURAL JOIN child").unwrap();

    assert!(output.starts_with("join\n"));
    assert!(output.contains("│ equality: (a) = (a)\n"));
    assert!(output.contains("│ merge join order: +(a=a)\n"));
    assert!(output.contains("│ interleaved: parent -> child\n"));

    file.close().unwrap();
}

#[test]
fn explain_multiple_statements() {
    let file = catalog_file();

    let output = cmd::explain(
        file.path(),
        "SELECT * FROM other CROSS JOIN child; SELECT * FROM parent p JOIN other o ON p.a = o.a",
    )
    .unwrap();

    let plans = output.split("\n\n").collect::<Vec<_>>();
    assert_eq!(plans.len(), 2);
    assert!(plans[0].contains("type: cross"));
    assert!(!plans[0].contains("interleaved"));
    assert!(plans[1].contains("pred: p.a = o.a"));
}

#[test]
fn report_errors() {
    let file = catalog_file();

    let err = cmd::explain(file.path(), "SELECT * FROM parent JOIN child USING (b)").unwrap_err();
    assert!(matches!(err, Error::Plan { .. }));
    assert_eq!(
        err.to_string(),
        r#"column "b" specified in USING does not exist"#
    );

    let err = cmd::explain(file.path(), "SELECT * FROM parent JOIN child").unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));

    let err = cmd::explain(file.path(), ";").unwrap_err();
    assert!(matches!(err, Error::NoStatement));

    let err = cmd::explain(&file.path().with_extension("missing"), "SELECT * FROM parent")
        .unwrap_err();
    assert!(matches!(err, Error::Catalog { .. }));
}
