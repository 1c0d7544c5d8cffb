use {
    clap::{arg, Command},
    joinplan::cmd::{self, Error as ExecutionError},
    snafu::prelude::*,
    std::{env, path::PathBuf, process},
    tracing_subscriber::EnvFilter,
};

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display(
        "the `JOINPLAN_CATALOG` environment variable is unset, you can pass a argument with `-c` to config"
    ))]
    NoCatalog,

    #[snafu(display("{}", source))]
    ExecuteCommand { source: ExecutionError },
}

pub type Result<T> = std::result::Result<T, Error>;

const JOINPLAN_CATALOG: &str = "JOINPLAN_CATALOG";

const EXPLAIN: &str = "explain";

fn cli() -> Command {
    let pkg_name = env!("CARGO_PKG_NAME");

    Command::new(pkg_name)
        .bin_name(pkg_name)
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .subcommand_required(true)
        .subcommand(
            Command::new(EXPLAIN)
                .about("print the plan of a query")
                .arg(arg!(-c --catalog <PATH> "catalog file").required(false))
                .arg(arg!(<SQL> "query to plan")),
        )
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = try_main() {
        eprintln!("{}", err);
        process::exit(2);
    }
}

fn try_main() -> Result<()> {
    let matches = cli().get_matches();
    match matches.subcommand() {
        Some((EXPLAIN, sub_matches)) => {
            let catalog = match sub_matches.get_one::<String>("catalog") {
                Some(path) => PathBuf::from(path),
                None => env::var_os(JOINPLAN_CATALOG)
                    .map(PathBuf::from)
                    .context(NoCatalogSnafu)?,
            };
            let sql = sub_matches
                .get_one::<String>("SQL")
                .map(String::as_str)
                .unwrap_or_default();

            let output = cmd::explain(&catalog, sql).context(ExecuteCommandSnafu)?;
            print!("{}", output);
        }
        _ => unreachable!(),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        cli().debug_assert();
    }

    #[test]
    fn parse_explain() {
        let matches = cli()
            .try_get_matches_from(["joinplan", "explain", "-c", "cat.toml", "SELECT * FROM a"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();

        assert_eq!(name, EXPLAIN);
        assert_eq!(sub.get_one::<String>("catalog").unwrap(), "cat.toml");
        assert_eq!(sub.get_one::<String>("SQL").unwrap(), "SELECT * FROM a");
    }
}
