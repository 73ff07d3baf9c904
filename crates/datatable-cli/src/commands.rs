use crate::{
    Cli, Command, OutputFormat,
    error::{CliError, Result},
    shell::Shell,
};
use datatable_core::{
    Config, DataTable, Error,
    block::find_blocks,
    directive::ParsedDirective,
    model::{SortKey, TableSpec},
    render::HtmlTableRenderer,
};
use rusqlite::Connection;
use serde::Serialize;
use std::{fs, path::Path};

///
/// JsonTable
///
/// Machine-readable render output.
///

#[derive(Debug, Serialize)]
struct JsonTable<'a> {
    sql: &'a str,
    headers: &'a [String],
    sort: Option<&'a SortKey>,
    rows: &'a [Vec<String>],
}

pub fn run(cli: Cli) -> Result<()> {
    let table = DataTable::new(load_config(cli.config.as_deref())?)?;

    match cli.command {
        Command::Compile { file, sort, body } => {
            let spec = parse_file(&table, &file, body)?;
            println!("{}", table.compile(&spec, sort.as_deref()).sql);
        }
        Command::Spec { file, body } => {
            let spec = parse_file(&table, &file, body)?;
            println!("{}", serde_json::to_string_pretty(&spec)?);
        }
        Command::Render {
            file,
            db,
            sort,
            page_url,
            format,
            body,
        } => {
            let spec = parse_file(&table, &file, body)?;
            let conn = Connection::open(&db)?;
            render(&table, &conn, &spec, sort.as_deref(), &page_url, format)?;
        }
        Command::Shell { db } => {
            let conn = match db {
                Some(path) => Some(Connection::open(path)?),
                None => None,
            };
            Shell::new(table, conn)?.run()?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Ok(Config::load(path).map_err(Error::from)?),
        None => Ok(Config::default()),
    }
}

/// Parse the first directive block in `file`, or the whole file when `body`
/// is set, and report diagnostics on stderr.
fn parse_file(table: &DataTable, file: &Path, body: bool) -> Result<TableSpec> {
    let text = fs::read_to_string(file).map_err(|source| CliError::Read {
        path: file.to_path_buf(),
        source,
    })?;

    let parsed = if body {
        table.parse("", text.lines())
    } else {
        let blocks = find_blocks(&text);
        let block = blocks.first().ok_or(Error::NoDirective)?;
        if blocks.len() > 1 {
            tracing::info!(count = blocks.len(), "using the first of several directives");
        }

        table.parse_block(block)
    };

    Ok(report(parsed))
}

pub fn report(parsed: ParsedDirective) -> TableSpec {
    for diagnostic in &parsed.diagnostics {
        eprintln!("{}: {diagnostic}", diagnostic.severity());
    }

    parsed.spec
}

pub fn render(
    table: &DataTable,
    conn: &Connection,
    spec: &TableSpec,
    sort: Option<&str>,
    page_url: &str,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Html => {
            let renderer = HtmlTableRenderer::new(page_url, table.config());
            println!("{}", table.render(conn, spec, sort, &renderer)?);
        }
        OutputFormat::Json => {
            let result = table.query(conn, spec, sort)?;
            let json = JsonTable {
                sql: &result.query.sql,
                headers: &spec.headers,
                sort: result.query.sort.as_ref(),
                rows: &result.rows,
            };
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(())
}
