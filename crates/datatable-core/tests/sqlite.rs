use datatable_core::{
    Config, DataTable,
    block::find_blocks,
    model::SortKey,
    render::HtmlTableRenderer,
};
use rusqlite::Connection;

// pid, page, attributes
const FIXTURE: &[(i64, &str, &[(&str, &str)])] = &[
    (1, "alpha", &[("color", "red"), ("size", "large"), ("tag", "x"), ("tag", "y")]),
    (2, "beta", &[("color", "blue"), ("size", "small")]),
    (3, "gamma", &[("color", "red"), ("color", "red"), ("tag", "x")]),
    (4, "delta", &[("size", "medium")]),
];

fn store() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE pages (pid INTEGER PRIMARY KEY, page TEXT NOT NULL);
         CREATE TABLE data (pid INTEGER NOT NULL, key TEXT NOT NULL, value TEXT);",
    )
    .unwrap();

    for (pid, page, attributes) in FIXTURE {
        conn.execute("INSERT INTO pages (pid, page) VALUES (?1, ?2)", (pid, page))
            .unwrap();
        for (key, value) in *attributes {
            conn.execute(
                "INSERT INTO data (pid, key, value) VALUES (?1, ?2, ?3)",
                (pid, key, value),
            )
            .unwrap();
        }
    }

    conn
}

fn table() -> DataTable {
    DataTable::new(Config::default()).unwrap()
}

/// Cell values as a sorted list; group order is up to the store.
fn values(cell: &str) -> Vec<&str> {
    let mut values: Vec<&str> = cell.split(", ").collect();
    values.sort_unstable();
    values
}

fn rows(lines: &[&str], sort_param: Option<&str>) -> Vec<Vec<String>> {
    let table = table();
    let parsed = table.parse("", lines.iter().copied());

    table
        .query(&store(), &parsed.spec, sort_param)
        .unwrap()
        .rows
}

#[test]
fn filtered_table_lists_matching_entities() {
    let mut rows = rows(&["cols: %pageid%, color", "filter: color = red", "sort: color"], None);
    rows.sort();

    assert_eq!(
        rows,
        [
            vec!["alpha".to_string(), "red".to_string()],
            vec!["gamma".to_string(), "red".to_string()],
        ]
    );
}

#[test]
fn entities_without_first_selected_attribute_are_dropped() {
    // delta has a size but no color
    let rows = rows(&["cols: %pageid%, color, size", "sort: %pageid%"], None);
    let pages: Vec<&str> = rows.iter().map(|row| row[0].as_str()).collect();

    assert_eq!(pages, ["alpha", "beta", "gamma"]);
}

#[test]
fn missing_later_attributes_become_empty_cells() {
    let rows = rows(&["cols: %pageid%, color, size", "sort: %pageid%"], None);

    assert_eq!(rows[2], ["gamma", "red", ""]);
}

#[test]
fn cross_product_values_are_deduplicated() {
    let rows = rows(&["cols: %pageid%, color, tag", "sort: %pageid%"], None);

    assert_eq!(rows[0][..2], ["alpha", "red"]);
    assert_eq!(values(&rows[0][2]), ["x", "y"]);
    assert_eq!(rows[2], ["gamma", "red", "x"]);
}

#[test]
fn runtime_sort_overrides_directive_sort() {
    let lines = ["cols: %pageid%, size", "sort: size"];

    let directive: Vec<String> = rows(&lines, None).into_iter().map(|row| row[1].clone()).collect();
    assert_eq!(directive, ["large", "medium", "small"]);

    let overridden: Vec<String> = rows(&lines, Some("^size"))
        .into_iter()
        .map(|row| row[1].clone())
        .collect();
    assert_eq!(overridden, ["small", "medium", "large"]);
}

#[test]
fn like_filter_uses_wildcards() {
    let rows = rows(&["cols: %pageid%, size", "filter: size ~ *a*", "sort: ^%pageid%"], None);
    let pages: Vec<&str> = rows.iter().map(|row| row[0].as_str()).collect();

    assert_eq!(pages, ["beta", "alpha"]);
}

#[test]
fn or_filters_widen_the_match() {
    let rows = rows(
        &[
            "cols: %pageid%, color",
            "filter: color = blue",
            "filteror: %pageid% = gamma",
            "sort: %pageid%",
        ],
        None,
    );
    let pages: Vec<&str> = rows.iter().map(|row| row[0].as_str()).collect();

    assert_eq!(pages, ["beta", "gamma"]);
}

#[test]
fn identity_only_table_lists_every_entity() {
    let rows = rows(&["cols: %pageid%"], None);
    let pages: Vec<&str> = rows.iter().map(|row| row[0].as_str()).collect();

    assert_eq!(pages, ["alpha", "beta", "delta", "gamma"]);
}

#[test]
fn quoted_values_cannot_escape_the_literal() {
    let rows = rows(&["cols: %pageid%, color", "filter: color = red' OR '1'='1"], None);

    assert!(rows.is_empty());
}

#[test]
fn directive_without_columns_yields_no_rows() {
    let table = table();
    let parsed = table.parse("", ["sort: color"]);
    let result = table.query(&store(), &parsed.spec, None).unwrap();

    assert!(result.query.is_empty_select());
    assert!(result.rows.is_empty());
}

#[test]
fn renders_block_from_document() {
    let document = "Intro text\n\
        ---- datatable wide ----\n\
        cols: %pageid%, color\n\
        head: Page, Color\n\
        filter: color = red # only red ones\n\
        sort: color\n\
        ----\n";
    let table = table();
    let blocks = find_blocks(document);
    assert_eq!(blocks.len(), 1);

    let parsed = table.parse_block(&blocks[0]);
    assert!(parsed.diagnostics.is_empty());

    let renderer = HtmlTableRenderer::new("/wiki/colors", table.config()).with_wiki_base("/wiki/");
    let html = table
        .render(&store(), &parsed.spec, None, &renderer)
        .unwrap();

    assert!(html.starts_with("<table class=\"inline dataplugin_table wide\">"));
    assert!(html.contains("<span>&darr;</span> <a href=\"/wiki/colors?datasrt=%5Ecolor\""));
    assert!(html.contains("<a href=\"/wiki/alpha\" class=\"wikilink1\">alpha</a>"));
    assert!(html.contains("<a href=\"/wiki/gamma\" class=\"wikilink1\">gamma</a>"));
    assert!(!html.contains("beta"));
}

#[test]
fn custom_aggregate_name_is_registered() {
    let mut config = Config::default();
    config.store.aggregate = "uniq_concat".to_string();
    let table = DataTable::new(config).unwrap();
    let parsed = table.parse("", ["cols: %pageid%, tag", "sort: ^%pageid%"]);

    let result = table.query(&store(), &parsed.spec, None).unwrap();
    assert!(result.query.sql.contains(r#""uniq_concat"(T1."value", ', ')"#));
    assert_eq!(result.rows[1][0], "alpha");
    assert_eq!(values(&result.rows[1][1]), ["x", "y"]);
    assert_eq!(result.query.sort, Some(SortKey::desc("%pageid%")));
}

#[test]
fn keyword_table_names_execute() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"CREATE TABLE "order" (pid INTEGER PRIMARY KEY, "group" TEXT NOT NULL);
           CREATE TABLE "select" (pid INTEGER NOT NULL, key TEXT NOT NULL, value TEXT);
           INSERT INTO "order" VALUES (1, 'alpha'), (2, 'beta');
           INSERT INTO "select" VALUES (1, 'color', 'red'), (2, 'color', 'blue');"#,
    )
    .unwrap();

    let mut config = Config::default();
    config.store.entity_table = "order".to_string();
    config.store.entity_name = "group".to_string();
    config.store.attribute_table = "select".to_string();
    let table = DataTable::new(config).unwrap();
    let parsed = table.parse("", ["cols: %pageid%, color", "sort: ^color"]);

    let result = table.query(&conn, &parsed.spec, None).unwrap();
    assert_eq!(result.rows, [["alpha", "red"], ["beta", "blue"]]);
}
