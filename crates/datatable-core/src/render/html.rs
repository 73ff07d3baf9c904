use crate::{
    config::Config,
    model::{ColumnType, Direction, SortKey},
    render::{TableRenderer, TableView, escape_html, percent_encode},
};
use std::fmt::Write as _;

const URL_SCHEMES: [&str; 3] = ["http://", "https://", "ftp://"];

///
/// HtmlTableRenderer
///
/// Renders a `TableView` as an HTML table. Every header links back to
/// `page_url` with the sort parameter set to its column, so clicking the
/// active ascending column flips it to descending.
///

#[derive(Clone, Debug)]
pub struct HtmlTableRenderer {
    page_url: String,
    wiki_base: String,
    sort_param: String,
    marker: char,
    separator: String,
}

impl HtmlTableRenderer {
    #[must_use]
    pub fn new(page_url: impl Into<String>, config: &Config) -> Self {
        Self {
            page_url: page_url.into(),
            wiki_base: "doku.php?id=".to_string(),
            sort_param: config.directive.sort_param.clone(),
            marker: config.directive.descending_marker,
            separator: config.store.separator.clone(),
        }
    }

    /// Prefix for links to entity pages; the page name is appended encoded.
    #[must_use]
    pub fn with_wiki_base(mut self, wiki_base: impl Into<String>) -> Self {
        self.wiki_base = wiki_base.into();
        self
    }

    fn sort_link(&self, param: &str) -> String {
        let joiner = if self.page_url.contains('?') { '&' } else { '?' };

        format!(
            "{}{joiner}{}={}",
            self.page_url,
            percent_encode(&self.sort_param),
            percent_encode(param)
        )
    }

    fn header_cell(&self, out: &mut String, view: &TableView<'_>, key: &str, head: &str) {
        out.push_str("<th>");

        // clicking the active column flips its direction
        let next = match view.sort_for(key) {
            Some(sort) => {
                out.push_str(match sort.direction {
                    Direction::Asc => "<span>&darr;</span> ",
                    Direction::Desc => "<span>&uarr;</span> ",
                });
                SortKey::new(key, sort.direction.reversed())
            }
            None => SortKey::asc(key),
        };
        let param = next.to_param(self.marker);

        let _ = write!(
            out,
            "<a href=\"{}\" title=\"sort by this column\">{}</a></th>",
            escape_html(&self.sort_link(&param)),
            escape_html(head)
        );
    }

    fn format_value(&self, value: &str, ty: &ColumnType) -> String {
        let text = escape_html(value);

        match ty {
            ColumnType::Page => format!(
                "<a href=\"{}{}\" class=\"wikilink1\">{text}</a>",
                escape_html(&self.wiki_base),
                percent_encode(value)
            ),
            ColumnType::Url if URL_SCHEMES.iter().any(|scheme| value.starts_with(scheme)) => {
                format!("<a href=\"{text}\" class=\"urlextern\" rel=\"nofollow\">{text}</a>")
            }
            ColumnType::Mail if value.contains('@') => {
                format!("<a href=\"mailto:{text}\" class=\"mail\">{text}</a>")
            }
            _ => text,
        }
    }

    fn format_cell(&self, cell: &str, ty: &ColumnType) -> String {
        if cell.is_empty() {
            return String::new();
        }

        if self.separator.is_empty() {
            return self.format_value(cell, ty);
        }

        cell.split(self.separator.as_str())
            .map(|value| self.format_value(value, ty))
            .collect::<Vec<_>>()
            .join(&escape_html(&self.separator))
    }
}

impl TableRenderer for HtmlTableRenderer {
    fn render(&self, view: &TableView<'_>) -> String {
        let mut out = String::new();
        let classes = escape_html(view.classes);
        let _ = write!(
            out,
            "<table class=\"inline dataplugin_table {}\">",
            classes.trim()
        );

        out.push_str("<tr>");
        for (column, head) in view.columns.iter().zip(view.headers) {
            self.header_cell(&mut out, view, &column.key, head);
        }
        out.push_str("</tr>");

        for row in view.rows {
            out.push_str("<tr>");
            for (idx, cell) in row.iter().enumerate() {
                let ty = view
                    .columns
                    .get(idx)
                    .map_or(&ColumnType::Text, |column| &column.ty);
                let _ = write!(out, "<td>{}</td>", self.format_cell(cell, ty));
            }
            out.push_str("</tr>");
        }

        out.push_str("</table>");

        out
    }
}
