use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::LoaderError;

/// Cells a data row must have: type, mutability, description, examples.
pub const COLUMNS: usize = 4;

/// One normalized data row of the captioned table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    pub type_name: String,
    pub mutability: String,
    pub description: String,
    pub syntax_examples: Vec<String>,
}

/// Header labels (possibly empty) and data rows of the captioned table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedTable {
    pub headers: Vec<String>,
    pub rows: Vec<ParsedRow>,
}

lazy_static! {
    static ref CAPTION: Selector = Selector::parse("caption").unwrap();
    static ref TR: Selector = Selector::parse("tr").unwrap();
    static ref TH: Selector = Selector::parse("th").unwrap();
    static ref TD: Selector = Selector::parse("td").unwrap();
    static ref CODE: Selector = Selector::parse("code").unwrap();
    static ref CITATION_RE: Regex = Regex::new(r"\[[0-9]+\]").unwrap();
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}

fn strip_newlines(s: &str) -> String {
    s.replace('\n', "")
}

/// Drop citation markers such as `[12]`.
fn strip_citations(s: &str) -> String {
    CITATION_RE.replace_all(s, "").into_owned()
}

/// Locate the table whose caption equals `caption` and normalize its rows.
pub fn extract_table(html: &str, caption: &str) -> Result<ScrapedTable, LoaderError> {
    let document = Html::parse_document(html);
    let table = find_captioned_table(&document, caption)
        .ok_or_else(|| LoaderError::TableNotFound(caption.to_string()))?;

    let mut rows: Vec<ElementRef<'_>> = table.select(&TR).collect();
    let mut headers = Vec::new();
    if let Some(first) = rows.first() {
        let labels: Vec<String> = first
            .select(&TH)
            .map(|cell| strip_newlines(&text_of(cell)))
            .collect();
        if !labels.is_empty() {
            headers = labels;
            rows.remove(0);
        }
    }

    let rows = rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| parse_row(row, i + 1))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ScrapedTable { headers, rows })
}

/// The last caption in document order wins when several match.
fn find_captioned_table<'a>(document: &'a Html, caption: &str) -> Option<ElementRef<'a>> {
    let table = document
        .select(&CAPTION)
        .filter(|c| strip_newlines(&text_of(*c)) == caption)
        .filter_map(|c| {
            c.ancestors()
                .filter_map(ElementRef::wrap)
                .find(|e| e.value().name() == "table")
        })
        .last();
    table
}

fn parse_row(row: ElementRef<'_>, index: usize) -> Result<ParsedRow, LoaderError> {
    let cells: Vec<ElementRef<'_>> = row.select(&TD).collect();
    if cells.len() != COLUMNS {
        return Err(LoaderError::RowParse {
            row: index,
            reason: format!("expected {COLUMNS} cells, found {}", cells.len()),
        });
    }

    let type_name = cells[0]
        .select(&CODE)
        .next()
        .map(|c| strip_newlines(&text_of(c)))
        .ok_or_else(|| LoaderError::RowParse {
            row: index,
            reason: "type cell has no <code> element".into(),
        })?;

    let mutability = strip_newlines(&text_of(cells[1]));
    let description = strip_citations(&strip_newlines(&text_of(cells[2])));
    let syntax_examples = cells[3].select(&CODE).map(text_of).collect();

    Ok(ParsedRow {
        type_name,
        mutability,
        description,
        syntax_examples,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
<html><body>
<table class="wikitable">
<caption>Other table
</caption>
<tr><th>x</th></tr>
</table>
<table class="wikitable">
<caption>Summary of built-in types
</caption>
<tbody>
<tr><th>Type
</th><th>Mutability
</th><th>Description
</th><th>Syntax examples
</th></tr>
<tr>
<td><code>bool</code>
</td>
<td>immutable
</td>
<td>Boolean value<sup>[35]</sup>
</td>
<td><code>True</code><br><code>False</code>
</td></tr>
<tr>
<td><code>bytearray</code>
</td>
<td>mutable
</td>
<td>Sequence of <a href="/wiki/Byte">bytes</a>[12][7]
</td>
<td><code>bytearray(b'Some ASCII')</code><br><code>bytearray([119, 105, 107, 105])</code>
</td></tr>
</tbody>
</table>
</body></html>
"#;

    #[test]
    fn extracts_headers_and_rows() {
        let table = extract_table(PAGE, "Summary of built-in types").expect("table");
        assert_eq!(
            table.headers,
            vec!["Type", "Mutability", "Description", "Syntax examples"]
        );
        assert_eq!(table.rows.len(), 2);

        let bool_row = &table.rows[0];
        assert_eq!(bool_row.type_name, "bool");
        assert_eq!(bool_row.mutability, "immutable");
        assert_eq!(bool_row.description, "Boolean value");
        assert_eq!(bool_row.syntax_examples, vec!["True", "False"]);

        let bytes_row = &table.rows[1];
        assert_eq!(bytes_row.description, "Sequence of bytes");
        assert_eq!(
            bytes_row.syntax_examples,
            vec!["bytearray(b'Some ASCII')", "bytearray([119, 105, 107, 105])"]
        );
    }

    #[test]
    fn parsing_is_idempotent() {
        let first = extract_table(PAGE, "Summary of built-in types").unwrap();
        let second = extract_table(PAGE, "Summary of built-in types").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn caption_must_match_exactly() {
        let err = extract_table(PAGE, "Summary of built-in").unwrap_err();
        assert!(matches!(err, LoaderError::TableNotFound(ref c) if c == "Summary of built-in"));
    }

    #[test]
    fn last_matching_caption_wins() {
        let html = r#"<table><caption>T</caption>
<tr><td><code>first</code></td><td>immutable</td><td>One</td><td><code>1</code></td></tr>
</table>
<table><caption>T
</caption>
<tr><td><code>second</code></td><td>mutable</td><td>Two</td><td><code>2</code></td></tr>
</table>"#;
        let table = extract_table(html, "T").unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].type_name, "second");
    }

    #[test]
    fn table_without_header_row_keeps_all_rows() {
        let html = r#"<table><caption>T</caption>
<tr><td><code>int</code></td><td>immutable</td><td>Integer</td><td><code>42</code></td></tr>
</table>"#;
        let table = extract_table(html, "T").unwrap();
        assert!(table.headers.is_empty());
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].type_name, "int");
    }

    #[test]
    fn wrong_cell_count_aborts() {
        let html = r#"<table><caption>T</caption>
<tr><td><code>int</code></td><td>immutable</td><td>Integer</td><td><code>42</code></td></tr>
<tr><td><code>str</code></td><td>immutable</td></tr>
</table>"#;
        let err = extract_table(html, "T").unwrap_err();
        assert!(matches!(err, LoaderError::RowParse { row: 2, .. }));
    }

    #[test]
    fn type_cell_without_code_aborts() {
        let html = r#"<table><caption>T</caption>
<tr><td>int</td><td>immutable</td><td>Integer</td><td><code>42</code></td></tr>
</table>"#;
        let err = extract_table(html, "T").unwrap_err();
        assert!(err.to_string().contains("<code>"));
    }

    #[test]
    fn example_cell_without_code_yields_no_examples() {
        let html = r#"<table><caption>T</caption>
<tr><td><code>NoneType</code></td><td>immutable</td><td>Absence of a value</td><td>None</td></tr>
</table>"#;
        let table = extract_table(html, "T").unwrap();
        assert!(table.rows[0].syntax_examples.is_empty());
    }

    #[test]
    fn only_bracketed_numbers_are_removed() {
        assert_eq!(strip_citations("a[1] b[note] c[23]"), "a b[note] c");
    }
}
