//! Plain-text table rendering for console mode.

use crate::loader::extract::{ParsedRow, COLUMNS};

/// Widest a column may grow before its text wraps.
pub const MAX_COLUMN_WIDTH: usize = 25;

/// Extra width around the caption banner.
const BANNER_PADDING: usize = 50;

/// Caption banner followed by a bordered, left-aligned table.
pub fn render(caption: &str, headers: &[String], rows: &[ParsedRow]) -> String {
    let columns = headers.len().max(COLUMNS);

    let header_cells: Vec<Vec<String>> = (0..columns)
        .map(|i| {
            let label = headers
                .get(i)
                .cloned()
                .unwrap_or_else(|| format!("Field {}", i + 1));
            wrap_cell(&label)
        })
        .collect();

    let body: Vec<Vec<Vec<String>>> = rows
        .iter()
        .map(|row| {
            let mut cells = vec![
                wrap_cell(&row.type_name),
                wrap_cell(&row.mutability),
                wrap_cell(&row.description),
                wrap_cell(&row.syntax_examples.join("\n")),
            ];
            cells.resize(columns, vec![String::new()]);
            cells
        })
        .collect();

    let widths: Vec<usize> = (0..columns)
        .map(|i| {
            std::iter::once(&header_cells[i])
                .chain(body.iter().map(|cells| &cells[i]))
                .flatten()
                .map(|line| line.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let rule = rule_line(&widths);
    let banner_width = caption.chars().count() + BANNER_PADDING;

    let mut out = String::new();
    out.push_str(&format!("{:^banner_width$}\n", caption));
    out.push_str(&rule);
    push_row(&mut out, &header_cells, &widths);
    out.push_str(&rule);
    for cells in &body {
        push_row(&mut out, cells, &widths);
    }
    out.push_str(&rule);
    out
}

fn rule_line(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for w in widths {
        line.push_str(&"-".repeat(w + 2));
        line.push('+');
    }
    line.push('\n');
    line
}

fn push_row(out: &mut String, cells: &[Vec<String>], widths: &[usize]) {
    let height = cells.iter().map(Vec::len).max().unwrap_or(1);
    for k in 0..height {
        out.push('|');
        for (cell, w) in cells.iter().zip(widths) {
            let line = cell.get(k).map(String::as_str).unwrap_or("");
            out.push_str(&format!(" {:<w$} |", line, w = *w));
        }
        out.push('\n');
    }
}

/// Split a cell on newlines, then wrap each line at `MAX_COLUMN_WIDTH`.
fn wrap_cell(text: &str) -> Vec<String> {
    text.split('\n').flat_map(wrap_line).collect()
}

fn wrap_line(line: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in line.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        // Hard-break words that cannot fit on a line of their own.
        while word.len() > MAX_COLUMN_WIDTH {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            lines.push(word.drain(..MAX_COLUMN_WIDTH).collect());
        }
        if word.is_empty() {
            continue;
        }

        let word: String = word.into_iter().collect();
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > MAX_COLUMN_WIDTH {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
