//! Aligned plain-text tables.

use crate::query::QueryResult;

/// Text table renderer.
pub struct TextRenderer;

impl TextRenderer {
    /// Render a result as a pipe-separated table.
    ///
    /// ```text
    /// name | department
    /// ---- | ----------
    /// Ann  | HR
    /// ```
    ///
    /// Row results end with a `(N rows)` footer; counts render as a
    /// one-column table headed by their label.
    pub fn render(result: &QueryResult) -> String {
        match result {
            QueryResult::Rows { columns, rows } => {
                let mut out = render_grid(columns, rows);
                let noun = if rows.len() == 1 { "row" } else { "rows" };
                out.push_str(&format!("({} {})\n", rows.len(), noun));
                out
            }
            QueryResult::Count { label, value } => {
                render_grid(&[label.clone()], &[vec![value.to_string()]])
            }
        }
    }
}

fn render_grid(columns: &[String], rows: &[Vec<String>]) -> String {
    if columns.is_empty() {
        return "(no columns)\n".to_string();
    }

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(column.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let dashes: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let mut lines = vec![
        format_row(columns.iter().map(String::as_str), &widths),
        format_row(dashes.iter().map(String::as_str), &widths),
    ];
    lines.extend(
        rows.iter()
            .map(|row| format_row(row.iter().map(String::as_str), &widths)),
    );
    lines.push(String::new());
    lines.join("\n")
}

fn format_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
        .collect();
    padded.join(" | ").trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_rows() {
        let result = QueryResult::Rows {
            columns: vec!["name".into(), "department".into()],
            rows: vec![
                vec!["Ann".into(), "HR".into()],
                vec!["Bartholomew".into(), "Engineering".into()],
            ],
        };
        let expected = "\
name        | department
----------- | -----------
Ann         | HR
Bartholomew | Engineering
(2 rows)
";
        assert_eq!(TextRenderer::render(&result), expected);
    }

    #[test]
    fn test_render_single_row_footer() {
        let result = QueryResult::Rows {
            columns: vec!["name".into()],
            rows: vec![vec!["Ann".into()]],
        };
        assert_eq!(TextRenderer::render(&result), "name\n----\nAnn\n(1 row)\n");
    }

    #[test]
    fn test_render_count() {
        let result = QueryResult::Count {
            label: "COUNT(*)".into(),
            value: 3,
        };
        assert_eq!(TextRenderer::render(&result), "COUNT(*)\n--------\n3\n");
    }

    #[test]
    fn test_render_empty() {
        let result = QueryResult::Rows {
            columns: vec![],
            rows: vec![],
        };
        assert_eq!(TextRenderer::render(&result), "(no columns)\n(0 rows)\n");

        let result = QueryResult::Rows {
            columns: vec!["id".into()],
            rows: vec![],
        };
        assert_eq!(TextRenderer::render(&result), "id\n--\n(0 rows)\n");
    }
}
