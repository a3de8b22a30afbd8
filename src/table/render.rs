//! Table model renderers
//!
//! CSV output follows RFC 4180 quoting. CSV has no merged cells, so a
//! spanning cell's text appears at its anchor slot and the covered slots
//! stay empty; HTML keeps the spans as `rowspan`/`colspan` attributes.

use crate::table::model::TableModel;

/// Render the model as RFC 4180 CSV, one record per logical row
pub fn to_csv(model: &TableModel) -> String {
    let mut out = String::new();
    for row in 0..model.row_count() {
        for col in 0..model.column_count() {
            if col > 0 {
                out.push(',');
            }
            if let Some(cell) = model.cell(row, col) {
                if cell.is_anchored_at(row, col) {
                    out.push_str(&csv_field(&cell.text));
                }
            }
        }
        out.push_str("\r\n");
    }
    out
}

fn csv_field(text: &str) -> String {
    if text.contains(',') || text.contains('"') || text.contains('\n') || text.contains('\r') {
        let mut quoted = String::with_capacity(text.len() + 2);
        quoted.push('"');
        for ch in text.chars() {
            if ch == '"' {
                quoted.push('"');
            }
            quoted.push(ch);
        }
        quoted.push('"');
        quoted
    } else {
        text.to_string()
    }
}

/// Render the model as an HTML table with span attributes
pub fn to_html(model: &TableModel) -> String {
    let mut out = String::from("<table>\n");
    for row in 0..model.row_count() {
        out.push_str("  <tr>");
        for col in 0..model.column_count() {
            let Some(cell) = model.cell(row, col) else {
                out.push_str("<td></td>");
                continue;
            };
            // Covered slots belong to a cell anchored earlier
            if !cell.is_anchored_at(row, col) {
                continue;
            }
            out.push_str("<td");
            if cell.rowspan > 1 {
                out.push_str(&format!(" rowspan=\"{}\"", cell.rowspan));
            }
            if cell.colspan > 1 {
                out.push_str(&format!(" colspan=\"{}\"", cell.colspan));
            }
            out.push('>');
            out.push_str(&html_escape(&cell.text));
            out.push_str("</td>");
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</table>\n");
    out
}

fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\n' => out.push_str("<br>"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::model::TableModelBuilder;

    fn two_by_two() -> TableModel {
        let mut builder = TableModelBuilder::new();
        builder.push_cell(0, 0, 2, 3, "11");
        builder.push_cell(0, 3, 2, 3, "1,2");
        builder.push_cell(2, 0, 2, 3, "21");
        builder.push_cell(2, 3, 2, 3, "22");
        builder.build()
    }

    #[test]
    fn test_csv_rows_and_quoting() {
        let csv = to_csv(&two_by_two());
        assert_eq!(csv, "11,\"1,2\"\r\n21,22\r\n");
    }

    #[test]
    fn test_csv_quote_doubling() {
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("plain"), "plain");
    }

    #[test]
    fn test_csv_spanned_slot_left_empty() {
        let mut builder = TableModelBuilder::new();
        builder.push_cell(0, 0, 4, 3, "a");
        builder.push_cell(0, 3, 2, 3, "b");
        builder.push_cell(2, 3, 2, 3, "c");
        let csv = to_csv(&builder.build());
        assert_eq!(csv, "a,b\r\n,c\r\n");
    }

    #[test]
    fn test_html_escaping_and_structure() {
        let mut builder = TableModelBuilder::new();
        builder.push_cell(0, 0, 2, 3, "a<b");
        let html = to_html(&builder.build());
        assert!(html.contains("<td>a&lt;b</td>"));
        assert!(html.starts_with("<table>"));
    }

    #[test]
    fn test_html_span_attributes() {
        let mut builder = TableModelBuilder::new();
        builder.push_cell(0, 0, 4, 3, "a");
        builder.push_cell(0, 3, 2, 3, "b");
        builder.push_cell(2, 3, 2, 3, "c");
        let html = to_html(&builder.build());
        assert!(html.contains("<td rowspan=\"2\">a</td>"));
        // the covered slot emits nothing
        assert_eq!(html.matches("<td").count(), 3);
    }
}
