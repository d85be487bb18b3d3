//! Table rendering.
//!
//! Cell contents are rendered by the caller, which feeds each cell back
//! through the block pipeline.

use crate::markup::Markup;

/// Render a table from already split header and body cells.
pub(crate) fn render_table<F>(header: &[&str], rows: &[Vec<&str>], mut render_cell: F) -> Markup
where
    F: FnMut(&str) -> Markup,
{
    let mut out = Markup::new();
    out.push_tag("<table><thead><tr>");
    for cell in header {
        out.push_tag("<th>");
        out.push(&render_cell(cell));
        out.push_tag("</th>");
    }
    out.push_tag("</tr></thead><tbody>");
    for row in rows {
        out.push_tag("<tr>");
        for cell in row {
            out.push_tag("<td>");
            out.push(&render_cell(cell));
            out.push_tag("</td>");
        }
        out.push_tag("</tr>");
    }
    out.push_tag("</tbody></table>");
    out
}
