//! Terminal table rendering for the filtered report

use crate::report::FilteredReport;
use csv::StringRecord;

/// Render the header and rows as a left-aligned, space-padded table
///
/// Widths are measured in characters, not bytes, so non-ASCII peer aliases
/// stay aligned.
pub fn render_table(header: &StringRecord, rows: &[StringRecord]) -> String {
    let columns = header.len();
    let mut widths: Vec<usize> = header.iter().map(char_width).collect();
    for row in rows {
        for (i, field) in row.iter().enumerate().take(columns) {
            let width = char_width(field);
            if width > widths[i] {
                widths[i] = width;
            }
        }
    }

    let mut output = String::new();
    render_row(&mut output, header, &widths);
    for row in rows {
        render_row(&mut output, row, &widths);
    }
    output
}

fn char_width(field: &str) -> usize {
    field.chars().count()
}

fn render_row(output: &mut String, row: &StringRecord, widths: &[usize]) {
    let last = widths.len().saturating_sub(1);
    for (i, width) in widths.iter().copied().enumerate() {
        let field = row.get(i).unwrap_or("");
        if i == last {
            // No trailing padding on the final column
            output.push_str(field);
        } else {
            output.push_str(&format!("{:<width$}  ", field, width = width));
        }
    }
    output.push('\n');
}

/// Print the filtered report to stdout, with a note when fewer rows qualify
/// than the table was asked to show
pub fn print_report(report: &FilteredReport, table_size: usize, min_age_days: f64) {
    print!("{}", render_table(&report.header, &report.worst));
    if let Some(note) = qualifying_note(report.qualifying, table_size, min_age_days) {
        println!("{}", note);
    }
}

/// The explanatory note shown when fewer rows qualify than requested
pub fn qualifying_note(qualifying: usize, table_size: usize, min_age_days: f64) -> Option<String> {
    if qualifying >= table_size {
        return None;
    }
    Some(format!(
        "Note: only {} open channels at least {} days old with a positive local balance were found.",
        qualifying, min_age_days
    ))
}
