//! Report formatting and printing utilities.
//!
//! Separate from core logic so the generator can be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    CheckSummary, CommandResult, CommandSummary, ComponentRow, GenerateSummary, InitSummary,
};
use crate::config::CONFIG_FILE_NAME;
use crate::manifest::assemble::ComponentOrigin;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

const TABLE_HEADERS: [&str; 4] = ["Component", "Props", "Composes", "Source"];

pub fn print(result: &CommandResult, verbose: bool) {
    match &result.summary {
        CommandSummary::Generate(summary) => print_generate(summary, verbose),
        CommandSummary::Check(summary) => print_check(summary, verbose),
        CommandSummary::Init(summary) => print_init(summary),
    }
}

fn print_generate(summary: &GenerateSummary, verbose: bool) {
    if verbose {
        let mut stderr = io::stderr().lock();
        print_components_to(&summary.components, summary.file_count, &mut stderr);
        print_duplicates_to(&summary.duplicates, &mut stderr);
    }
    print_written_to(summary, &mut io::stdout().lock());
}

fn print_check(summary: &CheckSummary, verbose: bool) {
    if verbose {
        let mut stderr = io::stderr().lock();
        print_components_to(&summary.components, summary.file_count, &mut stderr);
        print_duplicates_to(&summary.duplicates, &mut stderr);
    }
    print_check_to(summary, &mut io::stdout().lock());
}

fn print_init(summary: &InitSummary) {
    if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else {
        eprintln!("Error: {} already exists", CONFIG_FILE_NAME);
    }
}

/// The single line printed after a successful `generate`.
pub fn print_written_to<W: Write>(summary: &GenerateSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "Wrote {} with {} components. Import path: {}",
        summary.output,
        summary.components.len(),
        summary.import_path
    );
}

pub fn print_check_to<W: Write>(summary: &CheckSummary, writer: &mut W) {
    let line = if summary.up_to_date {
        format!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("{} is up to date", summary.output).green()
        )
    } else if summary.exists {
        format!(
            "{} {} is out of date (run {})",
            FAILURE_MARK.red(),
            summary.output,
            "generate".cyan()
        )
    } else {
        format!(
            "{} {} does not exist (run {})",
            FAILURE_MARK.red(),
            summary.output,
            "generate".cyan()
        )
    };
    let _ = writeln!(writer, "{}", line);
}

/// Print the component table, columns aligned by display width.
pub fn print_components_to<W: Write>(rows: &[ComponentRow], file_count: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "Scanned {} component {}",
        file_count,
        if file_count == 1 { "file" } else { "files" }
    );
    if rows.is_empty() {
        return;
    }

    let cells: Vec<[String; 4]> = rows
        .iter()
        .map(|row| {
            [
                row.name.clone(),
                row.prop_count.to_string(),
                if row.composes.is_empty() {
                    "-".to_string()
                } else {
                    row.composes.join(", ")
                },
                row.source.clone(),
            ]
        })
        .collect();

    let mut widths = TABLE_HEADERS.map(UnicodeWidthStr::width);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(UnicodeWidthStr::width(cell.as_str()));
        }
    }

    let header: Vec<String> = TABLE_HEADERS
        .iter()
        .zip(widths)
        .map(|(title, width)| pad(title, width))
        .collect();
    let _ = writeln!(writer, "{}", header.join("  ").trim_end().bold());

    for row in &cells {
        let line: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| pad(cell, width))
            .collect();
        let _ = writeln!(writer, "{}", line.join("  ").trim_end());
    }
}

pub fn print_duplicates_to<W: Write>(duplicates: &[ComponentOrigin], writer: &mut W) {
    for duplicate in duplicates {
        let _ = writeln!(
            writer,
            "{} Duplicate component '{}' in {} ignored",
            "note:".bold().cyan(),
            duplicate.name,
            duplicate.file
        );
    }
}

/// Left-align `text` to `width` display columns.
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(UnicodeWidthStr::width(text));
    format!("{}{}", text, " ".repeat(fill))
}
