//! Report formatting and printing utilities.
//!
//! Replacements are displayed in cargo-style format. Separate from core logic
//! so the migration can be used as a library.

use std::{
    collections::{BTreeSet, HashMap},
    io::{self, Write},
    sync::Arc,
};

use colored::Colorize;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::{
    core::{
        data::{ProjectFile, Replacement},
        migrate::{AT_METHOD, GET_METHOD},
    },
    issues::{LoadIssue, SkippedReference},
    utils::line_col,
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Machine readable plan, printed by `plan --format json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanReport<'a> {
    pub references_checked: usize,
    pub replacements: &'a [Replacement],
    pub load_issues: &'a [LoadIssue],
    pub skipped_references: &'a [SkippedReference],
}

/// Print the plan as pretty JSON to stdout.
pub fn print_json(report: &PlanReport<'_>) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, report)?;
    writeln!(stdout)?;
    Ok(())
}

/// Print replacements in cargo-style format to stdout.
pub fn print_plan(replacements: &[Replacement], sources: &HashMap<ProjectFile, Arc<str>>) {
    print_plan_to(replacements, sources, &mut io::stdout().lock());
}

/// Print replacements to a custom writer.
pub fn print_plan_to<W: Write>(
    replacements: &[Replacement],
    sources: &HashMap<ProjectFile, Arc<str>>,
    writer: &mut W,
) {
    if replacements.is_empty() {
        return;
    }

    for replacement in replacements {
        print_replacement(replacement, sources.get(&replacement.file), writer);
    }

    let files: BTreeSet<&ProjectFile> = replacements.iter().map(|r| &r.file).collect();
    let _ = writeln!(
        writer,
        "{} {} `{}` call(s) in {} file(s).",
        "Would rewrite".yellow().bold(),
        replacements.len(),
        GET_METHOD,
        files.len()
    );
}

/// Print a success message when nothing needs rewriting.
pub fn print_success(references: usize, files: usize) {
    print_success_to(references, files, &mut io::stdout().lock());
}

/// Print a success message to a custom writer.
pub fn print_success_to<W: Write>(references: usize, files: usize, writer: &mut W) {
    let msg = format!(
        "Checked {} {} in {} {} - nothing to migrate",
        references,
        if references == 1 {
            "reference"
        } else {
            "references"
        },
        files,
        if files == 1 { "file" } else { "files" }
    );
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), msg.green());
}

/// Print files that could not be loaded to stderr.
pub fn print_load_issues(issues: &[LoadIssue]) {
    print_load_issues_to(issues, &mut io::stderr().lock());
}

pub fn print_load_issues_to<W: Write>(issues: &[LoadIssue], writer: &mut W) {
    for issue in issues {
        let _ = writeln!(
            writer,
            "{} {} could not load {} file {}: {}",
            FAILURE_MARK.red(),
            "error:".bold().red(),
            issue.kind,
            issue.file_path,
            issue.error
        );
    }
}

/// Print a warning about manifest entries that were skipped.
pub fn print_skipped_warning(count: usize, verbose: bool) {
    print_skipped_warning_to(count, verbose, &mut io::stderr().lock());
}

/// Print a skipped-reference warning to a custom writer.
///
/// In verbose mode each entry was already reported while loading.
pub fn print_skipped_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} reference(s) were skipped (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_replacement<W: Write>(replacement: &Replacement, source: Option<&Arc<str>>, writer: &mut W) {
    let update = &replacement.update;
    let _ = writeln!(
        writer,
        "{}: {}() -> {}()",
        "rewrite".bold().yellow(),
        GET_METHOD,
        AT_METHOD
    );

    let location = source.and_then(|text| line_col(text, update.position as usize));
    let Some(pos) = location else {
        let _ = writeln!(
            writer,
            "  {} {}@{}..{}",
            "-->".blue(),
            replacement.file,
            update.position,
            update.end
        );
        let _ = writeln!(writer);
        return;
    };

    let line_label = pos.line.to_string();
    let gutter = " ".repeat(line_label.len() + 2);
    let _ = writeln!(
        writer,
        "{}{} {}:{}:{}",
        " ".repeat(line_label.len() + 1),
        "-->".blue(),
        replacement.file,
        pos.line,
        pos.col
    );
    let _ = writeln!(writer, "{}{}", gutter, "|".blue());
    let _ = writeln!(
        writer,
        " {} {} {}",
        line_label.blue(),
        "|".blue(),
        pos.source_line
    );

    let prefix: String = pos.source_line.chars().take(pos.col - 1).collect();
    let caret_padding = UnicodeWidthStr::width(prefix.as_str());
    let carets = "^".repeat(update.end.saturating_sub(update.position).max(1) as usize);
    let _ = writeln!(
        writer,
        "{}{} {:>padding$}{} {}",
        gutter,
        "|".blue(),
        "",
        carets.red(),
        format!("help: replace with `{}`", update.to_insert).dimmed(),
        padding = caret_padding
    );
    let _ = writeln!(writer);
}
