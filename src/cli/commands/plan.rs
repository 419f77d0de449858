//! Plan command - Compute `QueryList.get()` to `QueryList.at()` replacements.
//!
//! Replacements are only reported, never written. Text output shows each call
//! site in cargo style; `--format json` prints the full plan for other tools
//! to apply.

use anyhow::Result;

use super::super::{
    args::{OutputFormat, PlanCommand},
    exit_status::ExitStatus,
    report::{self, PlanReport},
};
use crate::{core::MigrationContext, issues::SkippedReference};

pub fn plan(cmd: PlanCommand) -> Result<ExitStatus> {
    let args = &cmd.args;
    let ctx = MigrationContext::new(&args.common)?;
    let plan = ctx.plan();
    let replacements = &plan.replacements;
    let skipped: Vec<SkippedReference> = ctx
        .skipped_references
        .iter()
        .chain(&plan.rejected)
        .cloned()
        .collect();

    match args.format {
        OutputFormat::Json => {
            report::print_json(&PlanReport {
                references_checked: ctx.references.len(),
                replacements,
                load_issues: &ctx.load_issues,
                skipped_references: &skipped,
            })?;
        }
        OutputFormat::Text => {
            if replacements.is_empty() {
                report::print_success(ctx.references.len(), ctx.files_checked());
            } else {
                report::print_plan(replacements, &ctx.sources);
            }
            report::print_load_issues(&ctx.load_issues);
            report::print_skipped_warning(skipped.len(), ctx.verbose);
        }
    }

    if ctx.verbose {
        if ctx.ignored_count > 0 {
            eprintln!("Note: {} reference(s) in ignored files", ctx.ignored_count);
        }
        if ctx.unknown_kinds > 0 {
            eprintln!(
                "Note: {} reference(s) of an unsupported kind were left alone",
                ctx.unknown_kinds
            );
        }
    }

    // Pending rewrites exit 1 so CI can gate on a finished migration.
    if !ctx.load_issues.is_empty() {
        Ok(ExitStatus::Error)
    } else if !replacements.is_empty() {
        Ok(ExitStatus::Failure)
    } else {
        Ok(ExitStatus::Success)
    }
}
