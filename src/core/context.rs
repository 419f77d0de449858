use std::{
    collections::{BTreeSet, HashMap},
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Result, anyhow};
use glob::Pattern;
use rayon::prelude::*;
use swc_ecma_ast::{Str, Tpl};
use swc_ecma_visit::{Visit, VisitWith};

use crate::{
    cli::args::CommonArgs,
    config::{Config, load_config},
    core::{
        data::{CompilationUnitData, ProgramInfo, ProjectFile, Replacement, TextSpan},
        manifest::{ReferenceEntry, load_manifest},
        migrate::{GET_METHOD, query_list_get_replacement},
        parsers::{ParsedSource, parse_ts_source},
        reference::{
            HostBindingReference, HostPropertyNode, Reference, TemplateReference, TsReference,
        },
    },
    issues::{LoadIssue, LoadIssueKind, SkippedReference},
};

/// Orchestrates a migration run.
///
/// Loading happens eagerly in [`MigrationContext::new`]:
///
/// 1. Load configuration (CLI args > `.queryshiftrc.json` > defaults)
/// 2. Read the reference manifest
/// 3. Drop references in ignored files
/// 4. Parse every TypeScript file a reference points into (in parallel)
/// 5. Read template files so the report can show source lines
/// 6. Materialize `Reference` values
///
/// Files that fail to load are recorded as [`LoadIssue`]s, entries that cannot
/// be materialized as [`SkippedReference`]s. Entries of an unknown kind are
/// only counted. None of these stop the run.
pub struct MigrationContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Project root directory; manifest paths are relative to it.
    pub root_dir: PathBuf,

    pub program: ProgramInfo,

    /// Upstream query metadata from the manifest.
    pub metadata: CompilationUnitData,

    /// References in manifest order.
    pub references: Vec<Reference>,

    /// Number of manifest entries dropped by `ignores`.
    pub ignored_count: usize,

    /// Number of manifest entries whose kind is not handled.
    pub unknown_kinds: usize,

    /// Text of every loaded file, keyed by project file.
    pub sources: HashMap<ProjectFile, Arc<str>>,

    pub load_issues: Vec<LoadIssue>,

    pub skipped_references: Vec<SkippedReference>,

    /// Whether to print verbose diagnostic messages.
    pub verbose: bool,
}

impl MigrationContext {
    /// Create a new `MigrationContext` from command line arguments.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Config file is invalid
    /// - The reference manifest cannot be read or parsed
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let verbose = common_args.verbose;

        let root_dir = common_args
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let config_result = load_config(&root_dir)?;
        if verbose && !config_result.from_file {
            eprintln!("Note: No .queryshiftrc.json found, using default configuration");
        }
        let config = config_result.config;

        let manifest_path = match &common_args.manifest {
            Some(path) => path.clone(),
            None => root_dir.join(&config.manifest),
        };
        let manifest = load_manifest(&manifest_path)?;
        let unknown_kinds = manifest.unknown_kinds;

        let program = ProgramInfo::new(root_dir.clone());
        let ignores = config.ignore_patterns()?;
        let total = manifest.references.len();
        let entries: Vec<ReferenceEntry> = manifest
            .references
            .into_iter()
            .filter(|entry| {
                !entry
                    .file()
                    .is_some_and(|file| is_ignored(&program, file, &ignores))
            })
            .collect();
        let ignored_count = total - entries.len();

        let loaded = load_files(&program, &entries);

        let mut references = Vec::with_capacity(entries.len());
        let mut skipped_references = Vec::new();
        for entry in entries {
            let file_path = entry.file().unwrap_or_default().to_string();
            if loaded.failed.contains(&file_path) {
                continue;
            }
            match materialize(entry, &program, &loaded) {
                Ok(reference) => references.push(reference),
                Err(reason) => {
                    if verbose {
                        eprintln!("Warning: {} - {}", file_path, reason);
                    }
                    skipped_references.push(SkippedReference { file_path, reason });
                }
            }
        }

        Ok(Self {
            config,
            root_dir,
            program,
            metadata: manifest.metadata,
            references,
            ignored_count,
            unknown_kinds,
            sources: loaded.sources,
            load_issues: loaded.issues,
            skipped_references,
            verbose,
        })
    }

    /// Compute every replacement, in reference order.
    ///
    /// References are independent, so they are evaluated in parallel and merged
    /// back in order. A replacement is only kept if the text it overwrites is
    /// `get`.
    pub fn plan(&self) -> MigrationPlan {
        let candidates: Vec<Replacement> = self
            .references
            .par_iter()
            .filter_map(|reference| {
                query_list_get_replacement(reference, &self.program, &self.metadata)
            })
            .collect();

        let mut plan = MigrationPlan::default();
        for replacement in candidates {
            match self.check_target_text(&replacement) {
                Ok(()) => plan.replacements.push(replacement),
                Err(reason) => {
                    if self.verbose {
                        eprintln!("Warning: {} - {}", replacement.file, reason);
                    }
                    plan.rejected.push(SkippedReference {
                        file_path: replacement.file.to_string(),
                        reason,
                    });
                }
            }
        }
        plan
    }

    fn check_target_text(&self, replacement: &Replacement) -> std::result::Result<(), String> {
        let span = replacement.update.span();
        let text = self
            .sources
            .get(&replacement.file)
            .and_then(|code| code.get(span.start as usize..span.end as usize));
        match text {
            Some(GET_METHOD) => Ok(()),
            Some(other) => Err(format!(
                "replacement span {}..{} covers `{}`, not `{}`",
                span.start, span.end, other, GET_METHOD
            )),
            None => Err(format!(
                "replacement span {}..{} is outside the file",
                span.start, span.end
            )),
        }
    }

    /// Number of distinct files the run looked at.
    pub fn files_checked(&self) -> usize {
        self.sources.len()
    }
}

/// Replacements that passed every check, plus the ones that were dropped.
#[derive(Debug, Default)]
pub struct MigrationPlan {
    pub replacements: Vec<Replacement>,
    pub rejected: Vec<SkippedReference>,
}

/// Globs see the normalized project path, so `./src/a.ts` and `src/a.ts` match alike.
fn is_ignored(program: &ProgramInfo, file: &str, ignores: &[Pattern]) -> bool {
    let file = program.project_file(Path::new(file));
    ignores.iter().any(|pattern| pattern.matches(file.as_str()))
}

struct LoadedFiles {
    parsed: HashMap<String, Arc<ParsedSource>>,
    sources: HashMap<ProjectFile, Arc<str>>,
    issues: Vec<LoadIssue>,
    /// Manifest paths that failed to load.
    failed: BTreeSet<String>,
}

fn load_files(program: &ProgramInfo, entries: &[ReferenceEntry]) -> LoadedFiles {
    let ts_files: BTreeSet<&str> = entries
        .iter()
        .filter(|e| e.needs_ts_source())
        .filter_map(|e| e.file())
        .collect();
    let template_files: BTreeSet<&str> = entries
        .iter()
        .filter(|e| !e.needs_ts_source())
        .filter_map(|e| e.file())
        .collect();

    let (ts_results, template_results) = rayon::join(
        || {
            ts_files
                .par_iter()
                .map(|file| {
                    let path = program.root_dir.join(file);
                    let result = std::fs::read_to_string(&path)
                        .map_err(|e| anyhow!("Failed to read file: {}", e))
                        .and_then(|code| {
                            // Each file gets its own SourceMap so workers never share one.
                            let source_map = Arc::new(swc_common::SourceMap::default());
                            parse_ts_source(code, &path, source_map)
                        });
                    (file.to_string(), result)
                })
                .collect::<Vec<_>>()
        },
        || {
            template_files
                .par_iter()
                .map(|file| {
                    let result = std::fs::read_to_string(program.root_dir.join(file))
                        .map_err(|e| anyhow!("Failed to read file: {}", e));
                    (file.to_string(), result)
                })
                .collect::<Vec<_>>()
        },
    );

    let mut loaded = LoadedFiles {
        parsed: HashMap::new(),
        sources: HashMap::new(),
        issues: Vec::new(),
        failed: BTreeSet::new(),
    };

    for (file, result) in ts_results {
        match result {
            Ok(parsed) => {
                loaded.sources.insert(
                    program.project_file(Path::new(&file)),
                    Arc::from(parsed.code.as_str()),
                );
                loaded.parsed.insert(file, Arc::new(parsed));
            }
            Err(e) => loaded.record_failure(file, LoadIssueKind::Source, e),
        }
    }

    for (file, result) in template_results {
        match result {
            Ok(code) => {
                loaded
                    .sources
                    .insert(program.project_file(Path::new(&file)), Arc::from(code));
            }
            Err(e) => loaded.record_failure(file, LoadIssueKind::Template, e),
        }
    }

    loaded.issues.sort();
    loaded
}

impl LoadedFiles {
    fn record_failure(&mut self, file_path: String, kind: LoadIssueKind, error: anyhow::Error) {
        self.failed.insert(file_path.clone());
        self.issues.push(LoadIssue {
            file_path,
            kind,
            error: error.to_string(),
        });
    }
}

/// Turn a manifest entry into a `Reference`, or explain why it cannot be one.
///
/// Every span an entry carries must land inside the text it addresses, so a
/// later replacement cannot spill into unrelated code.
fn materialize(
    entry: ReferenceEntry,
    program: &ProgramInfo,
    loaded: &LoadedFiles,
) -> std::result::Result<Reference, String> {
    match entry {
        ReferenceEntry::Ts {
            target,
            file,
            start,
            end,
        } => {
            let source = loaded
                .parsed
                .get(&file)
                .ok_or_else(|| "source file was not loaded".to_string())?;
            let node = TextSpan::new(start, end);
            if start >= end || source.text(node).is_none() {
                return Err(format!("reference span {}..{} is out of range", start, end));
            }
            Ok(Reference::Ts(TsReference {
                target,
                source: Arc::clone(source),
                node,
            }))
        }
        ReferenceEntry::Template {
            target,
            template_file,
            read,
            expression,
        } => {
            let template_file = program.project_file(Path::new(&template_file));
            let text = loaded
                .sources
                .get(&template_file)
                .ok_or_else(|| "template file was not loaded".to_string())?;
            let end = expression.max_end();
            if end as usize > text.len() {
                return Err(format!(
                    "template expression ends at {} past the end of the file ({})",
                    end,
                    text.len()
                ));
            }
            Ok(Reference::Template(TemplateReference {
                target,
                template_file,
                expression: Arc::new(expression),
                read,
            }))
        }
        ReferenceEntry::HostBinding {
            target,
            file,
            host_property_start,
            read,
            expression,
        } => {
            let source = loaded
                .parsed
                .get(&file)
                .ok_or_else(|| "source file was not loaded".to_string())?;
            let host_property = find_host_property(source, host_property_start).ok_or_else(|| {
                format!(
                    "no single-delimiter string literal starts at offset {}",
                    host_property_start
                )
            })?;
            let fits = host_property
                .expression_start()
                .and_then(|start| start.checked_add(expression.max_end()))
                .is_some_and(|end| end <= host_property.expression_end());
            if !fits {
                return Err(format!(
                    "host expression does not fit inside the literal at {}..{}",
                    host_property.span.start, host_property.span.end
                ));
            }
            Ok(Reference::HostBinding(HostBindingReference {
                target,
                file: program.project_file(Path::new(&file)),
                host_property,
                expression: Arc::new(expression),
                read,
            }))
        }
        ReferenceEntry::Unknown => Err("unknown reference kind".to_string()),
    }
}

/// Locate the string literal holding a host-binding expression.
///
/// Only literals whose text starts with a one-character delimiter qualify:
/// quoted strings and template literals without interpolations. This is what
/// makes `start + 1` the first character of the expression.
pub fn find_host_property(source: &ParsedSource, start: u32) -> Option<HostPropertyNode> {
    let mut finder = HostPropertyFinder {
        source,
        start,
        found: None,
    };
    source.module.visit_with(&mut finder);
    finder.found
}

struct HostPropertyFinder<'a> {
    source: &'a ParsedSource,
    start: u32,
    found: Option<HostPropertyNode>,
}

impl HostPropertyFinder<'_> {
    fn consider(&mut self, span: swc_common::Span, delimiters: &[u8]) {
        if self.found.is_some() {
            return;
        }
        let span = self.source.relative_span(span);
        if span.start != self.start || span.end < span.start + 2 {
            return;
        }
        let opening = self.source.code.as_bytes().get(span.start as usize);
        if opening.is_some_and(|b| delimiters.contains(b)) {
            self.found = Some(HostPropertyNode { span });
        }
    }
}

impl Visit for HostPropertyFinder<'_> {
    fn visit_str(&mut self, node: &Str) {
        self.consider(node.span, b"'\"");
    }

    fn visit_tpl(&mut self, node: &Tpl) {
        if node.exprs.is_empty() {
            self.consider(node.span, b"`");
        }
        node.visit_children_with(self);
    }
}
