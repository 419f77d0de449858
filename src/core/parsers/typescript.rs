use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Result, anyhow};
use swc_common::{FileName, Globals, SourceFile, SourceMap, Span, sync::Lrc};
use swc_ecma_ast::Module;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

use crate::core::data::TextSpan;

/// A parsed TypeScript file together with what is needed to turn swc spans
/// back into file offsets.
pub struct ParsedSource {
    pub path: PathBuf,
    pub code: String,
    pub module: Module,
    pub source_map: Arc<SourceMap>,
    pub source_file: Lrc<SourceFile>,
}

impl ParsedSource {
    /// Convert an swc span (source-map global) to a file-relative span.
    pub fn relative_span(&self, span: Span) -> TextSpan {
        let base = self.source_file.start_pos.0;
        TextSpan::new(
            span.lo.0.saturating_sub(base),
            span.hi.0.saturating_sub(base),
        )
    }

    /// Source text covered by a file-relative span, if it lies inside the file.
    pub fn text(&self, span: TextSpan) -> Option<&str> {
        self.code.get(span.start as usize..span.end as usize)
    }

    pub fn len(&self) -> u32 {
        self.code.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }
}

/// Angular sources are plain `.ts`; only `.tsx` enables JSX, since JSX mode
/// rejects `<T>expr` casts.
fn syntax_for(path: &Path) -> Syntax {
    let tsx = path.extension().is_some_and(|ext| ext == "tsx");
    Syntax::Typescript(TsSyntax {
        tsx,
        decorators: true,
        ..Default::default()
    })
}

/// Parse TypeScript source code into an AST.
///
/// Accepts a shared SourceMap so files can be parsed on worker threads.
pub fn parse_ts_source(
    code: String,
    file_path: &Path,
    source_map: Arc<SourceMap>,
) -> Result<ParsedSource> {
    use swc_common::GLOBALS;

    GLOBALS.set(&Globals::new(), || {
        let source_file = source_map.new_source_file(
            FileName::Real(file_path.to_path_buf()).into(),
            code.clone(),
        );

        let mut parser = Parser::new(
            syntax_for(file_path),
            StringInput::from(&*source_file),
            None,
        );

        let module = parser
            .parse_module()
            .map_err(|e| anyhow!("Failed to parse TypeScript: {:?}", e))?;

        Ok(ParsedSource {
            path: file_path.to_path_buf(),
            code,
            module,
            source_map,
            source_file,
        })
    })
}
