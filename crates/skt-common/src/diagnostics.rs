//! Diagnostic values and the `Compiler` sink the emitter reports into.
//!
//! Structural violations found during emission become [`TranspilationError`]s
//! and are handed to [`Compiler::handle_error`]. The sink either accumulates
//! them (the default, so a single run surfaces every problem at once) or
//! hands the error straight back so the caller's `?` aborts the run.

use crate::span::SourceRange;
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DiagnosticCategory {
    Warning,
    Error,
}

/// A structural error: the lowered AST broke one of the emitter's
/// preconditions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TranspilationError {
    pub message: String,
    /// Tree dump of the offending node, when one was available.
    pub ast_dump: Option<String>,
    pub range: Option<SourceRange>,
}

impl TranspilationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ast_dump: None,
            range: None,
        }
    }

    pub fn with_ast_dump(mut self, ast_dump: impl Into<String>) -> Self {
        self.ast_dump = Some(ast_dump.into());
        self
    }

    pub fn with_range(mut self, range: Option<SourceRange>) -> Self {
        self.range = range;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub message: String,
    pub ast_dump: Option<String>,
    pub range: Option<SourceRange>,
}

/// Diagnostic sink shared by every transpilation pass.
///
/// One `Compiler` lives for the duration of a run; independent runs use
/// independent sinks (or call [`Compiler::clear_diagnostics`] in between).
#[derive(Debug, Default)]
pub struct Compiler {
    diagnostics: Vec<Diagnostic>,
    stop_at_first_error: bool,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that rethrows instead of accumulating, aborting the run at the
    /// first structural violation.
    pub fn stopping_at_first_error() -> Self {
        Self {
            diagnostics: Vec::new(),
            stop_at_first_error: true,
        }
    }

    pub fn handle_error(&mut self, error: TranspilationError) -> Result<(), TranspilationError> {
        if self.stop_at_first_error {
            return Err(error);
        }
        self.diagnostics.push(Diagnostic {
            category: DiagnosticCategory::Error,
            message: error.message,
            ast_dump: error.ast_dump,
            range: error.range,
        });
        Ok(())
    }

    pub fn handle_warning(&mut self, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            category: DiagnosticCategory::Warning,
            message: message.into(),
            ast_dump: None,
            range: None,
        });
    }

    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn print_diagnostics(&self) {
        for diagnostic in &self.diagnostics {
            match diagnostic.category {
                DiagnosticCategory::Error => {
                    tracing::error!(range = ?diagnostic.range, "{}", diagnostic.message);
                }
                DiagnosticCategory::Warning => {
                    tracing::warn!(range = ?diagnostic.range, "{}", diagnostic.message);
                }
            }
        }
    }

    pub fn clear_diagnostics(&mut self) {
        self.diagnostics.clear();
    }
}
