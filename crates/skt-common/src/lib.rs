//! Shared infrastructure for the skt transpiler.
//!
//! This crate provides:
//! - Source ranges carried by AST nodes
//! - Diagnostic values and the `Compiler` sink all passes report into

pub mod diagnostics;
pub mod span;

pub use diagnostics::{Compiler, Diagnostic, DiagnosticCategory, TranspilationError};
pub use span::SourceRange;
