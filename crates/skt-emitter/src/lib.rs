//! Kotlin source emission for the skt transpiler.
//!
//! This crate provides:
//! - The recursive AST-to-Kotlin translator
//! - The source-to-target type rewriter
//! - The per-run translation context (registries populated by earlier passes)
//! - Indentation and line-width constants shared by both emitters

pub mod context;
pub mod emitter;
pub mod indentation;
pub mod type_rewriter;
pub mod utilities;

pub use context::{FunctionTranslation, TranslationContext};
pub use emitter::{ERROR_TRANSLATION, KotlinEmitter};
