//! Lowered AST for the skt transpiler.
//!
//! Earlier passes parse the Swift source, remove sugar, and hoist anything
//! the emitter does not handle in place; what remains is this tree. The
//! emitter walks it recursively and prints Kotlin.

pub mod ast;
pub mod printable;

pub use ast::*;
pub use printable::PrintableTree;
