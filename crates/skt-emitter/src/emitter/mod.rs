//! The recursive AST-to-Kotlin translator.
//!
//! Dispatch is split across the `statements`, `functions`, and `expressions`
//! impl files the same way the AST splits; everything funnels back through
//! [`KotlinEmitter::translate_statement`] and
//! [`KotlinEmitter::translate_expression`].

mod expressions;
mod functions;
mod statements;

use skt_ast::{ExpressionKind, Module, Statement, StatementKind};
use skt_common::{Compiler, SourceRange, TranspilationError};
use tracing::debug;

use crate::context::TranslationContext;
use crate::indentation;

/// In-band token emitted in place of a subtree that violated the emitter's
/// preconditions. Reserved output; callers may search for it to detect a
/// partial failure.
pub const ERROR_TRANSLATION: &str = "<<Error>>";

/// Function bodies with at most this many statements are emitted without
/// blank lines between them.
const SHORT_BODY_LIMIT: usize = 3;

/// Translates one lowered module into Kotlin source text.
///
/// The emitter borrows the run's [`TranslationContext`] read-only and
/// reports structural violations into the [`Compiler`] sink; translation
/// continues past them with the [`ERROR_TRANSLATION`] sentinel standing in
/// for the offending subtree.
pub struct KotlinEmitter<'a> {
    ctx: &'a TranslationContext,
    compiler: &'a mut Compiler,
}

impl<'a> KotlinEmitter<'a> {
    pub fn new(ctx: &'a TranslationContext, compiler: &'a mut Compiler) -> Self {
        Self { ctx, compiler }
    }

    /// Translates a whole module: declarations first, then the loose
    /// top-level statements inside a synthetic `main`.
    pub fn translate(&mut self, module: &Module) -> Result<String, TranspilationError> {
        debug!(
            declarations = module.declarations.len(),
            statements = module.statements.len(),
            "translating module"
        );

        let declarations = self.translate_statements(&module.declarations, "", 0)?;
        let indentation = indentation::increase("");
        let statements = self.translate_statements(&module.statements, &indentation, 0)?;

        if statements.is_empty() {
            return Ok(declarations);
        }

        let mut result = declarations;
        if !result.is_empty() {
            result.push('\n');
        }
        result.push_str("fun main(args: Array<String>) {\n");
        result.push_str(&statements);
        result.push_str("}\n");
        Ok(result)
    }

    /// Emits a sibling block. Unrelated neighbours get a blank line between
    /// them; blocks whose non-empty translations number at most
    /// `limit_for_adding_newlines` are emitted without any.
    pub fn translate_statements<'s, I>(
        &mut self,
        statements: I,
        indentation: &str,
        limit_for_adding_newlines: usize,
    ) -> Result<String, TranspilationError>
    where
        I: IntoIterator<Item = &'s Statement>,
    {
        let mut translations: Vec<(&Statement, String)> = Vec::new();
        for statement in statements {
            let translation = self.translate_statement(statement, indentation)?;
            if !translation.is_empty() {
                translations.push((statement, translation));
            }
        }

        if translations.len() <= limit_for_adding_newlines {
            return Ok(translations
                .into_iter()
                .map(|(_, translation)| translation)
                .collect());
        }

        let mut result = String::new();
        for (index, (statement, translation)) in translations.iter().enumerate() {
            result.push_str(translation);
            if index + 1 < translations.len()
                && !Self::statements_group_together(statement, translations[index + 1].0)
            {
                result.push('\n');
            }
        }
        Ok(result)
    }

    /// True when no blank line separates `current` from `next`.
    fn statements_group_together(current: &Statement, next: &Statement) -> bool {
        match (&current.kind, &next.kind) {
            (StatementKind::Comment { .. }, _) => true,
            (StatementKind::Variable(_), StatementKind::Variable(_)) => true,
            (StatementKind::Assignment { .. }, StatementKind::Assignment { .. }) => true,
            (StatementKind::Typealias { .. }, StatementKind::Typealias { .. }) => true,
            (StatementKind::Do { .. }, StatementKind::Catch { .. }) => true,
            (StatementKind::Catch { .. }, StatementKind::Catch { .. }) => true,
            (
                StatementKind::ExpressionStatement { expression: left },
                StatementKind::ExpressionStatement { expression: right },
            ) => matches!(
                (&left.kind, &right.kind),
                (ExpressionKind::Call(_), ExpressionKind::Call(_))
                    | (
                        ExpressionKind::Template { .. },
                        ExpressionKind::Template { .. }
                    )
                    | (
                        ExpressionKind::LiteralCode { .. },
                        ExpressionKind::LiteralCode { .. }
                    )
            ),
            _ => false,
        }
    }

    /// Builds the structural-violation diagnostic, forwards it to the sink,
    /// and substitutes the sentinel so emission can continue.
    pub(crate) fn unexpected_structure(
        &mut self,
        message: &str,
        ast_dump: String,
        range: Option<SourceRange>,
    ) -> Result<String, TranspilationError> {
        let error = TranspilationError::new(message)
            .with_ast_dump(ast_dump)
            .with_range(range);
        self.compiler.handle_error(error)?;
        Ok(ERROR_TRANSLATION.to_string())
    }
}
