use rustc_hash::FxHashMap;
use skt_ast::{
    CallData, Expression, ExpressionKind, LabeledExpression, LabeledType, Statement,
    StatementKind, TupleShuffleIndex,
};
use skt_common::TranspilationError;

use super::{ERROR_TRANSLATION, KotlinEmitter};
use crate::context::FunctionTranslation;
use crate::indentation::{self, MAX_LINE_LENGTH};
use crate::type_rewriter::rewrite_type;
use crate::utilities;

impl<'a> KotlinEmitter<'a> {
    // =========================================================================
    // Expressions
    // =========================================================================

    pub fn translate_expression(
        &mut self,
        expression: &Expression,
        indentation: &str,
    ) -> Result<String, TranspilationError> {
        match &expression.kind {
            ExpressionKind::Template { pattern, matches } => {
                self.translate_template(pattern, matches, indentation)
            }
            ExpressionKind::LiteralCode { string }
            | ExpressionKind::LiteralDeclaration { string } => {
                Ok(utilities::interpret_escapes(string))
            }
            ExpressionKind::Array { elements, .. } => {
                let translations = self.translate_expressions(elements, indentation)?;
                Ok(format!("mutableListOf({})", translations.join(", ")))
            }
            ExpressionKind::Dictionary { keys, values, .. } => {
                let key_translations = self.translate_expressions(keys, indentation)?;
                let value_translations = self.translate_expressions(values, indentation)?;
                let entries: Vec<String> = key_translations
                    .iter()
                    .zip(&value_translations)
                    .map(|(key, value)| format!("{key} to {value}"))
                    .collect();
                Ok(format!("mutableMapOf({})", entries.join(", ")))
            }
            ExpressionKind::BinaryOperator {
                left,
                right,
                operator,
                ..
            } => {
                let left_translation = self.translate_expression(left, indentation)?;
                let right_translation = self.translate_expression(right, indentation)?;
                Ok(format!("{left_translation} {operator} {right_translation}"))
            }
            ExpressionKind::Call(call) => self.translate_call(call, indentation),
            ExpressionKind::Closure {
                parameters,
                statements,
                ..
            } => self.translate_closure(parameters, statements, indentation),
            ExpressionKind::DeclarationReference(reference) => {
                Ok(declaration_display_name(&reference.identifier).to_string())
            }
            ExpressionKind::Return { expression } => match expression {
                Some(expression) => {
                    let translation = self.translate_expression(expression, indentation)?;
                    Ok(format!("return {translation}"))
                }
                None => Ok("return".to_string()),
            },
            ExpressionKind::Dot { left, right } => self.translate_dot(left, right, indentation),
            ExpressionKind::LiteralString { value } => Ok(format!("\"{value}\"")),
            ExpressionKind::LiteralCharacter { value } => Ok(format!("'{value}'")),
            ExpressionKind::InterpolatedString { expressions } => {
                self.translate_interpolated_string(expressions, indentation)
            }
            ExpressionKind::PrefixUnary {
                expression,
                operator,
                ..
            } => {
                let translation = self.translate_expression(expression, indentation)?;
                Ok(format!("{operator}{translation}"))
            }
            ExpressionKind::PostfixUnary {
                expression,
                operator,
                ..
            } => {
                let translation = self.translate_expression(expression, indentation)?;
                Ok(format!("{translation}{operator}"))
            }
            ExpressionKind::If {
                condition,
                true_expression,
                false_expression,
            } => {
                let condition_translation = self.translate_expression(condition, indentation)?;
                let true_translation = self.translate_expression(true_expression, indentation)?;
                let false_translation = self.translate_expression(false_expression, indentation)?;
                Ok(format!(
                    "if ({condition_translation}) {{ {true_translation} }} else {{ {false_translation} }}"
                ))
            }
            ExpressionKind::Type { type_name } => Ok(rewrite_type(type_name)),
            ExpressionKind::Subscript {
                subscripted, index, ..
            } => {
                let subscripted_translation = self.translate_expression(subscripted, indentation)?;
                let index_translation = self.translate_expression(index, indentation)?;
                Ok(format!("{subscripted_translation}[{index_translation}]"))
            }
            ExpressionKind::Parentheses { expression } => {
                let translation = self.translate_expression(expression, indentation)?;
                Ok(format!("({translation})"))
            }
            ExpressionKind::ForceValue { expression } => {
                let translation = self.translate_expression(expression, indentation)?;
                Ok(format!("{translation}!!"))
            }
            ExpressionKind::Optional { expression } => {
                let translation = self.translate_expression(expression, indentation)?;
                Ok(format!("{translation}?"))
            }
            ExpressionKind::LiteralInt { value } => Ok(value.to_string()),
            ExpressionKind::LiteralUInt { value } => Ok(format!("{value}u")),
            ExpressionKind::LiteralDouble { value } => Ok(format_double(*value)),
            ExpressionKind::LiteralFloat { value } => Ok(format!("{}f", format_float(*value))),
            ExpressionKind::LiteralBool { value } => Ok(value.to_string()),
            ExpressionKind::NilLiteral => Ok("null".to_string()),
            ExpressionKind::Tuple { pairs } => {
                self.translate_tuple(pairs, None, indentation, false)
            }
            ExpressionKind::TupleShuffle { .. } => {
                self.translate_tuple_shuffle(expression, indentation, false)
            }
            ExpressionKind::Error => Ok(ERROR_TRANSLATION.to_string()),
        }
    }

    fn translate_expressions(
        &mut self,
        expressions: &[Expression],
        indentation: &str,
    ) -> Result<Vec<String>, TranspilationError> {
        let mut translations = Vec::with_capacity(expressions.len());
        for expression in expressions {
            translations.push(self.translate_expression(expression, indentation)?);
        }
        Ok(translations)
    }

    /// Splices translated match values into the pattern. Longest key first:
    /// when one key is a prefix of another, the longer one must win or the
    /// output would depend on map order.
    fn translate_template(
        &mut self,
        pattern: &str,
        matches: &FxHashMap<String, Expression>,
        indentation: &str,
    ) -> Result<String, TranspilationError> {
        let mut keys: Vec<&String> = matches.keys().collect();
        keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let mut result = pattern.to_string();
        for key in keys {
            let translation = self.translate_expression(&matches[key], indentation)?;
            result = result.replace(key.as_str(), &translation);
        }
        Ok(result)
    }

    fn translate_interpolated_string(
        &mut self,
        expressions: &[Expression],
        indentation: &str,
    ) -> Result<String, TranspilationError> {
        let mut result = String::from("\"");
        for expression in expressions {
            if let ExpressionKind::LiteralString { value } = &expression.kind {
                // The front-end encodes an empty segment as a pair of quotes.
                if value == "\"\"" {
                    continue;
                }
                result.push_str(value);
            } else {
                result.push_str("${");
                result.push_str(&self.translate_expression(expression, indentation)?);
                result.push('}');
            }
        }
        result.push('"');
        Ok(result)
    }

    /// Dot accesses onto registered sealed classes and enum classes get
    /// their case names rewritten; everything else passes through.
    fn translate_dot(
        &mut self,
        left: &Expression,
        right: &Expression,
        indentation: &str,
    ) -> Result<String, TranspilationError> {
        let left_translation = self.translate_expression(left, indentation)?;
        let right_translation = self.translate_expression(right, indentation)?;

        if self.ctx.is_sealed_class(&left_translation) {
            let capitalized = utilities::capitalized_as_camel_case(&right_translation);
            return Ok(format!("{left_translation}.{capitalized}()"));
        }

        let last_component = left_translation
            .rsplit('.')
            .next()
            .unwrap_or(&left_translation);
        if self.ctx.is_enum_class(last_component) {
            let upper = utilities::upper_snake_case(&right_translation);
            return Ok(format!("{left_translation}.{upper}"));
        }

        Ok(format!("{left_translation}.{right_translation}"))
    }

    // =========================================================================
    // Calls
    // =========================================================================

    /// Calls try the single-line form first and re-emit with newlined
    /// arguments once if the result crosses the line limit.
    pub(super) fn translate_call(
        &mut self,
        call: &CallData,
        indentation: &str,
    ) -> Result<String, TranspilationError> {
        let translation = self.translate_call_with_layout(call, indentation, false)?;
        if translation.chars().count() >= MAX_LINE_LENGTH {
            return self.translate_call_with_layout(call, indentation, true);
        }
        Ok(translation)
    }

    fn translate_call_with_layout(
        &mut self,
        call: &CallData,
        indentation: &str,
        should_add_newlines: bool,
    ) -> Result<String, TranspilationError> {
        let mut result = String::new();

        // Peel the dot chain down to the function itself.
        let mut function_expression: &Expression = &call.function;
        while let ExpressionKind::Dot { left, right } = &function_expression.kind {
            result.push_str(&self.translate_expression(left, indentation)?);
            result.push('.');
            function_expression = right;
        }

        let ctx = self.ctx;
        let function_translation = match &function_expression.kind {
            ExpressionKind::DeclarationReference(reference) => ctx.get_function_translation(
                declaration_display_name(&reference.identifier),
                &reference.type_name,
            ),
            _ => None,
        };

        match function_translation {
            Some(translation) => result.push_str(&translation.prefix),
            None => {
                result.push_str(&self.translate_expression(function_expression, indentation)?);
            }
        }

        result.push_str(&self.translate_call_parameters(
            call,
            function_translation,
            indentation,
            should_add_newlines,
        )?);
        Ok(result)
    }

    fn translate_call_parameters(
        &mut self,
        call: &CallData,
        translation: Option<&FunctionTranslation>,
        indentation: &str,
        should_add_newlines: bool,
    ) -> Result<String, TranspilationError> {
        match &call.parameters.kind {
            ExpressionKind::Tuple { pairs } => {
                // A sole trailing closure drops the parentheses entirely.
                if let Some(last_pair) = pairs.last()
                    && let ExpressionKind::Closure {
                        parameters,
                        statements,
                        ..
                    } = &last_pair.expression.kind
                {
                    let closure_translation = self.translate_closure(
                        parameters,
                        statements,
                        &indentation::increase(indentation),
                    )?;
                    if pairs.len() == 1 {
                        return Ok(format!(" {closure_translation}"));
                    }
                    let remainder = self.translate_tuple(
                        &pairs[..pairs.len() - 1],
                        translation,
                        indentation,
                        should_add_newlines,
                    )?;
                    return Ok(format!("{remainder} {closure_translation}"));
                }
                self.translate_tuple(pairs, translation, indentation, should_add_newlines)
            }
            ExpressionKind::TupleShuffle { .. } => {
                self.translate_tuple_shuffle(&call.parameters, indentation, should_add_newlines)
            }
            _ => self.unexpected_structure(
                "call parameters should be a tuple or a tuple shuffle",
                call.parameters.printable().print(MAX_LINE_LENGTH),
                call.parameters.range,
            ),
        }
    }

    /// Argument lists. A recorded function translation substitutes its
    /// parameter names for the source labels; unlabelled arguments stay
    /// unlabelled either way.
    pub(super) fn translate_tuple(
        &mut self,
        pairs: &[LabeledExpression],
        translation: Option<&FunctionTranslation>,
        indentation: &str,
        should_add_newlines: bool,
    ) -> Result<String, TranspilationError> {
        if pairs.is_empty() {
            return Ok("()".to_string());
        }

        let expression_indentation = if should_add_newlines {
            indentation::increase(indentation)
        } else {
            indentation.to_string()
        };

        let mut arguments = Vec::with_capacity(pairs.len());
        for (index, pair) in pairs.iter().enumerate() {
            let label = match translation {
                Some(translation) => match &pair.label {
                    Some(_) => translation.parameters.get(index).cloned(),
                    None => None,
                },
                None => pair.label.clone(),
            };
            let expression_translation =
                self.translate_expression(&pair.expression, &expression_indentation)?;
            match label {
                Some(label) => arguments.push(format!("{label} = {expression_translation}")),
                None => arguments.push(expression_translation),
            }
        }

        if should_add_newlines {
            Ok(format!(
                "(\n{expression_indentation}{})",
                arguments.join(&format!(",\n{expression_indentation}"))
            ))
        } else {
            Ok(format!("({})", arguments.join(", ")))
        }
    }

    /// Re-ordered/defaulted/variadic-expanded argument lists. Labels are
    /// suppressed up to and including the variadic expansion, since variadic
    /// arguments cannot follow a named one.
    pub(super) fn translate_tuple_shuffle(
        &mut self,
        shuffle: &Expression,
        indentation: &str,
        should_add_newlines: bool,
    ) -> Result<String, TranspilationError> {
        let ExpressionKind::TupleShuffle {
            labels,
            indices,
            expressions,
        } = &shuffle.kind
        else {
            return self.unexpected_structure(
                "expected a tuple shuffle",
                shuffle.printable().print(MAX_LINE_LENGTH),
                shuffle.range,
            );
        };

        if labels.len() != indices.len() {
            return self.unexpected_structure(
                "tuple shuffle labels and indices differ in length",
                shuffle.printable().print(MAX_LINE_LENGTH),
                shuffle.range,
            );
        }

        let expression_indentation = if should_add_newlines {
            indentation::increase(indentation)
        } else {
            indentation.to_string()
        };

        let mut remaining = expressions.iter();
        let mut arguments = Vec::new();
        let mut is_before_variadic = indices
            .iter()
            .any(|index| matches!(index, TupleShuffleIndex::Variadic(_)));

        for (label, index) in labels.iter().zip(indices) {
            match index {
                TupleShuffleIndex::Absent => {}
                TupleShuffleIndex::Present => {
                    let Some(expression) = remaining.next() else {
                        return self.unexpected_structure(
                            "tuple shuffle ran out of expressions",
                            shuffle.printable().print(MAX_LINE_LENGTH),
                            shuffle.range,
                        );
                    };
                    let translation =
                        self.translate_expression(expression, &expression_indentation)?;
                    if is_before_variadic {
                        arguments.push(translation);
                    } else {
                        arguments.push(format!("{label} = {translation}"));
                    }
                }
                TupleShuffleIndex::Variadic(count) => {
                    is_before_variadic = false;
                    for _ in 0..*count {
                        let Some(expression) = remaining.next() else {
                            return self.unexpected_structure(
                                "tuple shuffle ran out of expressions",
                                shuffle.printable().print(MAX_LINE_LENGTH),
                                shuffle.range,
                            );
                        };
                        arguments
                            .push(self.translate_expression(expression, &expression_indentation)?);
                    }
                }
            }
        }

        if should_add_newlines {
            Ok(format!(
                "(\n{expression_indentation}{})",
                arguments.join(&format!(",\n{expression_indentation}"))
            ))
        } else {
            Ok(format!("({})", arguments.join(", ")))
        }
    }

    // =========================================================================
    // Closures
    // =========================================================================

    pub(super) fn translate_closure(
        &mut self,
        parameters: &[LabeledType],
        statements: &[Statement],
        indentation: &str,
    ) -> Result<String, TranspilationError> {
        if statements.is_empty() {
            return Ok("{ }".to_string());
        }

        let mut result = String::from("{");
        if !parameters.is_empty() {
            let labels: Vec<&str> = parameters
                .iter()
                .map(|parameter| parameter.label.as_str())
                .collect();
            result.push(' ');
            result.push_str(&labels.join(", "));
            result.push_str(" ->");
        }

        // A single expression stays on one line.
        if statements.len() == 1
            && let StatementKind::ExpressionStatement { expression } = &statements[0].kind
        {
            let translation = self.translate_expression(expression, indentation)?;
            return Ok(format!("{result} {translation} }}"));
        }

        result.push('\n');
        let increased = indentation::increase(indentation);
        result.push_str(&self.translate_statements(
            statements,
            &increased,
            super::SHORT_BODY_LIMIT,
        )?);
        result.push_str(indentation);
        result.push('}');
        Ok(result)
    }
}

/// Identifier up to (not including) the first `(`.
fn declaration_display_name(identifier: &str) -> &str {
    identifier.split('(').next().unwrap_or(identifier)
}

/// Doubles keep a fractional part the way the source language prints them,
/// so `1.0` does not collapse to `1`.
fn format_double(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

fn format_float(value: f32) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
