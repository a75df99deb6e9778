use skt_ast::{Expression, FunctionDeclaration, Statement, StatementKind};
use skt_common::TranspilationError;

use super::KotlinEmitter;
use crate::indentation::{self, MAX_LINE_LENGTH};
use crate::type_rewriter::rewrite_type;
use crate::utilities;

impl<'a> KotlinEmitter<'a> {
    // =========================================================================
    // Functions
    // =========================================================================

    /// Functions and initializers share one emission path; initializers get
    /// the `constructor` keyword and an optional `: super(…)` clause in
    /// place of a return type.
    pub(super) fn translate_function(
        &mut self,
        function: &FunctionDeclaration,
        super_call: Option<&Expression>,
        is_initializer: bool,
        indentation: &str,
    ) -> Result<String, TranspilationError> {
        if function.is_implicit {
            return Ok(String::new());
        }

        let header =
            self.translate_function_header(function, super_call, is_initializer, indentation, false)?;
        let (header, is_multiline) = if header.chars().count() >= MAX_LINE_LENGTH {
            let wrapped = self.translate_function_header(
                function,
                super_call,
                is_initializer,
                indentation,
                true,
            )?;
            (wrapped, true)
        } else {
            (header, false)
        };

        let Some(statements) = &function.statements else {
            // Bodiless declarations (protocol requirements) are just the
            // signature.
            return Ok(format!("{header}\n"));
        };

        let mut result = header;
        if is_multiline {
            result.push('\n');
            result.push_str(indentation);
            result.push_str("{\n");
        } else {
            result.push_str(" {\n");
        }
        result.push_str(&self.translate_function_body(statements, indentation)?);
        result.push_str(indentation);
        result.push_str("}\n");
        Ok(result)
    }

    /// Everything up to (but not including) the opening brace. With
    /// `should_add_newlines`, parameters go one per line and the closing
    /// paren and return clause get their own lines.
    fn translate_function_header(
        &mut self,
        function: &FunctionDeclaration,
        super_call: Option<&Expression>,
        is_initializer: bool,
        indentation: &str,
        should_add_newlines: bool,
    ) -> Result<String, TranspilationError> {
        let mut result = String::from(indentation);

        if is_initializer {
            result.push_str("constructor(");
        } else if function.prefix == "invoke" {
            result.push_str("operator fun invoke(");
        } else {
            if let Some(annotations) = &function.annotations {
                result.push_str(annotations);
                result.push(' ');
            }
            if let Some(access) = &function.access {
                result.push_str(access);
                result.push(' ');
            }
            result.push_str("fun ");

            // The receiver's generics and the declaration's own generics
            // merge into a single clause, receiver first.
            let mut generics: Vec<String> = Vec::new();
            let mut extension_string = String::new();
            if let Some(extends_type) = &function.extends_type {
                let extended = rewrite_type(extends_type);
                if let Some(generic_index) = extended.find('<') {
                    let clause = &extended[generic_index + 1..extended.len() - 1];
                    for generic in utilities::split_type_list(clause, &[", "]) {
                        if !generics.contains(&generic) {
                            generics.push(generic);
                        }
                    }
                }
                extension_string.push_str(&extended);
                extension_string.push('.');
                if function.is_static {
                    extension_string.push_str("Companion.");
                }
            }
            for generic in &function.generic_types {
                if !generics.contains(generic) {
                    generics.push(generic.clone());
                }
            }
            if !generics.is_empty() {
                result.push('<');
                result.push_str(&generics.join(", "));
                result.push_str("> ");
            }

            result.push_str(&extension_string);
            result.push_str(&function.prefix);
            result.push('(');
        }

        let mut parameter_strings = Vec::with_capacity(function.parameters.len());
        for parameter in &function.parameters {
            let mut parameter_string =
                format!("{}: {}", parameter.label, rewrite_type(&parameter.type_name));
            if let Some(value) = &parameter.value {
                parameter_string.push_str(" = ");
                parameter_string.push_str(&self.translate_expression(value, indentation)?);
            }
            parameter_strings.push(parameter_string);
        }

        let return_clause = if is_initializer {
            match super_call {
                Some(call) => format!(": {}", self.translate_expression(call, indentation)?),
                None => String::new(),
            }
        } else if function.return_type != "()" {
            format!(": {}", rewrite_type(&function.return_type))
        } else {
            String::new()
        };

        if !should_add_newlines {
            result.push_str(&parameter_strings.join(", "));
            result.push(')');
            result.push_str(&return_clause);
            return Ok(result);
        }

        let increased = indentation::increase(indentation);
        result.push('\n');
        result.push_str(&increased);
        result.push_str(&parameter_strings.join(&format!(",\n{increased}")));
        result.push('\n');
        result.push_str(indentation);
        result.push(')');
        if !return_clause.is_empty() {
            result.push('\n');
            result.push_str(&increased);
            result.push_str(&return_clause);
        }
        Ok(result)
    }

    /// Direct-child defers turn the body into `try { … } finally { … }`.
    fn translate_function_body(
        &mut self,
        statements: &[Statement],
        indentation: &str,
    ) -> Result<String, TranspilationError> {
        let increased = indentation::increase(indentation);

        let has_defers = statements
            .iter()
            .any(|statement| matches!(statement.kind, StatementKind::Defer { .. }));
        if !has_defers {
            return self.translate_statements(statements, &increased, super::SHORT_BODY_LIMIT);
        }

        let mut deferred: Vec<&Statement> = Vec::new();
        let mut others: Vec<&Statement> = Vec::new();
        for statement in statements {
            match &statement.kind {
                StatementKind::Defer {
                    statements: deferred_statements,
                } => deferred.extend(deferred_statements),
                _ => others.push(statement),
            }
        }

        let inner = indentation::increase(&increased);
        let mut result = format!("{increased}try {{\n");
        result.push_str(&self.translate_statements(
            others.into_iter(),
            &inner,
            super::SHORT_BODY_LIMIT,
        )?);
        result.push_str(&increased);
        result.push_str("} finally {\n");
        result.push_str(&self.translate_statements(
            deferred.into_iter(),
            &inner,
            super::SHORT_BODY_LIMIT,
        )?);
        result.push_str(&increased);
        result.push_str("}\n");
        Ok(result)
    }
}
