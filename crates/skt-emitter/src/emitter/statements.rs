use skt_ast::{
    EnumElement, Expression, ExpressionKind, IfCondition, IfData, Statement, StatementKind,
    SwitchCase, VariableDeclaration,
};
use skt_common::TranspilationError;

use super::{ERROR_TRANSLATION, KotlinEmitter};
use crate::indentation::{self, MAX_LINE_LENGTH};
use crate::type_rewriter::rewrite_type;
use crate::utilities;

impl<'a> KotlinEmitter<'a> {
    // =========================================================================
    // Statements
    // =========================================================================

    pub fn translate_statement(
        &mut self,
        statement: &Statement,
        indentation: &str,
    ) -> Result<String, TranspilationError> {
        match &statement.kind {
            StatementKind::Comment { text } => Ok(format!("{indentation}//{text}\n")),
            StatementKind::Import { .. } => Ok(String::new()),
            StatementKind::Extension { .. } => self.unexpected_structure(
                "extension declarations should have been removed by a lowering pass",
                statement.printable().print(MAX_LINE_LENGTH),
                statement.range,
            ),
            StatementKind::Defer { .. } => self.unexpected_structure(
                "defer is only supported as a direct child of a function body",
                statement.printable().print(MAX_LINE_LENGTH),
                statement.range,
            ),
            StatementKind::Typealias {
                identifier,
                type_name,
                is_implicit,
            } => {
                if *is_implicit {
                    return Ok(String::new());
                }
                Ok(format!(
                    "{indentation}typealias {identifier} = {}\n",
                    rewrite_type(type_name)
                ))
            }
            StatementKind::Class {
                name,
                inherits,
                members,
            } => self.translate_class(name, inherits, members, indentation),
            StatementKind::Struct {
                annotations,
                name,
                inherits,
                members,
            } => self.translate_struct(annotations.as_deref(), name, inherits, members, indentation),
            StatementKind::CompanionObject { members } => {
                let increased = indentation::increase(indentation);
                let mut result = format!("{indentation}companion object {{\n");
                result.push_str(&self.translate_statements(members, &increased, 0)?);
                result.push_str(indentation);
                result.push_str("}\n");
                Ok(result)
            }
            StatementKind::Enum {
                access,
                name,
                inherits,
                elements,
                members,
                is_implicit,
            } => {
                if *is_implicit {
                    return Ok(String::new());
                }
                self.translate_enum(
                    access.as_deref(),
                    name,
                    inherits,
                    elements,
                    members,
                    indentation,
                )
            }
            StatementKind::Protocol { name, members } => {
                let increased = indentation::increase(indentation);
                let mut result = format!("{indentation}interface {name} {{\n");
                result.push_str(&self.translate_statements(members, &increased, 0)?);
                result.push_str(indentation);
                result.push_str("}\n");
                Ok(result)
            }
            StatementKind::Do { statements } => {
                let increased = indentation::increase(indentation);
                let mut result = format!("{indentation}try {{\n");
                result.push_str(&self.translate_statements(statements, &increased, 0)?);
                result.push_str(indentation);
                result.push_str("}\n");
                Ok(result)
            }
            StatementKind::Catch {
                variable,
                statements,
            } => {
                let mut result = match variable {
                    Some(variable) => format!(
                        "{indentation}catch ({}: {}) {{\n",
                        variable.identifier,
                        rewrite_type(&variable.type_name)
                    ),
                    None => format!("{indentation}catch {{\n"),
                };
                let increased = indentation::increase(indentation);
                result.push_str(&self.translate_statements(statements, &increased, 0)?);
                result.push_str(indentation);
                result.push_str("}\n");
                Ok(result)
            }
            StatementKind::ForEach {
                collection,
                variable,
                statements,
            } => {
                let variable_translation = self.translate_expression(variable, indentation)?;
                let collection_translation = self.translate_expression(collection, indentation)?;
                let increased = indentation::increase(indentation);
                let mut result = format!(
                    "{indentation}for ({variable_translation} in {collection_translation}) {{\n"
                );
                result.push_str(&self.translate_statements(statements, &increased, 0)?);
                result.push_str(indentation);
                result.push_str("}\n");
                Ok(result)
            }
            StatementKind::While {
                condition,
                statements,
            } => {
                let condition_translation = self.translate_expression(condition, indentation)?;
                let increased = indentation::increase(indentation);
                let mut result = format!("{indentation}while ({condition_translation}) {{\n");
                result.push_str(&self.translate_statements(statements, &increased, 0)?);
                result.push_str(indentation);
                result.push_str("}\n");
                Ok(result)
            }
            StatementKind::Function(function) => {
                self.translate_function(function, None, false, indentation)
            }
            StatementKind::Initializer(initializer) => self.translate_function(
                &initializer.function,
                initializer.super_call.as_ref(),
                true,
                indentation,
            ),
            StatementKind::Throw { expression } => {
                let translation = self.translate_expression(expression, indentation)?;
                Ok(format!("{indentation}throw {translation}\n"))
            }
            StatementKind::Return { expression } => match expression {
                Some(expression) => {
                    let translation = self.translate_expression(expression, indentation)?;
                    Ok(format!("{indentation}return {translation}\n"))
                }
                None => Ok(format!("{indentation}return\n")),
            },
            StatementKind::Break => Ok(format!("{indentation}break\n")),
            StatementKind::Continue => Ok(format!("{indentation}continue\n")),
            StatementKind::Variable(variable) => {
                self.translate_variable_declaration(variable, indentation)
            }
            StatementKind::Assignment { left, right } => {
                let left_translation = self.translate_expression(left, indentation)?;
                let right_translation = self.translate_expression(right, indentation)?;
                Ok(format!(
                    "{indentation}{left_translation} = {right_translation}\n"
                ))
            }
            StatementKind::If(data) => self.translate_if(data, false, indentation),
            StatementKind::Switch {
                converts_to_expression,
                subject,
                cases,
            } => self.translate_switch(
                converts_to_expression.as_deref(),
                subject,
                cases,
                indentation,
            ),
            StatementKind::ExpressionStatement { expression } => {
                let translation = self.translate_expression(expression, indentation)?;
                if translation.is_empty() {
                    return Ok("\n".to_string());
                }
                Ok(format!("{indentation}{translation}\n"))
            }
            StatementKind::Error => Ok(ERROR_TRANSLATION.to_string()),
        }
    }

    fn translate_class(
        &mut self,
        name: &str,
        inherits: &[String],
        members: &[Statement],
        indentation: &str,
    ) -> Result<String, TranspilationError> {
        let mut result = format!("{indentation}open class {name}");
        if !inherits.is_empty() {
            let translations: Vec<String> =
                inherits.iter().map(|inherit| rewrite_type(inherit)).collect();
            result.push_str(": ");
            result.push_str(&translations.join(", "));
        }
        result.push_str(" {\n");

        let increased = indentation::increase(indentation);
        result.push_str(&self.translate_statements(members, &increased, 0)?);
        result.push_str(indentation);
        result.push_str("}\n");
        Ok(result)
    }

    /// Structs become data classes: stored properties move into the primary
    /// constructor, everything else stays in the body.
    fn translate_struct(
        &mut self,
        annotations: Option<&str>,
        name: &str,
        inherits: &[String],
        members: &[Statement],
        indentation: &str,
    ) -> Result<String, TranspilationError> {
        let mut result = String::new();
        if let Some(annotations) = annotations {
            result.push_str(indentation);
            result.push_str(annotations);
            result.push('\n');
        }
        result.push_str(indentation);
        result.push_str("data class ");
        result.push_str(name);
        result.push_str("(\n");

        let (properties, other_members): (Vec<&Statement>, Vec<&Statement>) =
            members.iter().partition(|member| {
                matches!(
                    &member.kind,
                    StatementKind::Variable(variable)
                        if variable.getter.is_none()
                            && variable.setter.is_none()
                            && !variable.is_static
                )
            });

        let increased = indentation::increase(indentation);
        let mut property_translations = Vec::with_capacity(properties.len());
        for property in properties {
            let translation = self.translate_statement(property, &increased)?;
            property_translations.push(translation.trim_end_matches('\n').to_string());
        }
        result.push_str(&property_translations.join(",\n"));
        result.push('\n');
        result.push_str(indentation);
        result.push(')');

        if !inherits.is_empty() {
            let translations: Vec<String> = inherits
                .iter()
                .map(|inherit| self.translate_inheritance(inherit))
                .collect();
            result.push_str(": ");
            result.push_str(&translations.join(", "));
        }

        if other_members.is_empty() {
            result.push('\n');
        } else {
            result.push_str(" {\n");
            result.push_str(&self.translate_statements(
                other_members.into_iter(),
                &increased,
                0,
            )?);
            result.push_str(indentation);
            result.push_str("}\n");
        }
        Ok(result)
    }

    /// Superclasses are invoked (`Base()`), interfaces are not.
    fn translate_inheritance(&self, inherit: &str) -> String {
        if self.ctx.is_protocol(inherit) {
            rewrite_type(inherit)
        } else {
            format!("{}()", rewrite_type(inherit))
        }
    }

    fn translate_enum(
        &mut self,
        access: Option<&str>,
        name: &str,
        inherits: &[String],
        elements: &[EnumElement],
        members: &[Statement],
        indentation: &str,
    ) -> Result<String, TranspilationError> {
        let is_enum_class = self.ctx.is_enum_class(name);
        let access_string = match access {
            Some(access) => format!("{access} "),
            None => String::new(),
        };
        let construct = if is_enum_class {
            "enum class"
        } else {
            "sealed class"
        };
        let mut result = format!("{indentation}{access_string}{construct} {name}");

        if !inherits.is_empty() {
            let translations: Vec<String> = inherits
                .iter()
                .map(|inherit| self.translate_inheritance(inherit))
                .collect();
            result.push_str(": ");
            result.push_str(&translations.join(", "));
        }
        result.push_str(" {\n");

        let increased = indentation::increase(indentation);
        let mut elements_translation = String::new();
        if is_enum_class {
            if !elements.is_empty() {
                let rendered: Vec<String> = elements
                    .iter()
                    .map(|element| {
                        let annotations = match &element.annotations {
                            Some(annotations) => format!("{annotations} "),
                            None => String::new(),
                        };
                        format!("{annotations}{}", element.name)
                    })
                    .collect();
                elements_translation = format!(
                    "{increased}{};\n",
                    rendered.join(&format!(",\n{increased}"))
                );
            }
        } else {
            for element in elements {
                elements_translation
                    .push_str(&Self::translate_sealed_element(element, name, &increased));
            }
        }
        result.push_str(&elements_translation);

        let members_translation = self.translate_statements(members, &increased, 0)?;
        if !elements_translation.is_empty() && !members_translation.is_empty() {
            result.push('\n');
        }
        result.push_str(&members_translation);
        result.push_str(indentation);
        result.push_str("}\n");
        Ok(result)
    }

    /// One case of a sealed enum: associated values become constructor
    /// properties.
    fn translate_sealed_element(element: &EnumElement, enum_name: &str, indentation: &str) -> String {
        let annotations = match &element.annotations {
            Some(annotations) => format!("{annotations} "),
            None => String::new(),
        };
        let capitalized = utilities::capitalized_as_camel_case(&element.name);

        if element.associated_values.is_empty() {
            return format!("{indentation}{annotations}class {capitalized}: {enum_name}()\n");
        }
        let values: Vec<String> = element
            .associated_values
            .iter()
            .map(|value| format!("val {}: {}", value.label, rewrite_type(&value.type_name)))
            .collect();
        format!(
            "{indentation}{annotations}class {capitalized}({}): {enum_name}()\n",
            values.join(", ")
        )
    }

    /// Variable declarations. The keyword depends on the accessor shape:
    /// a setter (or a plain `var`) forces `var`, everything else is `val`.
    pub(super) fn translate_variable_declaration(
        &mut self,
        variable: &VariableDeclaration,
        indentation: &str,
    ) -> Result<String, TranspilationError> {
        if variable.is_implicit {
            return Ok(String::new());
        }

        let mut result = String::from(indentation);
        if let Some(annotations) = &variable.annotations {
            result.push_str(annotations);
            result.push('\n');
            result.push_str(indentation);
        }

        let keyword = if variable.getter.is_some() {
            if variable.setter.is_some() { "var" } else { "val" }
        } else if variable.is_let {
            "val"
        } else {
            "var"
        };
        result.push_str(keyword);
        result.push(' ');

        if let Some(extends_type) = &variable.extends_type {
            let extended = rewrite_type(extends_type);
            if let Some(generic_index) = extended.find('<') {
                // Lift the receiver's generics in front of it: `<T> Box<T>.x`.
                let generics = &extended[generic_index..];
                result.push_str(generics);
                result.push(' ');
            }
            result.push_str(&extended);
            result.push('.');
        }

        result.push_str(&variable.identifier);
        result.push_str(": ");
        result.push_str(&rewrite_type(&variable.type_name));
        if let Some(expression) = &variable.expression {
            result.push_str(" = ");
            result.push_str(&self.translate_expression(expression, indentation)?);
        }
        result.push('\n');

        let increased = indentation::increase(indentation);
        let body_indentation = indentation::increase(&increased);
        if let Some(getter) = &variable.getter
            && let Some(statements) = &getter.statements
        {
            result.push_str(&increased);
            result.push_str("get() {\n");
            result.push_str(&self.translate_statements(
                statements,
                &body_indentation,
                super::SHORT_BODY_LIMIT,
            )?);
            result.push_str(&increased);
            result.push_str("}\n");
        }
        if let Some(setter) = &variable.setter
            && let Some(statements) = &setter.statements
        {
            result.push_str(&increased);
            result.push_str("set(newValue) {\n");
            result.push_str(&self.translate_statements(
                statements,
                &body_indentation,
                super::SHORT_BODY_LIMIT,
            )?);
            result.push_str(&increased);
            result.push_str("}\n");
        }

        Ok(result)
    }

    pub(super) fn translate_if(
        &mut self,
        data: &IfData,
        is_else_if: bool,
        indentation: &str,
    ) -> Result<String, TranspilationError> {
        let keyword = if data.conditions.is_empty() && data.declarations.is_empty() {
            "else"
        } else if is_else_if {
            "else if"
        } else {
            "if"
        };

        let mut result = format!("{indentation}{keyword} ");
        if keyword != "else" {
            let mut condition_translations = Vec::with_capacity(data.conditions.len());
            for condition in &data.conditions {
                match condition {
                    IfCondition::Condition(expression) => {
                        condition_translations
                            .push(self.translate_expression(expression, indentation)?);
                    }
                    IfCondition::Declaration(variable) => {
                        self.compiler.handle_warning(format!(
                            "dropping pattern-binding condition for `{}`",
                            variable.identifier
                        ));
                    }
                }
            }
            let joined = condition_translations.join(" && ");
            if data.is_guard {
                result.push_str(&format!("(!({joined})) "));
            } else {
                result.push_str(&format!("({joined}) "));
            }
        }
        result.push_str("{\n");

        let increased = indentation::increase(indentation);
        result.push_str(&self.translate_statements(&data.statements, &increased, 0)?);
        result.push_str(indentation);
        result.push_str("}\n");

        if let Some(else_statement) = &data.else_statement {
            result.push_str(&self.translate_if(else_statement, true, indentation)?);
        }
        Ok(result)
    }

    pub(super) fn translate_switch(
        &mut self,
        converts_to_expression: Option<&Statement>,
        subject: &Expression,
        cases: &[SwitchCase],
        indentation: &str,
    ) -> Result<String, TranspilationError> {
        let mut result = String::new();
        match converts_to_expression {
            Some(conversion) => match &conversion.kind {
                StatementKind::Return { .. } => {
                    result.push_str(indentation);
                    result.push_str("return when (");
                }
                StatementKind::Assignment { left, .. } => {
                    let left_translation = self.translate_expression(left, indentation)?;
                    result.push_str(indentation);
                    result.push_str(&left_translation);
                    result.push_str(" = when (");
                }
                StatementKind::Variable(variable) => {
                    let mut declaration = variable.clone();
                    declaration.expression = Some(Expression::new(ExpressionKind::NilLiteral));
                    let translation =
                        self.translate_variable_declaration(&declaration, indentation)?;
                    result.push_str(translation.strip_suffix("null\n").unwrap_or(&translation));
                    result.push_str("when (");
                }
                _ => {
                    return self.unexpected_structure(
                        "switch conversion marker should be a return, assignment, or variable \
                         declaration",
                        conversion.printable().print(MAX_LINE_LENGTH),
                        conversion.range,
                    );
                }
            },
            None => {
                result.push_str(indentation);
                result.push_str("when (");
            }
        }

        result.push_str(&self.translate_expression(subject, indentation)?);
        result.push_str(") {\n");

        let increased = indentation::increase(indentation);
        for case in cases {
            if case.expressions.is_empty() {
                result.push_str(&increased);
                result.push_str("else -> ");
            } else {
                let mut translations = Vec::with_capacity(case.expressions.len());
                for expression in &case.expressions {
                    translations.push(self.translate_case_expression(
                        expression,
                        subject,
                        indentation,
                    )?);
                }
                result.push_str(&increased);
                result.push_str(&translations.join(", "));
                result.push_str(" -> ");
            }

            if case.statements.len() == 1 {
                result.push_str(&self.translate_statement(&case.statements[0], "")?);
            } else {
                result.push_str("{\n");
                result.push_str(&self.translate_statements(
                    &case.statements,
                    &indentation::increase(&increased),
                    0,
                )?);
                result.push_str(&increased);
                result.push_str("}\n");
            }
        }

        result.push_str(indentation);
        result.push_str("}\n");
        Ok(result)
    }

    /// Case operands: type checks become `is`, range templates become `in`,
    /// and any other comparison against the subject keeps its left side
    /// only.
    fn translate_case_expression(
        &mut self,
        expression: &Expression,
        subject: &Expression,
        indentation: &str,
    ) -> Result<String, TranspilationError> {
        if let ExpressionKind::BinaryOperator {
            left,
            right,
            operator,
            type_name,
        } = &expression.kind
        {
            if **left == *subject && operator == "is" && type_name == "Bool" {
                let right_translation = self.translate_expression(right, indentation)?;
                return Ok(format!("is {right_translation}"));
            }
            if let ExpressionKind::Template { pattern, .. } = &left.kind
                && (pattern.contains("..")
                    || pattern.contains("until")
                    || pattern.contains("rangeTo"))
            {
                let left_translation = self.translate_expression(left, indentation)?;
                return Ok(format!("in {left_translation}"));
            }
            return self.translate_expression(left, indentation);
        }
        self.translate_expression(expression, indentation)
    }
}
