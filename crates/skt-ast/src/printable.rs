//! Tree dumps of AST nodes.
//!
//! Structural errors attach a dump of the offending node to the diagnostic.
//! Lines are clipped at a horizontal limit so one oversized literal cannot
//! flood the output.

use crate::ast::{
    EnumElement, Expression, ExpressionKind, FunctionDeclaration, IfCondition, IfData, Statement,
    StatementKind, SwitchCase, TupleShuffleIndex, VariableDeclaration,
};

/// A label plus children, rendered as an indented tree.
#[derive(Debug, Clone)]
pub struct PrintableTree {
    pub label: String,
    pub children: Vec<PrintableTree>,
}

impl PrintableTree {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(label: impl Into<String>, children: Vec<PrintableTree>) -> Self {
        Self {
            label: label.into(),
            children,
        }
    }

    /// Renders the tree, clipping every line at `horizontal_limit`
    /// characters.
    pub fn print(&self, horizontal_limit: usize) -> String {
        let mut result = String::new();
        self.print_into("", &mut result, horizontal_limit);
        result
    }

    fn print_into(&self, indentation: &str, result: &mut String, horizontal_limit: usize) {
        let line = format!("{indentation}{}", self.label);
        if line.chars().count() > horizontal_limit {
            result.extend(line.chars().take(horizontal_limit.saturating_sub(1)));
            result.push('…');
        } else {
            result.push_str(&line);
        }
        result.push('\n');

        let deeper = format!("{indentation}  ");
        for child in &self.children {
            child.print_into(&deeper, result, horizontal_limit);
        }
    }
}

impl Statement {
    /// Tree dump used when this node trips a structural error.
    pub fn printable(&self) -> PrintableTree {
        statement_tree(self)
    }
}

impl Expression {
    /// Tree dump used when this node trips a structural error.
    pub fn printable(&self) -> PrintableTree {
        expression_tree(self)
    }
}

fn statement_trees(statements: &[Statement]) -> Vec<PrintableTree> {
    statements.iter().map(statement_tree).collect()
}

fn expression_trees(expressions: &[Expression]) -> Vec<PrintableTree> {
    expressions.iter().map(expression_tree).collect()
}

fn variable_tree(variable: &VariableDeclaration) -> PrintableTree {
    PrintableTree::new(format!(
        "variable {}: {}",
        variable.identifier, variable.type_name
    ))
}

fn function_tree(function: &FunctionDeclaration) -> PrintableTree {
    let label = format!("function {}: {}", function.prefix, function.function_type);
    match &function.statements {
        Some(statements) => PrintableTree::with_children(label, statement_trees(statements)),
        None => PrintableTree::new(label),
    }
}

fn enum_element_tree(element: &EnumElement) -> PrintableTree {
    let values: Vec<PrintableTree> = element
        .associated_values
        .iter()
        .map(|value| PrintableTree::new(format!("{}: {}", value.label, value.type_name)))
        .collect();
    PrintableTree::with_children(format!("element {}", element.name), values)
}

fn if_tree(data: &IfData) -> PrintableTree {
    let mut children = Vec::new();
    for condition in &data.conditions {
        match condition {
            IfCondition::Condition(expression) => children.push(expression_tree(expression)),
            IfCondition::Declaration(variable) => children.push(variable_tree(variable)),
        }
    }
    children.extend(statement_trees(&data.statements));
    if let Some(else_statement) = &data.else_statement {
        children.push(if_tree(else_statement));
    }
    let label = if data.is_guard { "guard" } else { "if" };
    PrintableTree::with_children(label, children)
}

fn case_tree(case: &SwitchCase) -> PrintableTree {
    let mut children = expression_trees(&case.expressions);
    children.extend(statement_trees(&case.statements));
    let label = if case.expressions.is_empty() {
        "case else"
    } else {
        "case"
    };
    PrintableTree::with_children(label, children)
}

fn statement_tree(statement: &Statement) -> PrintableTree {
    match &statement.kind {
        StatementKind::Comment { text } => PrintableTree::new(format!("comment \"{text}\"")),
        StatementKind::Import { module_name } => {
            PrintableTree::new(format!("import {module_name}"))
        }
        StatementKind::Extension { type_name, members } => PrintableTree::with_children(
            format!("extension {type_name}"),
            statement_trees(members),
        ),
        StatementKind::Defer { statements } => {
            PrintableTree::with_children("defer", statement_trees(statements))
        }
        StatementKind::Typealias {
            identifier,
            type_name,
            ..
        } => PrintableTree::new(format!("typealias {identifier} = {type_name}")),
        StatementKind::Class { name, members, .. } => {
            PrintableTree::with_children(format!("class {name}"), statement_trees(members))
        }
        StatementKind::Struct { name, members, .. } => {
            PrintableTree::with_children(format!("struct {name}"), statement_trees(members))
        }
        StatementKind::CompanionObject { members } => {
            PrintableTree::with_children("companion object", statement_trees(members))
        }
        StatementKind::Enum {
            name,
            elements,
            members,
            ..
        } => {
            let mut children: Vec<PrintableTree> =
                elements.iter().map(enum_element_tree).collect();
            children.extend(statement_trees(members));
            PrintableTree::with_children(format!("enum {name}"), children)
        }
        StatementKind::Protocol { name, members } => {
            PrintableTree::with_children(format!("protocol {name}"), statement_trees(members))
        }
        StatementKind::Do { statements } => {
            PrintableTree::with_children("do", statement_trees(statements))
        }
        StatementKind::Catch {
            variable,
            statements,
        } => {
            let mut children = Vec::new();
            if let Some(variable) = variable {
                children.push(variable_tree(variable));
            }
            children.extend(statement_trees(statements));
            PrintableTree::with_children("catch", children)
        }
        StatementKind::ForEach {
            collection,
            variable,
            statements,
        } => {
            let mut children = vec![expression_tree(variable), expression_tree(collection)];
            children.extend(statement_trees(statements));
            PrintableTree::with_children("for each", children)
        }
        StatementKind::While {
            condition,
            statements,
        } => {
            let mut children = vec![expression_tree(condition)];
            children.extend(statement_trees(statements));
            PrintableTree::with_children("while", children)
        }
        StatementKind::Function(function) => function_tree(function),
        StatementKind::Initializer(initializer) => {
            let mut tree = function_tree(&initializer.function);
            tree.label = format!("initializer: {}", initializer.function.function_type);
            tree
        }
        StatementKind::Throw { expression } => {
            PrintableTree::with_children("throw", vec![expression_tree(expression)])
        }
        StatementKind::Return { expression } => match expression {
            Some(expression) => {
                PrintableTree::with_children("return", vec![expression_tree(expression)])
            }
            None => PrintableTree::new("return"),
        },
        StatementKind::Break => PrintableTree::new("break"),
        StatementKind::Continue => PrintableTree::new("continue"),
        StatementKind::Variable(variable) => variable_tree(variable),
        StatementKind::Assignment { left, right } => PrintableTree::with_children(
            "assignment",
            vec![expression_tree(left), expression_tree(right)],
        ),
        StatementKind::If(data) => if_tree(data),
        StatementKind::Switch { subject, cases, .. } => {
            let mut children = vec![expression_tree(subject)];
            children.extend(cases.iter().map(case_tree));
            PrintableTree::with_children("switch", children)
        }
        StatementKind::ExpressionStatement { expression } => expression_tree(expression),
        StatementKind::Error => PrintableTree::new("error"),
    }
}

fn expression_tree(expression: &Expression) -> PrintableTree {
    match &expression.kind {
        ExpressionKind::Template { pattern, matches } => {
            let mut children: Vec<PrintableTree> = Vec::with_capacity(matches.len());
            let mut keys: Vec<&String> = matches.keys().collect();
            keys.sort();
            for key in keys {
                children.push(PrintableTree::with_children(
                    key.clone(),
                    vec![expression_tree(&matches[key])],
                ));
            }
            PrintableTree::with_children(format!("template \"{pattern}\""), children)
        }
        ExpressionKind::LiteralCode { string } => {
            PrintableTree::new(format!("literal code \"{string}\""))
        }
        ExpressionKind::LiteralDeclaration { string } => {
            PrintableTree::new(format!("literal declaration \"{string}\""))
        }
        ExpressionKind::Array { elements, .. } => {
            PrintableTree::with_children("array", expression_trees(elements))
        }
        ExpressionKind::Dictionary { keys, values, .. } => {
            let mut children = expression_trees(keys);
            children.extend(expression_trees(values));
            PrintableTree::with_children("dictionary", children)
        }
        ExpressionKind::BinaryOperator {
            left,
            right,
            operator,
            ..
        } => PrintableTree::with_children(
            format!("binary \"{operator}\""),
            vec![expression_tree(left), expression_tree(right)],
        ),
        ExpressionKind::Call(call) => PrintableTree::with_children(
            format!("call: {}", call.type_name),
            vec![
                expression_tree(&call.function),
                expression_tree(&call.parameters),
            ],
        ),
        ExpressionKind::Closure { statements, .. } => {
            PrintableTree::with_children("closure", statement_trees(statements))
        }
        ExpressionKind::DeclarationReference(reference) => PrintableTree::new(format!(
            "reference {}: {}",
            reference.identifier, reference.type_name
        )),
        ExpressionKind::Return { expression } => match expression {
            Some(expression) => {
                PrintableTree::with_children("return", vec![expression_tree(expression)])
            }
            None => PrintableTree::new("return"),
        },
        ExpressionKind::Dot { left, right } => PrintableTree::with_children(
            "dot",
            vec![expression_tree(left), expression_tree(right)],
        ),
        ExpressionKind::LiteralString { value } => {
            PrintableTree::new(format!("string \"{value}\""))
        }
        ExpressionKind::LiteralCharacter { value } => {
            PrintableTree::new(format!("character '{value}'"))
        }
        ExpressionKind::InterpolatedString { expressions } => {
            PrintableTree::with_children("interpolated string", expression_trees(expressions))
        }
        ExpressionKind::PrefixUnary {
            expression,
            operator,
            ..
        } => PrintableTree::with_children(
            format!("prefix \"{operator}\""),
            vec![expression_tree(expression)],
        ),
        ExpressionKind::PostfixUnary {
            expression,
            operator,
            ..
        } => PrintableTree::with_children(
            format!("postfix \"{operator}\""),
            vec![expression_tree(expression)],
        ),
        ExpressionKind::If {
            condition,
            true_expression,
            false_expression,
        } => PrintableTree::with_children(
            "if expression",
            vec![
                expression_tree(condition),
                expression_tree(true_expression),
                expression_tree(false_expression),
            ],
        ),
        ExpressionKind::Type { type_name } => PrintableTree::new(format!("type {type_name}")),
        ExpressionKind::Subscript {
            subscripted, index, ..
        } => PrintableTree::with_children(
            "subscript",
            vec![expression_tree(subscripted), expression_tree(index)],
        ),
        ExpressionKind::Parentheses { expression } => {
            PrintableTree::with_children("parentheses", vec![expression_tree(expression)])
        }
        ExpressionKind::ForceValue { expression } => {
            PrintableTree::with_children("force value", vec![expression_tree(expression)])
        }
        ExpressionKind::Optional { expression } => {
            PrintableTree::with_children("optional", vec![expression_tree(expression)])
        }
        ExpressionKind::LiteralInt { value } => PrintableTree::new(format!("int {value}")),
        ExpressionKind::LiteralUInt { value } => PrintableTree::new(format!("uint {value}")),
        ExpressionKind::LiteralDouble { value } => PrintableTree::new(format!("double {value}")),
        ExpressionKind::LiteralFloat { value } => PrintableTree::new(format!("float {value}")),
        ExpressionKind::LiteralBool { value } => PrintableTree::new(format!("bool {value}")),
        ExpressionKind::NilLiteral => PrintableTree::new("nil"),
        ExpressionKind::Tuple { pairs } => {
            let children: Vec<PrintableTree> = pairs
                .iter()
                .map(|pair| match &pair.label {
                    Some(label) => PrintableTree::with_children(
                        format!("{label}:"),
                        vec![expression_tree(&pair.expression)],
                    ),
                    None => expression_tree(&pair.expression),
                })
                .collect();
            PrintableTree::with_children("tuple", children)
        }
        ExpressionKind::TupleShuffle {
            labels,
            indices,
            expressions,
        } => {
            let mut children = Vec::new();
            for (label, index) in labels.iter().zip(indices) {
                let description = match index {
                    TupleShuffleIndex::Absent => "absent".to_string(),
                    TupleShuffleIndex::Present => "present".to_string(),
                    TupleShuffleIndex::Variadic(count) => format!("variadic {count}"),
                };
                children.push(PrintableTree::new(format!("{label}: {description}")));
            }
            children.extend(expression_trees(expressions));
            PrintableTree::with_children("tuple shuffle", children)
        }
        ExpressionKind::Error => PrintableTree::new("error"),
    }
}
