use rustc_hash::FxHashMap;
use skt_ast::{
    CallData, DeclarationReference, Expression, ExpressionKind, LabeledExpression, LabeledType,
    Statement, StatementKind, TupleShuffleIndex,
};
use skt_common::Compiler;
use skt_emitter::{ERROR_TRANSLATION, FunctionTranslation, KotlinEmitter, TranslationContext};

fn emit(expression: &Expression) -> String {
    emit_with(&TranslationContext::new(), expression)
}

fn emit_with(ctx: &TranslationContext, expression: &Expression) -> String {
    let mut compiler = Compiler::new();
    let mut emitter = KotlinEmitter::new(ctx, &mut compiler);
    emitter
        .translate_expression(expression, "")
        .expect("translation should succeed")
}

fn expr(kind: ExpressionKind) -> Expression {
    Expression::new(kind)
}

fn reference(identifier: &str, type_name: &str) -> Expression {
    expr(ExpressionKind::DeclarationReference(DeclarationReference {
        identifier: identifier.to_string(),
        type_name: type_name.to_string(),
    }))
}

fn int(value: i64) -> Expression {
    expr(ExpressionKind::LiteralInt { value })
}

fn string_literal(value: &str) -> Expression {
    expr(ExpressionKind::LiteralString {
        value: value.to_string(),
    })
}

fn unlabeled(expressions: Vec<Expression>) -> Vec<LabeledExpression> {
    expressions
        .into_iter()
        .map(|expression| LabeledExpression {
            label: None,
            expression,
        })
        .collect()
}

fn call(function: Expression, pairs: Vec<LabeledExpression>) -> Expression {
    expr(ExpressionKind::Call(CallData {
        function: Box::new(function),
        parameters: Box::new(expr(ExpressionKind::Tuple { pairs })),
        type_name: "()".to_string(),
    }))
}

// =========================================================================
// Literals
// =========================================================================

#[test]
fn test_numeric_literals() {
    assert_eq!(emit(&int(42)), "42");
    assert_eq!(emit(&expr(ExpressionKind::LiteralUInt { value: 42 })), "42u");
    assert_eq!(
        emit(&expr(ExpressionKind::LiteralDouble { value: 1.0 })),
        "1.0"
    );
    assert_eq!(
        emit(&expr(ExpressionKind::LiteralDouble { value: 2.75 })),
        "2.75"
    );
    assert_eq!(
        emit(&expr(ExpressionKind::LiteralFloat { value: 0.5 })),
        "0.5f"
    );
    assert_eq!(
        emit(&expr(ExpressionKind::LiteralFloat { value: 3.0 })),
        "3.0f"
    );
}

#[test]
fn test_boolean_nil_character_and_string_literals() {
    assert_eq!(emit(&expr(ExpressionKind::LiteralBool { value: true })), "true");
    assert_eq!(emit(&expr(ExpressionKind::NilLiteral)), "null");
    assert_eq!(
        emit(&expr(ExpressionKind::LiteralCharacter {
            value: "a".to_string()
        })),
        "'a'"
    );
    assert_eq!(emit(&string_literal("hello")), "\"hello\"");
}

#[test]
fn test_literal_code_interprets_escapes() {
    let expression = expr(ExpressionKind::LiteralCode {
        string: "println(\\\"hi\\\")".to_string(),
    });
    assert_eq!(emit(&expression), "println(\"hi\")");
}

// =========================================================================
// Containers
// =========================================================================

#[test]
fn test_array_literal() {
    let expression = expr(ExpressionKind::Array {
        elements: vec![int(1), int(2), int(3)],
        type_name: "[Int]".to_string(),
    });
    assert_eq!(emit(&expression), "mutableListOf(1, 2, 3)");

    let empty = expr(ExpressionKind::Array {
        elements: Vec::new(),
        type_name: "[Int]".to_string(),
    });
    assert_eq!(emit(&empty), "mutableListOf()");
}

#[test]
fn test_dictionary_literal() {
    let expression = expr(ExpressionKind::Dictionary {
        keys: vec![string_literal("one"), string_literal("two")],
        values: vec![int(1), int(2)],
        type_name: "[String: Int]".to_string(),
    });
    assert_eq!(emit(&expression), "mutableMapOf(\"one\" to 1, \"two\" to 2)");
}

#[test]
fn test_tuple_labels() {
    let expression = expr(ExpressionKind::Tuple {
        pairs: vec![
            LabeledExpression {
                label: Some("width".to_string()),
                expression: int(1),
            },
            LabeledExpression {
                label: None,
                expression: int(2),
            },
        ],
    });
    assert_eq!(emit(&expression), "(width = 1, 2)");

    let empty = expr(ExpressionKind::Tuple { pairs: Vec::new() });
    assert_eq!(emit(&empty), "()");
}

// =========================================================================
// Operators and simple wrappers
// =========================================================================

#[test]
fn test_binary_operator() {
    let expression = expr(ExpressionKind::BinaryOperator {
        left: Box::new(int(1)),
        right: Box::new(int(2)),
        operator: "+".to_string(),
        type_name: "Int".to_string(),
    });
    assert_eq!(emit(&expression), "1 + 2");
}

#[test]
fn test_unary_operators() {
    let prefix = expr(ExpressionKind::PrefixUnary {
        expression: Box::new(reference("done", "Bool")),
        operator: "!".to_string(),
        type_name: "Bool".to_string(),
    });
    assert_eq!(emit(&prefix), "!done");

    let postfix = expr(ExpressionKind::PostfixUnary {
        expression: Box::new(reference("count", "Int")),
        operator: "++".to_string(),
        type_name: "Int".to_string(),
    });
    assert_eq!(emit(&postfix), "count++");
}

#[test]
fn test_if_expression() {
    let expression = expr(ExpressionKind::If {
        condition: Box::new(reference("flag", "Bool")),
        true_expression: Box::new(int(1)),
        false_expression: Box::new(int(2)),
    });
    assert_eq!(emit(&expression), "if (flag) { 1 } else { 2 }");
}

#[test]
fn test_subscript_parentheses_force_and_optional() {
    let subscript = expr(ExpressionKind::Subscript {
        subscripted: Box::new(reference("list", "[Int]")),
        index: Box::new(int(0)),
        type_name: "Int".to_string(),
    });
    assert_eq!(emit(&subscript), "list[0]");

    let parentheses = expr(ExpressionKind::Parentheses {
        expression: Box::new(int(1)),
    });
    assert_eq!(emit(&parentheses), "(1)");

    let force = expr(ExpressionKind::ForceValue {
        expression: Box::new(reference("x", "Int?")),
    });
    assert_eq!(emit(&force), "x!!");

    let optional = expr(ExpressionKind::Optional {
        expression: Box::new(reference("x", "Int?")),
    });
    assert_eq!(emit(&optional), "x?");
}

#[test]
fn test_type_expression_is_rewritten() {
    let expression = expr(ExpressionKind::Type {
        type_name: "[Int]".to_string(),
    });
    assert_eq!(emit(&expression), "MutableList<Int>");
}

#[test]
fn test_return_expression() {
    let with_value = expr(ExpressionKind::Return {
        expression: Some(Box::new(int(1))),
    });
    assert_eq!(emit(&with_value), "return 1");

    let bare = expr(ExpressionKind::Return { expression: None });
    assert_eq!(emit(&bare), "return");
}

#[test]
fn test_error_expression_emits_sentinel() {
    assert_eq!(emit(&expr(ExpressionKind::Error)), ERROR_TRANSLATION);
}

// =========================================================================
// References and dot accesses
// =========================================================================

#[test]
fn test_declaration_reference_strips_signature() {
    assert_eq!(emit(&reference("print(_:separator:)", "(String) -> ()")), "print");
}

#[test]
fn test_plain_dot_access() {
    let expression = expr(ExpressionKind::Dot {
        left: Box::new(reference("point", "Point")),
        right: Box::new(reference("x", "Int")),
    });
    assert_eq!(emit(&expression), "point.x");
}

#[test]
fn test_sealed_class_access_becomes_constructor_call() {
    let mut ctx = TranslationContext::new();
    ctx.add_sealed_class("DownloadState");

    let expression = expr(ExpressionKind::Dot {
        left: Box::new(reference("DownloadState", "DownloadState.Type")),
        right: Box::new(reference("finished", "DownloadState")),
    });
    assert_eq!(emit_with(&ctx, &expression), "DownloadState.Finished()");
}

#[test]
fn test_enum_class_access_becomes_constant() {
    let mut ctx = TranslationContext::new();
    ctx.add_enum_class("Direction");

    let expression = expr(ExpressionKind::Dot {
        left: Box::new(expr(ExpressionKind::Dot {
            left: Box::new(reference("Compass", "Compass.Type")),
            right: Box::new(reference("Direction", "Direction.Type")),
        })),
        right: Box::new(reference("northWest", "Direction")),
    });
    assert_eq!(emit_with(&ctx, &expression), "Compass.Direction.NORTH_WEST");
}

// =========================================================================
// Strings
// =========================================================================

#[test]
fn test_interpolated_string() {
    let expression = expr(ExpressionKind::InterpolatedString {
        expressions: vec![
            string_literal("Hello, "),
            reference("name", "String"),
            string_literal("!"),
        ],
    });
    assert_eq!(emit(&expression), "\"Hello, ${name}!\"");
}

#[test]
fn test_interpolated_string_skips_empty_segments() {
    let expression = expr(ExpressionKind::InterpolatedString {
        expressions: vec![string_literal("\"\""), reference("name", "String")],
    });
    assert_eq!(emit(&expression), "\"${name}\"");
}

// =========================================================================
// Templates
// =========================================================================

#[test]
fn test_template_substitution() {
    let mut matches = FxHashMap::default();
    matches.insert("lhs".to_string(), int(1));
    matches.insert("rhs".to_string(), int(2));
    let expression = expr(ExpressionKind::Template {
        pattern: "lhs + rhs".to_string(),
        matches,
    });
    assert_eq!(emit(&expression), "1 + 2");
}

#[test]
fn test_template_substitutes_longest_key_first() {
    let mut matches = FxHashMap::default();
    matches.insert("value".to_string(), reference("a", "Int"));
    matches.insert("value2".to_string(), reference("b", "Int"));
    let expression = expr(ExpressionKind::Template {
        pattern: "value + value2".to_string(),
        matches,
    });
    assert_eq!(emit(&expression), "a + b");
}

// =========================================================================
// Calls
// =========================================================================

#[test]
fn test_call_peels_dot_chains() {
    let function = expr(ExpressionKind::Dot {
        left: Box::new(reference("console", "Console")),
        right: Box::new(reference("log(_:)", "(String) -> ()")),
    });
    let expression = call(function, unlabeled(vec![string_literal("hi")]));
    assert_eq!(emit(&expression), "console.log(\"hi\")");
}

#[test]
fn test_call_uses_registered_translation() {
    let mut ctx = TranslationContext::new();
    ctx.add_function_translation(FunctionTranslation {
        source_api_name: "joined(separator:)".to_string(),
        type_name: "(String) -> String".to_string(),
        prefix: "joinToString".to_string(),
        parameters: vec!["separator".to_string()],
    });

    let expression = call(
        reference("joined(separator:)", "(String) -> String"),
        vec![LabeledExpression {
            label: Some("separator".to_string()),
            expression: string_literal(", "),
        }],
    );
    assert_eq!(emit_with(&ctx, &expression), "joinToString(separator = \", \")");
}

#[test]
fn test_translation_keeps_unlabeled_arguments_unlabeled() {
    let mut ctx = TranslationContext::new();
    ctx.add_function_translation(FunctionTranslation {
        source_api_name: "append(_:)".to_string(),
        type_name: "(Int) -> ()".to_string(),
        prefix: "add".to_string(),
        parameters: vec!["element".to_string()],
    });

    let expression = call(
        reference("append(_:)", "(Int) -> ()"),
        unlabeled(vec![int(1)]),
    );
    assert_eq!(emit_with(&ctx, &expression), "add(1)");
}

#[test]
fn test_sole_trailing_closure_drops_parentheses() {
    let closure = expr(ExpressionKind::Closure {
        parameters: vec![LabeledType {
            label: "x".to_string(),
            type_name: "Int".to_string(),
        }],
        statements: vec![Statement::new(StatementKind::ExpressionStatement {
            expression: expr(ExpressionKind::BinaryOperator {
                left: Box::new(reference("x", "Int")),
                right: Box::new(int(1)),
                operator: "+".to_string(),
                type_name: "Int".to_string(),
            }),
        })],
        type_name: "(Int) -> Int".to_string(),
    });
    let function = expr(ExpressionKind::Dot {
        left: Box::new(reference("list", "[Int]")),
        right: Box::new(reference("map(_:)", "((Int) -> Int) -> [Int]")),
    });
    let expression = call(function, unlabeled(vec![closure]));
    assert_eq!(emit(&expression), "list.map { x -> x + 1 }");
}

#[test]
fn test_trailing_closure_follows_other_arguments() {
    let closure = expr(ExpressionKind::Closure {
        parameters: Vec::new(),
        statements: vec![Statement::new(StatementKind::ExpressionStatement {
            expression: reference("done", "Bool"),
        })],
        type_name: "() -> Bool".to_string(),
    });
    let expression = call(
        reference("schedule(_:_:)", "(Int, () -> Bool) -> ()"),
        unlabeled(vec![int(5), closure]),
    );
    assert_eq!(emit(&expression), "schedule(5) { done }");
}

#[test]
fn test_empty_closure() {
    let closure = expr(ExpressionKind::Closure {
        parameters: Vec::new(),
        statements: Vec::new(),
        type_name: "() -> ()".to_string(),
    });
    let expression = call(reference("run(_:)", "(() -> ()) -> ()"), unlabeled(vec![closure]));
    assert_eq!(emit(&expression), "run { }");
}

#[test]
fn test_multi_statement_closure_breaks_across_lines() {
    let closure = expr(ExpressionKind::Closure {
        parameters: vec![LabeledType {
            label: "x".to_string(),
            type_name: "Int".to_string(),
        }],
        statements: vec![
            Statement::new(StatementKind::Assignment {
                left: reference("total", "Int"),
                right: reference("x", "Int"),
            }),
            Statement::new(StatementKind::Return {
                expression: Some(reference("total", "Int")),
            }),
        ],
        type_name: "(Int) -> Int".to_string(),
    });
    let function = expr(ExpressionKind::Dot {
        left: Box::new(reference("list", "[Int]")),
        right: Box::new(reference("map(_:)", "((Int) -> Int) -> [Int]")),
    });
    let expression = call(function, unlabeled(vec![closure]));
    assert_eq!(
        emit(&expression),
        "list.map { x ->\n\t\ttotal = x\n\t\treturn total\n\t}"
    );
}

#[test]
fn test_long_call_is_re_emitted_with_newlined_arguments() {
    let long_first = "x".repeat(45);
    let long_second = "y".repeat(45);
    let expression = call(
        reference("configure(first:second:)", "(String, String) -> ()"),
        vec![
            LabeledExpression {
                label: Some("first".to_string()),
                expression: string_literal(&long_first),
            },
            LabeledExpression {
                label: Some("second".to_string()),
                expression: string_literal(&long_second),
            },
        ],
    );
    assert_eq!(
        emit(&expression),
        format!("configure(\n\tfirst = \"{long_first}\",\n\tsecond = \"{long_second}\")")
    );
}

#[test]
fn test_call_with_unexpected_parameter_shape_is_rejected() {
    let ctx = TranslationContext::new();
    let mut compiler = Compiler::new();
    let mut emitter = KotlinEmitter::new(&ctx, &mut compiler);

    let expression = expr(ExpressionKind::Call(CallData {
        function: Box::new(reference("f", "(Int) -> ()")),
        parameters: Box::new(int(1)),
        type_name: "()".to_string(),
    }));
    let translation = emitter
        .translate_expression(&expression, "")
        .expect("accumulating sink should not abort");

    assert!(translation.contains(ERROR_TRANSLATION));
    assert!(compiler.has_diagnostics());
}

// =========================================================================
// Tuple shuffles
// =========================================================================

#[test]
fn test_tuple_shuffle_skips_absent_and_labels_present() {
    let expression = expr(ExpressionKind::TupleShuffle {
        labels: vec!["a".to_string(), "b".to_string(), "c".to_string()],
        indices: vec![
            TupleShuffleIndex::Present,
            TupleShuffleIndex::Absent,
            TupleShuffleIndex::Present,
        ],
        expressions: vec![int(1), int(3)],
    });
    assert_eq!(emit(&expression), "(a = 1, c = 3)");
}

#[test]
fn test_variadic_tuple_shuffle_suppresses_leading_labels() {
    let expression = expr(ExpressionKind::TupleShuffle {
        labels: vec![
            "first".to_string(),
            "values".to_string(),
            "last".to_string(),
        ],
        indices: vec![
            TupleShuffleIndex::Present,
            TupleShuffleIndex::Variadic(2),
            TupleShuffleIndex::Present,
        ],
        expressions: vec![int(1), int(2), int(3), int(9)],
    });
    assert_eq!(emit(&expression), "(1, 2, 3, last = 9)");
}

#[test]
fn test_tuple_shuffle_length_mismatch_is_rejected() {
    let ctx = TranslationContext::new();
    let mut compiler = Compiler::new();
    let mut emitter = KotlinEmitter::new(&ctx, &mut compiler);

    let expression = expr(ExpressionKind::TupleShuffle {
        labels: vec!["a".to_string()],
        indices: Vec::new(),
        expressions: vec![int(1)],
    });
    let translation = emitter
        .translate_expression(&expression, "")
        .expect("accumulating sink should not abort");

    assert_eq!(translation, ERROR_TRANSLATION);
    assert!(compiler.has_diagnostics());
}

#[test]
fn test_tuple_shuffle_mismatch_aborts_when_stopping_at_first_error() {
    let ctx = TranslationContext::new();
    let mut compiler = Compiler::stopping_at_first_error();
    let mut emitter = KotlinEmitter::new(&ctx, &mut compiler);

    let expression = expr(ExpressionKind::TupleShuffle {
        labels: vec!["a".to_string()],
        indices: Vec::new(),
        expressions: vec![int(1)],
    });
    assert!(emitter.translate_expression(&expression, "").is_err());
}
