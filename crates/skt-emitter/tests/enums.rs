use skt_ast::{
    EnumElement, Expression, ExpressionKind, FunctionDeclaration, LabeledType, Statement,
    StatementKind,
};
use skt_common::Compiler;
use skt_emitter::{KotlinEmitter, TranslationContext};

fn emit_with(ctx: &TranslationContext, statement: &Statement, indentation: &str) -> String {
    let mut compiler = Compiler::new();
    let mut emitter = KotlinEmitter::new(ctx, &mut compiler);
    emitter
        .translate_statement(statement, indentation)
        .expect("translation should succeed")
}

fn element(name: &str) -> EnumElement {
    EnumElement {
        name: name.to_string(),
        associated_values: Vec::new(),
        annotations: None,
    }
}

fn enum_statement(name: &str, elements: Vec<EnumElement>) -> Statement {
    Statement::new(StatementKind::Enum {
        access: None,
        name: name.to_string(),
        inherits: Vec::new(),
        elements,
        members: Vec::new(),
        is_implicit: false,
    })
}

#[test]
fn test_enum_with_associated_values_becomes_sealed_class() {
    let ctx = TranslationContext::new();
    let rgb = EnumElement {
        name: "rgb".to_string(),
        associated_values: vec![
            LabeledType {
                label: "r".to_string(),
                type_name: "Int".to_string(),
            },
            LabeledType {
                label: "g".to_string(),
                type_name: "Int".to_string(),
            },
            LabeledType {
                label: "b".to_string(),
                type_name: "Int".to_string(),
            },
        ],
        annotations: None,
    };
    let statement = enum_statement("Color", vec![element("red"), rgb]);

    assert_eq!(
        emit_with(&ctx, &statement, ""),
        "sealed class Color {\n\tclass Red: Color()\n\tclass Rgb(val r: Int, val g: Int, val b: Int): Color()\n}\n"
    );
}

#[test]
fn test_registered_enum_becomes_enum_class() {
    let mut ctx = TranslationContext::new();
    ctx.add_enum_class("Direction");

    let statement = enum_statement("Direction", vec![element("north"), element("south")]);
    assert_eq!(
        emit_with(&ctx, &statement, ""),
        "enum class Direction {\n\tnorth,\n\tsouth;\n}\n"
    );
}

#[test]
fn test_enum_access_modifier() {
    let ctx = TranslationContext::new();
    let statement = Statement::new(StatementKind::Enum {
        access: Some("public".to_string()),
        name: "Color".to_string(),
        inherits: Vec::new(),
        elements: vec![element("red")],
        members: Vec::new(),
        is_implicit: false,
    });
    assert_eq!(
        emit_with(&ctx, &statement, ""),
        "public sealed class Color {\n\tclass Red: Color()\n}\n"
    );
}

#[test]
fn test_enum_inheritance_invokes_superclasses_but_not_protocols() {
    let mut ctx = TranslationContext::new();
    ctx.add_protocol("Printable");

    let statement = Statement::new(StatementKind::Enum {
        access: None,
        name: "Color".to_string(),
        inherits: vec!["Base".to_string(), "Printable".to_string()],
        elements: vec![element("red")],
        members: Vec::new(),
        is_implicit: false,
    });
    assert_eq!(
        emit_with(&ctx, &statement, ""),
        "sealed class Color: Base(), Printable {\n\tclass Red: Color()\n}\n"
    );
}

#[test]
fn test_blank_line_between_elements_and_members() {
    let mut ctx = TranslationContext::new();
    ctx.add_enum_class("Direction");

    let describe = FunctionDeclaration {
        prefix: "describe".to_string(),
        parameters: Vec::new(),
        return_type: "String".to_string(),
        function_type: "() -> String".to_string(),
        generic_types: Vec::new(),
        is_implicit: false,
        is_static: false,
        extends_type: None,
        statements: Some(vec![Statement::new(StatementKind::Return {
            expression: Some(Expression::new(ExpressionKind::DeclarationReference(
                skt_ast::DeclarationReference {
                    identifier: "name".to_string(),
                    type_name: "String".to_string(),
                },
            ))),
        })]),
        access: None,
        annotations: None,
    };
    let statement = Statement::new(StatementKind::Enum {
        access: None,
        name: "Direction".to_string(),
        inherits: Vec::new(),
        elements: vec![element("north"), element("south")],
        members: vec![Statement::new(StatementKind::Function(describe))],
        is_implicit: false,
    });
    assert_eq!(
        emit_with(&ctx, &statement, ""),
        "enum class Direction {\n\tnorth,\n\tsouth;\n\n\tfun describe(): String {\n\t\treturn name\n\t}\n}\n"
    );
}

#[test]
fn test_annotated_elements() {
    let mut ctx = TranslationContext::new();
    ctx.add_enum_class("Legacy");

    let deprecated = EnumElement {
        name: "old".to_string(),
        associated_values: Vec::new(),
        annotations: Some("@Deprecated(\"use new\")".to_string()),
    };
    let statement = enum_statement("Legacy", vec![deprecated, element("new")]);
    assert_eq!(
        emit_with(&ctx, &statement, ""),
        "enum class Legacy {\n\t@Deprecated(\"use new\") old,\n\tnew;\n}\n"
    );
}

#[test]
fn test_implicit_enum_is_erased() {
    let ctx = TranslationContext::new();
    let statement = Statement::new(StatementKind::Enum {
        access: None,
        name: "Hidden".to_string(),
        inherits: Vec::new(),
        elements: vec![element("a")],
        members: Vec::new(),
        is_implicit: true,
    });
    assert_eq!(emit_with(&ctx, &statement, ""), "");
}

#[test]
fn test_nested_enum_is_indented() {
    let ctx = TranslationContext::new();
    let statement = enum_statement("Color", vec![element("red")]);
    assert_eq!(
        emit_with(&ctx, &statement, "\t"),
        "\tsealed class Color {\n\t\tclass Red: Color()\n\t}\n"
    );
}
