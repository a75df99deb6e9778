//! Statement and expression nodes.
//!
//! Two mutually recursive sum types make up the tree. Every node carries an
//! optional source range; equality is structural and ignores ranges, so a
//! switch subject can be compared against the operands captured inside its
//! case expressions.

use rustc_hash::FxHashMap;
use skt_common::SourceRange;

/// A fully lowered program: top-level declarations plus the loose statements
/// that get wrapped in a synthetic `main`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Module {
    pub declarations: Vec<Statement>,
    pub statements: Vec<Statement>,
}

/// Statement node. Equality compares `kind` only.
#[derive(Debug, Clone)]
pub struct Statement {
    pub kind: StatementKind,
    pub range: Option<SourceRange>,
}

impl Statement {
    pub fn new(kind: StatementKind) -> Self {
        Self { kind, range: None }
    }

    pub fn with_range(kind: StatementKind, range: SourceRange) -> Self {
        Self {
            kind,
            range: Some(range),
        }
    }
}

impl PartialEq for Statement {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind {
    Comment {
        text: String,
    },
    Import {
        module_name: String,
    },
    /// Must not survive lowering; the emitter rejects it.
    Extension {
        type_name: String,
        members: Vec<Statement>,
    },
    /// Only valid as a direct child of a function body, where it is lowered
    /// into a `finally` block.
    Defer {
        statements: Vec<Statement>,
    },
    Typealias {
        identifier: String,
        type_name: String,
        is_implicit: bool,
    },
    Class {
        name: String,
        inherits: Vec<String>,
        members: Vec<Statement>,
    },
    Struct {
        annotations: Option<String>,
        name: String,
        inherits: Vec<String>,
        members: Vec<Statement>,
    },
    CompanionObject {
        members: Vec<Statement>,
    },
    Enum {
        access: Option<String>,
        name: String,
        inherits: Vec<String>,
        elements: Vec<EnumElement>,
        members: Vec<Statement>,
        is_implicit: bool,
    },
    Protocol {
        name: String,
        members: Vec<Statement>,
    },
    Do {
        statements: Vec<Statement>,
    },
    Catch {
        variable: Option<VariableDeclaration>,
        statements: Vec<Statement>,
    },
    ForEach {
        collection: Expression,
        variable: Expression,
        statements: Vec<Statement>,
    },
    While {
        condition: Expression,
        statements: Vec<Statement>,
    },
    Function(FunctionDeclaration),
    Initializer(InitializerDeclaration),
    Throw {
        expression: Expression,
    },
    Return {
        expression: Option<Expression>,
    },
    Break,
    Continue,
    Variable(VariableDeclaration),
    Assignment {
        left: Expression,
        right: Expression,
    },
    If(Box<IfData>),
    Switch {
        converts_to_expression: Option<Box<Statement>>,
        subject: Expression,
        cases: Vec<SwitchCase>,
    },
    ExpressionStatement {
        expression: Expression,
    },
    Error,
}

/// Function declarations keep the mangled source signature around so
/// registry lookups can match on it.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    /// Bare name, without parameter labels.
    pub prefix: String,
    pub parameters: Vec<FunctionParameter>,
    pub return_type: String,
    /// Mangled signature, e.g. `(Int, Int) -> Bool`.
    pub function_type: String,
    pub generic_types: Vec<String>,
    pub is_implicit: bool,
    pub is_static: bool,
    pub extends_type: Option<String>,
    /// `None` for bodiless declarations (protocol requirements).
    pub statements: Option<Vec<Statement>>,
    pub access: Option<String>,
    pub annotations: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InitializerDeclaration {
    pub function: FunctionDeclaration,
    pub super_call: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionParameter {
    pub label: String,
    pub type_name: String,
    pub value: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub identifier: String,
    pub type_name: String,
    pub expression: Option<Expression>,
    pub getter: Option<Box<FunctionDeclaration>>,
    pub setter: Option<Box<FunctionDeclaration>>,
    pub is_let: bool,
    pub is_implicit: bool,
    pub is_static: bool,
    pub extends_type: Option<String>,
    pub annotations: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfData {
    pub conditions: Vec<IfCondition>,
    pub declarations: Vec<VariableDeclaration>,
    pub statements: Vec<Statement>,
    pub else_statement: Option<Box<IfData>>,
    pub is_guard: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum IfCondition {
    Condition(Expression),
    Declaration(VariableDeclaration),
}

/// One `when` entry. Empty `expressions` means `else`.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    pub expressions: Vec<Expression>,
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumElement {
    pub name: String,
    pub associated_values: Vec<LabeledType>,
    pub annotations: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabeledType {
    pub label: String,
    pub type_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabeledExpression {
    pub label: Option<String>,
    pub expression: Expression,
}

/// One position in a tuple-shuffle argument list.
#[derive(Debug, Clone, PartialEq)]
pub enum TupleShuffleIndex {
    /// Defaulted argument; nothing to emit.
    Absent,
    /// One expression, possibly labeled.
    Present,
    /// The given number of expressions expanded from a variadic parameter.
    Variadic(usize),
}

/// Expression node. Equality compares `kind` only.
#[derive(Debug, Clone)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub range: Option<SourceRange>,
}

impl Expression {
    pub fn new(kind: ExpressionKind) -> Self {
        Self { kind, range: None }
    }

    pub fn with_range(kind: ExpressionKind, range: SourceRange) -> Self {
        Self {
            kind,
            range: Some(range),
        }
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallData {
    pub function: Box<Expression>,
    /// Either a `Tuple` or a `TupleShuffle`; anything else is a structural
    /// error.
    pub parameters: Box<Expression>,
    pub type_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeclarationReference {
    /// The part before the first `(` is the display name.
    pub identifier: String,
    pub type_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionKind {
    /// A literal skeleton with translated sub-expressions spliced in for
    /// each occurrence of a match key.
    Template {
        pattern: String,
        matches: FxHashMap<String, Expression>,
    },
    LiteralCode {
        string: String,
    },
    LiteralDeclaration {
        string: String,
    },
    Array {
        elements: Vec<Expression>,
        type_name: String,
    },
    Dictionary {
        keys: Vec<Expression>,
        values: Vec<Expression>,
        type_name: String,
    },
    BinaryOperator {
        left: Box<Expression>,
        right: Box<Expression>,
        operator: String,
        type_name: String,
    },
    Call(CallData),
    Closure {
        parameters: Vec<LabeledType>,
        statements: Vec<Statement>,
        type_name: String,
    },
    DeclarationReference(DeclarationReference),
    Return {
        expression: Option<Box<Expression>>,
    },
    Dot {
        left: Box<Expression>,
        right: Box<Expression>,
    },
    LiteralString {
        value: String,
    },
    LiteralCharacter {
        value: String,
    },
    InterpolatedString {
        expressions: Vec<Expression>,
    },
    PrefixUnary {
        expression: Box<Expression>,
        operator: String,
        type_name: String,
    },
    PostfixUnary {
        expression: Box<Expression>,
        operator: String,
        type_name: String,
    },
    If {
        condition: Box<Expression>,
        true_expression: Box<Expression>,
        false_expression: Box<Expression>,
    },
    Type {
        type_name: String,
    },
    Subscript {
        subscripted: Box<Expression>,
        index: Box<Expression>,
        type_name: String,
    },
    Parentheses {
        expression: Box<Expression>,
    },
    ForceValue {
        expression: Box<Expression>,
    },
    Optional {
        expression: Box<Expression>,
    },
    LiteralInt {
        value: i64,
    },
    LiteralUInt {
        value: u64,
    },
    LiteralDouble {
        value: f64,
    },
    LiteralFloat {
        value: f32,
    },
    LiteralBool {
        value: bool,
    },
    NilLiteral,
    Tuple {
        pairs: Vec<LabeledExpression>,
    },
    TupleShuffle {
        labels: Vec<String>,
        indices: Vec<TupleShuffleIndex>,
        expressions: Vec<Expression>,
    },
    Error,
}
