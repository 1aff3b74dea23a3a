//! ESTree node types.
//!
//! The tree is strictly owned: every child is held by exactly one parent.
//! Each node struct emits its own `"type"` tag; the enums that group nodes
//! (`Statement`, `Expression`, `Pattern`, ...) serialize untagged, so the JSON
//! produced by `serde_json` is the ESTree shape field for field.
//!
//! Every node keeps its byte `span` for the parser's own use and a
//! [`NodeMeta`] holding the position fields requested by the options.

use esz_common::{SourceLocation, SourceType, Span, Spanned};
use serde::{Serialize, Serializer};

/// Optional position fields attached to every serialized node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NodeMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[u32; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loc: Option<SourceLocation>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

macro_rules! impl_spanned {
    ($($ty:ty),* $(,)?) => {
        $(impl Spanned for $ty {
            #[inline]
            fn span(&self) -> Span {
                self.span
            }
        })*
    };
}

// =============================================================================
// Program
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Program {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    #[serde(rename = "sourceType")]
    pub source_type: SourceType,
    pub body: Vec<Statement>,
}

// =============================================================================
// Names and literals
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Identifier {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct PrivateIdentifier {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    String(String),
    Number(f64),
    Boolean(bool),
    /// `null`, and the JSON stand-in for regular expression and BigInt values.
    Null,
}

impl Serialize for LiteralValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::String(value) => serializer.serialize_str(value),
            Self::Number(value) => {
                // Integral values print as JSON integers, like `JSON.stringify`.
                if value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
                    if *value == 0.0 && value.is_sign_negative() {
                        serializer.serialize_f64(*value)
                    } else {
                        serializer.serialize_i64(*value as i64)
                    }
                } else {
                    serializer.serialize_f64(*value)
                }
            }
            Self::Boolean(value) => serializer.serialize_bool(*value),
            Self::Null => serializer.serialize_unit(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegExpValue {
    pub pattern: String,
    pub flags: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Literal {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub value: LiteralValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regex: Option<RegExpValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bigint: Option<String>,
}

impl Literal {
    #[must_use]
    pub fn string_value(&self) -> Option<&str> {
        match &self.value {
            LiteralValue::String(value) => Some(value),
            _ => None,
        }
    }
}

// =============================================================================
// Statements
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Statement {
    ExpressionStatement(Box<ExpressionStatement>),
    BlockStatement(Box<BlockStatement>),
    EmptyStatement(Box<EmptyStatement>),
    DebuggerStatement(Box<DebuggerStatement>),
    WithStatement(Box<WithStatement>),
    ReturnStatement(Box<ReturnStatement>),
    LabeledStatement(Box<LabeledStatement>),
    BreakStatement(Box<BreakStatement>),
    ContinueStatement(Box<ContinueStatement>),
    IfStatement(Box<IfStatement>),
    SwitchStatement(Box<SwitchStatement>),
    ThrowStatement(Box<ThrowStatement>),
    TryStatement(Box<TryStatement>),
    WhileStatement(Box<WhileStatement>),
    DoWhileStatement(Box<DoWhileStatement>),
    ForStatement(Box<ForStatement>),
    ForInStatement(Box<ForInStatement>),
    ForOfStatement(Box<ForOfStatement>),
    FunctionDeclaration(Box<Function>),
    VariableDeclaration(Box<VariableDeclaration>),
    ClassDeclaration(Box<Class>),
    ImportDeclaration(Box<ImportDeclaration>),
    ExportNamedDeclaration(Box<ExportNamedDeclaration>),
    ExportDefaultDeclaration(Box<ExportDefaultDeclaration>),
    ExportAllDeclaration(Box<ExportAllDeclaration>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ExpressionStatement {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub expression: Expression,
    /// Raw directive text (without quotes) for directive-prologue entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directive: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct BlockStatement {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct EmptyStatement {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct DebuggerStatement {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct WithStatement {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub object: Expression,
    pub body: Statement,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ReturnStatement {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub argument: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct LabeledStatement {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub label: Identifier,
    pub body: Statement,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct BreakStatement {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub label: Option<Identifier>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ContinueStatement {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub label: Option<Identifier>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct IfStatement {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub test: Expression,
    pub consequent: Statement,
    pub alternate: Option<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct SwitchStatement {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub discriminant: Expression,
    pub cases: Vec<SwitchCase>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct SwitchCase {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub test: Option<Expression>,
    pub consequent: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ThrowStatement {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub argument: Expression,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct TryStatement {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub block: BlockStatement,
    pub handler: Option<CatchClause>,
    pub finalizer: Option<BlockStatement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct CatchClause {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub param: Option<Pattern>,
    pub body: BlockStatement,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct WhileStatement {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub test: Expression,
    pub body: Statement,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct DoWhileStatement {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub body: Statement,
    pub test: Expression,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ForInit {
    VariableDeclaration(Box<VariableDeclaration>),
    Expression(Expression),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ForHead {
    VariableDeclaration(Box<VariableDeclaration>),
    Pattern(Pattern),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ForStatement {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub init: Option<ForInit>,
    pub test: Option<Expression>,
    pub update: Option<Expression>,
    pub body: Statement,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ForInStatement {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub left: ForHead,
    pub right: Expression,
    pub body: Statement,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ForOfStatement {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub left: ForHead,
    pub right: Expression,
    pub body: Statement,
    #[serde(rename = "await")]
    pub is_await: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

impl VariableKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Var => "var",
            Self::Let => "let",
            Self::Const => "const",
        }
    }

    #[must_use]
    pub const fn is_lexical(self) -> bool {
        !matches!(self, Self::Var)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct VariableDeclaration {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub declarations: Vec<VariableDeclarator>,
    pub kind: VariableKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct VariableDeclarator {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub id: Pattern,
    pub init: Option<Expression>,
}

// =============================================================================
// Functions and classes
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FunctionKind {
    FunctionDeclaration,
    FunctionExpression,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Function {
    #[serde(rename = "type")]
    pub kind: FunctionKind,
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub id: Option<Identifier>,
    pub params: Vec<Pattern>,
    pub body: BlockStatement,
    #[serde(rename = "async")]
    pub is_async: bool,
    pub generator: bool,
    /// Always `false`; only arrows have expression bodies.
    pub expression: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArrowBody {
    Block(Box<BlockStatement>),
    Expression(Expression),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ArrowFunctionExpression {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    /// Always `None`; arrows are anonymous.
    pub id: Option<Identifier>,
    pub params: Vec<Pattern>,
    pub body: ArrowBody,
    #[serde(rename = "async")]
    pub is_async: bool,
    pub expression: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ClassKind {
    ClassDeclaration,
    ClassExpression,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Class {
    #[serde(rename = "type")]
    pub kind: ClassKind,
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub id: Option<Identifier>,
    #[serde(rename = "superClass")]
    pub super_class: Option<Expression>,
    pub body: ClassBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ClassBody {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub body: Vec<ClassElement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ClassElement {
    MethodDefinition(Box<MethodDefinition>),
    PropertyDefinition(Box<PropertyDefinition>),
    StaticBlock(Box<StaticBlock>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    Constructor,
    Method,
    Get,
    Set,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct MethodDefinition {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub kind: MethodKind,
    #[serde(rename = "static")]
    pub is_static: bool,
    pub computed: bool,
    pub key: Expression,
    pub value: Function,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct PropertyDefinition {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    #[serde(rename = "static")]
    pub is_static: bool,
    pub computed: bool,
    pub key: Expression,
    pub value: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct StaticBlock {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub body: Vec<Statement>,
}

// =============================================================================
// Modules
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ModuleExportName {
    Identifier(Identifier),
    Literal(Literal),
}

impl ModuleExportName {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Identifier(id) => &id.name,
            Self::Literal(lit) => lit.string_value().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ImportDeclaration {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub specifiers: Vec<ImportDeclarationSpecifier>,
    pub source: Literal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ImportDeclarationSpecifier {
    ImportSpecifier(Box<ImportSpecifier>),
    ImportDefaultSpecifier(Box<ImportDefaultSpecifier>),
    ImportNamespaceSpecifier(Box<ImportNamespaceSpecifier>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ImportSpecifier {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub imported: ModuleExportName,
    pub local: Identifier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ImportDefaultSpecifier {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub local: Identifier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ImportNamespaceSpecifier {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub local: Identifier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ExportNamedDeclaration {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub declaration: Option<Statement>,
    pub specifiers: Vec<ExportSpecifier>,
    pub source: Option<Literal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ExportSpecifier {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub local: ModuleExportName,
    pub exported: ModuleExportName,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExportDefaultKind {
    FunctionDeclaration(Box<Function>),
    ClassDeclaration(Box<Class>),
    Expression(Expression),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ExportDefaultDeclaration {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub declaration: ExportDefaultKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ExportAllDeclaration {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub source: Literal,
    pub exported: Option<ModuleExportName>,
}

// =============================================================================
// Expressions
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Expression {
    Identifier(Box<Identifier>),
    PrivateIdentifier(Box<PrivateIdentifier>),
    Literal(Box<Literal>),
    ThisExpression(Box<ThisExpression>),
    Super(Box<Super>),
    ArrayExpression(Box<ArrayExpression>),
    ObjectExpression(Box<ObjectExpression>),
    FunctionExpression(Box<Function>),
    ArrowFunctionExpression(Box<ArrowFunctionExpression>),
    ClassExpression(Box<Class>),
    TemplateLiteral(Box<TemplateLiteral>),
    TaggedTemplateExpression(Box<TaggedTemplateExpression>),
    MemberExpression(Box<MemberExpression>),
    CallExpression(Box<CallExpression>),
    NewExpression(Box<NewExpression>),
    UpdateExpression(Box<UpdateExpression>),
    UnaryExpression(Box<UnaryExpression>),
    BinaryExpression(Box<BinaryExpression>),
    LogicalExpression(Box<LogicalExpression>),
    AssignmentExpression(Box<AssignmentExpression>),
    ConditionalExpression(Box<ConditionalExpression>),
    SequenceExpression(Box<SequenceExpression>),
    YieldExpression(Box<YieldExpression>),
    AwaitExpression(Box<AwaitExpression>),
    MetaProperty(Box<MetaProperty>),
    ImportExpression(Box<ImportExpression>),
    ChainExpression(Box<ChainExpression>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ThisExpression {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Super {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArrayElement {
    Expression(Expression),
    SpreadElement(Box<SpreadElement>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct SpreadElement {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub argument: Expression,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ArrayExpression {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub elements: Vec<Option<ArrayElement>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ObjectMember {
    Property(Box<Property>),
    SpreadElement(Box<SpreadElement>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    Init,
    Get,
    Set,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Property {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub key: Expression,
    pub value: Expression,
    pub kind: PropertyKind,
    pub computed: bool,
    pub method: bool,
    pub shorthand: bool,
    /// `{ a = 1 }` cover initializer; only valid once converted to a pattern.
    #[serde(skip)]
    pub shorthand_init: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ObjectExpression {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub properties: Vec<ObjectMember>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateElementValue {
    pub raw: String,
    pub cooked: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct TemplateElement {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub value: TemplateElementValue,
    pub tail: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct TemplateLiteral {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub quasis: Vec<TemplateElement>,
    pub expressions: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct TaggedTemplateExpression {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub tag: Expression,
    pub quasi: TemplateLiteral,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct MemberExpression {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub object: Expression,
    pub computed: bool,
    pub property: Expression,
    #[serde(skip_serializing_if = "is_false")]
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct CallExpression {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub callee: Expression,
    pub arguments: Vec<ArrayElement>,
    #[serde(skip_serializing_if = "is_false")]
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct NewExpression {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub callee: Expression,
    pub arguments: Vec<ArrayElement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UpdateOperator {
    #[serde(rename = "++")]
    Increment,
    #[serde(rename = "--")]
    Decrement,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct UpdateExpression {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub operator: UpdateOperator,
    pub prefix: bool,
    pub argument: Expression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOperator {
    #[serde(rename = "-")]
    Minus,
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "!")]
    Not,
    #[serde(rename = "~")]
    BitwiseNot,
    #[serde(rename = "typeof")]
    Typeof,
    #[serde(rename = "void")]
    Void,
    #[serde(rename = "delete")]
    Delete,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct UnaryExpression {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub operator: UnaryOperator,
    pub prefix: bool,
    pub argument: Expression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOperator {
    #[serde(rename = "==")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
    #[serde(rename = "===")]
    StrictEqual,
    #[serde(rename = "!==")]
    StrictNotEqual,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "<=")]
    LessThanOrEqual,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = ">=")]
    GreaterThanOrEqual,
    #[serde(rename = "<<")]
    ShiftLeft,
    #[serde(rename = ">>")]
    ShiftRight,
    #[serde(rename = ">>>")]
    ShiftRightUnsigned,
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
    #[serde(rename = "%")]
    Remainder,
    #[serde(rename = "**")]
    Exponent,
    #[serde(rename = "|")]
    BitwiseOr,
    #[serde(rename = "^")]
    BitwiseXor,
    #[serde(rename = "&")]
    BitwiseAnd,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "instanceof")]
    Instanceof,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct BinaryExpression {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub left: Expression,
    pub operator: BinaryOperator,
    pub right: Expression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LogicalOperator {
    #[serde(rename = "||")]
    Or,
    #[serde(rename = "&&")]
    And,
    #[serde(rename = "??")]
    Coalesce,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct LogicalExpression {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub left: Expression,
    pub operator: LogicalOperator,
    pub right: Expression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssignmentOperator {
    #[serde(rename = "=")]
    Assign,
    #[serde(rename = "+=")]
    Add,
    #[serde(rename = "-=")]
    Subtract,
    #[serde(rename = "*=")]
    Multiply,
    #[serde(rename = "/=")]
    Divide,
    #[serde(rename = "%=")]
    Remainder,
    #[serde(rename = "**=")]
    Exponent,
    #[serde(rename = "<<=")]
    ShiftLeft,
    #[serde(rename = ">>=")]
    ShiftRight,
    #[serde(rename = ">>>=")]
    ShiftRightUnsigned,
    #[serde(rename = "|=")]
    BitwiseOr,
    #[serde(rename = "^=")]
    BitwiseXor,
    #[serde(rename = "&=")]
    BitwiseAnd,
    #[serde(rename = "||=")]
    LogicalOr,
    #[serde(rename = "&&=")]
    LogicalAnd,
    #[serde(rename = "??=")]
    LogicalNullish,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct AssignmentExpression {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub operator: AssignmentOperator,
    pub left: Pattern,
    pub right: Expression,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ConditionalExpression {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub test: Expression,
    pub consequent: Expression,
    pub alternate: Expression,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct SequenceExpression {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub expressions: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct YieldExpression {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub argument: Option<Expression>,
    pub delegate: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct AwaitExpression {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub argument: Expression,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct MetaProperty {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    #[serde(rename = "meta")]
    pub meta_name: Identifier,
    pub property: Identifier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ImportExpression {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub source: Expression,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ChainExpression {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub expression: Expression,
}

// =============================================================================
// Patterns
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Pattern {
    Identifier(Box<Identifier>),
    ObjectPattern(Box<ObjectPattern>),
    ArrayPattern(Box<ArrayPattern>),
    RestElement(Box<RestElement>),
    AssignmentPattern(Box<AssignmentPattern>),
    /// Only valid as an assignment target, never as a binding.
    MemberExpression(Box<MemberExpression>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ObjectPattern {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub properties: Vec<ObjectPatternMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ObjectPatternMember {
    Property(Box<AssignmentProperty>),
    RestElement(Box<RestElement>),
}

/// `Property` node whose value is a pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "Property")]
pub struct AssignmentProperty {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub key: Expression,
    pub value: Pattern,
    pub kind: PropertyKind,
    pub computed: bool,
    pub method: bool,
    pub shorthand: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ArrayPattern {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub elements: Vec<Option<Pattern>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct RestElement {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub argument: Pattern,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct AssignmentPattern {
    #[serde(skip)]
    pub span: Span,
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub left: Pattern,
    pub right: Expression,
}

// =============================================================================
// Span access
// =============================================================================

impl_spanned!(
    Program,
    Identifier,
    PrivateIdentifier,
    Literal,
    ExpressionStatement,
    BlockStatement,
    EmptyStatement,
    DebuggerStatement,
    WithStatement,
    ReturnStatement,
    LabeledStatement,
    BreakStatement,
    ContinueStatement,
    IfStatement,
    SwitchStatement,
    SwitchCase,
    ThrowStatement,
    TryStatement,
    CatchClause,
    WhileStatement,
    DoWhileStatement,
    ForStatement,
    ForInStatement,
    ForOfStatement,
    VariableDeclaration,
    VariableDeclarator,
    Function,
    ArrowFunctionExpression,
    Class,
    ClassBody,
    MethodDefinition,
    PropertyDefinition,
    StaticBlock,
    ImportDeclaration,
    ImportSpecifier,
    ImportDefaultSpecifier,
    ImportNamespaceSpecifier,
    ExportNamedDeclaration,
    ExportSpecifier,
    ExportDefaultDeclaration,
    ExportAllDeclaration,
    ThisExpression,
    Super,
    SpreadElement,
    ArrayExpression,
    Property,
    ObjectExpression,
    TemplateElement,
    TemplateLiteral,
    TaggedTemplateExpression,
    MemberExpression,
    CallExpression,
    NewExpression,
    UpdateExpression,
    UnaryExpression,
    BinaryExpression,
    LogicalExpression,
    AssignmentExpression,
    ConditionalExpression,
    SequenceExpression,
    YieldExpression,
    AwaitExpression,
    MetaProperty,
    ImportExpression,
    ChainExpression,
    ObjectPattern,
    AssignmentProperty,
    ArrayPattern,
    RestElement,
    AssignmentPattern,
);

impl Spanned for Expression {
    fn span(&self) -> Span {
        match self {
            Self::Identifier(n) => n.span,
            Self::PrivateIdentifier(n) => n.span,
            Self::Literal(n) => n.span,
            Self::ThisExpression(n) => n.span,
            Self::Super(n) => n.span,
            Self::ArrayExpression(n) => n.span,
            Self::ObjectExpression(n) => n.span,
            Self::FunctionExpression(n) => n.span,
            Self::ArrowFunctionExpression(n) => n.span,
            Self::ClassExpression(n) => n.span,
            Self::TemplateLiteral(n) => n.span,
            Self::TaggedTemplateExpression(n) => n.span,
            Self::MemberExpression(n) => n.span,
            Self::CallExpression(n) => n.span,
            Self::NewExpression(n) => n.span,
            Self::UpdateExpression(n) => n.span,
            Self::UnaryExpression(n) => n.span,
            Self::BinaryExpression(n) => n.span,
            Self::LogicalExpression(n) => n.span,
            Self::AssignmentExpression(n) => n.span,
            Self::ConditionalExpression(n) => n.span,
            Self::SequenceExpression(n) => n.span,
            Self::YieldExpression(n) => n.span,
            Self::AwaitExpression(n) => n.span,
            Self::MetaProperty(n) => n.span,
            Self::ImportExpression(n) => n.span,
            Self::ChainExpression(n) => n.span,
        }
    }
}

impl Spanned for Pattern {
    fn span(&self) -> Span {
        match self {
            Self::Identifier(n) => n.span,
            Self::ObjectPattern(n) => n.span,
            Self::ArrayPattern(n) => n.span,
            Self::RestElement(n) => n.span,
            Self::AssignmentPattern(n) => n.span,
            Self::MemberExpression(n) => n.span,
        }
    }
}

impl Spanned for Statement {
    fn span(&self) -> Span {
        match self {
            Self::ExpressionStatement(n) => n.span,
            Self::BlockStatement(n) => n.span,
            Self::EmptyStatement(n) => n.span,
            Self::DebuggerStatement(n) => n.span,
            Self::WithStatement(n) => n.span,
            Self::ReturnStatement(n) => n.span,
            Self::LabeledStatement(n) => n.span,
            Self::BreakStatement(n) => n.span,
            Self::ContinueStatement(n) => n.span,
            Self::IfStatement(n) => n.span,
            Self::SwitchStatement(n) => n.span,
            Self::ThrowStatement(n) => n.span,
            Self::TryStatement(n) => n.span,
            Self::WhileStatement(n) => n.span,
            Self::DoWhileStatement(n) => n.span,
            Self::ForStatement(n) => n.span,
            Self::ForInStatement(n) => n.span,
            Self::ForOfStatement(n) => n.span,
            Self::FunctionDeclaration(n) => n.span,
            Self::VariableDeclaration(n) => n.span,
            Self::ClassDeclaration(n) => n.span,
            Self::ImportDeclaration(n) => n.span,
            Self::ExportNamedDeclaration(n) => n.span,
            Self::ExportDefaultDeclaration(n) => n.span,
            Self::ExportAllDeclaration(n) => n.span,
        }
    }
}

impl Spanned for ArrayElement {
    fn span(&self) -> Span {
        match self {
            Self::Expression(e) => e.span(),
            Self::SpreadElement(s) => s.span,
        }
    }
}

impl Spanned for ObjectMember {
    fn span(&self) -> Span {
        match self {
            Self::Property(p) => p.span,
            Self::SpreadElement(s) => s.span,
        }
    }
}

impl Expression {
    /// Whether the expression is a plain identifier reference.
    #[must_use]
    pub fn as_identifier(&self) -> Option<&Identifier> {
        match self {
            Self::Identifier(id) => Some(id),
            _ => None,
        }
    }
}

impl Pattern {
    /// Collect every name bound by this pattern, in source order.
    pub fn bound_names<'p>(&'p self, out: &mut Vec<&'p Identifier>) {
        match self {
            Self::Identifier(id) => out.push(id),
            Self::ObjectPattern(obj) => {
                for member in &obj.properties {
                    match member {
                        ObjectPatternMember::Property(prop) => prop.value.bound_names(out),
                        ObjectPatternMember::RestElement(rest) => rest.argument.bound_names(out),
                    }
                }
            }
            Self::ArrayPattern(arr) => {
                for element in arr.elements.iter().flatten() {
                    element.bound_names(out);
                }
            }
            Self::RestElement(rest) => rest.argument.bound_names(out),
            Self::AssignmentPattern(assign) => assign.left.bound_names(out),
            Self::MemberExpression(_) => {}
        }
    }

    /// `Identifier` only: no defaults, rest or destructuring.
    #[must_use]
    pub fn is_simple_parameter(&self) -> bool {
        matches!(self, Self::Identifier(_))
    }
}
