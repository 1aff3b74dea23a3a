//! Token kinds.
//!
//! Variant order is significant: the range predicates below compare
//! discriminants, so each group must stay contiguous.

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum SyntaxKind {
    Unknown,
    EndOfFileToken,

    // Literals
    NumericLiteral,
    BigIntLiteral,
    StringLiteral,
    RegularExpressionLiteral,
    NoSubstitutionTemplateLiteral,
    TemplateHead,
    TemplateMiddle,
    TemplateTail,

    // Names
    Identifier,
    PrivateIdentifier,

    // Punctuation
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    DotToken,
    DotDotDotToken,
    SemicolonToken,
    CommaToken,
    QuestionDotToken,
    LessThanToken,
    GreaterThanToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,
    EqualsEqualsToken,
    ExclamationEqualsToken,
    EqualsEqualsEqualsToken,
    ExclamationEqualsEqualsToken,
    EqualsGreaterThanToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    AsteriskAsteriskToken,
    SlashToken,
    PercentToken,
    PlusPlusToken,
    MinusMinusToken,
    LessThanLessThanToken,
    GreaterThanGreaterThanToken,
    GreaterThanGreaterThanGreaterThanToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    ExclamationToken,
    TildeToken,
    AmpersandAmpersandToken,
    BarBarToken,
    QuestionToken,
    QuestionQuestionToken,
    ColonToken,

    // Assignments
    EqualsToken,
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    AsteriskAsteriskEqualsToken,
    SlashEqualsToken,
    PercentEqualsToken,
    LessThanLessThanEqualsToken,
    GreaterThanGreaterThanEqualsToken,
    GreaterThanGreaterThanGreaterThanEqualsToken,
    AmpersandEqualsToken,
    BarEqualsToken,
    CaretEqualsToken,
    AmpersandAmpersandEqualsToken,
    BarBarEqualsToken,
    QuestionQuestionEqualsToken,

    // Reserved words
    BreakKeyword,
    CaseKeyword,
    CatchKeyword,
    ClassKeyword,
    ConstKeyword,
    ContinueKeyword,
    DebuggerKeyword,
    DefaultKeyword,
    DeleteKeyword,
    DoKeyword,
    ElseKeyword,
    EnumKeyword,
    ExportKeyword,
    ExtendsKeyword,
    FalseKeyword,
    FinallyKeyword,
    ForKeyword,
    FunctionKeyword,
    IfKeyword,
    ImportKeyword,
    InKeyword,
    InstanceOfKeyword,
    NewKeyword,
    NullKeyword,
    ReturnKeyword,
    SuperKeyword,
    SwitchKeyword,
    ThisKeyword,
    ThrowKeyword,
    TrueKeyword,
    TryKeyword,
    TypeOfKeyword,
    VarKeyword,
    VoidKeyword,
    WhileKeyword,
    WithKeyword,

    // Reserved in strict mode
    ImplementsKeyword,
    InterfaceKeyword,
    LetKeyword,
    PackageKeyword,
    PrivateKeyword,
    ProtectedKeyword,
    PublicKeyword,
    StaticKeyword,
    YieldKeyword,

    // Contextual keywords
    AsKeyword,
    AsyncKeyword,
    AwaitKeyword,
    FromKeyword,
    GetKeyword,
    OfKeyword,
    SetKeyword,
}

impl SyntaxKind {
    pub const FIRST_PUNCTUATION: SyntaxKind = SyntaxKind::OpenBraceToken;
    pub const LAST_PUNCTUATION: SyntaxKind = SyntaxKind::QuestionQuestionEqualsToken;
    pub const FIRST_ASSIGNMENT: SyntaxKind = SyntaxKind::EqualsToken;
    pub const LAST_ASSIGNMENT: SyntaxKind = SyntaxKind::QuestionQuestionEqualsToken;
    pub const FIRST_KEYWORD: SyntaxKind = SyntaxKind::BreakKeyword;
    pub const LAST_RESERVED_WORD: SyntaxKind = SyntaxKind::WithKeyword;
    pub const FIRST_FUTURE_RESERVED_WORD: SyntaxKind = SyntaxKind::ImplementsKeyword;
    pub const LAST_FUTURE_RESERVED_WORD: SyntaxKind = SyntaxKind::YieldKeyword;
    pub const FIRST_CONTEXTUAL_KEYWORD: SyntaxKind = SyntaxKind::AsKeyword;
    pub const LAST_KEYWORD: SyntaxKind = SyntaxKind::SetKeyword;

    #[inline]
    #[must_use]
    pub fn is_keyword(self) -> bool {
        self >= Self::FIRST_KEYWORD && self <= Self::LAST_KEYWORD
    }

    /// Unconditionally reserved (`if`, `class`, `enum`, ...).
    #[inline]
    #[must_use]
    pub fn is_reserved_word(self) -> bool {
        self >= Self::FIRST_KEYWORD && self <= Self::LAST_RESERVED_WORD
    }

    /// Reserved only in strict mode code (`let`, `static`, `yield`, ...).
    #[inline]
    #[must_use]
    pub fn is_strict_mode_reserved_word(self) -> bool {
        self >= Self::FIRST_FUTURE_RESERVED_WORD && self <= Self::LAST_FUTURE_RESERVED_WORD
    }

    #[inline]
    #[must_use]
    pub fn is_contextual_keyword(self) -> bool {
        self >= Self::FIRST_CONTEXTUAL_KEYWORD && self <= Self::LAST_KEYWORD
    }

    /// Tokens that can name a binding in at least one context: plain
    /// identifiers, strict-mode reserved words and contextual keywords.
    #[inline]
    #[must_use]
    pub fn is_identifier_like(self) -> bool {
        self == Self::Identifier || self >= Self::FIRST_FUTURE_RESERVED_WORD && self <= Self::LAST_KEYWORD
    }

    /// `IdentifierName`: any identifier or keyword. Valid after `.` and as a
    /// property key.
    #[inline]
    #[must_use]
    pub fn is_identifier_or_keyword(self) -> bool {
        self == Self::Identifier || self.is_keyword()
    }

    #[inline]
    #[must_use]
    pub fn is_assignment_operator(self) -> bool {
        self >= Self::FIRST_ASSIGNMENT && self <= Self::LAST_ASSIGNMENT
    }

    #[inline]
    #[must_use]
    pub fn is_logical_assignment_operator(self) -> bool {
        matches!(
            self,
            Self::AmpersandAmpersandEqualsToken
                | Self::BarBarEqualsToken
                | Self::QuestionQuestionEqualsToken
        )
    }

    #[inline]
    #[must_use]
    pub fn is_template_start(self) -> bool {
        matches!(self, Self::NoSubstitutionTemplateLiteral | Self::TemplateHead)
    }

    /// Source text of punctuators and keywords; a descriptive name otherwise.
    #[must_use]
    pub fn text(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::EndOfFileToken => "end of input",
            Self::NumericLiteral => "number",
            Self::BigIntLiteral => "bigint",
            Self::StringLiteral => "string",
            Self::RegularExpressionLiteral => "regular expression",
            Self::NoSubstitutionTemplateLiteral
            | Self::TemplateHead
            | Self::TemplateMiddle
            | Self::TemplateTail => "template",
            Self::Identifier => "identifier",
            Self::PrivateIdentifier => "private name",
            Self::OpenBraceToken => "{",
            Self::CloseBraceToken => "}",
            Self::OpenParenToken => "(",
            Self::CloseParenToken => ")",
            Self::OpenBracketToken => "[",
            Self::CloseBracketToken => "]",
            Self::DotToken => ".",
            Self::DotDotDotToken => "...",
            Self::SemicolonToken => ";",
            Self::CommaToken => ",",
            Self::QuestionDotToken => "?.",
            Self::LessThanToken => "<",
            Self::GreaterThanToken => ">",
            Self::LessThanEqualsToken => "<=",
            Self::GreaterThanEqualsToken => ">=",
            Self::EqualsEqualsToken => "==",
            Self::ExclamationEqualsToken => "!=",
            Self::EqualsEqualsEqualsToken => "===",
            Self::ExclamationEqualsEqualsToken => "!==",
            Self::EqualsGreaterThanToken => "=>",
            Self::PlusToken => "+",
            Self::MinusToken => "-",
            Self::AsteriskToken => "*",
            Self::AsteriskAsteriskToken => "**",
            Self::SlashToken => "/",
            Self::PercentToken => "%",
            Self::PlusPlusToken => "++",
            Self::MinusMinusToken => "--",
            Self::LessThanLessThanToken => "<<",
            Self::GreaterThanGreaterThanToken => ">>",
            Self::GreaterThanGreaterThanGreaterThanToken => ">>>",
            Self::AmpersandToken => "&",
            Self::BarToken => "|",
            Self::CaretToken => "^",
            Self::ExclamationToken => "!",
            Self::TildeToken => "~",
            Self::AmpersandAmpersandToken => "&&",
            Self::BarBarToken => "||",
            Self::QuestionToken => "?",
            Self::QuestionQuestionToken => "??",
            Self::ColonToken => ":",
            Self::EqualsToken => "=",
            Self::PlusEqualsToken => "+=",
            Self::MinusEqualsToken => "-=",
            Self::AsteriskEqualsToken => "*=",
            Self::AsteriskAsteriskEqualsToken => "**=",
            Self::SlashEqualsToken => "/=",
            Self::PercentEqualsToken => "%=",
            Self::LessThanLessThanEqualsToken => "<<=",
            Self::GreaterThanGreaterThanEqualsToken => ">>=",
            Self::GreaterThanGreaterThanGreaterThanEqualsToken => ">>>=",
            Self::AmpersandEqualsToken => "&=",
            Self::BarEqualsToken => "|=",
            Self::CaretEqualsToken => "^=",
            Self::AmpersandAmpersandEqualsToken => "&&=",
            Self::BarBarEqualsToken => "||=",
            Self::QuestionQuestionEqualsToken => "??=",
            Self::BreakKeyword => "break",
            Self::CaseKeyword => "case",
            Self::CatchKeyword => "catch",
            Self::ClassKeyword => "class",
            Self::ConstKeyword => "const",
            Self::ContinueKeyword => "continue",
            Self::DebuggerKeyword => "debugger",
            Self::DefaultKeyword => "default",
            Self::DeleteKeyword => "delete",
            Self::DoKeyword => "do",
            Self::ElseKeyword => "else",
            Self::EnumKeyword => "enum",
            Self::ExportKeyword => "export",
            Self::ExtendsKeyword => "extends",
            Self::FalseKeyword => "false",
            Self::FinallyKeyword => "finally",
            Self::ForKeyword => "for",
            Self::FunctionKeyword => "function",
            Self::IfKeyword => "if",
            Self::ImportKeyword => "import",
            Self::InKeyword => "in",
            Self::InstanceOfKeyword => "instanceof",
            Self::NewKeyword => "new",
            Self::NullKeyword => "null",
            Self::ReturnKeyword => "return",
            Self::SuperKeyword => "super",
            Self::SwitchKeyword => "switch",
            Self::ThisKeyword => "this",
            Self::ThrowKeyword => "throw",
            Self::TrueKeyword => "true",
            Self::TryKeyword => "try",
            Self::TypeOfKeyword => "typeof",
            Self::VarKeyword => "var",
            Self::VoidKeyword => "void",
            Self::WhileKeyword => "while",
            Self::WithKeyword => "with",
            Self::ImplementsKeyword => "implements",
            Self::InterfaceKeyword => "interface",
            Self::LetKeyword => "let",
            Self::PackageKeyword => "package",
            Self::PrivateKeyword => "private",
            Self::ProtectedKeyword => "protected",
            Self::PublicKeyword => "public",
            Self::StaticKeyword => "static",
            Self::YieldKeyword => "yield",
            Self::AsKeyword => "as",
            Self::AsyncKeyword => "async",
            Self::AwaitKeyword => "await",
            Self::FromKeyword => "from",
            Self::GetKeyword => "get",
            Self::OfKeyword => "of",
            Self::SetKeyword => "set",
        }
    }
}

/// The single keyword table shared by the scanner and the parser's
/// identifier validation.
#[must_use]
pub fn text_to_keyword(text: &str) -> Option<SyntaxKind> {
    let kind = match text {
        "break" => SyntaxKind::BreakKeyword,
        "case" => SyntaxKind::CaseKeyword,
        "catch" => SyntaxKind::CatchKeyword,
        "class" => SyntaxKind::ClassKeyword,
        "const" => SyntaxKind::ConstKeyword,
        "continue" => SyntaxKind::ContinueKeyword,
        "debugger" => SyntaxKind::DebuggerKeyword,
        "default" => SyntaxKind::DefaultKeyword,
        "delete" => SyntaxKind::DeleteKeyword,
        "do" => SyntaxKind::DoKeyword,
        "else" => SyntaxKind::ElseKeyword,
        "enum" => SyntaxKind::EnumKeyword,
        "export" => SyntaxKind::ExportKeyword,
        "extends" => SyntaxKind::ExtendsKeyword,
        "false" => SyntaxKind::FalseKeyword,
        "finally" => SyntaxKind::FinallyKeyword,
        "for" => SyntaxKind::ForKeyword,
        "function" => SyntaxKind::FunctionKeyword,
        "if" => SyntaxKind::IfKeyword,
        "import" => SyntaxKind::ImportKeyword,
        "in" => SyntaxKind::InKeyword,
        "instanceof" => SyntaxKind::InstanceOfKeyword,
        "new" => SyntaxKind::NewKeyword,
        "null" => SyntaxKind::NullKeyword,
        "return" => SyntaxKind::ReturnKeyword,
        "super" => SyntaxKind::SuperKeyword,
        "switch" => SyntaxKind::SwitchKeyword,
        "this" => SyntaxKind::ThisKeyword,
        "throw" => SyntaxKind::ThrowKeyword,
        "true" => SyntaxKind::TrueKeyword,
        "try" => SyntaxKind::TryKeyword,
        "typeof" => SyntaxKind::TypeOfKeyword,
        "var" => SyntaxKind::VarKeyword,
        "void" => SyntaxKind::VoidKeyword,
        "while" => SyntaxKind::WhileKeyword,
        "with" => SyntaxKind::WithKeyword,
        "implements" => SyntaxKind::ImplementsKeyword,
        "interface" => SyntaxKind::InterfaceKeyword,
        "let" => SyntaxKind::LetKeyword,
        "package" => SyntaxKind::PackageKeyword,
        "private" => SyntaxKind::PrivateKeyword,
        "protected" => SyntaxKind::ProtectedKeyword,
        "public" => SyntaxKind::PublicKeyword,
        "static" => SyntaxKind::StaticKeyword,
        "yield" => SyntaxKind::YieldKeyword,
        "as" => SyntaxKind::AsKeyword,
        "async" => SyntaxKind::AsyncKeyword,
        "await" => SyntaxKind::AwaitKeyword,
        "from" => SyntaxKind::FromKeyword,
        "get" => SyntaxKind::GetKeyword,
        "of" => SyntaxKind::OfKeyword,
        "set" => SyntaxKind::SetKeyword,
        _ => return None,
    };
    Some(kind)
}
