use logos::Logos;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    // Tokens
    Error = 0,
    Whitespace,
    Comment,

    // Identifiers & Literals
    Ident,
    Integer,
    Float,
    String,
    Char,

    // Punctuation
    Hash,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semicolon,
    Colon,
    DoubleColon,
    Comma,
    Dot,
    Question,
    QuestionQuestion,
    FatArrow,
    Arrow,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    Amp,
    Pipe,
    Tilde,
    Exclaim,
    Equal,
    Less,
    Greater,
    PlusPlus,
    MinusMinus,
    PlusEqual,
    MinusEqual,
    StarEqual,
    SlashEqual,
    PercentEqual,
    CaretEqual,
    AmpEqual,
    PipeEqual,
    QuestionQuestionEqual,
    EqualEqual,
    NotEqual,
    LessEqual,
    GreaterEqual,
    AndAnd,
    OrOr,
    LeftShift,

    // Keywords
    KwAbstract,
    KwAs,
    KwBase,
    KwBool,
    KwBreak,
    KwByte,
    KwCase,
    KwCatch,
    KwChar,
    KwChecked,
    KwClass,
    KwConst,
    KwContinue,
    KwDecimal,
    KwDefault,
    KwDelegate,
    KwDo,
    KwDouble,
    KwElse,
    KwEnum,
    KwEvent,
    KwExplicit,
    KwExtern,
    KwFalse,
    KwFinally,
    KwFixed,
    KwFloat,
    KwFor,
    KwForeach,
    KwGoto,
    KwIf,
    KwImplicit,
    KwIn,
    KwInt,
    KwInterface,
    KwInternal,
    KwIs,
    KwLock,
    KwLong,
    KwNamespace,
    KwNew,
    KwNull,
    KwObject,
    KwOperator,
    KwOut,
    KwOverride,
    KwParams,
    KwPrivate,
    KwProtected,
    KwPublic,
    KwReadonly,
    KwRef,
    KwReturn,
    KwSbyte,
    KwSealed,
    KwShort,
    KwSizeof,
    KwStackalloc,
    KwStatic,
    KwString,
    KwStruct,
    KwSwitch,
    KwThis,
    KwThrow,
    KwTrue,
    KwTry,
    KwTypeof,
    KwUint,
    KwUlong,
    KwUnchecked,
    KwUnsafe,
    KwUshort,
    KwUsing,
    KwVirtual,
    KwVoid,
    KwVolatile,
    KwWhile,

    // Composite Nodes (Parser output)
    Root,
    UsingDirective,
    PreprocDirective,
    AttributeList,
    QualifiedName,
    NamespaceDecl,
    MemberList,
    ClassDecl,
    StructDecl,
    InterfaceDecl,
    RecordDecl,
    EnumDecl,
    EnumMemberDecl,
    DelegateDecl,
    FieldDecl,
    EventDecl,
    VariableDeclarator,
    PropertyDecl,
    IndexerDecl,
    AccessorList,
    Accessor,
    MethodDecl,
    ConstructorDecl,
    DestructorDecl,
    OperatorDecl,
    ConversionOperatorDecl,
    UnknownMember,
    TypeParamList,
    BaseList,
    ParamList,
    Param,
    TypeRef,
    Block,
    ExprBody,
    LocalDecl,
    LocalFunction,
    Statement,
}

impl SyntaxKind {
    pub fn is_trivia(self) -> bool {
        matches!(self, SyntaxKind::Whitespace | SyntaxKind::Comment)
    }

    /// Built-in type keywords that can start a type reference.
    pub fn is_predefined_type(self) -> bool {
        matches!(
            self,
            SyntaxKind::KwBool
                | SyntaxKind::KwByte
                | SyntaxKind::KwChar
                | SyntaxKind::KwDecimal
                | SyntaxKind::KwDouble
                | SyntaxKind::KwFloat
                | SyntaxKind::KwInt
                | SyntaxKind::KwLong
                | SyntaxKind::KwObject
                | SyntaxKind::KwSbyte
                | SyntaxKind::KwShort
                | SyntaxKind::KwString
                | SyntaxKind::KwUint
                | SyntaxKind::KwUlong
                | SyntaxKind::KwUshort
                | SyntaxKind::KwVoid
        )
    }

    /// Declaration modifiers that are reserved keywords.
    pub fn is_modifier_keyword(self) -> bool {
        matches!(
            self,
            SyntaxKind::KwPublic
                | SyntaxKind::KwPrivate
                | SyntaxKind::KwProtected
                | SyntaxKind::KwInternal
                | SyntaxKind::KwStatic
                | SyntaxKind::KwAbstract
                | SyntaxKind::KwSealed
                | SyntaxKind::KwVirtual
                | SyntaxKind::KwOverride
                | SyntaxKind::KwReadonly
                | SyntaxKind::KwConst
                | SyntaxKind::KwNew
                | SyntaxKind::KwExtern
                | SyntaxKind::KwUnsafe
                | SyntaxKind::KwVolatile
                | SyntaxKind::KwRef
        )
    }

    pub fn is_keyword(self) -> bool {
        (self as u16) >= (SyntaxKind::KwAbstract as u16) && (self as u16) <= (SyntaxKind::KwWhile as u16)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        rowan::SyntaxKind(kind as u16)
    }
}

#[derive(Logos, Debug, PartialEq, Clone, Copy)]
#[logos(error = ())] // Use unit type for error
pub enum TokenKind {
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"//[^\n]*", allow_greedy = true)]
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    Comment,

    #[token("#")]
    Hash,

    // Punctuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semicolon,
    #[token("::")]
    DoubleColon,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("??=")]
    QuestionQuestionEqual,
    #[token("??")]
    QuestionQuestion,
    #[token("?")]
    Question,
    #[token("=>")]
    FatArrow,
    #[token("->")]
    Arrow,

    // Operators (multi-char first). `>>` is never a single token so that
    // nested generic argument lists close one `>` at a time.
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("+=")]
    PlusEqual,
    #[token("-=")]
    MinusEqual,
    #[token("*=")]
    StarEqual,
    #[token("/=")]
    SlashEqual,
    #[token("%=")]
    PercentEqual,
    #[token("&=")]
    AmpEqual,
    #[token("|=")]
    PipeEqual,
    #[token("^=")]
    CaretEqual,
    #[token("==")]
    EqualEqual,
    #[token("!=")]
    NotEqual,
    #[token("<=")]
    LessEqual,
    #[token(">=")]
    GreaterEqual,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("<<")]
    LeftShift,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("^")]
    Caret,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("~")]
    Tilde,
    #[token("!")]
    Exclaim,
    #[token("=")]
    Equal,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,

    // Keywords
    #[token("abstract")]
    KwAbstract,
    #[token("as")]
    KwAs,
    #[token("base")]
    KwBase,
    #[token("bool")]
    KwBool,
    #[token("break")]
    KwBreak,
    #[token("byte")]
    KwByte,
    #[token("case")]
    KwCase,
    #[token("catch")]
    KwCatch,
    #[token("char")]
    KwChar,
    #[token("checked")]
    KwChecked,
    #[token("class")]
    KwClass,
    #[token("const")]
    KwConst,
    #[token("continue")]
    KwContinue,
    #[token("decimal")]
    KwDecimal,
    #[token("default")]
    KwDefault,
    #[token("delegate")]
    KwDelegate,
    #[token("do")]
    KwDo,
    #[token("double")]
    KwDouble,
    #[token("else")]
    KwElse,
    #[token("enum")]
    KwEnum,
    #[token("event")]
    KwEvent,
    #[token("explicit")]
    KwExplicit,
    #[token("extern")]
    KwExtern,
    #[token("false")]
    KwFalse,
    #[token("finally")]
    KwFinally,
    #[token("fixed")]
    KwFixed,
    #[token("float")]
    KwFloat,
    #[token("for")]
    KwFor,
    #[token("foreach")]
    KwForeach,
    #[token("goto")]
    KwGoto,
    #[token("if")]
    KwIf,
    #[token("implicit")]
    KwImplicit,
    #[token("in")]
    KwIn,
    #[token("int")]
    KwInt,
    #[token("interface")]
    KwInterface,
    #[token("internal")]
    KwInternal,
    #[token("is")]
    KwIs,
    #[token("lock")]
    KwLock,
    #[token("long")]
    KwLong,
    #[token("namespace")]
    KwNamespace,
    #[token("new")]
    KwNew,
    #[token("null")]
    KwNull,
    #[token("object")]
    KwObject,
    #[token("operator")]
    KwOperator,
    #[token("out")]
    KwOut,
    #[token("override")]
    KwOverride,
    #[token("params")]
    KwParams,
    #[token("private")]
    KwPrivate,
    #[token("protected")]
    KwProtected,
    #[token("public")]
    KwPublic,
    #[token("readonly")]
    KwReadonly,
    #[token("ref")]
    KwRef,
    #[token("return")]
    KwReturn,
    #[token("sbyte")]
    KwSbyte,
    #[token("sealed")]
    KwSealed,
    #[token("short")]
    KwShort,
    #[token("sizeof")]
    KwSizeof,
    #[token("stackalloc")]
    KwStackalloc,
    #[token("static")]
    KwStatic,
    #[token("string")]
    KwString,
    #[token("struct")]
    KwStruct,
    #[token("switch")]
    KwSwitch,
    #[token("this")]
    KwThis,
    #[token("throw")]
    KwThrow,
    #[token("true")]
    KwTrue,
    #[token("try")]
    KwTry,
    #[token("typeof")]
    KwTypeof,
    #[token("uint")]
    KwUint,
    #[token("ulong")]
    KwUlong,
    #[token("unchecked")]
    KwUnchecked,
    #[token("unsafe")]
    KwUnsafe,
    #[token("ushort")]
    KwUshort,
    #[token("using")]
    KwUsing,
    #[token("virtual")]
    KwVirtual,
    #[token("void")]
    KwVoid,
    #[token("volatile")]
    KwVolatile,
    #[token("while")]
    KwWhile,

    // Literals
    #[regex(r"@?[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
    #[regex(r#"'([^'\\\n]|\\[^\n])+'"#)]
    Char,
    #[regex(r#"\$?"([^"\\\n]|\\[^\n])*""#)]
    #[regex(r#"(\$@|@\$|@)"([^"]|"")*""#)]
    String,
    #[regex(r"0[xX][0-9A-Fa-f](_?[0-9A-Fa-f])*([uUlL]+)?")]
    #[regex(r"0[bB][01](_?[01])*([uUlL]+)?")]
    #[regex(r"[0-9](_?[0-9])*([uUlL]+)?")]
    Integer,
    #[regex(r"[0-9](_?[0-9])*\.[0-9](_?[0-9])*([eE][+-]?[0-9](_?[0-9])*)?([fFdDmM])?")]
    #[regex(r"\.[0-9](_?[0-9])*([eE][+-]?[0-9](_?[0-9])*)?([fFdDmM])?")]
    #[regex(r"[0-9](_?[0-9])*[eE][+-]?[0-9](_?[0-9])*([fFdDmM])?")]
    #[regex(r"[0-9](_?[0-9])*[fFdDmM]")]
    Float,
}

impl From<TokenKind> for SyntaxKind {
    fn from(token: TokenKind) -> Self {
        match token {
            TokenKind::Whitespace => SyntaxKind::Whitespace,
            TokenKind::Comment => SyntaxKind::Comment,
            TokenKind::Hash => SyntaxKind::Hash,
            TokenKind::LParen => SyntaxKind::LParen,
            TokenKind::RParen => SyntaxKind::RParen,
            TokenKind::LBrace => SyntaxKind::LBrace,
            TokenKind::RBrace => SyntaxKind::RBrace,
            TokenKind::LBracket => SyntaxKind::LBracket,
            TokenKind::RBracket => SyntaxKind::RBracket,
            TokenKind::Semicolon => SyntaxKind::Semicolon,
            TokenKind::DoubleColon => SyntaxKind::DoubleColon,
            TokenKind::Colon => SyntaxKind::Colon,
            TokenKind::Comma => SyntaxKind::Comma,
            TokenKind::Dot => SyntaxKind::Dot,
            TokenKind::QuestionQuestionEqual => SyntaxKind::QuestionQuestionEqual,
            TokenKind::QuestionQuestion => SyntaxKind::QuestionQuestion,
            TokenKind::Question => SyntaxKind::Question,
            TokenKind::FatArrow => SyntaxKind::FatArrow,
            TokenKind::Arrow => SyntaxKind::Arrow,
            TokenKind::PlusPlus => SyntaxKind::PlusPlus,
            TokenKind::MinusMinus => SyntaxKind::MinusMinus,
            TokenKind::PlusEqual => SyntaxKind::PlusEqual,
            TokenKind::MinusEqual => SyntaxKind::MinusEqual,
            TokenKind::StarEqual => SyntaxKind::StarEqual,
            TokenKind::SlashEqual => SyntaxKind::SlashEqual,
            TokenKind::PercentEqual => SyntaxKind::PercentEqual,
            TokenKind::AmpEqual => SyntaxKind::AmpEqual,
            TokenKind::PipeEqual => SyntaxKind::PipeEqual,
            TokenKind::CaretEqual => SyntaxKind::CaretEqual,
            TokenKind::EqualEqual => SyntaxKind::EqualEqual,
            TokenKind::NotEqual => SyntaxKind::NotEqual,
            TokenKind::LessEqual => SyntaxKind::LessEqual,
            TokenKind::GreaterEqual => SyntaxKind::GreaterEqual,
            TokenKind::AndAnd => SyntaxKind::AndAnd,
            TokenKind::OrOr => SyntaxKind::OrOr,
            TokenKind::LeftShift => SyntaxKind::LeftShift,
            TokenKind::Plus => SyntaxKind::Plus,
            TokenKind::Minus => SyntaxKind::Minus,
            TokenKind::Star => SyntaxKind::Star,
            TokenKind::Slash => SyntaxKind::Slash,
            TokenKind::Percent => SyntaxKind::Percent,
            TokenKind::Caret => SyntaxKind::Caret,
            TokenKind::Amp => SyntaxKind::Amp,
            TokenKind::Pipe => SyntaxKind::Pipe,
            TokenKind::Tilde => SyntaxKind::Tilde,
            TokenKind::Exclaim => SyntaxKind::Exclaim,
            TokenKind::Equal => SyntaxKind::Equal,
            TokenKind::Less => SyntaxKind::Less,
            TokenKind::Greater => SyntaxKind::Greater,
            TokenKind::KwAbstract => SyntaxKind::KwAbstract,
            TokenKind::KwAs => SyntaxKind::KwAs,
            TokenKind::KwBase => SyntaxKind::KwBase,
            TokenKind::KwBool => SyntaxKind::KwBool,
            TokenKind::KwBreak => SyntaxKind::KwBreak,
            TokenKind::KwByte => SyntaxKind::KwByte,
            TokenKind::KwCase => SyntaxKind::KwCase,
            TokenKind::KwCatch => SyntaxKind::KwCatch,
            TokenKind::KwChar => SyntaxKind::KwChar,
            TokenKind::KwChecked => SyntaxKind::KwChecked,
            TokenKind::KwClass => SyntaxKind::KwClass,
            TokenKind::KwConst => SyntaxKind::KwConst,
            TokenKind::KwContinue => SyntaxKind::KwContinue,
            TokenKind::KwDecimal => SyntaxKind::KwDecimal,
            TokenKind::KwDefault => SyntaxKind::KwDefault,
            TokenKind::KwDelegate => SyntaxKind::KwDelegate,
            TokenKind::KwDo => SyntaxKind::KwDo,
            TokenKind::KwDouble => SyntaxKind::KwDouble,
            TokenKind::KwElse => SyntaxKind::KwElse,
            TokenKind::KwEnum => SyntaxKind::KwEnum,
            TokenKind::KwEvent => SyntaxKind::KwEvent,
            TokenKind::KwExplicit => SyntaxKind::KwExplicit,
            TokenKind::KwExtern => SyntaxKind::KwExtern,
            TokenKind::KwFalse => SyntaxKind::KwFalse,
            TokenKind::KwFinally => SyntaxKind::KwFinally,
            TokenKind::KwFixed => SyntaxKind::KwFixed,
            TokenKind::KwFloat => SyntaxKind::KwFloat,
            TokenKind::KwFor => SyntaxKind::KwFor,
            TokenKind::KwForeach => SyntaxKind::KwForeach,
            TokenKind::KwGoto => SyntaxKind::KwGoto,
            TokenKind::KwIf => SyntaxKind::KwIf,
            TokenKind::KwImplicit => SyntaxKind::KwImplicit,
            TokenKind::KwIn => SyntaxKind::KwIn,
            TokenKind::KwInt => SyntaxKind::KwInt,
            TokenKind::KwInterface => SyntaxKind::KwInterface,
            TokenKind::KwInternal => SyntaxKind::KwInternal,
            TokenKind::KwIs => SyntaxKind::KwIs,
            TokenKind::KwLock => SyntaxKind::KwLock,
            TokenKind::KwLong => SyntaxKind::KwLong,
            TokenKind::KwNamespace => SyntaxKind::KwNamespace,
            TokenKind::KwNew => SyntaxKind::KwNew,
            TokenKind::KwNull => SyntaxKind::KwNull,
            TokenKind::KwObject => SyntaxKind::KwObject,
            TokenKind::KwOperator => SyntaxKind::KwOperator,
            TokenKind::KwOut => SyntaxKind::KwOut,
            TokenKind::KwOverride => SyntaxKind::KwOverride,
            TokenKind::KwParams => SyntaxKind::KwParams,
            TokenKind::KwPrivate => SyntaxKind::KwPrivate,
            TokenKind::KwProtected => SyntaxKind::KwProtected,
            TokenKind::KwPublic => SyntaxKind::KwPublic,
            TokenKind::KwReadonly => SyntaxKind::KwReadonly,
            TokenKind::KwRef => SyntaxKind::KwRef,
            TokenKind::KwReturn => SyntaxKind::KwReturn,
            TokenKind::KwSbyte => SyntaxKind::KwSbyte,
            TokenKind::KwSealed => SyntaxKind::KwSealed,
            TokenKind::KwShort => SyntaxKind::KwShort,
            TokenKind::KwSizeof => SyntaxKind::KwSizeof,
            TokenKind::KwStackalloc => SyntaxKind::KwStackalloc,
            TokenKind::KwStatic => SyntaxKind::KwStatic,
            TokenKind::KwString => SyntaxKind::KwString,
            TokenKind::KwStruct => SyntaxKind::KwStruct,
            TokenKind::KwSwitch => SyntaxKind::KwSwitch,
            TokenKind::KwThis => SyntaxKind::KwThis,
            TokenKind::KwThrow => SyntaxKind::KwThrow,
            TokenKind::KwTrue => SyntaxKind::KwTrue,
            TokenKind::KwTry => SyntaxKind::KwTry,
            TokenKind::KwTypeof => SyntaxKind::KwTypeof,
            TokenKind::KwUint => SyntaxKind::KwUint,
            TokenKind::KwUlong => SyntaxKind::KwUlong,
            TokenKind::KwUnchecked => SyntaxKind::KwUnchecked,
            TokenKind::KwUnsafe => SyntaxKind::KwUnsafe,
            TokenKind::KwUshort => SyntaxKind::KwUshort,
            TokenKind::KwUsing => SyntaxKind::KwUsing,
            TokenKind::KwVirtual => SyntaxKind::KwVirtual,
            TokenKind::KwVoid => SyntaxKind::KwVoid,
            TokenKind::KwVolatile => SyntaxKind::KwVolatile,
            TokenKind::KwWhile => SyntaxKind::KwWhile,
            TokenKind::Ident => SyntaxKind::Ident,
            TokenKind::Char => SyntaxKind::Char,
            TokenKind::String => SyntaxKind::String,
            TokenKind::Integer => SyntaxKind::Integer,
            TokenKind::Float => SyntaxKind::Float,
        }
    }
}
