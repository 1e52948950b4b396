//! Token definitions for the sharpcheck language.
//!
//! Tokens are the smallest meaningful units of source text: keywords,
//! identifiers, operators, punctuation, literals and comments. Every token
//! keeps the exact text it was scanned from (its *lexeme*) alongside its
//! kind and position, so the shell can render a `Lexeme / Kind / Line`
//! table without re-reading the source.
//!
//! # Token Categories
//!
//! - **Type keywords**: `int`, `float`, `string`, `bool`, `char`, `byte`,
//!   `decimal`, `double`, `long`, `short`
//! - **Control keywords**: `if`, `else`, `while`, `for`, `foreach`, `do`, `in`
//! - **Structural keywords**: `namespace`, `class`, `using` and the access
//!   modifiers `public`, `private`, `protected`
//! - **Operators**: arithmetic, comparison, logical, compound assignment
//! - **Punctuation**: `(`, `)`, `{`, `}`, `;`, `.`, `,`
//! - **Literals**: numbers, strings, chars and identifiers
//! - **Comments**: `// ...` and `/* ... */`, kept in the stream
//!
//! # Examples
//!
//! ```rust
//! use sharpcheck_syntax::{Token, TokenKind};
//!
//! assert_eq!(TokenKind::keyword("while"), Some(TokenKind::While));
//! assert_eq!(TokenKind::keyword("counter"), None);
//! assert_eq!(TokenKind::symbol("<="), Some(TokenKind::LessEqual));
//!
//! let tok = Token::new(TokenKind::Identifier, "counter", 3, 9);
//! assert_eq!(tok.kind.name(), "IDENTIFIER");
//! ```

use std::fmt;

use serde::{Serialize, Serializer};

use crate::types::Type;

/// Closed set of token categories produced by the lexer.
///
/// The `string` and `char` keywords are distinct from string and char
/// literals: [`TokenKind::String`] is the type keyword while
/// [`TokenKind::StringLiteral`] is a quoted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // === Primitive type keywords ===
    Int,
    Float,
    String,
    Bool,
    Char,
    Byte,
    Decimal,
    Double,
    Long,
    Short,

    // === Control keywords ===
    If,
    Else,
    While,
    For,
    Foreach,
    Do,
    In,

    // === Boolean literals ===
    True,
    False,

    // === Access modifiers ===
    Public,
    Private,
    Protected,

    // === Structural keywords ===
    Namespace,
    Class,
    Using,

    // === Operators ===
    /// Assignment `=`
    Assign,
    Plus,
    Minus,
    Multiply,
    Divide,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    /// Equality comparison `==`
    Equal,
    NotEqual,
    /// Logical AND `&&`
    And,
    /// Logical OR `||`
    Or,
    /// Logical NOT `!`
    Not,
    Increment,
    Decrement,
    PlusAssign,
    MinusAssign,
    MultiplyAssign,
    DivideAssign,
    ModuloAssign,

    // === Punctuation ===
    LParen,
    RParen,
    LBrace,
    RBrace,
    Semicolon,
    Dot,
    Comma,

    // === Literals ===
    /// Integer or decimal literal, optionally suffixed with `f`
    Number,
    /// Double-quoted string literal, quotes included in the lexeme
    StringLiteral,
    /// Single-quoted char literal, quotes included in the lexeme
    CharLiteral,
    Identifier,

    // === Comments ===
    CommentSingleLine,
    CommentMultiLine,
}

impl TokenKind {
    /// Reserved-word table: maps an identifier-shaped lexeme to its keyword.
    ///
    /// Returns `None` for ordinary identifiers. The lookup is exact and
    /// case-sensitive, so `Class` is an identifier while `class` is not.
    pub fn keyword(lexeme: &str) -> Option<TokenKind> {
        let kind = match lexeme {
            "int" => TokenKind::Int,
            "float" => TokenKind::Float,
            "string" => TokenKind::String,
            "bool" => TokenKind::Bool,
            "char" => TokenKind::Char,
            "byte" => TokenKind::Byte,
            "decimal" => TokenKind::Decimal,
            "double" => TokenKind::Double,
            "long" => TokenKind::Long,
            "short" => TokenKind::Short,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "for" => TokenKind::For,
            "foreach" => TokenKind::Foreach,
            "do" => TokenKind::Do,
            "in" => TokenKind::In,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "public" => TokenKind::Public,
            "private" => TokenKind::Private,
            "protected" => TokenKind::Protected,
            "namespace" => TokenKind::Namespace,
            "class" => TokenKind::Class,
            "using" => TokenKind::Using,
            _ => return None,
        };
        Some(kind)
    }

    /// Operator and punctuation table for one- and two-character lexemes.
    ///
    /// `%`, `&` and `|` only exist as the first half of `%=`, `&&` and `||`.
    pub fn symbol(lexeme: &str) -> Option<TokenKind> {
        let kind = match lexeme {
            "==" => TokenKind::Equal,
            "!=" => TokenKind::NotEqual,
            "<=" => TokenKind::LessEqual,
            ">=" => TokenKind::GreaterEqual,
            "&&" => TokenKind::And,
            "||" => TokenKind::Or,
            "++" => TokenKind::Increment,
            "--" => TokenKind::Decrement,
            "+=" => TokenKind::PlusAssign,
            "-=" => TokenKind::MinusAssign,
            "*=" => TokenKind::MultiplyAssign,
            "/=" => TokenKind::DivideAssign,
            "%=" => TokenKind::ModuloAssign,
            "=" => TokenKind::Assign,
            "+" => TokenKind::Plus,
            "-" => TokenKind::Minus,
            "*" => TokenKind::Multiply,
            "/" => TokenKind::Divide,
            "<" => TokenKind::Less,
            ">" => TokenKind::Greater,
            "!" => TokenKind::Not,
            "(" => TokenKind::LParen,
            ")" => TokenKind::RParen,
            "{" => TokenKind::LBrace,
            "}" => TokenKind::RBrace,
            ";" => TokenKind::Semicolon,
            "." => TokenKind::Dot,
            "," => TokenKind::Comma,
            _ => return None,
        };
        Some(kind)
    }

    /// Upper-case display name used in token tables and error messages.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Int => "INT",
            TokenKind::Float => "FLOAT",
            TokenKind::String => "STRING",
            TokenKind::Bool => "BOOL",
            TokenKind::Char => "CHAR",
            TokenKind::Byte => "BYTE",
            TokenKind::Decimal => "DECIMAL",
            TokenKind::Double => "DOUBLE",
            TokenKind::Long => "LONG",
            TokenKind::Short => "SHORT",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::While => "WHILE",
            TokenKind::For => "FOR",
            TokenKind::Foreach => "FOREACH",
            TokenKind::Do => "DO",
            TokenKind::In => "IN",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::Public => "PUBLIC",
            TokenKind::Private => "PRIVATE",
            TokenKind::Protected => "PROTECTED",
            TokenKind::Namespace => "NAMESPACE",
            TokenKind::Class => "CLASS",
            TokenKind::Using => "USING",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Multiply => "MULTIPLY",
            TokenKind::Divide => "DIVIDE",
            TokenKind::Less => "LESS",
            TokenKind::Greater => "GREATER",
            TokenKind::LessEqual => "LESS_EQUAL",
            TokenKind::GreaterEqual => "GREATER_EQUAL",
            TokenKind::Equal => "EQUAL",
            TokenKind::NotEqual => "NOT_EQUAL",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Not => "NOT",
            TokenKind::Increment => "INCREMENT",
            TokenKind::Decrement => "DECREMENT",
            TokenKind::PlusAssign => "PLUS_ASSIGN",
            TokenKind::MinusAssign => "MINUS_ASSIGN",
            TokenKind::MultiplyAssign => "MULTIPLY_ASSIGN",
            TokenKind::DivideAssign => "DIVIDE_ASSIGN",
            TokenKind::ModuloAssign => "MODULO_ASSIGN",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Dot => "DOT",
            TokenKind::Comma => "COMMA",
            TokenKind::Number => "NUMBER",
            TokenKind::StringLiteral => "STRING_LITERAL",
            TokenKind::CharLiteral => "CHAR_LITERAL",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::CommentSingleLine => "COMMENT_SINGLELINE",
            TokenKind::CommentMultiLine => "COMMENT_MULTILINE",
        }
    }

    /// The primitive type named by a type keyword, if this is one.
    pub fn as_type(self) -> Option<Type> {
        let ty = match self {
            TokenKind::Int => Type::Int,
            TokenKind::Float => Type::Float,
            TokenKind::String => Type::String,
            TokenKind::Bool => Type::Bool,
            TokenKind::Char => Type::Char,
            TokenKind::Byte => Type::Byte,
            TokenKind::Decimal => Type::Decimal,
            TokenKind::Double => Type::Double,
            TokenKind::Long => Type::Long,
            TokenKind::Short => Type::Short,
            _ => return None,
        };
        Some(ty)
    }

    pub fn is_comment(self) -> bool {
        matches!(self, TokenKind::CommentSingleLine | TokenKind::CommentMultiLine)
    }

    pub fn is_access_modifier(self) -> bool {
        matches!(
            self,
            TokenKind::Public | TokenKind::Private | TokenKind::Protected
        )
    }

    /// Operators accepted in the post-clause of a `for` loop.
    pub fn is_compound_op(self) -> bool {
        matches!(
            self,
            TokenKind::PlusAssign
                | TokenKind::MinusAssign
                | TokenKind::MultiplyAssign
                | TokenKind::DivideAssign
                | TokenKind::ModuloAssign
                | TokenKind::Increment
                | TokenKind::Decrement
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for TokenKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// A token with its source text and location.
///
/// # Fields
///
/// - `lexeme`: the exact slice of source the token was scanned from,
///   delimiters included (`"hi"`, `// note`, `/* ... */`)
/// - `kind`: the token's category
/// - `line`: 1-based line of the token's first character
/// - `col`: 1-based column of the token's first character
///
/// # Examples
///
/// ```rust
/// use sharpcheck_syntax::{Token, TokenKind};
///
/// let semi = Token::new(TokenKind::Semicolon, ";", 1, 10);
/// assert_eq!(semi.lexeme, ";");
/// assert_eq!(semi.line, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// The source text of this token
    pub lexeme: String,

    /// The category of this token
    pub kind: TokenKind,

    /// Line number in the source (1-based)
    pub line: usize,

    /// Column number in the source (1-based)
    pub col: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            lexeme: lexeme.into(),
            kind,
            line,
            col,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_table() {
        assert_eq!(TokenKind::keyword("int"), Some(TokenKind::Int));
        assert_eq!(TokenKind::keyword("namespace"), Some(TokenKind::Namespace));
        assert_eq!(TokenKind::keyword("class"), Some(TokenKind::Class));
        assert_eq!(TokenKind::keyword("in"), Some(TokenKind::In));
        assert_eq!(TokenKind::keyword("Class"), None);
        assert_eq!(TokenKind::keyword("x"), None);
    }

    #[test]
    fn test_symbol_table() {
        assert_eq!(TokenKind::symbol("="), Some(TokenKind::Assign));
        assert_eq!(TokenKind::symbol("=="), Some(TokenKind::Equal));
        assert_eq!(TokenKind::symbol("%="), Some(TokenKind::ModuloAssign));
        assert_eq!(TokenKind::symbol("%"), None);
        assert_eq!(TokenKind::symbol("&"), None);
        assert_eq!(TokenKind::symbol("|"), None);
    }

    #[test]
    fn test_tables_are_disjoint() {
        // keywords never look like symbols and vice versa
        for word in ["int", "if", "class", "true", "public"] {
            assert!(TokenKind::symbol(word).is_none());
        }
        for sym in ["=", "(", "&&", "++"] {
            assert!(TokenKind::keyword(sym).is_none());
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(TokenKind::String.name(), "STRING");
        assert_eq!(TokenKind::StringLiteral.name(), "STRING_LITERAL");
        assert_eq!(TokenKind::CommentMultiLine.to_string(), "COMMENT_MULTILINE");
        assert_eq!(TokenKind::LessEqual.to_string(), "LESS_EQUAL");
    }

    #[test]
    fn test_type_keywords() {
        assert_eq!(TokenKind::Int.as_type(), Some(Type::Int));
        assert_eq!(TokenKind::Short.as_type(), Some(Type::Short));
        assert_eq!(TokenKind::StringLiteral.as_type(), None);
        assert_eq!(TokenKind::Identifier.as_type(), None);
    }

    #[test]
    fn test_classifiers() {
        assert!(TokenKind::CommentSingleLine.is_comment());
        assert!(!TokenKind::Divide.is_comment());
        assert!(TokenKind::Protected.is_access_modifier());
        assert!(TokenKind::Increment.is_compound_op());
        assert!(!TokenKind::Assign.is_compound_op());
    }
}
