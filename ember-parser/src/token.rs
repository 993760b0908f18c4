// Ember Token Model
// Classified lexical units produced by the lexer

use crate::ast::Span;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    Number,
    String,
    Identifier,

    // Keywords
    Let,
    Const,
    Fn,
    If,
    Else,
    While,

    // Operators
    BinaryOperator,
    Equals,
    EqualsEquals,
    NotEquals,
    LessThan,
    GreaterThan,
    LessThanOrEquals,
    GreaterThanOrEquals,
    Not,

    // Punctuation
    Dot,
    Comma,
    Colon,
    Semicolon,
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,

    Eof,
}

/// Coarse grouping of token kinds, used when describing tokens in diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenCategory {
    Number,
    String,
    Identifier,
    Keyword,
    Operator,
    Punctuation,
    EndOfInput,
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenCategory::Number => write!(f, "number"),
            TokenCategory::String => write!(f, "string"),
            TokenCategory::Identifier => write!(f, "identifier"),
            TokenCategory::Keyword => write!(f, "keyword"),
            TokenCategory::Operator => write!(f, "operator"),
            TokenCategory::Punctuation => write!(f, "punctuation"),
            TokenCategory::EndOfInput => write!(f, "end-of-input"),
        }
    }
}

impl TokenKind {
    /// Keyword lookup for a scanned identifier
    pub fn keyword(word: &str) -> Option<TokenKind> {
        match word {
            "let" => Some(TokenKind::Let),
            "const" => Some(TokenKind::Const),
            "fn" => Some(TokenKind::Fn),
            "if" => Some(TokenKind::If),
            "else" => Some(TokenKind::Else),
            "while" => Some(TokenKind::While),
            _ => None,
        }
    }

    pub fn category(self) -> TokenCategory {
        use TokenKind::*;
        match self {
            Number => TokenCategory::Number,
            String => TokenCategory::String,
            Identifier => TokenCategory::Identifier,
            Let | Const | Fn | If | Else | While => TokenCategory::Keyword,
            BinaryOperator | Equals | EqualsEquals | NotEquals | LessThan | GreaterThan
            | LessThanOrEquals | GreaterThanOrEquals | Not => TokenCategory::Operator,
            Dot | Comma | Colon | Semicolon | OpenParen | CloseParen | OpenBrace | CloseBrace
            | OpenBracket | CloseBracket => TokenCategory::Punctuation,
            Eof => TokenCategory::EndOfInput,
        }
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            TokenKind::EqualsEquals
                | TokenKind::NotEquals
                | TokenKind::LessThan
                | TokenKind::GreaterThan
                | TokenKind::LessThanOrEquals
                | TokenKind::GreaterThanOrEquals
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Number => "Number",
            TokenKind::String => "String",
            TokenKind::Identifier => "Identifier",
            TokenKind::Let => "Let",
            TokenKind::Const => "Const",
            TokenKind::Fn => "Fn",
            TokenKind::If => "If",
            TokenKind::Else => "Else",
            TokenKind::While => "While",
            TokenKind::BinaryOperator => "BinaryOperator",
            TokenKind::Equals => "Equals",
            TokenKind::EqualsEquals => "EqualsEquals",
            TokenKind::NotEquals => "NotEquals",
            TokenKind::LessThan => "LessThan",
            TokenKind::GreaterThan => "GreaterThan",
            TokenKind::LessThanOrEquals => "LessThanOrEquals",
            TokenKind::GreaterThanOrEquals => "GreaterThanOrEquals",
            TokenKind::Not => "Not",
            TokenKind::Dot => "Dot",
            TokenKind::Comma => "Comma",
            TokenKind::Colon => "Colon",
            TokenKind::Semicolon => "Semicolon",
            TokenKind::OpenParen => "OpenParen",
            TokenKind::CloseParen => "CloseParen",
            TokenKind::OpenBrace => "OpenBrace",
            TokenKind::CloseBrace => "CloseBrace",
            TokenKind::OpenBracket => "OpenBracket",
            TokenKind::CloseBracket => "CloseBracket",
            TokenKind::Eof => "Eof",
        };
        f.pad(name)
    }
}

/// A classified lexical unit
///
/// For `String` tokens `text` holds the unquoted content; for `Eof` it is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    pub fn line(&self) -> usize {
        self.span.line
    }

    pub fn category(&self) -> TokenCategory {
        self.kind.category()
    }

    /// Human readable description used in "expected X, found Y" messages
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of input".to_string(),
            TokenKind::String => format!("string \"{}\"", self.text),
            TokenKind::Number => format!("number {}", self.text),
            TokenKind::Identifier => format!("identifier '{}'", self.text),
            _ => format!("{} '{}'", self.category(), self.text),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "{}", self.category()),
            _ => write!(f, "{}({})", self.category(), self.text),
        }
    }
}
