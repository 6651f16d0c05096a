use std::fmt::Display;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // <digit>{<digit>}
    Int(i64),
    // <letter>{<letter>}
    Ident(String),
    // "{<any char except ">}"
    Str(String),
    // # comment up to the end of line
    Comment,

    // Keywords
    If, // if
    Else, // else
    While, // while
    For, // for
    Print, // print
    Println, // println
    Fn, // fn

    // Comparison operators
    Equal, // ==
    NotEqual, // !=
    LessThan, // <
    LessThanOrEqual, // <=
    GreaterThan, // >
    GreaterThanOrEqual, // >=

    // Arithmetic operators
    Plus, // +
    Minus, // -
    Asterisk, // *
    Slash, // /

    Bang, // !
    Assign, // =

    // Delimiters
    LParen, // (
    RParen, // )
    LBrace, // {
    RBrace, // }
    LBracket, // [
    RBracket, // ]
    Semicolon, // ;
    Comma, // ,
    Dot, // .

    Eof,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Integer,
    Identifier,
    String,
    Keyword,
    Operator,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semicolon,
    Comma,
    Dot,
    Comment,
    Eof,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            Self::Integer => "INTEGER",
            Self::Identifier => "IDENTIFIER",
            Self::String => "STRING",
            Self::Keyword => "KEYWORD",
            Self::Operator => "OPERATOR",
            Self::LParen => "LPAREN",
            Self::RParen => "RPAREN",
            Self::LBrace => "LBRACE",
            Self::RBrace => "RBRACE",
            Self::LBracket => "LBRACKET",
            Self::RBracket => "RBRACKET",
            Self::Semicolon => "SEMICOLON",
            Self::Comma => "COMMA",
            Self::Dot => "DOT",
            Self::Comment => "COMMENT",
            Self::Eof => "EOF",
        };

        write!(f, "{kind}")
    }
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Int(_) => TokenKind::Integer,
            Token::Ident(_) => TokenKind::Identifier,
            Token::Str(_) => TokenKind::String,
            Token::Comment => TokenKind::Comment,
            Token::LParen => TokenKind::LParen,
            Token::RParen => TokenKind::RParen,
            Token::LBrace => TokenKind::LBrace,
            Token::RBrace => TokenKind::RBrace,
            Token::LBracket => TokenKind::LBracket,
            Token::RBracket => TokenKind::RBracket,
            Token::Semicolon => TokenKind::Semicolon,
            Token::Comma => TokenKind::Comma,
            Token::Dot => TokenKind::Dot,
            Token::Eof => TokenKind::Eof,
            token if token.is_reserved_word() => TokenKind::Keyword,
            _ => TokenKind::Operator,
        }
    }

    pub fn is_reserved_word(&self) -> bool {
        matches!(
            self,
            Token::If
                | Token::Else
                | Token::While
                | Token::For
                | Token::Print
                | Token::Println
                | Token::Fn
        )
    }

    pub fn is_operator(&self) -> bool {
        match self {
            Token::Equal
            | Token::NotEqual
            | Token::LessThan
            | Token::LessThanOrEqual
            | Token::GreaterThan
            | Token::GreaterThanOrEqual
            | Token::Plus
            | Token::Minus
            | Token::Asterisk
            | Token::Slash
            | Token::Bang
            | Token::Assign => true,
            _ => false,
        }
    }

    pub fn as_literal(&self) -> String {
        match self {
            Token::Int(value) => format!("{}", value),
            Token::Ident(value) => value.clone(),
            Token::Str(value) => format!("\"{}\"", value),
            Token::Comment => "#".to_string(),

            Token::If => "if".to_string(),
            Token::Else => "else".to_string(),
            Token::While => "while".to_string(),
            Token::For => "for".to_string(),
            Token::Print => "print".to_string(),
            Token::Println => "println".to_string(),
            Token::Fn => "fn".to_string(),

            Token::Equal => "==".to_string(),
            Token::NotEqual => "!=".to_string(),
            Token::LessThan => "<".to_string(),
            Token::LessThanOrEqual => "<=".to_string(),
            Token::GreaterThan => ">".to_string(),
            Token::GreaterThanOrEqual => ">=".to_string(),
            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Asterisk => "*".to_string(),
            Token::Slash => "/".to_string(),
            Token::Bang => "!".to_string(),
            Token::Assign => "=".to_string(),

            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
            Token::LBrace => "{".to_string(),
            Token::RBrace => "}".to_string(),
            Token::LBracket => "[".to_string(),
            Token::RBracket => "]".to_string(),
            Token::Semicolon => ";".to_string(),
            Token::Comma => ",".to_string(),
            Token::Dot => ".".to_string(),

            Token::Eof => "\0".to_string(),
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Eof => write!(f, "Token({}, None)", self.kind()),
            _ => write!(f, "Token({}, {})", self.kind(), self.as_literal()),
        }
    }
}
