use std::fmt::Display;

use crate::{
    lexer::prelude::{LexResult, Token},
    parser::prelude::{parse_error, InfixParse, Parse, ParseError, ParseErrorType, Parser},
    utils::prelude::SrcSpan
};

#[derive(Debug)]
pub struct Parsed {
    pub program: Program,
    pub comments: Vec<SrcSpan>,
    pub skipped: Vec<(Token, SrcSpan)>,
}

// program -> { <statement> }
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Program {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let mut statements = vec![];
        let start = parser.current_token.as_ref().map_or(0, |(start, _, _)| *start);
        let mut end = start;

        while let Some((_, token, _)) = &parser.current_token {
            match token {
                Token::If
                | Token::While
                | Token::For
                | Token::Print
                | Token::Println
                | Token::Fn
                | Token::Ident(_) => {
                    let statement = Statement::parse(parser)?;
                    end = statement.location().end;
                    statements.push(statement);
                },
                // top level tolerates stray tokens, blocks do not
                _ => parser.skip()
            }
        }

        Ok(Self {
            statements,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let statements = self.statements.iter()
            .map(|statement| format!("{}", statement))
            .collect::<Vec<String>>();

        write!(f, "{}", statements.join("\n"))
    }
}

// statement -> <if> | <while> | <for> | <print> | <function_def> | <assign_or_call>
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    If(If),
    While(While),
    For(For),
    Print(Print),
    Assignment(Assignment),
    FunctionDef(FunctionDef),
    FunctionCall(FunctionCall),
    MethodCall(MethodCall),
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Statement {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let res = match &parser.current_token {
            Some((start, token, end)) => match token {
                Token::If => Self::If(If::parse(parser)?),
                Token::While => Self::While(While::parse(parser)?),
                Token::For => Self::For(For::parse(parser)?),
                Token::Print | Token::Println => Self::Print(Print::parse(parser)?),
                Token::Fn => Self::FunctionDef(FunctionDef::parse(parser)?),
                Token::Ident(_) => {
                    let statement = match &parser.next_token {
                        Some((_, Token::LParen, _)) => Self::FunctionCall(FunctionCall::parse(parser)?),
                        Some((_, Token::Dot, _)) => Self::MethodCall(MethodCall::parse(parser)?),
                        _ => return Ok(Self::Assignment(Assignment::parse(parser)?))
                    };

                    parser.expect_one(Token::Semicolon)?;

                    statement
                },
                _ => return parse_error(
                    ParseErrorType::ExpectedStatement { token: token.clone() },
                    SrcSpan { start: *start, end: *end }
                )
            },
            None => return parser.unexpected_eof("a statement".to_string())
        };

        Ok(res)
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::If(if_) => write!(f, "{if_}"),
            Self::While(loop_) => write!(f, "{loop_}"),
            Self::For(loop_) => write!(f, "{loop_}"),
            Self::Print(print) => write!(f, "{print}"),
            Self::Assignment(assignment) => write!(f, "{assignment}"),
            Self::FunctionDef(function) => write!(f, "{function}"),
            Self::FunctionCall(call) => write!(f, "{call};"),
            Self::MethodCall(call) => write!(f, "{call};"),
        }
    }
}

impl Statement {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::If(if_) => if_.location,
            Self::While(loop_) => loop_.location,
            Self::For(loop_) => loop_.location,
            Self::Print(print) => print.location,
            Self::Assignment(assignment) => assignment.location,
            Self::FunctionDef(function) => function.location,
            Self::FunctionCall(call) => call.location,
            Self::MethodCall(call) => call.location,
        }
    }
}

// block -> { {<statement>} }
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Block {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::LBrace)?;

        let mut statements = vec![];

        loop {
            match &parser.current_token {
                Some((_, Token::RBrace, _)) | None => break,
                Some((_, Token::Semicolon, _)) => parser.step(),
                Some(_) => statements.push(Statement::parse(parser)?)
            }
        }

        let (_, end) = parser.expect_one(Token::RBrace)?;

        Ok(Self {
            statements,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.statements.is_empty() {
            return write!(f, "{{}}");
        }

        let statements = self.statements.iter()
            .map(|statement| format!("{}", statement))
            .collect::<Vec<String>>();

        write!(f, "{{ {} }}", statements.join(" "))
    }
}

// if -> if ( <expression> ) <block> [ else <block> ]
#[derive(Debug, Clone, PartialEq)]
pub struct If {
    pub condition: Expression,
    pub resolution: Block,
    pub alternative: Option<Block>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for If {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::If)?;

        let condition = parse_parenthesized(parser)?;
        let resolution = Block::parse(parser)?;

        let mut end = resolution.location.end;

        let alternative = if parser.current_is(&Token::Else) {
            parser.step();

            let alternative = Block::parse(parser)?;
            end = alternative.location.end;

            Some(alternative)
        } else {
            None
        };

        Ok(Self {
            condition,
            resolution,
            alternative,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for If {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "if ({}) {}", self.condition, self.resolution)?;

        match &self.alternative {
            Some(alternative) => write!(f, " else {alternative}"),
            None => Ok(())
        }
    }
}

// while -> while ( <expression> ) <block>
#[derive(Debug, Clone, PartialEq)]
pub struct While {
    pub condition: Expression,
    pub block: Block,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for While {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::While)?;

        let condition = parse_parenthesized(parser)?;
        let block = Block::parse(parser)?;

        let location = SrcSpan { start, end: block.location.end };

        Ok(Self {
            condition,
            block,
            location
        })
    }
}

impl Display for While {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "while ({}) {}", self.condition, self.block)
    }
}

// for -> for ( <identifier> = <expression> ; <expression> ; <expression> ) <block>
#[derive(Debug, Clone, PartialEq)]
pub struct For {
    pub identifier: Identifier,
    pub start: Expression,
    pub condition: Expression,
    pub step: Expression,
    pub block: Block,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for For {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::For)?;
        parser.expect_one(Token::LParen)?;

        let identifier = Identifier::from(parser.expect_ident()?);
        parser.expect_one(Token::Assign)?;

        let from = Expression::parse(parser)?;
        parser.expect_one(Token::Semicolon)?;

        let condition = Expression::parse(parser)?;
        parser.expect_one(Token::Semicolon)?;

        // the step is a bare expression, its value becomes the next loop value
        let step = Expression::parse(parser)?;
        parser.expect_one(Token::RParen)?;

        let block = Block::parse(parser)?;

        let location = SrcSpan { start, end: block.location.end };

        Ok(Self {
            identifier,
            start: from,
            condition,
            step,
            block,
            location
        })
    }
}

impl Display for For {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "for ({} = {}; {}; {}) {}",
            self.identifier,
            self.start,
            self.condition,
            self.step,
            self.block
        )
    }
}

// print -> (print | println) ( <expression> ) ;
#[derive(Debug, Clone, PartialEq)]
pub struct Print {
    pub expression: Expression,
    pub newline: bool,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Print {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let newline = parser.current_is(&Token::Println);

        let (start, _) = if newline {
            parser.expect_one(Token::Println)?
        } else {
            parser.expect_one(Token::Print)?
        };

        let expression = parse_parenthesized(parser)?;
        let (_, end) = parser.expect_one(Token::Semicolon)?;

        Ok(Self {
            expression,
            newline,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Print {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keyword = if self.newline { "println" } else { "print" };

        write!(f, "{keyword}({});", self.expression)
    }
}

// assignment -> <identifier> = <expression> ;
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub identifier: Identifier,
    pub value: Expression,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Assignment {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let identifier = Identifier::from(parser.expect_ident()?);
        let start = identifier.location.start;

        parser.expect_one(Token::Assign)?;

        let value = Expression::parse(parser)?;
        let (_, end) = parser.expect_one(Token::Semicolon)?;

        Ok(Self {
            identifier,
            value,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {};", self.identifier, self.value)
    }
}

// function_def -> fn <identifier> ( [ <identifier> {, <identifier> } ] ) <block>
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub name: Identifier,
    pub parameters: Vec<Identifier>,
    pub body: Block,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for FunctionDef {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::Fn)?;

        let name = Identifier::from(parser.expect_ident()?);

        parser.expect_one(Token::LParen)?;

        let mut parameters = vec![];

        if !parser.current_is(&Token::RParen) {
            parameters.push(Identifier::from(parser.expect_ident()?));

            while parser.current_is(&Token::Comma) {
                parser.step();
                parameters.push(Identifier::from(parser.expect_ident()?));
            }
        }

        parser.expect_one(Token::RParen)?;

        let body = Block::parse(parser)?;

        let location = SrcSpan { start, end: body.location.end };

        Ok(Self {
            name,
            parameters,
            body,
            location
        })
    }
}

impl Display for FunctionDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parameters = self.parameters.iter()
            .map(|parameter| parameter.to_string())
            .collect::<Vec<String>>();

        write!(f, "fn {}({}) {}", self.name, parameters.join(", "), self.body)
    }
}

// function_call -> <identifier> ( [ <expression> {, <expression> } ] )
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: Identifier,
    pub arguments: Vec<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for FunctionCall {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let name = Identifier::from(parser.expect_ident()?);
        let start = name.location.start;

        let (arguments, end) = parse_arguments(parser)?;

        Ok(Self {
            name,
            arguments,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for FunctionCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, join_expressions(&self.arguments))
    }
}

// method_call -> <identifier> . <identifier> ( [ <expression> {, <expression> } ] )
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    pub receiver: Identifier,
    pub method: Identifier,
    pub arguments: Vec<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for MethodCall {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let receiver = Identifier::from(parser.expect_ident()?);
        let start = receiver.location.start;

        parser.expect_one(Token::Dot)?;

        let method = Identifier::from(parser.expect_ident()?);
        let (arguments, end) = parse_arguments(parser)?;

        Ok(Self {
            receiver,
            method,
            arguments,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for MethodCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}({})", self.receiver, self.method, join_expressions(&self.arguments))
    }
}

// expression -> <unary> { <operator> <unary> }
// No precedence: every operator folds left to right.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    Infix(Infix),
    Prefix(Prefix),
    Primitive(Primitive),
    Array(Array),
    FunctionCall(FunctionCall),
    MethodCall(MethodCall),
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Expression {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let mut expr = Self::parse_unary(parser)?;

        while parser.current_token.as_ref()
            .is_some_and(|(_, token, _)| token.is_operator())
        {
            expr = Self::Infix(Infix::parse(parser, expr)?);
        }

        Ok(expr)
    }
}

impl Expression {
    // unary -> <operator> <unary> | <primary>
    fn parse_unary<T: Iterator<Item = LexResult>>(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        match &parser.current_token {
            Some((_, token, _)) if token.is_operator() => Ok(Self::Prefix(Prefix::parse(parser)?)),
            _ => Self::parse_primary(parser)
        }
    }

    // primary -> <int> | <string> | <identifier> | <call> | ( <expression> ) | <array>
    fn parse_primary<T: Iterator<Item = LexResult>>(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let expr = match &parser.current_token {
            Some((start, token, end)) => match token {
                Token::Int(_) | Token::Str(_) => Self::Primitive(Primitive::parse(parser)?),
                Token::Ident(_) if parser.next_is(&Token::LParen) => {
                    Self::FunctionCall(FunctionCall::parse(parser)?)
                },
                Token::Ident(_) if parser.next_is(&Token::Dot) => {
                    Self::MethodCall(MethodCall::parse(parser)?)
                },
                Token::Ident(_) => Self::Identifier(Identifier::from(parser.expect_ident()?)),
                Token::LParen => {
                    parser.expect_one(Token::LParen)?;

                    let expression = Expression::parse(parser)?;

                    parser.expect_one(Token::RParen)?;

                    expression
                },
                Token::LBracket => Self::Array(Array::parse(parser)?),
                _ => return parse_error(
                    ParseErrorType::ExpectedExpression { token: token.clone() },
                    SrcSpan { start: *start, end: *end }
                )
            },
            None => return parser.unexpected_eof("an expression".to_string())
        };

        Ok(expr)
    }

    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Identifier(ident) => ident.location,
            Self::Infix(infix) => infix.location,
            Self::Prefix(prefix) => prefix.location,
            Self::Primitive(primitive) => primitive.location(),
            Self::Array(array) => array.location,
            Self::FunctionCall(call) => call.location,
            Self::MethodCall(call) => call.location,
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identifier(ident) => write!(f, "{ident}"),
            Self::Infix(infix) => write!(f, "{infix}"),
            Self::Prefix(prefix) => write!(f, "{prefix}"),
            Self::Primitive(primitive) => write!(f, "{primitive}"),
            Self::Array(array) => write!(f, "{array}"),
            Self::FunctionCall(call) => write!(f, "{call}"),
            Self::MethodCall(call) => write!(f, "{call}"),
        }
    }
}

// identifier -> <letter> { <letter> }
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub value: String,
    pub location: SrcSpan
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl From<(u32, String, u32)> for Identifier {
    fn from(value: (u32, String, u32)) -> Self {
        Identifier {
            value: value.1,
            location: SrcSpan { start: value.0, end: value.2 }
        }
    }
}

// infix -> <expression> <operator> <unary>
#[derive(Debug, Clone, PartialEq)]
pub struct Infix {
    pub left: Box<Expression>,
    pub operator: Token,
    pub right: Box<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> InfixParse<T> for Infix {
    fn parse(parser: &mut Parser<T>, left: Expression) -> Result<Self, ParseError> {
        let operator = match parser.next_token() {
            Some((_, token, _)) => token,
            None => return parser.unexpected_eof("OPERATOR".to_string())
        };

        let right = Expression::parse_unary(parser)?;
        let location = left.location().join(right.location());

        Ok(Self {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            location
        })
    }
}

impl Display for Infix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {} {})", self.left, self.operator.as_literal(), self.right)
    }
}

// prefix -> <operator> <unary>
#[derive(Debug, Clone, PartialEq)]
pub struct Prefix {
    pub operator: Token,
    pub expression: Box<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Prefix {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let (start, operator) = match parser.next_token() {
            Some((start, token, _)) => (start, token),
            None => return parser.unexpected_eof("OPERATOR".to_string())
        };

        let expression = Expression::parse_unary(parser)?;
        let end = expression.location().end;

        Ok(Self {
            operator,
            expression: Box::new(expression),
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.operator.as_literal(), self.expression)
    }
}

// array -> [ [ <expression> {, <expression> } ] ]
#[derive(Debug, Clone, PartialEq)]
pub struct Array {
    pub elements: Vec<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Array {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::LBracket)?;

        let elements = parse_list(parser, Token::RBracket)?;

        let (_, end) = parser.expect_one(Token::RBracket)?;

        Ok(Self {
            elements,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Array {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", join_expressions(&self.elements))
    }
}

// primitive -> <int> | <string>
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Int {
        value: i64,
        location: SrcSpan
    },
    Str {
        value: String,
        location: SrcSpan
    }
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Primitive {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        match parser.next_token() {
            Some((start, Token::Int(value), end)) => Ok(Self::Int {
                value,
                location: SrcSpan { start, end }
            }),
            Some((start, Token::Str(value), end)) => Ok(Self::Str {
                value,
                location: SrcSpan { start, end }
            }),
            Some((start, token, end)) => parse_error(
                ParseErrorType::ExpectedExpression { token },
                SrcSpan { start, end }
            ),
            None => parser.unexpected_eof("INTEGER or STRING".to_string())
        }
    }
}

impl Display for Primitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int { value, .. } => write!(f, "{value}"),
            Self::Str { value, .. } => write!(f, "\"{value}\"")
        }
    }
}

impl Primitive {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Int { location, .. } |
            Self::Str { location, .. } => *location
        }
    }
}

// ( <expression> )
fn parse_parenthesized<T: Iterator<Item = LexResult>>(parser: &mut Parser<T>) -> Result<Expression, ParseError> {
    parser.expect_one(Token::LParen)?;

    let condition = Expression::parse(parser)?;

    parser.expect_one(Token::RParen)?;

    Ok(condition)
}

// ( [ <expression> {, <expression> } ] )
fn parse_arguments<T: Iterator<Item = LexResult>>(parser: &mut Parser<T>) -> Result<(Vec<Expression>, u32), ParseError> {
    parser.expect_one(Token::LParen)?;

    let arguments = parse_list(parser, Token::RParen)?;

    let (_, end) = parser.expect_one(Token::RParen)?;

    Ok((arguments, end))
}

fn parse_list<T: Iterator<Item = LexResult>>(
    parser: &mut Parser<T>,
    closing: Token
) -> Result<Vec<Expression>, ParseError> {
    let mut expressions = vec![];

    if parser.current_is(&closing) {
        return Ok(expressions);
    }

    expressions.push(Expression::parse(parser)?);

    while parser.current_is(&Token::Comma) {
        parser.step();
        expressions.push(Expression::parse(parser)?);
    }

    Ok(expressions)
}

fn join_expressions(expressions: &[Expression]) -> String {
    expressions.iter()
        .map(|expression| expression.to_string())
        .collect::<Vec<String>>()
        .join(", ")
}
