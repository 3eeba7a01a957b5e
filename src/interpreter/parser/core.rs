use std::iter::Peekable;

use crate::{
    ast::{Expr, Program},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{binary::parse_ternary, statement::parse_statement, utils::peek},
    },
    util::stack::ensure_sufficient_stack,
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a whole token stream into a [`Program`].
///
/// Statements are parsed until the end-of-input token. Parsing stops at the
/// first error; no partial program is returned.
///
/// # Parameters
/// - `tokens`: Token iterator over the output of the lexer.
///
/// # Returns
/// The parsed program.
pub fn parse_program<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Program>
    where I: Iterator<Item = &'a Token>
{
    let mut body = Vec::new();
    while peek(tokens)?.kind != TokenKind::Eof {
        body.push(parse_statement(tokens)?);
    }
    Ok(Program { body })
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, assignment, and recursively descends through
/// the precedence hierarchy:
///
/// ```text
/// assignment -> ternary -> try/catch -> logical -> additive
///            -> multiplicative -> call/member -> primary
/// ```
///
/// Grammar: `expression := assignment`
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    ensure_sufficient_stack(|| parse_assignment(tokens))
}

/// Parses an assignment, which is right-associative.
///
/// Grammar: `assignment := ternary ("=" expression)?`
///
/// # Errors
/// `InvalidAssignmentTarget` when the left-hand side is neither an
/// identifier nor a member expression.
fn parse_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let target = parse_ternary(tokens)?;

    let token = peek(tokens)?;
    if token.kind != TokenKind::Equals {
        return Ok(target);
    }
    tokens.next();

    if !matches!(target, Expr::Identifier { .. } | Expr::Member { .. }) {
        return Err(ParseError::InvalidAssignmentTarget { line:   token.line,
                                                         column: token.column, });
    }

    let value = parse_expression(tokens)?;
    Ok(Expr::Assignment { target: Box::new(target),
                          value:  Box::new(value),
                          line:   token.line, })
}
