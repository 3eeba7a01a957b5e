use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{FunctionDef, Statement},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::ParseResult,
            statement::parse_statement,
            utils::{advance, eat, expect, parse_comma_separated, peek, unexpected},
        },
    },
};

/// Parses a brace-delimited block of statements.
///
/// Grammar: `block := "{" statement* "}"`
///
/// # Errors
/// Returns a `ParseError` if the opening or closing brace is missing or a
/// statement fails to parse.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<Statement>>
    where I: Iterator<Item = &'a Token>
{
    expect(tokens, TokenKind::LBrace, "'{' to open a block")?;

    let mut body = Vec::new();
    while !eat(tokens, TokenKind::RBrace) {
        let token = peek(tokens)?;
        if token.kind == TokenKind::Eof {
            return Err(unexpected(token, "'}' to close a block"));
        }
        body.push(parse_statement(tokens)?);
    }
    Ok(body)
}

/// Parses a parameter list and body following a function name.
///
/// Used for function statements, function expressions and class methods.
///
/// Grammar: `function_rest := "(" (identifier ("," identifier)*)? ")" block`
///
/// # Errors
/// `InvalidParameter` when a parameter is not a plain identifier.
pub fn parse_function_rest<'a, I>(tokens: &mut Peekable<I>,
                                  name: String,
                                  line: usize)
                                  -> ParseResult<Rc<FunctionDef>>
    where I: Iterator<Item = &'a Token>
{
    expect(tokens, TokenKind::LParen, "'(' to open the parameter list")?;
    let params = parse_comma_separated(tokens, parse_parameter, TokenKind::RParen)?;
    let body = parse_block(tokens)?;

    Ok(Rc::new(FunctionDef { name,
                             params,
                             body,
                             line }))
}

fn parse_parameter<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<String>
    where I: Iterator<Item = &'a Token>
{
    let token = advance(tokens)?;
    if token.kind != TokenKind::Identifier {
        return Err(ParseError::InvalidParameter { line:   token.line,
                                                  column: token.column, });
    }
    Ok(token.literal.clone())
}
