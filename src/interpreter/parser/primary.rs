use std::iter::Peekable;

use crate::{
    ast::{Expr, FunctionDef, MatchCase, Property},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            block::{parse_block, parse_function_rest},
            core::{ParseResult, parse_expression},
            postfix::{parse_arguments, parse_member},
            utils::{advance, at, eat, expect, parse_comma_separated, peek, unexpected},
        },
    },
};

/// Parses a primary expression.
///
/// Primary expressions are identifiers, number and string literals,
/// function expressions, parenthesised expressions, `match`, `new`, object
/// literals and array literals.
///
/// # Errors
/// `UnexpectedToken` for any token that cannot start an expression.
pub fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let token = advance(tokens)?;
    let line = token.line;

    match token.kind {
        TokenKind::Identifier => Ok(Expr::Identifier { name: token.literal.clone(),
                                                       line }),
        TokenKind::Number => {
            let value = token.literal
                             .parse::<f64>()
                             .map_err(|_| unexpected(token, "a number"))?;
            Ok(Expr::Number { value, line })
        },
        TokenKind::String => Ok(Expr::String { value: token.literal.clone(),
                                               line }),
        TokenKind::Fn => {
            let name = if at(tokens, TokenKind::Identifier) {
                advance(tokens)?.literal.clone()
            } else {
                FunctionDef::ANONYMOUS.to_string()
            };
            Ok(Expr::Function(parse_function_rest(tokens, name, line)?))
        },
        TokenKind::LParen => {
            let expr = parse_expression(tokens)?;
            expect(tokens, TokenKind::RParen, "')' after expression")?;
            Ok(expr)
        },
        TokenKind::Match => parse_match(tokens, line),
        TokenKind::New => parse_new(tokens, line),
        TokenKind::LBrace => parse_object(tokens, line),
        TokenKind::LBracket => {
            let elements = parse_comma_separated(tokens, parse_expression, TokenKind::RBracket)?;
            Ok(Expr::Array { elements, line })
        },
        _ => Err(unexpected(token, "an expression")),
    }
}

/// Parses `new Target(args)`; the `new` keyword is already consumed.
///
/// The target is parsed at member precedence and must be an identifier or
/// a member path, so `new (a + b)()` is rejected.
fn parse_new<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let start = peek(tokens)?;
    let target = parse_member(tokens)?;
    if !matches!(target, Expr::Identifier { .. } | Expr::Member { .. }) {
        return Err(unexpected(start, "a class name after 'new'"));
    }
    expect(tokens, TokenKind::LParen, "'(' after the class in a new expression")?;
    let arguments = parse_arguments(tokens)?;

    Ok(Expr::New { target: Box::new(target),
                   arguments,
                   line })
}

/// Parses an object literal; the opening `{` is already consumed.
///
/// Keys are identifiers or strings. A key without `:` is shorthand for
/// `key: key`.
///
/// Grammar: `object := "{" (key (":" expression)? ("," key (":"
/// expression)?)* ","?)? "}"`
fn parse_object<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let mut properties = Vec::new();

    while !eat(tokens, TokenKind::RBrace) {
        let key = advance(tokens)?;
        if !matches!(key.kind, TokenKind::Identifier | TokenKind::String) {
            return Err(unexpected(key, "a property key"));
        }

        let value = if eat(tokens, TokenKind::Colon) {
            parse_expression(tokens)?
        } else {
            Expr::Identifier { name: key.literal.clone(),
                               line: key.line, }
        };
        properties.push(Property { key: key.literal.clone(),
                                   value });

        if !at(tokens, TokenKind::RBrace) {
            expect(tokens, TokenKind::Comma, "',' or '}' after property")?;
        }
    }

    Ok(Expr::Object { properties, line })
}

/// Parses a `match` expression; the `match` keyword is already consumed.
///
/// Each arm is a comma-separated list of patterns, or `default`, followed by
/// `=>` and a block. An arm that mixes patterns with `default` is recorded
/// both as an ordinary arm and as the default.
///
/// # Errors
/// `DuplicateDefault` when a second arm uses `default`.
fn parse_match<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let value = parse_expression(tokens)?;
    expect(tokens, TokenKind::LBrace, "'{' to begin the match body")?;

    let mut cases = Vec::new();
    let mut default = None;

    while !eat(tokens, TokenKind::RBrace) {
        let mut patterns = Vec::new();
        let mut default_token = None;

        loop {
            let token = peek(tokens)?;
            if token.kind == TokenKind::Default {
                tokens.next();
                default_token = Some(token);
            } else {
                patterns.push(parse_expression(tokens)?);
            }

            if at(tokens, TokenKind::Arrow) {
                break;
            }
            expect(tokens, TokenKind::Comma, "',' or '=>' after match pattern")?;
        }
        expect(tokens, TokenKind::Arrow, "'=>' after match patterns")?;
        let body = parse_block(tokens)?;
        eat(tokens, TokenKind::Comma);

        match default_token {
            Some(token) => {
                if default.is_some() {
                    return Err(ParseError::DuplicateDefault { line:   token.line,
                                                              column: token.column, });
                }
                if !patterns.is_empty() {
                    cases.push(MatchCase { patterns,
                                           body: body.clone() });
                }
                default = Some(body);
            },
            None => cases.push(MatchCase { patterns, body }),
        }
    }

    Ok(Expr::Match { value: Box::new(value),
                     cases,
                     default,
                     line })
}
