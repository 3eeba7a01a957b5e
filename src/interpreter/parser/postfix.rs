use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::{ParseResult, parse_expression},
            primary::parse_primary,
            utils::{advance, expect, parse_comma_separated, peek},
        },
    },
};

/// Parses a primary expression followed by any chain of calls and member
/// accesses, e.g. `a.b()[0].c()()`.
///
/// Grammar: `postfix := primary ("(" arguments ")" | "." identifier | "["
/// expression "]")*`
pub fn parse_postfix<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let mut expr = parse_primary(tokens)?;
    loop {
        let token = peek(tokens)?;
        expr = match token.kind {
            TokenKind::LParen => {
                tokens.next();
                let arguments = parse_arguments(tokens)?;
                Expr::Call { callee: Box::new(expr),
                             arguments,
                             line: token.line }
            },
            TokenKind::Dot | TokenKind::LBracket => parse_member_access(tokens, expr)?,
            _ => return Ok(expr),
        };
    }
}

/// Parses a primary expression followed only by member accesses.
///
/// Used for the target of `new`, which may be an identifier or a member
/// path but never a call or an arbitrary expression.
///
/// Grammar: `member := primary ("." identifier | "[" expression "]")*`
pub fn parse_member<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let mut expr = parse_primary(tokens)?;
    while matches!(peek(tokens)?.kind, TokenKind::Dot | TokenKind::LBracket) {
        expr = parse_member_access(tokens, expr)?;
    }
    Ok(expr)
}

/// Parses one `.name` or `[expr]` suffix applied to `object`.
///
/// # Errors
/// `InvalidMemberProperty` when `.` is not followed by an identifier.
fn parse_member_access<'a, I>(tokens: &mut Peekable<I>, object: Expr) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let operator = advance(tokens)?;

    if operator.kind == TokenKind::Dot {
        let property = advance(tokens)?;
        if property.kind != TokenKind::Identifier {
            return Err(ParseError::InvalidMemberProperty { line:   property.line,
                                                           column: property.column, });
        }
        return Ok(Expr::Member { object:   Box::new(object),
                                 property: Box::new(Expr::Identifier { name: property.literal
                                                                                     .clone(),
                                                                       line: property.line, }),
                                 computed: false,
                                 line:     operator.line, });
    }

    let property = parse_expression(tokens)?;
    expect(tokens, TokenKind::RBracket, "']' after computed member")?;

    Ok(Expr::Member { object:   Box::new(object),
                      property: Box::new(property),
                      computed: true,
                      line:     operator.line, })
}

/// Parses a call argument list; the opening `(` is already consumed.
pub(in crate::interpreter::parser) fn parse_arguments<'a, I>(tokens: &mut Peekable<I>)
                                                             -> ParseResult<Vec<Expr>>
    where I: Iterator<Item = &'a Token>
{
    parse_comma_separated(tokens, parse_expression, TokenKind::RParen)
}
