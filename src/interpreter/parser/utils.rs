use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::ParseResult,
    },
};

/// Returns the next significant token without consuming it.
///
/// Newline tokens in front of it are consumed, which is how newlines act as
/// optional separators everywhere in the grammar.
///
/// # Errors
/// `UnexpectedEndOfInput` if the stream is exhausted, which only happens
/// once the end-of-input token itself was consumed.
pub(in crate::interpreter::parser) fn peek<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<&'a Token>
    where I: Iterator<Item = &'a Token>
{
    loop {
        match tokens.peek().copied() {
            Some(token) if token.kind == TokenKind::NewLine => {
                tokens.next();
            },
            Some(token) => return Ok(token),
            None => {
                return Err(ParseError::UnexpectedEndOfInput { expected: "more input".to_string(),
                                                              line:     0,
                                                              column:   0, });
            },
        }
    }
}

/// Consumes and returns the next significant token.
pub(in crate::interpreter::parser) fn advance<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<&'a Token>
    where I: Iterator<Item = &'a Token>
{
    let token = peek(tokens)?;
    tokens.next();
    Ok(token)
}

/// Whether the next significant token has the given kind.
pub(in crate::interpreter::parser) fn at<'a, I>(tokens: &mut Peekable<I>, kind: TokenKind) -> bool
    where I: Iterator<Item = &'a Token>
{
    peek(tokens).is_ok_and(|token| token.kind == kind)
}

/// Consumes the next significant token if it has the given kind.
pub(in crate::interpreter::parser) fn eat<'a, I>(tokens: &mut Peekable<I>, kind: TokenKind) -> bool
    where I: Iterator<Item = &'a Token>
{
    let found = at(tokens, kind);
    if found {
        tokens.next();
    }
    found
}

/// Consumes a token of the given kind or fails.
///
/// # Parameters
/// - `tokens`: Token iterator.
/// - `kind`: The required token kind.
/// - `expected`: Description used in the error message.
///
/// # Returns
/// The consumed token.
///
/// # Errors
/// `UnexpectedToken`, or `UnexpectedEndOfInput` when the input ended.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    kind: TokenKind,
                                                    expected: &str)
                                                    -> ParseResult<&'a Token>
    where I: Iterator<Item = &'a Token>
{
    let token = peek(tokens)?;
    if token.kind != kind {
        return Err(unexpected(token, expected));
    }
    tokens.next();
    Ok(token)
}

/// Parses a plain identifier and returns its name.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>,
                                                              expected: &str)
                                                              -> ParseResult<String>
    where I: Iterator<Item = &'a Token>
{
    expect(tokens, TokenKind::Identifier, expected).map(|token| token.literal.clone())
}

/// Builds the error for finding `token` where `expected` was required.
pub(in crate::interpreter::parser) fn unexpected(token: &Token, expected: &str) -> ParseError {
    if token.kind == TokenKind::Eof {
        ParseError::UnexpectedEndOfInput { expected: expected.to_string(),
                                           line:     token.line,
                                           column:   token.column, }
    } else {
        ParseError::UnexpectedToken { expected: expected.to_string(),
                                      found:    token.describe(),
                                      line:     token.line,
                                      column:   token.column, }
    }
}

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by array literals, argument lists and parameter
/// lists. An immediately encountered closing token produces an empty list;
/// a trailing comma before the closing token is accepted.
///
/// Grammar (simplified): `list := (item ("," item)* ","?)? closing`
///
/// # Parameters
/// - `tokens`: Token iterator positioned after the opening token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token kind that terminates the list.
///
/// # Errors
/// Returns a `ParseError` if an item fails to parse or a token other than a
/// comma or the closing token follows an item.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: TokenKind)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a Token>
{
    let mut items = Vec::new();
    loop {
        if eat(tokens, closing) {
            return Ok(items);
        }
        items.push(parse_item(tokens)?);

        let token = advance(tokens)?;
        if token.kind == closing {
            return Ok(items);
        }
        if token.kind != TokenKind::Comma {
            return Err(unexpected(token, &format!("',' or {closing}")));
        }
    }
}
