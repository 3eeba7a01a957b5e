use std::iter::Peekable;

use crate::{
    ast::Statement,
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            block::{parse_block, parse_function_rest},
            core::{ParseResult, parse_expression},
            declaration::{parse_class, parse_enum},
            utils::{advance, at, eat, expect, parse_identifier, peek, unexpected},
        },
    },
};

/// Parses a single statement.
///
/// The leading keyword selects the form; anything else is an expression
/// statement. One optional `;` may follow any statement.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the statement.
///
/// # Returns
/// A parsed [`Statement`] node.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Token>
{
    let token = peek(tokens)?;
    let line = token.line;

    let statement = match token.kind {
        TokenKind::Let | TokenKind::Const => parse_var_declaration(tokens)?,
        TokenKind::Fn => {
            tokens.next();
            let name = parse_identifier(tokens, "a function name")?;
            Statement::Function(parse_function_rest(tokens, name, line)?)
        },
        TokenKind::If => parse_if(tokens)?,
        TokenKind::For => parse_for(tokens)?,
        TokenKind::While => {
            tokens.next();
            expect(tokens, TokenKind::LParen, "'(' after 'while'")?;
            let test = parse_expression(tokens)?;
            expect(tokens, TokenKind::RParen, "')' after while condition")?;
            Statement::While { test,
                               body: parse_block(tokens)?,
                               line }
        },
        TokenKind::Return => {
            tokens.next();
            let value = if at(tokens, TokenKind::Semicolon) || at(tokens, TokenKind::RBrace) {
                None
            } else {
                Some(parse_expression(tokens)?)
            };
            Statement::Return { value, line }
        },
        TokenKind::Break => {
            tokens.next();
            Statement::Break { line }
        },
        TokenKind::Continue => {
            tokens.next();
            Statement::Continue { line }
        },
        TokenKind::Throw => {
            tokens.next();
            Statement::Throw { value: parse_expression(tokens)?,
                               line }
        },
        TokenKind::Class => parse_class(tokens)?,
        TokenKind::Enum => parse_enum(tokens)?,
        _ => Statement::Expression { expr: parse_expression(tokens)?,
                                     line },
    };

    eat(tokens, TokenKind::Semicolon);
    Ok(statement)
}

/// Parses `let name = value` or `const name = value`.
///
/// A `let` without `=` declares the name bound to null.
///
/// # Errors
/// `ConstantWithoutValue` for a `const` without an initialiser.
fn parse_var_declaration<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Token>
{
    let keyword = advance(tokens)?;
    let constant = keyword.kind == TokenKind::Const;
    let name = expect(tokens, TokenKind::Identifier, "a variable name")?;

    let value = if eat(tokens, TokenKind::Equals) {
        Some(parse_expression(tokens)?)
    } else if constant {
        return Err(ParseError::ConstantWithoutValue { name:   name.literal.clone(),
                                                      line:   name.line,
                                                      column: name.column, });
    } else {
        None
    };

    Ok(Statement::VarDeclaration { identifier: name.literal.clone(),
                                   constant,
                                   value,
                                   line: keyword.line })
}

/// Parses an `if` statement with optional `else` and chained `else if`.
///
/// Syntax:
/// ```text
///     if (<condition>) { ... }
///     else if (<condition>) { ... }
///     else { ... }
/// ```
/// An `else if` becomes an alternate holding a single nested `if`.
fn parse_if<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Token>
{
    let keyword = advance(tokens)?;
    expect(tokens, TokenKind::LParen, "'(' after 'if'")?;
    let test = parse_expression(tokens)?;
    expect(tokens, TokenKind::RParen, "')' after if condition")?;
    let body = parse_block(tokens)?;

    let alternate = if eat(tokens, TokenKind::Else) {
        if at(tokens, TokenKind::If) {
            Some(vec![parse_if(tokens)?])
        } else {
            Some(parse_block(tokens)?)
        }
    } else {
        None
    };

    Ok(Statement::If { test,
                       body,
                       alternate,
                       line: keyword.line })
}

/// Parses `for (init test update) { body }`.
///
/// The three header clauses are delimited by what their grammar consumes;
/// a `;` after the initialiser and after the test is optional.
fn parse_for<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Token>
{
    let keyword = advance(tokens)?;
    expect(tokens, TokenKind::LParen, "'(' after 'for'")?;

    let token = peek(tokens)?;
    if !matches!(token.kind, TokenKind::Let | TokenKind::Const) {
        return Err(unexpected(token, "a variable declaration in for header"));
    }
    let init = parse_var_declaration(tokens)?;
    eat(tokens, TokenKind::Semicolon);

    let test = parse_expression(tokens)?;
    eat(tokens, TokenKind::Semicolon);

    let update = parse_expression(tokens)?;
    expect(tokens, TokenKind::RParen, "')' after for header")?;

    Ok(Statement::For { init: Box::new(init),
                        test,
                        update,
                        body: parse_block(tokens)?,
                        line: keyword.line })
}
