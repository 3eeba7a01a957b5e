use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{BinaryOperator, Expr, FunctionDef, Statement},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            block::parse_block,
            core::{ParseResult, parse_expression},
            postfix::parse_postfix,
            utils::{expect, peek},
        },
    },
};

/// Parses the ternary sugar `test -> left | right`.
///
/// The sugar has no node of its own. It becomes an immediately invoked
/// anonymous function whose body is `if (test) { left } else { right }`:
///
/// ```text
/// x > 1 -> "big" | "small"
/// ==> (fn () { if (x > 1) { "big" } else { "small" } })()
/// ```
///
/// Grammar: `ternary := try_catch ("->" expression)?`
///
/// # Errors
/// - `InvalidTernaryTest` when the test is neither an identifier nor a
///   binary expression.
/// - `InvalidTernary` when the expression after `->` is not a `|` binary
///   expression.
pub fn parse_ternary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let test = parse_try_catch(tokens)?;

    let arrow = peek(tokens)?;
    if arrow.kind != TokenKind::Ternary {
        return Ok(test);
    }
    tokens.next();

    if !matches!(test, Expr::Identifier { .. } | Expr::Binary { .. }) {
        return Err(ParseError::InvalidTernaryTest { line:   arrow.line,
                                                    column: arrow.column, });
    }

    let branches = parse_expression(tokens)?;
    let Expr::Binary { left,
                       op: BinaryOperator::Bar,
                       right,
                       .. } = branches
    else {
        return Err(ParseError::InvalidTernary { line:   arrow.line,
                                                column: arrow.column, });
    };

    let line = arrow.line;
    let choice = Statement::If { test,
                                 body: vec![Statement::Expression { expr: *left, line }],
                                 alternate: Some(vec![Statement::Expression { expr: *right,
                                                                              line }]),
                                 line };
    let def = FunctionDef { name: FunctionDef::ANONYMOUS.to_string(),
                            params: Vec::new(),
                            body: vec![choice],
                            line };

    Ok(Expr::Call { callee: Box::new(Expr::Function(Rc::new(def))),
                    arguments: Vec::new(),
                    line })
}

/// Parses `try { body } catch { handler }`, or falls through to the logical
/// level.
///
/// Grammar: `try_catch := "try" block "catch" block | logical`
pub fn parse_try_catch<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let token = peek(tokens)?;
    if token.kind != TokenKind::Try {
        return parse_logical(tokens);
    }
    tokens.next();

    let body = parse_block(tokens)?;
    expect(tokens, TokenKind::Catch, "'catch' after try block")?;
    let handler = parse_block(tokens)?;

    Ok(Expr::TryCatch { body,
                        handler,
                        line: token.line })
}

/// Parses `&&` and `|` chains.
///
/// The first operator joins two additive operands. Every further operator
/// takes a whole expression as its right operand, so
/// `a && b | c && d` parses as `(a && b) | (c && d)`.
///
/// Grammar: `logical := additive (("&&" | "|") additive (("&&" | "|")
/// expression)*)?`
pub fn parse_logical<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let mut left = parse_additive(tokens)?;

    let Some((op, line)) = logical_operator(tokens)? else {
        return Ok(left);
    };
    let right = parse_additive(tokens)?;
    left = Expr::Binary { left: Box::new(left),
                          op,
                          right: Box::new(right),
                          line };

    while let Some((op, line)) = logical_operator(tokens)? {
        let right = parse_expression(tokens)?;
        left = Expr::Binary { left: Box::new(left),
                              op,
                              right: Box::new(right),
                              line };
    }
    Ok(left)
}

/// Consumes a `&&` or `|` token if one is next.
fn logical_operator<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<(BinaryOperator, usize)>>
    where I: Iterator<Item = &'a Token>
{
    let token = peek(tokens)?;
    let op = match token.kind {
        TokenKind::And => BinaryOperator::And,
        TokenKind::Bar => BinaryOperator::Bar,
        _ => return Ok(None),
    };
    tokens.next();
    Ok(Some((op, token.line)))
}

/// Parses additive-level expressions, which include comparisons.
///
/// Handles the left-associative operators `+`, `-`, `==`, `!=`, `<` and
/// `>`, all at one precedence level.
///
/// The rule is: `additive := multiplicative (("+" | "-" | "==" | "!=" | "<"
/// | ">") multiplicative)*`
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let mut left = parse_multiplicative(tokens)?;
    loop {
        let token = peek(tokens)?;
        let op = match token.kind {
            TokenKind::Plus => BinaryOperator::Add,
            TokenKind::Minus => BinaryOperator::Sub,
            TokenKind::EqualEqual => BinaryOperator::Equal,
            TokenKind::BangEqual => BinaryOperator::NotEqual,
            TokenKind::Less => BinaryOperator::Less,
            TokenKind::Greater => BinaryOperator::Greater,
            _ => break,
        };
        tokens.next();

        let right = parse_multiplicative(tokens)?;
        left = Expr::Binary { left: Box::new(left),
                              op,
                              right: Box::new(right),
                              line: token.line };
    }
    Ok(left)
}

/// Parses multiplication-level expressions.
///
/// Handles the left-associative operators `/`, `*` and `%`.
///
/// The rule is: `multiplicative := postfix (("/" | "*" | "%") postfix)*`
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let mut left = parse_postfix(tokens)?;
    loop {
        let token = peek(tokens)?;
        let op = match token.kind {
            TokenKind::Slash => BinaryOperator::Div,
            TokenKind::Star => BinaryOperator::Mul,
            TokenKind::Percent => BinaryOperator::Mod,
            _ => break,
        };
        tokens.next();

        let right = parse_postfix(tokens)?;
        left = Expr::Binary { left: Box::new(left),
                              op,
                              right: Box::new(right),
                              line: token.line };
    }
    Ok(left)
}
