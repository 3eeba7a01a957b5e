use std::iter::Peekable;

use crate::{
    ast::{ClassDef, Statement},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            block::parse_function_rest,
            core::{ParseResult, parse_expression},
            utils::{advance, at, eat, expect, parse_identifier, peek, unexpected},
        },
    },
};

/// Parses a class declaration.
///
/// Each member of the body begins with an optional `static` marker and a
/// name. A name followed by `(` is a method; otherwise it is a field.
/// Static fields need an initialiser, instance fields take none and start
/// out null on every new instance.
///
/// ```text
/// class Point {
///     x; y
///     static count = 0
///     constructor(x, y) { this.x = x; this.y = y; }
///     static origin() { new Point(0, 0) }
/// }
/// ```
///
/// # Errors
/// `UnexpectedToken` when a static field has no `=` or an instance field
/// has one.
pub fn parse_class<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Token>
{
    let keyword = advance(tokens)?;
    let name = parse_identifier(tokens, "a class name")?;
    expect(tokens, TokenKind::LBrace, "'{' to open the class body")?;

    let mut def = ClassDef { name,
                             fields: Vec::new(),
                             static_fields: Vec::new(),
                             methods: Vec::new(),
                             static_methods: Vec::new(),
                             line: keyword.line };

    while !eat(tokens, TokenKind::RBrace) {
        let is_static = eat(tokens, TokenKind::Static);
        let member = expect(tokens, TokenKind::Identifier, "a class member name")?;
        let name = member.literal.clone();

        if at(tokens, TokenKind::LParen) {
            let method = parse_function_rest(tokens, name, member.line)?;
            if is_static {
                def.static_methods.push(method);
            } else {
                def.methods.push(method);
            }
        } else if is_static {
            expect(tokens, TokenKind::Equals, "'=' after a static field name")?;
            def.static_fields.push((name, parse_expression(tokens)?));
        } else {
            let token = peek(tokens)?;
            if token.kind == TokenKind::Equals {
                return Err(unexpected(token, "a field without initialiser"));
            }
            def.fields.push(name);
        }

        eat(tokens, TokenKind::Semicolon);
    }

    Ok(Statement::Class(def))
}

/// Parses `enum Name { A, B, C }`. A trailing comma is accepted.
pub fn parse_enum<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Token>
{
    let keyword = advance(tokens)?;
    let name = parse_identifier(tokens, "an enum name")?;
    expect(tokens, TokenKind::LBrace, "'{' to open the enum body")?;

    let mut members = Vec::new();
    while !eat(tokens, TokenKind::RBrace) {
        let member = advance(tokens)?;
        if member.kind != TokenKind::Identifier {
            return Err(unexpected(member, "an enum member name"));
        }
        members.push(member.literal.clone());

        if !at(tokens, TokenKind::RBrace) {
            expect(tokens, TokenKind::Comma, "',' or '}' after enum member")?;
        }
    }

    Ok(Statement::Enum { name,
                         members,
                         line: keyword.line })
}
