#![allow(dead_code)]

use oxide_ddl_core::ast::{AlterTableStatement, CreateTableStatement, Statement};
use oxide_ddl_core::{Expr, Lexer, ParseError, Parser};

pub fn parse(sql: &str) -> Statement {
    oxide_ddl_core::parse(sql)
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
        .statement
}

pub fn parse_err(sql: &str) -> Box<ParseError> {
    oxide_ddl_core::parse(sql)
        .map(|parsed| parsed.statement)
        .expect_err(&format!("Expected parse error for: {sql}"))
}

pub fn parse_create_table(sql: &str) -> CreateTableStatement {
    match parse(sql) {
        Statement::CreateTable(s) => s,
        other => panic!("Expected CREATE TABLE, got {other:?}"),
    }
}

pub fn parse_alter(sql: &str) -> AlterTableStatement {
    match parse(sql) {
        Statement::AlterTable(s) => s,
        other => panic!("Expected ALTER TABLE, got {other:?}"),
    }
}

/// Parses a standalone expression, requiring every token to be consumed.
pub fn parse_expr(sql: &str) -> Expr {
    let tokens = Lexer::new(sql).tokenize();
    let mut parser = Parser::new(&tokens);
    let expr = parser
        .parse_expression()
        .unwrap_or_else(|e| panic!("Failed to parse expression: {sql}\nError: {e:?}"));
    assert!(parser.is_at_end(), "Trailing tokens after expression: {sql}");
    expr
}

pub fn parse_expr_err(sql: &str) -> Box<ParseError> {
    let tokens = Lexer::new(sql).tokenize();
    let mut parser = Parser::new(&tokens);
    match parser.parse_expression() {
        Ok(expr) if parser.is_at_end() => panic!("Expected parse error for: {sql}, got {expr}"),
        Ok(_) => panic!("Expected parse error for: {sql}, got trailing tokens"),
        Err(e) => e,
    }
}

/// Verifies that rendering an expression and parsing the rendering yields a
/// structurally equal tree, and that the rendering is a fixed point.
pub fn round_trip_expr(sql: &str) {
    let first = parse_expr(sql);
    let rendered1 = first.to_string();
    let second = parse_expr(&rendered1);
    let rendered2 = second.to_string();
    assert_eq!(
        first, second,
        "Re-parse changed the tree.\n  Input:    {sql}\n  Rendered: {rendered1}"
    );
    assert_eq!(
        rendered1, rendered2,
        "Round-trip failed.\n  Input:    {sql}\n  First:    {rendered1}\n  Second:   {rendered2}"
    );
}
