//! Tests for the JSON shape of parsed statements.

#![cfg(feature = "serde")]

mod common;
use common::*;

use serde_json::json;

#[test]
fn drop_table_json() {
    let value = serde_json::to_value(parse("DROP TABLE IF EXISTS a RESTRICT")).unwrap();
    assert_eq!(value["DropTable"]["if_exists"], json!(true));
    assert_eq!(value["DropTable"]["tables"][0]["name"], json!("a"));
    assert_eq!(value["DropTable"]["behavior"], json!("Restrict"));
}

#[test]
fn alter_specifications_json() {
    let value = serde_json::to_value(parse("ALTER TABLE t DROP PRIMARY KEY, DROP COLUMN c")).unwrap();
    let specifications = &value["AlterTable"]["specifications"];
    assert_eq!(specifications[0], json!("DropPrimaryKey"));
    assert_eq!(specifications[1], json!({ "DropColumn": "c" }));
}

#[test]
fn parsed_statement_carries_consumed_range() {
    let parsed = oxide_ddl_core::parse("TRUNCATE t;").unwrap();
    let value = serde_json::to_value(&parsed).unwrap();
    assert_eq!(value["consumed"], json!({ "start": 0, "end": 3 }));
}
