//! Tests for CREATE TABLE: columns, data types, column options, indexes,
//! constraints, table options, partitioning and the LIKE / SELECT forms.

mod common;
use common::*;

use oxide_ddl_core::ast::{
    CharKind, ConstraintKind, DataType, DateTimeKind, DecimalKind, EnumKind, Expr, ExprKind,
    GeneratedStorage, IndexKind, IndexType, IntegerKind, KeyPart, Literal, MatchMode,
    Nullability, OptionValue, OrderDirection, PartitionMethod, ReferenceAction, TableElement,
    TableName, TableOptionKind, TextKind,
};
use oxide_ddl_core::parser::ParseErrorKind;
use oxide_ddl_core::TokenKind;

// ===================================================================
// Basic shape
// ===================================================================

#[test]
fn two_columns_and_engine() {
    let s = parse_create_table(
        "CREATE TABLE t (id INT PRIMARY KEY, name VARCHAR(20) DEFAULT NULL) ENGINE=InnoDB;",
    );
    assert_eq!(s.table, TableName::new("t"));

    let columns: Vec<_> = s.columns().collect();
    assert_eq!(columns.len(), 2);

    assert_eq!(columns[0].name, "id");
    assert_eq!(
        columns[0].data_type,
        DataType::Integer {
            kind: IntegerKind::Int,
            width: None,
            unsigned: false,
            zerofill: false,
        }
    );
    assert!(columns[0].options.primary_key);

    assert_eq!(columns[1].name, "name");
    assert_eq!(
        columns[1].data_type,
        DataType::Char {
            kind: CharKind::Varchar,
            length: Some(20),
            binary: false,
            charset: None,
            collation: None,
        }
    );
    assert_eq!(
        columns[1].options.default,
        Some(Expr::literal(Literal::Null))
    );

    assert_eq!(s.options.len(), 1);
    assert_eq!(s.options[0].kind, TableOptionKind::Engine);
    assert_eq!(s.options[0].value, OptionValue::Name(String::from("InnoDB")));
}

#[test]
fn temporary_if_not_exists_qualified() {
    let s = parse_create_table("CREATE TEMPORARY TABLE IF NOT EXISTS shop.items (id INT)");
    assert!(s.temporary);
    assert!(s.if_not_exists);
    assert_eq!(s.table, TableName::qualified("shop", "items"));
}

#[test]
fn quoted_and_non_reserved_column_names() {
    let s = parse_create_table("CREATE TABLE `order` (`select` INT, status INT, comment TEXT)");
    assert_eq!(s.table.name, "order");
    let names: Vec<_> = s.columns().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["select", "status", "comment"]);
}

// ===================================================================
// Data types
// ===================================================================

#[test]
fn numeric_types() {
    let s = parse_create_table(
        "CREATE TABLE t (
            a TINYINT(1) UNSIGNED ZEROFILL,
            b BIGINT,
            c DECIMAL(10, 2) UNSIGNED,
            d DOUBLE PRECISION,
            e FLOAT(7, 4),
            f BOOLEAN,
            g BIT(8)
        )",
    );
    let types: Vec<_> = s.columns().map(|c| c.data_type.clone()).collect();
    assert_eq!(
        types[0],
        DataType::Integer {
            kind: IntegerKind::Tinyint,
            width: Some(1),
            unsigned: true,
            zerofill: true,
        }
    );
    assert_eq!(
        types[2],
        DataType::Decimal {
            kind: DecimalKind::Decimal,
            precision: Some(10),
            scale: Some(2),
            unsigned: true,
            zerofill: false,
        }
    );
    assert!(matches!(
        types[3],
        DataType::Decimal {
            kind: DecimalKind::DoublePrecision,
            ..
        }
    ));
    assert_eq!(types[5], DataType::Bool);
    assert_eq!(types[6], DataType::Bit(Some(8)));
}

#[test]
fn string_and_temporal_types() {
    let s = parse_create_table(
        "CREATE TABLE t (
            a CHAR(3) BINARY CHARACTER SET latin1 COLLATE latin1_bin,
            b TEXT CHARSET utf8mb4,
            c ENUM('x', 'y') COLLATE utf8mb4_bin,
            d DATETIME(6),
            e YEAR,
            f JSON,
            g VARBINARY(16),
            h LONGBLOB
        )",
    );
    let types: Vec<_> = s.columns().map(|c| c.data_type.clone()).collect();
    assert_eq!(
        types[0],
        DataType::Char {
            kind: CharKind::Char,
            length: Some(3),
            binary: true,
            charset: Some(String::from("latin1")),
            collation: Some(String::from("latin1_bin")),
        }
    );
    assert!(matches!(
        &types[1],
        DataType::Text {
            kind: TextKind::Text,
            charset: Some(cs),
            ..
        } if cs == "utf8mb4"
    ));
    assert!(matches!(
        &types[2],
        DataType::Enum {
            kind: EnumKind::Enum,
            values,
            ..
        } if values.len() == 2
    ));
    assert_eq!(
        types[3],
        DataType::DateTime {
            kind: DateTimeKind::Datetime,
            fsp: Some(6),
        }
    );
    assert_eq!(types[5], DataType::Json);
}

#[test]
fn unknown_type_is_rejected() {
    let err = parse_err("CREATE TABLE t (a WIDGET)");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    assert_eq!(err.span.start, 18);
}

// ===================================================================
// Column options
// ===================================================================

#[test]
fn column_options_in_any_order() {
    let s = parse_create_table(
        "CREATE TABLE t (
            id BIGINT UNSIGNED AUTO_INCREMENT NOT NULL COMMENT 'key' UNIQUE KEY,
            updated TIMESTAMP(3) NULL DEFAULT CURRENT_TIMESTAMP(3) ON UPDATE CURRENT_TIMESTAMP(3),
            code VARCHAR(8) COLLATE ascii_bin COLUMN_FORMAT FIXED STORAGE DISK
        )",
    );
    let columns: Vec<_> = s.columns().collect();

    let id = &columns[0].options;
    assert!(id.auto_increment);
    assert!(id.is_not_null());
    assert!(id.unique);
    assert_eq!(id.comment.as_deref(), Some("key"));

    let updated = &columns[1].options;
    assert_eq!(updated.nullability, Some(Nullability::Null));
    assert!(matches!(
        updated.default.as_ref().map(|e| &e.kind),
        Some(ExprKind::Function(call)) if call.args.len() == 1
    ));
    assert!(updated.on_update.is_some());

    let code = &columns[2].options;
    assert_eq!(code.collation.as_deref(), Some("ascii_bin"));
    assert!(code.column_format.is_some());
    assert!(code.storage.is_some());
}

#[test]
fn default_values() {
    let s = parse_create_table(
        "CREATE TABLE t (a INT DEFAULT -1, b VARCHAR(4) DEFAULT 'x', c INT DEFAULT (a + 1))",
    );
    let defaults: Vec<_> = s
        .columns()
        .map(|c| c.options.default.clone().unwrap().to_string())
        .collect();
    assert_eq!(defaults, ["(-1)", "'x'", "(a + 1)"]);
}

#[test]
fn inline_check_and_reference() {
    let s = parse_create_table(
        "CREATE TABLE t (
            qty INT CONSTRAINT qty_positive CHECK (qty > 0),
            owner INT REFERENCES users (id) ON DELETE CASCADE
        )",
    );
    let columns: Vec<_> = s.columns().collect();
    let check = columns[0].options.check.as_ref().unwrap();
    assert_eq!(check.name.as_deref(), Some("qty_positive"));
    let reference = columns[1].options.references.as_ref().unwrap();
    assert_eq!(reference.table, TableName::new("users"));
    assert_eq!(reference.on_delete, Some(ReferenceAction::Cascade));
    assert_eq!(reference.on_update, None);
}

#[test]
fn generated_column() {
    let s = parse_create_table(
        "CREATE TABLE t (a INT, b INT GENERATED ALWAYS AS (a * 2) STORED NOT NULL, c INT AS (a))",
    );
    let columns: Vec<_> = s.columns().collect();
    let generated = columns[1].generated.as_ref().unwrap();
    assert_eq!(generated.storage, Some(GeneratedStorage::Stored));
    assert_eq!(generated.expr.to_string(), "(a * 2)");
    assert!(columns[1].options.is_not_null());
    assert!(columns[2].generated.is_some());
}

#[test]
fn auto_increment_rejected_on_strings() {
    let err = parse_err("CREATE TABLE t (a VARCHAR(10) AUTO_INCREMENT)");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    assert_eq!(err.lexeme, "AUTO_INCREMENT");
}

#[test]
fn on_update_rejected_on_integers() {
    let err = parse_err("CREATE TABLE t (a INT ON UPDATE CURRENT_TIMESTAMP)");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
}

#[test]
fn collate_rejected_on_integers() {
    let err = parse_err("CREATE TABLE t (a INT COLLATE utf8mb4_bin)");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
}

// ===================================================================
// Indexes and constraints
// ===================================================================

#[test]
fn index_definitions() {
    let s = parse_create_table(
        "CREATE TABLE t (
            a INT,
            b VARCHAR(100),
            KEY idx_a USING HASH (a),
            INDEX (b(10) DESC) COMMENT 'prefix',
            FULLTEXT KEY ft (b) WITH PARSER ngram
        )",
    );
    let indexes: Vec<_> = s
        .elements
        .iter()
        .filter_map(|e| match e {
            TableElement::Index(index) => Some(index),
            _ => None,
        })
        .collect();
    assert_eq!(indexes.len(), 3);
    assert_eq!(indexes[0].name.as_deref(), Some("idx_a"));
    assert_eq!(indexes[0].index_type, Some(IndexType::Hash));
    assert_eq!(
        indexes[1].key_parts,
        vec![KeyPart {
            column: String::from("b"),
            length: Some(10),
            order: Some(OrderDirection::Desc),
        }]
    );
    assert_eq!(indexes[1].options.comment.as_deref(), Some("prefix"));
    assert_eq!(indexes[2].kind, IndexKind::Fulltext);
    assert_eq!(indexes[2].options.parser.as_deref(), Some("ngram"));
}

#[test]
fn constraint_definitions() {
    let s = parse_create_table(
        "CREATE TABLE t (
            id INT,
            email VARCHAR(255),
            org INT,
            CONSTRAINT pk PRIMARY KEY (id),
            UNIQUE KEY uq_email (email),
            CONSTRAINT fk_org FOREIGN KEY (org) REFERENCES orgs (id)
                MATCH FULL ON UPDATE SET NULL ON DELETE NO ACTION,
            CHECK (id > 0)
        )",
    );
    let constraints: Vec<_> = s
        .elements
        .iter()
        .filter_map(|e| match e {
            TableElement::Constraint(c) => Some(c),
            _ => None,
        })
        .collect();
    assert_eq!(constraints.len(), 4);

    assert_eq!(constraints[0].name.as_deref(), Some("pk"));
    assert!(matches!(
        constraints[0].kind,
        ConstraintKind::PrimaryKey { .. }
    ));
    assert!(matches!(
        &constraints[1].kind,
        ConstraintKind::Unique { index_name: Some(name), .. } if name == "uq_email"
    ));

    let ConstraintKind::ForeignKey { reference, .. } = &constraints[2].kind else {
        panic!("Expected FOREIGN KEY");
    };
    assert_eq!(reference.match_mode, Some(MatchMode::Full));
    assert_eq!(reference.on_update, Some(ReferenceAction::SetNull));
    assert_eq!(reference.on_delete, Some(ReferenceAction::NoAction));

    assert!(matches!(constraints[3].kind, ConstraintKind::Check(_)));
    assert_eq!(constraints[3].name, None);
}

#[test]
fn reference_actions_in_either_order() {
    let a = parse_create_table(
        "CREATE TABLE t (a INT, FOREIGN KEY (a) REFERENCES u (a) ON DELETE RESTRICT ON UPDATE CASCADE)",
    );
    let b = parse_create_table(
        "CREATE TABLE t (a INT, FOREIGN KEY (a) REFERENCES u (a) ON UPDATE CASCADE ON DELETE RESTRICT)",
    );
    let reference = |s: &oxide_ddl_core::ast::CreateTableStatement| match &s.elements[1] {
        TableElement::Constraint(c) => match &c.kind {
            ConstraintKind::ForeignKey { reference, .. } => {
                (reference.on_update, reference.on_delete)
            }
            other => panic!("Expected FOREIGN KEY, got {other:?}"),
        },
        other => panic!("Expected constraint, got {other:?}"),
    };
    assert_eq!(reference(&a), reference(&b));
    assert_eq!(
        reference(&a),
        (Some(ReferenceAction::Cascade), Some(ReferenceAction::Restrict))
    );
}

#[test]
fn duplicate_reference_action_is_malformed() {
    let err = parse_err(
        "CREATE TABLE t (a INT, FOREIGN KEY (a) REFERENCES u (a) ON DELETE CASCADE ON DELETE RESTRICT)",
    );
    assert_eq!(err.kind, ParseErrorKind::MalformedReferenceOptions);
    assert_eq!(err.lexeme, "DELETE");
}

// ===================================================================
// Table options
// ===================================================================

#[test]
fn table_options_with_and_without_commas() {
    let s = parse_create_table(
        "CREATE TABLE t (a INT) ENGINE = InnoDB, AUTO_INCREMENT = 100
         DEFAULT CHARSET=utf8mb4 COLLATE utf8mb4_unicode_ci COMMENT='items'
         ROW_FORMAT=DYNAMIC TABLESPACE ts1 STORAGE DISK",
    );
    let kinds: Vec<_> = s.options.iter().map(|o| o.kind).collect();
    assert_eq!(
        kinds,
        [
            TableOptionKind::Engine,
            TableOptionKind::AutoIncrement,
            TableOptionKind::CharacterSet,
            TableOptionKind::Collate,
            TableOptionKind::Comment,
            TableOptionKind::RowFormat,
            TableOptionKind::Tablespace,
        ]
    );
    assert_eq!(s.options[1].value, OptionValue::Number(String::from("100")));
    assert_eq!(s.options[4].value, OptionValue::Text(String::from("items")));
}

#[test]
fn union_table_option() {
    let s = parse_create_table("CREATE TABLE m (a INT) ENGINE=MERGE UNION=(t1, db.t2) INSERT_METHOD=LAST");
    assert_eq!(
        s.options[1].value,
        OptionValue::Tables(vec![TableName::new("t1"), TableName::qualified("db", "t2")])
    );
    assert_eq!(s.options[2].kind, TableOptionKind::InsertMethod);
}

#[test]
fn trailing_comma_in_table_options_fails() {
    let err = parse_err("CREATE TABLE t (a INT) ENGINE=InnoDB,");
    assert_eq!(err.found, TokenKind::Eof);
}

// ===================================================================
// Partitioning
// ===================================================================

#[test]
fn partition_by_range() {
    let s = parse_create_table(
        "CREATE TABLE t (id INT, created DATE)
         PARTITION BY RANGE (YEAR(created)) (
             PARTITION p2020 VALUES LESS THAN (2021),
             PARTITION pmax VALUES LESS THAN MAXVALUE
         )",
    );
    let partition = s.partition.unwrap();
    assert!(matches!(partition.method, PartitionMethod::Range(_)));
    assert_eq!(partition.definitions.len(), 2);
    assert_eq!(partition.definitions[1].name, "pmax");
}

#[test]
fn partition_by_hash_after_options() {
    let s = parse_create_table("CREATE TABLE t (id INT) ENGINE=InnoDB PARTITION BY HASH (id) PARTITIONS 8");
    assert_eq!(s.options.len(), 1);
    assert_eq!(s.partition.unwrap().partitions, Some(8));
}

// ===================================================================
// LIKE and SELECT
// ===================================================================

#[test]
fn create_like() {
    for sql in ["CREATE TABLE t2 LIKE t1", "CREATE TABLE t2 (LIKE t1)"] {
        let s = parse_create_table(sql);
        assert_eq!(s.like, Some(TableName::new("t1")), "{sql}");
        assert!(s.elements.is_empty());
    }
}

#[test]
fn create_as_select() {
    let s = parse_create_table("CREATE TABLE t2 AS SELECT a, b FROM t1 WHERE a > 1");
    assert!(s.elements.is_empty());
    let query = s.query.unwrap();
    assert_eq!(query.select.columns.len(), 2);
}

#[test]
fn create_with_columns_and_select() {
    let s = parse_create_table("CREATE TABLE t2 (c INT) ENGINE=InnoDB REPLACE SELECT a AS c FROM t1");
    assert_eq!(s.columns().count(), 1);
    assert!(s.query.is_some());
}

#[test]
fn create_without_definitions_fails() {
    let err = parse_err("CREATE TABLE t");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    assert_eq!(err.found, TokenKind::Eof);
    assert!(err.expected.contains(&TokenKind::LeftParen));
}
