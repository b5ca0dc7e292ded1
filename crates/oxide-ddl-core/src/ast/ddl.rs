//! DDL statement AST types.

use core::fmt;

use super::{
    AlterSpecification, DataType, Expr, OrderDirection, PartitionOptions, SelectStatement,
    write_ident,
};
use crate::lexer::Span;

/// A table name, optionally schema-qualified.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableName {
    /// Schema (database) name.
    pub schema: Option<String>,
    /// Table name.
    pub name: String,
}

impl TableName {
    /// An unqualified table name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
        }
    }

    /// A schema-qualified table name.
    #[must_use]
    pub fn qualified(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: Some(schema.into()),
            name: name.into(),
        }
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(schema) = &self.schema {
            write_ident(f, schema)?;
            f.write_str(".")?;
        }
        write_ident(f, &self.name)
    }
}

// ===================================================================
// Key parts, indexes, references
// ===================================================================

/// One column of an index or key.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct KeyPart {
    /// Column name.
    pub column: String,
    /// Prefix length, `col(10)`.
    pub length: Option<u32>,
    /// ASC / DESC, if written.
    pub order: Option<OrderDirection>,
}

impl KeyPart {
    /// A key part on the whole column, without an explicit order.
    #[must_use]
    pub fn column(name: impl Into<String>) -> Self {
        Self {
            column: name.into(),
            length: None,
            order: None,
        }
    }

    /// The sort order, ascending when none was written.
    #[must_use]
    pub fn effective_order(&self) -> OrderDirection {
        self.order.unwrap_or_default()
    }
}

/// `USING BTREE|HASH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum IndexType {
    Btree,
    Hash,
}

impl IndexType {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Btree => "BTREE",
            Self::Hash => "HASH",
        }
    }
}

/// Trailing options of an index or key definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IndexOptions {
    /// `KEY_BLOCK_SIZE [=] n`
    pub key_block_size: Option<u64>,
    /// `COMMENT 'text'`
    pub comment: Option<String>,
    /// `USING BTREE|HASH`
    pub using: Option<IndexType>,
    /// `WITH PARSER name`
    pub parser: Option<String>,
}

impl IndexOptions {
    /// Returns true if no option was given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// The flavour of a non-constraint index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum IndexKind {
    /// `INDEX` / `KEY`
    Plain,
    /// `UNIQUE INDEX`, only in `CREATE UNIQUE INDEX`
    Unique,
    /// `FULLTEXT`
    Fulltext,
    /// `SPATIAL`
    Spatial,
}

/// `{INDEX|KEY}` or `FULLTEXT|SPATIAL [INDEX|KEY]` inside a table definition.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IndexDefinition {
    pub kind: IndexKind,
    pub name: Option<String>,
    /// `USING` written before the key parts.
    pub index_type: Option<IndexType>,
    pub key_parts: Vec<KeyPart>,
    pub options: IndexOptions,
    pub span: Span,
}

/// `MATCH FULL|PARTIAL|SIMPLE` of a reference definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum MatchMode {
    Full,
    Partial,
    Simple,
}

/// Referential action for `ON UPDATE` / `ON DELETE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ReferenceAction {
    Restrict,
    Cascade,
    SetNull,
    NoAction,
    SetDefault,
}

impl ReferenceAction {
    /// Returns the SQL text.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::NoAction => "NO ACTION",
            Self::SetDefault => "SET DEFAULT",
        }
    }
}

/// `REFERENCES table (key_parts) [MATCH ...] [ON UPDATE ...] [ON DELETE ...]`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReferenceDefinition {
    pub table: TableName,
    pub key_parts: Vec<KeyPart>,
    pub match_mode: Option<MatchMode>,
    pub on_update: Option<ReferenceAction>,
    pub on_delete: Option<ReferenceAction>,
    pub span: Span,
}

/// What a table constraint enforces.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ConstraintKind {
    /// `PRIMARY KEY [USING type] (key_parts) [options]`
    PrimaryKey {
        index_type: Option<IndexType>,
        key_parts: Vec<KeyPart>,
        options: IndexOptions,
    },
    /// `UNIQUE [INDEX|KEY] [name] [USING type] (key_parts) [options]`
    Unique {
        index_name: Option<String>,
        index_type: Option<IndexType>,
        key_parts: Vec<KeyPart>,
        options: IndexOptions,
    },
    /// `FOREIGN KEY [name] (columns) reference`
    ForeignKey {
        index_name: Option<String>,
        key_parts: Vec<KeyPart>,
        reference: ReferenceDefinition,
    },
    /// `CHECK (expr)`
    Check(Expr),
}

/// `[CONSTRAINT [symbol]] ...` inside a table definition or `ALTER TABLE ... ADD`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConstraintDefinition {
    /// The `CONSTRAINT symbol` name.
    pub name: Option<String>,
    pub kind: ConstraintKind,
    pub span: Span,
}

// ===================================================================
// Columns
// ===================================================================

/// `NULL` / `NOT NULL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Nullability {
    Null,
    NotNull,
}

/// `COLUMN_FORMAT FIXED|DYNAMIC|DEFAULT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ColumnFormat {
    Fixed,
    Dynamic,
    Default,
}

/// `STORAGE DISK|MEMORY|DEFAULT`, also used by `TABLESPACE ... STORAGE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum StorageMedium {
    Disk,
    Memory,
    Default,
}

/// `VIRTUAL` / `STORED` of a generated column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum GeneratedStorage {
    Virtual,
    Stored,
}

/// `[GENERATED ALWAYS] AS (expr) [VIRTUAL|STORED]`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GeneratedColumn {
    pub expr: Expr,
    pub storage: Option<GeneratedStorage>,
}

/// An inline `[CONSTRAINT [symbol]] CHECK (expr)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CheckConstraint {
    pub name: Option<String>,
    pub expr: Expr,
}

/// Options written after a column's data type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ColumnOptions {
    pub nullability: Option<Nullability>,
    pub default: Option<Expr>,
    /// `ON UPDATE CURRENT_TIMESTAMP[(n)]`
    pub on_update: Option<Expr>,
    pub auto_increment: bool,
    pub unique: bool,
    pub primary_key: bool,
    pub comment: Option<String>,
    pub column_format: Option<ColumnFormat>,
    pub storage: Option<StorageMedium>,
    pub collation: Option<String>,
    pub check: Option<CheckConstraint>,
    pub references: Option<ReferenceDefinition>,
}

impl ColumnOptions {
    /// Returns true if the column was declared `NOT NULL`.
    #[must_use]
    pub fn is_not_null(&self) -> bool {
        self.nullability == Some(Nullability::NotNull)
    }
}

/// A column definition.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ColumnDefinition {
    /// Column name.
    pub name: String,
    /// Data type.
    pub data_type: DataType,
    /// Column options.
    pub options: ColumnOptions,
    /// Generation clause for generated columns.
    pub generated: Option<GeneratedColumn>,
    /// Source span.
    pub span: Span,
}

// ===================================================================
// Table options
// ===================================================================

/// Which table option was set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TableOptionKind {
    Engine,
    AutoIncrement,
    AvgRowLength,
    CharacterSet,
    Checksum,
    Collate,
    Comment,
    Compression,
    Connection,
    DataDirectory,
    IndexDirectory,
    DelayKeyWrite,
    Encryption,
    InsertMethod,
    KeyBlockSize,
    MaxRows,
    MinRows,
    PackKeys,
    Password,
    RowFormat,
    StatsAutoRecalc,
    StatsPersistent,
    StatsSamplePages,
    Tablespace,
    Union,
}

/// The value of a table option.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum OptionValue {
    /// An identifier such as an engine or charset name.
    Name(String),
    /// An unsigned number, as written.
    Number(String),
    /// A string literal.
    Text(String),
    /// The keyword `DEFAULT`.
    Default,
    /// `TABLESPACE name [STORAGE DISK|MEMORY|DEFAULT]`.
    Tablespace {
        name: String,
        storage: Option<StorageMedium>,
    },
    /// `UNION [=] (t1, t2)`.
    Tables(Vec<TableName>),
}

/// One table option, e.g. `ENGINE=InnoDB`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableOption {
    pub kind: TableOptionKind,
    pub value: OptionValue,
    pub span: Span,
}

// ===================================================================
// Statements
// ===================================================================

/// An element inside `CREATE TABLE t ( ... )`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TableElement {
    Column(ColumnDefinition),
    Index(IndexDefinition),
    Constraint(ConstraintDefinition),
}

/// `IGNORE` / `REPLACE` before the SELECT of a `CREATE TABLE ... SELECT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DuplicateHandling {
    Ignore,
    Replace,
}

/// `[IGNORE|REPLACE] [AS] SELECT ...`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CreateTableQuery {
    pub duplicates: Option<DuplicateHandling>,
    pub select: Box<SelectStatement>,
}

/// A CREATE TABLE statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CreateTableStatement {
    pub temporary: bool,
    pub if_not_exists: bool,
    pub table: TableName,
    /// Column, index and constraint definitions, in source order.
    pub elements: Vec<TableElement>,
    pub options: Vec<TableOption>,
    pub partition: Option<PartitionOptions>,
    /// Source table of `CREATE TABLE t LIKE u`.
    pub like: Option<TableName>,
    /// Source query of `CREATE TABLE t ... SELECT`.
    pub query: Option<CreateTableQuery>,
    pub span: Span,
}

impl CreateTableStatement {
    /// Iterates over the column definitions.
    pub fn columns(&self) -> impl Iterator<Item = &ColumnDefinition> {
        self.elements.iter().filter_map(|element| match element {
            TableElement::Column(column) => Some(column),
            _ => None,
        })
    }
}

/// An ALTER TABLE statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AlterTableStatement {
    pub ignore: bool,
    pub table: TableName,
    /// Specifications in the order they apply.
    pub specifications: Vec<AlterSpecification>,
    pub span: Span,
}

/// `RESTRICT` / `CASCADE` of DROP TABLE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DropBehavior {
    Restrict,
    Cascade,
}

/// A DROP TABLE statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DropTableStatement {
    pub temporary: bool,
    pub if_exists: bool,
    pub tables: Vec<TableName>,
    pub behavior: Option<DropBehavior>,
    pub span: Span,
}

/// A TRUNCATE TABLE statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TruncateTableStatement {
    pub table: TableName,
    pub span: Span,
}

/// `ALGORITHM [=] ...` of ALTER TABLE and the index statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum AlgorithmOption {
    Default,
    Inplace,
    Copy,
    Instant,
}

/// `LOCK [=] ...` of ALTER TABLE and the index statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum LockOption {
    Default,
    None,
    Shared,
    Exclusive,
}

/// A CREATE INDEX statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CreateIndexStatement {
    pub kind: IndexKind,
    pub name: String,
    /// `USING` written before `ON`.
    pub index_type: Option<IndexType>,
    pub table: TableName,
    pub key_parts: Vec<KeyPart>,
    pub options: IndexOptions,
    pub algorithm: Option<AlgorithmOption>,
    pub lock: Option<LockOption>,
    pub span: Span,
}

impl CreateIndexStatement {
    /// The index type, whether written before `ON` or among the trailing options.
    #[must_use]
    pub fn using(&self) -> Option<IndexType> {
        self.index_type.or(self.options.using)
    }
}

/// A DROP INDEX statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DropIndexStatement {
    pub name: String,
    pub table: TableName,
    pub algorithm: Option<AlgorithmOption>,
    pub lock: Option<LockOption>,
    pub span: Span,
}

/// A DDL statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Statement {
    CreateTable(CreateTableStatement),
    AlterTable(AlterTableStatement),
    DropTable(DropTableStatement),
    TruncateTable(TruncateTableStatement),
    CreateIndex(CreateIndexStatement),
    DropIndex(DropIndexStatement),
}

impl Statement {
    /// The statement keyword(s), e.g. `"CREATE TABLE"`.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::CreateTable(_) => "CREATE TABLE",
            Self::AlterTable(_) => "ALTER TABLE",
            Self::DropTable(_) => "DROP TABLE",
            Self::TruncateTable(_) => "TRUNCATE TABLE",
            Self::CreateIndex(_) => "CREATE INDEX",
            Self::DropIndex(_) => "DROP INDEX",
        }
    }

    /// Source span of the whole statement.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::CreateTable(s) => s.span,
            Self::AlterTable(s) => s.span,
            Self::DropTable(s) => s.span,
            Self::TruncateTable(s) => s.span,
            Self::CreateIndex(s) => s.span,
            Self::DropIndex(s) => s.span,
        }
    }

    /// Every table the statement names, in source order.
    #[must_use]
    pub fn tables(&self) -> Vec<&TableName> {
        match self {
            Self::CreateTable(s) => {
                let mut tables = vec![&s.table];
                tables.extend(&s.like);
                tables
            }
            Self::AlterTable(s) => vec![&s.table],
            Self::DropTable(s) => s.tables.iter().collect(),
            Self::TruncateTable(s) => vec![&s.table],
            Self::CreateIndex(s) => vec![&s.table],
            Self::DropIndex(s) => vec![&s.table],
        }
    }
}
