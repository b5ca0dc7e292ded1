//! Abstract Syntax Tree (AST) types for MySQL DDL statements.
//!
//! Nodes are built bottom-up by the parser and never mutated afterwards.
//! Each node owns its children; the tree holds no references into the token
//! buffer it was parsed from.

use core::fmt;

mod alter;
mod ddl;
mod expression;
mod partition;
mod select;
mod types;

pub use alter::{
    AlterSpecification, ColumnOrder, ColumnPosition, PartitionMaintenance, PartitionOperation,
    PartitionTargets,
};
pub use ddl::{
    AlgorithmOption, AlterTableStatement, CheckConstraint, ColumnDefinition, ColumnFormat,
    ColumnOptions, ConstraintDefinition, ConstraintKind, CreateIndexStatement, CreateTableQuery,
    CreateTableStatement, DropBehavior, DropIndexStatement, DropTableStatement, DuplicateHandling,
    GeneratedColumn, GeneratedStorage, IndexDefinition, IndexKind, IndexOptions, IndexType,
    KeyPart, LockOption, MatchMode, Nullability, OptionValue, ReferenceAction,
    ReferenceDefinition, Statement, StorageMedium, TableElement, TableName, TableOption,
    TableOptionKind, TruncateTableStatement,
};
pub use expression::{
    BinaryOp, CastTarget, ColumnRef, Expr, ExprKind, FunctionCall, IsPredicate, Literal,
    Quantifier, TemporalKind, UnaryOp, WhenClause,
};
pub use partition::{
    PartitionDefinition, PartitionMethod, PartitionOptions, PartitionTarget, PartitionValue,
    PartitionValues, SubpartitionBy, SubpartitionDefinition,
};
pub use select::{
    JoinClause, JoinConstraint, JoinType, Limit, OrderBy, OrderDirection, SelectColumn,
    SelectQuantifier, SelectStatement, TableRef,
};
pub use types::{
    BlobKind, CharKind, DataType, DateTimeKind, DecimalKind, EnumKind, IntegerKind, TextKind,
    TypeFamily,
};

/// Writes an identifier, back-quoting it when it is a keyword or is not a
/// plain word.
pub(crate) fn write_ident(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    let plain = name
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        && crate::lexer::Keyword::from_str(name).is_none();
    if plain {
        f.write_str(name)
    } else {
        write!(f, "`{}`", name.replace('`', "``"))
    }
}

/// Writes a single-quoted string literal.
pub(crate) fn write_quoted(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    f.write_str("'")?;
    for c in value.chars() {
        match c {
            '\'' => f.write_str("''")?,
            '\\' => f.write_str("\\\\")?,
            _ => write!(f, "{c}")?,
        }
    }
    f.write_str("'")
}
