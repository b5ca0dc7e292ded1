//! Partitioning AST types.

use super::{Expr, TableOption};
use crate::lexer::Span;

/// `RANGE`/`LIST` partitioning target: an expression or a column list.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PartitionTarget {
    /// `RANGE (expr)`
    Expr(Expr),
    /// `RANGE COLUMNS (a, b)`
    Columns(Vec<String>),
}

/// How rows are assigned to partitions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PartitionMethod {
    /// `[LINEAR] HASH (expr)`
    Hash { linear: bool, expr: Expr },
    /// `[LINEAR] KEY [ALGORITHM = n] (columns)`
    Key {
        linear: bool,
        algorithm: Option<u32>,
        columns: Vec<String>,
    },
    /// `RANGE (expr)` / `RANGE COLUMNS (columns)`
    Range(PartitionTarget),
    /// `LIST (expr)` / `LIST COLUMNS (columns)`
    List(PartitionTarget),
}

/// `SUBPARTITION BY ... [SUBPARTITIONS n]`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SubpartitionBy {
    /// Always a `HASH` or `KEY` method.
    pub method: PartitionMethod,
    pub count: Option<u64>,
}

/// One bound of `VALUES LESS THAN (...)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PartitionValue {
    Expr(Expr),
    MaxValue,
}

/// The `VALUES` clause of a partition definition.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PartitionValues {
    /// `VALUES LESS THAN MAXVALUE` holds a single `MaxValue`.
    LessThan(Vec<PartitionValue>),
    /// `VALUES IN (v1, v2)`
    In(Vec<Expr>),
}

/// `SUBPARTITION name [options]`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SubpartitionDefinition {
    pub name: String,
    pub options: Vec<TableOption>,
    pub span: Span,
}

/// `PARTITION name [VALUES ...] [options] [(subpartitions)]`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PartitionDefinition {
    pub name: String,
    pub values: Option<PartitionValues>,
    /// Storage options: engine, comment, directories, row limits, tablespace.
    pub options: Vec<TableOption>,
    pub subpartitions: Vec<SubpartitionDefinition>,
    pub span: Span,
}

/// `PARTITION BY ...` of CREATE TABLE or ALTER TABLE.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PartitionOptions {
    pub method: PartitionMethod,
    /// `PARTITIONS n`
    pub partitions: Option<u64>,
    pub subpartition: Option<SubpartitionBy>,
    pub definitions: Vec<PartitionDefinition>,
    pub span: Span,
}
