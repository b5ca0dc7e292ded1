//! ALTER TABLE specification types.

use super::{
    AlgorithmOption, ColumnDefinition, ConstraintDefinition, Expr, IndexDefinition, LockOption,
    OrderDirection, PartitionDefinition, PartitionOptions, TableName, TableOption,
};

/// `FIRST` / `AFTER column` placement of an added or changed column.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ColumnPosition {
    First,
    After(String),
}

/// One column of `ALTER TABLE ... ORDER BY`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ColumnOrder {
    pub column: String,
    pub direction: Option<OrderDirection>,
}

/// Partitions targeted by a maintenance operation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PartitionTargets {
    All,
    Names(Vec<String>),
}

/// Partition operations that only name their targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PartitionMaintenance {
    /// `DISCARD PARTITION ... TABLESPACE`
    DiscardTablespace,
    /// `IMPORT PARTITION ... TABLESPACE`
    ImportTablespace,
    Truncate,
    Analyze,
    Check,
    Optimize,
    Rebuild,
    Repair,
}

impl PartitionMaintenance {
    /// Returns the leading keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DiscardTablespace => "DISCARD",
            Self::ImportTablespace => "IMPORT",
            Self::Truncate => "TRUNCATE",
            Self::Analyze => "ANALYZE",
            Self::Check => "CHECK",
            Self::Optimize => "OPTIMIZE",
            Self::Rebuild => "REBUILD",
            Self::Repair => "REPAIR",
        }
    }
}

/// A partition-level ALTER TABLE operation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PartitionOperation {
    /// `ADD PARTITION (definitions)`
    Add(Vec<PartitionDefinition>),
    /// `DROP PARTITION names`
    Drop(Vec<String>),
    /// `TRUNCATE|ANALYZE|... PARTITION {names|ALL}`
    Maintain {
        kind: PartitionMaintenance,
        targets: PartitionTargets,
    },
    /// `COALESCE PARTITION n`
    Coalesce(u64),
    /// `REORGANIZE PARTITION [names INTO (definitions)]`
    Reorganize {
        names: Vec<String>,
        into: Vec<PartitionDefinition>,
    },
    /// `EXCHANGE PARTITION p WITH TABLE t [{WITH|WITHOUT} VALIDATION]`
    Exchange {
        partition: String,
        table: TableName,
        validation: Option<bool>,
    },
    /// `REMOVE PARTITIONING`
    RemovePartitioning,
    /// `UPGRADE PARTITIONING`
    UpgradePartitioning,
}

/// One comma-separated clause of ALTER TABLE.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum AlterSpecification {
    /// A run of table options.
    TableOptions(Vec<TableOption>),
    /// `ADD [COLUMN] col_def [FIRST|AFTER c]`
    AddColumn {
        column: ColumnDefinition,
        position: Option<ColumnPosition>,
    },
    /// `ADD [COLUMN] (col_def, ...)`
    AddColumns(Vec<ColumnDefinition>),
    /// `ADD {INDEX|KEY|FULLTEXT|SPATIAL} ...`
    AddIndex(IndexDefinition),
    /// `ADD [CONSTRAINT [sym]] PRIMARY KEY|UNIQUE|FOREIGN KEY|CHECK ...`
    AddConstraint(ConstraintDefinition),
    /// `ALGORITHM [=] ...`
    Algorithm(AlgorithmOption),
    /// `ALTER [COLUMN] c SET DEFAULT value`
    AlterColumnSetDefault { column: String, value: Expr },
    /// `ALTER [COLUMN] c DROP DEFAULT`
    AlterColumnDropDefault { column: String },
    /// `CHANGE [COLUMN] old new_def [FIRST|AFTER c]`
    ChangeColumn {
        old_name: String,
        column: ColumnDefinition,
        position: Option<ColumnPosition>,
    },
    /// `MODIFY [COLUMN] col_def [FIRST|AFTER c]`
    ModifyColumn {
        column: ColumnDefinition,
        position: Option<ColumnPosition>,
    },
    /// `LOCK [=] ...`
    Lock(LockOption),
    /// `DROP [COLUMN] c`
    DropColumn(String),
    /// `DROP {INDEX|KEY} name`
    DropIndex(String),
    /// `DROP PRIMARY KEY`
    DropPrimaryKey,
    /// `DROP FOREIGN KEY symbol`
    DropForeignKey(String),
    /// `DISABLE KEYS`
    DisableKeys,
    /// `ENABLE KEYS`
    EnableKeys,
    /// `RENAME [TO|AS] new_name`
    RenameTable(TableName),
    /// `RENAME {INDEX|KEY} old TO new`
    RenameIndex { from: String, to: String },
    /// `RENAME COLUMN old TO new`
    RenameColumn { from: String, to: String },
    /// `ORDER BY col [ASC|DESC], ...`
    OrderBy(Vec<ColumnOrder>),
    /// `CONVERT TO CHARACTER SET cs [COLLATE c]`
    ConvertToCharset {
        charset: String,
        collation: Option<String>,
    },
    /// `DISCARD TABLESPACE`
    DiscardTablespace,
    /// `IMPORT TABLESPACE`
    ImportTablespace,
    /// `FORCE`
    Force,
    /// `WITH VALIDATION` (true) / `WITHOUT VALIDATION` (false)
    Validation(bool),
    /// Partition operations.
    Partition(PartitionOperation),
    /// `PARTITION BY ...`
    PartitionBy(PartitionOptions),
}

impl AlterSpecification {
    /// Short name of the clause, used in logs and summaries.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::TableOptions(_) => "table options",
            Self::AddColumn { .. } => "add column",
            Self::AddColumns(_) => "add columns",
            Self::AddIndex(_) => "add index",
            Self::AddConstraint(_) => "add constraint",
            Self::Algorithm(_) => "algorithm",
            Self::AlterColumnSetDefault { .. } => "alter column set default",
            Self::AlterColumnDropDefault { .. } => "alter column drop default",
            Self::ChangeColumn { .. } => "change column",
            Self::ModifyColumn { .. } => "modify column",
            Self::Lock(_) => "lock",
            Self::DropColumn(_) => "drop column",
            Self::DropIndex(_) => "drop index",
            Self::DropPrimaryKey => "drop primary key",
            Self::DropForeignKey(_) => "drop foreign key",
            Self::DisableKeys => "disable keys",
            Self::EnableKeys => "enable keys",
            Self::RenameTable(_) => "rename table",
            Self::RenameIndex { .. } => "rename index",
            Self::RenameColumn { .. } => "rename column",
            Self::OrderBy(_) => "order by",
            Self::ConvertToCharset { .. } => "convert to charset",
            Self::DiscardTablespace => "discard tablespace",
            Self::ImportTablespace => "import tablespace",
            Self::Force => "force",
            Self::Validation(_) => "validation",
            Self::Partition(_) => "partition operation",
            Self::PartitionBy(_) => "partition by",
        }
    }
}
