//! MySQL keywords recognised by the lexer.
//!
//! Keywords are split into reserved words, which can never name a schema
//! object without back-quotes, and non-reserved words, which the parser also
//! accepts wherever an identifier is expected (`status`, `comment`, `date`, ...).

macro_rules! keywords {
    (
        reserved { $($r_variant:ident => $r_text:literal,)* }
        non_reserved { $($n_variant:ident => $n_text:literal,)* }
    ) => {
        /// SQL keywords.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize))]
        pub enum Keyword {
            $($r_variant,)*
            $($n_variant,)*
        }

        impl Keyword {
            /// Attempts to parse a keyword from a string (case-insensitive).
            #[must_use]
            #[allow(clippy::should_implement_trait)]
            pub fn from_str(s: &str) -> Option<Self> {
                match s.to_ascii_uppercase().as_str() {
                    $($r_text => Some(Self::$r_variant),)*
                    $($n_text => Some(Self::$n_variant),)*
                    _ => None,
                }
            }

            /// Returns the keyword as it is spelled in SQL.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$r_variant => $r_text,)*
                    $(Self::$n_variant => $n_text,)*
                }
            }

            /// Whether the keyword is reserved and so cannot be used as a
            /// bare identifier.
            #[must_use]
            pub const fn is_reserved(&self) -> bool {
                match self {
                    $(Self::$r_variant => true,)*
                    $(Self::$n_variant => false,)*
                }
            }
        }
    };
}

keywords! {
    reserved {
        Add => "ADD",
        All => "ALL",
        Alter => "ALTER",
        Analyze => "ANALYZE",
        And => "AND",
        As => "AS",
        Asc => "ASC",
        Between => "BETWEEN",
        Bigint => "BIGINT",
        Binary => "BINARY",
        Blob => "BLOB",
        By => "BY",
        Cascade => "CASCADE",
        Case => "CASE",
        Change => "CHANGE",
        Char => "CHAR",
        Character => "CHARACTER",
        Check => "CHECK",
        Collate => "COLLATE",
        Column => "COLUMN",
        Constraint => "CONSTRAINT",
        Convert => "CONVERT",
        Create => "CREATE",
        Cross => "CROSS",
        CurrentDate => "CURRENT_DATE",
        CurrentTime => "CURRENT_TIME",
        CurrentTimestamp => "CURRENT_TIMESTAMP",
        Database => "DATABASE",
        Dec => "DEC",
        Decimal => "DECIMAL",
        Default => "DEFAULT",
        Delete => "DELETE",
        Desc => "DESC",
        Distinct => "DISTINCT",
        Distinctrow => "DISTINCTROW",
        Div => "DIV",
        Double => "DOUBLE",
        Drop => "DROP",
        Else => "ELSE",
        Exists => "EXISTS",
        False => "FALSE",
        Float => "FLOAT",
        Force => "FORCE",
        Foreign => "FOREIGN",
        From => "FROM",
        Fulltext => "FULLTEXT",
        Generated => "GENERATED",
        Group => "GROUP",
        Having => "HAVING",
        If => "IF",
        Ignore => "IGNORE",
        In => "IN",
        Index => "INDEX",
        Inner => "INNER",
        Insert => "INSERT",
        Int => "INT",
        Integer => "INTEGER",
        Into => "INTO",
        Is => "IS",
        Join => "JOIN",
        Key => "KEY",
        Keys => "KEYS",
        Left => "LEFT",
        Like => "LIKE",
        Limit => "LIMIT",
        Linear => "LINEAR",
        Localtime => "LOCALTIME",
        Localtimestamp => "LOCALTIMESTAMP",
        Lock => "LOCK",
        Longblob => "LONGBLOB",
        Longtext => "LONGTEXT",
        Match => "MATCH",
        Maxvalue => "MAXVALUE",
        Mediumblob => "MEDIUMBLOB",
        Mediumint => "MEDIUMINT",
        Mediumtext => "MEDIUMTEXT",
        Mod => "MOD",
        Not => "NOT",
        Null => "NULL",
        Numeric => "NUMERIC",
        On => "ON",
        Optimize => "OPTIMIZE",
        Or => "OR",
        Order => "ORDER",
        Outer => "OUTER",
        Partition => "PARTITION",
        Precision => "PRECISION",
        Primary => "PRIMARY",
        Range => "RANGE",
        Real => "REAL",
        References => "REFERENCES",
        Regexp => "REGEXP",
        Rename => "RENAME",
        Replace => "REPLACE",
        Restrict => "RESTRICT",
        Right => "RIGHT",
        Rlike => "RLIKE",
        Select => "SELECT",
        Set => "SET",
        Smallint => "SMALLINT",
        Spatial => "SPATIAL",
        Stored => "STORED",
        Table => "TABLE",
        Then => "THEN",
        Tinyblob => "TINYBLOB",
        Tinyint => "TINYINT",
        Tinytext => "TINYTEXT",
        To => "TO",
        True => "TRUE",
        Union => "UNION",
        Unique => "UNIQUE",
        Unsigned => "UNSIGNED",
        Update => "UPDATE",
        Using => "USING",
        Values => "VALUES",
        Varbinary => "VARBINARY",
        Varchar => "VARCHAR",
        Virtual => "VIRTUAL",
        When => "WHEN",
        Where => "WHERE",
        With => "WITH",
        Xor => "XOR",
        Zerofill => "ZEROFILL",
    }
    non_reserved {
        Action => "ACTION",
        After => "AFTER",
        Algorithm => "ALGORITHM",
        Always => "ALWAYS",
        Any => "ANY",
        AutoIncrement => "AUTO_INCREMENT",
        AvgRowLength => "AVG_ROW_LENGTH",
        Bit => "BIT",
        Bool => "BOOL",
        Boolean => "BOOLEAN",
        Btree => "BTREE",
        Cast => "CAST",
        Charset => "CHARSET",
        Checksum => "CHECKSUM",
        Coalesce => "COALESCE",
        ColumnFormat => "COLUMN_FORMAT",
        Columns => "COLUMNS",
        Comment => "COMMENT",
        Compact => "COMPACT",
        Compressed => "COMPRESSED",
        Compression => "COMPRESSION",
        Connection => "CONNECTION",
        Copy => "COPY",
        Data => "DATA",
        Date => "DATE",
        Datetime => "DATETIME",
        DelayKeyWrite => "DELAY_KEY_WRITE",
        Directory => "DIRECTORY",
        Disable => "DISABLE",
        Discard => "DISCARD",
        Disk => "DISK",
        Dynamic => "DYNAMIC",
        Enable => "ENABLE",
        Encryption => "ENCRYPTION",
        End => "END",
        Engine => "ENGINE",
        Enum => "ENUM",
        Escape => "ESCAPE",
        Exchange => "EXCHANGE",
        Exclusive => "EXCLUSIVE",
        First => "FIRST",
        Fixed => "FIXED",
        Full => "FULL",
        Hash => "HASH",
        Import => "IMPORT",
        Inplace => "INPLACE",
        InsertMethod => "INSERT_METHOD",
        Instant => "INSTANT",
        Json => "JSON",
        KeyBlockSize => "KEY_BLOCK_SIZE",
        Last => "LAST",
        Less => "LESS",
        List => "LIST",
        MaxRows => "MAX_ROWS",
        Memory => "MEMORY",
        MinRows => "MIN_ROWS",
        Modify => "MODIFY",
        No => "NO",
        None => "NONE",
        Offset => "OFFSET",
        PackKeys => "PACK_KEYS",
        Parser => "PARSER",
        Partial => "PARTIAL",
        Partitioning => "PARTITIONING",
        Partitions => "PARTITIONS",
        Password => "PASSWORD",
        Rebuild => "REBUILD",
        Redundant => "REDUNDANT",
        Remove => "REMOVE",
        Reorganize => "REORGANIZE",
        Repair => "REPAIR",
        Row => "ROW",
        RowFormat => "ROW_FORMAT",
        Shared => "SHARED",
        Signed => "SIGNED",
        Simple => "SIMPLE",
        Some => "SOME",
        Sounds => "SOUNDS",
        StatsAutoRecalc => "STATS_AUTO_RECALC",
        StatsPersistent => "STATS_PERSISTENT",
        StatsSamplePages => "STATS_SAMPLE_PAGES",
        Storage => "STORAGE",
        Subpartition => "SUBPARTITION",
        Subpartitions => "SUBPARTITIONS",
        Tablespace => "TABLESPACE",
        Temporary => "TEMPORARY",
        Text => "TEXT",
        Than => "THAN",
        Time => "TIME",
        Timestamp => "TIMESTAMP",
        Truncate => "TRUNCATE",
        Unknown => "UNKNOWN",
        Upgrade => "UPGRADE",
        Validation => "VALIDATION",
        Without => "WITHOUT",
        Year => "YEAR",
    }
}

impl Keyword {
    /// Keywords of the niladic current-time functions, which may be written
    /// with or without parentheses.
    #[must_use]
    pub const fn is_current_time(&self) -> bool {
        matches!(
            self,
            Self::CurrentTimestamp
                | Self::CurrentDate
                | Self::CurrentTime
                | Self::Localtime
                | Self::Localtimestamp
        )
    }

    /// Whether the keyword, directly followed by `(`, starts a function
    /// call with an arbitrary argument list.
    #[must_use]
    pub const fn names_function(&self) -> bool {
        !self.is_reserved()
            || matches!(
                self,
                Self::If
                    | Self::Replace
                    | Self::Left
                    | Self::Right
                    | Self::Insert
                    | Self::Mod
                    | Self::Char
                    | Self::Database
                    | Self::Values
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_from_str_is_case_insensitive() {
        assert_eq!(Keyword::from_str("ALTER"), Some(Keyword::Alter));
        assert_eq!(Keyword::from_str("alter"), Some(Keyword::Alter));
        assert_eq!(Keyword::from_str("Key_Block_Size"), Some(Keyword::KeyBlockSize));
        assert_eq!(Keyword::from_str("users"), None);
    }

    #[test]
    fn test_keyword_as_str_round_trips() {
        for kw in [
            Keyword::AutoIncrement,
            Keyword::CurrentTimestamp,
            Keyword::Partitioning,
            Keyword::Zerofill,
        ] {
            assert_eq!(Keyword::from_str(kw.as_str()), Some(kw));
        }
    }

    #[test]
    fn test_reserved_split() {
        assert!(Keyword::Add.is_reserved());
        assert!(Keyword::Partition.is_reserved());
        assert!(!Keyword::Comment.is_reserved());
        assert!(!Keyword::Engine.is_reserved());
        assert!(!Keyword::Date.is_reserved());
    }

    #[test]
    fn test_function_name_keywords() {
        assert!(Keyword::If.names_function());
        assert!(Keyword::Replace.names_function());
        assert!(Keyword::Date.names_function());
        assert!(!Keyword::Select.names_function());
        assert!(!Keyword::CurrentTimestamp.names_function());
        assert!(Keyword::CurrentTimestamp.is_current_time());
    }
}
