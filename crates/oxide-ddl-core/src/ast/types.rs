//! Column data types.

use core::fmt;

use super::{write_ident, write_quoted};

/// Integer type keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum IntegerKind {
    Tinyint,
    Smallint,
    Mediumint,
    Int,
    Integer,
    Bigint,
}

/// Fixed and floating point type keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DecimalKind {
    Decimal,
    Dec,
    Numeric,
    Fixed,
    Real,
    Double,
    DoublePrecision,
    Float,
}

/// Date and time type keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DateTimeKind {
    Date,
    Time,
    Datetime,
    Timestamp,
}

/// `CHAR` or `VARCHAR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CharKind {
    Char,
    Varchar,
}

/// Blob sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum BlobKind {
    Tinyblob,
    Blob,
    Mediumblob,
    Longblob,
}

/// Text sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TextKind {
    Tinytext,
    Text,
    Mediumtext,
    Longtext,
}

/// `ENUM` or `SET`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum EnumKind {
    Enum,
    Set,
}

/// Coarse grouping of data types. Column options are gated per family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TypeFamily {
    Bit,
    Integer,
    Decimal,
    DateTime,
    Year,
    Char,
    Binary,
    Blob,
    Text,
    Enum,
    Json,
}

impl TypeFamily {
    /// Lower-case name used in diagnostics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bit => "bit",
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::DateTime => "date/time",
            Self::Year => "year",
            Self::Char => "char",
            Self::Binary => "binary",
            Self::Blob => "blob",
            Self::Text => "text",
            Self::Enum => "enum/set",
            Self::Json => "json",
        }
    }
}

/// MySQL column data types.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DataType {
    /// `BIT[(n)]`
    Bit(Option<u32>),
    /// `TINYINT` .. `BIGINT` with display width and attributes.
    Integer {
        kind: IntegerKind,
        width: Option<u32>,
        unsigned: bool,
        zerofill: bool,
    },
    /// `BOOL` / `BOOLEAN`
    Bool,
    /// Fixed and floating point types.
    Decimal {
        kind: DecimalKind,
        precision: Option<u32>,
        scale: Option<u32>,
        unsigned: bool,
        zerofill: bool,
    },
    /// `DATE`, or `TIME`/`DATETIME`/`TIMESTAMP` with fractional seconds precision.
    DateTime {
        kind: DateTimeKind,
        fsp: Option<u32>,
    },
    /// `YEAR[(4)]`
    Year(Option<u32>),
    /// `CHAR` / `VARCHAR`
    Char {
        kind: CharKind,
        length: Option<u32>,
        binary: bool,
        charset: Option<String>,
        collation: Option<String>,
    },
    /// `BINARY` / `VARBINARY`
    Binary {
        varying: bool,
        length: Option<u32>,
    },
    /// Blob family; only `BLOB` takes a length.
    Blob {
        kind: BlobKind,
        length: Option<u32>,
    },
    /// Text family; only `TEXT` takes a length.
    Text {
        kind: TextKind,
        length: Option<u32>,
        binary: bool,
        charset: Option<String>,
        collation: Option<String>,
    },
    /// `ENUM('a', ...)` / `SET('a', ...)`
    Enum {
        kind: EnumKind,
        values: Vec<String>,
        charset: Option<String>,
        collation: Option<String>,
    },
    /// `JSON`
    Json,
}

impl DataType {
    /// Returns the family this type belongs to.
    #[must_use]
    pub const fn family(&self) -> TypeFamily {
        match self {
            Self::Bit(_) => TypeFamily::Bit,
            Self::Integer { .. } | Self::Bool => TypeFamily::Integer,
            Self::Decimal { .. } => TypeFamily::Decimal,
            Self::DateTime { .. } => TypeFamily::DateTime,
            Self::Year(_) => TypeFamily::Year,
            Self::Char { .. } => TypeFamily::Char,
            Self::Binary { .. } => TypeFamily::Binary,
            Self::Blob { .. } => TypeFamily::Blob,
            Self::Text { .. } => TypeFamily::Text,
            Self::Enum { .. } => TypeFamily::Enum,
            Self::Json => TypeFamily::Json,
        }
    }

    /// Whether `AUTO_INCREMENT` may follow this type.
    #[must_use]
    pub const fn supports_auto_increment(&self) -> bool {
        matches!(self.family(), TypeFamily::Integer | TypeFamily::Decimal)
    }

    /// Whether `ON UPDATE CURRENT_TIMESTAMP` may follow this type.
    #[must_use]
    pub const fn supports_on_update(&self) -> bool {
        matches!(
            self,
            Self::DateTime {
                kind: DateTimeKind::Datetime | DateTimeKind::Timestamp,
                ..
            }
        )
    }

    /// Whether a `COLLATE` column option may follow this type.
    #[must_use]
    pub const fn supports_collation(&self) -> bool {
        matches!(
            self.family(),
            TypeFamily::Char | TypeFamily::Text | TypeFamily::Enum
        )
    }

    /// Returns the SQL representation of the data type.
    #[must_use]
    pub fn to_sql(&self) -> String {
        self.to_string()
    }
}

fn write_length(f: &mut fmt::Formatter<'_>, length: Option<u32>) -> fmt::Result {
    match length {
        Some(n) => write!(f, "({n})"),
        None => Ok(()),
    }
}

fn write_charset_collation(
    f: &mut fmt::Formatter<'_>,
    binary: bool,
    charset: Option<&String>,
    collation: Option<&String>,
) -> fmt::Result {
    if binary {
        f.write_str(" BINARY")?;
    }
    if let Some(cs) = charset {
        f.write_str(" CHARACTER SET ")?;
        write_ident(f, cs)?;
    }
    if let Some(collation) = collation {
        f.write_str(" COLLATE ")?;
        write_ident(f, collation)?;
    }
    Ok(())
}

fn write_numeric_attrs(f: &mut fmt::Formatter<'_>, unsigned: bool, zerofill: bool) -> fmt::Result {
    if unsigned {
        f.write_str(" UNSIGNED")?;
    }
    if zerofill {
        f.write_str(" ZEROFILL")?;
    }
    Ok(())
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bit(length) => {
                f.write_str("BIT")?;
                write_length(f, *length)
            }
            Self::Integer {
                kind,
                width,
                unsigned,
                zerofill,
            } => {
                f.write_str(match kind {
                    IntegerKind::Tinyint => "TINYINT",
                    IntegerKind::Smallint => "SMALLINT",
                    IntegerKind::Mediumint => "MEDIUMINT",
                    IntegerKind::Int => "INT",
                    IntegerKind::Integer => "INTEGER",
                    IntegerKind::Bigint => "BIGINT",
                })?;
                write_length(f, *width)?;
                write_numeric_attrs(f, *unsigned, *zerofill)
            }
            Self::Bool => f.write_str("BOOLEAN"),
            Self::Decimal {
                kind,
                precision,
                scale,
                unsigned,
                zerofill,
            } => {
                f.write_str(match kind {
                    DecimalKind::Decimal => "DECIMAL",
                    DecimalKind::Dec => "DEC",
                    DecimalKind::Numeric => "NUMERIC",
                    DecimalKind::Fixed => "FIXED",
                    DecimalKind::Real => "REAL",
                    DecimalKind::Double => "DOUBLE",
                    DecimalKind::DoublePrecision => "DOUBLE PRECISION",
                    DecimalKind::Float => "FLOAT",
                })?;
                match (precision, scale) {
                    (Some(p), Some(s)) => write!(f, "({p}, {s})")?,
                    (Some(p), None) => write!(f, "({p})")?,
                    _ => {}
                }
                write_numeric_attrs(f, *unsigned, *zerofill)
            }
            Self::DateTime { kind, fsp } => {
                f.write_str(match kind {
                    DateTimeKind::Date => "DATE",
                    DateTimeKind::Time => "TIME",
                    DateTimeKind::Datetime => "DATETIME",
                    DateTimeKind::Timestamp => "TIMESTAMP",
                })?;
                write_length(f, *fsp)
            }
            Self::Year(length) => {
                f.write_str("YEAR")?;
                write_length(f, *length)
            }
            Self::Char {
                kind,
                length,
                binary,
                charset,
                collation,
            } => {
                f.write_str(match kind {
                    CharKind::Char => "CHAR",
                    CharKind::Varchar => "VARCHAR",
                })?;
                write_length(f, *length)?;
                write_charset_collation(f, *binary, charset.as_ref(), collation.as_ref())
            }
            Self::Binary { varying, length } => {
                f.write_str(if *varying { "VARBINARY" } else { "BINARY" })?;
                write_length(f, *length)
            }
            Self::Blob { kind, length } => {
                f.write_str(match kind {
                    BlobKind::Tinyblob => "TINYBLOB",
                    BlobKind::Blob => "BLOB",
                    BlobKind::Mediumblob => "MEDIUMBLOB",
                    BlobKind::Longblob => "LONGBLOB",
                })?;
                write_length(f, *length)
            }
            Self::Text {
                kind,
                length,
                binary,
                charset,
                collation,
            } => {
                f.write_str(match kind {
                    TextKind::Tinytext => "TINYTEXT",
                    TextKind::Text => "TEXT",
                    TextKind::Mediumtext => "MEDIUMTEXT",
                    TextKind::Longtext => "LONGTEXT",
                })?;
                write_length(f, *length)?;
                write_charset_collation(f, *binary, charset.as_ref(), collation.as_ref())
            }
            Self::Enum {
                kind,
                values,
                charset,
                collation,
            } => {
                f.write_str(match kind {
                    EnumKind::Enum => "ENUM(",
                    EnumKind::Set => "SET(",
                })?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_quoted(f, value)?;
                }
                f.write_str(")")?;
                write_charset_collation(f, false, charset.as_ref(), collation.as_ref())
            }
            Self::Json => f.write_str("JSON"),
        }
    }
}
