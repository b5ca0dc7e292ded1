//! Column data types.

use super::error::Result;
use super::Parser;
use crate::ast::{
    BlobKind, CharKind, DataType, DateTimeKind, DecimalKind, EnumKind, IntegerKind, TextKind,
};
use crate::lexer::{Keyword, TokenKind};

/// `BINARY`, `CHARACTER SET` and `COLLATE` written after a string type.
#[derive(Debug, Default)]
struct StringAttributes {
    binary: bool,
    charset: Option<String>,
    collation: Option<String>,
}

impl Parser<'_> {
    /// Parses a data type, dispatching on its leading keyword.
    pub(super) fn parse_data_type(&mut self) -> Result<DataType> {
        let Some(keyword) = self.current().as_keyword() else {
            return Err(self.error_unexpected("data type"));
        };

        let data_type = match keyword {
            Keyword::Bit => {
                self.advance();
                DataType::Bit(self.parse_optional_length()?)
            }
            Keyword::Tinyint
            | Keyword::Smallint
            | Keyword::Mediumint
            | Keyword::Int
            | Keyword::Integer
            | Keyword::Bigint => {
                self.advance();
                let kind = match keyword {
                    Keyword::Tinyint => IntegerKind::Tinyint,
                    Keyword::Smallint => IntegerKind::Smallint,
                    Keyword::Mediumint => IntegerKind::Mediumint,
                    Keyword::Int => IntegerKind::Int,
                    Keyword::Integer => IntegerKind::Integer,
                    _ => IntegerKind::Bigint,
                };
                let width = self.parse_optional_length()?;
                let (unsigned, zerofill) = self.parse_numeric_attributes();
                DataType::Integer {
                    kind,
                    width,
                    unsigned,
                    zerofill,
                }
            }
            Keyword::Bool | Keyword::Boolean => {
                self.advance();
                DataType::Bool
            }
            Keyword::Decimal
            | Keyword::Dec
            | Keyword::Numeric
            | Keyword::Fixed
            | Keyword::Real
            | Keyword::Double
            | Keyword::Float => {
                self.advance();
                let kind = match keyword {
                    Keyword::Decimal => DecimalKind::Decimal,
                    Keyword::Dec => DecimalKind::Dec,
                    Keyword::Numeric => DecimalKind::Numeric,
                    Keyword::Fixed => DecimalKind::Fixed,
                    Keyword::Real => DecimalKind::Real,
                    Keyword::Double => {
                        if self.eat_keyword(Keyword::Precision) {
                            DecimalKind::DoublePrecision
                        } else {
                            DecimalKind::Double
                        }
                    }
                    _ => DecimalKind::Float,
                };
                let (precision, scale) = self.parse_optional_precision_scale()?;
                let (unsigned, zerofill) = self.parse_numeric_attributes();
                DataType::Decimal {
                    kind,
                    precision,
                    scale,
                    unsigned,
                    zerofill,
                }
            }
            Keyword::Date => {
                self.advance();
                DataType::DateTime {
                    kind: DateTimeKind::Date,
                    fsp: None,
                }
            }
            Keyword::Time | Keyword::Datetime | Keyword::Timestamp => {
                self.advance();
                let kind = match keyword {
                    Keyword::Time => DateTimeKind::Time,
                    Keyword::Datetime => DateTimeKind::Datetime,
                    _ => DateTimeKind::Timestamp,
                };
                DataType::DateTime {
                    kind,
                    fsp: self.parse_optional_length()?,
                }
            }
            Keyword::Year => {
                self.advance();
                DataType::Year(self.parse_optional_length()?)
            }
            Keyword::Char | Keyword::Varchar => {
                self.advance();
                let kind = if keyword == Keyword::Char {
                    CharKind::Char
                } else {
                    CharKind::Varchar
                };
                let length = self.parse_optional_length()?;
                let attributes = self.parse_string_attributes()?;
                DataType::Char {
                    kind,
                    length,
                    binary: attributes.binary,
                    charset: attributes.charset,
                    collation: attributes.collation,
                }
            }
            Keyword::Binary | Keyword::Varbinary => {
                self.advance();
                DataType::Binary {
                    varying: keyword == Keyword::Varbinary,
                    length: self.parse_optional_length()?,
                }
            }
            Keyword::Tinyblob | Keyword::Mediumblob | Keyword::Longblob => {
                self.advance();
                let kind = match keyword {
                    Keyword::Tinyblob => BlobKind::Tinyblob,
                    Keyword::Mediumblob => BlobKind::Mediumblob,
                    _ => BlobKind::Longblob,
                };
                DataType::Blob { kind, length: None }
            }
            Keyword::Blob => {
                self.advance();
                DataType::Blob {
                    kind: BlobKind::Blob,
                    length: self.parse_optional_length()?,
                }
            }
            Keyword::Tinytext | Keyword::Text | Keyword::Mediumtext | Keyword::Longtext => {
                self.advance();
                let kind = match keyword {
                    Keyword::Tinytext => TextKind::Tinytext,
                    Keyword::Mediumtext => TextKind::Mediumtext,
                    Keyword::Longtext => TextKind::Longtext,
                    _ => TextKind::Text,
                };
                let length = if kind == TextKind::Text {
                    self.parse_optional_length()?
                } else {
                    None
                };
                let attributes = self.parse_string_attributes()?;
                DataType::Text {
                    kind,
                    length,
                    binary: attributes.binary,
                    charset: attributes.charset,
                    collation: attributes.collation,
                }
            }
            Keyword::Enum | Keyword::Set => {
                self.advance();
                let kind = if keyword == Keyword::Enum {
                    EnumKind::Enum
                } else {
                    EnumKind::Set
                };
                let values =
                    self.parse_parenthesized(|p| p.parse_comma_separated(Self::parse_string))?;
                let attributes = self.parse_string_attributes()?;
                DataType::Enum {
                    kind,
                    values,
                    charset: attributes.charset,
                    collation: attributes.collation,
                }
            }
            Keyword::Json => {
                self.advance();
                DataType::Json
            }
            _ => return Err(self.error_unexpected("data type")),
        };

        Ok(data_type)
    }

    /// `[SIGNED|UNSIGNED] [ZEROFILL]` in any order.
    fn parse_numeric_attributes(&mut self) -> (bool, bool) {
        let mut unsigned = false;
        let mut zerofill = false;
        loop {
            if self.eat_keyword(Keyword::Unsigned) {
                unsigned = true;
            } else if self.eat_keyword(Keyword::Signed) {
                unsigned = false;
            } else if self.eat_keyword(Keyword::Zerofill) {
                zerofill = true;
            } else {
                return (unsigned, zerofill);
            }
        }
    }

    /// Parses optional `(precision [, scale])`.
    fn parse_optional_precision_scale(&mut self) -> Result<(Option<u32>, Option<u32>)> {
        if !self.eat(TokenKind::LeftParen) {
            return Ok((None, None));
        }
        let precision = self.parse_u32()?;
        let scale = if self.eat(TokenKind::Comma) {
            Some(self.parse_u32()?)
        } else {
            None
        };
        self.expect(TokenKind::RightParen)?;
        Ok((Some(precision), scale))
    }

    fn parse_string_attributes(&mut self) -> Result<StringAttributes> {
        let mut attributes = StringAttributes::default();
        loop {
            if self.eat_keyword(Keyword::Binary) {
                attributes.binary = true;
            } else if self.eat_keyword(Keyword::Collate) {
                attributes.collation = Some(self.parse_collation_name()?);
            } else if let Some(charset) = self.parse_charset_clause()? {
                attributes.charset = Some(charset);
            } else {
                return Ok(attributes);
            }
        }
    }
}
