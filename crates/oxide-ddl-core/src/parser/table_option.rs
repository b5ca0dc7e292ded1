//! Table and partition options.
//!
//! Every option is one row in a static table: the keywords that introduce
//! it, the option it sets, and the shape of its value. Parsing is the same
//! for every row: match the keywords, skip an optional `=`, read the value.

use super::error::Result;
use super::Parser;
use crate::ast::{OptionValue, TableOption, TableOptionKind};
use crate::lexer::{Keyword, TokenKind};

/// What may follow an option's keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueShape {
    /// `DEFAULT`, an identifier, a string, or `BINARY`.
    Name,
    /// `DEFAULT` or an unsigned number.
    Number,
    /// A string literal.
    Text,
    /// `name [STORAGE DISK|MEMORY|DEFAULT]`
    Tablespace,
    /// `(t1, t2, ...)`
    Tables,
}

#[derive(Debug)]
struct TableOptionRule {
    keywords: &'static [Keyword],
    kind: TableOptionKind,
    shape: ValueShape,
    /// Whether the option may be written with a leading `DEFAULT`.
    default_prefix: bool,
}

const fn rule(
    keywords: &'static [Keyword],
    kind: TableOptionKind,
    shape: ValueShape,
) -> TableOptionRule {
    TableOptionRule {
        keywords,
        kind,
        shape,
        default_prefix: false,
    }
}

const fn defaultable(
    keywords: &'static [Keyword],
    kind: TableOptionKind,
    shape: ValueShape,
) -> TableOptionRule {
    TableOptionRule {
        keywords,
        kind,
        shape,
        default_prefix: true,
    }
}

static TABLE_OPTIONS: &[TableOptionRule] = &[
    rule(&[Keyword::Engine], TableOptionKind::Engine, ValueShape::Name),
    rule(
        &[Keyword::AutoIncrement],
        TableOptionKind::AutoIncrement,
        ValueShape::Number,
    ),
    rule(
        &[Keyword::AvgRowLength],
        TableOptionKind::AvgRowLength,
        ValueShape::Number,
    ),
    defaultable(
        &[Keyword::Character, Keyword::Set],
        TableOptionKind::CharacterSet,
        ValueShape::Name,
    ),
    defaultable(
        &[Keyword::Charset],
        TableOptionKind::CharacterSet,
        ValueShape::Name,
    ),
    rule(&[Keyword::Checksum], TableOptionKind::Checksum, ValueShape::Number),
    defaultable(&[Keyword::Collate], TableOptionKind::Collate, ValueShape::Name),
    rule(&[Keyword::Comment], TableOptionKind::Comment, ValueShape::Text),
    rule(
        &[Keyword::Compression],
        TableOptionKind::Compression,
        ValueShape::Text,
    ),
    rule(
        &[Keyword::Connection],
        TableOptionKind::Connection,
        ValueShape::Text,
    ),
    rule(
        &[Keyword::Data, Keyword::Directory],
        TableOptionKind::DataDirectory,
        ValueShape::Text,
    ),
    rule(
        &[Keyword::Index, Keyword::Directory],
        TableOptionKind::IndexDirectory,
        ValueShape::Text,
    ),
    rule(
        &[Keyword::DelayKeyWrite],
        TableOptionKind::DelayKeyWrite,
        ValueShape::Number,
    ),
    rule(
        &[Keyword::Encryption],
        TableOptionKind::Encryption,
        ValueShape::Text,
    ),
    rule(
        &[Keyword::InsertMethod],
        TableOptionKind::InsertMethod,
        ValueShape::Name,
    ),
    rule(
        &[Keyword::KeyBlockSize],
        TableOptionKind::KeyBlockSize,
        ValueShape::Number,
    ),
    rule(&[Keyword::MaxRows], TableOptionKind::MaxRows, ValueShape::Number),
    rule(&[Keyword::MinRows], TableOptionKind::MinRows, ValueShape::Number),
    rule(&[Keyword::PackKeys], TableOptionKind::PackKeys, ValueShape::Number),
    rule(&[Keyword::Password], TableOptionKind::Password, ValueShape::Text),
    rule(&[Keyword::RowFormat], TableOptionKind::RowFormat, ValueShape::Name),
    rule(
        &[Keyword::StatsAutoRecalc],
        TableOptionKind::StatsAutoRecalc,
        ValueShape::Number,
    ),
    rule(
        &[Keyword::StatsPersistent],
        TableOptionKind::StatsPersistent,
        ValueShape::Number,
    ),
    rule(
        &[Keyword::StatsSamplePages],
        TableOptionKind::StatsSamplePages,
        ValueShape::Number,
    ),
    rule(
        &[Keyword::Tablespace],
        TableOptionKind::Tablespace,
        ValueShape::Tablespace,
    ),
    rule(&[Keyword::Union], TableOptionKind::Union, ValueShape::Tables),
];

/// Options allowed on a partition or subpartition definition.
static PARTITION_OPTIONS: &[TableOptionRule] = &[
    rule(
        &[Keyword::Storage, Keyword::Engine],
        TableOptionKind::Engine,
        ValueShape::Name,
    ),
    rule(&[Keyword::Engine], TableOptionKind::Engine, ValueShape::Name),
    rule(&[Keyword::Comment], TableOptionKind::Comment, ValueShape::Text),
    rule(
        &[Keyword::Data, Keyword::Directory],
        TableOptionKind::DataDirectory,
        ValueShape::Text,
    ),
    rule(
        &[Keyword::Index, Keyword::Directory],
        TableOptionKind::IndexDirectory,
        ValueShape::Text,
    ),
    rule(&[Keyword::MaxRows], TableOptionKind::MaxRows, ValueShape::Number),
    rule(&[Keyword::MinRows], TableOptionKind::MinRows, ValueShape::Number),
    rule(
        &[Keyword::Tablespace],
        TableOptionKind::Tablespace,
        ValueShape::Name,
    ),
];

impl Parser<'_> {
    /// Finds the rule whose keywords start at the current token, returning it
    /// with the number of tokens taken by a `DEFAULT` prefix.
    fn match_option(
        &self,
        rules: &'static [TableOptionRule],
    ) -> Option<(&'static TableOptionRule, usize)> {
        let has_default = self.check_keyword(Keyword::Default);
        rules.iter().find_map(|rule| {
            let offset = usize::from(has_default && rule.default_prefix);
            let matched = rule
                .keywords
                .iter()
                .enumerate()
                .all(|(i, keyword)| self.peek_keyword(offset + i, *keyword));
            matched.then_some((rule, offset))
        })
    }

    /// Whether a table option starts at the current token.
    pub(super) fn check_table_option(&self) -> bool {
        self.match_option(TABLE_OPTIONS).is_some()
    }

    /// Whether a partition option starts at the current token.
    pub(super) fn check_partition_option(&self) -> bool {
        self.match_option(PARTITION_OPTIONS).is_some()
    }

    /// Parses a run of table options. With `commas`, options may be
    /// separated by commas as in `CREATE TABLE`.
    pub(super) fn parse_table_options(&mut self, commas: bool) -> Result<Vec<TableOption>> {
        let mut options = Vec::new();
        while self.check_table_option() {
            options.push(self.parse_option(TABLE_OPTIONS)?);
            if commas && self.check(TokenKind::Comma) {
                self.advance();
                if !self.check_table_option() {
                    return Err(self.error_unexpected("table option"));
                }
            }
        }
        Ok(options)
    }

    /// Parses the options of a partition or subpartition definition.
    pub(super) fn parse_partition_options(&mut self) -> Result<Vec<TableOption>> {
        let mut options = Vec::new();
        while self.check_partition_option() {
            options.push(self.parse_option(PARTITION_OPTIONS)?);
        }
        Ok(options)
    }

    fn parse_option(&mut self, rules: &'static [TableOptionRule]) -> Result<TableOption> {
        let Some((rule, offset)) = self.match_option(rules) else {
            return Err(self.error_unexpected("table option"));
        };
        let start = self.start();
        for _ in 0..offset + rule.keywords.len() {
            self.advance();
        }
        self.eat_eq();
        let value = self.parse_option_value(rule.shape)?;
        Ok(TableOption {
            kind: rule.kind,
            value,
            span: self.span_from(start),
        })
    }

    fn parse_option_value(&mut self, shape: ValueShape) -> Result<OptionValue> {
        match shape {
            ValueShape::Name => match self.peek(0) {
                TokenKind::Keyword(Keyword::Default) => {
                    self.advance();
                    Ok(OptionValue::Default)
                }
                TokenKind::String | TokenKind::Keyword(Keyword::Binary) => {
                    Ok(OptionValue::Name(self.advance().lexeme.clone()))
                }
                kind if kind.is_identifier_like() => {
                    Ok(OptionValue::Name(self.advance().lexeme.clone()))
                }
                _ => Err(self.error_unexpected("option value")),
            },
            ValueShape::Number => match self.peek(0) {
                TokenKind::Keyword(Keyword::Default) => {
                    self.advance();
                    Ok(OptionValue::Default)
                }
                TokenKind::Number => Ok(OptionValue::Number(self.advance().lexeme.clone())),
                _ => Err(self.error_expected(&[
                    TokenKind::Number,
                    TokenKind::Keyword(Keyword::Default),
                ])),
            },
            ValueShape::Text => self.parse_string().map(OptionValue::Text),
            ValueShape::Tablespace => {
                let name = self.expect_identifier()?;
                let storage = if self.eat_keyword(Keyword::Storage) {
                    Some(self.parse_storage_medium()?)
                } else {
                    None
                };
                Ok(OptionValue::Tablespace { name, storage })
            }
            ValueShape::Tables => self
                .parse_parenthesized(|p| p.parse_comma_separated(Self::parse_table_name))
                .map(OptionValue::Tables),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{StorageMedium, TableName};
    use crate::lexer::{Lexer, Token};

    fn tokens(sql: &str) -> Vec<Token> {
        Lexer::new(sql).tokenize()
    }

    fn options(sql: &str, commas: bool) -> Vec<(TableOptionKind, OptionValue)> {
        let tokens = tokens(sql);
        let mut parser = Parser::new(&tokens);
        let options = parser.parse_table_options(commas).unwrap();
        assert!(parser.is_at_end(), "trailing tokens in {sql}");
        options.into_iter().map(|o| (o.kind, o.value)).collect()
    }

    #[test]
    fn test_common_options() {
        assert_eq!(
            options(
                "ENGINE=InnoDB AUTO_INCREMENT = 10 DEFAULT CHARSET=utf8mb4 COMMENT 'users'",
                false
            ),
            vec![
                (TableOptionKind::Engine, OptionValue::Name(String::from("InnoDB"))),
                (TableOptionKind::AutoIncrement, OptionValue::Number(String::from("10"))),
                (TableOptionKind::CharacterSet, OptionValue::Name(String::from("utf8mb4"))),
                (TableOptionKind::Comment, OptionValue::Text(String::from("users"))),
            ]
        );
    }

    #[test]
    fn test_comma_separated_options() {
        let parsed = options(
            "ENGINE = MyISAM, DEFAULT CHARACTER SET latin1, ROW_FORMAT = DEFAULT",
            true,
        );
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[2], (TableOptionKind::RowFormat, OptionValue::Default));
    }

    #[test]
    fn test_commas_not_consumed_without_flag() {
        let tokens = tokens("ENGINE = MyISAM, ADD COLUMN a INT");
        let mut parser = Parser::new(&tokens);
        assert_eq!(parser.parse_table_options(false).unwrap().len(), 1);
        assert!(parser.check(TokenKind::Comma));
    }

    #[test]
    fn test_directory_and_tablespace() {
        assert_eq!(
            options("DATA DIRECTORY = '/d' TABLESPACE ts STORAGE DISK", false),
            vec![
                (TableOptionKind::DataDirectory, OptionValue::Text(String::from("/d"))),
                (
                    TableOptionKind::Tablespace,
                    OptionValue::Tablespace {
                        name: String::from("ts"),
                        storage: Some(StorageMedium::Disk),
                    }
                ),
            ]
        );
    }

    #[test]
    fn test_union_tables() {
        assert_eq!(
            options("UNION = (t1, db.t2) INSERT_METHOD = LAST", false),
            vec![
                (
                    TableOptionKind::Union,
                    OptionValue::Tables(vec![
                        TableName::new("t1"),
                        TableName::qualified("db", "t2")
                    ])
                ),
                (TableOptionKind::InsertMethod, OptionValue::Name(String::from("LAST"))),
            ]
        );
    }

    #[test]
    fn test_default_alone_is_not_an_option() {
        let tokens = tokens("DEFAULT 1");
        let parser = Parser::new(&tokens);
        assert!(!parser.check_table_option());
    }

    #[test]
    fn test_partition_options() {
        let tokens = tokens("STORAGE ENGINE = InnoDB MAX_ROWS = 100 AUTO_INCREMENT = 1");
        let mut parser = Parser::new(&tokens);
        let options = parser.parse_partition_options().unwrap();
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].kind, TableOptionKind::Engine);
        assert!(parser.check_keyword(Keyword::AutoIncrement));
    }

    #[test]
    fn test_number_option_rejects_text() {
        let tokens = tokens("MAX_ROWS = 'many'");
        let mut parser = Parser::new(&tokens);
        let err = parser.parse_table_options(false).unwrap_err();
        assert_eq!(err.found, TokenKind::String);
        assert_eq!(err.expected.len(), 2);
    }
}
