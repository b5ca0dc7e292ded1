//! Indexes, key constraints, foreign key references, and the
//! `ALGORITHM` / `LOCK` clauses shared by ALTER TABLE and the index
//! statements.

use super::error::{ParseError, Result};
use super::Parser;
use crate::ast::{
    AlgorithmOption, ConstraintDefinition, ConstraintKind, IndexDefinition, IndexKind,
    IndexOptions, IndexType, KeyPart, LockOption, MatchMode, ReferenceAction,
    ReferenceDefinition,
};
use crate::lexer::{Keyword, TokenKind};

impl Parser<'_> {
    /// `(col [(len)] [ASC|DESC], ...)`
    pub(super) fn parse_key_parts(&mut self) -> Result<Vec<KeyPart>> {
        self.parse_parenthesized(|p| p.parse_comma_separated(Self::parse_key_part))
    }

    fn parse_key_part(&mut self) -> Result<KeyPart> {
        let column = self.expect_identifier()?;
        let length = self.parse_optional_length()?;
        let order = self.parse_order_direction();
        Ok(KeyPart {
            column,
            length,
            order,
        })
    }

    /// `USING BTREE|HASH`, if present.
    pub(super) fn parse_index_type(&mut self) -> Result<Option<IndexType>> {
        if !self.eat_keyword(Keyword::Using) {
            return Ok(None);
        }
        let index_type = match self.expect_one_of(&[Keyword::Btree, Keyword::Hash])? {
            Keyword::Btree => IndexType::Btree,
            _ => IndexType::Hash,
        };
        Ok(Some(index_type))
    }

    /// Trailing index options, in any order.
    pub(super) fn parse_index_options(&mut self) -> Result<IndexOptions> {
        let mut options = IndexOptions::default();
        loop {
            match self.peek(0) {
                TokenKind::Keyword(Keyword::KeyBlockSize) => {
                    self.advance();
                    self.eat_eq();
                    options.key_block_size = Some(self.parse_u64()?);
                }
                TokenKind::Keyword(Keyword::Using) => {
                    options.using = self.parse_index_type()?;
                }
                TokenKind::Keyword(Keyword::With) if self.peek_keyword(1, Keyword::Parser) => {
                    self.advance();
                    self.advance();
                    options.parser = Some(self.expect_identifier()?);
                }
                TokenKind::Keyword(Keyword::Comment) => {
                    self.advance();
                    options.comment = Some(self.parse_string()?);
                }
                _ => return Ok(options),
            }
        }
    }

    /// An index name, if one is written before `USING` or the key parts.
    fn parse_optional_index_name(&mut self) -> Result<Option<String>> {
        if self.check_identifier() {
            self.expect_identifier().map(Some)
        } else {
            Ok(None)
        }
    }

    /// `{INDEX|KEY} [name] [USING type] (key_parts) [options]`, or the same
    /// with a leading `FULLTEXT` / `SPATIAL` and an optional `INDEX|KEY`.
    pub(super) fn parse_index_definition(&mut self) -> Result<IndexDefinition> {
        let start = self.start();
        let kind = match self.expect_one_of(&[
            Keyword::Index,
            Keyword::Key,
            Keyword::Fulltext,
            Keyword::Spatial,
        ])? {
            Keyword::Fulltext => IndexKind::Fulltext,
            Keyword::Spatial => IndexKind::Spatial,
            _ => IndexKind::Plain,
        };
        if kind != IndexKind::Plain && !self.eat_keyword(Keyword::Index) {
            self.eat_keyword(Keyword::Key);
        }

        let name = self.parse_optional_index_name()?;
        let index_type = self.parse_index_type()?;
        let key_parts = self.parse_key_parts()?;
        let options = self.parse_index_options()?;

        Ok(IndexDefinition {
            kind,
            name,
            index_type,
            key_parts,
            options,
            span: self.span_from(start),
        })
    }

    /// `[CONSTRAINT [symbol]] {PRIMARY KEY | UNIQUE | FOREIGN KEY | CHECK} ...`
    pub(super) fn parse_constraint_definition(&mut self) -> Result<ConstraintDefinition> {
        let start = self.start();
        let name = if self.eat_keyword(Keyword::Constraint) && self.check_identifier() {
            Some(self.expect_identifier()?)
        } else {
            None
        };

        let kind = match self.peek(0) {
            TokenKind::Keyword(Keyword::Primary) => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                let index_type = self.parse_index_type()?;
                let key_parts = self.parse_key_parts()?;
                let options = self.parse_index_options()?;
                ConstraintKind::PrimaryKey {
                    index_type,
                    key_parts,
                    options,
                }
            }
            TokenKind::Keyword(Keyword::Unique) => {
                self.advance();
                if !self.eat_keyword(Keyword::Index) {
                    self.eat_keyword(Keyword::Key);
                }
                let index_name = self.parse_optional_index_name()?;
                let index_type = self.parse_index_type()?;
                let key_parts = self.parse_key_parts()?;
                let options = self.parse_index_options()?;
                ConstraintKind::Unique {
                    index_name,
                    index_type,
                    key_parts,
                    options,
                }
            }
            TokenKind::Keyword(Keyword::Foreign) => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                let index_name = self.parse_optional_index_name()?;
                let key_parts = self.parse_key_parts()?;
                let reference = self.parse_reference_definition()?;
                ConstraintKind::ForeignKey {
                    index_name,
                    key_parts,
                    reference,
                }
            }
            TokenKind::Keyword(Keyword::Check) => {
                self.advance();
                ConstraintKind::Check(self.parse_parenthesized(Self::parse_expr)?)
            }
            _ => {
                return Err(self.error_expected(&[
                    TokenKind::Keyword(Keyword::Primary),
                    TokenKind::Keyword(Keyword::Unique),
                    TokenKind::Keyword(Keyword::Foreign),
                    TokenKind::Keyword(Keyword::Check),
                ]));
            }
        };

        Ok(ConstraintDefinition {
            name,
            kind,
            span: self.span_from(start),
        })
    }

    /// `REFERENCES table (key_parts) [MATCH ...] [ON DELETE action] [ON UPDATE action]`.
    ///
    /// Each of `ON DELETE` and `ON UPDATE` may appear once, in either order.
    pub(super) fn parse_reference_definition(&mut self) -> Result<ReferenceDefinition> {
        let start = self.start();
        self.expect_keyword(Keyword::References)?;
        let table = self.parse_table_name()?;
        let key_parts = self.parse_key_parts()?;

        let match_mode = if self.eat_keyword(Keyword::Match) {
            Some(
                match self.expect_one_of(&[Keyword::Full, Keyword::Partial, Keyword::Simple])? {
                    Keyword::Full => MatchMode::Full,
                    Keyword::Partial => MatchMode::Partial,
                    _ => MatchMode::Simple,
                },
            )
        } else {
            None
        };

        let mut on_delete = None;
        let mut on_update = None;
        while self.check_keyword(Keyword::On) {
            self.advance();
            let event = self.current().clone();
            let slot = match self.expect_one_of(&[Keyword::Delete, Keyword::Update])? {
                Keyword::Delete => &mut on_delete,
                _ => &mut on_update,
            };
            if slot.is_some() {
                return Err(ParseError::malformed_reference(
                    &format!("ON {} given more than once", event.lexeme.to_ascii_uppercase()),
                    &event,
                ));
            }
            *slot = Some(self.parse_reference_action()?);
        }

        Ok(ReferenceDefinition {
            table,
            key_parts,
            match_mode,
            on_update,
            on_delete,
            span: self.span_from(start),
        })
    }

    fn parse_reference_action(&mut self) -> Result<ReferenceAction> {
        Ok(
            match self.expect_one_of(&[
                Keyword::Restrict,
                Keyword::Cascade,
                Keyword::Set,
                Keyword::No,
            ])? {
                Keyword::Restrict => ReferenceAction::Restrict,
                Keyword::Cascade => ReferenceAction::Cascade,
                Keyword::Set => {
                    match self.expect_one_of(&[Keyword::Null, Keyword::Default])? {
                        Keyword::Null => ReferenceAction::SetNull,
                        _ => ReferenceAction::SetDefault,
                    }
                }
                _ => {
                    self.expect_keyword(Keyword::Action)?;
                    ReferenceAction::NoAction
                }
            },
        )
    }

    /// `ALGORITHM [=] {DEFAULT|INPLACE|COPY|INSTANT}`
    pub(super) fn parse_algorithm_option(&mut self) -> Result<AlgorithmOption> {
        self.expect_keyword(Keyword::Algorithm)?;
        self.eat_eq();
        Ok(
            match self.expect_one_of(&[
                Keyword::Default,
                Keyword::Inplace,
                Keyword::Copy,
                Keyword::Instant,
            ])? {
                Keyword::Default => AlgorithmOption::Default,
                Keyword::Inplace => AlgorithmOption::Inplace,
                Keyword::Copy => AlgorithmOption::Copy,
                _ => AlgorithmOption::Instant,
            },
        )
    }

    /// `LOCK [=] {DEFAULT|NONE|SHARED|EXCLUSIVE}`
    pub(super) fn parse_lock_option(&mut self) -> Result<LockOption> {
        self.expect_keyword(Keyword::Lock)?;
        self.eat_eq();
        Ok(
            match self.expect_one_of(&[
                Keyword::Default,
                Keyword::None,
                Keyword::Shared,
                Keyword::Exclusive,
            ])? {
                Keyword::Default => LockOption::Default,
                Keyword::None => LockOption::None,
                Keyword::Shared => LockOption::Shared,
                _ => LockOption::Exclusive,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{OrderDirection, TableName};
    use crate::lexer::{Lexer, Token};
    use crate::parser::ParseErrorKind;

    fn tokens(sql: &str) -> Vec<Token> {
        Lexer::new(sql).tokenize()
    }

    fn run<T>(sql: &str, f: impl FnOnce(&mut Parser<'_>) -> Result<T>) -> Result<T> {
        let tokens = tokens(sql);
        let mut parser = Parser::new(&tokens);
        let value = f(&mut parser)?;
        assert!(parser.is_at_end(), "trailing tokens in {sql}");
        Ok(value)
    }

    #[test]
    fn test_index_definition() {
        let index = run(
            "KEY idx_name (last_name(10) DESC, first_name) USING BTREE COMMENT 'names'",
            |p| p.parse_index_definition(),
        )
        .unwrap();
        assert_eq!(index.kind, IndexKind::Plain);
        assert_eq!(index.name.as_deref(), Some("idx_name"));
        assert_eq!(index.key_parts[0].length, Some(10));
        assert_eq!(index.key_parts[0].order, Some(OrderDirection::Desc));
        assert_eq!(index.options.using, Some(IndexType::Btree));
        assert_eq!(index.options.comment.as_deref(), Some("names"));
    }

    #[test]
    fn test_fulltext_with_parser() {
        let index = run(
            "FULLTEXT INDEX ft (body) WITH PARSER ngram KEY_BLOCK_SIZE = 8",
            |p| p.parse_index_definition(),
        )
        .unwrap();
        assert_eq!(index.kind, IndexKind::Fulltext);
        assert_eq!(index.options.parser.as_deref(), Some("ngram"));
        assert_eq!(index.options.key_block_size, Some(8));
    }

    #[test]
    fn test_unnamed_index_with_type() {
        let index = run("INDEX USING HASH (a)", |p| p.parse_index_definition()).unwrap();
        assert_eq!(index.name, None);
        assert_eq!(index.index_type, Some(IndexType::Hash));
    }

    #[test]
    fn test_primary_key_constraint() {
        let constraint = run(
            "CONSTRAINT pk PRIMARY KEY (id)",
            |p| p.parse_constraint_definition(),
        )
        .unwrap();
        assert_eq!(constraint.name.as_deref(), Some("pk"));
        assert!(matches!(
            constraint.kind,
            ConstraintKind::PrimaryKey { ref key_parts, .. } if key_parts == &[KeyPart::column("id")]
        ));
    }

    #[test]
    fn test_foreign_key_constraint() {
        let constraint = run(
            "CONSTRAINT fk_user FOREIGN KEY (user_id) REFERENCES db.users (id) MATCH FULL ON UPDATE CASCADE ON DELETE SET NULL",
            |p| p.parse_constraint_definition(),
        )
        .unwrap();
        let ConstraintKind::ForeignKey { reference, .. } = constraint.kind else {
            panic!("not a foreign key");
        };
        assert_eq!(reference.table, TableName::qualified("db", "users"));
        assert_eq!(reference.match_mode, Some(MatchMode::Full));
        assert_eq!(reference.on_update, Some(ReferenceAction::Cascade));
        assert_eq!(reference.on_delete, Some(ReferenceAction::SetNull));
    }

    #[test]
    fn test_bare_constraint_keyword() {
        let constraint =
            run("CONSTRAINT UNIQUE KEY uk (email)", |p| p.parse_constraint_definition()).unwrap();
        assert_eq!(constraint.name, None);
        assert!(matches!(
            constraint.kind,
            ConstraintKind::Unique { index_name: Some(ref n), .. } if n == "uk"
        ));
    }

    #[test]
    fn test_duplicate_on_delete_is_malformed() {
        let err = run(
            "REFERENCES t (id) ON DELETE CASCADE ON DELETE RESTRICT",
            |p| p.parse_reference_definition(),
        )
        .unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MalformedReferenceOptions);
        assert_eq!(err.lexeme, "DELETE");
    }

    #[test]
    fn test_reference_actions() {
        let reference = run(
            "REFERENCES t (id) ON DELETE NO ACTION ON UPDATE SET DEFAULT",
            |p| p.parse_reference_definition(),
        )
        .unwrap();
        assert_eq!(reference.on_delete, Some(ReferenceAction::NoAction));
        assert_eq!(reference.on_update, Some(ReferenceAction::SetDefault));
    }

    #[test]
    fn test_algorithm_and_lock() {
        assert_eq!(
            run("ALGORITHM = INPLACE", |p| p.parse_algorithm_option()).unwrap(),
            AlgorithmOption::Inplace
        );
        assert_eq!(
            run("LOCK NONE", |p| p.parse_lock_option()).unwrap(),
            LockOption::None
        );
        let err = run("LOCK = FAST", |p| p.parse_lock_option()).unwrap_err();
        assert_eq!(err.expected.len(), 4);
    }
}
