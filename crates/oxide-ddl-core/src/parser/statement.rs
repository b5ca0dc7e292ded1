//! Statement dispatch and the CREATE / DROP / TRUNCATE statements.

use tracing::debug;

use super::error::Result;
use super::Parser;
use crate::ast::{
    AlgorithmOption, AlterTableStatement, CreateIndexStatement, CreateTableQuery,
    CreateTableStatement, DropBehavior, DropIndexStatement, DropTableStatement,
    DuplicateHandling, IndexKind, LockOption, Statement, TableElement, TruncateTableStatement,
};
use crate::lexer::{Keyword, TokenKind};

impl Parser<'_> {
    /// Dispatches on the leading keyword(s) of a statement.
    pub(super) fn parse_ddl_statement(&mut self) -> Result<Statement> {
        let statement = match self.peek(0) {
            TokenKind::Keyword(Keyword::Create) => match self.peek(1) {
                TokenKind::Keyword(Keyword::Table | Keyword::Temporary) => {
                    debug!(statement = "CREATE TABLE", "dispatching");
                    Statement::CreateTable(self.parse_create_table()?)
                }
                TokenKind::Keyword(
                    Keyword::Index | Keyword::Unique | Keyword::Fulltext | Keyword::Spatial,
                ) => {
                    debug!(statement = "CREATE INDEX", "dispatching");
                    Statement::CreateIndex(self.parse_create_index()?)
                }
                _ => {
                    self.advance();
                    return Err(self.error_expected(&[
                        TokenKind::Keyword(Keyword::Table),
                        TokenKind::Keyword(Keyword::Temporary),
                        TokenKind::Keyword(Keyword::Index),
                        TokenKind::Keyword(Keyword::Unique),
                        TokenKind::Keyword(Keyword::Fulltext),
                        TokenKind::Keyword(Keyword::Spatial),
                    ]));
                }
            },
            TokenKind::Keyword(Keyword::Alter) => {
                debug!(statement = "ALTER TABLE", "dispatching");
                Statement::AlterTable(self.parse_alter_table()?)
            }
            TokenKind::Keyword(Keyword::Drop) => match self.peek(1) {
                TokenKind::Keyword(Keyword::Index) => {
                    debug!(statement = "DROP INDEX", "dispatching");
                    Statement::DropIndex(self.parse_drop_index()?)
                }
                TokenKind::Keyword(Keyword::Table | Keyword::Temporary) => {
                    debug!(statement = "DROP TABLE", "dispatching");
                    Statement::DropTable(self.parse_drop_table()?)
                }
                _ => {
                    self.advance();
                    return Err(self.error_expected(&[
                        TokenKind::Keyword(Keyword::Table),
                        TokenKind::Keyword(Keyword::Temporary),
                        TokenKind::Keyword(Keyword::Index),
                    ]));
                }
            },
            TokenKind::Keyword(Keyword::Truncate) => {
                debug!(statement = "TRUNCATE TABLE", "dispatching");
                Statement::TruncateTable(self.parse_truncate_table()?)
            }
            _ => {
                return Err(self.error_expected(&[
                    TokenKind::Keyword(Keyword::Create),
                    TokenKind::Keyword(Keyword::Alter),
                    TokenKind::Keyword(Keyword::Drop),
                    TokenKind::Keyword(Keyword::Truncate),
                ]));
            }
        };

        Ok(statement)
    }

    /// Parses a statement, an optional `;`, and requires the end of input.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the statement is invalid or anything but a
    /// single `;` follows it.
    pub fn parse_complete(&mut self) -> Result<Statement> {
        let statement = self.parse_statement()?;
        self.eat(TokenKind::Semicolon);
        if !self.is_at_end() {
            return Err(self.error_expected(&[TokenKind::Eof]));
        }
        Ok(statement)
    }

    fn parse_if_not_exists(&mut self) -> Result<bool> {
        if self.eat_keyword(Keyword::If) {
            self.expect_keyword(Keyword::Not)?;
            self.expect_keyword(Keyword::Exists)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn parse_if_exists(&mut self) -> Result<bool> {
        if self.eat_keyword(Keyword::If) {
            self.expect_keyword(Keyword::Exists)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn parse_create_table(&mut self) -> Result<CreateTableStatement> {
        let start = self.start();
        self.expect_keyword(Keyword::Create)?;
        let temporary = self.eat_keyword(Keyword::Temporary);
        self.expect_keyword(Keyword::Table)?;
        let if_not_exists = self.parse_if_not_exists()?;
        let table = self.parse_table_name()?;

        let like = if self.eat_keyword(Keyword::Like) {
            Some(self.parse_table_name()?)
        } else if self.check(TokenKind::LeftParen) && self.peek_keyword(1, Keyword::Like) {
            self.advance();
            self.advance();
            let source = self.parse_table_name()?;
            self.expect(TokenKind::RightParen)?;
            Some(source)
        } else {
            None
        };
        if like.is_some() {
            return Ok(CreateTableStatement {
                temporary,
                if_not_exists,
                table,
                elements: vec![],
                options: vec![],
                partition: None,
                like,
                query: None,
                span: self.span_from(start),
            });
        }

        let elements = if self.check(TokenKind::LeftParen) {
            self.parse_parenthesized(|p| p.parse_comma_separated(Self::parse_table_element))?
        } else {
            vec![]
        };

        let options = self.parse_table_options(true)?;
        let partition = if self.check_keyword(Keyword::Partition) {
            Some(self.parse_partition_by()?)
        } else {
            None
        };
        let query = self.parse_create_table_query()?;

        if elements.is_empty() && query.is_none() {
            let mut expected = vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Keyword(Keyword::As),
                TokenKind::Keyword(Keyword::Ignore),
                TokenKind::Keyword(Keyword::Replace),
            ];
            if options.is_empty() && partition.is_none() {
                expected.insert(0, TokenKind::LeftParen);
                expected.push(TokenKind::Keyword(Keyword::Like));
            }
            return Err(self.error_expected(&expected));
        }

        Ok(CreateTableStatement {
            temporary,
            if_not_exists,
            table,
            elements,
            options,
            partition,
            like: None,
            query,
            span: self.span_from(start),
        })
    }

    /// One entry of a `CREATE TABLE` definition list.
    fn parse_table_element(&mut self) -> Result<TableElement> {
        match self.peek(0) {
            TokenKind::Keyword(
                Keyword::Index | Keyword::Key | Keyword::Fulltext | Keyword::Spatial,
            ) => self.parse_index_definition().map(TableElement::Index),
            TokenKind::Keyword(
                Keyword::Constraint
                | Keyword::Primary
                | Keyword::Unique
                | Keyword::Foreign
                | Keyword::Check,
            ) => self
                .parse_constraint_definition()
                .map(TableElement::Constraint),
            kind if kind.is_identifier_like() => {
                self.parse_column_definition().map(TableElement::Column)
            }
            _ => Err(self.error_unexpected("column, index or constraint definition")),
        }
    }

    /// `[IGNORE|REPLACE] [AS] SELECT ...`, if present.
    fn parse_create_table_query(&mut self) -> Result<Option<CreateTableQuery>> {
        let duplicates = if self.eat_keyword(Keyword::Ignore) {
            Some(DuplicateHandling::Ignore)
        } else if self.eat_keyword(Keyword::Replace) {
            Some(DuplicateHandling::Replace)
        } else {
            None
        };
        let has_as = self.eat_keyword(Keyword::As);

        if duplicates.is_none() && !has_as && !self.check_keyword(Keyword::Select) {
            return Ok(None);
        }
        let select = self.parse_subquery()?;
        Ok(Some(CreateTableQuery {
            duplicates,
            select: Box::new(select),
        }))
    }

    fn parse_alter_table(&mut self) -> Result<AlterTableStatement> {
        let start = self.start();
        self.expect_keyword(Keyword::Alter)?;
        let ignore = self.eat_keyword(Keyword::Ignore);
        self.expect_keyword(Keyword::Table)?;
        let table = self.parse_table_name()?;

        let specifications = if matches!(self.peek(0), TokenKind::Eof | TokenKind::Semicolon) {
            vec![]
        } else {
            self.parse_comma_separated(Self::parse_alter_specification)?
        };

        Ok(AlterTableStatement {
            ignore,
            table,
            specifications,
            span: self.span_from(start),
        })
    }

    fn parse_drop_table(&mut self) -> Result<DropTableStatement> {
        let start = self.start();
        self.expect_keyword(Keyword::Drop)?;
        let temporary = self.eat_keyword(Keyword::Temporary);
        self.expect_keyword(Keyword::Table)?;
        let if_exists = self.parse_if_exists()?;
        let tables = self.parse_comma_separated(Self::parse_table_name)?;

        let behavior = if self.eat_keyword(Keyword::Restrict) {
            Some(DropBehavior::Restrict)
        } else if self.eat_keyword(Keyword::Cascade) {
            Some(DropBehavior::Cascade)
        } else {
            None
        };

        Ok(DropTableStatement {
            temporary,
            if_exists,
            tables,
            behavior,
            span: self.span_from(start),
        })
    }

    fn parse_truncate_table(&mut self) -> Result<TruncateTableStatement> {
        let start = self.start();
        self.expect_keyword(Keyword::Truncate)?;
        self.eat_keyword(Keyword::Table);
        let table = self.parse_table_name()?;
        Ok(TruncateTableStatement {
            table,
            span: self.span_from(start),
        })
    }

    fn parse_create_index(&mut self) -> Result<CreateIndexStatement> {
        let start = self.start();
        self.expect_keyword(Keyword::Create)?;
        let kind = match self.peek(0) {
            TokenKind::Keyword(Keyword::Unique) => IndexKind::Unique,
            TokenKind::Keyword(Keyword::Fulltext) => IndexKind::Fulltext,
            TokenKind::Keyword(Keyword::Spatial) => IndexKind::Spatial,
            _ => IndexKind::Plain,
        };
        if kind != IndexKind::Plain {
            self.advance();
        }
        self.expect_keyword(Keyword::Index)?;
        let name = self.expect_identifier()?;
        let index_type = self.parse_index_type()?;
        self.expect_keyword(Keyword::On)?;
        let table = self.parse_table_name()?;
        let key_parts = self.parse_key_parts()?;
        let options = self.parse_index_options()?;
        let (algorithm, lock) = self.parse_algorithm_and_lock()?;

        Ok(CreateIndexStatement {
            kind,
            name,
            index_type,
            table,
            key_parts,
            options,
            algorithm,
            lock,
            span: self.span_from(start),
        })
    }

    fn parse_drop_index(&mut self) -> Result<DropIndexStatement> {
        let start = self.start();
        self.expect_keyword(Keyword::Drop)?;
        self.expect_keyword(Keyword::Index)?;
        let name = self.expect_identifier()?;
        self.expect_keyword(Keyword::On)?;
        let table = self.parse_table_name()?;
        let (algorithm, lock) = self.parse_algorithm_and_lock()?;

        Ok(DropIndexStatement {
            name,
            table,
            algorithm,
            lock,
            span: self.span_from(start),
        })
    }

    /// Trailing `ALGORITHM` and `LOCK` clauses of the index statements.
    fn parse_algorithm_and_lock(
        &mut self,
    ) -> Result<(Option<AlgorithmOption>, Option<LockOption>)> {
        let mut algorithm = None;
        let mut lock = None;
        loop {
            if self.check_keyword(Keyword::Algorithm) {
                algorithm = Some(self.parse_algorithm_option()?);
            } else if self.check_keyword(Keyword::Lock) {
                lock = Some(self.parse_lock_option()?);
            } else {
                return Ok((algorithm, lock));
            }
        }
    }
}
