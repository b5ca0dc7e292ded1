//! Expression AST types.

use core::fmt;

use super::{DataType, SelectStatement, write_ident, write_quoted};
use crate::lexer::{Keyword, Span};

/// A literal value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Literal {
    /// Integer literal that fits in an `i64`.
    Integer(i64),
    /// Any other numeric literal, kept as written (`3.14`, `1e10`, very large integers).
    Decimal(String),
    /// String literal with an optional `_charset` introducer.
    String {
        /// The unescaped text.
        value: String,
        /// Character set named by the introducer, without the leading underscore.
        charset: Option<String>,
    },
    /// Hexadecimal literal; holds the digits.
    Hex {
        /// The hex digits.
        digits: String,
        /// Character set named by the introducer.
        charset: Option<String>,
    },
    /// Bit-value literal; holds the digits.
    Bit {
        /// The binary digits.
        digits: String,
        /// Character set named by the introducer.
        charset: Option<String>,
    },
    /// TRUE or FALSE.
    Boolean(bool),
    /// NULL.
    Null,
    /// `DATE 'x'`, `TIME 'x'` or `TIMESTAMP 'x'`.
    Temporal {
        /// Which keyword prefixed the string.
        kind: TemporalKind,
        /// The string content.
        value: String,
    },
    /// ODBC escape `{d '2020-01-01'}`.
    OdbcEscape {
        /// The identifier inside the braces.
        kind: String,
        /// The string content.
        value: String,
    },
}

/// The keyword of a temporal literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TemporalKind {
    Date,
    Time,
    Timestamp,
}

impl TemporalKind {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Timestamp => "TIMESTAMP",
        }
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum BinaryOp {
    // Logical
    Or,
    Xor,
    And,

    // Comparison
    Eq,
    NullSafeEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Bitwise
    BitOr,
    BitAnd,
    BitXor,
    LeftShift,
    RightShift,

    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    IntDiv,
    Mod,
}

impl BinaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::And => "AND",
            Self::Eq => "=",
            Self::NullSafeEq => "<=>",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::BitOr => "|",
            Self::BitAnd => "&",
            Self::BitXor => "^",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::IntDiv => "DIV",
            Self::Mod => "%",
        }
    }

    /// Whether this is one of the comparison operators.
    #[must_use]
    pub const fn is_comparison(&self) -> bool {
        matches!(
            self,
            Self::Eq | Self::NullSafeEq | Self::NotEq | Self::Lt | Self::LtEq | Self::Gt | Self::GtEq
        )
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum UnaryOp {
    /// Logical NOT (`NOT` or `!`)
    Not,
    /// Unary plus
    Plus,
    /// Negation (-)
    Neg,
    /// Bitwise NOT (~)
    BitNot,
    /// BINARY cast
    Binary,
}

impl UnaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Not => "NOT",
            Self::Plus => "+",
            Self::Neg => "-",
            Self::BitNot => "~",
            Self::Binary => "BINARY",
        }
    }
}

/// Right-hand side of an `IS [NOT]` test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum IsPredicate {
    True,
    False,
    Unknown,
    Null,
}

impl IsPredicate {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::Unknown => "UNKNOWN",
            Self::Null => "NULL",
        }
    }
}

/// `ALL` or `ANY` in a quantified comparison. `SOME` parses as `Any`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Quantifier {
    All,
    Any,
}

/// A column reference, optionally qualified by table and schema.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ColumnRef {
    /// Schema qualifier.
    pub schema: Option<String>,
    /// Table qualifier.
    pub table: Option<String>,
    /// Column name.
    pub name: String,
}

impl ColumnRef {
    /// An unqualified column reference.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            table: None,
            name: name.into(),
        }
    }
}

/// A function call expression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FunctionCall {
    /// The function name, as written.
    pub name: String,
    /// The arguments.
    pub args: Vec<Expr>,
    /// Whether DISTINCT was specified.
    pub distinct: bool,
}

/// One `WHEN ... THEN ...` arm of a CASE expression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WhenClause {
    pub condition: Expr,
    pub result: Expr,
}

/// Target of a `CAST(expr AS target)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CastTarget {
    /// `SIGNED [INTEGER]`
    Signed,
    /// `UNSIGNED [INTEGER]`
    Unsigned,
    /// Any column data type.
    DataType(DataType),
}

/// An SQL expression together with the source range it was parsed from.
///
/// Equality is structural: two expressions compare equal when their trees
/// match, wherever they came from.
#[derive(Debug, Clone, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Expr {
    /// The expression node.
    pub kind: ExprKind,
    /// Source span.
    pub span: Span,
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

/// The shape of an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ExprKind {
    /// A literal value.
    Literal(Literal),

    /// A column reference.
    Column(ColumnRef),

    /// A `?` placeholder, numbered from 1 in order of appearance.
    Parameter(usize),

    /// A wildcard (`*` or `table.*`), only inside SELECT lists and `COUNT(*)`.
    Wildcard {
        /// Table qualifier.
        table: Option<String>,
    },

    /// A binary expression.
    Binary {
        /// Left operand.
        left: Box<Expr>,
        /// Operator.
        op: BinaryOp,
        /// Right operand.
        right: Box<Expr>,
    },

    /// A unary expression.
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Operand.
        operand: Box<Expr>,
    },

    /// A function call.
    Function(FunctionCall),

    /// A scalar subquery.
    Subquery(Box<SelectStatement>),

    /// `EXISTS (subquery)`.
    Exists(Box<SelectStatement>),

    /// Row constructor, `ROW(a, b)` or `(a, b)`.
    Row(Vec<Expr>),

    /// `[NOT] BETWEEN low AND high`.
    Between {
        subject: Box<Expr>,
        low: Box<Expr>,
        high: Box<Expr>,
        negated: bool,
    },

    /// `[NOT] IN (a, b, ...)`.
    InList {
        subject: Box<Expr>,
        items: Vec<Expr>,
        negated: bool,
    },

    /// `[NOT] IN (subquery)`.
    InSubquery {
        subject: Box<Expr>,
        query: Box<SelectStatement>,
        negated: bool,
    },

    /// `[NOT] LIKE pattern [ESCAPE escape]`.
    Like {
        subject: Box<Expr>,
        pattern: Box<Expr>,
        escape: Option<Box<Expr>>,
        negated: bool,
    },

    /// `SOUNDS LIKE pattern`.
    SoundsLike {
        subject: Box<Expr>,
        pattern: Box<Expr>,
    },

    /// `[NOT] REGEXP pattern` (also `RLIKE`).
    Regexp {
        subject: Box<Expr>,
        pattern: Box<Expr>,
        negated: bool,
    },

    /// `IS [NOT] TRUE|FALSE|UNKNOWN|NULL`.
    IsCheck {
        subject: Box<Expr>,
        predicate: IsPredicate,
        negated: bool,
    },

    /// `left op ALL|ANY (subquery)`.
    QuantifiedComparison {
        left: Box<Expr>,
        op: BinaryOp,
        quantifier: Quantifier,
        query: Box<SelectStatement>,
    },

    /// `expr COLLATE collation`.
    Collate {
        expr: Box<Expr>,
        collation: String,
    },

    /// `CASE [operand] WHEN ... THEN ... [ELSE ...] END`.
    Case {
        operand: Option<Box<Expr>>,
        when_clauses: Vec<WhenClause>,
        else_result: Option<Box<Expr>>,
    },

    /// `CAST(expr AS target)`.
    Cast {
        expr: Box<Expr>,
        target: CastTarget,
    },
}

impl Expr {
    /// Creates an expression node.
    #[must_use]
    pub const fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Creates a literal expression without a source location.
    #[must_use]
    pub const fn literal(literal: Literal) -> Self {
        Self::new(ExprKind::Literal(literal), Span::point(0))
    }

    /// Creates an integer literal without a source location.
    #[must_use]
    pub const fn integer(value: i64) -> Self {
        Self::literal(Literal::Integer(value))
    }

    /// Creates an unqualified column reference without a source location.
    #[must_use]
    pub fn column(name: impl Into<String>) -> Self {
        Self::new(ExprKind::Column(ColumnRef::new(name)), Span::point(0))
    }

    /// Creates a binary expression spanning both operands.
    #[must_use]
    pub fn binary(left: Self, op: BinaryOp, right: Self) -> Self {
        let span = left.span.merge(right.span);
        Self::new(
            ExprKind::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            },
            span,
        )
    }

    /// Creates a unary expression.
    #[must_use]
    pub fn unary(op: UnaryOp, operand: Self) -> Self {
        let span = operand.span;
        Self::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        )
    }

    /// Returns the column reference if this is one.
    #[must_use]
    pub const fn as_column(&self) -> Option<&ColumnRef> {
        match &self.kind {
            ExprKind::Column(column) => Some(column),
            _ => None,
        }
    }
}

fn write_charset(f: &mut fmt::Formatter<'_>, charset: Option<&String>) -> fmt::Result {
    match charset {
        Some(cs) => write!(f, "_{cs} "),
        None => Ok(()),
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Decimal(text) => f.write_str(text),
            Self::String { value, charset } => {
                write_charset(f, charset.as_ref())?;
                write_quoted(f, value)
            }
            Self::Hex { digits, charset } => {
                write_charset(f, charset.as_ref())?;
                // X'..' needs an even digit count, 0x.. needs at least one digit
                if digits.len() % 2 == 0 {
                    write!(f, "X'{digits}'")
                } else {
                    write!(f, "0x{digits}")
                }
            }
            Self::Bit { digits, charset } => {
                write_charset(f, charset.as_ref())?;
                write!(f, "B'{digits}'")
            }
            Self::Boolean(true) => f.write_str("TRUE"),
            Self::Boolean(false) => f.write_str("FALSE"),
            Self::Null => f.write_str("NULL"),
            Self::Temporal { kind, value } => {
                write!(f, "{} ", kind.as_str())?;
                write_quoted(f, value)
            }
            Self::OdbcEscape { kind, value } => {
                f.write_str("{")?;
                write_ident(f, kind)?;
                f.write_str(" ")?;
                write_quoted(f, value)?;
                f.write_str("}")
            }
        }
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(schema) = &self.schema {
            write_ident(f, schema)?;
            f.write_str(".")?;
        }
        if let Some(table) = &self.table {
            write_ident(f, table)?;
            f.write_str(".")?;
        }
        write_ident(f, &self.name)
    }
}

impl fmt::Display for CastTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Signed => f.write_str("SIGNED"),
            Self::Unsigned => f.write_str("UNSIGNED"),
            Self::DataType(data_type) => write!(f, "{data_type}"),
        }
    }
}

impl FunctionCall {
    /// Writes the name bare only where the parser takes it, bare and followed
    /// by this argument list, as a function call.
    fn write_name(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bare = match Keyword::from_str(&self.name) {
            Some(keyword) if keyword.is_current_time() => {
                !self.distinct
                    && matches!(
                        self.args.as_slice(),
                        [] | [Expr {
                            kind: ExprKind::Literal(Literal::Integer(0..) | Literal::Decimal(_)),
                            ..
                        }]
                    )
            }
            Some(keyword) => keyword.names_function(),
            None => return write_ident(f, &self.name),
        };
        if bare {
            f.write_str(&self.name)
        } else {
            write_ident(f, &self.name)
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Expr]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

const fn not_kw(negated: bool) -> &'static str {
    if negated { "NOT " } else { "" }
}

/// Renders the expression as SQL. Every compound node is wrapped in
/// parentheses, so re-parsing the output yields the same tree.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Literal(literal) => write!(f, "{literal}"),
            ExprKind::Column(column) => write!(f, "{column}"),
            ExprKind::Parameter(_) => f.write_str("?"),
            ExprKind::Wildcard { table: Some(table) } => {
                write_ident(f, table)?;
                f.write_str(".*")
            }
            ExprKind::Wildcard { table: None } => f.write_str("*"),
            ExprKind::Binary { left, op, right } => {
                write!(f, "({left} {} {right})", op.as_str())
            }
            ExprKind::Unary { op, operand } => match op {
                UnaryOp::Not | UnaryOp::Binary => write!(f, "({} {operand})", op.as_str()),
                _ => write!(f, "({}{operand})", op.as_str()),
            },
            ExprKind::Function(func) => {
                func.write_name(f)?;
                f.write_str("(")?;
                if func.distinct {
                    f.write_str("DISTINCT ")?;
                }
                write_list(f, &func.args)?;
                f.write_str(")")
            }
            ExprKind::Subquery(query) => write!(f, "({query})"),
            ExprKind::Exists(query) => write!(f, "EXISTS ({query})"),
            ExprKind::Row(items) => {
                f.write_str("ROW(")?;
                write_list(f, items)?;
                f.write_str(")")
            }
            ExprKind::Between {
                subject,
                low,
                high,
                negated,
            } => write!(
                f,
                "({subject} {}BETWEEN {low} AND {high})",
                not_kw(*negated)
            ),
            ExprKind::InList {
                subject,
                items,
                negated,
            } => {
                write!(f, "({subject} {}IN (", not_kw(*negated))?;
                write_list(f, items)?;
                f.write_str("))")
            }
            ExprKind::InSubquery {
                subject,
                query,
                negated,
            } => write!(f, "({subject} {}IN ({query}))", not_kw(*negated)),
            ExprKind::Like {
                subject,
                pattern,
                escape,
                negated,
            } => {
                write!(f, "({subject} {}LIKE {pattern}", not_kw(*negated))?;
                if let Some(escape) = escape {
                    write!(f, " ESCAPE {escape}")?;
                }
                f.write_str(")")
            }
            ExprKind::SoundsLike { subject, pattern } => {
                write!(f, "({subject} SOUNDS LIKE {pattern})")
            }
            ExprKind::Regexp {
                subject,
                pattern,
                negated,
            } => write!(f, "({subject} {}REGEXP {pattern})", not_kw(*negated)),
            ExprKind::IsCheck {
                subject,
                predicate,
                negated,
            } => write!(
                f,
                "({subject} IS {}{})",
                not_kw(*negated),
                predicate.as_str()
            ),
            ExprKind::QuantifiedComparison {
                left,
                op,
                quantifier,
                query,
            } => {
                let quantifier = match quantifier {
                    Quantifier::All => "ALL",
                    Quantifier::Any => "ANY",
                };
                write!(f, "({left} {} {quantifier} ({query}))", op.as_str())
            }
            ExprKind::Collate { expr, collation } => {
                write!(f, "({expr} COLLATE ")?;
                write_ident(f, collation)?;
                f.write_str(")")
            }
            ExprKind::Case {
                operand,
                when_clauses,
                else_result,
            } => {
                f.write_str("CASE")?;
                if let Some(operand) = operand {
                    write!(f, " {operand}")?;
                }
                for clause in when_clauses {
                    write!(f, " WHEN {} THEN {}", clause.condition, clause.result)?;
                }
                if let Some(else_result) = else_result {
                    write!(f, " ELSE {else_result}")?;
                }
                f.write_str(" END")
            }
            ExprKind::Cast { expr, target } => write!(f, "CAST({expr} AS {target})"),
        }
    }
}
