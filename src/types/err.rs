/*!
Error types used in the library.

Every error is terminal for a check --- there is no local recovery, and the CLI maps each to a non-zero exit.
Four classes are distinguished:

- [ParseError] --- malformed bytes, wrong headers, or a line of an unexpected type.
- [CheckError] --- semantic failures not tied to the bytes of one line, such as a mismatch between the two streams.
- [LineError] --- failures attributable to the current line, such as a missing antecedent.
  The offending line is retained so it may be echoed for operator diagnostics.
- [FatalError] --- internal impossibilities which should never fire in a correct implementation.

Names of the error enums --- for the most part --- overlap with corresponding structs.
*/

use crate::structures::{line::Stream, literal::Literal};

/// A union of varied error kinds.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// An error from the bytes of a stream.
    Parse(ParseError),

    /// A semantic error spanning lines or streams.
    Check(CheckError),

    /// An error attributable to a single line.
    Line(LineError),

    /// An internal impossibility.
    Fatal(FatalError),
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "{e}"),
            Self::Check(e) => write!(f, "{e}"),
            Self::Line(e) => write!(f, "{e}"),
            Self::Fatal(e) => write!(f, "{e}"),
        }
    }
}

/// An error from the bytes of a stream, with the position at which it was noticed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseError {
    /// The stream on which the error was noticed.
    pub stream: Stream,

    /// The line at which the error was noticed.
    pub line: usize,

    /// The column at which the error was noticed.
    pub column: usize,

    /// What, specifically, went wrong.
    pub kind: ParseErrorKind,
}

/// Specific parse failures.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseErrorKind {
    /// The underlying reader failed.
    Io(std::io::ErrorKind),

    /// A byte with no reading in the current position.
    UnexpectedByte(u8),

    /// A carriage return not followed by a newline.
    ExpectedNewline,

    /// A missing token separator.
    ExpectedSpace,

    /// A digit was required.
    ExpectedDigit,

    /// A number written with a leading zero.
    LeadingZero,

    /// A literal whose magnitude cannot be represented.
    LiteralOverflow,

    /// A clause identifier which cannot be represented.
    IdentifierOverflow,

    /// A clause identifier must be positive.
    ZeroIdentifier,

    /// The stream ended inside a comment.
    EndOfFileInComment,

    /// The stream ended inside a line.
    TruncatedLine,

    /// A `p` line whose format is not known.
    UnknownHeader,

    /// A header belonging to the other stream, or appearing after the first line.
    MisplacedHeader,

    /// A header was required (pedantic mode) and not found.
    MissingHeader,

    /// An `s` line whose status string is not known.
    UnknownStatus,

    /// A line of some type other than those the state machine expected.
    UnexpectedLine {
        /// A description of the acceptable types, for the report.
        expected: &'static str,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "parse error in the {} at line {}, column {}: ",
            self.stream, self.line, self.column
        )?;
        match &self.kind {
            ParseErrorKind::Io(e) => write!(f, "read failed: {e}"),
            ParseErrorKind::UnexpectedByte(b) => match b.is_ascii_graphic() {
                true => write!(f, "unexpected character '{}'", *b as char),
                false => write!(f, "unexpected byte {b:#04x}"),
            },
            ParseErrorKind::ExpectedNewline => write!(f, "expected a newline after carriage return"),
            ParseErrorKind::ExpectedSpace => write!(f, "expected a space"),
            ParseErrorKind::ExpectedDigit => write!(f, "expected a digit"),
            ParseErrorKind::LeadingZero => write!(f, "unexpected leading zero"),
            ParseErrorKind::LiteralOverflow => write!(f, "literal too large to represent"),
            ParseErrorKind::IdentifierOverflow => write!(f, "identifier too large to represent"),
            ParseErrorKind::ZeroIdentifier => write!(f, "identifiers are positive"),
            ParseErrorKind::EndOfFileInComment => write!(f, "end of file in a comment"),
            ParseErrorKind::TruncatedLine => write!(f, "end of file inside a line"),
            ParseErrorKind::UnknownHeader => write!(f, "unknown header"),
            ParseErrorKind::MisplacedHeader => write!(f, "header does not belong on this stream"),
            ParseErrorKind::MissingHeader => write!(f, "a header is required"),
            ParseErrorKind::UnknownStatus => write!(f, "unknown status"),
            ParseErrorKind::UnexpectedLine { expected } => {
                write!(f, "expected {expected}")
            }
        }
    }
}

impl From<ParseError> for ErrorKind {
    fn from(e: ParseError) -> Self {
        ErrorKind::Parse(e)
    }
}

/// A semantic failure not tied to the bytes of one line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CheckError {
    /// The stream on which the error was noticed.
    pub stream: Stream,

    /// The line at which the error was noticed.
    pub line: usize,

    /// What, specifically, went wrong.
    pub kind: CheckErrorKind,
}

/// Specific check failures.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CheckErrorKind {
    /// The line does not match the saved line of the other stream.
    LineMismatch {
        /// The line number, on the other stream, of the saved line.
        saved_line: usize,
    },

    /// A model, values, core, or failed-assumption line contains a variable with both polarities.
    InconsistentLine,

    /// The model misses every literal of the noted input clause.
    ModelMissesClause {
        /// The identifier of the unsatisfied clause.
        id: i64,

        /// The line at which the unsatisfied clause was introduced.
        clause_line: usize,
    },

    /// An assumption of the query does not appear in the model.
    ModelMissesAssumption(Literal),

    /// A core literal which is not an assumption of the query.
    CoreNotInQuery(Literal),

    /// A failed-assumption literal whose variable is not touched by the query.
    FailedNotInQuery(Literal),

    /// A core literal appearing with the opposite sign in the failed-assumption set.
    CoreClashesWithFailed(Literal),

    /// A conclusion the proof omitted, tolerated only by (unsupported) relaxed semantics.
    RelaxedConclusionMissing,
}

impl std::fmt::Display for CheckError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "check error in the {} at line {}: ",
            self.stream, self.line
        )?;
        match &self.kind {
            CheckErrorKind::LineMismatch { saved_line } => {
                write!(f, "line does not match line {saved_line} of the other stream")
            }
            CheckErrorKind::InconsistentLine => {
                write!(f, "some variable occurs with both polarities")
            }
            CheckErrorKind::ModelMissesClause { id, clause_line } => write!(
                f,
                "model does not satisfy input clause {id} (line {clause_line})"
            ),
            CheckErrorKind::ModelMissesAssumption(l) => {
                write!(f, "model does not satisfy assumption {l}")
            }
            CheckErrorKind::CoreNotInQuery(l) => {
                write!(f, "core literal {l} is not an assumption of the query")
            }
            CheckErrorKind::FailedNotInQuery(l) => {
                write!(f, "failed literal {l} is not assumed by the query")
            }
            CheckErrorKind::CoreClashesWithFailed(l) => {
                write!(f, "core literal {l} clashes with the failed assumptions")
            }
            CheckErrorKind::RelaxedConclusionMissing => {
                write!(f, "conclusion missing from the proof (relaxed checking is not supported)")
            }
        }
    }
}

impl From<CheckError> for ErrorKind {
    fn from(e: CheckError) -> Self {
        ErrorKind::Check(e)
    }
}

/// A failure attributable to the current line.
///
/// The text of the line is retained so callers may echo it verbatim.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LineError {
    /// The stream on which the error was noticed.
    pub stream: Stream,

    /// The line at which the error was noticed.
    pub line: usize,

    /// The offending line, verbatim.
    pub text: String,

    /// What, specifically, went wrong.
    pub kind: LineErrorKind,
}

/// Specific line failures.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LineErrorKind {
    /// An antecedent identifier in neither the active nor the inactive index.
    UnknownAntecedent(i64),

    /// An antecedent identifier found in the inactive index.
    WeakenedAntecedent(i64),

    /// An antecedent with two (or more) distinct unfalsified literals.
    UnresolvableAntecedent(i64),

    /// A negative antecedent identifier, reserved for future extensions.
    NegativeAntecedent(i64),

    /// A negative deletion, weakening, or restoration target, likewise reserved.
    NegativeIdentifier(i64),

    /// The antecedent list was exhausted without a conflict.
    ResolutionFailed,

    /// An identifier introduced twice, ever, under the no-reuse policy.
    UsedIdentifier(i64),

    /// An identifier introduced while still present in an index.
    ActiveIdentifier(i64),

    /// A deletion, weakening, or restoration target which could not be found.
    UnknownClause(i64),

    /// A deletion or weakening target which is weakened.
    WeakenedClause(i64),

    /// A restoration target which is not weakened.
    NotWeakened(i64),
}

impl std::fmt::Display for LineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line error in the {} at line {}: ",
            self.stream, self.line
        )?;
        match &self.kind {
            LineErrorKind::UnknownAntecedent(id) => write!(f, "could not find antecedent {id}"),
            LineErrorKind::WeakenedAntecedent(id) => write!(f, "antecedent {id} weakened"),
            LineErrorKind::UnresolvableAntecedent(id) => {
                write!(f, "antecedent {id} not resolvable")
            }
            LineErrorKind::NegativeAntecedent(id) => write!(f, "negative antecedent {id}"),
            LineErrorKind::NegativeIdentifier(id) => {
                write!(f, "unexpected negative identifier {id}")
            }
            LineErrorKind::ResolutionFailed => write!(f, "resolution check failed"),
            LineErrorKind::UsedIdentifier(id) => write!(f, "identifier {id} already used"),
            LineErrorKind::ActiveIdentifier(id) => write!(f, "identifier {id} still in use"),
            LineErrorKind::UnknownClause(id) => write!(f, "could not find clause {id}"),
            LineErrorKind::WeakenedClause(id) => write!(f, "clause {id} weakened"),
            LineErrorKind::NotWeakened(id) => write!(f, "clause {id} is not weakened"),
        }
    }
}

impl From<LineError> for ErrorKind {
    fn from(e: LineError) -> Self {
        ErrorKind::Line(e)
    }
}

/// An internal impossibility.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FatalError {
    /// The state machine fell through to the unreachable state.
    UnreachableState,

    /// A conclusion arrived outside an open query.
    ConcludeWithoutQuery,

    /// A fresh query arrived while one was still open.
    UnconcludedQuery,
}

impl std::fmt::Display for FatalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnreachableState => write!(f, "fatal error: unreachable state"),
            Self::ConcludeWithoutQuery => {
                write!(f, "fatal error: conclusion outside an open query")
            }
            Self::UnconcludedQuery => write!(f, "fatal error: query opened before the last was concluded"),
        }
    }
}

impl From<FatalError> for ErrorKind {
    fn from(e: FatalError) -> Self {
        ErrorKind::Fatal(e)
    }
}
