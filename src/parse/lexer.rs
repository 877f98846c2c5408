/*!
A byte-buffered lexer, producing [typed lines](Line) from one stream.

One lexer is held per stream, each with its own read buffer and position counts.
Reading happens in two steps: the raw bytes of a physical line are gathered (comments and blank lines are dealt with here), and the gathered bytes are then cut into tokens.
The raw bytes are retained on the produced line, as a line error echoes the offending line verbatim.

# The wire format

Every line is ASCII terminated by `\n`, with a preceding `\r` allowed.
Tokens are separated by a single space, sequences of tokens end with `0`, and numbers are decimal with no leading zeros (the terminator aside).
A typed data line begins with a lowercase letter from `{i, l, q, d, w, r, m, u, v, f}`, or directly with a signed decimal where the default type of the stream applies: an input clause on the interaction stream, a lemma on the proof stream.
The letter `a` on the interaction stream is a legacy alias of `q`.

Identifiers are positive 64-bit integers.
Literals are nonzero signed integers whose magnitude is strictly below [i32::MAX], so the negation of a literal is always defined.
Overflow during accumulation is a parse error rather than a silent wrap.
*/

use std::io::Read;

use crate::{
    misc::log::targets::{self},
    structures::{
        line::{Header, Line, LineKind, Status, Stream},
        literal::Literal,
    },
    types::err::{ParseError, ParseErrorKind},
};

/// The size of the read buffer.
const BUFFER_SIZE: usize = 1 << 20;

/// A lexer over one stream.
pub struct Lexer<R: Read> {
    /// Which stream the lexer reads, fixing diagnostics and the default line type.
    stream: Stream,

    /// The source of bytes.
    reader: R,

    /// The read buffer.
    buffer: Vec<u8>,

    /// The read position within the buffer.
    position: usize,

    /// The count of valid bytes in the buffer.
    length: usize,

    /// The current line, one-based.
    line: usize,

    /// The line at which the current logical line began.
    start_line: usize,

    /// A count of all bytes read.
    bytes: usize,
}

impl<R: Read> Lexer<R> {
    /// A lexer over `reader`, tagged as `stream`.
    pub fn new(stream: Stream, reader: R) -> Self {
        Lexer {
            stream,
            reader,
            buffer: vec![0; BUFFER_SIZE],
            position: 0,
            length: 0,
            line: 1,
            start_line: 1,
            bytes: 0,
        }
    }

    /// The stream the lexer reads.
    pub fn stream(&self) -> Stream {
        self.stream
    }

    /// The count of bytes read so far.
    pub fn bytes_read(&self) -> usize {
        self.bytes
    }

    /// The line at which the most recently returned line began.
    pub fn line_number(&self) -> usize {
        self.start_line
    }

    /// A parse error at the given column of the current logical line.
    fn error(&self, column: usize, kind: ParseErrorKind) -> ParseError {
        ParseError {
            stream: self.stream,
            line: self.start_line,
            column,
            kind,
        }
    }

    /// The next byte of the stream, if any.
    fn next_byte(&mut self) -> Result<Option<u8>, ParseError> {
        if self.position == self.length {
            self.length = match self.reader.read(&mut self.buffer) {
                Ok(count) => count,
                Err(e) => return Err(self.error(1, ParseErrorKind::Io(e.kind()))),
            };
            self.position = 0;

            if self.length == 0 {
                return Ok(None);
            }
        }

        let byte = self.buffer[self.position];
        self.position += 1;
        self.bytes += 1;
        Ok(Some(byte))
    }

    /// The raw bytes of the next physical line, without the line end.
    ///
    /// Returns None at a clean end of the stream.
    /// A carriage return must be followed by a newline, and the stream must not end inside a line.
    fn raw_line(&mut self) -> Result<Option<Vec<u8>>, ParseError> {
        self.start_line = self.line;
        let mut raw = Vec::default();

        loop {
            match self.next_byte()? {
                None if raw.is_empty() => return Ok(None),

                None => {
                    let kind = match raw.first() {
                        Some(&b'c') => ParseErrorKind::EndOfFileInComment,
                        _ => ParseErrorKind::TruncatedLine,
                    };
                    return Err(self.error(raw.len() + 1, kind));
                }

                Some(b'\n') => {
                    self.line += 1;
                    return Ok(Some(raw));
                }

                Some(b'\r') => match self.next_byte()? {
                    Some(b'\n') => {
                        self.line += 1;
                        return Ok(Some(raw));
                    }
                    _ => return Err(self.error(raw.len() + 2, ParseErrorKind::ExpectedNewline)),
                },

                Some(byte) => raw.push(byte),
            }
        }
    }

    /// The next typed line of the stream, or None at a clean end of the stream.
    ///
    /// Comments are skipped, and blank lines are skipped with a diagnostic.
    pub fn read_line(&mut self) -> Result<Option<Line>, ParseError> {
        loop {
            let raw = match self.raw_line()? {
                None => return Ok(None),
                Some(raw) => raw,
            };

            if raw.is_empty() {
                log::warn!(target: targets::PARSE, "Blank line {} of the {}.", self.start_line, self.stream);
                continue;
            }

            if raw.first() == Some(&b'c') {
                continue;
            }

            return Ok(Some(self.cut(&raw)?));
        }
    }

    /// Cut the gathered bytes of one line into a typed line.
    fn cut(&self, raw: &[u8]) -> Result<Line, ParseError> {
        let mut cursor = Cursor {
            lexer: self,
            raw,
            index: 0,
        };

        let kind = match raw[0] {
            b'p' => return cursor.header(),
            b's' => return cursor.status(),

            b'i' => LineKind::Input,
            b'l' => LineKind::Learn,
            b'q' => LineKind::Query,
            b'a' if self.stream == Stream::Interaction => LineKind::Query,
            b'd' => LineKind::Delete,
            b'w' => LineKind::Weaken,
            b'r' => LineKind::Restore,
            b'm' => LineKind::Model,
            b'u' => LineKind::Core,
            b'v' => LineKind::Values,
            b'f' => LineKind::Failed,

            // No letter: the default type of the stream applies.
            b'-' | b'0'..=b'9' => {
                let default = match self.stream {
                    Stream::Interaction => LineKind::Input,
                    Stream::Proof => LineKind::Learn,
                };
                return cursor.data(default);
            }

            byte => return Err(self.error(1, ParseErrorKind::UnexpectedByte(byte))),
        };

        cursor.index = 1;
        cursor.space()?;
        cursor.data(kind)
    }
}

/// A cursor over the raw bytes of one line.
struct Cursor<'l, R: Read> {
    lexer: &'l Lexer<R>,
    raw: &'l [u8],
    index: usize,
}

impl<R: Read> Cursor<'_, R> {
    /// A parse error at the current column.
    fn error(&self, kind: ParseErrorKind) -> ParseError {
        self.lexer.error(self.index + 1, kind)
    }

    /// The byte at the cursor, if any.
    fn peek(&self) -> Option<u8> {
        self.raw.get(self.index).copied()
    }

    /// Consume a single space.
    fn space(&mut self) -> Result<(), ParseError> {
        match self.peek() {
            Some(b' ') => {
                self.index += 1;
                Ok(())
            }
            _ => Err(self.error(ParseErrorKind::ExpectedSpace)),
        }
    }

    /// Require the end of the line.
    fn end(&self) -> Result<(), ParseError> {
        match self.peek() {
            None => Ok(()),
            Some(byte) => Err(self.error(ParseErrorKind::UnexpectedByte(byte))),
        }
    }

    /// The line as a fresh [Line] of the given kind.
    fn fresh(&self, kind: LineKind) -> Line {
        let mut line = Line::empty(kind, self.lexer.start_line);
        line.text = String::from_utf8_lossy(self.raw).into_owned();
        line
    }

    /// Accumulate the digits of one unsigned number, rejecting leading zeros and overflow.
    fn digits(&mut self, overflow: ParseErrorKind) -> Result<i64, ParseError> {
        let first = match self.peek() {
            Some(digit @ b'0'..=b'9') => digit,
            _ => return Err(self.error(ParseErrorKind::ExpectedDigit)),
        };

        if first == b'0' && matches!(self.raw.get(self.index + 1).copied(), Some(b'0'..=b'9')) {
            return Err(self.error(ParseErrorKind::LeadingZero));
        }

        let mut value: i64 = 0;
        while let Some(digit @ b'0'..=b'9') = self.peek() {
            let step = value
                .checked_mul(10)
                .and_then(|v| v.checked_add((digit - b'0') as i64));
            value = match step {
                Some(value) => value,
                None => return Err(self.error(overflow)),
            };
            self.index += 1;
        }
        Ok(value)
    }

    /// One literal, or zero for the terminator.
    fn literal(&mut self) -> Result<Literal, ParseError> {
        let column = self.index;
        let negative = match self.peek() {
            Some(b'-') => {
                self.index += 1;
                true
            }
            _ => false,
        };

        let magnitude = self.digits(ParseErrorKind::LiteralOverflow)?;

        if magnitude >= i32::MAX as i64 {
            return Err(self.lexer.error(column + 1, ParseErrorKind::LiteralOverflow));
        }
        if negative && magnitude == 0 {
            return Err(self.lexer.error(column + 1, ParseErrorKind::LeadingZero));
        }

        match negative {
            true => Ok(-(magnitude as i32)),
            false => Ok(magnitude as i32),
        }
    }

    /// One signed identifier, or zero for the terminator.
    fn signed_id(&mut self) -> Result<i64, ParseError> {
        let column = self.index;
        let negative = match self.peek() {
            Some(b'-') => {
                self.index += 1;
                true
            }
            _ => false,
        };

        let magnitude = self.digits(ParseErrorKind::IdentifierOverflow)?;

        if negative && magnitude == 0 {
            return Err(self.lexer.error(column + 1, ParseErrorKind::LeadingZero));
        }

        match negative {
            true => Ok(-magnitude),
            false => Ok(magnitude),
        }
    }

    /// One positive identifier followed by a space, as carried by `i` and `l` lines.
    fn clause_id(&mut self) -> Result<i64, ParseError> {
        let column = self.index;
        let id = self.digits(ParseErrorKind::IdentifierOverflow)?;
        if id == 0 {
            return Err(self.lexer.error(column + 1, ParseErrorKind::ZeroIdentifier));
        }
        self.space()?;
        Ok(id)
    }

    /// A zero-terminated literal sequence.
    fn literals(&mut self) -> Result<Vec<Literal>, ParseError> {
        let mut literals = Vec::default();
        loop {
            match self.literal()? {
                0 => return Ok(literals),
                literal => {
                    literals.push(literal);
                    self.space()?;
                }
            }
        }
    }

    /// A zero-terminated signed identifier sequence.
    fn ids(&mut self) -> Result<Vec<i64>, ParseError> {
        let mut ids = Vec::default();
        loop {
            match self.signed_id()? {
                0 => return Ok(ids),
                id => {
                    ids.push(id);
                    self.space()?;
                }
            }
        }
    }

    /// A data line of the given kind, with the cursor at the first token after the type letter.
    fn data(&mut self, kind: LineKind) -> Result<Line, ParseError> {
        let mut line = self.fresh(kind);

        match kind {
            LineKind::Input => {
                // An identifier is required in the proof and absent in the interaction.
                if self.lexer.stream == Stream::Proof {
                    line.id = Some(self.clause_id()?);
                }
                line.literals = self.literals()?;
            }

            LineKind::Learn => {
                line.id = Some(self.clause_id()?);
                line.literals = self.literals()?;
                self.space()?;
                line.antecedents = self.ids()?;
            }

            LineKind::Query | LineKind::Model | LineKind::Values | LineKind::Failed => {
                line.literals = self.literals()?;
            }

            LineKind::Delete | LineKind::Weaken | LineKind::Restore => {
                line.antecedents = self.ids()?;
            }

            LineKind::Core => {
                line.literals = self.literals()?;
                // Justifying antecedents appear in the proof alone.
                if self.lexer.stream == Stream::Proof {
                    self.space()?;
                    line.antecedents = self.ids()?;
                }
            }

            LineKind::Header | LineKind::Status => unreachable!("cut by dedicated methods"),
        }

        self.end()?;
        Ok(line)
    }

    /// A `p icnf` or `p lidrup` header, on the matching stream.
    fn header(&mut self) -> Result<Line, ParseError> {
        self.index = 1;
        self.space()?;

        let header = match &self.raw[self.index..] {
            b"icnf" => Header::Icnf,
            b"lidrup" => Header::Lidrup,
            _ => return Err(self.error(ParseErrorKind::UnknownHeader)),
        };

        let expected = match self.lexer.stream {
            Stream::Interaction => Header::Icnf,
            Stream::Proof => Header::Lidrup,
        };
        if header != expected {
            return Err(self.error(ParseErrorKind::MisplacedHeader));
        }

        let mut line = self.fresh(LineKind::Header);
        line.header = Some(header);
        Ok(line)
    }

    /// An `s SATISFIABLE`, `s UNSATISFIABLE`, or `s UNKNOWN` verdict.
    fn status(&mut self) -> Result<Line, ParseError> {
        self.index = 1;
        self.space()?;

        let status = match &self.raw[self.index..] {
            b"SATISFIABLE" => Status::Satisfiable,
            b"UNSATISFIABLE" => Status::Unsatisfiable,
            b"UNKNOWN" => Status::Unknown,
            _ => return Err(self.error(ParseErrorKind::UnknownStatus)),
        };

        let mut line = self.fresh(LineKind::Status);
        line.status = Some(status);
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interaction(source: &str) -> Lexer<&[u8]> {
        Lexer::new(Stream::Interaction, source.as_bytes())
    }

    fn proof(source: &str) -> Lexer<&[u8]> {
        Lexer::new(Stream::Proof, source.as_bytes())
    }

    #[test]
    fn headers() {
        let mut lexer = interaction("p icnf\n");
        let line = lexer.read_line().unwrap().unwrap();
        assert_eq!(line.kind, LineKind::Header);
        assert_eq!(line.header, Some(Header::Icnf));
        assert!(lexer.read_line().unwrap().is_none());

        let mut lexer = proof("p icnf\n");
        assert_eq!(
            lexer.read_line().unwrap_err().kind,
            ParseErrorKind::MisplacedHeader
        );

        let mut lexer = proof("p lidpur\n");
        assert_eq!(
            lexer.read_line().unwrap_err().kind,
            ParseErrorKind::UnknownHeader
        );
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let mut lexer = interaction("c a comment\n\nq 1 0\n");
        let line = lexer.read_line().unwrap().unwrap();
        assert_eq!(line.kind, LineKind::Query);
        assert_eq!(line.literals, vec![1]);
        assert_eq!(line.number, 3);
    }

    #[test]
    fn interaction_inputs_have_no_identifier() {
        let mut lexer = interaction("i 1 -2 3 0\n");
        let line = lexer.read_line().unwrap().unwrap();
        assert_eq!(line.kind, LineKind::Input);
        assert_eq!(line.id, None);
        assert_eq!(line.literals, vec![1, -2, 3]);
        assert_eq!(line.text, "i 1 -2 3 0");
    }

    #[test]
    fn proof_inputs_and_lemmas_carry_identifiers() {
        let mut lexer = proof("i 5 1 -2 0\nl 6 -1 0 5 2 0\n");

        let input = lexer.read_line().unwrap().unwrap();
        assert_eq!(input.id, Some(5));
        assert_eq!(input.literals, vec![1, -2]);

        let lemma = lexer.read_line().unwrap().unwrap();
        assert_eq!(lemma.kind, LineKind::Learn);
        assert_eq!(lemma.id, Some(6));
        assert_eq!(lemma.literals, vec![-1]);
        assert_eq!(lemma.antecedents, vec![5, 2]);
    }

    #[test]
    fn default_types_follow_the_stream() {
        let mut lexer = interaction("1 2 0\n");
        let line = lexer.read_line().unwrap().unwrap();
        assert_eq!(line.kind, LineKind::Input);
        assert_eq!(line.literals, vec![1, 2]);

        let mut lexer = proof("3 1 2 0 1 2 0\n");
        let line = lexer.read_line().unwrap().unwrap();
        assert_eq!(line.kind, LineKind::Learn);
        assert_eq!(line.id, Some(3));
        assert_eq!(line.literals, vec![1, 2]);
        assert_eq!(line.antecedents, vec![1, 2]);
    }

    #[test]
    fn query_aliases() {
        let mut lexer = interaction("a -4 0\n");
        let line = lexer.read_line().unwrap().unwrap();
        assert_eq!(line.kind, LineKind::Query);
        assert_eq!(line.literals, vec![-4]);
    }

    #[test]
    fn cores_differ_by_stream() {
        let mut lexer = interaction("u 1 2 0\n");
        let line = lexer.read_line().unwrap().unwrap();
        assert_eq!(line.literals, vec![1, 2]);
        assert!(line.antecedents.is_empty());

        let mut lexer = proof("u 1 2 0 7 8 0\n");
        let line = lexer.read_line().unwrap().unwrap();
        assert_eq!(line.literals, vec![1, 2]);
        assert_eq!(line.antecedents, vec![7, 8]);
    }

    #[test]
    fn statuses() {
        let mut lexer = interaction("s SATISFIABLE\ns UNSATISFIABLE\ns UNKNOWN\n");
        for expected in [Status::Satisfiable, Status::Unsatisfiable, Status::Unknown] {
            let line = lexer.read_line().unwrap().unwrap();
            assert_eq!(line.kind, LineKind::Status);
            assert_eq!(line.status, Some(expected));
        }

        let mut lexer = interaction("s SAT\n");
        assert_eq!(
            lexer.read_line().unwrap_err().kind,
            ParseErrorKind::UnknownStatus
        );
    }

    #[test]
    fn carriage_returns() {
        let mut lexer = interaction("q 1 0\r\n");
        assert_eq!(lexer.read_line().unwrap().unwrap().literals, vec![1]);

        let mut lexer = interaction("q 1 0\rx\n");
        assert_eq!(
            lexer.read_line().unwrap_err().kind,
            ParseErrorKind::ExpectedNewline
        );
    }

    #[test]
    fn malformed_numbers() {
        let mut lexer = interaction("i 01 0\n");
        assert_eq!(
            lexer.read_line().unwrap_err().kind,
            ParseErrorKind::LeadingZero
        );

        let mut lexer = interaction("i 2147483647 0\n");
        assert_eq!(
            lexer.read_line().unwrap_err().kind,
            ParseErrorKind::LiteralOverflow
        );

        let mut lexer = interaction("i 2147483646 0\n");
        assert_eq!(
            lexer.read_line().unwrap().unwrap().literals,
            vec![2147483646]
        );

        let mut lexer = proof("l 99999999999999999999 1 0 0\n");
        assert_eq!(
            lexer.read_line().unwrap_err().kind,
            ParseErrorKind::IdentifierOverflow
        );

        let mut lexer = proof("i 0 1 0\n");
        assert_eq!(
            lexer.read_line().unwrap_err().kind,
            ParseErrorKind::ZeroIdentifier
        );
    }

    #[test]
    fn truncations() {
        let mut lexer = interaction("i 1 2 0");
        assert_eq!(
            lexer.read_line().unwrap_err().kind,
            ParseErrorKind::TruncatedLine
        );

        let mut lexer = interaction("c a comment");
        assert_eq!(
            lexer.read_line().unwrap_err().kind,
            ParseErrorKind::EndOfFileInComment
        );

        let mut lexer = interaction("i 1  2 0\n");
        assert_eq!(
            lexer.read_line().unwrap_err().kind,
            ParseErrorKind::ExpectedDigit
        );
    }

    #[test]
    fn positions() {
        let mut lexer = interaction("c one\nq 0\ni 7 0\n");
        let query = lexer.read_line().unwrap().unwrap();
        assert_eq!(query.number, 2);
        let input = lexer.read_line().unwrap().unwrap();
        assert_eq!(input.number, 3);
        assert_eq!(lexer.bytes_read(), "c one\nq 0\ni 7 0\n".len());
    }
}
