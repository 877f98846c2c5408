/*!
The checker --- to which streams are handed and within which every check takes place.

A [Checker] bundles the [clause database](crate::db::clause), the [atom database](crate::db::atom), the [counters](crate::reports::Counters), and the small amount of state shared between lines: the current query, the saved line awaiting its twin on the other stream, and whether the formula has become inconsistent.

The work of a check is split between the [state machine](state), which decides which stream to read and which line types are acceptable, and the [procedures](crate::procedures), which give the semantics of each line.

# Example

```rust
# use lidrup_check::{checker::Checker, config::Config};
let proof: &[u8] = b"p lidrup
i 1 1 0
i 2 -1 2 0
q 0
l 3 2 0 1 2 0
s SATISFIABLE
m 1 2 0
";

// A proof may be checked on its own, with its inputs taken on trust.
let mut checker = Checker::new(Config::default());
assert!(checker.check(None::<&[u8]>, proof).is_ok());
assert_eq!(checker.counters().satisfiable, 1);
```
*/

pub mod state;

use std::io::Read;

use crate::{
    config::Config,
    db::{atom::AtomDB, clause::ClauseDB},
    misc::log::targets::{self},
    parse::lexer::Lexer,
    reports::Counters,
    structures::{
        line::{Line, Status, Stream},
        literal::Literal,
    },
    types::err::{
        CheckError, CheckErrorKind, ErrorKind, FatalError, LineError, LineErrorKind,
    },
};

/// The checker struct.
pub struct Checker {
    /// Configuration of the checker.
    pub config: Config,

    /// The clause database.
    pub clause_db: ClauseDB,

    /// The atom database.
    pub atom_db: AtomDB,

    /// Counts of things which count.
    counters: Counters,

    /// True once the empty clause has been introduced or derived.
    ///
    /// From this point every clause is implied, and so RUP checks succeed without work.
    pub(crate) inconsistent: bool,

    /// The most recently saved line, awaiting a matching line on the other stream.
    pub(crate) saved: Option<Line>,

    /// The assumptions of the current query.
    pub(crate) query: Vec<Literal>,

    /// True from a `q` line until the query is concluded.
    pub(crate) query_open: bool,
}

impl Checker {
    /// A new [Checker] over `config`.
    pub fn new(config: Config) -> Self {
        Checker {
            clause_db: ClauseDB::new(&config),
            atom_db: AtomDB::default(),
            counters: Counters::default(),
            inconsistent: false,
            saved: None,
            query: Vec::default(),
            query_open: false,
            config,
        }
    }

    /// The counters of the checker.
    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    /// A mutable borrow of the counters.
    pub(crate) fn counters_mut(&mut self) -> &mut Counters {
        &mut self.counters
    }

    /// Check `proof`, cross-checked against `interaction` when one is given.
    ///
    /// Returns Ok only if every derivation and every verdict was verified.
    /// Any error is terminal: the databases are left as they were when the error arose, and the checker should not be reused.
    pub fn check<I: Read, P: Read>(
        &mut self,
        interaction: Option<I>,
        proof: P,
    ) -> Result<(), ErrorKind> {
        let proof = Lexer::new(Stream::Proof, proof);

        let result = match interaction {
            Some(interaction) => {
                let interaction = Lexer::new(Stream::Interaction, interaction);
                self.check_streams(interaction, proof)
            }
            None => self.check_proof_alone(proof),
        };

        debug_assert!(self.atom_db.marks_clean());
        debug_assert_eq!(self.atom_db.trail_length(), 0);

        result
    }

    /// Open a query on the given assumptions.
    pub(crate) fn open_query(&mut self, line: &Line) -> Result<(), ErrorKind> {
        if self.query_open {
            return Err(ErrorKind::Fatal(FatalError::UnconcludedQuery));
        }

        log::info!(target: targets::MACHINE, "Query on {} assumptions at line {}.", line.literals.len(), line.number);

        self.atom_db.import_all(&line.literals);
        self.query = line.literals.clone();
        self.query_open = true;
        self.counters.queries += 1;
        Ok(())
    }

    /// Conclude the current query with `status`.
    pub(crate) fn conclude_query(&mut self, status: Status) -> Result<(), ErrorKind> {
        if !self.query_open {
            return Err(ErrorKind::Fatal(FatalError::ConcludeWithoutQuery));
        }

        log::info!(target: targets::MACHINE, "Query concluded: {status}.");

        self.query_open = false;
        match status {
            Status::Satisfiable => self.counters.satisfiable += 1,
            Status::Unsatisfiable => self.counters.unsatisfiable += 1,
            Status::Unknown => self.counters.unknown += 1,
        }
        Ok(())
    }

    /// A [LineError] pinned to `line`, echoing its text.
    pub(crate) fn line_error(&self, line: &Line, kind: LineErrorKind) -> ErrorKind {
        ErrorKind::Line(LineError {
            stream: Stream::Proof,
            line: line.number,
            text: line.text.clone(),
            kind,
        })
    }

    /// A [CheckError] pinned to `line` on `stream`.
    pub(crate) fn check_error(
        &self,
        stream: Stream,
        line: &Line,
        kind: CheckErrorKind,
    ) -> ErrorKind {
        ErrorKind::Check(CheckError {
            stream,
            line: line.number,
            kind,
        })
    }
}
