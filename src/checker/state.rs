/*!
The state machine synchronising the two streams.

Each state selects a stream, reads one line, matches its type, and transitions.
A line of an unexpected type, or a premature end of a stream, is a parse error naming the acceptable types.

The graph, with the interaction stream on the left of each pairing:

```text
INTERACTION_HEADER  -> PROOF_HEADER
PROOF_HEADER        -> INTERACTION_INPUT
INTERACTION_INPUT   -> PROOF_INPUT   on i
                    -> PROOF_QUERY   on q
                    -> END           on end of stream
PROOF_INPUT         -> INTERACTION_INPUT  on a matching i
                    -> PROOF_INPUT        on l | d | w | r
PROOF_QUERY         -> PROOF_CHECK        on a matching q
                    -> PROOF_QUERY        on l | d | w | r
PROOF_CHECK         -> PROOF_CHECK               on l | d | w | r
                    -> INTERACTION_PROPAGATE     on i
                    -> INTERACTION_SATISFIABLE   on s SATISFIABLE
                    -> INTERACTION_UNSATISFIABLE on s UNSATISFIABLE
                    -> INTERACTION_UNKNOWN       on s UNKNOWN
INTERACTION_PROPAGATE     -> PROOF_CHECK             on the matching i
INTERACTION_SATISFIABLE   -> INTERACTION_SATISFIED   on s SATISFIABLE
INTERACTION_UNSATISFIABLE -> INTERACTION_UNSATISFIED on s UNSATISFIABLE
INTERACTION_UNKNOWN       -> INTERACTION_INPUT       on s UNKNOWN
INTERACTION_SATISFIED     -> PROOF_MODEL             on v | m
INTERACTION_UNSATISFIED   -> PROOF_CORE              on f | u
PROOF_MODEL               -> INTERACTION_INPUT       on m
PROOF_CORE                -> INTERACTION_INPUT       on u
```

When the proof is checked alone the interaction states drop out: the proof's own `i`, `q`, `m`, and `u` lines are taken on trust as the user's inputs, while every lemma, resolution, and conclusion check still runs.

Headers are optional, unless the mode is pedantic, and carry the format of their stream.
Once the interaction stream ends, trailing `l`, `d`, `w`, and `r` lines of the proof are still consumed and checked, and then the proof must end.
*/

use std::io::Read;

use crate::{
    checker::Checker,
    config::Mode,
    misc::log::targets::{self},
    parse::lexer::Lexer,
    structures::line::{Line, LineKind, Status, Stream},
    types::err::{CheckError, CheckErrorKind, ErrorKind, FatalError, ParseError, ParseErrorKind},
};

/// The states of the machine.
///
/// [Unreachable](State::Unreachable) is a sentinel which no transition targets, modelling the fatal internal state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum State {
    /// An optional `p icnf` line.
    InteractionHeader,

    /// An optional `p lidrup` line.
    ProofHeader,

    /// An interaction `i` or `q` line, or the end of the interaction.
    InteractionInput,

    /// The proof's matching `i` line, preceded by any bookkeeping.
    ProofInput,

    /// The proof's matching `q` line, preceded by any bookkeeping.
    ProofQuery,

    /// The body of a query on the proof stream: lemmas, bookkeeping, inputs, and finally a verdict.
    ProofCheck,

    /// The interaction's echo of an input clause the proof introduced mid-query.
    InteractionPropagate,

    /// The interaction's echo of a satisfiable verdict.
    InteractionSatisfiable,

    /// The interaction's echo of an unsatisfiable verdict.
    InteractionUnsatisfiable,

    /// The interaction's echo of an unknown verdict.
    InteractionUnknown,

    /// The interaction's model (`m`) or values (`v`) line.
    InteractionSatisfied,

    /// The interaction's core (`u`) or failed-assumption (`f`) line.
    InteractionUnsatisfied,

    /// The proof's model, matched against the saved interaction line.
    ProofModel,

    /// The proof's core, matched and justified by resolution.
    ProofCore,

    /// The interaction has ended: trailing proof bookkeeping, then the end of the proof.
    End,

    /// Solo checking: an `i`, `l`, `q`, `d`, `w`, or `r` line, or the end of the proof.
    SoloInput,

    /// Solo checking: the body of a query, ending with a verdict.
    SoloCheck,

    /// Solo checking: the model concluding a satisfiable verdict.
    SoloModel,

    /// Solo checking: the core concluding an unsatisfiable verdict.
    SoloCore,

    /// No transition targets this state.
    Unreachable,
}

/// The next line of `lexer`, preferring a stashed line.
fn next_line<R: Read>(
    lexer: &mut Lexer<R>,
    pending: &mut Option<Line>,
) -> Result<Option<Line>, ErrorKind> {
    match pending.take() {
        Some(line) => Ok(Some(line)),
        None => lexer.read_line().map_err(ErrorKind::from),
    }
}

/// The next line of `lexer`, required to exist.
fn require<R: Read>(
    lexer: &mut Lexer<R>,
    pending: &mut Option<Line>,
    expected: &'static str,
) -> Result<Line, ErrorKind> {
    match next_line(lexer, pending)? {
        Some(line) => Ok(line),
        None => Err(end_of_stream(lexer, expected)),
    }
}

/// A parse error for a stream which ended where `expected` was required.
fn end_of_stream<R: Read>(lexer: &Lexer<R>, expected: &'static str) -> ErrorKind {
    ErrorKind::Parse(ParseError {
        stream: lexer.stream(),
        line: lexer.line_number(),
        column: 1,
        kind: ParseErrorKind::UnexpectedLine { expected },
    })
}

/// A parse error for a line of an unexpected type.
fn unexpected(stream: Stream, line: &Line, expected: &'static str) -> ErrorKind {
    ErrorKind::Parse(ParseError {
        stream,
        line: line.number,
        column: 1,
        kind: ParseErrorKind::UnexpectedLine { expected },
    })
}

/// A parse error for a missing header, pedantic mode only.
fn missing_header<R: Read>(lexer: &Lexer<R>, line: Option<&Line>) -> ErrorKind {
    ErrorKind::Parse(ParseError {
        stream: lexer.stream(),
        line: match line {
            Some(line) => line.number,
            None => lexer.line_number(),
        },
        column: 1,
        kind: ParseErrorKind::MissingHeader,
    })
}

impl Checker {
    /// Read an optional header from `lexer`, stashing any other line for the following state.
    fn take_header<R: Read>(
        &self,
        lexer: &mut Lexer<R>,
        pending: &mut Option<Line>,
    ) -> Result<(), ErrorKind> {
        match next_line(lexer, pending)? {
            Some(line) if line.kind == LineKind::Header => {
                log::debug!(target: targets::MACHINE, "Header on the {}.", lexer.stream());
            }

            Some(line) => match self.config.mode {
                Mode::Pedantic => return Err(missing_header(lexer, Some(&line))),
                _ => *pending = Some(line),
            },

            None => match self.config.mode {
                Mode::Pedantic => return Err(missing_header(lexer, None)),
                _ => {}
            },
        }
        Ok(())
    }

    /// Check the interaction and proof streams in lock-step.
    pub(crate) fn check_streams<I: Read, P: Read>(
        &mut self,
        mut interaction: Lexer<I>,
        mut proof: Lexer<P>,
    ) -> Result<(), ErrorKind> {
        let mut state = State::InteractionHeader;
        let mut interaction_pending: Option<Line> = None;
        let mut proof_pending: Option<Line> = None;

        loop {
            log::trace!(target: targets::MACHINE, "State: {state:?}");

            match state {
                State::InteractionHeader => {
                    self.take_header(&mut interaction, &mut interaction_pending)?;
                    state = State::ProofHeader;
                }

                State::ProofHeader => {
                    self.take_header(&mut proof, &mut proof_pending)?;
                    state = State::InteractionInput;
                }

                State::InteractionInput => {
                    match next_line(&mut interaction, &mut interaction_pending)? {
                        None => state = State::End,

                        Some(line) => match line.kind {
                            LineKind::Input => {
                                self.atom_db.import_all(&line.literals);
                                self.saved = Some(line);
                                state = State::ProofInput;
                            }

                            LineKind::Query => {
                                self.open_query(&line)?;
                                self.saved = Some(line);
                                state = State::ProofQuery;
                            }

                            _ => {
                                return Err(unexpected(
                                    Stream::Interaction,
                                    &line,
                                    "'i', 'q', or end of file",
                                ))
                            }
                        },
                    }
                }

                State::ProofInput => {
                    let expected = "'i', 'l', 'd', 'w', or 'r'";
                    let line = require(&mut proof, &mut proof_pending, expected)?;

                    match line.kind {
                        LineKind::Input => {
                            let Some(saved) = self.saved.take() else {
                                return Err(ErrorKind::Fatal(FatalError::UnreachableState));
                            };
                            if !self.atom_db.equal_sets(&line.literals, &saved.literals) {
                                return Err(self.check_error(
                                    Stream::Proof,
                                    &line,
                                    CheckErrorKind::LineMismatch {
                                        saved_line: saved.number,
                                    },
                                ));
                            }

                            let Some(id) = line.id else {
                                return Err(ErrorKind::Fatal(FatalError::UnreachableState));
                            };
                            self.add_input_clause(&line, id)?;
                            state = State::InteractionInput;
                        }

                        LineKind::Learn => self.learn_from(&line)?,
                        LineKind::Delete => self.delete_clauses(&line)?,
                        LineKind::Weaken => self.weaken_clauses(&line)?,
                        LineKind::Restore => self.restore_clauses(&line)?,

                        _ => return Err(unexpected(Stream::Proof, &line, expected)),
                    }
                }

                State::ProofQuery => {
                    let expected = "'q', 'l', 'd', 'w', or 'r'";
                    let line = require(&mut proof, &mut proof_pending, expected)?;

                    match line.kind {
                        LineKind::Query => {
                            let Some(saved) = self.saved.take() else {
                                return Err(ErrorKind::Fatal(FatalError::UnreachableState));
                            };
                            if !self.atom_db.equal_sets(&line.literals, &saved.literals) {
                                return Err(self.check_error(
                                    Stream::Proof,
                                    &line,
                                    CheckErrorKind::LineMismatch {
                                        saved_line: saved.number,
                                    },
                                ));
                            }
                            state = State::ProofCheck;
                        }

                        LineKind::Learn => self.learn_from(&line)?,
                        LineKind::Delete => self.delete_clauses(&line)?,
                        LineKind::Weaken => self.weaken_clauses(&line)?,
                        LineKind::Restore => self.restore_clauses(&line)?,

                        _ => return Err(unexpected(Stream::Proof, &line, expected)),
                    }
                }

                State::ProofCheck => {
                    let expected = "'i', 'l', 'd', 'w', 'r', or 's'";
                    let line = require(&mut proof, &mut proof_pending, expected)?;

                    match line.kind {
                        LineKind::Input => {
                            let Some(id) = line.id else {
                                return Err(ErrorKind::Fatal(FatalError::UnreachableState));
                            };
                            self.add_input_clause(&line, id)?;
                            self.saved = Some(line);
                            state = State::InteractionPropagate;
                        }

                        LineKind::Learn => self.learn_from(&line)?,
                        LineKind::Delete => self.delete_clauses(&line)?,
                        LineKind::Weaken => self.weaken_clauses(&line)?,
                        LineKind::Restore => self.restore_clauses(&line)?,

                        LineKind::Status => {
                            let Some(status) = line.status else {
                                return Err(ErrorKind::Fatal(FatalError::UnreachableState));
                            };
                            state = match status {
                                Status::Satisfiable => State::InteractionSatisfiable,
                                Status::Unsatisfiable => State::InteractionUnsatisfiable,
                                Status::Unknown => State::InteractionUnknown,
                            };
                        }

                        _ => return Err(unexpected(Stream::Proof, &line, expected)),
                    }
                }

                State::InteractionPropagate => {
                    let line = require(&mut interaction, &mut interaction_pending, "'i'")?;

                    match line.kind {
                        LineKind::Input => {
                            let Some(saved) = self.saved.take() else {
                                return Err(ErrorKind::Fatal(FatalError::UnreachableState));
                            };
                            if !self.atom_db.equal_sets(&line.literals, &saved.literals) {
                                return Err(self.check_error(
                                    Stream::Interaction,
                                    &line,
                                    CheckErrorKind::LineMismatch {
                                        saved_line: saved.number,
                                    },
                                ));
                            }
                            state = State::ProofCheck;
                        }

                        _ => return Err(unexpected(Stream::Interaction, &line, "'i'")),
                    }
                }

                State::InteractionSatisfiable => {
                    let line =
                        require(&mut interaction, &mut interaction_pending, "'s SATISFIABLE'")?;

                    match line.status {
                        Some(Status::Satisfiable) => state = State::InteractionSatisfied,
                        _ => {
                            return Err(unexpected(Stream::Interaction, &line, "'s SATISFIABLE'"))
                        }
                    }
                }

                State::InteractionUnsatisfiable => {
                    let line = require(
                        &mut interaction,
                        &mut interaction_pending,
                        "'s UNSATISFIABLE'",
                    )?;

                    match line.status {
                        Some(Status::Unsatisfiable) => state = State::InteractionUnsatisfied,
                        _ => {
                            return Err(unexpected(
                                Stream::Interaction,
                                &line,
                                "'s UNSATISFIABLE'",
                            ))
                        }
                    }
                }

                State::InteractionUnknown => {
                    let line = require(&mut interaction, &mut interaction_pending, "'s UNKNOWN'")?;

                    match line.status {
                        Some(Status::Unknown) => {
                            self.conclude_query(Status::Unknown)?;
                            state = State::InteractionInput;
                        }
                        _ => return Err(unexpected(Stream::Interaction, &line, "'s UNKNOWN'")),
                    }
                }

                State::InteractionSatisfied => {
                    let line = require(&mut interaction, &mut interaction_pending, "'m' or 'v'")?;

                    match line.kind {
                        LineKind::Model => {
                            self.check_model(&line, Stream::Interaction)?;
                            self.saved = Some(line);
                            state = State::ProofModel;
                        }

                        LineKind::Values => {
                            self.check_values(&line, Stream::Interaction)?;
                            self.saved = Some(line);
                            state = State::ProofModel;
                        }

                        _ => return Err(unexpected(Stream::Interaction, &line, "'m' or 'v'")),
                    }
                }

                State::InteractionUnsatisfied => {
                    let line = require(&mut interaction, &mut interaction_pending, "'u' or 'f'")?;

                    match line.kind {
                        LineKind::Core => {
                            self.check_core_assumptions(&line, Stream::Interaction)?;
                            self.saved = Some(line);
                            state = State::ProofCore;
                        }

                        LineKind::Failed => {
                            self.check_failed_assumptions(&line, Stream::Interaction)?;
                            self.saved = Some(line);
                            state = State::ProofCore;
                        }

                        _ => return Err(unexpected(Stream::Interaction, &line, "'u' or 'f'")),
                    }
                }

                State::ProofModel => match next_line(&mut proof, &mut proof_pending)? {
                    Some(line) if line.kind == LineKind::Model => {
                        let Some(saved) = self.saved.take() else {
                            return Err(ErrorKind::Fatal(FatalError::UnreachableState));
                        };
                        self.check_proof_model(&line, &saved)?;
                        self.conclude_query(Status::Satisfiable)?;
                        state = State::InteractionInput;
                    }

                    other => return Err(self.conclusion_missing(&proof, other, "'m'")),
                },

                State::ProofCore => match next_line(&mut proof, &mut proof_pending)? {
                    Some(line) if line.kind == LineKind::Core => {
                        let saved = self.saved.take();
                        self.check_proof_core(&line, saved.as_ref())?;
                        self.conclude_query(Status::Unsatisfiable)?;
                        state = State::InteractionInput;
                    }

                    other => return Err(self.conclusion_missing(&proof, other, "'u'")),
                },

                State::End => {
                    loop {
                        match next_line(&mut proof, &mut proof_pending)? {
                            None => break,

                            Some(line) => match line.kind {
                                LineKind::Learn => self.learn_from(&line)?,
                                LineKind::Delete => self.delete_clauses(&line)?,
                                LineKind::Weaken => self.weaken_clauses(&line)?,
                                LineKind::Restore => self.restore_clauses(&line)?,

                                _ => {
                                    return Err(unexpected(
                                        Stream::Proof,
                                        &line,
                                        "'l', 'd', 'w', 'r', or end of file",
                                    ))
                                }
                            },
                        }
                    }

                    log::info!(target: targets::MACHINE, "Both streams checked.");
                    return Ok(());
                }

                State::SoloInput
                | State::SoloCheck
                | State::SoloModel
                | State::SoloCore
                | State::Unreachable => {
                    return Err(ErrorKind::Fatal(FatalError::UnreachableState))
                }
            }
        }
    }

    /// Check a proof on its own, trusting its interaction lines.
    pub(crate) fn check_proof_alone<P: Read>(
        &mut self,
        mut proof: Lexer<P>,
    ) -> Result<(), ErrorKind> {
        let mut state = State::SoloInput;
        let mut pending: Option<Line> = None;

        self.take_header(&mut proof, &mut pending)?;

        loop {
            log::trace!(target: targets::MACHINE, "State: {state:?}");

            match state {
                State::SoloInput => match next_line(&mut proof, &mut pending)? {
                    None => {
                        log::info!(target: targets::MACHINE, "Proof checked.");
                        return Ok(());
                    }

                    Some(line) => match line.kind {
                        LineKind::Input => {
                            let Some(id) = line.id else {
                                return Err(ErrorKind::Fatal(FatalError::UnreachableState));
                            };
                            self.add_input_clause(&line, id)?;
                        }

                        LineKind::Query => {
                            self.open_query(&line)?;
                            state = State::SoloCheck;
                        }

                        LineKind::Learn => self.learn_from(&line)?,
                        LineKind::Delete => self.delete_clauses(&line)?,
                        LineKind::Weaken => self.weaken_clauses(&line)?,
                        LineKind::Restore => self.restore_clauses(&line)?,

                        _ => {
                            return Err(unexpected(
                                Stream::Proof,
                                &line,
                                "'i', 'l', 'q', 'd', 'w', 'r', or end of file",
                            ))
                        }
                    },
                },

                State::SoloCheck => {
                    let expected = "'i', 'l', 'd', 'w', 'r', or 's'";
                    let line = require(&mut proof, &mut pending, expected)?;

                    match line.kind {
                        LineKind::Input => {
                            let Some(id) = line.id else {
                                return Err(ErrorKind::Fatal(FatalError::UnreachableState));
                            };
                            self.add_input_clause(&line, id)?;
                        }

                        LineKind::Learn => self.learn_from(&line)?,
                        LineKind::Delete => self.delete_clauses(&line)?,
                        LineKind::Weaken => self.weaken_clauses(&line)?,
                        LineKind::Restore => self.restore_clauses(&line)?,

                        LineKind::Status => {
                            let Some(status) = line.status else {
                                return Err(ErrorKind::Fatal(FatalError::UnreachableState));
                            };
                            match status {
                                Status::Satisfiable => state = State::SoloModel,
                                Status::Unsatisfiable => state = State::SoloCore,
                                Status::Unknown => {
                                    self.conclude_query(Status::Unknown)?;
                                    state = State::SoloInput;
                                }
                            }
                        }

                        _ => return Err(unexpected(Stream::Proof, &line, expected)),
                    }
                }

                State::SoloModel => match next_line(&mut proof, &mut pending)? {
                    Some(line) if line.kind == LineKind::Model => {
                        self.check_model(&line, Stream::Proof)?;
                        self.conclude_query(Status::Satisfiable)?;
                        state = State::SoloInput;
                    }

                    other => return Err(self.conclusion_missing(&proof, other, "'m'")),
                },

                State::SoloCore => match next_line(&mut proof, &mut pending)? {
                    Some(line) if line.kind == LineKind::Core => {
                        self.check_core_assumptions(&line, Stream::Proof)?;
                        self.check_implied(&line, -1)?;
                        self.conclude_query(Status::Unsatisfiable)?;
                        state = State::SoloInput;
                    }

                    other => return Err(self.conclusion_missing(&proof, other, "'u'")),
                },

                _ => return Err(ErrorKind::Fatal(FatalError::UnreachableState)),
            }
        }
    }

    /// Learn the lemma of `line`, which must carry an identifier.
    fn learn_from(&mut self, line: &Line) -> Result<(), ErrorKind> {
        let Some(id) = line.id else {
            return Err(ErrorKind::Fatal(FatalError::UnreachableState));
        };
        self.learn_lemma(line, id)
    }

    /// The error for a conclusion the proof failed to provide.
    ///
    /// Relaxed mode recognises the omission as deliberate, though the semantics of part-checking are not pinned down, and so the line is still an error --- a distinct one, naming the mode.
    fn conclusion_missing<R: Read>(
        &self,
        lexer: &Lexer<R>,
        line: Option<Line>,
        expected: &'static str,
    ) -> ErrorKind {
        match self.config.mode {
            Mode::Relaxed => ErrorKind::Check(CheckError {
                stream: Stream::Proof,
                line: match &line {
                    Some(line) => line.number,
                    None => lexer.line_number(),
                },
                kind: CheckErrorKind::RelaxedConclusionMissing,
            }),

            _ => match line {
                Some(line) => unexpected(Stream::Proof, &line, expected),
                None => end_of_stream(lexer, expected),
            },
        }
    }
}
