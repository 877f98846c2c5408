/*!
Checker methods for conclusion checks.

A satisfiable verdict is concluded by a model, which must be consistent, satisfy every assumption of the query, and satisfy every non-tautological input clause.
An unsatisfiable verdict is concluded by a core, which must draw on the assumptions of the query and be refuted by [reverse unit propagation](crate::procedures::implied) with each core literal taken as true.

When two streams are read the proof's conclusion is additionally matched against the saved interaction line: by set equality against an `m` or `u` line, and by the absence of opposite-sign literals against an `f` line.
*/

use crate::{
    checker::Checker,
    misc::log::targets::{self},
    structures::line::{Line, LineKind, Stream},
    types::err::{CheckErrorKind, ErrorKind},
};

impl Checker {
    /// Check a full model: consistency, the query, and every input clause.
    pub(crate) fn check_model(&mut self, line: &Line, stream: Stream) -> Result<(), ErrorKind> {
        if !self.atom_db.consistent(&line.literals) {
            return Err(self.check_error(stream, line, CheckErrorKind::InconsistentLine));
        }

        if let Err(missed) = self.atom_db.subset(&self.query, &line.literals) {
            return Err(self.check_error(
                stream,
                line,
                CheckErrorKind::ModelMissesAssumption(missed),
            ));
        }

        // With the model marked, an input clause is satisfied just in case some literal is marked.
        self.atom_db.mark_all(&line.literals);

        let mut unsatisfied = None;
        for clause in self.clause_db.inputs() {
            if clause.is_tautological() {
                continue;
            }
            if !clause.literals().iter().any(|l| self.atom_db.is_marked(*l)) {
                unsatisfied = Some((clause.id(), clause.line()));
                break;
            }
        }

        self.atom_db.unmark_all(&line.literals);

        match unsatisfied {
            None => {
                log::info!(target: targets::CONCLUSION, "Model of line {} verified.", line.number);
                Ok(())
            }
            Some((id, clause_line)) => Err(self.check_error(
                stream,
                line,
                CheckErrorKind::ModelMissesClause { id, clause_line },
            )),
        }
    }

    /// Check partial values: consistency alone.
    pub(crate) fn check_values(&mut self, line: &Line, stream: Stream) -> Result<(), ErrorKind> {
        match self.atom_db.consistent(&line.literals) {
            true => Ok(()),
            false => Err(self.check_error(stream, line, CheckErrorKind::InconsistentLine)),
        }
    }

    /// Check an interaction core: consistency, and each literal an assumption of the query.
    pub(crate) fn check_core_assumptions(
        &mut self,
        line: &Line,
        stream: Stream,
    ) -> Result<(), ErrorKind> {
        if !self.atom_db.consistent(&line.literals) {
            return Err(self.check_error(stream, line, CheckErrorKind::InconsistentLine));
        }

        match self.atom_db.subset(&line.literals, &self.query) {
            Ok(()) => Ok(()),
            Err(outsider) => {
                Err(self.check_error(stream, line, CheckErrorKind::CoreNotInQuery(outsider)))
            }
        }
    }

    /// Check a failed-assumption set: consistency, and each variable touched by the query.
    pub(crate) fn check_failed_assumptions(
        &mut self,
        line: &Line,
        stream: Stream,
    ) -> Result<(), ErrorKind> {
        if !self.atom_db.consistent(&line.literals) {
            return Err(self.check_error(stream, line, CheckErrorKind::InconsistentLine));
        }

        match self.atom_db.variable_subset(&line.literals, &self.query) {
            Ok(()) => Ok(()),
            Err(outsider) => {
                Err(self.check_error(stream, line, CheckErrorKind::FailedNotInQuery(outsider)))
            }
        }
    }

    /// Check the proof's model against the saved interaction line, by set equality.
    pub(crate) fn check_proof_model(
        &mut self,
        line: &Line,
        saved: &Line,
    ) -> Result<(), ErrorKind> {
        match self.atom_db.equal_sets(&line.literals, &saved.literals) {
            true => Ok(()),
            false => Err(self.check_error(
                Stream::Proof,
                line,
                CheckErrorKind::LineMismatch {
                    saved_line: saved.number,
                },
            )),
        }
    }

    /// Check the proof's core: a subset of the query, matched against the saved interaction conclusion, and refuted by resolution.
    ///
    /// The saved line is an interaction `u`, requiring set equality, or an interaction `f`, requiring that no core literal occurs in it with the opposite sign.
    pub(crate) fn check_proof_core(
        &mut self,
        line: &Line,
        saved: Option<&Line>,
    ) -> Result<(), ErrorKind> {
        if let Err(outsider) = self.atom_db.subset(&line.literals, &self.query) {
            return Err(self.check_error(
                Stream::Proof,
                line,
                CheckErrorKind::CoreNotInQuery(outsider),
            ));
        }

        if let Some(saved) = saved {
            match saved.kind {
                LineKind::Core => {
                    if !self.atom_db.equal_sets(&line.literals, &saved.literals) {
                        return Err(self.check_error(
                            Stream::Proof,
                            line,
                            CheckErrorKind::LineMismatch {
                                saved_line: saved.number,
                            },
                        ));
                    }
                }

                LineKind::Failed => {
                    if let Err(clashing) = self.atom_db.clash(&line.literals, &saved.literals) {
                        return Err(self.check_error(
                            Stream::Proof,
                            line,
                            CheckErrorKind::CoreClashesWithFailed(clashing),
                        ));
                    }
                }

                _ => {}
            }
        }

        self.check_implied(line, -1)?;

        log::info!(target: targets::CONCLUSION, "Core of line {} verified.", line.number);
        Ok(())
    }
}
