/*!
Checker methods for the lifecycle of a clause.

Input clauses and lemmas are introduced to the active index, and later lines may delete, weaken, or restore them by identifier.
Literal sequences are deduplicated on introduction, and a clause which introduces or derives the empty clause flips the checker to inconsistent.
*/

use crate::{
    checker::Checker,
    misc::log::targets::{self},
    structures::{clause::Clause, line::Line},
    types::err::{ErrorKind, LineErrorKind},
};

impl Checker {
    /// Introduce the input clause of `line`, keyed by `id`.
    ///
    /// Input clauses are taken on trust, so the only checks are on the identifier.
    pub(crate) fn add_input_clause(&mut self, line: &Line, id: i64) -> Result<(), ErrorKind> {
        self.atom_db.import_all(&line.literals);

        let literals = self.atom_db.dedup(&line.literals);
        let tautological = self.atom_db.tautological(&literals);

        if literals.is_empty() {
            log::info!(target: targets::CLAUSE_DB, "Input clause {id} is empty.");
            self.inconsistent = true;
        }

        let clause = Clause::new(id, line.number, true, tautological, literals);
        match self.clause_db.introduce(clause) {
            Ok(_) => {
                self.counters_mut().inputs += 1;
                Ok(())
            }
            Err(kind) => Err(self.line_error(line, kind)),
        }
    }

    /// Check the lemma of `line` is implied, and introduce it, keyed by `id`.
    pub(crate) fn learn_lemma(&mut self, line: &Line, id: i64) -> Result<(), ErrorKind> {
        self.atom_db.import_all(&line.literals);
        self.check_implied(line, 1)?;

        let literals = self.atom_db.dedup(&line.literals);
        let tautological = self.atom_db.tautological(&literals);

        if literals.is_empty() {
            log::info!(target: targets::CLAUSE_DB, "Lemma {id} is the empty clause.");
            self.inconsistent = true;
        }

        let clause = Clause::new(id, line.number, false, tautological, literals);
        match self.clause_db.introduce(clause) {
            Ok(_) => {
                self.counters_mut().lemmas += 1;
                Ok(())
            }
            Err(kind) => Err(self.line_error(line, kind)),
        }
    }

    /// Delete each clause listed on `line`.
    pub(crate) fn delete_clauses(&mut self, line: &Line) -> Result<(), ErrorKind> {
        for id in &line.antecedents {
            if *id < 0 {
                return Err(self.line_error(line, LineErrorKind::NegativeIdentifier(*id)));
            }
            match self.clause_db.delete(*id) {
                Ok(()) => self.counters_mut().deletions += 1,
                Err(kind) => return Err(self.line_error(line, kind)),
            }
        }
        Ok(())
    }

    /// Weaken each clause listed on `line`.
    pub(crate) fn weaken_clauses(&mut self, line: &Line) -> Result<(), ErrorKind> {
        for id in &line.antecedents {
            if *id < 0 {
                return Err(self.line_error(line, LineErrorKind::NegativeIdentifier(*id)));
            }
            match self.clause_db.weaken(*id) {
                Ok(()) => self.counters_mut().weakenings += 1,
                Err(kind) => return Err(self.line_error(line, kind)),
            }
        }
        Ok(())
    }

    /// Restore each clause listed on `line`.
    pub(crate) fn restore_clauses(&mut self, line: &Line) -> Result<(), ErrorKind> {
        for id in &line.antecedents {
            if *id < 0 {
                return Err(self.line_error(line, LineErrorKind::NegativeIdentifier(*id)));
            }
            match self.clause_db.restore(*id) {
                Ok(()) => self.counters_mut().restorations += 1,
                Err(kind) => return Err(self.line_error(line, kind)),
            }
        }
        Ok(())
    }
}
