/*!
A checker method to decide whether a line is implied by reverse unit propagation.

# Overview

The literals of the candidate line are assumed false, and the antecedents listed on the line are resolved in order.
Under the assumptions each antecedent must simplify to a single unfalsified literal --- the unit --- which is assigned in turn, or to no unfalsified literal at all --- a conflict, at which point the candidate is implied.

No watched literals are kept: the antecedent list fixes the replay order, and every antecedent is visited exactly once.
This is the appeal of the linear format, as the checker never searches for a propagating clause.

The sign decides how the candidate's literals are read:
- `+1` for a lemma, whose literals are assumed false.
- `-1` for an unsatisfiable core, whose literals are assumed true.

# Complications

Two exits short-circuit the replay:
- A formula which already contains the empty clause implies everything, so the check succeeds without work.
- A candidate carrying some variable with both polarities is a tautology, noticed when an assumption is already falsified, and likewise implied.

Upon return all fresh assignments are unwound, whatever the outcome: the trail is truncated to empty.
*/

use crate::{
    checker::Checker,
    misc::log::targets::{self},
    structures::{line::Line, literal::Literal},
    types::err::{ErrorKind, LineErrorKind},
};

impl Checker {
    /// True, vacuously, or an error detailing why the line is not implied.
    ///
    /// For documentation see [procedures::implied](crate::procedures::implied).
    pub(crate) fn check_implied(&mut self, line: &Line, sign: i32) -> Result<(), ErrorKind> {
        let outcome = self.replay(line, sign);
        self.atom_db.unwind();
        outcome
    }

    /// The replay itself, with assignments left on the trail for [check_implied](Checker::check_implied) to unwind.
    fn replay(&mut self, line: &Line, sign: i32) -> Result<(), ErrorKind> {
        if self.inconsistent {
            log::trace!(target: targets::PROPAGATION, "Formula inconsistent, line {} implied.", line.number);
            return Ok(());
        }

        // Assume the literals of the line, negated for a lemma and as given for a core.
        for literal in &line.literals {
            let assumption: Literal = -sign * *literal;

            match self.atom_db.value_of(assumption) {
                1 => continue,

                -1 => {
                    log::trace!(target: targets::PROPAGATION, "Line {} is tautological.", line.number);
                    return Ok(());
                }

                _ => {
                    self.atom_db.assign(assumption);
                    self.counters_mut().assignments += 1;
                }
            }
        }

        'antecedent_loop: for id in &line.antecedents {
            let id = *id;
            if id < 0 {
                return Err(self.line_error(line, LineErrorKind::NegativeAntecedent(id)));
            }

            let antecedent = match self.clause_db.find_active(id) {
                Some(clause) => clause.clone(),

                None => {
                    let kind = match self.clause_db.find_inactive(id).is_some() {
                        true => LineErrorKind::WeakenedAntecedent(id),
                        false => LineErrorKind::UnknownAntecedent(id),
                    };
                    return Err(self.line_error(line, kind));
                }
            };

            self.counters_mut().antecedents += 1;

            // Skipping falsified literals, the antecedent must shrink to a unit, or to nothing.
            let mut unit: Option<Literal> = None;
            for literal in antecedent.literals() {
                if self.atom_db.value_of(*literal) == -1 {
                    continue;
                }
                match unit {
                    None => unit = Some(*literal),

                    Some(other) if other == *literal => {}

                    Some(_) => {
                        return Err(
                            self.line_error(line, LineErrorKind::UnresolvableAntecedent(id))
                        );
                    }
                }
            }

            match unit {
                None => {
                    log::trace!(target: targets::PROPAGATION, "Conflict on antecedent {id}, line {} implied.", line.number);
                    return Ok(());
                }

                Some(literal) => {
                    if self.atom_db.value_of(literal) == 0 {
                        self.atom_db.assign(literal);
                        self.counters_mut().assignments += 1;
                    }
                    continue 'antecedent_loop;
                }
            }
        }

        Err(self.line_error(line, LineErrorKind::ResolutionFailed))
    }
}
