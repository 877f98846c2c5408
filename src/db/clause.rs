/*!
A database of clause related things.

The database owns every clause, handing out reference-counted handles.
Two [identifier maps](crate::generic::id_map) distinguish the *active* clauses from the *inactive* (weakened) clauses, and a clause is in at most one of the two at any moment.
Input clauses additionally live in an ordered list, as every model check requires them, and so are retained until the database is dropped even if deleted from the indices.

Identifier reuse is a matter of [configuration](crate::config::Config):
- By default an identifier may be introduced again once its clause has been deleted, though never while its clause is in either index.
- With reuse forbidden, a [bit set](crate::generic::bit_set) records every identifier ever introduced, and any repeat is an error.
*/

use std::rc::Rc;

use crate::{
    config::Config,
    generic::{bit_set::BitSet, id_map::IdMap},
    misc::log::targets::{self},
    structures::clause::Clause,
    types::err::LineErrorKind,
};

/// A database of clause related things.
pub struct ClauseDB {
    /// The active clauses, by identifier.
    active: IdMap<Rc<Clause>>,

    /// The inactive (weakened) clauses, by identifier.
    inactive: IdMap<Rc<Clause>>,

    /// The input clauses, in introduction order, for model checks.
    inputs: Vec<Rc<Clause>>,

    /// Every identifier ever introduced, when reuse is forbidden.
    used: Option<BitSet>,
}

impl ClauseDB {
    /// A new [ClauseDB] with the reuse policy derived from `config`.
    pub fn new(config: &Config) -> Self {
        ClauseDB {
            active: IdMap::default(),
            inactive: IdMap::default(),
            inputs: Vec::default(),
            used: match config.no_reuse {
                true => Some(BitSet::default()),
                false => None,
            },
        }
    }

    /// The active clause with identifier `id`, if any.
    pub fn find_active(&self, id: i64) -> Option<&Rc<Clause>> {
        self.active.get(id)
    }

    /// The inactive clause with identifier `id`, if any.
    pub fn find_inactive(&self, id: i64) -> Option<&Rc<Clause>> {
        self.inactive.get(id)
    }

    /// The input clauses, in introduction order.
    pub fn inputs(&self) -> &[Rc<Clause>] {
        &self.inputs
    }

    /// The count of clauses in the active index.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Take ownership of `clause` and insert it into the active index.
    ///
    /// Fails if the identifier is in either index, or was ever used and reuse is forbidden.
    pub fn introduce(&mut self, clause: Clause) -> Result<Rc<Clause>, LineErrorKind> {
        let id = clause.id();

        if let Some(used) = &mut self.used {
            if !used.insert(id as u64) {
                return Err(LineErrorKind::UsedIdentifier(id));
            }
        }

        if self.active.contains(id) || self.inactive.contains(id) {
            return Err(LineErrorKind::ActiveIdentifier(id));
        }

        log::trace!(target: targets::CLAUSE_DB, "Introduced {id}: {clause}");

        let clause = Rc::new(clause);
        if clause.is_input() {
            self.inputs.push(clause.clone());
        }
        self.active.insert(id, clause.clone());

        Ok(clause)
    }

    /// Remove the clause with identifier `id` from the active index.
    ///
    /// A learned clause is freed, while an input clause is retained for model checks.
    pub fn delete(&mut self, id: i64) -> Result<(), LineErrorKind> {
        match self.active.remove(id) {
            Some(clause) => {
                log::trace!(target: targets::CLAUSE_DB, "Deleted {id}: {clause}");
                Ok(())
            }

            None => match self.inactive.contains(id) {
                true => Err(LineErrorKind::WeakenedClause(id)),
                false => Err(LineErrorKind::UnknownClause(id)),
            },
        }
    }

    /// Move the clause with identifier `id` from the active to the inactive index.
    pub fn weaken(&mut self, id: i64) -> Result<(), LineErrorKind> {
        match self.active.remove(id) {
            Some(clause) => {
                log::trace!(target: targets::CLAUSE_DB, "Weakened {id}");
                clause.set_weakened(true);
                self.inactive.insert(id, clause);
                Ok(())
            }

            None => match self.inactive.contains(id) {
                true => Err(LineErrorKind::WeakenedClause(id)),
                false => Err(LineErrorKind::UnknownClause(id)),
            },
        }
    }

    /// Move the clause with identifier `id` from the inactive to the active index.
    pub fn restore(&mut self, id: i64) -> Result<(), LineErrorKind> {
        match self.inactive.remove(id) {
            Some(clause) => {
                log::trace!(target: targets::CLAUSE_DB, "Restored {id}");
                clause.set_weakened(false);
                self.active.insert(id, clause);
                Ok(())
            }

            None => match self.active.contains(id) {
                true => Err(LineErrorKind::NotWeakened(id)),
                false => Err(LineErrorKind::UnknownClause(id)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn fresh_db(no_reuse: bool) -> ClauseDB {
        ClauseDB::new(&Config {
            no_reuse,
            ..Config::default()
        })
    }

    #[test]
    fn weaken_restore_round_trip() {
        let mut db = fresh_db(false);

        db.introduce(Clause::new(3, 1, false, false, vec![1, 2])).unwrap();

        assert!(db.weaken(3).is_ok());
        assert!(db.find_active(3).is_none());
        assert!(db.find_inactive(3).is_some_and(|c| c.is_weakened()));

        assert!(db.restore(3).is_ok());
        let restored = db.find_active(3).unwrap();
        assert!(!restored.is_weakened());
        assert_eq!(restored.literals(), &[1, 2]);
    }

    #[test]
    fn deleted_inputs_are_retained() {
        let mut db = fresh_db(false);

        db.introduce(Clause::new(1, 1, true, false, vec![5])).unwrap();
        assert!(db.delete(1).is_ok());

        assert!(db.find_active(1).is_none());
        assert_eq!(db.inputs().len(), 1);
        assert_eq!(db.inputs()[0].literals(), &[5]);
    }

    #[test]
    fn reuse_policies() {
        let mut db = fresh_db(false);
        db.introduce(Clause::new(7, 1, false, false, vec![1])).unwrap();

        assert_eq!(
            db.introduce(Clause::new(7, 2, false, false, vec![2])).err(),
            Some(LineErrorKind::ActiveIdentifier(7))
        );

        db.delete(7).unwrap();
        assert!(db.introduce(Clause::new(7, 3, false, false, vec![2])).is_ok());

        let mut strict = fresh_db(true);
        strict.introduce(Clause::new(7, 1, false, false, vec![1])).unwrap();
        strict.delete(7).unwrap();

        assert_eq!(
            strict.introduce(Clause::new(7, 2, false, false, vec![2])).err(),
            Some(LineErrorKind::UsedIdentifier(7))
        );
    }

    #[test]
    fn lifecycle_errors() {
        let mut db = fresh_db(false);
        db.introduce(Clause::new(2, 1, false, false, vec![1])).unwrap();
        db.weaken(2).unwrap();

        assert_eq!(db.delete(2).err(), Some(LineErrorKind::WeakenedClause(2)));
        assert_eq!(db.weaken(2).err(), Some(LineErrorKind::WeakenedClause(2)));
        assert_eq!(db.restore(9).err(), Some(LineErrorKind::UnknownClause(9)));

        db.restore(2).unwrap();
        assert_eq!(db.restore(2).err(), Some(LineErrorKind::NotWeakened(2)));
    }
}
