/*!
A database of variable related things: values, marks, imported flags, and the trail.

# Indexing

The value and mark arrays are indexed by signed literal, mapped to `2·atom + 1` for negative polarity and `2·atom` for positive.
The parser rejects literals whose magnitude reaches [i32::MAX], so the mapping is always defined.

# Invariants

Two invariants are relied on throughout the library:

<div class="warning">
Whenever a literal is assigned, the literal is pushed to the trail, and the value of its negation is set to the opposite value.
So, at every moment outside an assignment, <code>value_of(l) = -value_of(-l)</code>.
</div>

<div class="warning">
The marks are clean outside a single set operation.
Every operation which marks literals unmarks the same literals on every path out, including failures.
</div>
*/

use crate::structures::literal::{Atom, Literal, LiteralExt};

/// The index of a literal into the value and mark arrays.
fn index_of(literal: Literal) -> usize {
    ((literal.atom() as usize) << 1) | (!literal.polarity() as usize)
}

/// A database of variable related things.
#[derive(Default)]
pub struct AtomDB {
    /// The assignment of each literal, in `{-1, 0, +1}`, indexed by literal.
    values: Vec<i8>,

    /// Scratch marks for set operations, indexed by literal.
    marks: Vec<bool>,

    /// Whether the variable has been mentioned by some earlier literal, indexed by atom.
    imported: Vec<bool>,

    /// A count of imported variables.
    imported_count: usize,

    /// The currently assigned literals, in assignment order.
    trail: Vec<Literal>,
}

impl AtomDB {
    /// Import the variable of `literal`, growing the arrays as required.
    /// Returns true if the variable was fresh.
    pub fn import(&mut self, literal: Literal) -> bool {
        let atom = literal.atom() as usize;

        if self.imported.len() <= atom {
            self.imported.resize(atom + 1, false);
            self.values.resize((atom + 1) << 1, 0);
            self.marks.resize((atom + 1) << 1, false);
        }

        match self.imported[atom] {
            true => false,
            false => {
                self.imported[atom] = true;
                self.imported_count += 1;
                true
            }
        }
    }

    /// Import the variable of every literal of `literals`.
    pub fn import_all(&mut self, literals: &[Literal]) {
        for literal in literals {
            self.import(*literal);
        }
    }

    /// The count of imported variables.
    pub fn imported_count(&self) -> usize {
        self.imported_count
    }

    /// True if the variable of `literal` has been imported.
    pub fn is_imported(&self, atom: Atom) -> bool {
        matches!(self.imported.get(atom as usize), Some(true))
    }
}

// The valuation and the trail.
impl AtomDB {
    /// The value of `literal` on the current (partial) valuation.
    pub fn value_of(&self, literal: Literal) -> i8 {
        match self.values.get(index_of(literal)) {
            Some(value) => *value,
            None => 0,
        }
    }

    /// Assign `literal`, pushing it to the trail.
    ///
    /// The literal must be imported and without a value.
    pub fn assign(&mut self, literal: Literal) {
        debug_assert!(self.is_imported(literal.atom()));
        debug_assert_eq!(self.value_of(literal), 0);

        self.values[index_of(literal)] = 1;
        self.values[index_of(literal.negated())] = -1;
        self.trail.push(literal);
    }

    /// The count of literals on the trail.
    pub fn trail_length(&self) -> usize {
        self.trail.len()
    }

    /// Unassign every literal of the trail, truncating the trail to empty.
    pub fn unwind(&mut self) {
        while let Some(literal) = self.trail.pop() {
            self.values[index_of(literal)] = 0;
            self.values[index_of(literal.negated())] = 0;
        }
    }
}

// Set operations through the shared marks.
//
// Every operation leaves the marks clean on return.
impl AtomDB {
    /// True if `literal` is marked.
    pub fn is_marked(&self, literal: Literal) -> bool {
        matches!(self.marks.get(index_of(literal)), Some(true))
    }

    /// Mark each literal of `literals`.
    pub fn mark_all(&mut self, literals: &[Literal]) {
        for literal in literals {
            self.import(*literal);
            self.marks[index_of(*literal)] = true;
        }
    }

    /// Unmark each literal of `literals`.
    pub fn unmark_all(&mut self, literals: &[Literal]) {
        for literal in literals {
            self.marks[index_of(*literal)] = false;
        }
    }

    /// Ok if every literal of `sub` occurs in `sup`, and otherwise the first literal which does not.
    pub fn subset(&mut self, sub: &[Literal], sup: &[Literal]) -> Result<(), Literal> {
        self.mark_all(sup);

        let mut result = Ok(());
        for literal in sub {
            self.import(*literal);
            if !self.is_marked(*literal) {
                result = Err(*literal);
                break;
            }
        }

        self.unmark_all(sup);
        result
    }

    /// True if `a` and `b` hold the same literals, ignoring order and repetition.
    pub fn equal_sets(&mut self, a: &[Literal], b: &[Literal]) -> bool {
        self.subset(a, b).is_ok() && self.subset(b, a).is_ok()
    }

    /// True if some variable occurs in `literals` with both polarities.
    pub fn tautological(&mut self, literals: &[Literal]) -> bool {
        let mut tautology = false;

        for (position, literal) in literals.iter().enumerate() {
            self.import(*literal);
            if self.is_marked(literal.negated()) {
                self.unmark_all(&literals[..position]);
                tautology = true;
                break;
            }
            self.marks[index_of(*literal)] = true;
        }

        if !tautology {
            self.unmark_all(literals);
        }
        tautology
    }

    /// True if no variable occurs in `literals` with both polarities.
    pub fn consistent(&mut self, literals: &[Literal]) -> bool {
        !self.tautological(literals)
    }

    /// Ok if the variable of every literal of `sub` occurs in `sup` with some polarity, and otherwise the first literal whose variable does not.
    pub fn variable_subset(&mut self, sub: &[Literal], sup: &[Literal]) -> Result<(), Literal> {
        self.mark_all(sup);

        let mut result = Ok(());
        for literal in sub {
            self.import(*literal);
            if !self.is_marked(*literal) && !self.is_marked(literal.negated()) {
                result = Err(*literal);
                break;
            }
        }

        self.unmark_all(sup);
        result
    }

    /// The literals of `literals` with repeats removed, first occurrences kept in order.
    pub fn dedup(&mut self, literals: &[Literal]) -> Vec<Literal> {
        let mut unique = Vec::with_capacity(literals.len());

        for literal in literals {
            self.import(*literal);
            if !self.is_marked(*literal) {
                self.marks[index_of(*literal)] = true;
                unique.push(*literal);
            }
        }

        self.unmark_all(&unique);
        unique
    }

    /// Ok if no literal of `a` occurs negated in `b`, and otherwise the first literal of `a` which does.
    pub fn clash(&mut self, a: &[Literal], b: &[Literal]) -> Result<(), Literal> {
        self.mark_all(b);

        let mut result = Ok(());
        for literal in a {
            self.import(*literal);
            if self.is_marked(literal.negated()) {
                result = Err(*literal);
                break;
            }
        }

        self.unmark_all(b);
        result
    }

    /// True if every mark is clear.
    ///
    /// Linear in the imported variables, for use in tests and debug assertions.
    pub fn marks_clean(&self) -> bool {
        self.marks.iter().all(|mark| !mark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_mirror() {
        let mut atoms = AtomDB::default();
        atoms.import_all(&[1, -2, 3]);

        atoms.assign(-2);
        atoms.assign(1);

        assert_eq!(atoms.value_of(-2), 1);
        assert_eq!(atoms.value_of(2), -1);
        assert_eq!(atoms.value_of(1), 1);
        assert_eq!(atoms.value_of(3), 0);
        assert_eq!(atoms.trail_length(), 2);

        atoms.unwind();

        assert_eq!(atoms.trail_length(), 0);
        for literal in [1, -1, 2, -2, 3, -3] {
            assert_eq!(atoms.value_of(literal), 0);
        }
    }

    #[test]
    fn subsets_and_equality() {
        let mut atoms = AtomDB::default();

        assert!(atoms.subset(&[1, -3], &[-3, 2, 1]).is_ok());
        assert_eq!(atoms.subset(&[1, 3], &[-3, 2, 1]), Err(3));
        assert!(atoms.marks_clean());

        assert!(atoms.equal_sets(&[2, 1], &[1, 2, 2]));
        assert!(!atoms.equal_sets(&[2, 1], &[1, 2, 3]));
        assert!(atoms.marks_clean());
    }

    #[test]
    fn tautologies() {
        let mut atoms = AtomDB::default();

        assert!(atoms.tautological(&[1, 2, -1]));
        assert!(atoms.marks_clean());

        assert!(!atoms.tautological(&[1, 2, 1]));
        assert!(atoms.marks_clean());

        assert!(atoms.consistent(&[4, 5, -6]));
        assert!(atoms.marks_clean());
    }

    #[test]
    fn variable_subsets_and_dedup() {
        let mut atoms = AtomDB::default();

        assert!(atoms.variable_subset(&[-1, 2], &[1, 2]).is_ok());
        assert_eq!(atoms.variable_subset(&[-1, 3], &[1, 2]), Err(3));
        assert!(atoms.marks_clean());

        assert_eq!(atoms.dedup(&[1, -2, 1, -2, 3]), vec![1, -2, 3]);
        assert_eq!(atoms.dedup(&[1, -1]), vec![1, -1]);
        assert!(atoms.marks_clean());
    }

    #[test]
    fn clashes() {
        let mut atoms = AtomDB::default();

        assert!(atoms.clash(&[1, 2], &[1, 3]).is_ok());
        assert_eq!(atoms.clash(&[1, 2], &[-2, 3]), Err(2));
        assert!(atoms.marks_clean());
    }
}
