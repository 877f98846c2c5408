/*!
Counters for a check, and the formatted summary of them.

The [Display] implementation of [Counters] writes the summary as a block of `c`-prefixed lines, matching the output conventions of SAT tooling.
*/

/// Counts for various things which count.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Counters {
    /// A count of queries begun.
    pub queries: usize,

    /// A count of queries concluded satisfiable.
    pub satisfiable: usize,

    /// A count of queries concluded unsatisfiable.
    pub unsatisfiable: usize,

    /// A count of queries concluded without a verdict.
    pub unknown: usize,

    /// A count of input clauses introduced.
    pub inputs: usize,

    /// A count of lemmas checked and added.
    pub lemmas: usize,

    /// A count of clauses deleted.
    pub deletions: usize,

    /// A count of clauses weakened.
    pub weakenings: usize,

    /// A count of clauses restored.
    pub restorations: usize,

    /// A count of literals assigned while replaying resolutions.
    pub assignments: usize,

    /// A count of antecedents resolved while replaying resolutions.
    pub antecedents: usize,
}

impl std::fmt::Display for Counters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "c checked {} queries ({} satisfiable, {} unsatisfiable, {} unknown)",
            self.queries, self.satisfiable, self.unsatisfiable, self.unknown
        )?;
        writeln!(
            f,
            "c {} input clauses, {} lemmas, {} deleted, {} weakened, {} restored",
            self.inputs, self.lemmas, self.deletions, self.weakenings, self.restorations
        )?;
        writeln!(
            f,
            "c {} antecedents resolved with {} assignments",
            self.antecedents, self.assignments
        )
    }
}
