/*!
Procedures giving the semantics of each line, factored from the [state machine](crate::checker::state).

- [Lifecycle operations](lifecycle) --- introducing, learning, deleting, weakening, and restoring clauses.
- [The RUP check](implied) --- replaying the antecedents of a lemma or core to a conflict.
- [Conclusion checks](conclude) --- models, values, cores, and failed-assumption sets.
*/

pub mod conclude;
pub mod implied;
pub mod lifecycle;
