/*!
Databases for holding the state of a check.

- The [clause database](crate::db::clause) owns every clause and keyes the active and inactive indices by clause identifier.
- The [atom database](crate::db::atom) holds the valuation, the trail, the set-operation marks, and which variables have been imported.

Fields of the databases are private to ensure the use of methods which may be needed to uphold invariants.
*/

pub mod atom;
pub mod clause;
