/*!
Miscellaneous items related to [logging](log).

Calls to the log macro are made throughout the library.
These are intended to provide useful information for extending the library and/or fixing issues.

Note, no log implementation is provided.
For more details, see [log].
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to the [lexer](crate::parse::lexer)
    pub const PARSE: &str = "parse";

    /// Logs related to the [clause database](crate::db::clause)
    pub const CLAUSE_DB: &str = "clause_db";

    /// Logs related to the [RUP check](crate::procedures::implied)
    pub const PROPAGATION: &str = "propagation";

    /// Logs related to [conclusion checks](crate::procedures::conclude)
    pub const CONCLUSION: &str = "conclusion";

    /// Logs related to the [state machine](crate::checker::state)
    pub const MACHINE: &str = "machine";
}
