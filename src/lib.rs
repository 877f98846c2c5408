/*!
A checker for incremental SAT solver proofs written in the linear incremental DRUP (LIDRUP) format.

An incremental SAT solver interacts with a user through a sequence of input clauses, queries under assumptions, and conclusions.
lidrup-check independently verifies that every derivation step and every reported verdict of such an interaction is justified by reverse unit propagation (RUP) against the declared clauses.

The checker consumes up to two text streams read in lock-step:
- An *interaction* trace (`p icnf`) recording what the user handed to the solver and what the solver answered.
- A *proof* trace (`p lidrup`), a superset of the interaction, additionally recording every learned lemma, deletion, weakening, and restoration.

Either both streams are given and cross-checked line by line, or the proof stream alone is given and its interaction lines are trusted as the user's inputs.

# Orientation

The library is designed around the core structure of a [checker](crate::checker::Checker).

Internally, and at a high-level, a check is viewed in terms of a handful of databases driven by a state machine:
- Clauses, their identifiers, and the active/weakened distinction are stored in a [clause database](crate::db::clause).
- Assignments, set-operation marks, and the trail are stored in an [atom database](crate::db::atom).
- The [state machine](crate::checker) decides which stream to read next, and hands each line to a [lifecycle operation](crate::db::clause), the [RUP check](crate::procedures::implied), or a [conclusion check](crate::procedures::conclude).

Useful starting points, then, may be:
- The [state machine](crate::checker::state) to inspect the synchronisation of the two streams.
- The [RUP check](crate::procedures::implied) to inspect how lemmas and cores are justified.
- The [lexer](crate::parse::lexer) for the wire format.

# Example

```rust
# use lidrup_check::{checker::Checker, config::Config};
let icnf: &[u8] = b"p icnf
i 1 2 0
i -1 2 0
q 1 0
s SATISFIABLE
m 1 2 0
";

let lidrup: &[u8] = b"p lidrup
i 1 1 2 0
i 2 -1 2 0
q 1 0
s SATISFIABLE
m 1 2 0
";

let mut checker = Checker::new(Config::default());
assert!(checker.check(Some(icnf), lidrup).is_ok());
```

# Logs

To help diagnose issues detailed calls to [log!](log) are made, and a variety of targets are defined in order to help narrow output to relevant parts of the library.
The targets are listed in [misc::log].
No log implementation is provided by the library; the CLI installs one on request.
*/

#![allow(clippy::collapsible_else_if)]
#![allow(clippy::single_match)]

pub mod checker;
pub mod procedures;

pub mod config;
pub mod structures;
pub mod types;

pub mod generic;

pub mod parse;

pub mod reports;

pub mod db;

pub mod misc;
