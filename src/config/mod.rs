/*!
Configuration of a checker.

All configuration for a checker is contained within a [Config], fixed when the checker is created.
*/

/// How demanding the checker is about optional parts of the wire format.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
    /// The default: headers are optional, every conclusion is required and verified.
    Strict,

    /// Tolerate a proof which omits `m`/`u` conclusions.
    ///
    /// The precise semantics of relaxed checking are not pinned down, and so a relaxed-only input is reported as an error rather than part-checked.
    Relaxed,

    /// Headers and interaction conclusions are required.
    Pedantic,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::Relaxed => write!(f, "relaxed"),
            Self::Pedantic => write!(f, "pedantic"),
        }
    }
}

/// The primary configuration structure.
#[derive(Clone, Debug)]
pub struct Config {
    /// Which mode to check in.
    pub mode: Mode,

    /// Forbid reusing clause identifiers, ever.
    ///
    /// Without this, an identifier may be reused once its clause has been deleted.
    pub no_reuse: bool,

    /// Verbosity of the CLI, with `-1` limiting output to errors.
    pub verbosity: i8,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            mode: Mode::Strict,
            no_reuse: false,
            verbosity: 0,
        }
    }
}
