/*!
Literals, represented as signed 32-bit integers.

The absolute value of the integer is the atom (variable) of the literal, and the sign of the integer is the polarity of the literal.
Zero terminates sequences on the wire and so never appears as a literal, and the parser rejects magnitudes at or above [i32::MAX] so negation is always defined.
*/

/// An atom (aka. a variable), by index.
pub type Atom = u32;

/// A literal, aliased to an integer.
pub type Literal = i32;

/// Methods for reading the parts of an integer literal.
pub trait LiteralExt {
    /// The atom of the literal.
    fn atom(&self) -> Atom;

    /// The polarity of the literal, true if positive.
    fn polarity(&self) -> bool;

    /// The negation of the literal.
    fn negated(&self) -> Literal;
}

impl LiteralExt for Literal {
    fn atom(&self) -> Atom {
        self.unsigned_abs()
    }

    fn polarity(&self) -> bool {
        *self > 0
    }

    fn negated(&self) -> Literal {
        -*self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parts() {
        let literal: Literal = -79;

        assert_eq!(literal.atom(), 79);
        assert!(!literal.polarity());
        assert_eq!(literal.negated(), 79);
        assert_eq!(literal.negated().negated(), literal);
    }
}
