//! Short constructors for assembling grammars in code.
//!
//! ```
//! use climb_core::grammar::dsl::*;
//! use climb_core::grammar::{GrammarDef, RuleDef};
//!
//! // E = E "+" T / T ; T = [0-9] ;
//! let grammar = GrammarDef::new()
//!     .rule(RuleDef::new("E").alt(seq([name("E"), lit("+"), name("T")])).alt(name("T")))
//!     .rule(RuleDef::new("T").alt(range('0', '9')));
//! assert_eq!(grammar.rules.len(), 2);
//! ```

use super::ExprDef;

pub fn name(rule: impl Into<String>) -> ExprDef {
    ExprDef::Ref(rule.into())
}

pub fn lit(text: impl Into<String>) -> ExprDef {
    ExprDef::StringLit(text.into())
}

pub fn class(chars: impl Into<String>) -> ExprDef {
    ExprDef::CharClass {
        chars: chars.into(),
        negated: false,
    }
}

pub fn not_class(chars: impl Into<String>) -> ExprDef {
    ExprDef::CharClass {
        chars: chars.into(),
        negated: true,
    }
}

pub fn range(from: char, to: char) -> ExprDef {
    ExprDef::Range(from, to)
}

pub fn any() -> ExprDef {
    ExprDef::Any
}

pub fn end() -> ExprDef {
    ExprDef::End
}

pub fn seq(items: impl IntoIterator<Item = ExprDef>) -> ExprDef {
    ExprDef::Sequence(items.into_iter().collect())
}

pub fn choice(items: impl IntoIterator<Item = ExprDef>) -> ExprDef {
    ExprDef::Choice(items.into_iter().collect())
}

impl ExprDef {
    /// `&self`
    pub fn and(self) -> Self {
        Self::And(Box::new(self))
    }

    /// `!self`
    pub fn not(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// `self+`
    pub fn plus(self) -> Self {
        Self::Plus(Box::new(self))
    }

    /// `self*`
    pub fn star(self) -> Self {
        Self::Star(Box::new(self))
    }

    /// `self?`
    pub fn opt(self) -> Self {
        Self::Query(Box::new(self))
    }

    /// `self++ until`
    pub fn plus_until(self, until: ExprDef) -> Self {
        Self::PlusPlus(Box::new(self), Box::new(until))
    }

    /// `self*+ until`
    pub fn star_until(self, until: ExprDef) -> Self {
        Self::StarPlus(Box::new(self), Box::new(until))
    }

    /// `self:pattern`
    pub fn is(self, pattern: ExprDef) -> Self {
        Self::Is(Box::new(self), Box::new(pattern))
    }

    /// `self:!pattern`
    pub fn is_not(self, pattern: ExprDef) -> Self {
        Self::IsNot(Box::new(self), Box::new(pattern))
    }
}
