//! JSON reader for grammar documents.
//!
//! Expressions are internally tagged by `type`, tree-sitter style:
//!
//! ```json
//! { "rules": [
//!     { "name": "E", "alternatives": [
//!         { "type": "SEQ", "members": [
//!             { "type": "REF", "name": "E" },
//!             { "type": "STRING", "value": "+" },
//!             { "type": "REF", "name": "T" } ] },
//!         { "type": "REF", "name": "T" } ] },
//!     { "name": "T", "alternatives": [ { "type": "STRING", "value": "a" } ] }
//! ] }
//! ```
//!
//! An alternative is either a bare expression or an object with `expr`,
//! `on_success` and `on_failure`.

use serde::Deserialize;

use super::types::{ActionDef, AltDef, ExprDef, GrammarDef, RuleDef};

/// Error while reading a grammar document.
#[derive(Debug)]
pub enum GrammarError {
    Json(serde_json::Error),
    /// The document parsed but contains no rules.
    Empty,
}

impl std::fmt::Display for GrammarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Empty => write!(f, "grammar has no rules"),
        }
    }
}

impl std::error::Error for GrammarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            Self::Empty => None,
        }
    }
}

impl GrammarDef {
    /// Parse a grammar document.
    pub fn from_json(json: &str) -> Result<Self, GrammarError> {
        let raw: RawGrammar = serde_json::from_str(json).map_err(GrammarError::Json)?;
        if raw.rules.is_empty() {
            return Err(GrammarError::Empty);
        }
        Ok(raw.into())
    }
}

#[derive(Debug, Deserialize)]
struct RawGrammar {
    rules: Vec<RawRule>,
}

impl From<RawGrammar> for GrammarDef {
    fn from(raw: RawGrammar) -> Self {
        Self {
            rules: raw.rules.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawRule {
    name: String,
    alternatives: Vec<RawAlt>,
    #[serde(default)]
    diag_name: Option<String>,
}

impl From<RawRule> for RuleDef {
    fn from(raw: RawRule) -> Self {
        Self {
            name: raw.name,
            alternatives: raw.alternatives.into_iter().map(Into::into).collect(),
            diag_name: raw.diag_name,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawAlt {
    Full {
        expr: RawExpr,
        #[serde(default)]
        on_success: Option<RawAction>,
        #[serde(default)]
        on_failure: Option<RawAction>,
    },
    Bare(RawExpr),
}

impl From<RawAlt> for AltDef {
    fn from(raw: RawAlt) -> Self {
        match raw {
            RawAlt::Full {
                expr,
                on_success,
                on_failure,
            } => Self {
                expr: expr.into(),
                on_success: on_success.map(Into::into),
                on_failure: on_failure.map(Into::into),
            },
            RawAlt::Bare(expr) => Self::new(expr.into()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawAction {
    #[serde(default)]
    name: String,
    #[serde(default)]
    boolean: bool,
}

impl From<RawAction> for ActionDef {
    fn from(raw: RawAction) -> Self {
        Self {
            name: raw.name,
            boolean: raw.boolean,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
#[allow(clippy::upper_case_acronyms, non_camel_case_types)]
enum RawExpr {
    CHOICE {
        members: Vec<RawExpr>,
    },
    SEQ {
        members: Vec<RawExpr>,
    },
    AND {
        content: Box<RawExpr>,
    },
    NOT {
        content: Box<RawExpr>,
    },
    PLUS {
        content: Box<RawExpr>,
    },
    STAR {
        content: Box<RawExpr>,
    },
    OPTIONAL {
        content: Box<RawExpr>,
    },
    PLUS_UNTIL {
        content: Box<RawExpr>,
        until: Box<RawExpr>,
    },
    STAR_UNTIL {
        content: Box<RawExpr>,
        until: Box<RawExpr>,
    },
    IS {
        content: Box<RawExpr>,
        pattern: Box<RawExpr>,
    },
    IS_NOT {
        content: Box<RawExpr>,
        pattern: Box<RawExpr>,
    },
    REF {
        name: String,
    },
    STRING {
        value: String,
    },
    CLASS {
        chars: String,
        #[serde(default)]
        negated: bool,
    },
    RANGE {
        from: char,
        to: char,
    },
    ANY,
    END,
}

impl From<RawExpr> for ExprDef {
    fn from(raw: RawExpr) -> Self {
        #[allow(clippy::boxed_local)] // Fields are Box<RawExpr>, output needs Box<ExprDef>
        fn conv(content: Box<RawExpr>) -> Box<ExprDef> {
            Box::new(ExprDef::from(*content))
        }

        fn all(members: Vec<RawExpr>) -> Vec<ExprDef> {
            members.into_iter().map(Into::into).collect()
        }

        match raw {
            RawExpr::CHOICE { members } => ExprDef::Choice(all(members)),
            RawExpr::SEQ { members } => ExprDef::Sequence(all(members)),
            RawExpr::AND { content } => ExprDef::And(conv(content)),
            RawExpr::NOT { content } => ExprDef::Not(conv(content)),
            RawExpr::PLUS { content } => ExprDef::Plus(conv(content)),
            RawExpr::STAR { content } => ExprDef::Star(conv(content)),
            RawExpr::OPTIONAL { content } => ExprDef::Query(conv(content)),
            RawExpr::PLUS_UNTIL { content, until } => ExprDef::PlusPlus(conv(content), conv(until)),
            RawExpr::STAR_UNTIL { content, until } => ExprDef::StarPlus(conv(content), conv(until)),
            RawExpr::IS { content, pattern } => ExprDef::Is(conv(content), conv(pattern)),
            RawExpr::IS_NOT { content, pattern } => ExprDef::IsNot(conv(content), conv(pattern)),
            RawExpr::REF { name } => ExprDef::Ref(name),
            RawExpr::STRING { value } => ExprDef::StringLit(value),
            RawExpr::CLASS { chars, negated } => ExprDef::CharClass { chars, negated },
            RawExpr::RANGE { from, to } => ExprDef::Range(from, to),
            RawExpr::ANY => ExprDef::Any,
            RawExpr::END => ExprDef::End,
        }
    }
}
