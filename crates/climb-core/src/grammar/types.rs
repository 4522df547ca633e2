//! Grammar input type definitions.

/// Complete grammar: rules in declaration order. The first rule is the start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrammarDef {
    pub rules: Vec<RuleDef>,
}

/// `name = alt / alt ... <diag_name> ;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDef {
    pub name: String,
    pub alternatives: Vec<AltDef>,
    /// Name used in failure messages instead of the rule name.
    pub diag_name: Option<String>,
}

/// One alternative of a rule with its optional actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AltDef {
    pub expr: ExprDef,
    /// `{name}`, or `{&name}` when boolean.
    pub on_success: Option<ActionDef>,
    /// `~{name}`.
    pub on_failure: Option<ActionDef>,
}

/// Named semantic action.
///
/// An empty name means "use the default", which the analysis fills in from
/// the rule name and alternative position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionDef {
    pub name: String,
    /// Boolean actions may reject a successful match.
    pub boolean: bool,
}

/// Expression tree as written by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprDef {
    /// `a / b / ...`
    Choice(Vec<ExprDef>),
    /// `a b ...`
    Sequence(Vec<ExprDef>),
    /// `&a`
    And(Box<ExprDef>),
    /// `!a`
    Not(Box<ExprDef>),
    /// `a+`
    Plus(Box<ExprDef>),
    /// `a*`
    Star(Box<ExprDef>),
    /// `a?`
    Query(Box<ExprDef>),
    /// `a++ b`: one or more `a` up to and including `b`.
    PlusPlus(Box<ExprDef>, Box<ExprDef>),
    /// `a*+ b`: zero or more `a` up to and including `b`.
    StarPlus(Box<ExprDef>, Box<ExprDef>),
    /// `a:b`: `b` matches exactly the text matched by `a`.
    Is(Box<ExprDef>, Box<ExprDef>),
    /// `a:!b`: `b` does not match exactly the text matched by `a`.
    IsNot(Box<ExprDef>, Box<ExprDef>),
    /// Name of a rule.
    Ref(String),
    /// `"text"`
    StringLit(String),
    /// `[chars]`, or `^[chars]` when negated.
    CharClass { chars: String, negated: bool },
    /// `[a-z]`
    Range(char, char),
    /// `_`
    Any,
    /// `!_`
    End,
}

impl GrammarDef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule(mut self, rule: RuleDef) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl RuleDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alternatives: Vec::new(),
            diag_name: None,
        }
    }

    /// Append an alternative without actions.
    pub fn alt(mut self, expr: ExprDef) -> Self {
        self.alternatives.push(AltDef::new(expr));
        self
    }

    /// Append an alternative with actions.
    pub fn alt_with(mut self, alt: AltDef) -> Self {
        self.alternatives.push(alt);
        self
    }

    pub fn diag(mut self, name: impl Into<String>) -> Self {
        self.diag_name = Some(name.into());
        self
    }
}

impl AltDef {
    pub fn new(expr: ExprDef) -> Self {
        Self {
            expr,
            on_success: None,
            on_failure: None,
        }
    }

    pub fn on_success(mut self, action: ActionDef) -> Self {
        self.on_success = Some(action);
        self
    }

    pub fn on_failure(mut self, action: ActionDef) -> Self {
        self.on_failure = Some(action);
        self
    }
}

impl ActionDef {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            boolean: false,
        }
    }

    /// Action with the default name.
    pub fn unnamed() -> Self {
        Self::default()
    }

    pub fn boolean(mut self) -> Self {
        self.boolean = true;
        self
    }
}
