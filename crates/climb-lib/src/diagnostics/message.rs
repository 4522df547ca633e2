/// Diagnostic kinds ordered by priority (highest priority first).
///
/// Resolution problems come first because nothing downstream runs without a
/// resolved graph. Structural and cycle errors make later findings about the
/// same expressions unreliable. Advisory kinds are never errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Name resolution
    DuplicateRule,
    UndefinedReference,

    // Structure
    VoidExpression,
    SeedlessClass,
    Cycle,

    // Left recursion through constructs the ascent cannot climb
    UnsupportedInRecursion,

    // Loops that could spin without consuming input
    NullableRecursionHead,
    NullableRepetition,

    // Actions the ascent cannot honor
    BooleanActionInRecursion,
    FailureActionInRecursion,

    // Advisory
    UnusedRule,
    UnusedClass,
    HiddenAlternatives,
    SuperfluousOptional,
}

/// Error taxonomy the kinds fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    DuplicateName,
    UndefinedReference,
    Structural,
    Cycle,
    UnsupportedRecursion,
    NullableLoop,
    ActionRestriction,
    Advisory,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self.category() {
            Category::Advisory => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Self::DuplicateRule => Category::DuplicateName,
            Self::UndefinedReference => Category::UndefinedReference,
            Self::VoidExpression | Self::SeedlessClass => Category::Structural,
            Self::Cycle => Category::Cycle,
            Self::UnsupportedInRecursion => Category::UnsupportedRecursion,
            Self::NullableRecursionHead | Self::NullableRepetition => Category::NullableLoop,
            Self::BooleanActionInRecursion | Self::FailureActionInRecursion => {
                Category::ActionRestriction
            }
            Self::UnusedRule
            | Self::UnusedClass
            | Self::HiddenAlternatives
            | Self::SuperfluousOptional => Category::Advisory,
        }
    }

    /// Default hint for this kind, automatically included in diagnostics.
    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::SeedlessClass => {
                Some("add an alternative that does not start with a left-recursive call")
            }
            Self::UnsupportedInRecursion => {
                Some("left recursion may only pass through rules, choices and sequences")
            }
            Self::NullableRecursionHead => {
                Some("the ascent could loop without consuming input")
            }
            _ => None,
        }
    }

    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::DuplicateRule => "duplicate rule name",
            Self::UndefinedReference => "undefined reference",
            Self::VoidExpression => "expression is void",
            Self::SeedlessClass => "recursion class has no seed",
            Self::Cycle => "grammar has a cycle",
            Self::UnsupportedInRecursion => "construct not supported in left recursion",
            Self::NullableRecursionHead => {
                "left-recursive sequence starts with a nullable expression"
            }
            Self::NullableRepetition => "argument of repetition is nullable",
            Self::BooleanActionInRecursion => "boolean action in recursive rule",
            Self::FailureActionInRecursion => "action on failure in recursive rule",
            Self::UnusedRule => "rule is never used",
            Self::UnusedClass => "recursion class is never entered",
            Self::HiddenAlternatives => "alternative never fails and hides later ones",
            Self::SuperfluousOptional => "superfluous `?`",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::DuplicateRule => "`{}` is already defined".to_string(),
            Self::UndefinedReference => "`{}` is not defined".to_string(),
            Self::VoidExpression => "`{}` is void".to_string(),
            Self::SeedlessClass => "recursion class of `{}` has no seed".to_string(),
            Self::Cycle => "the grammar has a cycle involving `{}`".to_string(),
            Self::UnsupportedInRecursion => "`{}` is not supported in left recursion".to_string(),
            Self::NullableRecursionHead => {
                "left-recursive `{}` starts with a nullable expression".to_string()
            }
            Self::NullableRepetition => "argument of `{}` is nullable".to_string(),
            Self::UnusedRule => "`{}` is never used".to_string(),
            Self::UnusedClass => "recursion class of `{}` is not used".to_string(),
            Self::SuperfluousOptional => {
                "as `{}` never fails, `?` after it can be dropped".to_string()
            }

            // Callers format the whole sentence
            Self::BooleanActionInRecursion
            | Self::FailureActionInRecursion
            | Self::HiddenAlternatives => "{}".to_string(),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    /// Short form of the expression the finding is about.
    pub(crate) subject: String,
    pub(crate) message: String,
    pub(crate) related: Vec<String>,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, subject: String) -> Self {
        let message = kind.message(Some(&subject));
        let hints = kind
            .default_hint()
            .map(|h| vec![h.to_string()])
            .unwrap_or_default();
        Self {
            kind,
            subject,
            message,
            related: Vec::new(),
            hints,
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn related(&self) -> &[String] {
        &self.related
    }

    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity(), self.message)?;
        for related in &self.related {
            write!(f, " (related: {})", related)?;
        }
        for hint in &self.hints {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}
