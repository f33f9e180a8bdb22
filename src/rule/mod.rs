//! Rule line value type.

use std::fmt;

use crate::error::RuleLineError;
use crate::RuleType;

/// A single `TYPE,CONTENT` line of the output rule list.
///
/// Content is never empty and never contains a line break, so every
/// rule occupies exactly one line of the written artifact.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuleLine {
    rule_type: RuleType,
    content: String,
}

impl RuleLine {
    /// Create a rule line, validating its content.
    pub fn new(rule_type: RuleType, content: impl Into<String>) -> Result<Self, RuleLineError> {
        let content = content.into();
        if content.is_empty() {
            return Err(RuleLineError::EmptyContent);
        }
        if content.contains(['\n', '\r']) {
            return Err(RuleLineError::EmbeddedNewline(content));
        }
        Ok(Self { rule_type, content })
    }

    /// Get the rule type tag.
    pub fn rule_type(&self) -> RuleType {
        self.rule_type
    }

    /// Get the rule content.
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl fmt::Display for RuleLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.rule_type, self.content)
    }
}
