use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::answers::AnswerMap;

/// Comparison operators available to a visibility condition.
///
/// Operators this build does not recognize deserialize to [`LogicOperator::Other`]
/// and count as satisfied, so a newer authoring surface never breaks rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LogicOperator {
    Equals,
    NotEquals,
    Contains,
    IsEmpty,
    IsNotEmpty,
    Other,
}

impl<'de> Deserialize<'de> for LogicOperator {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "equals" => LogicOperator::Equals,
            "not_equals" => LogicOperator::NotEquals,
            "contains" => LogicOperator::Contains,
            "is_empty" => LogicOperator::IsEmpty,
            "is_not_empty" => LogicOperator::IsNotEmpty,
            _ => LogicOperator::Other,
        })
    }
}

/// Whether a matched rule reveals or conceals its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LogicAction {
    Show,
    Hide,
}

/// One atomic comparison between a referenced field's answer and a literal.
///
/// `value` is ignored by the emptiness operators. A `field_id` that does not
/// exist in the answers reads the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LogicCondition {
    pub field_id: String,
    pub operator: LogicOperator,
    #[serde(default)]
    pub value: String,
}

impl LogicCondition {
    /// Evaluates the condition against the current answers.
    pub fn is_met(&self, answers: &AnswerMap) -> bool {
        let val = answers.value_of(&self.field_id);
        match self.operator {
            LogicOperator::Equals => val == self.value,
            LogicOperator::NotEquals => val != self.value,
            LogicOperator::Contains => val.contains(self.value.as_str()),
            LogicOperator::IsEmpty => val.is_empty(),
            LogicOperator::IsNotEmpty => !val.is_empty(),
            LogicOperator::Other => true,
        }
    }
}

/// The show/hide policy attached to a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldLogic {
    #[serde(default)]
    pub conditions: Vec<LogicCondition>,
    pub action: LogicAction,
}

impl FieldLogic {
    /// Resolves the rule to a visibility verdict.
    ///
    /// An empty condition list means the field is always visible, regardless
    /// of the action. Otherwise every condition must hold; `show` keeps the
    /// conjunction and `hide` negates it.
    pub fn evaluate(&self, answers: &AnswerMap) -> bool {
        if self.conditions.is_empty() {
            return true;
        }
        let all_met = self
            .conditions
            .iter()
            .all(|condition| condition.is_met(answers));
        match self.action {
            LogicAction::Show => all_met,
            LogicAction::Hide => !all_met,
        }
    }
}
