use serde::{Deserialize, Deserializer, Serialize};

use super::row::lenient_string;

/// Comparison performed by a formatting rule.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FormatOperator {
    #[serde(alias = "equal")]
    Equals,
    #[serde(alias = "not_equal")]
    NotEquals,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
    GreaterThan,
    LessThan,
    GreaterOrEqual,
    LessOrEqual,
    #[serde(alias = "empty")]
    IsEmpty,
    #[serde(alias = "not_empty")]
    IsNotEmpty,
}

/// Whether a rule styles the matching cell or the whole row.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum FormatScope {
    #[default]
    Cell,
    Row,
}

/// Style override produced by a matching rule. Only set properties override
/// the base style.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CellStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,
}

impl CellStyle {
    /// Background-only style.
    pub fn background(color: &str) -> Self {
        Self {
            background_color: Some(color.to_string()),
            ..Self::default()
        }
    }
}

/// A conditional formatting rule. Rules are evaluated in list order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormattingRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Column key whose value is tested
    pub field: String,
    pub operator: FormatOperator,
    /// Numbers and booleans are accepted and kept in string form
    #[serde(default, alias = "value", deserialize_with = "comparison_text")]
    pub comparison_value: String,
    #[serde(default)]
    pub style: CellStyle,
    #[serde(default)]
    pub scope: FormatScope,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

fn comparison_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}

impl FormattingRule {
    /// An enabled rule.
    pub fn new(
        field: &str,
        operator: FormatOperator,
        comparison_value: &str,
        style: CellStyle,
        scope: FormatScope,
    ) -> Self {
        Self {
            id: None,
            field: field.to_string(),
            operator,
            comparison_value: comparison_value.to_string(),
            style,
            scope,
            enabled: true,
        }
    }
}
