//! Per-type cell presentation.

use serde::Serialize;

use crate::numeric::{format_number, parse_number};
use crate::types::{CellStatus, CellValue, Column, ColumnType, Row};

/// Icon shown next to structured values and in column headers.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CellIcon {
    Text,
    Hash,
    Currency,
    Mail,
    Phone,
    Link,
    User,
    Building,
    Calendar,
    Checkbox,
    List,
    Tag,
    Function,
    Plug,
    Play,
}

/// Icon for a column type.
pub fn column_icon(column_type: ColumnType) -> CellIcon {
    match column_type {
        ColumnType::Text => CellIcon::Text,
        ColumnType::Number => CellIcon::Hash,
        ColumnType::Currency => CellIcon::Currency,
        ColumnType::Email => CellIcon::Mail,
        ColumnType::Phone => CellIcon::Phone,
        ColumnType::Link => CellIcon::Link,
        ColumnType::Person => CellIcon::User,
        ColumnType::Company => CellIcon::Building,
        ColumnType::Date => CellIcon::Calendar,
        ColumnType::Checkbox => CellIcon::Checkbox,
        ColumnType::Dropdown => CellIcon::List,
        ColumnType::Tags => CellIcon::Tag,
        ColumnType::Formula => CellIcon::Function,
        ColumnType::Integration => CellIcon::Plug,
        ColumnType::Action => CellIcon::Play,
    }
}

/// How strongly enrichment text is drawn, by confidence.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum TextEmphasis {
    /// Confidence >= 0.8, or not an enrichment value
    #[default]
    Full,
    /// Confidence >= 0.5
    Reduced,
    /// Confidence < 0.5: italic and muted
    Muted,
}

impl TextEmphasis {
    pub fn from_confidence(confidence: Option<f64>) -> Self {
        match confidence {
            Some(c) if c >= 0.8 => Self::Full,
            Some(c) if c >= 0.5 => Self::Reduced,
            Some(c) if c.is_finite() => Self::Muted,
            _ => Self::Full,
        }
    }

    pub fn opacity(self) -> f32 {
        match self {
            Self::Full => 1.0,
            Self::Reduced => 0.7,
            Self::Muted => 0.5,
        }
    }

    pub fn italic(self) -> bool {
        self == Self::Muted
    }
}

/// Everything needed to draw one cell.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CellDisplay {
    /// Icon for structured values (person, company, email, link)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<CellIcon>,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Avatar initials for person cells
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initials: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    pub status: CellStatus,
    pub emphasis: TextEmphasis,
    pub opacity: f32,
    pub italic: bool,
    pub editable: bool,
    /// An enrichment run can be requested for this cell
    pub can_enrich: bool,
}

/// Whether a cell accepts inline edits: never for computed or button
/// columns, and not while an enrichment is pending or after it failed.
pub fn is_editable(column: &Column, cell: &CellValue) -> bool {
    column.column_type.is_user_editable() && !cell.status.blocks_editing()
}

/// Present one cell of `row` under `column`.
pub fn render_cell(column: &Column, row: &Row) -> CellDisplay {
    let cell = row.cell(&column.key);
    let raw = cell.non_empty().map(str::trim);

    let emphasis = if column.is_enrichment {
        TextEmphasis::from_confidence(cell.confidence)
    } else {
        TextEmphasis::Full
    };

    let mut display = CellDisplay {
        icon: None,
        text: String::new(),
        href: None,
        initials: None,
        tags: Vec::new(),
        checked: None,
        status: cell.status,
        emphasis,
        opacity: emphasis.opacity(),
        italic: emphasis.italic(),
        editable: is_editable(column, cell),
        can_enrich: column.is_enrichment && cell.status != CellStatus::Pending,
    };

    if cell.status == CellStatus::Pending {
        return display;
    }

    match column.column_type {
        ColumnType::Text | ColumnType::Dropdown | ColumnType::Formula | ColumnType::Integration => {
            display.text = raw.unwrap_or_default().to_string();
        }
        ColumnType::Number => {
            display.text = raw
                .map(|v| parse_number(v).map_or_else(|| v.to_string(), format_number))
                .unwrap_or_default();
        }
        ColumnType::Currency => {
            display.text = raw
                .map(|v| parse_number(v).map_or_else(|| v.to_string(), format_currency))
                .unwrap_or_default();
        }
        ColumnType::Email => {
            display.icon = Some(CellIcon::Mail);
            if let Some(v) = raw {
                display.text = v.to_string();
                if v.contains('@') {
                    display.href = Some(format!("mailto:{v}"));
                }
            }
        }
        ColumnType::Phone => {
            if let Some(v) = raw {
                display.text = v.to_string();
                let dial: String = v
                    .chars()
                    .filter(|c| c.is_ascii_digit() || *c == '+')
                    .collect();
                if !dial.is_empty() {
                    display.href = Some(format!("tel:{dial}"));
                }
            }
        }
        ColumnType::Link => {
            display.icon = Some(CellIcon::Link);
            if let Some(v) = raw {
                display.text = link_label(v);
                display.href = Some(link_href(v));
            }
        }
        ColumnType::Person => {
            display.icon = Some(CellIcon::User);
            let name = raw.map(str::to_string).or_else(|| source_full_name(row));
            if let Some(name) = name {
                display.initials = initials(&name);
                display.text = name;
            }
        }
        ColumnType::Company => {
            display.icon = Some(CellIcon::Building);
            display.text = raw
                .or_else(|| row.source_str(&["company", "company_name", "companyName"]))
                .unwrap_or_default()
                .to_string();
        }
        ColumnType::Date => {
            display.text = raw
                .map(|v| pretty_date(v).unwrap_or_else(|| v.to_string()))
                .unwrap_or_default();
        }
        ColumnType::Checkbox => {
            display.checked = Some(raw.is_some_and(is_truthy));
        }
        ColumnType::Tags => {
            display.tags = raw.map(split_tags).unwrap_or_default();
            display.text = display.tags.join(", ");
        }
        ColumnType::Action => {
            display.text = raw.unwrap_or(column.label.as_str()).to_string();
        }
    }

    display
}

fn format_currency(n: f64) -> String {
    if n < 0.0 {
        format!("-${}", format_number(-n))
    } else {
        format!("${}", format_number(n))
    }
}

fn link_href(v: &str) -> String {
    let lower = v.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        v.to_string()
    } else {
        format!("https://{v}")
    }
}

fn link_label(v: &str) -> String {
    let mut label = v;
    for prefix in ["https://", "http://", "HTTPS://", "HTTP://"] {
        if let Some(rest) = label.strip_prefix(prefix) {
            label = rest;
            break;
        }
    }
    let label = label.strip_prefix("www.").unwrap_or(label);
    label.trim_end_matches('/').to_string()
}

fn source_full_name(row: &Row) -> Option<String> {
    let first = row.source_str(&["first_name", "firstName"]);
    let last = row.source_str(&["last_name", "lastName"]);
    match (first, last) {
        (Some(f), Some(l)) => Some(format!("{f} {l}")),
        (Some(n), None) | (None, Some(n)) => Some(n.to_string()),
        (None, None) => row
            .source_str(&["full_name", "fullName", "name"])
            .map(str::to_string),
    }
}

fn initials(name: &str) -> Option<String> {
    let letters: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .filter(|c| c.is_alphanumeric())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect();
    (!letters.is_empty()).then_some(letters)
}

fn is_truthy(v: &str) -> bool {
    matches!(
        v.to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "y" | "checked" | "x"
    )
}

fn split_tags(v: &str) -> Vec<String> {
    v.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// "2024-01-05" or "2024-01-05T10:00:00Z" as "Jan 5, 2024".
fn pretty_date(v: &str) -> Option<String> {
    let date = v.get(..10)?;
    if let Some(rest) = v.get(10..) {
        if !(rest.is_empty() || rest.starts_with('T') || rest.starts_with(' ')) {
            return None;
        }
    }
    let mut parts = date.split('-');
    let (y, m, d) = (parts.next()?, parts.next()?, parts.next()?);
    if y.len() != 4 || m.len() != 2 || d.len() != 2 {
        return None;
    }
    let year: u32 = y.parse().ok()?;
    let month: usize = m.parse().ok()?;
    let day: u32 = d.parse().ok()?;
    let name = MONTHS.get(month.checked_sub(1)?)?;
    if !(1..=31).contains(&day) {
        return None;
    }
    Some(format!("{name} {day}, {year}"))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_date() {
        assert_eq!(pretty_date("2024-01-05").as_deref(), Some("Jan 5, 2024"));
        assert_eq!(
            pretty_date("2023-12-31T23:59:00Z").as_deref(),
            Some("Dec 31, 2023")
        );
        assert_eq!(pretty_date("2024-13-01"), None);
        assert_eq!(pretty_date("yesterday"), None);
        assert_eq!(pretty_date("2024-01-05xyz"), None);
    }

    #[test]
    fn test_link_label_and_href() {
        assert_eq!(link_label("https://www.acme.com/"), "acme.com");
        assert_eq!(link_href("acme.com"), "https://acme.com");
        assert_eq!(link_href("http://acme.com"), "http://acme.com");
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("ada lovelace").as_deref(), Some("AL"));
        assert_eq!(initials("Cher").as_deref(), Some("C"));
        assert_eq!(initials("   "), None);
    }
}
