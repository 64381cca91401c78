//! Row grouping: flattens rows into a `[header | row]` sequence.
//!
//! Grouping is single-level. Rows are partitioned by the value at the group
//! column; rows without a value share one canonical empty group. The output
//! is a pure function of the rows, the group config and the collapsed state.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::types::{GridItem, GroupConfig, GroupHeader, GroupSort, Row};

/// Key of the group holding rows with no value in the group column.
pub const EMPTY_GROUP_KEY: &str = "";

/// Rows sharing one group value, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct RowGroup<'a> {
    pub key: &'a str,
    pub rows: Vec<&'a Row>,
}

/// Group value of `row`; missing, empty or blank values map to
/// [`EMPTY_GROUP_KEY`].
pub fn group_key_of<'a>(row: &'a Row, column_key: &str) -> &'a str {
    row.value(column_key).map_or(EMPTY_GROUP_KEY, str::trim)
}

/// Partition rows by group value and order the groups.
///
/// `Alpha` sorts case-insensitively with the empty group forced last;
/// `Count` sorts by descending member count, ties broken alphabetically.
pub fn partition<'a>(rows: &'a [Row], config: &GroupConfig) -> Vec<RowGroup<'a>> {
    let mut groups: Vec<RowGroup<'a>> = Vec::new();
    let mut index_of: HashMap<&'a str, usize> = HashMap::new();

    for row in rows {
        let key = group_key_of(row, &config.column_key);
        match index_of.get(key) {
            Some(&i) => {
                if let Some(group) = groups.get_mut(i) {
                    group.rows.push(row);
                }
            }
            None => {
                index_of.insert(key, groups.len());
                groups.push(RowGroup {
                    key,
                    rows: vec![row],
                });
            }
        }
    }

    match config.sort_groups_by {
        GroupSort::Alpha => groups.sort_by(|a, b| alpha_order(a.key, b.key)),
        GroupSort::Count => groups.sort_by(|a, b| {
            b.rows
                .len()
                .cmp(&a.rows.len())
                .then_with(|| alpha_order(a.key, b.key))
        }),
    }
    groups
}

fn alpha_order(a: &str, b: &str) -> Ordering {
    let a_empty = a == EMPTY_GROUP_KEY;
    let b_empty = b == EMPTY_GROUP_KEY;
    a_empty
        .cmp(&b_empty)
        .then_with(|| {
            a.chars()
                .flat_map(char::to_lowercase)
                .cmp(b.chars().flat_map(char::to_lowercase))
        })
        .then_with(|| a.cmp(b))
}

/// Flatten rows into the displayed item sequence.
///
/// Without a config every row is emitted in input order. With one, each group
/// emits a header followed by its rows unless the group is collapsed.
pub fn flatten<'a>(
    rows: &'a [Row],
    config: Option<&GroupConfig>,
    collapsed: &CollapsedGroups,
    empty_label: &str,
) -> Vec<GridItem<'a>> {
    let Some(config) = config else {
        return rows.iter().map(GridItem::Row).collect();
    };

    let groups = partition(rows, config);
    let mut items = Vec::with_capacity(rows.len() + groups.len());
    for group in groups {
        let is_collapsed = collapsed.is_collapsed(group.key);
        let label = if group.key == EMPTY_GROUP_KEY {
            empty_label.to_string()
        } else {
            group.key.to_string()
        };
        items.push(GridItem::Header(GroupHeader {
            group_key: group.key.to_string(),
            label,
            count: group.rows.len(),
            collapsed: is_collapsed,
        }));
        if !is_collapsed {
            items.extend(group.rows.into_iter().map(GridItem::Row));
        }
    }
    items
}

/// Which groups are collapsed.
///
/// Stored as the config's default plus the set of groups toggled away from
/// it, so groups that first appear in a later snapshot still follow
/// `collapsed_by_default`. The state belongs to one group config and resets
/// when the config changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollapsedGroups {
    config: Option<GroupConfig>,
    default_collapsed: bool,
    toggled: HashSet<String>,
}

impl CollapsedGroups {
    /// Initial state for `config`.
    pub fn new(config: Option<&GroupConfig>) -> Self {
        Self {
            config: config.cloned(),
            default_collapsed: config.is_some_and(|c| c.collapsed_by_default),
            toggled: HashSet::new(),
        }
    }

    /// State where exactly `keys` are collapsed.
    pub fn with_collapsed<I, S>(config: Option<&GroupConfig>, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            config: config.cloned(),
            default_collapsed: false,
            toggled: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Reset if `config` differs from the one this state was built for.
    /// Returns true when a reset happened.
    pub fn sync(&mut self, config: Option<&GroupConfig>) -> bool {
        if self.config.as_ref() == config {
            return false;
        }
        log::debug!("group config changed, resetting collapsed groups");
        *self = Self::new(config);
        true
    }

    pub fn is_collapsed(&self, group_key: &str) -> bool {
        self.default_collapsed != self.toggled.contains(group_key)
    }

    /// Flip one group. Returns its new collapsed state.
    pub fn toggle(&mut self, group_key: &str) -> bool {
        if !self.toggled.remove(group_key) {
            self.toggled.insert(group_key.to_string());
        }
        self.is_collapsed(group_key)
    }

    pub fn collapse_all(&mut self) {
        self.default_collapsed = true;
        self.toggled.clear();
    }

    pub fn expand_all(&mut self) {
        self.default_collapsed = false;
        self.toggled.clear();
    }
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
    use crate::types::CellValue;

    fn row(id: &str, stage: Option<&str>) -> Row {
        let r = Row::new(id);
        match stage {
            Some(v) => r.with_cell("stage", CellValue::text(v)),
            None => r,
        }
    }

    #[test]
    fn test_blank_values_share_empty_group() {
        let rows = vec![
            row("1", None),
            row("2", Some("   ")),
            row("3", Some("Won")),
        ];
        let groups = partition(&rows, &GroupConfig::new("stage"));
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, "Won");
        assert_eq!(groups[1].key, EMPTY_GROUP_KEY);
        assert_eq!(groups[1].rows.len(), 2);
    }

    #[test]
    fn test_alpha_is_case_insensitive() {
        let rows = vec![row("1", Some("beta")), row("2", Some("Alpha")), row("3", Some("alpha"))];
        let keys: Vec<&str> = partition(&rows, &GroupConfig::new("stage"))
            .iter()
            .map(|g| g.key)
            .collect();
        assert_eq!(keys, vec!["Alpha", "alpha", "beta"]);
    }

    #[test]
    fn test_toggle_flips_only_one_group() {
        let config = GroupConfig {
            collapsed_by_default: true,
            ..GroupConfig::new("stage")
        };
        let mut collapsed = CollapsedGroups::new(Some(&config));
        assert!(collapsed.is_collapsed("Won"));
        assert!(!collapsed.toggle("Won"));
        assert!(collapsed.is_collapsed("Lost"));
        assert!(collapsed.toggle("Won"));
    }

    #[test]
    fn test_sync_resets_on_config_change() {
        let config = GroupConfig::new("stage");
        let mut collapsed = CollapsedGroups::new(Some(&config));
        collapsed.toggle("Won");
        assert!(!collapsed.sync(Some(&config)));
        assert!(collapsed.is_collapsed("Won"));

        let other = GroupConfig::new("owner");
        assert!(collapsed.sync(Some(&other)));
        assert!(!collapsed.is_collapsed("Won"));
    }
}
