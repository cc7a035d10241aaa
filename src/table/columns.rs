//! Column derivation for the virtualized table.
//!
//! Columns come from the shape of the first row: every key that is not
//! excluded becomes a [`ColumnSpec`], with label, alignment, width and cell
//! renderer taken from a per-key [`ColumnConfig`] override when one exists.

use super::Row;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Custom cell formatter: receives the cell value (`Null` when the key is
/// missing) and the whole row.
#[derive(Clone)]
pub struct CellRenderer(Arc<dyn Fn(&Value, &Row) -> String + Send + Sync>);

impl CellRenderer {
    pub fn new(render: impl Fn(&Value, &Row) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(render))
    }

    #[must_use]
    pub fn render(&self, value: &Value, row: &Row) -> String {
        (self.0)(value, row)
    }
}

impl fmt::Debug for CellRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CellRenderer(..)")
    }
}

impl PartialEq for CellRenderer {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Per-key override. Unset fields fall back to the derived defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnConfig {
    pub label: Option<String>,
    pub numeric: Option<bool>,
    pub width: Option<u16>,
    pub render_cell: Option<CellRenderer>,
    /// Sort position used when no explicit column order is given.
    pub order: Option<i32>,
}

impl ColumnConfig {
    #[must_use]
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_renderer(mut self, renderer: CellRenderer) -> Self {
        self.render_cell = Some(renderer);
        self
    }

    #[must_use]
    pub const fn with_order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }

    #[must_use]
    pub const fn with_width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }
}

/// Derived metadata for one table column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub data_key: String,
    pub label: String,
    /// Right-align the column.
    pub numeric: bool,
    pub width: u16,
    pub render_cell: Option<CellRenderer>,
    pub order: Option<i32>,
}

impl ColumnSpec {
    /// Display text of this column's cell in `row`.
    #[must_use]
    pub fn cell_text(&self, row: &Row) -> String {
        let value = row.get(&self.data_key);
        match &self.render_cell {
            Some(renderer) => renderer.render(value.unwrap_or(&Value::Null), row),
            None => display_value(value),
        }
    }
}

/// Coerces a JSON value to cell text.
///
/// Strings are shown verbatim, numbers and booleans in their JSON form, arrays
/// and objects as compact JSON. Null and missing values render as an empty
/// string.
///
/// # Examples
///
/// ```
/// use provider_directory::table::display_value;
/// use serde_json::json;
///
/// assert_eq!(display_value(Some(&json!("Boston"))), "Boston");
/// assert_eq!(display_value(Some(&json!(3))), "3");
/// assert_eq!(display_value(Some(&json!(null))), "");
/// assert_eq!(display_value(None), "");
/// ```
#[must_use]
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

/// Upper-cases the first character of a key.
#[must_use]
pub fn default_label(key: &str) -> String {
    let mut chars = key.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Derives the column list for `rows`.
///
/// The column universe is the key set of the first row minus `exclude_keys`.
/// Ordering precedence:
///
/// 1. A non-empty `column_order`: listed keys first (unknown and repeated keys
///    are skipped), then the remaining keys in natural order.
/// 2. Otherwise, if any column has an `order` override: ascending by `order`,
///    unset last, ties kept in natural order.
/// 3. Otherwise natural (insertion) order.
///
/// # Examples
///
/// ```
/// use provider_directory::table::{derive_columns, Row};
/// use serde_json::json;
/// use std::collections::HashMap;
///
/// let row: Row = serde_json::from_value(json!({"a": 1, "b": 2, "c": 3})).unwrap();
/// let order = vec!["b".to_string(), "a".to_string()];
/// let columns = derive_columns(&[row], &[], &HashMap::new(), 120, Some(&order));
///
/// let keys: Vec<_> = columns.iter().map(|c| c.data_key.as_str()).collect();
/// assert_eq!(keys, ["b", "a", "c"]);
/// ```
#[must_use]
pub fn derive_columns(
    rows: &[Row],
    exclude_keys: &[String],
    column_config: &HashMap<String, ColumnConfig>,
    default_width: u16,
    column_order: Option<&[String]>,
) -> Vec<ColumnSpec> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };

    let mut natural: Vec<ColumnSpec> = first
        .iter()
        .filter(|(key, _)| !exclude_keys.iter().any(|excluded| excluded == *key))
        .map(|(key, value)| {
            let config = column_config.get(key);
            ColumnSpec {
                data_key: key.clone(),
                label: config
                    .and_then(|c| c.label.clone())
                    .unwrap_or_else(|| default_label(key)),
                numeric: config.and_then(|c| c.numeric).unwrap_or_else(|| value.is_number()),
                width: config.and_then(|c| c.width).unwrap_or(default_width),
                render_cell: config.and_then(|c| c.render_cell.clone()),
                order: config.and_then(|c| c.order),
            }
        })
        .collect();

    match column_order.filter(|order| !order.is_empty()) {
        Some(order) => {
            let mut ordered = Vec::with_capacity(natural.len());
            for key in order {
                if let Some(position) = natural.iter().position(|spec| &spec.data_key == key) {
                    ordered.push(natural.remove(position));
                }
            }
            ordered.append(&mut natural);
            ordered
        }
        None => {
            if natural.iter().any(|spec| spec.order.is_some()) {
                natural.sort_by_key(|spec| (spec.order.is_none(), spec.order));
            }
            natural
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        match value {
            Value::Object(map) => map,
            _ => panic!("test rows must be objects"),
        }
    }

    fn keys(columns: &[ColumnSpec]) -> Vec<&str> {
        columns.iter().map(|c| c.data_key.as_str()).collect()
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn explicit_order_then_natural() {
        let rows = vec![row(json!({"a": 1, "b": "x", "c": null}))];
        let order = strings(&["b", "a"]);
        let columns = derive_columns(&rows, &[], &HashMap::new(), 120, Some(&order));
        assert_eq!(keys(&columns), ["b", "a", "c"]);
    }

    #[test]
    fn explicit_order_skips_unknown_and_excluded_keys() {
        let rows = vec![row(json!({"a": 1, "b": 2, "c": 3}))];
        let order = strings(&["zzz", "c", "b", "c"]);
        let columns = derive_columns(&rows, &strings(&["b"]), &HashMap::new(), 120, Some(&order));
        assert_eq!(keys(&columns), ["c", "a"]);
    }

    #[test]
    fn order_field_sorts_when_no_explicit_order() {
        let rows = vec![row(json!({"a": 1, "b": 2, "c": 3, "d": 4}))];
        let config = HashMap::from([
            ("c".to_string(), ColumnConfig::default().with_order(1)),
            ("d".to_string(), ColumnConfig::default().with_order(0)),
        ]);
        let columns = derive_columns(&rows, &[], &config, 120, None);
        assert_eq!(keys(&columns), ["d", "c", "a", "b"]);

        // An explicit order beats the order field.
        let order = strings(&["a"]);
        let columns = derive_columns(&rows, &[], &config, 120, Some(&order));
        assert_eq!(keys(&columns), ["a", "b", "c", "d"]);
    }

    #[test]
    fn empty_explicit_order_falls_back() {
        let rows = vec![row(json!({"b": 1, "a": 2}))];
        let columns = derive_columns(&rows, &[], &HashMap::new(), 120, Some(&[]));
        assert_eq!(keys(&columns), ["b", "a"]);
    }

    #[test]
    fn defaults_and_overrides() {
        let rows = vec![row(json!({"city": "Boston", "providerCount": 4, "zip": "02110"}))];
        let config = HashMap::from([(
            "zip".to_string(),
            ColumnConfig {
                numeric: Some(true),
                ..ColumnConfig::labeled("ZIP").with_width(60)
            },
        )]);
        let columns = derive_columns(&rows, &[], &config, 120, None);

        assert_eq!(columns[0].label, "City");
        assert!(!columns[0].numeric);
        assert_eq!(columns[0].width, 120);
        assert_eq!(columns[1].label, "ProviderCount");
        assert!(columns[1].numeric);
        assert_eq!(columns[2].label, "ZIP");
        assert!(columns[2].numeric);
        assert_eq!(columns[2].width, 60);
    }

    #[test]
    fn only_first_row_defines_shape() {
        let rows = vec![row(json!({"a": 1})), row(json!({"a": 2, "extra": true}))];
        let columns = derive_columns(&rows, &[], &HashMap::new(), 120, None);
        assert_eq!(keys(&columns), ["a"]);
        assert!(derive_columns(&[], &[], &HashMap::new(), 120, None).is_empty());
    }

    #[test]
    fn cells_use_renderer_or_display_value() {
        let data = row(json!({"count": 3, "name": "Alice", "gone": null}));
        let upper = CellRenderer::new(|value, _row| display_value(Some(value)).to_uppercase());
        let config = HashMap::from([("name".to_string(), ColumnConfig::default().with_renderer(upper))]);
        let columns = derive_columns(&[data.clone()], &[], &config, 120, None);

        assert_eq!(columns[0].cell_text(&data), "3");
        assert_eq!(columns[1].cell_text(&data), "ALICE");
        assert_eq!(columns[2].cell_text(&data), "");
        assert_eq!(columns[0].cell_text(&Row::new()), "");
    }

    #[test]
    fn compound_values_render_as_json() {
        assert_eq!(display_value(Some(&json!([1, 2]))), "[1,2]");
        assert_eq!(display_value(Some(&json!(true))), "true");
        assert_eq!(default_label(""), "");
        assert_eq!(default_label("éclair"), "Éclair");
    }
}
