//! Virtualized record table.
//!
//! Rows are JSON objects with insertion order preserved, so the table can show
//! any record-shaped data, not only [`LocationRecord`]s. [`TableModel`] owns the
//! column settings, caches derived columns per row shape, and windows the body
//! so only visible rows (plus overscan) are turned into cells.
//!
//! # Modules
//!
//! - [`columns`]: Column derivation, overrides and cell renderers
//! - [`window`]: Visible range and scroll-into-view arithmetic

pub mod columns;
pub mod window;

pub use columns::{default_label, derive_columns, display_value, CellRenderer, ColumnConfig, ColumnSpec};
pub use window::ScrollAlign;

use crate::domain::{DirectoryError, LocationRecord, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// One table row.
pub type Row = serde_json::Map<String, Value>;

/// Message shown when there is nothing to tabulate.
pub const EMPTY_MESSAGE: &str = "No data available";

/// Converts records to rows keyed by their wire (camelCase) field names.
///
/// # Errors
///
/// Returns [`DirectoryError::Deserialize`] if a record cannot be represented
/// as a JSON object.
pub fn rows_from_records(records: &[LocationRecord]) -> Result<Vec<Row>> {
    records
        .iter()
        .map(|record| match serde_json::to_value(record) {
            Ok(Value::Object(row)) => Ok(row),
            Ok(other) => Err(DirectoryError::Api(format!(
                "record {} serialized to {other} instead of an object",
                record.key()
            ))),
            Err(source) => Err(DirectoryError::Deserialize {
                context: format!("table row {}", record.key()),
                source,
            }),
        })
        .collect()
}

/// Column settings that feed [`derive_columns`].
#[derive(Debug, Clone, PartialEq)]
pub struct TableSettings {
    pub exclude_keys: Vec<String>,
    pub column_config: HashMap<String, ColumnConfig>,
    pub default_width: u16,
    pub column_order: Option<Vec<String>>,
    /// Rows materialized above and below the viewport.
    pub overscan: usize,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            exclude_keys: Vec::new(),
            column_config: HashMap::new(),
            default_width: 120,
            column_order: None,
            overscan: 5,
        }
    }
}

/// Header cell of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub label: String,
    pub numeric: bool,
    pub width: u16,
}

/// A materialized body row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    /// Absolute index of the row in the data set.
    pub index: usize,
    pub cells: Vec<String>,
}

/// Windowed grid ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridView {
    pub header: Vec<HeaderCell>,
    pub rows: Vec<GridRow>,
    pub total_rows: usize,
    /// Clamped scroll offset the window was computed for.
    pub scroll_offset: usize,
    pub viewport_rows: usize,
}

/// What the table area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableViewModel {
    Grid(GridView),
    /// Centered placeholder sized to the table area.
    Empty {
        message: &'static str,
        width: usize,
        height: usize,
    },
}

#[derive(Debug, Clone)]
struct ColumnCache {
    shape: Vec<String>,
    revision: u64,
    columns: Arc<[ColumnSpec]>,
}

/// Table state: settings plus the derived-column cache.
///
/// Columns are re-derived only when the first row's key list changes or a
/// setting is replaced; row edits that keep the shape reuse the cache.
#[derive(Debug, Clone, Default)]
pub struct TableModel {
    settings: TableSettings,
    revision: u64,
    cache: Option<ColumnCache>,
    derivations: u64,
}

impl TableModel {
    #[must_use]
    pub fn new(settings: TableSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn settings(&self) -> &TableSettings {
        &self.settings
    }

    pub fn set_exclude_keys(&mut self, keys: Vec<String>) {
        self.settings.exclude_keys = keys;
        self.revision += 1;
    }

    pub fn set_column_config(&mut self, config: HashMap<String, ColumnConfig>) {
        self.settings.column_config = config;
        self.revision += 1;
    }

    pub fn set_column_order(&mut self, order: Option<Vec<String>>) {
        self.settings.column_order = order;
        self.revision += 1;
    }

    pub fn set_default_width(&mut self, width: u16) {
        if self.settings.default_width != width {
            self.settings.default_width = width;
            self.revision += 1;
        }
    }

    /// How many times columns were derived. Used to observe the cache.
    #[must_use]
    pub const fn derivation_count(&self) -> u64 {
        self.derivations
    }

    /// Columns for `rows`, from the cache when the shape and settings match.
    pub fn columns(&mut self, rows: &[Row]) -> Arc<[ColumnSpec]> {
        let shape: Vec<String> = rows
            .first()
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default();

        if let Some(cache) = &self.cache {
            if cache.revision == self.revision && cache.shape == shape {
                return Arc::clone(&cache.columns);
            }
        }

        let _span = tracing::debug_span!("derive_columns", keys = shape.len(), revision = self.revision).entered();
        let columns: Arc<[ColumnSpec]> = derive_columns(
            rows,
            &self.settings.exclude_keys,
            &self.settings.column_config,
            self.settings.default_width,
            self.settings.column_order.as_deref(),
        )
        .into();
        self.derivations += 1;
        tracing::debug!(columns = columns.len(), "columns derived");

        self.cache = Some(ColumnCache {
            shape,
            revision: self.revision,
            columns: Arc::clone(&columns),
        });
        columns
    }

    /// Builds the grid for the rows visible at `scroll_offset`.
    ///
    /// `width` and `height` size the empty-state placeholder; `height` minus
    /// the header row is the body viewport.
    pub fn view(&mut self, rows: &[Row], scroll_offset: usize, width: usize, height: usize) -> TableViewModel {
        let columns = self.columns(rows);
        if rows.is_empty() || columns.is_empty() {
            return TableViewModel::Empty {
                message: EMPTY_MESSAGE,
                width,
                height,
            };
        }

        let viewport_rows = height.saturating_sub(1).max(1);
        let scroll_offset = window::clamp_scroll(rows.len(), scroll_offset, viewport_rows);
        let range = window::visible_range(rows.len(), scroll_offset, viewport_rows, self.settings.overscan);

        let header = columns
            .iter()
            .map(|column| HeaderCell {
                label: column.label.clone(),
                numeric: column.numeric,
                width: column.width,
            })
            .collect();

        let body = rows[range.clone()]
            .iter()
            .zip(range)
            .map(|(row, index)| GridRow {
                index,
                cells: columns.iter().map(|column| column.cell_text(row)).collect(),
            })
            .collect();

        TableViewModel::Grid(GridView {
            header,
            rows: body,
            total_rows: rows.len(),
            scroll_offset,
            viewport_rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn numbered_rows(count: usize) -> Vec<Row> {
        (0..count)
            .map(|i| match json!({"id": i, "name": format!("row {i}")}) {
                Value::Object(row) => row,
                _ => unreachable!(),
            })
            .collect()
    }

    #[test]
    fn records_become_camel_case_rows() {
        let record = LocationRecord {
            practitioner_id: "1".into(),
            practice_location_id: "10".into(),
            full_name: Some("Alice".into()),
            ..Default::default()
        };
        let rows = rows_from_records(&[record]).unwrap();
        let keys: Vec<_> = rows[0].keys().map(String::as_str).take(3).collect();

        assert_eq!(keys, ["practitionerId", "practiceLocationId", "fullName"]);
        assert_eq!(rows[0]["fullName"], json!("Alice"));
        assert_eq!(rows[0]["city"], Value::Null);
    }

    #[test]
    fn shape_preserving_updates_reuse_columns() {
        let mut model = TableModel::new(TableSettings::default());
        let mut rows = numbered_rows(3);

        model.columns(&rows);
        rows[0].insert("name".into(), json!("renamed"));
        rows.push(numbered_rows(1).remove(0));
        model.columns(&rows);
        assert_eq!(model.derivation_count(), 1);

        rows[0].insert("extra".into(), json!(true));
        model.columns(&rows);
        assert_eq!(model.derivation_count(), 2);

        model.set_column_order(Some(vec!["name".into()]));
        let columns = model.columns(&rows);
        assert_eq!(model.derivation_count(), 3);
        assert_eq!(columns[0].data_key, "name");

        model.set_default_width(120);
        model.columns(&rows);
        assert_eq!(model.derivation_count(), 3);
    }

    #[test]
    fn view_windows_rows_with_overscan() {
        let mut model = TableModel::new(TableSettings {
            overscan: 2,
            ..TableSettings::default()
        });
        let rows = numbered_rows(1000);

        let TableViewModel::Grid(grid) = model.view(&rows, 500, 80, 11) else {
            panic!("expected grid");
        };
        assert_eq!(grid.viewport_rows, 10);
        assert_eq!(grid.rows.len(), 14);
        assert_eq!(grid.rows[0].index, 498);
        assert_eq!(grid.rows[0].cells, ["498", "row 498"]);
        assert_eq!(grid.header[0].label, "Id");
        assert!(grid.header[0].numeric);
        assert_eq!(grid.total_rows, 1000);
    }

    #[test]
    fn empty_state_for_no_rows_or_no_columns() {
        let mut model = TableModel::new(TableSettings {
            exclude_keys: vec!["id".into(), "name".into()],
            ..TableSettings::default()
        });

        let expected = TableViewModel::Empty {
            message: "No data available",
            width: 40,
            height: 8,
        };
        assert_eq!(model.view(&[], 0, 40, 8), expected);
        assert_eq!(model.view(&numbered_rows(2), 0, 40, 8), expected);
    }
}
