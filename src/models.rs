use serde::{Deserialize, Serialize};

/// Supported chart renderings. The frontend sends these as lowercase strings
/// and defaults to a bar chart when the field is omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Bar,
    Line,
    Pie,
}

impl Default for ChartType {
    fn default() -> Self {
        ChartType::Bar
    }
}

impl ChartType {
    /// Bar and line charts share the same axis requirements.
    pub fn is_cartesian(&self) -> bool {
        matches!(self, ChartType::Bar | ChartType::Line)
    }
}

/// Per-group reduction applied when building a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    Sum,
    Count,
}

/// The user's current chart configuration. Rebuilt on every UI change;
/// unset columns are `None` (empty strings from the transport normalize
/// to `None` before a `Selection` is constructed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub chart_type: ChartType,
    pub x_column: Option<String>,
    pub y_column: Option<String>,
    pub aggregation: Option<Aggregation>,
}

/// An uploaded table: one header list shared by every row. Rows are padded
/// on load so each exposes a value (possibly empty) for every header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Column identity is exact string match against the header list.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// The `(labels, values)` pair a chart renders, plus the resolved display
/// names for both axes. `labels` and `values` are always the same length
/// and non-empty on success.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub x_display_name: String,
    pub y_display_name: String,
}
