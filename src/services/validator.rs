use crate::error::ChartError;
use crate::models::{Aggregation, ChartType, Selection};

/// Outcome of gating the build action against the current selection.
/// `error` explains why `can_build` is false; `y_column_disabled` is
/// advisory UI state, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub can_build: bool,
    pub error: Option<ChartError>,
    pub y_column_disabled: bool,
}

/// Decides whether "build chart" may run for the given selection.
///
/// Pure function of the four selection fields: only column names matter,
/// never the data. Rules are checked in order and the first failure wins:
/// 1. The X column must be set.
/// 2. Bar/line charts need a Y column unless aggregation is 'count'.
/// 3. A pie chart with 'sum' aggregation needs a Y column.
pub fn validate(selection: &Selection) -> Validation {
    let y_column_disabled = selection.chart_type == ChartType::Pie
        && selection.aggregation == Some(Aggregation::Count);

    let error = check_rules(selection);

    Validation {
        can_build: error.is_none(),
        error,
        y_column_disabled,
    }
}

fn check_rules(selection: &Selection) -> Option<ChartError> {
    if selection.x_column.is_none() {
        return Some(ChartError::MissingXColumn);
    }

    if selection.chart_type.is_cartesian()
        && selection.aggregation != Some(Aggregation::Count)
        && selection.y_column.is_none()
    {
        return Some(ChartError::MissingYColumn);
    }

    if selection.chart_type == ChartType::Pie
        && selection.aggregation == Some(Aggregation::Sum)
        && selection.y_column.is_none()
    {
        return Some(ChartError::MissingYColumnForPieSum);
    }

    None
}

/// Applies a chart type change. Y column and aggregation reset so a stale
/// combination from the previous chart type can never survive the switch.
pub fn apply_chart_type(selection: &Selection, chart_type: ChartType) -> Selection {
    Selection {
        chart_type,
        x_column: selection.x_column.clone(),
        y_column: None,
        aggregation: None,
    }
}

/// Applies an aggregation change. Selecting 'count' on a pie chart forces
/// the Y column unset, matching the disabled Y selector in the UI.
pub fn apply_aggregation(selection: &Selection, aggregation: Option<Aggregation>) -> Selection {
    let clear_y = selection.chart_type == ChartType::Pie && aggregation == Some(Aggregation::Count);

    Selection {
        chart_type: selection.chart_type,
        x_column: selection.x_column.clone(),
        y_column: if clear_y {
            None
        } else {
            selection.y_column.clone()
        },
        aggregation,
    }
}
