use std::collections::HashMap;

use crate::error::ChartError;
use crate::models::{Aggregation, ChartSeries, Dataset, Selection};
use crate::services::validator;

/// Transforms a selection plus the uploaded dataset into the `(labels, values)`
/// series the chart renders.
///
/// The selection is re-validated first, then rows are grouped by the string
/// value of the X column in first-occurrence order. Grouping is stable:
/// labels come out in the order their key first appears in the data, never
/// sorted. The whole transformation is synchronous and deterministic, so
/// re-running it with identical inputs yields an identical series.
pub fn build_series(selection: &Selection, dataset: &Dataset) -> Result<ChartSeries, ChartError> {
    let validation = validator::validate(selection);
    if let Some(error) = validation.error {
        return Err(error);
    }

    // Validation guarantees x_column is set.
    let x_column = selection
        .x_column
        .as_deref()
        .ok_or(ChartError::MissingXColumn)?;
    let x_idx = dataset
        .column_index(x_column)
        .ok_or_else(|| ChartError::UnknownColumn(x_column.to_string()))?;

    let y_idx = match selection.y_column.as_deref() {
        Some(y_column) => Some(
            dataset
                .column_index(y_column)
                .ok_or_else(|| ChartError::UnknownColumn(y_column.to_string()))?,
        ),
        None => None,
    };

    if dataset.rows.is_empty() {
        return Err(ChartError::EmptyResult);
    }

    let aggregation = effective_aggregation(selection);

    let mut labels: Vec<String> = Vec::new();
    let mut values: Vec<f64> = Vec::new();
    let mut group_of: HashMap<String, usize> = HashMap::new();

    for row in &dataset.rows {
        let key = row.get(x_idx).cloned().unwrap_or_default();
        let group = match group_of.get(&key) {
            Some(&idx) => idx,
            None => {
                let idx = labels.len();
                group_of.insert(key.clone(), idx);
                labels.push(key);
                values.push(0.0);
                idx
            }
        };

        match aggregation {
            Aggregation::Count => values[group] += 1.0,
            Aggregation::Sum => {
                let raw = y_idx.and_then(|idx| row.get(idx)).map(String::as_str);
                values[group] += parse_numeric(raw.unwrap_or(""));
            }
        }
    }

    if labels.is_empty() {
        return Err(ChartError::EmptyResult);
    }

    Ok(ChartSeries {
        labels,
        values,
        x_display_name: x_column.to_string(),
        y_display_name: y_display_name(selection, aggregation),
    })
}

/// Resolves the reduction actually applied. 'count' ignores the Y column
/// entirely; an unset aggregation falls back to sum when a Y column is
/// present and to count when it is not. Multiple rows sharing an X value
/// are always aggregated, never silently overwritten.
fn effective_aggregation(selection: &Selection) -> Aggregation {
    match (selection.aggregation, &selection.y_column) {
        (Some(aggregation), _) => aggregation,
        (None, Some(_)) => Aggregation::Sum,
        (None, None) => Aggregation::Count,
    }
}

fn y_display_name(selection: &Selection, aggregation: Aggregation) -> String {
    match (&selection.y_column, aggregation) {
        (Some(y_column), _) => y_column.clone(),
        (None, Aggregation::Count) => "Count".to_string(),
        (None, Aggregation::Sum) => "Value".to_string(),
    }
}

/// Numeric interpretation for 'sum': trimmed base-10 integer or float.
/// Thousands separators, locale formats and non-finite tokens do not count
/// as numbers; any failure contributes 0 to the group instead of dropping it.
fn parse_numeric(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChartType;

    fn cities_dataset() -> Dataset {
        Dataset {
            headers: vec!["city".to_string(), "pop".to_string()],
            rows: vec![
                vec!["Kyiv".to_string(), "100".to_string()],
                vec!["Lviv".to_string(), "50".to_string()],
                vec!["Kyiv".to_string(), "20".to_string()],
            ],
        }
    }

    fn selection(
        chart_type: ChartType,
        x: Option<&str>,
        y: Option<&str>,
        aggregation: Option<Aggregation>,
    ) -> Selection {
        Selection {
            chart_type,
            x_column: x.map(str::to_string),
            y_column: y.map(str::to_string),
            aggregation,
        }
    }

    #[test]
    fn bar_sum_groups_cities() {
        let sel = selection(ChartType::Bar, Some("city"), Some("pop"), Some(Aggregation::Sum));
        let series = build_series(&sel, &cities_dataset()).unwrap();

        assert_eq!(series.labels, vec!["Kyiv", "Lviv"]);
        assert_eq!(series.values, vec![120.0, 50.0]);
        assert_eq!(series.x_display_name, "city");
        assert_eq!(series.y_display_name, "pop");
    }

    #[test]
    fn pie_count_groups_cities() {
        let sel = selection(ChartType::Pie, Some("city"), None, Some(Aggregation::Count));
        let series = build_series(&sel, &cities_dataset()).unwrap();

        assert_eq!(series.labels, vec!["Kyiv", "Lviv"]);
        assert_eq!(series.values, vec![2.0, 1.0]);
        assert_eq!(series.y_display_name, "Count");
    }

    #[test]
    fn labels_keep_first_occurrence_order() {
        let dataset = Dataset {
            headers: vec!["city".to_string()],
            rows: vec![
                vec!["Odesa".to_string()],
                vec!["Kyiv".to_string()],
                vec!["Odesa".to_string()],
                vec!["Dnipro".to_string()],
                vec!["Kyiv".to_string()],
                vec!["Odesa".to_string()],
            ],
        };
        let sel = selection(ChartType::Pie, Some("city"), None, Some(Aggregation::Count));
        let series = build_series(&sel, &dataset).unwrap();

        assert_eq!(series.labels, vec!["Odesa", "Kyiv", "Dnipro"]);
        assert_eq!(series.values, vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn unparseable_values_sum_as_zero() {
        let dataset = Dataset {
            headers: vec!["city".to_string(), "pop".to_string()],
            rows: vec![
                vec!["Kyiv".to_string(), "abc".to_string()],
                vec!["Kyiv".to_string(), "5".to_string()],
            ],
        };
        let sel = selection(ChartType::Bar, Some("city"), Some("pop"), Some(Aggregation::Sum));
        let series = build_series(&sel, &dataset).unwrap();

        assert_eq!(series.labels, vec!["Kyiv"]);
        assert_eq!(series.values, vec![5.0]);
    }

    #[test]
    fn whitespace_is_trimmed_but_locale_formats_are_not_numbers() {
        let dataset = Dataset {
            headers: vec!["city".to_string(), "pop".to_string()],
            rows: vec![
                vec!["Kyiv".to_string(), "  2.5 ".to_string()],
                vec!["Kyiv".to_string(), "1,000".to_string()],
                vec!["Kyiv".to_string(), "inf".to_string()],
                vec!["Kyiv".to_string(), "".to_string()],
            ],
        };
        let sel = selection(ChartType::Bar, Some("city"), Some("pop"), Some(Aggregation::Sum));
        let series = build_series(&sel, &dataset).unwrap();

        assert_eq!(series.values, vec![2.5]);
    }

    #[test]
    fn count_ignores_y_column() {
        let with_y = selection(ChartType::Bar, Some("city"), Some("pop"), Some(Aggregation::Count));
        let without_y = selection(ChartType::Bar, Some("city"), None, Some(Aggregation::Count));
        let dataset = cities_dataset();

        let series_with_y = build_series(&with_y, &dataset).unwrap();
        let series_without_y = build_series(&without_y, &dataset).unwrap();

        assert_eq!(series_with_y.values, series_without_y.values);
        assert_eq!(series_with_y.values, vec![2.0, 1.0]);
    }

    #[test]
    fn unset_aggregation_with_y_sums() {
        let sel = selection(ChartType::Line, Some("city"), Some("pop"), None);
        let series = build_series(&sel, &cities_dataset()).unwrap();

        assert_eq!(series.values, vec![120.0, 50.0]);
    }

    #[test]
    fn unset_aggregation_without_y_counts_for_pie() {
        let sel = selection(ChartType::Pie, Some("city"), None, None);
        let series = build_series(&sel, &cities_dataset()).unwrap();

        assert_eq!(series.values, vec![2.0, 1.0]);
        assert_eq!(series.y_display_name, "Count");
    }

    #[test]
    fn empty_dataset_is_empty_result() {
        let dataset = Dataset {
            headers: vec!["city".to_string(), "pop".to_string()],
            rows: vec![],
        };
        let sel = selection(ChartType::Bar, Some("city"), Some("pop"), Some(Aggregation::Sum));

        assert_eq!(build_series(&sel, &dataset), Err(ChartError::EmptyResult));
    }

    #[test]
    fn unknown_columns_are_rejected() {
        let dataset = cities_dataset();

        let sel = selection(ChartType::Bar, Some("region"), Some("pop"), Some(Aggregation::Sum));
        assert_eq!(
            build_series(&sel, &dataset),
            Err(ChartError::UnknownColumn("region".to_string()))
        );

        let sel = selection(ChartType::Bar, Some("city"), Some("area"), Some(Aggregation::Sum));
        assert_eq!(
            build_series(&sel, &dataset),
            Err(ChartError::UnknownColumn("area".to_string()))
        );
    }

    #[test]
    fn invalid_selection_fails_before_dataset_checks() {
        // A missing X column outranks the empty dataset.
        let dataset = Dataset {
            headers: vec!["city".to_string()],
            rows: vec![],
        };
        let sel = selection(ChartType::Bar, None, None, None);

        assert_eq!(build_series(&sel, &dataset), Err(ChartError::MissingXColumn));
    }

    #[test]
    fn build_is_idempotent() {
        let sel = selection(ChartType::Bar, Some("city"), Some("pop"), Some(Aggregation::Sum));
        let dataset = cities_dataset();

        let first = build_series(&sel, &dataset).unwrap();
        let second = build_series(&sel, &dataset).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn labels_and_values_stay_aligned() {
        let sel = selection(ChartType::Line, Some("city"), Some("pop"), None);
        let series = build_series(&sel, &cities_dataset()).unwrap();

        assert_eq!(series.labels.len(), series.values.len());
        assert!(!series.labels.is_empty());
    }
}
