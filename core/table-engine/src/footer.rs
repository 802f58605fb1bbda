//! FILENAME: core/table-engine/src/footer.rs
//! PURPOSE: Footer aggregation for table views.
//! CONTEXT: A footer is one extra row aligned to the columns. Callers
//! either supply their own reducer (any `Fn(&[&Row]) -> Row`) or declare
//! per-column aggregations with `ColumnAggregates`. The rows handed to the
//! reducer depend on the `FooterScope`.

use cell_engine::{CellValue, Row};
use serde::{Deserialize, Serialize};

// ============================================================================
// SCOPE
// ============================================================================

/// Which rows the footer is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FooterScope {
    /// Rows that survived search, in view order.
    #[default]
    Visible,
    /// Every raw row, in input order.
    All,
}

// ============================================================================
// REDUCER
// ============================================================================

pub trait FooterReducer: Send + Sync {
    fn reduce(&self, rows: &[&Row]) -> Row;
}

impl<F> FooterReducer for F
where
    F: Fn(&[&Row]) -> Row + Send + Sync,
{
    fn reduce(&self, rows: &[&Row]) -> Row {
        self(rows)
    }
}

// ============================================================================
// AGGREGATIONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Aggregation {
    #[default]
    Sum,
    /// Non-empty cells.
    Count,
    /// Cells holding a number or money amount.
    CountNumbers,
    Average,
    Min,
    Max,
}

/// Running totals for one column.
#[derive(Debug, Clone, Default)]
struct AggregateAccumulator {
    sum: f64,
    count: usize,
    numeric_count: usize,
    min: Option<f64>,
    max: Option<f64>,
}

impl AggregateAccumulator {
    fn add(&mut self, value: &CellValue) {
        if value.is_empty() {
            return;
        }
        self.count += 1;

        if let Some(n) = value.as_number().filter(|n| !n.is_nan()) {
            self.sum += n;
            self.numeric_count += 1;
            self.min = Some(self.min.map_or(n, |m| m.min(n)));
            self.max = Some(self.max.map_or(n, |m| m.max(n)));
        }
    }

    fn compute(&self, aggregation: Aggregation) -> CellValue {
        match aggregation {
            Aggregation::Sum => CellValue::Number(self.sum),
            Aggregation::Count => CellValue::Number(self.count as f64),
            Aggregation::CountNumbers => CellValue::Number(self.numeric_count as f64),
            Aggregation::Average => {
                if self.numeric_count == 0 {
                    CellValue::Empty
                } else {
                    CellValue::Number(self.sum / self.numeric_count as f64)
                }
            }
            Aggregation::Min => self.min.map_or(CellValue::Empty, CellValue::Number),
            Aggregation::Max => self.max.map_or(CellValue::Empty, CellValue::Number),
        }
    }
}

/// Declarative footer: one optional aggregation per column, plus an
/// optional label placed in a column without an aggregation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnAggregates {
    aggregations: Vec<Option<Aggregation>>,
    label: Option<(usize, String)>,
}

impl ColumnAggregates {
    pub fn new(aggregations: Vec<Option<Aggregation>>) -> Self {
        ColumnAggregates {
            aggregations,
            label: None,
        }
    }

    pub fn with_label(mut self, column_index: usize, label: impl Into<String>) -> Self {
        self.label = Some((column_index, label.into()));
        self
    }
}

impl FooterReducer for ColumnAggregates {
    fn reduce(&self, rows: &[&Row]) -> Row {
        let width = self.aggregations.len();
        let mut accumulators = vec![AggregateAccumulator::default(); width];

        for row in rows {
            for (acc, value) in accumulators.iter_mut().zip(row.iter()) {
                acc.add(value);
            }
        }

        let mut footer: Row = self
            .aggregations
            .iter()
            .zip(accumulators.iter())
            .map(|(aggregation, acc)| match aggregation {
                Some(aggregation) => acc.compute(*aggregation),
                None => CellValue::Empty,
            })
            .collect();

        if let Some((index, label)) = &self.label {
            if let Some(cell) = footer.get_mut(*index) {
                if cell.is_empty() {
                    *cell = CellValue::text(label.as_str());
                }
            }
        }

        footer
    }
}

// ============================================================================
// SERIALIZABLE DEFINITION
// ============================================================================

/// Footer configuration as it appears in a table definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterDefinition {
    /// One entry per column; `null` leaves the footer cell empty.
    #[serde(default)]
    pub aggregations: Vec<Option<Aggregation>>,

    #[serde(default)]
    pub label: Option<String>,

    /// Column the label is placed in.
    #[serde(default)]
    pub label_column: usize,

    #[serde(default)]
    pub scope: FooterScope,
}

impl FooterDefinition {
    pub fn reducer(&self) -> ColumnAggregates {
        let aggregates = ColumnAggregates::new(self.aggregations.clone());
        match &self.label {
            Some(label) => aggregates.with_label(self.label_column, label.clone()),
            None => aggregates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<Row> {
        vec![
            vec![CellValue::text("a"), CellValue::Number(10.0)],
            vec![CellValue::text("b"), CellValue::Empty],
            vec![CellValue::text("c"), CellValue::money(5.0, "USD")],
        ]
    }

    #[test]
    fn test_column_aggregates() {
        let data = rows();
        let refs: Vec<&Row> = data.iter().collect();

        let sum = ColumnAggregates::new(vec![None, Some(Aggregation::Sum)]).with_label(0, "Total");
        assert_eq!(
            sum.reduce(&refs),
            vec![CellValue::text("Total"), CellValue::Number(15.0)]
        );

        let count = ColumnAggregates::new(vec![Some(Aggregation::Count), Some(Aggregation::CountNumbers)]);
        assert_eq!(
            count.reduce(&refs),
            vec![CellValue::Number(3.0), CellValue::Number(2.0)]
        );

        let stats = ColumnAggregates::new(vec![Some(Aggregation::Max), Some(Aggregation::Average)]);
        assert_eq!(
            stats.reduce(&refs),
            vec![CellValue::Empty, CellValue::Number(7.5)]
        );
    }

    #[test]
    fn test_empty_input_yields_neutral_values() {
        let aggregates = ColumnAggregates::new(vec![Some(Aggregation::Sum), Some(Aggregation::Min)]);
        assert_eq!(
            aggregates.reduce(&[]),
            vec![CellValue::Number(0.0), CellValue::Empty]
        );
    }

    #[test]
    fn test_closure_reducer() {
        let data = rows();
        let refs: Vec<&Row> = data.iter().collect();
        let reducer = |rows: &[&Row]| vec![CellValue::Number(rows.len() as f64)];
        assert_eq!(reducer.reduce(&refs), vec![CellValue::Number(3.0)]);
    }

    #[test]
    fn test_footer_definition_from_json() {
        let def: FooterDefinition = serde_json::from_str(
            r#"{"aggregations": [null, "sum"], "label": "Total", "scope": "all"}"#,
        )
        .unwrap();
        assert_eq!(def.scope, FooterScope::All);
        assert_eq!(
            def.reducer(),
            ColumnAggregates::new(vec![None, Some(Aggregation::Sum)]).with_label(0, "Total")
        );
    }
}
