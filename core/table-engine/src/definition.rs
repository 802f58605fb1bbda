//! FILENAME: core/table-engine/src/definition.rs
//! Table Definition - The serializable configuration.
//!
//! This module contains all the types needed to DESCRIBE a table.
//! These structures are designed to be:
//! - Serializable (loaded from JSON alongside the data they describe)
//! - Immutable snapshots of what the caller wants shown
//!
//! Custom renderers are runtime-only and never serialized.

use std::cmp::Ordering;
use std::collections::HashSet;

use cell_engine::{format_value, CellValue, DataType, FormattedValue, FormatterOptions, TextAlign};
use serde::{Deserialize, Serialize};

use crate::error::TableError;
use crate::export::CsvOptions;
use crate::footer::FooterDefinition;
use crate::render::{CellRenderer, CustomRenderer, RenderContext};

// ============================================================================
// SORT DIRECTION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Applies the direction to an ascending comparison.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

// ============================================================================
// COLUMN
// ============================================================================

/// A table's schema unit. Its position in the column list is the position
/// of its value in every row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Header text; unique within a table.
    pub label: String,

    #[serde(default)]
    pub data_type: DataType,

    /// Priority of this column in the default sort (1 = primary).
    /// Columns without it are not sort keys unless clicked.
    #[serde(default)]
    pub sort_order: Option<u32>,

    #[serde(default)]
    pub sort_direction: Option<SortDirection>,

    #[serde(default)]
    pub disable_search: bool,

    #[serde(default)]
    pub exclude_from_sort: bool,

    #[serde(default)]
    pub text_align: TextAlign,

    #[serde(default)]
    pub formatter_options: FormatterOptions,

    #[serde(skip)]
    pub render: Option<CustomRenderer>,
}

impl Column {
    pub fn new(label: impl Into<String>, data_type: DataType) -> Self {
        Column {
            label: label.into(),
            data_type,
            sort_order: None,
            sort_direction: None,
            disable_search: false,
            exclude_from_sort: false,
            text_align: TextAlign::General,
            formatter_options: FormatterOptions::default(),
            render: None,
        }
    }

    pub fn text(label: impl Into<String>) -> Self {
        Self::new(label, DataType::Text)
    }

    pub fn with_sort(mut self, sort_order: u32, direction: SortDirection) -> Self {
        self.sort_order = Some(sort_order);
        self.sort_direction = Some(direction);
        self
    }

    pub fn with_options(mut self, options: FormatterOptions) -> Self {
        self.formatter_options = options;
        self
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.text_align = align;
        self
    }

    pub fn without_search(mut self) -> Self {
        self.disable_search = true;
        self
    }

    pub fn without_sort(mut self) -> Self {
        self.exclude_from_sort = true;
        self
    }

    /// Overrides default formatting with a closure.
    pub fn with_renderer<F>(mut self, renderer: F) -> Self
    where
        F: Fn(&RenderContext<'_>) -> FormattedValue + Send + Sync + 'static,
    {
        self.render = Some(CustomRenderer::new(renderer));
        self
    }

    /// Overrides default formatting with a renderer type.
    pub fn with_cell_renderer(mut self, renderer: impl CellRenderer + 'static) -> Self {
        self.render = Some(CustomRenderer::new(renderer));
        self
    }

    pub fn is_sortable(&self) -> bool {
        !self.exclude_from_sort
    }

    pub fn is_searchable(&self) -> bool {
        !self.disable_search
    }

    pub fn resolved_align(&self) -> TextAlign {
        self.text_align.resolve(self.data_type)
    }

    /// Default display form of a raw value in this column.
    pub fn format(&self, value: &CellValue) -> FormattedValue {
        format_value(value, self.data_type, &self.formatter_options)
    }

    /// The text search matches against: the default format, with lists
    /// joined by the column's separator.
    pub fn search_text(&self, value: &CellValue) -> String {
        self.format(value).plain_text_with(&self.formatter_options)
    }

    /// The value this column sorts by. Financial columns sort by the
    /// selected field rather than the whole compound value.
    pub fn sort_value<'v>(&self, value: &'v CellValue) -> &'v CellValue {
        if self.data_type != DataType::Financial {
            return value;
        }
        match self.formatter_options.selector.as_deref() {
            Some(selector) => value.select(selector).unwrap_or(value),
            None => value,
        }
    }
}

// ============================================================================
// MAIN DEFINITION STRUCT
// ============================================================================

/// The complete, serializable definition of a table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDefinition {
    #[serde(default)]
    pub name: Option<String>,

    pub columns: Vec<Column>,

    /// Footer aggregation, if the table shows one.
    #[serde(default)]
    pub footer: Option<FooterDefinition>,

    #[serde(default)]
    pub export: CsvOptions,
}

impl TableDefinition {
    pub fn new(columns: Vec<Column>) -> Self {
        TableDefinition {
            columns,
            ..Default::default()
        }
    }

    /// Parses and validates a definition from JSON.
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let definition: TableDefinition = serde_json::from_str(json)?;
        definition.validate()?;
        Ok(definition)
    }

    /// Column labels must be unique within a table.
    pub fn validate(&self) -> Result<(), TableError> {
        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.label.as_str()) {
                return Err(TableError::DuplicateLabel(column.label.clone()));
            }
        }
        Ok(())
    }

    pub fn data_types(&self) -> Vec<DataType> {
        self.columns.iter().map(|c| c.data_type).collect()
    }

    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.label == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_direction_apply() {
        assert_eq!(SortDirection::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(SortDirection::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(SortDirection::Asc.toggled(), SortDirection::Desc);
    }

    #[test]
    fn test_column_from_json_defaults() {
        let column: Column = serde_json::from_str(
            r#"{"label": "Age", "dataType": "number", "sortOrder": 1, "sortDirection": "desc"}"#,
        )
        .unwrap();
        assert_eq!(column.data_type, DataType::Number);
        assert_eq!(column.sort_order, Some(1));
        assert_eq!(column.sort_direction, Some(SortDirection::Desc));
        assert!(column.is_searchable());
        assert!(column.is_sortable());
        assert!(column.render.is_none());
        assert_eq!(column.resolved_align(), TextAlign::Right);
    }

    #[test]
    fn test_financial_sort_value_uses_selector() {
        let mut fields = BTreeMap::new();
        fields.insert("net".to_string(), CellValue::Number(5.0));
        let value = CellValue::Record(fields);

        let column = Column::new("Net", DataType::Financial)
            .with_options(FormatterOptions::default().with_selector("net"));
        assert_eq!(column.sort_value(&value), &CellValue::Number(5.0));

        let plain = Column::new("Raw", DataType::Text);
        assert_eq!(plain.sort_value(&value), &value);
    }

    #[test]
    fn test_definition_rejects_duplicate_labels() {
        let json = r#"{"columns": [{"label": "Name"}, {"label": "Name"}]}"#;
        match TableDefinition::from_json(json) {
            Err(TableError::DuplicateLabel(label)) => assert_eq!(label, "Name"),
            other => panic!("expected duplicate label error, got {:?}", other),
        }
    }

    #[test]
    fn test_definition_reports_bad_json() {
        assert!(matches!(
            TableDefinition::from_json("{\"columns\": 3}"),
            Err(TableError::InvalidDefinition(_))
        ));
    }
}
