use crate::data::sort_engine::{SortDirection, SortState};

/// Glyphs appended to header labels to show the sort direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionIndicators {
    pub neutral: String,
    pub ascending: String,
    pub descending: String,
}

impl Default for DirectionIndicators {
    fn default() -> Self {
        Self {
            neutral: "↕".to_string(),
            ascending: "▲".to_string(),
            descending: "▼".to_string(),
        }
    }
}

impl DirectionIndicators {
    pub fn for_direction(&self, direction: SortDirection) -> &str {
        match direction {
            SortDirection::Ascending => &self.ascending,
            SortDirection::Descending => &self.descending,
            SortDirection::None => &self.neutral,
        }
    }
}

/// A sortable column header. The base label is captured once, before any
/// direction decoration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnHeader {
    base_label: String,
}

impl ColumnHeader {
    pub fn new(label: impl AsRef<str>) -> Self {
        Self {
            base_label: label.as_ref().trim().to_string(),
        }
    }

    pub fn base_label(&self) -> &str {
        &self.base_label
    }
}

/// One data row. `original_position` is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    cells: Vec<String>,
    original_position: usize,
    visible: bool,
}

impl Row {
    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// Trimmed text of a cell, empty when the row is shorter than `column`
    pub fn cell_text(&self, column: usize) -> &str {
        self.cells.get(column).map(|c| c.trim()).unwrap_or("")
    }

    pub fn original_position(&self) -> usize {
        self.original_position
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

/// The table both engines operate on: headers, rows in display order,
/// and the current sort state.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<ColumnHeader>,
    rows: Vec<Row>,
    sort_state: SortState,
    indicators: DirectionIndicators,
}

impl Table {
    /// Build a table. Row original positions are taken from the order given here.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let headers = headers.iter().map(ColumnHeader::new).collect();
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(original_position, cells)| Row {
                cells,
                original_position,
                visible: true,
            })
            .collect();

        Self {
            headers,
            rows,
            sort_state: SortState::default(),
            indicators: DirectionIndicators::default(),
        }
    }

    pub fn with_indicators(mut self, indicators: DirectionIndicators) -> Self {
        self.indicators = indicators;
        self
    }

    pub fn headers(&self) -> &[ColumnHeader] {
        &self.headers
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Find a column by base label (case-insensitive), falling back to
    /// reading the text as an index
    pub fn column_index(&self, name_or_index: &str) -> Option<usize> {
        let wanted = name_or_index.trim();
        self.headers
            .iter()
            .position(|h| h.base_label().eq_ignore_ascii_case(wanted))
            .or_else(|| {
                wanted
                    .parse::<usize>()
                    .ok()
                    .filter(|&idx| idx < self.headers.len())
            })
    }

    /// Decorated label: base label, a space, and the direction indicator.
    /// Only the actively sorted column carries a directional glyph.
    pub fn header_label(&self, column: usize) -> Option<String> {
        let header = self.headers.get(column)?;
        let direction = match self.sort_state.column {
            Some(active) if active == column => self.sort_state.direction,
            _ => SortDirection::None,
        };
        Some(format!(
            "{} {}",
            header.base_label(),
            self.indicators.for_direction(direction)
        ))
    }

    pub fn header_labels(&self) -> Vec<String> {
        (0..self.headers.len())
            .filter_map(|idx| self.header_label(idx))
            .collect()
    }

    /// Rows in current display order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    /// Swap in a reordered row collection, returning the previous one
    pub(crate) fn replace_rows(&mut self, rows: Vec<Row>) -> Vec<Row> {
        std::mem::replace(&mut self.rows, rows)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(|r| r.visible)
    }

    pub fn visible_count(&self) -> usize {
        self.visible_rows().count()
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort_state
    }

    pub(crate) fn set_sort_state(&mut self, state: SortState) {
        self.sort_state = state;
    }

    /// Current display order as original positions
    pub fn order(&self) -> Vec<usize> {
        self.rows.iter().map(|r| r.original_position).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(
            vec!["  Land ".to_string(), "CO2".to_string()],
            vec![
                vec!["Deutschland".to_string(), "675".to_string()],
                vec!["Österreich".to_string()],
            ],
        )
    }

    #[test]
    fn test_base_label_is_trimmed_and_neutral() {
        let table = sample();
        assert_eq!(table.headers()[0].base_label(), "Land");
        assert_eq!(table.header_labels(), vec!["Land ↕", "CO2 ↕"]);
    }

    #[test]
    fn test_original_positions_follow_input_order() {
        let table = sample();
        assert_eq!(table.order(), vec![0, 1]);
        assert!(table.rows().iter().all(|r| r.is_visible()));
    }

    #[test]
    fn test_missing_cell_reads_as_empty() {
        let table = sample();
        assert_eq!(table.rows()[1].cell_text(1), "");
        assert_eq!(table.rows()[1].cell_text(7), "");
    }

    #[test]
    fn test_column_lookup() {
        let table = sample();
        assert_eq!(table.column_index("1"), Some(1));
        assert_eq!(table.column_index("co2"), Some(1));
        assert_eq!(table.column_index("Land"), Some(0));
        assert_eq!(table.column_index("5"), None);
        assert_eq!(table.column_index("Jahr"), None);
    }

    #[test]
    fn test_numeric_label_wins_over_index() {
        let table = Table::new(
            vec!["Land".to_string(), "2019".to_string(), "2020".to_string()],
            vec![vec!["DE".to_string(), "1".to_string(), "2".to_string()]],
        );
        assert_eq!(table.column_index("2020"), Some(2));
        assert_eq!(table.column_index("2"), Some(2));
        assert_eq!(table.column_index("0"), Some(0));
    }
}
