use std::fmt;

use hashbrown::HashSet;

/// 表格中的非空值
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Text(t) => f.write_str(t),
        }
    }
}

/// 以欄名為行、以索引標籤為列的表格，空值為 `None`。
///
/// 欄名在同一張表內不重複。每一列的長度永遠等於欄數。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    index: Vec<String>,
    rows: Vec<Vec<Option<Cell>>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Table {
            columns,
            index: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn index(&self) -> &[String] {
        &self.index
    }

    pub fn rows(&self) -> &[Vec<Option<Cell>>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.rows.is_empty()
    }

    /// 新增一列；長度不足的部分補空值，多出的部分捨棄。
    pub fn push_row(&mut self, label: impl Into<String>, mut cells: Vec<Option<Cell>>) {
        cells.resize(self.columns.len(), None);
        self.index.push(label.into());
        self.rows.push(cells);
    }
}

#[cfg(test)]
impl Table {
    /// 取得指定列、指定欄的值；欄不存在或值為空時回傳 `None`。
    pub fn get(&self, row: usize, column: &str) -> Option<&Cell> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.get(col)?.as_ref()
    }
}

/// 移除重複的欄名，保留第一次出現的欄與其值。
pub(crate) fn dedup_columns(
    columns: Vec<String>,
    cells: Vec<Option<Cell>>,
) -> (Vec<String>, Vec<Option<Cell>>) {
    let mut seen = HashSet::with_capacity(columns.len());
    let mut kept_columns = Vec::with_capacity(columns.len());
    let mut kept_cells = Vec::with_capacity(cells.len());

    for (column, cell) in columns.into_iter().zip(cells) {
        if seen.insert(column.clone()) {
            kept_columns.push(column);
            kept_cells.push(cell);
        }
    }

    (kept_columns, kept_cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_row_pads_missing_cells() {
        let mut table = Table::new(vec!["a".to_string(), "b".to_string()]);
        table.push_row("0", vec![Some(Cell::Number(1.0))]);

        assert_eq!(table.row_count(), 1);
        assert_eq!(table.get(0, "a"), Some(&Cell::Number(1.0)));
        assert_eq!(table.get(0, "b"), None);
        assert_eq!(table.rows()[0].len(), 2);
    }

    #[test]
    fn test_dedup_columns_keeps_first() {
        let (columns, cells) = dedup_columns(
            vec!["Total Assets".into(), "Cash".into(), "Total Assets".into()],
            vec![
                Some(Cell::Number(1.0)),
                None,
                Some(Cell::Number(2.0)),
            ],
        );

        assert_eq!(columns, vec!["Total Assets", "Cash"]);
        assert_eq!(cells, vec![Some(Cell::Number(1.0)), None]);
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::Number(1_500_000.0).to_string(), "1500000");
        assert_eq!(Cell::Number(0.123).to_string(), "0.123");
        assert_eq!(Cell::Text("Sep 30, 2023".into()).to_string(), "Sep 30, 2023");
    }
}
