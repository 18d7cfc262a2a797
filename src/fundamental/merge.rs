use hashbrown::HashMap;

use crate::fundamental::{
    aggregate::TickerRow,
    table::{Cell, Table},
};

/// 以外部聯集合併多檔股票的資料列。
///
/// 欄位為所有列欄名的聯集（依第一次出現的順序），列順序與輸入相同，
/// 某檔股票沒有的欄位填入空值。
pub fn merge(rows: &[TickerRow]) -> Table {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut columns: Vec<String> = Vec::new();

    for row in rows {
        for column in row.columns() {
            if !positions.contains_key(column.as_str()) {
                positions.insert(column.as_str(), columns.len());
                columns.push(column.clone());
            }
        }
    }

    let width = columns.len();
    let mut table = Table::new(columns);

    for row in rows {
        let mut cells: Vec<Option<Cell>> = vec![None; width];
        // TickerRow 內欄名不重複且與值等長，每格只會寫入一次
        for (column, cell) in row.columns().iter().zip(row.cells()) {
            if let Some(&pos) = positions.get(column.as_str()) {
                cells[pos] = cell.clone();
            }
        }
        table.push_row(row.ticker(), cells);
    }

    table
}
