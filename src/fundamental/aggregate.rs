use crate::{
    declare::Page,
    fundamental::{
        table::{dedup_columns, Cell, Table},
        FundamentalError,
    },
};

/// 單一股票的四張表格；欄位為 `None` 表示該頁未能取得
#[derive(Debug, Clone, Default)]
pub struct TickerStatements {
    pub balance_sheet: Option<Table>,
    pub financials: Option<Table>,
    pub cash_flow: Option<Table>,
    pub key_statistics: Option<Table>,
}

impl TickerStatements {
    pub fn set(&mut self, page: Page, table: Table) {
        match page {
            Page::BalanceSheet => self.balance_sheet = Some(table),
            Page::Financials => self.financials = Some(table),
            Page::CashFlow => self.cash_flow = Some(table),
            Page::KeyStatistics => self.key_statistics = Some(table),
        }
    }
}

/// 一檔股票彙整後的單列資料，以股票代碼為索引。
///
/// 欄名不重複，且欄數與值的數量相同。
#[derive(Debug, Clone, PartialEq)]
pub struct TickerRow {
    ticker: String,
    columns: Vec<String>,
    cells: Vec<Option<Cell>>,
}

impl TickerRow {
    /// 值不足的欄補空值、多出的值捨棄，再移除重複欄名（保留第一次出現者）
    pub fn new(ticker: impl Into<String>, columns: Vec<String>, mut cells: Vec<Option<Cell>>) -> Self {
        cells.resize(columns.len(), None);
        let (columns, cells) = dedup_columns(columns, cells);
        TickerRow {
            ticker: ticker.into(),
            columns,
            cells,
        }
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn cells(&self) -> &[Option<Cell>] {
        &self.cells
    }
}

#[cfg(test)]
impl TickerRow {
    pub fn get(&self, column: &str) -> Option<&Cell> {
        let pos = self.columns.iter().position(|c| c == column)?;
        self.cells[pos].as_ref()
    }
}

/// 將資產負債表、損益表、現金流量表（各取最新一期）與關鍵統計水平合併為一列。
///
/// 任一頁缺少即整檔失敗，不產生部分資料。
pub fn aggregate(ticker: &str, statements: TickerStatements) -> Result<TickerRow, FundamentalError> {
    let TickerStatements {
        balance_sheet,
        financials,
        cash_flow,
        key_statistics,
    } = statements;

    let sources = [
        (Page::BalanceSheet, balance_sheet),
        (Page::Financials, financials),
        (Page::CashFlow, cash_flow),
        (Page::KeyStatistics, key_statistics),
    ];

    let mut columns = Vec::new();
    let mut cells = Vec::new();

    for (page, table) in sources {
        let table = table.ok_or_else(|| FundamentalError::fetch(ticker, page, "no data"))?;
        if let Some(newest) = table.rows().first() {
            columns.extend(table.columns().iter().cloned());
            cells.extend(newest.iter().cloned());
        }
    }

    Ok(TickerRow::new(ticker, columns, cells))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_row(columns: &[&str], values: &[f64]) -> Table {
        let mut table = Table::new(columns.iter().map(|c| c.to_string()).collect());
        table.push_row("0", values.iter().map(|v| Some(Cell::Number(*v))).collect());
        table
    }

    fn full_statements() -> TickerStatements {
        TickerStatements {
            balance_sheet: Some(one_row(&["Total Assets", "Net Income"], &[1.0, 2.0])),
            financials: Some(one_row(&["Total Revenue", "Net Income"], &[3.0, 4.0])),
            cash_flow: Some(Table::default()),
            key_statistics: Some(one_row(&["Beta (5Y Monthly)"], &[1.2])),
        }
    }

    #[test]
    fn test_aggregate_concatenates_in_order() {
        let row = aggregate("AAPL", full_statements()).unwrap();

        assert_eq!(row.ticker(), "AAPL");
        assert_eq!(
            row.columns(),
            &["Total Assets", "Net Income", "Total Revenue", "Beta (5Y Monthly)"]
        );
        // 重複欄名保留第一次出現的值
        assert_eq!(row.get("Net Income"), Some(&Cell::Number(2.0)));
    }

    #[test]
    fn test_aggregate_takes_newest_row_only() {
        let mut statements = full_statements();
        let mut history = one_row(&["Operating Cash Flow"], &[10.0]);
        history.push_row("1", vec![Some(Cell::Number(9.0))]);
        statements.set(Page::CashFlow, history);

        let row = aggregate("AAPL", statements).unwrap();
        assert_eq!(row.get("Operating Cash Flow"), Some(&Cell::Number(10.0)));
    }

    #[test]
    fn test_ticker_row_pads_and_dedups() {
        let row = TickerRow::new(
            "AAPL",
            vec!["x".into(), "x".into(), "y".into()],
            vec![Some(Cell::Number(1.0)), Some(Cell::Number(2.0))],
        );

        assert_eq!(row.columns(), &["x", "y"]);
        assert_eq!(row.cells(), &[Some(Cell::Number(1.0)), None]);
    }

    #[test]
    fn test_aggregate_fails_on_missing_page() {
        let mut statements = full_statements();
        statements.financials = None;

        let err = aggregate("AAPL", statements).unwrap_err();
        assert!(matches!(
            err,
            FundamentalError::Fetch { page: Page::Financials, .. }
        ));
    }
}
