//! # 財務報表表格建構
//!
//! 將資產負債表、損益表、現金流量表的標籤/數值對轉為數值表格。
//! 來源數值以「千」為單位，存入表格前一律乘上 1000。

use hashbrown::HashSet;

use crate::{
    declare::ExtractMode,
    fundamental::{
        table::{Cell, Table},
        FundamentalError, LabelValuePair,
    },
    util::text,
};

/// 來源數值的單位（千）
pub const THOUSANDS: f64 = 1000.0;

/// 多期模式中代表「無資料」的字元
const MISSING_PERIOD: &str = "-";

/// 建立財務報表表格。
///
/// * `Newest`：只取每個標籤的第一個值，產生一列。
/// * `AllYears`：每個標籤最多取 `max_periods` 個值，期數為所有標籤中最多的值數；
///   單獨的 `-` 視為空值，尾端不足的期別補空值。
///
/// 重複的標籤保留第一次出現者。沒有任何資料時回傳零欄零列的表格。
pub fn build_statement(
    ticker: &str,
    pairs: &[LabelValuePair],
    mode: ExtractMode,
    max_periods: usize,
) -> Result<Table, FundamentalError> {
    if pairs.is_empty() {
        return Ok(Table::default());
    }

    let periods = match mode {
        ExtractMode::Newest => 1,
        ExtractMode::AllYears => pairs
            .iter()
            .map(|p| p.values.len())
            .max()
            .unwrap_or(0)
            .min(max_periods.max(1)),
    };

    let mut seen = HashSet::with_capacity(pairs.len());
    let mut columns = Vec::with_capacity(pairs.len());
    let mut series: Vec<Vec<Option<f64>>> = Vec::with_capacity(pairs.len());

    for pair in pairs {
        if !seen.insert(pair.label.as_str()) {
            continue;
        }

        // 最新一期是必要的，缺少即視為解析失敗
        if pair.values.is_empty() {
            return Err(FundamentalError::parse(ticker, &pair.label, ""));
        }

        let mut values = Vec::with_capacity(periods);
        for period in 0..periods {
            let value = match pair.values.get(period) {
                Some(raw) => parse_value(ticker, &pair.label, raw, mode)?,
                None => None,
            };
            values.push(value);
        }

        columns.push(pair.label.clone());
        series.push(values);
    }

    let mut table = Table::new(columns);
    for period in 0..periods {
        let cells = series
            .iter()
            .map(|values| values[period].map(Cell::Number))
            .collect();
        table.push_row(period.to_string(), cells);
    }

    Ok(table)
}

fn parse_value(
    ticker: &str,
    label: &str,
    raw: &str,
    mode: ExtractMode,
) -> Result<Option<f64>, FundamentalError> {
    if mode == ExtractMode::AllYears && raw.trim() == MISSING_PERIOD {
        return Ok(None);
    }

    text::parse_f64(raw, None)
        .map(|v| Some(v * THOUSANDS))
        .map_err(|_| FundamentalError::parse(ticker, label, raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(label: &str, values: &[&str]) -> LabelValuePair {
        LabelValuePair::new(label, values.iter().map(|v| v.to_string()).collect())
    }

    #[test]
    fn test_newest_scales_by_thousand() {
        let pairs = vec![
            pair("Total Assets", &["1,500", "1,400"]),
            pair("Total Liabilities", &["-250"]),
        ];
        let table = build_statement("AAPL", &pairs, ExtractMode::Newest, 4).unwrap();

        assert_eq!(table.row_count(), 1);
        assert_eq!(table.columns(), &["Total Assets", "Total Liabilities"]);
        assert_eq!(table.get(0, "Total Assets"), Some(&Cell::Number(1_500_000.0)));
        assert_eq!(table.get(0, "Total Liabilities"), Some(&Cell::Number(-250_000.0)));
    }

    #[test]
    fn test_all_years_dash_is_null() {
        let pairs = vec![
            pair("Net Income", &["100", "-", "80", "70", "60"]),
            pair("Goodwill", &["5", "4"]),
        ];
        let table = build_statement("AAPL", &pairs, ExtractMode::AllYears, 4).unwrap();

        assert_eq!(table.row_count(), 4);
        assert_eq!(table.index(), &["0", "1", "2", "3"]);
        assert_eq!(table.get(1, "Net Income"), None);
        assert_eq!(table.get(3, "Net Income"), Some(&Cell::Number(70_000.0)));
        // 尾端不足的期別補空值
        assert_eq!(table.get(1, "Goodwill"), Some(&Cell::Number(4_000.0)));
        assert_eq!(table.get(2, "Goodwill"), None);
    }

    #[test]
    fn test_newest_dash_is_parse_error() {
        let pairs = vec![pair("Net Income", &["-"])];
        let err = build_statement("AAPL", &pairs, ExtractMode::Newest, 4).unwrap_err();

        assert_eq!(err, FundamentalError::parse("AAPL", "Net Income", "-"));
    }

    #[test]
    fn test_non_numeric_is_parse_error() {
        let pairs = vec![pair("Net Income", &["12a"])];
        let result = build_statement("MSFT", &pairs, ExtractMode::AllYears, 4);

        assert!(matches!(
            result,
            Err(FundamentalError::Parse { ref ticker, ref label, .. })
                if ticker == "MSFT" && label == "Net Income"
        ));
    }

    #[test]
    fn test_missing_newest_period_is_parse_error() {
        let pairs = vec![pair("Total Assets", &["1"]), pair("Cash", &[])];
        assert!(build_statement("AAPL", &pairs, ExtractMode::AllYears, 4).is_err());
        assert!(build_statement("AAPL", &pairs, ExtractMode::Newest, 4).is_err());
    }

    #[test]
    fn test_duplicate_label_keeps_first() {
        let pairs = vec![
            pair("Total Assets", &["1"]),
            pair("Total Assets", &["2"]),
        ];
        let table = build_statement("AAPL", &pairs, ExtractMode::Newest, 4).unwrap();

        assert_eq!(table.column_count(), 1);
        assert_eq!(table.get(0, "Total Assets"), Some(&Cell::Number(1000.0)));
    }

    #[test]
    fn test_empty_pairs_yield_empty_table() {
        let table = build_statement("AAPL", &[], ExtractMode::Newest, 4).unwrap();

        assert_eq!(table.column_count(), 0);
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_max_periods_is_configurable() {
        let pairs = vec![pair("Revenue", &["1", "2", "3", "4", "5"])];
        let table = build_statement("AAPL", &pairs, ExtractMode::AllYears, 2).unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get(1, "Revenue"), Some(&Cell::Number(2000.0)));
    }
}
