//! # 關鍵統計數據表格建構
//!
//! 關鍵統計頁同時包含數值（市值、本益比、殖利率…）與日期/類別欄位
//! （財年結束日、除息日、分割比例…）。類別欄位原樣保留，其餘欄位經單位正規化後轉為 `f64`。

use hashbrown::HashMap;

use crate::fundamental::{
    normalize::{self, NOT_AVAILABLE},
    table::{Cell, Table},
    FundamentalError, LabelValuePair,
};

/// 一律視為類別欄位的標籤
const CATEGORICAL_LABELS: [&str; 2] = ["Fiscal Year Ends", "Most Recent Quarter (mrq)"];

/// 標籤中含有這些字樣即視為類別欄位
const CATEGORICAL_MARKERS: [&str; 2] = ["Date", "Split"];

/// 判斷欄位是否為日期/類別欄位
pub fn is_categorical(label: &str) -> bool {
    CATEGORICAL_LABELS.contains(&label) || CATEGORICAL_MARKERS.iter().any(|m| label.contains(m))
}

/// 建立單列的關鍵統計表格。
///
/// 同一標籤出現多次時以最後一次的值為準，欄位位置維持第一次出現的位置。
/// 輸出欄位順序為：類別欄位在前、數值欄位在後，兩者各自維持頁面順序。
pub fn build_key_statistics(
    ticker: &str,
    pairs: &[LabelValuePair],
) -> Result<Table, FundamentalError> {
    if pairs.is_empty() {
        return Ok(Table::default());
    }

    // 後出現的同名標籤覆寫先前的值
    let mut positions: HashMap<&str, usize> = HashMap::with_capacity(pairs.len());
    let mut merged: Vec<(&str, Option<&str>)> = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let value = pair.values.first().map(String::as_str);
        match positions.get(pair.label.as_str()) {
            Some(&pos) => merged[pos].1 = value,
            None => {
                positions.insert(pair.label.as_str(), merged.len());
                merged.push((pair.label.as_str(), value));
            }
        }
    }

    let (categorical, numeric): (Vec<_>, Vec<_>) =
        merged.into_iter().partition(|(label, _)| is_categorical(label));

    let mut columns = Vec::with_capacity(categorical.len() + numeric.len());
    let mut cells = Vec::with_capacity(categorical.len() + numeric.len());

    // 沒有值、空白或 N/A 皆為空值
    for (label, value) in categorical {
        columns.push(label.to_string());
        cells.push(
            value
                .map(str::trim)
                .filter(|v| !v.is_empty() && *v != NOT_AVAILABLE)
                .map(|v| Cell::Text(v.to_string())),
        );
    }

    for (label, value) in numeric {
        let number = match value {
            Some(value) => normalize::parse_number(value)
                .map_err(|_| FundamentalError::parse(ticker, label, value))?,
            None => None,
        };
        columns.push(label.to_string());
        cells.push(number.map(Cell::Number));
    }

    let mut table = Table::new(columns);
    table.push_row("0", cells);

    Ok(table)
}
