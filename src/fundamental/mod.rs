//! # 財報正規化與合併
//!
//! 擷取器取得的文字標籤/數值對，在此轉為數值表格並合併：
//!
//! 1. `statement`：三大財務報表，數值乘上 1000。
//! 2. `key_statistics`：關鍵統計，處理 T/B/M/k/% 單位與類別欄位。
//! 3. `aggregate`：單一股票四張表水平合併為一列。
//! 4. `merge`：多檔股票外部聯集為最終表格。
//!
//! 這一層不做任何 I/O，所有函式皆為純轉換。

pub mod aggregate;
pub mod error;
pub mod key_statistics;
pub mod merge;
pub mod normalize;
pub mod statement;
pub mod table;

pub use aggregate::{aggregate, TickerRow, TickerStatements};
pub use error::FundamentalError;
pub use key_statistics::build_key_statistics;
pub use merge::merge;
pub use statement::build_statement;
pub use table::{Cell, Table};

/// 擷取器產生的一組標籤與數值（1 到 N 期的原始文字）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelValuePair {
    pub label: String,
    pub values: Vec<String>,
}

impl LabelValuePair {
    pub fn new(label: impl Into<String>, values: Vec<String>) -> Self {
        LabelValuePair {
            label: label.into(),
            values,
        }
    }
}
