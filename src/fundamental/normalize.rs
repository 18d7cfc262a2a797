//! # 數值單位正規化
//!
//! Yahoo 財經的關鍵統計數據以人類可讀的格式呈現，例如 `2.5B`、`12.3%`、`1,234`。
//! 此模組將這類文字轉換為可由 `f64` 解析的字串。
//!
//! | 後綴 | 替換為 |
//! |------|--------|
//! | `T`  | `e+18` |
//! | `B`  | `e+12` |
//! | `M`  | `e+06` |
//! | `k`  | `e+03` |
//! | `%`  | `e-2`  |
//!
//! `N/A` 視為空值，千分位逗號直接移除。
//!
//! 後綴只在數字的尾端才會被替換，`Mar 31, 2023` 這類字串中的 `M` 不會被改寫。

use std::num::ParseFloatError;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::util::text;

/// 代表缺值的字面字串
pub const NOT_AVAILABLE: &str = "N/A";

/// 數字後面緊接一個單位後綴（可省略）
static REG_SUFFIXED_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<number>[+-]?(?:\d+(?:\.\d*)?|\.\d+))(?P<suffix>[TBMk%])?$")
        .expect("Failed to compile suffixed number regex")
});

fn exponent_of(suffix: &str) -> &'static str {
    match suffix {
        "T" => "e+18",
        "B" => "e+12",
        "M" => "e+06",
        "k" => "e+03",
        "%" => "e-2",
        _ => "",
    }
}

/// 將原始文字正規化為可解析的數字字串。
///
/// 回傳 `None` 代表空值（`N/A`）。無法辨識的內容只會移除千分位後原樣傳回，
/// 交由呼叫端在解析時判定失敗。
pub fn normalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed == NOT_AVAILABLE {
        return None;
    }

    let stripped = text::strip_thousands_separator(trimmed);
    let normalized = match REG_SUFFIXED_NUMBER.captures(&stripped) {
        Some(caps) => {
            let suffix = caps.name("suffix").map_or("", |m| m.as_str());
            format!("{}{}", &caps["number"], exponent_of(suffix))
        }
        None => stripped,
    };

    Some(normalized)
}

/// 正規化後解析為 `f64`；`N/A` 回傳 `Ok(None)`。
pub fn parse_number(raw: &str) -> Result<Option<f64>, ParseFloatError> {
    normalize(raw).map(|n| n.parse::<f64>()).transpose()
}
