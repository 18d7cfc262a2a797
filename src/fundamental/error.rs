use thiserror::Error;

use crate::declare::Page;

/// 財報正規化與合併過程中的錯誤
#[derive(Debug, Error, PartialEq)]
pub enum FundamentalError {
    /// 頁面取得失敗，或彙整時缺少某一頁的資料
    #[error("Failed to fetch {page} of {ticker}: {reason}")]
    Fetch {
        ticker: String,
        page: Page,
        reason: String,
    },

    /// 預期為數值的欄位無法解析
    #[error("Failed to parse '{value}' of '{label}' for {ticker} as f64")]
    Parse {
        ticker: String,
        label: String,
        value: String,
    },

    #[error("The ticker list is empty")]
    EmptyTickerList,
}

impl FundamentalError {
    pub fn parse(ticker: &str, label: &str, value: &str) -> Self {
        FundamentalError::Parse {
            ticker: ticker.to_string(),
            label: label.to_string(),
            value: value.to_string(),
        }
    }

    pub fn fetch(ticker: &str, page: Page, reason: impl Into<String>) -> Self {
        FundamentalError::Fetch {
            ticker: ticker.to_string(),
            page,
            reason: reason.into(),
        }
    }
}
