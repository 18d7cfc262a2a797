//! # Yahoo 財經採集模組
//!
//! 從 Yahoo 財經（美國站）抓取個股的財務報表與關鍵統計數據。
//!
//! ## 支援的頁面
//!
//! - **財務報表 (`statement`)**：資產負債表、損益表、現金流量表。
//! - **關鍵統計 (`key_statistics`)**：估值、獲利能力、股利、分割等指標。
//!
//! ## 站點資訊
//!
//! - 來源域名：`finance.yahoo.com`（可由設定覆寫）
//! - 抓取技術：HTTP GET 搭配 CSS Selector 解析。
//!
//! 資產負債表網頁上可展開的明細列需要瀏覽器點擊才會出現，這裡只取靜態 HTML 中已呈現的列。

use anyhow::Result;
use async_trait::async_trait;
use concat_string::concat_string;

use crate::{
    config::SETTINGS,
    crawler::PageExtractor,
    declare::{ExtractMode, Page},
    fundamental::LabelValuePair,
    logging,
    util::http,
};

/// 關鍵統計數據解析子模組
pub mod key_statistics;
/// 財務報表解析子模組
pub mod statement;

/// Yahoo 財經採集器
#[derive(Debug, Clone)]
pub struct Yahoo {
    host: String,
    max_periods: usize,
}

impl Yahoo {
    pub fn new(host: impl Into<String>, max_periods: usize) -> Self {
        Yahoo {
            host: host.into(),
            max_periods: max_periods.max(1),
        }
    }

    pub fn from_settings() -> Self {
        Self::new(SETTINGS.crawler.host.as_str(), SETTINGS.crawler.max_periods)
    }

    /// 例︰https://finance.yahoo.com/quote/AAPL/balance-sheet?p=AAPL
    pub fn url(&self, ticker: &str, page: Page) -> String {
        concat_string!(
            "https://",
            self.host,
            "/quote/",
            ticker,
            "/",
            page.path(),
            "?p=",
            ticker
        )
    }

    fn periods(&self, mode: ExtractMode) -> usize {
        match mode {
            ExtractMode::Newest => 1,
            ExtractMode::AllYears => self.max_periods,
        }
    }
}

#[async_trait]
impl PageExtractor for Yahoo {
    async fn extract_rows(
        &self,
        ticker: &str,
        page: Page,
        mode: ExtractMode,
    ) -> Result<Vec<LabelValuePair>> {
        let url = self.url(ticker, page);
        let text = http::get(&url, None).await?;

        let pairs = match page {
            Page::KeyStatistics => key_statistics::parse(&text)?,
            Page::BalanceSheet | Page::Financials | Page::CashFlow => {
                statement::parse(&text, self.periods(mode))?
            }
        };

        logging::debug_file_async(format!("{} {} parsed {} rows", ticker, page, pairs.len()));

        Ok(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url() {
        let yahoo = Yahoo::new("finance.yahoo.com", 4);
        assert_eq!(
            yahoo.url("AAPL", Page::CashFlow),
            "https://finance.yahoo.com/quote/AAPL/cash-flow?p=AAPL"
        );
        assert_eq!(yahoo.periods(ExtractMode::Newest), 1);
        assert_eq!(yahoo.periods(ExtractMode::AllYears), 4);
    }

    #[tokio::test]
    #[ignore]
    async fn test_extract_rows() {
        dotenv::dotenv().ok();
        logging::debug_file_async("開始 extract_rows".to_string());

        let yahoo = Yahoo::from_settings();
        match yahoo
            .extract_rows("AAPL", Page::KeyStatistics, ExtractMode::Newest)
            .await
        {
            Ok(rows) => {
                logging::debug_file_async(format!("{:#?}", rows));
            }
            Err(why) => {
                logging::debug_file_async(format!("Failed to extract_rows because {:?}", why));
            }
        }

        logging::debug_file_async("結束 extract_rows".to_string());
    }
}
