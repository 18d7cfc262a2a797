use anyhow::Result;
use async_trait::async_trait;

use crate::{
    declare::{ExtractMode, Page},
    fundamental::LabelValuePair,
};

/// 雅虎財經
pub mod yahoo;

/// 頁面擷取器：取得指定股票的頁面並轉為標籤/數值對。
///
/// 頁面上沒有資料時回傳空集合而不是錯誤。
#[async_trait]
pub trait PageExtractor: Send + Sync {
    async fn extract_rows(
        &self,
        ticker: &str,
        page: Page,
        mode: ExtractMode,
    ) -> Result<Vec<LabelValuePair>>;
}
