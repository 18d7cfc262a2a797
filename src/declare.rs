use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Yahoo 財經個股頁面
#[derive(PartialEq, Eq, Hash, Debug, Copy, Clone, Display, EnumIter, EnumString)]
pub enum Page {
    /// 資產負債表
    #[strum(serialize = "balance-sheet")]
    BalanceSheet,
    /// 損益表
    #[strum(serialize = "financials")]
    Financials,
    /// 現金流量表
    #[strum(serialize = "cash-flow")]
    CashFlow,
    /// 關鍵統計數據
    #[strum(serialize = "key-statistics")]
    KeyStatistics,
}

impl Page {
    /// 網址上的路徑片段，例如 `balance-sheet`
    pub fn path(&self) -> String {
        self.to_string()
    }

    /// 三大財務報表（不含關鍵統計）
    pub fn statements() -> impl Iterator<Item = Self> {
        [Self::BalanceSheet, Self::Financials, Self::CashFlow]
            .iter()
            .copied()
    }
}

/// 擷取模式
#[derive(PartialEq, Debug, Copy, Clone)]
pub enum ExtractMode {
    /// 只取最新一期
    Newest,
    /// 取多期（上限由設定決定）
    AllYears,
}

/// 批次中單一股票失敗時的處理方式
#[derive(Serialize, Deserialize, PartialEq, Debug, Copy, Clone, Default, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FailurePolicy {
    /// 記錄錯誤後略過該股票
    #[default]
    Skip,
    /// 中止整個批次
    Abort,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_page_path() {
        let paths: Vec<String> = Page::iter().map(|p| p.path()).collect();
        assert_eq!(
            paths,
            vec!["balance-sheet", "financials", "cash-flow", "key-statistics"]
        );
        assert_eq!(Page::statements().count(), 3);
    }

    #[test]
    fn test_failure_policy_from_str() {
        assert_eq!(FailurePolicy::from_str("skip").unwrap(), FailurePolicy::Skip);
        assert_eq!(FailurePolicy::from_str("ABORT").unwrap(), FailurePolicy::Abort);
        assert!(FailurePolicy::from_str("retry").is_err());
    }
}
