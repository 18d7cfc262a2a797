use std::{env, path::PathBuf, str::FromStr};

use anyhow::Result;
use config::{Config as config_config, File as config_file};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::{declare::FailurePolicy, logging};

const CONFIG_PATH: &str = "app.json";

#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct App {
    #[serde(default)]
    pub crawler: Crawler,
    #[serde(default)]
    pub output: Output,
}

const YF_HOST: &str = "YF_HOST";
const YF_REQUEST_DELAY_MS: &str = "YF_REQUEST_DELAY_MS";
const YF_CONCURRENCY: &str = "YF_CONCURRENCY";
const YF_MAX_PERIODS: &str = "YF_MAX_PERIODS";
const YF_FAILURE_POLICY: &str = "YF_FAILURE_POLICY";

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Crawler {
    /// Yahoo 財經主機域名
    pub host: String,
    /// 每次請求後的等待時間（毫秒）
    pub request_delay_ms: u64,
    /// 同時處理的股票數
    pub concurrency: usize,
    /// 多期模式最多取幾期
    pub max_periods: usize,
    pub failure_policy: FailurePolicy,
}

impl Default for Crawler {
    fn default() -> Self {
        Crawler {
            host: "finance.yahoo.com".to_string(),
            request_delay_ms: 1000,
            concurrency: 1,
            max_periods: 4,
            failure_policy: FailurePolicy::Skip,
        }
    }
}

const YF_SAVE_CSV: &str = "YF_SAVE_CSV";
const YF_CSV_PATH: &str = "YF_CSV_PATH";
const YF_HISTORY: &str = "YF_HISTORY";

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Output {
    pub save_csv: bool,
    pub csv_path: String,
    /// 另外輸出每檔股票三大報表的多期資料
    pub history: bool,
}

impl Default for Output {
    fn default() -> Self {
        Output {
            save_csv: true,
            csv_path: "yf_fundamental_data.csv".to_string(),
            history: false,
        }
    }
}

pub static SETTINGS: Lazy<App> = Lazy::new(|| {
    App::get().unwrap_or_else(|why| {
        logging::error_file_async(format!(
            "I can't read the config context because {:?}",
            why
        ));
        App::default().override_with_env()
    })
});

impl App {
    fn get() -> Result<Self> {
        let config_path = config_path();
        if config_path.exists() {
            let config: App = config_config::builder()
                .add_source(config_file::from(config_path))
                .build()?
                .try_deserialize()?;
            return Ok(config.override_with_env());
        }

        Ok(App::default().override_with_env())
    }

    /// 將來至於 env 的設定值覆蓋掉 json 上的設定值
    fn override_with_env(mut self) -> Self {
        if let Ok(host) = env::var(YF_HOST) {
            self.crawler.host = host;
        }

        if let Ok(delay) = env::var(YF_REQUEST_DELAY_MS) {
            self.crawler.request_delay_ms = delay.parse().unwrap_or(self.crawler.request_delay_ms);
        }

        if let Ok(concurrency) = env::var(YF_CONCURRENCY) {
            self.crawler.concurrency = concurrency.parse().unwrap_or(self.crawler.concurrency);
        }

        if let Ok(max_periods) = env::var(YF_MAX_PERIODS) {
            self.crawler.max_periods = max_periods.parse().unwrap_or(self.crawler.max_periods);
        }

        if let Ok(policy) = env::var(YF_FAILURE_POLICY) {
            match FailurePolicy::from_str(&policy) {
                Ok(p) => self.crawler.failure_policy = p,
                Err(why) => {
                    logging::error_file_async(format!(
                        "Failed to parse {}={} because {:?}",
                        YF_FAILURE_POLICY, policy, why
                    ));
                }
            }
        }

        if let Ok(save_csv) = env::var(YF_SAVE_CSV) {
            self.output.save_csv = save_csv.parse().unwrap_or(self.output.save_csv);
        }

        if let Ok(csv_path) = env::var(YF_CSV_PATH) {
            self.output.csv_path = csv_path;
        }

        if let Ok(history) = env::var(YF_HISTORY) {
            self.output.history = history.parse().unwrap_or(self.output.history);
        }

        self
    }
}

/// 回傳設定檔的路徑
fn config_path() -> PathBuf {
    PathBuf::from(CONFIG_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let app = App::default();

        assert_eq!(app.crawler.host, "finance.yahoo.com");
        assert_eq!(app.crawler.max_periods, 4);
        assert_eq!(app.crawler.concurrency, 1);
        assert_eq!(app.crawler.failure_policy, FailurePolicy::Skip);
        assert!(app.output.save_csv);
        assert_eq!(app.output.csv_path, "yf_fundamental_data.csv");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let app: App = serde_json::from_str(
            r#"{ "crawler": { "concurrency": 3, "failure_policy": "abort" } }"#,
        )
        .unwrap();

        assert_eq!(app.crawler.concurrency, 3);
        assert_eq!(app.crawler.failure_policy, FailurePolicy::Abort);
        assert_eq!(app.crawler.request_delay_ms, 1000);
        assert!(!app.output.history);
    }
}
