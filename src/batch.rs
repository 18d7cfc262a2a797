//! # 批次擷取
//!
//! 依序（或以有限並行）處理多檔股票：擷取四個頁面、建表、彙整為單列，
//! 最後合併為一張表並視設定輸出 CSV。

use std::{path::PathBuf, pin::pin};

use anyhow::Result;
use futures::{stream, StreamExt};
use strum::IntoEnumIterator;

use crate::{
    config::SETTINGS,
    crawler::PageExtractor,
    declare::{ExtractMode, FailurePolicy, Page},
    export,
    fundamental::{
        aggregate, build_key_statistics, build_statement, merge, FundamentalError, Table,
        TickerRow, TickerStatements,
    },
    logging,
    util::text,
};

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub save_csv: bool,
    pub csv_path: PathBuf,
    /// 同時處理的股票數，至少為 1
    pub concurrency: usize,
    pub failure_policy: FailurePolicy,
}

impl BatchOptions {
    pub fn from_settings() -> Self {
        BatchOptions {
            save_csv: SETTINGS.output.save_csv,
            csv_path: PathBuf::from(&SETTINGS.output.csv_path),
            concurrency: SETTINGS.crawler.concurrency,
            failure_policy: SETTINGS.crawler.failure_policy,
        }
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        BatchOptions {
            save_csv: true,
            csv_path: PathBuf::from("yf_fundamental_data.csv"),
            concurrency: 1,
            failure_policy: FailurePolicy::Skip,
        }
    }
}

/// 擷取所有股票的最新一期資料並合併。
///
/// 輸出列的順序與輸入的股票順序相同，與完成先後無關。
pub async fn run_batch<E>(extractor: &E, tickers: &[String], options: &BatchOptions) -> Result<Table>
where
    E: PageExtractor + ?Sized,
{
    if tickers.is_empty() {
        return Err(FundamentalError::EmptyTickerList.into());
    }

    logging::info_file_async(format!(
        "run_batch start: {} tickers, concurrency {}, policy {}",
        tickers.len(),
        options.concurrency,
        options.failure_policy
    ));

    let mut results = pin!(stream::iter(tickers)
        .map(|ticker| async move { (ticker, collect_ticker(extractor, ticker).await) })
        .buffered(options.concurrency.max(1)));

    let mut rows: Vec<TickerRow> = Vec::with_capacity(tickers.len());
    while let Some((ticker, result)) = results.next().await {
        match result {
            Ok(row) => {
                logging::info_file_async(format!(
                    "{} collected with {} columns",
                    ticker,
                    row.columns().len()
                ));
                rows.push(row);
            }
            Err(why) => match options.failure_policy {
                FailurePolicy::Skip => {
                    let msg = format!("Skip {} because {}", ticker, why);
                    logging::error_console(msg.clone());
                    logging::warn_file_async(msg);
                }
                FailurePolicy::Abort => {
                    logging::error_file_async(format!("Abort batch at {} because {}", ticker, why));
                    return Err(why.into());
                }
            },
        }
    }

    let table = merge(&rows);

    if options.save_csv {
        export::write_table(&table, &options.csv_path)?;
        logging::info_file_async(format!(
            "{} rows saved to {}",
            table.row_count(),
            options.csv_path.display()
        ));
    }

    Ok(table)
}

/// 取得單一股票的四個頁面並彙整為一列，任一頁失敗即整檔失敗。
pub async fn collect_ticker<E>(extractor: &E, ticker: &str) -> Result<TickerRow, FundamentalError>
where
    E: PageExtractor + ?Sized,
{
    let mut statements = TickerStatements::default();

    for page in Page::iter() {
        let pairs = extractor
            .extract_rows(ticker, page, ExtractMode::Newest)
            .await
            .map_err(|why| FundamentalError::fetch(ticker, page, format!("{:#}", why)))?;

        let table = match page {
            Page::KeyStatistics => build_key_statistics(ticker, &pairs)?,
            _ => build_statement(ticker, &pairs, ExtractMode::Newest, 1)?,
        };

        statements.set(page, table);
    }

    aggregate(ticker, statements)
}

/// 單一股票三大報表的多期資料
#[derive(Debug, Clone, Default)]
pub struct StatementHistory {
    pub ticker: String,
    pub tables: Vec<(Page, Table)>,
}

#[cfg(test)]
impl StatementHistory {
    pub fn get(&self, page: Page) -> Option<&Table> {
        self.tables
            .iter()
            .find(|(p, _)| *p == page)
            .map(|(_, table)| table)
    }
}

/// 下載三大報表最多 `max_periods` 期的資料，每期一列。
pub async fn download_history<E>(
    extractor: &E,
    ticker: &str,
    max_periods: usize,
) -> Result<StatementHistory>
where
    E: PageExtractor + ?Sized,
{
    let mut history = StatementHistory {
        ticker: ticker.to_string(),
        tables: Vec::with_capacity(3),
    };

    for page in Page::statements() {
        let pairs = extractor
            .extract_rows(ticker, page, ExtractMode::AllYears)
            .await
            .map_err(|why| FundamentalError::fetch(ticker, page, format!("{:#}", why)))?;
        let table = build_statement(ticker, &pairs, ExtractMode::AllYears, max_periods)?;
        history.tables.push((page, table));
    }

    Ok(history)
}

/// 將使用者輸入的股票清單（以空白或逗號分隔）拆為代碼，維持輸入順序
pub fn parse_ticker_list(raw: &str) -> Vec<String> {
    text::split_tickers(raw)
}
