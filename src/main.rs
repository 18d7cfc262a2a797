pub mod batch;
pub mod config;
pub mod crawler;
pub mod declare;
pub mod export;
pub mod fundamental;
pub mod logging;
pub mod util;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use crate::{
    batch::BatchOptions,
    config::SETTINGS,
    crawler::yahoo::Yahoo,
};

#[cfg(all(target_os = "linux", target_env = "musl"))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

const PROMPT: &str = "Tickers list separated by spaces or commas: ";

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let result = run().await;
    if let Err(why) = &result {
        logging::error_file_async(format!("yf_fundamentals stopped because {:?}", why));
    }

    // 寫檔線程不會被 join，結束前先等待記錄寫入
    if !logging::flush() {
        logging::error_console("Timed out while flushing the log file".to_string());
    }

    result
}

async fn run() -> Result<()> {
    let tickers = batch::parse_ticker_list(&read_line(PROMPT)?);
    let options = BatchOptions::from_settings();
    let yahoo = Yahoo::from_settings();

    let table = batch::run_batch(&yahoo, &tickers, &options).await?;

    if table.is_empty() {
        logging::error_console("No fundamental data was collected".to_string());
    }
    logging::info_console(format!(
        "{} of {} tickers collected, {} columns",
        table.row_count(),
        tickers.len(),
        table.column_count()
    ));
    let missing: Vec<&str> = tickers
        .iter()
        .filter(|t| !table.index().contains(*t))
        .map(String::as_str)
        .collect();
    if !missing.is_empty() {
        logging::error_console(format!("Skipped: {}", missing.join(", ")));
    }
    if options.save_csv {
        logging::info_console(format!("Saved to {}", options.csv_path.display()));
    }

    if SETTINGS.output.history {
        for ticker in table.index() {
            match batch::download_history(&yahoo, ticker, SETTINGS.crawler.max_periods).await {
                Ok(history) => {
                    let paths = export::write_history(&history, ".")?;
                    logging::info_console(format!("{} history saved to {:?}", ticker, paths));
                }
                Err(why) => {
                    logging::error_file_async(format!(
                        "Failed to download_history({}) because {:?}",
                        ticker, why
                    ));
                    logging::error_console(format!("{} history skipped because {:#}", ticker, why));
                }
            }
        }
    }

    Ok(())
}

/// 顯示提示並讀入一行輸入
fn read_line(prompt: &str) -> Result<String> {
    let mut stdout = io::stdout();
    stdout.write_all(prompt.as_bytes())?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read tickers from stdin")?;

    Ok(line)
}
