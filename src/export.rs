use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};

use crate::{batch::StatementHistory, fundamental::Table};

/// 合併表格的索引欄名
pub const TICKER_HEADER: &str = "ticker";
/// 多期報表的索引欄名
pub const PERIOD_HEADER: &str = "period";

/// 將合併後的表格寫成 CSV，第一欄為股票代碼
pub fn write_table(table: &Table, path: impl AsRef<Path>) -> Result<()> {
    write_table_with_index(table, path, TICKER_HEADER)
}

pub fn write_table_with_index(
    table: &Table,
    path: impl AsRef<Path>,
    index_header: &str,
) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let content = to_csv_string(table, index_header)?;
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}

/// 將表格轉為 CSV 字串
pub fn to_csv_string(table: &Table, index_header: &str) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    write_records(&mut writer, table, index_header)?;
    let bytes = writer
        .into_inner()
        .map_err(|why| anyhow!("Failed to flush csv buffer because {}", why.error()))?;

    Ok(String::from_utf8(bytes)?)
}

/// 每張報表輸出為 `<ticker>_<page>.csv`，回傳寫入的檔案路徑
pub fn write_history(history: &StatementHistory, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut paths = Vec::with_capacity(history.tables.len());

    for (page, table) in &history.tables {
        let path = dir.join(format!("{}_{}.csv", history.ticker, page.path()));
        write_table_with_index(table, &path, PERIOD_HEADER)?;
        paths.push(path);
    }

    Ok(paths)
}

fn write_records<W: io::Write>(
    writer: &mut csv::Writer<W>,
    table: &Table,
    index_header: &str,
) -> Result<()> {
    let mut header = Vec::with_capacity(table.column_count() + 1);
    header.push(index_header);
    header.extend(table.columns().iter().map(String::as_str));
    writer.write_record(&header)?;

    for (label, row) in table.index().iter().zip(table.rows()) {
        let mut record = Vec::with_capacity(row.len() + 1);
        record.push(label.clone());
        // 空值輸出為空欄位
        record.extend(row.iter().map(|cell| {
            cell.as_ref()
                .map(|c| c.to_string())
                .unwrap_or_default()
        }));
        writer.write_record(&record)?;
    }

    Ok(())
}
