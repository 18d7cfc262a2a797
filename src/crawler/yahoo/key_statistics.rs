use anyhow::Result;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::{fundamental::LabelValuePair, util::http::element};

static TABLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| element::selector("table").expect("Failed to parse table selector"));

static TR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| element::selector("tr").expect("Failed to parse tr selector"));

static TD_SELECTOR: Lazy<Selector> =
    Lazy::new(|| element::selector("td").expect("Failed to parse td selector"));

/// 頁面下半部的各個統計區塊（Financial Highlights、Trading Information…）
static SECTION_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    element::selector("section[data-test] > div[class] > div[class]")
        .expect("Failed to parse key statistics section selector")
});

static SECTION_ROW_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    element::selector("table[class] > tbody > tr[class]")
        .expect("Failed to parse key statistics row selector")
});

static SECTION_CELL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| element::selector("td[class]").expect("Failed to parse key statistics cell selector"));

/// 解析關鍵統計頁：先取第一個表格（估值指標），再取其後的各統計區塊。
///
/// 每列取前兩個儲存格當作標籤與數值，少於兩格的列略過。
pub fn parse(html: &str) -> Result<Vec<LabelValuePair>> {
    let document = Html::parse_document(html);
    let mut pairs = Vec::new();

    if let Some(table) = document.select(&TABLE_SELECTOR).next() {
        for tr in table.select(&TR_SELECTOR) {
            push_pair(&mut pairs, element::texts(&tr, &TD_SELECTOR));
        }
    }

    // 第一個區塊即是上面的估值表格
    for section in document.select(&SECTION_SELECTOR).skip(1) {
        for tr in section.select(&SECTION_ROW_SELECTOR) {
            push_pair(&mut pairs, element::texts(&tr, &SECTION_CELL_SELECTOR));
        }
    }

    Ok(pairs)
}

fn push_pair(pairs: &mut Vec<LabelValuePair>, mut cells: Vec<String>) {
    if cells.len() < 2 {
        return;
    }

    cells.truncate(2);
    let value = cells.pop().unwrap_or_default();
    let label = cells.pop().unwrap_or_default();
    pairs.push(LabelValuePair::new(label, vec![value]));
}
