use anyhow::Result;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::{fundamental::LabelValuePair, util::http::element};

/// 報表主體
static CONTAINER_SELECTOR: Lazy<Selector> =
    Lazy::new(|| element::selector(r"div.D\(tbrg\)").expect("Failed to parse statement container selector"));

static ROW_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    element::selector(r#"div[data-test="fin-row"]"#).expect("Failed to parse statement row selector")
});

static LABEL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| element::selector("div[title] > span").expect("Failed to parse statement label selector"));

static SPAN_SELECTOR: Lazy<Selector> =
    Lazy::new(|| element::selector("span").expect("Failed to parse span selector"));

static COLUMN_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    element::selector(r#"div[data-test="fin-col"]"#).expect("Failed to parse statement column selector")
});

/// 解析財務報表頁，每列取最多 `periods` 期的數值。
///
/// 找不到報表主體時回傳空集合。
pub fn parse(html: &str, periods: usize) -> Result<Vec<LabelValuePair>> {
    let document = Html::parse_document(html);
    let container = match document.select(&CONTAINER_SELECTOR).next() {
        Some(container) => container,
        None => return Ok(Vec::new()),
    };

    let mut pairs = Vec::new();
    for row in container.select(&ROW_SELECTOR) {
        let label = row
            .select(&LABEL_SELECTOR)
            .next()
            .or_else(|| row.select(&SPAN_SELECTOR).next())
            .map(|e| element::text(&e))
            .unwrap_or_default();
        if label.is_empty() {
            continue;
        }

        // 展開後的子列巢狀在父列之內，只取屬於本列的欄位
        let values = row
            .select(&COLUMN_SELECTOR)
            .filter(|col| owner_row(col).is_some_and(|owner| owner.id() == row.id()))
            .take(periods)
            .map(|col| element::text(&col))
            .collect();

        pairs.push(LabelValuePair::new(label, values));
    }

    Ok(pairs)
}

/// 回傳欄位所屬（最近的）財報列
fn owner_row<'a>(col: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    col.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().attr("data-test") == Some("fin-row"))
}
