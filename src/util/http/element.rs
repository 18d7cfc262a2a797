use anyhow::{anyhow, Result};
use scraper::{ElementRef, Selector};

/// Parses a CSS selector, converting the selector error into an `anyhow::Error`.
pub fn selector(css_selector: &str) -> Result<Selector> {
    Selector::parse(css_selector)
        .map_err(|why| anyhow!("Failed to Selector::parse({}) because: {:?}", css_selector, why))
}

/// 元素內的文字（已去除前後空白）
pub fn text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// 回傳所有符合選擇器之元素的文字（已去除前後空白），依文件順序
pub fn texts(element: &ElementRef, selector: &Selector) -> Vec<String> {
    element.select(selector).map(|e| text(&e)).collect()
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::*;

    const HTML: &str = r#"
        <div class="row">
            <span> Total Assets </span>
            <div data-test="fin-col"><span>1,500</span></div>
            <div data-test="fin-col"><span> - </span></div>
        </div>"#;

    #[test]
    fn test_texts() {
        let document = Html::parse_fragment(HTML);
        let root = document.root_element();
        let s = selector(r#"div[data-test="fin-col"]"#).unwrap();

        assert_eq!(texts(&root, &s), vec!["1,500", "-"]);
    }

    #[test]
    fn test_invalid_selector() {
        assert!(selector("div[[invalid").is_err());
    }
}
