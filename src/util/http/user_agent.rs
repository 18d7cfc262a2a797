use rand::Rng;

// finance.yahoo.com 對行動裝置回傳不同的版面，這裡只產生桌面瀏覽器的 UA

const FIREFOX_VERSIONS: [&str; 10] = [
    "133.0", "132.0", "131.0", "130.0", "129.0", "128.0", "127.0", "126.0", "125.0", "124.0",
];

const CHROME_VERSIONS: [&str; 12] = [
    "133.0.6943.60", "133.0.6943.88", "132.0.6834.83", "132.0.6834.110", "131.0.6778.85",
    "131.0.6778.108", "130.0.6723.92", "130.0.6723.117", "129.0.6668.70", "129.0.6668.89",
    "128.0.6613.120", "128.0.6613.138",
];

const EDGE_VERSIONS: [&str; 6] = [
    "133.0.3048.56", "133.0.3048.46", "132.0.2957.55", "132.0.2957.63", "131.0.2903.86",
    "131.0.2903.112",
];

const DESKTOP_OS: [&str; 8] = [
    "Windows NT 10.0; Win64; x64",
    "Windows NT 11.0; Win64; x64",
    "Macintosh; Intel Mac OS X 10_15_7",
    "Macintosh; Intel Mac OS X 14_7_2",
    "Macintosh; Intel Mac OS X 15_2",
    "X11; Linux x86_64",
    "X11; Ubuntu; Linux x86_64",
    "X11; Fedora; Linux x86_64",
];

fn pick<'a>(rng: &mut impl Rng, items: &[&'a str]) -> &'a str {
    items[rng.random_range(0..items.len())]
}

fn gen_firefox_ua(rng: &mut impl Rng) -> String {
    let version = pick(rng, &FIREFOX_VERSIONS);
    let os = pick(rng, &DESKTOP_OS);

    format!(
        "Mozilla/5.0 ({}; rv:{}) Gecko/20100101 Firefox/{}",
        os, version, version
    )
}

fn gen_chrome_ua(rng: &mut impl Rng) -> String {
    let version = pick(rng, &CHROME_VERSIONS);
    let os = pick(rng, &DESKTOP_OS);

    format!(
        "Mozilla/5.0 ({}) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{} Safari/537.36",
        os, version
    )
}

fn gen_edge_ua(rng: &mut impl Rng) -> String {
    let version = pick(rng, &EDGE_VERSIONS);
    // Edge 以 Windows 為主
    let os = pick(rng, &DESKTOP_OS[..2]);
    let chrome = version.split('.').next().unwrap_or("133");

    format!(
        "Mozilla/5.0 ({}) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{}.0.0.0 Safari/537.36 Edg/{}",
        os, chrome, version
    )
}

pub fn gen_random_ua() -> String {
    let mut rng = rand::rng();
    match rng.random_range(0..10) {
        0..=5 => gen_chrome_ua(&mut rng), // 60% Chrome
        6..=7 => gen_firefox_ua(&mut rng), // 20% Firefox
        _ => gen_edge_ua(&mut rng),        // 20% Edge
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ua_formats() {
        for _ in 0..100 {
            let ua = gen_random_ua();
            assert!(ua.starts_with("Mozilla/5.0"), "UA should start with Mozilla/5.0: {}", ua);
            assert!(!ua.contains("Mobile"), "UA should be a desktop browser: {}", ua);
        }
    }

    #[test]
    fn test_edge_ua_uses_windows() {
        let mut rng = rand::rng();
        for _ in 0..20 {
            let ua = gen_edge_ua(&mut rng);
            assert!(ua.contains("Windows NT"), "{}", ua);
            assert!(ua.contains("Edg/"), "{}", ua);
        }
    }
}
