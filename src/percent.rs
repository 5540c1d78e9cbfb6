use crate::sweep::SaturationLevel;
use once_cell::sync::Lazy;
use regex::Regex;

/// 按优先级排列的百分比写法，例如 "50%"、"75 %"、"percent 30"、"30 saturation"
static PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"([0-9]+)%",
        r"([0-9]+)\s*%",
        r"percent\s*([0-9]+)",
        r"([0-9]+)\s*percent",
        r"saturation\s*([0-9]+)",
        r"([0-9]+)\s*saturation",
    ]
    .iter()
    .filter_map(|pattern| Regex::new(pattern).ok())
    .collect()
});

/// 从文本中解析饱和度，找不到时返回默认的 100
pub fn parse(text: &str) -> SaturationLevel {
    parse_explicit(text).unwrap_or_default()
}

/// 只有文本里确实写了百分比时才返回 `Some`，数值截断到 `1-100`
pub fn parse_explicit(text: &str) -> Option<SaturationLevel> {
    let text = text.to_lowercase();
    PATTERNS.iter().find_map(|pattern| {
        let digits = pattern.captures(&text)?.get(1)?.as_str();
        // 只可能因为溢出而失败，溢出的数一定大于 100
        let value = digits.parse::<u64>().unwrap_or(u64::MAX);
        Some(SaturationLevel::new(value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_patterns_compile() {
        assert_eq!(PATTERNS.len(), 6);
    }

    #[test]
    fn percent_sign() {
        assert_eq!(parse("50%").percent(), 50);
        assert_eq!(parse("make it 75 % please").percent(), 75);
    }

    #[test]
    fn keywords() {
        assert_eq!(parse("saturation 30").percent(), 30);
        assert_eq!(parse("30 saturation").percent(), 30);
        assert_eq!(parse("Percent 12").percent(), 12);
        assert_eq!(parse("12 PERCENT").percent(), 12);
        assert_eq!(parse("SATURATION45").percent(), 45);
    }

    #[test]
    fn clamps_into_range() {
        assert_eq!(parse("150%").percent(), 100);
        assert_eq!(parse("0%").percent(), 1);
        assert_eq!(parse("99999999999999999999999%").percent(), 100);
    }

    #[test]
    fn defaults_when_missing() {
        assert_eq!(parse("hello").percent(), 100);
        assert_eq!(parse("42").percent(), 100);
        assert_eq!(parse_explicit("hello"), None);
    }

    #[test]
    fn percent_sign_wins_over_keywords() {
        assert_eq!(parse("saturation 10 or 20%").percent(), 20);
    }

    #[test]
    fn explicit_hundred_is_distinguishable() {
        assert_eq!(parse_explicit("100%"), Some(SaturationLevel::new(100)));
        assert_eq!(parse("100%"), parse("nothing here"));
    }
}
