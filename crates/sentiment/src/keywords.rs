/// Curated term lists for the keyword fallback scorer.
pub const BULLISH_TERMS: [&str; 12] = [
    "bullish",
    "surge",
    "pump",
    "breakout",
    "growth",
    "partnership",
    "adoption",
    "listing",
    "buy",
    "positive",
    "green",
    "moon",
];

pub const BEARISH_TERMS: [&str; 12] = [
    "bearish",
    "drop",
    "dump",
    "crash",
    "negative",
    "sell",
    "red",
    "scam",
    "hack",
    "regulation",
    "ban",
    "fud",
];

/// Score one text in [-1, 1] by counting whole-word matches against the
/// curated term lists: (bull − bear) / (bull + bear), 0 when nothing
/// matches.
pub fn score_text(text: &str) -> f64 {
    let lower = text.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    let bull = words
        .iter()
        .filter(|w| BULLISH_TERMS.contains(w))
        .count() as f64;
    let bear = words
        .iter()
        .filter(|w| BEARISH_TERMS.contains(w))
        .count() as f64;

    let total = bull + bear;
    if total == 0.0 {
        return 0.0;
    }
    (bull - bear) / total
}

/// Mean keyword score across a batch of headlines; 0 for an empty batch.
pub fn average_score(headlines: &[String]) -> f64 {
    if headlines.is_empty() {
        return 0.0;
    }
    headlines.iter().map(|h| score_text(h)).sum::<f64>() / headlines.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pure_bullish_text_scores_one() {
        assert_eq!(score_text("Massive surge and breakout, very bullish"), 1.0);
    }

    #[test]
    fn pure_bearish_text_scores_minus_one() {
        assert_eq!(score_text("Crash and dump after the hack"), -1.0);
    }

    #[test]
    fn unrelated_text_scores_zero() {
        assert_eq!(score_text("The weather is mild today"), 0.0);
    }

    #[test]
    fn matching_is_whole_word_only() {
        // "buyer" must not count as "buy", "redo" not as "red"
        assert_eq!(score_text("The buyer will redo the paperwork"), 0.0);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(score_text("BULLISH Breakout"), 1.0);
    }

    #[test]
    fn mixed_text_balances_out() {
        let score = score_text("pump then dump");
        assert_eq!(score, 0.0);
    }

    #[test]
    fn average_over_headlines() {
        let headlines = vec!["surge".to_string(), "crash".to_string(), "flat".to_string()];
        // (1 - 1 + 0) / 3
        assert_eq!(average_score(&headlines), 0.0);
    }
}
