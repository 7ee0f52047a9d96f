//! Lexical probes over a single review string.
//!
//! Every probe is a pure predicate: degenerate input (empty, whitespace,
//! punctuation only) yields `false` rather than an error.

use crate::lexicon::{GENERIC_PHRASES, NATURAL_PHRASES, NATURAL_PUNCTUATION};

/// Minimum mean words per sentence for a review to count as informative.
pub const MIN_AVG_WORDS_PER_SENTENCE: f64 = 5.0;
/// Minimum mean characters per word for a review to count as informative.
pub const MIN_AVG_WORD_LENGTH: f64 = 4.0;
/// Minimum word count for the natural-phrasing probe.
pub const MIN_NATURAL_WORDS: usize = 5;

/// True iff `c` lies in one of the recognised emoji blocks: emoticons,
/// miscellaneous symbols and pictographs, transport and map symbols,
/// alchemical symbols.
fn is_emoji(c: char) -> bool {
    matches!(
        c,
        '\u{1F600}'..='\u{1F64F}'
            | '\u{1F300}'..='\u{1F5FF}'
            | '\u{1F680}'..='\u{1F6FF}'
            | '\u{1F700}'..='\u{1F77F}'
    )
}

/// True iff the text is non-empty and consists solely of emoji.
///
/// No whitespace or other characters are tolerated, so callers pass the
/// trimmed review.
pub fn is_emoji_only(text: &str) -> bool {
    !text.is_empty() && text.chars().all(is_emoji)
}

/// Number of whitespace-delimited tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Sentence and word length statistics of a review.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentenceStats {
    pub sentences: usize,
    pub avg_words_per_sentence: f64,
    pub avg_word_length: f64,
}

impl SentenceStats {
    /// Measure a review. `None` when it has no non-empty sentence.
    ///
    /// Sentences are split on runs of `.`, `!` and `?`. Word length counts
    /// characters of each whitespace token of the whole text, punctuation
    /// included.
    pub fn measure(text: &str) -> Option<Self> {
        let text = text.trim();
        let words_per_sentence: Vec<usize> = text
            .split(['.', '!', '?'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(word_count)
            .collect();
        if words_per_sentence.is_empty() {
            return None;
        }

        let (word_total, char_total) = text
            .split_whitespace()
            .fold((0usize, 0usize), |(n, chars), w| (n + 1, chars + w.chars().count()));
        if word_total == 0 {
            return None;
        }

        let sentences = words_per_sentence.len();
        Some(Self {
            sentences,
            avg_words_per_sentence: words_per_sentence.iter().sum::<usize>() as f64
                / sentences as f64,
            avg_word_length: char_total as f64 / word_total as f64,
        })
    }

    pub fn is_informative(&self) -> bool {
        self.avg_words_per_sentence >= MIN_AVG_WORDS_PER_SENTENCE
            && self.avg_word_length >= MIN_AVG_WORD_LENGTH
    }
}

/// True iff the review has long sentences made of long words.
pub fn length_informativeness(text: &str) -> bool {
    SentenceStats::measure(text).is_some_and(|s| s.is_informative())
}

/// True iff the whole trimmed review, case-folded, is a generic acknowledgement.
pub fn is_generic_phrase(text: &str) -> bool {
    let folded = text.trim().to_lowercase();
    GENERIC_PHRASES.contains(&folded.as_str())
}

/// True iff the review has at least five words, sentence punctuation, and one
/// of the curated natural phrases.
pub fn looks_natural(text: &str) -> bool {
    let folded = text.to_lowercase();
    word_count(&folded) >= MIN_NATURAL_WORDS
        && NATURAL_PUNCTUATION.iter().any(|p| folded.contains(p))
        && NATURAL_PHRASES.iter().any(|p| folded.contains(p))
}

/// Every probe signal for one review, for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeReport {
    pub emoji_only: bool,
    pub stats: Option<SentenceStats>,
    pub informative: bool,
    pub word_count: usize,
    pub has_image: bool,
    pub natural: bool,
    pub generic: bool,
}

impl ProbeReport {
    pub fn inspect(text: &str, image_url: Option<&str>) -> Self {
        let text = text.trim();
        let stats = SentenceStats::measure(text);
        Self {
            emoji_only: is_emoji_only(text),
            stats,
            informative: stats.is_some_and(|s| s.is_informative()),
            word_count: word_count(text),
            has_image: image_url.is_some_and(|u| !u.trim().is_empty()),
            natural: looks_natural(text),
            generic: is_generic_phrase(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INFORMATIVE: &str =
        "Produk ini sangat bagus sekali, saya sangat puas dengan kualitasnya yang luar biasa.";

    // ── Emoji ──

    #[test]
    fn emoji_only_accepts_each_block() {
        let block_edges = [
            "\u{1F600}", "\u{1F64F}", "\u{1F300}", "\u{1F5FF}", "\u{1F680}", "\u{1F6FF}",
            "\u{1F700}", "\u{1F77F}",
        ];
        for s in block_edges.into_iter().chain(["👍👍👍", "😂🔥🚗"]) {
            assert!(is_emoji_only(s), "{s:?} should be emoji-only");
        }
    }

    #[test]
    fn emoji_only_rejects_mixed_text() {
        for s in ["👍 ", " 👍", "👍 👍", "👍ok", "mantap 👍", "ok", "!", "❤"] {
            assert!(!is_emoji_only(s), "{s:?} should not be emoji-only");
        }
    }

    #[test]
    fn emoji_only_rejects_empty() {
        assert!(!is_emoji_only(""));
    }

    // ── Sentence statistics ──

    #[test]
    fn informative_sentence() {
        let stats = SentenceStats::measure(INFORMATIVE).unwrap();
        assert_eq!(stats.sentences, 1);
        assert!((stats.avg_words_per_sentence - 13.0).abs() < 1e-9);
        assert!(stats.avg_word_length > 5.0);
        assert!(length_informativeness(INFORMATIVE));
    }

    #[test]
    fn short_words_are_not_informative() {
        // 11 words, average length ~3.2 characters.
        assert!(!length_informativeness(
            "aku beli ini buat ibu dan dia suka itu ya kak"
        ));
    }

    #[test]
    fn short_sentences_are_not_informative() {
        // Long words, but only two per sentence.
        assert!(!length_informativeness(
            "Pengiriman cepat. Kualitasnya memuaskan! Penjualnya responsif?"
        ));
    }

    #[test]
    fn repeated_terminators_form_one_split() {
        let stats = SentenceStats::measure("Barangnya sangat bagus sekali!!! Pengiriman cepat...").unwrap();
        assert_eq!(stats.sentences, 2);
        assert!((stats.avg_words_per_sentence - 3.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_text_has_no_stats() {
        assert!(SentenceStats::measure("").is_none());
        assert!(SentenceStats::measure("   ").is_none());
        assert!(SentenceStats::measure("...!?").is_none());
        assert!(!length_informativeness("?!"));
    }

    #[test]
    fn punctuation_counts_toward_word_length() {
        let plain = SentenceStats::measure("abc abc").unwrap();
        let punct = SentenceStats::measure("abc, abc").unwrap();
        assert!(punct.avg_word_length > plain.avg_word_length);
    }

    // ── Generic phrases ──

    #[test]
    fn generic_phrase_whole_string_case_insensitive() {
        assert!(is_generic_phrase("ok"));
        assert!(is_generic_phrase("  OK "));
        assert!(is_generic_phrase("Mantap"));
        assert!(is_generic_phrase("sesuai"));
    }

    #[test]
    fn generic_phrase_rejects_substrings() {
        assert!(!is_generic_phrase("ok banget"));
        assert!(!is_generic_phrase("oke deh"));
        assert!(!is_generic_phrase("sesuai pesanan"));
        assert!(!is_generic_phrase(""));
    }

    // ── Natural phrasing ──

    #[test]
    fn natural_requires_all_three_conditions() {
        assert!(looks_natural("Barangnya bagus, pengiriman cepat sekali"));
        // Too few words.
        assert!(!looks_natural("bagus, cepat sampai"));
        // No punctuation.
        assert!(!looks_natural("barangnya bagus pengiriman cepat sekali"));
        // No curated phrase.
        assert!(!looks_natural("barangnya biasa saja, agak lama datang"));
    }

    #[test]
    fn natural_phrases_match_case_insensitively() {
        assert!(looks_natural("Admin dan CS Responsif, barang oke semua"));
    }

    // ── Report ──

    #[test]
    fn report_collects_all_signals() {
        let report = ProbeReport::inspect("  ok  ", Some(" "));
        assert!(report.generic);
        assert!(!report.emoji_only);
        assert!(!report.informative);
        assert!(!report.has_image);
        assert_eq!(report.word_count, 1);

        let report = ProbeReport::inspect(INFORMATIVE, Some("https://img.example/1.jpg"));
        assert!(report.informative);
        assert!(report.natural);
        assert!(report.has_image);
        assert_eq!(report.word_count, 13);
    }
}
