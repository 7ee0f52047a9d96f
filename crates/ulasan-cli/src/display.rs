//! Terminal rendering for batch summaries and single-review probe cards.

use ulasan_ai::cascade::Rule;
use ulasan_ai::lexicon::{GENERIC_PHRASES, LEXICON_VERSION, NATURAL_PHRASES, NATURAL_PUNCTUATION};
use ulasan_ai::{BatchReport, Classification, ProbeReport};

use crate::pipeline::ClassifyStats;

const MAX_SKIPPED_SHOWN: usize = 10;

// ── Public API ──

/// Print counts for a classified batch.
pub fn print_batch_summary(report: &BatchReport, stats: &ClassifyStats) {
    let summary = report.summary();

    println!("=== {} ===", report.source_url);
    println!(
        "  {:<26} {}",
        "started",
        stats.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("  {:<26} {:.2}s", "elapsed", stats.elapsed_secs);
    println!();

    println!("Labels");
    println!("  {:<26} {}", "labeled", summary.labeled);
    println!("  {:<26} {}", "Real", summary.real);
    println!("  {:<26} {}", "Fake", summary.fake);
    println!("  {:<26} {}", "skipped", summary.skipped);
    println!();

    // Cascade order first, model last.
    println!("Decided by");
    let keys = Rule::CASCADE.iter().map(|r| r.as_str()).chain(["model"]);
    for key in keys {
        if let Some(count) = summary.by_decider.get(key) {
            println!("  {:<26} {}", key, count);
        }
    }
    println!();

    if report.skipped.is_empty() {
        return;
    }
    println!("Skipped ({})", report.skipped.len());
    for skipped in report.skipped.iter().take(MAX_SKIPPED_SHOWN) {
        println!("  #{:<25} {}", skipped.index, skipped.reason);
    }
    if report.skipped.len() > MAX_SKIPPED_SHOWN {
        println!("  ... and {} more", report.skipped.len() - MAX_SKIPPED_SHOWN);
    }
}

/// Print every probe signal for one review and the cascade's decision.
pub fn print_probe_card(
    text: &str,
    image_url: Option<&str>,
    probes: &ProbeReport,
    classification: &Classification,
) {
    println!("=== {} ===", classification.label);
    println!("{}", classification.reason);
    println!();

    println!("Review");
    println!("  {:<26} {}", "text", text.trim());
    if let Some(url) = image_url {
        println!("  {:<26} {}", "image_url", url);
    }
    println!();

    println!("Probes");
    println!("  {:<26} {}", "emoji_only", yes_no(probes.emoji_only));
    match probes.stats {
        Some(stats) => {
            println!("  {:<26} {}", "sentences", stats.sentences);
            println!(
                "  {:<26} {:.2}",
                "avg_words_per_sentence", stats.avg_words_per_sentence
            );
            println!("  {:<26} {:.2}", "avg_word_length", stats.avg_word_length);
        }
        None => println!("  {:<26} -", "sentences"),
    }
    println!("  {:<26} {}", "informative", yes_no(probes.informative));
    println!("  {:<26} {}", "word_count", probes.word_count);
    println!("  {:<26} {}", "has_image", yes_no(probes.has_image));
    println!("  {:<26} {}", "natural", yes_no(probes.natural));
    println!("  {:<26} {}", "generic", yes_no(probes.generic));
    println!();

    println!("Decision");
    println!("  {:<26} {}", "decided_by", classification.decided_by);
}

/// Print the compiled-in phrase lists.
pub fn print_lexicon() {
    println!("=== lexicon {} ===", LEXICON_VERSION);
    println!();
    println!("Generic phrases ({})", GENERIC_PHRASES.len());
    println!("  {}", GENERIC_PHRASES.join(", "));
    println!();
    println!("Natural punctuation ({})", NATURAL_PUNCTUATION.len());
    println!("  {}", NATURAL_PUNCTUATION.join(" "));
    println!();
    println!("Natural phrases ({})", NATURAL_PHRASES.len());
    for phrase in NATURAL_PHRASES {
        println!("  {phrase}");
    }
}

// ── Helpers ──

fn yes_no(v: bool) -> &'static str {
    if v { "yes" } else { "no" }
}
