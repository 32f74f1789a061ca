//! Bounded, diversity-aware retention of free-text learnings.
//!
//! Insights accumulate per island during evolution; once an island exceeds
//! its cap the log is curated down by a deterministic weighted score with a
//! token-overlap diversity filter.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// One free-text learning extracted from a strategy analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    /// The learning itself.
    pub text: String,
    /// Generation it was recorded in.
    pub generation: usize,
    /// Island it belongs to.
    pub island_id: usize,
    /// Combined score of the strategy that produced it (0.0 when unknown).
    pub source_score: f64,
}

/// Scoring weights: recency, performance, novelty, actionability.
const WEIGHTS: [f64; 4] = [0.3, 0.4, 0.2, 0.1];

/// Combined scores are mapped from this assumed range into [0, 1].
const SCORE_RANGE: (f64, f64) = (-5.0, 10.0);

/// Words signaling a novel finding.
const NOVELTY_KEYWORDS: [&str; 6] = [
    "novel",
    "unexpected",
    "discovered",
    "surprising",
    "unusual",
    "breakthrough",
];

/// Words signaling a concrete follow-up.
const ACTIONABILITY_KEYWORDS: [&str; 8] = [
    "should",
    "implement",
    "adjust",
    "increase",
    "decrease",
    "consider",
    "avoid",
    "prefer",
];

/// Maximum token-overlap similarity two kept insights may share during the
/// diversity pass.
const MAX_SIMILARITY: f64 = 0.5;

/// Weighted retention score of one insight.
pub fn score_insight(insight: &Insight, current_generation: usize) -> f64 {
    let recency = if current_generation == 0 {
        0.0
    } else {
        (insight.generation as f64 / current_generation as f64).clamp(0.0, 1.0)
    };

    let (lo, hi) = SCORE_RANGE;
    let performance = ((insight.source_score - lo) / (hi - lo)).clamp(0.0, 1.0);

    let lowered = insight.text.to_lowercase();
    let novelty = keyword_factor(&lowered, &NOVELTY_KEYWORDS);
    let actionability = keyword_factor(&lowered, &ACTIONABILITY_KEYWORDS);

    WEIGHTS[0] * recency
        + WEIGHTS[1] * performance
        + WEIGHTS[2] * novelty
        + WEIGHTS[3] * actionability
}

/// Count of keywords present, capped at 3, scaled into [0, 1].
fn keyword_factor(lowered_text: &str, keywords: &[&str]) -> f64 {
    let hits = keywords
        .iter()
        .filter(|k| lowered_text.contains(*k))
        .count()
        .min(3);
    hits as f64 / 3.0
}

/// Jaccard similarity over whitespace-split lowercase tokens.
pub fn token_similarity(a: &str, b: &str) -> f64 {
    let tokens_a: HashSet<String> = a.split_whitespace().map(str::to_lowercase).collect();
    let tokens_b: HashSet<String> = b.split_whitespace().map(str::to_lowercase).collect();

    let union = tokens_a.union(&tokens_b).count();
    if union == 0 {
        // Two empty texts are duplicates of each other
        return 1.0;
    }
    let intersection = tokens_a.intersection(&tokens_b).count();
    intersection as f64 / union as f64
}

/// Curate an island's insight log down to `keep` entries.
///
/// Insights are scored, then greedily selected highest-first, admitting an
/// insight only while its similarity to every kept one stays at or below
/// the diversity threshold. If diverse selection cannot fill the cap, the
/// remaining slots are backfilled with the next-highest-scoring insights
/// regardless of similarity.
pub fn curate(insights: Vec<Insight>, current_generation: usize, keep: usize) -> Vec<Insight> {
    if insights.len() <= keep {
        return insights;
    }

    let mut scored: Vec<(f64, Insight)> = insights
        .into_iter()
        .map(|i| (score_insight(&i, current_generation), i))
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    let mut selected: Vec<Insight> = Vec::with_capacity(keep);
    let mut leftover: Vec<Insight> = Vec::new();

    for (_, insight) in scored {
        if selected.len() >= keep {
            break;
        }
        let diverse = selected
            .iter()
            .all(|kept| token_similarity(&kept.text, &insight.text) <= MAX_SIMILARITY);
        if diverse {
            selected.push(insight);
        } else {
            leftover.push(insight);
        }
    }

    // Backfill with the best remaining insights regardless of similarity
    let mut backfill = leftover.into_iter();
    while selected.len() < keep {
        match backfill.next() {
            Some(insight) => selected.push(insight),
            None => break,
        }
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insight(text: &str, generation: usize, source_score: f64) -> Insight {
        Insight {
            text: text.to_string(),
            generation,
            island_id: 0,
            source_score,
        }
    }

    #[test]
    fn test_keyword_factors() {
        let plain = insight("momentum window of twenty days", 10, 0.0);
        let rich = insight(
            "discovered unexpected novel edge, should implement and adjust sizing",
            10,
            0.0,
        );
        assert!(score_insight(&rich, 10) > score_insight(&plain, 10));

        // Capped at three hits per factor
        let saturated = insight(
            "novel unexpected discovered surprising unusual breakthrough",
            10,
            0.0,
        );
        let capped = insight("novel unexpected discovered", 10, 0.0);
        assert_eq!(score_insight(&saturated, 10), score_insight(&capped, 10));
    }

    #[test]
    fn test_recency_and_performance_factors() {
        // Generation zero contributes no recency
        assert_eq!(score_insight(&insight("x", 0, -5.0), 0), 0.0);

        let old = insight("x", 10, 2.0);
        let new = insight("x", 100, 2.0);
        assert!(score_insight(&new, 100) > score_insight(&old, 100));

        // Performance mapped from [-5, 10] and clamped
        let worst = insight("x", 0, -50.0);
        let best = insight("x", 0, 50.0);
        assert_eq!(score_insight(&worst, 100), 0.0);
        assert_eq!(score_insight(&best, 100), WEIGHTS[1]);
    }

    #[test]
    fn test_token_similarity() {
        assert_eq!(token_similarity("alpha beta", "alpha beta"), 1.0);
        assert_eq!(token_similarity("alpha", "beta"), 0.0);
        assert!((token_similarity("alpha beta", "beta gamma") - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(token_similarity("", ""), 1.0);
    }

    #[test]
    fn test_curate_noop_under_cap() {
        let pool: Vec<Insight> = (0..10).map(|i| insight(&format!("i{i}"), i, 0.0)).collect();
        assert_eq!(curate(pool.clone(), 10, 50), pool);
    }

    #[test]
    fn test_curate_diverse_selection_respects_similarity() {
        // 30 fully distinct insights, keep 10: diversity alone fills the cap
        let pool: Vec<Insight> = (0..30)
            .map(|i| insight(&format!("unique{i} token{i} word{i}"), i, 0.0))
            .collect();
        let kept = curate(pool, 30, 10);
        assert_eq!(kept.len(), 10);
        for a in &kept {
            for b in &kept {
                if a.text != b.text {
                    assert!(token_similarity(&a.text, &b.text) <= MAX_SIMILARITY);
                }
            }
        }
    }

    #[test]
    fn test_curate_backfills_near_duplicates() {
        // 120 near-duplicates: diverse selection alone finds far fewer than
        // 50 unique entries, so backfill must complete the cap.
        let pool: Vec<Insight> = (0..120)
            .map(|i| insight("volume spike precedes breakout entries", i, 1.0))
            .collect();
        let kept = curate(pool, 120, 50);
        assert_eq!(kept.len(), 50);
    }

    #[test]
    fn test_curate_prefers_higher_scores() {
        let mut pool: Vec<Insight> = (0..20)
            .map(|i| insight(&format!("filler entry number {i}"), 0, -5.0))
            .collect();
        pool.push(insight("discovered novel regime shift signal", 19, 9.0));

        let kept = curate(pool, 20, 5);
        assert!(kept[0].text.contains("regime shift"));
    }
}
