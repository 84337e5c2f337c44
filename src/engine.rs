use chrono::Local;
use rand::Rng;

use crate::models::{AnalysisResult, EmotionScores, FileMetadata};

/// Number of points in the synthetic intensity series.
pub const INTENSITY_POINTS: usize = 20;

/// Seed for the emotion draws: byte size plus filename length in
/// Unicode scalar values.
fn seed_for(metadata: &FileMetadata) -> u64 {
    metadata.byte_size + metadata.name.chars().count() as u64
}

/// Bounded draw derived from the seed. Every emotion draw for one file
/// shares the same seed, so the four values are correlated, not
/// independent; that correlation is part of the contract.
fn pick(seed: u64, min: u64, max: u64) -> u64 {
    min + seed % (max - min + 1)
}

/// Score a file from its metadata alone.
///
/// The emotion distribution and conflict risk are pure functions of the
/// metadata; the intensity series comes from the process-wide RNG and the
/// timestamp from the wall clock, so repeated calls agree only on the
/// first two.
pub fn analyze(metadata: &FileMetadata) -> AnalysisResult {
    let seed = seed_for(metadata);

    let raw_calm = pick(seed, 30, 60);
    let raw_tense = pick(seed, 10, 30);
    let raw_angry = pick(seed, 5, 20);
    let raw_excited = pick(seed, 5, 25);

    // Normalize to percentages, rounding each independently. The sum may
    // drift a few points from 100; that drift is accepted, not corrected.
    let total = (raw_calm + raw_tense + raw_angry + raw_excited) as f64;
    let norm = |raw: u64| (raw as f64 / total * 100.0).round() as u32;
    let emotions = EmotionScores {
        calm: norm(raw_calm),
        tense: norm(raw_tense),
        angry: norm(raw_angry),
        excited: norm(raw_excited),
    };

    // Weighted negative-emotion score over the normalized percentages,
    // clamped before rounding.
    let weighted = emotions.tense as f64 * 0.6
        + emotions.angry as f64 * 0.8
        + emotions.excited as f64 * 0.4;
    let conflict_risk = weighted.min(100.0).round() as u32;

    let mut rng = rand::thread_rng();
    let intensity = (0..INTENSITY_POINTS)
        .map(|_| rng.gen_range(20.0..100.0))
        .collect();

    AnalysisResult {
        emotions,
        conflict_risk,
        intensity,
        timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    }
}
