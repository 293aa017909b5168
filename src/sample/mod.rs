//! Optional reference dataset of historical measurements.
//!
//! Loading never fails: a missing or malformed CSV is replaced by a
//! placeholder holding only the min/max bound of each field, and the score
//! distribution is disabled.

use anyhow::{Context, Result};
use csv::Reader;
use serde::Deserialize;
use std::fs::File;
use std::path::Path;

/// Number of histogram buckets over the 0-100 score range.
pub const HISTOGRAM_BUCKETS: usize = 10;

/// One row of the sample CSV.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SampleRecord {
    #[serde(rename = "Age")]
    pub age: f64,
    #[serde(rename = "Sleep_Duration")]
    pub sleep_duration: f64,
    #[serde(rename = "Stress_Level")]
    pub stress_level: f64,
    #[serde(rename = "Daily_Screen_Time")]
    pub daily_screen_time: f64,
    #[serde(rename = "Caffeine_Intake")]
    pub caffeine_intake: f64,
    #[serde(rename = "Reaction_Time")]
    pub reaction_time: f64,
    #[serde(rename = "Memory_Test_Score")]
    pub memory_test_score: f64,
    #[serde(rename = "Cognitive_Score", default)]
    pub cognitive_score: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct SampleDataset {
    pub records: Vec<SampleRecord>,
    /// False when the placeholder is in use
    pub loaded: bool,
    /// Why the placeholder is in use, if it is
    pub fallback_reason: Option<String>,
}

/// Counts of sample scores per bucket. Bucket `i` covers `[i*w, (i+1)*w)`,
/// with the last bucket closed at 100.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub bucket_width: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

impl SampleDataset {
    /// Two rows spanning the form's bounds, without scores.
    pub fn placeholder() -> Self {
        let row = |age, sleep, stress, screen, caffeine, reaction, memory| SampleRecord {
            age,
            sleep_duration: sleep,
            stress_level: stress,
            daily_screen_time: screen,
            caffeine_intake: caffeine,
            reaction_time: reaction,
            memory_test_score: memory,
            cognitive_score: None,
        };
        Self {
            records: vec![
                row(18.0, 4.0, 1.0, 1.0, 0.0, 200.0, 40.0),
                row(59.0, 10.0, 10.0, 12.0, 500.0, 600.0, 100.0),
            ],
            loaded: false,
            fallback_reason: None,
        }
    }

    /// Load from `path`, falling back to the placeholder on any failure.
    pub fn load_or_placeholder(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self {
                fallback_reason: Some("no sample data configured".to_string()),
                ..Self::placeholder()
            };
        };

        match load_records(path) {
            Ok(records) if !records.is_empty() => Self {
                records,
                loaded: true,
                fallback_reason: None,
            },
            Ok(_) => Self {
                fallback_reason: Some(format!("{} contains no rows", path.display())),
                ..Self::placeholder()
            },
            Err(e) => Self {
                fallback_reason: Some(format!("{:#}", e)),
                ..Self::placeholder()
            },
        }
    }

    /// Scores available for a distribution display. Empty unless real data
    /// was loaded and it carries a `Cognitive_Score` column.
    pub fn scores(&self) -> Vec<f64> {
        if !self.loaded {
            return Vec::new();
        }
        self.records
            .iter()
            .filter_map(|r| r.cognitive_score)
            .filter(|s| s.is_finite())
            .collect()
    }

    pub fn has_distribution(&self) -> bool {
        !self.scores().is_empty()
    }

    /// Score histogram, or `None` when there is nothing to show.
    pub fn histogram(&self) -> Option<Histogram> {
        let scores = self.scores();
        if scores.is_empty() {
            return None;
        }

        let bucket_width = 100.0 / HISTOGRAM_BUCKETS as f64;
        let mut counts = vec![0; HISTOGRAM_BUCKETS];
        for score in scores {
            let clamped = score.clamp(0.0, 100.0);
            let idx = ((clamped / bucket_width) as usize).min(HISTOGRAM_BUCKETS - 1);
            counts[idx] += 1;
        }

        Some(Histogram {
            bucket_width,
            counts,
        })
    }
}

fn load_records(path: &Path) -> Result<Vec<SampleRecord>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open sample data at {}", path.display()))?;

    let mut reader = Reader::from_reader(file);
    let mut records = Vec::new();
    for result in reader.deserialize() {
        let record: SampleRecord = result
            .with_context(|| format!("Failed to parse sample data in {}", path.display()))?;
        records.push(record);
    }

    Ok(records)
}
