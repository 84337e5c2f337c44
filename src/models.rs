use serde::{Deserialize, Serialize};

/// Name and size of a selected file. The analysis never reads the file's
/// contents; this is all the engine ever sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    pub name: String,
    pub byte_size: u64,
}

/// Integer percentages over the fixed emotion label set. Values sum to 100
/// up to independent rounding (a drift of a few points is accepted).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionScores {
    pub calm: u32,
    pub tense: u32,
    pub angry: u32,
    pub excited: u32,
}

impl EmotionScores {
    /// Label/value pairs in the fixed display order.
    pub fn entries(&self) -> [(&'static str, u32); 4] {
        [
            ("calm", self.calm),
            ("tense", self.tense),
            ("angry", self.angry),
            ("excited", self.excited),
        ]
    }

    /// Label with the highest percentage. Earlier labels win ties;
    /// "calm" when every value is zero.
    pub fn dominant(&self) -> &'static str {
        let mut best = ("calm", 0);
        for (label, value) in self.entries() {
            if value > best.1 {
                best = (label, value);
            }
        }
        best.0
    }
}

/// One full analysis. `emotions` and `conflict_risk` are deterministic in
/// the file metadata; `intensity` and `timestamp` are not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub emotions: EmotionScores,
    /// Weighted negative-emotion score, clamped to [0, 100].
    pub conflict_risk: u32,
    /// 20 chart-filler values, each in [20, 100).
    pub intensity: Vec<f64>,
    /// Local wall-clock time at the moment of computation.
    pub timestamp: String,
}

/// Conflict-risk classification: [0,30) / [30,60) / [60,100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub fn from_risk(risk: u32) -> Self {
        if risk < 30 {
            RiskTier::Low
        } else if risk < 60 {
            RiskTier::Medium
        } else {
            RiskTier::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Medium => "Medium",
            RiskTier::High => "High",
        }
    }

    /// One-line caption shown under the risk meter.
    pub fn summary(self) -> &'static str {
        match self {
            RiskTier::Low => {
                "Conversation tone is good; emotions are steady and conflict is unlikely."
            }
            RiskTier::Medium => {
                "Some tension detected; keep an eye on where the conversation is heading."
            }
            RiskTier::High => {
                "Strong negative emotion detected; conflict risk is elevated and early intervention is advised."
            }
        }
    }

    /// Advisory sentence for the written report.
    pub fn advice(self) -> &'static str {
        match self {
            RiskTier::Low => "The conversation is on good footing; keep communicating openly.",
            RiskTier::Medium => {
                "Watch for rising tension and steer the topic somewhere more positive when you can."
            }
            RiskTier::High => {
                "Conflict risk is high; consider pausing the topic and addressing emotions before continuing."
            }
        }
    }
}

/// Sent from the analysis timer thread to the UI loop. The generation tag
/// identifies which scheduled analysis produced the result, so deliveries
/// superseded by a newer selection can be dropped.
#[derive(Debug)]
pub enum AnalysisEvent {
    Completed {
        generation: u64,
        result: AnalysisResult,
    },
}
