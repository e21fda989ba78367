use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Attack category reported by a scan backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScanTechnique {
    Injection,
    Macro,
    DataPoison,
    Stego,
    SemanticJailbreak,
    Clean,
}

impl Display for ScanTechnique {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ScanTechnique::Injection => write!(f, "injection"),
            ScanTechnique::Macro => write!(f, "macro"),
            ScanTechnique::DataPoison => write!(f, "data_poison"),
            ScanTechnique::Stego => write!(f, "stego"),
            ScanTechnique::SemanticJailbreak => write!(f, "semantic_jailbreak"),
            ScanTechnique::Clean => write!(f, "clean"),
        }
    }
}

impl FromStr for ScanTechnique {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "injection" => Ok(ScanTechnique::Injection),
            "macro" => Ok(ScanTechnique::Macro),
            "data_poison" => Ok(ScanTechnique::DataPoison),
            "stego" => Ok(ScanTechnique::Stego),
            "semantic_jailbreak" => Ok(ScanTechnique::SemanticJailbreak),
            "clean" => Ok(ScanTechnique::Clean),
            _ => Err(anyhow::anyhow!("Invalid scan technique: {}", s)),
        }
    }
}

/// Classification returned by a scan backend for one payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanVerdict {
    pub poisoned: bool,
    /// Backend confidence in the verdict, 0.0..=1.0.
    pub confidence: f64,
    pub technique: ScanTechnique,
    pub reason: String,
    /// Neutralized excerpt of the offending content, safe to display.
    pub sanitized_excerpt: String,
}

impl ScanVerdict {
    /// A full-confidence clean verdict.
    pub fn clean(reason: impl Into<String>) -> Self {
        Self {
            poisoned: false,
            confidence: 1.0,
            technique: ScanTechnique::Clean,
            reason: reason.into(),
            sanitized_excerpt: String::new(),
        }
    }
}

/// Verdict as recorded on a completed queue item: the backend's
/// classification plus the content fingerprint and completion time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanOutcome {
    pub hash: String,
    pub poisoned: bool,
    pub confidence: f64,
    pub technique: ScanTechnique,
    pub reason: String,
    pub sanitized_excerpt: String,
    pub completed_at: DateTime<Utc>,
}

impl ScanOutcome {
    pub fn from_verdict(hash: impl Into<String>, verdict: ScanVerdict) -> Self {
        Self {
            hash: hash.into(),
            poisoned: verdict.poisoned,
            confidence: verdict.confidence,
            technique: verdict.technique,
            reason: verdict.reason,
            sanitized_excerpt: verdict.sanitized_excerpt,
            completed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_technique_display() {
        assert_eq!(ScanTechnique::Injection.to_string(), "injection");
        assert_eq!(ScanTechnique::DataPoison.to_string(), "data_poison");
        assert_eq!(ScanTechnique::SemanticJailbreak.to_string(), "semantic_jailbreak");
        assert_eq!(ScanTechnique::Clean.to_string(), "clean");
    }

    #[test]
    fn scan_technique_from_str() {
        assert_eq!("macro".parse::<ScanTechnique>().unwrap(), ScanTechnique::Macro);
        assert_eq!("stego".parse::<ScanTechnique>().unwrap(), ScanTechnique::Stego);
        assert!("rootkit".parse::<ScanTechnique>().is_err());
    }

    #[test]
    fn clean_verdict() {
        let verdict = ScanVerdict::clean("no findings");
        assert!(!verdict.poisoned);
        assert_eq!(verdict.technique, ScanTechnique::Clean);
        assert_eq!(verdict.reason, "no findings");
        assert!(verdict.sanitized_excerpt.is_empty());
    }

    #[test]
    fn outcome_preserves_verdict_and_hash() {
        let verdict = ScanVerdict {
            poisoned: true,
            confidence: 0.87,
            technique: ScanTechnique::Injection,
            reason: "embedded system-role override".to_string(),
            sanitized_excerpt: "[REDACTED] ignore previous ...".to_string(),
        };
        let outcome = ScanOutcome::from_verdict("abc123", verdict);
        assert_eq!(outcome.hash, "abc123");
        assert!(outcome.poisoned);
        assert_eq!(outcome.technique, ScanTechnique::Injection);
        assert_eq!(outcome.reason, "embedded system-role override");
    }
}
