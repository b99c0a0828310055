use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::models::employee::Employee;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    High,
    Medium,
    Low,
    Other(String),
}

impl Priority {
    pub fn as_str(&self) -> &str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
            Priority::Other(raw) => raw.as_str(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Priority::High => "Alta",
            Priority::Medium => "Média",
            Priority::Low => "Baixa",
            Priority::Other(raw) => raw.as_str(),
        }
    }

    /// Long form used on the dashboard list and in the modal header.
    pub fn long_label(&self) -> String {
        match self {
            Priority::Other(raw) => raw.clone(),
            known => format!("{} Prioridade", known.label()),
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl From<String> for Priority {
    fn from(value: String) -> Self {
        match value.as_str() {
            "high" => Priority::High,
            "medium" => Priority::Medium,
            "low" => Priority::Low,
            _ => Priority::Other(value),
        }
    }
}

impl From<&str> for Priority {
    fn from(value: &str) -> Self {
        Priority::from(value.to_string())
    }
}

impl From<Priority> for String {
    fn from(value: Priority) -> Self {
        match value {
            Priority::Other(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisTone {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl AnalysisTone {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisTone::Positive => "positive",
            AnalysisTone::Negative => "negative",
            AnalysisTone::Neutral => "neutral",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisItem {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(rename = "type", default)]
    pub tone: AnalysisTone,
}

/// The static dataset ships analysis as rich text, the API as a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecommendationAnalysis {
    Items(Vec<AnalysisItem>),
    Text(String),
}

impl RecommendationAnalysis {
    pub fn is_empty(&self) -> bool {
        match self {
            RecommendationAnalysis::Items(items) => items.is_empty(),
            RecommendationAnalysis::Text(text) => text.trim().is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Problem statement; only the detail payload carries it.
    #[serde(default)]
    pub problem: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub impact: Option<String>,
    #[serde(default)]
    pub analysis: Option<RecommendationAnalysis>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub timeline: Option<String>,
    #[serde(
        default,
        alias = "expectedResult",
        deserialize_with = "deserialize_string_or_seq"
    )]
    pub expected_results: Vec<String>,
    #[serde(default)]
    pub employee: Option<Employee>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrSeq {
    One(String),
    Many(Vec<String>),
}

fn deserialize_string_or_seq<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<StringOrSeq> = Option::deserialize(deserializer)?;
    Ok(match value {
        None => Vec::new(),
        Some(StringOrSeq::One(single)) if single.trim().is_empty() => Vec::new(),
        Some(StringOrSeq::One(single)) => vec![single],
        Some(StringOrSeq::Many(items)) => items,
    })
}
