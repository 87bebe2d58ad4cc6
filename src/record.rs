use serde::{Deserialize, Serialize};

/// One parsed catalog entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub code: Option<String>,
    pub title: String,
    pub credit_hours: Option<u32>,
    pub credits: Option<CreditBreakdown>,
    pub teaching_scheme: Option<String>,
    pub prerequisite: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prerequisite_codes: Vec<String>,
    pub objective: Option<String>,
    pub outcomes: Vec<Outcome>,
    pub contents: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content_topics: Vec<ContentTopic>,
}

impl CourseRecord {
    /// Number of populated fields, used to pick between duplicate entries.
    pub fn richness(&self) -> usize {
        [
            self.code.is_some(),
            !self.title.is_empty(),
            self.credit_hours.is_some(),
            self.credits.is_some(),
            self.teaching_scheme.is_some(),
            self.prerequisite.is_some(),
            self.objective.is_some(),
            !self.outcomes.is_empty(),
            self.contents.is_some(),
            !self.content_topics.is_empty(),
        ]
        .into_iter()
        .filter(|&set| set)
        .count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub code: String,
    pub description: String,
}

/// Theory / laboratory / total figures as written on the page ("3", "1.5").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditBreakdown {
    pub theory: Option<String>,
    pub laboratory: Option<String>,
    pub total: Option<String>,
}

impl CreditBreakdown {
    pub fn is_empty(&self) -> bool {
        self.theory.is_none() && self.laboratory.is_none() && self.total.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentTopic {
    pub topic: String,
    pub outcomes: Vec<String>,
}
