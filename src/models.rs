use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MAX_FEEDBACK_LENGTH: usize = 140;
pub const MAX_IDEA_LENGTH: usize = 250;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpinionKind {
    Praise,
    Issue,
    Idea,
    BrokenWebsite,
}

impl OpinionKind {
    pub const ALL: [OpinionKind; 4] = [
        OpinionKind::Praise,
        OpinionKind::Issue,
        OpinionKind::Idea,
        OpinionKind::BrokenWebsite,
    ];

    /// Value of the hidden `type` field.
    pub fn short(self) -> &'static str {
        match self {
            OpinionKind::Praise => "praise",
            OpinionKind::Issue => "issue",
            OpinionKind::Idea => "idea",
            OpinionKind::BrokenWebsite => "brokenwebsite",
        }
    }

    pub fn from_short(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.short() == value)
    }

    pub fn article_id(self) -> &'static str {
        match self {
            OpinionKind::Praise => "praise",
            OpinionKind::Issue => "issue",
            OpinionKind::Idea => "idea",
            OpinionKind::BrokenWebsite => "broken",
        }
    }

    pub fn max_length(self) -> usize {
        match self {
            OpinionKind::Idea => MAX_IDEA_LENGTH,
            _ => MAX_FEEDBACK_LENGTH,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opinion {
    pub id: u64,
    pub kind: OpinionKind,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FeedbackLog {
    pub opinions: Vec<Opinion>,
}

impl FeedbackLog {
    pub fn next_id(&self) -> u64 {
        self.opinions.iter().map(|opinion| opinion.id).max().unwrap_or(0) + 1
    }
}

/// Form body posted by the feedback articles.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedbackSubmission {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub add_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOpinion {
    pub kind: OpinionKind,
    pub description: String,
    pub url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitAck {
    pub id: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OpinionCount {
    pub count: usize,
}
