use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest value on the answer scale.
pub const ANSWER_MIN: u8 = 1;
/// Highest value on the answer scale.
pub const ANSWER_MAX: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeId {
    ClimatSocial,
    Leadership,
    Performance,
    Organisation,
    Talents,
}

impl ThemeId {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::ClimatSocial,
            Self::Leadership,
            Self::Performance,
            Self::Organisation,
            Self::Talents,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ClimatSocial => "climat-social",
            Self::Leadership => "leadership",
            Self::Performance => "performance",
            Self::Organisation => "organisation",
            Self::Talents => "talents",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|id| id.as_str() == raw.trim())
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual treatment attached to a theme. Opaque to the engine, carried
/// through so client renderers can style cards and headers.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ThemeAccent {
    pub icon: &'static str,
    pub gradient: &'static str,
}

/// Named grouping of questions inside a theme. Category order and
/// intra-category order define presentation order.
#[derive(Debug, Clone)]
pub struct Category {
    pub name: &'static str,
    pub questions: Vec<&'static str>,
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub id: ThemeId,
    pub title: &'static str,
    pub short_title: &'static str,
    pub description: &'static str,
    pub accent: ThemeAccent,
    pub categories: Vec<Category>,
    pub ranges: Vec<ScoreRange>,
}

impl Theme {
    pub fn question_count(&self) -> usize {
        self.categories
            .iter()
            .map(|category| category.questions.len())
            .sum()
    }

    /// Inclusive bounds of the legal total-score domain: every question
    /// answered with the lowest value up to every question answered with
    /// the highest.
    pub fn score_domain(&self) -> (u16, u16) {
        let count = self.question_count() as u16;
        (count * ANSWER_MIN as u16, count * ANSWER_MAX as u16)
    }

    /// Concatenates all categories' questions in order, tagging each with a
    /// synthetic `"{categoryIndex}-{questionIndex}"` identifier.
    pub fn flattened_questions(&self) -> Vec<FlattenedQuestion> {
        self.categories
            .iter()
            .enumerate()
            .flat_map(|(category_index, category)| {
                category
                    .questions
                    .iter()
                    .enumerate()
                    .map(move |(question_index, text)| FlattenedQuestion {
                        id: QuestionId(format!("{category_index}-{question_index}")),
                        text,
                        category: category.name,
                        category_index,
                    })
            })
            .collect()
    }
}

/// Identifier of a flattened question, unique within one theme.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QuestionId(pub String);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A question lifted out of its category into the linear sequence the
/// questionnaire walks through.
#[derive(Debug, Clone, Serialize)]
pub struct FlattenedQuestion {
    pub id: QuestionId,
    pub text: &'static str,
    pub category: &'static str,
    pub category_index: usize,
}

/// Interval of total scores mapped to a qualitative reading. Bounds are
/// inclusive on both ends.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreRange {
    pub min: u16,
    pub max: u16,
    pub label: &'static str,
    pub tone: RangeTone,
    pub analysis: &'static str,
    pub recommendations: Vec<&'static str>,
}

impl ScoreRange {
    pub fn contains(&self, score: u16) -> bool {
        self.min <= score && score <= self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeTone {
    Critical,
    Warning,
    Stable,
    Success,
}

impl RangeTone {
    pub const fn badge_class(self) -> &'static str {
        match self {
            Self::Critical => "bg-destructive/10 text-destructive",
            Self::Warning => "bg-warning/10 text-warning",
            Self::Stable => "bg-primary/10 text-primary",
            Self::Success => "bg-success/10 text-success",
        }
    }
}

/// One entry of the fixed answer scale presented for every question.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AnswerOption {
    pub value: u8,
    pub label: &'static str,
}

/// Theme-independent reading of a total score, used by back-office badges
/// where per-theme range labels would be too specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Performant,
    Stable,
    Fragile,
    Critique,
}

impl ScoreBand {
    pub const fn from_total(score: u16) -> Self {
        if score >= 50 {
            Self::Performant
        } else if score >= 40 {
            Self::Stable
        } else if score >= 30 {
            Self::Fragile
        } else {
            Self::Critique
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Performant => "Performant",
            Self::Stable => "Stable",
            Self::Fragile => "Fragile",
            Self::Critique => "Critique",
        }
    }

    pub const fn badge_class(self) -> &'static str {
        match self {
            Self::Performant => RangeTone::Success.badge_class(),
            Self::Stable => RangeTone::Stable.badge_class(),
            Self::Fragile => RangeTone::Warning.badge_class(),
            Self::Critique => RangeTone::Critical.badge_class(),
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "performant" => Some(Self::Performant),
            "stable" => Some(Self::Stable),
            "fragile" => Some(Self::Fragile),
            "critique" => Some(Self::Critique),
            _ => None,
        }
    }
}
