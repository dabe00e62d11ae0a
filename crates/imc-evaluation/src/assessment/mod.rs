//! Organizational-health evaluation: the theme catalog, the questionnaire
//! engine, score interpretation, and the wizard flow tying them together.

pub mod catalog;
pub mod domain;
pub mod engine;
pub mod flow;
pub mod interpreter;
pub mod sessions;

pub use catalog::{answer_options, CatalogError, ThemeCatalog};
pub use domain::{
    AnswerOption, Category, FlattenedQuestion, QuestionId, RangeTone, ScoreBand, ScoreRange,
    Theme, ThemeAccent, ThemeId, ANSWER_MAX, ANSWER_MIN,
};
pub use engine::{EngineError, QuestionnaireEngine, QuestionnaireOutcome};
pub use flow::{CompanyProfile, EvaluationFlow, FlowError, FlowStep};
pub use interpreter::{gauge_percent, resolve, ADVISORY_NOTICE, GAUGE_MAX, GAUGE_MIN, SCORE_MARKERS};
