//! Session layer: server-side evaluation sessions addressed by id, with
//! an HTTP surface exposing each wizard transition.

pub mod repository;
pub mod router;
pub mod service;

pub use repository::{RepositoryError, SessionId, SessionRecord, SessionRepository};
pub use router::session_router;
pub use service::{
    EvaluationSessionService, QuestionnaireView, ResultsView, SessionServiceError, SessionView,
};
