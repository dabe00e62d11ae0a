use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Local;
use serde::Serialize;

use crate::assessment::catalog::{answer_options, ThemeCatalog};
use crate::assessment::domain::{
    AnswerOption, FlattenedQuestion, QuestionId, RangeTone, ThemeId,
};
use crate::assessment::flow::{CompanyProfile, EvaluationFlow, FlowError, FlowStep};
use crate::assessment::interpreter::{
    gauge_percent, resolve, ADVISORY_NOTICE, SCORE_MARKERS,
};
use super::repository::{RepositoryError, SessionId, SessionRecord, SessionRepository};

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("eval-{id:06}"))
}

/// Service driving evaluation flows by session id, composing the theme
/// catalog, the wizard state machine, and the session store.
pub struct EvaluationSessionService<R> {
    catalog: Arc<ThemeCatalog>,
    repository: Arc<R>,
}

impl<R> EvaluationSessionService<R>
where
    R: SessionRepository + 'static,
{
    pub fn new(catalog: Arc<ThemeCatalog>, repository: Arc<R>) -> Self {
        Self {
            catalog,
            repository,
        }
    }

    pub fn catalog(&self) -> &ThemeCatalog {
        &self.catalog
    }

    /// Opens a session, optionally seeded with a theme id from a deep link.
    pub fn start(&self, theme_id: Option<ThemeId>) -> Result<SessionView, SessionServiceError> {
        let flow = match theme_id {
            Some(theme_id) => EvaluationFlow::seeded(theme_id),
            None => EvaluationFlow::new(),
        };
        let record = SessionRecord {
            id: next_session_id(),
            flow,
            opened_on: Local::now().date_naive(),
        };
        let stored = self.repository.insert(record)?;
        Ok(self.view(&stored))
    }

    pub fn get(&self, id: &SessionId) -> Result<SessionView, SessionServiceError> {
        let record = self.fetch(id)?;
        Ok(self.view(&record))
    }

    pub fn select_theme(
        &self,
        id: &SessionId,
        theme_id: ThemeId,
    ) -> Result<SessionView, SessionServiceError> {
        self.mutate(id, |flow, _| flow.select_theme(theme_id))
    }

    pub fn submit_company_info(
        &self,
        id: &SessionId,
        profile: CompanyProfile,
    ) -> Result<SessionView, SessionServiceError> {
        self.mutate(id, |flow, catalog| flow.submit_company_info(catalog, profile))
    }

    pub fn answer(&self, id: &SessionId, value: u8) -> Result<SessionView, SessionServiceError> {
        self.mutate(id, |flow, _| {
            flow.questionnaire_mut()?.answer(value)?;
            Ok(())
        })
    }

    pub fn advance(&self, id: &SessionId) -> Result<SessionView, SessionServiceError> {
        self.mutate(id, |flow, _| {
            flow.questionnaire_mut()?.advance();
            Ok(())
        })
    }

    pub fn retreat(&self, id: &SessionId) -> Result<SessionView, SessionServiceError> {
        self.mutate(id, |flow, _| {
            flow.questionnaire_mut()?.retreat();
            Ok(())
        })
    }

    pub fn jump_to(&self, id: &SessionId, index: usize) -> Result<SessionView, SessionServiceError> {
        self.mutate(id, |flow, _| {
            flow.questionnaire_mut()?.jump_to(index)?;
            Ok(())
        })
    }

    pub fn complete(&self, id: &SessionId) -> Result<SessionView, SessionServiceError> {
        self.mutate(id, |flow, _| {
            flow.finish_questionnaire()?;
            Ok(())
        })
    }

    pub fn change_theme(&self, id: &SessionId) -> Result<SessionView, SessionServiceError> {
        self.mutate(id, |flow, _| flow.change_theme())
    }

    pub fn back_to_company_info(&self, id: &SessionId) -> Result<SessionView, SessionServiceError> {
        self.mutate(id, |flow, _| flow.back_to_company_info())
    }

    pub fn restart(&self, id: &SessionId) -> Result<SessionView, SessionServiceError> {
        self.mutate(id, |flow, _| flow.restart())
    }

    fn fetch(&self, id: &SessionId) -> Result<SessionRecord, SessionServiceError> {
        Ok(self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?)
    }

    fn mutate<F>(&self, id: &SessionId, apply: F) -> Result<SessionView, SessionServiceError>
    where
        F: FnOnce(&mut EvaluationFlow, &ThemeCatalog) -> Result<(), FlowError>,
    {
        let mut record = self.fetch(id)?;
        apply(&mut record.flow, &self.catalog)?;
        let view = self.view(&record);
        self.repository.update(record)?;
        Ok(view)
    }

    fn view(&self, record: &SessionRecord) -> SessionView {
        let flow = &record.flow;
        let questionnaire = flow
            .questionnaire()
            .ok()
            .map(|engine| QuestionnaireView {
                question_index: engine.cursor(),
                total_questions: engine.question_count(),
                progress_percent: engine.progress_percent(),
                question: engine.current_question().clone(),
                current_answer: engine.current_answer(),
                answered: engine.answered_ids(),
                is_last_question: engine.is_at_last_question(),
                options: answer_options().to_vec(),
            });

        let results = flow.outcome().map(|outcome| {
            let theme = self
                .catalog
                .theme(outcome.theme_id)
                .expect("outcome always references a catalog theme");
            let range = resolve(theme, outcome.total_score);
            ResultsView {
                theme_id: theme.id,
                theme_title: theme.title,
                company_name: flow
                    .company()
                    .map(|company| company.name.clone())
                    .unwrap_or_default(),
                total_score: outcome.total_score,
                answers: outcome.answers.clone(),
                range_label: range.label,
                tone: range.tone,
                analysis: range.analysis,
                recommendations: range.recommendations.clone(),
                gauge_percent: gauge_percent(outcome.total_score),
                score_markers: SCORE_MARKERS,
                notice: ADVISORY_NOTICE,
            }
        });

        SessionView {
            session_id: record.id.clone(),
            step: flow.step(),
            step_label: flow.step().label(),
            theme_id: flow.theme_id(),
            company: flow.company().cloned(),
            questionnaire,
            results,
        }
    }
}

/// Error raised by the session service.
#[derive(Debug, thiserror::Error)]
pub enum SessionServiceError {
    #[error(transparent)]
    Flow(#[from] FlowError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Snapshot of a session rendered for API clients.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub step: FlowStep,
    pub step_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_id: Option<ThemeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<CompanyProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub questionnaire: Option<QuestionnaireView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<ResultsView>,
}

/// The questionnaire step as the client renders it: current question,
/// progress, scale options, and the answered ids backing quick navigation.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionnaireView {
    pub question_index: usize,
    pub total_questions: usize,
    pub progress_percent: f64,
    pub question: FlattenedQuestion,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_answer: Option<u8>,
    pub answered: Vec<QuestionId>,
    pub is_last_question: bool,
    pub options: Vec<AnswerOption>,
}

/// The results step: resolved range narrative plus the gauge geometry.
#[derive(Debug, Clone, Serialize)]
pub struct ResultsView {
    pub theme_id: ThemeId,
    pub theme_title: &'static str,
    pub company_name: String,
    pub total_score: u16,
    pub answers: BTreeMap<QuestionId, u8>,
    pub range_label: &'static str,
    pub tone: RangeTone,
    pub analysis: &'static str,
    pub recommendations: Vec<&'static str>,
    pub gauge_percent: f64,
    pub score_markers: [u16; 5],
    pub notice: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryRepository {
        records: Mutex<HashMap<SessionId, SessionRecord>>,
    }

    impl SessionRepository for MemoryRepository {
        fn insert(&self, record: SessionRecord) -> Result<SessionRecord, RepositoryError> {
            let mut guard = self.records.lock().expect("session mutex poisoned");
            if guard.contains_key(&record.id) {
                return Err(RepositoryError::Conflict);
            }
            guard.insert(record.id.clone(), record.clone());
            Ok(record)
        }

        fn update(&self, record: SessionRecord) -> Result<(), RepositoryError> {
            let mut guard = self.records.lock().expect("session mutex poisoned");
            if guard.contains_key(&record.id) {
                guard.insert(record.id.clone(), record);
                Ok(())
            } else {
                Err(RepositoryError::NotFound)
            }
        }

        fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError> {
            let guard = self.records.lock().expect("session mutex poisoned");
            Ok(guard.get(id).cloned())
        }
    }

    fn service() -> EvaluationSessionService<MemoryRepository> {
        EvaluationSessionService::new(
            Arc::new(ThemeCatalog::standard()),
            Arc::new(MemoryRepository::default()),
        )
    }

    fn sample_profile() -> CompanyProfile {
        CompanyProfile {
            name: "Groupe Delta".into(),
            domain: "Commerce".into(),
            phone: "+225 01 00 00 00".into(),
            email: "contact@delta.com".into(),
            location: "Abidjan".into(),
            objective: "Préparer un plan de développement des talents.".into(),
        }
    }

    #[test]
    fn full_session_produces_a_results_view() {
        let service = service();
        let opened = service.start(None).expect("session opens");
        assert_eq!(opened.step, FlowStep::ThemeSelection);
        let id = opened.session_id;

        service
            .select_theme(&id, ThemeId::ClimatSocial)
            .expect("theme selectable");
        service
            .submit_company_info(&id, sample_profile())
            .expect("profile complete");

        for _ in 0..15 {
            service.answer(&id, 4).expect("value on scale");
            service.advance(&id).expect("in questionnaire");
        }
        let view = service.complete(&id).expect("at last question");

        assert_eq!(view.step, FlowStep::Results);
        let results = view.results.expect("results populated");
        assert_eq!(results.total_score, 60);
        assert_eq!(results.range_label, "Performant");
        assert_eq!(results.company_name, "Groupe Delta");
        assert_eq!(results.answers.len(), 15);
        assert!((results.gauge_percent - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn seeded_session_opens_on_company_info() {
        let service = service();
        let view = service
            .start(Some(ThemeId::Leadership))
            .expect("session opens");
        assert_eq!(view.step, FlowStep::CompanyInfo);
        assert_eq!(view.theme_id, Some(ThemeId::Leadership));
    }

    #[test]
    fn questionnaire_view_tracks_progress_and_answers() {
        let service = service();
        let id = service
            .start(Some(ThemeId::Performance))
            .expect("session opens")
            .session_id;
        service
            .submit_company_info(&id, sample_profile())
            .expect("profile complete");

        let view = service.answer(&id, 2).expect("value on scale");
        let questionnaire = view.questionnaire.expect("questionnaire populated");
        assert_eq!(questionnaire.question_index, 0);
        assert_eq!(questionnaire.total_questions, 15);
        assert_eq!(questionnaire.current_answer, Some(2));
        assert_eq!(questionnaire.answered.len(), 1);
        assert_eq!(questionnaire.options.len(), 4);

        let view = service.jump_to(&id, 14).expect("index in range");
        let questionnaire = view.questionnaire.expect("questionnaire populated");
        assert!(questionnaire.is_last_question);
        assert!((questionnaire.progress_percent - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_session_is_reported_as_not_found() {
        let service = service();
        let missing = SessionId("eval-999999".into());
        match service.get(&missing) {
            Err(SessionServiceError::Repository(RepositoryError::NotFound)) => {}
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[test]
    fn contract_violation_leaves_the_session_untouched() {
        let service = service();
        let id = service
            .start(Some(ThemeId::Talents))
            .expect("session opens")
            .session_id;
        service
            .submit_company_info(&id, sample_profile())
            .expect("profile complete");

        match service.jump_to(&id, 40) {
            Err(SessionServiceError::Flow(FlowError::Engine(_))) => {}
            other => panic!("expected engine error, got {other:?}"),
        }

        let view = service.get(&id).expect("session still readable");
        let questionnaire = view.questionnaire.expect("questionnaire populated");
        assert_eq!(questionnaire.question_index, 0);
    }

    #[test]
    fn restart_returns_to_theme_selection_with_company_kept() {
        let service = service();
        let id = service
            .start(Some(ThemeId::ClimatSocial))
            .expect("session opens")
            .session_id;
        service
            .submit_company_info(&id, sample_profile())
            .expect("profile complete");
        for _ in 0..15 {
            service.answer(&id, 1).expect("value on scale");
            service.advance(&id).expect("in questionnaire");
        }
        service.complete(&id).expect("at last question");

        let view = service.restart(&id).expect("allowed from results");
        assert_eq!(view.step, FlowStep::ThemeSelection);
        assert!(view.theme_id.is_none());
        assert!(view.results.is_none());
        assert!(view.company.is_some());
    }
}
