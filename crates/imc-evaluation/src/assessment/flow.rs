use serde::{Deserialize, Serialize};

use super::catalog::ThemeCatalog;
use super::engine::{EngineError, QuestionnaireEngine, QuestionnaireOutcome};
use super::domain::ThemeId;

/// The four wizard steps of an evaluation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlowStep {
    ThemeSelection,
    CompanyInfo,
    Questionnaire,
    Results,
}

impl FlowStep {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::ThemeSelection,
            Self::CompanyInfo,
            Self::Questionnaire,
            Self::Results,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ThemeSelection => "Thème",
            Self::CompanyInfo => "Entreprise",
            Self::Questionnaire => "Questions",
            Self::Results => "Résultats",
        }
    }
}

/// Identification details captured before the questionnaire. Fields are
/// free text, checked for presence only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub name: String,
    pub domain: String,
    pub phone: String,
    pub email: String,
    pub location: String,
    pub objective: String,
}

impl CompanyProfile {
    fn required_fields(&self) -> [(&'static str, &str); 6] {
        [
            ("name", &self.name),
            ("domain", &self.domain),
            ("phone", &self.phone),
            ("email", &self.email),
            ("location", &self.location),
            ("objective", &self.objective),
        ]
    }

    pub fn validate(&self) -> Result<(), FlowError> {
        for (field, value) in self.required_fields() {
            if value.trim().is_empty() {
                return Err(FlowError::MissingField { field });
            }
        }
        Ok(())
    }
}

/// State-machine value object sequencing the wizard and carrying all
/// cross-step state. Views read from it; every mutation goes through a
/// named transition.
#[derive(Debug, Clone)]
pub struct EvaluationFlow {
    step: FlowStep,
    theme_id: Option<ThemeId>,
    company: Option<CompanyProfile>,
    questionnaire: Option<QuestionnaireEngine>,
    outcome: Option<QuestionnaireOutcome>,
}

impl Default for EvaluationFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl EvaluationFlow {
    /// Fresh session starting at theme selection.
    pub fn new() -> Self {
        Self {
            step: FlowStep::ThemeSelection,
            theme_id: None,
            company: None,
            questionnaire: None,
            outcome: None,
        }
    }

    /// Deep-link entry: a theme-specific call to action seeds the flow
    /// directly into the company-info step.
    pub fn seeded(theme_id: ThemeId) -> Self {
        Self {
            step: FlowStep::CompanyInfo,
            theme_id: Some(theme_id),
            company: None,
            questionnaire: None,
            outcome: None,
        }
    }

    pub fn step(&self) -> FlowStep {
        self.step
    }

    pub fn theme_id(&self) -> Option<ThemeId> {
        self.theme_id
    }

    pub fn company(&self) -> Option<&CompanyProfile> {
        self.company.as_ref()
    }

    pub fn outcome(&self) -> Option<&QuestionnaireOutcome> {
        self.outcome.as_ref()
    }

    pub fn select_theme(&mut self, theme_id: ThemeId) -> Result<(), FlowError> {
        self.expect_step(FlowStep::ThemeSelection, "select_theme")?;
        self.theme_id = Some(theme_id);
        self.step = FlowStep::CompanyInfo;
        Ok(())
    }

    /// Validates presence of every company field and enters the
    /// questionnaire. The engine is built from the selected theme; progress
    /// from an earlier pass over the same theme is kept, so stepping back to
    /// the info form and returning loses nothing.
    pub fn submit_company_info(
        &mut self,
        catalog: &ThemeCatalog,
        profile: CompanyProfile,
    ) -> Result<(), FlowError> {
        self.expect_step(FlowStep::CompanyInfo, "submit_company_info")?;
        profile.validate()?;

        let theme_id = self.theme_id.ok_or(FlowError::NoThemeSelected)?;
        let theme = catalog
            .theme(theme_id)
            .ok_or_else(|| FlowError::UnknownTheme {
                raw: theme_id.as_str().to_string(),
            })?;

        let stale = self
            .questionnaire
            .as_ref()
            .map_or(true, |engine| engine.theme_id() != theme_id);
        if stale {
            self.questionnaire = Some(QuestionnaireEngine::new(theme)?);
        }

        self.company = Some(profile);
        self.step = FlowStep::Questionnaire;
        Ok(())
    }

    pub fn questionnaire(&self) -> Result<&QuestionnaireEngine, FlowError> {
        self.expect_step(FlowStep::Questionnaire, "questionnaire")?;
        self.questionnaire
            .as_ref()
            .ok_or(FlowError::NoThemeSelected)
    }

    pub fn questionnaire_mut(&mut self) -> Result<&mut QuestionnaireEngine, FlowError> {
        self.expect_step(FlowStep::Questionnaire, "questionnaire")?;
        self.questionnaire
            .as_mut()
            .ok_or(FlowError::NoThemeSelected)
    }

    /// Finalizes the questionnaire and moves to results, storing the score
    /// and answer set.
    pub fn finish_questionnaire(&mut self) -> Result<&QuestionnaireOutcome, FlowError> {
        let engine = self.questionnaire_mut()?;
        let outcome = engine.complete()?;
        self.outcome = Some(outcome);
        self.step = FlowStep::Results;
        Ok(self.outcome.as_ref().expect("outcome just stored"))
    }

    /// Back from the info form to theme selection. The selected theme and
    /// any entered company details remain until overwritten.
    pub fn change_theme(&mut self) -> Result<(), FlowError> {
        self.expect_step(FlowStep::CompanyInfo, "change_theme")?;
        self.step = FlowStep::ThemeSelection;
        Ok(())
    }

    /// Back from the questionnaire to the info form; discards nothing.
    pub fn back_to_company_info(&mut self) -> Result<(), FlowError> {
        self.expect_step(FlowStep::Questionnaire, "back_to_company_info")?;
        self.step = FlowStep::CompanyInfo;
        Ok(())
    }

    /// From results back to theme selection for a fresh evaluation: clears
    /// the theme, answer set, and score. Company details are deliberately
    /// kept as a pre-fill for the next run.
    pub fn restart(&mut self) -> Result<(), FlowError> {
        self.expect_step(FlowStep::Results, "restart")?;
        self.step = FlowStep::ThemeSelection;
        self.theme_id = None;
        self.questionnaire = None;
        self.outcome = None;
        Ok(())
    }

    fn expect_step(&self, expected: FlowStep, action: &'static str) -> Result<(), FlowError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(FlowError::InvalidTransition {
                action,
                from: self.step,
            })
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("required field '{field}' is missing")]
    MissingField { field: &'static str },
    #[error("unknown theme id '{raw}'")]
    UnknownTheme { raw: String },
    #[error("no theme selected for this session")]
    NoThemeSelected,
    #[error("action '{action}' is not allowed from step {from:?}")]
    InvalidTransition {
        action: &'static str,
        from: FlowStep,
    },
    #[error(transparent)]
    Engine(#[from] EngineError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ThemeCatalog {
        ThemeCatalog::standard()
    }

    fn sample_profile() -> CompanyProfile {
        CompanyProfile {
            name: "Entreprise ABC".into(),
            domain: "Services".into(),
            phone: "+225 07 00 00 00".into(),
            email: "contact@abc.com".into(),
            location: "Abidjan".into(),
            objective: "Mesurer le climat social avant une réorganisation.".into(),
        }
    }

    fn flow_in_questionnaire(catalog: &ThemeCatalog) -> EvaluationFlow {
        let mut flow = EvaluationFlow::new();
        flow.select_theme(ThemeId::ClimatSocial).expect("fresh flow");
        flow.submit_company_info(catalog, sample_profile())
            .expect("complete profile");
        flow
    }

    #[test]
    fn wizard_walks_the_four_steps_in_order() {
        let catalog = catalog();
        let mut flow = EvaluationFlow::new();
        assert_eq!(flow.step(), FlowStep::ThemeSelection);

        flow.select_theme(ThemeId::ClimatSocial).expect("selectable");
        assert_eq!(flow.step(), FlowStep::CompanyInfo);
        assert_eq!(flow.theme_id(), Some(ThemeId::ClimatSocial));

        flow.submit_company_info(&catalog, sample_profile())
            .expect("complete profile");
        assert_eq!(flow.step(), FlowStep::Questionnaire);

        for _ in 0..15 {
            flow.questionnaire_mut().expect("in questionnaire").answer(3).expect("on scale");
            flow.questionnaire_mut().expect("in questionnaire").advance();
        }
        let outcome = flow.finish_questionnaire().expect("at last question");
        assert_eq!(outcome.total_score, 45);
        assert_eq!(flow.step(), FlowStep::Results);
    }

    #[test]
    fn seeded_flow_skips_theme_selection() {
        let flow = EvaluationFlow::seeded(ThemeId::Leadership);
        assert_eq!(flow.step(), FlowStep::CompanyInfo);
        assert_eq!(flow.theme_id(), Some(ThemeId::Leadership));
    }

    #[test]
    fn blank_company_field_blocks_the_step() {
        let catalog = catalog();
        let mut flow = EvaluationFlow::new();
        flow.select_theme(ThemeId::Performance).expect("selectable");

        let mut profile = sample_profile();
        profile.email = "   ".into();
        match flow.submit_company_info(&catalog, profile) {
            Err(FlowError::MissingField { field }) => assert_eq!(field, "email"),
            other => panic!("expected missing field, got {other:?}"),
        }
        assert_eq!(flow.step(), FlowStep::CompanyInfo, "step must not advance");
    }

    #[test]
    fn transitions_are_rejected_from_the_wrong_step() {
        let mut flow = EvaluationFlow::new();
        match flow.restart() {
            Err(FlowError::InvalidTransition { action, from }) => {
                assert_eq!(action, "restart");
                assert_eq!(from, FlowStep::ThemeSelection);
            }
            other => panic!("expected invalid transition, got {other:?}"),
        }
        assert!(flow.questionnaire().is_err());
    }

    #[test]
    fn backward_navigation_keeps_theme_info_and_progress() {
        let catalog = catalog();
        let mut flow = flow_in_questionnaire(&catalog);

        flow.questionnaire_mut().expect("in questionnaire").answer(4).expect("on scale");
        flow.questionnaire_mut().expect("in questionnaire").advance();

        flow.back_to_company_info().expect("allowed from questionnaire");
        assert_eq!(flow.step(), FlowStep::CompanyInfo);
        assert!(flow.company().is_some());

        flow.change_theme().expect("allowed from company info");
        assert_eq!(flow.step(), FlowStep::ThemeSelection);
        assert_eq!(flow.theme_id(), Some(ThemeId::ClimatSocial));
        assert!(flow.company().is_some(), "entered details are not discarded");

        // Re-selecting the same theme and resubmitting resumes the pass.
        flow.select_theme(ThemeId::ClimatSocial).expect("selectable");
        flow.submit_company_info(&catalog, sample_profile())
            .expect("complete profile");
        let engine = flow.questionnaire().expect("in questionnaire");
        assert_eq!(engine.answered_count(), 1);
        assert_eq!(engine.cursor(), 1);
    }

    #[test]
    fn switching_theme_rebuilds_the_questionnaire() {
        let catalog = catalog();
        let mut flow = flow_in_questionnaire(&catalog);
        flow.questionnaire_mut().expect("in questionnaire").answer(2).expect("on scale");

        flow.back_to_company_info().expect("allowed");
        flow.change_theme().expect("allowed");
        flow.select_theme(ThemeId::Talents).expect("selectable");
        flow.submit_company_info(&catalog, sample_profile())
            .expect("complete profile");

        let engine = flow.questionnaire().expect("in questionnaire");
        assert_eq!(engine.theme_id(), ThemeId::Talents);
        assert_eq!(engine.answered_count(), 0, "new theme starts clean");
    }

    #[test]
    fn restart_clears_evaluation_state_but_keeps_company_details() {
        let catalog = catalog();
        let mut flow = flow_in_questionnaire(&catalog);
        for _ in 0..15 {
            flow.questionnaire_mut().expect("in questionnaire").answer(1).expect("on scale");
            flow.questionnaire_mut().expect("in questionnaire").advance();
        }
        flow.finish_questionnaire().expect("at last question");

        flow.restart().expect("allowed from results");
        assert_eq!(flow.step(), FlowStep::ThemeSelection);
        assert_eq!(flow.theme_id(), None);
        assert!(flow.outcome().is_none());
        assert!(flow.company().is_some(), "pre-fill kept for the next run");
    }
}
