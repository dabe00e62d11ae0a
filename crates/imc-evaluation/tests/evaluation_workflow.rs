//! Integration specifications for the evaluation wizard.
//!
//! Scenarios exercise end-to-end behavior through the public session service
//! and HTTP router so the catalog, engine, flow, and interpreter are
//! validated together without reaching into private modules.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use imc_evaluation::assessment::flow::CompanyProfile;
    use imc_evaluation::assessment::sessions::{
        EvaluationSessionService, RepositoryError, SessionId, SessionRecord, SessionRepository,
    };
    use imc_evaluation::assessment::ThemeCatalog;

    #[derive(Default)]
    pub(super) struct MemoryRepository {
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

    pub(super) fn build_service() -> EvaluationSessionService<MemoryRepository> {
        EvaluationSessionService::new(
            Arc::new(ThemeCatalog::standard()),
            Arc::new(MemoryRepository::default()),
        )
    }

    pub(super) fn company_profile() -> CompanyProfile {
        CompanyProfile {
            name: "Entreprise ABC".to_string(),
            domain: "Services".to_string(),
            phone: "+225 07 00 00 00".to_string(),
            email: "contact@abc.com".to_string(),
            location: "Abidjan".to_string(),
            objective: "Mesurer le climat social avant une réorganisation.".to_string(),
        }
    }
}

mod service_flow {
    use super::common::*;
    use imc_evaluation::assessment::{FlowStep, ThemeId};

    #[test]
    fn each_answer_value_yields_the_expected_diagnosis() {
        // 15 questions at a uniform value: 15 -> Critique, 30 -> Fragile,
        // 45 -> Stable, 60 -> Performant.
        let expectations = [
            (1u8, 15u16, "Critique"),
            (2, 30, "Fragile"),
            (3, 45, "Stable"),
            (4, 60, "Performant"),
        ];

        for (value, expected_total, expected_label) in expectations {
            let service = build_service();
            let id = service
                .start(Some(ThemeId::ClimatSocial))
                .expect("session opens")
                .session_id;
            service
                .submit_company_info(&id, company_profile())
                .expect("profile complete");

            for _ in 0..15 {
                service.answer(&id, value).expect("value on scale");
                service.advance(&id).expect("in questionnaire");
            }
            let view = service.complete(&id).expect("at last question");
            let results = view.results.expect("results populated");

            assert_eq!(results.total_score, expected_total);
            assert_eq!(results.range_label, expected_label);
        }
    }

    #[test]
    fn progress_is_preserved_across_backward_navigation() {
        let service = build_service();
        let id = service
            .start(Some(ThemeId::Leadership))
            .expect("session opens")
            .session_id;
        service
            .submit_company_info(&id, company_profile())
            .expect("profile complete");

        for _ in 0..4 {
            service.answer(&id, 3).expect("value on scale");
            service.advance(&id).expect("in questionnaire");
        }

        let view = service
            .back_to_company_info(&id)
            .expect("allowed from questionnaire");
        assert_eq!(view.step, FlowStep::CompanyInfo);

        let view = service
            .submit_company_info(&id, company_profile())
            .expect("profile still complete");
        let questionnaire = view.questionnaire.expect("questionnaire populated");
        assert_eq!(questionnaire.question_index, 4);
        assert_eq!(questionnaire.answered.len(), 4);
    }

    #[test]
    fn changing_theme_resets_only_the_questionnaire() {
        let service = build_service();
        let id = service
            .start(Some(ThemeId::Performance))
            .expect("session opens")
            .session_id;
        service
            .submit_company_info(&id, company_profile())
            .expect("profile complete");
        service.answer(&id, 2).expect("value on scale");

        service
            .back_to_company_info(&id)
            .expect("allowed from questionnaire");
        service.change_theme(&id).expect("allowed from company info");
        service
            .select_theme(&id, ThemeId::Organisation)
            .expect("theme selectable");
        let view = service
            .submit_company_info(&id, company_profile())
            .expect("profile complete");

        let questionnaire = view.questionnaire.expect("questionnaire populated");
        assert_eq!(questionnaire.question_index, 0);
        assert!(questionnaire.answered.is_empty(), "new theme starts clean");
        assert!(view.company.is_some(), "company details survive the switch");
    }

    #[test]
    fn restart_supports_a_second_full_evaluation() {
        let service = build_service();
        let id = service
            .start(Some(ThemeId::Talents))
            .expect("session opens")
            .session_id;
        service
            .submit_company_info(&id, company_profile())
            .expect("profile complete");
        for _ in 0..15 {
            service.answer(&id, 4).expect("value on scale");
            service.advance(&id).expect("in questionnaire");
        }
        service.complete(&id).expect("at last question");

        let view = service.restart(&id).expect("allowed from results");
        assert_eq!(view.step, FlowStep::ThemeSelection);
        assert!(view.company.is_some(), "pre-fill kept after restart");

        service
            .select_theme(&id, ThemeId::ClimatSocial)
            .expect("theme selectable");
        service
            .submit_company_info(&id, company_profile())
            .expect("profile complete");
        for _ in 0..15 {
            service.answer(&id, 1).expect("value on scale");
            service.advance(&id).expect("in questionnaire");
        }
        let view = service.complete(&id).expect("at last question");
        let results = view.results.expect("results populated");
        assert_eq!(results.theme_id, ThemeId::ClimatSocial);
        assert_eq!(results.total_score, 15);
        assert_eq!(results.range_label, "Critique");
    }

    #[test]
    fn sessions_are_isolated_from_each_other() {
        let service = build_service();
        let first = service
            .start(Some(ThemeId::ClimatSocial))
            .expect("session opens")
            .session_id;
        let second = service
            .start(Some(ThemeId::ClimatSocial))
            .expect("session opens")
            .session_id;
        assert_ne!(first, second);

        service
            .submit_company_info(&first, company_profile())
            .expect("profile complete");
        service.answer(&first, 4).expect("value on scale");

        let untouched = service.get(&second).expect("second session readable");
        assert_eq!(untouched.step, FlowStep::CompanyInfo);
        assert!(untouched.questionnaire.is_none());
    }
}

mod http_surface {
    use super::common::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use imc_evaluation::assessment::sessions::session_router;

    fn router() -> axum::Router {
        session_router(Arc::new(build_service()))
    }

    async fn call(
        router: &axum::Router,
        method: &str,
        uri: &str,
        body: Value,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request builds");
        let response = router
            .clone()
            .oneshot(request)
            .await
            .expect("route executes");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        let value = serde_json::from_slice(&bytes).expect("json payload");
        (status, value)
    }

    fn profile_payload() -> Value {
        json!({
            "name": "Entreprise ABC",
            "domain": "Services",
            "phone": "+225 07 00 00 00",
            "email": "contact@abc.com",
            "location": "Abidjan",
            "objective": "Mesurer le climat social.",
        })
    }

    #[tokio::test]
    async fn a_session_can_be_driven_to_results_over_http() {
        let router = router();
        let (status, opened) = call(
            &router,
            "POST",
            "/api/v1/evaluations",
            json!({ "theme": "organisation" }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = opened["session_id"].as_str().expect("id present");
        let base = format!("/api/v1/evaluations/{id}");

        let (status, view) = call(&router, "POST", &format!("{base}/company"), profile_payload()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["questionnaire"]["question_index"], 0);
        assert_eq!(view["questionnaire"]["options"].as_array().expect("options").len(), 4);

        for _ in 0..15 {
            call(&router, "POST", &format!("{base}/answer"), json!({ "value": 4 })).await;
            call(&router, "POST", &format!("{base}/advance"), json!({})).await;
        }

        let (status, view) = call(&router, "POST", &format!("{base}/complete"), json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["results"]["total_score"], 60);
        assert_eq!(view["results"]["range_label"], "Agile & Performante");
        assert_eq!(view["results"]["gauge_percent"], 100.0);
        assert!(view["results"]["notice"]
            .as_str()
            .expect("notice present")
            .contains("première analyse indicative"));
    }

    #[tokio::test]
    async fn quick_navigation_and_reanswering_work_over_http() {
        let router = router();
        let (_, opened) = call(
            &router,
            "POST",
            "/api/v1/evaluations",
            json!({ "theme": "climat-social" }),
        )
        .await;
        let id = opened["session_id"].as_str().expect("id present");
        let base = format!("/api/v1/evaluations/{id}");
        call(&router, "POST", &format!("{base}/company"), profile_payload()).await;

        call(&router, "POST", &format!("{base}/answer"), json!({ "value": 1 })).await;
        let (_, view) = call(&router, "POST", &format!("{base}/answer"), json!({ "value": 4 })).await;
        assert_eq!(view["questionnaire"]["current_answer"], 4);
        assert_eq!(view["questionnaire"]["answered"].as_array().expect("ids").len(), 1);

        let (status, view) = call(&router, "POST", &format!("{base}/goto"), json!({ "index": 14 })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["questionnaire"]["is_last_question"], true);

        let (status, _) = call(&router, "POST", &format!("{base}/goto"), json!({ "index": 15 })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, view) = call(&router, "POST", &format!("{base}/retreat"), json!({})).await;
        assert_eq!(view["questionnaire"]["question_index"], 13);
    }

    #[tokio::test]
    async fn completing_away_from_the_last_question_is_rejected() {
        let router = router();
        let (_, opened) = call(
            &router,
            "POST",
            "/api/v1/evaluations",
            json!({ "theme": "talents" }),
        )
        .await;
        let id = opened["session_id"].as_str().expect("id present");
        let base = format!("/api/v1/evaluations/{id}");
        call(&router, "POST", &format!("{base}/company"), profile_payload()).await;

        let (status, body) = call(&router, "POST", &format!("{base}/complete"), json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]
            .as_str()
            .expect("error present")
            .contains("completion requires the last question"));
    }
}
