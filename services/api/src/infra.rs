use chrono::NaiveDate;
use imc_evaluation::assessment::sessions::{
    RepositoryError, SessionId, SessionRecord, SessionRepository,
};
use imc_evaluation::assessment::ThemeId;
use imc_evaluation::directory::{
    CompanyRecord, DashboardSnapshot, DirectoryProvider, EvaluationRecord, MonthlyCount,
    RecentEvaluation, StatCard, ThemeShare, Trend,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemorySessionRepository {
    records: Arc<Mutex<HashMap<SessionId, SessionRecord>>>,
}

impl SessionRepository for InMemorySessionRepository {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: SessionRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            guard.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

/// Back-office data source serving a fixed fixture set, standing in for
/// the persistence layer until one exists.
#[derive(Default, Clone)]
pub(crate) struct StaticDirectory;

fn fixture_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn evaluation(
    id: &str,
    company: &str,
    theme_id: ThemeId,
    score: u16,
    date: NaiveDate,
    email: &str,
    phone: &str,
    location: &str,
) -> EvaluationRecord {
    EvaluationRecord {
        id: id.to_string(),
        company: company.to_string(),
        theme_id,
        score,
        date,
        email: email.to_string(),
        phone: phone.to_string(),
        location: location.to_string(),
    }
}

impl DirectoryProvider for StaticDirectory {
    fn dashboard(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            stats: vec![
                StatCard {
                    title: "Évaluations totales",
                    value: "1,247".to_string(),
                    change: "+12.5%",
                    trend: Trend::Up,
                },
                StatCard {
                    title: "Entreprises inscrites",
                    value: "328".to_string(),
                    change: "+8.2%",
                    trend: Trend::Up,
                },
                StatCard {
                    title: "Évaluations ce mois",
                    value: "156".to_string(),
                    change: "+23.1%",
                    trend: Trend::Up,
                },
                StatCard {
                    title: "Taux de conversion",
                    value: "34.2%".to_string(),
                    change: "-2.4%",
                    trend: Trend::Down,
                },
            ],
            monthly: vec![
                MonthlyCount { month: "Jan", evaluations: 65 },
                MonthlyCount { month: "Fév", evaluations: 89 },
                MonthlyCount { month: "Mar", evaluations: 102 },
                MonthlyCount { month: "Avr", evaluations: 78 },
                MonthlyCount { month: "Mai", evaluations: 123 },
                MonthlyCount { month: "Juin", evaluations: 156 },
            ],
            theme_shares: vec![
                ThemeShare { theme_id: ThemeId::ClimatSocial, percent: 35 },
                ThemeShare { theme_id: ThemeId::Leadership, percent: 25 },
                ThemeShare { theme_id: ThemeId::Performance, percent: 18 },
                ThemeShare { theme_id: ThemeId::Organisation, percent: 12 },
                ThemeShare { theme_id: ThemeId::Talents, percent: 10 },
            ],
            recent: vec![
                RecentEvaluation {
                    company: "Entreprise ABC".to_string(),
                    theme_id: ThemeId::ClimatSocial,
                    score: 45,
                    completed: "Il y a 2h".to_string(),
                },
                RecentEvaluation {
                    company: "Société XYZ".to_string(),
                    theme_id: ThemeId::Leadership,
                    score: 38,
                    completed: "Il y a 5h".to_string(),
                },
                RecentEvaluation {
                    company: "Groupe Delta".to_string(),
                    theme_id: ThemeId::Performance,
                    score: 52,
                    completed: "Il y a 8h".to_string(),
                },
                RecentEvaluation {
                    company: "Tech Corp".to_string(),
                    theme_id: ThemeId::Organisation,
                    score: 41,
                    completed: "Hier".to_string(),
                },
                RecentEvaluation {
                    company: "Innovate SA".to_string(),
                    theme_id: ThemeId::Talents,
                    score: 55,
                    completed: "Hier".to_string(),
                },
            ],
        }
    }

    fn evaluations(&self) -> Vec<EvaluationRecord> {
        vec![
            evaluation("1", "Entreprise ABC", ThemeId::ClimatSocial, 45, fixture_date(2024, 1, 15), "contact@abc.com", "+225 07 00 00 00", "Abidjan"),
            evaluation("2", "Société XYZ", ThemeId::Leadership, 38, fixture_date(2024, 1, 14), "info@xyz.ci", "+225 05 00 00 00", "Bouaké"),
            evaluation("3", "Groupe Delta", ThemeId::Performance, 52, fixture_date(2024, 1, 14), "contact@delta.com", "+225 01 00 00 00", "Abidjan"),
            evaluation("4", "Tech Corp", ThemeId::Organisation, 41, fixture_date(2024, 1, 13), "hello@techcorp.ci", "+225 27 00 00 00", "Yamoussoukro"),
            evaluation("5", "Innovate SA", ThemeId::Talents, 55, fixture_date(2024, 1, 13), "contact@innovate.com", "+225 07 11 11 11", "Abidjan"),
            evaluation("6", "Global Services", ThemeId::ClimatSocial, 28, fixture_date(2024, 1, 12), "info@global.ci", "+225 05 22 22 22", "San Pedro"),
            evaluation("7", "Future Industries", ThemeId::Leadership, 47, fixture_date(2024, 1, 12), "contact@future.com", "+225 01 33 33 33", "Abidjan"),
            evaluation("8", "Prime Solutions", ThemeId::Performance, 33, fixture_date(2024, 1, 11), "hello@prime.ci", "+225 07 44 44 44", "Korhogo"),
        ]
    }

    fn companies(&self) -> Vec<CompanyRecord> {
        let company = |id: &str,
                       name: &str,
                       domain: &str,
                       email: &str,
                       phone: &str,
                       location: &str,
                       evaluations: u32,
                       last: NaiveDate| CompanyRecord {
            id: id.to_string(),
            name: name.to_string(),
            domain: domain.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            location: location.to_string(),
            evaluations,
            last_evaluation: last,
        };

        vec![
            company("1", "Entreprise ABC", "Services", "contact@abc.com", "+225 07 00 00 00", "Abidjan", 3, fixture_date(2024, 1, 15)),
            company("2", "Société XYZ", "Industrie", "info@xyz.ci", "+225 05 00 00 00", "Bouaké", 1, fixture_date(2024, 1, 14)),
            company("3", "Groupe Delta", "Commerce", "contact@delta.com", "+225 01 00 00 00", "Abidjan", 2, fixture_date(2024, 1, 14)),
            company("4", "Tech Corp", "Technologie", "hello@techcorp.ci", "+225 27 00 00 00", "Yamoussoukro", 1, fixture_date(2024, 1, 13)),
            company("5", "Innovate SA", "Innovation", "contact@innovate.com", "+225 07 11 11 11", "Abidjan", 4, fixture_date(2024, 1, 13)),
            company("6", "Global Services", "Services", "info@global.ci", "+225 05 22 22 22", "San Pedro", 1, fixture_date(2024, 1, 12)),
        ]
    }
}
