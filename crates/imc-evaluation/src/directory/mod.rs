//! Back-office data model: completed-evaluation records, registered
//! companies, and the dashboard aggregates, together with the filtering
//! rules the admin screens apply to them.

use chrono::NaiveDate;
use serde::Serialize;

use crate::assessment::domain::{ScoreBand, ThemeId};

/// Rows shown per page in the back-office evaluation list.
pub const PAGE_SIZE: usize = 5;

/// One completed evaluation as the back office sees it.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationRecord {
    pub id: String,
    pub company: String,
    pub theme_id: ThemeId,
    pub score: u16,
    pub date: NaiveDate,
    pub email: String,
    pub phone: String,
    pub location: String,
}

impl EvaluationRecord {
    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_total(self.score)
    }
}

/// A company registered on the platform.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyRecord {
    pub id: String,
    pub name: String,
    pub domain: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub evaluations: u32,
    pub last_evaluation: NaiveDate,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
}

/// Headline figure on the dashboard, with its period-over-period change.
#[derive(Debug, Clone, Serialize)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
    pub change: &'static str,
    pub trend: Trend,
}

/// Evaluations completed in one month, for the evolution chart.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyCount {
    pub month: &'static str,
    pub evaluations: u32,
}

/// Share of evaluations run against one theme, in percent.
#[derive(Debug, Clone, Serialize)]
pub struct ThemeShare {
    pub theme_id: ThemeId,
    pub percent: u8,
}

/// Latest completions surfaced on the dashboard, with a relative date
/// as the screens display it.
#[derive(Debug, Clone, Serialize)]
pub struct RecentEvaluation {
    pub company: String,
    pub theme_id: ThemeId,
    pub score: u16,
    pub completed: String,
}

/// Everything the dashboard screen renders in one payload.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub stats: Vec<StatCard>,
    pub monthly: Vec<MonthlyCount>,
    pub theme_shares: Vec<ThemeShare>,
    pub recent: Vec<RecentEvaluation>,
}

/// Source of back-office data. The service ships with a static fixture
/// set; a persistent implementation can slot in behind the same trait.
pub trait DirectoryProvider: Send + Sync {
    fn dashboard(&self) -> DashboardSnapshot;
    fn evaluations(&self) -> Vec<EvaluationRecord>;
    fn companies(&self) -> Vec<CompanyRecord>;
}

/// Filter set accepted by the evaluation list. All criteria combine
/// conjunctively; pages are numbered from 1.
#[derive(Debug, Clone, Default)]
pub struct EvaluationQuery {
    pub search: Option<String>,
    pub theme: Option<ThemeId>,
    pub band: Option<ScoreBand>,
    pub page: usize,
}

/// One page of filtered results plus the pagination frame around it.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Applies search, theme, and level filters, then cuts the requested
/// page. The search term matches company name or email, case-insensitive.
pub fn filter_evaluations(
    records: Vec<EvaluationRecord>,
    query: &EvaluationQuery,
) -> Page<EvaluationRecord> {
    let needle = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase);

    let filtered: Vec<EvaluationRecord> = records
        .into_iter()
        .filter(|record| {
            let matches_search = needle.as_deref().map_or(true, |term| {
                record.company.to_lowercase().contains(term)
                    || record.email.to_lowercase().contains(term)
            });
            let matches_theme = query.theme.map_or(true, |theme| record.theme_id == theme);
            let matches_band = query.band.map_or(true, |band| record.band() == band);
            matches_search && matches_theme && matches_band
        })
        .collect();

    paginate(filtered, query.page)
}

/// Matches companies on name, email, or business domain.
pub fn search_companies(records: Vec<CompanyRecord>, search: Option<&str>) -> Vec<CompanyRecord> {
    let Some(term) = search
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase)
    else {
        return records;
    };

    records
        .into_iter()
        .filter(|company| {
            company.name.to_lowercase().contains(&term)
                || company.email.to_lowercase().contains(&term)
                || company.domain.to_lowercase().contains(&term)
        })
        .collect()
}

fn paginate<T>(items: Vec<T>, page: usize) -> Page<T> {
    let total_items = items.len();
    let total_pages = total_items.div_ceil(PAGE_SIZE).max(1);
    let page = page.clamp(1, total_pages);

    let start = (page - 1) * PAGE_SIZE;
    let items: Vec<T> = items
        .into_iter()
        .skip(start)
        .take(PAGE_SIZE)
        .collect();

    Page {
        items,
        page,
        total_pages,
        total_items,
    }
}
