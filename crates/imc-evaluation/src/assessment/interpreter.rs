use super::domain::{ScoreRange, Theme};

/// Fixed display domain of the results gauge. Independent of each theme's
/// actual range boundaries; used only for the visual bar.
pub const GAUGE_MIN: u16 = 15;
pub const GAUGE_MAX: u16 = 60;

/// Threshold marks rendered under the gauge.
pub const SCORE_MARKERS: [u16; 5] = [15, 30, 40, 50, 60];

/// Advisory shown with every results payload.
pub const ADVISORY_NOTICE: &str = "Les résultats fournis par cet outil constituent une première analyse indicative et ne remplacent pas un audit ou un diagnostic approfondi réalisé par un professionnel d'IMC.";

/// Resolves a total score to the first matching range of the theme.
///
/// A well-formed theme partitions its legal score domain, so exactly one
/// range matches any total the engine can produce. Should a total land
/// outside every range, the first range is served instead of failing the
/// request; the miss is logged so the data problem stays observable.
///
/// Panics if the theme has no ranges at all, which catalog validation
/// rules out before any questionnaire runs.
pub fn resolve<'a>(theme: &'a Theme, score: u16) -> &'a ScoreRange {
    theme
        .ranges
        .iter()
        .find(|range| range.contains(score))
        .unwrap_or_else(|| {
            tracing::warn!(
                theme = %theme.id,
                score,
                "total score outside every configured range; falling back to the first range"
            );
            &theme.ranges[0]
        })
}

/// Linear position of a score within the fixed gauge domain, in percent.
pub fn gauge_percent(score: u16) -> f64 {
    (score as f64 - GAUGE_MIN as f64) / (GAUGE_MAX - GAUGE_MIN) as f64 * 100.0
}
