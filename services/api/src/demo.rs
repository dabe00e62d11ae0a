use clap::Args;
use imc_evaluation::assessment::{
    answer_options, gauge_percent, resolve, CompanyProfile, EvaluationFlow, ScoreBand,
    ThemeCatalog, ThemeId, ADVISORY_NOTICE,
};
use imc_evaluation::error::AppError;

#[derive(Args, Debug, Default)]
pub(crate) struct ThemeListArgs {
    /// Include the score ranges of each theme in the listing
    #[arg(long)]
    pub(crate) ranges: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Theme to evaluate (defaults to climat-social)
    #[arg(long)]
    pub(crate) theme: Option<String>,
    /// Fixed answer value (1-4) applied to every question instead of the
    /// scripted mix
    #[arg(long)]
    pub(crate) answer: Option<u8>,
}

pub(crate) fn run_theme_list(args: ThemeListArgs) -> Result<(), AppError> {
    let catalog = ThemeCatalog::standard();
    catalog.validate()?;

    println!("Evaluation themes");
    for theme in catalog.themes() {
        let (min, max) = theme.score_domain();
        println!(
            "- {} | {} | {} questions | scores {}-{}",
            theme.id,
            theme.title,
            theme.question_count(),
            min,
            max
        );
        if args.ranges {
            for range in &theme.ranges {
                println!("    {}-{}: {}", range.min, range.max, range.label);
            }
        }
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let catalog = ThemeCatalog::standard();
    catalog.validate()?;

    let theme_id = match args.theme.as_deref() {
        Some(raw) => match ThemeId::parse(raw) {
            Some(theme_id) => theme_id,
            None => {
                println!("Unknown theme '{raw}'; run `themes list` to see the catalog");
                return Ok(());
            }
        },
        None => ThemeId::ClimatSocial,
    };

    println!("Evaluation demo");

    let mut flow = EvaluationFlow::new();
    if let Err(err) = flow.select_theme(theme_id) {
        println!("  Theme selection rejected: {err}");
        return Ok(());
    }

    let profile = demo_company_profile();
    println!(
        "- {} ({}) evaluating '{}'",
        profile.name,
        profile.location,
        theme_id.as_str()
    );
    if let Err(err) = flow.submit_company_info(&catalog, profile) {
        println!("  Company info rejected: {err}");
        return Ok(());
    }

    // Scripted answer mix landing mid-scale unless a fixed value is given.
    let script = [3u8, 4, 2, 3, 3];
    let total_questions = {
        let engine = match flow.questionnaire() {
            Ok(engine) => engine,
            Err(err) => {
                println!("  Questionnaire unavailable: {err}");
                return Ok(());
            }
        };
        engine.question_count()
    };

    for index in 0..total_questions {
        let value = args.answer.unwrap_or(script[index % script.len()]);
        let engine = match flow.questionnaire_mut() {
            Ok(engine) => engine,
            Err(err) => {
                println!("  Questionnaire unavailable: {err}");
                return Ok(());
            }
        };
        let question = engine.current_question().clone();
        if let Err(err) = engine.answer(value) {
            println!("  Answer rejected: {err}");
            return Ok(());
        }
        println!(
            "  [{}] {} -> {}",
            question.id.0,
            question.text,
            option_label(value)
        );
        if index + 1 < total_questions {
            engine.advance();
        }
    }

    let outcome = match flow.finish_questionnaire() {
        Ok(outcome) => outcome.clone(),
        Err(err) => {
            println!("  Completion rejected: {err}");
            return Ok(());
        }
    };

    let theme = catalog
        .theme(theme_id)
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "theme missing"))?;
    let range = resolve(theme, outcome.total_score);
    let band = ScoreBand::from_total(outcome.total_score);

    println!("\nResults for {}", theme.title);
    println!(
        "- Score {}/60 ({}) | gauge {:.0}%",
        outcome.total_score,
        band.label(),
        gauge_percent(outcome.total_score)
    );
    println!("- Diagnosis: {} ({}-{})", range.label, range.min, range.max);
    println!("- Analysis: {}", range.analysis);
    println!("- Recommendations:");
    for recommendation in &range.recommendations {
        println!("    - {recommendation}");
    }
    println!("\n{ADVISORY_NOTICE}");

    Ok(())
}

fn demo_company_profile() -> CompanyProfile {
    CompanyProfile {
        name: "Entreprise ABC".to_string(),
        domain: "Services".to_string(),
        phone: "+225 07 00 00 00".to_string(),
        email: "contact@abc.com".to_string(),
        location: "Abidjan".to_string(),
        objective: "Obtenir une première lecture du climat social.".to_string(),
    }
}

fn option_label(value: u8) -> &'static str {
    answer_options()
        .iter()
        .find(|option| option.value == value)
        .map(|option| option.label)
        .unwrap_or("?")
}
