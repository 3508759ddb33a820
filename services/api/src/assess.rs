use crate::infra::InMemoryAssessmentRepository;
use chrono::SecondsFormat;
use clap::Args;
use matchvita::assessment::{
    Answer, Assessment, AssessmentEngine, AssessmentService, CategoryInsight, QuestionCatalog,
    UserId,
};
use matchvita::config::AppConfig;
use matchvita::error::AppError;
use serde::Deserialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Respondent identifier stored with the result
    #[arg(long)]
    pub(crate) user_id: String,
    /// JSON file holding the answers, either a bare array or `{"answers": [...]}`
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Print the full result as JSON instead of a text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AnswersFile {
    Bare(Vec<Answer>),
    Wrapped { answers: Vec<Answer> },
}

impl AnswersFile {
    fn into_answers(self) -> Vec<Answer> {
        match self {
            AnswersFile::Bare(answers) | AnswersFile::Wrapped { answers } => answers,
        }
    }
}

pub(crate) fn run_assessment(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        user_id,
        answers,
        json,
    } = args;

    let config = AppConfig::load()?;
    let engine = Arc::new(AssessmentEngine::from_config(&config.catalog)?);
    let answers = load_answers(&answers)?;

    let service = AssessmentService::new(
        engine,
        Arc::new(InMemoryAssessmentRepository::default()),
    );
    let assessment = service.submit(UserId(user_id), answers)?;
    let insights = service.insights(&assessment);

    if json {
        let payload = json!({ "assessment": assessment, "insights": insights });
        let rendered = serde_json::to_string_pretty(&payload).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        render_assessment(&assessment, &insights);
    }

    Ok(())
}

pub(crate) fn run_questions() -> Result<(), AppError> {
    let catalog = QuestionCatalog::standard();
    println!(
        "Health assessment quiz ({} questions, options scored 1-{})",
        catalog.len(),
        catalog.max_option_score()
    );

    for question in catalog.questions() {
        println!(
            "\n{}. [{}] {} ({})",
            question.order,
            question.category.label(),
            question.text,
            question.id
        );
        for option in &question.options {
            println!("   {} = {}", option.score, option.text);
        }
    }

    Ok(())
}

pub(crate) fn load_answers(path: &Path) -> Result<Vec<Answer>, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let parsed: AnswersFile = serde_json::from_str(&raw).map_err(std::io::Error::from)?;
    Ok(parsed.into_answers())
}

pub(crate) fn render_assessment(assessment: &Assessment, insights: &[CategoryInsight]) {
    let evaluation = &assessment.evaluation;
    println!(
        "Health assessment {} for {} (completed {})",
        assessment.id.0,
        assessment.user_id.0,
        assessment
            .completed_at
            .to_rfc3339_opts(SecondsFormat::Secs, true)
    );
    println!(
        "Overall: {}/100 ({})",
        evaluation.overall_score,
        evaluation.overall_level.label()
    );

    println!("\nCategory scores");
    for insight in insights {
        println!(
            "- {}: {}/100 ({})",
            insight.category_label, insight.score, insight.level_label
        );
        println!("  {}", insight.description);
        println!("  Advice: {}", insight.advice);
        if !insight.items.is_empty() {
            let names: Vec<&str> = insight.items.iter().map(|item| item.name.as_str()).collect();
            println!("  Suggested: {}", names.join(", "));
        }
    }

    if evaluation.recommendations.is_empty() {
        println!("\nRecommendations: none");
        return;
    }

    println!("\nRecommendations");
    for recommendation in &evaluation.recommendations {
        match recommendation.trigger {
            Some(trigger) => println!(
                "- {} [{}] rated {:.1}, for {} (level {})",
                recommendation.name,
                recommendation.kind.label(),
                recommendation.rating,
                trigger.category.label(),
                trigger.level.number()
            ),
            None => println!(
                "- {} [{}] rated {:.1}, top rated",
                recommendation.name,
                recommendation.kind.label(),
                recommendation.rating
            ),
        }
    }
}
