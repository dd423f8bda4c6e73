use anyhow::{Context, Result};
use dotenvy::dotenv;
use grader_api::config::Config;
use grader_api::grade::Grader;
use grader_api::registry::QuestionRegistry;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, registry, EnvFilter};

pub struct InitFromEnv {
    pub grader: Grader,
}

pub fn init_from_env() -> Result<InitFromEnv> {
    init_with_questions(QuestionRegistry::new())
}

/// Local-mode processes pass the registry their course content declares;
/// remote processes never look at it.
pub fn init_with_questions(questions: QuestionRegistry) -> Result<InitFromEnv> {
    let _ = dotenv();

    let config = Config::from_env().context("could not discover grading configuration")?;
    let grader = Grader::from_parts(config, questions)?;

    Ok(InitFromEnv { grader })
}

pub fn init_tracing() {
    registry()
        .with(fmt::layer().event_format(format().pretty()))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env()
                .unwrap(),
        )
        .init();
}
