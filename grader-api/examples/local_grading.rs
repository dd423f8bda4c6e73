//! Scores a closure against a locally declared question set, no network
//! involved. Run with `cargo run --example local_grading`.

use anyhow::Result;
use grader_api::config::{ClientMode, Config, DEFAULT_BASE_URL};
use grader_api::grade::Grader;
use grader_api::question::{Question, QuestionName, TestCase};
use grader_api::registry::{QuestionRegistry, QuestionSet};
use grader_api::scorer::Scorer;
use grader_api::types::TypeTag;
use serde_json::{json, Map, Value};
use url::Url;

fn stats_questions() -> Result<QuestionRegistry> {
    let mean_cases = vec![
        TestCase::new(vec![json!([1.0, 2.0, 3.0])], Map::new(), TypeTag::new("float"))
            .with_answer(json!(2.0)),
        TestCase::new(vec![json!([10.0, 20.0])], Map::new(), TypeTag::new("float"))
            .with_answer(json!(15.0)),
    ];
    let mean = Question::new(
        QuestionName::new("stats__mean"),
        mean_cases,
        Scorer::NumericTolerance { tolerance: 1e-6 },
    );

    let mut registry = QuestionRegistry::new();
    registry.register(QuestionSet::new("stats", vec![mean]))?;
    Ok(registry)
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::new(
        Url::parse(DEFAULT_BASE_URL)?,
        "unused-in-local-mode".to_owned(),
        ClientMode::Local,
    );
    let grader = Grader::from_parts(config, stats_questions()?)?;

    let mean = |args: &[Value], _kwargs: &Map<String, Value>| {
        let xs = args[0].as_array().unwrap();
        let sum: f64 = xs.iter().filter_map(Value::as_f64).sum();
        json!(sum / xs.len() as f64)
    };

    grader
        .score_and_report(&QuestionName::new("stats__mean"), &mean)
        .await;

    Ok(())
}
