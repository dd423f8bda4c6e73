//! Orchestrates a grading call end to end and renders the outcome for the
//! learner.

use std::fmt;

use anyhow::Result;
use tracing::info;

use crate::client::Client;
use crate::config::{ClientMode, Config};
use crate::error::GradeError;
use crate::question::QuestionName;
use crate::registry::QuestionRegistry;
use crate::runner::{run_test_cases, Solution};
use crate::submission::{Score, Submission};

/// Fetches a question's test cases from the scoring service, runs the
/// solution over them, submits the validated results, and decodes the
/// verdict. Validation and lookup failures abort before anything is posted.
pub async fn score(
    client: &Client,
    question_name: &QuestionName,
    solution: &impl Solution,
) -> Result<ScoreReport, GradeError> {
    let test_cases = client.get_test_cases(question_name).await?;
    let results = run_test_cases(solution, &test_cases)?;

    let submission = Submission::new(question_name.clone(), results);
    let score = client.post_submission(&submission).await?;
    info!(%question_name, score = %score.score(), "submission scored");

    Ok(ScoreReport::new(question_name.clone(), score))
}

/// Scores entirely in-process against the registry. Runs and validates every
/// test case, but only the final case's result is compared against its
/// recorded answer; remote mode scores the full submission.
pub fn local_score(
    registry: &QuestionRegistry,
    question_name: &QuestionName,
    solution: &impl Solution,
) -> Result<ScoreReport, GradeError> {
    let question = registry.resolve(question_name)?;
    let results = run_test_cases(solution, question.test_cases())?;

    let (final_case, final_result) = match (question.test_cases().last(), results.last()) {
        (Some(case), Some(result)) => (case, result),
        _ => return Err(GradeError::MissingAnswer(question_name.clone())),
    };
    let answer = final_case
        .answer()
        .ok_or_else(|| GradeError::MissingAnswer(question_name.clone()))?;

    let value = question.scorer().score(final_result, answer);
    info!(%question_name, score = %value, "scored locally");

    Ok(ScoreReport::new(
        question_name.clone(),
        Score::new(value, None),
    ))
}

/// The grading entry point notebooks hold on to. Which arm a process gets is
/// decided once, from configuration, at startup.
#[derive(Debug)]
pub enum Grader {
    Remote(Client),
    Local(QuestionRegistry),
}

impl Grader {
    /// Builds whichever mode the configuration selects: a remote client
    /// (`Remote` and `LocalGae` differ only in base URL, decided inside
    /// [`Config`]), or in-process scoring over `registry`.
    pub fn from_parts(config: Config, registry: QuestionRegistry) -> Result<Self> {
        match config.mode() {
            ClientMode::Local => Ok(Self::Local(registry)),
            ClientMode::Remote | ClientMode::LocalGae => Ok(Self::Remote(Client::new(config)?)),
        }
    }

    /// Environment-driven construction with an empty registry; local-mode
    /// processes that declare questions use [`Grader::from_parts`].
    pub fn from_env() -> Result<Self> {
        Self::from_parts(Config::from_env()?, QuestionRegistry::new())
    }

    pub async fn score(
        &self,
        question_name: &QuestionName,
        solution: &impl Solution,
    ) -> Result<ScoreReport, GradeError> {
        match self {
            Self::Remote(client) => score(client, question_name, solution).await,
            Self::Local(registry) => local_score(registry, question_name, solution),
        }
    }

    /// Notebook-facing wrapper: renders the outcome instead of returning it,
    /// so a grading failure never tears down the calling session.
    pub async fn score_and_report(&self, question_name: &QuestionName, solution: &impl Solution) {
        match self.score(question_name, solution).await {
            Ok(report) => println!("{report}"),
            Err(error) => println!("{}", FailureReport::new(&error)),
        }
    }
}

const BANNER: &str = "==================";

/// A scored run, rendered the way learners see it in their notebooks.
#[derive(Debug, Clone)]
pub struct ScoreReport {
    question_name: QuestionName,
    score: Score,
}

impl ScoreReport {
    pub fn new(question_name: QuestionName, score: Score) -> Self {
        Self {
            question_name,
            score,
        }
    }

    pub fn question_name(&self) -> &QuestionName {
        &self.question_name
    }

    pub fn score(&self) -> &Score {
        &self.score
    }
}

impl fmt::Display for ScoreReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{BANNER}")?;
        writeln!(f, "Your score: {}", self.score.score())?;
        if let Some(error_msg) = self.score.error_msg() {
            writeln!(f, "{error_msg}")?;
        }
        write!(f, "{BANNER}")
    }
}

/// Human-readable rendering of a failed grading call, one shape per error
/// kind.
#[derive(Debug)]
pub struct FailureReport<'a> {
    error: &'a GradeError,
}

impl<'a> FailureReport<'a> {
    pub fn new(error: &'a GradeError) -> Self {
        Self { error }
    }
}

const STAFF_NOTICE: &str =
    "There was an error. Please send this output to a course staff member.";

impl fmt::Display for FailureReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.error {
            GradeError::Lookup(question_name) => {
                write!(f, "No question found: {question_name}")
            }
            GradeError::Decode { raw, detail } => {
                writeln!(f, "{STAFF_NOTICE}")?;
                writeln!(f, "{detail}")?;
                writeln!(f, "{}", "-".repeat(20))?;
                writeln!(f, "{raw}")?;
                write!(f, "{STAFF_NOTICE}")
            }
            GradeError::Transport(source) => {
                write!(f, "{}: {source}", self.error)
            }
            other => write!(f, "{other}"),
        }
    }
}
