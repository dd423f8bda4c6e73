use std::time::Duration;

use anyhow::Result;
use reqwest::Client as HttpClient;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::GradeError;
use crate::question::{QuestionName, TestCase};
use crate::submission::{Score, Submission};
use crate::util::{api_url, test_cases_path, SUBMISSION_PATH};

/// HTTP client for the remote scoring service. One request in flight at a
/// time, no retries: a failed call is a terminal, reported outcome.
#[derive(Debug)]
pub struct Client {
    http: HttpClient,
    config: Config,
}

impl Client {
    pub fn from_env() -> Result<Self> {
        let config = Config::from_env()?;
        Client::new(config)
    }

    pub fn new(config: Config) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetches the ordered test-case list for a question. Any non-success
    /// status means the service has no such question; that is a lookup
    /// failure, not retried, and nothing will be submitted.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn get_test_cases(
        &self,
        question_name: &QuestionName,
    ) -> Result<Vec<TestCase>, GradeError> {
        let url = api_url(
            self.config.base_url(),
            &test_cases_path(question_name),
            self.config.api_key(),
        )?;
        info!(%question_name, "fetching test cases");

        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            warn!(status = %response.status(), %question_name, "service has no such question");
            return Err(GradeError::Lookup(question_name.clone()));
        }

        let test_cases = response.json().await?;
        Ok(test_cases)
    }

    /// Posts an encoded submission and decodes the service's verdict. A
    /// non-success status or a dropped connection surfaces as a transport
    /// error; a 200 whose body does not parse surfaces as a decode error
    /// carrying the raw body.
    #[tracing::instrument(level = "debug", skip(self, submission))]
    pub async fn post_submission(&self, submission: &Submission) -> Result<Score, GradeError> {
        let url = api_url(
            self.config.base_url(),
            SUBMISSION_PATH,
            self.config.api_key(),
        )?;
        info!(question_name = %submission.question_name(), "submitting results");

        let form = [("submission", submission.encode())];
        let response = self.http.post(url).form(&form).send().await?;
        if let Err(status_err) = response.error_for_status_ref() {
            warn!(status = %response.status(), "service rejected the submission");
            return Err(GradeError::Transport(status_err));
        }

        let raw = response.text().await?;
        Score::decode(&raw)
    }
}
