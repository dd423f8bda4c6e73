use url::Url;

use crate::question::QuestionName;

pub const TEST_CASES_PATH: &str = "/test_cases";
pub const SUBMISSION_PATH: &str = "/submission";

pub fn test_cases_path(question_name: &QuestionName) -> String {
    format!("{TEST_CASES_PATH}/{question_name}")
}

/// Joins `path` onto the service base URL and appends the authenticating
/// `api_key` query pair.
pub fn api_url(base_url: &Url, path: &str, api_key: &str) -> Result<Url, url::ParseError> {
    let mut url = base_url.join(path)?;
    url.query_pairs_mut().append_pair("api_key", api_key);
    Ok(url)
}
