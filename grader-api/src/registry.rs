use anyhow::{bail, Result};
use tracing::debug;

use crate::error::GradeError;
use crate::question::{Question, QuestionName};

/// Set names reserved for non-question course content.
const RESERVED_SET_NAMES: [&str; 2] = ["tests", "lib"];

/// A named group of questions, the unit course-content authors declare
/// (one set per course module).
#[derive(Debug, Clone)]
pub struct QuestionSet {
    name: String,
    questions: Vec<Question>,
}

impl QuestionSet {
    pub fn new(name: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            name: name.into(),
            questions,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}

/// Every question available for local grading, built explicitly at startup
/// from statically declared sets.
#[derive(Debug, Clone, Default)]
pub struct QuestionRegistry {
    sets: Vec<QuestionSet>,
}

impl QuestionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, set: QuestionSet) -> Result<()> {
        if RESERVED_SET_NAMES
            .iter()
            .any(|reserved| set.name().eq_ignore_ascii_case(reserved))
        {
            bail!("`{}` is a reserved set name", set.name());
        }
        if self.sets.iter().any(|known| known.name() == set.name()) {
            bail!("question set `{}` is already registered", set.name());
        }

        debug!(set = set.name(), questions = set.questions().len(), "registered question set");
        self.sets.push(set);
        Ok(())
    }

    /// Finds a question by name. A `set__question` style name whose prefix
    /// matches a registered set (case-insensitively) restricts the search to
    /// that set; otherwise every set is searched.
    pub fn resolve(&self, name: &QuestionName) -> Result<&Question, GradeError> {
        self.candidate_sets(name)
            .flat_map(|set| set.questions())
            .find(|question| question.name() == name)
            .ok_or_else(|| GradeError::Lookup(name.clone()))
    }

    fn candidate_sets<'a>(
        &'a self,
        name: &QuestionName,
    ) -> Box<dyn Iterator<Item = &'a QuestionSet> + 'a> {
        let prefix = name.set_prefix();
        let prefixed: Vec<&QuestionSet> = self
            .sets
            .iter()
            .filter(|set| set.name().eq_ignore_ascii_case(prefix))
            .collect();

        if prefixed.is_empty() {
            Box::new(self.sets.iter())
        } else {
            Box::new(prefixed.into_iter())
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Map};

    use super::*;
    use crate::question::TestCase;
    use crate::scorer::Scorer;
    use crate::types::TypeTag;

    fn question(name: &str) -> Question {
        let case = TestCase::new(vec![json!(1)], Map::new(), TypeTag::new("int"))
            .with_answer(json!(1));
        Question::new(QuestionName::new(name), vec![case], Scorer::ExactMatch)
    }

    fn registry() -> QuestionRegistry {
        let mut registry = QuestionRegistry::new();
        registry
            .register(QuestionSet::new("foo", vec![question("Foo__bar")]))
            .unwrap();
        registry
            .register(QuestionSet::new("stats", vec![question("stats__mean")]))
            .unwrap();
        registry
    }

    #[test]
    fn resolves_by_exact_name() {
        let registry = registry();
        let question = registry
            .resolve(&QuestionName::new("stats__mean"))
            .unwrap();
        assert_eq!(question.name().as_str(), "stats__mean");
    }

    #[test]
    fn prefix_restricts_search_to_the_matching_set() {
        let registry = registry();
        // `Foo__bar` has prefix `Foo`, which matches set `foo`
        // case-insensitively; resolution must look only there.
        let question = registry.resolve(&QuestionName::new("Foo__bar")).unwrap();
        assert_eq!(question.name().as_str(), "Foo__bar");

        // a name carrying a known prefix but absent from that set must not
        // fall back to other sets
        let err = registry
            .resolve(&QuestionName::new("stats__variance"))
            .unwrap_err();
        assert!(matches!(err, GradeError::Lookup(_)));
    }

    #[test]
    fn unknown_question_is_a_lookup_error() {
        let registry = registry();
        let err = registry
            .resolve(&QuestionName::new("nowhere__nothing"))
            .unwrap_err();
        assert!(matches!(
            err,
            GradeError::Lookup(name) if name.as_str() == "nowhere__nothing"
        ));
    }

    #[test]
    fn reserved_and_duplicate_set_names_are_rejected() {
        let mut registry = registry();
        assert!(registry
            .register(QuestionSet::new("tests", vec![]))
            .is_err());
        assert!(registry.register(QuestionSet::new("Lib", vec![])).is_err());
        assert!(registry.register(QuestionSet::new("foo", vec![])).is_err());
    }
}
