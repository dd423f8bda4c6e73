use serde_json::{Map, Value};
use tracing::debug;

use crate::error::GradeError;
use crate::question::TestCase;
use crate::schema;

/// Learner-supplied logic under grading. Notebooks usually implement this
/// with a closure over the test case's arguments.
pub trait Solution {
    fn solve(&self, args: &[Value], kwargs: &Map<String, Value>) -> Value;
}

impl<F> Solution for F
where
    F: Fn(&[Value], &Map<String, Value>) -> Value,
{
    fn solve(&self, args: &[Value], kwargs: &Map<String, Value>) -> Value {
        self(args, kwargs)
    }
}

/// Invokes `solution` once per test case, in order, validating each result
/// against the case's type schema as soon as it is produced. The first
/// invalid result aborts the run: later cases are never invoked and no
/// partial result sequence escapes. On success the results are 1:1 with the
/// input cases, in the same order.
pub fn run_test_cases(
    solution: &impl Solution,
    test_cases: &[TestCase],
) -> Result<Vec<Value>, GradeError> {
    let mut results = Vec::with_capacity(test_cases.len());

    for (index, test_case) in test_cases.iter().enumerate() {
        let result = solution.solve(test_case.args(), test_case.kwargs());
        schema::validate(&result, test_case.type_tag())?;
        debug!(case = index, tag = %test_case.type_tag(), "test case result validated");
        results.push(result);
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use serde_json::json;

    use super::*;
    use crate::types::TypeTag;

    fn int_case(arg: i64) -> TestCase {
        TestCase::new(vec![json!(arg)], Map::new(), TypeTag::new("int"))
    }

    #[test]
    fn results_preserve_order_and_length() {
        let cases = vec![int_case(1), int_case(2), int_case(3)];
        let double = |args: &[Value], _kwargs: &Map<String, Value>| {
            json!(args[0].as_i64().unwrap() * 2)
        };

        let results = run_test_cases(&double, &cases).unwrap();

        assert_eq!(results, vec![json!(2), json!(4), json!(6)]);
    }

    #[test]
    fn invalid_second_result_halts_before_the_third_case() {
        let cases = vec![int_case(1), int_case(2), int_case(3)];
        let calls = Cell::new(0usize);
        let flaky = |args: &[Value], _kwargs: &Map<String, Value>| {
            calls.set(calls.get() + 1);
            if args[0] == json!(2) {
                json!("not an int")
            } else {
                args[0].clone()
            }
        };

        let err = run_test_cases(&flaky, &cases).unwrap_err();

        assert!(matches!(err, GradeError::Validation { .. }));
        // case #3 must never run
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn empty_case_list_yields_empty_results() {
        let noop = |_args: &[Value], _kwargs: &Map<String, Value>| json!(null);
        let results = run_test_cases(&noop, &[]).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn kwargs_reach_the_solution() {
        let mut kwargs = Map::new();
        kwargs.insert("power".to_owned(), json!(3));
        let cases = vec![TestCase::new(vec![json!(2)], kwargs, TypeTag::new("int"))];

        let pow = |args: &[Value], kwargs: &Map<String, Value>| {
            let base = args[0].as_i64().unwrap();
            let power = kwargs["power"].as_u64().unwrap() as u32;
            json!(base.pow(power))
        };

        let results = run_test_cases(&pow, &cases).unwrap();
        assert_eq!(results, vec![json!(8)]);
    }
}
