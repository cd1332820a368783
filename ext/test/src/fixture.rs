//! Conformance fixture runner
//!
//! A fixture is a declarative matcher expression plus cases: a value and
//! the expected outcome. Fixtures load from YAML (one or many documents per
//! file) or JSON and run against the attest engine.
//!
//! ```yaml
//! name: short-circuit
//! matcher:
//!   both: { not: anything }
//!   and: anything
//! cases:
//!   - name: first part decides
//!     value: 0
//!     expect: { matched: false, causes: 1 }
//! ```

use attest::evaluate_guarded;
use attest::prelude::*;
use serde::Deserialize;

/// Errors from loading or building a fixture.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    /// The YAML document is malformed or does not fit the fixture shape.
    #[error("invalid YAML fixture: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The JSON document is malformed or does not fit the fixture shape.
    #[error("invalid JSON fixture: {0}")]
    Json(#[from] serde_json::Error),

    /// A matcher in the expression failed to construct.
    #[error(transparent)]
    Matcher(#[from] MatcherError),

    /// A named leaf matcher does not exist.
    #[error("unknown matcher '{name}'")]
    UnknownMatcher {
        /// The name as written in the fixture.
        name: String,
    },
}

/// A complete test fixture
#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub matcher: MatcherSpec,
    pub cases: Vec<TestCase>,
}

/// Matcher expression.
///
/// Uses untagged deserialization: each composite is recognised by its
/// distinctive keys, and a bare string names a leaf matcher.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MatcherSpec {
    Named(String),
    Both(BothSpec),
    Either(EitherSpec),
    Xor(XorSpec),
    Neither(NeitherSpec),
    When(WhenSpec),
    Iff(IffSpec),
    Not(NotSpec),
    Is(IsSpec),
    AllOf(AllOfSpec),
    AnyOf(AnyOfSpec),
    EqualTo(EqualToSpec),
    GreaterThan(GreaterThanSpec),
    LessThan(LessThanSpec),
    HasPrefix(HasPrefixSpec),
    HasSuffix(HasSuffixSpec),
    Contains(ContainsSpec),
    Regex(RegexSpec),
    HasLen(HasLenSpec),
    EveryElement(EveryElementSpec),
    AnyElement(AnyElementSpec),
    Commented(CommentedSpec),
}

#[derive(Debug, Deserialize)]
pub struct BothSpec {
    pub both: Box<MatcherSpec>,
    pub and: Box<MatcherSpec>,
}

#[derive(Debug, Deserialize)]
pub struct EitherSpec {
    pub either: Box<MatcherSpec>,
    pub or: Box<MatcherSpec>,
}

#[derive(Debug, Deserialize)]
pub struct XorSpec {
    pub either: Box<MatcherSpec>,
    pub xor: Box<MatcherSpec>,
}

#[derive(Debug, Deserialize)]
pub struct NeitherSpec {
    pub neither: Box<MatcherSpec>,
    pub nor: Box<MatcherSpec>,
}

#[derive(Debug, Deserialize)]
pub struct WhenSpec {
    #[serde(rename = "if")]
    pub premise: Box<MatcherSpec>,
    pub then: Box<MatcherSpec>,
}

#[derive(Debug, Deserialize)]
pub struct IffSpec {
    pub iff: Box<MatcherSpec>,
    pub then: Box<MatcherSpec>,
}

#[derive(Debug, Deserialize)]
pub struct NotSpec {
    pub not: Box<MatcherSpec>,
}

#[derive(Debug, Deserialize)]
pub struct IsSpec {
    pub is: Box<MatcherSpec>,
}

#[derive(Debug, Deserialize)]
pub struct AllOfSpec {
    pub all_of: Vec<MatcherSpec>,
}

#[derive(Debug, Deserialize)]
pub struct AnyOfSpec {
    pub any_of: Vec<MatcherSpec>,
}

#[derive(Debug, Deserialize)]
pub struct EqualToSpec {
    pub equal_to: FixtureValue,
}

#[derive(Debug, Deserialize)]
pub struct GreaterThanSpec {
    pub greater_than: i64,
}

#[derive(Debug, Deserialize)]
pub struct LessThanSpec {
    pub less_than: i64,
}

#[derive(Debug, Deserialize)]
pub struct HasPrefixSpec {
    pub has_prefix: String,
}

#[derive(Debug, Deserialize)]
pub struct HasSuffixSpec {
    pub has_suffix: String,
}

#[derive(Debug, Deserialize)]
pub struct ContainsSpec {
    pub contains: String,
}

#[derive(Debug, Deserialize)]
pub struct RegexSpec {
    pub regex: String,
}

#[derive(Debug, Deserialize)]
pub struct HasLenSpec {
    pub has_len: usize,
}

#[derive(Debug, Deserialize)]
pub struct EveryElementSpec {
    pub every_element: Box<MatcherSpec>,
}

#[derive(Debug, Deserialize)]
pub struct AnyElementSpec {
    pub any_element: Box<MatcherSpec>,
}

/// Attaches comments to a matcher.
#[derive(Debug, Deserialize)]
pub struct CommentedSpec {
    pub matcher: Box<MatcherSpec>,
    pub comments: Vec<String>,
}

/// A value under test.
///
/// Integers are `i64`, strings are owned `String`s, lists are `Vec`s; a
/// YAML `null` is the untyped nil.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FixtureValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Ints(Vec<i64>),
    Strings(Vec<String>),
}

/// Test case
#[derive(Debug, Deserialize)]
pub struct TestCase {
    pub name: String,
    pub value: FixtureValue,
    pub expect: Expectation,
}

/// What a case must observe.
#[derive(Debug, Deserialize)]
pub struct Expectation {
    pub matched: bool,
    /// Exact number of top-level causes.
    #[serde(default)]
    pub causes: Option<usize>,
    /// Exact rendered description of the top-level result.
    #[serde(default)]
    pub description: Option<String>,
    /// Fragments the rendered report must contain.
    #[serde(default)]
    pub report_contains: Vec<String>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Builder: Convert specs to attest types
// ═══════════════════════════════════════════════════════════════════════════════

impl MatcherSpec {
    /// Build the matcher this expression describes.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::UnknownMatcher`] for an unknown leaf name and
    /// [`FixtureError::Matcher`] for an invalid regex.
    pub fn build(&self) -> Result<Matcher, FixtureError> {
        let m = match self {
            Self::Named(name) => named(name)?,
            Self::Both(s) => both(s.both.build()?).and(s.and.build()?),
            Self::Either(s) => either(s.either.build()?).or(s.or.build()?),
            Self::Xor(s) => either(s.either.build()?).xor(s.xor.build()?),
            Self::Neither(s) => neither(s.neither.build()?).nor(s.nor.build()?),
            Self::When(s) => when(s.premise.build()?).then(s.then.build()?),
            Self::Iff(s) => iff(s.iff.build()?).then(s.then.build()?),
            Self::Not(s) => not(s.not.build()?),
            Self::Is(s) => is(s.is.build()?),
            Self::AllOf(s) => all_of(build_all(&s.all_of)?),
            Self::AnyOf(s) => any_of(build_all(&s.any_of)?),
            Self::EqualTo(s) => s.equal_to.equal_to(),
            Self::GreaterThan(s) => greater_than(s.greater_than),
            Self::LessThan(s) => less_than(s.less_than),
            Self::HasPrefix(s) => has_prefix(s.has_prefix.as_str()),
            Self::HasSuffix(s) => has_suffix(s.has_suffix.as_str()),
            Self::Contains(s) => contains_substring(s.contains.as_str()),
            Self::Regex(s) => matches_regex(&s.regex)?,
            Self::HasLen(s) => has_len(s.has_len),
            Self::EveryElement(s) => every_element(s.every_element.build()?),
            Self::AnyElement(s) => any_element(s.any_element.build()?),
            Self::Commented(s) => s.matcher.build()?.with_comments(&s.comments),
        };
        Ok(m)
    }
}

fn build_all(specs: &[MatcherSpec]) -> Result<Vec<Matcher>, FixtureError> {
    specs.iter().map(MatcherSpec::build).collect()
}

fn named(name: &str) -> Result<Matcher, FixtureError> {
    let m = match name {
        "anything" => anything(),
        "is_true" => is_true(),
        "is_false" => is_false(),
        "is_nil" => is_nil(),
        "non_nil" => non_nil(),
        "is_empty" => is_empty(),
        "is_not_empty" => is_not_empty(),
        _ => {
            return Err(FixtureError::UnknownMatcher {
                name: name.to_string(),
            })
        }
    };
    Ok(m)
}

impl FixtureValue {
    /// The value handed to matchers.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Null => Value::nil(),
            Self::Bool(b) => Value::new(*b),
            Self::Int(i) => Value::new(*i),
            Self::Float(f) => Value::new(*f),
            Self::Str(s) => Value::new(s.clone()),
            Self::Ints(v) => Value::new(v.clone()),
            Self::Strings(v) => Value::new(v.clone()),
        }
    }

    /// An equality matcher typed like [`to_value`](Self::to_value).
    fn equal_to(&self) -> Matcher {
        match self {
            Self::Null => is_nil(),
            Self::Bool(b) => equal_to(*b),
            Self::Int(i) => equal_to(*i),
            Self::Float(f) => equal_to(*f),
            Self::Str(s) => equal_to(s.clone()),
            Self::Ints(v) => equal_to(v.clone()),
            Self::Strings(v) => equal_to(v.clone()),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Runner
// ═══════════════════════════════════════════════════════════════════════════════

/// Result of running a single test case
#[derive(Debug)]
pub struct CaseResult {
    pub case_name: String,
    pub passed: bool,
    /// Why the case failed; empty when it passed.
    pub problems: Vec<String>,
    pub report: String,
}

impl Fixture {
    /// Parse a fixture from YAML
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Yaml`] if the document does not parse.
    pub fn from_yaml(yaml: &str) -> Result<Self, FixtureError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse multiple fixtures from a YAML file with `---` separators
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Yaml`] if any document does not parse.
    pub fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, FixtureError> {
        let mut fixtures = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(yaml) {
            fixtures.push(Self::deserialize(doc)?);
        }
        Ok(fixtures)
    }

    /// Parse a fixture from JSON
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Json`] if the document does not parse.
    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Run all test cases and return results
    ///
    /// # Errors
    ///
    /// Returns an error if the matcher expression does not build.
    pub fn run(&self) -> Result<Vec<CaseResult>, FixtureError> {
        let matcher = self.matcher.build()?;
        Ok(self.cases.iter().map(|case| case.run(&matcher)).collect())
    }

    /// Run all test cases and panic on first failure
    pub fn run_and_assert(&self) {
        let results = self
            .run()
            .unwrap_or_else(|e| panic!("Fixture '{}' failed to build: {e}", self.name));
        for result in results {
            assert!(
                result.passed,
                "Fixture '{}' case '{}' failed: {}\n{}",
                self.name,
                result.case_name,
                result.problems.join("; "),
                result.report
            );
        }
    }
}

impl TestCase {
    fn run(&self, matcher: &Matcher) -> CaseResult {
        let value = self.value.to_value();
        let actual = evaluate_guarded(matcher, &value);
        let report = actual.report().to_string();
        let mut problems = Vec::new();

        if actual.matched() != self.expect.matched {
            problems.push(format!(
                "expected matched={}, got {}",
                self.expect.matched,
                actual.matched()
            ));
        }
        if let Some(causes) = self.expect.causes {
            if actual.causes().len() != causes {
                problems.push(format!(
                    "expected {causes} causes, got {}",
                    actual.causes().len()
                ));
            }
        }
        if let Some(description) = &self.expect.description {
            let rendered = actual.to_string();
            if &rendered != description {
                problems.push(format!("expected description {description:?}, got {rendered:?}"));
            }
        }
        for fragment in &self.expect.report_contains {
            if !report.contains(fragment.as_str()) {
                problems.push(format!("report lacks {fragment:?}"));
            }
        }

        CaseResult {
            case_name: self.name.clone(),
            passed: problems.is_empty(),
            problems,
            report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_expression() {
        let yaml = r#"
name: nested
matcher:
  both:
    either: { greater_than: 10 }
    or: { less_than: -10 }
  and:
    not: { equal_to: 42 }
cases:
  - name: large
    value: 11
    expect: { matched: true, causes: 2 }
  - name: excluded
    value: 42
    expect: { matched: false }
"#;
        let fixture = Fixture::from_yaml(yaml).unwrap();
        assert!(matches!(fixture.matcher, MatcherSpec::Both(_)));
        fixture.run_and_assert();
    }

    #[test]
    fn test_if_keyword_maps_to_when() {
        let yaml = r#"
name: implication
matcher:
  if: is_true
  then: anything
cases: []
"#;
        let fixture = Fixture::from_yaml(yaml).unwrap();
        assert!(matches!(fixture.matcher, MatcherSpec::When(_)));
        assert_eq!(fixture.matcher.build().unwrap().to_string(), "if [is true] then [anything]");
    }

    #[test]
    fn test_xor_is_not_confused_with_or() {
        let spec: MatcherSpec = serde_yaml::from_str("{ either: anything, xor: anything }").unwrap();
        assert!(matches!(spec, MatcherSpec::Xor(_)));
    }

    #[test]
    fn test_values() {
        let v: FixtureValue = serde_yaml::from_str("null").unwrap();
        assert!(v.to_value().is_nil());
        let v: FixtureValue = serde_yaml::from_str("[1, 2]").unwrap();
        assert_eq!(v.to_value().downcast_ref::<Vec<i64>>(), Some(&vec![1, 2]));
        let v: FixtureValue = serde_yaml::from_str("[a, b]").unwrap();
        assert_eq!(v.to_value().len(), Some(2));
        let v: FixtureValue = serde_yaml::from_str("\"7\"").unwrap();
        assert_eq!(v.to_value().as_str(), Some("7"));
    }

    #[test]
    fn test_unknown_matcher() {
        let spec = MatcherSpec::Named("sometimes".into());
        let err = spec.build().unwrap_err();
        assert!(matches!(err, FixtureError::UnknownMatcher { ref name } if name == "sometimes"));
    }

    #[test]
    fn test_invalid_regex() {
        let spec: MatcherSpec = serde_yaml::from_str("{ regex: '[bad' }").unwrap();
        assert!(matches!(spec.build(), Err(FixtureError::Matcher(_))));
    }

    #[test]
    fn test_json_fixture() {
        let json = r#"{
            "name": "json",
            "matcher": { "has_prefix": "ab" },
            "cases": [
                { "name": "hit", "value": "abc", "expect": { "matched": true } },
                { "name": "type", "value": 1, "expect": {
                    "matched": false,
                    "report_contains": ["Could not apply"]
                } }
            ]
        }"#;
        Fixture::from_json(json).unwrap().run_and_assert();
    }

    #[test]
    fn test_failed_case_lists_problems() {
        let yaml = r#"
name: wrong
matcher: anything
cases:
  - name: claims failure
    value: 1
    expect: { matched: false, causes: 3, description: "nope" }
"#;
        let results = Fixture::from_yaml(yaml).unwrap().run().unwrap();
        assert!(!results[0].passed);
        assert_eq!(results[0].problems.len(), 3);
    }
}
