//! Outcome of one or many threshold checks.
//!
//! Every rule produces a [`CheckResult`], and every aggregation of results goes
//! through [`fold_check_results`]. Never collapse results into a plain `bool`
//! before the end: the failure messages would be lost.

use serde::Serialize;

/// Pass, or Fail with the ordered list of problems found.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CheckResult {
    /// Every check passed.
    #[default]
    Pass,
    /// At least one check failed.
    Fail(Vec<String>),
}

impl CheckResult {
    /// Builds a failing result with a single message.
    pub fn fail(message: impl Into<String>) -> Self {
        Self::Fail(vec![message.into()])
    }

    /// Returns `true` for [`CheckResult::Pass`].
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Failure messages, in check order. Empty on pass.
    pub fn problems(&self) -> &[String] {
        match self {
            Self::Pass => &[],
            Self::Fail(problems) => problems,
        }
    }

    /// Combines two results. Messages keep their order, `self` first.
    ///
    /// ```
    /// use coverage_threshold::CheckResult;
    ///
    /// let combined = CheckResult::fail("a").combine(CheckResult::Pass).combine(CheckResult::fail("b"));
    /// assert_eq!(combined, CheckResult::Fail(vec!["a".into(), "b".into()]));
    /// ```
    #[must_use]
    pub fn combine(self, other: Self) -> Self {
        match (self, other) {
            (Self::Pass, Self::Pass) => Self::Pass,
            (Self::Fail(problems), Self::Pass) | (Self::Pass, Self::Fail(problems)) => {
                Self::Fail(problems)
            }
            (Self::Fail(mut left), Self::Fail(right)) => {
                left.extend(right);
                Self::Fail(left)
            }
        }
    }
}

/// Folds any number of results into one.
///
/// An empty input is a pass. `Fail` entries contribute their messages in
/// input order; `Pass` entries contribute nothing.
pub fn fold_check_results<I>(results: I) -> CheckResult
where
    I: IntoIterator<Item = CheckResult>,
{
    results
        .into_iter()
        .fold(CheckResult::Pass, CheckResult::combine)
}

impl FromIterator<CheckResult> for CheckResult {
    fn from_iter<I: IntoIterator<Item = CheckResult>>(iter: I) -> Self {
        fold_check_results(iter)
    }
}

/// JSON shape of a result: `{"result": true, "problems": []}`.
#[derive(Debug, Serialize)]
pub struct CheckResultJson<'a> {
    /// Whether every check passed.
    pub result: bool,
    /// Failure messages, in check order.
    pub problems: &'a [String],
}

impl<'a> From<&'a CheckResult> for CheckResultJson<'a> {
    fn from(result: &'a CheckResult) -> Self {
        Self {
            result: result.is_pass(),
            problems: result.problems(),
        }
    }
}
