//! Outcomes recorded by an external harness after running a suite against
//! a reference implementation and its candidates.

use std::collections::BTreeSet;

use argus_ir::TestCase;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResultsError {
    #[error("Expected one catch set per test case: {cases} cases, {catch_sets} catch sets")]
    LengthMismatch { cases: usize, catch_sets: usize },
}

/// Test cases, the implementations each one caught, and the union of every
/// implementation caught by at least one case.
///
/// `catch_sets[i]` holds the ids of the implementations whose output
/// diverged from the reference on `cases[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestResults {
    cases: Vec<TestCase>,
    catch_sets: Vec<BTreeSet<usize>>,
    wrong_set: BTreeSet<usize>,
}

impl TestResults {
    pub fn new(
        cases: Vec<TestCase>,
        catch_sets: Vec<BTreeSet<usize>>,
        wrong_set: BTreeSet<usize>,
    ) -> Result<Self, ResultsError> {
        if cases.len() != catch_sets.len() {
            return Err(ResultsError::LengthMismatch {
                cases: cases.len(),
                catch_sets: catch_sets.len(),
            });
        }
        Ok(Self {
            cases,
            catch_sets,
            wrong_set,
        })
    }

    /// Build results whose wrong set is the union of the catch sets.
    pub fn from_catch_sets(
        cases: Vec<TestCase>,
        catch_sets: Vec<BTreeSet<usize>>,
    ) -> Result<Self, ResultsError> {
        let wrong_set = catch_sets.iter().flatten().copied().collect();
        Self::new(cases, catch_sets, wrong_set)
    }

    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    pub fn case(&self, index: usize) -> Option<&TestCase> {
        self.cases.get(index)
    }

    pub fn catch_sets(&self) -> &[BTreeSet<usize>] {
        &self.catch_sets
    }

    pub fn wrong_set(&self) -> &BTreeSet<usize> {
        &self.wrong_set
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}
