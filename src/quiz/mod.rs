//! Quiz state machine
//!
//! Tracks which points have been solved, validates submitted answers and
//! derives overall completion. Each point is either `Unsolved` or `Solved`;
//! a point only moves to `Solved` through a correct answer and only moves
//! back through [`Quiz::restart`].
//!
//! Completion is never stored. It is recomputed from the solved set and the
//! point collection whenever it is asked for, so the two cannot drift apart.

use crate::error::{Error, Result};
use crate::poi::{PlaceId, PointOfInterest};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Per-point solved state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointStatus {
    Unsolved,
    Solved,
}

/// Whole-game state, derived from the solved set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Progress {
    InProgress,
    Complete,
}

/// Result of submitting an answer for a known point
///
/// `Incorrect` is an ordinary outcome shown to the player, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerOutcome {
    /// The answer matched and the point is now solved
    Correct,
    /// The point was solved earlier; nothing changed
    AlreadySolved,
    /// The answer did not match, was empty, or the point has no answer
    Incorrect,
}

impl AnswerOutcome {
    /// Correct and already-solved submissions both count as success
    pub fn is_success(self) -> bool {
        !matches!(self, Self::Incorrect)
    }
}

impl std::fmt::Display for AnswerOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Correct => write!(f, "correct"),
            Self::AlreadySolved => write!(f, "already_solved"),
            Self::Incorrect => write!(f, "incorrect"),
        }
    }
}

/// Compare a candidate answer against the expected one
///
/// Both sides are trimmed and compared case-insensitively. An empty
/// candidate or an empty expected answer never matches.
pub fn answers_match(expected: &str, candidate: &str) -> bool {
    let expected = expected.trim();
    let candidate = candidate.trim();

    if expected.is_empty() || candidate.is_empty() {
        return false;
    }

    expected.to_lowercase() == candidate.to_lowercase()
}

/// Solved-state of one point collection
#[derive(Debug, Clone)]
pub struct Quiz {
    points: Arc<[PointOfInterest]>,
    index: HashMap<PlaceId, usize>,
    solved: HashSet<PlaceId>,
    active: Option<PlaceId>,
}

impl Default for Quiz {
    fn default() -> Self {
        Self {
            points: Arc::from(Vec::new()),
            index: HashMap::new(),
            solved: HashSet::new(),
            active: None,
        }
    }
}

impl Quiz {
    /// Start a quiz over `points`, every point unsolved
    ///
    /// Fails with `InvalidInput` if two points share an id.
    pub fn new(points: Arc<[PointOfInterest]>) -> Result<Self> {
        let mut index = HashMap::with_capacity(points.len());
        for (i, point) in points.iter().enumerate() {
            if index.insert(point.id.clone(), i).is_some() {
                return Err(Error::InvalidInput(format!(
                    "Duplicate place id: {}",
                    point.id
                )));
            }
        }

        Ok(Self {
            points,
            index,
            solved: HashSet::new(),
            active: None,
        })
    }

    /// All loaded points, in load order
    pub fn points(&self) -> &[PointOfInterest] {
        &self.points
    }

    /// Look up a point by id
    pub fn get(&self, id: &str) -> Result<&PointOfInterest> {
        self.index
            .get(id)
            .map(|&i| &self.points[i])
            .ok_or_else(|| Error::NotFound(format!("Unknown place id: {}", id)))
    }

    /// Make `id` the point currently being challenged
    pub fn select_point(&mut self, id: &str) -> Result<&PointOfInterest> {
        let i = *self
            .index
            .get(id)
            .ok_or_else(|| Error::NotFound(format!("Unknown place id: {}", id)))?;

        let point = &self.points[i];
        self.active = Some(point.id.clone());
        Ok(point)
    }

    /// The point currently being challenged, if any
    pub fn active(&self) -> Option<&PointOfInterest> {
        self.active.as_ref().and_then(|id| self.get(id.as_str()).ok())
    }

    /// Drop the active point without touching solved-state
    pub fn clear_selection(&mut self) {
        self.active = None;
    }

    /// Check `candidate` against the expected answer of point `id`
    ///
    /// A correct answer solves the point and clears the active point.
    /// Re-answering a solved point is a successful no-op, unless the
    /// candidate is empty: empty submissions are always incorrect.
    pub fn submit_answer(&mut self, id: &str, candidate: &str) -> Result<AnswerOutcome> {
        let point = self.get(id)?;

        if candidate.trim().is_empty() {
            return Ok(AnswerOutcome::Incorrect);
        }

        if self.solved.contains(id) {
            return Ok(AnswerOutcome::AlreadySolved);
        }

        let expected = point.answer.as_deref().unwrap_or("");
        if !answers_match(expected, candidate) {
            return Ok(AnswerOutcome::Incorrect);
        }

        let id = point.id.clone();
        self.solved.insert(id);
        self.active = None;
        Ok(AnswerOutcome::Correct)
    }

    /// Solved-state of a single point
    pub fn status(&self, id: &str) -> Result<PointStatus> {
        self.get(id)?;
        Ok(if self.solved.contains(id) {
            PointStatus::Solved
        } else {
            PointStatus::Unsolved
        })
    }

    pub fn is_solved(&self, id: &str) -> bool {
        self.solved.contains(id)
    }

    /// Ids answered correctly so far
    pub fn solved(&self) -> &HashSet<PlaceId> {
        &self.solved
    }

    pub fn solved_count(&self) -> usize {
        self.solved.len()
    }

    pub fn total(&self) -> usize {
        self.points.len()
    }

    /// True when every loaded point is solved and at least one point is loaded
    pub fn is_complete(&self) -> bool {
        !self.points.is_empty() && self.points.iter().all(|p| self.solved.contains(&p.id))
    }

    pub fn progress(&self) -> Progress {
        if self.is_complete() {
            Progress::Complete
        } else {
            Progress::InProgress
        }
    }

    /// Return every point to `Unsolved` and clear the active point
    pub fn restart(&mut self) {
        self.solved.clear();
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coordinates;

    fn point(id: &str, answer: Option<&str>) -> PointOfInterest {
        let p = PointOfInterest::new(
            PlaceId::new(id).unwrap(),
            Coordinates::new(48.7758, 9.1829),
            id,
            format!("Question for {}", id),
        );
        match answer {
            Some(answer) => p.with_answer(answer),
            None => p,
        }
    }

    fn quiz(points: Vec<PointOfInterest>) -> Quiz {
        Quiz::new(Arc::from(points)).unwrap()
    }

    fn three_point_quiz() -> Quiz {
        quiz(vec![
            point("P1", Some("Stuttgart")),
            point("P2", Some("Paris")),
            point("P3", Some("Neckar")),
        ])
    }

    #[test]
    fn test_answers_match() {
        assert!(answers_match("Paris", "  paris "));
        assert!(answers_match("Karl Eugen", "KARL EUGEN"));
        assert!(answers_match("  Paris", "Paris"));
        assert!(!answers_match("Paris", "Pari"));
        assert!(!answers_match("Paris", ""));
        assert!(!answers_match("", ""));
        assert!(!answers_match("   ", "   "));
    }

    #[test]
    fn test_initial_state() {
        let quiz = three_point_quiz();

        assert_eq!(quiz.solved_count(), 0);
        assert_eq!(quiz.total(), 3);
        assert_eq!(quiz.progress(), Progress::InProgress);
        assert!(quiz.active().is_none());
        for id in ["P1", "P2", "P3"] {
            assert_eq!(quiz.status(id).unwrap(), PointStatus::Unsolved);
        }
    }

    #[test]
    fn test_empty_collection_is_never_complete() {
        let mut quiz = Quiz::default();
        assert!(!quiz.is_complete());
        assert_eq!(quiz.progress(), Progress::InProgress);

        quiz.restart();
        assert!(!quiz.is_complete());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = Quiz::new(Arc::from(vec![point("P1", None), point("P1", None)]));
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_select_point() {
        let mut quiz = three_point_quiz();

        let selected = quiz.select_point("P2").unwrap();
        assert_eq!(selected.id.as_str(), "P2");
        assert_eq!(quiz.active().unwrap().id.as_str(), "P2");
        assert_eq!(quiz.status("P2").unwrap(), PointStatus::Unsolved);

        assert!(matches!(quiz.select_point("P9"), Err(Error::NotFound(_))));
        // Failed selection keeps the previous one
        assert_eq!(quiz.active().unwrap().id.as_str(), "P2");

        quiz.clear_selection();
        assert!(quiz.active().is_none());
    }

    #[test]
    fn test_correct_answer_solves_and_clears_active() {
        let mut quiz = three_point_quiz();
        quiz.select_point("P2").unwrap();

        let outcome = quiz.submit_answer("P2", "  paris ").unwrap();

        assert_eq!(outcome, AnswerOutcome::Correct);
        assert_eq!(quiz.status("P2").unwrap(), PointStatus::Solved);
        assert!(quiz.solved().contains("P2"));
        assert!(quiz.active().is_none());
        assert!(!quiz.is_complete());
    }

    #[test]
    fn test_incorrect_answer_changes_nothing() {
        let mut quiz = three_point_quiz();
        quiz.select_point("P1").unwrap();

        let outcome = quiz.submit_answer("P1", "Berlin").unwrap();

        assert_eq!(outcome, AnswerOutcome::Incorrect);
        assert!(!outcome.is_success());
        assert_eq!(quiz.solved_count(), 0);
        assert_eq!(quiz.active().unwrap().id.as_str(), "P1");
    }

    #[test]
    fn test_unknown_point_is_not_found() {
        let mut quiz = three_point_quiz();
        assert!(matches!(
            quiz.submit_answer("nope", "Paris"),
            Err(Error::NotFound(_))
        ));
        assert!(matches!(quiz.status("nope"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_correct_resubmission_is_idempotent() {
        let mut quiz = three_point_quiz();
        assert_eq!(quiz.submit_answer("P2", "Paris").unwrap(), AnswerOutcome::Correct);

        for _ in 0..3 {
            let outcome = quiz.submit_answer("P2", "paris").unwrap();
            assert_eq!(outcome, AnswerOutcome::AlreadySolved);
            assert!(outcome.is_success());
            assert_eq!(quiz.solved_count(), 1);
        }

        // Any non-empty answer on a solved point is a no-op success
        assert_eq!(
            quiz.submit_answer("P2", "London").unwrap(),
            AnswerOutcome::AlreadySolved
        );
        assert_eq!(quiz.status("P2").unwrap(), PointStatus::Solved);
    }

    #[test]
    fn test_empty_answer_always_incorrect() {
        let mut quiz = quiz(vec![
            point("blank", Some("")),
            point("none", None),
            point("P2", Some("Paris")),
        ]);

        assert_eq!(quiz.submit_answer("blank", "").unwrap(), AnswerOutcome::Incorrect);
        assert_eq!(quiz.submit_answer("blank", "   ").unwrap(), AnswerOutcome::Incorrect);
        assert_eq!(quiz.submit_answer("none", "").unwrap(), AnswerOutcome::Incorrect);
        assert_eq!(quiz.submit_answer("P2", "").unwrap(), AnswerOutcome::Incorrect);
        assert_eq!(quiz.solved_count(), 0);

        quiz.submit_answer("P2", "Paris").unwrap();
        assert_eq!(quiz.submit_answer("P2", "").unwrap(), AnswerOutcome::Incorrect);
        assert_eq!(quiz.solved_count(), 1);
    }

    #[test]
    fn test_point_without_answer_cannot_be_solved() {
        let mut quiz = quiz(vec![point("none", None), point("blank", Some("  "))]);

        assert_eq!(quiz.submit_answer("none", "anything").unwrap(), AnswerOutcome::Incorrect);
        assert_eq!(quiz.submit_answer("blank", "anything").unwrap(), AnswerOutcome::Incorrect);
        assert_eq!(quiz.solved_count(), 0);
    }

    #[test]
    fn test_completion_tracks_solved_set() {
        let mut quiz = three_point_quiz();

        quiz.submit_answer("P2", "Paris").unwrap();
        assert!(!quiz.is_complete());
        quiz.submit_answer("P1", "stuttgart").unwrap();
        assert!(!quiz.is_complete());
        quiz.submit_answer("P3", "NECKAR").unwrap();

        assert!(quiz.is_complete());
        assert_eq!(quiz.progress(), Progress::Complete);
    }

    #[test]
    fn test_restart_reproduces_initial_state() {
        let mut quiz = three_point_quiz();
        quiz.submit_answer("P1", "Stuttgart").unwrap();
        quiz.submit_answer("P2", "Paris").unwrap();
        quiz.submit_answer("P3", "Neckar").unwrap();
        quiz.select_point("P1").unwrap();
        assert!(quiz.is_complete());

        quiz.restart();

        assert!(quiz.solved().is_empty());
        assert!(quiz.active().is_none());
        assert_eq!(quiz.progress(), Progress::InProgress);
        for id in ["P1", "P2", "P3"] {
            assert_eq!(quiz.status(id).unwrap(), PointStatus::Unsolved);
        }

        // Restart mid-challenge is safe too
        quiz.select_point("P3").unwrap();
        quiz.restart();
        assert!(quiz.active().is_none());
    }

    #[test]
    fn test_outcome_serialization() {
        assert_eq!(
            serde_json::to_string(&AnswerOutcome::AlreadySolved).unwrap(),
            "\"already_solved\""
        );
        assert_eq!(AnswerOutcome::Incorrect.to_string(), "incorrect");
        assert_eq!(serde_json::to_string(&Progress::InProgress).unwrap(), "\"in_progress\"");
    }
}
