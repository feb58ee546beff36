//! Game session
//!
//! A `Session` owns the player's current position and the quiz over the
//! loaded point collection. It is the single source of truth the CLI and the
//! HTTP API read from. Mutations take `&mut self`; callers that share a
//! session across tasks serialize access themselves (see `server::state`).
//!
//! Ranked views are computed on every read, so a read after
//! [`Session::update_position`] always reflects the latest fix.

use crate::coord::rank::{self, RankedPoint};
use crate::coord::Coordinates;
use crate::error::Result;
use crate::poi::{PlaceId, PointOfInterest};
use crate::quiz::{AnswerOutcome, PointStatus, Progress, Quiz};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Snapshot of the session for display and the HTTP API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReport {
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub total: usize,
    pub solved: usize,
    pub remaining: usize,
    pub progress: Progress,
    pub complete: bool,
    pub has_position: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<PlaceId>,
}

/// Position plus quiz state for one player
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    started_at: DateTime<Utc>,
    position: Option<Coordinates>,
    quiz: Quiz,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a session with no points and no location fix
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            position: None,
            quiz: Quiz::default(),
        }
    }

    /// Create a session over `points`
    pub fn with_points(points: Vec<PointOfInterest>) -> Result<Self> {
        let mut session = Self::new();
        session.load_points(points)?;
        Ok(session)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Latest location fix, `None` until the first one arrives
    pub fn position(&self) -> Option<Coordinates> {
        self.position
    }

    /// Record a new location fix
    pub fn update_position(&mut self, coords: Coordinates) -> Result<()> {
        coords.validate()?;
        debug!("Position updated to {}", coords);
        self.position = Some(coords);
        Ok(())
    }

    /// Forget the location fix (permission revoked, signal lost)
    pub fn clear_position(&mut self) {
        debug!("Position cleared");
        self.position = None;
    }

    /// Replace the point collection
    ///
    /// Loading always starts a fresh game: solved-state and the active point
    /// are dropped even for ids present in both collections. On error the
    /// session is left untouched.
    pub fn load_points(&mut self, points: Vec<PointOfInterest>) -> Result<()> {
        for point in &points {
            point.coords.validate()?;
        }

        let quiz = Quiz::new(Arc::from(points))?;
        info!("Loaded {} points into session", quiz.total());

        self.quiz = quiz;
        self.renew();
        Ok(())
    }

    /// All loaded points, in load order
    pub fn points(&self) -> &[PointOfInterest] {
        self.quiz.points()
    }

    /// Read access to the quiz state
    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    /// Unsolved points, nearest first
    ///
    /// Empty when there is no location fix yet or nothing is loaded.
    pub fn ranked(&self) -> Vec<RankedPoint<'_>> {
        let Some(origin) = self.position else {
            return Vec::new();
        };

        rank::rank(origin, self.quiz.points())
            .into_iter()
            .filter(|r| !self.quiz.is_solved(r.point.id.as_str()))
            .collect()
    }

    /// Unsolved points within `radius_meters`, nearest first
    ///
    /// `None` reveals every unsolved point.
    pub fn revealed(&self, radius_meters: Option<f64>) -> Vec<RankedPoint<'_>> {
        let ranked = self.ranked();
        match radius_meters {
            Some(radius) => rank::within_radius(&ranked, radius).to_vec(),
            None => ranked,
        }
    }

    /// The closest unsolved point, if there is a fix and anything is left
    pub fn nearest_unsolved(&self) -> Option<RankedPoint<'_>> {
        let origin = self.position?;
        rank::nearest(
            origin,
            self.quiz
                .points()
                .iter()
                .filter(|p| !self.quiz.is_solved(p.id.as_str())),
        )
    }

    /// The closest unsolved point inside the optional reveal radius
    pub fn nearest_revealed(&self, radius_meters: Option<f64>) -> Option<RankedPoint<'_>> {
        let nearest = self.nearest_unsolved()?;
        match radius_meters {
            Some(radius) if nearest.distance_meters > radius => None,
            _ => Some(nearest),
        }
    }

    /// Distance from the current fix to point `id`
    pub fn distance_to(&self, id: &str) -> Result<Option<f64>> {
        let point = self.quiz.get(id)?;
        Ok(self
            .position
            .map(|origin| RankedPoint::measure(origin, point).distance_meters))
    }

    pub fn select_point(&mut self, id: &str) -> Result<&PointOfInterest> {
        let point = self.quiz.select_point(id)?;
        debug!("Selected point {}", point.id);
        Ok(point)
    }

    pub fn submit_answer(&mut self, id: &str, candidate: &str) -> Result<AnswerOutcome> {
        let outcome = self.quiz.submit_answer(id, candidate)?;
        info!(
            "Answer for {}: {} ({}/{} solved)",
            id,
            outcome,
            self.quiz.solved_count(),
            self.quiz.total()
        );
        if outcome == AnswerOutcome::Correct && self.quiz.is_complete() {
            info!("All {} points solved", self.quiz.total());
        }
        Ok(outcome)
    }

    /// Start over with every point unsolved; the position is kept
    pub fn restart(&mut self) {
        self.quiz.restart();
        self.renew();
        info!("Session restarted");
    }

    pub fn status(&self, id: &str) -> Result<PointStatus> {
        self.quiz.status(id)
    }

    pub fn is_complete(&self) -> bool {
        self.quiz.is_complete()
    }

    pub fn progress_report(&self) -> ProgressReport {
        let total = self.quiz.total();
        let solved = self.quiz.solved_count();
        ProgressReport {
            session_id: self.id,
            started_at: self.started_at,
            total,
            solved,
            remaining: total - solved,
            progress: self.quiz.progress(),
            complete: self.quiz.is_complete(),
            has_position: self.position.is_some(),
            active: self.quiz.active().map(|p| p.id.clone()),
        }
    }

    fn renew(&mut self) {
        self.id = Uuid::new_v4();
        self.started_at = Utc::now();
    }
}
