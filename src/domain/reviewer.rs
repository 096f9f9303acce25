//! Reviewer selection - Domain service for picking pull request reviewers.
//!
//! Selection is pure and in-memory: the caller supplies the candidate roster,
//! the number of reviewers wanted and the IDs that must not be picked.
//! Candidates are shuffled so review load spreads across the team.

use std::collections::HashSet;
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::TeamMember;
use crate::errors::{AppError, AppResult};

/// Pick up to `limit` reviewer IDs from `candidates`.
///
/// Eligible candidates are active, are not the author and are not listed in
/// `exclude`. Returns `NoReviewersAvailable` when nobody is eligible; fewer
/// than `limit` eligible candidates is not an error.
pub fn select_reviewers<R: Rng + ?Sized>(
    rng: &mut R,
    author_id: &str,
    candidates: &[TeamMember],
    limit: usize,
    exclude: &[String],
) -> AppResult<Vec<String>> {
    let excluded: HashSet<&str> = exclude.iter().map(String::as_str).collect();

    let mut eligible: Vec<&TeamMember> = candidates
        .iter()
        .filter(|m| m.user_id != author_id && m.is_active && !excluded.contains(m.user_id.as_str()))
        .collect();

    if eligible.is_empty() {
        return Err(AppError::NoReviewersAvailable);
    }

    eligible.shuffle(rng);

    Ok(eligible
        .into_iter()
        .take(limit)
        .map(|m| m.user_id.clone())
        .collect())
}

/// Reviewer picker owning the randomness source.
///
/// Production uses an entropy-seeded generator; tests and reproducible
/// environments construct it from a fixed seed.
pub struct ReviewerPicker {
    rng: Mutex<StdRng>,
}

impl ReviewerPicker {
    /// Create a picker seeded from operating system entropy
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Create a deterministic picker
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn new(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }

    /// Pick reviewers with the owned generator. See [`select_reviewers`].
    pub fn pick(
        &self,
        author_id: &str,
        candidates: &[TeamMember],
        limit: usize,
        exclude: &[String],
    ) -> AppResult<Vec<String>> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| AppError::internal("reviewer picker lock poisoned"))?;

        select_reviewers(&mut *rng, author_id, candidates, limit, exclude)
    }
}

impl Default for ReviewerPicker {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl std::fmt::Debug for ReviewerPicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewerPicker").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<TeamMember> {
        vec![
            TeamMember::new("u1", "Alice", true),
            TeamMember::new("u2", "Bob", true),
            TeamMember::new("u3", "Carol", false),
            TeamMember::new("u4", "Dave", true),
            TeamMember::new("u5", "Eve", true),
        ]
    }

    #[test]
    fn test_skips_author_inactive_and_excluded() {
        let mut rng = StdRng::seed_from_u64(7);
        let exclude = vec!["u4".to_string()];

        for _ in 0..50 {
            let picked = select_reviewers(&mut rng, "u1", &roster(), 3, &exclude).unwrap();
            assert_eq!(picked.len(), 2);
            for id in &picked {
                assert!(id == "u2" || id == "u5", "unexpected reviewer {}", id);
            }
        }
    }

    #[test]
    fn test_returns_fewer_than_limit_without_error() {
        let mut rng = StdRng::seed_from_u64(1);
        let members = vec![
            TeamMember::new("u1", "Alice", true),
            TeamMember::new("u2", "Bob", true),
            TeamMember::new("u3", "Carol", false),
        ];

        let picked = select_reviewers(&mut rng, "u1", &members, 2, &[]).unwrap();
        assert_eq!(picked, vec!["u2".to_string()]);
    }

    #[test]
    fn test_no_eligible_candidates() {
        let mut rng = StdRng::seed_from_u64(1);
        let members = vec![
            TeamMember::new("u1", "Alice", true),
            TeamMember::new("u2", "Bob", false),
        ];

        let result = select_reviewers(&mut rng, "u1", &members, 2, &[]);
        assert!(matches!(result, Err(AppError::NoReviewersAvailable)));
    }

    #[test]
    fn test_empty_roster() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = select_reviewers(&mut rng, "u1", &[], 1, &[]);
        assert!(matches!(result, Err(AppError::NoReviewersAvailable)));
    }

    #[test]
    fn test_picks_are_distinct() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..50 {
            let picked = select_reviewers(&mut rng, "u1", &roster(), 2, &[]).unwrap();
            assert_eq!(picked.len(), 2);
            assert_ne!(picked[0], picked[1]);
        }
    }

    #[test]
    fn test_selection_varies_across_draws() {
        let mut rng = StdRng::seed_from_u64(2024);
        let seen: HashSet<Vec<String>> = (0..100)
            .map(|_| select_reviewers(&mut rng, "u1", &roster(), 1, &[]).unwrap())
            .collect();

        assert!(seen.len() > 1, "selection always returned {:?}", seen);
    }

    #[test]
    fn test_seeded_pickers_agree() {
        let a = ReviewerPicker::seeded(42);
        let b = ReviewerPicker::seeded(42);

        for _ in 0..10 {
            assert_eq!(
                a.pick("u1", &roster(), 2, &[]).unwrap(),
                b.pick("u1", &roster(), 2, &[]).unwrap()
            );
        }
    }
}
