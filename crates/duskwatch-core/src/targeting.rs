//! Candidate scanning and scoring shared by support behaviors.
//!
//! Medic healing and medic support movement both need the same primitive:
//! scan a radius for living allies, score each candidate, and keep the best.
//! The scan fills a strategy-owned fixed-capacity buffer (no allocation on
//! the broad phase), filters out self / wrong faction / destroyed entries,
//! and breaks score ties by first-found — which is deterministic because the
//! proximity index answers in key order.

use glam::Vec2;

use crate::actor::{ActorId, Faction};
use crate::view::BattlefieldView;

/// Capacity of the per-strategy candidate scratch buffer.
///
/// More candidates than this in one scan are invisible until the next rescan,
/// which is acceptable for periodic scans.
pub const SCAN_CAPACITY: usize = 16;

/// Tuning for an ally scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanParams {
    /// Scan radius in world units.
    pub radius: f32,
    /// Weight of the wounded ratio in the candidate score.
    pub wounded_weight: f32,
}

/// A scored scan hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredCandidate {
    /// The candidate actor.
    pub id: ActorId,
    /// Its position at tick start.
    pub position: Vec2,
    /// Combined proximity + wounded score.
    pub score: f32,
    /// Missing health over maximum, in `[0, 1]`.
    pub wounded_ratio: f32,
}

/// Scores one candidate: normalized proximity plus weighted wounded ratio.
///
/// Proximity is `1 − distance/radius`, clamped to `[0, 1]` (0 for a
/// non-positive radius).
#[must_use]
pub fn score_candidate(distance: f32, radius: f32, wounded_ratio: f32, wounded_weight: f32) -> f32 {
    let proximity = if radius > 0.0 {
        (1.0 - distance / radius).clamp(0.0, 1.0)
    } else {
        0.0
    };
    proximity + wounded_ratio * wounded_weight
}

/// Returns the best-scored living ally near `origin`, or `None`.
///
/// Skips the seeker itself, candidates of a different faction, and destroyed
/// candidates encountered mid-scan. Ties keep the first-found candidate.
pub fn best_ally(
    view: &BattlefieldView<'_>,
    seeker: ActorId,
    faction: Faction,
    origin: Vec2,
    params: ScanParams,
    scratch: &mut [ActorId],
) -> Option<ScoredCandidate> {
    let hits = view.query_into(origin, params.radius, scratch);
    let mut best: Option<ScoredCandidate> = None;

    for candidate in scored_hits(view, seeker, faction, origin, params, &scratch[..hits]) {
        let replace = best
            .as_ref()
            .map_or(true, |current| candidate.score > current.score);
        if replace {
            best = Some(candidate);
        }
    }

    best
}

/// Returns every wounded living ally near `origin`, best-scored first,
/// truncated to `max` entries.
///
/// "Wounded" means missing at least one point of health. The sort is stable,
/// so equal scores keep first-found (key) order.
pub fn wounded_allies(
    view: &BattlefieldView<'_>,
    seeker: ActorId,
    faction: Faction,
    origin: Vec2,
    params: ScanParams,
    scratch: &mut [ActorId],
    max: usize,
) -> Vec<ScoredCandidate> {
    let hits = view.query_into(origin, params.radius, scratch);
    let mut wounded: Vec<ScoredCandidate> =
        scored_hits(view, seeker, faction, origin, params, &scratch[..hits])
            .filter(|candidate| candidate.wounded_ratio > 0.0)
            .collect();

    wounded.sort_by(|a, b| b.score.total_cmp(&a.score));
    wounded.truncate(max);
    wounded
}

/// Filters raw scan hits down to scored, living, same-faction allies.
fn scored_hits<'a>(
    view: &'a BattlefieldView<'a>,
    seeker: ActorId,
    faction: Faction,
    origin: Vec2,
    params: ScanParams,
    hits: &'a [ActorId],
) -> impl Iterator<Item = ScoredCandidate> + 'a {
    hits.iter().copied().filter_map(move |id| {
        if id == seeker {
            return None;
        }
        let snapshot = view.actor(id)?;
        if snapshot.faction != faction || snapshot.health.is_destroyed() {
            return None;
        }
        let wounded_ratio = snapshot.health.wounded_ratio();
        let distance = origin.distance(snapshot.position);
        Some(ScoredCandidate {
            id,
            position: snapshot.position,
            score: score_candidate(distance, params.radius, wounded_ratio, params.wounded_weight),
            wounded_ratio,
        })
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::helpers::{Bed, SEEKER_ID};
    use crate::view::BattlefieldView;

    const PARAMS: ScanParams = ScanParams {
        radius: 10.0,
        wounded_weight: 1.0,
    };

    fn scan_best(bed: &Bed) -> Option<ScoredCandidate> {
        let view = BattlefieldView::new(bed.snapshot());
        let mut scratch = [ActorId::new(0); SCAN_CAPACITY];
        best_ally(
            &view,
            ActorId::new(SEEKER_ID),
            Faction::Hostile,
            Vec2::ZERO,
            PARAMS,
            &mut scratch,
        )
    }

    #[test]
    fn empty_scene_yields_none() {
        let bed = Bed::no_player();
        assert!(scan_best(&bed).is_none());
    }

    #[test]
    fn seeker_is_excluded() {
        let mut bed = Bed::no_player();
        bed.add_actor(SEEKER_ID, Faction::Hostile, Vec2::ZERO, 20, 20);
        assert!(scan_best(&bed).is_none());
    }

    #[test]
    fn wrong_faction_is_excluded() {
        let mut bed = Bed::no_player();
        bed.add_actor(1, Faction::Feral, Vec2::new(2.0, 0.0), 20, 10);
        assert!(scan_best(&bed).is_none());
    }

    #[test]
    fn destroyed_candidates_are_skipped() {
        let mut bed = Bed::no_player();
        bed.add_actor(1, Faction::Hostile, Vec2::new(2.0, 0.0), 20, 0);
        let living = bed.add_actor(2, Faction::Hostile, Vec2::new(5.0, 0.0), 20, 20);

        let best = scan_best(&bed).unwrap();
        assert_eq!(best.id, living);
    }

    #[test]
    fn nearer_candidate_wins_at_equal_wounds() {
        let mut bed = Bed::no_player();
        let near = bed.add_actor(1, Faction::Hostile, Vec2::new(2.0, 0.0), 20, 10);
        bed.add_actor(2, Faction::Hostile, Vec2::new(8.0, 0.0), 20, 10);

        assert_eq!(scan_best(&bed).unwrap().id, near);
    }

    #[test]
    fn more_wounded_candidate_wins_at_equal_proximity() {
        let mut bed = Bed::no_player();
        bed.add_actor(1, Faction::Hostile, Vec2::new(0.0, 4.0), 20, 18);
        let hurt = bed.add_actor(2, Faction::Hostile, Vec2::new(0.0, -4.0), 20, 4);

        assert_eq!(scan_best(&bed).unwrap().id, hurt);
    }

    #[test]
    fn equal_scores_keep_first_found() {
        let mut bed = Bed::no_player();
        let first = bed.add_actor(1, Faction::Hostile, Vec2::new(0.0, 4.0), 20, 10);
        bed.add_actor(2, Faction::Hostile, Vec2::new(0.0, -4.0), 20, 10);

        assert_eq!(scan_best(&bed).unwrap().id, first);
    }

    #[test]
    fn out_of_radius_is_invisible() {
        let mut bed = Bed::no_player();
        bed.add_actor(1, Faction::Hostile, Vec2::new(50.0, 0.0), 20, 10);
        assert!(scan_best(&bed).is_none());
    }

    mod wounded_allies_tests {
        use super::*;

        fn scan_wounded(bed: &Bed, max: usize) -> Vec<ScoredCandidate> {
            let view = BattlefieldView::new(bed.snapshot());
            let mut scratch = [ActorId::new(0); SCAN_CAPACITY];
            wounded_allies(
                &view,
                ActorId::new(SEEKER_ID),
                Faction::Hostile,
                Vec2::ZERO,
                PARAMS,
                &mut scratch,
                max,
            )
        }

        #[test]
        fn full_health_allies_are_not_wounded() {
            let mut bed = Bed::no_player();
            bed.add_actor(1, Faction::Hostile, Vec2::new(2.0, 0.0), 20, 20);
            assert!(scan_wounded(&bed, 4).is_empty());
        }

        #[test]
        fn sorted_best_first_and_truncated() {
            let mut bed = Bed::no_player();
            let barely = bed.add_actor(1, Faction::Hostile, Vec2::new(3.0, 0.0), 20, 18);
            let worst = bed.add_actor(2, Faction::Hostile, Vec2::new(3.0, 1.0), 20, 2);
            let middle = bed.add_actor(3, Faction::Hostile, Vec2::new(3.0, -1.0), 20, 10);

            let all = scan_wounded(&bed, 4);
            let order: Vec<ActorId> = all.iter().map(|c| c.id).collect();
            assert_eq!(order, vec![worst, middle, barely]);

            let capped = scan_wounded(&bed, 2);
            assert_eq!(capped.len(), 2);
            assert_eq!(capped[0].id, worst);
        }
    }

    mod score_tests {
        use super::*;

        #[test]
        fn proximity_clamps() {
            // On top of the origin: full proximity.
            assert!((score_candidate(0.0, 10.0, 0.0, 1.0) - 1.0).abs() < 1e-6);
            // Outside the radius: proximity floors at zero.
            assert!(score_candidate(20.0, 10.0, 0.0, 1.0).abs() < 1e-6);
        }

        #[test]
        fn zero_radius_scores_by_wounds_only() {
            assert!((score_candidate(5.0, 0.0, 0.5, 2.0) - 1.0).abs() < 1e-6);
        }

        #[test]
        fn wounded_weight_scales() {
            let unweighted = score_candidate(5.0, 10.0, 0.5, 0.0);
            let weighted = score_candidate(5.0, 10.0, 0.5, 2.0);
            assert!((weighted - unweighted - 1.0).abs() < 1e-6);
        }
    }
}
