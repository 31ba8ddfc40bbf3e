//! Strip layout and spin-animation planning.
//!
//! The rendered strip is the selected participant list repeated end-to-end.
//! A spin scrolls the strip left under a fixed center marker for a fixed
//! number of pseudo-rotations, then a silent reset pulls the offset back to
//! the middle copy so it never grows across draws.

use serde::{Deserialize, Serialize};

use crate::participants::Participant;

/// Timing curve clients apply to the scroll transition.
pub const SPIN_EASING: &str = "cubic-bezier(0.17, 0.67, 0.34, 1)";

/// Full pseudo-rotations the strip travels before landing.
pub const DEFAULT_ROTATIONS: usize = 6;

/// Repeat count for the rendered strip. A single selected participant gets a
/// short strip; larger selections get enough copies for a multi-rotation spin.
pub fn repeat_factor(item_count: usize) -> usize {
    if item_count <= 1 { 6 } else { 24 }
}

/// One rendered cell of the repeated strip, keyed per copy and carrying a
/// back-reference to the participant it was cloned from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StripCell {
    pub key: String,
    pub participant_id: String,
    pub name: String,
    pub image: String,
}

/// Expand the participant list `repeat` times. The result always has length
/// `repeat * participants.len()`.
pub fn build_sequence(participants: &[Participant], repeat: usize) -> Vec<StripCell> {
    let mut cells = Vec::with_capacity(repeat * participants.len());
    for copy in 0..repeat {
        for participant in participants {
            cells.push(StripCell {
                key: format!("{}-{}", participant.id, copy),
                participant_id: participant.id.clone(),
                name: participant.name.clone(),
                image: participant.image.clone(),
            });
        }
    }
    cells
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SpinPlan {
    /// Index of the landing cell within the repeated strip, before wrapping.
    pub final_index: usize,
    /// Animated horizontal offset applied over the spin transition.
    pub final_offset_px: f64,
    /// Offset re-applied without a transition once the spin has landed.
    pub rest_offset_px: f64,
}

/// Half the slack between the viewport and one item, so the landed item's
/// center sits under the marker rather than its left edge.
pub fn center_offset(viewport_width: f64, item_step: f64) -> f64 {
    ((viewport_width - item_step) / 2.0).max(0.0)
}

/// Plan the scroll for landing on `chosen_index` of the unique list.
///
/// The landing cell sits in the middle copy of the strip, pushed forward by
/// `rotations` full passes over the unique list so the spin has room to
/// travel without running off either end.
pub fn plan_spin(
    chosen_index: usize,
    item_count: usize,
    repeat: usize,
    rotations: usize,
    item_step: f64,
    viewport_width: f64,
) -> SpinPlan {
    let base_index = (repeat / 2) * item_count + chosen_index;
    let final_index = base_index + item_count * rotations;
    let center = center_offset(viewport_width, item_step);

    SpinPlan {
        final_index,
        final_offset_px: (final_index as f64 * item_step - center).max(0.0),
        rest_offset_px: (base_index as f64 * item_step - center).max(0.0),
    }
}

/// Resolve a planned landing index against the materialized sequence,
/// wrapping when the list composition changed between planning and landing.
pub fn landing_index(final_index: usize, sequence_len: usize) -> usize {
    if sequence_len == 0 {
        return 0;
    }
    if final_index < sequence_len {
        final_index
    } else {
        final_index % sequence_len
    }
}

/// At-rest offset centering the middle copy under the marker.
pub fn initial_offset(
    item_count: usize,
    repeat: usize,
    item_step: f64,
    viewport_width: f64,
) -> f64 {
    let base = ((repeat / 2) * item_count) as f64 * item_step;
    (base - center_offset(viewport_width, item_step)).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participants(n: usize) -> Vec<Participant> {
        (0..n)
            .map(|i| Participant {
                id: format!("u{i}"),
                name: format!("Player {i}"),
                image: String::new(),
            })
            .collect()
    }

    const ITEM_STEP: f64 = 184.0; // 160px item + 24px gap
    const VIEWPORT: f64 = 900.0;

    #[test]
    fn repeat_factor_shrinks_for_trivial_lists() {
        assert_eq!(repeat_factor(0), 6);
        assert_eq!(repeat_factor(1), 6);
        assert_eq!(repeat_factor(2), 24);
        assert_eq!(repeat_factor(10), 24);
    }

    #[test]
    fn sequence_has_repeat_times_count_cells() {
        let items = participants(5);
        let repeat = repeat_factor(items.len());
        let sequence = build_sequence(&items, repeat);
        assert_eq!(sequence.len(), repeat * items.len());

        // Each cell points back at its source participant
        assert_eq!(sequence[0].participant_id, "u0");
        assert_eq!(sequence[5].participant_id, "u0");
        assert_eq!(sequence[0].key, "u0-0");
        assert_eq!(sequence[5].key, "u0-1");
    }

    #[test]
    fn landing_cell_matches_chosen_participant() {
        for count in 1..=8usize {
            let items = participants(count);
            let repeat = repeat_factor(count);
            let sequence = build_sequence(&items, repeat);

            for chosen in 0..count {
                let plan = plan_spin(chosen, count, repeat, DEFAULT_ROTATIONS, ITEM_STEP, VIEWPORT);
                assert!(plan.final_offset_px >= 0.0);
                assert!(plan.rest_offset_px >= 0.0);
                assert!(plan.rest_offset_px <= plan.final_offset_px);

                let landing = landing_index(plan.final_index, sequence.len());
                assert_eq!(landing % count, chosen % count);
                assert_eq!(sequence[landing].participant_id, items[chosen].id);
            }
        }
    }

    #[test]
    fn single_item_strip_wraps_the_landing_index() {
        // repeat 6 with 6 rotations overshoots a 6-cell strip
        let plan = plan_spin(0, 1, 6, DEFAULT_ROTATIONS, ITEM_STEP, VIEWPORT);
        assert_eq!(plan.final_index, 9);
        assert_eq!(landing_index(plan.final_index, 6), 3);
    }

    #[test]
    fn landing_index_tolerates_empty_sequences() {
        assert_eq!(landing_index(42, 0), 0);
    }

    #[test]
    fn center_offset_never_goes_negative() {
        assert_eq!(center_offset(100.0, 184.0), 0.0);
        assert!((center_offset(900.0, 184.0) - 358.0).abs() < 1e-9);
    }

    #[test]
    fn narrow_viewport_clamps_offsets_at_zero() {
        let plan = plan_spin(0, 1, 1, 0, 10.0, 1000.0);
        assert_eq!(plan.final_offset_px, 0.0);
        assert_eq!(plan.rest_offset_px, 0.0);
    }

    #[test]
    fn initial_offset_centers_the_middle_copy() {
        let offset = initial_offset(4, 24, ITEM_STEP, VIEWPORT);
        let expected = (12.0 * 4.0 * ITEM_STEP) - center_offset(VIEWPORT, ITEM_STEP);
        assert!((offset - expected).abs() < 1e-9);
    }
}
