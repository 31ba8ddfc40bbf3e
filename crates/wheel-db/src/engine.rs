//! Weighted draw engine.
//!
//! Each prior win in the scoring window multiplies a participant's draw
//! weight by the decay constant, so frequent winners fade without ever
//! becoming unreachable.

use std::collections::HashMap;

use rand::Rng;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};

use crate::participants::Participant;

pub const DEFAULT_DECAY: f64 = 0.2;

/// Substituted for zero or non-finite weights so every participant keeps a
/// non-zero draw probability.
pub const WEIGHT_FLOOR: f64 = 1e-6;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeightDetail {
    pub participant_id: String,
    pub name: String,
    pub wins: i64,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DrawOutcome {
    pub winner: Participant,
    /// Position of the winner within the input list.
    pub winner_index: usize,
    pub total_weight: f64,
    pub weights: Vec<WeightDetail>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DrawError {
    #[error("no participants")]
    NoParticipants,
}

/// Draw weight for a participant with `wins` prior wins.
pub fn win_weight(decay: f64, wins: i64) -> f64 {
    let exponent = wins.clamp(0, i32::MAX as i64) as i32;
    let weight = decay.powi(exponent);
    if !weight.is_finite() || weight <= 0.0 {
        WEIGHT_FLOOR
    } else {
        weight
    }
}

pub fn pick_winner(
    participants: &[Participant],
    win_counts: &HashMap<String, i64>,
    decay: f64,
) -> Result<DrawOutcome, DrawError> {
    let mut rng = OsRng;
    pick_winner_with_rng(participants, win_counts, decay, &mut rng)
}

pub fn pick_winner_with_rng<R: Rng + ?Sized>(
    participants: &[Participant],
    win_counts: &HashMap<String, i64>,
    decay: f64,
    rng: &mut R,
) -> Result<DrawOutcome, DrawError> {
    if participants.is_empty() {
        return Err(DrawError::NoParticipants);
    }

    let mut weights = Vec::with_capacity(participants.len());
    let mut total_weight = 0.0f64;

    for participant in participants {
        let wins = win_counts.get(&participant.id).copied().unwrap_or(0);
        let weight = win_weight(decay, wins);
        total_weight += weight;
        weights.push(WeightDetail {
            participant_id: participant.id.clone(),
            name: participant.name.clone(),
            wins,
            weight,
        });
    }

    let winner_index = if total_weight <= 0.0 {
        // Degenerate fallback: nothing to sample from.
        0
    } else {
        let mut remaining = rng.gen_range(0.0..total_weight);
        let mut index = participants.len() - 1;
        for (i, detail) in weights.iter().enumerate() {
            if remaining < detail.weight {
                index = i;
                break;
            }
            remaining -= detail.weight;
        }
        // The final element absorbs float underflow at the tail.
        index
    };

    Ok(DrawOutcome {
        winner: participants[winner_index].clone(),
        winner_index,
        total_weight,
        weights,
    })
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
