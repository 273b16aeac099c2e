//! Draw generation. All randomness comes from the OS entropy source and
//! pools are permuted whole, so selections are duplicate-free and uniform
//! without modulo bias.

use crate::core::catalog::{ARCHETYPE_COUNT, SIGNATURE_COUNT};
use crate::core::error::NirmanakayaError;
use crate::core::status::Status;
use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// One card in a spread. `position` is None for durable spreads (frames
/// provide context), forge draws, and thread draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draw {
    pub position: Option<u8>,
    pub transient: u8,
    pub status: Status,
}

fn shuffled_pool(len: u8) -> Vec<u8> {
    let mut pool: Vec<u8> = (0..len).collect();
    pool.shuffle(&mut OsRng);
    pool
}

fn random_status() -> Status {
    *Status::ALL
        .choose(&mut OsRng)
        .unwrap_or(&Status::Balanced)
}

/// Generate a spread of `count` draws: distinct transients sampled from a
/// shuffled [0,78) pool, distinct positions from a shuffled [0,22) pool
/// for non-durable spreads, and an independent uniform status per draw.
pub fn generate_spread(count: usize, durable: bool) -> Result<Vec<Draw>, NirmanakayaError> {
    if count > SIGNATURE_COUNT as usize {
        return Err(NirmanakayaError::ValidationError(format!(
            "spread of {} exceeds the {}-signature pool",
            count, SIGNATURE_COUNT
        )));
    }
    if !durable && count > ARCHETYPE_COUNT as usize {
        return Err(NirmanakayaError::ValidationError(format!(
            "spread of {} exceeds the {} positions",
            count, ARCHETYPE_COUNT
        )));
    }
    let position_pool = if durable { Vec::new() } else { shuffled_pool(ARCHETYPE_COUNT) };
    let transient_pool = shuffled_pool(SIGNATURE_COUNT);

    Ok((0..count)
        .map(|i| Draw {
            position: if durable { None } else { Some(position_pool[i]) },
            transient: transient_pool[i],
            status: random_status(),
        })
        .collect())
}

/// A single positionless draw, used by forge mode and thread operations.
pub fn single_draw() -> Draw {
    Draw {
        position: None,
        transient: shuffled_pool(SIGNATURE_COUNT)[0],
        status: random_status(),
    }
}

pub fn imbalanced_count(draws: &[Draw]) -> usize {
    draws.iter().filter(|d| d.status.is_imbalanced()).count()
}
