//! Save format for resuming a match.
//!
//! ```text
//! offset size field
//! 0      4    magic "MNGL"
//! 4      4    version (u32 LE)
//! 8      4    CRC32 of the payload (u32 LE)
//! 12     4    payload length (u32 LE)
//! 16     ..   payload
//! ```
//!
//! Payload: ruleset, self-sow flag, current player, status, winner,
//! treasury 1, treasury 2, slot count, then one byte per slot.

use crate::board::Board;
use crate::config::MatchConfig;
use crate::error::SnapshotError;
use crate::game::{MatchState, Outcome, Status};
use crate::rules::Ruleset;
use crate::types::Player;

const MAGIC: &[u8; 4] = b"MNGL";
const VERSION: u32 = 1;
const HEADER_SIZE: usize = 16;
const FIXED_PAYLOAD: usize = 8;

pub fn to_bytes(state: &MatchState) -> Vec<u8> {
    let config = state.config();
    let slots = state.board().slots();

    let mut payload = Vec::with_capacity(FIXED_PAYLOAD + slots.len());
    payload.push(match config.ruleset {
        Ruleset::Kalah => 0,
        Ruleset::Turkish => 1,
    });
    payload.push(u8::from(config.self_sow));
    payload.push(state.current_player().number());
    payload.push(u8::from(state.is_game_over()));
    payload.push(state.outcome().map_or(0, Outcome::code));
    // Treasuries never exceed the 48 stones in play.
    payload.push(state.treasury(Player::One) as u8);
    payload.push(state.treasury(Player::Two) as u8);
    payload.push(slots.len() as u8);
    payload.extend_from_slice(slots);

    let mut out = Vec::with_capacity(HEADER_SIZE + payload.len());
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&VERSION.to_le_bytes());
    out.extend_from_slice(&crc32fast::hash(&payload).to_le_bytes());
    out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    out.extend_from_slice(&payload);
    out
}

pub fn from_bytes(data: &[u8]) -> Result<MatchState, SnapshotError> {
    if data.len() < HEADER_SIZE + FIXED_PAYLOAD {
        return Err(SnapshotError::Truncated {
            expected: HEADER_SIZE + FIXED_PAYLOAD,
            actual: data.len(),
        });
    }
    if &data[0..4] != MAGIC {
        return Err(SnapshotError::BadMagic);
    }

    let version = read_u32_le(data, 4)?;
    if version != VERSION {
        return Err(SnapshotError::UnsupportedVersion {
            expected: VERSION,
            actual: version,
        });
    }

    let expected_crc = read_u32_le(data, 8)?;
    let payload_len = read_u32_le(data, 12)? as usize;
    let payload = &data[HEADER_SIZE..];
    if payload.len() != payload_len {
        return Err(SnapshotError::Invalid(format!(
            "payload length {} does not match header {payload_len}",
            payload.len()
        )));
    }

    let actual_crc = crc32fast::hash(payload);
    if actual_crc != expected_crc {
        return Err(SnapshotError::CrcMismatch {
            expected: expected_crc,
            actual: actual_crc,
        });
    }

    let ruleset = match payload[0] {
        0 => Ruleset::Kalah,
        1 => Ruleset::Turkish,
        other => return Err(invalid(format!("unknown ruleset code {other}"))),
    };
    let self_sow = match payload[1] {
        0 => false,
        1 => true,
        other => return Err(invalid(format!("bad self-sow flag {other}"))),
    };
    let current = Player::from_number(payload[2])
        .ok_or_else(|| invalid(format!("unknown player {}", payload[2])))?;
    let status = match (payload[3], payload[4]) {
        (0, 0) => Status::InProgress,
        (0, winner) => return Err(invalid(format!("running match records winner {winner}"))),
        (1, 0) => Status::Finished(Outcome::Draw),
        (1, winner) => Status::Finished(Outcome::Win(
            Player::from_number(winner).ok_or_else(|| invalid(format!("unknown winner {winner}")))?,
        )),
        (other, _) => return Err(invalid(format!("unknown status code {other}"))),
    };
    let treasury = [u32::from(payload[5]), u32::from(payload[6])];

    let slot_count = payload[7] as usize;
    let slots = &payload[FIXED_PAYLOAD..];
    if slots.len() != slot_count {
        return Err(invalid(format!(
            "expected {slot_count} slots, got {}",
            slots.len()
        )));
    }
    let board = Board::from_slots(ruleset, slots).ok_or_else(|| {
        invalid(format!(
            "{ruleset} board needs {} slots, got {slot_count}",
            ruleset.ring_size()
        ))
    })?;

    Ok(MatchState::from_parts(
        MatchConfig { ruleset, self_sow },
        board,
        current,
        treasury,
        status,
    )?)
}

fn invalid(msg: String) -> SnapshotError {
    SnapshotError::Invalid(msg)
}

fn read_u32_le(data: &[u8], offset: usize) -> Result<u32, SnapshotError> {
    if offset + 4 > data.len() {
        return Err(SnapshotError::Truncated {
            expected: offset + 4,
            actual: data.len(),
        });
    }
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&data[offset..offset + 4]);
    Ok(u32::from_le_bytes(bytes))
}
