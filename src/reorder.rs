//! Reordering of section lists.
//!
//! Every function takes the current order by reference and returns a new
//! `Vec`; the input is never mutated. Moves that are not legal leave the
//! order unchanged (the returned `Vec` equals the input), which is what the
//! editor relies on when a drag ends outside the list or an arrow button is
//! pressed at either end.

use crate::error::{Error, Result};
use crate::model::{Section, SectionId};

/// Direction for single-step moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the start of the document
    Up,
    /// Towards the end of the document
    Down,
}

/// Relocate the section at `from` so that it ends up at `to`.
///
/// This is a single-element move, not a swap: the sections in between shift
/// by one. Out-of-range indices and `from == to` are no-ops.
pub fn move_by_index(sections: &[Section], from: usize, to: usize) -> Vec<Section> {
    match try_move_by_index(sections, from, to) {
        Ok(moved) => moved,
        Err(e) => {
            log::debug!("Ignoring move {} -> {}: {}", from, to, e);
            sections.to_vec()
        }
    }
}

/// Like [`move_by_index`], but reports illegal indices as
/// [`Error::InvalidIndex`]. `from == to` is not an error.
pub fn try_move_by_index(sections: &[Section], from: usize, to: usize) -> Result<Vec<Section>> {
    let len = sections.len();
    for index in [from, to] {
        if index >= len {
            return Err(Error::InvalidIndex { index, len });
        }
    }

    let mut moved = sections.to_vec();
    if from < to {
        moved[from..=to].rotate_left(1);
    } else if from > to {
        moved[to..=from].rotate_right(1);
    }
    Ok(moved)
}

/// Move the section with `id` one step up or down.
///
/// No-op when the id is absent, or when the section is already first
/// (moving up) or last (moving down).
pub fn move_relative(sections: &[Section], id: &SectionId, direction: Direction) -> Vec<Section> {
    let Some(index) = position(sections, id) else {
        log::debug!("Ignoring relative move of unknown section {}", id);
        return sections.to_vec();
    };

    let target = match direction {
        Direction::Up => index.checked_sub(1),
        Direction::Down => index.checked_add(1),
    };

    match target {
        Some(to) => move_by_index(sections, index, to),
        None => sections.to_vec(),
    }
}

/// Move the dragged section `active` to where `over` currently sits.
///
/// This is how a drag gesture ending on another section is applied. No-op if
/// either id is absent or both are the same.
pub fn move_by_id(sections: &[Section], active: &SectionId, over: &SectionId) -> Vec<Section> {
    if active == over {
        return sections.to_vec();
    }
    match (position(sections, active), position(sections, over)) {
        (Some(from), Some(to)) => move_by_index(sections, from, to),
        _ => sections.to_vec(),
    }
}

fn position(sections: &[Section], id: &SectionId) -> Option<usize> {
    sections.iter().position(|s| &s.id == id)
}
