//! Stop identifier helpers.
//!
//! The live feeds address platforms (`635N`, `635S`) while the station
//! directory usually lists the parent stop (`635`). The trailing letter
//! is the per-direction platform suffix.

use super::Direction;

/// Strip a trailing alphabetic platform suffix, if present.
///
/// # Examples
///
/// ```
/// use subway_server::domain::base_id;
///
/// assert_eq!(base_id("123N"), "123");
/// assert_eq!(base_id("4567"), "4567");
/// assert_eq!(base_id(""), "");
/// ```
pub fn base_id(id: &str) -> &str {
    match id.as_bytes().last() {
        Some(last) if last.is_ascii_alphabetic() => &id[..id.len() - 1],
        _ => id,
    }
}

/// Direction encoded by the trailing letter of a feed stop id.
///
/// Only the upper-case compass letters count; anything else yields
/// [`Direction::Unknown`].
pub fn direction_of(stop_id: &str) -> Direction {
    match stop_id.as_bytes().last() {
        Some(b'N') => Direction::North,
        Some(b'S') => Direction::South,
        Some(b'E') => Direction::East,
        Some(b'W') => Direction::West,
        _ => Direction::Unknown,
    }
}
