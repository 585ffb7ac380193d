//! Time slot and slot-pair models.
//!
//! A session always occupies two consecutive slots on the same day. The
//! slot-pair list derived from an ordered slot sequence links each slot to
//! its immediate successor when both fall on the same day; the last slot of
//! a day has no successor and cannot start a session.
//!
//! # Day Order
//! Slots are ordered by (day rank, start time) with the teaching week
//! Sunday → Thursday. Start times are `H:MM` / `HH:MM` strings.

use log::warn;
use serde::{Deserialize, Serialize};

/// Teaching days in week order.
pub const TEACHING_DAYS: [&str; 5] = ["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday"];

/// A bookable time slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Unique slot identifier.
    pub id: String,
    /// Day name (e.g. "Sunday").
    pub day: String,
    /// Start time, `HH:MM`.
    pub start_time: String,
}

/// Two consecutive same-day slots: the time a session occupies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotPair {
    /// Starting slot id.
    pub first: String,
    /// Following slot id.
    pub second: String,
}

impl TimeSlot {
    /// Creates a new time slot.
    pub fn new(id: impl Into<String>, day: impl Into<String>, start_time: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            day: day.into(),
            start_time: start_time.into(),
        }
    }

    /// Position of this slot's day in the teaching week, if recognized.
    pub fn day_rank(&self) -> Option<usize> {
        day_rank(&self.day)
    }

    /// Start time as minutes after midnight, if it parses.
    pub fn start_minutes(&self) -> Option<u32> {
        let (h, m) = self.start_time.trim().split_once(':')?;
        let h: u32 = h.parse().ok()?;
        let m: u32 = m.parse().ok()?;
        if h < 24 && m < 60 {
            Some(h * 60 + m)
        } else {
            None
        }
    }
}

impl SlotPair {
    /// Creates a new slot-pair.
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }

    /// Whether the pair contains a slot.
    #[inline]
    pub fn contains(&self, slot_id: &str) -> bool {
        self.first == slot_id || self.second == slot_id
    }

    /// Whether two pairs share at least one slot.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.contains(&other.first) || self.contains(&other.second)
    }
}

/// Rank of a day name in the teaching week.
pub fn day_rank(day: &str) -> Option<usize> {
    TEACHING_DAYS.iter().position(|d| *d == day)
}

/// Orders slots by (day rank, start time).
///
/// If any slot names a day outside the teaching week, the input order is
/// kept unchanged for the whole list. Slots whose start time does not parse
/// sort after parsable ones on the same day, by their raw text.
pub fn order_time_slots(slots: &[TimeSlot]) -> Vec<TimeSlot> {
    if let Some(bad) = slots.iter().find(|s| s.day_rank().is_none()) {
        warn!(
            "time slot '{}' has unrecognized day '{}'; keeping input order",
            bad.id, bad.day
        );
        return slots.to_vec();
    }

    let mut ordered = slots.to_vec();
    ordered.sort_by(|a, b| {
        let ka = (a.day_rank(), a.start_minutes().unwrap_or(u32::MAX));
        let kb = (b.day_rank(), b.start_minutes().unwrap_or(u32::MAX));
        ka.cmp(&kb).then_with(|| a.start_time.cmp(&b.start_time))
    });
    ordered
}

/// Derives the slot-pairs of an ordered slot sequence.
///
/// Each slot is paired with the next one iff both share a day. The input
/// order is trusted as given.
pub fn slot_pairs(ordered_slots: &[TimeSlot]) -> Vec<SlotPair> {
    ordered_slots
        .windows(2)
        .filter(|w| w[0].day == w[1].day)
        .map(|w| SlotPair::new(&w[0].id, &w[1].id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(id: &str, day: &str, start: &str) -> TimeSlot {
        TimeSlot::new(id, day, start)
    }

    #[test]
    fn test_start_minutes() {
        assert_eq!(slot("a", "Sunday", "09:00").start_minutes(), Some(540));
        assert_eq!(slot("a", "Sunday", "9:30").start_minutes(), Some(570));
        assert_eq!(slot("a", "Sunday", "25:00").start_minutes(), None);
        assert_eq!(slot("a", "Sunday", "noon").start_minutes(), None);
    }

    #[test]
    fn test_order_by_day_then_time() {
        let slots = vec![
            slot("m9", "Monday", "09:00"),
            slot("s11", "Sunday", "11:00"),
            slot("s9", "Sunday", "9:00"),
            slot("s10", "Sunday", "10:00"),
        ];
        let ordered = order_time_slots(&slots);
        let ids: Vec<&str> = ordered.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["s9", "s10", "s11", "m9"]);
    }

    #[test]
    fn test_unrecognized_day_keeps_input_order() {
        let slots = vec![
            slot("b", "Monday", "09:00"),
            slot("a", "Friday", "09:00"),
            slot("c", "Sunday", "09:00"),
        ];
        let ordered = order_time_slots(&slots);
        assert_eq!(ordered, slots);
    }

    #[test]
    fn test_slot_pairs_stop_at_day_boundary() {
        let slots = vec![
            slot("s9", "Sunday", "09:00"),
            slot("s10", "Sunday", "10:00"),
            slot("s11", "Sunday", "11:00"),
            slot("m9", "Monday", "09:00"),
        ];
        let pairs = slot_pairs(&slots);
        assert_eq!(
            pairs,
            vec![SlotPair::new("s9", "s10"), SlotPair::new("s10", "s11")]
        );
    }

    #[test]
    fn test_slot_pairs_empty_when_every_day_has_one_slot() {
        let slots = vec![slot("s9", "Sunday", "09:00"), slot("m9", "Monday", "09:00")];
        assert!(slot_pairs(&slots).is_empty());
        assert!(slot_pairs(&[]).is_empty());
    }

    #[test]
    fn test_pair_overlap() {
        let a = SlotPair::new("s9", "s10");
        let b = SlotPair::new("s10", "s11");
        let c = SlotPair::new("s11", "s12");
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(b.overlaps(&c));
        assert!(!a.overlaps(&c));
        assert!(a.overlaps(&a));
    }
}
