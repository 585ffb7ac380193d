//! Timetabling domain models.
//!
//! Provides the records a caller hands to the engine (sessions,
//! instructors, rooms, time slots) and the values the engine hands back
//! (assignments and solutions).
//!
//! # Domain Mappings
//!
//! | u-timetable | CSP term | University |
//! |-------------|----------|------------|
//! | Session | Variable | Lecture / Tutorial / Lab section |
//! | Assignment | Value | Instructor × Room × Slot-pair |
//! | Domain | Domain | Legal bookings for one section |
//! | Solution | Complete assignment | Semester timetable |

mod assignment;
mod instructor;
mod room;
mod session;
mod solution;
mod time_slot;

pub use assignment::Assignment;
pub use instructor::{Instructor, InstructorRole};
pub use room::{Room, RoomType};
pub use session::{select_cohorts, DeliveryType, Session, GENERAL_SPECIALIZATION};
pub use solution::{Solution, Violation, ViolationType};
pub use time_slot::{day_rank, order_time_slots, slot_pairs, SlotPair, TimeSlot, TEACHING_DAYS};
