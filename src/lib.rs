//! University course timetabling as a constraint satisfaction problem.
//!
//! Each class session (lecture, tutorial, lab) of a cohort is assigned an
//! instructor, a room and two consecutive time slots on the same day so that
//! no instructor, room or cohort is double-booked.
//!
//! # Modules
//!
//! - **`models`**: Input records (`Session`, `Instructor`, `Room`, `TimeSlot`)
//!   and outputs (`Assignment`, `Solution`)
//! - **`domain`**: Candidate enumeration per session with diagnostics for
//!   sessions that can never be placed
//! - **`solver`**: Backtracking search with MRV, LCV and forward checking
//! - **`validation`**: Input integrity checks (duplicate IDs, day names,
//!   slot ordering)
//! - **`request`**: End-to-end pipeline from raw records to a timetable
//!
//! # Example
//!
//! ```
//! use u_timetable::models::{Instructor, Room, Session, TimeSlot};
//! use u_timetable::request::TimetableRequest;
//!
//! let request = TimetableRequest::new(
//!     vec![Session::lecture("S1", "CSC 111", "1")],
//!     vec![Instructor::professor("P1").with_course("CSC 111")],
//!     vec![Room::lecture("H1")],
//!     vec![
//!         TimeSlot::new("T1", "Sunday", "09:00"),
//!         TimeSlot::new("T2", "Sunday", "10:00"),
//!     ],
//! );
//!
//! let result = request.run().unwrap();
//! let solution = result.solution().unwrap();
//! assert_eq!(solution.assignments()[0].room_id, "H1");
//! ```
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach",
//!   Ch. 6

pub mod domain;
pub mod models;
pub mod request;
pub mod solver;
pub mod validation;

pub use domain::build_domains;
pub use solver::solve;
