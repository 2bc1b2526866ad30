//! Exam Booking Registry
//!
//! ## Current API
//!
//! - Validate exam records
//! - Book exams into a room-number index
//! - Detect same-day room conflicts
//! - Query exams by room range
//!
pub mod error;
pub mod exam;
pub mod index;
pub mod validation;

pub use error::Error;
pub use exam::{Exam, ExamInput};
pub use index::LocationIndex;
