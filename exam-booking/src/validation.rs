//! Field checks run before an exam may enter the index.
//!
//! Each check is independent. Callers run them in a fixed order and stop at
//! the first failure: course id, location, date, student count.

use chrono::NaiveDateTime;

use crate::error::Error;

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Course ids look like `ABC-123-456`
pub fn course_id(course_id: &str) -> Result<(), Error> {
    if is_course_id(course_id) {
        Ok(())
    } else {
        Err(Error::InvalidCourseId(course_id.to_string()))
    }
}

fn is_course_id(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != 11 {
        return false;
    }

    bytes[..3].iter().all(u8::is_ascii_uppercase)
        && bytes[3] == b'-'
        && bytes[4..7].iter().all(u8::is_ascii_digit)
        && bytes[7] == b'-'
        && bytes[8..].iter().all(u8::is_ascii_digit)
}

/// Room numbers are positive and must fit the index key
pub fn location(location: i64) -> Result<u32, Error> {
    match u32::try_from(location) {
        Ok(l) if l > 0 => Ok(l),
        _ => Err(Error::InvalidLocation(location)),
    }
}

/// Parses an ISO-8601 style local date/time, with either `T` or a space
/// between the date and the time. Surrounding whitespace is rejected, as it
/// is for course ids.
pub fn date(date: &str) -> Result<NaiveDateTime, Error> {
    // chrono skips leading whitespace before numeric fields
    if date.trim() != date {
        return Err(Error::InvalidDate(date.to_string()));
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(date, fmt).ok())
        .ok_or_else(|| Error::InvalidDate(date.to_string()))
}

pub fn student_count(num_students: i64) -> Result<u32, Error> {
    match u32::try_from(num_students) {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(Error::InvalidStudentCount(num_students)),
    }
}
