use chrono::NaiveDate;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid course ID format: {0}")]
    InvalidCourseId(String),
    #[error("Invalid location: {0}")]
    InvalidLocation(i64),
    #[error("Invalid date format: {0}")]
    InvalidDate(String),
    #[error("Invalid number of students: {0}")]
    InvalidStudentCount(i64),
    #[error("Room {location} is already booked for {date}")]
    RoomAlreadyBooked { location: u32, date: NaiveDate },
    #[error("Room {0} already holds a booking")]
    DuplicateLocation(u32),
    #[error("Start location {low} must be less than or equal to end location {high}")]
    InvalidRange { low: u32, high: u32 },
}

impl Error {
    /// True for the four errors raised before an exam ever reaches the index
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidCourseId(_)
                | Error::InvalidLocation(_)
                | Error::InvalidDate(_)
                | Error::InvalidStudentCount(_)
        )
    }
}

// Lets an already validated `Exam` pass through `TryInto<Exam>` bounds.
impl From<std::convert::Infallible> for Error {
    fn from(e: std::convert::Infallible) -> Self {
        match e {}
    }
}
