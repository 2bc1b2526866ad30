use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::{error::Error, validation};

/// A validated exam booking.
///
/// Fields are read-only; the only ways to obtain an `Exam` are [`Exam::new`]
/// and converting an [`ExamInput`], both of which validate every field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ExamInput")]
pub struct Exam {
    course_id: String,
    location: u32,
    date: NaiveDateTime,
    num_students: u32,
}

/// Unvalidated exam fields, as read from a schedule file or a caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamInput {
    pub course_id: String,
    pub location: i64,
    pub date: String,
    pub num_students: i64,
}

impl Exam {
    pub fn new(
        course_id: impl Into<String>,
        location: i64,
        date: NaiveDateTime,
        num_students: i64,
    ) -> Result<Self, Error> {
        let course_id = course_id.into();
        validation::course_id(&course_id)?;
        let location = validation::location(location)?;
        let num_students = validation::student_count(num_students)?;

        Ok(Exam {
            course_id,
            location,
            date,
            num_students,
        })
    }

    pub fn course_id(&self) -> &str {
        &self.course_id
    }

    /// Room number, also the index key
    pub fn location(&self) -> u32 {
        self.location
    }

    pub fn date(&self) -> NaiveDateTime {
        self.date
    }

    /// Calendar day of the exam, used for booking conflicts
    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }

    pub fn num_students(&self) -> u32 {
        self.num_students
    }
}

impl TryFrom<ExamInput> for Exam {
    type Error = Error;

    fn try_from(input: ExamInput) -> Result<Self, Self::Error> {
        let ExamInput {
            course_id,
            location,
            date,
            num_students,
        } = input;

        validation::course_id(&course_id)?;
        let location = validation::location(location)?;
        let date = validation::date(&date)?;
        let num_students = validation::student_count(num_students)?;

        Ok(Exam {
            course_id,
            location,
            date,
            num_students,
        })
    }
}

impl fmt::Display for Exam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Course: {}", self.course_id)?;
        writeln!(f, "Location: Room {}", self.location)?;
        writeln!(f, "Date: {}", self.date)?;
        write!(f, "Students: {}", self.num_students)
    }
}
