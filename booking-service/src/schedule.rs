use std::{fmt, path::Path};

use anyhow::Context;
use exam_booking::{Error, Exam, ExamInput, LocationIndex};
use tracing::{info, warn};

use crate::config::EnvVars;

/// Outcome of booking a schedule and running the configured range query
#[derive(Debug)]
pub struct Report {
    pub booked: Vec<Exam>,
    pub rejected: Vec<(ExamInput, Error)>,
    pub range: (u32, u32),
    /// Exams in the range, or the reason the query was refused
    pub in_range: Result<Vec<Exam>, Error>,
}

/// Five bookable exams followed by three that must be refused: a malformed
/// course id, a same-day repeat of room 50, and a negative student count.
pub fn sample_schedule() -> Vec<ExamInput> {
    [
        ("CSE-101-456", 50, "2024-12-01T09:00:00", 30),
        ("MAT-202-789", 45, "2024-12-01T14:00:00", 25),
        ("PHY-303-123", 60, "2024-12-02T09:00:00", 35),
        ("CHE-404-234", 42, "2024-12-02T14:00:00", 28),
        ("BIO-505-345", 55, "2024-12-03T09:00:00", 32),
        ("CSE-1-1", 70, "2024-12-04T09:00:00", 30),
        ("ENG-606-567", 50, "2024-12-01T09:00:00", 40),
        ("ENG-606-567", 75, "2024-12-04T09:00:00", -5),
    ]
    .into_iter()
    .map(|(course_id, location, date, num_students)| ExamInput {
        course_id: course_id.to_string(),
        location,
        date: date.to_string(),
        num_students,
    })
    .collect()
}

pub fn parse_schedule(json: &str) -> anyhow::Result<Vec<ExamInput>> {
    serde_json::from_str(json).context("schedule must be a JSON array of exams")
}

pub fn load_schedule(path: &Path) -> anyhow::Result<Vec<ExamInput>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("unable to read schedule {}", path.display()))?;
    parse_schedule(&json).with_context(|| format!("unable to parse schedule {}", path.display()))
}

/// Books every exam in order, then queries the configured room range.
///
/// Rejected bookings are logged and kept in the report; they do not stop the
/// run.
pub fn book_schedule(schedule: Vec<ExamInput>, range: (u32, u32)) -> Report {
    let mut index = LocationIndex::new();
    let mut rejected = vec![];

    for input in schedule {
        match index.book(input.clone()) {
            Ok(()) => {
                info!(
                    course_id = %input.course_id,
                    location = input.location,
                    date = %input.date,
                    "booked exam"
                );
            }
            Err(e) => {
                warn!(
                    course_id = %input.course_id,
                    location = input.location,
                    validation = e.is_validation(),
                    error = %e,
                    "failed to book exam"
                );
                rejected.push((input, e));
            }
        }
    }

    let (low, high) = range;
    let in_range = index
        .find_in_range(low, high)
        .map(|exams| exams.into_iter().cloned().collect());
    info!(size = index.len(), height = index.height(), "schedule booked");

    Report {
        booked: index.iter().cloned().collect(),
        rejected,
        range,
        in_range,
    }
}

#[tracing::instrument(skip_all, err(Debug))]
pub fn run(env_vars: &EnvVars) -> anyhow::Result<Report> {
    let schedule = match &env_vars.exams_path {
        Some(path) => load_schedule(path)?,
        None => sample_schedule(),
    };
    info!(num = schedule.len(), "loaded schedule");

    Ok(book_schedule(
        schedule,
        (env_vars.range_low, env_vars.range_high),
    ))
}

/// Console summary of booked exams, rejections and range results
impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Booked exams ({}):", self.booked.len())?;
        for exam in &self.booked {
            writeln!(f, "\n{exam}")?;
        }

        if !self.rejected.is_empty() {
            writeln!(f, "\nRejected bookings ({}):", self.rejected.len())?;
            for (input, e) in &self.rejected {
                writeln!(f, "- {} (room {}): {e}", input.course_id, input.location)?;
            }
        }

        let (low, high) = self.range;
        writeln!(f, "\nExams in rooms {low}-{high}:")?;
        match &self.in_range {
            Ok(exams) if exams.is_empty() => writeln!(f, "\nNone"),
            Ok(exams) => exams
                .iter()
                .try_for_each(|exam| writeln!(f, "\n{}", RangeRow(exam))),
            Err(e) => writeln!(f, "\n{e}"),
        }
    }
}

/// A range hit, headed by its room
struct RangeRow<'a>(&'a Exam);

impl fmt::Display for RangeRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let exam = self.0;
        writeln!(f, "Room {}:", exam.location())?;
        writeln!(f, "Course: {}", exam.course_id())?;
        writeln!(f, "Date: {}", exam.date())?;
        write!(f, "Students: {}", exam.num_students())
    }
}
