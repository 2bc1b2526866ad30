use chrono::{NaiveDate, NaiveDateTime};
use exam_booking::{Error, Exam, ExamInput, LocationIndex};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

fn day(d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 12, d)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

fn exam_at(location: u32, date: NaiveDateTime) -> Exam {
    Exam::new("CSE-101-456", i64::from(location), date, 30).unwrap()
}

/// Books rooms 50, 45, 60, 42, 55 on distinct days, queries rooms 40-52
#[test]
fn range_query_over_sample_schedule() {
    let mut index = LocationIndex::new();
    for (i, room) in [50, 45, 60, 42, 55].into_iter().enumerate() {
        index.book(exam_at(room, day(i as u32 + 1))).unwrap();
    }

    let rooms: Vec<u32> = index
        .find_in_range(40, 52)
        .unwrap()
        .into_iter()
        .map(Exam::location)
        .collect();
    assert_eq!(rooms, vec![42, 45, 50]);
}

#[test]
fn malformed_course_id_is_rejected() {
    let mut index = LocationIndex::new();
    let err = index
        .book(ExamInput {
            course_id: "CSE-1-1".to_string(),
            location: 70,
            date: "2024-12-04 09:00:00".to_string(),
            num_students: 30,
        })
        .unwrap_err();

    assert!(matches!(err, Error::InvalidCourseId(_)));
    assert!(index.is_empty());
}

#[test]
fn rebooking_room_on_same_day_fails() {
    let mut index = LocationIndex::new();
    index.book(exam_at(50, day(1))).unwrap();

    let other_course = Exam::new("ENG-606-567", 50, day(1), 40).unwrap();
    let err = index.book(other_course).unwrap_err();

    assert!(matches!(err, Error::RoomAlreadyBooked { location: 50, .. }));
    assert_eq!(
        err.to_string(),
        "Room 50 is already booked for 2024-12-01"
    );
}

#[test]
fn rebooking_room_on_other_day_fails() {
    let mut index = LocationIndex::new();
    index.book(exam_at(50, day(1))).unwrap();

    assert_eq!(
        index.book(exam_at(50, day(5))),
        Err(Error::DuplicateLocation(50))
    );
}

#[test]
fn empty_and_inverted_ranges() {
    let index = LocationIndex::new();
    assert!(index.find_in_range(40, 52).unwrap().is_empty());
    assert_eq!(
        index.find_in_range(60, 40),
        Err(Error::InvalidRange { low: 60, high: 40 })
    );
}

/// Books a shuffled mix of fresh rooms, same-day repeats and other-day
/// repeats, checking the tree against a plain list after every attempt.
#[test]
fn random_bookings_keep_invariants() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _round in 0..20 {
        let mut attempts: Vec<(u32, NaiveDateTime)> = (0..200)
            .map(|_| (rng.random_range(1..=150), day(rng.random_range(1..=3))))
            .collect();
        attempts.shuffle(&mut rng);

        let mut index = LocationIndex::new();
        let mut booked: Vec<Exam> = vec![];

        for (room, date) in attempts {
            let result = index.book(exam_at(room, date));
            match booked.iter().find(|e| e.location() == room) {
                None => {
                    assert_eq!(result, Ok(()));
                    booked.push(exam_at(room, date));
                }
                Some(existing) if existing.day() == date.date() => {
                    assert!(matches!(result, Err(Error::RoomAlreadyBooked { .. })));
                }
                Some(_) => assert_eq!(result, Err(Error::DuplicateLocation(room))),
            }
            assert_eq!(index.len(), booked.len());
        }

        // In-order traversal is strictly ascending, so rooms are unique
        let in_order: Vec<u32> = index.iter().map(Exam::location).collect();
        assert!(in_order.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(in_order.len(), booked.len());

        for _ in 0..50 {
            let a = rng.random_range(0..=160);
            let b = rng.random_range(0..=160);
            let (low, high) = (a.min(b), a.max(b));

            let mut expected: Vec<&Exam> = booked
                .iter()
                .filter(|e| (low..=high).contains(&e.location()))
                .collect();
            expected.sort_by_key(|e| e.location());

            assert_eq!(index.find_in_range(low, high).unwrap(), expected);
        }
    }
}

#[test]
fn height_tracks_insertion_order() {
    let mut balanced = LocationIndex::new();
    for room in [4, 2, 6, 1, 3, 5, 7] {
        balanced.book(exam_at(room, day(1))).unwrap();
    }
    assert_eq!(balanced.height(), 3);

    let mut descending = LocationIndex::new();
    for room in (1..=7).rev() {
        descending.book(exam_at(room, day(1))).unwrap();
    }
    assert_eq!(descending.height(), 7);
}
