use std::{cmp::Ordering, fmt};

use chrono::NaiveDateTime;
use tracing::debug;

use crate::{error::Error, exam::Exam};

/// Binary search tree of exams keyed by room number.
///
/// The tree is not rebalanced: inserting rooms in sorted order degrades it
/// to a list and every operation becomes `O(n)`. Descent, traversal and
/// teardown are iterative, so a degenerate tree never overflows the stack.
#[derive(Default)]
pub struct LocationIndex {
    root: Option<Box<Node>>,
    size: usize,
}

struct Node {
    location: u32,
    exam: Exam,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

impl Node {
    fn new(exam: Exam) -> Self {
        Node {
            location: exam.location(),
            exam,
            left: None,
            right: None,
        }
    }
}

impl LocationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Books an exam into the index.
    ///
    /// Accepts a validated [`Exam`] or a raw [`crate::ExamInput`]. Fails with
    /// a validation error, with `RoomAlreadyBooked` if the room already holds
    /// an exam on the same calendar day, or with `DuplicateLocation` if the
    /// room holds an exam on any other day. The index is untouched on failure.
    pub fn book<E>(&mut self, exam: E) -> Result<(), Error>
    where
        E: TryInto<Exam>,
        Error: From<E::Error>,
    {
        let exam: Exam = exam.try_into()?;

        if self
            .find_by_location_and_date(exam.location(), exam.date())
            .is_some()
        {
            return Err(Error::RoomAlreadyBooked {
                location: exam.location(),
                date: exam.day(),
            });
        }

        let location = exam.location();
        let mut depth = 0;
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = match location.cmp(&node.location) {
                Ordering::Equal => return Err(Error::DuplicateLocation(location)),
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
            };
            depth += 1;
        }
        *slot = Some(Box::new(Node::new(exam)));
        self.size += 1;

        debug!(location, depth, size = self.size, "booked exam");
        Ok(())
    }

    /// Returns the exam held by `location` if it falls on the same calendar
    /// day as `date`. Time of day is ignored.
    pub fn find_by_location_and_date(&self, location: u32, date: NaiveDateTime) -> Option<&Exam> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match location.cmp(&node.location) {
                Ordering::Equal => {
                    return (node.exam.day() == date.date()).then_some(&node.exam);
                }
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        None
    }

    /// All exams with `low <= location <= high`, sorted by location.
    ///
    /// Subtrees that cannot hold a key in range are never visited.
    pub fn find_in_range(&self, low: u32, high: u32) -> Result<Vec<&Exam>, Error> {
        if low > high {
            return Err(Error::InvalidRange { low, high });
        }

        let mut result = vec![];
        let mut pending: Vec<&Node> = self.root.as_deref().into_iter().collect();
        while let Some(node) = pending.pop() {
            if (low..=high).contains(&node.location) {
                result.push(&node.exam);
            }
            if low < node.location {
                pending.extend(node.left.as_deref());
            }
            if high > node.location {
                pending.extend(node.right.as_deref());
            }
        }

        result.sort_by_key(|exam| exam.location());
        Ok(result)
    }

    /// In-order traversal, ascending by location
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self.root.as_deref())
    }

    /// Nodes on the longest root-to-leaf path; 0 for an empty index
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut pending: Vec<(&Node, usize)> =
            self.root.as_deref().map(|n| (n, 1)).into_iter().collect();
        while let Some((node, depth)) = pending.pop() {
            height = height.max(depth);
            pending.extend(node.left.as_deref().map(|n| (n, depth + 1)));
            pending.extend(node.right.as_deref().map(|n| (n, depth + 1)));
        }
        height
    }
}

impl Drop for LocationIndex {
    fn drop(&mut self) {
        // Unlink children before each node drops, so a list-shaped tree does
        // not recurse once per node.
        let mut pending: Vec<Box<Node>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

impl fmt::Debug for LocationIndex {
    // Lists exams in order instead of nesting nodes, so formatting stays flat
    // however deep the tree is.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationIndex")
            .field("size", &self.size)
            .field("exams", &Exams(self))
            .finish()
    }
}

struct Exams<'a>(&'a LocationIndex);

impl fmt::Debug for Exams<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a LocationIndex {
    type Item = &'a Exam;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct Iter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iter<'a> {
    fn new(root: Option<&'a Node>) -> Self {
        let mut iter = Iter { stack: vec![] };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Exam;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(&node.exam)
    }
}
