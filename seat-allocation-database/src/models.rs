use core::cmp::Ordering;

use diesel::prelude::*;
use serde::Serialize;

use crate::schema::individuals;
use crate::submission::Submission;

/// One individual's submission together with the seat the last allocation pass granted.
#[derive(Queryable, Selectable, Serialize, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = individuals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Record {
    /// Assigned on first submission and kept across resubmissions.
    #[serde(skip)]
    pub id: i64,
    pub name: String,
    pub score: i64,
    /// Most wanted first.
    pub preferences: Vec<String>,
    pub admitted_seat: Option<String>,
    /// Seconds since the unix epoch of the latest submission.
    pub last_updated: i64,
}

impl Record {
    /// Canonical snapshot order: higher score first, then earlier submission, then earlier
    /// first submission.
    #[must_use]
    pub fn priority_cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then(self.last_updated.cmp(&other.last_updated))
            .then(self.id.cmp(&other.id))
    }
}

#[derive(Insertable, Debug)]
#[diesel(table_name = individuals)]
pub struct NewIndividual {
    pub name: String,
    pub score: i64,
    pub preferences: Vec<String>,
    pub last_updated: i64,
}

impl NewIndividual {
    #[must_use]
    pub fn new(submission: Submission, last_updated: i64) -> Self {
        let (name, score, preferences) = submission.into_parts();
        Self {
            name,
            score,
            preferences,
            last_updated,
        }
    }
}

/// Public projection of a [`Record`].
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub name: String,
    pub score: i64,
    pub admitted_seat: Option<String>,
}

impl From<Record> for Placement {
    fn from(record: Record) -> Self {
        Self {
            name: record.name,
            score: record.score,
            admitted_seat: record.admitted_seat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, score: i64, last_updated: i64) -> Record {
        Record {
            id,
            name: format!("individual-{id}"),
            score,
            preferences: vec!["Row1".to_owned()],
            admitted_seat: None,
            last_updated,
        }
    }

    #[test]
    fn higher_score_comes_first() {
        assert_eq!(
            record(1, 90, 10).priority_cmp(&record(2, 85, 5)),
            Ordering::Less
        );
    }

    #[test]
    fn earlier_submission_breaks_score_ties() {
        assert_eq!(
            record(2, 80, 5).priority_cmp(&record(1, 80, 10)),
            Ordering::Less
        );
    }

    #[test]
    fn id_breaks_same_second_ties() {
        let mut records = vec![record(3, 80, 5), record(1, 80, 5), record(2, 80, 5)];
        records.sort_by(Record::priority_cmp);
        let ids: Vec<i64> = records.iter().map(|record| record.id).collect();
        assert_eq!(ids, [1, 2, 3]);
    }
}
