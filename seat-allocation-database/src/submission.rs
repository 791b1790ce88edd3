use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("score must not be negative, got {0}")]
    NegativeScore(i64),
    #[error("preferences must name at least one seat")]
    NoPreferences,
    #[error("preference at position {index} is empty")]
    EmptyPreference { index: usize },
}

impl ValidationError {
    /// The submission field that violated its constraint.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::NegativeScore(_) => "score",
            Self::NoPreferences | Self::EmptyPreference { .. } => "preferences",
        }
    }
}

/// A validated `(name, score, preferences)` triple, ready to be upserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    name: String,
    score: i64,
    preferences: Vec<String>,
}

impl Submission {
    pub fn new(
        name: &str,
        score: i64,
        preferences: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if score < 0 {
            return Err(ValidationError::NegativeScore(score));
        }
        let preferences = preferences
            .into_iter()
            .enumerate()
            .map(|(index, seat)| {
                let seat = seat.as_ref().trim();
                if seat.is_empty() {
                    Err(ValidationError::EmptyPreference { index })
                } else {
                    Ok(seat.to_owned())
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        if preferences.is_empty() {
            return Err(ValidationError::NoPreferences);
        }
        Ok(Self {
            name: name.to_owned(),
            score,
            preferences,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn score(&self) -> i64 {
        self.score
    }

    #[must_use]
    pub fn preferences(&self) -> &[String] {
        &self.preferences
    }

    #[must_use]
    pub fn into_parts(self) -> (String, i64, Vec<String>) {
        (self.name, self.score, self.preferences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_name_and_seats() {
        let submission = Submission::new("  Alice ", 90, [" Row1", "Row2 "]).unwrap();
        assert_eq!(submission.name(), "Alice");
        assert_eq!(submission.score(), 90);
        assert_eq!(submission.preferences(), ["Row1", "Row2"]);
    }

    #[test]
    fn keeps_duplicate_preferences_in_order() {
        let submission = Submission::new("Bob", 0, ["Row2", "Row1", "Row2"]).unwrap();
        assert_eq!(submission.preferences(), ["Row2", "Row1", "Row2"]);
    }

    #[test]
    fn rejects_blank_name() {
        let error = Submission::new(" \t", 10, ["Row1"]).unwrap_err();
        assert_eq!(error, ValidationError::EmptyName);
        assert_eq!(error.field(), "name");
    }

    #[test]
    fn rejects_negative_score() {
        let error = Submission::new("Carol", -1, ["Row1"]).unwrap_err();
        assert_eq!(error, ValidationError::NegativeScore(-1));
        assert_eq!(error.field(), "score");
    }

    #[test]
    fn rejects_empty_preference_list() {
        let error = Submission::new("Carol", 1, Vec::<String>::new()).unwrap_err();
        assert_eq!(error, ValidationError::NoPreferences);
        assert_eq!(error.field(), "preferences");
    }

    #[test]
    fn rejects_blank_preference_entry() {
        let error = Submission::new("Carol", 1, ["Row1", "  "]).unwrap_err();
        assert_eq!(error, ValidationError::EmptyPreference { index: 1 });
        assert_eq!(error.field(), "preferences");
    }
}
