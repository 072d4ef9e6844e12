use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::database::models::TodoItem;

/// Source of "now" for due-date checks.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stopped at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title cannot be empty")]
    EmptyTitle,

    #[error("description cannot be empty")]
    EmptyDescription,

    #[error("due date cannot be in the past")]
    PastDueDate,
}

/// Check an item before it is written. Rules are applied in order and the first failure wins.
pub fn validate(item: &TodoItem, now: DateTime<Utc>) -> Result<(), ValidationError> {
    if item.title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }

    if item.description.is_empty() {
        return Err(ValidationError::EmptyDescription);
    }

    if item.due_date < now {
        return Err(ValidationError::PastDueDate);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 15, 9, 26).unwrap()
    }

    fn valid() -> TodoItem {
        TodoItem {
            user_id: 1,
            title: "Buy milk".to_string(),
            description: "2%".to_string(),
            due_date: now() + Duration::days(1),
            ..Default::default()
        }
    }

    #[test]
    fn accepts_valid_item() {
        assert_eq!(validate(&valid(), now()), Ok(()));
    }

    #[test]
    fn empty_title_wins_over_everything_else() {
        let item = TodoItem {
            title: String::new(),
            description: String::new(),
            due_date: now() - Duration::days(1),
            ..valid()
        };
        assert_eq!(validate(&item, now()), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn rejects_empty_description() {
        let item = TodoItem { description: String::new(), ..valid() };
        assert_eq!(validate(&item, now()), Err(ValidationError::EmptyDescription));
    }

    #[test]
    fn whitespace_is_not_empty() {
        let item = TodoItem { title: " ".to_string(), ..valid() };
        assert_eq!(validate(&item, now()), Ok(()));
    }

    #[test]
    fn due_date_boundary() {
        let at_now = TodoItem { due_date: now(), ..valid() };
        assert_eq!(validate(&at_now, now()), Ok(()));

        let just_before = TodoItem { due_date: now() - Duration::milliseconds(1), ..valid() };
        assert_eq!(validate(&just_before, now()), Err(ValidationError::PastDueDate));
    }

    #[test]
    fn fixed_clock_is_stable() {
        let clock = FixedClock(now());
        assert_eq!(clock.now(), clock.now());
    }
}
