//! Predicate evaluation.
//!
//! A [`Predicate`] is compiled once per evaluation from a [`QueryState`]:
//! needles are lowercased and date bounds parsed up front, so matching a
//! record is allocation-light and cannot fail. All active criteria are
//! AND-combined.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::state::{QueryState, StatusFilter};
use crate::model::date::{BoundSide, parse_bound};
use crate::model::record::Record;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Predicate {
    free_text: Option<String>,
    status: StatusFilter,
    project: Option<String>,
    address: Option<String>,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
}

impl Predicate {
    /// Compile the filter half of a query state.
    ///
    /// Unparsable date bounds are dropped (logged at debug) instead of
    /// excluding every record.
    #[must_use]
    pub fn compile(state: &QueryState) -> Self {
        Self {
            free_text: lowered_needle(state.free_text()),
            status: state.status().clone(),
            project: state.project().map(str::to_string),
            address: lowered_needle(state.address()),
            from: normalize_bound(state.date_from(), BoundSide::From),
            to: normalize_bound(state.date_to(), BoundSide::To),
        }
    }

    /// Returns true if the record satisfies all active criteria.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        if let Some(ref needle) = self.free_text {
            if !record.search_text().to_lowercase().contains(needle.as_str()) {
                return false;
            }
        }
        match self.status {
            StatusFilter::Any => {}
            StatusFilter::Only(status) => {
                if record.status != status {
                    return false;
                }
            }
            StatusFilter::Unrecognized(_) => return false,
        }
        if let Some(ref project) = self.project {
            if record.project != *project {
                return false;
            }
        }
        if let Some(ref needle) = self.address {
            if !record.address.to_lowercase().contains(needle.as_str()) {
                return false;
            }
        }
        if self.from.is_some_and(|from| record.timestamp < from) {
            return false;
        }
        if self.to.is_some_and(|to| record.timestamp > to) {
            return false;
        }
        true
    }

    /// Returns true if no criterion is active.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.free_text.is_none()
            && self.status.is_any()
            && self.project.is_none()
            && self.address.is_none()
            && self.from.is_none()
            && self.to.is_none()
    }
}

/// Keep only matching records, preserving their order.
pub fn filter_records<'a, I>(records: I, predicate: &Predicate) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .filter(|record| predicate.matches(record))
        .collect()
}

fn lowered_needle(raw: &str) -> Option<String> {
    (!raw.is_empty()).then(|| raw.to_lowercase())
}

fn normalize_bound(raw: Option<&str>, side: BoundSide) -> Option<DateTime<Utc>> {
    match parse_bound(raw?, side) {
        Ok(bound) => bound,
        Err(err) => {
            debug!(?side, error = %err, "ignoring unparsable date bound");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::Status;
    use chrono::TimeZone;

    fn record(id: &str, user: &str, project: &str, address: &str, day: u32, status: Status) -> Record {
        Record {
            id: id.to_string(),
            user: user.to_string(),
            project: project.to_string(),
            address: address.to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap(),
            status,
        }
    }

    fn sample() -> Vec<Record> {
        vec![
            record("#CMP801", "Natai Craig", "Landing Page", "Meadow Lane Oakland", 1, Status::InProgress),
            record("#CMP802", "Kate Morrison", "CRM Admin pages", "Larry San Francisco", 5, Status::Complete),
            record("#CMP803", "Drew Cano", "Client Project", "Bagwell Avenue Ocala", 9, Status::Pending),
        ]
    }

    fn ids(records: &[&Record]) -> Vec<String> {
        records.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn empty_state_matches_everything() {
        let predicate = Predicate::compile(&QueryState::default());
        assert!(predicate.is_unconstrained());
        assert_eq!(filter_records(&sample(), &predicate).len(), 3);
    }

    #[test]
    fn free_text_is_case_insensitive_across_fields() {
        let rows = sample();
        let mut state = QueryState::default();

        state.set_free_text("SAN FRAN");
        assert_eq!(ids(&filter_records(&rows, &Predicate::compile(&state))), ["#CMP802"]);

        state.set_free_text("cmp803");
        assert_eq!(ids(&filter_records(&rows, &Predicate::compile(&state))), ["#CMP803"]);

        state.set_free_text("in progress");
        assert_eq!(ids(&filter_records(&rows, &Predicate::compile(&state))), ["#CMP801"]);
    }

    #[test]
    fn free_text_sees_canonical_date() {
        let rows = sample();
        let mut state = QueryState::default();
        state.set_free_text("2024-03-05");
        assert_eq!(ids(&filter_records(&rows, &Predicate::compile(&state))), ["#CMP802"]);
    }

    #[test]
    fn status_and_project_are_exact() {
        let rows = sample();
        let mut state = QueryState::default();
        state.set_status(Status::Pending);
        assert_eq!(ids(&filter_records(&rows, &Predicate::compile(&state))), ["#CMP803"]);

        state.set_status(StatusFilter::Any);
        state.set_project(Some("Landing".to_string()));
        assert!(filter_records(&rows, &Predicate::compile(&state)).is_empty());

        state.set_project(Some("Landing Page".to_string()));
        assert_eq!(ids(&filter_records(&rows, &Predicate::compile(&state))), ["#CMP801"]);
    }

    #[test]
    fn unrecognized_status_matches_nothing() {
        let mut state = QueryState::default();
        state.set_status(StatusFilter::parse("Shipped"));
        assert!(filter_records(&sample(), &Predicate::compile(&state)).is_empty());
    }

    #[test]
    fn address_is_case_insensitive_substring() {
        let mut state = QueryState::default();
        state.set_address("oak");
        assert_eq!(ids(&filter_records(&sample(), &Predicate::compile(&state))), ["#CMP801"]);
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let rows = sample();
        let mut state = QueryState::default();
        state.set_date_from(Some("2024-03-05".to_string()));
        state.set_date_to(Some("2024-03-09".to_string()));
        assert_eq!(
            ids(&filter_records(&rows, &Predicate::compile(&state))),
            ["#CMP802", "#CMP803"]
        );
    }

    #[test]
    fn invalid_bound_is_no_bound() {
        let rows = sample();
        let mut state = QueryState::default();
        state.set_date_from(Some("not a date".to_string()));
        state.set_date_to(Some("2024-03-05".to_string()));
        let predicate = Predicate::compile(&state);
        assert_eq!(ids(&filter_records(&rows, &predicate)), ["#CMP801", "#CMP802"]);
    }

    #[test]
    fn filters_combine_with_and() {
        let rows = sample();
        let mut state = QueryState::default();
        state.set_free_text("a");
        state.set_status(Status::Complete);
        state.set_address("larry");
        assert_eq!(ids(&filter_records(&rows, &Predicate::compile(&state))), ["#CMP802"]);
    }
}
