//! Filtering and sorting for process and people list views.
//!
//! Filters are conjunctive and keep the input order. Sorts are stable in both
//! directions, so equal keys stay in the order they arrived.

use std::{borrow::Borrow, cmp::Ordering};

use jiff::civil::Date;

use crate::models::{
    PeopleFilter, Person, Process, ProcessFilter, Sort, SortKey, SortOrder, Timeframe,
};

/// Bucket a target completion date relative to `today`.
///
/// ```rust
/// use jiff::civil::date;
/// use offboard_core::{models::Timeframe, query::timeframe_of};
///
/// let today = date(2024, 6, 1);
/// assert_eq!(timeframe_of(Some(date(2024, 5, 31)), today), Timeframe::Overdue);
/// assert_eq!(timeframe_of(Some(today), today), Timeframe::ThisWeek);
/// assert_eq!(timeframe_of(Some(date(2024, 6, 8)), today), Timeframe::ThisMonth);
/// assert_eq!(timeframe_of(Some(date(2024, 7, 1)), today), Timeframe::Later);
/// assert_eq!(timeframe_of(None, today), Timeframe::NoDate);
/// ```
pub fn timeframe_of(target: Option<Date>, today: Date) -> Timeframe {
    let Some(target) = target else {
        return Timeframe::NoDate;
    };

    let days = (target - today).get_days();
    match days {
        d if d < 0 => Timeframe::Overdue,
        0..=6 => Timeframe::ThisWeek,
        7..=29 => Timeframe::ThisMonth,
        _ => Timeframe::Later,
    }
}

/// Whether `process` passes every set field of `filter`.
pub fn matches_process(process: &Process, filter: &ProcessFilter, today: Date) -> bool {
    if filter.status.is_some_and(|status| process.status != status) {
        return false;
    }
    if filter.priority.is_some_and(|priority| process.priority != priority) {
        return false;
    }
    if filter.template_id.is_some_and(|id| process.template_id != id) {
        return false;
    }
    if let Some(department) = &filter.department {
        if &process.department != department {
            return false;
        }
    }
    if let Some(timeframe) = filter.timeframe {
        if timeframe_of(process.target_completion_date, today) != timeframe {
            return false;
        }
    }
    match search_needle(filter.search.as_deref()) {
        Some(needle) => [
            process.name.as_str(),
            process.employee_name.as_str(),
            process.department.as_str(),
            process.role.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle)),
        None => true,
    }
}

/// Processes passing `filter`, in input order.
pub fn filter_processes<'a>(
    processes: &'a [Process],
    filter: &ProcessFilter,
    today: Date,
) -> Vec<&'a Process> {
    processes
        .iter()
        .filter(|process| matches_process(process, filter, today))
        .collect()
}

/// Whether `person` passes every set field of `filter`.
///
/// The status filter compares employment status, so associates never match
/// it.
pub fn matches_person(person: &Person, filter: &PeopleFilter) -> bool {
    if let Some(status) = filter.status {
        if person.kind.employment_status() != Some(status) {
            return false;
        }
    }
    if let Some(person_type) = filter.person_type {
        if person.kind.person_type() != person_type {
            return false;
        }
    }
    match search_needle(filter.search_term.as_deref()) {
        Some(needle) => [
            Some(person.first_name.as_str()),
            Some(person.last_name.as_str()),
            Some(person.email.as_str()),
            person.department.as_deref(),
            person.position.as_deref(),
        ]
        .iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle)),
        None => true,
    }
}

/// People passing `filter`, in input order.
pub fn filter_people<'a>(people: &'a [Person], filter: &PeopleFilter) -> Vec<&'a Person> {
    people
        .iter()
        .filter(|person| matches_person(person, filter))
        .collect()
}

/// Blank search terms match everything.
fn search_needle(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase)
}

/// Stable sort of processes (or references to them).
///
/// Processes without a target date sort after dated ones when ascending by
/// target date.
pub fn sort_processes<P: Borrow<Process>>(processes: &mut [P], sort: Sort) {
    let key = |a: &Process, b: &Process| match sort.key {
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        SortKey::TargetDate => compare_dates(a.target_completion_date, b.target_completion_date),
        SortKey::Name => compare_names(&a.name, &b.name),
    };
    sort_stable(processes, sort.order, |a, b| {
        key(
            <P as Borrow<Process>>::borrow(a),
            <P as Borrow<Process>>::borrow(b),
        )
    });
}

/// Stable sort of people (or references to them).
///
/// Name sorts by last name, then first name. People have no target date, so
/// that key sorts by creation time.
pub fn sort_people<P: Borrow<Person>>(people: &mut [P], sort: Sort) {
    let key = |a: &Person, b: &Person| match sort.key {
        SortKey::CreatedAt | SortKey::TargetDate => a.created_at.cmp(&b.created_at),
        SortKey::Name => compare_names(&a.last_name, &b.last_name)
            .then_with(|| compare_names(&a.first_name, &b.first_name)),
    };
    sort_stable(people, sort.order, |a, b| {
        key(
            <P as Borrow<Person>>::borrow(a),
            <P as Borrow<Person>>::borrow(b),
        )
    });
}

fn sort_stable<T>(items: &mut [T], order: SortOrder, compare: impl Fn(&T, &T) -> Ordering) {
    match order {
        SortOrder::Ascending => items.sort_by(|a, b| compare(a, b)),
        // Ties keep input order.
        SortOrder::Descending => items.sort_by(|a, b| compare(b, a)),
    }
}

fn compare_dates(a: Option<Date>, b: Option<Date>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}
