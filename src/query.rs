//! Aggregation queries over expense records.
//!
//! Every function here is pure: the input is never modified and any subsets
//! that are returned borrow from it. Functions accept any iterator over
//! borrowed records, so both `&Vec<ExpenseRecord>` and subsets returned by
//! other queries (`subset.iter().copied()`) can be passed in.

use std::collections::HashMap;

use serde::Serialize;
use time::Month;

use crate::{Error, expense::ExpenseRecord};

/// Sums the amounts of all records.
///
/// Returns zero for an empty slice.
pub fn total<'a>(records: impl IntoIterator<Item = &'a ExpenseRecord>) -> f64 {
    records
        .into_iter()
        .fold(0.0, |sum, record| sum + record.amount())
}

/// Selects the records dated within the calendar month `month` of `year`.
///
/// Records keep their input order.
pub fn for_month<'a>(
    records: impl IntoIterator<Item = &'a ExpenseRecord>,
    year: i32,
    month: Month,
) -> Vec<&'a ExpenseRecord> {
    records
        .into_iter()
        .filter(|record| record.date().year() == year && record.date().month() == month)
        .collect()
}

/// Gets the calendar month before `month` of `year`.
///
/// January rolls back to December of the previous year.
pub fn previous_month_of(year: i32, month: Month) -> (i32, Month) {
    match month {
        Month::January => (year - 1, Month::December),
        month => (year, month.previous()),
    }
}

/// The most frequently occurring category and how much was spent on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopCategory {
    /// The category with the most records.
    pub category: String,
    /// The sum of the amounts of every record in the category.
    pub amount: f64,
    /// The number of records in the category.
    pub count: usize,
}

/// Finds the category with the most records, i.e., the mode category.
///
/// The category is chosen by record count, not by amount spent, but the
/// reported amount is the total spent in that category. When several
/// categories share the highest count, the one that appears first in
/// `records` wins.
///
/// # Errors
///
/// Returns [Error::EmptyDataset] if `records` is empty.
pub fn top_category<'a>(
    records: impl IntoIterator<Item = &'a ExpenseRecord>,
) -> Result<TopCategory, Error> {
    let groups = group_by(records, GroupKey::Category);

    let mut top: Option<(&str, &[&ExpenseRecord])> = None;

    for (category, group) in groups.iter() {
        match top {
            Some((_, best)) if group.len() <= best.len() => {}
            _ => top = Some((category, group)),
        }
    }

    let (category, group) = top.ok_or(Error::EmptyDataset)?;

    Ok(TopCategory {
        category: category.to_owned(),
        amount: total(group.iter().copied()),
        count: group.len(),
    })
}

/// The record field to partition by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    /// Group by spending category.
    Category,
    /// Group by who incurred the expense. Records without a spender are left out.
    Spender,
    /// Group by the free text description.
    Description,
}

impl GroupKey {
    fn value_of(self, record: &ExpenseRecord) -> Option<&str> {
        match self {
            GroupKey::Category => Some(record.category()),
            GroupKey::Spender => record.spender(),
            GroupKey::Description => Some(record.description()),
        }
    }
}

/// Records partitioned by a [GroupKey], in order of each key's first occurrence.
#[derive(Debug, Default, PartialEq)]
pub struct Groups<'a> {
    entries: Vec<(&'a str, Vec<&'a ExpenseRecord>)>,
}

impl<'a> Groups<'a> {
    /// The records with the key value `key`, if any.
    pub fn get(&self, key: &str) -> Option<&[&'a ExpenseRecord]> {
        self.entries
            .iter()
            .find(|(group_key, _)| *group_key == key)
            .map(|(_, group)| group.as_slice())
    }

    /// The key values in order of first occurrence.
    pub fn keys(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }

    /// Iterates over each key value and its records.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &[&'a ExpenseRecord])> + '_ {
        self.entries
            .iter()
            .map(|(key, group)| (*key, group.as_slice()))
    }

    /// The number of groups.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no groups.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Partitions records by the value of `key`.
///
/// Groups are ordered by the first occurrence of their key value and records
/// keep their input order within a group.
pub fn group_by<'a>(
    records: impl IntoIterator<Item = &'a ExpenseRecord>,
    key: GroupKey,
) -> Groups<'a> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<(&str, Vec<&ExpenseRecord>)> = Vec::new();

    for record in records {
        let Some(value) = key.value_of(record) else {
            continue;
        };

        match positions.get(value) {
            Some(&position) => entries[position].1.push(record),
            None => {
                positions.insert(value, entries.len());
                entries.push((value, vec![record]));
            }
        }
    }

    Groups { entries }
}

/// The total amount for one key value, e.g., one slice of a pie chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    /// The key value, e.g., the category name.
    pub label: String,
    /// The sum of the amounts with this key value.
    pub amount: f64,
    /// The number of records with this key value.
    pub count: usize,
}

/// Sums the amounts of records per value of `key`.
///
/// Slices are ordered by first occurrence, same as [group_by].
pub fn breakdown<'a>(
    records: impl IntoIterator<Item = &'a ExpenseRecord>,
    key: GroupKey,
) -> Vec<Slice> {
    group_by(records, key)
        .iter()
        .map(|(label, group)| Slice {
            label: label.to_owned(),
            amount: total(group.iter().copied()),
            count: group.len(),
        })
        .collect()
}

/// Orders records from most to least recent.
///
/// The sort is stable, so records on the same date keep their input order.
pub fn sort_by_date_descending<'a>(
    records: impl IntoIterator<Item = &'a ExpenseRecord>,
) -> Vec<&'a ExpenseRecord> {
    let mut sorted: Vec<&ExpenseRecord> = records.into_iter().collect();
    sorted.sort_by(|a, b| b.date().cmp(&a.date()));
    sorted
}
