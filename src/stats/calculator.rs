//! Statistics Calculator Module
//! Grouped sum and mean over car-sale records.

use crate::data::{CarSale, GroupKey, SaleField};
use statrs::statistics::Statistics;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error("{0} is not a numeric field")]
    NotNumeric(SaleField),
    #[error("{0} cannot be used as a grouping key")]
    NotGroupable(SaleField),
    #[error("{0} total does not fit in a 64-bit integer")]
    Overflow(SaleField),
}

/// Summary value of one group. Sums of integer fields stay exact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AggregateValue {
    Int(i64),
    Float(f64),
}

impl AggregateValue {
    pub fn as_f64(self) -> f64 {
        match self {
            AggregateValue::Int(v) => v as f64,
            AggregateValue::Float(v) => v,
        }
    }
}

impl fmt::Display for AggregateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregateValue::Int(v) => write!(f, "{}", v),
            AggregateValue::Float(v) => write!(f, "{:.2}", v),
        }
    }
}

/// Group key to summary value, ordered by key.
pub type Aggregate = BTreeMap<GroupKey, AggregateValue>;

/// Handles grouped statistics.
pub struct AggregateCalculator;

impl AggregateCalculator {
    fn check_fields(value_field: SaleField, group_by: SaleField) -> Result<(), StatsError> {
        if !value_field.is_numeric() {
            return Err(StatsError::NotNumeric(value_field));
        }
        if !group_by.is_groupable() {
            return Err(StatsError::NotGroupable(group_by));
        }
        Ok(())
    }

    /// Collect the values of `value_field` per distinct `group_by` key.
    pub fn group_values(
        records: &[CarSale],
        value_field: SaleField,
        group_by: SaleField,
    ) -> Result<BTreeMap<GroupKey, Vec<f64>>, StatsError> {
        Self::check_fields(value_field, group_by)?;

        let mut groups: BTreeMap<GroupKey, Vec<f64>> = BTreeMap::new();
        for record in records {
            if let (Some(key), Some(value)) =
                (record.group_key(group_by), record.numeric(value_field))
            {
                groups.entry(key).or_default().push(value);
            }
        }
        Ok(groups)
    }

    /// Sum `field_to_sum` per group. Integer fields are summed as `i64`.
    pub fn sum(
        records: &[CarSale],
        field_to_sum: SaleField,
        group_by: SaleField,
    ) -> Result<Aggregate, StatsError> {
        Self::check_fields(field_to_sum, group_by)?;

        if field_to_sum.is_integer() {
            let mut totals: BTreeMap<GroupKey, i64> = BTreeMap::new();
            for record in records {
                if let (Some(key), Some(value)) =
                    (record.group_key(group_by), record.integer(field_to_sum))
                {
                    let total = totals.entry(key).or_insert(0);
                    *total = total
                        .checked_add(value)
                        .ok_or(StatsError::Overflow(field_to_sum))?;
                }
            }
            return Ok(totals
                .into_iter()
                .map(|(key, total)| (key, AggregateValue::Int(total)))
                .collect());
        }

        let groups = Self::group_values(records, field_to_sum, group_by)?;
        Ok(groups
            .into_iter()
            .map(|(key, values)| (key, AggregateValue::Float(values.iter().sum::<f64>())))
            .collect())
    }

    /// Average `field_to_average` per group.
    pub fn mean(
        records: &[CarSale],
        field_to_average: SaleField,
        group_by: SaleField,
    ) -> Result<Aggregate, StatsError> {
        let groups = Self::group_values(records, field_to_average, group_by)?;
        Ok(groups
            .into_iter()
            .map(|(key, values)| (key, AggregateValue::Float(values.mean())))
            .collect())
    }
}
