use std::collections::BTreeMap;

use chrono::NaiveDate;

/// Daily irradiance values (kWh/m²/day) indexed by calendar date.
///
/// Iteration is always in ascending date order. A series is built once and
/// then only read; there is no way to mutate a value after construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IrradianceSeries {
    values: BTreeMap<NaiveDate, f64>,
}

impl IrradianceSeries {
    /// A series holding exactly one reading.
    pub fn single(date: NaiveDate, value: f64) -> Self {
        let mut values = BTreeMap::new();
        values.insert(date, value);
        Self { values }
    }

    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.values.get(&date).copied()
    }

    /// The earliest reading in the series.
    pub fn first(&self) -> Option<(NaiveDate, f64)> {
        self.values.iter().next().map(|(d, v)| (*d, *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.values.iter().map(|(d, v)| (*d, *v))
    }
}

impl FromIterator<(NaiveDate, f64)> for IrradianceSeries {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_iterates_in_date_order() {
        let series: IrradianceSeries = vec![(day(3), 4.0), (day(1), 5.5), (day(2), 6.1)]
            .into_iter()
            .collect();

        let dates: Vec<NaiveDate> = series.iter().map(|(d, _)| d).collect();
        assert_eq!(dates, vec![day(1), day(2), day(3)]);
        assert_eq!(series.first(), Some((day(1), 5.5)));
    }

    #[test]
    fn test_single_point_series() {
        let series = IrradianceSeries::single(day(10), 5.0);
        assert_eq!(series.len(), 1);
        assert_eq!(series.get(day(10)), Some(5.0));
        assert_eq!(series.get(day(11)), None);
    }

    #[test]
    fn test_empty_series() {
        let series = IrradianceSeries::default();
        assert!(series.is_empty());
        assert_eq!(series.first(), None);
    }
}
