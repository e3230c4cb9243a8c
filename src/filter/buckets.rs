//! Fixed-width range options for bounded numeric dimensions.

pub const YEAR_BUCKET_WIDTH: i32 = 5;
/// How far back from the current year the year filter reaches.
pub const YEAR_LOOKBACK: i32 = 10;
/// Listings for next year's model are allowed.
pub const YEAR_LOOKAHEAD: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    pub min: i32,
    pub max: i32,
}

impl Bucket {
    pub fn token(&self) -> String {
        format!("{}-{}", self.min, self.max)
    }

    pub fn label(&self) -> String {
        format!("{} - {}", self.min, self.max)
    }
}

/// Descending `width`-wide inclusive buckets from `upper` down to `lower`.
/// The last bucket is clipped so it never reaches below `lower`; an empty
/// or inverted span yields no buckets.
pub fn descending_buckets(lower: i32, upper: i32, width: i32) -> Vec<Bucket> {
    let width = width.max(1);
    let mut buckets = Vec::new();
    let mut top = upper;
    while top >= lower {
        let min = (top - (width - 1)).max(lower);
        buckets.push(Bucket { min, max: top });
        top -= width;
    }
    buckets
}

/// Year span offered by the year filter: the data's own span, clipped to
/// `[current_year - 10, current_year + 1]`. No data means just this year.
pub fn year_bounds(years: impl IntoIterator<Item = i32>, current_year: i32) -> (i32, i32) {
    let (min, max) = years
        .into_iter()
        .fold(None, |acc: Option<(i32, i32)>, year| match acc {
            None => Some((year, year)),
            Some((lo, hi)) => Some((lo.min(year), hi.max(year))),
        })
        .unwrap_or((current_year, current_year));

    (
        min.max(current_year - YEAR_LOOKBACK),
        max.min(current_year + YEAR_LOOKAHEAD),
    )
}

pub fn year_buckets(years: impl IntoIterator<Item = i32>, current_year: i32) -> Vec<Bucket> {
    let (lower, upper) = year_bounds(years, current_year);
    descending_buckets(lower, upper, YEAR_BUCKET_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::RangeFilter;

    #[test]
    fn test_buckets_descend_and_clip() {
        let buckets = descending_buckets(2016, 2027, 5);
        assert_eq!(
            buckets,
            vec![
                Bucket { min: 2023, max: 2027 },
                Bucket { min: 2018, max: 2022 },
                Bucket { min: 2016, max: 2017 },
            ]
        );
    }

    #[test]
    fn test_buckets_do_not_overlap() {
        let buckets = descending_buckets(2000, 2030, 5);
        for pair in buckets.windows(2) {
            assert_eq!(pair[1].max + 1, pair[0].min);
        }
        assert_eq!(buckets.last().map(|b| b.min), Some(2000));
    }

    #[test]
    fn test_year_bounds_clip_to_window() {
        assert_eq!(year_bounds([1998, 2005, 2030], 2026), (2016, 2027));
        assert_eq!(year_bounds([2019, 2024], 2026), (2019, 2024));
        assert_eq!(year_bounds([], 2026), (2026, 2026));
    }

    #[test]
    fn test_all_old_stock_yields_no_buckets() {
        // Everything is older than the lookback window
        assert!(year_buckets([2001, 2003], 2026).is_empty());
    }

    #[test]
    fn test_bucket_encoding() {
        let bucket = Bucket { min: 2020, max: 2024 };
        assert_eq!(bucket.token(), "2020-2024");
        assert_eq!(bucket.label(), "2020 - 2024");
        assert_eq!(RangeFilter::parse(&bucket.token()), RangeFilter::Between { min: 2020, max: 2024 });
    }
}
