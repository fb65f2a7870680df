use crate::schedule::ScheduleRecord;

/// Sorts records by movie ID ascending, the table's natural sort key.
pub fn sort_by_movie(records: &mut [ScheduleRecord]) {
    records.sort_by(|a, b| a.movie_id.cmp(&b.movie_id));
}

/// Sorts records by period, then movie ID, mirroring the period index.
pub fn sort_by_period(records: &mut [ScheduleRecord]) {
    records.sort_by(|a, b| {
        a.period
            .cmp(&b.period)
            .then_with(|| a.movie_id.cmp(&b.movie_id))
    });
}

#[cfg(test)]
mod tests {
    use crate::schedule::{CinemaId, MovieId, Period};

    use super::*;

    fn record(movie: &str, period: &str) -> ScheduleRecord {
        ScheduleRecord::new(CinemaId::new(1), MovieId::new(movie).unwrap())
            .with_period(Period::new(period).unwrap())
    }

    fn movies(records: &[ScheduleRecord]) -> Vec<&str> {
        records.iter().map(|r| r.movie_id.as_str()).collect()
    }

    #[test]
    fn test_sort_by_movie() {
        let mut records = vec![
            record("c5003", "a"),
            record("c5001", "b"),
            record("c5002", "a"),
        ];
        sort_by_movie(&mut records);
        assert_eq!(movies(&records), vec!["c5001", "c5002", "c5003"]);
    }

    #[test]
    fn test_sort_by_period_then_movie() {
        let mut records = vec![
            record("c5002", "late"),
            record("c5003", "evening"),
            record("c5001", "late"),
        ];
        sort_by_period(&mut records);
        assert_eq!(movies(&records), vec!["c5003", "c5001", "c5002"]);
    }
}
