//! Seed schedules for local development, the in-memory store and table seeding.
//!
//! Pure data: no I/O happens here.

use serde_json::json;

use super::types::{CinemaId, MovieId, Period, ScheduleRecord};

struct SeedRow {
    cinema_id: i64,
    movie_id: &'static str,
    period: Option<&'static str>,
    title: &'static str,
    rating: &'static str,
    showtimes: &'static [&'static str],
}

const SEED_ROWS: &[SeedRow] = &[
    SeedRow {
        cinema_id: 1001,
        movie_id: "c5001",
        period: Some("evening"),
        title: "The Lighthouse Keeper",
        rating: "PG-13",
        showtimes: &["19:00", "21:30"],
    },
    SeedRow {
        cinema_id: 1001,
        movie_id: "c5002",
        period: Some("evening"),
        title: "Paper Harbours",
        rating: "PG",
        showtimes: &["18:15", "20:45"],
    },
    SeedRow {
        cinema_id: 1002,
        movie_id: "c5001",
        period: Some("matinee"),
        title: "The Lighthouse Keeper",
        rating: "PG-13",
        showtimes: &["13:00", "15:30"],
    },
    SeedRow {
        cinema_id: 1002,
        movie_id: "c5003",
        period: Some("evening"),
        title: "Salt and Static",
        rating: "R",
        showtimes: &["20:00"],
    },
    SeedRow {
        cinema_id: 1002,
        movie_id: "c5004",
        period: Some("late"),
        title: "Midnight Orchard",
        rating: "R",
        showtimes: &["23:30"],
    },
    SeedRow {
        cinema_id: 1003,
        movie_id: "c5002",
        period: Some("matinee"),
        title: "Paper Harbours",
        rating: "PG",
        showtimes: &["11:00", "14:00"],
    },
    SeedRow {
        cinema_id: 1003,
        movie_id: "c5005",
        period: None,
        title: "Northbound (Preview)",
        rating: "NR",
        showtimes: &[],
    },
];

/// Returns the canonical seed schedules.
///
/// Cinema 1001 shows `c5001` and `c5002` in the evening. Cinema 1003 has one
/// record without a period, which therefore never shows up in period queries.
///
/// # Example
///
/// ```
/// use cinemas_core::schedule::{seed_schedules, CinemaId};
///
/// let seeds = seed_schedules();
/// let at_1001 = seeds.iter().filter(|r| r.cinema_id == CinemaId::new(1001)).count();
/// assert_eq!(at_1001, 2);
/// ```
pub fn seed_schedules() -> Vec<ScheduleRecord> {
    SEED_ROWS.iter().filter_map(seed_record).collect()
}

fn seed_record(row: &SeedRow) -> Option<ScheduleRecord> {
    let movie_id = MovieId::new(row.movie_id).ok()?;
    let mut record = ScheduleRecord::new(CinemaId::new(row.cinema_id), movie_id)
        .with_attribute("title", row.title)
        .with_attribute("rating", row.rating)
        .with_attribute("showtimes", json!(row.showtimes));

    if let Some(period) = row.period {
        record = record.with_period(Period::new(period).ok()?);
    }

    Some(record)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_seed_schedules_count() {
        assert_eq!(seed_schedules().len(), SEED_ROWS.len());
    }

    #[test]
    fn test_seed_schedules_keys_are_unique() {
        let seeds = seed_schedules();
        let keys: HashSet<_> = seeds
            .iter()
            .map(|r| (r.cinema_id, r.movie_id.clone()))
            .collect();
        assert_eq!(keys.len(), seeds.len());
    }

    #[test]
    fn test_seed_schedules_cinema_1001() {
        let seeds = seed_schedules();
        let movies: Vec<&str> = seeds
            .iter()
            .filter(|r| r.cinema_id == CinemaId::new(1001))
            .map(|r| r.movie_id.as_str())
            .collect();
        assert_eq!(movies, vec!["c5001", "c5002"]);
        assert!(seeds
            .iter()
            .filter(|r| r.cinema_id == CinemaId::new(1001))
            .all(|r| r.period.as_ref().map(Period::as_str) == Some("evening")));
    }

    #[test]
    fn test_seed_schedules_carry_payload() {
        for record in seed_schedules() {
            assert!(record.attributes().contains_key("title"));
            assert!(record.attributes().contains_key("showtimes"));
        }
    }
}
