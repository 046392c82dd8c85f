//! Reduces the daily roll-ups to the figures the dashboard shows.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::DashboardError;
use crate::regions;
use crate::summary::SummaryCollection;

/// How many of the most recent days compete to be shown. Today's roll-up may
/// still be filling in, so the larger of the recent days wins.
pub const LOOKBACK_DAYS: usize = 2;

/// Above this many points the chart drops its point markers.
pub const DENSE_SERIES_POINTS: usize = 30;

/// The settled day's figures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Aggregate {
    pub chosen_date: Option<String>,
    pub total_users: u64,
    pub countries: BTreeMap<String, u64>,
}

/// Picks the recent day with the most unique users. On a tie the more
/// recent day is kept.
pub fn aggregate(summary: &SummaryCollection) -> Aggregate {
    let mut best: Option<(&String, u64)> = None;

    for (date, day) in summary.iter().rev().take(LOOKBACK_DAYS) {
        if best.map_or(true, |(_, users)| day.unique_users > users) {
            best = Some((date, day.unique_users));
        }
    }

    best.map_or_else(Aggregate::default, |(date, total_users)| Aggregate {
        chosen_date: Some(date.clone()),
        total_users,
        countries: summary[date].countries.clone(),
    })
}

/// Distinct attributed countries in the chosen day.
pub fn country_total(aggregate: &Aggregate) -> usize {
    aggregate
        .countries
        .keys()
        .filter(|code| !regions::is_sentinel(code))
        .count()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyPoint {
    pub date: String,
    pub label: String,
    pub unique_users: u64,
}

/// Chart series in ascending date order.
pub fn daily_series(summary: &SummaryCollection) -> Vec<DailyPoint> {
    summary
        .iter()
        .map(|(date, day)| DailyPoint {
            date: date.clone(),
            label: short_date_label(date),
            unique_users: day.unique_users,
        })
        .collect()
}

/// `"2024-01-02"` becomes `"2 Jan"`. Unparseable dates are shown verbatim.
pub fn short_date_label(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_or_else(|_| date.to_string(), |day| day.format("%-d %b").to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryRank {
    pub code: String,
    pub name: String,
    pub flag: String,
    pub count: u64,
    pub users_label: String,
    /// Share of the leading country, rounded to a whole percent.
    pub percent_of_max: u8,
}

/// Attributed countries, most users first.
pub fn ranked_countries(aggregate: &Aggregate) -> Vec<CountryRank> {
    let mut entries = aggregate
        .countries
        .iter()
        .filter(|(code, _)| !regions::is_sentinel(code))
        .collect::<Vec<_>>();
    entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    let max = entries.first().map_or(0, |(_, count)| **count);

    entries
        .into_iter()
        .map(|(code, &count)| CountryRank {
            code: code.clone(),
            name: regions::display_name(code).to_string(),
            flag: regions::flag_glyph(code),
            count,
            users_label: users_label(count),
            percent_of_max: percent_of(count, max),
        })
        .collect()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percent_of(count: u64, max: u64) -> u8 {
    if max == 0 {
        return 0;
    }
    ((count as f64 / max as f64) * 100.0).round().clamp(0.0, 100.0) as u8
}

/// `"1 user"`, `"2 users"`.
pub fn users_label(count: u64) -> String {
    if count == 1 {
        format!("{count} user")
    } else {
        format!("{count} users")
    }
}

/// Groups digits in threes: `12345` becomes `"12,345"`.
pub fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Everything the dashboard shows about usage, with the fetch failure
/// policy applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub summary: SummaryCollection,
    pub aggregate: Aggregate,
    pub total_unique_users: u64,
}

impl Dashboard {
    /// Combines the two independent fetches. A failed summary leaves the
    /// defaults in place and is handed back; a failed total reads as zero.
    pub fn from_fetch(
        summary: Result<SummaryCollection, DashboardError>,
        total_unique_users: Result<u64, DashboardError>,
    ) -> (Self, Option<DashboardError>) {
        let total_unique_users = total_unique_users.unwrap_or_else(|error| {
            log::debug!("Total users unavailable: {error}");
            0
        });

        match summary {
            Ok(summary) => {
                let mut dashboard = Self {
                    total_unique_users,
                    ..Self::default()
                };
                dashboard.replace_summary(summary);
                (dashboard, None)
            }
            Err(error) => (
                Self {
                    total_unique_users,
                    ..Self::default()
                },
                Some(error),
            ),
        }
    }

    /// Swaps in a freshly fetched snapshot.
    pub fn replace_summary(&mut self, summary: SummaryCollection) {
        self.aggregate = aggregate(&summary);
        self.summary = summary;
    }

    pub fn country_total(&self) -> usize {
        country_total(&self.aggregate)
    }

    pub fn daily_series(&self) -> Vec<DailyPoint> {
        daily_series(&self.summary)
    }

    pub fn ranked_countries(&self) -> Vec<CountryRank> {
        ranked_countries(&self.aggregate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::DailySummary;

    fn day(unique_users: u64, countries: &[(&str, u64)]) -> DailySummary {
        DailySummary {
            unique_users,
            countries: countries
                .iter()
                .map(|(code, count)| ((*code).to_string(), *count))
                .collect(),
        }
    }

    fn collection(days: &[(&str, DailySummary)]) -> SummaryCollection {
        days.iter()
            .map(|(date, summary)| ((*date).to_string(), summary.clone()))
            .collect()
    }

    #[test]
    fn larger_recent_day_is_chosen() {
        let summary = collection(&[
            ("2024-01-01", day(10, &[("DE", 10)])),
            ("2024-01-02", day(25, &[("NL", 20), ("BE", 5)])),
        ]);

        let result = aggregate(&summary);
        assert_eq!(result.chosen_date.as_deref(), Some("2024-01-02"));
        assert_eq!(result.total_users, 25);
        assert_eq!(result.countries.len(), 2);
        assert_eq!(result.countries["NL"], 20);
    }

    #[test]
    fn older_day_wins_when_it_has_more_users() {
        let summary = collection(&[
            ("2024-01-01", day(30, &[("DE", 30)])),
            ("2024-01-02", day(20, &[("NL", 20)])),
        ]);

        let result = aggregate(&summary);
        assert_eq!(result.chosen_date.as_deref(), Some("2024-01-01"));
        assert_eq!(result.total_users, 30);
        assert_eq!(result.countries.keys().collect::<Vec<_>>(), ["DE"]);
    }

    #[test]
    fn tie_keeps_the_more_recent_day() {
        let summary = collection(&[
            ("2024-01-01", day(12, &[("DE", 12)])),
            ("2024-01-02", day(12, &[("NL", 12)])),
        ]);

        assert_eq!(aggregate(&summary).chosen_date.as_deref(), Some("2024-01-02"));
    }

    #[test]
    fn only_the_lookback_window_is_considered() {
        let summary = collection(&[
            ("2023-12-31", day(500, &[("US", 500)])),
            ("2024-01-01", day(8, &[("DE", 8)])),
            ("2024-01-02", day(3, &[("NL", 3)])),
        ]);

        let result = aggregate(&summary);
        assert_eq!(result.chosen_date.as_deref(), Some("2024-01-01"));
        assert_eq!(result.total_users, 8);
    }

    #[test]
    fn empty_collection_gives_defaults() {
        let result = aggregate(&SummaryCollection::new());
        assert_eq!(result, Aggregate::default());
        assert_eq!(result.total_users, 0);
        assert!(result.countries.is_empty());
    }

    #[test]
    fn zero_user_day_is_still_chosen() {
        let summary = collection(&[("2024-01-01", day(0, &[("XX", 2)]))]);
        let result = aggregate(&summary);
        assert_eq!(result.chosen_date.as_deref(), Some("2024-01-01"));
        assert_eq!(result.total_users, 0);
        assert_eq!(country_total(&result), 0);
    }

    #[test]
    fn ranking_skips_the_unknown_code() {
        let summary = collection(&[(
            "2024-01-02",
            day(40, &[("NL", 20), ("XX", 30), ("BE", 5), ("DE", 5)]),
        )]);
        let result = aggregate(&summary);

        let ranked = ranked_countries(&result);
        let codes = ranked.iter().map(|rank| rank.code.as_str()).collect::<Vec<_>>();
        assert_eq!(codes, ["NL", "BE", "DE"]);
        assert_eq!(ranked[0].percent_of_max, 100);
        assert_eq!(ranked[1].percent_of_max, 25);
        assert_eq!(ranked[0].name, "Netherlands");
        assert_eq!(ranked[0].users_label, "20 users");
        assert_eq!(country_total(&result), 3);
    }

    #[test]
    fn series_is_ascending_with_short_labels() {
        let summary = collection(&[
            ("2024-01-02", day(25, &[])),
            ("2024-01-01", day(10, &[])),
        ]);

        let series = daily_series(&summary);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].label, "1 Jan");
        assert_eq!(series[1].unique_users, 25);
        assert_eq!(short_date_label("garbage"), "garbage");
    }

    #[test]
    fn labels_and_grouping() {
        assert_eq!(users_label(1), "1 user");
        assert_eq!(users_label(0), "0 users");
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1_000), "1,000");
        assert_eq!(thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn failed_summary_keeps_defaults_but_total_survives() {
        let (dashboard, error) = Dashboard::from_fetch(
            Err(DashboardError::fetch("/api/summary", "connection refused")),
            Ok(812),
        );

        assert!(matches!(error, Some(DashboardError::Fetch { .. })));
        assert_eq!(dashboard.aggregate, Aggregate::default());
        assert_eq!(dashboard.total_unique_users, 812);
    }

    #[test]
    fn failed_total_reads_as_zero() {
        let summary = collection(&[("2024-01-02", day(25, &[("NL", 25)]))]);
        let (dashboard, error) = Dashboard::from_fetch(
            Ok(summary),
            Err(DashboardError::fetch("/api/total_users", "HTTP 500")),
        );

        assert!(error.is_none());
        assert_eq!(dashboard.total_unique_users, 0);
        assert_eq!(dashboard.aggregate.total_users, 25);
    }
}
