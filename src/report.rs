use tracing::info;

use crate::config::{FiscalYear, ReportConfig};
use crate::dates::{parse_record_date, ReferenceDate};
use crate::error::DataError;
use crate::models::{
    ExpirationRecord, ExpirationStatus, PeopleByTraining, Person, Reports, TrainingCounts,
};
use crate::normalize::most_recent_completions;

/// Days after the reference date that still count as expiring soon.
pub const SOON_WINDOW_DAYS: i64 = 30;

/// Number of people whose latest completions include each training.
pub fn count_completed_trainings(people: &[Person]) -> Result<TrainingCounts, DataError> {
    let mut counts = TrainingCounts::new();

    for person in people {
        let latest = most_recent_completions(person)?;
        for (training, _) in latest.iter() {
            *counts.entry(training.to_string()).or_insert(0) += 1;
        }
    }

    Ok(counts)
}

/// People whose latest completion of each requested training falls in `fiscal_year`.
pub fn filter_trainings_by_fiscal_year(
    people: &[Person],
    trainings: &[String],
    fiscal_year: FiscalYear,
) -> Result<PeopleByTraining, DataError> {
    let window = fiscal_year.window();
    let mut people_by_training: PeopleByTraining = trainings
        .iter()
        .map(|training| (training.clone(), Vec::new()))
        .collect();

    for person in people {
        let latest = most_recent_completions(person)?;
        for (training, names) in people_by_training.iter_mut() {
            match latest.get(training) {
                Some(completion) if window.contains(completion.timestamp) => {
                    names.push(person.name.clone());
                }
                _ => {}
            }
        }
    }

    Ok(people_by_training)
}

pub fn find_expired_or_soon_expiring(
    people: &[Person],
    reference: ReferenceDate,
) -> Result<Vec<ExpirationRecord>, DataError> {
    let soon = reference.window_through(SOON_WINDOW_DAYS);
    let mut records = Vec::new();

    for person in people {
        let latest = most_recent_completions(person)?;
        for (training, completion) in latest.iter() {
            let Some(expires) = completion.expires.as_deref().filter(|value| !value.is_empty())
            else {
                continue;
            };

            let expiration_date =
                parse_record_date(expires).map_err(|source| DataError::Expiration {
                    person: person.name.clone(),
                    training: training.to_string(),
                    value: expires.to_string(),
                    source,
                })?;

            let status = if expiration_date < soon.start {
                ExpirationStatus::Expired
            } else if soon.contains(expiration_date) {
                ExpirationStatus::ExpiresSoon
            } else {
                continue;
            };

            records.push(ExpirationRecord {
                name: person.name.clone(),
                training: training.to_string(),
                expiration: expires.to_string(),
                status,
            });
        }
    }

    Ok(records)
}

/// Runs all three reports; the first data error aborts the whole run.
pub fn build_reports(people: &[Person], config: &ReportConfig) -> Result<Reports, DataError> {
    let completion_counts = count_completed_trainings(people)?;
    info!(trainings = completion_counts.len(), "counted completed trainings");

    let fiscal_year_completions =
        filter_trainings_by_fiscal_year(people, &config.trainings, config.fiscal_year)?;
    info!(
        fiscal_year = %config.fiscal_year,
        matches = fiscal_year_completions.values().map(Vec::len).sum::<usize>(),
        "filtered completions by fiscal year"
    );

    let expirations = find_expired_or_soon_expiring(people, config.reference_date)?;
    info!(
        reference_date = %config.reference_date,
        expired = expirations
            .iter()
            .filter(|record| record.status == ExpirationStatus::Expired)
            .count(),
        total = expirations.len(),
        "classified expiring trainings"
    );

    Ok(Reports {
        completion_counts,
        fiscal_year_completions,
        expirations,
    })
}
