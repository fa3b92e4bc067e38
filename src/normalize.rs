use std::collections::HashMap;

use tracing::debug;

use crate::dates::parse_record_date;
use crate::error::DataError;
use crate::models::{MostRecentCompletion, Person};

/// Most recent completion per training name, kept in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MostRecentCompletions {
    entries: Vec<(String, MostRecentCompletion)>,
    index: HashMap<String, usize>,
}

impl MostRecentCompletions {
    pub fn get(&self, training: &str) -> Option<&MostRecentCompletion> {
        self.index.get(training).map(|&slot| &self.entries[slot].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MostRecentCompletion)> {
        self.entries
            .iter()
            .map(|(training, completion)| (training.as_str(), completion))
    }

    /// Keeps `candidate` only when it is strictly newer than the stored entry.
    fn offer(&mut self, training: &str, candidate: MostRecentCompletion) {
        match self.index.get(training) {
            Some(&slot) => {
                let current = &mut self.entries[slot].1;
                if candidate.timestamp > current.timestamp {
                    *current = candidate;
                }
            }
            None => {
                self.index.insert(training.to_string(), self.entries.len());
                self.entries.push((training.to_string(), candidate));
            }
        }
    }
}

pub fn most_recent_completions(person: &Person) -> Result<MostRecentCompletions, DataError> {
    let mut latest = MostRecentCompletions::default();

    for completion in &person.completions {
        let timestamp =
            parse_record_date(&completion.timestamp).map_err(|source| DataError::Timestamp {
                person: person.name.clone(),
                training: completion.name.clone(),
                value: completion.timestamp.clone(),
                source,
            })?;

        latest.offer(
            &completion.name,
            MostRecentCompletion {
                timestamp,
                expires: completion.expires.clone(),
            },
        );
    }

    debug!(
        person = %person.name,
        completions = person.completions.len(),
        trainings = latest.len(),
        "normalized completions"
    );
    Ok(latest)
}
