use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Person {
    pub name: String,
    #[serde(default)]
    pub completions: Vec<Completion>,
}

/// A single training completion as it appears in the roster.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Completion {
    pub name: String,
    pub timestamp: String,
    #[serde(default)]
    pub expires: Option<String>,
}

/// The latest completion of one training for one person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MostRecentCompletion {
    pub timestamp: NaiveDate,
    pub expires: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExpirationStatus {
    #[serde(rename = "expired")]
    Expired,
    #[serde(rename = "expires soon")]
    ExpiresSoon,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpirationRecord {
    pub name: String,
    pub training: String,
    pub expiration: String,
    pub status: ExpirationStatus,
}

pub type TrainingCounts = BTreeMap<String, usize>;

pub type PeopleByTraining = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reports {
    pub completion_counts: TrainingCounts,
    pub fiscal_year_completions: PeopleByTraining,
    pub expirations: Vec<ExpirationRecord>,
}
