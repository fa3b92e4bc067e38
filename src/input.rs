use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use tracing::info;

use crate::config::InputFormat;
use crate::error::InputError;
use crate::models::{Completion, Person};

pub fn load_people(path: &Path, format: InputFormat) -> Result<Vec<Person>, InputError> {
    let file = std::fs::File::open(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let people = match format {
        InputFormat::Json => parse_json(file).map_err(|source| InputError::Json {
            path: path.to_path_buf(),
            source,
        })?,
        InputFormat::Csv => parse_csv(file).map_err(|source| InputError::Csv {
            path: path.to_path_buf(),
            source,
        })?,
    };

    info!(
        path = %path.display(),
        format = ?format,
        people = people.len(),
        "loaded training roster"
    );
    Ok(people)
}

pub fn parse_json<R: Read>(reader: R) -> Result<Vec<Person>, serde_json::Error> {
    serde_json::from_reader(reader)
}

/// Reads one completion per row, grouping rows into people by name in
/// first-appearance order.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<Person>, csv::Error> {
    #[derive(Deserialize)]
    struct CsvRow {
        person: String,
        training: String,
        timestamp: String,
        #[serde(default, deserialize_with = "empty_string_as_none")]
        expires: Option<String>,
    }

    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut people: Vec<Person> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for result in csv_reader.deserialize::<CsvRow>() {
        let row = result?;
        let slot = *positions.entry(row.person.clone()).or_insert_with(|| {
            people.push(Person {
                name: row.person.clone(),
                completions: Vec::new(),
            });
            people.len() - 1
        });

        people[slot].completions.push(Completion {
            name: row.training,
            timestamp: row.timestamp,
            expires: row.expires,
        });
    }

    Ok(people)
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const ROSTER_JSON: &str = r#"[
        {
            "name": "Alice",
            "completions": [
                {"name": "Safety", "timestamp": "01/10/2023", "expires": "01/10/2024"},
                {"name": "CPR", "timestamp": "02/02/2023", "expires": null},
                {"name": "Ethics", "timestamp": "03/03/2023"}
            ]
        },
        {"name": "Bob", "completions": []}
    ]"#;

    #[test]
    fn json_roster_supports_null_and_missing_expiration() {
        let people = parse_json(ROSTER_JSON.as_bytes()).unwrap();
        assert_eq!(people.len(), 2);
        assert_eq!(people[0].name, "Alice");
        assert_eq!(people[0].completions[0].expires.as_deref(), Some("01/10/2024"));
        assert_eq!(people[0].completions[1].expires, None);
        assert_eq!(people[0].completions[2].expires, None);
        assert!(people[1].completions.is_empty());
    }

    #[test]
    fn json_roster_must_be_a_list() {
        assert!(parse_json(r#"{"name": "Alice"}"#.as_bytes()).is_err());
        assert!(parse_json("not json".as_bytes()).is_err());
    }

    #[test]
    fn csv_rows_group_by_person_in_order() {
        let data = "person,training,timestamp,expires\n\
                    Alice,Safety,01/10/2023,01/10/2024\n\
                    Bob,CPR,02/02/2023,\n\
                    Alice, Safety ,01/15/2023,01/15/2024\n";

        let people = parse_csv(data.as_bytes()).unwrap();
        assert_eq!(people.len(), 2);
        assert_eq!(people[0].name, "Alice");
        assert_eq!(people[0].completions.len(), 2);
        assert_eq!(people[0].completions[1].name, "Safety");
        assert_eq!(people[0].completions[1].timestamp, "01/15/2023");
        assert_eq!(people[1].name, "Bob");
        assert_eq!(people[1].completions[0].expires, None);
    }

    #[test]
    fn csv_missing_column_is_rejected() {
        let data = "person,training\nAlice,Safety\n";
        assert!(parse_csv(data.as_bytes()).is_err());
    }

    #[test]
    fn load_people_reads_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ROSTER_JSON.as_bytes()).unwrap();

        let people = load_people(file.path(), InputFormat::Json).unwrap();
        assert_eq!(people.len(), 2);
    }

    #[test]
    fn load_people_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("trainings.txt");

        let err = load_people(&missing, InputFormat::Json).unwrap_err();
        assert!(matches!(err, InputError::Read { .. }));
        assert!(err.to_string().contains("trainings.txt"));
    }

    #[test]
    fn load_people_reports_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[{\"name\": \"Alice\"").unwrap();

        let err = load_people(file.path(), InputFormat::Json).unwrap_err();
        assert!(matches!(err, InputError::Json { .. }));
    }
}
