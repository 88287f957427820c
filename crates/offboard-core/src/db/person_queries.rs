//! People directory operations.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use super::utils::{
    conversion_error, get_id, is_unique_violation, parse_column, parse_optional_column,
};
use crate::{
    error::{DatabaseResultExt, OffboardError, Result},
    models::{NewPerson, Person, PersonKind},
};

const INSERT_PERSON_SQL: &str = "INSERT INTO people (first_name, last_name, email, department, position, role_category, seniority_level, employment_status, associate_status, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";
const PERSON_COLUMNS: &str = "id, first_name, last_name, email, department, position, role_category, seniority_level, employment_status, associate_status, created_at";

impl super::Database {
    /// Builds a person from a row. Rows carrying both or neither status are
    /// rejected.
    fn build_person_from_row(row: &rusqlite::Row) -> rusqlite::Result<Person> {
        let kind = PersonKind::from_statuses(
            parse_optional_column(row, 8)?,
            parse_optional_column(row, 9)?,
        )
        .map_err(|e| conversion_error(8, e))?;

        Ok(Person {
            id: get_id(row, 0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            email: row.get(3)?,
            department: row.get(4)?,
            position: row.get(5)?,
            role_category: row.get(6)?,
            seniority_level: row.get(7)?,
            kind,
            created_at: parse_column(row, 10)?,
        })
    }

    /// Adds a person to the directory after validating the entry form.
    pub fn create_person(&mut self, new: &NewPerson) -> Result<Person> {
        let kind = new.validate()?;
        let now = Timestamp::now();

        self.connection
            .execute(
                INSERT_PERSON_SQL,
                params![
                    new.first_name.trim(),
                    new.last_name.trim(),
                    new.email.trim(),
                    new.department.as_deref(),
                    new.position.as_deref(),
                    new.role_category.as_deref(),
                    new.seniority_level.as_deref(),
                    kind.employment_status().map(|s| s.as_str()),
                    kind.associate_status().map(|s| s.as_str()),
                    now.to_string()
                ],
            )
            .map_err(|e| {
                if is_unique_violation(&e) {
                    OffboardError::validation("email")
                        .with_reason(format!("'{}' is already registered", new.email.trim()))
                } else {
                    OffboardError::database("Failed to insert person").with_source(e)
                }
            })?;

        let id = self.connection.last_insert_rowid() as u64;
        log::info!("Added {} {} as person {id}", new.first_name, new.last_name);

        Ok(Person {
            id,
            first_name: new.first_name.trim().to_string(),
            last_name: new.last_name.trim().to_string(),
            email: new.email.trim().to_string(),
            department: new.department.clone(),
            position: new.position.clone(),
            role_category: new.role_category.clone(),
            seniority_level: new.seniority_level.clone(),
            kind,
            created_at: now,
        })
    }

    /// Retrieves a person by ID.
    pub fn get_person(&self, id: u64) -> Result<Option<Person>> {
        let query = format!("SELECT {PERSON_COLUMNS} FROM people WHERE id = ?1");
        self.connection
            .query_row(&query, params![id as i64], Self::build_person_from_row)
            .optional()
            .db_context("Failed to query person")
    }

    /// Lists every person in insertion order.
    pub fn list_people(&self) -> Result<Vec<Person>> {
        let query = format!("SELECT {PERSON_COLUMNS} FROM people ORDER BY id");
        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let people = stmt
            .query_map([], Self::build_person_from_row)
            .db_context("Failed to query people")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch people")?;

        Ok(people)
    }
}
