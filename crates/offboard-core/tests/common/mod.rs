use offboard_core::{
    models::{EmploymentStatus, NewPerson, NewTaskTemplate, NewTemplate, TaskCategory},
    Offboarding, OffboardingBuilder,
};
use tempfile::TempDir;

/// Creates a service over a fresh database in a temporary directory.
#[allow(dead_code)]
pub async fn create_test_service() -> (TempDir, Offboarding) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let service = OffboardingBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create service");
    (temp_dir, service)
}

/// A company-wide template whose tasks form a chain: each depends on the
/// previous one.
#[allow(dead_code)]
pub fn chained_template(name: &str, tasks: usize) -> NewTemplate {
    NewTemplate {
        name: name.to_string(),
        estimated_duration_days: 10,
        complexity_score: 2,
        tasks: (0..tasks)
            .map(|position| NewTaskTemplate {
                depends_on: position.checked_sub(1).into_iter().collect(),
                ..NewTaskTemplate::new(
                    format!("Step {}", position + 1),
                    TaskCategory::FinalProcedures,
                    1.0,
                )
            })
            .collect(),
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn active_employee(first: &str, department: &str) -> NewPerson {
    NewPerson {
        first_name: first.to_string(),
        last_name: "Example".to_string(),
        email: format!("{}@example.com", first.to_lowercase()),
        department: Some(department.to_string()),
        position: Some("Analyst".to_string()),
        employment_status: Some(EmploymentStatus::Active),
        ..Default::default()
    }
}
