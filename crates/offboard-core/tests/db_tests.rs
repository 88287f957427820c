mod common;

use jiff::civil::date;
use offboard_core::{
    db::migrations::SCHEMA_VERSION,
    instantiate::instantiate,
    lifecycle::{self, StatusChange},
    models::{
        AssociateStatus, DocumentStatus, EmploymentStatus, InstantiateOptions,
        NewDocumentTemplate, NewPerson, ProcessStatus, ProgressSource, TaskStatus,
        UpdateTaskRequest,
    },
    progress::compute_progress,
    Database, OffboardError,
};
use tempfile::NamedTempFile;

use common::{active_employee, chained_template};

fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

#[test]
fn test_database_initialization() {
    let (temp_file, db) = create_test_db();
    assert!(temp_file.path().exists());
    assert_eq!(db.schema_version().unwrap(), SCHEMA_VERSION);

    // Reopening an initialized file is a no-op.
    let reopened = Database::new(temp_file.path()).unwrap();
    assert_eq!(reopened.schema_version().unwrap(), SCHEMA_VERSION);
}

#[test]
fn test_unversioned_file_is_upgraded() {
    let temp_file = NamedTempFile::new().unwrap();
    drop(Database::new(temp_file.path()).unwrap());

    let raw = rusqlite::Connection::open(temp_file.path()).unwrap();
    raw.execute_batch(
        "DROP INDEX idx_processes_target_date;
         DROP INDEX idx_processes_department;
         PRAGMA user_version = 0;",
    )
    .unwrap();
    drop(raw);

    let db = Database::new(temp_file.path()).unwrap();
    assert_eq!(db.schema_version().unwrap(), SCHEMA_VERSION);
    drop(db);

    let raw = rusqlite::Connection::open(temp_file.path()).unwrap();
    let indexes: i64 = raw
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND name IN \
             ('idx_processes_target_date', 'idx_processes_department')",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(indexes, 2);
}

#[test]
fn test_create_template_round_trip() {
    let (_temp_file, mut db) = create_test_db();
    let mut new = chained_template("Chain", 3);
    new.tasks[2].documents.push(NewDocumentTemplate {
        name: "Clearance form".to_string(),
        document_type: "form".to_string(),
        is_mandatory: true,
    });
    new.tasks[2].evidence_types = vec!["photo".to_string(), "receipt".to_string()];

    let template = db.create_template(&new).unwrap();
    assert_eq!(template.tasks.len(), 3);
    assert_eq!(template.tasks[1].depends_on, vec![template.tasks[0].id]);
    assert_eq!(template.tasks[2].documents[0].name, "Clearance form");
    assert_eq!(template.tasks[2].evidence_types, ["photo", "receipt"]);

    let fetched = db.get_template(template.id).unwrap().unwrap();
    assert_eq!(fetched, template);
    assert!(db.get_template(999).unwrap().is_none());
}

#[test]
fn test_create_template_rejects_cycles_and_duplicates() {
    let (_temp_file, mut db) = create_test_db();

    let mut cyclic = chained_template("Cyclic", 3);
    cyclic.tasks[0].depends_on = vec![2];
    let err = db.create_template(&cyclic).unwrap_err();
    assert!(matches!(err, OffboardError::TemplateIntegrity { .. }));
    assert!(db.list_templates().unwrap().is_empty());

    let mut dangling = chained_template("Dangling", 2);
    dangling.tasks[1].depends_on = vec![7];
    assert!(db.create_template(&dangling).is_err());

    db.create_template(&chained_template("Unique", 1)).unwrap();
    let err = db
        .create_template(&chained_template("Unique", 1))
        .unwrap_err();
    assert!(matches!(err, OffboardError::Validation { ref field, .. } if field == "name"));
}

#[test]
fn test_out_of_range_complexity_is_not_reported_as_duplicate() {
    let (_temp_file, mut db) = create_test_db();

    let mut heavy = chained_template("Unique Name", 1);
    heavy.complexity_score = 11;
    match db.create_template(&heavy).unwrap_err() {
        OffboardError::Validation { field, reason } => {
            assert_eq!(field, "complexity_score");
            assert!(!reason.contains("already exists"));
        }
        other => panic!("Expected complexity validation error, got {other:?}"),
    }
    assert!(db.list_templates().unwrap().is_empty());

    heavy.complexity_score = 10;
    db.create_template(&heavy).unwrap();
    match db.create_template(&heavy).unwrap_err() {
        OffboardError::Validation { field, reason } => {
            assert_eq!(field, "name");
            assert!(reason.contains("already exists"));
        }
        other => panic!("Expected duplicate name error, got {other:?}"),
    }
}

#[test]
fn test_person_with_both_statuses_is_rejected() {
    let (_temp_file, mut db) = create_test_db();

    let both = NewPerson {
        employment_status: Some(EmploymentStatus::Active),
        associate_status: Some(AssociateStatus::Consultant),
        ..active_employee("Pat", "Engineering")
    };
    let err = db.create_person(&both).unwrap_err();
    assert!(matches!(err, OffboardError::Validation { .. }));
    assert!(db.list_people().unwrap().is_empty());

    let person = db.create_person(&active_employee("Pat", "Engineering")).unwrap();
    let err = db
        .create_person(&active_employee("Pat", "Sales"))
        .unwrap_err();
    assert!(matches!(err, OffboardError::Validation { ref field, .. } if field == "email"));
    assert_eq!(db.get_person(person.id).unwrap(), Some(person));
}

#[test]
fn test_insert_process_writes_tasks_documents_and_edges() {
    let (_temp_file, mut db) = create_test_db();
    let mut new_template = chained_template("Standard", 5);
    new_template.tasks[0].documents.push(NewDocumentTemplate {
        name: "Resignation letter".to_string(),
        document_type: "letter".to_string(),
        is_mandatory: true,
    });
    let template = db.create_template(&new_template).unwrap();
    let person = db
        .create_person(&active_employee("Quinn", "Engineering"))
        .unwrap();

    let today = date(2024, 3, 1);
    let new = instantiate(&template, &person, &InstantiateOptions::default(), today, &[]).unwrap();
    let process = db.insert_process(&new).unwrap();

    assert_eq!(process.status, ProcessStatus::Draft);
    assert_eq!(process.target_completion_date, Some(date(2024, 3, 11)));
    assert_eq!(process.tasks.len(), 5);
    assert_eq!(process.tasks[0].documents[0].status, DocumentStatus::NotStarted);
    for pair in process.tasks.windows(2) {
        assert_eq!(pair[1].depends_on, vec![pair[0].id]);
        assert!(pair[1].template_task_id.is_some());
    }

    assert_eq!(process.custom_fields.total_tasks, Some(5));
    assert_eq!(process.custom_fields.completion_percentage, Some(0));
}

#[test]
fn test_open_process_index_backs_up_instantiator() {
    let (_temp_file, mut db) = create_test_db();
    let template = db.create_template(&chained_template("Standard", 2)).unwrap();
    let person = db.create_person(&active_employee("Rae", "Sales")).unwrap();
    let today = date(2024, 3, 1);

    let new = instantiate(&template, &person, &InstantiateOptions::default(), today, &[]).unwrap();
    let first = db.insert_process(&new).unwrap();

    // The same draft again, as if two callers raced past the check.
    let err = db.insert_process(&new).unwrap_err();
    assert!(matches!(
        err,
        OffboardError::DuplicateProcess { existing_process_id, .. } if existing_process_id == first.id
    ));
    assert_eq!(db.list_processes(false).unwrap().len(), 1);
}

#[test]
fn test_task_change_refreshes_cached_counters() {
    let (_temp_file, mut db) = create_test_db();
    let template = db.create_template(&chained_template("Standard", 4)).unwrap();
    let person = db.create_person(&active_employee("Sol", "Sales")).unwrap();
    let new = instantiate(
        &template,
        &person,
        &InstantiateOptions::default(),
        date(2024, 3, 1),
        &[],
    )
    .unwrap();
    let process = db.insert_process(&new).unwrap();

    let first = &process.tasks[0];
    let change = lifecycle::update_task(
        &process,
        first,
        &process.tasks,
        &UpdateTaskRequest::status(TaskStatus::Completed),
        jiff::Timestamp::now(),
    )
    .unwrap();
    let task = db.apply_task_change(first.id, &change).unwrap();
    assert_eq!(task.status, TaskStatus::Completed);

    let listed = db.list_processes(false).unwrap();
    assert!(listed[0].tasks.is_empty());
    let progress = compute_progress(&listed[0], None);
    assert_eq!(progress.source, ProgressSource::Cached);
    assert_eq!(progress.percentage, 25);
    assert_eq!(progress.completed_tasks, 1);

    let loaded = db.get_process(process.id).unwrap().unwrap();
    let progress = compute_progress(&loaded, Some(&loaded.tasks));
    assert_eq!(progress.source, ProgressSource::Tasks);
    assert_eq!(progress.percentage, 25);
}

#[test]
fn test_status_approval_and_delete() {
    let (_temp_file, mut db) = create_test_db();
    let template = db.create_template(&chained_template("Standard", 2)).unwrap();
    let person = db.create_person(&active_employee("Tia", "Sales")).unwrap();
    let new = instantiate(
        &template,
        &person,
        &InstantiateOptions::default(),
        date(2024, 3, 1),
        &[],
    )
    .unwrap();
    let process = db.insert_process(&new).unwrap();

    db.update_process_status(
        process.id,
        &StatusChange {
            status: ProcessStatus::PendingApproval,
            actual_start_date: None,
            actual_completion_date: None,
        },
    )
    .unwrap();
    db.record_approval(
        process.id,
        offboard_core::models::ApprovalRole::Hr,
        jiff::Timestamp::now(),
    )
    .unwrap();

    let updated = db.get_process(process.id).unwrap().unwrap();
    assert_eq!(updated.status, ProcessStatus::PendingApproval);
    assert!(updated.hr_approved_at.is_some());
    assert!(updated.manager_approved_at.is_none());

    // Templates in use cannot be removed.
    assert!(db.delete_template(template.id).is_err());

    db.delete_process(process.id).unwrap();
    assert!(db.get_process(process.id).unwrap().is_none());
    assert!(db.get_task(process.tasks[0].id).unwrap().is_none());
    assert!(matches!(
        db.delete_process(process.id),
        Err(OffboardError::ProcessNotFound { .. })
    ));

    db.delete_template(template.id).unwrap();
    assert!(matches!(
        db.delete_template(template.id),
        Err(OffboardError::TemplateNotFound { .. })
    ));
}
