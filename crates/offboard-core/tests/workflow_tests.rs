mod common;

use offboard_core::{
    models::{ProcessStatus, TaskStatus},
    params::{AddPerson, ChangeStatus, Id, ListProcesses, StartProcess, UpdateTask},
    OffboardError,
};

use common::{chained_template, create_test_service};

fn engineer(first: &str) -> AddPerson {
    AddPerson {
        first_name: first.to_string(),
        last_name: "Walker".to_string(),
        email: format!("{}.walker@example.com", first.to_lowercase()),
        department: Some("Engineering".to_string()),
        position: Some("Platform Engineer".to_string()),
        employment_status: Some("active".to_string()),
        ..Default::default()
    }
}

#[tokio::test]
#[allow(clippy::too_many_lines)]
async fn test_complete_offboarding_workflow() {
    let (_temp_dir, service) = create_test_service().await;

    let template = service
        .create_template(&chained_template("Standard Company-Wide Offboarding", 5))
        .await
        .expect("Failed to create template");
    let person = service
        .add_person(&engineer("Uma"))
        .await
        .expect("Failed to add person");

    let process = service
        .start_process(&StartProcess {
            template_id: template.id,
            person_id: person.id,
            priority: Some("high".to_string()),
            notes: Some("Last day is Friday".to_string()),
            ..Default::default()
        })
        .await
        .expect("Failed to start process");
    assert_eq!(process.tasks.len(), 5);
    assert_eq!(process.status, ProcessStatus::Draft);

    for status in ["pending_approval", "active"] {
        service
            .change_status(&ChangeStatus {
                id: process.id,
                status: status.to_string(),
            })
            .await
            .expect("Failed to change status");
    }

    // Completing out of order is refused while the chain is open.
    let last = process.tasks[4].id;
    let err = service
        .update_task(&UpdateTask {
            id: last,
            status: Some("completed".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Step 4"));

    for task in &process.tasks {
        service
            .update_task(&UpdateTask {
                id: task.id,
                status: Some("completed".to_string()),
                actual_hours: Some(1.5),
                ..Default::default()
            })
            .await
            .expect("Failed to complete task");
    }

    let summaries = service
        .list_processes_summary(&ListProcesses {
            status: Some("active".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].progress.percentage, 100);

    let completed = service
        .change_status(&ChangeStatus {
            id: process.id,
            status: "completed".to_string(),
        })
        .await
        .unwrap();
    assert!(completed.actual_completion_date.is_some());
    assert!(completed
        .tasks
        .iter()
        .all(|task| task.status == TaskStatus::Completed && task.actual_hours == Some(1.5)));

    // Closed processes freeze their tasks.
    let frozen = service
        .update_task(&UpdateTask {
            id: last,
            assignee: Some("someone@example.com".to_string()),
            ..Default::default()
        })
        .await;
    assert!(matches!(frozen, Err(OffboardError::Validation { .. })));

    // A finished process frees the person for a new one.
    service
        .start_process(&StartProcess {
            template_id: template.id,
            person_id: person.id,
            ..Default::default()
        })
        .await
        .expect("Failed to start a second process");
}

#[tokio::test]
async fn test_list_filters_and_sorting() {
    let (_temp_dir, service) = create_test_service().await;
    let template = service
        .create_template(&chained_template("Standard", 1))
        .await
        .unwrap();

    for (first, target) in [("Ada", "2031-05-01"), ("Cal", "2030-01-15"), ("Bea", "2030-06-30")] {
        let person = service.add_person(&engineer(first)).await.unwrap();
        service
            .start_process(&StartProcess {
                template_id: template.id,
                person_id: person.id,
                target_completion_date: Some(target.to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
    }

    let by_target = service
        .list_processes(&ListProcesses {
            sort: Some("target_date".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    let names: Vec<&str> = by_target
        .iter()
        .map(|process| process.employee_name.as_str())
        .collect();
    assert_eq!(names, ["Cal Walker", "Bea Walker", "Ada Walker"]);

    let by_name_desc = service
        .list_processes(&ListProcesses {
            sort: Some("name".to_string()),
            descending: true,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_name_desc[0].employee_name, "Cal Walker");

    let search = service
        .list_processes(&ListProcesses {
            search: Some("BEA".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(search.len(), 1);

    let later = service
        .list_processes(&ListProcesses {
            timeframe: Some("later".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(later.len(), 3);

    let invalid = service
        .list_processes(&ListProcesses {
            sort: Some("salary".to_string()),
            ..Default::default()
        })
        .await;
    assert!(invalid.is_err());

    assert!(service.get_process(&Id { id: 404 }).await.unwrap().is_none());
}
