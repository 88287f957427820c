use jiff::Timestamp;

use crate::{
    fixtures,
    models::{
        ApprovalRequirements, ApprovalRole, AssociateStatus, CustomFields, EmploymentStatus,
        NewPerson, PersonKind, PersonType, PeopleFilter, Priority, ProcessFilter, ProcessStatus,
        TaskStatus, Timeframe,
    },
    params::{ListPeople, ListProcesses},
};

#[test]
fn test_process_status_round_trip() {
    for status in ProcessStatus::ALL {
        assert_eq!(status.as_str().parse::<ProcessStatus>(), Ok(status));
    }
    assert_eq!("Canceled".parse::<ProcessStatus>(), Ok(ProcessStatus::Cancelled));
    assert!("archived".parse::<ProcessStatus>().is_err());
}

#[test]
fn test_task_status_aliases() {
    assert_eq!("in-progress".parse::<TaskStatus>(), Ok(TaskStatus::InProgress));
    assert_eq!("done".parse::<TaskStatus>(), Ok(TaskStatus::Completed));
}

#[test]
fn test_transition_table() {
    use ProcessStatus::*;

    assert!(Draft.can_transition_to(PendingApproval));
    assert!(PendingApproval.can_transition_to(Active));
    assert!(Overdue.can_transition_to(Active));
    assert!(!Draft.can_transition_to(Completed));
    assert!(!Active.can_transition_to(Draft));

    for next in ProcessStatus::ALL {
        assert!(!Completed.can_transition_to(next));
        assert!(!Cancelled.can_transition_to(next));
    }
}

#[test]
fn test_missing_approvals() {
    let mut process = fixtures::process(1, "Offboarding", ProcessStatus::PendingApproval);
    assert!(process.missing_approvals().is_empty());

    process.required_approvals = ApprovalRequirements {
        manager: true,
        hr: false,
        security: true,
    };
    assert_eq!(
        process.missing_approvals(),
        vec![ApprovalRole::Manager, ApprovalRole::Security]
    );

    process.security_approved_at = Some(Timestamp::UNIX_EPOCH);
    assert_eq!(process.missing_approvals(), vec![ApprovalRole::Manager]);
}

#[test]
fn test_person_kind_serializes_flat() {
    let person = fixtures::employee(1, "Ann", "Smith", "Engineering");
    let json = serde_json::to_value(&person).unwrap();

    assert_eq!(json["type"], "employee");
    assert_eq!(json["employment_status"], "active");
    assert!(json.get("associate_status").is_none());

    let back: crate::models::Person = serde_json::from_value(json).unwrap();
    assert_eq!(back.kind.person_type(), PersonType::Employee);
}

#[test]
fn test_new_person_needs_exactly_one_status() {
    let mut entry = NewPerson {
        first_name: "Ann".to_string(),
        last_name: "Smith".to_string(),
        email: "ann@example.com".to_string(),
        employment_status: Some(EmploymentStatus::Former),
        associate_status: Some(AssociateStatus::Advisor),
        ..Default::default()
    };
    assert!(entry.validate().is_err());

    entry.associate_status = None;
    assert_eq!(
        entry.validate().unwrap(),
        PersonKind::Employee {
            employment_status: EmploymentStatus::Former
        }
    );

    entry.employment_status = None;
    assert!(entry.validate().is_err());
}

#[test]
fn test_custom_fields_keep_unknown_keys() {
    let fields: CustomFields = serde_json::from_str(
        r#"{"completion_percentage": 40, "total_tasks": 5, "laptop_tag": "EQ-1182"}"#,
    )
    .unwrap();

    assert_eq!(fields.completion_percentage, Some(40));
    assert_eq!(fields.completed_tasks, None);
    assert_eq!(fields.extra["laptop_tag"], "EQ-1182");

    let json = serde_json::to_string(&fields).unwrap();
    assert!(json.contains("laptop_tag"));
    assert!(!json.contains("overdue_tasks"));
}

#[test]
fn test_process_filter_from_params() {
    let params = ListProcesses {
        status: Some("pending-approval".to_string()),
        timeframe: Some("no_date".to_string()),
        priority: Some("HIGH".to_string()),
        template_id: Some(3),
        ..Default::default()
    };
    let filter = ProcessFilter::try_from(&params).unwrap();
    assert_eq!(filter.status, Some(ProcessStatus::PendingApproval));
    assert_eq!(filter.timeframe, Some(Timeframe::NoDate));
    assert_eq!(filter.priority, Some(Priority::High));
    assert_eq!(filter.template_id, Some(3));

    let bad = ListProcesses {
        timeframe: Some("next_year".to_string()),
        ..Default::default()
    };
    assert!(ProcessFilter::try_from(&bad).is_err());
}

#[test]
fn test_people_filter_from_params() {
    let params = ListPeople {
        status: Some("former".to_string()),
        person_type: Some("associates".to_string()),
        ..Default::default()
    };
    let filter = PeopleFilter::try_from(&params).unwrap();
    assert_eq!(filter.status, Some(EmploymentStatus::Former));
    assert_eq!(filter.person_type, Some(PersonType::Associate));
}
