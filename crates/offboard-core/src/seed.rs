//! Built-in templates and demo directory entries.
//!
//! The template set covers each scope once: a default company-wide process,
//! an Engineering department process and an executive role process with all
//! three approvals. Demo people are drawn with weighted random choices so a
//! seeded directory has a realistic mix of employees and associates.

use rand::{
    distributions::{Distribution, WeightedIndex},
    seq::SliceRandom,
    Rng,
};

use crate::models::{
    ApprovalRequirements, AssociateStatus, EmploymentStatus, NewDocumentTemplate, NewPerson,
    NewTaskTemplate, NewTemplate, TaskCategory, TemplateScope,
};

const FIRST_NAMES: &[&str] = &[
    "Ava", "Ben", "Chloe", "Dev", "Elena", "Farid", "Grace", "Hiro", "Ines", "Jonas", "Kemi",
    "Liam", "Maya", "Noah", "Olga", "Priya", "Quinn", "Rosa", "Sami", "Tariq",
];

const LAST_NAMES: &[&str] = &[
    "Adeyemi", "Berg", "Costa", "Dubois", "Eriksen", "Fischer", "Garcia", "Haddad", "Ito",
    "Jensen", "Kowalski", "Larsen", "Moreau", "Nakamura", "Okafor", "Petrov", "Rossi", "Silva",
];

/// (department, positions, weight)
const DEPARTMENTS: &[(&str, &[&str], u32)] = &[
    ("Engineering", &["Software Engineer", "Staff Engineer", "Engineering Manager"], 5),
    ("Sales", &["Account Executive", "Sales Manager"], 3),
    ("Finance", &["Accountant", "Controller"], 2),
    ("People", &["HR Partner", "Recruiter"], 1),
    ("Executive", &["Chief Financial Officer", "Chief Technology Officer"], 1),
];

const SENIORITY: &[(&str, u32)] = &[("junior", 3), ("mid", 5), ("senior", 3), ("principal", 1)];

fn task(
    name: &str,
    category: TaskCategory,
    hours: f64,
    assignee_role: &str,
    depends_on: &[usize],
) -> NewTaskTemplate {
    NewTaskTemplate {
        default_assignee_role: Some(assignee_role.to_string()),
        depends_on: depends_on.to_vec(),
        ..NewTaskTemplate::new(name, category, hours)
    }
}

fn document(name: &str, document_type: &str) -> NewDocumentTemplate {
    NewDocumentTemplate {
        name: name.to_string(),
        document_type: document_type.to_string(),
        is_mandatory: true,
    }
}

fn with_evidence(mut task: NewTaskTemplate, evidence: &[&str]) -> NewTaskTemplate {
    task.requires_evidence = true;
    task.evidence_types = evidence.iter().map(|e| e.to_string()).collect();
    task
}

fn with_approval(mut task: NewTaskTemplate, approver_role: &str) -> NewTaskTemplate {
    task.requires_approval = true;
    task.approver_role = Some(approver_role.to_string());
    task
}

/// The templates installed by `ofb seed`.
pub fn builtin_templates() -> Vec<NewTemplate> {
    let mut equipment = with_evidence(
        task("Collect company equipment", TaskCategory::EquipmentReturn, 1.0, "it", &[]),
        &["signed_receipt"],
    );
    equipment
        .documents
        .push(document("Equipment return form", "form"));

    let mut exit_interview = task(
        "Conduct exit interview",
        TaskCategory::ExitInterview,
        1.0,
        "hr",
        &[0],
    );
    exit_interview
        .documents
        .push(document("Exit interview notes", "notes"));

    let standard = NewTemplate {
        name: "Standard Company-Wide Offboarding".to_string(),
        description: Some("Baseline steps for every departing person.".to_string()),
        scope: TemplateScope::CompanyWide,
        estimated_duration_days: 10,
        complexity_score: 3,
        is_default: true,
        tasks: vec![
            task(
                "Notify team and stakeholders",
                TaskCategory::Communication,
                0.5,
                "manager",
                &[],
            ),
            task(
                "Hand over ongoing work",
                TaskCategory::KnowledgeTransfer,
                6.0,
                "manager",
                &[0],
            ),
            equipment,
            with_approval(
                task(
                    "Revoke system access",
                    TaskCategory::AccessRevocation,
                    1.5,
                    "it",
                    &[1, 2],
                ),
                "security",
            ),
            exit_interview,
        ],
        ..Default::default()
    };

    let engineering = NewTemplate {
        name: "Engineering Offboarding".to_string(),
        description: Some("Code ownership and credentials for engineers.".to_string()),
        scope: TemplateScope::DepartmentSpecific,
        department: Some("Engineering".to_string()),
        estimated_duration_days: 14,
        complexity_score: 5,
        tasks: vec![
            task(
                "Document owned services",
                TaskCategory::Documentation,
                4.0,
                "employee",
                &[],
            ),
            task(
                "Reassign code ownership and on-call",
                TaskCategory::KnowledgeTransfer,
                3.0,
                "manager",
                &[0],
            ),
            with_evidence(
                task(
                    "Rotate shared credentials",
                    TaskCategory::AccessRevocation,
                    2.0,
                    "security",
                    &[1],
                ),
                &["rotation_log"],
            ),
            task(
                "Remove repository and cloud access",
                TaskCategory::AccessRevocation,
                1.0,
                "it",
                &[2],
            ),
            task(
                "Return laptop and hardware keys",
                TaskCategory::EquipmentReturn,
                1.0,
                "it",
                &[],
            ),
        ],
        ..Default::default()
    };

    let mut succession = task(
        "Approve succession plan",
        TaskCategory::TransitionPlanning,
        8.0,
        "ceo",
        &[],
    );
    succession
        .documents
        .push(document("Succession plan", "plan"));

    let executive = NewTemplate {
        name: "Executive Departure".to_string(),
        description: Some("Leadership transition with full sign-off.".to_string()),
        scope: TemplateScope::RoleSpecific,
        role_category: Some("executive".to_string()),
        estimated_duration_days: 30,
        complexity_score: 9,
        approvals: ApprovalRequirements {
            manager: true,
            hr: true,
            security: true,
        },
        tasks: vec![
            succession,
            task(
                "Inform board of directors",
                TaskCategory::Communication,
                1.0,
                "ceo",
                &[0],
            ),
            with_approval(
                task(
                    "Transfer signing authority",
                    TaskCategory::Compliance,
                    3.0,
                    "legal",
                    &[0],
                ),
                "legal",
            ),
            task(
                "Revoke privileged access",
                TaskCategory::AccessRevocation,
                2.0,
                "security",
                &[2],
            ),
            task(
                "Final compliance review",
                TaskCategory::FinalProcedures,
                2.0,
                "legal",
                &[3],
            ),
        ],
        ..Default::default()
    };

    vec![standard, engineering, executive]
}

/// Random directory entries. Roughly one in six is an associate.
pub fn demo_people<R: Rng>(count: u32, rng: &mut R) -> Vec<NewPerson> {
    let departments = weighted(DEPARTMENTS.iter().map(|(_, _, weight)| *weight));
    let seniority = weighted(SENIORITY.iter().map(|(_, weight)| *weight));

    (0..count)
        .map(|_| {
            let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Alex");
            let last = LAST_NAMES.choose(rng).copied().unwrap_or("Doe");
            let email = format!(
                "{}.{}.{:04}@example.com",
                first.to_lowercase(),
                last.to_lowercase(),
                rng.gen_range(0..10_000)
            );

            if rng.gen_ratio(1, 6) {
                let status = [
                    AssociateStatus::BoardMember,
                    AssociateStatus::Consultant,
                    AssociateStatus::Advisor,
                    AssociateStatus::Contractor,
                    AssociateStatus::Partner,
                ]
                .choose(rng)
                .copied()
                .unwrap_or(AssociateStatus::Consultant);

                return NewPerson {
                    first_name: first.to_string(),
                    last_name: last.to_string(),
                    email,
                    associate_status: Some(status),
                    ..Default::default()
                };
            }

            let (department, positions, _) = pick(DEPARTMENTS, departments.as_ref(), rng);
            let position = positions.choose(rng).copied().unwrap_or("Staff");
            let (level, _) = pick(SENIORITY, seniority.as_ref(), rng);
            let role_category = if *department == "Executive" {
                "executive"
            } else if position.contains("Manager") {
                "manager"
            } else {
                "individual_contributor"
            };

            NewPerson {
                first_name: first.to_string(),
                last_name: last.to_string(),
                email,
                department: Some(department.to_string()),
                position: Some(position.to_string()),
                role_category: Some(role_category.to_string()),
                seniority_level: Some(level.to_string()),
                employment_status: Some(EmploymentStatus::Active),
                ..Default::default()
            }
        })
        .collect()
}

fn weighted(weights: impl Iterator<Item = u32>) -> Option<WeightedIndex<u32>> {
    WeightedIndex::new(weights).ok()
}

fn pick<'a, T, R: Rng>(items: &'a [T], index: Option<&WeightedIndex<u32>>, rng: &mut R) -> &'a T {
    let position = index.map_or(0, |index| index.sample(rng));
    &items[position]
}
