//! Installing the built-in templates and demo people.

use std::collections::HashSet;

use rand::{rngs::StdRng, SeedableRng};

use super::Offboarding;
use crate::{error::Result, params::Seed, seed};

/// What a seed run added.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub templates_created: usize,
    pub templates_skipped: usize,
    pub people_created: usize,
}

impl Offboarding {
    /// Installs any built-in template not already present (matched by name)
    /// and adds `params.demo_people` random people.
    pub async fn seed(&self, params: &Seed) -> Result<SeedReport> {
        let count = params.demo_people;
        let mut rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let people = seed::demo_people(count, &mut rng);

        self.with_db(move |db| {
            let mut report = SeedReport::default();

            let existing: HashSet<String> = db
                .list_templates()?
                .into_iter()
                .map(|template| template.name)
                .collect();
            for template in seed::builtin_templates() {
                if existing.contains(&template.name) {
                    report.templates_skipped += 1;
                    continue;
                }
                db.create_template(&template)?;
                report.templates_created += 1;
            }

            let mut emails: HashSet<String> = db
                .list_people()?
                .into_iter()
                .map(|person| person.email)
                .collect();
            for person in people {
                if !emails.insert(person.email.clone()) {
                    continue;
                }
                db.create_person(&person)?;
                report.people_created += 1;
            }

            log::info!(
                "Seeded {} templates and {} people",
                report.templates_created,
                report.people_created
            );
            Ok(report)
        })
        .await
    }
}
