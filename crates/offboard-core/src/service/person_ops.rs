//! People directory operations.

use super::Offboarding;
use crate::{
    error::Result,
    models::{NewPerson, PeopleFilter, Person},
    params::{AddPerson, Id, ListPeople},
    query,
};

impl Offboarding {
    /// Adds a person; exactly one of employment and associate status must be
    /// set.
    pub async fn add_person(&self, params: &AddPerson) -> Result<Person> {
        let new = NewPerson::try_from(params)?;
        self.with_db(move |db| db.create_person(&new)).await
    }

    pub async fn get_person(&self, params: &Id) -> Result<Option<Person>> {
        let id = params.id;
        self.with_db(move |db| db.get_person(id)).await
    }

    /// Filtered and sorted directory entries.
    pub async fn list_people(&self, params: &ListPeople) -> Result<Vec<Person>> {
        let filter = PeopleFilter::try_from(params)?;
        let sort = params.sort()?;

        let people = self.with_db(|db| db.list_people()).await?;

        let mut matching: Vec<Person> = query::filter_people(&people, &filter)
            .into_iter()
            .cloned()
            .collect();
        query::sort_people(&mut matching, sort);
        Ok(matching)
    }
}
