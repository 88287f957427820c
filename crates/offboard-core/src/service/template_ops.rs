//! Template catalog operations.

use super::Offboarding;
use crate::{
    catalog::{self, Catalog},
    error::{OffboardError, Result},
    models::{NewTemplate, Template},
    params::{ApplicableTemplates, Id},
};

impl Offboarding {
    /// Every stored template with its task blueprints, ordered by name.
    pub async fn list_templates(&self) -> Result<Vec<Template>> {
        self.with_db(|db| db.list_templates()).await
    }

    pub async fn get_template(&self, params: &Id) -> Result<Option<Template>> {
        let id = params.id;
        self.with_db(move |db| db.get_template(id)).await
    }

    /// Templates applicable to a department, role category and seniority,
    /// most specific first.
    ///
    /// # Errors
    ///
    /// `OffboardError::TemplateIntegrity` if any stored template has a broken
    /// dependency graph.
    pub async fn applicable_templates(&self, params: &ApplicableTemplates) -> Result<Vec<Template>> {
        let params = params.clone();

        self.with_db(move |db| {
            let catalog = Catalog::load(db.list_templates()?)?;
            Ok(catalog
                .find_applicable_templates(
                    Some(params.department.as_str()),
                    params.role_category.as_deref(),
                    params.seniority_level.as_deref(),
                )
                .into_iter()
                .cloned()
                .collect())
        })
        .await
    }

    /// Checks a stored template's scope and dependency graph.
    pub async fn validate_template(&self, params: &Id) -> Result<Template> {
        let id = params.id;

        self.with_db(move |db| {
            let template = db
                .get_template(id)?
                .ok_or(OffboardError::TemplateNotFound { id })?;
            catalog::validate_template(&template)?;
            Ok(template)
        })
        .await
    }

    pub async fn create_template(&self, new: &NewTemplate) -> Result<Template> {
        let new = new.clone();
        self.with_db(move |db| db.create_template(&new)).await
    }

    /// Deletes an unused template, returning it, or `None` if it did not
    /// exist.
    pub(crate) async fn delete_template_by_id(&self, params: &Id) -> Result<Option<Template>> {
        let id = params.id;

        self.with_db(move |db| {
            let Some(template) = db.get_template(id)? else {
                return Ok(None);
            };
            db.delete_template(id)?;
            Ok(Some(template))
        })
        .await
    }
}
