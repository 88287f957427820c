//! Template catalog: validated lookup and scope matching over templates.
//!
//! A [`Catalog`] is built from templates loaded out of the database. Loading
//! checks every template's task dependency graph, so a template with a cycle
//! or a dangling dependency never reaches the instantiator.

use std::collections::HashMap;

use crate::{
    error::{OffboardError, Result},
    models::{Template, TemplateScope},
};

/// Read-only set of validated templates.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    templates: Vec<Template>,
}

impl Catalog {
    /// Build a catalog, rejecting the first template whose dependency graph
    /// is not a DAG.
    ///
    /// # Errors
    ///
    /// `OffboardError::TemplateIntegrity` naming the template and the cycle or
    /// dangling reference.
    pub fn load(templates: Vec<Template>) -> Result<Self> {
        for template in &templates {
            validate_template(template)?;
        }
        log::debug!("Loaded catalog with {} templates", templates.len());
        Ok(Self { templates })
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn get_template(&self, id: u64) -> Result<&Template> {
        self.templates
            .iter()
            .find(|template| template.id == id)
            .ok_or(OffboardError::TemplateNotFound { id })
    }

    /// Templates that apply to the given department, role category and
    /// seniority level.
    ///
    /// A template applies when each of its filter fields is unset or equal to
    /// the supplied value; company-wide templates carry no filters and always
    /// apply. Results are ordered most specific first, then default
    /// templates, then by name.
    ///
    /// ```rust
    /// # use offboard_core::{Catalog, models::{Template, TemplateScope, ApprovalRequirements}};
    /// # use jiff::Timestamp;
    /// # fn template(id: u64, name: &str, department: Option<&str>) -> Template {
    /// #     Template {
    /// #         id, name: name.to_string(), description: None,
    /// #         scope: if department.is_some() { TemplateScope::DepartmentSpecific } else { TemplateScope::CompanyWide },
    /// #         department: department.map(String::from), role_category: None, seniority_level: None,
    /// #         estimated_duration_days: 10, complexity_score: 2, is_default: false,
    /// #         approvals: ApprovalRequirements::default(),
    /// #         created_at: Timestamp::UNIX_EPOCH, updated_at: Timestamp::UNIX_EPOCH, tasks: vec![],
    /// #     }
    /// # }
    /// let catalog = Catalog::load(vec![
    ///     template(1, "Standard", None),
    ///     template(2, "Engineering", Some("Engineering")),
    ///     template(3, "Sales", Some("Sales")),
    /// ])?;
    ///
    /// let names: Vec<_> = catalog
    ///     .find_applicable_templates(Some("Engineering"), None, None)
    ///     .iter()
    ///     .map(|t| t.name.as_str())
    ///     .collect();
    /// assert_eq!(names, ["Engineering", "Standard"]);
    /// # Ok::<(), offboard_core::OffboardError>(())
    /// ```
    pub fn find_applicable_templates(
        &self,
        department: Option<&str>,
        role_category: Option<&str>,
        seniority_level: Option<&str>,
    ) -> Vec<&Template> {
        let mut applicable: Vec<&Template> = self
            .templates
            .iter()
            .filter(|template| {
                filter_matches(template.department.as_deref(), department)
                    && filter_matches(template.role_category.as_deref(), role_category)
                    && filter_matches(template.seniority_level.as_deref(), seniority_level)
            })
            .collect();

        applicable.sort_by(|a, b| {
            b.specificity()
                .cmp(&a.specificity())
                .then_with(|| b.is_default.cmp(&a.is_default))
                .then_with(|| a.name.cmp(&b.name))
        });
        applicable
    }
}

fn filter_matches(filter: Option<&str>, value: Option<&str>) -> bool {
    match filter {
        None => true,
        Some(expected) => value == Some(expected),
    }
}

/// Check that a template's scope agrees with its filters and that its task
/// dependencies form a DAG over tasks of the same template.
pub fn validate_template(template: &Template) -> Result<()> {
    check_scope(
        &template.name,
        template.scope,
        template.department.as_deref(),
        template.role_category.as_deref(),
    )?;

    let nodes: Vec<DependencyNode<'_>> = template
        .tasks
        .iter()
        .map(|task| DependencyNode {
            id: task.id,
            name: &task.name,
            depends_on: &task.depends_on,
        })
        .collect();
    check_dependency_graph(&template.name, &nodes)
}

pub(crate) fn check_scope(
    template: &str,
    scope: TemplateScope,
    department: Option<&str>,
    role_category: Option<&str>,
) -> Result<()> {
    match scope {
        TemplateScope::CompanyWide if department.is_some() || role_category.is_some() => {
            Err(OffboardError::integrity(
                template,
                "company-wide templates cannot filter by department or role",
            ))
        }
        TemplateScope::DepartmentSpecific if department.is_none() => Err(
            OffboardError::integrity(template, "department-specific template has no department"),
        ),
        TemplateScope::RoleSpecific if role_category.is_none() => Err(OffboardError::integrity(
            template,
            "role-specific template has no role category",
        )),
        _ => Ok(()),
    }
}

/// One task in a dependency graph.
pub(crate) struct DependencyNode<'a> {
    pub id: u64,
    pub name: &'a str,
    pub depends_on: &'a [u64],
}

#[derive(Clone, Copy, PartialEq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Reject dangling references and cycles. The error names the cycle as
/// `a -> b -> a`.
pub(crate) fn check_dependency_graph(template: &str, nodes: &[DependencyNode<'_>]) -> Result<()> {
    let index: HashMap<u64, usize> = nodes
        .iter()
        .enumerate()
        .map(|(position, node)| (node.id, position))
        .collect();

    let mut edges = Vec::with_capacity(nodes.len());
    for node in nodes {
        let mut targets = Vec::with_capacity(node.depends_on.len());
        for dependency in node.depends_on {
            let target = index.get(dependency).ok_or_else(|| {
                OffboardError::integrity(
                    template,
                    format!(
                        "task '{}' depends on task {dependency}, which is not part of this template",
                        node.name
                    ),
                )
            })?;
            targets.push(*target);
        }
        edges.push(targets);
    }

    let mut marks = vec![Mark::Unvisited; nodes.len()];
    let mut path = Vec::new();
    for start in 0..nodes.len() {
        if marks[start] == Mark::Unvisited {
            if let Some(cycle) = find_cycle(start, &edges, &mut marks, &mut path) {
                let names: Vec<&str> = cycle.iter().map(|&i| nodes[i].name).collect();
                return Err(OffboardError::integrity(
                    template,
                    format!("dependency cycle: {}", names.join(" -> ")),
                ));
            }
        }
    }
    Ok(())
}

fn find_cycle(
    node: usize,
    edges: &[Vec<usize>],
    marks: &mut [Mark],
    path: &mut Vec<usize>,
) -> Option<Vec<usize>> {
    marks[node] = Mark::InProgress;
    path.push(node);

    for &next in &edges[node] {
        match marks[next] {
            Mark::InProgress => {
                let start = path.iter().position(|&i| i == next).unwrap_or(0);
                let mut cycle = path[start..].to_vec();
                cycle.push(next);
                return Some(cycle);
            }
            Mark::Unvisited => {
                if let Some(cycle) = find_cycle(next, edges, marks, path) {
                    return Some(cycle);
                }
            }
            Mark::Done => {}
        }
    }

    path.pop();
    marks[node] = Mark::Done;
    None
}
