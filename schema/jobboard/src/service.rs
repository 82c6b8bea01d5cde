//! Request-level reads of the job-board API.
//!
//! Each function turns rows of a loaded graph into validated response
//! documents through the catalogue schemas.
use crate::schema::{GUIDE_ITEM, JOB_SCHEMA, JOBS_PAGE, PAGE_REQUEST};
use jobgraph::{
    Error as EngineError,
    error::ProjectionError,
    project::Overrides,
    registry::ModelRegistry,
    schema::ValidationIssues,
    store::{EntityGraph, EntityRow, EntityStore},
    value::{Document, Key, Value},
};
use std::collections::BTreeSet;
use thiserror::Error as ThisError;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PER_PAGE: i64 = 30;

///
/// ServiceError
///

#[derive(Debug, ThisError)]
pub enum ServiceError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("page {page} is out of range ({page_count} pages)")]
    BadPagination { page: i64, page_count: i64 },

    #[error("{kind} '{key}' not found")]
    NotFound { kind: &'static str, key: Key },
}

impl From<ProjectionError> for ServiceError {
    fn from(err: ProjectionError) -> Self {
        Self::Engine(err.into())
    }
}

impl From<ValidationIssues> for ServiceError {
    fn from(err: ValidationIssues) -> Self {
        Self::Engine(err.into())
    }
}

/// One page of open postings, newest first.
pub fn jobs_page(
    registry: &ModelRegistry,
    graph: &EntityGraph,
    request: &Document,
) -> Result<Document, ServiceError> {
    PAGE_REQUEST.validate(request)?;

    let page = int_or(request, "page", DEFAULT_PAGE);
    let per_page = int_or(request, "per_page", DEFAULT_PER_PAGE);

    let mut open: Vec<&EntityRow> = graph.rows_of("Job").filter(|job| !is_expired(job)).collect();
    open.sort_by(|a, b| created_on(b).cmp(&created_on(a)));

    let total_count = i64::try_from(open.len()).unwrap_or(i64::MAX);
    let page_count = (total_count + per_page - 1) / per_page;
    if page > page_count {
        return Err(ServiceError::BadPagination { page, page_count });
    }

    let projector = registry.projector(graph);
    let skip = usize::try_from((page - 1) * per_page).unwrap_or(usize::MAX);
    let take = usize::try_from(per_page).unwrap_or(usize::MAX);
    let jobs = open
        .into_iter()
        .skip(skip)
        .take(take)
        .map(|job| projector.project(job, &JOB_SCHEMA).map(Value::from))
        .collect::<Result<Vec<_>, _>>()?;

    let meta = Document::new()
        .with("total_count", total_count)
        .with("page_count", page_count)
        .with("current_page", page)
        .with("per_page", per_page);
    let doc = Document::new().with("meta", meta).with("jobs", jobs);

    JOBS_PAGE.validate(&doc)?;
    tracing::debug!(target: "jobgraph::jobboard", page, per_page, total_count, "jobs page built");

    Ok(doc)
}

/// A single open posting.
pub fn job_detail(
    registry: &ModelRegistry,
    store: &dyn EntityStore,
    id: i64,
) -> Result<Document, ServiceError> {
    let key = Key::Int(id);
    let job = store
        .get("Job", &key)
        .filter(|job| !is_expired(job))
        .ok_or(ServiceError::NotFound { kind: "Job", key })?;

    let doc = registry.projector(store).project(job, &JOB_SCHEMA)?;
    JOB_SCHEMA.validate(&doc)?;

    Ok(doc)
}

///
/// GuideQuery
///

#[derive(Clone, Debug, Default)]
pub struct GuideQuery<'q> {
    pub branch: Option<&'q str>,
    /// Only applied together with `branch`.
    pub expertise: Option<&'q str>,
    pub seeker: Option<Key>,
    /// Return only guides matched through the seeker's personalities.
    pub personal_only: bool,
}

impl GuideQuery<'_> {
    fn matches(&self, guide: &EntityRow) -> bool {
        let Some(branch) = self.branch else {
            return true;
        };
        let text = |name| guide.value(name).and_then(Value::as_text);

        text("branch") == Some(branch)
            && self.expertise.is_none_or(|expertise| text("expertise") == Some(expertise))
    }
}

/// Guide search. Guides reached through the seeker's personalities come
/// first and are flagged `based_on_personality`; each guide appears once.
pub fn search_guides(
    registry: &ModelRegistry,
    graph: &EntityGraph,
    query: &GuideQuery<'_>,
) -> Result<Vec<Document>, ServiceError> {
    let projector = registry.projector(graph);
    let mut listed = BTreeSet::new();
    let mut result = Vec::new();

    if let Some(seeker) = &query.seeker {
        let flagged = Overrides::new().set("based_on_personality", true);

        for guide in personal_guides(graph, seeker) {
            if query.matches(guide) && listed.insert(guide.key().clone()) {
                result.push(projector.project_with(guide, &GUIDE_ITEM, &flagged)?);
            }
        }

        if query.personal_only {
            return Ok(result);
        }
    }

    for guide in graph.rows_of("Guide") {
        if query.matches(guide) && listed.insert(guide.key().clone()) {
            result.push(projector.project(guide, &GUIDE_ITEM)?);
        }
    }

    Ok(result)
}

// seeker -> PersonalitySeeker -> Personality -> PersonalityGuide -> Guide
fn personal_guides<'g>(graph: &'g EntityGraph, seeker: &Key) -> Vec<&'g EntityRow> {
    let personalities = graph
        .referencing("PersonalitySeeker", "seeker", seeker)
        .into_iter()
        .filter_map(|link| link.reference("personality"));

    personalities
        .flat_map(|personality| graph.referencing("PersonalityGuide", "personality", personality))
        .filter_map(|link| link.reference("guide"))
        .filter_map(|guide| graph.get("Guide", guide))
        .collect()
}

fn int_or(doc: &Document, name: &str, default: i64) -> i64 {
    doc.get(name).and_then(Value::as_int).unwrap_or(default)
}

fn is_expired(job: &EntityRow) -> bool {
    job.value("expired").and_then(Value::as_bool).unwrap_or(false)
}

fn created_on(job: &EntityRow) -> Option<time::OffsetDateTime> {
    job.value("created_on").and_then(Value::as_timestamp)
}
