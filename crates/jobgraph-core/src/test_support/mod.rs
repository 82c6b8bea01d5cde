//! Small model catalogue shared by the unit tests.
use crate::{
    error::ComputeError,
    model::{AttrContext, ComputedAttr, EntityModel, ExportPolicy, FieldModel},
    registry::ModelRegistry,
    schema::{SchemaDescriptor, SchemaField},
    store::{EntityGraph, EntityRow, EntityStore},
    value::{Document, Key, ScalarType, Value},
};
use std::cell::Cell;

pub static EMPLOYER: EntityModel = EntityModel {
    name: "Employer",
    primary_key: "id",
    fields: &[
        FieldModel::scalar("id", ScalarType::Int),
        FieldModel::scalar("co_name", ScalarType::Text),
        FieldModel::nullable("city", ScalarType::Text),
        FieldModel::derived("jobs", "Job", "employer"),
        FieldModel::derived("account", "User", "employer"),
    ],
    computed: &[],
    policy: ExportPolicy::DEFAULT,
};

pub static USER: EntityModel = EntityModel {
    name: "User",
    primary_key: "id",
    fields: &[
        FieldModel::scalar("id", ScalarType::Text),
        FieldModel::scalar("email", ScalarType::Text),
        FieldModel::scalar("pass_hash", ScalarType::Text),
        FieldModel::nullable_reference("employer", "Employer"),
    ],
    computed: &[],
    policy: ExportPolicy::DEFAULT.with_exclude(&["pass_hash"]),
};

pub static SKILL: EntityModel = EntityModel {
    name: "Skill",
    primary_key: "slug",
    fields: &[
        FieldModel::scalar("slug", ScalarType::Text),
        FieldModel::scalar("title", ScalarType::Text),
        FieldModel::nullable("description", ScalarType::Text),
        FieldModel::many_to_many("jobs", "Job", "JobSkill"),
    ],
    computed: &[],
    policy: ExportPolicy::DEFAULT,
};

pub static JOB: EntityModel = EntityModel {
    name: "Job",
    primary_key: "id",
    fields: &[
        FieldModel::scalar("id", ScalarType::Int),
        FieldModel::scalar("title", ScalarType::Text),
        FieldModel::scalar("min_salary", ScalarType::Int),
        FieldModel::scalar("max_salary", ScalarType::Int),
        FieldModel::reference("employer", "Employer"),
        FieldModel::many_to_many("skills", "Skill", "JobSkill"),
    ],
    computed: &[
        ComputedAttr::new("salary", salary),
        ComputedAttr::new("broken", broken),
    ],
    policy: ExportPolicy::DEFAULT,
};

pub static JOB_SKILL: EntityModel = EntityModel {
    name: "JobSkill",
    primary_key: "id",
    fields: &[
        FieldModel::scalar("id", ScalarType::Int),
        FieldModel::reference("job", "Job"),
        FieldModel::reference("skill", "Skill"),
    ],
    computed: &[],
    policy: ExportPolicy::DEFAULT,
};

/// Self-referencing chain node; `previous` inverts `next`.
pub static NODE: EntityModel = EntityModel {
    name: "Node",
    primary_key: "id",
    fields: &[
        FieldModel::scalar("id", ScalarType::Text),
        FieldModel::nullable_reference("next", "Node"),
        FieldModel::derived("previous", "Node", "next"),
    ],
    computed: &[],
    policy: ExportPolicy::DEFAULT,
};

/// Chain kinds `A -> B -> C -> D`; `B.from_a` inverts `A.b`.
pub static CHAIN_A: EntityModel = EntityModel {
    name: "A",
    primary_key: "id",
    fields: &[
        FieldModel::scalar("id", ScalarType::Text),
        FieldModel::reference("b", "B"),
    ],
    computed: &[],
    policy: ExportPolicy::DEFAULT,
};

pub static CHAIN_B: EntityModel = EntityModel {
    name: "B",
    primary_key: "id",
    fields: &[
        FieldModel::scalar("id", ScalarType::Text),
        FieldModel::reference("c", "C"),
        FieldModel::derived("from_a", "A", "b"),
    ],
    computed: &[],
    policy: ExportPolicy::DEFAULT,
};

pub static CHAIN_C: EntityModel = EntityModel {
    name: "C",
    primary_key: "id",
    fields: &[
        FieldModel::scalar("id", ScalarType::Text),
        FieldModel::reference("d", "D"),
    ],
    computed: &[],
    policy: ExportPolicy::DEFAULT,
};

pub static CHAIN_D: EntityModel = EntityModel {
    name: "D",
    primary_key: "id",
    fields: &[
        FieldModel::scalar("id", ScalarType::Text),
        FieldModel::nullable("label", ScalarType::Text),
    ],
    computed: &[],
    policy: ExportPolicy::DEFAULT,
};

pub static MODELS: &[&EntityModel] = &[
    &EMPLOYER, &USER, &SKILL, &JOB, &JOB_SKILL, &NODE, &CHAIN_A, &CHAIN_B, &CHAIN_C, &CHAIN_D,
];

fn salary(ctx: &AttrContext<'_>) -> Result<Value, ComputeError> {
    let min = ctx.int("min_salary")?;
    let max = ctx.int("max_salary")?;

    if min == 0 || max == 0 {
        return Ok(Value::Null);
    }

    Ok(Document::new().with("min", min).with("max", max).into())
}

fn broken(_: &AttrContext<'_>) -> Result<Value, ComputeError> {
    Err(ComputeError::new("salary service unavailable"))
}

pub static SKILL_ITEM: SchemaDescriptor = SchemaDescriptor::new(
    "SkillItem",
    &[
        SchemaField::scalar("slug", ScalarType::Text),
        SchemaField::scalar("title", ScalarType::Text),
        SchemaField::scalar("description", ScalarType::Text).optional(),
    ],
);

pub static EMPLOYER_SUMMARY: SchemaDescriptor = SchemaDescriptor::new(
    "EmployerSummary",
    &[
        SchemaField::scalar("id", ScalarType::Int),
        SchemaField::scalar("co_name", ScalarType::Text),
        SchemaField::scalar("city", ScalarType::Text).optional(),
    ],
);

pub static SALARY: SchemaDescriptor = SchemaDescriptor::new(
    "Salary",
    &[
        SchemaField::scalar("min", ScalarType::Int),
        SchemaField::scalar("max", ScalarType::Int),
    ],
);

pub static JOB_SCHEMA: SchemaDescriptor = SchemaDescriptor::new(
    "JobSchema",
    &[
        SchemaField::scalar("id", ScalarType::Int),
        SchemaField::scalar("title", ScalarType::Text),
        SchemaField::nested("salary", &SALARY).optional(),
        SchemaField::nested("employer", &EMPLOYER_SUMMARY),
        SchemaField::nested_list("skills", &SKILL_ITEM),
    ],
);

pub static JOB_SKILLS: SchemaDescriptor = SchemaDescriptor::new(
    "JobSkills",
    &[
        SchemaField::scalar("id", ScalarType::Int),
        SchemaField::nested_list("skills", &SKILL_ITEM),
    ],
);

pub fn registry() -> ModelRegistry {
    ModelRegistry::builder()
        .register_all(MODELS)
        .build()
        .expect("test models are valid")
}

/// Employer 1 with two jobs; job 7 has no skills, job 8 has two.
pub fn graph() -> EntityGraph {
    EntityGraph::new()
        .with(
            EntityRow::new("Employer", 1)
                .with("co_name", "Acme")
                .with("city", "Tehran"),
        )
        .with(
            EntityRow::new("User", "u1")
                .with("email", "hr@acme.test")
                .with("pass_hash", "secret")
                .with_ref("employer", 1),
        )
        .with(EntityRow::new("Skill", "rust").with("title", "Rust"))
        .with(
            EntityRow::new("Skill", "sql")
                .with("title", "SQL")
                .with("description", "Relational databases"),
        )
        .with(job(7, "Intern", 0, 0))
        .with(job(8, "Backend Engineer", 30, 50))
        .with(EntityRow::new("JobSkill", 1).with_ref("job", 8).with_ref("skill", "sql"))
        .with(EntityRow::new("JobSkill", 2).with_ref("job", 8).with_ref("skill", "rust"))
}

pub fn job(id: i64, title: &str, min: i64, max: i64) -> EntityRow {
    EntityRow::new("Job", id)
        .with("title", title)
        .with("min_salary", min)
        .with("max_salary", max)
        .with_ref("employer", 1)
}

/// Chain `a1 -> b1 -> c1 -> d1` across four kinds.
pub fn chain() -> EntityGraph {
    EntityGraph::new()
        .with(EntityRow::new("A", "a1").with_ref("b", "b1"))
        .with(EntityRow::new("B", "b1").with_ref("c", "c1"))
        .with(EntityRow::new("C", "c1").with_ref("d", "d1"))
        .with(EntityRow::new("D", "d1").with("label", "end"))
}

///
/// CountingStore
/// Forwards to a graph and counts the lookups made through it.
///

pub struct CountingStore<'g> {
    graph: &'g EntityGraph,
    pub gets: Cell<usize>,
    pub referencing: Cell<usize>,
}

impl<'g> CountingStore<'g> {
    pub const fn new(graph: &'g EntityGraph) -> Self {
        Self {
            graph,
            gets: Cell::new(0),
            referencing: Cell::new(0),
        }
    }
}

impl EntityStore for CountingStore<'_> {
    fn get(&self, kind: &str, key: &Key) -> Option<&EntityRow> {
        self.gets.set(self.gets.get() + 1);
        self.graph.get(kind, key)
    }

    fn referencing(&self, source_kind: &str, via: &str, target: &Key) -> Vec<&EntityRow> {
        self.referencing.set(self.referencing.get() + 1);
        self.graph.referencing(source_kind, via, target)
    }
}
