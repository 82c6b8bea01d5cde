//! Entity catalogue of the job board.
//!
//! Every relation is declared from both ends: owned references and
//! many-to-many fields on the owning kind, derived collections on the
//! referenced kind. Join kinds carry exactly two references.
use crate::computed;
use jobgraph::{
    model::{ComputedAttr, EntityModel, ExportPolicy, FieldModel},
    value::ScalarType,
};

pub static GUIDE: EntityModel = EntityModel {
    name: "Guide",
    primary_key: "slug",
    fields: &[
        FieldModel::scalar("slug", ScalarType::Text),
        FieldModel::scalar("title", ScalarType::Text),
        FieldModel::nullable("summary", ScalarType::Text),
        FieldModel::scalar("branch", ScalarType::Text),
        FieldModel::scalar("expertise", ScalarType::Text),
        FieldModel::scalar("basic", ScalarType::Text),
        FieldModel::nullable("advanced", ScalarType::Text),
        FieldModel::scalar("min_salary", ScalarType::Int),
        FieldModel::scalar("max_salary", ScalarType::Int),
        FieldModel::many_to_many("personalities", "Personality", "PersonalityGuide"),
        FieldModel::derived("skills", "Skill", "guide"),
        FieldModel::derived("courses", "Course", "guide"),
        FieldModel::derived("job_category", "JobCategory", "guide"),
    ],
    computed: &[ComputedAttr::new(
        "based_on_personality",
        computed::based_on_personality,
    )],
    policy: ExportPolicy::DEFAULT,
};

pub static SKILL: EntityModel = EntityModel {
    name: "Skill",
    primary_key: "slug",
    fields: &[
        FieldModel::scalar("slug", ScalarType::Text),
        FieldModel::scalar("title", ScalarType::Text),
        FieldModel::nullable("description", ScalarType::Text),
        FieldModel::reference("guide", "Guide"),
        FieldModel::scalar("exam_scores", ScalarType::Json),
        FieldModel::many_to_many("jobs", "Job", "JobSkill"),
        FieldModel::derived("exams", "Exam", "skill"),
        FieldModel::derived("seekers", "SeekerSkill", "skill"),
        FieldModel::derived("courses", "Course", "skill"),
    ],
    computed: &[],
    policy: ExportPolicy::DEFAULT,
};

/// Courses form a learning path through `previous` / `next`.
pub static COURSE: EntityModel = EntityModel {
    name: "Course",
    primary_key: "slug",
    fields: &[
        FieldModel::scalar("slug", ScalarType::Text),
        FieldModel::scalar("title", ScalarType::Text),
        FieldModel::scalar("description", ScalarType::Text),
        FieldModel::scalar("link", ScalarType::Text),
        FieldModel::scalar("clicks", ScalarType::Int),
        FieldModel::reference("guide", "Guide"),
        FieldModel::reference("skill", "Skill"),
        FieldModel::nullable_reference("previous", "Course"),
        FieldModel::derived("next", "Course", "previous"),
    ],
    computed: &[],
    policy: ExportPolicy::DEFAULT.with_max_depth(2),
};

pub static JOB_CATEGORY: EntityModel = EntityModel {
    name: "JobCategory",
    primary_key: "slug",
    fields: &[
        FieldModel::scalar("slug", ScalarType::Text),
        FieldModel::scalar("title", ScalarType::Text),
        FieldModel::reference("guide", "Guide"),
        FieldModel::many_to_many("personalities", "Personality", "PersonalityJobCategory"),
        FieldModel::derived("jobs", "Job", "category"),
    ],
    computed: &[
        ComputedAttr::new("avg_min_salary", computed::avg_min_salary),
        ComputedAttr::new("avg_max_salary", computed::avg_max_salary),
    ],
    policy: ExportPolicy::DEFAULT,
};

pub static EMPLOYER: EntityModel = EntityModel {
    name: "Employer",
    primary_key: "id",
    fields: &[
        FieldModel::scalar("id", ScalarType::Int),
        FieldModel::nullable("co_name", ScalarType::Text),
        FieldModel::nullable("co_address", ScalarType::Text),
        FieldModel::nullable("co_phones", ScalarType::Json),
        FieldModel::nullable("co_ver_code", ScalarType::Text),
        FieldModel::scalar("city", ScalarType::Text),
        FieldModel::derived("jobs", "Job", "employer"),
        FieldModel::derived("account", "User", "employer"),
    ],
    computed: &[],
    policy: ExportPolicy::DEFAULT.with_exclude(&["co_ver_code"]),
};

pub static SEEKER: EntityModel = EntityModel {
    name: "Seeker",
    primary_key: "id",
    fields: &[
        FieldModel::scalar("id", ScalarType::Int),
        FieldModel::nullable("firstname", ScalarType::Text),
        FieldModel::nullable("lastname", ScalarType::Text),
        FieldModel::nullable("cv_content", ScalarType::Text),
        FieldModel::many_to_many("personalities", "Personality", "PersonalitySeeker"),
        FieldModel::derived("exam_results", "ExamResult", "seeker"),
        FieldModel::derived("job_requests", "JobRequest", "seeker"),
        FieldModel::derived("skills", "SeekerSkill", "seeker"),
        FieldModel::derived("account", "User", "seeker"),
    ],
    computed: &[],
    policy: ExportPolicy::DEFAULT,
};

pub static USER: EntityModel = EntityModel {
    name: "User",
    primary_key: "id",
    fields: &[
        FieldModel::scalar("id", ScalarType::Text),
        FieldModel::nullable("avatar", ScalarType::Text),
        FieldModel::scalar("email", ScalarType::Text),
        FieldModel::scalar("phone_number", ScalarType::Text),
        FieldModel::scalar("pass_hash", ScalarType::Text),
        FieldModel::scalar("role", ScalarType::Text),
        FieldModel::scalar("disabled", ScalarType::Bool),
        FieldModel::nullable_reference("seeker", "Seeker"),
        FieldModel::nullable_reference("employer", "Employer"),
    ],
    computed: &[],
    policy: ExportPolicy::DEFAULT.with_exclude(&["pass_hash"]),
};

pub static PERSONALITY: EntityModel = EntityModel {
    name: "Personality",
    primary_key: "slug",
    fields: &[
        FieldModel::scalar("slug", ScalarType::Text),
        FieldModel::scalar("name", ScalarType::Text),
        FieldModel::scalar("description", ScalarType::Text),
        FieldModel::many_to_many("users", "Seeker", "PersonalitySeeker"),
        FieldModel::many_to_many("job_cats", "JobCategory", "PersonalityJobCategory"),
        FieldModel::many_to_many("guides", "Guide", "PersonalityGuide"),
        FieldModel::derived("exams", "Exam", "personality"),
    ],
    computed: &[],
    policy: ExportPolicy::DEFAULT,
};

pub static SEEKER_SKILL: EntityModel = EntityModel {
    name: "SeekerSkill",
    primary_key: "id",
    fields: &[
        FieldModel::scalar("id", ScalarType::Int),
        FieldModel::reference("skill", "Skill"),
        FieldModel::reference("seeker", "Seeker"),
        FieldModel::scalar("score", ScalarType::Int),
        FieldModel::derived("exam_results", "ExamResult", "seeker_skill"),
    ],
    computed: &[],
    policy: ExportPolicy::DEFAULT,
};

pub static EXAM: EntityModel = EntityModel {
    name: "Exam",
    primary_key: "id",
    fields: &[
        FieldModel::scalar("id", ScalarType::Int),
        FieldModel::scalar("title", ScalarType::Text),
        FieldModel::scalar("type", ScalarType::Text),
        FieldModel::reference("skill", "Skill"),
        FieldModel::reference("personality", "Personality"),
        FieldModel::scalar("questions", ScalarType::Json),
    ],
    computed: &[],
    policy: ExportPolicy::DEFAULT,
};

pub static EXAM_RESULT: EntityModel = EntityModel {
    name: "ExamResult",
    primary_key: "id",
    fields: &[
        FieldModel::scalar("id", ScalarType::Int),
        FieldModel::reference("exam", "Exam"),
        FieldModel::reference("seeker", "Seeker"),
        FieldModel::nullable_reference("seeker_skill", "SeekerSkill"),
        FieldModel::scalar("data", ScalarType::Json),
        FieldModel::scalar("score", ScalarType::Int),
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
        FieldModel::scalar("description", ScalarType::Text),
        FieldModel::scalar("requirements", ScalarType::Json),
        FieldModel::many_to_many("skills", "Skill", "JobSkill"),
        FieldModel::reference("category", "JobCategory"),
        FieldModel::scalar("min_salary", ScalarType::Int),
        FieldModel::scalar("max_salary", ScalarType::Int),
        FieldModel::scalar("created_on", ScalarType::Timestamp),
        FieldModel::scalar("expire_on", ScalarType::Timestamp),
        FieldModel::scalar("expired", ScalarType::Bool),
        FieldModel::reference("employer", "Employer"),
        FieldModel::derived("requests", "JobRequest", "job"),
    ],
    computed: &[
        ComputedAttr::new("salary", computed::salary),
        ComputedAttr::new("timedelta", computed::timedelta),
        ComputedAttr::new("requirements_list", computed::requirements_list),
    ],
    policy: ExportPolicy::DEFAULT.with_include(&["salary"]),
};

pub static JOB_REQUEST: EntityModel = EntityModel {
    name: "JobRequest",
    primary_key: "id",
    fields: &[
        FieldModel::scalar("id", ScalarType::Int),
        FieldModel::reference("job", "Job"),
        FieldModel::reference("seeker", "Seeker"),
        FieldModel::scalar("created_on", ScalarType::Timestamp),
        FieldModel::scalar("expire_on", ScalarType::Timestamp),
        FieldModel::scalar("expired", ScalarType::Bool),
    ],
    computed: &[],
    policy: ExportPolicy::DEFAULT,
};

//
// join kinds
//

pub static JOB_SKILL: EntityModel = join("JobSkill", &JOB_SKILL_FIELDS);
pub static PERSONALITY_SEEKER: EntityModel = join("PersonalitySeeker", &PERSONALITY_SEEKER_FIELDS);
pub static PERSONALITY_JOB_CATEGORY: EntityModel =
    join("PersonalityJobCategory", &PERSONALITY_JOB_CATEGORY_FIELDS);
pub static PERSONALITY_GUIDE: EntityModel = join("PersonalityGuide", &PERSONALITY_GUIDE_FIELDS);

static JOB_SKILL_FIELDS: [FieldModel; 3] = [
    FieldModel::scalar("id", ScalarType::Int),
    FieldModel::reference("job", "Job"),
    FieldModel::reference("skill", "Skill"),
];

static PERSONALITY_SEEKER_FIELDS: [FieldModel; 3] = [
    FieldModel::scalar("id", ScalarType::Int),
    FieldModel::reference("personality", "Personality"),
    FieldModel::reference("seeker", "Seeker"),
];

static PERSONALITY_JOB_CATEGORY_FIELDS: [FieldModel; 3] = [
    FieldModel::scalar("id", ScalarType::Int),
    FieldModel::reference("personality", "Personality"),
    FieldModel::reference("job_category", "JobCategory"),
];

static PERSONALITY_GUIDE_FIELDS: [FieldModel; 3] = [
    FieldModel::scalar("id", ScalarType::Int),
    FieldModel::reference("personality", "Personality"),
    FieldModel::reference("guide", "Guide"),
];

const fn join(name: &'static str, fields: &'static [FieldModel]) -> EntityModel {
    EntityModel {
        name,
        primary_key: "id",
        fields,
        computed: &[],
        policy: ExportPolicy::DEFAULT,
    }
}

/// Every kind of the catalogue, in registration order.
pub static MODELS: &[&EntityModel] = &[
    &GUIDE,
    &SKILL,
    &COURSE,
    &JOB_CATEGORY,
    &EMPLOYER,
    &SEEKER,
    &USER,
    &PERSONALITY,
    &SEEKER_SKILL,
    &EXAM,
    &EXAM_RESULT,
    &JOB,
    &JOB_REQUEST,
    &JOB_SKILL,
    &PERSONALITY_SEEKER,
    &PERSONALITY_JOB_CATEGORY,
    &PERSONALITY_GUIDE,
];
