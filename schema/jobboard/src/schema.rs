//! Response and request schemas of the job-board API.
use crate::computed::AGE_UNITS;
use jobgraph::{
    schema::{Constraint, SchemaDescriptor, SchemaField},
    value::ScalarType,
};

const PHONE_NUMBER: &[Constraint] = &[Constraint::Digits {
    prefix: "09",
    len: 9,
}];
const POSITIVE: &[Constraint] = &[Constraint::Ge(1)];

pub static COURSE_SCHEMA: SchemaDescriptor = SchemaDescriptor::new(
    "CourseSchema",
    &[
        SchemaField::scalar("slug", ScalarType::Text),
        SchemaField::scalar("title", ScalarType::Text),
        SchemaField::scalar("description", ScalarType::Text),
        SchemaField::scalar("link", ScalarType::Text),
    ],
);

pub static EXAM_INFO: SchemaDescriptor = SchemaDescriptor::new(
    "ExamInfo",
    &[
        SchemaField::scalar("id", ScalarType::Int),
        SchemaField::scalar("title", ScalarType::Text),
    ],
);

pub static SKILL_ITEM: SchemaDescriptor = SchemaDescriptor::new(
    "SkillItem",
    &[
        SchemaField::scalar("slug", ScalarType::Text),
        SchemaField::scalar("title", ScalarType::Text),
        SchemaField::scalar("description", ScalarType::Text).optional(),
        SchemaField::nested_list("courses", &COURSE_SCHEMA),
        SchemaField::nested_list("exams", &EXAM_INFO),
    ],
);

pub static USER_SCHEMA: SchemaDescriptor = SchemaDescriptor::new(
    "UserSchema",
    &[
        SchemaField::scalar("id", ScalarType::Text),
        SchemaField::scalar("avatar", ScalarType::Text).optional(),
        SchemaField::scalar("email", ScalarType::Text),
        SchemaField::scalar("phone_number", ScalarType::Text).with_constraints(PHONE_NUMBER),
    ],
);

pub static EMPLOYER_SUMMARY: SchemaDescriptor = SchemaDescriptor::new(
    "EmployerSummary",
    &[
        SchemaField::scalar("co_name", ScalarType::Text),
        SchemaField::scalar("city", ScalarType::Text).with_constraints(&[Constraint::MaxLen(30)]),
    ],
);

pub static EMPLOYER_SCHEMA: SchemaDescriptor = SchemaDescriptor::new(
    "EmployerSchema",
    &[
        SchemaField::scalar("co_name", ScalarType::Text),
        SchemaField::scalar("city", ScalarType::Text).with_constraints(&[Constraint::MaxLen(30)]),
        SchemaField::nested_list("jobs", &JOB_SCHEMA),
    ],
);

pub static SALARY: SchemaDescriptor = SchemaDescriptor::new(
    "Salary",
    &[
        SchemaField::scalar("min", ScalarType::Int),
        SchemaField::scalar("max", ScalarType::Int),
    ],
);

pub static TIME_DELTA: SchemaDescriptor = SchemaDescriptor::new(
    "TimeDelta",
    &[
        SchemaField::scalar("unit", ScalarType::Text).with_constraints(&[Constraint::OneOf(AGE_UNITS)]),
        SchemaField::scalar("amount", ScalarType::Int).with_constraints(&[Constraint::Ge(0)]),
    ],
);

pub static JOB_SCHEMA: SchemaDescriptor = SchemaDescriptor::new(
    "JobSchema",
    &[
        SchemaField::scalar("id", ScalarType::Int).with_constraints(POSITIVE),
        SchemaField::scalar("title", ScalarType::Text),
        SchemaField::scalar("description", ScalarType::Text),
        SchemaField::nested("salary", &SALARY).optional(),
        SchemaField::scalar("created_on", ScalarType::Timestamp),
        SchemaField::nested("employer", &EMPLOYER_SUMMARY),
        SchemaField::scalar("requirements_list", ScalarType::Json),
        SchemaField::nested_list("skills", &SKILL_ITEM),
        SchemaField::nested("timedelta", &TIME_DELTA),
    ],
);

pub static GUIDE_ITEM: SchemaDescriptor = SchemaDescriptor::new(
    "GuideItem",
    &[
        SchemaField::scalar("slug", ScalarType::Text),
        SchemaField::scalar("title", ScalarType::Text),
        SchemaField::scalar("summary", ScalarType::Text),
        SchemaField::scalar("branch", ScalarType::Text),
        SchemaField::scalar("expertise", ScalarType::Text),
        SchemaField::scalar("based_on_personality", ScalarType::Bool),
    ],
);

pub static GUIDE_SCHEMA: SchemaDescriptor = SchemaDescriptor::new(
    "GuideSchema",
    &[
        SchemaField::scalar("slug", ScalarType::Text),
        SchemaField::scalar("title", ScalarType::Text),
        SchemaField::scalar("summary", ScalarType::Text),
        SchemaField::scalar("branch", ScalarType::Text),
        SchemaField::scalar("expertise", ScalarType::Text),
        SchemaField::scalar("basic", ScalarType::Text),
        SchemaField::scalar("advanced", ScalarType::Text).optional(),
        SchemaField::nested_list("skills", &SKILL_ITEM),
    ],
);

//
// pagination
//

pub static PAGE_REQUEST: SchemaDescriptor = SchemaDescriptor::new(
    "PageRequest",
    &[
        SchemaField::scalar("page", ScalarType::Int)
            .optional()
            .with_constraints(POSITIVE),
        SchemaField::scalar("per_page", ScalarType::Int)
            .optional()
            .with_constraints(&[Constraint::Ge(1), Constraint::Le(100)]),
    ],
);

pub static PAGINATION_META: SchemaDescriptor = SchemaDescriptor::new(
    "PaginationMeta",
    &[
        SchemaField::scalar("total_count", ScalarType::Int).with_constraints(POSITIVE),
        SchemaField::scalar("page_count", ScalarType::Int).with_constraints(POSITIVE),
        SchemaField::scalar("current_page", ScalarType::Int).with_constraints(POSITIVE),
        SchemaField::scalar("per_page", ScalarType::Int).with_constraints(POSITIVE),
    ],
);

pub static JOBS_PAGE: SchemaDescriptor = SchemaDescriptor::new(
    "JobsPage",
    &[
        SchemaField::nested("meta", &PAGINATION_META),
        SchemaField::nested_list("jobs", &JOB_SCHEMA),
    ],
);
