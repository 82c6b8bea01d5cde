//! Seed graph for fixtures, demos and integration tests.
//!
//! Timestamps are relative to `now` so age buckets stay stable.
use jobgraph::{
    store::{EntityGraph, EntityRow},
    value::{Document, Value},
};
use time::{Duration, OffsetDateTime};

/// Key of the posting without skills or salary.
pub const INTERN_JOB: i64 = 7;
/// Key of the posting that has already expired.
pub const EXPIRED_JOB: i64 = 3;

#[must_use]
pub fn graph(now: OffsetDateTime) -> EntityGraph {
    let mut graph = EntityGraph::new();

    for row in guides()
        .into_iter()
        .chain(skills())
        .chain(courses())
        .chain(categories())
        .chain(people())
        .chain(personalities())
        .chain(exams())
        .chain(jobs(now))
    {
        graph.insert(row);
    }

    graph
}

fn guides() -> Vec<EntityRow> {
    vec![
        guide(
            "software-developer",
            "توسعه دهنده نرم‌افزار",
            "Builds and maintains web and backend software.",
            "engineering",
            "software",
        ),
        guide(
            "data-engineer",
            "مهندس داده",
            "Designs pipelines and storage for large datasets.",
            "engineering",
            "data",
        ),
    ]
}

fn guide(slug: &str, title: &str, summary: &str, branch: &str, expertise: &str) -> EntityRow {
    EntityRow::new("Guide", slug)
        .with("title", title)
        .with("summary", summary)
        .with("branch", branch)
        .with("expertise", expertise)
        .with("basic", format!("{title}: fundamentals"))
        .with("advanced", Value::Null)
        .with("min_salary", 20)
        .with("max_salary", 60)
}

fn skills() -> Vec<EntityRow> {
    vec![
        skill("react", "React", None, "software-developer"),
        skill(
            "nodejs",
            "Node.js",
            Some("Server-side JavaScript"),
            "software-developer",
        ),
        skill("spark", "Spark", None, "data-engineer"),
    ]
}

fn skill(slug: &str, title: &str, description: Option<&str>, guide: &str) -> EntityRow {
    EntityRow::new("Skill", slug)
        .with("title", title)
        .with("description", description)
        .with_ref("guide", guide)
        .with("exam_scores", Document::new().with("pass", 60))
}

// react-basics -> react-advanced -> react-testing
fn courses() -> Vec<EntityRow> {
    vec![
        course("react-basics", "react", None),
        course("react-advanced", "react", Some("react-basics")),
        course("react-testing", "react", Some("react-advanced")),
        course("node-intro", "nodejs", None),
    ]
}

fn course(slug: &str, skill: &str, previous: Option<&str>) -> EntityRow {
    let row = EntityRow::new("Course", slug)
        .with("title", slug.replace('-', " "))
        .with("description", format!("Course on {skill}"))
        .with("link", format!("https://courses.example/{slug}"))
        .with("clicks", 0)
        .with_ref("guide", "software-developer")
        .with_ref("skill", skill);

    match previous {
        Some(previous) => row.with_ref("previous", previous),
        None => row.with_null_ref("previous"),
    }
}

fn categories() -> Vec<EntityRow> {
    [
        ("software-developer", "توسعه دهنده نرم‌افزار", "software-developer"),
        ("data-engineer", "مهندس داده", "data-engineer"),
        ("cybersecurity-specialist", "متخصص امنیت سایبری", "software-developer"),
    ]
    .into_iter()
    .map(|(slug, title, guide)| {
        EntityRow::new("JobCategory", slug)
            .with("title", title)
            .with_ref("guide", guide)
    })
    .collect()
}

fn people() -> Vec<EntityRow> {
    vec![
        EntityRow::new("Employer", 1)
            .with("co_name", "Acme")
            .with("co_address", Value::Null)
            .with("co_phones", vec!["02112345678"])
            .with("co_ver_code", "ACME-42")
            .with("city", "Tehran"),
        EntityRow::new("Employer", 2)
            .with("co_name", "Datakar")
            .with("co_address", "Isfahan, Chaharbagh")
            .with("co_phones", Value::Null)
            .with("co_ver_code", Value::Null)
            .with("city", "Isfahan"),
        EntityRow::new("Seeker", 1)
            .with("firstname", "Sara")
            .with("lastname", "Karimi")
            .with("cv_content", Value::Null),
        EntityRow::new("User", "u-acme")
            .with("avatar", Value::Null)
            .with("email", "hr@acme.example")
            .with("phone_number", "09123456789")
            .with("pass_hash", "pbkdf2-sha256$8000$acme")
            .with("role", "employer")
            .with("disabled", false)
            .with_null_ref("seeker")
            .with_ref("employer", 1),
        EntityRow::new("User", "u-sara")
            .with("avatar", "https://cdn.example/sara.png")
            .with("email", "sara@example.com")
            .with("phone_number", "09351234567")
            .with("pass_hash", "pbkdf2-sha256$8000$sara")
            .with("role", "seeker")
            .with("disabled", false)
            .with_ref("seeker", 1)
            .with_null_ref("employer"),
    ]
}

fn personalities() -> Vec<EntityRow> {
    vec![
        EntityRow::new("Personality", "analyst")
            .with("name", "Analyst")
            .with("description", "Enjoys structure and evidence"),
        EntityRow::new("PersonalitySeeker", 1)
            .with_ref("personality", "analyst")
            .with_ref("seeker", 1),
        EntityRow::new("PersonalityJobCategory", 1)
            .with_ref("personality", "analyst")
            .with_ref("job_category", "data-engineer"),
        EntityRow::new("PersonalityGuide", 1)
            .with_ref("personality", "analyst")
            .with_ref("guide", "data-engineer"),
    ]
}

fn exams() -> Vec<EntityRow> {
    let questions = vec![
        Document::new()
            .with("content", "What does JSX compile to?")
            .with(
                "answers",
                vec![
                    Document::new().with("content", "Function calls").with("score", 1.0),
                    Document::new().with("content", "HTML").with("score", 0.0),
                ],
            ),
    ];

    vec![
        EntityRow::new("Exam", 1)
            .with("title", "React fundamentals")
            .with("type", "skill")
            .with_ref("skill", "react")
            .with_ref("personality", "analyst")
            .with("questions", questions),
        EntityRow::new("SeekerSkill", 1)
            .with_ref("skill", "react")
            .with_ref("seeker", 1)
            .with("score", 80),
        EntityRow::new("ExamResult", 1)
            .with_ref("exam", 1)
            .with_ref("seeker", 1)
            .with_ref("seeker_skill", 1)
            .with("data", Document::new().with("answers", vec![0]))
            .with("score", 80),
    ]
}

fn jobs(now: OffsetDateTime) -> Vec<EntityRow> {
    vec![
        job(1, "توسعه دهنده فول استک", "software-developer", 1, (30, 50), now - Duration::hours(3))
            .with(
                "requirements",
                vec!["3+ years of full-stack work", "React and Node.js"],
            ),
        job(2, "مهندس داده", "data-engineer", 2, (35, 55), now - Duration::days(4))
            .with("requirements", vec!["Spark", "Large-scale storage"]),
        job(EXPIRED_JOB, "مدیر پروژه", "software-developer", 1, (25, 40), now - Duration::days(40))
            .with("requirements", vec!["5+ years managing projects"])
            .with("expired", true),
        job(INTERN_JOB, "کارآموز", "software-developer", 1, (0, 0), now - Duration::minutes(2))
            .with("requirements", Vec::<&str>::new()),
        EntityRow::new("JobSkill", 1).with_ref("job", 1).with_ref("skill", "react"),
        EntityRow::new("JobSkill", 2).with_ref("job", 1).with_ref("skill", "nodejs"),
        EntityRow::new("JobSkill", 3).with_ref("job", 2).with_ref("skill", "spark"),
        EntityRow::new("JobRequest", 1)
            .with_ref("job", 1)
            .with_ref("seeker", 1)
            .with("created_on", now - Duration::hours(1))
            .with("expire_on", now + Duration::days(14))
            .with("expired", false),
    ]
}

fn job(
    id: i64,
    title: &str,
    category: &str,
    employer: i64,
    (min, max): (i64, i64),
    created_on: OffsetDateTime,
) -> EntityRow {
    EntityRow::new("Job", id)
        .with("title", title)
        .with("description", format!("{title} position"))
        .with_ref("category", category)
        .with("min_salary", min)
        .with("max_salary", max)
        .with("created_on", created_on)
        .with("expire_on", created_on + Duration::days(60))
        .with("expired", false)
        .with_ref("employer", employer)
}
