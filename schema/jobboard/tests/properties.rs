use jobgraph::{
    export::ExportOptions,
    store::{EntityGraph, EntityRow, EntityStore},
    value::{Key, Value},
};
use jobgraph_jobboard::{registry, schema::JOB_SCHEMA, seed};
use proptest::prelude::*;
use time::{Duration, OffsetDateTime};

// Document nesting; list elements do not add a level.
fn nesting(value: &Value) -> usize {
    match value {
        Value::Document(doc) => 1 + doc.iter().map(|(_, v)| nesting(v)).max().unwrap_or(0),
        Value::List(items) => items.iter().map(nesting).max().unwrap_or(0),
        _ => 0,
    }
}

// Employers and users only, each user pointing at an arbitrary employer.
fn account_graph(employers: usize, links: &[usize]) -> EntityGraph {
    let mut graph = EntityGraph::new();

    for id in 0..employers {
        graph.insert(
            EntityRow::new("Employer", i64::try_from(id).unwrap())
                .with("co_name", format!("co-{id}"))
                .with("city", "Tehran"),
        );
    }
    for (i, employer) in links.iter().enumerate() {
        graph.insert(
            EntityRow::new("User", format!("u{i}"))
                .with("email", format!("u{i}@example.com"))
                .with("phone_number", "09120000000")
                .with("pass_hash", "x")
                .with("role", "employer")
                .with("disabled", false)
                .with_null_ref("seeker")
                .with_ref("employer", i64::try_from(employer % employers).unwrap()),
        );
    }

    graph
}

fn posting(id: i64, min: i64, max: i64, age_minutes: i64, skills: &[bool; 3]) -> EntityGraph {
    let now = OffsetDateTime::now_utc();
    let mut graph = seed::graph(now);

    graph.insert(
        EntityRow::new("Job", id)
            .with("title", format!("posting {id}"))
            .with("description", "generated")
            .with("requirements", vec!["one", "two"])
            .with_ref("category", "data-engineer")
            .with("min_salary", min)
            .with("max_salary", max)
            .with("created_on", now - Duration::minutes(age_minutes))
            .with("expire_on", now + Duration::days(30))
            .with("expired", false)
            .with_ref("employer", 2),
    );
    for (i, slug) in ["react", "nodejs", "spark"].into_iter().enumerate() {
        if skills[i] {
            let link = 1_000 + i64::try_from(i).unwrap();
            graph.insert(
                EntityRow::new("JobSkill", link)
                    .with_ref("job", id)
                    .with_ref("skill", slug),
            );
        }
    }

    graph
}

proptest! {
    #[test]
    fn account_cycles_terminate_unbounded(
        employers in 1_usize..5,
        links in prop::collection::vec(0_usize..5, 0..8),
    ) {
        let registry = registry().unwrap();
        let graph = account_graph(employers, &links);
        let exporter = registry.exporter(&graph);

        for i in 0..links.len() {
            let user = graph.get("User", &Key::from(format!("u{i}"))).unwrap();
            let doc = exporter.export(user, &ExportOptions::new().unbounded()).unwrap();

            // user -> employer -> account[*]; the employer edge is never taken twice
            prop_assert!(nesting(&doc.into()) <= 3);
        }
    }

    #[test]
    fn export_depth_never_exceeds_the_budget(
        employers in 1_usize..4,
        links in prop::collection::vec(0_usize..4, 1..6),
        depth in 0_u32..4,
    ) {
        let registry = registry().unwrap();
        let graph = account_graph(employers, &links);
        let exporter = registry.exporter(&graph);

        for row in graph.rows_of("Employer") {
            let doc = exporter.export(row, &ExportOptions::new().max_depth(depth)).unwrap();
            prop_assert!(nesting(&doc.into()) <= depth as usize + 1);
        }
    }

    #[test]
    fn projected_postings_always_validate(
        id in 100_i64..10_000,
        min in 0_i64..100,
        max in 0_i64..100,
        age in 0_i64..1_000_000,
        skills in any::<[bool; 3]>(),
    ) {
        let registry = registry().unwrap();
        let graph = posting(id, min, max, age, &skills);
        let job = graph.get("Job", &Key::Int(id)).unwrap();

        let doc = registry.projector(&graph).project(job, &JOB_SCHEMA).unwrap();

        prop_assert_eq!(
            doc.keys().collect::<Vec<_>>(),
            JOB_SCHEMA.field_names().collect::<Vec<_>>()
        );
        prop_assert!(JOB_SCHEMA.validate(&doc).is_ok());

        let listed = doc.get("skills").and_then(Value::as_list).map_or(0, <[Value]>::len);
        prop_assert_eq!(listed, skills.iter().filter(|s| **s).count());
        prop_assert_eq!(
            doc.get("salary").is_some_and(Value::is_null),
            min == 0 || max == 0
        );
    }
}
