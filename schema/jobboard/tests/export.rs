use jobgraph::{
    config::EngineConfig,
    export::{DegradationKind, ExportOptions},
    obs::sink::{EventLog, ProjectionEvent, with_event_sink},
    store::{EntityGraph, EntityRow, EntityStore},
    value::Key,
};
use jobgraph_jobboard::{registry, registry_with, seed};
use serde_json::json;
use time::OffsetDateTime;

fn graph() -> EntityGraph {
    seed::graph(OffsetDateTime::now_utc())
}

fn row<'g>(graph: &'g EntityGraph, kind: &str, key: impl Into<Key>) -> &'g EntityRow {
    graph.get(kind, &key.into()).expect("seeded row")
}

#[test]
fn user_employer_cycle_expands_once() {
    let registry = registry().unwrap();
    let graph = graph();

    let outcome = registry
        .exporter(&graph)
        .export_traced(row(&graph, "User", "u-acme"), &ExportOptions::new().max_depth(3))
        .unwrap();
    let json = outcome.document.to_json().unwrap();

    assert_eq!(json["employer"]["co_name"], "Acme");
    assert_eq!(json["employer"]["account"], json!([]));
    assert_eq!(
        outcome.report.at("employer.account").map(|d| d.kind),
        Some(DegradationKind::CycleSkipped)
    );

    // every posting points back at the employer already on the path
    for job in json["employer"]["jobs"].as_array().unwrap() {
        assert_eq!(job["employer"], json!(null));
    }
}

#[test]
fn policy_excludes_apply_at_every_level() {
    let registry = registry().unwrap();
    let graph = graph();

    let json = registry
        .exporter(&graph)
        .export(row(&graph, "User", "u-acme"), &ExportOptions::new().max_depth(1))
        .unwrap()
        .to_json()
        .unwrap();

    assert!(json.get("pass_hash").is_none());
    assert!(json["employer"].get("co_ver_code").is_none());
    assert_eq!(json["employer"]["jobs"], json!([]));
}

#[test]
fn course_path_follows_previous_and_next_one_hop() {
    let registry = registry().unwrap();
    let graph = graph();

    let outcome = registry
        .exporter(&graph)
        .export_traced(row(&graph, "Course", "react-advanced"), &ExportOptions::new())
        .unwrap();
    let json = outcome.document.to_json().unwrap();

    assert_eq!(json["previous"]["slug"], "react-basics");
    assert_eq!(json["previous"]["next"], json!([]));
    assert_eq!(json["next"][0]["slug"], "react-testing");
    assert_eq!(json["next"][0]["previous"], json!(null));
    assert_eq!(
        outcome.report.at("next[0].previous").map(|d| d.kind),
        Some(DegradationKind::CycleSkipped)
    );
}

#[test]
fn course_policy_bounds_the_depth() {
    let registry = registry().unwrap();
    let graph = graph();

    let outcome = registry
        .exporter(&graph)
        .export_traced(row(&graph, "Course", "react-basics"), &ExportOptions::new())
        .unwrap();
    let json = outcome.document.to_json().unwrap();

    // Course allows two levels; the guide two hops down is cut off
    assert_eq!(json["skill"]["slug"], "react");
    assert_eq!(json["skill"]["guide"]["slug"], "software-developer");
    assert_eq!(json["skill"]["guide"]["skills"], json!([]));
    assert!(outcome.report.count(DegradationKind::DepthExhausted) > 0);
}

#[test]
fn many_to_many_is_exported_only_on_request() {
    let registry = registry().unwrap();
    let graph = graph();
    let exporter = registry.exporter(&graph);
    let job = row(&graph, "Job", 1);

    let plain = exporter
        .export(job, &ExportOptions::new().max_depth(1))
        .unwrap();
    assert!(!plain.contains_key("skills"));

    let json = exporter
        .export(job, &ExportOptions::new().max_depth(1).manytomany(true))
        .unwrap()
        .to_json()
        .unwrap();
    let skills = json["skills"].as_array().unwrap();
    assert_eq!(skills.len(), 2);
    assert_eq!(skills[0]["slug"], "react");
    assert_eq!(skills[0]["guide"], json!(null));
    assert_eq!(skills[0]["jobs"], json!([]));
}

#[test]
fn declared_include_is_exported_with_the_posting() {
    let registry = registry().unwrap();
    let graph = graph();

    let doc = registry
        .exporter(&graph)
        .export(
            row(&graph, "Job", 1),
            &ExportOptions::new()
                .recurse(false)
                .extra_attrs(["salary", "requirements_list"]),
        )
        .unwrap();

    let keys: Vec<_> = doc.keys().collect();
    let salary = keys.iter().position(|k| *k == "salary").unwrap();
    assert_eq!(keys[salary + 1], "requirements_list");
    assert_eq!(keys.last(), Some(&"requirements_list"));
    assert_eq!(doc.to_json().unwrap()["category"], "software-developer");
}

#[test]
fn configured_policy_overrides_declared_policy() {
    let config = EngineConfig::from_toml_str(
        r#"
        [entity.Job]
        max_depth = 0
        exclude = ["requests", "description"]
        "#,
    )
    .unwrap();
    let registry = registry_with(config).unwrap();
    let graph = graph();

    let json = registry
        .exporter(&graph)
        .export(row(&graph, "Job", 1), &ExportOptions::new())
        .unwrap()
        .to_json()
        .unwrap();

    assert_eq!(json["category"], json!(null));
    assert!(json.get("description").is_none());
    assert!(json.get("requests").is_none());
    assert_eq!(json["salary"], json!({ "min": 30, "max": 50 }));
}

#[test]
fn export_emits_a_finished_event() {
    let registry = registry().unwrap();
    let graph = graph();
    let log = EventLog::new();

    with_event_sink(log.clone(), || {
        registry
            .exporter(&graph)
            .export(row(&graph, "Seeker", 1), &ExportOptions::new().max_depth(1))
            .unwrap();
    });

    assert!(log.events().iter().any(|event| matches!(
        event,
        ProjectionEvent::ExportFinished { kind: "Seeker", rows_visited, .. } if *rows_visited > 1
    )));
}
