use super::*;
use crate::{
    error::ErrorClass,
    obs::sink::{EventLog, with_event_sink},
    store::EntityGraph,
    test_support,
    value::Key,
};
use proptest::prelude::*;
use serde_json::json;

fn row<'g>(graph: &'g EntityGraph, kind: &str, key: impl Into<Key>) -> &'g EntityRow {
    graph.get(kind, &key.into()).expect("seeded row")
}

fn nesting(value: &Value) -> usize {
    match value {
        Value::Document(doc) => 1 + doc.iter().map(|(_, v)| nesting(v)).max().unwrap_or(0),
        Value::List(items) => items.iter().map(nesting).max().unwrap_or(0),
        _ => 0,
    }
}

#[test]
fn chain_respects_max_depth() {
    let registry = test_support::registry();
    let graph = test_support::chain();

    let outcome = registry
        .exporter(&graph)
        .export_traced(row(&graph, "A", "a1"), &ExportOptions::new().max_depth(2))
        .unwrap();

    assert_eq!(
        outcome.document.to_json().unwrap(),
        json!({
            "id": "a1",
            "b": {
                "id": "b1",
                "c": { "id": "c1", "d": null },
                "from_a": [],
            },
        })
    );

    let report = &outcome.report;
    assert_eq!(report.rows_visited, 3);
    assert_eq!(
        report.at("b.c.d").map(|d| d.kind),
        Some(DegradationKind::DepthExhausted)
    );
    assert_eq!(
        report.at("b.from_a").map(|d| d.kind),
        Some(DegradationKind::CycleSkipped)
    );
    assert_eq!(report.degradations.len(), 2);
}

#[test]
fn unbounded_chain_reaches_the_end() {
    let registry = test_support::registry();
    let graph = test_support::chain();

    let outcome = registry
        .exporter(&graph)
        .export_traced(row(&graph, "A", "a1"), &ExportOptions::new().unbounded())
        .unwrap();

    assert_eq!(outcome.report.rows_visited, 4);
    assert_eq!(outcome.report.count(DegradationKind::DepthExhausted), 0);
    assert_eq!(
        outcome.document.to_json().unwrap()["b"]["c"]["d"],
        json!({ "id": "d1", "label": "end" })
    );
    assert_eq!(nesting(&outcome.document.into()), 4);
}

#[test]
fn exhausted_reference_to_an_unloaded_row_is_not_fetched() {
    let registry = test_support::registry();
    let graph = EntityGraph::new()
        .with(EntityRow::new("A", "a1").with_ref("b", "b1"))
        .with(EntityRow::new("B", "b1").with_ref("c", "c1"))
        .with(EntityRow::new("C", "c1").with_ref("d", "d1"));

    let outcome = registry
        .exporter(&graph)
        .export_traced(row(&graph, "A", "a1"), &ExportOptions::new().max_depth(2))
        .unwrap();

    assert_eq!(outcome.document.to_json().unwrap()["b"]["c"]["d"], json!(null));
    assert_eq!(
        outcome.report.at("b.c.d").map(|d| d.kind),
        Some(DegradationKind::DepthExhausted)
    );
}

#[test]
fn cycle_skipped_reference_to_an_unloaded_row_is_not_fetched() {
    let registry = test_support::registry();
    let graph = EntityGraph::new()
        .with(EntityRow::new("Node", "x").with_ref("next", "y"))
        .with(EntityRow::new("Node", "y").with_ref("next", "z"));

    let outcome = registry
        .exporter(&graph)
        .export_traced(row(&graph, "Node", "x"), &ExportOptions::new())
        .unwrap();

    assert_eq!(
        outcome.document.to_json().unwrap(),
        json!({
            "id": "x",
            "next": { "id": "y", "next": null, "previous": [] },
            "previous": [],
        })
    );
    assert_eq!(
        outcome.report.at("next.next").map(|d| d.kind),
        Some(DegradationKind::CycleSkipped)
    );
}

#[test]
fn degraded_collections_never_query_the_store() {
    let registry = test_support::registry();
    let graph = test_support::chain();
    let a1 = row(&graph, "A", "a1");

    // b.from_a is exhausted
    let store = test_support::CountingStore::new(&graph);
    registry
        .exporter(&store)
        .export(a1, &ExportOptions::new().max_depth(1))
        .unwrap();
    assert_eq!((store.gets.get(), store.referencing.get()), (1, 0));

    // b.from_a walks back along a.b
    let store = test_support::CountingStore::new(&graph);
    let outcome = registry
        .exporter(&store)
        .export_traced(a1, &ExportOptions::new().max_depth(2))
        .unwrap();
    assert_eq!(
        outcome.report.at("b.from_a").map(|d| d.kind),
        Some(DegradationKind::CycleSkipped)
    );
    assert_eq!((store.gets.get(), store.referencing.get()), (2, 0));
}

#[test]
fn self_reference_follows_one_hop() {
    let registry = test_support::registry();
    let graph = EntityGraph::new()
        .with(EntityRow::new("Node", "x").with_ref("next", "y"))
        .with(EntityRow::new("Node", "y").with_ref("next", "x"));

    let doc = registry
        .exporter(&graph)
        .export(row(&graph, "Node", "x"), &ExportOptions::new())
        .unwrap();

    assert_eq!(
        doc.to_json().unwrap(),
        json!({
            "id": "x",
            "next": { "id": "y", "next": null, "previous": [] },
            "previous": [{ "id": "y", "next": null, "previous": [] }],
        })
    );
}

#[test]
fn user_employer_cycle_expands_once() {
    let registry = test_support::registry();
    let graph = test_support::graph();

    let doc = registry
        .exporter(&graph)
        .export(row(&graph, "User", "u1"), &ExportOptions::new())
        .unwrap();

    assert_eq!(
        doc.to_json().unwrap(),
        json!({
            "id": "u1",
            "email": "hr@acme.test",
            "employer": {
                "id": 1,
                "co_name": "Acme",
                "city": "Tehran",
                "jobs": [
                    { "id": 7, "title": "Intern", "min_salary": 0, "max_salary": 0, "employer": null },
                    { "id": 8, "title": "Backend Engineer", "min_salary": 30, "max_salary": 50, "employer": null },
                ],
                "account": [],
            },
        })
    );
}

#[test]
fn employer_account_cycle_expands_once() {
    let registry = test_support::registry();
    let graph = test_support::graph();

    let outcome = registry
        .exporter(&graph)
        .export_traced(row(&graph, "Employer", 1), &ExportOptions::new())
        .unwrap();

    let json = outcome.document.to_json().unwrap();
    assert_eq!(
        json["account"],
        json!([{ "id": "u1", "email": "hr@acme.test", "employer": null }])
    );
    assert_eq!(json["jobs"][0]["employer"], json!(null));
    assert_eq!(outcome.report.count(DegradationKind::CycleSkipped), 3);
}

#[test]
fn output_order_is_fields_then_extras_then_backrefs() {
    let registry = test_support::registry();
    let graph = test_support::graph()
        .with(EntityRow::new("Employer", 2).with("co_name", "Globex"))
        .with(test_support::job(9, "Analyst", 10, 20).with_ref("employer", 2));

    let doc = registry
        .exporter(&graph)
        .export(
            row(&graph, "Job", 9),
            &ExportOptions::new().extra_attrs(["salary"]),
        )
        .unwrap();

    assert_eq!(
        doc.keys().collect::<Vec<_>>(),
        ["id", "title", "min_salary", "max_salary", "employer", "salary"]
    );
    assert_eq!(doc.to_json().unwrap()["salary"], json!({ "min": 10, "max": 20 }));

    let employer = doc.get("employer").and_then(Value::as_document).unwrap();
    assert_eq!(
        employer.keys().collect::<Vec<_>>(),
        ["id", "co_name", "city", "jobs", "account"]
    );
}

#[test]
fn many_to_many_is_opt_in() {
    let registry = test_support::registry();
    let graph = test_support::graph();
    let exporter = registry.exporter(&graph);
    let job = row(&graph, "Job", 8);

    let plain = exporter.export(job, &ExportOptions::new()).unwrap();
    assert!(!plain.contains_key("skills"));

    let outcome = exporter
        .export_traced(job, &ExportOptions::new().manytomany(true).backrefs(false))
        .unwrap();
    let json = outcome.document.to_json().unwrap();

    assert_eq!(
        outcome.document.keys().collect::<Vec<_>>(),
        ["id", "title", "min_salary", "max_salary", "employer", "skills"]
    );
    assert_eq!(
        json["skills"],
        json!([
            { "slug": "sql", "title": "SQL", "description": "Relational databases", "jobs": [] },
            { "slug": "rust", "title": "Rust", "description": null, "jobs": [] },
        ])
    );
    assert_eq!(
        outcome.report.at("skills[0].jobs").map(|d| d.edge),
        Some(EdgeId::Join { through: "JobSkill" })
    );
}

#[test]
fn recurse_off_exports_reference_keys() {
    let registry = test_support::registry();
    let graph = test_support::graph();

    let doc = registry
        .exporter(&graph)
        .export(row(&graph, "Employer", 1), &ExportOptions::new().recurse(false))
        .unwrap();

    assert_eq!(
        doc.to_json().unwrap(),
        json!({ "id": 1, "co_name": "Acme", "city": "Tehran" })
    );

    let doc = registry
        .exporter(&graph)
        .export(row(&graph, "Job", 7), &ExportOptions::new().recurse(false))
        .unwrap();
    assert_eq!(doc.get("employer"), Some(&Value::Int(1)));
}

#[test]
fn zero_depth_degrades_references_to_null() {
    let registry = test_support::registry();
    let graph = test_support::graph();

    let outcome = registry
        .exporter(&graph)
        .export_traced(row(&graph, "Job", 7), &ExportOptions::new().max_depth(0))
        .unwrap();

    assert_eq!(outcome.document.get("employer"), Some(&Value::Null));
    assert_eq!(
        outcome.report.degradations,
        [Degradation {
            path: "employer".to_string(),
            edge: EdgeId::Ref {
                kind: "Job",
                field: "employer",
            },
            kind: DegradationKind::DepthExhausted,
        }]
    );
}

#[test]
fn caller_exclude_replaces_policy_exclude() {
    let registry = test_support::registry();
    let graph = test_support::graph();
    let exporter = registry.exporter(&graph);
    let user = row(&graph, "User", "u1");
    let shallow = ExportOptions::new().recurse(false);

    let doc = exporter.export(user, &shallow).unwrap();
    assert!(!doc.contains_key("pass_hash"));

    let doc = exporter.export(user, &shallow.clone().exclude(["email"])).unwrap();
    assert_eq!(doc.keys().collect::<Vec<_>>(), ["id", "pass_hash", "employer"]);

    let explicit_null = ExportOptions {
        exclude: Setting::Null,
        ..shallow
    };
    let doc = exporter.export(user, &explicit_null).unwrap();
    assert!(doc.contains_key("pass_hash"));
}

#[test]
fn only_filters_bare_and_qualified_names() {
    let registry = test_support::registry();
    let graph = test_support::graph();
    let exporter = registry.exporter(&graph);
    let job = row(&graph, "Job", 8);

    let doc = exporter
        .export(job, &ExportOptions::new().only(["Job.title", "Job.employer"]))
        .unwrap();
    let json = doc.to_json().unwrap();

    assert_eq!(doc.keys().collect::<Vec<_>>(), ["title", "employer"]);
    assert_eq!(json["employer"]["co_name"], json!("Acme"));

    let doc = exporter.export(job, &ExportOptions::new().only(["title"])).unwrap();
    assert_eq!(doc.to_json().unwrap(), json!({ "title": "Backend Engineer" }));
}

#[test]
fn seeded_edges_are_never_followed() {
    let registry = test_support::registry();
    let graph = test_support::graph();

    let outcome = registry
        .exporter(&graph)
        .export_traced(
            row(&graph, "Job", 7),
            &ExportOptions::new().seen(EdgeId::Ref {
                kind: "Job",
                field: "employer",
            }),
        )
        .unwrap();

    assert_eq!(outcome.document.get("employer"), Some(&Value::Null));
    assert_eq!(outcome.report.count(DegradationKind::CycleSkipped), 1);
}

#[test]
fn compute_failure_aborts_the_export() {
    let registry = test_support::registry();
    let graph = test_support::graph();

    let err = registry
        .exporter(&graph)
        .export(
            row(&graph, "Job", 8),
            &ExportOptions::new().extra_attrs(["broken"]),
        )
        .unwrap_err();

    assert_eq!(err.class(), ErrorClass::Compute);
    assert!(matches!(err, ProjectionError::Compute(ref e) if e.path == "broken"));
}

#[test]
fn unknown_extra_attribute_is_a_field_error() {
    let registry = test_support::registry();
    let graph = test_support::graph();

    let err = registry
        .exporter(&graph)
        .export(
            row(&graph, "Job", 8),
            &ExportOptions::new().extra_attrs(["bonus"]),
        )
        .unwrap_err();

    assert!(matches!(err, ProjectionError::Field(ref e) if e.field == "bonus" && e.path == "bonus"));
}

#[test]
fn finished_event_carries_degradation_counts() {
    let registry = test_support::registry();
    let graph = test_support::chain();
    let log = EventLog::new();

    with_event_sink(log.clone(), || {
        registry
            .exporter(&graph)
            .export(row(&graph, "A", "a1"), &ExportOptions::new().max_depth(2))
            .unwrap();
    });

    assert_eq!(
        log.events(),
        [ProjectionEvent::ExportFinished {
            kind: "A",
            rows_visited: 3,
            depth_exhausted: 1,
            cycles_skipped: 1,
        }]
    );
}

// Random node graphs: every node points at an arbitrary node or nowhere,
// so cycles and self-loops are common.
fn node_graph(links: &[Option<usize>]) -> EntityGraph {
    let mut graph = EntityGraph::new();
    for (i, link) in links.iter().enumerate() {
        let row = EntityRow::new("Node", format!("n{i}"));
        let row = match link {
            Some(target) => row.with_ref("next", format!("n{}", target % links.len())),
            None => row.with_null_ref("next"),
        };
        graph.insert(row);
    }

    graph
}

proptest! {
    #[test]
    fn export_terminates_on_cyclic_graphs(
        links in prop::collection::vec(prop::option::of(0usize..16), 1..12),
    ) {
        let registry = test_support::registry();
        let graph = node_graph(&links);
        let exporter = registry.exporter(&graph);

        for i in 0..links.len() {
            let result = exporter.export(row(&graph, "Node", format!("n{i}")), &ExportOptions::new());
            prop_assert!(result.is_ok());
        }
    }

    #[test]
    fn export_never_nests_past_max_depth(
        links in prop::collection::vec(prop::option::of(0usize..16), 1..12),
        depth in 0u32..5,
    ) {
        let registry = test_support::registry();
        let graph = node_graph(&links);
        let options = ExportOptions::new().max_depth(depth);

        let doc = registry.exporter(&graph).export(row(&graph, "Node", "n0"), &options).unwrap();

        prop_assert!(nesting(&doc.into()) <= depth as usize + 1);
    }
}
