//! Catalog files through to rankings, via both the graph and the session engine

mod common;

use convograph::{
    load_catalogs, CatalogError, ContextGraph, NodeKey, RankingMode, SessionEngine, Solution,
};

fn graph_from(files: &common::CatalogFiles) -> ContextGraph {
    let (characteristics, solutions) =
        load_catalogs(&files.characteristics, &files.solutions).unwrap();
    ContextGraph::new(characteristics, solutions)
}

fn ranked_names(graph: &ContextGraph) -> Vec<String> {
    graph
        .ranked_solutions()
        .into_iter()
        .map(|s| s.name.clone())
        .collect()
}

#[test]
fn anxiety_twice_recommends_therapy() {
    let files = common::line_catalogs();
    let mut graph = graph_from(&files);

    graph.increment("Anxiety", 3.0).unwrap();
    graph.increment("Anxiety", 3.0).unwrap();

    assert_eq!(graph.weight(NodeKey::Characteristic("Anxiety")), Some(6.0));
    assert_eq!(graph.weight(NodeKey::Solution("Therapy")), Some(12.0));
    assert_eq!(graph.weight(NodeKey::Solution("Exercise")), Some(6.0));
    assert_eq!(ranked_names(&graph), vec!["Therapy", "Exercise", "Sleep Hygiene"]);
}

#[test]
fn affinities_to_uncataloged_solutions_are_dropped() {
    let files = common::line_catalogs();
    let graph = graph_from(&files);

    let fatigue = graph.characteristic_node("Fatigue").unwrap();
    let targets: Vec<_> = graph
        .outgoing(fatigue.id)
        .filter_map(|e| graph.node(e.target))
        .map(|n| n.name().to_string())
        .collect();
    assert_eq!(targets, vec!["Exercise"]);
    assert!(graph.solution_node("Acupuncture").is_none());
}

#[test]
fn yaml_and_line_catalogs_build_the_same_graph() {
    let line = common::line_catalogs();
    let yaml = common::yaml_catalogs();
    let mut from_line = graph_from(&line);
    let mut from_yaml = graph_from(&yaml);

    for graph in [&mut from_line, &mut from_yaml] {
        graph.increment("Insomnia", 2.0).unwrap();
        graph.increment("Fatigue", 1.0).unwrap();
    }
    assert_eq!(from_line.to_string(), from_yaml.to_string());
}

#[test]
fn mixed_evidence_shifts_the_recommendation() {
    let files = common::line_catalogs();
    let mut graph = graph_from(&files);

    graph.increment("Anxiety", 1.0).unwrap();
    assert_eq!(graph.top_solution().unwrap().name, "Therapy");

    // Exercise: 1.0 from Anxiety plus 3.0 from Fatigue
    graph.increment("Fatigue", 1.0).unwrap();
    assert_eq!(graph.weight(NodeKey::Solution("Exercise")), Some(4.0));
    assert_eq!(graph.top_solution().unwrap().name, "Exercise");
}

#[test]
fn controls_shape_the_ranking() {
    let files = common::line_catalogs();
    let mut graph = graph_from(&files);

    graph.set_edge_enabled("Anxiety", "Therapy", false).unwrap();
    graph
        .set_node_enabled(NodeKey::Characteristic("Fatigue"), false)
        .unwrap();
    graph.increment("Anxiety", 2.0).unwrap();
    graph.increment("Fatigue", 5.0).unwrap();

    assert_eq!(graph.weight(NodeKey::Solution("Therapy")), Some(0.0));
    assert_eq!(graph.weight(NodeKey::Solution("Exercise")), Some(2.0));
    assert_eq!(graph.weight(NodeKey::Characteristic("Fatigue")), Some(5.0));
    assert_eq!(graph.center().weight, 7.0);

    graph
        .set_node_enabled(NodeKey::Solution("Exercise"), false)
        .unwrap();
    assert_eq!(graph.top_solution().unwrap().name, "Exercise");
    let enabled: Vec<_> = graph
        .ranked_enabled_solutions()
        .into_iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(enabled, vec!["Therapy", "Sleep Hygiene"]);
}

#[test]
fn mentions_match_names_and_synonyms() {
    let files = common::line_catalogs();
    let graph = graph_from(&files);

    let mentioned: Vec<_> = graph
        .characteristics()
        .mentioned_in("I've been so WORRIED lately and I can't sleep")
        .into_iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(mentioned, vec!["Anxiety", "Insomnia"]);

    // Whole words only
    assert!(graph.characteristics().mentioned_in("tiredness").is_empty());
}

#[test]
fn snapshot_serializes_weights() {
    let files = common::line_catalogs();
    let mut graph = graph_from(&files);
    graph.increment("Anxiety", 1.0).unwrap();

    let json = serde_json::to_value(graph.snapshot()).unwrap();
    assert_eq!(json["center"]["weight"], 1.0);
    assert_eq!(json["characteristics"][0]["name"], "Anxiety");
    assert_eq!(json["solutions"][1]["name"], "Therapy");
    assert_eq!(json["solutions"][1]["weight"], 2.0);
    assert_eq!(json["solutions"][1]["edges"][0]["peer"], "Anxiety");
}

#[test]
fn sessions_share_catalogs_but_not_weights() {
    let files = common::line_catalogs();
    let (characteristics, solutions) =
        load_catalogs(&files.characteristics, &files.solutions).unwrap();
    let engine = SessionEngine::new(characteristics, solutions).with_default_increment(3.0);

    let first = engine.open_session();
    let second = engine.open_session();
    engine.observe(&first, "Anxiety").unwrap();
    engine.observe(&first, "Anxiety").unwrap();
    engine.observe(&second, "Insomnia").unwrap();

    let ranking = engine
        .ranked_solutions(&first, RankingMode::IncludeDisabled)
        .unwrap();
    assert_eq!(ranking[0], Solution::new("Therapy"));
    assert_eq!(
        engine
            .with_graph(&first, |g| g.weight(NodeKey::Solution("Therapy")))
            .unwrap(),
        Some(12.0)
    );
    assert_eq!(
        engine.top_solution(&second).unwrap(),
        Some(Solution::new("Sleep Hygiene"))
    );

    let mut ids = engine.session_ids();
    ids.sort_by_key(|id| id.to_string());
    let mut expected = vec![first, second];
    expected.sort_by_key(|id| id.to_string());
    assert_eq!(ids, expected);
}

#[test]
fn missing_catalog_file_names_the_path() {
    let files = common::line_catalogs();
    let missing = files.dir.path().join("nope.txt");
    let err = load_catalogs(&files.characteristics, &missing).unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
    assert!(err.to_string().contains("nope.txt"));
}
