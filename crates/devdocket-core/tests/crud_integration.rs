//! Integration tests for the generic record controller across widgets.

use devdocket_core::records::{
    Bug, BugDraft, BugFlag, BugStatus, Difficulty, ErrorType, JournalDraft, JournalEntry, Problem,
    ProblemDraft, TechStack,
};
use devdocket_core::storage::{load_records, save_records};
use devdocket_core::{CoreError, CrudController, Database, MemoryStore, Query, Record, RecordStore};
use proptest::prelude::*;

fn problem(name: &str, difficulty: Difficulty) -> ProblemDraft {
    ProblemDraft {
        name: name.to_string(),
        time: Some(20),
        difficulty,
        link: format!("https://example.com/{name}"),
    }
}

#[test]
fn add_then_load_returns_added_record_first() {
    let db = Database::open_memory().unwrap();
    let mut problems = CrudController::<Problem, _>::mount(&db);
    problems.add(problem("older", Difficulty::Easy)).unwrap();
    let added = problems.add(problem("newer", Difficulty::Hard)).unwrap().clone();

    let loaded: Vec<Problem> = load_records(&db, Problem::NAMESPACE);
    assert_eq!(loaded.first(), Some(&added));
}

#[test]
fn widgets_survive_remount_from_a_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("devdocket.db");

    let id = {
        let db = Database::open_at(&path).unwrap();
        let mut journal = CrudController::<JournalEntry, _>::mount(&db);
        journal.add(JournalDraft::new("Learned about React Hooks today!")).unwrap();
        journal.add(JournalDraft::new("Fixed the flaky test")).unwrap().id
    };

    let db = Database::open_at(&path).unwrap();
    let journal = CrudController::<JournalEntry, _>::mount(&db);
    assert_eq!(journal.len(), 2);
    assert_eq!(journal.get(id).unwrap().text, "Fixed the flaky test");
}

#[test]
fn corrupt_namespace_mounts_empty_and_recovers_on_next_write() {
    let db = Database::open_memory().unwrap();
    db.write_blob(Bug::NAMESPACE, "[{\"id\": 1, \"title\":").unwrap();

    let mut bugs = CrudController::<Bug, _>::mount(&db);
    assert!(bugs.is_empty());
    bugs.add(BugDraft {
        title: "Unexpected token".into(),
        ..BugDraft::default()
    })
    .unwrap();

    let reloaded: Vec<Bug> = load_records(&db, Bug::NAMESPACE);
    assert_eq!(reloaded.len(), 1);
}

#[test]
fn update_then_get_reflects_draft_with_stable_identity() {
    let store = MemoryStore::new();
    let mut problems = CrudController::<Problem, _>::mount(&store);
    let original = problems.add(problem("Two Sum", Difficulty::Easy)).unwrap().clone();

    let draft = ProblemDraft {
        name: "Three Sum".into(),
        time: Some(45),
        difficulty: Difficulty::Medium,
        link: String::new(),
    };
    problems.update(original.id, draft).unwrap();

    let got = problems.get(original.id).unwrap();
    assert_eq!(got.id, original.id);
    assert_eq!(got.created_at, original.created_at);
    assert_eq!(
        (got.name.as_str(), got.time, got.difficulty, got.link.as_str()),
        ("Three Sum", 45, Difficulty::Medium, "")
    );
}

#[test]
fn remove_then_get_is_not_found_and_second_remove_is_noop() {
    let db = Database::open_memory().unwrap();
    let mut problems = CrudController::<Problem, _>::mount(&db);
    let id = problems.add(problem("gone", Difficulty::Easy)).unwrap().id;

    assert!(problems.remove(id).unwrap().is_some());
    assert!(matches!(problems.get(id), Err(CoreError::NotFound { .. })));
    assert!(problems.remove(id).unwrap().is_none());

    let reloaded: Vec<Problem> = load_records(&db, Problem::NAMESPACE);
    assert!(reloaded.is_empty());
}

#[test]
fn difficulty_filter_returns_exact_subset_in_order() {
    let store = MemoryStore::new();
    let mut problems = CrudController::<Problem, _>::mount(&store);
    let pattern = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Medium,
        Difficulty::Easy,
        Difficulty::Medium,
    ];
    for (i, d) in pattern.iter().enumerate() {
        problems.add(problem(&format!("p{i}"), *d)).unwrap();
    }

    let query = Query::new().eq(|p: &Problem| p.difficulty, Difficulty::Medium);
    let hits: Vec<&str> = problems
        .query(&query)
        .into_iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(hits, ["p5", "p3", "p1"]);
}

#[test]
fn bug_vault_search_and_status_toggle() {
    let store = MemoryStore::new();
    let mut bugs = CrudController::<Bug, _>::mount(&store);
    let react = bugs
        .add(BugDraft {
            title: "TypeError: undefined is not a function".into(),
            tech_stack: TechStack::React,
            error_type: ErrorType::Runtime,
            solution: "Checked method call and fixed the binding.".into(),
        })
        .unwrap()
        .id;
    bugs.add(BugDraft {
        title: "Cannot read property \"map\" of undefined".into(),
        tech_stack: TechStack::JavaScript,
        error_type: ErrorType::Logic,
        solution: "Added null check before mapping.".into(),
    })
    .unwrap();

    bugs.toggle(react, BugFlag::Status).unwrap();

    let query = Query::new()
        .text("UNDEFINED")
        .eq(|b: &Bug| b.status, BugStatus::Resolved);
    let hits = bugs.query(&query);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, react);
}

#[test]
fn session_only_store_forgets_on_drop() {
    let mut bugs = CrudController::<Bug, _>::mount(MemoryStore::new());
    bugs.add(BugDraft {
        title: "transient".into(),
        ..BugDraft::default()
    })
    .unwrap();
    assert_eq!(bugs.len(), 1);
    drop(bugs);

    let fresh = CrudController::<Bug, _>::mount(MemoryStore::new());
    assert!(fresh.is_empty());
}

#[test]
fn seeded_session_vault_lists_examples_and_prepends_new_bugs() {
    let store = MemoryStore::seeded(Bug::NAMESPACE, &Bug::samples(chrono::Utc::now())).unwrap();
    let mut bugs = CrudController::<Bug, _>::mount(store);
    assert_eq!(bugs.len(), 2);
    assert_eq!(bugs.records()[1].status, BugStatus::Resolved);

    let id = bugs
        .add(BugDraft {
            title: "ECONNREFUSED".into(),
            ..BugDraft::default()
        })
        .unwrap()
        .id;
    assert_eq!(bugs.records()[0].id, id);
    assert!(bugs.records().iter().skip(1).all(|b| b.id < id));
}

#[test]
fn boxed_store_works_as_backend() {
    let store: Box<dyn RecordStore> = Box::new(MemoryStore::new());
    let mut journal = CrudController::<JournalEntry, _>::mount(store);
    journal.add(JournalDraft::new("boxed")).unwrap();
    assert_eq!(journal.records()[0].text, "boxed");
}

fn arb_problem() -> impl Strategy<Value = Problem> {
    (
        any::<u64>(),
        "[a-zA-Z0-9 ]{1,30}",
        0u32..600,
        prop_oneof![
            Just(Difficulty::Easy),
            Just(Difficulty::Medium),
            Just(Difficulty::Hard)
        ],
        any::<bool>(),
        0i64..4_000_000_000,
    )
        .prop_map(|(id, name, time, difficulty, completed, secs)| Problem {
            id: devdocket_core::RecordId(id),
            name,
            time,
            difficulty,
            link: String::new(),
            completed,
            created_at: chrono::DateTime::from_timestamp(secs, 0).unwrap(),
        })
}

proptest! {
    #[test]
    fn save_then_load_reproduces_problem_lists(list in proptest::collection::vec(arb_problem(), 0..100)) {
        let db = Database::open_memory().unwrap();
        save_records(&db, Problem::NAMESPACE, &list).unwrap();
        let loaded: Vec<Problem> = load_records(&db, Problem::NAMESPACE);
        prop_assert_eq!(loaded, list);
    }

    #[test]
    fn filter_is_an_order_preserving_subsequence(list in proptest::collection::vec(arb_problem(), 0..60)) {
        let query = Query::new().eq(|p: &Problem| p.difficulty, Difficulty::Hard);
        let hits: Vec<Problem> = list.iter().filter(|p| query.matches(p)).cloned().collect();
        let expected: Vec<Problem> = list.iter().filter(|p| p.difficulty == Difficulty::Hard).cloned().collect();
        prop_assert_eq!(hits, expected);
    }
}
