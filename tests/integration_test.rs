// Integration tests: JSON requests in, step traces out

use algoviz::config::Limits;
use algoviz::errors::{CapacityError, InputError};
use algoviz::input::Algorithm;
use algoviz::step::{GraphDetail, Step, StepKind};
use algoviz::{generate, generate_json, Request, VizError};

fn run(json: &str) -> algoviz::Trace {
    generate_json(json, &Limits::default()).expect("request should generate")
}

fn fails(json: &str) -> VizError {
    generate_json(json, &Limits::default()).expect_err("request should be rejected")
}

#[test]
fn test_bubble_sort_request() {
    let trace = run(r#"{"algorithm":"bubble_sort","values":[5,1,4,2,8]}"#);

    assert_eq!(trace.algorithm, Algorithm::BubbleSort);
    assert_eq!(trace.steps()[0].kind(), StepKind::Initial);
    assert_eq!(trace.terminal().map(Step::kind), Some(StepKind::Completed));
    assert_eq!(trace.terminal().and_then(Step::array), Some(&[1, 2, 4, 5, 8][..]));
    // bubble sort never exits early: n*(n-1)/2 comparisons
    assert_eq!(trace.count_kind(StepKind::Compare), 10);
}

#[test]
fn test_trace_json_shape() {
    let trace = run(r#"{"algorithm":"quick_sort","values":[3,1,2]}"#);
    let json: serde_json::Value = serde_json::from_str(&trace.to_json().unwrap()).unwrap();

    assert_eq!(json["algorithm"], "quick_sort");
    let first = &json["steps"][0];
    assert_eq!(first["family"], "sort");
    assert_eq!(first["kind"], "initial");
    assert_eq!(first["array"], serde_json::json!([3, 1, 2]));
    assert_eq!(first["detail"]["algorithm"], "quick");
    // empty role sets are left out
    assert!(first["roles"].get("comparing").is_none());

    let last = json["steps"].as_array().unwrap().last().unwrap().clone();
    assert_eq!(last["kind"], "completed");
    assert_eq!(last["roles"]["sorted"], serde_json::json!([0, 1, 2]));
}

#[test]
fn test_trace_json_roundtrips() {
    let trace = run(r#"{"algorithm":"dijkstra","graph":{"nodes":["A","B"],"edges":[["A","B",7]]},"start":"A"}"#);
    let back: algoviz::Trace = serde_json::from_str(&trace.to_json().unwrap()).unwrap();
    assert_eq!(back, trace);
}

#[test]
fn test_generation_is_deterministic() {
    for algorithm in Algorithm::ALL {
        let request = Request::sample(algorithm);
        let a = generate(&request, &Limits::default()).unwrap().to_json().unwrap();
        let b = generate(&request, &Limits::default()).unwrap().to_json().unwrap();
        assert_eq!(a, b, "{} is not deterministic", algorithm);
    }
}

#[test]
fn test_every_trace_ends_in_one_terminal_step() {
    for algorithm in Algorithm::ALL {
        let trace = generate(&Request::sample(algorithm), &Limits::default()).unwrap();
        let terminal = trace.iter().filter(|s| s.kind().is_terminal()).count();
        assert_eq!(terminal, 1, "{}", algorithm);
        assert!(trace.terminal().unwrap().kind().is_terminal(), "{}", algorithm);
    }
}

#[test]
fn test_binary_search_found_and_missing() {
    let found = run(r#"{"algorithm":"binary_search","values":[1,3,5,7,9,11],"target":7}"#);
    assert_eq!(found.terminal().map(Step::kind), Some(StepKind::Found));

    let missing = run(r#"{"algorithm":"binary_search","values":[1,3,5,7,9,11],"target":4}"#);
    assert_eq!(missing.terminal().map(Step::kind), Some(StepKind::NotFound));
    assert_eq!(missing.count_kind(StepKind::Found), 0);
}

#[test]
fn test_binary_search_rejects_unsorted() {
    match fails(r#"{"algorithm":"binary_search","values":[1,5,3],"target":3}"#) {
        VizError::Input(InputError::Unsorted { index }) => assert_eq!(index, 2),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_size_limits() {
    let err = fails(r#"{"algorithm":"merge_sort","values":[1,2,3,4,5,6,7,8,9,10,11]}"#);
    assert!(matches!(
        err,
        VizError::Input(InputError::TooMany { len: 11, max: 10, .. })
    ));

    // radix sort allows longer input
    let trace = run(r#"{"algorithm":"radix_sort","values":[9,8,7,6,5,4,3,2,1,0,11,12]}"#);
    assert_eq!(trace.terminal().map(Step::kind), Some(StepKind::Completed));

    let custom = Limits {
        max_array_len: 3,
        ..Limits::default()
    };
    let request = Request::BubbleSort {
        values: vec![4, 3, 2, 1],
    };
    assert!(generate(&request, &custom).is_err());
}

#[test]
fn test_empty_input_is_rejected() {
    assert!(matches!(
        fails(r#"{"algorithm":"heap_sort","values":[]}"#),
        VizError::Input(InputError::Empty { .. })
    ));
}

#[test]
fn test_radix_rejects_negative_values() {
    assert!(matches!(
        fails(r#"{"algorithm":"radix_sort","values":[3,-1,2]}"#),
        VizError::Input(InputError::NegativeValue { value: -1 })
    ));
}

#[test]
fn test_unknown_algorithm_is_a_request_error() {
    assert!(matches!(
        fails(r#"{"algorithm":"bogo_sort","values":[1]}"#),
        VizError::Request(_)
    ));
}

#[test]
fn test_bst_delete_with_two_children() {
    let trace = run(
        r#"{"algorithm":"bst","values":[50,30,70,20,40,60,80],"operation":{"op":"delete","value":50}}"#,
    );
    assert!(trace.count_kind(StepKind::FindSuccessor) > 0);
    assert_eq!(trace.count_kind(StepKind::Replace), 1);
    match trace.terminal() {
        Some(Step::Tree(step)) => {
            let tree = step.tree.as_ref().unwrap();
            assert_eq!(tree.value, 60);
            assert_eq!(tree.values(), vec![20, 30, 40, 60, 70, 80]);
        }
        other => panic!("expected a tree step, got {other:?}"),
    }
}

#[test]
fn test_bst_duplicate_build_is_rejected() {
    assert!(matches!(
        fails(r#"{"algorithm":"bst","values":[5,3,5]}"#),
        VizError::Input(InputError::DuplicateValue { value: 5 })
    ));
}

#[test]
fn test_bst_traversals() {
    for (order, expected) in [
        ("in_order", vec![20, 30, 40, 50, 60, 70, 80]),
        ("pre_order", vec![50, 30, 20, 40, 70, 60, 80]),
        ("post_order", vec![20, 40, 30, 60, 80, 70, 50]),
    ] {
        let trace = run(&format!(
            r#"{{"algorithm":"bst","values":[50,30,70,20,40,60,80],"operation":{{"op":"traverse","order":"{order}"}}}}"#
        ));
        match trace.terminal() {
            Some(Step::Tree(step)) => assert_eq!(step.visited, expected, "{order}"),
            other => panic!("expected a tree step, got {other:?}"),
        }
    }
}

#[test]
fn test_bfs_levels() {
    let trace = run(
        r#"{"algorithm":"bfs","graph":{"nodes":["A","B","C","D","E"],"edges":[["A","B"],["A","C"],["B","D"],{"from":"C","to":"D"}]},"start":"A"}"#,
    );
    match trace.terminal() {
        Some(Step::Graph(step)) => {
            assert_eq!(step.visited, ["A", "B", "C", "D"]);
            match &step.detail {
                GraphDetail::Bfs { levels } => {
                    assert_eq!(levels["D"], 2);
                    assert!(!levels.contains_key("E"));
                }
                other => panic!("unexpected detail {other:?}"),
            }
        }
        other => panic!("expected a graph step, got {other:?}"),
    }
}

#[test]
fn test_graph_unknown_start() {
    assert!(matches!(
        fails(r#"{"algorithm":"dfs","graph":{"nodes":["A"],"edges":[]},"start":"Z"}"#),
        VizError::Input(InputError::UnknownNode { .. })
    ));
}

#[test]
fn test_stack_script_overflow_names_the_operation() {
    let ops: Vec<String> = (0..4)
        .map(|i| format!(r#"{{"op":"push","value":{i}}}"#))
        .collect();
    let json = format!(
        r#"{{"algorithm":"stack","capacity":3,"operations":[{}]}}"#,
        ops.join(",")
    );
    match fails(&json) {
        VizError::OperationRejected { index, source, .. } => {
            assert_eq!(index, 3);
            assert!(matches!(source, CapacityError::Overflow { capacity: 3, .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_queue_script_wrong_operation() {
    assert!(matches!(
        fails(r#"{"algorithm":"queue","operations":[{"op":"push","value":1}]}"#),
        VizError::Input(InputError::UnsupportedOperation { .. })
    ));
}

#[test]
fn test_queue_script_steps() {
    let trace = run(
        r#"{"algorithm":"queue","capacity":2,"operations":[{"op":"enqueue","value":1},{"op":"enqueue","value":2},{"op":"dequeue"},{"op":"front"}]}"#,
    );
    let kinds: Vec<StepKind> = trace.iter().map(Step::kind).collect();
    assert_eq!(
        kinds,
        [
            StepKind::Initial,
            StepKind::Enqueue,
            StepKind::Enqueue,
            StepKind::Dequeue,
            StepKind::Front,
            StepKind::Completed
        ]
    );
    match trace.terminal() {
        Some(Step::Container(step)) => assert_eq!(step.items, [2]),
        other => panic!("expected a container step, got {other:?}"),
    }
}

#[test]
fn test_fibonacci_request() {
    let trace = run(r#"{"algorithm":"fibonacci","n":12}"#);
    match trace.terminal() {
        Some(Step::Table(step)) => assert_eq!(step.result, Some(144)),
        other => panic!("expected a table step, got {other:?}"),
    }
    assert!(matches!(
        fails(r#"{"algorithm":"fibonacci","n":91}"#),
        VizError::Input(InputError::FibonacciOutOfRange { n: 91, .. })
    ));
}
