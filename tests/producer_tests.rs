// Integration tests for the step producers: parse input, produce a trace,
// check the recorded steps against the algorithm's real behavior.

use algotty::input::{parse_array, parse_board, parse_graph, parse_weights, InputError};
use algotty::producer::{backtracking, graph, huffman, searching, sorting, ProduceError};
use algotty::step::{ProbeOutcome, Snapshot, StepKind};

#[test]
fn test_bubble_sort_trace_from_parsed_input() {
    let values = parse_array("5,3,8,1").expect("Parsing failed");
    let trace = sorting::bubble_sort(&values).expect("Producer failed");

    // First step compares indices 0 and 1 holding 5 and 3
    let first = &trace.steps[0];
    assert_eq!(first.kind, StepKind::Compare);
    match &first.snapshot {
        Snapshot::Array { values, focus, .. } => {
            assert_eq!(values[0], 5);
            assert_eq!(values[1], 3);
            assert_eq!(focus, &vec![0, 1]);
        }
        other => panic!("Expected array snapshot, got {:?}", other),
    }

    // 5 > 3: a swap step follows
    assert_eq!(trace.steps[1].kind, StepKind::Swap);

    // The final snapshot is the sorted array
    let last = trace.steps.last().unwrap();
    assert_eq!(last.kind, StepKind::Final);
    assert_eq!(last.progress, 1.0);
    match &last.snapshot {
        Snapshot::Array { values, .. } => assert_eq!(values, &vec![1, 3, 5, 8]),
        other => panic!("Expected array snapshot, got {:?}", other),
    }
}

#[test]
fn test_binary_search_direct_hit_is_one_step() {
    let values = parse_array("10,20,30,40,50,60,70,80,90").expect("Parsing failed");
    let trace = searching::binary_search(&values, 50).expect("Producer failed");

    assert_eq!(trace.steps.len(), 1);
    match &trace.steps[0].snapshot {
        Snapshot::SearchBracket { mid, outcome, .. } => {
            assert_eq!(*mid, 4);
            assert_eq!(*outcome, ProbeOutcome::Equal);
        }
        other => panic!("Expected bracket snapshot, got {:?}", other),
    }
}

#[test]
fn test_four_queens_deterministic_solution() {
    let trace = backtracking::n_queens(4).expect("Producer failed");
    assert!(!trace.is_empty());

    let last = trace.steps.last().unwrap();
    assert_eq!(last.kind, StepKind::Final);
    match &last.snapshot {
        Snapshot::Board { queens, size, .. } => {
            assert_eq!(*size, 4);
            assert_eq!(queens.len(), 4);
            for r1 in 0..4 {
                for r2 in r1 + 1..4 {
                    assert_ne!(queens[r1], queens[r2], "queens share a column");
                    assert_ne!(
                        r2 - r1,
                        queens[r1].abs_diff(queens[r2]),
                        "queens share a diagonal"
                    );
                }
            }
        }
        other => panic!("Expected board snapshot, got {:?}", other),
    }

    // No randomness source: a second run yields the identical sequence
    assert_eq!(trace, backtracking::n_queens(4).expect("Producer failed"));
}

#[test]
fn test_step_indices_are_unique_and_increasing() {
    let values = parse_array("9,1,8,2,7,3").expect("Parsing failed");
    for trace in [
        sorting::quicksort(&values).unwrap(),
        sorting::merge_sort(&values).unwrap(),
        backtracking::n_queens(5).unwrap(),
    ] {
        for (i, step) in trace.steps.iter().enumerate() {
            assert_eq!(step.index, i);
        }
    }
}

#[test]
fn test_dijkstra_from_parsed_graph() {
    let text = "5\n0 1 4\n0 2 1\n2 1 2\n1 3 1\n3 4 3\n";
    let parsed = parse_graph(text).expect("Parsing failed");
    let trace = graph::dijkstra(&parsed, 0).expect("Producer failed");

    match &trace.steps.last().unwrap().snapshot {
        Snapshot::Graph { dist, .. } => {
            assert_eq!(dist, &vec![Some(0), Some(3), Some(1), Some(4), Some(7)]);
        }
        other => panic!("Expected graph snapshot, got {:?}", other),
    }
}

#[test]
fn test_mst_producers_agree_on_weight() {
    let text = "6\n0 1 7\n0 2 9\n0 5 14\n1 2 10\n1 3 15\n2 3 11\n2 5 2\n3 4 6\n4 5 9\n";
    let parsed = parse_graph(text).expect("Parsing failed");

    let weight_of = |trace: &algotty::step::Trace| match &trace.steps.last().unwrap().snapshot {
        Snapshot::Graph { tree_edges, .. } => {
            tree_edges.iter().map(|e| e.weight).sum::<u64>()
        }
        other => panic!("Expected graph snapshot, got {:?}", other),
    };

    let prim = graph::prim(&parsed, 0).expect("Producer failed");
    let kruskal = graph::kruskal(&parsed).expect("Producer failed");
    assert_eq!(weight_of(&prim), weight_of(&kruskal));
}

#[test]
fn test_sudoku_round_trip_from_board_file_format() {
    let text = "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79";
    let board = parse_board(text).expect("Parsing failed");
    let trace = backtracking::sudoku(&board).expect("Producer failed");

    let last = trace.steps.last().unwrap();
    assert_eq!(last.kind, StepKind::Final);
    match &last.snapshot {
        Snapshot::Grid { cells, .. } => {
            // Givens survive into the solution
            assert_eq!(cells[0], 5);
            assert!(cells.iter().all(|&c| c != 0));
        }
        other => panic!("Expected grid snapshot, got {:?}", other),
    }
}

#[test]
fn test_huffman_from_parsed_weights() {
    let weights = parse_weights("a:5,b:9,c:12,d:13,e:16,f:45").expect("Parsing failed");
    let trace = huffman::huffman(&weights).expect("Producer failed");

    // n symbols -> n-1 merges
    let merges = trace
        .steps
        .iter()
        .filter(|s| s.kind == StepKind::Merge)
        .count();
    assert_eq!(merges, 5);
    assert_eq!(trace.steps.last().unwrap().kind, StepKind::Final);
}

#[test]
fn test_invalid_input_yields_no_trace() {
    assert!(matches!(
        parse_array("5,abc,8"),
        Err(InputError::BadEntry { position: 2, .. })
    ));

    assert!(matches!(
        sorting::bubble_sort(&[]),
        Err(ProduceError::Input(InputError::Empty))
    ));

    // Unsatisfiable givens are an input error, not a trace
    let contradictory =
        "55..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79";
    assert!(matches!(
        parse_board(contradictory),
        Err(InputError::Contradiction { .. })
    ));
}

#[test]
fn test_no_solution_is_a_valid_trace() {
    let trace = backtracking::n_queens(3).expect("Producer failed");
    let last = trace.steps.last().unwrap();
    assert_eq!(last.kind, StepKind::NoSolution);
    assert_eq!(last.progress, 1.0);
}
