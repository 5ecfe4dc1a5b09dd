// algotty: terminal algorithm visualizer with step-trace playback

use std::fs;
use std::io;
use std::path::Path;
use std::process::exit;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use algotty::input;
use algotty::producer::{backtracking, graph, huffman, searching, sorting};
use algotty::step::Trace;
use algotty::ui::App;

fn print_usage(program_name: &str) {
    eprintln!("Usage: {} <algorithm> <input...>", program_name);
    eprintln!();
    eprintln!("Algorithms:");
    eprintln!("  bubble|selection|insertion|quick|merge <array>");
    eprintln!("  linear|binary <array> <target>");
    eprintln!("  bfs|dfs|dijkstra|prim <graph-file> [start-node]");
    eprintln!("  kruskal <graph-file>");
    eprintln!("  queens <n>");
    eprintln!("  sudoku <board-file>");
    eprintln!("  huffman <symbol:weight,...>");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} bubble 5,3,8,1", program_name);
    eprintln!("  {} binary 10,20,30,40,50,60,70,80,90 50", program_name);
    eprintln!("  {} dijkstra demos/graph.txt 0", program_name);
    eprintln!("  {} queens 8", program_name);
    eprintln!("  {} huffman a:5,b:9,c:12,d:13,e:16,f:45", program_name);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("algotty");

    if args.len() < 3 {
        eprintln!("Error: expected an algorithm and its input");
        eprintln!();
        print_usage(program_name);
        exit(1);
    }

    let algorithm = args[1].as_str();
    let rest = &args[2..];

    let trace = match build_trace(algorithm, rest) {
        Ok(trace) => trace,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!();
            print_usage(program_name);
            exit(1);
        }
    };

    eprintln!("Recorded {} steps.", trace.len());

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(trace, algorithm.to_string());
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

/// Parse the input and run the chosen producer.  Errors are returned as
/// display-ready strings because each stage already formats its own.
fn build_trace(algorithm: &str, rest: &[String]) -> Result<Trace, String> {
    match algorithm {
        "bubble" | "selection" | "insertion" | "quick" | "merge" => {
            let values = input::parse_array(&rest.join(" ")).map_err(|e| e.to_string())?;
            let trace = match algorithm {
                "bubble" => sorting::bubble_sort(&values),
                "selection" => sorting::selection_sort(&values),
                "insertion" => sorting::insertion_sort(&values),
                "quick" => sorting::quicksort(&values),
                _ => sorting::merge_sort(&values),
            };
            trace.map_err(|e| e.to_string())
        }

        "linear" | "binary" => {
            if rest.len() < 2 {
                return Err(format!("{} expects <array> <target>", algorithm));
            }
            let (target_text, array_args) = rest.split_last().unwrap();
            let values = input::parse_array(&array_args.join(" ")).map_err(|e| e.to_string())?;
            let target = input::parse_target(target_text).map_err(|e| e.to_string())?;
            let trace = if algorithm == "linear" {
                searching::linear_search(&values, target)
            } else {
                searching::binary_search(&values, target)
            };
            trace.map_err(|e| e.to_string())
        }

        "bfs" | "dfs" | "dijkstra" | "prim" | "kruskal" => {
            let text = read_input_file(&rest[0])?;
            let parsed = input::parse_graph(&text).map_err(|e| e.to_string())?;
            let start = match rest.get(1) {
                Some(text) => text
                    .parse::<usize>()
                    .map_err(|_| format!("'{}' is not a valid start node", text))?,
                None => 0,
            };
            let trace = match algorithm {
                "bfs" => graph::bfs(&parsed, start),
                "dfs" => graph::dfs(&parsed, start),
                "dijkstra" => graph::dijkstra(&parsed, start),
                "prim" => graph::prim(&parsed, start),
                _ => graph::kruskal(&parsed),
            };
            trace.map_err(|e| e.to_string())
        }

        "queens" => {
            let n = rest[0]
                .parse::<usize>()
                .map_err(|_| format!("'{}' is not a valid board size", rest[0]))?;
            backtracking::n_queens(n).map_err(|e| e.to_string())
        }

        "sudoku" => {
            let text = read_input_file(&rest[0])?;
            let board = input::parse_board(&text).map_err(|e| e.to_string())?;
            backtracking::sudoku(&board).map_err(|e| e.to_string())
        }

        "huffman" => {
            let weights = input::parse_weights(&rest.join(" ")).map_err(|e| e.to_string())?;
            huffman::huffman(&weights).map_err(|e| e.to_string())
        }

        _ => Err(format!("unknown algorithm '{}'", algorithm)),
    }
}

fn read_input_file(path: &str) -> Result<String, String> {
    if !Path::new(path).exists() {
        return Err(format!("file '{}' not found", path));
    }
    fs::read_to_string(path).map_err(|e| format!("cannot read '{}': {}", path, e))
}
