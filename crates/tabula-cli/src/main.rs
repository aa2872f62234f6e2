use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::Verbosity;
use env_logger::Builder;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

use tabula_solver::{
    BranchAndBound, IntegerSolution, LpProblem, SensitivityRequest, Solution, SolutionStatus, Solver, Tableau,
};

#[derive(Parser)]
#[command(name = "tabula")]
#[command(about = "Tableau simplex solver with post-optimal updates and Branch-and-Bound", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    verbose: Verbosity,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Pretty,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a linear program and print the optimal solution
    Solve {
        /// JSON file holding the problem
        file: PathBuf,
        /// Output format
        #[arg(short, long, value_enum, default_value = "pretty")]
        format: Format,
        /// Print every pivot
        #[arg(short, long)]
        trace: bool,
    },
    /// Solve with the problem's integrality flags using Branch-and-Bound
    Integer {
        /// JSON file holding the problem
        file: PathBuf,
        /// Output format
        #[arg(short, long, value_enum, default_value = "pretty")]
        format: Format,
    },
    /// Solve, apply a post-optimal change and re-optimise
    Update {
        /// JSON file holding the problem
        problem: PathBuf,
        /// JSON file holding the change, in tableau coordinates. Costs use the
        /// problem's own sense and are negated for minimisation problems.
        request: PathBuf,
        /// Output format
        #[arg(short, long, value_enum, default_value = "pretty")]
        format: Format,
    },
}

fn main() {
    let cli = Cli::parse();

    Builder::new().filter_level(cli.verbose.log_level_filter()).init();

    match cli.command {
        Commands::Solve { file, format, trace } => {
            let problem: LpProblem = read_json(&file);
            let tableau = build_tableau(&problem);
            let solution = Solver::new()
                .solve(&tableau)
                .unwrap_or_else(|e| fail(&format!("Solver error: {}", e)));

            match format {
                Format::Json => print_json(&solution),
                Format::Pretty => print_solution(&problem, &solution, trace),
            }
            exit_on_failure(&solution);
        }
        Commands::Integer { file, format } => {
            let problem: LpProblem = read_json(&file);
            let tableau = build_tableau(&problem);
            let result = BranchAndBound::new()
                .solve(&tableau, &problem.integer_requirements())
                .unwrap_or_else(|e| fail(&format!("Branch-and-Bound error: {}", e)));

            match format {
                Format::Json => print_json(&result),
                Format::Pretty => print_integer(&problem, &result),
            }
        }
        Commands::Update {
            problem: problem_file,
            request: request_file,
            format,
        } => {
            let problem: LpProblem = read_json(&problem_file);
            let request = problem.to_tableau_request(read_json::<SensitivityRequest>(&request_file));
            let solver = Solver::new();

            let solution = solver
                .solve(&build_tableau(&problem))
                .unwrap_or_else(|e| fail(&format!("Solver error: {}", e)));
            let snapshot = solution
                .snapshot()
                .unwrap_or_else(|e| fail(&format!("Cannot update: {}", e)));
            log::info!("original objective {}", solution.objective());

            let updated = solver
                .update(&snapshot, &request)
                .unwrap_or_else(|e| fail(&format!("Update error: {}", e)));

            match format {
                Format::Json => print_json(&updated),
                Format::Pretty => {
                    println!(
                        "Original objective: {:.4}",
                        problem.objective_value(solution.objective())
                    );
                    println!();
                    print_solution(&problem, &updated, false);
                }
            }
            exit_on_failure(&updated);
        }
    }
}

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    std::process::exit(1);
}

fn read_json<T: DeserializeOwned>(path: &Path) -> T {
    let source = std::fs::read_to_string(path)
        .unwrap_or_else(|e| fail(&format!("Error reading {}: {}", path.display(), e)));
    serde_json::from_str(&source).unwrap_or_else(|e| fail(&format!("Error parsing {}: {}", path.display(), e)))
}

fn build_tableau(problem: &LpProblem) -> Tableau {
    problem
        .to_tableau()
        .unwrap_or_else(|e| fail(&format!("Invalid problem: {}", e)))
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => fail(&format!("Error writing JSON: {}", e)),
    }
}

fn exit_on_failure(solution: &Solution) {
    if !solution.is_optimal() {
        std::process::exit(1);
    }
}

fn print_solution(problem: &LpProblem, solution: &Solution, trace: bool) {
    if trace {
        println!("Pivots:");
        for (i, step) in solution.steps.iter().enumerate() {
            println!(
                "  {:3} {:?}: {} enters, {} leaves (row {}, element {:.4})",
                i + 1,
                step.rule,
                step.entering,
                step.leaving,
                step.row,
                step.element
            );
        }
        println!();
    }

    match &solution.status {
        SolutionStatus::Optimal => {
            println!("Status: OPTIMAL");
            println!("Objective: {:.4}", problem.objective_value(solution.objective()));
            println!("Pivots: {}", solution.pivots());
            println!();
            println!("Variables:");
            for (name, value) in solution.values() {
                println!("  {:20} {:12.4}", name, value);
            }

            if !solution.degenerate.is_empty() {
                println!();
                println!("Degenerate basic variables: {}", solution.degenerate.join(", "));
            }

            for alternate in &solution.alternates {
                println!();
                println!(
                    "Alternate optimum ({} enters, {} leaves):",
                    alternate.entering, alternate.leaving
                );
                for (name, value) in alternate.tableau.values() {
                    println!("  {:20} {:12.4}", name, value);
                }
            }

            let labels = problem.row_labels();
            println!();
            println!("Shadow prices:");
            for sp in &solution.analysis.shadow_prices {
                let label = labels.get(sp.row).map_or(sp.slack.as_str(), |l| l.as_str());
                println!("  {:20} {:4} {:12.4}", label, sp.slack, sp.value);
            }

            println!();
            println!("Reduced costs:");
            for rc in &solution.analysis.reduced_costs {
                if !rc.is_basic {
                    println!("  {:20} {:12.4}", rc.variable, rc.reduced_cost);
                }
            }
        }
        SolutionStatus::Unbounded { variable, .. } => {
            println!("Status: UNBOUNDED");
            println!("{} can increase without limit.", variable);
        }
        SolutionStatus::Infeasible { variable, .. } => {
            println!("Status: INFEASIBLE");
            println!("Row of {} cannot be made non-negative.", variable);
        }
    }
}

fn print_integer(problem: &LpProblem, result: &IntegerSolution) {
    println!("Status: OPTIMAL");
    println!("Objective: {:.4}", problem.objective_value(result.objective));
    println!("Nodes: {}", result.nodes);
    println!();
    println!("Variables:");
    for name in &problem.variables {
        if let Some(value) = result.assignment.get(name) {
            println!("  {:20} {:12.4}", name, value);
        }
    }
}
