use std::env;
use std::fs;
use std::process;

use clap::{App, Arg, ArgGroup};
use log::debug;

use pushworld::config::Variant;
use pushworld::plan::Plan;
use pushworld::plan_formatter::PlanFormatter;
use pushworld::LoadPuzzle;

fn main() {
    env_logger::init();

    let matches = App::new("pushworld")
        .version("0.1")
        .about("Loads a PushWorld puzzle and replays plans on it")
        .arg(
            Arg::with_name("braindead")
                .short("b")
                .long("braindead")
                .help("only the agent and one goal, no pushing"),
        ).arg(
            Arg::with_name("stats")
                .short("s")
                .long("stats")
                .help("print collision map sizes"),
        ).arg(
            Arg::with_name("steps")
                .long("steps")
                .help("print every state along the plan"),
        ).arg(
            Arg::with_name("plan")
                .short("p")
                .long("plan")
                .takes_value(true)
                .value_name("PLAN")
                .help("actions as L, R, U and D characters"),
        ).arg(
            Arg::with_name("plan-file")
                .long("plan-file")
                .takes_value(true)
                .value_name("FILE")
                .help("read the plan from a file"),
        ).group(ArgGroup::with_name("plan-source").arg("plan").arg("plan-file"))
        .arg(Arg::with_name("puzzle").required(true))
        .get_matches();

    let variant = if matches.is_present("braindead") {
        Variant::Braindead
    } else {
        Variant::Standard
    };
    let path = matches.value_of("puzzle").unwrap_or_default();

    let puzzle = path.load_puzzle(variant).unwrap_or_else(|err| {
        match env::current_dir() {
            Ok(dir) => println!("Can't load {} in {}: {}", path, dir.display(), err),
            Err(_) => println!("Can't load {}: {}", path, err),
        }
        process::exit(1);
    });

    let plan_text = if let Some(plan) = matches.value_of("plan") {
        Some(plan.to_string())
    } else if let Some(plan_path) = matches.value_of("plan-file") {
        Some(fs::read_to_string(plan_path).unwrap_or_else(|err| {
            println!("Can't read plan file {}: {}", plan_path, err);
            process::exit(1);
        }))
    } else {
        None
    };
    let plan = plan_text.map(|text| {
        text.parse::<Plan>().unwrap_or_else(|err| {
            println!("Failed to parse plan: {}", err);
            process::exit(1);
        })
    });

    let dimensions = puzzle.dimensions();
    println!("Puzzle {} ({})", path, variant);
    println!("Dimensions: {}x{}", dimensions.x, dimensions.y);
    println!("Movables: {}", puzzle.num_movables());
    println!("Goals: {}", puzzle.goal_state().len());

    if matches.is_present("stats") {
        match puzzle.collision_map() {
            Some(collisions) => print!("{}", collisions),
            None => println!("No collision map for {} puzzles", variant),
        }
    }

    let plan = match plan {
        Some(plan) => plan,
        None => {
            println!("Initial state:");
            print!("{}", puzzle.format_state(puzzle.initial_state()));
            return;
        }
    };

    println!("Plan: {} ({} actions)", plan, plan.len());
    let final_state = puzzle.final_state(&plan);
    debug!("Final state {}", final_state);
    if matches.is_present("steps") {
        print!("{}", PlanFormatter::new(&*puzzle, &plan));
    } else {
        println!("Initial state:");
        print!("{}", puzzle.format_state(puzzle.initial_state()));
        println!("Final state:");
        print!("{}", puzzle.format_state(&final_state));
    }

    println!(
        "Goals achieved: {}/{}",
        puzzle.count_achieved_goals(&final_state),
        puzzle.goal_state().len()
    );
    if puzzle.is_valid_plan(&plan) {
        println!("Plan is valid");
    } else {
        println!("Plan is not valid");
    }
}
