// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
// Additional warnings that are allow by default (`rustc -W help`)
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused)]
// Clippy
#![warn(clippy::all)]

#[macro_use]
extern crate log;

pub mod braindead;
pub mod collision;
pub mod config;
pub mod data;
pub mod object;
pub mod plan;
pub mod plan_formatter;
pub mod puzzle;
pub mod shape;
pub mod state;
pub mod state_formatter;

mod parser;
mod vec2d;

use std::error::Error;
use std::fmt::Debug;
use std::fs;
use std::path::Path;

use crate::braindead::BraindeadPuzzle;
use crate::collision::CollisionMap;
use crate::config::Variant;
use crate::data::{Action, Point};
use crate::plan::Plan;
use crate::puzzle::Puzzle;
use crate::state::{State, StateErr};
use crate::state_formatter::StateFormatter;

pub use crate::parser::ParserErr;

/// A loaded puzzle: immutable after loading, stepping doesn't mutate it.
pub trait PushWorld: Debug + Send + Sync {
    fn variant(&self) -> Variant;

    /// Size of the grid, including the border for standard puzzles.
    fn dimensions(&self) -> Point;

    fn initial_state(&self) -> &State;

    /// Target anchors, `goal_state()[k]` belongs to the movable at state index `k + 1`.
    fn goal_state(&self) -> &[Point];

    /// Including the agent.
    fn num_movables(&self) -> usize {
        self.initial_state().len()
    }

    /// Applies one action. Blocked actions return an equal state.
    fn next_state(&self, state: &State, action: Action) -> Result<State, StateErr>;

    fn count_achieved_goals(&self, state: &State) -> usize;

    fn is_goal_state(&self, state: &State) -> bool;

    fn is_valid_plan(&self, plan: &Plan) -> bool;

    /// The initial state followed by the state after each action.
    fn replay(&self, plan: &Plan) -> Vec<State>;

    fn final_state(&self, plan: &Plan) -> State {
        self.replay(plan)
            .pop()
            .unwrap_or_else(|| self.initial_state().clone())
    }

    fn format_state<'a>(&'a self, state: &'a State) -> StateFormatter<'a>;

    /// Only standard puzzles precompute collisions.
    fn collision_map(&self) -> Option<&CollisionMap> {
        None
    }
}

/// Parses puzzle text with the rules of `variant`.
pub fn load_puzzle(text: &str, variant: Variant) -> Result<Box<dyn PushWorld>, ParserErr> {
    Ok(match variant {
        Variant::Standard => Box::new(text.parse::<Puzzle>()?),
        Variant::Braindead => Box::new(text.parse::<BraindeadPuzzle>()?),
    })
}

pub trait LoadPuzzle {
    fn load_puzzle(&self, variant: Variant) -> Result<Box<dyn PushWorld>, Box<dyn Error>>;
}

impl<P: AsRef<Path> + ?Sized> LoadPuzzle for P {
    fn load_puzzle(&self, variant: Variant) -> Result<Box<dyn PushWorld>, Box<dyn Error>> {
        let path = self.as_ref();
        let text = fs::read_to_string(path)?;
        debug!("Loading {} as {}", path.display(), variant);
        Ok(load_puzzle(&text, variant)?)
    }
}
