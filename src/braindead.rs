use crate::config::Variant;
use crate::data::{Action, Point};
use crate::plan::Plan;
use crate::shape::Shape;
use crate::state::{State, StateErr};
use crate::state_formatter::StateFormatter;
use crate::PushWorld;

/// The simplest variant: only the agent and one goal, nothing to push.
///
/// There is no border, the agent is kept inside `1..=width` and `1..=height`.
#[derive(Debug, Clone)]
pub struct BraindeadPuzzle {
    dimensions: Point,
    initial_state: State,
    goal_state: Vec<Point>,
}

impl BraindeadPuzzle {
    pub(crate) fn new(agent: Point, goal: Point, dimensions: Point) -> Self {
        BraindeadPuzzle {
            dimensions,
            initial_state: State::new(vec![agent]),
            goal_state: vec![goal],
        }
    }

    pub fn goal(&self) -> Point {
        self.goal_state[0]
    }

    fn in_bounds(&self, pos: Point) -> bool {
        pos.x >= 1 && pos.x <= self.dimensions.x && pos.y >= 1 && pos.y <= self.dimensions.y
    }

    fn transition(&self, state: &State, action: Action) -> State {
        let next = state.agent() + action.displacement();
        if self.in_bounds(next) {
            State::new(vec![next])
        } else {
            state.clone()
        }
    }
}

impl PushWorld for BraindeadPuzzle {
    fn variant(&self) -> Variant {
        Variant::Braindead
    }

    fn dimensions(&self) -> Point {
        self.dimensions
    }

    fn initial_state(&self) -> &State {
        &self.initial_state
    }

    fn goal_state(&self) -> &[Point] {
        &self.goal_state
    }

    fn next_state(&self, state: &State, action: Action) -> Result<State, StateErr> {
        if state.len() != 1 {
            return Err(StateErr {
                expected: 1,
                got: state.len(),
            });
        }
        Ok(self.transition(state, action))
    }

    fn count_achieved_goals(&self, state: &State) -> usize {
        if state.positions().first() == Some(&self.goal()) {
            1
        } else {
            0
        }
    }

    fn is_goal_state(&self, state: &State) -> bool {
        self.count_achieved_goals(state) == 1
    }

    /// Unlike the standard variant, passing over the goal before the end is enough.
    fn is_valid_plan(&self, plan: &Plan) -> bool {
        let mut state = self.initial_state.clone();
        for &action in plan {
            if self.is_goal_state(&state) {
                return true;
            }
            state = self.transition(&state, action);
        }
        self.is_goal_state(&state)
    }

    fn replay(&self, plan: &Plan) -> Vec<State> {
        let mut states = vec![self.initial_state.clone()];
        for &action in plan {
            let next = self.transition(&states[states.len() - 1], action);
            states.push(next);
        }
        states
    }

    fn format_state<'a>(&'a self, state: &'a State) -> StateFormatter<'a> {
        let goal: Shape = self.goal_state.iter().cloned().collect();
        let agent: Shape = state.positions().iter().cloned().collect();
        StateFormatter::new(
            Point::new(1, 1),
            self.dimensions.x,
            self.dimensions.y,
            vec![("g1", goal), ("a", agent)],
        )
    }
}
