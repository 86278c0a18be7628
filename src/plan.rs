use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;

use crate::data::Action;

/// A sequence of actions, written as `L`, `R`, `U` and `D` characters.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Plan(Vec<Action>);

impl Plan {
    pub fn new(actions: Vec<Action>) -> Self {
        Plan(actions)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, action: Action) {
        self.0.push(action);
    }

    pub fn extend(&mut self, plan: &Plan) {
        self.0.extend_from_slice(&plan.0);
    }

    pub fn iter(&self) -> ::std::slice::Iter<'_, Action> {
        self.0.iter()
    }
}

impl From<Vec<Action>> for Plan {
    fn from(actions: Vec<Action>) -> Self {
        Plan(actions)
    }
}

impl IntoIterator for Plan {
    type Item = Action;
    type IntoIter = ::std::vec::IntoIter<Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Plan {
    type Item = &'a Action;
    type IntoIter = ::std::slice::Iter<'a, Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for Plan {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for action in self {
            write!(f, "{}", action.to_char())?;
        }
        Ok(())
    }
}

impl Debug for Plan {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanErr {
    pub pos: usize,
    pub found: char,
}

impl Display for PlanErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid action '{}' at position {} - expected one of L, R, U, D",
            self.found, self.pos
        )
    }
}

impl Error for PlanErr {}

impl FromStr for Plan {
    type Err = PlanErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut plan = Plan::default();
        for (pos, c) in s.chars().enumerate() {
            if c.is_whitespace() {
                continue;
            }
            let action = Action::from_char(c).ok_or(PlanErr { pos, found: c })?;
            plan.push(action);
        }
        Ok(plan)
    }
}
