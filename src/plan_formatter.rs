use std::fmt::{self, Debug, Display, Formatter};

use crate::plan::Plan;
use crate::PushWorld;

/// Every state along a plan, each headed by the action that produced it.
pub struct PlanFormatter<'a, P: ?Sized> {
    puzzle: &'a P,
    plan: &'a Plan,
}

impl<'a, P: PushWorld + ?Sized> PlanFormatter<'a, P> {
    pub fn new(puzzle: &'a P, plan: &'a Plan) -> Self {
        Self { puzzle, plan }
    }
}

impl<P: PushWorld + ?Sized> Display for PlanFormatter<'_, P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let states = self.puzzle.replay(self.plan);

        writeln!(f, "Initial state:")?;
        write!(f, "{}", self.puzzle.format_state(&states[0]))?;
        for (i, (action, step)) in self.plan.iter().zip(states.windows(2)).enumerate() {
            writeln!(f)?;
            if step[0] == step[1] {
                writeln!(f, "{}: {} (blocked)", i + 1, action)?;
            } else {
                writeln!(f, "{}: {}", i + 1, action)?;
            }
            write!(f, "{}", self.puzzle.format_state(&step[1]))?;
        }
        Ok(())
    }
}

impl<P: PushWorld + ?Sized> Debug for PlanFormatter<'_, P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::puzzle::Puzzle;

    #[test]
    fn formatting_plan_steps() {
        let p: Puzzle = "a m1 . w g1".parse().unwrap();
        let plan = "RRR".parse().unwrap();
        let expected = r"Initial state:
a  m1 .  w  g1

1: right
.  a  m1 w  g1

2: right (blocked)
.  a  m1 w  g1

3: right (blocked)
.  a  m1 w  g1
";
        assert_eq!(PlanFormatter::new(&p, &plan).to_string(), expected);

        let p: &dyn PushWorld = &p;
        let empty = Default::default();
        assert_eq!(
            format!("{:?}", PlanFormatter::new(p, &empty)),
            "Initial state:\na  m1 .  w  g1\n"
        );
    }
}
