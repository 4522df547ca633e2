//! Recursive-ascent plan.
//!
//! A left-recursive class cannot be parsed top-down. Instead a parse of any
//! entry starts from a seed (an alternative that does not begin with a
//! class member) and climbs: each step extends the current match into a
//! member that has the matched expression as its first element. Climbing
//! stops at the member the parse was asked for.

mod plan;


pub use plan::{Ascent, AscentPlan, AscentStep, ClassPlan, ClimbProc};
