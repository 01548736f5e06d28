//! Testing utilities for SwipeDeck: throwaway cards, scripted card sources,
//! an event recorder and a robot that drives a deck through pointer input on
//! a manual clock.

mod cards;
mod recorder;
mod robot;

pub use cards::{scripted, CardFactory, TestCard};
pub use recorder::EventLog;
pub use robot::{DeckRobot, FRAME};
