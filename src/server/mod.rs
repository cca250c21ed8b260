//! Process-level collaborators of the HTTP layer: the accept loop and the
//! clock that simulates resource updates.

pub mod clock;
pub mod listener;
