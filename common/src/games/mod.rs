mod broadcaster;
mod session_rng;

pub mod snake;

pub use broadcaster::SessionBroadcaster;
pub use session_rng::{RandomSource, ScriptedRandom, SessionRng};
