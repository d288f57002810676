//! Single-player Minesweeper engine: board generation with a safe first click, flood reveal,
//! flagging, win/loss detection, a round clock and best-time records per difficulty.
//!
//! Rendering, the periodic timer signal and storage belong to the host; the engine talks to
//! them through [`Clock`], [`RecordStore`] and [`GameObserver`].

pub use board::*;
pub use cell::*;
pub use clock::*;
pub use config::*;
pub use display::*;
pub use error::*;
pub use event::*;
pub use game::*;
pub use records::*;
pub use types::*;

mod board;
mod cell;
mod clock;
mod config;
mod display;
mod error;
mod event;
mod game;
mod records;
mod types;
