pub use board::*;
pub use errors::*;
pub use game::*;
pub use player::*;
pub use protocol::*;
pub use store::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod errors;
mod game;
mod player;
mod protocol;
mod store;
