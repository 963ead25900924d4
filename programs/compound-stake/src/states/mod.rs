pub mod events;
pub mod stake_position;
pub mod staking_config;

pub use events::*;
pub use stake_position::*;
pub use staking_config::*;
