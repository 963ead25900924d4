pub mod initialize_config;
pub mod recover;
pub mod set_finish;
pub mod stake;
pub mod update_admin;
pub mod withdraw;

pub use initialize_config::*;
pub use recover::*;
pub use set_finish::*;
pub use stake::*;
pub use update_admin::*;
pub use withdraw::*;
