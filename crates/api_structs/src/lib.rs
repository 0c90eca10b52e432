mod memo;
mod monitor;
mod status;

pub mod dtos {
    pub use crate::memo::dtos::*;
    pub use crate::monitor::dtos::*;
}

pub use crate::memo::api::*;
pub use crate::monitor::api::*;
pub use crate::status::api::*;
