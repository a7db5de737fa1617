mod assignment;
mod notification;
mod status;

pub mod dtos {
    pub use crate::assignment::dtos::*;
    pub use crate::notification::dtos::*;
}

pub use crate::assignment::api::*;
pub use crate::notification::api::*;
pub use crate::status::api::*;
