pub mod api;
pub mod web;

pub use api::*;
pub use web::*;
