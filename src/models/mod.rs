pub mod conference;
pub mod submission;
pub mod user;

pub use conference::*;
pub use submission::*;
pub use user::*;
