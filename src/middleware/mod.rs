pub mod chair;

pub use chair::require_chair;
