pub mod core;
pub mod engine;
pub mod merge;
pub mod paste;

pub use crate::core::identity;
pub use crate::core::schema;
pub use crate::core::value;

pub use engine::leaf;
pub use engine::session;
pub use engine::view;
