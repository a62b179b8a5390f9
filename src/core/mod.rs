pub mod identity;
pub mod schema;
pub mod value;
