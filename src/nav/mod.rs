pub mod announce;
pub mod global;
pub mod keyboard;
pub mod routes;
