pub mod cache;
pub mod hooks;

pub use cache::QueryState;
pub use hooks::DolarQueries;
