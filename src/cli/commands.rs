pub mod initdb;
pub mod totals;
pub mod tree;

pub use initdb::init_database;
pub use totals::show_totals;
pub use tree::show_tree;
