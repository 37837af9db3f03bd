//! Command implementations.

pub mod archive;
pub mod list;
pub mod prune;

pub use self::archive::execute_archive;
pub use self::list::execute_list;
pub use self::prune::execute_prune;
