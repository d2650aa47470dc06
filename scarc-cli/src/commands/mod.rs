//! Command implementations for the scarc CLI.

pub mod completions;
pub mod compress;
pub mod extract;
pub mod info;

pub use completions::cmd_completions;
pub use compress::cmd_compress;
pub use extract::cmd_extract;
pub use info::cmd_info;
pub use test::cmd_test;
