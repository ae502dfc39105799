pub mod walk;

pub use walk::{collect_dirs_deepest_first, collect_files, Listing};
