pub mod merge;
pub mod prefix;
pub mod prune;
pub mod tag_filter;
pub mod walk;

pub use merge::{MergeReport, merge_specs};
pub use prefix::add_prefix;
pub use prune::{PruneReport, remove_unused_components};
pub use tag_filter::{TagFilterReport, remove_tagged_operations};
