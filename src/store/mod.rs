//! Local persistence - recently viewed items and bookmarks

mod recents;

pub use recents::{BookmarkItem, RecentItem, RecentsStore};
