pub mod comic;
pub mod published;
pub mod raw;
pub mod source;

pub use comic::{Comic, ComicSeries, UNKNOWN_UNIX_DATE};
pub use published::Published;
pub use raw::{RawFeed, RawItem};
pub use source::{FeedSource, DEFAULT_IMAGE_ATTR};
