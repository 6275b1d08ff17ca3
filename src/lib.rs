pub mod config;
pub mod logger;
pub mod post;
pub mod schema;
pub mod front_matter;
pub mod collection;
pub mod text_utils;
pub mod paginator;
pub mod post_cache;
mod test_data;

pub use collection::{filter_by_tag, filter_published, sort_by_date_descending, tag_counts, unique_tags};
pub use post::{Post, PostId, PostRecord};
pub use schema::{validate, RawRecord, RawValue, ValidationError, ValidationFailure};
pub use text_utils::{format_date_long, format_date_short, post_url, reading_time_minutes, slugify};
