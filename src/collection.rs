//! Listing helpers over validated posts.
//!
//! Every function takes a slice and hands back a new vector, leaving the
//! input untouched. They are generic over anything that can lend a
//! [`PostRecord`], so owned records, `&PostRecord`, `Arc<PostRecord>` and
//! whole [`crate::post::Post`]s all work.

use std::collections::{BTreeSet, HashMap};

use crate::post::PostRecord;

/// Drops drafts, keeping the input order.
pub fn filter_published<T: AsRef<PostRecord> + Clone>(posts: &[T]) -> Vec<T> {
    posts.iter()
        .filter(|p| !p.as_ref().is_draft())
        .cloned()
        .collect()
}

/// Newest first. Posts sharing a publication date keep their relative order.
pub fn sort_by_date_descending<T: AsRef<PostRecord> + Clone>(posts: &[T]) -> Vec<T> {
    let mut sorted = posts.to_vec();
    // sort_by is stable
    sorted.sort_by(|a, b| b.as_ref().pub_date().cmp(&a.as_ref().pub_date()));
    sorted
}

/// All tags in use, deduplicated and in ordinal (codepoint) order, so `"B"`
/// comes before `"a"`.
pub fn unique_tags<T: AsRef<PostRecord>>(posts: &[T]) -> Vec<String> {
    let tags: BTreeSet<&str> = posts.iter()
        .flat_map(|p| p.as_ref().tags())
        .map(|t| t.as_str())
        .collect();
    tags.into_iter().map(|t| t.to_string()).collect()
}

/// Posts carrying exactly `tag`. No case folding.
pub fn filter_by_tag<T: AsRef<PostRecord> + Clone>(posts: &[T], tag: &str) -> Vec<T> {
    posts.iter()
        .filter(|p| p.as_ref().has_tag(tag))
        .cloned()
        .collect()
}

/// How many posts use each tag, most used first.
pub fn tag_counts<T: AsRef<PostRecord>>(posts: &[T]) -> Vec<(String, usize)> {
    let mut tag_map: HashMap<&str, usize> = HashMap::new();
    for post in posts {
        for tag in post.as_ref().tags() {
            *tag_map.entry(tag.as_str()).or_insert(0) += 1;
        }
    }

    let mut tag_list: Vec<(String, usize)> = tag_map.into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    tag_list.sort_by(|(ka, va), (kb, vb)| vb.cmp(va).then_with(|| ka.cmp(kb)));
    tag_list
}
