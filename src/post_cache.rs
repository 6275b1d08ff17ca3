use std::collections::HashMap;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use spdlog::{debug, info, warn};

use crate::collection::{filter_by_tag, filter_published, sort_by_date_descending, tag_counts, unique_tags};
use crate::config::Config;
use crate::front_matter::parse_front_matter;
use crate::paginator::{PageError, Paginator};
use crate::post::{Post, PostId};
use crate::schema::{unknown_fields, validate_with_defaults, SchemaDefaults};
use crate::text_utils::{post_url_with_prefix, reading_time_with_rate};

/// Validated posts of one build, filled by whoever reads the content
/// documents. Nothing here touches the file system.
pub struct PostCache {
    config: Config,
    schema_defaults: SchemaDefaults,
    // Insertion order
    posts: Vec<Post>,
    id_to_index: HashMap<PostId, usize>,
}

impl PostCache {
    pub fn new(config: Config) -> PostCache {
        let schema_defaults = config.schema_defaults();
        PostCache {
            config,
            schema_defaults,
            posts: Default::default(),
            id_to_index: Default::default(),
        }
    }

    /// Parses and validates one document. A document that fails validation
    /// is rejected as a whole and the cache is left unchanged.
    pub fn add_document(&mut self, id: &str, document: &str) -> Result<()> {
        debug!("Parsing front matter of {}", id);
        let (raw, body) = parse_front_matter(document)
            .with_context(|| format!("Unable to read front matter of {}", id))?;

        for field in unknown_fields(&raw) {
            warn!("Ignoring unknown front matter field {} in {}", field, id);
        }

        let record = validate_with_defaults(id, &raw, &self.schema_defaults)?;
        self.add_post(Post {
            record,
            body: body.to_string(),
        })
    }

    /// Same as [`PostCache::add_document`], with the id taken from the
    /// document's path relative to the content directory.
    pub fn add_document_at(&mut self, relative: &Path, document: &str) -> Result<()> {
        let id = PostId::from_path(relative)
            .ok_or_else(|| anyhow!("Invalid post path {}", relative.display()))?;
        self.add_document(id.as_str(), document)
    }

    pub fn add_post(&mut self, post: Post) -> Result<()> {
        if self.id_to_index.contains_key(post.id()) {
            bail!("Duplicate post id {}", post.id());
        }

        info!("Loaded post {} ({})", post.id(), post.record.title());
        self.id_to_index.insert(post.id().clone(), self.posts.len());
        self.posts.push(post);

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Post> {
        self.id_to_index.get(&PostId::from(id)).map(|&i| &self.posts[i])
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Drafts removed, newest first. This is the home page listing.
    pub fn published(&self) -> Vec<&Post> {
        let posts: Vec<&Post> = self.posts.iter().collect();
        sort_by_date_descending(&filter_published(&posts))
    }

    pub fn tags(&self) -> Vec<String> {
        unique_tags(&self.published())
    }

    pub fn tag_counts(&self) -> Vec<(String, usize)> {
        tag_counts(&self.published())
    }

    pub fn tagged(&self, tag: &str) -> Vec<&Post> {
        filter_by_tag(&self.published(), tag)
    }

    pub fn page_count(&self) -> u32 {
        let published = self.published();
        Paginator::new(&published, self.config.defaults.page_size).page_count()
    }

    pub fn page(&self, page: u32) -> Result<Vec<&Post>, PageError> {
        let published = self.published();
        let paginator = Paginator::new(&published, self.config.defaults.page_size);
        Ok(paginator.page(page)?.to_vec())
    }

    pub fn url_for(&self, id: &str) -> String {
        post_url_with_prefix(&self.config.defaults.url_prefix, id)
    }

    pub fn reading_time(&self, id: &str) -> Option<u32> {
        self.get(id)
            .map(|post| reading_time_with_rate(&post.body, self.config.defaults.words_per_minute))
    }
}
