use std::fmt;
use std::fmt::{Display, Formatter};
use std::path::{Component, Path};

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::text_utils::reading_time_minutes;

#[derive(Debug, Clone, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PostId(pub String);

impl PostId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Id of a content file, given its path relative to the content
    /// directory. The extension is dropped, subdirectories stay part of the
    /// id and an `index` file is named after its directory.
    ///
    /// Absolute paths, `..` and names that are not UTF-8 give `None`.
    pub fn from_path(relative: &Path) -> Option<PostId> {
        let stem = relative.file_stem()?.to_str()?;

        let mut parts = vec![];
        for component in relative.parent().map(Path::components).into_iter().flatten() {
            match component {
                Component::Normal(dir) => parts.push(dir.to_str()?),
                Component::CurDir => {}
                _ => return None,
            }
        }

        if stem != "index" || parts.is_empty() {
            parts.push(stem);
        }
        Some(PostId(parts.join("/")))
    }
}

impl Display for PostId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PostId {
    fn from(value: &str) -> Self {
        PostId(value.to_string())
    }
}

impl From<String> for PostId {
    fn from(value: String) -> Self {
        PostId(value)
    }
}

/// Validated front matter of a single post.
///
/// Records are only built by the schema validator, and every field is
/// read-only afterwards. Listing operations return new vectors instead of
/// touching the records they were given.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    id: PostId,
    title: String,
    description: String,
    pub_date: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated_date: Option<NaiveDateTime>,
    author: String,
    tags: Vec<String>,
    draft: bool,
}

impl PostRecord {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: PostId,
        title: String,
        description: String,
        pub_date: NaiveDateTime,
        updated_date: Option<NaiveDateTime>,
        author: String,
        tags: Vec<String>,
        draft: bool,
    ) -> Self {
        PostRecord {
            id,
            title,
            description,
            pub_date,
            updated_date,
            author,
            tags,
            draft,
        }
    }

    pub fn id(&self) -> &PostId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn pub_date(&self) -> NaiveDateTime {
        self.pub_date
    }

    pub fn updated_date(&self) -> Option<NaiveDateTime> {
        self.updated_date
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn is_draft(&self) -> bool {
        self.draft
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// The date a renderer shows as "updated on": the update date when the
    /// author supplied one, the publication date otherwise.
    pub fn last_modified(&self) -> NaiveDateTime {
        self.updated_date.unwrap_or(self.pub_date)
    }
}

impl AsRef<PostRecord> for PostRecord {
    fn as_ref(&self) -> &PostRecord {
        self
    }
}

impl Display for PostRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "id={}, date={}, author={}, draft={}\ntitle={}",
               self.id,
               self.pub_date,
               self.author,
               self.draft,
               self.title,
        )
    }
}

/// A validated post together with the body that followed its front matter.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub record: PostRecord,
    pub body: String,
}

impl Post {
    pub fn id(&self) -> &PostId {
        self.record.id()
    }

    pub fn reading_time_minutes(&self) -> u32 {
        reading_time_minutes(&self.body)
    }
}

impl AsRef<PostRecord> for Post {
    fn as_ref(&self) -> &PostRecord {
        &self.record
    }
}

#[cfg(test)]
pub(crate) fn record_for_test(id: &str, date: &str, tags: &[&str], draft: bool) -> PostRecord {
    use crate::text_utils::parse_date_time;

    PostRecord::new(
        PostId::from(id),
        "Test Post".to_string(),
        "A test post description".to_string(),
        parse_date_time(date).unwrap(),
        None,
        "Test Author".to_string(),
        tags.iter().map(|t| t.to_string()).collect(),
        draft,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text_utils::parse_date_time;

    fn id_of(path: &str) -> Option<String> {
        PostId::from_path(Path::new(path)).map(|id| id.to_string())
    }

    #[test]
    fn test_id_from_path() {
        assert_eq!(id_of("hello-world.md").as_deref(), Some("hello-world"));
        assert_eq!(id_of("./getting-started.mdx").as_deref(), Some("getting-started"));
        assert_eq!(id_of("2024/march/release.md").as_deref(), Some("2024/march/release"));
        assert_eq!(id_of("my-trip/index.md").as_deref(), Some("my-trip"));
        assert_eq!(id_of("index.md").as_deref(), Some("index"));
        assert_eq!(id_of("no-extension").as_deref(), Some("no-extension"));
    }

    #[test]
    fn test_id_from_path_rejects_outside_paths() {
        assert_eq!(id_of("/srv/blog/hello-world.md"), None);
        assert_eq!(id_of("../hello-world.md"), None);
        assert_eq!(id_of(""), None);
    }

    #[test]
    fn test_last_modified() {
        let record = record_for_test("hello-world", "2024-03-15", &[], false);
        assert_eq!(record.last_modified(), parse_date_time("2024-03-15").unwrap());

        let mut updated = record.clone();
        updated.updated_date = Some(parse_date_time("2024-03-20").unwrap());
        assert_eq!(updated.last_modified(), parse_date_time("2024-03-20").unwrap());
    }

    #[test]
    fn test_has_tag_is_exact() {
        let record = record_for_test("p", "2024-03-15", &["astro", "blog"], false);
        assert!(record.has_tag("astro"));
        assert!(!record.has_tag("Astro"));
        assert!(!record.has_tag("ast"));
    }

    #[test]
    fn test_serialize_record() {
        let record = record_for_test("hello-world", "2024-03-15", &["astro"], false);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], "hello-world");
        assert_eq!(json["pubDate"], "2024-03-15T00:00:00");
        assert_eq!(json["tags"], serde_json::json!(["astro"]));
        assert!(json.get("updatedDate").is_none());
    }

    #[test]
    fn test_post_reading_time() {
        let post = Post {
            record: record_for_test("p", "2024-03-15", &[], false),
            body: "word ".repeat(201),
        };
        assert_eq!(post.reading_time_minutes(), 2);
        assert_eq!(post.id().as_str(), "p");
    }
}
