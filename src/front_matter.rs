use anyhow::{anyhow, Context, Result};

use crate::post::{Post, PostId};
use crate::schema::{into_record, validate_with_defaults, RawRecord, RawValue, SchemaDefaults};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontMatterFormat {
    Yaml,
    Toml,
}

impl FrontMatterFormat {
    pub fn fence(&self) -> &'static str {
        match self {
            FrontMatterFormat::Yaml => "---",
            FrontMatterFormat::Toml => "+++",
        }
    }

    fn from_fence(line: &str) -> Option<FrontMatterFormat> {
        match line {
            "---" => Some(FrontMatterFormat::Yaml),
            "+++" => Some(FrontMatterFormat::Toml),
            _ => None,
        }
    }
}

/// Example of document
/// ---
/// title: Hello World
/// pubDate: 2024-03-15
/// ---
///
/// # Welcome to my blog
///
/// Returns the format, the header between the fences and the body after the
/// closing fence.
pub fn split_document(input: &str) -> Result<(FrontMatterFormat, &str, &str)> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut lines = input.split_inclusive('\n');
    let mut offset = 0;

    // Blank lines before the opening fence are ok
    let mut format = None;
    for line in lines.by_ref() {
        offset += line.len();
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        format = FrontMatterFormat::from_fence(line);
        break;
    }

    let Some(format) = format else {
        return Err(anyhow!("Document must begin with `---` or `+++`"));
    };

    let header_start = offset;
    for line in lines {
        if line.trim_end() == format.fence() {
            let header = &input[header_start..offset];
            let body = &input[(offset + line.len())..];
            return Ok((format, header, body));
        }
        offset += line.len();
    }

    Err(anyhow!("Missing closing `{}`", format.fence()))
}

pub fn parse_front_matter(input: &str) -> Result<(RawRecord, &str)> {
    let (format, header, body) = split_document(input)?;

    let value = match format {
        FrontMatterFormat::Yaml if header.trim().is_empty() => RawValue::Null,
        FrontMatterFormat::Yaml => {
            let yaml: serde_yaml::Value = serde_yaml::from_str(header)
                .context("Invalid YAML front matter")?;
            RawValue::from(yaml)
        }
        FrontMatterFormat::Toml => {
            let table: toml::Table = toml::from_str(header)
                .context("Invalid TOML front matter")?;
            RawValue::from(toml::Value::Table(table))
        }
    };

    let record = into_record(value).ok_or_else(|| anyhow!("Front matter must be a mapping of keys to values"))?;
    Ok((record, body))
}

pub fn parse_post(id: impl Into<PostId>, document: &str) -> Result<Post> {
    parse_post_with_defaults(id, document, &SchemaDefaults::default())
}

/// Parses and validates a whole document. A document whose front matter does
/// not validate produces no post; the [`crate::schema::ValidationFailure`] is
/// the returned error.
pub fn parse_post_with_defaults(id: impl Into<PostId>, document: &str, defaults: &SchemaDefaults) -> Result<Post> {
    let id = id.into();
    let (raw, body) = parse_front_matter(document)
        .with_context(|| format!("Unable to read front matter of {}", id))?;
    let record = validate_with_defaults(id, &raw, defaults)?;

    Ok(Post {
        record,
        body: body.to_string(),
    })
}
