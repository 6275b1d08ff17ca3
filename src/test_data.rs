#[cfg(test)]
pub const HELLO_WORLD_MD: &str = r#"---
title: Hello World
description: Welcome to my new blog built with Astro and deployed on Cloudflare
pubDate: 2026-02-01
author: Alex
tags:
  - astro
  - cloudflare
---

# Welcome to My Blog

This is the first post. It is written in Markdown and its front matter lives
between the fences above.

## What's next

More posts about building fast static sites.
"#;

#[cfg(test)]
pub const SECOND_POST_MD: &str = r#"---
title: "What's New in Astro 5.0?"
description: A tour of the release
pubDate: 2026-03-10T09:00:00Z
tags: [astro, release-notes]
---
Content layer, server islands and more.
"#;

#[cfg(test)]
pub const DRAFT_POST_MD: &str = r#"---
title: Unfinished thoughts
description: Not ready yet
pubDate: 2026-04-01
tags: [cloudflare]
draft: true
unlisted: yes
---
TBD
"#;

#[cfg(test)]
pub const TOML_POST_MD: &str = r#"+++
title = "TOML front matter"
description = "Dates are native here"
pubDate = 2024-03-15T10:30:00+02:00
updatedDate = 2024-03-20
draft = true
+++
Short body.
"#;

#[cfg(test)]
pub const INVALID_POST_MD: &str = r#"---
description: Missing a title
pubDate: 2026-13-40
tags: not-a-list
---
"#;
