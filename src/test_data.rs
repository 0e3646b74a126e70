#[cfg(test)]
use crate::post::{Post, PostId};
#[cfg(test)]
use crate::text_utils::{extract_tags, parse_publish_date};

#[cfg(test)]
pub fn make_post(id: &str, date: &str, tags: &str) -> Post {
    Post {
        id: PostId(id.to_string()),
        title: format!("Title of {}", id),
        published_at: parse_publish_date(date).unwrap(),
        tags: extract_tags(tags),
        hero_image: None,
        body: format!("Body of {}\n", id),
    }
}

#[cfg(test)]
pub fn mbo_post() -> Post {
    make_post("mbo", "2015-12-22", "company")
}

#[cfg(test)]
pub fn trampolines_post() -> Post {
    make_post("trampolines", "2016-07-15", "scala recursion fp")
}

#[cfg(test)]
pub const TRAMPOLINES_DATA: &str = r##"
<!--
[ID]: # (trampolines)
[DATE]: # (2016-07-15)
[AUTHOR]: # (someone)
[TAGS]: # (scala, recursion, fp)
[HERO_IMAGE]: # (https://example.com/images/trampoline.jpg)
-->

# Trampolines in Scala
Recursion is the natural way to express many algorithms in a functional language.
The catch is the stack: every call that is not in tail position grows it.

<!-- more -->

```scala
def even(n: Int): TailRec[Boolean] =
  if (n == 0) done(true) else tailcall(odd(n - 1))
```
"##;

#[cfg(test)]
pub const MBO_DATA: &str = r##"[DATE]: # (2015-12-22 09:30:00.000)
[TAGS]: # (company)
[TITLE]: # (We are joining forces)

Today we announce that the team is joining a bigger company.
"##;
