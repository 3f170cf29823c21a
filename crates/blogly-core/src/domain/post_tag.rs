use serde::{Deserialize, Serialize};

use super::{Post, Tag};

/// Join row linking one post to one tag. The pair is unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostTag {
    pub post_id: i32,
    pub tag_id: i32,
}

/// One row of a post/tag join: the link together with both sides it connects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tagging {
    pub link: PostTag,
    pub tag: Tag,
    pub post: Post,
}
