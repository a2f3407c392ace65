use serde::{Deserialize, Serialize};

use crate::patch::{overwrite, overwrite_opt, Entity};

/// A feed entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub content: String,
    pub image_url: Option<String>,
    pub creator_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub creator_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPatch {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub creator_name: Option<String>,
}

impl Entity for Post {
    const KIND: &'static str = "Post";
    type Draft = NewPost;
    type Patch = PostPatch;

    fn id(&self) -> i64 {
        self.id
    }

    fn from_draft(id: i64, d: NewPost) -> Self {
        Self { id, content: d.content, image_url: d.image_url, creator_name: d.creator_name }
    }

    fn apply(&mut self, p: PostPatch) {
        overwrite(&mut self.content, p.content);
        overwrite_opt(&mut self.image_url, p.image_url);
        overwrite_opt(&mut self.creator_name, p.creator_name);
    }
}
