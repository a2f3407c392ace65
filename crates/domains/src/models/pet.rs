use serde::{Deserialize, Serialize};

use super::lenient;
use crate::patch::{overwrite, overwrite_opt, Entity};

/// A pet profile kept by an owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: i64,
    pub name: String,
    /// Species (dog, cat, ...). Serialized as `type`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub breed: Option<String>,
    pub age: Option<i32>,
    pub bio: Option<String>,
    /// Upload path of the pet's paperwork
    pub documents: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPet {
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub breed: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_i32")]
    pub age: Option<i32>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub documents: Option<String>,
    /// The web client sends either `imageUrl` or `image`.
    #[serde(default, alias = "image")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub breed: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_i32")]
    pub age: Option<i32>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub documents: Option<String>,
    #[serde(default, alias = "image")]
    pub image_url: Option<String>,
}

impl Entity for Pet {
    const KIND: &'static str = "Pet";
    type Draft = NewPet;
    type Patch = PetPatch;

    fn id(&self) -> i64 {
        self.id
    }

    fn from_draft(id: i64, d: NewPet) -> Self {
        Self {
            id,
            name: d.name,
            kind: d.kind,
            breed: d.breed,
            age: d.age,
            bio: d.bio,
            documents: d.documents,
            image_url: d.image_url,
        }
    }

    fn apply(&mut self, p: PetPatch) {
        overwrite(&mut self.name, p.name);
        overwrite_opt(&mut self.kind, p.kind);
        overwrite_opt(&mut self.breed, p.breed);
        overwrite_opt(&mut self.age, p.age);
        overwrite_opt(&mut self.bio, p.bio);
        overwrite_opt(&mut self.documents, p.documents);
        overwrite_opt(&mut self.image_url, p.image_url);
    }
}
