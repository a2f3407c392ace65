use serde::{Deserialize, Serialize};

use super::lenient;
use crate::patch::{overwrite, overwrite_opt, Entity};

/// A pet offered for adoption or sale on the listings board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetListing {
    pub id: i64,
    pub pet_name: String,
    pub breed: String,
    pub age: i32,
    pub status: String,
    /// Value copies of the creating owner; not a foreign key.
    pub creator_name: Option<String>,
    pub creator_id: Option<i64>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPetListing {
    pub pet_name: String,
    pub breed: String,
    #[serde(deserialize_with = "lenient::i32")]
    pub age: i32,
    pub status: String,
    #[serde(default)]
    pub creator_name: Option<String>,
    #[serde(default)]
    pub creator_id: Option<i64>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetListingPatch {
    #[serde(default)]
    pub pet_name: Option<String>,
    #[serde(default)]
    pub breed: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_i32")]
    pub age: Option<i32>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub creator_name: Option<String>,
    #[serde(default)]
    pub creator_id: Option<i64>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Entity for PetListing {
    const KIND: &'static str = "PetListing";
    type Draft = NewPetListing;
    type Patch = PetListingPatch;

    fn id(&self) -> i64 {
        self.id
    }

    fn from_draft(id: i64, d: NewPetListing) -> Self {
        Self {
            id,
            pet_name: d.pet_name,
            breed: d.breed,
            age: d.age,
            status: d.status,
            creator_name: d.creator_name,
            creator_id: d.creator_id,
            image_url: d.image_url,
        }
    }

    fn apply(&mut self, p: PetListingPatch) {
        overwrite(&mut self.pet_name, p.pet_name);
        overwrite(&mut self.breed, p.breed);
        overwrite(&mut self.age, p.age);
        overwrite(&mut self.status, p.status);
        overwrite_opt(&mut self.creator_name, p.creator_name);
        overwrite_opt(&mut self.creator_id, p.creator_id);
        overwrite_opt(&mut self.image_url, p.image_url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::merge;
    use serde_json::json;

    fn listing() -> PetListing {
        PetListing {
            id: 11,
            pet_name: "Kiko".into(),
            breed: "aspin".into(),
            age: 1,
            status: "available".into(),
            creator_name: Some("Ana Reyes".into()),
            creator_id: Some(3),
            image_url: None,
        }
    }

    #[test]
    fn status_change_keeps_creator() {
        let patch: PetListingPatch = serde_json::from_value(json!({
            "status": "adopted",
            "creatorName": null,
        }))
        .unwrap();
        let merged = merge(listing(), patch);
        assert_eq!(merged.status, "adopted");
        assert_eq!(merged.creator_name.as_deref(), Some("Ana Reyes"));
        assert_eq!(merged.creator_id, Some(3));
        assert_eq!(merged.age, 1);
    }

    #[test]
    fn draft_requires_age() {
        let missing = serde_json::from_value::<NewPetListing>(json!({
            "petName": "Kiko", "breed": "aspin", "status": "available"
        }));
        assert!(missing.is_err());

        let as_text: NewPetListing = serde_json::from_value(json!({
            "petName": "Kiko", "breed": "aspin", "age": "2", "status": "available"
        }))
        .unwrap();
        assert_eq!(as_text.age, 2);
    }
}
