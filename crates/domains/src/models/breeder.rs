use serde::{Deserialize, Serialize};

use crate::patch::{overwrite, overwrite_opt, Entity};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreederProfile {
    pub id: i64,
    pub breeder_name: String,
    pub location: String,
    pub documents: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBreederProfile {
    pub breeder_name: String,
    pub location: String,
    #[serde(default)]
    pub documents: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreederProfilePatch {
    #[serde(default)]
    pub breeder_name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub documents: Option<String>,
}

impl Entity for BreederProfile {
    const KIND: &'static str = "BreederProfile";
    type Draft = NewBreederProfile;
    type Patch = BreederProfilePatch;

    fn id(&self) -> i64 {
        self.id
    }

    fn from_draft(id: i64, d: NewBreederProfile) -> Self {
        Self { id, breeder_name: d.breeder_name, location: d.location, documents: d.documents }
    }

    fn apply(&mut self, p: BreederProfilePatch) {
        overwrite(&mut self.breeder_name, p.breeder_name);
        overwrite(&mut self.location, p.location);
        overwrite_opt(&mut self.documents, p.documents);
    }
}
