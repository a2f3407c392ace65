use serde::{Deserialize, Serialize};

use crate::patch::{overwrite, overwrite_opt, Entity};

/// A registered user of the app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetOwner {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Argon2 PHC string. Never leaves the server.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub profile_image: Option<String>,
    pub cover_image: Option<String>,
}

/// Registration payload. `password` is plain text until the owner service
/// replaces it with a hash.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPetOwner {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetOwnerPatch {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Plain text on the way in, hashed by the owner service before merging.
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
}

/// `POST /api/petowners/login` body.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// What a successful login hands back: the owner without secrets or images.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginProfile {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<&PetOwner> for LoginProfile {
    fn from(o: &PetOwner) -> Self {
        Self {
            id: o.id,
            first_name: o.first_name.clone(),
            last_name: o.last_name.clone(),
            email: o.email.clone(),
        }
    }
}

impl Entity for PetOwner {
    const KIND: &'static str = "PetOwner";
    type Draft = NewPetOwner;
    type Patch = PetOwnerPatch;

    fn id(&self) -> i64 {
        self.id
    }

    /// Expects `d.password` to already hold the hash.
    fn from_draft(id: i64, d: NewPetOwner) -> Self {
        Self {
            id,
            first_name: d.first_name,
            last_name: d.last_name,
            email: d.email,
            password_hash: d.password,
            profile_image: d.profile_image,
            cover_image: d.cover_image,
        }
    }

    fn apply(&mut self, p: PetOwnerPatch) {
        overwrite(&mut self.first_name, p.first_name);
        overwrite(&mut self.last_name, p.last_name);
        overwrite(&mut self.email, p.email);
        overwrite(&mut self.password_hash, p.password);
        overwrite_opt(&mut self.profile_image, p.profile_image);
        overwrite_opt(&mut self.cover_image, p.cover_image);
    }
}
