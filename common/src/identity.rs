use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::pharmacy::PharmacyId;

/// A pharmacy administrator. Only the digest of the password is kept.
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub id: u32,
    pub username: String,
    pub password_sha256: String,
    pub pharmacy_id: PharmacyId,
}

/// What a successful login reveals about the account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminProfile {
    pub id: u32,
    pub username: String,
    pub pharmacy_id: PharmacyId,
}

/// Lowercase hex SHA-256 of `password`.
pub fn password_digest(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

impl AdminAccount {
    pub fn new(id: u32, username: &str, password: &str, pharmacy_id: PharmacyId) -> Self {
        Self {
            id,
            username: username.to_string(),
            password_sha256: password_digest(password),
            pharmacy_id,
        }
    }

    pub fn verify_password(&self, password: &str) -> bool {
        self.password_sha256 == password_digest(password)
    }

    pub fn profile(&self) -> AdminProfile {
        AdminProfile {
            id: self.id,
            username: self.username.clone(),
            pharmacy_id: self.pharmacy_id,
        }
    }
}
