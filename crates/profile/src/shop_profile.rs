use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopledger_core::{DomainError, DomainResult, OwnerId};

/// Shop profile: one per owner, created on first write, never deleted.
///
/// Any view may read this; updates flow through `apply` so partial edits
/// (settings form, logo upload) never clobber unrelated fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopProfile {
    pub owner_id: OwnerId,
    pub owner_name: String,
    pub email: String,
    pub shop_name: String,
    pub shop_type: String,
    pub address: String,
    pub tax_number: String,
    pub logo_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Partial profile edit; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopProfileUpdate {
    pub owner_name: Option<String>,
    pub email: Option<String>,
    pub shop_name: Option<String>,
    pub shop_type: Option<String>,
    pub address: Option<String>,
    pub tax_number: Option<String>,
}

impl ShopProfile {
    /// Defaults served when no profile document exists yet.
    pub fn default_for(owner_id: OwnerId, now: DateTime<Utc>) -> Self {
        Self {
            owner_id,
            owner_name: String::new(),
            email: String::new(),
            shop_name: "My Shop".to_string(),
            shop_type: String::new(),
            address: String::new(),
            tax_number: String::new(),
            logo_url: None,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, update: ShopProfileUpdate, now: DateTime<Utc>) -> DomainResult<()> {
        if let Some(email) = &update.email {
            if !email.is_empty() && !email.contains('@') {
                return Err(DomainError::validation("email must contain '@'"));
            }
        }
        if let Some(shop_name) = &update.shop_name {
            if shop_name.trim().is_empty() {
                return Err(DomainError::validation("shop name cannot be empty"));
            }
        }

        let ShopProfileUpdate {
            owner_name,
            email,
            shop_name,
            shop_type,
            address,
            tax_number,
        } = update;

        if let Some(v) = owner_name {
            self.owner_name = v;
        }
        if let Some(v) = email {
            self.email = v;
        }
        if let Some(v) = shop_name {
            self.shop_name = v;
        }
        if let Some(v) = shop_type {
            self.shop_type = v;
        }
        if let Some(v) = address {
            self.address = v;
        }
        if let Some(v) = tax_number {
            self.tax_number = v;
        }
        self.updated_at = now;
        Ok(())
    }

    pub fn set_logo_url(&mut self, url: impl Into<String>, now: DateTime<Utc>) {
        self.logo_url = Some(url.into());
        self.updated_at = now;
    }
}
