use chrono::DateTime;
use chrono::Utc;
use mongodb::bson;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::Document;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserFilter;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserName;
use crate::user::errors::UserError;

/// Stored shape of a user in the `user` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<bson::DateTime>,
}

impl From<&User> for UserDocument {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            password: user.password_hash.clone(),
            created_by: user.created_by.clone(),
            created_at: to_bson_datetime(user.created_at),
            updated_at: to_bson_datetime(user.updated_at),
            deleted_at: user.deleted_at.map(to_bson_datetime),
        }
    }
}

impl TryFrom<UserDocument> for User {
    type Error = UserError;

    /// Stored records that no longer pass validation are a storage fault,
    /// not a caller error.
    fn try_from(document: UserDocument) -> Result<Self, Self::Error> {
        let id = document.id;
        let corrupt =
            |e: UserError| UserError::DatabaseError(format!("stored user {}: {}", id, e));

        Ok(User {
            id: UserId(id),
            name: UserName::new(document.name).map_err(|e| corrupt(e.into()))?,
            email: EmailAddress::new(document.email).map_err(|e| corrupt(e.into()))?,
            password_hash: document.password,
            created_by: document.created_by,
            created_at: from_bson_datetime(document.created_at)?,
            updated_at: from_bson_datetime(document.updated_at)?,
            deleted_at: document.deleted_at.map(from_bson_datetime).transpose()?,
        })
    }
}

fn to_bson_datetime(value: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(value.timestamp_millis())
}

fn from_bson_datetime(value: bson::DateTime) -> Result<DateTime<Utc>, UserError> {
    DateTime::from_timestamp_millis(value.timestamp_millis())
        .ok_or_else(|| UserError::DatabaseError(format!("timestamp out of range: {}", value)))
}

/// Build the query for a [`UserFilter`]: an AND over the provided fields.
///
/// Empty strings are treated like absent fields.
pub fn filter_document(filter: &UserFilter) -> Document {
    let mut document = Document::new();

    if let Some(id) = &filter.id {
        document.insert("_id", id.0);
    }
    if let Some(name) = filter.name.as_deref().filter(|name| !name.is_empty()) {
        document.insert("name", name);
    }
    if let Some(email) = &filter.email {
        document.insert("email", email.as_str());
    }

    document
}

/// Matches records that are not soft-deleted.
///
/// `null` also matches documents where the field is missing.
pub fn active_filter() -> Document {
    doc! { "deleted_at": null }
}
