use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::error::ErrorKind;
use mongodb::error::WriteFailure;
use mongodb::options::ClientOptions;
use mongodb::options::Credential;
use mongodb::options::IndexOptions;
use mongodb::Collection;
use mongodb::Database;
use mongodb::IndexModel;

use super::documents::active_filter;
use super::documents::filter_document;
use super::documents::UserDocument;
use crate::config::DatabaseConfig;
use crate::domain::context::OperationContext;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserFilter;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

pub const USER_COLLECTION: &str = "user";
pub const EMAIL_INDEX: &str = "email_1";

/// Server error code for a unique index violation.
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Build driver options from configuration: pool bounds, heartbeat and
/// optional credentials on top of the connection string.
pub async fn client_options(config: &DatabaseConfig) -> Result<ClientOptions, mongodb::error::Error> {
    let mut options = ClientOptions::parse(&config.uri).await?;

    options.app_name = Some("user-service".to_string());
    options.min_pool_size = Some(config.min_pool_size);
    options.max_pool_size = Some(config.max_pool_size);
    options.heartbeat_freq = Some(config.heartbeat_interval());

    if let Some(username) = &config.username {
        let mut credential = Credential::default();
        credential.username = Some(username.clone());
        credential.password = config.password.clone();
        options.credential = Some(credential);
    }

    Ok(options)
}

pub struct MongoUserRepository {
    collection: Collection<UserDocument>,
}

impl MongoUserRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(USER_COLLECTION),
        }
    }

    /// Create the unique email index. Safe to call on every start.
    pub async fn ensure_indexes(&self) -> Result<(), UserError> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name(EMAIL_INDEX.to_string())
                    .build(),
            )
            .build();

        self.collection
            .create_index(email_index)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        tracing::info!(
            collection = USER_COLLECTION,
            index = EMAIL_INDEX,
            "Unique email index ensured"
        );

        Ok(())
    }
}

fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY_CODE,
        ErrorKind::Command(e) => e.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

fn write_error(error: mongodb::error::Error, email: &EmailAddress) -> UserError {
    if is_duplicate_key(&error) {
        return UserError::EmailAlreadyExists(email.as_str().to_string());
    }
    storage_error(error)
}

fn storage_error(error: mongodb::error::Error) -> UserError {
    tracing::error!(error = %error, collection = USER_COLLECTION, "Storage call failed");
    UserError::DatabaseError(error.to_string())
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn insert(&self, ctx: &OperationContext, user: User) -> Result<User, UserError> {
        let document = UserDocument::from(&user);

        ctx.run(self.collection.insert_one(&document))
            .await?
            .map_err(|e| write_error(e, &user.email))?;

        Ok(user)
    }

    async fn find_by_id(&self, ctx: &OperationContext, id: &UserId) -> Result<User, UserError> {
        ctx.run(self.collection.find_one(doc! { "_id": id.0 }))
            .await?
            .map_err(storage_error)?
            .ok_or(UserError::NotFound)?
            .try_into()
    }

    async fn find_by_email(
        &self,
        ctx: &OperationContext,
        email: &EmailAddress,
    ) -> Result<User, UserError> {
        ctx.run(self.collection.find_one(doc! { "email": email.as_str() }))
            .await?
            .map_err(storage_error)?
            .ok_or(UserError::NotFound)?
            .try_into()
    }

    async fn find(
        &self,
        ctx: &OperationContext,
        filter: &UserFilter,
    ) -> Result<Vec<User>, UserError> {
        let query = filter_document(filter);

        let documents: Vec<UserDocument> = ctx
            .run(async {
                let cursor = self.collection.find(query).await?;
                cursor.try_collect::<Vec<UserDocument>>().await
            })
            .await?
            .map_err(storage_error)?;

        documents.into_iter().map(User::try_from).collect()
    }

    async fn replace(
        &self,
        ctx: &OperationContext,
        id: &UserId,
        user: &User,
    ) -> Result<(), UserError> {
        let document = UserDocument::from(user);

        ctx.run(self.collection.replace_one(doc! { "_id": id.0 }, &document))
            .await?
            .map_err(|e| write_error(e, &user.email))?;

        Ok(())
    }

    async fn count(&self, ctx: &OperationContext) -> Result<u64, UserError> {
        ctx.run(self.collection.count_documents(active_filter()))
            .await?
            .map_err(storage_error)
    }
}
