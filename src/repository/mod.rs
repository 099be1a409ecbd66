//! The repository contract generic controllers delegate to.
//!
//! Every method returns a future, so synchronous storage is adapted once,
//! through [`SyncRepository`] and [`Synchronous`], instead of the controller
//! checking what each call returned.

use crate::context::RequestContext;
use crate::record::{FieldMap, PatchError, Record, RecordId};
use async_trait::async_trait;

pub mod filters;
mod sync;

pub use filters::{CollectionFilter, Filter, LimitOffset, OrderBy, SortOrder};
pub use sync::{SyncRepository, Synchronous};

/// Construction arguments for a repository handle
///
/// `params` comes from the controller, `request` is the context of the call
/// being served.
#[derive(Debug, Clone)]
pub struct RepositoryArgs<P> {
    pub request: RequestContext,
    pub params: P,
}

/// Asynchronous storage for one record type
///
/// A fresh handle is built with [`Repository::new`] for every controller
/// operation, so implementations hold per-request state only and reach shared
/// resources through `Params` (for example an `Arc` to a pool) or the request
/// extensions.
///
/// # Example
/// ```ignore
/// #[async_trait]
/// impl Repository for UserRepository {
///     type Model = User;
///     type Id = i64;
///     type Error = CrudError;
///     type Params = PgPool;
///
///     fn new(args: RepositoryArgs<PgPool>) -> Result<Self, CrudError> {
///         Ok(Self { pool: args.params, request: args.request })
///     }
///
///     async fn get(&self, item_id: i64) -> Result<User, CrudError> {
///         // SELECT ... WHERE id = $1
///     }
///     // ...
/// }
/// ```
#[async_trait]
pub trait Repository: Sized + Send + Sync + 'static {
    type Model: Record<Id = Self::Id>;
    type Id: RecordId;
    type Error: std::error::Error + From<PatchError> + Send + Sync + 'static;
    type Params: Clone + Send + Sync + 'static;

    fn new(args: RepositoryArgs<Self::Params>) -> Result<Self, Self::Error>;

    async fn add(&self, data: Self::Model) -> Result<Self::Model, Self::Error>;

    async fn add_many(&self, data: Vec<Self::Model>) -> Result<Vec<Self::Model>, Self::Error>;

    /// Fails with the implementation's not-found error when `item_id` is absent
    async fn get(&self, item_id: Self::Id) -> Result<Self::Model, Self::Error>;

    async fn update(&self, data: Self::Model) -> Result<Self::Model, Self::Error>;

    /// Each entry carries the identifier field alongside the fields to change
    async fn update_many(&self, data: Vec<FieldMap>) -> Result<Vec<Self::Model>, Self::Error>;

    /// Returns the removed record
    async fn delete(&self, item_id: Self::Id) -> Result<Self::Model, Self::Error>;

    async fn delete_many(&self, item_ids: Vec<Self::Id>)
    -> Result<Vec<Self::Model>, Self::Error>;

    async fn list(&self, filters: Vec<Filter<Self::Id>>) -> Result<Vec<Self::Model>, Self::Error>;

    /// Number of records matching `filters`, ignoring pagination
    async fn count(&self, filters: Vec<Filter<Self::Id>>) -> Result<usize, Self::Error> {
        let filters = filters.into_iter().filter(|f| !f.is_pagination()).collect();
        Ok(self.list(filters).await?.len())
    }
}
