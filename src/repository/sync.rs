use super::{Filter, Repository, RepositoryArgs};
use crate::record::{FieldMap, PatchError, Record, RecordId};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::task::JoinError;

/// Blocking storage for one record type
///
/// Mirrors [`Repository`] method for method. Wrap an implementation in
/// [`Synchronous`] to serve it from a generic controller.
pub trait SyncRepository: Sized + Send + Sync + 'static {
    type Model: Record<Id = Self::Id>;
    type Id: RecordId;
    type Error: std::error::Error + From<PatchError> + Send + Sync + 'static;
    type Params: Clone + Send + Sync + 'static;

    fn new(args: RepositoryArgs<Self::Params>) -> Result<Self, Self::Error>;

    fn add(&self, data: Self::Model) -> Result<Self::Model, Self::Error>;

    fn add_many(&self, data: Vec<Self::Model>) -> Result<Vec<Self::Model>, Self::Error>;

    fn get(&self, item_id: Self::Id) -> Result<Self::Model, Self::Error>;

    fn update(&self, data: Self::Model) -> Result<Self::Model, Self::Error>;

    fn update_many(&self, data: Vec<FieldMap>) -> Result<Vec<Self::Model>, Self::Error>;

    fn delete(&self, item_id: Self::Id) -> Result<Self::Model, Self::Error>;

    fn delete_many(&self, item_ids: Vec<Self::Id>) -> Result<Vec<Self::Model>, Self::Error>;

    fn list(&self, filters: Vec<Filter<Self::Id>>) -> Result<Vec<Self::Model>, Self::Error>;

    fn count(&self, filters: Vec<Filter<Self::Id>>) -> Result<usize, Self::Error> {
        let filters = filters.into_iter().filter(|f| !f.is_pagination()).collect();
        Ok(self.list(filters)?.len())
    }
}

/// Serves a [`SyncRepository`] through the async [`Repository`] contract
///
/// Calls run on tokio's blocking pool so slow storage does not stall the
/// request executor. A panic inside the repository resumes on the caller; a
/// call cancelled by runtime shutdown becomes an error through
/// `From<JoinError>`.
pub struct Synchronous<S> {
    inner: Arc<S>,
}

impl<S> Synchronous<S>
where
    S: SyncRepository,
    S::Error: From<JoinError>,
{
    pub fn inner(&self) -> &S {
        &self.inner
    }

    async fn run<T, F>(&self, call: F) -> Result<T, S::Error>
    where
        T: Send + 'static,
        F: FnOnce(&S) -> Result<T, S::Error> + Send + 'static,
    {
        let repository = Arc::clone(&self.inner);
        joined(tokio::task::spawn_blocking(move || call(repository.as_ref())).await)
    }
}

fn joined<T, E: From<JoinError>>(outcome: Result<Result<T, E>, JoinError>) -> Result<T, E> {
    match outcome {
        Ok(result) => result,
        Err(err) => match err.try_into_panic() {
            Ok(payload) => std::panic::resume_unwind(payload),
            Err(err) => Err(err.into()),
        },
    }
}

#[async_trait]
impl<S> Repository for Synchronous<S>
where
    S: SyncRepository,
    S::Error: From<JoinError>,
{
    type Model = S::Model;
    type Id = S::Id;
    type Error = S::Error;
    type Params = S::Params;

    fn new(args: RepositoryArgs<Self::Params>) -> Result<Self, Self::Error> {
        Ok(Self {
            inner: Arc::new(S::new(args)?),
        })
    }

    async fn add(&self, data: Self::Model) -> Result<Self::Model, Self::Error> {
        self.run(move |repo| repo.add(data)).await
    }

    async fn add_many(&self, data: Vec<Self::Model>) -> Result<Vec<Self::Model>, Self::Error> {
        self.run(move |repo| repo.add_many(data)).await
    }

    async fn get(&self, item_id: Self::Id) -> Result<Self::Model, Self::Error> {
        self.run(move |repo| repo.get(item_id)).await
    }

    async fn update(&self, data: Self::Model) -> Result<Self::Model, Self::Error> {
        self.run(move |repo| repo.update(data)).await
    }

    async fn update_many(&self, data: Vec<FieldMap>) -> Result<Vec<Self::Model>, Self::Error> {
        self.run(move |repo| repo.update_many(data)).await
    }

    async fn delete(&self, item_id: Self::Id) -> Result<Self::Model, Self::Error> {
        self.run(move |repo| repo.delete(item_id)).await
    }

    async fn delete_many(
        &self,
        item_ids: Vec<Self::Id>,
    ) -> Result<Vec<Self::Model>, Self::Error> {
        self.run(move |repo| repo.delete_many(item_ids)).await
    }

    async fn list(&self, filters: Vec<Filter<Self::Id>>) -> Result<Vec<Self::Model>, Self::Error> {
        self.run(move |repo| repo.list(filters)).await
    }

    async fn count(&self, filters: Vec<Filter<Self::Id>>) -> Result<usize, Self::Error> {
        self.run(move |repo| repo.count(filters)).await
    }
}
