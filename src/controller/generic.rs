use crate::common::OffsetPagination;
use crate::config::ControllerConfig;
use crate::context::RequestContext;
use crate::record::{FieldMap, Record, RecordId};
use crate::repository::{Filter, Repository, RepositoryArgs, SortOrder};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// Bulk identifier payload: `{"item_ids": [...]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemIds<Id> {
    pub item_ids: Vec<Id>,
}

impl<Id> From<Vec<Id>> for ItemIds<Id> {
    fn from(item_ids: Vec<Id>) -> Self {
        Self { item_ids }
    }
}

/// Query string accepted by the listing route
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub order_by: Option<String>,
    #[serde(default)]
    pub sort: SortOrder,
}

/// CRUD and bulk operations over any [`Repository`]
///
/// The controller is stateless: every operation builds a new repository
/// handle from the request context and the configured parameters, performs
/// one logical call and hands the repository's result back untouched.
///
/// # Example
/// ```ignore
/// let users = Arc::new(GenericController::<UserRepository>::with_config(
///     ControllerConfig::new("/users"),
///     pool.clone(),
/// ));
/// let app: Router = users.mount(Router::new());
/// ```
pub struct GenericController<R: Repository> {
    config: ControllerConfig,
    params: R::Params,
    _repository: PhantomData<fn() -> R>,
}

impl<R: Repository> GenericController<R> {
    pub fn new(params: R::Params) -> Self {
        Self::with_config(ControllerConfig::default(), params)
    }

    pub fn with_config(config: ControllerConfig, params: R::Params) -> Self {
        let id_kind = <R::Id as RecordId>::KIND;
        let id_field = config
            .id_field_name
            .as_deref()
            .unwrap_or(<R::Model as Record>::ID_FIELD);
        tracing::debug!(
            model = std::any::type_name::<R::Model>(),
            id_kind = %id_kind,
            path = %config.path,
            id_field,
            "generic controller configured"
        );
        Self {
            config,
            params,
            _repository: PhantomData,
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn base_path(&self) -> &str {
        &self.config.path
    }

    /// Field `get_many` filters on: the configured name, else the record's id field
    pub fn id_field_name(&self) -> &str {
        self.config
            .id_field_name
            .as_deref()
            .unwrap_or(<R::Model as Record>::ID_FIELD)
    }

    /// Build a repository handle scoped to `ctx`
    pub fn create_repository(
        &self,
        ctx: &RequestContext,
        params: R::Params,
    ) -> Result<R, R::Error> {
        R::new(RepositoryArgs {
            request: ctx.clone(),
            params,
        })
    }

    fn repository(&self, ctx: &RequestContext) -> Result<R, R::Error> {
        self.create_repository(ctx, self.params.clone())
    }

    pub async fn create_instance(
        &self,
        ctx: &RequestContext,
        data: R::Model,
    ) -> Result<R::Model, R::Error> {
        tracing::debug!(request_id = %ctx.request_id(), "create_instance");
        self.repository(ctx)?.add(data).await
    }

    pub async fn get_instance(
        &self,
        ctx: &RequestContext,
        item_id: R::Id,
    ) -> Result<R::Model, R::Error> {
        tracing::debug!(request_id = %ctx.request_id(), id = %item_id, "get_instance");
        self.repository(ctx)?.get(item_id).await
    }

    /// Fetch, patch and persist a single record
    ///
    /// Reads and writes go through separate repository handles. A patch that
    /// names unknown or immutable fields fails before anything is written.
    #[tracing::instrument(
        level = "debug",
        name = "update_instance",
        skip_all,
        fields(request_id = %ctx.request_id(), id = %item_id)
    )]
    pub async fn update_instance(
        &self,
        ctx: &RequestContext,
        item_id: R::Id,
        data: FieldMap,
    ) -> Result<R::Model, R::Error> {
        tracing::debug!(fields = data.len(), "update_instance");
        let mut instance = self.repository(ctx)?.get(item_id).await?;
        instance.apply_patch(data)?;
        self.repository(ctx)?.update(instance).await
    }

    pub async fn delete_instance(
        &self,
        ctx: &RequestContext,
        item_id: R::Id,
    ) -> Result<(), R::Error> {
        tracing::debug!(request_id = %ctx.request_id(), id = %item_id, "delete_instance");
        self.repository(ctx)?.delete(item_id).await?;
        Ok(())
    }

    pub async fn create_many(
        &self,
        ctx: &RequestContext,
        data: Vec<R::Model>,
    ) -> Result<Vec<R::Model>, R::Error> {
        tracing::debug!(request_id = %ctx.request_id(), count = data.len(), "create_many");
        self.repository(ctx)?.add_many(data).await
    }

    pub async fn update_many(
        &self,
        ctx: &RequestContext,
        data: Vec<FieldMap>,
    ) -> Result<Vec<R::Model>, R::Error> {
        tracing::debug!(request_id = %ctx.request_id(), count = data.len(), "update_many");
        self.repository(ctx)?.update_many(data).await
    }

    pub async fn delete_many(
        &self,
        ctx: &RequestContext,
        data: ItemIds<R::Id>,
    ) -> Result<(), R::Error> {
        tracing::debug!(request_id = %ctx.request_id(), count = data.item_ids.len(), "delete_many");
        self.repository(ctx)?.delete_many(data.item_ids).await?;
        Ok(())
    }

    /// Records whose id field is one of `data.item_ids`
    pub async fn get_many(
        &self,
        ctx: &RequestContext,
        data: ItemIds<R::Id>,
    ) -> Result<Vec<R::Model>, R::Error> {
        tracing::debug!(request_id = %ctx.request_id(), count = data.item_ids.len(), "get_many");
        let filter = Filter::collection(self.id_field_name(), data.item_ids);
        self.repository(ctx)?.list(vec![filter]).await
    }

    /// One page of records plus the total count
    pub async fn list_instances(
        &self,
        ctx: &RequestContext,
        query: ListQuery,
    ) -> Result<OffsetPagination<R::Model>, R::Error> {
        let limit = self.config.effective_limit(query.limit);
        let offset = query.offset.unwrap_or(0);
        tracing::debug!(request_id = %ctx.request_id(), limit, offset, "list_instances");

        let mut filters = Vec::new();
        if let Some(field) = query.order_by {
            filters.push(Filter::order_by(field, query.sort));
        }
        let repository = self.repository(ctx)?;
        let total = repository.count(filters.clone()).await?;
        filters.push(Filter::limit_offset(limit, offset));
        let items = repository.list(filters).await?;

        Ok(OffsetPagination {
            items,
            limit,
            offset,
            total,
        })
    }
}

impl<R: Repository> Clone for GenericController<R> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            params: self.params.clone(),
            _repository: PhantomData,
        }
    }
}

impl<R: Repository> std::fmt::Debug for GenericController<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenericController")
            .field("model", &std::any::type_name::<R::Model>())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
