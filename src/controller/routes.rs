use super::generic::{GenericController, ItemIds, ListQuery};
use crate::common::ApiResponse;
use crate::context::RequestContext;
use crate::record::FieldMap;
use crate::repository::Repository;
use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{patch, post},
};
use std::sync::Arc;

impl<R> GenericController<R>
where
    R: Repository,
    R::Error: IntoResponse,
{
    /// Axum routes for every operation, relative to the controller's base path
    ///
    /// Bulk creation and lookup live under the `-` segment so that no static
    /// route shadows a record id on `/{id}`.
    pub fn router<S>(self: Arc<Self>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        let controller = self;
        Router::new()
            .route(
                "/",
                post({
                    let controller = controller.clone();
                    move |ctx: RequestContext, Json(data): Json<R::Model>| {
                        let controller = controller.clone();
                        async move {
                            controller
                                .create_instance(&ctx, data)
                                .await
                                .map(ApiResponse::created)
                        }
                    }
                })
                .get({
                    let controller = controller.clone();
                    move |ctx: RequestContext, Query(query): Query<ListQuery>| {
                        let controller = controller.clone();
                        async move {
                            controller
                                .list_instances(&ctx, query)
                                .await
                                .map(ApiResponse::success)
                        }
                    }
                })
                .patch({
                    let controller = controller.clone();
                    move |ctx: RequestContext, Json(data): Json<Vec<FieldMap>>| {
                        let controller = controller.clone();
                        async move {
                            controller
                                .update_many(&ctx, data)
                                .await
                                .map(ApiResponse::success)
                        }
                    }
                })
                .delete({
                    let controller = controller.clone();
                    move |ctx: RequestContext, Json(data): Json<ItemIds<R::Id>>| {
                        let controller = controller.clone();
                        async move {
                            controller
                                .delete_many(&ctx, data)
                                .await
                                .map(|()| StatusCode::NO_CONTENT)
                        }
                    }
                }),
            )
            .route(
                "/-/bulk",
                post({
                    let controller = controller.clone();
                    move |ctx: RequestContext, Json(data): Json<Vec<R::Model>>| {
                        let controller = controller.clone();
                        async move {
                            controller
                                .create_many(&ctx, data)
                                .await
                                .map(ApiResponse::created)
                        }
                    }
                }),
            )
            .route(
                "/-/lookup",
                post({
                    let controller = controller.clone();
                    move |ctx: RequestContext, Json(data): Json<ItemIds<R::Id>>| {
                        let controller = controller.clone();
                        async move {
                            controller
                                .get_many(&ctx, data)
                                .await
                                .map(ApiResponse::success)
                        }
                    }
                }),
            )
            .route(
                "/{id}",
                patch({
                    let controller = controller.clone();
                    move |ctx: RequestContext,
                          Path(id): Path<R::Id>,
                          Json(data): Json<FieldMap>| {
                        let controller = controller.clone();
                        async move {
                            controller
                                .update_instance(&ctx, id, data)
                                .await
                                .map(ApiResponse::success)
                        }
                    }
                })
                .get({
                    let controller = controller.clone();
                    move |ctx: RequestContext, Path(id): Path<R::Id>| {
                        let controller = controller.clone();
                        async move {
                            controller
                                .get_instance(&ctx, id)
                                .await
                                .map(ApiResponse::success)
                        }
                    }
                })
                .delete({
                    let controller = controller.clone();
                    move |ctx: RequestContext, Path(id): Path<R::Id>| {
                        let controller = controller.clone();
                        async move {
                            controller
                                .delete_instance(&ctx, id)
                                .await
                                .map(|()| StatusCode::NO_CONTENT)
                        }
                    }
                }),
            )
    }

    /// Attach [`router`](Self::router) to `router` under the configured path
    ///
    /// The path gains a leading slash if it lacks one.
    pub fn mount<S>(self: Arc<Self>, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        let path = self.config().mount_path();
        tracing::info!(path = %path, "mounting generic controller");
        if path.is_empty() {
            router.merge(self.router())
        } else {
            router.nest(&path, self.router())
        }
    }
}
