//! # Meshestra CRUD
//!
//! Generic CRUD controllers for axum applications.
//!
//! A [`GenericController`] maps create/read/update/delete and their bulk
//! variants onto any type implementing [`Repository`]. The controller owns no
//! storage: it builds a repository handle per call from the current
//! [`RequestContext`], delegates, and returns whatever the repository produced.
//!
//! ## Features
//!
//! - **One async contract**: repositories implement [`Repository`]; blocking
//!   storage implements [`SyncRepository`] and is served through [`Synchronous`]
//! - **Typed partial updates**: `#[derive(Record)]` generates field-by-field
//!   assignment with unknown and read-only fields rejected
//! - **Any identifier kind**: text, integer or UUID ids, fixed per controller
//! - **Drop-in routes**: [`GenericController::mount`] nests the full route table
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use meshestra_crud::prelude::*;
//!
//! #[derive(Clone, Serialize, Deserialize, Record)]
//! pub struct User {
//!     pub id: i64,
//!     pub name: String,
//! }
//!
//! pub struct UserRepository { /* pool, request context */ }
//!
//! #[async_trait]
//! impl Repository for UserRepository {
//!     type Model = User;
//!     type Id = i64;
//!     type Error = CrudError;
//!     type Params = DbPool;
//!     // ...
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let users = Arc::new(GenericController::<UserRepository>::with_config(
//!         ControllerConfig::new("/users"),
//!         DbPool::connect().await,
//!     ));
//!     let app: Router = users.mount(Router::new());
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```

// Lets `#[derive(Record)]` expand to `::meshestra_crud` paths inside this crate too.
extern crate self as meshestra_crud;

pub mod common;
pub mod config;
pub mod context;
pub mod controller;
pub mod error;
pub mod record;
pub mod repository;

// Re-export core types
pub use common::{ApiResponse, OffsetPagination};
pub use config::ControllerConfig;
pub use context::RequestContext;
pub use controller::{GenericController, ItemIds, ListQuery};
pub use error::{CrudError, Result};
pub use record::{FieldMap, IdKind, PatchError, Record, RecordId};
pub use repository::{
    CollectionFilter, Filter, LimitOffset, OrderBy, Repository, RepositoryArgs, SortOrder,
    SyncRepository, Synchronous,
};

// Re-export macros
pub use meshestra_crud_macro::Record;

// Re-export commonly used types from dependencies
pub use async_trait::async_trait;
pub use axum;

#[doc(hidden)]
pub mod __private {
    pub use serde_json;
}

/// Prelude module for convenient imports
///
/// ```
/// use meshestra_crud::prelude::*;
/// ```
pub mod prelude {
    pub use crate::common::{ApiResponse, OffsetPagination, StatusCode};
    pub use crate::config::ControllerConfig;
    pub use crate::context::RequestContext;
    pub use crate::controller::{GenericController, ItemIds, ListQuery};
    pub use crate::error::{CrudError, Result};
    pub use crate::Record;
    pub use crate::record::{FieldMap, IdKind, PatchError, RecordId};
    pub use crate::repository::{
        CollectionFilter, Filter, LimitOffset, OrderBy, Repository, RepositoryArgs, SortOrder,
        SyncRepository, Synchronous,
    };
    pub use async_trait::async_trait;
    pub use axum::{Json, Router};
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
}
