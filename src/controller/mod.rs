//! The generic record controller and its axum route table.
//!
//! [`GenericController`] holds the operations; `routes` maps them onto HTTP verbs:
//!
//! | Route | Operation |
//! |---|---|
//! | `POST /` | [`create_instance`](GenericController::create_instance) |
//! | `GET /` | [`list_instances`](GenericController::list_instances) |
//! | `PATCH /` | [`update_many`](GenericController::update_many) |
//! | `DELETE /` | [`delete_many`](GenericController::delete_many) |
//! | `POST /-/bulk` | [`create_many`](GenericController::create_many) |
//! | `POST /-/lookup` | [`get_many`](GenericController::get_many) |
//! | `GET /{id}` | [`get_instance`](GenericController::get_instance) |
//! | `PATCH /{id}` | [`update_instance`](GenericController::update_instance) |
//! | `DELETE /{id}` | [`delete_instance`](GenericController::delete_instance) |
//!
//! Nothing but `/{id}` uses a single path segment, so every id stays reachable.

mod generic;
mod routes;

pub use generic::{GenericController, ItemIds, ListQuery};
