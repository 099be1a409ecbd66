#![allow(dead_code)]

use meshestra_crud::{
    CrudError, FieldMap, Filter, PatchError, Record, Repository, RepositoryArgs, SortOrder,
    SyncRepository, async_trait,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[record(readonly)]
    pub created_by: String,
}

pub fn user(id: i64, name: &str) -> User {
    User {
        id,
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        created_by: "seed".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
pub struct Tag {
    #[record(id)]
    pub key: Uuid,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
pub struct Page {
    #[record(id)]
    pub slug: String,
    pub title: String,
}

pub fn page(slug: &str, title: &str) -> Page {
    Page {
        slug: slug.to_string(),
        title: title.to_string(),
    }
}

pub fn field_map(value: Value) -> FieldMap {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Every repository call the stubs receive, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Call<M: Record> {
    Add(M),
    AddMany(Vec<M>),
    Get(M::Id),
    Update(M),
    UpdateMany(Vec<FieldMap>),
    Delete(M::Id),
    DeleteMany(Vec<M::Id>),
    List(Vec<Filter<M::Id>>),
    Count(Vec<Filter<M::Id>>),
}

struct State<M: Record> {
    records: Vec<M>,
    calls: Vec<Call<M>>,
    handles: usize,
    request_ids: Vec<Uuid>,
}

/// Shared in-memory storage handed to the stub repositories as `Params`
pub struct MemoryStore<M: Record> {
    state: Arc<Mutex<State<M>>>,
}

impl<M: Record> Clone for MemoryStore<M> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<M: Record> MemoryStore<M> {
    pub fn new() -> Self {
        Self::seeded(Vec::new())
    }

    pub fn seeded(records: Vec<M>) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                records,
                calls: Vec::new(),
                handles: 0,
                request_ids: Vec::new(),
            })),
        }
    }

    pub fn records(&self) -> Vec<M> {
        self.state.lock().unwrap().records.clone()
    }

    pub fn calls(&self) -> Vec<Call<M>> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Number of repository handles constructed so far
    pub fn handles(&self) -> usize {
        self.state.lock().unwrap().handles
    }

    pub fn request_ids(&self) -> Vec<Uuid> {
        self.state.lock().unwrap().request_ids.clone()
    }

    fn open(&self, args: &RepositoryArgs<MemoryStore<M>>) {
        let mut state = self.state.lock().unwrap();
        state.handles += 1;
        state.request_ids.push(args.request.request_id());
    }

    fn record(&self, call: Call<M>) {
        self.state.lock().unwrap().calls.push(call);
    }

    fn add(&self, data: M) -> Result<M, CrudError> {
        self.record(Call::Add(data.clone()));
        self.insert(data)
    }

    fn insert(&self, data: M) -> Result<M, CrudError> {
        let mut state = self.state.lock().unwrap();
        if state.records.iter().any(|r| r.id() == data.id()) {
            return Err(CrudError::conflict(format!("duplicate id {}", data.id())));
        }
        state.records.push(data.clone());
        Ok(data)
    }

    fn add_many(&self, data: Vec<M>) -> Result<Vec<M>, CrudError> {
        self.record(Call::AddMany(data.clone()));
        data.into_iter().map(|item| self.insert(item)).collect()
    }

    fn get(&self, item_id: M::Id) -> Result<M, CrudError> {
        self.record(Call::Get(item_id.clone()));
        self.find(&item_id)
    }

    fn find(&self, item_id: &M::Id) -> Result<M, CrudError> {
        let state = self.state.lock().unwrap();
        state
            .records
            .iter()
            .find(|r| r.id() == item_id)
            .cloned()
            .ok_or_else(|| CrudError::not_found(item_id))
    }

    fn update(&self, data: M) -> Result<M, CrudError> {
        self.record(Call::Update(data.clone()));
        self.replace(data)
    }

    fn replace(&self, data: M) -> Result<M, CrudError> {
        let mut state = self.state.lock().unwrap();
        let slot = state
            .records
            .iter_mut()
            .find(|r| r.id() == data.id())
            .ok_or_else(|| CrudError::not_found(data.id()))?;
        *slot = data.clone();
        Ok(data)
    }

    fn update_many(&self, data: Vec<FieldMap>) -> Result<Vec<M>, CrudError> {
        self.record(Call::UpdateMany(data.clone()));
        data.into_iter()
            .map(|mut patch| {
                let id_value = patch
                    .remove(M::ID_FIELD)
                    .ok_or_else(|| PatchError::invalid_value(M::ID_FIELD, "missing"))?;
                let item_id: M::Id = serde_json::from_value(id_value)
                    .map_err(|e| PatchError::invalid_value(M::ID_FIELD, e))?;
                let mut instance = self.find(&item_id)?;
                instance.apply_patch(patch)?;
                self.replace(instance)
            })
            .collect()
    }

    fn delete(&self, item_id: M::Id) -> Result<M, CrudError> {
        self.record(Call::Delete(item_id.clone()));
        self.remove(&item_id)
    }

    fn remove(&self, item_id: &M::Id) -> Result<M, CrudError> {
        let mut state = self.state.lock().unwrap();
        let index = state
            .records
            .iter()
            .position(|r| r.id() == item_id)
            .ok_or_else(|| CrudError::not_found(item_id))?;
        Ok(state.records.remove(index))
    }

    fn delete_many(&self, item_ids: Vec<M::Id>) -> Result<Vec<M>, CrudError> {
        self.record(Call::DeleteMany(item_ids.clone()));
        for item_id in &item_ids {
            self.find(item_id)?;
        }
        item_ids.iter().map(|item_id| self.remove(item_id)).collect()
    }

    fn list(&self, filters: Vec<Filter<M::Id>>) -> Result<Vec<M>, CrudError> {
        self.record(Call::List(filters.clone()));
        self.select(filters)
    }

    fn count(&self, filters: Vec<Filter<M::Id>>) -> Result<usize, CrudError> {
        self.record(Call::Count(filters.clone()));
        let filters = filters.into_iter().filter(|f| !f.is_pagination()).collect();
        Ok(self.select(filters)?.len())
    }

    fn select(&self, filters: Vec<Filter<M::Id>>) -> Result<Vec<M>, CrudError> {
        let mut rows: Vec<(Value, M)> = self
            .records()
            .into_iter()
            .map(|r| -> Result<(Value, M), CrudError> {
                Ok((serde_json::to_value(&r).map_err(anyhow::Error::from)?, r))
            })
            .collect::<Result<_, CrudError>>()?;

        for filter in filters {
            match filter {
                Filter::Collection(collection) => {
                    let wanted = collection
                        .values
                        .iter()
                        .map(serde_json::to_value)
                        .collect::<Result<Vec<_>, _>>()
                        .map_err(anyhow::Error::from)?;
                    rows.retain(|(json, _)| {
                        json.get(&collection.field_name)
                            .is_some_and(|value| wanted.contains(value))
                    });
                }
                Filter::OrderBy(order) => {
                    rows.sort_by(|(a, _), (b, _)| {
                        let ordering =
                            compare(a.get(&order.field_name), b.get(&order.field_name));
                        match order.sort_order {
                            SortOrder::Asc => ordering,
                            SortOrder::Desc => ordering.reverse(),
                        }
                    });
                }
                Filter::LimitOffset(window) => {
                    rows = rows
                        .into_iter()
                        .skip(window.offset)
                        .take(window.limit)
                        .collect();
                }
            }
        }
        Ok(rows.into_iter().map(|(_, r)| r).collect())
    }
}

fn compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        _ => Ordering::Equal,
    }
}

/// Asynchronous stub: yields to the runtime before answering
pub struct AsyncRepository<M: Record> {
    store: MemoryStore<M>,
}

#[async_trait]
impl<M: Record> Repository for AsyncRepository<M> {
    type Model = M;
    type Id = M::Id;
    type Error = CrudError;
    type Params = MemoryStore<M>;

    fn new(args: RepositoryArgs<Self::Params>) -> Result<Self, Self::Error> {
        args.params.open(&args);
        Ok(Self { store: args.params })
    }

    async fn add(&self, data: M) -> Result<M, CrudError> {
        tokio::task::yield_now().await;
        self.store.add(data)
    }

    async fn add_many(&self, data: Vec<M>) -> Result<Vec<M>, CrudError> {
        tokio::task::yield_now().await;
        self.store.add_many(data)
    }

    async fn get(&self, item_id: M::Id) -> Result<M, CrudError> {
        tokio::task::yield_now().await;
        self.store.get(item_id)
    }

    async fn update(&self, data: M) -> Result<M, CrudError> {
        tokio::task::yield_now().await;
        self.store.update(data)
    }

    async fn update_many(&self, data: Vec<FieldMap>) -> Result<Vec<M>, CrudError> {
        tokio::task::yield_now().await;
        self.store.update_many(data)
    }

    async fn delete(&self, item_id: M::Id) -> Result<M, CrudError> {
        tokio::task::yield_now().await;
        self.store.delete(item_id)
    }

    async fn delete_many(&self, item_ids: Vec<M::Id>) -> Result<Vec<M>, CrudError> {
        tokio::task::yield_now().await;
        self.store.delete_many(item_ids)
    }

    async fn list(&self, filters: Vec<Filter<M::Id>>) -> Result<Vec<M>, CrudError> {
        tokio::task::yield_now().await;
        self.store.list(filters)
    }

    async fn count(&self, filters: Vec<Filter<M::Id>>) -> Result<usize, CrudError> {
        tokio::task::yield_now().await;
        self.store.count(filters)
    }
}

/// Synchronous stub, served through `Synchronous`
pub struct BlockingRepository<M: Record> {
    store: MemoryStore<M>,
}

impl<M: Record> SyncRepository for BlockingRepository<M> {
    type Model = M;
    type Id = M::Id;
    type Error = CrudError;
    type Params = MemoryStore<M>;

    fn new(args: RepositoryArgs<Self::Params>) -> Result<Self, Self::Error> {
        args.params.open(&args);
        Ok(Self { store: args.params })
    }

    fn add(&self, data: M) -> Result<M, CrudError> {
        self.store.add(data)
    }

    fn add_many(&self, data: Vec<M>) -> Result<Vec<M>, CrudError> {
        self.store.add_many(data)
    }

    fn get(&self, item_id: M::Id) -> Result<M, CrudError> {
        self.store.get(item_id)
    }

    fn update(&self, data: M) -> Result<M, CrudError> {
        self.store.update(data)
    }

    fn update_many(&self, data: Vec<FieldMap>) -> Result<Vec<M>, CrudError> {
        self.store.update_many(data)
    }

    fn delete(&self, item_id: M::Id) -> Result<M, CrudError> {
        self.store.delete(item_id)
    }

    fn delete_many(&self, item_ids: Vec<M::Id>) -> Result<Vec<M>, CrudError> {
        self.store.delete_many(item_ids)
    }

    fn list(&self, filters: Vec<Filter<M::Id>>) -> Result<Vec<M>, CrudError> {
        self.store.list(filters)
    }
}
