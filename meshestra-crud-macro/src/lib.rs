use proc_macro::TokenStream;

mod record;

/// Derive macro implementing `meshestra_crud::Record` for a struct with named fields
///
/// The identifier field is the one marked `#[record(id)]`, or the field called `id`.
/// Every other field accepts partial updates unless marked `#[record(readonly)]`.
///
/// # Example
/// ```ignore
/// use meshestra_crud::Record;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Serialize, Deserialize, Record)]
/// pub struct Product {
///     #[record(id)]
///     pub sku: String,
///     pub name: String,
///     pub price: f64,
///     #[record(readonly)]
///     pub created_by: String,
/// }
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive_record(input)
}
