//! Domain API modules.
//!
//! Each function maps one operation to a method, a path and a body or query,
//! and hands it to [ApiClient](crate::ApiClient). There are no retries,
//! validation or caching here.

mod collection;
mod explore;
mod home;
mod note;
mod user;

pub use collection::CollectionApi;
pub use explore::ExploreApi;
pub use home::HomeApi;
pub use note::NoteApi;
pub use user::UserApi;
