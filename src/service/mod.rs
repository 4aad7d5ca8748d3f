//! CrudService: generic CRUD using the safe SQL builder through a [`Store`](crate::store::Store).

mod crud;
pub use crud::{CrudService, NO_ROWS};
