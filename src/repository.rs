use crate::error::RepositoryError;
use crate::models::Vehicle;

/// Generic CRUD capability keyed by `ID` over entities of type `T`.
///
/// Lookups and mutations that find no row for the id return `Ok(None)`.
pub trait CrudRepository<ID, T> {
    type Error;

    /// Stores a new entity and returns a copy carrying the store-assigned id.
    fn create(&self, entity: &T) -> Result<T, Self::Error>;

    fn get_by_id(&self, id: ID) -> Result<Option<T>, Self::Error>;

    /// Every stored entity, in whatever order the store yields them.
    fn get_all(&self) -> Result<Vec<T>, Self::Error>;

    fn update(&self, id: ID, entity: &T) -> Result<Option<T>, Self::Error>;

    /// Removes the entity and returns the snapshot taken before removal.
    fn delete(&self, id: ID) -> Result<Option<T>, Self::Error>;
}

/// CRUD over vehicles keyed by their integer id.
pub trait VehicleRepository: CrudRepository<i64, Vehicle, Error = RepositoryError> {}

impl<R> VehicleRepository for R where R: CrudRepository<i64, Vehicle, Error = RepositoryError> {}
