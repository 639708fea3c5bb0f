/// Outcome of an insert guarded by a uniqueness constraint. Repositories
/// translate duplicate-key violations into `AlreadyExists` so use cases
/// never match on storage error codes.
#[derive(Debug, Clone, PartialEq)]
pub enum UniqueInsert<T> {
    Inserted(T),
    AlreadyExists,
}
