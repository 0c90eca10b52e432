use duewatch_domain::{Versioned, ID};
use duewatch_infra::IVersionedRepo;
use tracing::warn;

const MAX_WRITE_ATTEMPTS: usize = 8;

#[derive(Debug)]
pub enum WriteError<E> {
    NotFound,
    /// The mutation refused the change, nothing was written
    Rejected(E),
    StorageError,
    /// Every attempt lost the compare and swap
    Contention,
}

/// Reads the entity, applies `mutation` and writes it back with compare and
/// swap on its version. A lost race re-reads and re-applies the mutation.
pub async fn write_with_retry<T, R, E, O, F>(
    repo: &R,
    id: &ID,
    mut mutation: F,
) -> Result<(T, O), WriteError<E>>
where
    T: Versioned,
    R: IVersionedRepo<T> + ?Sized,
    F: FnMut(&mut T) -> Result<O, E>,
{
    for _ in 0..MAX_WRITE_ATTEMPTS {
        let mut entity = repo.find(id).await.ok_or(WriteError::NotFound)?;
        let expected_version = entity.version();
        let output = mutation(&mut entity).map_err(WriteError::Rejected)?;

        match repo.compare_and_swap(expected_version, &entity).await {
            Ok(Some(saved)) => return Ok((saved, output)),
            Ok(None) => continue,
            Err(e) => {
                warn!("Unable to write entity {}: {:?}", id, e);
                return Err(WriteError::StorageError);
            }
        }
    }

    warn!(
        "Gave up writing entity {} after {} conflicting attempts",
        id, MAX_WRITE_ATTEMPTS
    );
    Err(WriteError::Contention)
}
