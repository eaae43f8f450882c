/// Failure of the object store itself.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("network error: {0}")]
    Network(String),
    #[error("storage rejected upload ({0}): {1}")]
    Rejected(u16, String),
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("El archivo supera {0}MB")]
    SizeExceeded(u64),
    #[error("Tipo no permitido: {0}")]
    TypeNotAllowed(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}
