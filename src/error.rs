use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the library half of the crate. The interactive layer
/// wraps these in `anyhow` and reports them without leaving the menu.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{}", .0)]
    Validation(String),

    #[error("An employee cannot be their own manager")]
    SelfManager,

    #[error("No {} with id {} exists", .entity, .id)]
    NotFound { entity: &'static str, id: i32 },

    #[error("Configuration error: {}", .0)]
    Config(String),

    #[error("Database error: {}", .0)]
    Db(#[from] sqlx::Error),
}

impl Error {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        Self::NotFound { entity, id }
    }
}
