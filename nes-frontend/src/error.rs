use nes_director::DirectorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrontendError {
    #[error("SDL error: {0}")]
    Sdl(String),
    #[error(transparent)]
    Director(#[from] DirectorError),
}

impl From<String> for FrontendError {
    fn from(message: String) -> Self {
        FrontendError::Sdl(message)
    }
}
