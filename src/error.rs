use crate::block_state::BlockSyntaxError;
use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::grid::GridError;
use crate::input::InputError;

/// Any failure that aborts a plot rebuild or viewer start-up.
#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    #[error(transparent)]
    Bounds(#[from] GridError),
    #[error(transparent)]
    Parse(#[from] InputError),
    #[error(transparent)]
    Lookup(#[from] CatalogError),
    #[error(transparent)]
    Syntax(#[from] BlockSyntaxError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, PlotError>;
