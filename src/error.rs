use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building a grid or selecting a search strategy.
///
/// Searching itself never fails: an exhausted frontier is reported through
/// [`crate::algorithms::common::SearchResult::found`].
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Invalid maze configuration: {0}")]
    Configuration(String),

    #[error("{item} is out of bounds. Grid size is {cols}x{rows}")]
    OutOfBounds {
        item: String,
        rows: usize,
        cols: usize,
    },

    #[error("Unknown search method '{0}'\nAvailable methods: bfs, dfs, astar, gbfs, bdfs, bs")]
    UnknownStrategy(String),

    #[error("Beam width must be a positive integer, got {0}")]
    InvalidBeamWidth(i64),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SearchError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SearchError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_names_item_and_size() {
        let err = SearchError::OutOfBounds {
            item: "Goal position (7, 1)".to_string(),
            rows: 5,
            cols: 6,
        };
        assert_eq!(
            err.to_string(),
            "Goal position (7, 1) is out of bounds. Grid size is 6x5"
        );
    }

    #[test]
    fn unknown_strategy_lists_methods() {
        let msg = SearchError::UnknownStrategy("dijkstra".into()).to_string();
        assert!(msg.starts_with("Unknown search method 'dijkstra'"));
        assert!(msg.contains("bdfs"));
    }
}
