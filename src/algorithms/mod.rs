pub mod a_star;
pub mod beam;
pub mod bfs;
pub mod bidirectional;
pub mod common;
pub mod dfs;
pub mod greedy;

use crate::error::{Result, SearchError};
use a_star::AStar;
use beam::Beam;
use bfs::BreadthFirst;
use bidirectional::Bidirectional;
use common::SearchStrategy;
use dfs::DepthFirst;
use greedy::GreedyBestFirst;
use std::fmt;
use std::str::FromStr;

/// The six selectable strategies, keyed by their short codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    BreadthFirst,
    DepthFirst,
    AStar,
    GreedyBestFirst,
    Bidirectional,
    Beam,
}

impl Method {
    pub const ALL: [Method; 6] = [
        Method::BreadthFirst,
        Method::DepthFirst,
        Method::AStar,
        Method::GreedyBestFirst,
        Method::Bidirectional,
        Method::Beam,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Method::BreadthFirst => "bfs",
            Method::DepthFirst => "dfs",
            Method::AStar => "astar",
            Method::GreedyBestFirst => "gbfs",
            Method::Bidirectional => "bdfs",
            Method::Beam => "bs",
        }
    }

    pub fn full_name(self) -> &'static str {
        match self {
            Method::BreadthFirst => "Breadth First Search",
            Method::DepthFirst => "Depth First Search",
            Method::AStar => "A* Search",
            Method::GreedyBestFirst => "Greedy Best First Search",
            Method::Bidirectional => "Bidirectional Search",
            Method::Beam => "Beam Search",
        }
    }

    /// Builds the strategy. `beam_width` only matters for [`Method::Beam`].
    pub fn build(self, beam_width: usize) -> Result<Box<dyn SearchStrategy>> {
        let strategy: Box<dyn SearchStrategy> = match self {
            Method::BreadthFirst => Box::new(BreadthFirst::new()),
            Method::DepthFirst => Box::new(DepthFirst::new()),
            Method::AStar => Box::new(AStar::new()),
            Method::GreedyBestFirst => Box::new(GreedyBestFirst::new()),
            Method::Bidirectional => Box::new(Bidirectional::new()),
            Method::Beam => Box::new(Beam::new(beam_width)?),
        };
        Ok(strategy)
    }
}

impl FromStr for Method {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" => Ok(Method::BreadthFirst),
            "dfs" => Ok(Method::DepthFirst),
            "astar" => Ok(Method::AStar),
            "gbfs" => Ok(Method::GreedyBestFirst),
            "bdfs" | "bds" => Ok(Method::Bidirectional),
            "bs" => Ok(Method::Beam),
            _ => Err(SearchError::UnknownStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Converts a user supplied beam width, rejecting anything below one.
pub fn beam_width(raw: i64) -> Result<usize> {
    usize::try_from(raw)
        .ok()
        .filter(|&width| width > 0)
        .ok_or(SearchError::InvalidBeamWidth(raw))
}
