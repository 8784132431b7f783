use crate::algorithms::Method;
use std::fmt;

/// Outcome of one strategy on one maze file.
#[derive(Debug, Clone)]
pub struct RunRecord {
    pub test_name: String,
    pub method: Method,
    pub passed: bool,
    pub error: Option<String>,
    pub time_ms: f64,
    pub nodes_explored: usize,
    /// Positions on the returned path, 0 when nothing was found.
    pub path_length: usize,
    /// Shortest possible number of moves, when a goal is reachable at all.
    pub reference_moves: Option<usize>,
    pub memory_kb: f64,
}

impl RunRecord {
    pub fn failed(test_name: &str, method: Method, error: String) -> Self {
        RunRecord {
            test_name: test_name.to_string(),
            method,
            passed: false,
            error: Some(error),
            time_ms: 0.0,
            nodes_explored: 0,
            path_length: 0,
            reference_moves: None,
            memory_kb: 0.0,
        }
    }

    /// Moves taken over the shortest possible, 1.0 being optimal.
    pub fn route_efficiency(&self) -> Option<f64> {
        match self.reference_moves {
            Some(best) if best > 0 && self.path_length > 0 => {
                Some((self.path_length - 1) as f64 / best as f64)
            }
            _ => None,
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Per-method aggregate over a suite run.
#[derive(Debug, Clone)]
pub struct MethodSummary {
    pub method: Method,
    pub total_tests: usize,
    pub passed: usize,
    pub failed: usize,
    pub avg_time_ms: f64,
    pub avg_nodes: f64,
    pub avg_path_length: f64,
    pub avg_memory_kb: f64,
    /// Mean of [`RunRecord::route_efficiency`] over runs that have one.
    pub avg_route_efficiency: Option<f64>,
    pub failed_tests: Vec<String>,
}

impl MethodSummary {
    pub fn from_records<'a>(method: Method, records: impl IntoIterator<Item = &'a RunRecord>) -> Self {
        let records: Vec<&RunRecord> = records
            .into_iter()
            .filter(|r| r.method == method)
            .collect();
        let timed: Vec<&RunRecord> = records.iter().copied().filter(|r| r.time_ms > 0.0).collect();
        let passed = records.iter().filter(|r| r.passed).count();
        let efficiencies: Vec<f64> = records.iter().filter_map(|r| r.route_efficiency()).collect();

        MethodSummary {
            method,
            total_tests: records.len(),
            passed,
            failed: records.len() - passed,
            avg_time_ms: mean(timed.iter().map(|r| r.time_ms)),
            avg_nodes: mean(timed.iter().map(|r| r.nodes_explored as f64)),
            avg_path_length: mean(
                timed
                    .iter()
                    .filter(|r| r.path_length > 0)
                    .map(|r| r.path_length as f64),
            ),
            avg_memory_kb: mean(timed.iter().map(|r| r.memory_kb)),
            avg_route_efficiency: (!efficiencies.is_empty())
                .then(|| mean(efficiencies.iter().copied())),
            failed_tests: records
                .iter()
                .filter(|r| !r.passed)
                .map(|r| r.test_name.clone())
                .collect(),
        }
    }
}

impl fmt::Display for MethodSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let efficiency = self
            .avg_route_efficiency
            .map(|e| format!("{:.2}", e))
            .unwrap_or_else(|| "-".to_string());
        write!(
            f,
            "{:<26} {:>6} {:>7} {:>7} {:>14.2} {:>10.1} {:>16.1} {:>16.2} {:>11}",
            self.method.full_name(),
            self.total_tests,
            self.passed,
            self.failed,
            self.avg_time_ms,
            self.avg_nodes,
            self.avg_path_length,
            self.avg_memory_kb,
            efficiency
        )
    }
}

/// Min/max spread of one method's timed runs.
#[derive(Debug, Clone)]
pub struct PerformanceRange {
    pub method: Method,
    pub min_time_ms: f64,
    pub max_time_ms: f64,
    pub min_nodes: usize,
    pub max_nodes: usize,
    pub min_memory_kb: f64,
    pub max_memory_kb: f64,
}

impl PerformanceRange {
    pub fn from_records<'a>(
        method: Method,
        records: impl IntoIterator<Item = &'a RunRecord>,
    ) -> Option<Self> {
        let timed: Vec<&RunRecord> = records
            .into_iter()
            .filter(|r| r.method == method && r.time_ms > 0.0)
            .collect();
        if timed.is_empty() {
            return None;
        }

        let times = timed.iter().map(|r| r.time_ms);
        let memory = timed.iter().map(|r| r.memory_kb);
        Some(PerformanceRange {
            method,
            min_time_ms: times.clone().fold(f64::INFINITY, f64::min),
            max_time_ms: times.fold(f64::NEG_INFINITY, f64::max),
            min_nodes: timed.iter().map(|r| r.nodes_explored).min().unwrap_or(0),
            max_nodes: timed.iter().map(|r| r.nodes_explored).max().unwrap_or(0),
            min_memory_kb: memory.clone().fold(f64::INFINITY, f64::min),
            max_memory_kb: memory.fold(f64::NEG_INFINITY, f64::max),
        })
    }
}

impl fmt::Display for PerformanceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<26} {:>13.2} {:>13.2} {:>9} {:>9} {:>15.2} {:>15.2}",
            self.method.full_name(),
            self.min_time_ms,
            self.max_time_ms,
            self.min_nodes,
            self.max_nodes,
            self.min_memory_kb,
            self.max_memory_kb
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(method: Method, passed: bool, time_ms: f64, nodes: usize, path: usize) -> RunRecord {
        RunRecord {
            test_name: format!("test{}.txt", nodes),
            method,
            passed,
            error: None,
            time_ms,
            nodes_explored: nodes,
            path_length: path,
            reference_moves: None,
            memory_kb: 4.0,
        }
    }

    #[test]
    fn summary_averages_only_timed_runs_of_its_method() {
        let records = vec![
            record(Method::BreadthFirst, true, 2.0, 10, 5),
            record(Method::BreadthFirst, false, 4.0, 20, 0),
            record(Method::BreadthFirst, false, 0.0, 0, 0),
            record(Method::AStar, true, 100.0, 99, 9),
        ];
        let summary = MethodSummary::from_records(Method::BreadthFirst, &records);
        assert_eq!(summary.total_tests, 3);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.avg_time_ms, 3.0);
        assert_eq!(summary.avg_nodes, 15.0);
        // only runs that found a path count toward the path length
        assert_eq!(summary.avg_path_length, 5.0);
        assert_eq!(summary.failed_tests, vec!["test20.txt", "test0.txt"]);
        assert_eq!(summary.avg_route_efficiency, None);
    }

    #[test]
    fn summary_averages_route_efficiency() {
        let mut optimal = record(Method::DepthFirst, true, 1.0, 10, 5);
        optimal.reference_moves = Some(4);
        let mut detour = record(Method::DepthFirst, true, 1.0, 12, 9);
        detour.reference_moves = Some(4);
        let summary = MethodSummary::from_records(Method::DepthFirst, &[optimal, detour]);
        assert_eq!(summary.avg_route_efficiency, Some(1.5));
        assert!(summary.to_string().ends_with("1.50"));
    }

    #[test]
    fn range_is_none_without_timed_runs() {
        let records = vec![record(Method::Beam, false, 0.0, 0, 0)];
        assert!(PerformanceRange::from_records(Method::Beam, &records).is_none());
    }

    #[test]
    fn range_tracks_extremes() {
        let records = vec![
            record(Method::DepthFirst, true, 1.5, 7, 3),
            record(Method::DepthFirst, true, 0.5, 30, 3),
        ];
        let range = PerformanceRange::from_records(Method::DepthFirst, &records).unwrap();
        assert_eq!((range.min_time_ms, range.max_time_ms), (0.5, 1.5));
        assert_eq!((range.min_nodes, range.max_nodes), (7, 30));
    }

    #[test]
    fn efficiency_compares_moves_to_reference() {
        let mut r = record(Method::DepthFirst, true, 1.0, 12, 11);
        r.reference_moves = Some(5);
        assert_eq!(r.route_efficiency(), Some(2.0));
        r.path_length = 0;
        assert_eq!(r.route_efficiency(), None);
    }
}
