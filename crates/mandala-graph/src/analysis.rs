//! Per-node analysis rows.
//!
//! [`analyze`] runs all four centrality metrics over a [`MandalaGraph`] and
//! joins them into one [`CentralityRow`] per node, in construction order.
//! Scores keep full precision here; rounding happens only at the export
//! boundary ([`CentralityRow::rounded`], [`crate::export`]).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::graph::MandalaGraph;
use crate::metrics::betweenness::betweenness_scores;
use crate::metrics::closeness::closeness_scores;
use crate::metrics::degree::degree_scores;
use crate::metrics::eigenvector::{DEFAULT_ITERATIONS, power_iteration};

/// One of the four centrality metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Degree,
    Closeness,
    Betweenness,
    Eigenvector,
}

impl Metric {
    pub const ALL: [Self; 4] = [
        Self::Degree,
        Self::Closeness,
        Self::Betweenness,
        Self::Eigenvector,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Degree => "degree",
            Self::Closeness => "closeness",
            Self::Betweenness => "betweenness",
            Self::Eigenvector => "eigenvector",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!("unknown metric '{s}': expected degree, closeness, betweenness or eigenvector")
            })
    }
}

/// Analysis of a single node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralityRow {
    pub id: String,
    pub layer: usize,
    pub degree: usize,
    pub closeness: f64,
    pub betweenness: f64,
    pub eigenvector: f64,
}

impl CentralityRow {
    /// Value of `metric` for this row.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Degree => self.degree as f64,
            Metric::Closeness => self.closeness,
            Metric::Betweenness => self.betweenness,
            Metric::Eigenvector => self.eigenvector,
        }
    }

    /// Copy with every float rounded to `precision` decimal places.
    #[must_use]
    pub fn rounded(&self, precision: usize) -> Self {
        Self {
            id: self.id.clone(),
            layer: self.layer,
            degree: self.degree,
            closeness: round_to(self.closeness, precision),
            betweenness: round_to(self.betweenness, precision),
            eigenvector: round_to(self.eigenvector, precision),
        }
    }
}

/// All rows for one graph plus how the eigenvector iteration ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralityReport {
    pub rows: Vec<CentralityRow>,
    pub eigenvector_iterations: usize,
    /// True when the graph has no edges and eigenvector scores stayed at 1.0.
    pub eigenvector_degenerate: bool,
}

impl CentralityReport {
    #[must_use]
    pub fn row(&self, id: &str) -> Option<&CentralityRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    /// Rows ordered by `metric`, highest first. Ties keep construction order.
    #[must_use]
    pub fn sorted_by(&self, metric: Metric) -> Vec<CentralityRow> {
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| b.metric(metric).total_cmp(&a.metric(metric)));
        rows
    }

    /// The `n` highest-scoring rows by `metric`.
    #[must_use]
    pub fn top(&self, metric: Metric, n: usize) -> Vec<CentralityRow> {
        let mut rows = self.sorted_by(metric);
        rows.truncate(n);
        rows
    }
}

/// Round `value` to `precision` decimal places, half away from zero.
#[must_use]
pub fn round_to(value: f64, precision: usize) -> f64 {
    let Ok(exp) = i32::try_from(precision) else {
        return value;
    };
    let factor = 10f64.powi(exp);
    let scaled = (value * factor).round() / factor;
    if scaled.is_finite() { scaled } else { value }
}

/// Compute every centrality metric for `g`.
///
/// Rows follow node construction order: center first, then layers
/// outward.
#[must_use]
#[instrument(skip(g), fields(nodes = g.node_count(), edges = g.edge_count()))]
pub fn analyze(g: &MandalaGraph) -> CentralityReport {
    let adj = &g.adjacency;

    let degree = degree_scores(adj);
    let closeness = closeness_scores(adj);
    let betweenness = betweenness_scores(adj);
    let eigen = power_iteration(adj, DEFAULT_ITERATIONS);

    debug!(
        iterations = eigen.iterations,
        degenerate = eigen.degenerate,
        "eigenvector iteration finished"
    );

    let rows = g
        .nodes()
        .enumerate()
        .map(|(i, node)| CentralityRow {
            id: node.id.clone(),
            layer: node.layer,
            degree: degree[i],
            closeness: closeness[i],
            betweenness: betweenness[i],
            eigenvector: eigen.scores[i],
        })
        .collect();

    CentralityReport {
        rows,
        eigenvector_iterations: eigen.iterations,
        eigenvector_degenerate: eigen.degenerate,
    }
}
