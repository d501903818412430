use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use coitrees::{BasicCOITree, Interval as TreeNode, IntervalTree};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::records::Position;

/// Closed genomic interval `[start, end]` with an optional region name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Interval {
    /// Lower coordinate (inclusive).
    pub start: Position,
    /// Upper coordinate (inclusive).
    pub end: Position,
    /// Region name (gene, exon id, ...).
    pub name: Option<Arc<str>>,
}

impl Interval {
    /// Construct an interval, ordering the endpoints so `start <= end`.
    pub fn new(a: Position, b: Position, name: Option<Arc<str>>) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
            name,
        }
    }

    /// Inclusive overlap test against `[lo, hi]`.
    #[inline]
    pub fn overlaps(&self, lo: Position, hi: Position) -> bool {
        self.start <= hi && self.end >= lo
    }
}

/// Tree coordinate for a position. Positions past `i32::MAX` saturate;
/// saturation is monotone, so no true overlap is lost and the exact test
/// on the stored interval removes the extra candidates.
fn tree_coord(pos: Position) -> i32 {
    i32::try_from(pos).unwrap_or(i32::MAX)
}

/// Intervals of one chromosome sorted by `(start, end)`, with a COITree
/// whose metadata is the position in that order.
struct ChromosomeTree {
    intervals: Vec<Interval>,
    tree: BasicCOITree<usize, u32>,
}

impl ChromosomeTree {
    fn new(mut intervals: Vec<Interval>) -> Self {
        intervals.sort_by_key(|interval| (interval.start, interval.end));
        let nodes: Vec<TreeNode<usize>> = intervals
            .iter()
            .enumerate()
            .map(|(i, interval)| {
                TreeNode::new(tree_coord(interval.start), tree_coord(interval.end), i)
            })
            .collect();
        Self {
            tree: BasicCOITree::new(nodes.as_slice()),
            intervals,
        }
    }

    fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Push every interval overlapping `[lo, hi]` in `(start, end)` order.
    fn overlapping<'a>(&'a self, lo: Position, hi: Position, out: &mut Vec<&'a Interval>) {
        let mut found: Vec<usize> = Vec::new();
        self.tree.query(tree_coord(lo), tree_coord(hi), |node| {
            found.push(node.metadata.clone());
        });
        found.sort_unstable();
        out.extend(
            found
                .into_iter()
                .map(|i| &self.intervals[i])
                .filter(|interval| interval.overlaps(lo, hi)),
        );
    }
}

/// Named intervals grouped by chromosome, read-only once built.
///
/// Chromosome names match exactly (case-sensitive). Identical intervals
/// are all kept, since each may carry its own name.
#[derive(Default)]
pub struct IntervalIndex {
    trees: HashMap<Arc<str>, ChromosomeTree>,
}

impl fmt::Debug for IntervalIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntervalIndex")
            .field("chromosomes", &self.trees.len())
            .field("intervals", &self.len())
            .finish()
    }
}

impl IntervalIndex {
    /// Build the index from `(chromosome, interval)` pairs.
    pub fn build<C, I>(intervals: I) -> Self
    where
        C: Into<Arc<str>>,
        I: IntoIterator<Item = (C, Interval)>,
    {
        let mut grouped: HashMap<Arc<str>, Vec<Interval>> = HashMap::new();
        for (chrom, interval) in intervals {
            grouped.entry(chrom.into()).or_default().push(interval);
        }
        let trees = grouped
            .into_iter()
            .map(|(chrom, intervals)| (chrom, ChromosomeTree::new(intervals)))
            .collect();
        Self { trees }
    }

    /// Total number of intervals.
    pub fn len(&self) -> usize {
        self.trees.values().map(ChromosomeTree::len).sum()
    }

    /// Whether the index holds no intervals.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of chromosomes with at least one interval.
    pub fn chromosome_count(&self) -> usize {
        self.trees.len()
    }

    /// All intervals on `chrom` overlapping `[pos1, pos2]`, ordered by
    /// `(start, end)`. The query endpoints are treated as an unordered pair.
    pub fn overlapping(&self, chrom: &str, pos1: Position, pos2: Position) -> Vec<&Interval> {
        let mut hits = Vec::new();
        if let Some(tree) = self.trees.get(chrom) {
            tree.overlapping(pos1.min(pos2), pos1.max(pos2), &mut hits);
        }
        hits
    }

    /// Distinct names of the intervals overlapping `[pos1, pos2]`, in
    /// interval order. Unnamed intervals contribute nothing.
    pub fn query(&self, chrom: &str, pos1: Position, pos2: Position) -> Vec<Arc<str>> {
        let mut seen = HashSet::new();
        self.overlapping(chrom, pos1, pos2)
            .into_iter()
            .filter_map(|interval| interval.name.clone())
            .filter(|name| seen.insert(Arc::clone(name)))
            .collect()
    }
}
