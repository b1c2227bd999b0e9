//! Line sort driver.
//!
//! Reads newline-terminated records as raw bytes, inserts each one into a
//! [`BTree<Vec<u8>>`], then drains the finished tree once in order. Records
//! compare bytewise, so input need not be UTF-8. This is the library side
//! of the `ordtree-sort` binary.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use tracing::debug;

use crate::alloc::{Global, NodeAllocator};
use crate::common::config::DEFAULT_DEGREE;
use crate::common::Result;
use crate::index::btree::{BTree, Comparator, NaturalOrder};

/// How [`sort_lines`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOptions {
    /// Degree of the tree holding the records.
    pub degree: usize,

    /// Write each record to the output during the walk.
    pub emit: bool,
}

impl Default for SortOptions {
    fn default() -> Self {
        Self {
            degree: DEFAULT_DEGREE,
            emit: true,
        }
    }
}

/// Summary of one sort run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortReport {
    /// Records read and inserted.
    pub records: usize,

    /// Tree height after the last insertion.
    pub height: usize,

    /// Nodes released by the final drain.
    pub nodes_released: usize,
}

/// Sort the records of `input` into `output` using a fresh tree.
///
/// # Example
/// ```
/// use ordtree::driver::{sort_lines, SortOptions};
///
/// let mut out = Vec::new();
/// let report = sort_lines(&b"pear\napple\nfig\n"[..], &mut out, &SortOptions::default()).unwrap();
///
/// assert_eq!(out, b"apple\nfig\npear\n");
/// assert_eq!(report.records, 3);
/// ```
pub fn sort_lines<R: BufRead, W: Write>(
    input: R,
    output: W,
    options: &SortOptions,
) -> Result<SortReport> {
    let mut tree: BTree<Vec<u8>, NaturalOrder, Global> = BTree::with_degree(options.degree)?;
    sort_lines_with(&mut tree, input, output, options.emit)
}

/// Sort the records of the file at `path` into `output`.
pub fn sort_file<P: AsRef<Path>, W: Write>(
    path: P,
    output: W,
    options: &SortOptions,
) -> Result<SortReport> {
    let file = File::open(path)?;
    sort_lines(BufReader::new(file), output, options)
}

/// Sort through a caller-supplied tree.
///
/// Each record keeps its trailing newline (the last one may have none).
/// The first failed insertion aborts the run with its error; records
/// already inserted stay in `tree`. On success the tree is drained once in
/// order: each record is written when `emit` is set, then dropped, and the
/// tree is left empty.
pub fn sort_lines_with<R, W, C, A>(
    tree: &mut BTree<Vec<u8>, C, A>,
    mut input: R,
    mut output: W,
    emit: bool,
) -> Result<SortReport>
where
    R: BufRead,
    W: Write,
    C: Comparator<Vec<u8>>,
    A: NodeAllocator,
{
    let mut line = Vec::new();
    while input.read_until(b'\n', &mut line)? > 0 {
        let record = std::mem::take(&mut line);
        tree.add(record)?;
    }

    let records = tree.len();
    let height = tree.height();
    let nodes_released = tree.stats().live_nodes() as usize;

    for record in tree.drain() {
        if emit {
            output.write_all(&record)?;
        }
    }
    if emit {
        output.flush()?;
    }

    debug!(records, height, nodes_released, "sort finished");

    Ok(SortReport {
        records,
        height,
        nodes_released,
    })
}
