use std::{
    collections::HashSet,
    fmt::{self, Formatter},
    io::BufRead,
    path::Path,
    sync::Arc,
};

use compress_io::compress::CompressIo;
use log::Level::Trace;
use rust_lapper::{Interval, Lapper};
use utils::get_next_line;

use crate::error::{Error, Result};

/// Spellings treated as a missing value in the annotation table
const MISSING: [&str; 15] = [
    "", "NA", "N/A", "n/a", "<NA>", "#NA", "NaN", "nan", "-NaN", "-nan", "null", "NULL", "None",
    "#N/A", "#N/A N/A",
];

/// Feature from the reference annotation.  Coordinates are 0-based, half open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnoInterval {
    chrom: Arc<str>,
    start: usize,
    end: usize,
    strand: String,
    gene_id: String,
    symbol: Option<String>,
    feature: String,
    functional_category: String,
}

impl AnnoInterval {
    pub fn new(chrom: Arc<str>, start: usize, end: usize, gene_id: &str) -> Self {
        Self {
            chrom,
            start,
            end,
            strand: String::new(),
            gene_id: gene_id.to_owned(),
            symbol: None,
            feature: String::new(),
            functional_category: String::new(),
        }
    }

    pub fn with_symbol(mut self, symbol: &str) -> Self {
        self.symbol = Some(symbol.to_owned());
        self
    }

    pub fn chrom(&self) -> &Arc<str> {
        &self.chrom
    }
    pub fn start(&self) -> usize {
        self.start
    }
    pub fn end(&self) -> usize {
        self.end
    }
    pub fn strand(&self) -> &str {
        &self.strand
    }
    pub fn gene_id(&self) -> &str {
        &self.gene_id
    }
    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }
    pub fn feature(&self) -> &str {
        &self.feature
    }
    pub fn functional_category(&self) -> &str {
        &self.functional_category
    }

    /// Symbol if present, otherwise gene ID
    pub fn label(&self) -> &str {
        self.symbol().unwrap_or(&self.gene_id)
    }

    /// Does the single base interval [x, x + 1) overlap this feature?
    pub fn contains(&self, x: usize) -> bool {
        self.start <= x && x < self.end
    }
}

/// What to do with peaks that do not overlap any annotation interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnannotatedPolicy {
    #[default]
    Drop,
    Report,
}

/// One row of annotated output: a peak joined with one overlapping feature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedPeak {
    chrom: Arc<str>,
    pos: usize,
    gene_id: String,
    symbol: String,
}

impl AnnotatedPeak {
    pub fn new(chrom: Arc<str>, pos: usize, gene_id: &str, symbol: &str) -> Self {
        Self {
            chrom,
            pos,
            gene_id: gene_id.to_owned(),
            symbol: symbol.to_owned(),
        }
    }

    fn from_interval(pos: usize, iv: &AnnoInterval) -> Self {
        Self::new(iv.chrom.clone(), pos, iv.gene_id(), iv.label())
    }

    pub fn chrom(&self) -> &str {
        &self.chrom
    }
    pub fn pos(&self) -> usize {
        self.pos
    }
    pub fn gene_id(&self) -> &str {
        &self.gene_id
    }
    pub fn symbol(&self) -> &str {
        &self.symbol
    }
}

impl fmt::Display for AnnotatedPeak {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.chrom, self.pos, self.gene_id, self.symbol
        )
    }
}

/// AnnoIndex
///
/// Annotation intervals for one contig, kept in input order, with a lapper
/// over their coordinates.  Each lapper entry carries the position of its
/// interval in the input so hits can be reported in input order.
#[derive(Debug, Clone)]
pub struct AnnoIndex {
    contig: Arc<str>,
    intervals: Vec<AnnoInterval>,
    lapper: Lapper<usize, usize>,
}

impl AnnoIndex {
    pub fn build(intervals: Vec<AnnoInterval>, contig: &Arc<str>) -> Self {
        let n = intervals.len();
        let intervals: Vec<_> = intervals
            .into_iter()
            .filter(|iv| iv.chrom == *contig)
            .collect();
        if intervals.len() < n {
            debug!(
                "{} annotation intervals skipped as not on contig {}",
                n - intervals.len(),
                contig
            );
        }
        let lapper = Lapper::new(
            intervals
                .iter()
                .enumerate()
                .map(|(ix, iv)| Interval {
                    start: iv.start,
                    stop: iv.end,
                    val: ix,
                })
                .collect(),
        );
        Self {
            contig: contig.clone(),
            intervals,
            lapper,
        }
    }

    pub fn contig(&self) -> &Arc<str> {
        &self.contig
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// All intervals overlapping zero-based position x, in input order
    pub fn find(&self, x: usize) -> Vec<&AnnoInterval> {
        let mut ix: Vec<usize> = self.lapper.find(x, x + 1).map(|h| h.val).collect();
        ix.sort_unstable();
        ix.into_iter().map(|i| &self.intervals[i]).collect()
    }
}

/// Join peaks against the annotation, giving one row per overlapping feature.
/// Peaks without any overlapping feature are handled according to `policy`.
pub fn annotate_peaks(
    peaks: &[usize],
    index: &AnnoIndex,
    policy: UnannotatedPolicy,
) -> Vec<AnnotatedPeak> {
    let mut v = Vec::with_capacity(peaks.len());
    let mut n_unannotated = 0;
    for &x in peaks {
        let hits = index.find(x);
        if hits.is_empty() {
            n_unannotated += 1;
            trace!("No annotation found for peak at {}", x);
            if policy == UnannotatedPolicy::Report {
                v.push(AnnotatedPeak::new(index.contig.clone(), x, "NA", "NA"))
            }
        } else {
            v.extend(hits.into_iter().map(|iv| AnnotatedPeak::from_interval(x, iv)))
        }
    }
    if n_unannotated > 0 {
        match policy {
            UnannotatedPolicy::Drop => info!(
                "{} peaks with no overlapping annotation were dropped",
                n_unannotated
            ),
            UnannotatedPolicy::Report => info!(
                "{} peaks with no overlapping annotation reported as NA",
                n_unannotated
            ),
        }
    }
    v
}

fn parse_coord(s: &str, name: &str, line: usize) -> Result<usize> {
    s.parse::<usize>()
        .map_err(|_| Error::parse(name, line, format!("Error reading coordinate '{}'", s)))
}

/// Read annotation table (with header line) from `rdr`
///
/// Columns: chrom, start, end, strand, gene ID, symbol, feature, functional category.
/// Trailing empty columns may be missing, but the first five are required.
/// Any other column count is a parse error.
pub fn read_annotation<R: BufRead>(rdr: &mut R, name: &str) -> Result<Vec<AnnoInterval>> {
    let mut buf = String::new();
    let mut line = 0;
    let mut v = Vec::new();
    let mut ctg_hash: HashSet<Arc<str>> = HashSet::new();

    while let Some(fields) = get_next_line(rdr, &mut buf).map_err(|e| Error::io(name, e))? {
        line += 1;
        if line == 1 {
            trace!("Header: {:?}", fields);
            continue;
        }
        // Skip blank lines
        if fields.len() == 1 && fields[0].is_empty() {
            continue;
        }
        if !(5..=8).contains(&fields.len()) {
            return Err(Error::parse(
                name,
                line,
                format!("expected 5 to 8 columns, found {}", fields.len()),
            ));
        }
        let start = parse_coord(fields[1], name, line)?;
        let end = parse_coord(fields[2], name, line)?;
        if end < start {
            return Err(Error::parse(
                name,
                line,
                format!("Interval end {} before start {}", end, start),
            ));
        }
        if !ctg_hash.contains(fields[0]) {
            trace!("Adding contig {}", fields[0]);
            ctg_hash.insert(Arc::from(fields[0]));
        }
        let chrom = ctg_hash
            .get(fields[0])
            .cloned()
            .unwrap_or_else(|| Arc::from(fields[0]));
        let get = |i: usize| fields.get(i).copied().unwrap_or("");
        let symbol = Some(get(5))
            .filter(|s| !MISSING.contains(s))
            .map(|s| s.to_owned());
        v.push(AnnoInterval {
            chrom,
            start,
            end,
            strand: get(3).to_owned(),
            gene_id: get(4).to_owned(),
            symbol,
            feature: get(6).to_owned(),
            functional_category: get(7).to_owned(),
        })
    }
    debug!(
        "Finished reading in {} lines from {}; found {} annotation intervals",
        line,
        name,
        v.len()
    );
    if log_enabled!(Trace) {
        for iv in v.iter() {
            trace!("\t{:?}", iv)
        }
    }
    Ok(v)
}

/// Read annotation file, handling compressed input
pub fn read_annotation_file<P: AsRef<Path>>(path: P) -> Result<Vec<AnnoInterval>> {
    let p = path.as_ref();
    debug!("Reading annotation from {}", p.display());
    let mut rdr = CompressIo::new()
        .path(p)
        .bufreader()
        .map_err(|e| Error::io(p, e))?;
    read_annotation(&mut rdr, &p.display().to_string())
}
