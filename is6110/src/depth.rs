use std::{collections::HashMap, io::BufRead, path::Path};

use compress_io::compress::CompressIo;
use utils::get_next_line;

use crate::{
    error::{Error, Result},
    reference::Reference,
};

/// DepthArray
///
/// Dense per-base depth for a single contig.  Index i holds the depth for
/// 1-based position i + 1; positions absent from the input stay at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthArray {
    depth: Vec<f64>,
}

impl DepthArray {
    pub fn new(len: usize) -> Self {
        Self {
            depth: vec![0.0; len],
        }
    }

    /// Set depth at 1-based position `pos`.  Returns false if pos is outside
    /// [1, len] (leaving the array untouched).  A repeated position overwrites
    /// the previous value.
    pub fn set(&mut self, pos: usize, z: f64) -> bool {
        match pos.checked_sub(1).and_then(|ix| self.depth.get_mut(ix)) {
            Some(x) => {
                *x = z;
                true
            }
            None => false,
        }
    }

    /// Build from (1-based position, depth) pairs
    pub fn from_records<I: IntoIterator<Item = (usize, f64)>>(
        records: I,
        len: usize,
    ) -> Result<Self> {
        let mut a = Self::new(len);
        for (line, (x, z)) in records.into_iter().enumerate() {
            if !a.set(x, z) {
                return Err(Error::Bounds {
                    name: "records".to_owned(),
                    line: line + 1,
                    pos: x,
                    len,
                });
            }
        }
        Ok(a)
    }

    pub fn len(&self) -> usize {
        self.depth.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depth.is_empty()
    }

    /// Depth at zero-based index
    pub fn get(&self, ix: usize) -> Option<f64> {
        self.depth.get(ix).copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.depth
    }
}

fn parse_depth(s: &str, name: &str, line: usize) -> Result<f64> {
    let z = s
        .parse::<f64>()
        .map_err(|_| Error::parse(name, line, format!("Error reading depth '{}'", s)))?;
    if z.is_finite() && z >= 0.0 {
        Ok(z)
    } else {
        Err(Error::parse(name, line, format!("Invalid depth {}", s)))
    }
}

/// Read sparse depth table (chrom, 1-based position, depth) from `rdr`
/// into a dense array covering the whole reference.  `name` is only used
/// for error and log messages.
pub fn read_depth<R: BufRead>(
    rdr: &mut R,
    name: &str,
    reference: &Reference,
) -> Result<DepthArray> {
    let len = reference.length();
    let mut depth = DepthArray::new(len);
    let mut buf = String::new();
    let mut line = 0;
    let mut n_rec = 0;
    let mut ctg_count: HashMap<String, usize> = HashMap::new();

    while let Some(fields) = get_next_line(rdr, &mut buf).map_err(|e| Error::io(name, e))? {
        line += 1;
        // Skip blank lines
        if fields.len() == 1 && fields[0].is_empty() {
            continue;
        }
        if fields.len() != 3 {
            return Err(Error::parse(
                name,
                line,
                format!("expected 3 columns, found {}", fields.len()),
            ));
        }
        let x = fields[1].parse::<usize>().map_err(|_| {
            Error::parse(name, line, format!("Error reading position '{}'", fields[1]))
        })?;
        let z = parse_depth(fields[2], name, line)?;
        if !depth.set(x, z) {
            return Err(Error::Bounds {
                name: name.to_owned(),
                line,
                pos: x,
                len,
            });
        }
        if let Some(n) = ctg_count.get_mut(fields[0]) {
            *n += 1
        } else {
            trace!("Found contig {}", fields[0]);
            ctg_count.insert(fields[0].to_owned(), 1);
        }
        n_rec += 1;
    }

    let other: usize = ctg_count
        .iter()
        .filter(|(c, _)| c.as_str() != &**reference.contig())
        .map(|(_, n)| *n)
        .sum();
    if other > 0 {
        warn!(
            "{} depth records from {} are not from contig {}; they have been loaded regardless",
            other,
            name,
            reference.contig()
        );
    }
    debug!(
        "Read {} depth records from {} lines of {} ({} contigs)",
        n_rec,
        line,
        name,
        ctg_count.len()
    );
    Ok(depth)
}

/// Read depth file, handling compressed input
pub fn read_depth_file<P: AsRef<Path>>(path: P, reference: &Reference) -> Result<DepthArray> {
    let p = path.as_ref();
    debug!("Reading depth data from {}", p.display());
    trace!("Opening depth file {} for reading", p.display());
    let mut rdr = CompressIo::new()
        .path(p)
        .bufreader()
        .map_err(|e| Error::io(p, e))?;
    read_depth(&mut rdr, &p.display().to_string(), reference)
}
