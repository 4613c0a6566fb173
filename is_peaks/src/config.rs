use std::path::{Path, PathBuf};

use is6110::{PeakParams, Reference};

/// Config
///
/// Configuration info for the program
/// This is generated from the command line arguments
/// Once set it is read only
///
/// depth_file - input depth TSV (chrom, 1-based position, depth)
/// output_file - peaks output [default: stdout]
/// reference - contig name and genome length
/// peak_params - distance and prominence thresholds for peak calling
///
pub struct Config {
    depth_file: PathBuf,
    output_file: Option<PathBuf>,
    reference: Reference,
    peak_params: PeakParams,
}

impl Config {
    pub fn new(
        depth_file: PathBuf,
        output_file: Option<PathBuf>,
        reference: Reference,
        peak_params: PeakParams,
    ) -> Self {
        Self {
            depth_file,
            output_file,
            reference,
            peak_params,
        }
    }

    pub fn depth_file(&self) -> &Path {
        &self.depth_file
    }

    pub fn output_file(&self) -> Option<&Path> {
        self.output_file.as_deref()
    }

    pub fn reference(&self) -> &Reference {
        &self.reference
    }

    pub fn peak_params(&self) -> &PeakParams {
        &self.peak_params
    }
}
