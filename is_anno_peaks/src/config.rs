use std::path::{Path, PathBuf};

use is6110::{PeakParams, Reference, UnannotatedPolicy};

pub struct Config {
    depth_file: PathBuf,
    anno_file: PathBuf,
    output_file: Option<PathBuf>,
    reference: Reference,
    peak_params: PeakParams,
    unannotated: UnannotatedPolicy,
}

impl Config {
    pub fn new(
        depth_file: PathBuf,
        anno_file: PathBuf,
        output_file: Option<PathBuf>,
        reference: Reference,
        peak_params: PeakParams,
    ) -> Self {
        Self {
            depth_file,
            anno_file,
            output_file,
            reference,
            peak_params,
            unannotated: UnannotatedPolicy::Drop,
        }
    }

    pub fn set_unannotated(&mut self, p: UnannotatedPolicy) {
        self.unannotated = p
    }

    pub fn depth_file(&self) -> &Path {
        &self.depth_file
    }

    pub fn anno_file(&self) -> &Path {
        &self.anno_file
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

    pub fn unannotated(&self) -> UnannotatedPolicy {
        self.unannotated
    }
}
