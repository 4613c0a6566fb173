//! Detection of IS6110 insertion sites from per-base sequencing depth.
//!
//! The pipeline is strictly one way: a sparse depth table is loaded into a
//! dense [`DepthArray`], local maxima are picked out by [`find_peaks`] and the
//! resulting positions are either written out directly or joined against a
//! reference annotation with [`annotate_peaks`].

#[macro_use]
extern crate log;

pub mod anno;
pub mod depth;
pub mod error;
pub mod output;
pub mod peaks;
pub mod reference;

pub use anno::{
    annotate_peaks, read_annotation_file, AnnoIndex, AnnoInterval, AnnotatedPeak,
    UnannotatedPolicy,
};
pub use depth::{read_depth_file, DepthArray};
pub use error::{Error, Result};
pub use output::{open_output, write_annotated_peaks, write_peaks};
pub use peaks::{find_peaks, PeakParams};
pub use reference::Reference;
