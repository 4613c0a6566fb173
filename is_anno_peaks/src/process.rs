use std::path::Path;

use anyhow::Context;

use is6110::{
    annotate_peaks, find_peaks, open_output, read_annotation_file, read_depth_file,
    write_annotated_peaks, AnnoIndex,
};

use crate::config::Config;

/// Strategy
///
/// Read depth data into a dense array and call peaks as for is_peaks.
/// Each peak is turned into a single base interval [x, x + 1) on the
/// reference contig, joined against the annotation and the resulting rows
/// (one per overlapping feature) written out as TSV
pub fn process_depth_anno(cfg: &Config) -> anyhow::Result<()> {
    debug!("Starting processing");

    let depth = read_depth_file(cfg.depth_file(), cfg.reference()).with_context(|| {
        format!(
            "Could not read depth data from {}",
            cfg.depth_file().display()
        )
    })?;

    let anno = read_annotation_file(cfg.anno_file()).with_context(|| {
        format!(
            "Could not read annotation from {}",
            cfg.anno_file().display()
        )
    })?;
    let index = AnnoIndex::build(anno, cfg.reference().contig());
    if index.is_empty() {
        warn!(
            "No annotation found for contig {} in {}",
            cfg.reference().contig(),
            cfg.anno_file().display()
        )
    }

    let peaks = find_peaks(depth.as_slice(), cfg.peak_params());
    info!("Number of IS6110 insertions detected: {}", peaks.len());

    let rows = annotate_peaks(&peaks, &index, cfg.unannotated());
    debug!("{} annotated peak rows", rows.len());

    let name = cfg.output_file().unwrap_or_else(|| Path::new("<stdout>"));
    let mut wrt = open_output(cfg.output_file()).with_context(|| "Failed to open output file")?;
    write_annotated_peaks(&mut wrt, &rows, name)
        .with_context(|| format!("Error writing annotated peaks to {}", name.display()))
}
