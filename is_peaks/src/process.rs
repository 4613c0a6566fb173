use std::path::Path;

use anyhow::Context;
use log::Level::Debug;

use is6110::{find_peaks, open_output, read_depth_file, write_peaks};

use crate::config::Config;

/// Strategy
///
/// Read sparse depth data into a dense array covering the whole genome,
/// call peaks on the array and write out the (zero-based) peak positions
pub fn process_depth(cfg: &Config) -> anyhow::Result<()> {
    debug!("Starting processing");

    let depth = read_depth_file(cfg.depth_file(), cfg.reference()).with_context(|| {
        format!(
            "Could not read depth data from {}",
            cfg.depth_file().display()
        )
    })?;

    let peaks = find_peaks(depth.as_slice(), cfg.peak_params());
    info!("Number of IS6110 insertions detected: {}", peaks.len());
    if log_enabled!(Debug) {
        debug!("Peaks: {:?}", peaks)
    }

    let name = cfg.output_file().unwrap_or_else(|| Path::new("<stdout>"));
    let mut wrt = open_output(cfg.output_file()).with_context(|| "Failed to open output file")?;
    write_peaks(&mut wrt, &peaks, name)
        .with_context(|| format!("Error writing peaks to {}", name.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::{fs, io::Write};

    use is6110::{PeakParams, Reference};
    use pretty_assertions::assert_eq;

    #[test]
    fn depth_to_peaks() {
        let dir = tempfile::tempdir().unwrap();
        let in_path = dir.path().join("depth.tsv");
        let out_path = dir.path().join("peaks.txt");
        {
            let mut f = fs::File::create(&in_path).unwrap();
            // Spike at 1000, small bump at 1200, second spike at 4000
            for (x, z) in [(999, 5), (1000, 50), (1001, 5), (1200, 30), (4000, 35)] {
                writeln!(f, "NC_000962.3\t{}\t{}", x, z).unwrap();
            }
        }
        let cfg = Config::new(
            in_path,
            Some(out_path.clone()),
            Reference::new("NC_000962.3", 10_000).unwrap(),
            PeakParams::default(),
        );
        process_depth(&cfg).unwrap();
        assert_eq!(fs::read_to_string(&out_path).unwrap(), "999\n3999\n");
    }

    #[test]
    fn position_past_genome_end() {
        let dir = tempfile::tempdir().unwrap();
        let in_path = dir.path().join("depth.tsv");
        fs::write(&in_path, "NC_000962.3\t101\t50\n").unwrap();
        let cfg = Config::new(
            in_path,
            Some(dir.path().join("peaks.txt")),
            Reference::new("NC_000962.3", 100).unwrap(),
            PeakParams::default(),
        );
        let e = process_depth(&cfg).unwrap_err();
        assert!(matches!(
            e.downcast_ref::<is6110::Error>(),
            Some(is6110::Error::Bounds { pos: 101, .. })
        ));
    }
}
