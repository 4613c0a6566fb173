use std::{
    io::Write,
    path::{Path, PathBuf},
};

use compress_io::compress::CompressIo;

use crate::{
    anno::AnnotatedPeak,
    error::{Error, Result},
};

pub const ANNOTATED_HEADER: &str = "chrom\tPos\tRv_GeneID\tsymbol";

fn out_name(p: Option<&Path>) -> PathBuf {
    p.map(|p| p.to_owned())
        .unwrap_or_else(|| PathBuf::from("<stdout>"))
}

/// Open output file, or stdout if no path is given.  Compression is
/// chosen from the file extension.
pub fn open_output(p: Option<&Path>) -> Result<Box<dyn Write>> {
    trace!("Opening {} for output", out_name(p).display());
    let wrt = CompressIo::new()
        .opt_path(p)
        .bufwriter()
        .map_err(|e| Error::io(out_name(p), e))?;
    Ok(Box::new(wrt))
}

/// Write zero-based peak positions, one per line
pub fn write_peaks<W: Write>(wrt: &mut W, peaks: &[usize], name: &Path) -> Result<()> {
    for p in peaks {
        writeln!(wrt, "{}", p).map_err(|e| Error::io(name, e))?
    }
    wrt.flush().map_err(|e| Error::io(name, e))
}

/// Write annotated peaks as TSV with a header line
pub fn write_annotated_peaks<W: Write>(
    wrt: &mut W,
    rows: &[AnnotatedPeak],
    name: &Path,
) -> Result<()> {
    writeln!(wrt, "{}", ANNOTATED_HEADER).map_err(|e| Error::io(name, e))?;
    for r in rows {
        writeln!(wrt, "{}", r).map_err(|e| Error::io(name, e))?
    }
    wrt.flush().map_err(|e| Error::io(name, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::{fs, sync::Arc};

    use pretty_assertions::assert_eq;

    #[test]
    fn raw_peaks_one_per_line() {
        let mut v = Vec::new();
        write_peaks(&mut v, &[999, 4000], Path::new("test")).unwrap();
        assert_eq!(String::from_utf8(v).unwrap(), "999\n4000\n");

        let mut v = Vec::new();
        write_peaks(&mut v, &[], Path::new("test")).unwrap();
        assert!(v.is_empty());
    }

    #[test]
    fn annotated_table_has_header() {
        let ctg: Arc<str> = Arc::from("NC_000962.3");
        let rows = vec![
            AnnotatedPeak::new(ctg.clone(), 999, "Rv0001", "dnaA"),
            AnnotatedPeak::new(ctg, 2100, "Rv0002", "Rv0002"),
        ];
        let mut v = Vec::new();
        write_annotated_peaks(&mut v, &rows, Path::new("test")).unwrap();
        assert_eq!(
            String::from_utf8(v).unwrap(),
            "chrom\tPos\tRv_GeneID\tsymbol\n\
             NC_000962.3\t999\tRv0001\tdnaA\n\
             NC_000962.3\t2100\tRv0002\tRv0002\n"
        );
    }

    #[test]
    fn write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("peaks.txt");
        {
            let mut wrt = open_output(Some(&p)).unwrap();
            write_peaks(&mut wrt, &[1, 2, 3], &p).unwrap();
        }
        assert_eq!(fs::read_to_string(&p).unwrap(), "1\n2\n3\n");
    }

    #[test]
    fn unwritable_output() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("no_such_dir").join("peaks.txt");
        assert!(matches!(open_output(Some(&p)), Err(Error::Io { .. })));
    }
}
