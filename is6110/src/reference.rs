use std::sync::Arc;

use crate::error::{Error, Result};

/// RefSeq accession of the M. tuberculosis H37Rv chromosome
pub const DEFAULT_CONTIG: &str = "NC_000962.3";
pub const DEFAULT_GENOME_LENGTH: usize = 4411532;

/// Reference
///
/// Single contig reference genome the depth data are mapped against.
/// Both the contig name (used when joining against annotation) and
/// the genome length (size of the depth array) come from here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    contig: Arc<str>,
    length: usize,
}

impl Reference {
    pub fn new(contig: &str, length: usize) -> Result<Self> {
        if length == 0 {
            Err(Error::Config("genome length must be greater than zero".to_owned()))
        } else if contig.is_empty() {
            Err(Error::Config("contig name must not be empty".to_owned()))
        } else {
            Ok(Self {
                contig: Arc::from(contig),
                length,
            })
        }
    }

    pub fn contig(&self) -> &Arc<str> {
        &self.contig
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for Reference {
    fn default() -> Self {
        Self {
            contig: Arc::from(DEFAULT_CONTIG),
            length: DEFAULT_GENOME_LENGTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_h37rv() {
        let r = Reference::default();
        assert_eq!(&**r.contig(), "NC_000962.3");
        assert_eq!(r.length(), 4411532);
    }

    #[test]
    fn reject_empty_reference() {
        assert!(matches!(Reference::new("chr", 0), Err(Error::Config(_))));
        assert!(matches!(Reference::new("", 10), Err(Error::Config(_))));
        assert_eq!(Reference::new("chr", 10).unwrap().length(), 10);
    }
}
