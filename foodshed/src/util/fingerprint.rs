use crate::model::CoverageError;
use sha2::{Digest, Sha256};
use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

/// hex sha256 digest of a file's contents, read in chunks
pub fn file_digest(path: &Path) -> Result<String, CoverageError> {
    let file = File::open(path).map_err(|e| CoverageError::io(path, e))?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = reader.read(&mut buf).map_err(|e| CoverageError::io(path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// accumulates labeled values into a sha256 digest. each field is written
/// as `label=value` followed by a separator so adjacent fields cannot run
/// together.
#[derive(Default)]
pub struct Fingerprint {
    hasher: Sha256,
}

impl Fingerprint {
    pub fn new() -> Fingerprint {
        Fingerprint::default()
    }

    pub fn field(mut self, label: &str, value: impl AsRef<[u8]>) -> Fingerprint {
        self.hasher.update(label.as_bytes());
        self.hasher.update(b"=");
        self.hasher.update(value.as_ref());
        self.hasher.update(b"\n");
        self
    }

    pub fn finish(self) -> String {
        hex::encode(self.hasher.finalize())
    }
}
