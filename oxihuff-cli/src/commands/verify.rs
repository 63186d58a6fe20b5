//! Verify command implementation.

use oxihuff_core::FileDigest;
use std::path::Path;

pub fn cmd_verify(left: &Path, right: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let left_digest = FileDigest::from_path(left)?;
    let right_digest = FileDigest::from_path(right)?;

    println!("{}  {:>12}  {}", left_digest, left_digest.len(), left.display());
    println!("{}  {:>12}  {}", right_digest, right_digest.len(), right.display());

    if left_digest != right_digest {
        return Err(format!("{} and {} differ", left.display(), right.display()).into());
    }

    println!("OK: files are identical");
    Ok(())
}
