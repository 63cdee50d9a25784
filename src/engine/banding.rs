// * LSH Banding Engine
// * Slices a signature into bands of `rows_per_band` values and hashes each band, salted by its index

use rayon::prelude::*;
use xxhash_rust::xxh3::xxh3_64_with_seed;

use super::signature::Signature;

/// Hash of one band's values
pub type BandHash = u64;

/// Bucket address: the band a hash came from plus the hash itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BucketKey {
    pub band: usize,
    pub hash: BandHash,
}

impl BucketKey {
    pub fn new(band: usize, hash: BandHash) -> Self {
        Self { band, hash }
    }

    /// Arithmetic neighbours `(band, hash + p)` for `p` in `1..=num_probes`
    ///
    /// Adjacency of the integer does not imply similarity of the band contents;
    /// probing is a cheap approximation of a neighbouring-bucket search.
    pub fn probes(self, num_probes: u64) -> impl Iterator<Item = BucketKey> {
        (1..=num_probes).map(move |p| BucketKey::new(self.band, self.hash.wrapping_add(p)))
    }
}

/// Hashes one band's values, seeded with the band index
pub fn hash_band(values: &[u64], band_index: usize) -> BandHash {
    let mut bytes = Vec::with_capacity(values.len() * 8);
    for value in values {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    xxh3_64_with_seed(&bytes, band_index as u64)
}

/// Band hashes for one signature
///
/// Only complete bands are produced: a signature shorter than
/// `num_bands * rows_per_band` yields fewer hashes, trailing values beyond the
/// last band are ignored.
pub fn band(signature: &Signature, num_bands: usize, rows_per_band: usize) -> Vec<BandHash> {
    if rows_per_band == 0 {
        return Vec::new();
    }

    signature
        .values()
        .chunks_exact(rows_per_band)
        .take(num_bands)
        .enumerate()
        .map(|(band_index, chunk)| hash_band(chunk, band_index))
        .collect()
}

/// Bands every signature in parallel; output order matches input order
pub fn band_all(
    signatures: &[Signature],
    num_bands: usize,
    rows_per_band: usize,
) -> Vec<Vec<BandHash>> {
    signatures
        .par_iter()
        .map(|signature| band(signature, num_bands, rows_per_band))
        .collect()
}
