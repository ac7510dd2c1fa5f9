//! Nonce search runs with serializable reports

use keccak_miner_core::{KeccakHasher, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::config::SearchConfig;

/// A nonce whose digest met the configured threshold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundNonce {
    pub nonce: u64,
    /// Leading zero nibbles of `hash`
    pub zeros: u32,
    /// Hex-encoded digest
    pub hash: String,
}

/// Result of a search run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchReport {
    /// Message length in bytes, nonce included
    pub input_len: usize,
    pub config: SearchConfig,
    pub found: Vec<FoundNonce>,
    /// Digests computed
    pub hashes: u64,
    pub elapsed_secs: f64,
    /// Hashes per second
    pub hashrate: f64,
    /// Hex of the first 32 buffer bytes after the run
    pub digest: String,
}

/// Search `config`'s nonce range over `input`
///
/// The last 8 bytes of `input` are the nonce field. `on_found` sees each
/// match as it happens, in increasing nonce order.
pub fn search<F>(
    hasher: &mut KeccakHasher,
    input: &[u8],
    config: &SearchConfig,
    mut on_found: F,
) -> Result<SearchReport>
where
    F: FnMut(&FoundNonce),
{
    hasher.load(input)?;

    info!(
        "Searching {} nonces from {} for {}+ leading zero nibbles",
        config.range_len(),
        config.nonce_min,
        config.min_zeros
    );

    let params = config.reduce_params(input.len());
    let mut found = Vec::new();
    let start = Instant::now();

    let summary = hasher.reduce(&params, |m| {
        let entry = FoundNonce {
            nonce: m.nonce,
            zeros: m.zeros,
            hash: hex::encode(m.digest),
        };
        on_found(&entry);
        found.push(entry);
    })?;

    let elapsed_secs = start.elapsed().as_secs_f64();
    let hashrate = if elapsed_secs > 0.0 {
        summary.hashes as f64 / elapsed_secs
    } else {
        0.0
    };

    info!(
        "Search finished: {} hashes, {} found, {:.0} H/s",
        summary.hashes, summary.matches, hashrate
    );

    Ok(SearchReport {
        input_len: input.len(),
        config: config.clone(),
        found,
        hashes: summary.hashes,
        elapsed_secs,
        hashrate,
        digest: hex::encode(&hasher.buffers().message()[..32]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use keccak_miner_core::{BUFFER_SIZE, Error, keccak256};

    #[test]
    fn test_search_reports_matches() {
        let mut input = b"prefix!!".to_vec();
        input.extend_from_slice(&[0u8; 8]);

        let config = SearchConfig {
            nonce_min: 0,
            nonce_max: 32,
            min_zeros: 1,
        };

        let mut hasher = KeccakHasher::new();
        let mut streamed = Vec::new();
        let report = search(&mut hasher, &input, &config, |f| streamed.push(f.nonce)).unwrap();

        assert_eq!(report.hashes, 32);
        assert_eq!(report.input_len, 16);
        assert_eq!(streamed, vec![15, 17, 19, 30]);

        let nonces: Vec<u64> = report.found.iter().map(|f| f.nonce).collect();
        assert_eq!(nonces, streamed);

        let mut message = b"prefix!!".to_vec();
        message.extend_from_slice(&15u64.to_be_bytes());
        assert_eq!(report.found[0].hash, hex::encode(keccak256(&message)));
    }

    #[test]
    fn test_default_search_is_single_digest() {
        let input = [0u8; 8];
        let mut hasher = KeccakHasher::new();
        let report = search(&mut hasher, &input, &SearchConfig::default(), |_| {}).unwrap();

        assert_eq!(report.hashes, 1);
        assert_eq!(report.found.len(), 1);
        assert_eq!(report.digest, hex::encode(keccak256(&input)));
        assert_eq!(report.found[0].hash, report.digest);
    }

    #[test]
    fn test_report_serializes() {
        let mut hasher = KeccakHasher::new();
        let report = search(&mut hasher, b"abc", &SearchConfig::default(), |_| {}).unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["hashes"], 1);
        assert_eq!(json["config"]["nonce_max"], 1);
        assert_eq!(json["found"][0]["nonce"], 0);
    }

    #[test]
    fn test_oversized_input_rejected() {
        let input = vec![0u8; BUFFER_SIZE + 1];
        let mut hasher = KeccakHasher::new();
        let err = search(&mut hasher, &input, &SearchConfig::default(), |_| {}).unwrap_err();
        assert!(matches!(err, Error::InvalidLength { .. }));
    }
}
