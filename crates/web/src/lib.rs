use js_sys::{Function, Uint8Array};
use keccak_miner_core::{DIGEST_SIZE, KeccakHasher as CoreHasher, ReduceParams};
use wasm_bindgen::prelude::*;

/// Keccak-256 hasher with a reusable 4 KB message buffer
#[wasm_bindgen]
pub struct KeccakHasher {
    inner: CoreHasher,
}

impl Default for KeccakHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl KeccakHasher {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: CoreHasher::new(),
        }
    }

    /// Keccak-256 of `data`, 32 bytes
    pub fn digest(&mut self, data: &[u8]) -> Result<Vec<u8>, JsError> {
        let digest = self.inner.hash(data).map_err(to_js_error)?;
        Ok(digest.to_vec())
    }

    /// Search nonces in `[nonce_min, nonce_max)` over `data`, whose last
    /// 8 bytes are the nonce field.
    ///
    /// `callback(nonce: bigint, zeros: number, digest: Uint8Array)` runs for
    /// every digest with at least `zeros` leading zero nibbles. Returns the
    /// first 32 bytes of the buffer afterwards: the last digest computed.
    pub fn reduce(
        &mut self,
        data: &[u8],
        callback: Option<Function>,
        nonce_min: u64,
        nonce_max: u64,
        zeros: u32,
    ) -> Result<Vec<u8>, JsError> {
        self.inner.load(data).map_err(to_js_error)?;

        let params = ReduceParams::new(data.len())
            .with_range(nonce_min, nonce_max)
            .with_min_zeros(zeros);

        let mut thrown: Option<JsValue> = None;
        self.inner
            .reduce(&params, |m| {
                let Some(callback) = &callback else {
                    return;
                };
                if thrown.is_some() {
                    return;
                }
                let digest = Uint8Array::from(&m.digest[..]);
                if let Err(e) = callback.call3(
                    &JsValue::NULL,
                    &JsValue::from(m.nonce),
                    &JsValue::from(m.zeros),
                    &digest,
                ) {
                    thrown = Some(e);
                }
            })
            .map_err(to_js_error)?;

        if let Some(e) = thrown {
            let message = e
                .as_string()
                .unwrap_or_else(|| "reduce callback threw".to_string());
            return Err(JsError::new(&message));
        }

        Ok(self.inner.buffers().message()[..DIGEST_SIZE].to_vec())
    }
}

/// Keccak-256 of `input` as a hex string
#[wasm_bindgen]
pub fn keccak256_hex(input: &[u8]) -> String {
    hex::encode(keccak_miner_core::keccak256(input))
}

#[wasm_bindgen]
pub struct Benchmark {
    hasher: CoreHasher,
}

impl Default for Benchmark {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl Benchmark {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            hasher: CoreHasher::new(),
        }
    }

    /// Run benchmark with specified number of hashes
    /// Returns hashrate in H/s
    pub fn run(&mut self, num_hashes: u32) -> Result<f64, JsError> {
        let performance = web_sys::window()
            .and_then(|w| w.performance())
            .ok_or_else(|| JsError::new("performance timer unavailable"))?;

        let input = [0xA5u8; 120];
        self.hasher.load(&input).map_err(to_js_error)?;
        let params = ReduceParams::new(input.len())
            .with_range(0, num_hashes as u64)
            .with_min_zeros(2 * DIGEST_SIZE as u32 + 1);

        let start = performance.now();
        let summary = self.hasher.reduce(&params, |_| {}).map_err(to_js_error)?;
        let elapsed_s = (performance.now() - start) / 1000.0;

        web_sys::console::log_1(
            &format!("{} hashes in {:.3}s", summary.hashes, elapsed_s).into(),
        );

        Ok(summary.hashes as f64 / elapsed_s)
    }

    /// Get algorithm parameters as JSON string
    pub fn get_params(&self) -> String {
        format!(
            r#"{{"rate": {}, "rounds": {}, "buffer_kb": {}, "digest_size": {}}}"#,
            keccak_miner_core::RATE,
            keccak_miner_core::ROUNDS,
            keccak_miner_core::BUFFER_SIZE / 1024,
            DIGEST_SIZE
        )
    }
}

fn to_js_error(e: keccak_miner_core::Error) -> JsError {
    JsError::new(&e.to_string())
}
