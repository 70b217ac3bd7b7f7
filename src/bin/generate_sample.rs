use anyhow::{Context, Result};

const NUM_ROWS: usize = 1500;

/// Per modality: upper bound of the uniform draw, and the flag threshold.
const MODALITIES: [(f64, f64); 3] = [(1.8, 1.0), (0.6, 0.4), (1.8, 0.6)];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in `[low, high)`
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let mut rng = SimpleRng::new(42);

    let output_path = "modality_data.csv";
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    let mut flagged = [0usize; 3];
    for _ in 0..NUM_ROWS {
        let values: Vec<f64> = MODALITIES
            .iter()
            .map(|&(high, _)| rng.uniform(0.0, high))
            .collect();

        let mut record: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        for (i, (&v, &(_, threshold))) in values.iter().zip(MODALITIES.iter()).enumerate() {
            if v > threshold {
                flagged[i] += 1;
                record.push("1".to_string());
            } else {
                record.push(String::new());
            }
        }
        writer.write_record(&record).context("writing row")?;
    }
    writer.flush().context("flushing CSV")?;

    log::info!("Flag counts per modality: {flagged:?}");
    println!("Wrote {NUM_ROWS} rows to {output_path}");
    Ok(())
}
