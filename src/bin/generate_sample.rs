use std::fmt::Write as _;

use anyhow::{Context, Result};

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// One synthetic MS2 scan: fragment peaks clustered below the precursor mass.
fn write_scan(
    out: &mut String,
    rng: &mut SimpleRng,
    scan_number: u32,
    pepmass: f64,
    charge: i32,
    smiles: &str,
) {
    writeln!(out, "BEGIN IONS").unwrap();
    writeln!(out, "SCANS={scan_number}").unwrap();
    writeln!(out, "SPECTRUMID=SAMPLE{scan_number:08}").unwrap();
    writeln!(out, "PEPMASS={pepmass:.4}").unwrap();
    writeln!(out, "CHARGE={charge}").unwrap();
    writeln!(out, "SMILES={smiles}").unwrap();

    // A handful of fragment clusters, each a gaussian bump sampled at
    // jittered m/z positions. Peaks come out in ascending m/z like real
    // instrument exports.
    let n_clusters = 4 + (rng.next_u64() % 3) as usize;
    let mut peaks: Vec<(f64, f64)> = Vec::new();
    for c in 0..n_clusters {
        let center = 80.0 + (pepmass - 120.0) * (c as f64 + rng.next_f64()) / n_clusters as f64;
        let amplitude = 50.0 + rng.next_f64() * 950.0;
        for _ in 0..(3 + rng.next_u64() % 5) {
            let mz = rng.gauss(center, 6.0).max(50.0);
            let intensity = gaussian(mz, center, 8.0, amplitude) + rng.next_f64() * 20.0;
            peaks.push((mz, intensity));
        }
    }
    peaks.sort_by(|a, b| a.0.total_cmp(&b.0));

    for (mz, intensity) in peaks {
        writeln!(out, "{mz:.4} {intensity:.2}").unwrap();
    }
    writeln!(out, "END IONS").unwrap();
}

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = SimpleRng::new(42);
    let mut out = String::new();

    let precursors = [
        (1, 342.1162, 2, "C12H22O11"),
        (2, 500.2500, 2, "CC(=O)Oc1ccccc1C(=O)O"),
        (3, 871.4561, 3, "CCO"),
        (4, 256.0891, 1, "c1ccccc1"),
        (5, 1203.9977, 2, "CN1CCC[C@H]1c1cccnc1"),
    ];

    for &(scan_number, pepmass, charge, smiles) in &precursors {
        write_scan(&mut out, &mut rng, scan_number, pepmass, charge, smiles);
        out.push('\n');
    }

    // One deliberately unreadable peak line so the parser's recovery path
    // has something to chew on.
    out.push_str("BEGIN IONS\nSCANS=6\nPEPMASS=400.0\n150.0 n/a\n180.0 75.0\nEND IONS\n");

    // Round-trip through the parser before writing anything out.
    let collection = ms2view::parse(&out).context("generated sample failed to parse")?;
    let total_peaks: usize = collection.scans.iter().map(|s| s.peak_count()).sum();

    let output_path = "sample_scans.mgf";
    std::fs::write(output_path, &out)
        .with_context(|| format!("writing {output_path}"))?;

    println!(
        "Wrote {} scans ({total_peaks} peaks) to {output_path}",
        collection.len()
    );
    Ok(())
}
