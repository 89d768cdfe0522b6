use venture_lens::data::loader::CSV_COLUMNS;

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

    /// Uniform integer in `lo..=hi`.
    fn range(&mut self, lo: u64, hi: u64) -> u64 {
        lo + self.next_u64() % (hi - lo + 1)
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.range(0, items.len() as u64 - 1) as usize]
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

const N_STARTUPS: usize = 500;

const INDUSTRIES: [&str; 6] = ["Fintech", "HealthTech", "EdTech", "E-commerce", "AI", "Biotech"];

// Mix of canonical names and the aliases the map's normalization corrects.
const COUNTRIES: [&str; 10] = [
    "USA",
    "UK",
    "Germany",
    "India",
    "Singapore",
    "South Korea",
    "Brazil",
    "France",
    "Canada",
    "Australia",
];

fn main() {
    env_logger::init();

    let mut rng = SimpleRng::new(42);

    let output_path = "startup_growth_investment_data.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer.write_record(CSV_COLUMNS).expect("Failed to write header");

    for i in 1..=N_STARTUPS {
        let industry = rng.pick(&INDUSTRIES);
        let country = rng.pick(&COUNTRIES);
        let year = rng.range(2000, 2023);
        let funding_rounds = rng.range(1, 10);
        let investors = rng.range(1, 40);

        // Log-uniform investment between $100k and $1B.
        let ln_lo = 100_000f64.ln();
        let ln_hi = 1_000_000_000f64.ln();
        let investment = (ln_lo + rng.next_f64() * (ln_hi - ln_lo)).exp();
        let valuation = investment * (2.0 + rng.next_f64() * 13.0);

        // Growth can dip negative, as in the real dataset.
        let growth = rng.gauss(40.0, 35.0);

        writer
            .write_record(&[
                format!("Startup_{i}"),
                industry.to_string(),
                funding_rounds.to_string(),
                format!("{investment:.0}"),
                format!("{valuation:.0}"),
                investors.to_string(),
                country.to_string(),
                year.to_string(),
                format!("{growth:.1}"),
            ])
            .expect("Failed to write record");
    }

    writer.flush().expect("Failed to flush output file");

    println!("Wrote {N_STARTUPS} startups to {output_path}");
}
