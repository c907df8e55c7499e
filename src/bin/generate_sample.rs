use anyhow::{Context, Result};

use car_finder::data::model::CarRecord;

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

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// (brand, model, body, seats, base price)
const MODELS: &[(&str, &str, &str, u32, f64)] = &[
    ("Maruti Suzuki", "Alto K10", "Hatchback", 5, 399_000.0),
    ("Maruti Suzuki", "Swift", "Hatchback", 5, 649_000.0),
    ("Maruti Suzuki", "Dzire", "Sedan", 5, 679_000.0),
    ("Maruti Suzuki", "Ertiga", "MUV", 7, 869_000.0),
    ("Hyundai", "i20", "Hatchback", 5, 704_000.0),
    ("Hyundai", "Creta", "SUV", 5, 1_100_000.0),
    ("Tata", "Nexon", "SUV", 5, 800_000.0),
    ("Tata", "Punch", "SUV", 5, 613_000.0),
    ("Toyota", "Glanza", "Hatchback", 5, 686_000.0),
    ("Toyota", "Innova Crysta", "MUV", 7, 1_999_000.0),
    ("Toyota", "Fortuner", "SUV", 7, 3_343_000.0),
    ("Mahindra", "XUV700", "SUV", 7, 1_399_000.0),
    ("Mahindra", "Scorpio-N", "SUV", 7, 1_385_000.0),
    ("Honda", "City", "Sedan", 5, 1_182_000.0),
    ("Kia", "Seltos", "SUV", 5, 1_090_000.0),
];

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_cars.csv".to_string());
    let mut rng = SimpleRng::new(42);

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;

    let mut rows = 0;
    for &(brand, model, body, seats, base) in MODELS {
        // A few trims per model: price steps up with fuel / gearbox.
        for trim in 0..3 {
            let fuel = rng.pick(&["Petrol", "Diesel", "CNG"]);
            let transmission = rng.pick(&["Manual", "Automatic"]);
            let markup = 1.0 + 0.08 * trim as f64 + 0.05 * rng.next_f64();
            let price = ((base * markup) / 1000.0).round() * 1000.0;

            writer.serialize(CarRecord {
                brand: brand.to_string(),
                model: model.to_string(),
                price,
                fuel: fuel.to_string(),
                transmission: transmission.to_string(),
                body: body.to_string(),
                seats,
            })?;
            rows += 1;
        }
    }

    // Rows the loader is expected to drop.
    writer.write_record(["Tata", "Curvv", "price on request", "Petrol", "Manual", "SUV", "5"])?;
    writer.write_record(["Kia", "Carens", "1050000", "Diesel", "Manual", "MUV", "0"])?;
    writer.flush()?;

    println!("Wrote {rows} cars (plus 2 malformed rows) to {output_path}");
    Ok(())
}
