use std::collections::HashSet;

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;
use sha2::{Digest, Sha256};
use tracing::{trace, warn};

const HUE_RANGE: std::ops::Range<u32> = 0..360;
const SATURATION_RANGE: std::ops::RangeInclusive<f64> = 50.0..=80.0;
const LIGHTNESS_RANGE: std::ops::RangeInclusive<f64> = 40.0..=70.0;
const HASH_FALLBACK_ROUNDS: u32 = 256;

static HEX_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^#([0-9a-f]{3}){1,2}$").expect("hex color pattern is valid")
});

pub fn is_hex_color(value: &str) -> bool {
    HEX_COLOR.is_match(value)
}

/// Hue in degrees, saturation and lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl Hsl {
    pub fn to_hex(&self) -> String {
        let hue = self.hue.rem_euclid(360.0);
        let saturation = self.saturation / 100.0;
        let lightness = self.lightness / 100.0;

        let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let m = lightness - chroma / 2.0;
        rgb_to_hex(sector_rgb(hue, chroma), m)
    }
}

/// Hue in degrees, saturation and value in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub hue: f64,
    pub saturation: f64,
    pub value: f64,
}

impl Hsv {
    pub fn to_hex(&self) -> String {
        let hue = self.hue.rem_euclid(360.0);
        let saturation = self.saturation / 100.0;
        let value = self.value / 100.0;

        let chroma = value * saturation;
        let m = value - chroma;
        rgb_to_hex(sector_rgb(hue, chroma), m)
    }
}

fn sector_rgb(hue: f64, chroma: f64) -> (f64, f64, f64) {
    let x = chroma * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());

    match hue {
        h if h < 60.0 => (chroma, x, 0.0),
        h if h < 120.0 => (x, chroma, 0.0),
        h if h < 180.0 => (0.0, chroma, x),
        h if h < 240.0 => (0.0, x, chroma),
        h if h < 300.0 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    }
}

fn rgb_to_hex((r, g, b): (f64, f64, f64), m: f64) -> String {
    let channel = |value: f64| ((value + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    format!("#{:02x}{:02x}{:02x}", channel(r), channel(g), channel(b))
}

pub fn random_hsl<R: Rng + ?Sized>(rng: &mut R) -> Hsl {
    Hsl {
        hue: f64::from(rng.gen_range(HUE_RANGE)),
        saturation: rng.gen_range(SATURATION_RANGE),
        lightness: rng.gen_range(LIGHTNESS_RANGE),
    }
}

/// Draws colours until one is outside `forbidden` (lower-case hex strings).
///
/// With `max_attempts` unset the loop only ends on success. With a cap, the
/// colour is derived from `seed` once the cap is hit.
pub fn random_color<R: Rng + ?Sized>(
    rng: &mut R,
    forbidden: &HashSet<String>,
    max_attempts: Option<u32>,
    seed: &str,
) -> String {
    let mut attempts: u32 = 0;
    loop {
        let color = random_hsl(rng).to_hex();
        if !forbidden.contains(&color) {
            trace!(target: "app::colors", %color, attempts, "picked random color");
            return color;
        }

        attempts += 1;
        if let Some(limit) = max_attempts {
            if attempts >= limit {
                warn!(
                    target: "app::colors",
                    attempts,
                    forbidden = forbidden.len(),
                    "random color attempts exhausted, using hashed color"
                );
                return hashed_color(seed, forbidden);
            }
        }
    }
}

/// Deterministic colour for `seed`, rehashed a bounded number of times to
/// step around forbidden values.
pub fn hashed_color(seed: &str, forbidden: &HashSet<String>) -> String {
    let mut color = String::new();
    for round in 0..HASH_FALLBACK_ROUNDS {
        let digest = Sha256::new()
            .chain_update(seed.as_bytes())
            .chain_update(round.to_le_bytes())
            .finalize();
        color = format!("#{:02x}{:02x}{:02x}", digest[0], digest[1], digest[2]);
        if !forbidden.contains(&color) {
            break;
        }
    }
    color
}

/// Source of fresh grade colours for the classifier.
pub trait ColorGenerator {
    /// `forbidden` holds lower-case hex strings; the result must not be one
    /// of them.
    fn next_color(&mut self, grade: &str, forbidden: &HashSet<String>) -> String;
}

pub struct RandomColorGenerator {
    rng: StdRng,
    max_attempts: Option<u32>,
}

impl RandomColorGenerator {
    pub fn new(seed: Option<u64>, max_attempts: Option<u32>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng, max_attempts }
    }
}

impl Default for RandomColorGenerator {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl ColorGenerator for RandomColorGenerator {
    fn next_color(&mut self, grade: &str, forbidden: &HashSet<String>) -> String {
        random_color(&mut self.rng, forbidden, self.max_attempts, grade)
    }
}
