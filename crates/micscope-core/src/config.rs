use crate::constants::*;
use crate::error::{Result, ScopeError};
use crate::series::ValueRange;

/// Analyser settings applied when the capture graph is built.
#[derive(Clone, Debug, PartialEq)]
pub struct ScopeConfig {
    pub fft_size: u32,
    pub min_decibels: f64,
    pub max_decibels: f64,
    pub smoothing: f64,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            fft_size: DEFAULT_FFT_SIZE,
            min_decibels: DEFAULT_MIN_DECIBELS,
            max_decibels: DEFAULT_MAX_DECIBELS,
            smoothing: DEFAULT_SMOOTHING,
        }
    }
}

impl ScopeConfig {
    /// Defaults overridden by `fft`, `min_db`, `max_db` and `smoothing`
    /// from a URL query string (leading `?` optional).
    pub fn from_query(query: &str) -> Result<Self> {
        let mut cfg = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "fft" => cfg.fft_size = parse(key, value)?,
                "min_db" => cfg.min_decibels = parse(key, value)?,
                "max_db" => cfg.max_decibels = parse(key, value)?,
                "smoothing" => cfg.smoothing = parse(key, value)?,
                _ => log::warn!("ignoring unknown query parameter `{}`", key),
            }
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.fft_size.is_power_of_two()
            || !(MIN_FFT_SIZE..=MAX_FFT_SIZE).contains(&self.fft_size)
        {
            return Err(invalid(
                "fft",
                format!(
                    "{} is not a power of two in [{}, {}]",
                    self.fft_size, MIN_FFT_SIZE, MAX_FFT_SIZE
                ),
            ));
        }
        ValueRange::from_decibels(self.min_decibels, self.max_decibels)
            .map_err(|e| invalid("min_db/max_db", e.to_string()))?;
        if !(0.0..=1.0).contains(&self.smoothing) {
            return Err(invalid(
                "smoothing",
                format!("{} is outside [0, 1]", self.smoothing),
            ));
        }
        Ok(())
    }

    /// Waveform samples per frame.
    pub fn waveform_len(&self) -> usize {
        self.fft_size as usize
    }

    /// Spectrum bins per frame.
    pub fn spectrum_len(&self) -> usize {
        (self.fft_size / 2) as usize
    }
}

fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e: T::Err| invalid(key, format!("`{}`: {}", value, e)))
}

fn invalid(key: &str, reason: String) -> ScopeError {
    ScopeError::InvalidConfig {
        key: key.to_string(),
        reason,
    }
}
