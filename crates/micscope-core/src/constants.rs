use glam::Vec3;

// Shared plotting/analysis constants used by the web frontend.

// Analyser defaults (match the WebAudio AnalyserNode defaults)
pub const DEFAULT_FFT_SIZE: u32 = 2048;
pub const DEFAULT_MIN_DECIBELS: f64 = -100.0;
pub const DEFAULT_MAX_DECIBELS: f64 = -30.0;
pub const DEFAULT_SMOOTHING: f64 = 0.8;

// Accepted analyser window sizes
pub const MIN_FFT_SIZE: u32 = 32;
pub const MAX_FFT_SIZE: u32 = 32768;

// Time-domain samples are normalized amplitudes
pub const WAVEFORM_MIN_VALUE: f32 = -1.0;
pub const WAVEFORM_MAX_VALUE: f32 = 1.0;

// Series palette
pub const WAVEFORM_COLOR: Vec3 = Vec3::new(1.0, 0.0, 0.0); // red
pub const SPECTRUM_COLOR: Vec3 = Vec3::new(0.0, 0.0, 1.0); // blue

pub const CLEAR_COLOR: [f64; 4] = [0.0, 0.0, 0.0, 1.0];

// How often frame statistics are logged
pub const STATS_REPORT_INTERVAL_SEC: f32 = 5.0;
