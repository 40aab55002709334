use crate::constants::{SPECTRUM_COLOR, WAVEFORM_COLOR, WAVEFORM_MAX_VALUE, WAVEFORM_MIN_VALUE};
use crate::error::{Result, ScopeError};
use crate::uniforms::RenderUniforms;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SeriesKind {
    /// Time-domain amplitudes in [-1, 1].
    Waveform,
    /// Frequency-bin magnitudes in decibels.
    Spectrum,
}

impl SeriesKind {
    /// Draw order: waveform first, spectrum on top.
    pub const ALL: [SeriesKind; 2] = [SeriesKind::Waveform, SeriesKind::Spectrum];

    pub fn label(self) -> &'static str {
        match self {
            SeriesKind::Waveform => "waveform",
            SeriesKind::Spectrum => "spectrum",
        }
    }

    pub fn color(self) -> Vec3 {
        match self {
            SeriesKind::Waveform => WAVEFORM_COLOR,
            SeriesKind::Spectrum => SPECTRUM_COLOR,
        }
    }
}

/// Non-empty, finite `[min, max]` interval a series is plotted against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueRange {
    min: f32,
    max: f32,
}

impl ValueRange {
    pub const WAVEFORM: ValueRange = ValueRange {
        min: WAVEFORM_MIN_VALUE,
        max: WAVEFORM_MAX_VALUE,
    };

    pub fn new(min: f32, max: f32) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(ScopeError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn from_decibels(min_db: f64, max_db: f64) -> Result<Self> {
        Self::new(min_db as f32, max_db as f32)
    }

    #[inline]
    pub fn min(&self) -> f32 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// The spectral-analysis primitive samples are pulled from.
///
/// Implementations copy their latest snapshot into the given slice without
/// waiting for new audio. Slices are always exactly the advertised length.
pub trait AnalysisSource {
    fn waveform_len(&self) -> usize;
    fn spectrum_len(&self) -> usize;
    fn fill_waveform(&self, out: &mut [f32]);
    fn fill_spectrum(&self, out: &mut [f32]);
    fn decibel_range(&self) -> Result<ValueRange>;

    fn series_len(&self, kind: SeriesKind) -> usize {
        match kind {
            SeriesKind::Waveform => self.waveform_len(),
            SeriesKind::Spectrum => self.spectrum_len(),
        }
    }
}

/// Fixed-length host copy of one series. The length is set at creation and
/// only the contents are ever replaced.
#[derive(Clone, Debug)]
pub struct SampleBuffer {
    kind: SeriesKind,
    samples: Vec<f32>,
}

impl SampleBuffer {
    pub fn new(kind: SeriesKind, len: usize) -> Self {
        Self {
            kind,
            samples: vec![0.0; len],
        }
    }

    pub fn kind(&self) -> SeriesKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.samples
    }

    /// Overwrite the contents; `data` must match the buffer length.
    pub fn copy_from(&mut self, data: &[f32]) -> Result<()> {
        check_len(self.kind, self.samples.len(), data.len())?;
        self.samples.copy_from_slice(data);
        Ok(())
    }

    fn refresh<S: AnalysisSource>(&mut self, source: &S) -> Result<()> {
        check_len(self.kind, self.samples.len(), source.series_len(self.kind))?;
        match self.kind {
            SeriesKind::Waveform => source.fill_waveform(&mut self.samples),
            SeriesKind::Spectrum => source.fill_spectrum(&mut self.samples),
        }
        Ok(())
    }
}

/// Reject writes whose length differs from the allocation.
#[inline]
pub fn check_len(kind: SeriesKind, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(ScopeError::LengthMismatch {
            series: kind.label(),
            expected,
            actual,
        });
    }
    Ok(())
}

/// How a series' GPU buffer is used after creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UsageHint {
    /// Written once at creation.
    Static,
    /// Rewritten every frame.
    Dynamic,
}

impl UsageHint {
    pub fn is_writable(self) -> bool {
        matches!(self, UsageHint::Dynamic)
    }
}

/// Gate an in-place upload of `actual` samples into a buffer allocated with
/// `expected` samples under `hint`.
pub fn check_upload(
    kind: SeriesKind,
    hint: UsageHint,
    expected: usize,
    actual: usize,
) -> Result<()> {
    if !hint.is_writable() {
        return Err(ScopeError::ImmutableBuffer(kind.label()));
    }
    check_len(kind, expected, actual)
}

/// Freshly refreshed samples for one draw call plus the uniforms to draw
/// them with.
#[derive(Debug)]
pub struct SeriesFrame<'a> {
    pub kind: SeriesKind,
    pub samples: &'a [f32],
    pub uniforms: RenderUniforms,
}

/// Host-side sample storage for both plotted series.
pub struct SeriesSet {
    waveform: SampleBuffer,
    spectrum: SampleBuffer,
}

impl SeriesSet {
    /// Size both buffers from the source's current window.
    pub fn for_source<S: AnalysisSource>(source: &S) -> Self {
        Self {
            waveform: SampleBuffer::new(SeriesKind::Waveform, source.waveform_len()),
            spectrum: SampleBuffer::new(SeriesKind::Spectrum, source.spectrum_len()),
        }
    }

    pub fn get(&self, kind: SeriesKind) -> &SampleBuffer {
        match kind {
            SeriesKind::Waveform => &self.waveform,
            SeriesKind::Spectrum => &self.spectrum,
        }
    }

    fn get_mut(&mut self, kind: SeriesKind) -> &mut SampleBuffer {
        match kind {
            SeriesKind::Waveform => &mut self.waveform,
            SeriesKind::Spectrum => &mut self.spectrum,
        }
    }

    /// Pull the latest snapshot of `kind` from `source`.
    pub fn refresh<S: AnalysisSource>(
        &mut self,
        source: &S,
        kind: SeriesKind,
    ) -> Result<SeriesFrame<'_>> {
        let range = match kind {
            SeriesKind::Waveform => ValueRange::WAVEFORM,
            SeriesKind::Spectrum => source.decibel_range()?,
        };
        let buffer = self.get_mut(kind);
        buffer.refresh(source)?;
        let uniforms = RenderUniforms::for_series(kind, buffer.len(), range);
        Ok(SeriesFrame {
            kind,
            samples: buffer.as_slice(),
            uniforms,
        })
    }
}
