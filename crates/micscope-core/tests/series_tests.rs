// Host-side tests for sample buffers and per-series frame refresh.

use micscope_core::*;
use std::cell::RefCell;

struct FakeAnalyser {
    waveform: RefCell<Vec<f32>>,
    spectrum: RefCell<Vec<f32>>,
    min_db: f64,
    max_db: f64,
}

impl FakeAnalyser {
    fn new(fft_size: usize) -> Self {
        Self {
            waveform: RefCell::new(vec![0.0; fft_size]),
            spectrum: RefCell::new(vec![-100.0; fft_size / 2]),
            min_db: -100.0,
            max_db: -30.0,
        }
    }
}

impl AnalysisSource for FakeAnalyser {
    fn waveform_len(&self) -> usize {
        self.waveform.borrow().len()
    }
    fn spectrum_len(&self) -> usize {
        self.spectrum.borrow().len()
    }
    fn fill_waveform(&self, out: &mut [f32]) {
        out.copy_from_slice(&self.waveform.borrow());
    }
    fn fill_spectrum(&self, out: &mut [f32]) {
        out.copy_from_slice(&self.spectrum.borrow());
    }
    fn decibel_range(&self) -> Result<ValueRange> {
        ValueRange::from_decibels(self.min_db, self.max_db)
    }
}

#[test]
fn series_set_is_sized_from_the_source() {
    let src = FakeAnalyser::new(2048);
    let set = SeriesSet::for_source(&src);
    assert_eq!(set.get(SeriesKind::Waveform).len(), 2048);
    assert_eq!(set.get(SeriesKind::Spectrum).len(), 1024);
}

#[test]
fn waveform_refresh_copies_samples_and_builds_uniforms() {
    let src = FakeAnalyser::new(64);
    src.waveform.borrow_mut()[3] = 0.5;
    let mut set = SeriesSet::for_source(&src);

    let frame = set.refresh(&src, SeriesKind::Waveform).unwrap();
    assert_eq!(frame.kind, SeriesKind::Waveform);
    assert_eq!(frame.samples.len(), 64);
    assert_eq!(frame.samples[3], 0.5);
    assert_eq!(frame.uniforms.length, 64.0);
    assert_eq!(frame.uniforms.min_value, -1.0);
    assert_eq!(frame.uniforms.max_value, 1.0);
    assert_eq!(frame.uniforms.color, WAVEFORM_COLOR);
}

#[test]
fn spectrum_refresh_uses_the_source_decibel_range() {
    let mut src = FakeAnalyser::new(64);
    src.min_db = -90.0;
    src.max_db = -10.0;
    let mut set = SeriesSet::for_source(&src);

    let frame = set.refresh(&src, SeriesKind::Spectrum).unwrap();
    assert_eq!(frame.samples.len(), 32);
    assert_eq!(frame.uniforms.length, 32.0);
    assert_eq!(frame.uniforms.min_value, -90.0);
    assert_eq!(frame.uniforms.max_value, -10.0);
    assert_eq!(frame.uniforms.color, SPECTRUM_COLOR);
}

#[test]
fn refresh_rejects_a_source_whose_window_changed() {
    let src = FakeAnalyser::new(64);
    let mut set = SeriesSet::for_source(&src);
    src.waveform.borrow_mut().resize(128, 0.25);

    let err = set.refresh(&src, SeriesKind::Waveform).unwrap_err();
    assert_eq!(
        err,
        ScopeError::LengthMismatch {
            series: "waveform",
            expected: 64,
            actual: 128,
        }
    );
    let buf = set.get(SeriesKind::Waveform);
    assert_eq!(buf.len(), 64);
    assert!(buf.as_slice().iter().all(|&v| v == 0.0));
}

#[test]
fn empty_decibel_range_is_an_error() {
    let mut src = FakeAnalyser::new(32);
    src.max_db = src.min_db;
    let mut set = SeriesSet::for_source(&src);
    assert!(matches!(
        set.refresh(&src, SeriesKind::Spectrum),
        Err(ScopeError::InvalidRange { .. })
    ));
    // waveform does not depend on the decibel range
    assert!(set.refresh(&src, SeriesKind::Waveform).is_ok());
}

#[test]
fn copy_from_never_changes_length() {
    let mut buf = SampleBuffer::new(SeriesKind::Spectrum, 4);
    buf.copy_from(&[1.0, 2.0, 3.0, 4.0]).unwrap();
    assert_eq!(buf.as_slice(), &[1.0, 2.0, 3.0, 4.0]);

    assert!(buf.copy_from(&[1.0, 2.0]).is_err());
    assert!(buf.copy_from(&[0.0; 5]).is_err());
    assert_eq!(buf.len(), 4);
    assert_eq!(buf.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn value_range_rejects_empty_and_non_finite_bounds() {
    assert!(ValueRange::new(1.0, 1.0).is_err());
    assert!(ValueRange::new(2.0, 1.0).is_err());
    assert!(ValueRange::new(f32::NAN, 1.0).is_err());
    assert!(ValueRange::new(0.0, f32::INFINITY).is_err());

    let r = ValueRange::new(-100.0, -30.0).unwrap();
    assert!(r.contains(-100.0));
    assert!(r.contains(-30.0));
    assert!(!r.contains(-29.0));
}

#[test]
fn draw_order_is_waveform_then_spectrum() {
    assert_eq!(SeriesKind::ALL, [SeriesKind::Waveform, SeriesKind::Spectrum]);
    assert_eq!(SeriesKind::Waveform.label(), "waveform");
    assert_eq!(SeriesKind::Spectrum.label(), "spectrum");
}

#[test]
fn static_buffers_refuse_uploads() {
    assert!(!UsageHint::Static.is_writable());
    assert_eq!(
        check_upload(SeriesKind::Waveform, UsageHint::Static, 8, 8),
        Err(ScopeError::ImmutableBuffer("waveform"))
    );
}

#[test]
fn dynamic_buffers_accept_uploads_of_the_allocated_length() {
    assert!(UsageHint::Dynamic.is_writable());
    assert!(check_upload(SeriesKind::Spectrum, UsageHint::Dynamic, 1024, 1024).is_ok());
    assert_eq!(
        check_upload(SeriesKind::Spectrum, UsageHint::Dynamic, 1024, 512),
        Err(ScopeError::LengthMismatch {
            series: "spectrum",
            expected: 1024,
            actual: 512
        })
    );
}
