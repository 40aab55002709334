use micscope_core::{AnalysisSource, ScopeConfig, ScopeError, ValueRange};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Create the audio context. Must run inside the start click so the
/// browser lets it produce sound-graph output.
pub fn create_context() -> Result<web::AudioContext, ScopeError> {
    let audio_ctx = web::AudioContext::new().map_err(|e| host_error("AudioContext", &e))?;
    _ = audio_ctx.resume();
    Ok(audio_ctx)
}

/// Ask for microphone access and wait for the user's answer.
pub async fn request_microphone() -> Result<web::MediaStream, ScopeError> {
    let window = web::window().ok_or_else(|| ScopeError::Host("no window".into()))?;
    let devices = window
        .navigator()
        .media_devices()
        .map_err(|e| ScopeError::CaptureUnavailable(format!("mediaDevices: {:?}", e)))?;
    let constraints = web::MediaStreamConstraints::new();
    constraints.set_audio(&JsValue::TRUE);
    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(capture_error)?;
    let stream = JsFuture::from(promise).await.map_err(capture_error)?;
    stream.dyn_into::<web::MediaStream>().map_err(|_| {
        ScopeError::CaptureUnavailable("getUserMedia did not resolve to a MediaStream".into())
    })
}

fn capture_error(e: JsValue) -> ScopeError {
    match e.dyn_ref::<web::DomException>() {
        Some(ex) if matches!(ex.name().as_str(), "NotAllowedError" | "SecurityError") => {
            ScopeError::CapturePermissionDenied(ex.message())
        }
        Some(ex) => ScopeError::CaptureUnavailable(format!("{}: {}", ex.name(), ex.message())),
        None => ScopeError::CaptureUnavailable(format!("{:?}", e)),
    }
}

fn host_error(what: &str, e: &JsValue) -> ScopeError {
    ScopeError::Host(format!("{} error: {:?}", what, e))
}

/// Microphone → analyser graph. The analyser is a sink; nothing is routed
/// to the speakers.
pub struct CaptureSource {
    _audio_ctx: web::AudioContext,
    _input: web::MediaStreamAudioSourceNode,
    analyser: web::AnalyserNode,
}

impl CaptureSource {
    pub fn connect(
        audio_ctx: web::AudioContext,
        stream: &web::MediaStream,
        config: &ScopeConfig,
    ) -> Result<Self, ScopeError> {
        let input = audio_ctx
            .create_media_stream_source(stream)
            .map_err(|e| host_error("MediaStreamAudioSourceNode", &e))?;
        let analyser = audio_ctx
            .create_analyser()
            .map_err(|e| host_error("AnalyserNode", &e))?;
        configure_analyser(&analyser, config)?;
        _ = input
            .connect_with_audio_node(&analyser)
            .map_err(|e| host_error("connect", &e))?;
        log::info!(
            "[audio] fft_size={} bins={} range=[{}, {}] dB",
            analyser.fft_size(),
            analyser.frequency_bin_count(),
            analyser.min_decibels(),
            analyser.max_decibels()
        );
        Ok(Self {
            _audio_ctx: audio_ctx,
            _input: input,
            analyser,
        })
    }
}

// The decibel setters reject min >= max at every step, so order the two
// writes to keep the interval valid throughout.
fn configure_analyser(analyser: &web::AnalyserNode, config: &ScopeConfig) -> Result<(), ScopeError> {
    _ = analyser.set_fft_size(config.fft_size);
    if config.min_decibels < analyser.max_decibels() {
        _ = analyser.set_min_decibels(config.min_decibels);
        _ = analyser.set_max_decibels(config.max_decibels);
    } else {
        _ = analyser.set_max_decibels(config.max_decibels);
        _ = analyser.set_min_decibels(config.min_decibels);
    }
    _ = analyser.set_smoothing_time_constant(config.smoothing);

    if analyser.fft_size() != config.fft_size
        || analyser.min_decibels() != config.min_decibels
        || analyser.max_decibels() != config.max_decibels
    {
        return Err(ScopeError::CaptureUnavailable(format!(
            "analyser rejected fft_size={} range=[{}, {}]",
            config.fft_size, config.min_decibels, config.max_decibels
        )));
    }
    Ok(())
}

impl AnalysisSource for CaptureSource {
    fn waveform_len(&self) -> usize {
        self.analyser.fft_size() as usize
    }

    fn spectrum_len(&self) -> usize {
        self.analyser.frequency_bin_count() as usize
    }

    fn fill_waveform(&self, out: &mut [f32]) {
        self.analyser.get_float_time_domain_data(out);
    }

    fn fill_spectrum(&self, out: &mut [f32]) {
        self.analyser.get_float_frequency_data(out);
    }

    fn decibel_range(&self) -> Result<ValueRange, ScopeError> {
        ValueRange::from_decibels(self.analyser.min_decibels(), self.analyser.max_decibels())
    }
}
