use crate::{dom, viewport};
use micscope_core::{
    ScopeError, SeriesFrame, SeriesKind, SeriesSet, UsageHint, CLEAR_COLOR, LINE_UNIFORMS_SIZE,
    LINE_WGSL,
};
use web_sys as web;

mod buffers;
mod program;

use buffers::{create_series_buffer, update_series_buffer, SeriesBuffer};
use program::{build_line_program, LineProgram, StageSource};

/// Vertex data plus the uniform slot one series draws with. Each series
/// owns its uniform buffer so both draws in a pass see their own values.
struct SeriesResources {
    vertices: SeriesBuffer,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl SeriesResources {
    fn new(device: &wgpu::Device, program: &LineProgram, kind: SeriesKind, initial: &[f32]) -> Self {
        let vertices = create_series_buffer(device, kind, initial, UsageHint::Dynamic);
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("line_uniforms"),
            size: LINE_UNIFORMS_SIZE as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("line_bg"),
            layout: &program.bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        Self {
            vertices,
            uniform_buffer,
            bind_group,
        }
    }
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    program: LineProgram,
    waveform: SeriesResources,
    spectrum: SeriesResources,
    clear_color: wgpu::Color,
}

impl GpuState {
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        series: &SeriesSet,
    ) -> Result<Self, ScopeError> {
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| ScopeError::Gpu(format!("create_surface: {}", e)))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| ScopeError::Gpu("No WebGPU adapter".into()))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| ScopeError::Gpu(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| ScopeError::Gpu("surface reports no formats".into()))?;
        let max_dim = device.limits().max_texture_dimension_2d;
        // the canvas was sized before the device limits were known
        let (width, height) = viewport::clamp_to_limit((canvas.width(), canvas.height()), max_dim);
        dom::set_canvas_size(canvas, (width, height));
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let program = build_line_program(
            &device,
            "line_program",
            StageSource {
                label: "line.vs",
                source: LINE_WGSL,
                entry_point: "vs_line",
            },
            StageSource {
                label: "line.fs",
                source: LINE_WGSL,
                entry_point: "fs_line",
            },
            format,
        )
        .await?;

        let waveform = SeriesResources::new(
            &device,
            &program,
            SeriesKind::Waveform,
            series.get(SeriesKind::Waveform).as_slice(),
        );
        let spectrum = SeriesResources::new(
            &device,
            &program,
            SeriesKind::Spectrum,
            series.get(SeriesKind::Spectrum).as_slice(),
        );
        log::info!(
            "[render] surface {}x{} {:?}, series buffers {} + {} samples",
            config.width,
            config.height,
            format,
            waveform.vertices.len(),
            spectrum.vertices.len()
        );

        let [r, g, b, a] = CLEAR_COLOR;
        Ok(Self {
            surface,
            device,
            queue,
            config,
            program,
            waveform,
            spectrum,
            clear_color: wgpu::Color { r, g, b, a },
        })
    }

    /// Largest surface edge the device accepts.
    pub fn max_surface_dim(&self) -> u32 {
        self.device.limits().max_texture_dimension_2d
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width == self.config.width && height == self.config.height {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        log::debug!("[render] viewport {}x{}", width, height);
    }

    fn series(&self, kind: SeriesKind) -> &SeriesResources {
        match kind {
            SeriesKind::Waveform => &self.waveform,
            SeriesKind::Spectrum => &self.spectrum,
        }
    }

    /// Copy a refreshed series and its uniforms to the device.
    pub fn upload(&self, frame: &SeriesFrame<'_>) -> Result<(), ScopeError> {
        let res = self.series(frame.kind);
        update_series_buffer(&self.queue, &res.vertices, frame.samples)?;
        let block = frame.uniforms.encode(&self.program.uniforms)?;
        self.queue
            .write_buffer(&res.uniform_buffer, 0, block.as_bytes());
        Ok(())
    }

    /// Clear and draw both series as line strips, waveform first.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scope_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_viewport(
                0.0,
                0.0,
                self.config.width as f32,
                self.config.height as f32,
                0.0,
                1.0,
            );
            rpass.set_pipeline(&self.program.pipeline);
            for kind in SeriesKind::ALL {
                let res = self.series(kind);
                rpass.set_bind_group(0, &res.bind_group, &[]);
                rpass.set_vertex_buffer(0, res.vertices.slice());
                rpass.draw(0..res.vertices.len() as u32, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
