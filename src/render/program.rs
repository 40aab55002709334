//! Shader program builder: compile each stage, then link the stages into a
//! line-strip render pipeline.
//!
//! Both steps run inside a validation error scope so a bad shader or an
//! interface mismatch comes back as a typed error instead of a device-lost
//! panic.

use micscope_core::{ScopeError, UniformLocations, LINE_UNIFORMS_SIZE};
use smallvec::SmallVec;
use std::num::NonZeroU64;

/// One programmable stage: source text plus the entry point to run.
#[derive(Clone, Copy)]
pub struct StageSource<'a> {
    pub label: &'a str,
    pub source: &'a str,
    pub entry_point: &'a str,
}

/// Linked line program and its parameter lookup table.
pub struct LineProgram {
    pub pipeline: wgpu::RenderPipeline,
    pub bind_group_layout: wgpu::BindGroupLayout,
    pub uniforms: UniformLocations,
}

// Slot 0: one f32 sample per vertex
const VALUE_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32];

fn value_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<f32>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &VALUE_ATTRIBUTES,
    }
}

fn format_message(m: &wgpu::CompilationMessage) -> String {
    let severity = match m.message_type {
        wgpu::CompilationMessageType::Error => "error",
        wgpu::CompilationMessageType::Warning => "warning",
        wgpu::CompilationMessageType::Info => "info",
    };
    match &m.location {
        Some(loc) => format!(
            "{}:{}: {}: {}",
            loc.line_number, loc.line_position, severity, m.message
        ),
        None => format!("{}: {}", severity, m.message),
    }
}

pub async fn compile_stage(
    device: &wgpu::Device,
    stage: StageSource<'_>,
) -> Result<wgpu::ShaderModule, ScopeError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(stage.label),
        source: wgpu::ShaderSource::Wgsl(stage.source.into()),
    });
    let info = module.get_compilation_info().await;
    let scope_error = device.pop_error_scope().await;

    let failed = scope_error.is_some()
        || info
            .messages
            .iter()
            .any(|m| matches!(m.message_type, wgpu::CompilationMessageType::Error));
    let mut lines: SmallVec<[String; 4]> = info.messages.iter().map(format_message).collect();
    if !failed {
        for line in &lines {
            log::warn!("[shader {}] {}", stage.label, line);
        }
        return Ok(module);
    }
    if let Some(e) = scope_error {
        lines.push(e.to_string());
    }
    Err(ScopeError::ShaderCompile {
        stage: stage.label.to_string(),
        source_text: stage.source.to_string(),
        log: lines.join("\n"),
    })
}

/// Compile `vertex` and `fragment` and link them for `color_format`
/// targets. Stages sharing one source text are compiled once.
pub async fn build_line_program(
    device: &wgpu::Device,
    label: &str,
    vertex: StageSource<'_>,
    fragment: StageSource<'_>,
    color_format: wgpu::TextureFormat,
) -> Result<LineProgram, ScopeError> {
    let vs_module = compile_stage(device, vertex).await?;
    let fs_module = if fragment.source == vertex.source {
        vs_module.clone()
    } else {
        compile_stage(device, fragment).await?
    };

    let uniforms = UniformLocations::for_line_program();

    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("line_bgl"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: NonZeroU64::new(LINE_UNIFORMS_SIZE as u64),
            },
            count: None,
        }],
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("line_pl"),
        bind_group_layouts: &[&bind_group_layout],
        push_constant_ranges: &[],
    });
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &vs_module,
            entry_point: Some(vertex.entry_point),
            buffers: &[value_buffer_layout()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::LineStrip,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &fs_module,
            entry_point: Some(fragment.entry_point),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });
    if let Some(e) = device.pop_error_scope().await {
        return Err(ScopeError::ProgramLink {
            program: label.to_string(),
            log: e.to_string(),
        });
    }

    log::info!(
        "[render] linked `{}` with {} uniforms ({} bytes)",
        label,
        uniforms.len(),
        uniforms.block_size()
    );
    Ok(LineProgram {
        pipeline,
        bind_group_layout,
        uniforms,
    })
}
