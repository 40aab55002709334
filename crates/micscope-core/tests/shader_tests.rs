// Host-side tests for line.wgsl: the shader must validate and its uniform
// struct must agree with the Rust-side block layout and name table.

use micscope_core::*;
use naga::valid::{Capabilities, ValidationFlags, Validator};
use naga::{Binding, Module, ShaderStage, TypeInner};

fn parse_line_shader() -> Module {
    let module = naga::front::wgsl::parse_str(LINE_WGSL).expect("line.wgsl parses");
    Validator::new(ValidationFlags::all(), Capabilities::all())
        .validate(&module)
        .expect("line.wgsl validates");
    module
}

fn line_uniforms_struct(module: &Module) -> (Vec<(String, u32)>, u32) {
    module
        .types
        .iter()
        .find_map(|(_, ty)| match (&ty.name, &ty.inner) {
            (Some(name), TypeInner::Struct { members, span }) if name == "LineUniforms" => {
                let fields = members
                    .iter()
                    .map(|m| (m.name.clone().unwrap_or_default(), m.offset))
                    .collect();
                Some((fields, *span))
            }
            _ => None,
        })
        .expect("LineUniforms struct declared")
}

#[test]
fn entry_points_exist_for_both_stages() {
    let module = parse_line_shader();
    let stage_of = |name: &str| {
        module
            .entry_points
            .iter()
            .find(|ep| ep.name == name)
            .map(|ep| ep.stage)
    };
    assert_eq!(stage_of("vs_line"), Some(ShaderStage::Vertex));
    assert_eq!(stage_of("fs_line"), Some(ShaderStage::Fragment));
}

#[test]
fn vertex_stage_reads_one_value_at_location_zero() {
    let module = parse_line_shader();
    let vs = module
        .entry_points
        .iter()
        .find(|ep| ep.name == "vs_line")
        .expect("vs_line");
    let locations: Vec<u32> = vs
        .function
        .arguments
        .iter()
        .filter_map(|arg| match arg.binding {
            Some(Binding::Location { location, .. }) => Some(location),
            _ => None,
        })
        .collect();
    assert_eq!(locations, vec![0]);
}

#[test]
fn uniform_struct_matches_rust_block() {
    let module = parse_line_shader();
    let (fields, span) = line_uniforms_struct(&module);
    assert_eq!(span as usize, LINE_UNIFORMS_SIZE);

    let locs = UniformLocations::for_line_program();
    assert_eq!(locs.block_size(), span as usize);
    assert_eq!(locs.len(), fields.len());

    let uniform_name = |wgsl: &str| match wgsl {
        "color" => U_COLOR,
        "length" => U_LENGTH,
        "min_value" => U_MIN_VALUE,
        "max_value" => U_MAX_VALUE,
        other => panic!("unexpected LineUniforms member `{other}`"),
    };
    for (member, offset) in &fields {
        let loc = locs.get(uniform_name(member)).unwrap();
        assert_eq!(loc.offset, *offset as usize, "offset of `{member}`");
    }
}
