use glow::HasContext;

use crate::device::InitError;

/// Programmable pipeline stage of a shader object.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub const fn gl_enum(self) -> u32 {
        match self {
            Self::Vertex => glow::VERTEX_SHADER,
            Self::Fragment => glow::FRAGMENT_SHADER,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
        }
    }
}

/// Compiles one shader stage.
///
/// Compile errors are logged, not returned: the driver under test decides
/// what a broken shader does, and some tests assert on exactly that. Only a
/// failure to allocate the shader object is an error.
pub fn compile_shader(
    gl: &glow::Context,
    stage: ShaderStage,
    source: &str,
) -> Result<glow::Shader, InitError> {
    unsafe {
        let shader = gl.create_shader(stage.gl_enum()).map_err(InitError::driver)?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if !gl.get_shader_compile_status(shader) {
            log::warn!(
                "{} shader failed to compile: {}",
                stage.name(),
                gl.get_shader_info_log(shader).trim()
            );
        }

        Ok(shader)
    }
}

/// Attaches `shaders`, binds each `(slot, name)` attribute and links.
///
/// Shaders stay attached; the caller decides when to delete them. Link
/// failures are logged and left for `GL_LINK_STATUS` checks to observe.
pub fn link_program(
    gl: &glow::Context,
    shaders: &[glow::Shader],
    bindings: &[(u32, &str)],
) -> Result<glow::Program, InitError> {
    unsafe {
        let program = gl.create_program().map_err(InitError::driver)?;

        for &shader in shaders {
            gl.attach_shader(program, shader);
        }
        for &(index, name) in bindings {
            gl.bind_attrib_location(program, index, name);
        }

        gl.link_program(program);

        if !gl.get_program_link_status(program) {
            log::warn!(
                "program failed to link: {}",
                gl.get_program_info_log(program).trim()
            );
        }

        Ok(program)
    }
}

/// Creates one object per item, in order.
///
/// When a creation fails, the objects already created are handed to `delete`
/// before the error is returned.
pub fn create_all<I, S, E>(
    items: impl IntoIterator<Item = I>,
    mut create: impl FnMut(I) -> Result<S, E>,
    mut delete: impl FnMut(S),
) -> Result<Vec<S>, E> {
    let mut created = Vec::new();
    for item in items {
        match create(item) {
            Ok(object) => created.push(object),
            Err(err) => {
                created.into_iter().for_each(&mut delete);
                return Err(err);
            }
        }
    }
    Ok(created)
}

/// Compiles every `(stage, source)` pair. Nothing is left behind on error.
pub fn compile_all(
    gl: &glow::Context,
    stages: &[(ShaderStage, &str)],
) -> Result<Vec<glow::Shader>, InitError> {
    create_all(
        stages.iter().copied(),
        |(stage, source)| compile_shader(gl, stage, source),
        |shader| unsafe { gl.delete_shader(shader) },
    )
}

pub fn delete_shaders(gl: &glow::Context, shaders: &[glow::Shader]) {
    for &shader in shaders {
        unsafe { gl.delete_shader(shader) };
    }
}

/// Compiles a vertex/fragment pair, links it and deletes both shaders.
///
/// Deleting right after linking only flags the shaders; they are freed with
/// the program.
pub fn build_program(
    gl: &glow::Context,
    vertex: &str,
    fragment: &str,
    bindings: &[(u32, &str)],
) -> Result<glow::Program, InitError> {
    let shaders = compile_all(
        gl,
        &[
            (ShaderStage::Vertex, vertex),
            (ShaderStage::Fragment, fragment),
        ],
    )?;
    let program = link_program(gl, &shaders, bindings);
    delete_shaders(gl, &shaders);
    program
}

/// `glGetProgramiv` for a single integer parameter.
pub fn program_param(gl: &glow::Context, program: glow::Program, pname: u32) -> i32 {
    unsafe { gl.get_program_parameter_i32(program, pname) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_enums() {
        assert_eq!(ShaderStage::Vertex.gl_enum(), 0x8B31);
        assert_eq!(ShaderStage::Fragment.gl_enum(), 0x8B30);
    }

    // ── create_all ────────────────────────────────────────────────────────

    fn create(item: u32) -> Result<u32, String> {
        if item == 0 {
            Err("creation failed".to_owned())
        } else {
            Ok(item * 10)
        }
    }

    #[test]
    fn all_objects_are_kept_on_success() {
        let mut deleted = Vec::new();
        let created = create_all([1u32, 2, 3], create, |h| deleted.push(h));
        assert_eq!(created, Ok(vec![10, 20, 30]));
        assert!(deleted.is_empty());
    }

    #[test]
    fn later_failure_deletes_earlier_objects() {
        let mut deleted = Vec::new();
        let created = create_all([1u32, 2, 0, 4], create, |h| deleted.push(h));
        assert_eq!(created, Err("creation failed".to_owned()));
        assert_eq!(deleted, vec![10, 20]);
    }

    #[test]
    fn first_failure_deletes_nothing() {
        let mut deleted = Vec::new();
        let created = create_all([0u32, 1], create, |h| deleted.push(h));
        assert!(created.is_err());
        assert!(deleted.is_empty());
    }
}
