use std::ffi::CStr;

use crate::program::StageKind;

/// Driver entry points used by the shader program pipeline.
///
/// `GlBackend` forwards to the real driver; tests substitute a handle-tracking
/// fake so the pipeline can run without a GL context.
pub trait Backend {
    fn create_shader(&mut self, kind: StageKind) -> u32;
    fn shader_source(&mut self, shader: u32, source: &CStr);
    fn compile_shader(&mut self, shader: u32);
    fn compile_status(&self, shader: u32) -> bool;
    fn shader_info_log(&self, shader: u32) -> String;
    /// Deleting handle 0 is a no-op, matching driver semantics.
    fn delete_shader(&mut self, shader: u32);

    fn create_program(&mut self) -> u32;
    fn attach_shader(&mut self, program: u32, shader: u32);
    fn link_program(&mut self, program: u32);
    fn link_status(&self, program: u32) -> bool;
    fn program_info_log(&self, program: u32) -> String;
    fn validate_program(&mut self, program: u32);
    fn delete_program(&mut self, program: u32);
}

/// The real driver. Requires a current context on the calling thread.
#[derive(Default)]
pub struct GlBackend {
    _private: (),
}

impl GlBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Backend for GlBackend {
    fn create_shader(&mut self, kind: StageKind) -> u32 {
        unsafe { gl::CreateShader(kind.gl_enum()) }
    }

    fn shader_source(&mut self, shader: u32, source: &CStr) {
        let ptr = source.as_ptr();
        unsafe {
            gl::ShaderSource(shader, 1, (&ptr) as *const _, std::ptr::null());
        }
    }

    fn compile_shader(&mut self, shader: u32) {
        unsafe { gl::CompileShader(shader) }
    }

    fn compile_status(&self, shader: u32) -> bool {
        let mut status = 0;
        unsafe {
            gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status);
        }
        status == gl::TRUE as i32
    }

    fn shader_info_log(&self, shader: u32) -> String {
        let mut len = 0;
        unsafe {
            gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
        }
        if len <= 0 {
            return String::new();
        }

        let mut buffer = vec![0u8; len as usize];
        unsafe {
            gl::GetShaderInfoLog(
                shader,
                len,
                &mut len,
                buffer.as_mut_ptr() as *mut gl::types::GLchar,
            );
        }
        buffer.truncate(len as usize);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    fn delete_shader(&mut self, shader: u32) {
        unsafe { gl::DeleteShader(shader) }
    }

    fn create_program(&mut self) -> u32 {
        unsafe { gl::CreateProgram() }
    }

    fn attach_shader(&mut self, program: u32, shader: u32) {
        unsafe { gl::AttachShader(program, shader) }
    }

    fn link_program(&mut self, program: u32) {
        unsafe { gl::LinkProgram(program) }
    }

    fn link_status(&self, program: u32) -> bool {
        let mut status = 0;
        unsafe {
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut status);
        }
        status == gl::TRUE as i32
    }

    fn program_info_log(&self, program: u32) -> String {
        let mut len = 0;
        unsafe {
            gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
        }
        if len <= 0 {
            return String::new();
        }

        let mut buffer = vec![0u8; len as usize];
        unsafe {
            gl::GetProgramInfoLog(
                program,
                len,
                &mut len,
                buffer.as_mut_ptr() as *mut gl::types::GLchar,
            );
        }
        buffer.truncate(len as usize);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    fn validate_program(&mut self, program: u32) {
        unsafe { gl::ValidateProgram(program) }
    }

    fn delete_program(&mut self, program: u32) {
        unsafe { gl::DeleteProgram(program) }
    }
}
