use std::ffi::c_void;

use crate::geometry::Geometry;

pub struct GlRenderer {
    current_program: u32,
}

impl GlRenderer {
    pub fn new() -> Self {
        Self { current_program: 0 }
    }

    /// Draws indexed geometry with the given program handle. Handle 0 is
    /// bound like any other; the driver then silently draws nothing useful,
    /// which is the degraded mode after a failed shader build.
    pub fn draw(&mut self, geometry: &Geometry, program: u32) {
        if self.current_program != program {
            unsafe { gl::UseProgram(program) }
            self.current_program = program;
        }

        unsafe {
            gl::BindVertexArray(geometry.vao());
            gl::DrawElements(
                gl::TRIANGLES,
                geometry.indices() as i32,
                gl::UNSIGNED_INT,
                std::ptr::null::<c_void>(),
            );
        }
    }

    pub fn resize(&self, width: u32, height: u32) {
        unsafe {
            gl::Viewport(0, 0, width as i32, height as i32);
        }
    }

    pub fn clear_color(&self, r: f32, g: f32, b: f32) {
        unsafe {
            gl::ClearColor(r, g, b, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }
}

impl Default for GlRenderer {
    fn default() -> Self {
        Self::new()
    }
}
