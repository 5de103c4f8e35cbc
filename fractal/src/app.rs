use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, NotCurrentGlContextSurfaceAccessor,
    PossiblyCurrentContext, Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};

use glutin_winit::DisplayBuilder;

use raw_window_handle::HasRawWindowHandle;

use std::ffi::{CStr, CString};
use std::num::NonZeroU32;

use thiserror::Error;

use winit::dpi::{PhysicalSize, Size};
use winit::event::{ElementState, Event, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use gl_wrapper::backend::GlBackend;
use gl_wrapper::geometry::{GeometryBuilder, VertexAttribute};
use gl_wrapper::program::{ProgramTable, StageKind};
use gl_wrapper::renderer::GlRenderer;
use gl_wrapper::texture::Texture2D;
use gl_wrapper::{QUAD_INDICES, QUAD_VERTICES};

use crate::args::Args;
use crate::texture;

const WIDTH: u32 = 690;
const HEIGHT: u32 = 480;
const WIN_NAME: &str = "Shader - Fractal";

pub struct App {
    event_loop: EventLoop<()>,
    gl_context: PossiblyCurrentContext,
    gl_window: GlWindow,
}

impl App {
    pub fn new() -> Result<Self, AppError> {
        let event_loop = EventLoop::new();
        let window_builder = WindowBuilder::new()
            .with_inner_size(Size::Physical(PhysicalSize::new(WIDTH, HEIGHT)))
            .with_title(WIN_NAME);
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));
        let template = ConfigTemplateBuilder::new();

        let (window, gl_config) = display_builder
            .build(&event_loop, template, |mut configs| configs.next().unwrap())
            .map_err(|e| AppError::Window(e.to_string()))?;

        let window = window.ok_or_else(|| AppError::Window("no window was created".into()))?;
        let handle = Some(window.raw_window_handle());
        let gl_display = gl_config.display();

        let context_attr = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .build(handle);

        let gl_window = GlWindow::new(window, &gl_config)?;

        let gl_context = unsafe { gl_display.create_context(&gl_config, &context_attr)? }
            .make_current(&gl_window.surface)?;

        gl::load_with(|s| {
            gl_display
                .get_proc_address(CString::new(s).unwrap().as_c_str())
                .cast()
        });

        gl_window.surface.set_swap_interval(
            &gl_context,
            SwapInterval::Wait(NonZeroU32::new(1).unwrap()),
        )?;

        print_gl_version();

        Ok(Self {
            event_loop,
            gl_context,
            gl_window,
        })
    }

    pub fn run(self, args: Args) -> ! {
        let quad = GeometryBuilder::new(&QUAD_VERTICES, &QUAD_INDICES)
            .with_attribute(VertexAttribute::Vec2)
            .with_attribute(VertexAttribute::Vec3)
            .with_attribute(VertexAttribute::Vec2)
            .build()
            .unwrap();

        let mut programs = ProgramTable::new(GlBackend::new());
        programs.create_program(0);
        programs.attach_stage(0, &args.vertex, StageKind::Vertex);
        programs.attach_stage(0, &args.fragment, StageKind::Fragment);

        let texture = match &args.texture {
            Some(path) => match texture::load_rgba(path) {
                Ok(image) => match Texture2D::new(image.width, image.height, &image.pixels) {
                    Ok(texture) => Some(texture),
                    Err(e) => {
                        eprintln!("ERROR: couldn't upload texture: {e}");
                        None
                    }
                },
                Err(e) => {
                    eprintln!("ERROR: couldn't load texture <{}>: {e}", path.display());
                    None
                }
            },
            // No texture configured; a white pixel lets the vertex colors
            // through unchanged.
            None => Texture2D::new(1, 1, &[255; 4]).ok(),
        };

        let mut gl_renderer = GlRenderer::new();

        self.event_loop
            .run(move |event, _window_target, control_flow| {
                *control_flow = ControlFlow::Wait;
                match event {
                    Event::RedrawEventsCleared => {
                        self.gl_window.window.request_redraw();
                        self.gl_window
                            .surface
                            .swap_buffers(&self.gl_context)
                            .unwrap();
                    }
                    Event::RedrawRequested(_) => {
                        gl_renderer.clear_color(0.0, 0.0, 0.0);

                        if let Some(texture) = &texture {
                            texture.bind(0);
                        }

                        gl_renderer.draw(&quad, programs.handle(0));
                    }
                    Event::WindowEvent { event, .. } => match event {
                        WindowEvent::Resized(size) => {
                            if size.width != 0 && size.height != 0 {
                                self.gl_window.surface.resize(
                                    &self.gl_context,
                                    NonZeroU32::new(size.width).unwrap(),
                                    NonZeroU32::new(size.height).unwrap(),
                                );
                                gl_renderer.resize(size.width, size.height);
                            }
                        }
                        WindowEvent::KeyboardInput { input, .. } => {
                            if input.state == ElementState::Pressed
                                && input.virtual_keycode == Some(VirtualKeyCode::Q)
                            {
                                control_flow.set_exit();
                            }
                        }
                        WindowEvent::CloseRequested => control_flow.set_exit(),
                        _ => (),
                    },
                    Event::LoopDestroyed => {
                        programs.destroy_all();
                    }
                    _ => (),
                }
            })
    }
}

fn print_gl_version() {
    let version = unsafe {
        let ptr = gl::GetString(gl::VERSION);
        if ptr.is_null() {
            None
        } else {
            Some(CStr::from_ptr(ptr.cast()).to_string_lossy().into_owned())
        }
    };

    if let Some(version) = version {
        println!("OpenGL {version}");
    }
}

pub struct GlWindow {
    // XXX the surface must be dropped before the window.
    pub surface: Surface<WindowSurface>,
    pub window: Window,
}

impl GlWindow {
    pub fn new(window: Window, config: &Config) -> Result<Self, glutin::error::Error> {
        let (width, height): (u32, u32) = window.inner_size().into();
        let raw_window_handle = window.raw_window_handle();
        let attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_window_handle,
            NonZeroU32::new(width).unwrap(),
            NonZeroU32::new(height).unwrap(),
        );

        let surface = unsafe { config.display().create_window_surface(config, &attrs)? };

        Ok(Self { window, surface })
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("couldn't create window: {0}")]
    Window(String),
    #[error("couldn't create OpenGL context: {0}")]
    Context(#[from] glutin::error::Error),
}
