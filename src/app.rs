use std::path::PathBuf;

use winit::{
    dpi::PhysicalSize,
    event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent},
    event_loop::EventLoop,
    window::{Window, WindowBuilder},
};

use crate::config::{DeviceConfig, LifeConfig};

pub struct WindowContext {
    window: Window,
    queue: wgpu::Queue,
    device: wgpu::Device,
    surface: wgpu::Surface,
    config: wgpu::SurfaceConfiguration,
}

impl WindowContext {
    async fn new(window: Window, device_config: &DeviceConfig) -> Result<Self, LifeError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: device_config.backends,
            dx12_shader_compiler: Default::default(),
        });

        // # Safety
        //
        // The surface needs to live as long as the window that created it.
        // The context owns the window so this holds.
        let surface = unsafe { instance.create_surface(&window) }?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: device_config.power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(LifeError::AdapterError)?;
        log::info!("Using adapter {:?}", adapter.get_info());

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    features: device_config.features,
                    limits: device_config.limits.clone(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or(LifeError::AdapterError)?;
        let present_mode = if surface_caps
            .present_modes
            .contains(&device_config.present_mode)
        {
            device_config.present_mode
        } else {
            wgpu::PresentMode::Fifo
        };

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        Ok(Self {
            window,
            queue,
            device,
            surface,
            config,
        })
    }

    #[inline]
    pub fn window(&self) -> &Window {
        &self.window
    }

    #[inline]
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    #[inline]
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Physical size the surface is configured for.
    #[inline]
    pub fn size(&self) -> PhysicalSize<u32> {
        PhysicalSize::new(self.config.width, self.config.height)
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }
}

/// Creates the window and device, then drives `app` until the window closes.
///
/// Only returns when setup fails, the event loop exits the process.
pub async fn run<A: GridApp + 'static>(mut app: A, config: &LifeConfig) -> Result<(), LifeError> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info,wgpu_core=warn,wgpu_hal=warn,naga=warn"),
    )
    .init();

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(&config.window.title)
        .with_inner_size(PhysicalSize::new(config.window.width, config.window.height))
        .with_resizable(false)
        .build(&event_loop)?;

    let mut ctx = WindowContext::new(window, &config.device).await?;

    app.start(&mut ctx)?;

    let exit_on_esc = config.window.exit_on_esc;
    let mut request_window_close = false;
    event_loop.run(move |event, _event_loop, control_flow| {
        control_flow.set_poll();

        match event {
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == ctx.window().id() => {
                app.input(&mut ctx, event);

                if let Some(physical_size) = surface_size_change(event) {
                    if physical_size != ctx.size() {
                        log::warn!(
                            "Window is now {}x{}, resizing is not supported, the grid keeps its layout",
                            physical_size.width,
                            physical_size.height
                        );
                        ctx.resize(physical_size);
                    }
                }

                match event {
                    WindowEvent::KeyboardInput {
                        input:
                            KeyboardInput {
                                state: ElementState::Pressed,
                                virtual_keycode: Some(VirtualKeyCode::Escape),
                                ..
                            },
                        is_synthetic: false,
                        ..
                    } if exit_on_esc => {
                        request_window_close = true;
                    }
                    WindowEvent::CloseRequested => {
                        request_window_close = true;
                    }
                    _ => {}
                }
            }
            Event::MainEventsCleared => {
                if request_window_close {
                    control_flow.set_exit();
                } else {
                    ctx.window().request_redraw();
                }
            }
            Event::RedrawRequested(window_id) if window_id == ctx.window().id() => {
                app.update(&mut ctx);

                match ctx.surface.get_current_texture() {
                    Ok(frame) => {
                        let mut encoder =
                            ctx.device
                                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                                    label: Some("Render Commands"),
                                });

                        app.render(
                            &ctx,
                            RenderData {
                                frame: &frame,
                                encoder: &mut encoder,
                            },
                        );

                        ctx.queue.submit(Some(encoder.finish()));
                        frame.present();
                    }
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        ctx.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Swapchain error: out of memory. Rendering cannot continue.");
                        control_flow.set_exit_with_code(1);
                    }
                    Err(wgpu::SurfaceError::Timeout) => {
                        log::warn!("Surface timed out, skipping frame");
                    }
                }
            }
            Event::LoopDestroyed => {
                app.end(&mut ctx);
            }
            _ => {}
        }
    })
}

/// New physical surface size carried by a resize or a DPI change.
fn surface_size_change(event: &WindowEvent) -> Option<PhysicalSize<u32>> {
    match event {
        WindowEvent::Resized(physical_size) => Some(*physical_size),
        WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
            // new_inner_size is &&mut so we have to dereference it twice
            Some(**new_inner_size)
        }
        _ => None,
    }
}

/// Stages of the app, each run at a specific point of the winit event loop.
pub trait GridApp {
    /// Run once before the event loop
    fn start(&mut self, _context: &mut WindowContext) -> Result<(), LifeError> {
        Ok(())
    }

    /// Run on each window event
    fn input(&mut self, _context: &mut WindowContext, _event: &WindowEvent) {}

    /// Run each frame
    fn update(&mut self, _context: &mut WindowContext) {}

    /// Run each frame after update
    fn render(&mut self, _context: &WindowContext, _render_data: RenderData) {}

    /// Run at exit
    fn end(&mut self, _context: &mut WindowContext) {}
}

/// Data needed to record one frame. Only lives while rendering, the encoder is
/// submitted at the end of the frame.
pub struct RenderData<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub frame: &'a wgpu::SurfaceTexture,
}

#[derive(Debug)]
pub enum LifeError {
    AdapterError,
    WindowError(winit::error::OsError),
    DeviceError(wgpu::RequestDeviceError),
    SurfaceError(wgpu::CreateSurfaceError),
    ShaderError {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for LifeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LifeError::AdapterError => write!(f, "AdapterError: no suitable adapter"),
            LifeError::WindowError(e) => write!(f, "WindowError: {}", e),
            LifeError::DeviceError(e) => write!(f, "DeviceError: {}", e),
            LifeError::SurfaceError(e) => write!(f, "SurfaceError: {}", e),
            LifeError::ShaderError { path, source } => {
                write!(f, "ShaderError: {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for LifeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LifeError::AdapterError => None,
            LifeError::WindowError(e) => Some(e),
            LifeError::DeviceError(e) => Some(e),
            LifeError::SurfaceError(e) => Some(e),
            LifeError::ShaderError { source, .. } => Some(source),
        }
    }
}

impl From<winit::error::OsError> for LifeError {
    fn from(e: winit::error::OsError) -> Self {
        LifeError::WindowError(e)
    }
}

impl From<wgpu::RequestDeviceError> for LifeError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        LifeError::DeviceError(e)
    }
}

impl From<wgpu::CreateSurfaceError> for LifeError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        LifeError::SurfaceError(e)
    }
}
