pub mod app;
pub mod config;
pub mod gameloop;
pub mod grid;
pub mod input;
pub mod layout;
pub mod pipelines;
pub mod quad;
pub mod shaders;
pub mod simulation;

pub use app::{GridApp, LifeError, RenderData, WindowContext};

use config::LifeConfig;
use gameloop::Time;
use input::{InputEvent, InputQueue};
use layout::GridLayout;
use pipelines::{CellPipeline, CellPushConstants};
use quad::QuadData;
use simulation::Simulation;
use winit::event::WindowEvent;

pub struct GameOfLifeApp {
    config: LifeConfig,
    time: Time,
    input: InputQueue,
    fps: Option<f32>,

    simulation: Option<Simulation>,
    quad: Option<QuadData>,
    cell_pipeline: Option<CellPipeline>,
}

impl GameOfLifeApp {
    pub fn new(config: LifeConfig) -> Self {
        Self {
            config,
            time: Time::default(),
            input: InputQueue::new(),
            fps: None,

            simulation: None,
            quad: None,
            cell_pipeline: None,
        }
    }

    pub fn simulation(&self) -> Option<&Simulation> {
        self.simulation.as_ref()
    }
}

impl Default for GameOfLifeApp {
    fn default() -> Self {
        Self::new(LifeConfig::default())
    }
}

// Think of this like reading a "table of contents".
// - Start is run before event loop
// - Input is run on winit input
// - Update is run every frame
// - Render is run after update every frame
impl GridApp for GameOfLifeApp {
    fn start(&mut self, context: &mut WindowContext) -> Result<(), LifeError> {
        // The grid is laid out once, from the size the window actually got
        let size = context.window().inner_size();
        let layout = GridLayout::from_config(size.width, size.height, &self.config.grid);
        let simulation = Simulation::new(layout, self.config.grid.seed, self.config.tick_seconds());

        let cell_pipeline = CellPipeline::load(context.device(), context.surface_format())?;
        let quad = QuadData::create(context.device(), layout.cell_half_extent_ndc());

        self.simulation = Some(simulation);
        self.cell_pipeline = Some(cell_pipeline);
        self.quad = Some(quad);

        update_title(self, context);
        Ok(())
    }

    fn input(&mut self, _context: &mut WindowContext, event: &WindowEvent) {
        self.input.push_window_event(event);
    }

    fn update(&mut self, context: &mut WindowContext) {
        run_update(self, context);
    }

    fn render(&mut self, _context: &WindowContext, render_data: RenderData) {
        render(self, render_data);
    }

    fn end(&mut self, _context: &mut WindowContext) {
        if let Some(simulation) = &self.simulation {
            log::info!(
                "Exiting at generation {} with {} live cells",
                simulation.generation(),
                simulation.grid().population()
            );
        }
    }
}

fn run_update(app: &mut GameOfLifeApp, context: &mut WindowContext) {
    app.time.update();

    let Some(simulation) = app.simulation.as_mut() else {
        return;
    };

    // Input first, then at most one generation
    let mut title_dirty = false;
    for event in app.input.drain() {
        title_dirty |= event == InputEvent::ToggleRunning;
        simulation.apply(event);
    }
    title_dirty |= simulation.advance(app.time.delta_seconds());

    if let Some(fps) = app.time.fps_sample() {
        app.fps = Some(fps);
        title_dirty = true;
    }

    if title_dirty {
        update_title(app, context);
    }
}

fn update_title(app: &GameOfLifeApp, context: &WindowContext) {
    let Some(simulation) = &app.simulation else {
        return;
    };
    let state = if simulation.is_running() {
        "running"
    } else {
        "paused"
    };
    let title = match app.fps {
        Some(fps) => format!(
            "{}: generation {} ({}) {:.2} fps",
            app.config.window.title,
            simulation.generation(),
            state,
            fps
        ),
        None => format!(
            "{}: generation {} ({})",
            app.config.window.title,
            simulation.generation(),
            state
        ),
    };
    context.window().set_title(&title);
}

fn render(app: &mut GameOfLifeApp, render_data: RenderData) {
    let GameOfLifeApp {
        config,
        simulation,
        quad,
        cell_pipeline,
        ..
    } = app;

    let (Some(simulation), Some(quad), Some(cell_pipeline)) =
        (simulation.as_ref(), quad.as_ref(), cell_pipeline.as_ref())
    else {
        return;
    };
    let RenderData { encoder, frame } = render_data;

    let view = frame
        .texture
        .create_view(&wgpu::TextureViewDescriptor::default());

    let [r, g, b, a] = config.palette.background.map(f64::from);
    let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("Cells"),
        depth_stencil_attachment: None,
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: &view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                store: true,
            },
        })],
    });

    let layout = simulation.layout();
    let palette = &config.palette;
    cell_pipeline.draw(
        &mut rpass,
        quad,
        simulation
            .sprites()
            .map(|sprite| CellPushConstants::for_sprite(&sprite, layout, palette)),
    );
}
