// Browser wiring: mounts the effects on the page, feeds them DOM events and
// drives them from requestAnimationFrame. Everything here is best effort; a
// missing element leaves an inert effect instead of an exception.

use crate::animation::{Animate, AnimationLoop, FrameHandle, Scheduler};
use crate::config::{FieldConfig, TrailConfig};
use crate::error::FxError;
use crate::field::ParticleField;
use crate::geometry::{vec2, Bounds, Vec2};
use crate::trail::{CursorTrail, IndicatorStyle};
#[cfg(feature = "profile")]
use crate::utils::Timer;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, Document, Element, Event, EventTarget, HtmlCanvasElement,
    HtmlElement, MouseEvent, TouchEvent, Window,
};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

struct RafScheduler {
    window: Window,
    callback: FrameCallback,
}

impl Scheduler for RafScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        let callback = self.callback.borrow();
        let closure = callback.as_ref()?;
        self.window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .ok()
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Err(err) = self.window.cancel_animation_frame(handle) {
            log::debug!("cancel_animation_frame failed: {:?}", err);
        }
    }
}

// A scene together with the loop that animates it
struct Runtime<A> {
    scene: A,
    driver: AnimationLoop,
    scheduler: RafScheduler,
}

impl<A> Drop for Runtime<A> {
    fn drop(&mut self) {
        // The frame closure dies with the scheduler, so no callback may stay queued
        self.driver.stop(&mut self.scheduler);
    }
}

type Shared<A> = Rc<RefCell<Runtime<A>>>;

fn start_loop<A: Animate + 'static>(window: &Window, scene: A) -> Shared<A> {
    let callback: FrameCallback = Rc::new(RefCell::new(None));
    let runtime = Rc::new(RefCell::new(Runtime {
        scene,
        driver: AnimationLoop::new(),
        scheduler: RafScheduler {
            window: window.clone(),
            callback: callback.clone(),
        },
    }));

    // Weak, otherwise the closure would keep its own runtime alive forever
    let weak = Rc::downgrade(&runtime);
    *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |_timestamp: f64| {
        if let Some(runtime) = weak.upgrade() {
            let mut runtime = runtime.borrow_mut();
            let Runtime {
                scene,
                driver,
                scheduler,
            } = &mut *runtime;
            driver.tick(scheduler, scene);
        }
    }) as Box<dyn FnMut(f64)>));

    {
        let mut runtime = runtime.borrow_mut();
        let Runtime {
            driver, scheduler, ..
        } = &mut *runtime;
        driver.run(scheduler);
    }
    runtime
}

// An event listener that unregisters itself when dropped
struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn new(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Listener, FxError> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        Ok(Listener {
            target: target.clone(),
            kind,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref())
        {
            log::debug!("removing {} listener failed: {:?}", self.kind, err);
        }
    }
}

// Adapts a scene handler to a DOM listener. Events arriving after teardown
// are dropped.
fn on_scene<A: 'static>(
    runtime: &Shared<A>,
    mut handler: impl FnMut(&mut A, &Event) + 'static,
) -> impl FnMut(Event) + 'static {
    let weak: Weak<RefCell<Runtime<A>>> = Rc::downgrade(runtime);
    move |event: Event| {
        if let Some(runtime) = weak.upgrade() {
            handler(&mut runtime.borrow_mut().scene, &event);
        }
    }
}

fn window() -> Result<Window, FxError> {
    web_sys::window().ok_or(FxError::NoWindow)
}

fn document(window: &Window) -> Result<Document, FxError> {
    window.document().ok_or(FxError::NoDocument)
}

// Re-derived on every resize rather than cached
fn viewport(window: &Window) -> Bounds {
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Bounds::new(width, height)
}

fn fit_canvas(canvas: &HtmlCanvasElement, bounds: Bounds) {
    canvas.set_width(bounds.width as u32);
    canvas.set_height(bounds.height as u32);
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, FxError> {
    canvas
        .get_context("2d")?
        .ok_or(FxError::NoContext)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| FxError::NoContext)
}

fn mouse_position(event: &Event) -> Option<Vec2> {
    let event = event.dyn_ref::<MouseEvent>()?;
    Some(vec2(event.client_x() as f64, event.client_y() as f64))
}

fn touch_position(event: &Event) -> Option<Vec2> {
    let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
    Some(vec2(touch.client_x() as f64, touch.client_y() as f64))
}

fn set_styles(element: &HtmlElement, styles: &[(&str, &str)]) -> Result<(), FxError> {
    let css = element.style();
    for (name, value) in styles {
        css.set_property(name, value)?;
    }
    Ok(())
}

fn viewport_resize<A: 'static>(
    runtime: &Shared<A>,
    mut resize: impl FnMut(&mut A, Bounds) + 'static,
) -> impl FnMut(Event) + 'static {
    on_scene(runtime, move |scene, _| {
        if let Some(window) = web_sys::window() {
            resize(scene, viewport(&window));
        }
    })
}

struct FluidScene {
    field: ParticleField,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl FluidScene {
    fn resize(&mut self, bounds: Bounds) {
        fit_canvas(&self.canvas, bounds);
        self.field.resize(bounds);
    }
}

impl Animate for FluidScene {
    fn frame(&mut self) {
        #[cfg(feature = "profile")]
        let _timer = Timer::new("FluidEffect::frame");
        self.field.step();
        if let Err(err) = self.field.render(&mut self.context) {
            log::debug!("fluid frame skipped: {}", err);
        }
    }
}

struct MountedFluid {
    _listeners: Vec<Listener>,
    runtime: Shared<FluidScene>,
}

fn mount_fluid(canvas_id: &str, config: FieldConfig) -> Result<MountedFluid, FxError> {
    let window = window()?;
    let document = document(&window)?;
    let canvas = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| FxError::MissingElement(canvas_id.to_owned()))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| FxError::NotACanvas(canvas_id.to_owned()))?;
    let context = context_2d(&canvas)?;

    let bounds = viewport(&window);
    fit_canvas(&canvas, bounds);
    let field = ParticleField::new(config, bounds);
    let runtime = start_loop(
        &window,
        FluidScene {
            field,
            canvas,
            context,
        },
    );

    let listeners = vec![
        Listener::new(
            &document,
            "mousemove",
            on_scene(&runtime, |scene: &mut FluidScene, event: &Event| {
                if let Some(pos) = mouse_position(event) {
                    scene.field.on_pointer_move(pos);
                }
            }),
        )?,
        Listener::new(
            &document,
            "touchmove",
            on_scene(&runtime, |scene: &mut FluidScene, event: &Event| {
                if let Some(pos) = touch_position(event) {
                    scene.field.on_touch_move(pos);
                }
            }),
        )?,
        Listener::new(
            &window,
            "resize",
            viewport_resize(&runtime, |scene: &mut FluidScene, bounds| scene.resize(bounds)),
        )?,
    ];

    Ok(MountedFluid {
        _listeners: listeners,
        runtime,
    })
}

/// Particle fluid drawn on an existing `<canvas>` element.
#[wasm_bindgen]
pub struct FluidEffect {
    mounted: Option<MountedFluid>,
}

#[wasm_bindgen]
impl FluidEffect {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> FluidEffect {
        let mounted = match mount_fluid(canvas_id, FieldConfig::default()) {
            Ok(mounted) => {
                log::info!("fluid effect mounted on #{}", canvas_id);
                Some(mounted)
            }
            Err(err) => {
                log::warn!("fluid effect skipped: {}", err);
                None
            }
        };
        FluidEffect { mounted }
    }

    pub fn is_active(&self) -> bool {
        self.mounted.is_some()
    }

    pub fn particle_count(&self) -> usize {
        self.mounted
            .as_ref()
            .map(|m| m.runtime.borrow().scene.field.len())
            .unwrap_or(0)
    }

    /// Stops the animation and removes every listener. Idempotent.
    pub fn stop(&mut self) {
        if self.mounted.take().is_some() {
            log::info!("fluid effect stopped");
        }
    }
}

struct CursorScene {
    trail: CursorTrail,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    indicator: HtmlElement,
}

impl CursorScene {
    fn resize(&mut self, bounds: Bounds) {
        fit_canvas(&self.canvas, bounds);
        self.trail.resize(bounds);
    }

    fn apply_indicator(&self, style: &IndicatorStyle) -> Result<(), FxError> {
        let left = format!("{}px", style.left());
        let top = format!("{}px", style.top());
        let size = format!("{}px", style.size);
        let border = style.border.css_opaque();
        let background = style
            .background
            .map(|c| c.css_opaque())
            .unwrap_or_else(|| "transparent".to_owned());
        let transform = format!("scale({})", style.scale);
        set_styles(
            &self.indicator,
            &[
                ("opacity", if style.visible { "1" } else { "0" }),
                ("left", left.as_str()),
                ("top", top.as_str()),
                ("width", size.as_str()),
                ("height", size.as_str()),
                ("border-color", border.as_str()),
                ("background", background.as_str()),
                ("transform", transform.as_str()),
            ],
        )
    }
}

impl Animate for CursorScene {
    fn frame(&mut self) {
        #[cfg(feature = "profile")]
        let _timer = Timer::new("CursorEffect::frame");
        self.trail.step();
        let drawn = self
            .trail
            .render(&mut self.context)
            .and_then(|_| self.apply_indicator(&self.trail.indicator()));
        if let Err(err) = drawn {
            log::debug!("cursor frame skipped: {}", err);
        }
    }
}

struct MountedCursor {
    listeners: Vec<Listener>,
    _runtime: Shared<CursorScene>,
    created: Vec<Element>,
}

impl Drop for MountedCursor {
    fn drop(&mut self) {
        self.listeners.clear();
        for element in &self.created {
            element.remove();
        }
    }
}

fn is_over_interactive(event: &Event, selector: &str) -> bool {
    event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .and_then(|element| element.closest(selector).ok().flatten())
        .is_some()
}

fn mount_cursor(config: TrailConfig) -> Result<MountedCursor, FxError> {
    let window = window()?;
    let document = document(&window)?;
    let body = document.body().ok_or(FxError::NoBody)?;

    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| FxError::NotACanvas("cursor-trail-canvas".to_owned()))?;
    canvas.set_class_name("cursor-trail-canvas");
    set_styles(
        &canvas,
        &[
            ("position", "fixed"),
            ("top", "0"),
            ("left", "0"),
            ("width", "100%"),
            ("height", "100%"),
            ("pointer-events", "none"),
            ("z-index", "9998"),
        ],
    )?;

    let context = context_2d(&canvas)?;

    let indicator = document
        .create_element("div")?
        .dyn_into::<HtmlElement>()
        .map_err(|_| FxError::MissingElement("custom-cursor".to_owned()))?;
    indicator.set_class_name("custom-cursor");
    set_styles(
        &indicator,
        &[
            ("position", "fixed"),
            ("pointer-events", "none"),
            ("z-index", "9999"),
            ("border-radius", "50%"),
            ("border", "2px solid"),
            ("opacity", "0"),
            ("mix-blend-mode", "difference"),
            (
                "transition",
                "width 0.3s ease, height 0.3s ease, border-color 0.3s ease",
            ),
        ],
    )?;

    // Native cursor hidden over the targets the indicator grows on
    let style = document.create_element("style")?;
    style.set_class_name("custom-cursor-style");
    style.set_text_content(Some(config.native_cursor_rule().as_str()));

    body.append_child(&canvas)?;
    body.append_child(&indicator)?;
    body.append_child(&style)?;
    let created: Vec<Element> = vec![
        canvas.clone().unchecked_into(),
        indicator.clone().unchecked_into(),
        style,
    ];

    let bounds = viewport(&window);
    fit_canvas(&canvas, bounds);
    let runtime = start_loop(
        &window,
        CursorScene {
            trail: CursorTrail::new(config, bounds),
            canvas,
            context,
            indicator,
        },
    );

    // Built before the listeners so a failure below still removes the elements
    let mut mounted = MountedCursor {
        listeners: Vec::new(),
        _runtime: runtime.clone(),
        created,
    };
    mounted.listeners = vec![
        Listener::new(
            &document,
            "mousemove",
            on_scene(&runtime, |scene: &mut CursorScene, event: &Event| {
                if let Some(pos) = mouse_position(event) {
                    scene.trail.on_pointer_move(pos);
                }
            }),
        )?,
        Listener::new(
            &document,
            "mouseleave",
            on_scene(&runtime, |scene: &mut CursorScene, _: &Event| {
                scene.trail.on_pointer_leave()
            }),
        )?,
        Listener::new(
            &document,
            "mouseover",
            on_scene(&runtime, |scene: &mut CursorScene, event: &Event| {
                let hovering = is_over_interactive(event, scene.trail.hover_selector());
                scene.trail.set_hovering(hovering);
            }),
        )?,
        Listener::new(
            &document,
            "mousedown",
            on_scene(&runtime, |scene: &mut CursorScene, _: &Event| {
                scene.trail.on_pointer_down()
            }),
        )?,
        Listener::new(
            &document,
            "mouseup",
            on_scene(&runtime, |scene: &mut CursorScene, _: &Event| {
                scene.trail.on_pointer_up()
            }),
        )?,
        Listener::new(
            &window,
            "resize",
            viewport_resize(&runtime, |scene: &mut CursorScene, bounds| scene.resize(bounds)),
        )?,
    ];

    Ok(mounted)
}

/// Custom cursor indicator with a tapering trail, on its own overlay canvas.
#[wasm_bindgen]
pub struct CursorEffect {
    mounted: Option<MountedCursor>,
}

#[wasm_bindgen]
impl CursorEffect {
    #[wasm_bindgen(constructor)]
    pub fn new() -> CursorEffect {
        let mounted = match mount_cursor(TrailConfig::default()) {
            Ok(mounted) => {
                log::info!("cursor effect mounted");
                Some(mounted)
            }
            Err(err) => {
                log::warn!("cursor effect skipped: {}", err);
                None
            }
        };
        CursorEffect { mounted }
    }

    pub fn is_active(&self) -> bool {
        self.mounted.is_some()
    }

    /// Stops the animation, removes listeners and the created elements.
    pub fn stop(&mut self) {
        if self.mounted.take().is_some() {
            log::info!("cursor effect stopped");
        }
    }
}

impl Default for CursorEffect {
    fn default() -> Self {
        CursorEffect::new()
    }
}
