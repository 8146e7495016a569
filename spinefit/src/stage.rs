//! Per-frame orchestration of several skeleton instances sharing one viewport.
//!
//! The stage does not own a skeletal runtime. The caller poses each instance with its runtime
//! of choice and hands the posed shapes over through [`Stage::update_pose`].

use crate::Error;
use crate::bounds::{Bounds, sanitize_default};
use crate::camera::{CameraFit, Viewport, fit_camera, sanitize_padding};
use crate::config::FitConfig;
use crate::fallback::{ModeSwitch, RenderFallbackController, RenderMode, UnhealthyReason};
use crate::grid::{GridPlacement, layout_grid};
use crate::shape::{HasWorldVertices, compute_shape_bounds_or};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub u32);

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug)]
pub struct Instance {
    pub id: InstanceId,
    pub animation: String,
    pub looping: bool,
    /// Bounds of the last pose; `None` until the first [`Stage::update_pose`].
    pub bounds: Option<Bounds>,
    completed: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StageEvent {
    AnimationCompleted {
        instance: InstanceId,
        animation: String,
    },
    BackendSwitched(ModeSwitch),
}

#[derive(Debug)]
pub struct Stage {
    model: Option<String>,
    config: FitConfig,
    instances: Vec<Instance>,
    next_id: u32,
    fallback: RenderFallbackController,
    events: Vec<StageEvent>,
}

impl Default for Stage {
    fn default() -> Self {
        Self::new(FitConfig::default())
    }
}

impl Stage {
    pub fn new(config: FitConfig) -> Self {
        let fallback = RenderFallbackController::new(config.fallback_policy());
        Self {
            model: None,
            config,
            instances: Vec::new(),
            next_id: 1,
            fallback,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &FitConfig {
        &self.config
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn render_mode(&self) -> RenderMode {
        self.fallback.mode()
    }

    pub fn fallback_mut(&mut self) -> &mut RenderFallbackController {
        &mut self.fallback
    }

    /// Switches the target asset. A different model starts a new lifecycle: instances are
    /// dropped and the fallback controller is re-armed.
    pub fn select_model(&mut self, name: &str) -> bool {
        if self.model.as_deref() == Some(name) {
            return false;
        }
        log::info!("selecting model '{name}'");
        self.model = Some(name.to_string());
        self.instances.clear();
        self.fallback.reset();
        true
    }

    pub fn spawn(&mut self, animation: &str, looping: bool) -> InstanceId {
        let id = InstanceId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1).max(1);
        self.instances.push(Instance {
            id,
            animation: animation.to_string(),
            looping,
            bounds: None,
            completed: false,
        });
        log::debug!("spawned instance {id} playing '{animation}'");
        id
    }

    pub fn despawn(&mut self, id: InstanceId) -> Result<(), Error> {
        let index = self.index_of(id)?;
        self.instances.remove(index);
        Ok(())
    }

    /// Removes the most recently spawned instance.
    pub fn despawn_last(&mut self) -> Option<InstanceId> {
        self.instances.pop().map(|i| i.id)
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    pub fn instance(&self, id: InstanceId) -> Option<&Instance> {
        self.instances.iter().find(|i| i.id == id)
    }

    /// Starts a new playback on `id`; re-arms its completion event.
    pub fn set_animation(
        &mut self,
        id: InstanceId,
        name: &str,
        looping: bool,
    ) -> Result<(), Error> {
        let index = self.index_of(id)?;
        let inst = &mut self.instances[index];
        inst.animation = name.to_string();
        inst.looping = looping;
        inst.completed = false;
        Ok(())
    }

    /// Applies the same animation to every instance.
    pub fn set_animation_all(&mut self, name: &str, looping: bool) {
        for inst in &mut self.instances {
            inst.animation = name.to_string();
            inst.looping = looping;
            inst.completed = false;
        }
    }

    pub fn update_pose<S: HasWorldVertices>(
        &mut self,
        id: InstanceId,
        shapes: &[S],
    ) -> Result<Bounds, Error> {
        let index = self.index_of(id)?;
        let bounds = compute_shape_bounds_or(shapes, self.config.default_bounds);
        self.instances[index].bounds = Some(bounds);
        Ok(bounds)
    }

    /// Records the end of a playback. Emits at most one event per non-looping playback.
    pub fn notify_animation_complete(&mut self, id: InstanceId) -> Result<bool, Error> {
        let index = self.index_of(id)?;
        let inst = &mut self.instances[index];
        if inst.looping || inst.completed {
            return Ok(false);
        }
        inst.completed = true;
        self.events.push(StageEvent::AnimationCompleted {
            instance: inst.id,
            animation: inst.animation.clone(),
        });
        Ok(true)
    }

    /// Feeds this frame's visibility to the fallback watchdog.
    pub fn frame(&mut self, visible: bool, ts_ms: f64) -> Option<ModeSwitch> {
        let switch = self.fallback.observe_frame(visible, ts_ms)?;
        self.events.push(StageEvent::BackendSwitched(switch));
        Some(switch)
    }

    /// The host detected a problem with the primary backend.
    pub fn report_unhealthy(&mut self) -> bool {
        self.report(UnhealthyReason::External)
    }

    /// Primary backend failed to load the current model.
    pub fn report_load_failure(&mut self) -> bool {
        self.report(UnhealthyReason::LoadFailure)
    }

    fn report(&mut self, reason: UnhealthyReason) -> bool {
        let Some(switch) = self.fallback.report(reason) else {
            return false;
        };
        self.events.push(StageEvent::BackendSwitched(switch));
        true
    }

    pub fn drain_events(&mut self) -> Vec<StageEvent> {
        std::mem::take(&mut self.events)
    }

    /// Union of every posed instance; default bounds while nothing is posed.
    pub fn bounds(&self) -> Bounds {
        self.instances
            .iter()
            .filter_map(|i| i.bounds)
            .reduce(|a, b| a.union(&b))
            .unwrap_or_else(|| self.default_bounds())
    }

    /// Camera framing every instance at once, with `1 / padding_ratio` of margin so the
    /// content never touches the viewport edge.
    pub fn camera(&self, viewport: Viewport) -> CameraFit {
        let margin = 1.0 / sanitize_padding(self.config.padding_ratio);
        fit_camera(self.bounds(), viewport, margin, self.config.zoom_range)
    }

    /// Grid placements in spawn order. Unposed instances use the default bounds.
    pub fn layout(&self, viewport: Viewport) -> Vec<GridPlacement> {
        let bounds: Vec<Bounds> = self
            .instances
            .iter()
            .map(|i| i.bounds.unwrap_or_else(|| self.default_bounds()))
            .collect();
        layout_grid(&bounds, viewport, self.config.padding_ratio)
    }

    fn default_bounds(&self) -> Bounds {
        sanitize_default(self.config.default_bounds)
    }

    fn index_of(&self, id: InstanceId) -> Result<usize, Error> {
        self.instances
            .iter()
            .position(|i| i.id == id)
            .ok_or(Error::UnknownInstance { id: id.0 })
    }
}
