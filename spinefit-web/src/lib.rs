#[cfg(target_arch = "wasm32")]
mod web {
    use serde::Serialize;
    use spinefit::catalog::ModelCatalog;
    use spinefit::{
        Bounds, FitConfig, FlatVertices, InstanceId, ModeSwitch, RenderMode, Stage, StageEvent,
        UnhealthyReason, Viewport, ZoomRange,
    };
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
        Ok(())
    }

    fn js_err(e: spinefit::Error) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    #[derive(Serialize)]
    #[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
    enum JsStageEvent {
        AnimationCompleted { instance: u32, animation: String },
        BackendSwitched { reason: &'static str, at_ms: Option<f64> },
    }

    impl From<StageEvent> for JsStageEvent {
        fn from(event: StageEvent) -> Self {
            match event {
                StageEvent::AnimationCompleted {
                    instance,
                    animation,
                } => JsStageEvent::AnimationCompleted {
                    instance: instance.0,
                    animation,
                },
                StageEvent::BackendSwitched(switch) => JsStageEvent::BackendSwitched {
                    reason: reason_name(switch.reason),
                    at_ms: switch.at_ms,
                },
            }
        }
    }

    fn reason_name(reason: UnhealthyReason) -> &'static str {
        match reason {
            UnhealthyReason::SustainedInvisibility => "sustainedInvisibility",
            UnhealthyReason::LoadFailure => "loadFailure",
            UnhealthyReason::External => "external",
        }
    }

    fn mode_name(mode: RenderMode) -> &'static str {
        match mode {
            RenderMode::Primary => "primary",
            RenderMode::Fallback => "fallback",
        }
    }

    /// Stage handle owned by the demo page's frame loop.
    #[wasm_bindgen]
    pub struct WebStage {
        stage: Stage,
    }

    #[wasm_bindgen]
    impl WebStage {
        /// `config_json` follows `FitConfig`; `?padding=` and `?grace=` in the page URL win.
        #[wasm_bindgen(constructor)]
        pub fn new(config_json: Option<String>) -> Result<WebStage, JsValue> {
            let mut config = match config_json.as_deref() {
                Some(s) if !s.trim().is_empty() => FitConfig::from_json_str(s).map_err(js_err)?,
                _ => FitConfig::default(),
            };
            if let Some(window) = web_sys::window() {
                config = apply_query_overrides(&window, config);
            }
            log::info!(
                "spinefit stage: padding={} grace={}ms",
                config.padding_ratio,
                config.grace_ms
            );
            Ok(WebStage {
                stage: Stage::new(config),
            })
        }

        #[wasm_bindgen(js_name = selectModel)]
        pub fn select_model(&mut self, name: &str) -> bool {
            self.stage.select_model(name)
        }

        pub fn spawn(&mut self, animation: &str, looping: bool) -> u32 {
            self.stage.spawn(animation, looping).0
        }

        pub fn despawn(&mut self, id: u32) -> Result<(), JsValue> {
            self.stage.despawn(InstanceId(id)).map_err(js_err)
        }

        #[wasm_bindgen(js_name = despawnLast)]
        pub fn despawn_last(&mut self) -> Option<u32> {
            self.stage.despawn_last().map(|id| id.0)
        }

        #[wasm_bindgen(js_name = instanceCount)]
        pub fn instance_count(&self) -> usize {
            self.stage.instances().len()
        }

        #[wasm_bindgen(js_name = setAnimation)]
        pub fn set_animation(&mut self, id: u32, name: &str, looping: bool) -> Result<(), JsValue> {
            self.stage
                .set_animation(InstanceId(id), name, looping)
                .map_err(js_err)
        }

        #[wasm_bindgen(js_name = setAnimationAll)]
        pub fn set_animation_all(&mut self, name: &str, looping: bool) {
            self.stage.set_animation_all(name, looping);
        }

        /// `vertices` holds every visible attachment's world vertices, interleaved `x, y`.
        #[wasm_bindgen(js_name = updatePose)]
        pub fn update_pose(&mut self, id: u32, vertices: &[f32]) -> Result<(), JsValue> {
            self.stage
                .update_pose(InstanceId(id), &[FlatVertices(vertices)])
                .map(|_| ())
                .map_err(js_err)
        }

        #[wasm_bindgen(js_name = animationComplete)]
        pub fn animation_complete(&mut self, id: u32) -> Result<bool, JsValue> {
            self.stage
                .notify_animation_complete(InstanceId(id))
                .map_err(js_err)
        }

        /// Returns `true` on the frame that switched to the fallback backend.
        pub fn frame(&mut self, visible: bool, ts_ms: f64) -> bool {
            self.stage.frame(visible, ts_ms).is_some()
        }

        #[wasm_bindgen(js_name = reportUnhealthy)]
        pub fn report_unhealthy(&mut self) -> bool {
            self.stage.report_unhealthy()
        }

        #[wasm_bindgen(js_name = reportLoadFailure)]
        pub fn report_load_failure(&mut self) -> bool {
            self.stage.report_load_failure()
        }

        #[wasm_bindgen(js_name = renderMode)]
        pub fn render_mode(&self) -> String {
            mode_name(self.stage.render_mode()).to_string()
        }

        /// `callback(reason)` runs once per backend switch.
        #[wasm_bindgen(js_name = onBackendSwitch)]
        pub fn on_backend_switch(&mut self, callback: js_sys::Function) {
            self.stage
                .fallback_mut()
                .subscribe(move |switch: &ModeSwitch| {
                    let reason = JsValue::from_str(reason_name(switch.reason));
                    if let Err(e) = callback.call1(&JsValue::NULL, &reason) {
                        log::warn!("backend switch callback failed: {e:?}");
                    }
                });
        }

        pub fn camera(&self, width: f32, height: f32) -> Result<JsValue, JsValue> {
            let cam = self.stage.camera(Viewport::new(width, height));
            Ok(serde_wasm_bindgen::to_value(&cam)?)
        }

        /// Column-major clip-from-world matrix for a WebGL uniform.
        #[wasm_bindgen(js_name = clipFromWorld)]
        pub fn clip_from_world(&self, width: f32, height: f32) -> Vec<f32> {
            let cam = self.stage.camera(Viewport::new(width, height));
            cam.clip_from_world().iter().flatten().copied().collect()
        }

        pub fn layout(&self, width: f32, height: f32) -> Result<JsValue, JsValue> {
            let placements = self.stage.layout(Viewport::new(width, height));
            Ok(serde_wasm_bindgen::to_value(&placements)?)
        }

        #[wasm_bindgen(js_name = drainEvents)]
        pub fn drain_events(&mut self) -> Result<JsValue, JsValue> {
            let events: Vec<JsStageEvent> = self
                .stage
                .drain_events()
                .into_iter()
                .map(JsStageEvent::from)
                .collect();
            Ok(serde_wasm_bindgen::to_value(&events)?)
        }
    }

    /// Single-shot fit for pages that drive one skeleton without a stage.
    #[wasm_bindgen(js_name = fitCamera)]
    pub fn fit_camera(
        vertices: &[f32],
        width: f32,
        height: f32,
        padding_ratio: f32,
        min_zoom: f32,
        max_zoom: f32,
    ) -> Result<JsValue, JsValue> {
        let range = ZoomRange::new(min_zoom, max_zoom).map_err(js_err)?;
        let bounds = spinefit::compute_bounds_flat(&[vertices]);
        let cam = spinefit::fit_camera(bounds, Viewport::new(width, height), padding_ratio, range);
        Ok(serde_wasm_bindgen::to_value(&cam)?)
    }

    /// `[minX, minY, maxX, maxY]` of an interleaved vertex buffer.
    #[wasm_bindgen(js_name = computeBounds)]
    pub fn compute_bounds(vertices: &[f32]) -> Vec<f32> {
        let Bounds {
            min_x,
            min_y,
            max_x,
            max_y,
        } = spinefit::compute_bounds_flat(&[vertices]);
        vec![min_x, min_y, max_x, max_y]
    }

    /// Device-pixel size of a canvas, as `[width, height]`.
    #[wasm_bindgen(js_name = canvasViewport)]
    pub fn canvas_viewport(canvas_id: &str) -> Result<Vec<f32>, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("missing window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("missing document"))?;
        let canvas: web_sys::HtmlCanvasElement = element_by_id(&document, canvas_id)?;
        let (w, h) = physical_canvas_size(&window, &canvas);
        Ok(vec![w as f32, h as f32])
    }

    #[wasm_bindgen]
    pub struct WebCatalog {
        catalog: ModelCatalog,
    }

    #[wasm_bindgen]
    impl WebCatalog {
        pub fn parse(text: &str) -> Result<WebCatalog, JsValue> {
            let catalog = ModelCatalog::from_json_str(text).map_err(js_err)?;
            Ok(WebCatalog { catalog })
        }

        pub fn names(&self) -> Vec<String> {
            self.catalog.models().iter().map(|m| m.name.clone()).collect()
        }

        /// Model named by `?model=`, else the first one.
        #[wasm_bindgen(js_name = initialModel)]
        pub fn initial_model(&self) -> Option<String> {
            let requested = web_sys::window().and_then(|w| query_param(&w, "model"));
            self.catalog
                .choose(requested.as_deref())
                .map(|m| m.name.clone())
        }

        #[wasm_bindgen(js_name = skeletonUrl)]
        pub fn skeleton_url(&self, name: &str) -> Result<String, JsValue> {
            let model = self.catalog.get(name).map_err(js_err)?;
            Ok(self.catalog.resolve(&model.skeleton))
        }

        #[wasm_bindgen(js_name = atlasUrl)]
        pub fn atlas_url(&self, name: &str) -> Result<String, JsValue> {
            let model = self.catalog.get(name).map_err(js_err)?;
            Ok(self.catalog.resolve(&model.atlas))
        }

        pub fn animations(&self, name: &str) -> Result<Vec<String>, JsValue> {
            let model = self.catalog.get(name).map_err(js_err)?;
            Ok(model.animations.clone())
        }

        #[wasm_bindgen(js_name = defaultAnimation)]
        pub fn default_animation(&self, name: &str) -> Result<Option<String>, JsValue> {
            let model = self.catalog.get(name).map_err(js_err)?;
            Ok(model.default_animation().map(str::to_string))
        }

        pub fn scale(&self, name: &str) -> Result<f32, JsValue> {
            Ok(self.catalog.get(name).map_err(js_err)?.scale)
        }
    }

    #[wasm_bindgen(js_name = fetchCatalog)]
    pub async fn fetch_catalog(url: String) -> Result<WebCatalog, JsValue> {
        let text = fetch_text(&url).await?;
        let catalog = WebCatalog::parse(&text)?;
        log::info!("loaded {} models from {url}", catalog.catalog.models().len());
        Ok(catalog)
    }

    fn apply_query_overrides(window: &web_sys::Window, mut config: FitConfig) -> FitConfig {
        if let Some(padding) = query_param(window, "padding").and_then(|v| v.parse::<f32>().ok())
        {
            match config.with_padding_ratio(padding) {
                Ok(c) => config = c,
                Err(e) => log::warn!("ignoring ?padding={padding}: {e}"),
            }
        }
        if let Some(grace) = query_param(window, "grace").and_then(|v| v.parse::<f64>().ok()) {
            match config.with_grace_ms(grace) {
                Ok(c) => config = c,
                Err(e) => log::warn!("ignoring ?grace={grace}: {e}"),
            }
        }
        config
    }

    fn element_by_id<T: JsCast>(document: &web_sys::Document, id: &str) -> Result<T, JsValue> {
        let el = document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("missing element #{id}")))?;
        el.dyn_into::<T>()
            .map_err(|_| JsValue::from_str(&format!("element #{id} has unexpected type")))
    }

    fn query_param(window: &web_sys::Window, key: &str) -> Option<String> {
        let search = window.location().search().ok()?;
        let search = search.strip_prefix('?').unwrap_or(&search);
        if search.is_empty() {
            return None;
        }

        for part in search.split('&') {
            let (k, v) = part.split_once('=').unwrap_or((part, ""));
            if k != key {
                continue;
            }
            let v = v.replace('+', " ");
            if let Ok(v) = js_sys::decode_uri_component(&v) {
                if let Some(v) = v.as_string() {
                    return Some(v);
                }
            }
            return Some(v);
        }
        None
    }

    async fn fetch_text(path: &str) -> Result<String, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("missing window"))?;
        let resp = JsFuture::from(window.fetch_with_str(path)).await?;
        let resp: web_sys::Response = resp.dyn_into()?;
        if !resp.ok() {
            return Err(JsValue::from_str(&format!(
                "fetch {path} failed: HTTP {}",
                resp.status()
            )));
        }
        let text = JsFuture::from(resp.text()?).await?;
        text.as_string()
            .ok_or_else(|| JsValue::from_str(&format!("fetch {path}: body is not text")))
    }

    fn physical_canvas_size(
        window: &web_sys::Window,
        canvas: &web_sys::HtmlCanvasElement,
    ) -> (u32, u32) {
        let cw = canvas.client_width().max(1) as f64;
        let ch = canvas.client_height().max(1) as f64;
        let dpr = window.device_pixel_ratio().max(0.1);

        let w = (cw * dpr).round().max(1.0) as u32;
        let h = (ch * dpr).round().max(1.0) as u32;
        (w, h)
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod web {
    // This crate is intended to be built for `wasm32-unknown-unknown` (wasm-pack / Trunk).
    // Keep a tiny native stub so `cargo test` for the workspace stays green.
}
