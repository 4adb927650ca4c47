use tatter::{
    CircleObstacle, ClothLayout, ClothSimulation, NoOpStepObserver, SimulationConfig, Stiffness,
    Vec2,
};
use wasm_bindgen::prelude::*;

fn to_js(err: tatter::ClothError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// ---- Tearable Cloth Demo ----

#[wasm_bindgen]
pub struct ClothDemo {
    cloth: ClothSimulation<f64>,
    config: SimulationConfig<f64>,
    layout: ClothLayout<f64>,
    cut_radius: f64,
}

#[wasm_bindgen]
impl ClothDemo {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> Result<ClothDemo, JsValue> {
        let mut cloth = ClothSimulation::new(width, height).map_err(to_js)?;
        let layout = ClothLayout::default();
        cloth.build(&layout).map_err(to_js)?;
        Ok(ClothDemo {
            cloth,
            config: SimulationConfig::new(),
            layout,
            cut_radius: 10.0,
        })
    }

    pub fn update(&mut self) {
        self.cloth.step(&self.config, &mut NoOpStepObserver);
    }

    /// Weave a fresh cloth, discarding every cut.
    pub fn rebuild(&mut self, rows: usize, columns: usize, spacing: f64, x: f64, y: f64) -> Result<(), JsValue> {
        let layout = ClothLayout::new(rows, columns, spacing).with_origin(Vec2::new(x, y));
        self.cloth.build(&layout).map_err(to_js)?;
        self.layout = layout;
        Ok(())
    }

    /// Cut under the pointer. Returns how many links were severed.
    pub fn cut(&mut self, x: f64, y: f64) -> usize {
        self.cloth.cut(Vec2::new(x, y), self.cut_radius)
    }

    pub fn set_cut_radius(&mut self, radius: f64) {
        self.cut_radius = radius.max(0.0);
    }

    pub fn place_obstacle(&mut self, x: f64, y: f64, radius: f64) -> Result<(), JsValue> {
        let obstacle = CircleObstacle::new(Vec2::new(x, y), radius, self.config.restitution).map_err(to_js)?;
        self.cloth.set_obstacle(Some(obstacle));
        Ok(())
    }

    pub fn remove_obstacle(&mut self) {
        self.cloth.set_obstacle(None);
    }

    pub fn drag_obstacle(&mut self, x: f64, y: f64) -> bool {
        self.cloth.move_obstacle(Vec2::new(x, y))
    }

    pub fn set_gravity(&mut self, x: f64, y: f64) {
        self.config.gravity = Vec2::new(x, y);
    }

    pub fn set_solver(&mut self, iterations: u32, snap_ratio: f64) -> Result<(), JsValue> {
        let config = self.config.clone().with_solver_iterations(iterations).with_snap_ratio(snap_ratio);
        config.validate().map_err(to_js)?;
        self.config = config;
        Ok(())
    }

    pub fn set_dt(&mut self, dt: f64) -> Result<(), JsValue> {
        let config = self.config.clone().with_dt(dt);
        config.validate().map_err(to_js)?;
        self.config = config;
        Ok(())
    }

    /// Box bounce and per-frame velocity damping, both in [0, 1].
    pub fn set_damping(&mut self, restitution: f64, velocity_retention: f64) -> Result<(), JsValue> {
        let config = self
            .config
            .clone()
            .with_restitution(restitution)
            .with_velocity_retention(velocity_retention);
        config.validate().map_err(to_js)?;
        self.config = config;
        Ok(())
    }

    pub fn set_stiffness(&mut self, structural: f64, bend: f64, shear: f64) -> Result<(), JsValue> {
        let config = self.config.clone().with_stiffness(Stiffness { structural, bend, shear });
        config.validate().map_err(to_js)?;
        self.config = config;
        Ok(())
    }

    /// Returns flat [x0, y0, x1, y1, ...] point positions.
    pub fn positions(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.cloth.point_count() * 2);
        for (_, p) in self.cloth.points() {
            out.push(p.position.x);
            out.push(p.position.y);
        }
        out
    }

    /// Returns flat [ax, ay, bx, by, ...] for every visible link.
    pub fn segments(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.cloth.constraint_count() * 4);
        for c in self.cloth.visible_constraints() {
            if let Some((a, b)) = self.cloth.segment(c) {
                out.extend_from_slice(&[a.x, a.y, b.x, b.y]);
            }
        }
        out
    }

    /// Returns [x, y, radius], or an empty array with no obstacle.
    pub fn obstacle(&self) -> Vec<f64> {
        match self.cloth.obstacle() {
            Some(o) => vec![o.center.x, o.center.y, o.radius()],
            None => Vec::new(),
        }
    }

    /// Returns the simulation box as [width, height].
    pub fn bounds(&self) -> Vec<f64> {
        vec![self.cloth.width(), self.cloth.height()]
    }

    pub fn point_count(&self) -> usize {
        self.cloth.point_count()
    }

    pub fn rows(&self) -> usize {
        self.layout.rows
    }

    pub fn columns(&self) -> usize {
        self.layout.columns
    }
}
