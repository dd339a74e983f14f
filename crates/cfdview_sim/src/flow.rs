//! # Channel Flow Solver
//!
//! Explicit finite-difference Navier-Stokes on a unit-spaced grid:
//!
//! ```text
//! tick():
//!   1. pressure  ∇²p = ρ/dt ∇·u        (Jacobi, N iterations)
//!   2. boundary  p = 0 at inlet, ∂p/∂n = 0 on the other edges
//!   3. velocity  u += dt (-(u·∇)u + ν∇²u - ∇p/ρ)
//!                obstacle → 0, inlet → parabolic, other edges → copy inward
//! ```
//!
//! Convection is first-order upwind, diffusion and pressure gradient are
//! central differences. Velocity is double buffered so every cell of one
//! tick reads the same previous field.

use std::fmt;

use cfdview_core::{EngineBuffers, EngineResult, Region, RichLayout, SchemaLayout, SimulationEngine};

use crate::cell::Cell;
use crate::config::SimConfig;

/// Velocity at `u` exceeding this draws as a filled square in the text map.
const FAST_FLOW: f32 = 64.0;

/// Flow past a cylinder in a channel.
pub struct ChannelFlow {
    config: SimConfig,
    cells: Vec<Cell>,
    next_cells: Vec<Cell>,
    pressure: Vec<f32>,
    next_pressure: Vec<f32>,
    obstacle: Vec<u8>,
    rhs: Vec<f32>,
    ticks: u64,
}

impl ChannelFlow {
    /// Builds the initial state: parabolic flow everywhere, zero pressure,
    /// and a circular obstacle.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidConfig` if `config` fails validation.
    pub fn new(config: SimConfig) -> EngineResult<Self> {
        config.validate()?;

        let width = config.width;
        let height = config.height;
        let count = width as usize * height as usize;

        let centre_row = (height / 2) as f32 + config.obstacle_offset;
        let centre_col = (width / 2) as f32;
        let radius = config.obstacle_radius;

        let mut cells = Vec::with_capacity(count);
        let mut obstacle = Vec::with_capacity(count);
        for row in 0..height {
            let u = config.inlet_profile(row);
            for col in 0..width {
                cells.push(Cell::fluid(u, 0.0));
                let dy = row as f32 - centre_row;
                let dx = col as f32 - centre_col;
                obstacle.push(u8::from((dx * dx + dy * dy).sqrt() < radius));
            }
        }

        let obstacle_cells = obstacle.iter().filter(|&&flag| flag != 0).count();
        tracing::debug!(width, height, obstacle_cells, "channel flow initialised");

        Ok(Self {
            next_cells: cells.clone(),
            cells,
            pressure: vec![0.0; count],
            next_pressure: vec![0.0; count],
            obstacle,
            rhs: vec![0.0; count],
            config,
            ticks: 0,
        })
    }

    /// Solver parameters.
    #[must_use]
    pub const fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Steps taken so far.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Cell at `(row, col)`.
    #[must_use]
    pub fn cell(&self, row: u32, col: u32) -> Option<Cell> {
        self.in_bounds(row, col).then(|| self.cells[self.index(row, col)])
    }

    /// Pressure at `(row, col)`.
    #[must_use]
    pub fn pressure_at(&self, row: u32, col: u32) -> Option<f32> {
        self.in_bounds(row, col).then(|| self.pressure[self.index(row, col)])
    }

    /// Returns true if `(row, col)` is solid.
    #[must_use]
    pub fn is_obstacle(&self, row: u32, col: u32) -> bool {
        self.in_bounds(row, col) && self.obstacle[self.index(row, col)] != 0
    }

    #[inline]
    const fn in_bounds(&self, row: u32, col: u32) -> bool {
        row < self.config.height && col < self.config.width
    }

    #[inline]
    const fn index(&self, row: u32, col: u32) -> usize {
        row as usize * self.config.width as usize + col as usize
    }

    /// Central-difference divergence of the velocity field at an interior cell.
    #[inline]
    fn divergence(&self, row: u32, col: u32) -> f32 {
        let right = self.cells[self.index(row, col + 1)];
        let left = self.cells[self.index(row, col - 1)];
        let up = self.cells[self.index(row + 1, col)];
        let down = self.cells[self.index(row - 1, col)];
        (right.velocity_x - left.velocity_x) * 0.5 + (up.velocity_y - down.velocity_y) * 0.5
    }

    fn solve_pressure(&mut self) {
        let (width, height) = (self.config.width, self.config.height);
        let source_scale = self.config.density / self.config.dt;

        // The velocity field is fixed for the whole solve.
        for row in 1..height - 1 {
            for col in 1..width - 1 {
                let idx = self.index(row, col);
                self.rhs[idx] = source_scale * self.divergence(row, col);
            }
        }

        self.next_pressure.copy_from_slice(&self.pressure);
        for _ in 0..self.config.pressure_iterations {
            for row in 1..height - 1 {
                for col in 1..width - 1 {
                    let idx = self.index(row, col);
                    self.next_pressure[idx] = if self.obstacle[idx] != 0 {
                        0.0
                    } else {
                        let p = &self.pressure;
                        let neighbours =
                            (p[idx + 1] + p[idx - 1]) + (p[idx + width as usize] + p[idx - width as usize]);
                        (neighbours - self.rhs[idx]) * 0.25
                    };
                }
            }
            std::mem::swap(&mut self.pressure, &mut self.next_pressure);
        }

        self.apply_pressure_boundaries();
    }

    fn apply_pressure_boundaries(&mut self) {
        let (width, height) = (self.config.width, self.config.height);
        for row in 0..height {
            let left = self.index(row, 0);
            self.pressure[left] = 0.0;
            let right = self.index(row, width - 1);
            self.pressure[right] = self.pressure[right - 1];
        }
        for col in 0..width {
            let top = self.index(0, col);
            self.pressure[top] = self.pressure[self.index(1, col)];
            let bottom = self.index(height - 1, col);
            self.pressure[bottom] = self.pressure[self.index(height - 2, col)];
        }
    }

    fn advance_velocity(&mut self) {
        let (width, height) = (self.config.width, self.config.height);
        for row in 0..height {
            for col in 0..width {
                let idx = self.index(row, col);
                self.next_cells[idx] = self.step_cell(row, col);
            }
        }
        std::mem::swap(&mut self.cells, &mut self.next_cells);
    }

    fn step_cell(&self, row: u32, col: u32) -> Cell {
        let (width, height) = (self.config.width, self.config.height);
        let idx = self.index(row, col);

        if self.obstacle[idx] != 0 {
            return Cell::fluid(0.0, 0.0);
        }
        if col == 0 {
            return Cell::fluid(self.config.inlet_profile(row), 0.0);
        }
        if row == 0 || row == height - 1 || col == width - 1 {
            let inner_row = row.clamp(1, height - 2);
            let inner_col = col.min(width - 2);
            let (vx, vy) = self.cells[self.index(inner_row, inner_col)].velocity();
            return Cell::fluid(vx, vy);
        }

        let SimConfig {
            dt,
            viscosity,
            density,
            ..
        } = self.config;
        let (u, v) = self.cells[idx].velocity();
        let (left_u, left_v) = self.cells[idx - 1].velocity();
        let (right_u, right_v) = self.cells[idx + 1].velocity();
        let (down_u, down_v) = self.cells[idx - width as usize].velocity();
        let (up_u, up_v) = self.cells[idx + width as usize].velocity();

        let (du_dx, dv_dx) = if u > 0.0 {
            (u - left_u, v - left_v)
        } else {
            (right_u - u, right_v - v)
        };
        let (du_dy, dv_dy) = if v > 0.0 {
            (u - down_u, v - down_v)
        } else {
            (up_u - u, up_v - v)
        };
        let convection_u = u * du_dx + v * du_dy;
        let convection_v = u * dv_dx + v * dv_dy;

        let diffusion_u = viscosity * ((right_u - 2.0 * u + left_u) + (up_u - 2.0 * u + down_u));
        let diffusion_v = viscosity * ((right_v - 2.0 * v + left_v) + (up_v - 2.0 * v + down_v));

        let p = &self.pressure;
        let dp_dx = (p[idx + 1] - p[idx - 1]) * 0.5;
        let dp_dy = (p[idx + width as usize] - p[idx - width as usize]) * 0.5;

        Cell::fluid(
            u + dt * (-convection_u + diffusion_u - dp_dx / density),
            v + dt * (-convection_v + diffusion_v - dp_dy / density),
        )
    }
}

impl SimulationEngine for ChannelFlow {
    fn width(&self) -> u32 {
        self.config.width
    }

    fn height(&self) -> u32 {
        self.config.height
    }

    fn layout(&self) -> SchemaLayout {
        SchemaLayout::Rich(RichLayout::STANDARD)
    }

    fn tick(&mut self) -> EngineResult<()> {
        self.solve_pressure();
        self.advance_velocity();
        self.ticks += 1;
        tracing::trace!(tick = self.ticks, "channel flow stepped");
        Ok(())
    }

    fn buffers(&self) -> EngineBuffers<'_> {
        EngineBuffers::rich(
            Region::whole(bytemuck::cast_slice(&self.cells)),
            Region::whole(bytemuck::cast_slice(&self.pressure)),
            Region::whole(&self.obstacle),
        )
    }

    fn max_divergence(&self) -> f32 {
        let (width, height) = (self.config.width, self.config.height);
        let mut max_div = 0.0f32;
        for row in 1..height - 1 {
            for col in 1..width - 1 {
                max_div = max_div.max(self.divergence(row, col).abs());
            }
        }
        max_div
    }

    fn drag_coefficient(&self) -> f32 {
        let (width, height) = (self.config.width, self.config.height);
        let mut drag_force = 0.0f32;
        for row in 1..height - 1 {
            for col in 1..width - 1 {
                let idx = self.index(row, col);
                if self.obstacle[idx] != 0 {
                    continue;
                }
                let p = self.pressure[idx];
                // Upstream face pushes, downstream face pulls.
                if self.obstacle[idx - 1] != 0 {
                    drag_force += p;
                }
                if self.obstacle[idx + 1] != 0 {
                    drag_force -= p;
                }
            }
        }

        let diameter = 2.0 * self.config.obstacle_radius;
        let u_inf = self.config.inlet_velocity;
        let dynamic_pressure = 0.5 * self.config.density * u_inf * u_inf * diameter;
        if dynamic_pressure > 0.0 {
            drag_force / dynamic_pressure
        } else {
            0.0
        }
    }
}

/// Text map of the field: `◼` fast live cell, `◻` live cell, blank otherwise.
impl fmt::Display for ChannelFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.cells.chunks(self.config.width as usize) {
            for cell in line {
                let symbol = match (cell.is_alive(), cell.velocity_x > FAST_FLOW) {
                    (false, _) => ' ',
                    (true, true) => '◼',
                    (true, false) => '◻',
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for ChannelFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelFlow")
            .field("width", &self.config.width)
            .field("height", &self.config.height)
            .field("ticks", &self.ticks)
            .finish_non_exhaustive()
    }
}
