use glam::Vec3;
use serde::{Deserialize, Serialize};

/// An 8-bit RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Color {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha
    pub a: u8,
}

impl Color {
    /// Opaque blue
    pub const BLUE: Color = Color::new(0, 0, 255, 255);

    /// Create a new colour.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// A surface that can draw debug lines and spheres.
pub trait DebugDraw {
    /// Draw a line segment.
    fn draw_line(&mut self, start: Vec3, end: Vec3, color: Color, thickness: f32, depth_priority: u8);
    /// Draw a wireframe sphere.
    fn draw_sphere(
        &mut self,
        center: Vec3,
        radius: f32,
        color: Color,
        thickness: f32,
        depth_priority: u8,
    );
}

/// A line requested this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugLine {
    /// Start of the segment
    pub start: Vec3,
    /// End of the segment
    pub end: Vec3,
    /// Colour of the segment
    pub color: Color,
    /// Thickness of the segment
    pub thickness: f32,
    /// Depth priority
    pub depth_priority: u8,
}

/// A sphere requested this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugSphere {
    /// Centre of the sphere
    pub center: Vec3,
    /// Radius of the sphere
    pub radius: f32,
    /// Colour of the wireframe
    pub color: Color,
    /// Thickness of the wireframe
    pub thickness: f32,
    /// Depth priority
    pub depth_priority: u8,
}

/// Collects debug geometry for the frame. Drain it once it has been drawn.
#[derive(Debug, Clone, Default)]
pub struct DebugDrawContext {
    /// Lines requested this frame
    pub lines: Vec<DebugLine>,
    /// Spheres requested this frame
    pub spheres: Vec<DebugSphere>,
}

impl DebugDrawContext {
    /// Forget everything drawn so far. Call once per frame after drawing.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.spheres.clear();
    }
}

impl DebugDraw for DebugDrawContext {
    fn draw_line(&mut self, start: Vec3, end: Vec3, color: Color, thickness: f32, depth_priority: u8) {
        self.lines.push(DebugLine {
            start,
            end,
            color,
            thickness,
            depth_priority,
        });
    }

    fn draw_sphere(
        &mut self,
        center: Vec3,
        radius: f32,
        color: Color,
        thickness: f32,
        depth_priority: u8,
    ) {
        self.spheres.push(DebugSphere {
            center,
            radius,
            color,
            thickness,
            depth_priority,
        });
    }
}
