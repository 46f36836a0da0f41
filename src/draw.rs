//! Layered draw list
//!
//! The frame pipeline does not talk to the GPU. Every sprite appends flat
//! shapes to a `DrawList` under the layer the pipeline has opened, and the
//! renderer tessellates the list afterwards. Commands keep submission order,
//! which is also paint order.

use glam::Vec2;

/// Paint layers in the order the pipeline opens them
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    Background,
    Decoration,
    Gameplay,
    Hud,
    EndScreen,
    Effects,
}

/// Horizontal text anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Primitive shapes understood by the renderer
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle { center: Vec2, radius: f32 },
    Rect { center: Vec2, half_size: Vec2 },
    Text { anchor: Vec2, size: f32, align: Align, content: String },
}

/// One draw call
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub layer: Layer,
    pub shape: Shape,
    pub color: [f32; 4],
}

/// Per-frame command buffer
#[derive(Debug, Clone)]
pub struct DrawList {
    layer: Layer,
    commands: Vec<DrawCommand>,
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawList {
    pub fn new() -> Self {
        Self {
            layer: Layer::Background,
            commands: Vec::with_capacity(512),
        }
    }

    /// Drop last frame's commands, keeping the allocation
    pub fn clear(&mut self) {
        self.commands.clear();
        self.layer = Layer::Background;
    }

    /// Subsequent commands are tagged with `layer`
    pub fn begin_layer(&mut self, layer: Layer) {
        self.layer = layer;
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]) {
        self.push(Shape::Circle { center, radius }, color);
    }

    pub fn rect(&mut self, center: Vec2, half_size: Vec2, color: [f32; 4]) {
        self.push(Shape::Rect { center, half_size }, color);
    }

    pub fn text(
        &mut self,
        anchor: Vec2,
        size: f32,
        align: Align,
        content: impl Into<String>,
        color: [f32; 4],
    ) {
        self.push(
            Shape::Text {
                anchor,
                size,
                align,
                content: content.into(),
            },
            color,
        );
    }

    fn push(&mut self, shape: Shape, color: [f32; 4]) {
        self.commands.push(DrawCommand {
            layer: self.layer,
            shape,
            color,
        });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Distinct layers in submission order (consecutive duplicates collapsed)
    pub fn layer_sequence(&self) -> Vec<Layer> {
        let mut seq: Vec<Layer> = Vec::new();
        for cmd in &self.commands {
            if seq.last() != Some(&cmd.layer) {
                seq.push(cmd.layer);
            }
        }
        seq
    }

    /// Commands drawn in `layer`
    pub fn in_layer(&self, layer: Layer) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(move |c| c.layer == layer)
    }

    /// Text lines, in submission order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match &c.shape {
            Shape::Text { content, .. } => Some(content.as_str()),
            _ => None,
        })
    }
}
