use bytemuck::{Pod, Zeroable};

/// Per-instance render data written to SharedArrayBuffer for the TypeScript renderer.
/// Must match the TypeScript protocol: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    /// Center X (world units, or screen pixels for UI instances).
    pub x: f32,
    /// Center Y.
    pub y: f32,
    /// Rendered width.
    pub width: f32,
    /// Rendered height.
    pub height: f32,
    /// Atlas index.
    pub atlas: f32,
    /// Atlas column.
    pub col: f32,
    /// Atlas row.
    pub row: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Render buffer: world-space instances first, then screen-space UI
/// instances starting at `ui_start`.
pub struct RenderBuffer {
    pub instances: Vec<RenderInstance>,
    /// Index of the first screen-space instance.
    pub ui_start: u32,
}

impl RenderBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            ui_start: 0,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.ui_start = 0;
    }

    pub fn push(&mut self, instance: RenderInstance) {
        self.instances.push(instance);
    }

    /// Mark everything pushed from now on as screen-space.
    pub fn begin_ui(&mut self) {
        self.ui_start = self.instances.len() as u32;
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for SharedArrayBuffer reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::with_capacity(512)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_instance_is_8_floats() {
        assert_eq!(std::mem::size_of::<RenderInstance>(), RenderInstance::STRIDE_BYTES);
    }

    #[test]
    fn ui_start_marks_split() {
        let mut buf = RenderBuffer::default();
        buf.push(RenderInstance::default());
        buf.begin_ui();
        buf.push(RenderInstance::default());
        assert_eq!(buf.instance_count(), 2);
        assert_eq!(buf.ui_start, 1);
        buf.clear();
        assert_eq!(buf.ui_start, 0);
    }
}
