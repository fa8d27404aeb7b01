use glam::{Mat4, Vec3};

/// Supplies the model (scene placement) matrix composed into every draw.
pub trait ModelMatrixProvider {
    fn model_matrix(&self) -> Mat4;
}

impl ModelMatrixProvider for Mat4 {
    #[inline]
    fn model_matrix(&self) -> Mat4 {
        *self
    }
}

/// Nested model transforms.
///
/// The bottom entry is the identity and is never popped; each push composes
/// onto the current top, so the top is always the full accumulated matrix.
#[derive(Debug, Clone)]
pub struct ModelStack {
    stack: Vec<Mat4>,
}

impl Default for ModelStack {
    fn default() -> Self {
        Self { stack: vec![Mat4::IDENTITY] }
    }
}

impl ModelStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulated matrix at the top of the stack.
    #[inline]
    pub fn current(&self) -> Mat4 {
        self.stack.last().copied().unwrap_or(Mat4::IDENTITY)
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    /// Pushes `current × m`.
    pub fn push(&mut self, m: Mat4) {
        let top = self.current() * m;
        self.stack.push(top);
    }

    /// Pops the last push. Popping the identity base is ignored.
    pub fn pop(&mut self) -> Option<Mat4> {
        if self.stack.len() > 1 {
            self.stack.pop()
        } else {
            log::debug!("ModelStack::pop on empty stack ignored");
            None
        }
    }

    pub fn translate(&mut self, x: f32, y: f32) {
        self.apply(Mat4::from_translation(Vec3::new(x, y, 0.0)));
    }

    pub fn rotate(&mut self, radians: f32) {
        self.apply(Mat4::from_rotation_z(radians));
    }

    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.apply(Mat4::from_scale(Vec3::new(sx, sy, 1.0)));
    }

    /// Drops every push and returns to identity.
    pub fn reset(&mut self) {
        self.stack.truncate(1);
        self.stack[0] = Mat4::IDENTITY;
    }

    fn apply(&mut self, m: Mat4) {
        if let Some(top) = self.stack.last_mut() {
            *top = *top * m;
        }
    }
}

impl ModelMatrixProvider for ModelStack {
    #[inline]
    fn model_matrix(&self) -> Mat4 {
        self.current()
    }
}
