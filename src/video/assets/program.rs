impl_handle!(ProgramHandle);

/// The location of a uniform variable inside a linked program. `-1` marks a
/// variable the driver optimized away; uploads to it are ignored by GL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub i32);

impl UniformLocation {
    #[inline]
    pub fn is_active(self) -> bool {
        self.0 >= 0
    }
}

/// Sources and binding points of a GPU program.
#[derive(Debug, Clone, Default)]
pub struct ProgramParams {
    pub label: String,
    pub vertex: String,
    pub fragment: String,
    /// Sampler uniforms, assigned to a fixed texture unit once at link time.
    pub texture_bindings: Vec<(String, u32)>,
    /// Uniform blocks, assigned to a fixed uniform buffer binding point.
    pub uniform_bindings: Vec<(String, u32)>,
}

impl ProgramParams {
    pub fn new<T1, T2>(vertex: T1, fragment: T2) -> Self
    where
        T1: Into<String>,
        T2: Into<String>,
    {
        ProgramParams {
            vertex: vertex.into(),
            fragment: fragment.into(),
            ..Default::default()
        }
    }

    pub fn with_texture_binding<T: Into<String>>(mut self, name: T, unit: u32) -> Self {
        self.texture_bindings.push((name.into(), unit));
        self
    }

    pub fn with_uniform_binding<T: Into<String>>(mut self, name: T, index: u32) -> Self {
        self.uniform_bindings.push((name.into(), index));
        self
    }
}
