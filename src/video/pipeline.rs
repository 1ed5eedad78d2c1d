//! Pipeline state objects, resolved into native GL values.
//!
//! A `Pipeline` is built once from a `PipelineState` and never changes. The
//! renderer compares its fields as plain integers, so nothing symbolic is
//! left to interpret while draws are dispatched.

use gl;
use gl::types::GLenum;

use super::assets::prelude::*;
use super::backends::gl::types;

impl_field_struct! {
    pub struct StencilOp {
        pub face: u32,
        pub stencil_fail: u32,
        pub depth_fail: u32,
        pub pass: u32,
    }
}

impl_field_struct! {
    pub struct StencilFunc {
        pub face: u32,
        pub func: u32,
        pub reference: i32,
        pub mask: u32,
    }
}

impl_field_struct! {
    pub struct StencilMask {
        pub face: u32,
        pub mask: u32,
    }
}

impl_field_struct! {
    pub struct BlendEquation {
        pub mode_rgb: u32,
        pub mode_alpha: u32,
    }
}

impl_field_struct! {
    pub struct BlendFunc {
        pub source_rgb: u32,
        pub destination_rgb: u32,
        pub source_alpha: u32,
        pub destination_alpha: u32,
    }
}

impl_field_struct! {
    /// A vertex array object and the type of its indices.
    pub struct VertexArrayBinding {
        pub vertex_array: u32,
        pub index_type: u32,
    }
}

impl_field_struct! {
    pub struct Pipeline {
        pub program: u32,
        pub topology: u32,
        pub cull_test: bool,
        pub cull_face: u32,
        pub front_face: u32,
        pub depth_test: bool,
        pub depth_write: bool,
        pub depth_comparison: u32,
        pub stencil_test: bool,
        pub stencil_op_front: StencilOp,
        pub stencil_op_back: StencilOp,
        pub stencil_func_front: StencilFunc,
        pub stencil_func_back: StencilFunc,
        pub stencil_mask_front: StencilMask,
        pub stencil_mask_back: StencilMask,
        pub color_write: [bool; 4],
        pub blend_enabled: bool,
        pub blend_color: [f32; 4],
        pub blend_equation: BlendEquation,
        pub blend_func: BlendFunc,
        pub vertex_array: VertexArrayBinding,
    }
}

impl StencilOp {
    fn new(face: GLenum, state: &StencilOperationState) -> Self {
        StencilOp {
            face,
            stencil_fail: state.stencil_fail_op.into(),
            depth_fail: state.depth_fail_op.into(),
            pass: state.pass_op.into(),
        }
    }

    /// True if both sides carry the same operations, regardless of face.
    #[inline]
    pub fn same_as(&self, other: &StencilOp) -> bool {
        self.stencil_fail == other.stencil_fail
            && self.depth_fail == other.depth_fail
            && self.pass == other.pass
    }
}

impl StencilFunc {
    fn new(face: GLenum, state: &StencilOperationState) -> Self {
        StencilFunc {
            face,
            func: state.comparison.into(),
            reference: state.reference,
            mask: state.comparison_mask,
        }
    }

    #[inline]
    pub fn same_as(&self, other: &StencilFunc) -> bool {
        self.func == other.func && self.reference == other.reference && self.mask == other.mask
    }
}

impl StencilMask {
    fn new(face: GLenum, state: &StencilOperationState) -> Self {
        StencilMask {
            face,
            mask: state.write_mask,
        }
    }

    #[inline]
    pub fn same_as(&self, other: &StencilMask) -> bool {
        self.mask == other.mask
    }
}

impl Pipeline {
    /// Resolves `state` against an already created program and vertex array.
    pub fn new(state: &PipelineState, program: u32, vertex_array: VertexArrayBinding) -> Self {
        let cull_face = types::cull_face(state.culling);

        Pipeline {
            program,
            topology: state.topology.into(),
            cull_test: cull_face.is_some(),
            cull_face: cull_face.unwrap_or(gl::BACK),
            front_face: state.front_face.into(),
            depth_test: state.depth_test,
            depth_write: state.depth_write,
            depth_comparison: state.depth_comparison.into(),
            stencil_test: state.stencil_test,
            stencil_op_front: StencilOp::new(gl::FRONT, &state.stencil_front),
            stencil_op_back: StencilOp::new(gl::BACK, &state.stencil_back),
            stencil_func_front: StencilFunc::new(gl::FRONT, &state.stencil_front),
            stencil_func_back: StencilFunc::new(gl::BACK, &state.stencil_back),
            stencil_mask_front: StencilMask::new(gl::FRONT, &state.stencil_front),
            stencil_mask_back: StencilMask::new(gl::BACK, &state.stencil_back),
            color_write: state.color_write,
            blend_enabled: state.blend_enabled,
            blend_color: state.blend_color,
            blend_equation: BlendEquation {
                mode_rgb: state.blend_op_color.into(),
                mode_alpha: state.blend_op_alpha.into(),
            },
            blend_func: BlendFunc {
                source_rgb: state.blend_source_color_factor.into(),
                destination_rgb: state.blend_destination_color_factor.into(),
                source_alpha: state.blend_source_alpha_factor.into(),
                destination_alpha: state.blend_destination_alpha_factor.into(),
            },
            vertex_array,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::video::command::Field;

    #[test]
    fn resolve() {
        let mut state = PipelineState::default();
        state.culling = CullMode::Front;
        state.stencil_back.pass_op = StencilOperation::Invert;
        state.blend_source_color_factor = BlendFactor::SourceAlpha;

        let vao = VertexArrayBinding {
            vertex_array: 7,
            index_type: gl::UNSIGNED_INT,
        };

        let p = Pipeline::new(&state, 3, vao);
        assert_eq!(p.program, 3);
        assert_eq!(p.topology, gl::TRIANGLES);
        assert!(p.cull_test);
        assert_eq!(p.cull_face, gl::FRONT);
        assert_eq!(p.stencil_op_front.face, gl::FRONT);
        assert_eq!(p.stencil_op_back.face, gl::BACK);
        assert_eq!(p.stencil_op_back.pass, gl::INVERT);
        assert!(!p.stencil_op_front.same_as(&p.stencil_op_back));
        assert!(p.stencil_func_front.same_as(&p.stencil_func_back));
        assert_eq!(p.blend_func.source_rgb, gl::SRC_ALPHA);
        assert_eq!(p.vertex_array, vao);

        state.culling = CullMode::None;
        assert!(!Pipeline::new(&state, 3, vao).cull_test);
    }

    #[test]
    fn encoded_size() {
        assert_eq!(StencilOp::SIZE, 16);
        assert_eq!(Pipeline::SIZE, 4 * 2 + 1 + 4 * 2 + 2 + 4 + 1 + 32 + 32 + 16 + 4 + 1 + 16 + 8 + 16 + 8);
    }
}
