//! The cache of fixed-function state and the diff that brings the device up
//! to date with it.

use gl;
use gl::types::*;

use super::super::backends::Device;
use super::super::pipeline::{BlendEquation, BlendFunc, StencilFunc, StencilOp};
use super::Renderer;

/// Every piece of fixed-function state the renderer keeps track of.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    pub cull_test: bool,
    pub cull_face: GLenum,
    pub front_face: GLenum,
    pub depth_test: bool,
    pub depth_mask: bool,
    pub depth_comparison: GLenum,
    pub stencil_test: bool,
    pub stencil_op_front: StencilOp,
    pub stencil_op_back: StencilOp,
    pub stencil_func_front: StencilFunc,
    pub stencil_func_back: StencilFunc,
    pub stencil_mask_front: GLuint,
    pub stencil_mask_back: GLuint,
    pub color_mask: [bool; 4],
    pub blending: bool,
    pub blend_color: [f32; 4],
    pub blend_equation: BlendEquation,
    pub blend_func: BlendFunc,
}

impl Default for State {
    fn default() -> Self {
        let stencil_op = |face| StencilOp {
            face,
            stencil_fail: gl::KEEP,
            depth_fail: gl::KEEP,
            pass: gl::KEEP,
        };

        let stencil_func = |face| StencilFunc {
            face,
            func: gl::ALWAYS,
            reference: 0x00,
            mask: 0xFF,
        };

        State {
            cull_test: false,
            cull_face: gl::BACK,
            front_face: gl::CCW,
            depth_test: false,
            depth_mask: true,
            depth_comparison: gl::LESS,
            stencil_test: false,
            stencil_op_front: stencil_op(gl::FRONT),
            stencil_op_back: stencil_op(gl::BACK),
            stencil_func_front: stencil_func(gl::FRONT),
            stencil_func_back: stencil_func(gl::BACK),
            stencil_mask_front: 0xFF,
            stencil_mask_back: 0xFF,
            color_mask: [true; 4],
            blending: false,
            blend_color: [0.0; 4],
            blend_equation: BlendEquation {
                mode_rgb: gl::FUNC_ADD,
                mode_alpha: gl::FUNC_ADD,
            },
            blend_func: BlendFunc {
                source_rgb: gl::ONE,
                destination_rgb: gl::ZERO,
                source_alpha: gl::ONE,
                destination_alpha: gl::ZERO,
            },
        }
    }
}

/// The faces a two-sided aspect has to be written to. Both sides collapse
/// into a single `FRONT_AND_BACK` write when they are equal.
fn faces(front: bool, back: bool, symmetric: bool) -> &'static [GLenum] {
    match (front, back) {
        (true, true) if symmetric => &[gl::FRONT_AND_BACK],
        (true, true) => &[gl::FRONT, gl::BACK],
        (true, false) => &[gl::FRONT],
        (false, true) => &[gl::BACK],
        (false, false) => &[],
    }
}

#[inline]
fn toggle<D: Device>(device: &mut D, cap: GLenum, enabled: bool) {
    if enabled {
        device.enable(cap);
    } else {
        device.disable(cap);
    }
}

impl Renderer {
    /// Issues the native calls that bring the device to the desired state.
    /// Every aspect is re-emitted after `invalidate`.
    pub(super) fn validate_state<D: Device>(&mut self, device: &mut D) {
        if self.dirty || self.invalidated {
            let forced = self.invalidated;
            self.validate_cull_test(device, forced);
            self.validate_cull_face(device, forced);
            self.validate_front_face(device, forced);
            self.validate_depth_test(device, forced);
            self.validate_depth_mask(device, forced);
            self.validate_depth_comparison(device, forced);
            self.validate_stencil_test(device, forced);
            self.validate_stencil_op(device, forced);
            self.validate_stencil_func(device, forced);
            self.validate_stencil_mask(device, forced);
            self.validate_color_mask(device, forced);
            self.validate_blending(device, forced);
            self.validate_blend_equation(device, forced);
            self.validate_blend_func(device, forced);
            self.validate_blend_color(device, forced);
        }

        self.dirty = false;
        self.invalidated = false;
    }

    fn validate_cull_test<D: Device>(&mut self, device: &mut D, forced: bool) {
        if forced || self.actual.cull_test != self.desired.cull_test {
            self.actual.cull_test = self.desired.cull_test;
            toggle(device, gl::CULL_FACE, self.actual.cull_test);
        }
    }

    fn validate_cull_face<D: Device>(&mut self, device: &mut D, forced: bool) {
        if forced || self.actual.cull_face != self.desired.cull_face {
            self.actual.cull_face = self.desired.cull_face;
            device.cull_face(self.actual.cull_face);
        }
    }

    fn validate_front_face<D: Device>(&mut self, device: &mut D, forced: bool) {
        if forced || self.actual.front_face != self.desired.front_face {
            self.actual.front_face = self.desired.front_face;
            device.front_face(self.actual.front_face);
        }
    }

    fn validate_depth_test<D: Device>(&mut self, device: &mut D, forced: bool) {
        if forced || self.actual.depth_test != self.desired.depth_test {
            self.actual.depth_test = self.desired.depth_test;
            toggle(device, gl::DEPTH_TEST, self.actual.depth_test);
        }
    }

    pub(super) fn validate_depth_mask<D: Device>(&mut self, device: &mut D, forced: bool) {
        if forced || self.actual.depth_mask != self.desired.depth_mask {
            self.actual.depth_mask = self.desired.depth_mask;
            device.depth_mask(self.actual.depth_mask);
        }
    }

    fn validate_depth_comparison<D: Device>(&mut self, device: &mut D, forced: bool) {
        if forced || self.actual.depth_comparison != self.desired.depth_comparison {
            self.actual.depth_comparison = self.desired.depth_comparison;
            device.depth_func(self.actual.depth_comparison);
        }
    }

    fn validate_stencil_test<D: Device>(&mut self, device: &mut D, forced: bool) {
        if forced || self.actual.stencil_test != self.desired.stencil_test {
            self.actual.stencil_test = self.desired.stencil_test;
            toggle(device, gl::STENCIL_TEST, self.actual.stencil_test);
        }
    }

    fn validate_stencil_op<D: Device>(&mut self, device: &mut D, forced: bool) {
        let (desired, actual) = (&self.desired, &mut self.actual);
        let front = forced || !actual.stencil_op_front.same_as(&desired.stencil_op_front);
        let back = forced || !actual.stencil_op_back.same_as(&desired.stencil_op_back);
        let symmetric = desired.stencil_op_front.same_as(&desired.stencil_op_back);

        if front {
            actual.stencil_op_front = desired.stencil_op_front;
        }

        if back {
            actual.stencil_op_back = desired.stencil_op_back;
        }

        for &face in faces(front, back, symmetric) {
            let v = if face == gl::BACK {
                actual.stencil_op_back
            } else {
                actual.stencil_op_front
            };

            device.stencil_op_separate(face, v.stencil_fail, v.depth_fail, v.pass);
        }
    }

    fn validate_stencil_func<D: Device>(&mut self, device: &mut D, forced: bool) {
        let (desired, actual) = (&self.desired, &mut self.actual);
        let front = forced || !actual.stencil_func_front.same_as(&desired.stencil_func_front);
        let back = forced || !actual.stencil_func_back.same_as(&desired.stencil_func_back);
        let symmetric = desired.stencil_func_front.same_as(&desired.stencil_func_back);

        if front {
            actual.stencil_func_front = desired.stencil_func_front;
        }

        if back {
            actual.stencil_func_back = desired.stencil_func_back;
        }

        for &face in faces(front, back, symmetric) {
            let v = if face == gl::BACK {
                actual.stencil_func_back
            } else {
                actual.stencil_func_front
            };

            device.stencil_func_separate(face, v.func, v.reference, v.mask);
        }
    }

    pub(super) fn validate_stencil_mask<D: Device>(&mut self, device: &mut D, forced: bool) {
        let (desired, actual) = (&self.desired, &mut self.actual);
        let front = forced || actual.stencil_mask_front != desired.stencil_mask_front;
        let back = forced || actual.stencil_mask_back != desired.stencil_mask_back;
        let symmetric = desired.stencil_mask_front == desired.stencil_mask_back;

        if front {
            actual.stencil_mask_front = desired.stencil_mask_front;
        }

        if back {
            actual.stencil_mask_back = desired.stencil_mask_back;
        }

        for &face in faces(front, back, symmetric) {
            let mask = if face == gl::BACK {
                actual.stencil_mask_back
            } else {
                actual.stencil_mask_front
            };

            device.stencil_mask_separate(face, mask);
        }
    }

    pub(super) fn validate_color_mask<D: Device>(&mut self, device: &mut D, forced: bool) {
        if forced || self.actual.color_mask != self.desired.color_mask {
            self.actual.color_mask = self.desired.color_mask;
            device.color_mask(self.actual.color_mask);
        }
    }

    fn validate_blending<D: Device>(&mut self, device: &mut D, forced: bool) {
        if forced || self.actual.blending != self.desired.blending {
            self.actual.blending = self.desired.blending;
            toggle(device, gl::BLEND, self.actual.blending);
        }
    }

    fn validate_blend_color<D: Device>(&mut self, device: &mut D, forced: bool) {
        if forced || self.actual.blend_color != self.desired.blend_color {
            self.actual.blend_color = self.desired.blend_color;
            device.blend_color(self.actual.blend_color);
        }
    }

    fn validate_blend_equation<D: Device>(&mut self, device: &mut D, forced: bool) {
        if forced || self.actual.blend_equation != self.desired.blend_equation {
            self.actual.blend_equation = self.desired.blend_equation;
            let v = self.actual.blend_equation;
            device.blend_equation_separate(v.mode_rgb, v.mode_alpha);
        }
    }

    fn validate_blend_func<D: Device>(&mut self, device: &mut D, forced: bool) {
        if forced || self.actual.blend_func != self.desired.blend_func {
            self.actual.blend_func = self.desired.blend_func;
            let v = self.actual.blend_func;
            device.blend_func_separate(
                v.source_rgb,
                v.destination_rgb,
                v.source_alpha,
                v.destination_alpha,
            );
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn coalesced_faces() {
        assert_eq!(faces(true, true, true), &[gl::FRONT_AND_BACK]);
        assert_eq!(faces(true, true, false), &[gl::FRONT, gl::BACK]);
        assert_eq!(faces(false, true, true), &[gl::BACK]);
        assert_eq!(faces(true, false, true), &[gl::FRONT]);
        assert!(faces(false, false, true).is_empty());
    }
}
