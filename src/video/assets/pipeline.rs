//! Declarative description of a pipeline state object.

use serde_json;

use super::program::ProgramHandle;
use super::vertex_array::VertexArrayHandle;
use crate::video::errors::Result;

impl_handle!(PipelineHandle);

/// How vertices are assembled into primitives.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Topology {
    Points,
    LineStrip,
    LineList,
    TriangleStrip,
    TriangleList,
    TriangleFan,
}

/// Specify whether front- or back-facing polygons can be culled.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum CullMode {
    None,
    Back,
    Front,
    FrontAndBack,
}

/// Define front- and back-facing polygons.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum FaceOrientation {
    CounterClockwise,
    Clockwise,
}

/// A pixel-wise comparison function.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Comparison {
    Never,
    Less,
    Equal,
    LessOrEqual,
    Greater,
    NotEqual,
    GreaterOrEqual,
    Always,
}

/// Action taken on the stored stencil value.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum StencilOperation {
    Keep,
    Zero,
    Replace,
    Increase,
    IncreaseWrap,
    Decrease,
    DecreaseWrap,
    Invert,
}

/// Specifies how incoming RGBA values (source) and the RGBA in framebuffer (destination)
/// are combined.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum BlendOperation {
    Add,
    Subtract,
    ReverseSubtract,
    Min,
    Max,
}

/// Blend factors.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum BlendFactor {
    Zero,
    One,
    SourceColor,
    OneMinusSourceColor,
    DestinationColor,
    OneMinusDestinationColor,
    SourceAlpha,
    OneMinusSourceAlpha,
    DestinationAlpha,
    OneMinusDestinationAlpha,
    ConstantColor,
    OneMinusConstantColor,
    ConstantAlpha,
    OneMinusConstantAlpha,
    SourceAlphaSaturate,
}

/// Stencil behaviour of one polygon face.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
#[serde(default)]
pub struct StencilOperationState {
    pub stencil_fail_op: StencilOperation,
    pub depth_fail_op: StencilOperation,
    pub pass_op: StencilOperation,
    pub comparison: Comparison,
    pub comparison_mask: u32,
    pub reference: i32,
    pub write_mask: u32,
}

impl Default for StencilOperationState {
    fn default() -> Self {
        StencilOperationState {
            stencil_fail_op: StencilOperation::Keep,
            depth_fail_op: StencilOperation::Keep,
            pass_op: StencilOperation::Keep,
            comparison: Comparison::Always,
            comparison_mask: 0xFF,
            reference: 0,
            write_mask: 0xFF,
        }
    }
}

/// The fixed-function render states of a pipeline. Fields that are missing
/// from a JSON description take their default value.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Copy)]
#[serde(default)]
pub struct PipelineState {
    pub topology: Topology,
    pub culling: CullMode,
    pub front_face: FaceOrientation,
    pub depth_test: bool,
    pub depth_write: bool,
    pub depth_comparison: Comparison,
    pub stencil_test: bool,
    pub stencil_front: StencilOperationState,
    pub stencil_back: StencilOperationState,
    pub color_write: [bool; 4],
    pub blend_enabled: bool,
    pub blend_color: [f32; 4],
    pub blend_op_color: BlendOperation,
    pub blend_op_alpha: BlendOperation,
    pub blend_source_color_factor: BlendFactor,
    pub blend_destination_color_factor: BlendFactor,
    pub blend_source_alpha_factor: BlendFactor,
    pub blend_destination_alpha_factor: BlendFactor,
}

impl Default for PipelineState {
    fn default() -> Self {
        PipelineState {
            topology: Topology::TriangleList,
            culling: CullMode::Back,
            front_face: FaceOrientation::CounterClockwise,
            depth_test: true,
            depth_write: true,
            depth_comparison: Comparison::Less,
            stencil_test: false,
            stencil_front: StencilOperationState::default(),
            stencil_back: StencilOperationState::default(),
            color_write: [true; 4],
            blend_enabled: false,
            blend_color: [0.0; 4],
            blend_op_color: BlendOperation::Add,
            blend_op_alpha: BlendOperation::Add,
            blend_source_color_factor: BlendFactor::One,
            blend_destination_color_factor: BlendFactor::Zero,
            blend_source_alpha_factor: BlendFactor::One,
            blend_destination_alpha_factor: BlendFactor::Zero,
        }
    }
}

impl PipelineState {
    /// Parses render states from a JSON document.
    ///
    /// ```rust,ignore
    /// let state = PipelineState::from_json(r#"{ "culling": "None", "blend_enabled": true }"#)?;
    /// ```
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Everything needed to build a pipeline: the program to run, where the
/// vertices come from and the render states to apply.
#[derive(Debug, Clone, Copy)]
pub struct PipelineInfo {
    pub program: ProgramHandle,
    pub vertex_array: VertexArrayHandle,
    pub state: PipelineState,
}

impl PipelineInfo {
    pub fn new(program: ProgramHandle, vertex_array: VertexArrayHandle) -> Self {
        PipelineInfo {
            program,
            vertex_array,
            state: PipelineState::default(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn json_defaults() {
        let state = PipelineState::from_json("{}").unwrap();
        assert_eq!(state, PipelineState::default());

        let state = PipelineState::from_json(
            r#"{
                "culling": "None",
                "blend_enabled": true,
                "blend_source_color_factor": "SourceAlpha",
                "stencil_front": { "pass_op": "Replace" }
            }"#,
        )
        .unwrap();

        assert_eq!(state.culling, CullMode::None);
        assert!(state.blend_enabled);
        assert_eq!(state.blend_source_color_factor, BlendFactor::SourceAlpha);
        assert_eq!(state.stencil_front.pass_op, StencilOperation::Replace);
        assert_eq!(state.stencil_front.write_mask, 0xFF);
        assert_eq!(state.stencil_back, StencilOperationState::default());
    }

    #[test]
    fn json_rejects_unknown_values() {
        assert!(PipelineState::from_json(r#"{ "culling": "Sideways" }"#).is_err());
    }

    #[test]
    fn json_roundtrip() {
        let mut state = PipelineState::default();
        state.topology = Topology::LineStrip;
        state.blend_color = [0.5, 0.25, 1.0, 0.0];

        let text = state.to_json().unwrap();
        assert_eq!(PipelineState::from_json(&text).unwrap(), state);
    }
}
