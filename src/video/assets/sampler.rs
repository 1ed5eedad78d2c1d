use super::pipeline::Comparison;

impl_handle!(SamplerHandle);

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Wrap {
    Clamp,
    Repeat,
    Mirror,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Filter {
    Nearest,
    Linear,
    /// Linear filtering with the maximum anisotropy the driver allows.
    Anisotropic,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub struct SamplerParams {
    pub wrap: Wrap,
    pub filter: Filter,
    pub mipmapping: bool,
    /// Turns the sampler into a shadow sampler that compares against the
    /// reference value.
    pub comparison: Option<Comparison>,
}

impl Default for SamplerParams {
    fn default() -> Self {
        SamplerParams {
            wrap: Wrap::Clamp,
            filter: Filter::Nearest,
            mipmapping: false,
            comparison: None,
        }
    }
}
