impl_handle!(TextureHandle);

/// Pixel layouts of color textures.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum ColorFormat {
    RGBA8,
    RGBA16F,
    RGBA32F,
}

impl ColorFormat {
    /// Size of one texel in bytes.
    pub fn size(self) -> usize {
        match self {
            ColorFormat::RGBA8 => 4,
            ColorFormat::RGBA16F => 8,
            ColorFormat::RGBA32F => 16,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum TextureKind {
    Color2D {
        format: ColorFormat,
        mipmapping: bool,
        /// Stores the texels in sRGB space. Only meaningful for `RGBA8`.
        gamma_correction: bool,
    },
    Depth2D {
        /// Allows the texture to be sampled with a depth comparison.
        comparable: bool,
    },
    Stencil2D,
    DepthStencil2D,
}

impl TextureKind {
    #[inline]
    pub fn is_color(self) -> bool {
        match self {
            TextureKind::Color2D { .. } => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureParams {
    pub kind: TextureKind,
    pub width: u32,
    pub height: u32,
}

impl TextureParams {
    /// The number of mipmap levels allocated for this texture.
    pub fn levels(&self) -> u32 {
        match self.kind {
            TextureKind::Color2D {
                mipmapping: true, ..
            } => 32 - self.width.max(self.height).max(1).leading_zeros(),
            _ => 1,
        }
    }

    /// The size in bytes of the top level image of a color texture.
    pub fn image_size(&self) -> Option<usize> {
        match self.kind {
            TextureKind::Color2D { format, .. } => {
                Some(self.width as usize * self.height as usize * format.size())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn levels() {
        let mut params = TextureParams {
            kind: TextureKind::Color2D {
                format: ColorFormat::RGBA8,
                mipmapping: true,
                gamma_correction: false,
            },
            width: 256,
            height: 64,
        };

        assert_eq!(params.levels(), 9);
        assert_eq!(params.image_size(), Some(256 * 64 * 4));

        params.width = 1;
        params.height = 1;
        assert_eq!(params.levels(), 1);

        params.kind = TextureKind::Depth2D { comparable: false };
        params.width = 256;
        assert_eq!(params.levels(), 1);
        assert_eq!(params.image_size(), None);
    }
}
