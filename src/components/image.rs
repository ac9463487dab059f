use crate::{datatypes, loggable::delegate_component};

delegate_component!(
    /// **Component**: A buffer that is known to store image data.
    ///
    /// To interpret the contents of this buffer, see [`ImageFormat`].
    #[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
    ImageBuffer(datatypes::Blob) => "rerun.components.ImageBuffer"
);

delegate_component!(
    /// **Component**: The metadata describing the contents of an [`ImageBuffer`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    ImageFormat(datatypes::ImageFormat) => "rerun.components.ImageFormat"
);

impl From<Vec<u8>> for ImageBuffer {
    #[inline]
    fn from(bytes: Vec<u8>) -> Self {
        Self(datatypes::Blob(bytes))
    }
}

impl ImageFormat {
    #[inline]
    pub fn rgb8(size: [u32; 2]) -> Self {
        Self(datatypes::ImageFormat::rgb8(size))
    }

    #[inline]
    pub fn rgba8(size: [u32; 2]) -> Self {
        Self(datatypes::ImageFormat::rgba8(size))
    }
}
