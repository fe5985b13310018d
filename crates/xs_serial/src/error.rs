use alloc::string::String;

use thiserror::Error;

/// Errors raised while resolving serializers or producing XML.
///
/// Resolution itself only fails with [`UnsupportedShape`] or
/// [`Construction`]. Both depend on the type alone, so retrying cannot help.
///
/// [`UnsupportedShape`]: SerialError::UnsupportedShape
/// [`Construction`]: SerialError::Construction
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SerialError {
    #[error("enumeration shape of `{type_path}` is not supported")]
    UnsupportedShape { type_path: &'static str },

    #[error("cannot construct a serializer for `{type_path}`: {reason}")]
    Construction {
        type_path: &'static str,
        reason: String,
    },

    #[error("value mismatch: expected `{expected}`, found `{found}`")]
    ValueMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("member `{member}` of type `{type_path}` must be a scalar to be written as attribute or text")]
    NotScalar {
        member: &'static str,
        type_path: &'static str,
    },

    #[error("`{action}` written outside of an open element")]
    Misplaced { action: &'static str },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Xml(#[from] quick_xml::Error),
}

impl SerialError {
    /// Returns `true` for the errors raised by serializer resolution.
    #[inline]
    pub fn is_resolution(&self) -> bool {
        matches!(self, Self::UnsupportedShape { .. } | Self::Construction { .. })
    }
}
