use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// TypeOptions

/// Options given when registering a type as mappable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TypeOptions {
    treat_null_as_default: bool,
}

impl TypeOptions {
    #[inline]
    pub const fn new() -> Self {
        Self {
            treat_null_as_default: false,
        }
    }

    /// Deserializing an explicit `null` yields a default instance instead of `null`.
    #[inline]
    pub const fn treat_null_as_default(mut self) -> Self {
        self.treat_null_as_default = true;
        self
    }
}

// -----------------------------------------------------------------------------
// TypeMeta

/// Runtime storage for one declared type, held by the [`TypeRegistry`](crate::TypeRegistry).
///
/// Mappability belongs to the type itself: a subtype of a mappable type is
/// not mappable until registered on its own.
#[derive(Clone, Debug)]
pub struct TypeMeta {
    info: TypeInfo,
    options: Option<TypeOptions>,
}

impl TypeMeta {
    #[inline]
    pub(crate) const fn new(info: TypeInfo) -> Self {
        Self {
            info,
            options: None,
        }
    }

    #[inline]
    pub(crate) fn set_options(&mut self, options: TypeOptions) {
        self.options = Some(options);
    }

    #[inline]
    pub const fn info(&self) -> &TypeInfo {
        &self.info
    }

    #[inline]
    pub const fn path(&self) -> &'static str {
        self.info.path()
    }

    #[inline]
    pub const fn parent(&self) -> Option<&'static str> {
        self.info.parent()
    }

    /// Returns the options, present only if the type was registered as mappable.
    #[inline]
    pub const fn options(&self) -> Option<&TypeOptions> {
        self.options.as_ref()
    }

    #[inline]
    pub const fn is_mappable(&self) -> bool {
        self.options.is_some()
    }

    #[inline]
    pub const fn treat_null_as_default(&self) -> bool {
        match &self.options {
            Some(options) => options.treat_null_as_default,
            None => false,
        }
    }
}
