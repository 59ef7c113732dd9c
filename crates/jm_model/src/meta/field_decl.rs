use crate::info::FieldType;

/// A forced numeric coercion for a field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NumericMode {
    /// Only numbers are accepted.
    #[default]
    None,
    /// Numbers are truncated and numeric strings parsed, see [`jm_value::parse_int`].
    Int,
    /// Numbers and numeric strings are accepted, see [`jm_value::parse_float`].
    Float,
}

/// Mapping metadata of a single field.
///
/// All flags default to off, and the external key defaults to the property name.
///
/// # Examples
///
/// ```
/// use jm_model::info::FieldType;
/// use jm_model::meta::{FieldDecl, NumericMode};
///
/// let decl = FieldDecl::new()
///     .key("the_address")
///     .target(FieldType::Model("Address"))
///     .nullable();
///
/// assert_eq!(decl.key_or("address"), "the_address");
/// assert!(decl.is_nullable());
/// assert_eq!(decl.numeric_mode(), NumericMode::None);
/// assert_eq!(FieldDecl::new().key_or("address"), "address");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldDecl {
    key: Option<&'static str>,
    target: Option<FieldType>,
    numeric: NumericMode,
    nullable: bool,
    string_encoded: bool,
    dynamic_keyed: bool,
    excluded: bool,
}

impl FieldDecl {
    #[inline]
    pub const fn new() -> Self {
        Self {
            key: None,
            target: None,
            numeric: NumericMode::None,
            nullable: false,
            string_encoded: false,
            dynamic_keyed: false,
            excluded: false,
        }
    }

    /// Reads and writes the field under `key` instead of the property name.
    #[inline]
    pub const fn key(mut self, key: &'static str) -> Self {
        self.key = Some(key);
        self
    }

    /// Overrides the static type of the property as the coercion target.
    #[inline]
    pub const fn target(mut self, target: FieldType) -> Self {
        self.target = Some(target);
        self
    }

    /// An explicit `null` is stored instead of keeping the default.
    #[inline]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// A string payload holds JSON text of the nested value.
    #[inline]
    pub const fn string_encoded(mut self) -> Self {
        self.string_encoded = true;
        self
    }

    /// The payload is an object whose values are each of the target type.
    #[inline]
    pub const fn dynamic_keyed(mut self) -> Self {
        self.dynamic_keyed = true;
        self
    }

    #[inline]
    pub const fn parse_int(mut self) -> Self {
        self.numeric = NumericMode::Int;
        self
    }

    #[inline]
    pub const fn parse_float(mut self) -> Self {
        self.numeric = NumericMode::Float;
        self
    }

    /// The field is never written during serialization.
    #[inline]
    pub const fn excluded(mut self) -> Self {
        self.excluded = true;
        self
    }

    // -------------------------------------------------------------------------
    // Getters

    #[inline]
    pub const fn external_key(&self) -> Option<&'static str> {
        self.key
    }

    /// Returns the external key, or `field` if none was declared.
    #[inline]
    pub fn key_or<'a>(&self, field: &'a str) -> &'a str {
        self.key.unwrap_or(field)
    }

    #[inline]
    pub const fn target_type(&self) -> Option<FieldType> {
        self.target
    }

    #[inline]
    pub const fn numeric_mode(&self) -> NumericMode {
        self.numeric
    }

    #[inline]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    #[inline]
    pub const fn is_string_encoded(&self) -> bool {
        self.string_encoded
    }

    #[inline]
    pub const fn is_dynamic_keyed(&self) -> bool {
        self.dynamic_keyed
    }

    #[inline]
    pub const fn is_excluded(&self) -> bool {
        self.excluded
    }
}
