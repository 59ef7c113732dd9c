/// An ergonomic abbreviation for [`Default::default()`] to make initializing structs easier.
///
/// # Example
///
/// ```
/// use jm_utils::default;
///
/// #[derive(Default)]
/// struct Options {
///   nullable: bool,
///   string_encoded: bool,
/// }
///
/// let options = Options {
///   nullable: true,
///   ..default()
/// };
/// assert!(!options.string_encoded);
/// ```
#[inline(always)]
pub fn default<T: Default>() -> T {
    T::default()
}
