use supports_color::Stream;

/// Determine if dump output should be colored.
///
/// Delegates to `supports-color`, which honors the
/// [`NO_COLOR`](https://no-color.org) and `FORCE_COLOR` environment
/// variables as well as terminal detection.
pub(crate) fn should_use_color() -> bool {
    supports_color::on(Stream::Stdout).is_some()
}
