use super::Color;

/// Resolves the color uniform for a tinted draw.
///
/// A neutral (opaque white) tint yields `ambient` untouched; any other tint is
/// multiplied into it. Both branches agree numerically because white is the
/// identity of the product; the neutral branch only skips the multiply.
#[inline]
pub fn compose_tint(tint: Color, ambient: Color) -> Color {
    if tint.is_neutral() {
        ambient
    } else {
        tint * ambient
    }
}
