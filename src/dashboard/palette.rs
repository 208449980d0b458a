use ratatui::style::Color;

/// Fixed category colors, used in order before any generated ones
pub const BASE_PALETTE: [Color; 7] = [
    Color::Rgb(79, 70, 229),
    Color::Rgb(16, 185, 129),
    Color::Rgb(245, 158, 11),
    Color::Rgb(239, 68, 68),
    Color::Rgb(139, 92, 246),
    Color::Rgb(14, 165, 233),
    Color::Rgb(20, 184, 166),
];

const GENERATED_SATURATION: f64 = 0.70;
const GENERATED_LIGHTNESS: f64 = 0.65;

/// Colors for `count` categories.
///
/// The first seven come from [`BASE_PALETTE`]. The remaining `count - 7` are spread
/// evenly around the hue circle: `hue = 360 * i / max(1, count - 7)`.
pub fn category_colors(count: usize) -> Vec<Color> {
    if count <= BASE_PALETTE.len() {
        return BASE_PALETTE[..count].to_vec();
    }

    let extra = count - BASE_PALETTE.len();
    let mut colors = BASE_PALETTE.to_vec();
    colors.extend((0..extra).map(|i| {
        let hue = 360.0 * i as f64 / extra.max(1) as f64;
        hsl_to_rgb(hue, GENERATED_SATURATION, GENERATED_LIGHTNESS)
    }));
    colors
}

/// Convert HSL (hue in degrees, saturation and lightness in 0..=1) to an RGB color
pub fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> Color {
    let h = hue.rem_euclid(360.0) / 60.0;
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = lightness - chroma / 2.0;
    let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Color::Rgb(channel(r), channel(g), channel(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_counts_use_base_palette() {
        assert!(category_colors(0).is_empty());
        assert_eq!(category_colors(3), BASE_PALETTE[..3].to_vec());
        assert_eq!(category_colors(7), BASE_PALETTE.to_vec());
    }

    #[test]
    fn test_extra_colors_rotate_hue() {
        let colors = category_colors(9);
        assert_eq!(colors.len(), 9);
        assert_eq!(&colors[..7], &BASE_PALETTE[..]);
        // i = 0 -> hue 0 (red-ish), i = 1 -> hue 180 (cyan-ish)
        assert_eq!(colors[7], hsl_to_rgb(0.0, 0.7, 0.65));
        assert_eq!(colors[8], hsl_to_rgb(180.0, 0.7, 0.65));
        assert_ne!(colors[7], colors[8]);
    }

    #[test]
    fn test_hsl_conversion() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), Color::Rgb(255, 0, 0));
        assert_eq!(hsl_to_rgb(120.0, 1.0, 0.5), Color::Rgb(0, 255, 0));
        assert_eq!(hsl_to_rgb(240.0, 1.0, 0.5), Color::Rgb(0, 0, 255));
        assert_eq!(hsl_to_rgb(0.0, 0.0, 1.0), Color::Rgb(255, 255, 255));
        assert_eq!(hsl_to_rgb(0.0, 0.7, 0.65), Color::Rgb(228, 103, 103));
    }
}
