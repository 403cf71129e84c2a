use palette::{Srgb, Srgba};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::collections::HashMap;
use strum::{Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator};

/// Looks up named colors, decoupling the chart from any resource system.
pub trait AssetProvider {
    fn color_named(&self, name: &str) -> Option<Srgba<f64>>;
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    SerializeDisplay,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ColorTemplate {
    Liberty,
    Joyful,
    Pastel,
    Colorful,
    #[default]
    Vordiplom,
    Material,
}

impl ColorTemplate {
    fn bundled(self) -> &'static [(u8, u8, u8)] {
        match self {
            Self::Liberty => &[
                (207, 248, 246),
                (148, 212, 212),
                (136, 180, 187),
                (118, 174, 175),
                (42, 109, 130),
            ],
            Self::Joyful => &[
                (217, 80, 138),
                (254, 149, 7),
                (254, 247, 120),
                (106, 167, 134),
                (53, 194, 209),
            ],
            Self::Pastel => &[
                (64, 89, 128),
                (149, 165, 124),
                (217, 184, 162),
                (191, 134, 134),
                (179, 48, 80),
            ],
            Self::Colorful => &[
                (193, 37, 82),
                (255, 102, 0),
                (245, 199, 0),
                (106, 150, 31),
                (179, 100, 53),
            ],
            Self::Vordiplom => &[
                (192, 255, 140),
                (255, 247, 140),
                (255, 208, 140),
                (140, 234, 255),
                (255, 140, 157),
            ],
            Self::Material => &[
                (0x2e, 0xcc, 0x71),
                (0xf1, 0xc4, 0x0f),
                (0xe7, 0x4c, 0x3c),
                (0x34, 0x98, 0xdb),
            ],
        }
    }

    pub fn asset_name(self, n: usize) -> String {
        format!("{}_{}", self, n)
    }

    /// Resolves `{template}_{n}` names until the provider runs out.
    pub fn colors(self, assets: &dyn AssetProvider) -> Vec<Srgba<f64>> {
        (0..)
            .map_while(|n| assets.color_named(&self.asset_name(n)))
            .collect()
    }
}

/// The color set shipped with the crate.
#[derive(Debug, Clone)]
pub struct BundledAssets {
    colors: HashMap<String, Srgba<f64>>,
}

impl Default for BundledAssets {
    fn default() -> Self {
        let mut colors = HashMap::new();
        for template in ColorTemplate::iter() {
            for (n, &(r, g, b)) in template.bundled().iter().enumerate() {
                colors.insert(template.asset_name(n), rgb8(r, g, b, 1.0));
            }
        }
        colors.insert("pie_hole".into(), rgb8(255, 255, 255, 1.0));
        colors.insert("pie_label".into(), rgb8(255, 255, 255, 1.0));
        colors.insert("pie_value".into(), rgb8(255, 255, 255, 1.0));
        colors.insert("pie_center_text".into(), rgb8(0, 0, 0, 1.0));
        Self { colors }
    }
}

impl BundledAssets {
    pub fn insert(&mut self, name: impl Into<String>, color: Srgba<f64>) {
        self.colors.insert(name.into(), color);
    }
}

impl AssetProvider for BundledAssets {
    fn color_named(&self, name: &str) -> Option<Srgba<f64>> {
        self.colors.get(name).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartColors {
    pub hole: Srgba<f64>,
    pub transparent_circle: Srgba<f64>,
    pub entry_label: Srgba<f64>,
    pub value: Srgba<f64>,
    pub center_text: Srgba<f64>,
}

impl ChartColors {
    pub fn from_provider(assets: &dyn AssetProvider) -> Self {
        let white = Srgba::new(1.0, 1.0, 1.0, 1.0);
        let hole = assets.color_named("pie_hole").unwrap_or(white);
        Self {
            hole,
            transparent_circle: Srgba::new(hole.red, hole.green, hole.blue, 0.5),
            entry_label: assets.color_named("pie_label").unwrap_or(white),
            value: assets.color_named("pie_value").unwrap_or(white),
            center_text: assets
                .color_named("pie_center_text")
                .unwrap_or(Srgba::new(0.0, 0.0, 0.0, 1.0)),
        }
    }
}

/// `#rrggbb`, with `#rrggbbaa` when not opaque.
pub fn color_to_hex(color: Srgba<f64>) -> String {
    let c: Srgba<u8> = color.into_format();
    if c.alpha == u8::MAX {
        format!("#{:02x}{:02x}{:02x}", c.red, c.green, c.blue)
    } else {
        format!("#{:02x}{:02x}{:02x}{:02x}", c.red, c.green, c.blue, c.alpha)
    }
}

fn rgb8(r: u8, g: u8, b: u8, alpha: f64) -> Srgba<f64> {
    let rgb: Srgb<f64> = Srgb::new(r, g, b).into_format();
    Srgba::new(rgb.red, rgb.green, rgb.blue, alpha)
}

/// Parses `#rrggbb`, `#rgb`, `rgb(r, g, b)` and `rgba(r, g, b, a)`.
pub fn color_from_string(s: &str) -> Option<Srgba<f64>> {
    let s = s.trim();
    if s.starts_with('#') {
        let rgb: Srgb<u8> = s.parse().ok()?;
        return Some(rgb8(rgb.red, rgb.green, rgb.blue, 1.0));
    }

    let (body, with_alpha) = if let Some(body) = s.strip_prefix("rgba(") {
        (body, true)
    } else {
        (s.strip_prefix("rgb(")?, false)
    };
    let parts: Vec<&str> = body.strip_suffix(')')?.split(',').map(str::trim).collect();

    match (parts.as_slice(), with_alpha) {
        ([r, g, b], false) => Some(rgb8(r.parse().ok()?, g.parse().ok()?, b.parse().ok()?, 1.0)),
        ([r, g, b, a], true) => {
            let alpha: f64 = a.parse().ok()?;
            Some(rgb8(
                r.parse().ok()?,
                g.parse().ok()?,
                b.parse().ok()?,
                alpha.clamp(0.0, 1.0),
            ))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_resolve_through_provider() {
        let assets = BundledAssets::default();
        assert_eq!(ColorTemplate::Liberty.colors(&assets).len(), 5);
        assert_eq!(ColorTemplate::Material.colors(&assets).len(), 4);
        assert_eq!(
            ColorTemplate::Joyful.colors(&assets)[1],
            rgb8(254, 149, 7, 1.0)
        );
    }

    #[test]
    fn test_template_names_parse() {
        assert_eq!(
            "Vordiplom".parse::<ColorTemplate>().unwrap(),
            ColorTemplate::Vordiplom
        );
        assert_eq!(ColorTemplate::Pastel.asset_name(2), "pastel_2");
    }

    #[test]
    fn test_chart_colors_fall_back() {
        struct Empty;
        impl AssetProvider for Empty {
            fn color_named(&self, _: &str) -> Option<Srgba<f64>> {
                None
            }
        }

        let colors = ChartColors::from_provider(&Empty);
        assert_eq!(colors.hole, Srgba::new(1.0, 1.0, 1.0, 1.0));
        assert_eq!(colors.transparent_circle.alpha, 0.5);

        let mut assets = BundledAssets::default();
        assets.insert("pie_hole", Srgba::new(0.2, 0.3, 0.4, 1.0));
        let colors = ChartColors::from_provider(&assets);
        assert_eq!(colors.transparent_circle, Srgba::new(0.2, 0.3, 0.4, 0.5));
    }

    #[test]
    fn test_color_to_hex() {
        assert_eq!(color_to_hex(rgb8(254, 149, 7, 1.0)), "#fe9507");
        assert_eq!(color_to_hex(rgb8(0, 0, 0, 0.0)), "#00000000");
    }

    #[test]
    fn test_color_from_string() {
        let cases = vec![
            ("#ff0000", Some(rgb8(255, 0, 0, 1.0))),
            ("#0f0", Some(rgb8(0, 255, 0, 1.0))),
            ("rgb(0, 0, 255)", Some(rgb8(0, 0, 255, 1.0))),
            ("rgba(10,20,30,0.5)", Some(rgb8(10, 20, 30, 0.5))),
            ("rgb(1, 2)", None),
            ("rgba(1, 2, 3)", None),
            ("#zzzzzz", None),
            ("teal", None),
        ];

        for (input, expected) in cases {
            assert_eq!(color_from_string(input), expected, "{input}");
        }
    }
}
